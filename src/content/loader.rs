//! Content loader - loads and validates collections from the content directory

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use super::entry::{BlogEntry, Collection, ResumeEntry, ResumeItem};
use super::error::LoadError;
use super::frontmatter::FrontMatter;
use super::schema::{self, SchemaValidationError};

/// Collection of markdown blog posts
pub const BLOG: &str = "blog";

/// Data collection holding the author's resume
pub const RESUME: &str = "resume";

/// Every collection the store knows about
pub const COLLECTIONS: &[&str] = &[BLOG, RESUME];

const CONTENT_EXTENSIONS: &[&str] = &["md", "mdx"];
const DATA_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Loads collections from `<root>/<collection>/`
///
/// Every call reads the current file set; nothing is cached between loads.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    /// Create a store rooted at the content directory
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Content directory root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load and validate every entry of a named collection
    pub fn load_collection(&self, name: &str) -> Result<Collection, LoadError> {
        match name {
            BLOG => Ok(Collection::Blog(self.load_blog()?)),
            RESUME => Ok(Collection::Resume(self.load_resume_entries()?)),
            _ => Err(LoadError::UnknownCollection {
                name: name.to_string(),
                available: COLLECTIONS.join(", "),
            }),
        }
    }

    /// Load all posts from the `blog` collection
    pub fn load_blog(&self) -> Result<Vec<BlogEntry>, LoadError> {
        let files = self.collection_files(BLOG, CONTENT_EXTENSIONS)?;
        let mut slugs = SlugSet::new(BLOG);
        let mut entries = Vec::with_capacity(files.len());

        for (path, slug) in files {
            let entry = load_blog_entry(&path, slug)?;
            slugs.insert(&entry.slug, &entry.source)?;
            entries.push(entry);
        }

        tracing::debug!("Loaded {} entries from collection `{}`", entries.len(), BLOG);
        Ok(entries)
    }

    /// Load all data files from the `resume` collection
    pub fn load_resume_entries(&self) -> Result<Vec<ResumeEntry>, LoadError> {
        let files = self.collection_files(RESUME, DATA_EXTENSIONS)?;
        let mut slugs = SlugSet::new(RESUME);
        let mut entries = Vec::with_capacity(files.len());

        for (path, slug) in files {
            slugs.insert(&slug, &path)?;
            entries.push(load_resume_entry(path, slug)?);
        }

        tracing::debug!("Loaded {} entries from collection `{}`", entries.len(), RESUME);
        Ok(entries)
    }

    /// All resume items, in file order
    pub fn load_resume(&self) -> Result<Vec<ResumeItem>, LoadError> {
        Ok(self
            .load_resume_entries()?
            .into_iter()
            .flat_map(|entry| entry.items)
            .collect())
    }

    /// List the files of a collection with their derived slugs, sorted by path
    fn collection_files(
        &self,
        collection: &str,
        extensions: &[&str],
    ) -> Result<Vec<(PathBuf, String)>, LoadError> {
        let dir = self.root.join(collection);
        if !dir.is_dir() {
            tracing::debug!("Collection directory {:?} does not exist", dir);
            return Ok(Vec::new());
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(&dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_ignored(e))
        {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.clone());
                LoadError::Io {
                    path,
                    source: e.into(),
                }
            })?;

            let path = entry.path();
            if !entry.file_type().is_file() || !has_extension(path, extensions) {
                continue;
            }

            let relative = path.strip_prefix(&dir).unwrap_or(path);
            files.push((path.to_path_buf(), slug_from_path(relative)));
        }

        Ok(files)
    }
}

/// Load a single post from a file
fn load_blog_entry(path: &Path, slug: String) -> Result<BlogEntry, LoadError> {
    let content = read(path)?;
    let (fm, _body) = FrontMatter::parse(&content).map_err(|e| LoadError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let validated = schema::validate_blog(&fm.data).map_err(|issues| SchemaValidationError {
        collection: BLOG.to_string(),
        slug: slug.clone(),
        path: path.to_path_buf(),
        issues,
    })?;

    Ok(BlogEntry {
        collection: BLOG.to_string(),
        slug: validated.slug.unwrap_or(slug),
        source: path.to_path_buf(),
        data: validated.data,
    })
}

/// Load a single resume data file
fn load_resume_entry(path: PathBuf, slug: String) -> Result<ResumeEntry, LoadError> {
    let content = read(&path)?;
    // JSON is valid YAML, so one parser covers every data extension
    let value: serde_yaml::Value = serde_yaml::from_str(&content).map_err(|e| LoadError::Parse {
        path: path.clone(),
        message: e.to_string(),
    })?;

    match schema::validate_resume(&value) {
        Ok(items) => Ok(ResumeEntry {
            slug,
            source: path,
            items,
        }),
        Err(issues) => Err(SchemaValidationError {
            collection: RESUME.to_string(),
            slug,
            path,
            issues,
        }
        .into()),
    }
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Tracks slugs already seen in one collection
struct SlugSet<'a> {
    collection: &'a str,
    seen: HashMap<String, PathBuf>,
}

impl<'a> SlugSet<'a> {
    fn new(collection: &'a str) -> Self {
        Self {
            collection,
            seen: HashMap::new(),
        }
    }

    fn insert(&mut self, slug: &str, path: &Path) -> Result<(), LoadError> {
        if let Some(first) = self.seen.get(slug) {
            return Err(LoadError::DuplicateSlug {
                collection: self.collection.to_string(),
                slug: slug.to_string(),
                first: first.clone(),
                second: path.to_path_buf(),
            });
        }
        self.seen.insert(slug.to_string(), path.to_path_buf());
        Ok(())
    }
}

/// Derive a slug from a path relative to the collection directory
///
/// `2021/Hello World.md` becomes `2021/hello-world`.
pub fn slug_from_path(relative: &Path) -> String {
    relative
        .with_extension("")
        .components()
        .map(|c| {
            let segment = c.as_os_str().to_string_lossy();
            let slug = slug::slugify(&segment);
            if slug.is_empty() {
                segment.into_owned()
            } else {
                slug
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Files and directories starting with `_` or `.` are not content
fn is_ignored(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('_') || name.starts_with('.'))
        .unwrap_or(false)
}

/// Check if a file has one of the collection's extensions
fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.contains(&e))
        .unwrap_or(false)
}
