//! folio: a schema-validated content API for a personal blog and portfolio
//!
//! Content lives in flat files grouped into collections (`blog` posts with
//! YAML frontmatter, `resume` data files). The crate validates every entry
//! against its collection schema, answers queries over the posts, and serves
//! the results as JSON over HTTP.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod query;
pub mod server;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::path::Path;

/// Name of the site configuration file in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// The main application
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content directory (holds one directory per collection)
    pub content_dir: std::path::PathBuf,
}

impl Folio {
    /// Create a new Folio instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// Content store over this site's content directory
    pub fn store(&self) -> content::ContentStore {
        content::ContentStore::new(&self.content_dir)
    }

    /// List blog posts, newest first, optionally filtered by tag
    pub fn list_posts(&self, tag: Option<&str>) -> Result<Vec<query::PostSummary>> {
        Ok(query::list_posts(&self.store(), tag)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{post, write_file};

    #[test]
    fn test_defaults_without_config() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.content_dir, dir.path().join("src/content"));
        assert!(folio.list_posts(None).unwrap().is_empty());
    }

    #[test]
    fn test_content_dir_from_config() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), CONFIG_FILE, "content_dir: content\n");
        write_file(
            dir.path(),
            "content/blog/hello.md",
            &post("Hello", "2021-01-01", Some(&["intro"])),
        );

        let folio = Folio::new(dir.path()).unwrap();
        let posts = folio.list_posts(Some("intro")).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].url, "/blog/hello");
    }
}
