//! Create a new blog post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::loader::BLOG;
use crate::Folio;

/// Scaffold used when `scaffolds/post.md` does not exist
const DEFAULT_SCAFFOLD: &str = r#"---
title: {{ title }}
description: {{ description }}
pubDate: {{ date }}
tags: {{ tags }}
---
"#;

/// Create a new post in the blog collection, returning its path
pub fn create_post(
    folio: &Folio,
    title: &str,
    description: Option<&str>,
    tags: &[String],
) -> Result<PathBuf> {
    let title = title.trim();
    if title.is_empty() {
        anyhow::bail!("Post title must not be empty");
    }

    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    let target_dir = folio.content_dir.join(BLOG);
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    // Load scaffold template
    let scaffold_path = folio.base_dir.join("scaffolds").join("post.md");
    let scaffold = if scaffold_path.exists() {
        fs::read_to_string(&scaffold_path)?
    } else {
        DEFAULT_SCAFFOLD.to_string()
    };

    // JSON strings and arrays are valid YAML flow scalars, so quoting this
    // way survives colons and quotes in titles
    let description = description.unwrap_or(title);
    let content = scaffold
        .replace("{{ title }}", &serde_json::to_string(title)?)
        .replace("{{ description }}", &serde_json::to_string(description)?)
        .replace(
            "{{ date }}",
            &chrono::Local::now().format("%Y-%m-%d").to_string(),
        );
    let content = fill_tags(&content, tags)?;

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Substitute the tags placeholder, dropping its line when there are no tags
/// so the post has no `tags` field rather than an empty list
fn fill_tags(content: &str, tags: &[String]) -> Result<String> {
    const PLACEHOLDER: &str = "{{ tags }}";
    if !tags.is_empty() {
        return Ok(content.replace(PLACEHOLDER, &serde_json::to_string(tags)?));
    }
    Ok(content
        .split_inclusive('\n')
        .filter(|line| !line.contains(PLACEHOLDER))
        .collect())
}
