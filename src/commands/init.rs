//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::loader::{BLOG, RESUME};
use crate::{Folio, CONFIG_FILE};

const DEFAULT_CONFIG: &str = r#"# Folio Configuration

# Site
title: Folio
description: ''
author: John Doe

# URL
url: https://example.com

# Directory
content_dir: src/content

# Server
server:
  ip: localhost
  port: 4321
"#;

const SAMPLE_POST: &str = r#"---
title: "Hello, world"
description: "The first post on this site"
pubDate: 2024-01-01
tags: ["meta"]
---

Welcome! Edit or delete this post in the blog collection.
"#;

const SAMPLE_RESUME: &str = r#"[
  {
    "type": "academic",
    "school": "State University",
    "degree": "BSc Computer Science",
    "start": "2012",
    "end": "2016",
    "url": "https://example.edu"
  },
  {
    "type": "work",
    "employer": "Acme",
    "position": "Software Engineer",
    "start": "2016",
    "end": "Present",
    "url": "https://example.com"
  }
]
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("scaffolds"))?;
    write_if_missing(&target_dir.join(CONFIG_FILE), DEFAULT_CONFIG)?;

    // An existing config may point the content somewhere else
    let content_dir = Folio::new(target_dir)?.content_dir;
    let blog_dir = content_dir.join(BLOG);
    let resume_dir = content_dir.join(RESUME);
    fs::create_dir_all(&blog_dir)?;
    fs::create_dir_all(&resume_dir)?;

    write_if_missing(&blog_dir.join("hello-world.md"), SAMPLE_POST)?;
    write_if_missing(&resume_dir.join("resume.json"), SAMPLE_RESUME)?;

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::info!("Skipped existing file: {:?}", path);
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::debug!("Created: {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_site_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.server.port, 4321);
        assert_eq!(
            crate::commands::check::run(&folio).unwrap(),
            vec![("blog", 1), ("resume", 1)]
        );

        let posts = folio.list_posts(Some("meta")).unwrap();
        assert_eq!(posts[0].slug, "hello-world");
    }

    #[test]
    fn test_init_keeps_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "title: Mine\n").unwrap();

        init_site(dir.path()).unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.title, "Mine");
    }

    #[test]
    fn test_init_follows_existing_content_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "content_dir: content\n").unwrap();

        init_site(dir.path()).unwrap();
        assert!(dir.path().join("content/blog/hello-world.md").exists());
        assert!(!dir.path().join("src/content").exists());

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.list_posts(None).unwrap().len(), 1);
        assert_eq!(folio.store().load_resume().unwrap().len(), 2);
    }
}
