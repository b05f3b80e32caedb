//! Collection entry models

use chrono::{DateTime, Utc};
use std::path::PathBuf;

use crate::helpers;

/// Validated blog frontmatter
#[derive(Debug, Clone, PartialEq)]
pub struct BlogData {
    /// Post title
    pub title: String,

    /// Short summary shown in listings
    pub description: String,

    /// Publication date
    pub pub_date: DateTime<Utc>,

    /// Last updated date
    pub updated_date: Option<DateTime<Utc>>,

    /// Hero image path or URL, never checked for existence
    pub hero_image: Option<String>,

    /// Post tags. `None` means the field was absent, which is not the same as `Some(vec![])`
    pub tags: Option<Vec<String>>,
}

/// A blog post in the `blog` collection
#[derive(Debug, Clone, PartialEq)]
pub struct BlogEntry {
    /// Collection name
    pub collection: String,

    /// Identifier derived from the file name, unique within the collection
    pub slug: String,

    /// Full source file path
    pub source: PathBuf,

    /// Validated frontmatter
    pub data: BlogData,
}

impl BlogEntry {
    /// Site-relative URL of the post
    pub fn url(&self) -> String {
        helpers::entry_url(&self.collection, &self.slug)
    }
}

/// Kind of a resume entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeKind {
    Work,
    Academic,
}

impl ResumeKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "work" => Some(ResumeKind::Work),
            "academic" => Some(ResumeKind::Academic),
            _ => None,
        }
    }
}

/// One line of the author's work or academic history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeItem {
    pub kind: ResumeKind,
    pub school: Option<String>,
    pub degree: Option<String>,
    pub position: Option<String>,
    pub employer: Option<String>,
    pub start: String,
    pub end: String,
    pub url: String,
}

/// A data file in the `resume` collection (an array of items)
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeEntry {
    /// Identifier derived from the file name
    pub slug: String,

    /// Full source file path
    pub source: PathBuf,

    pub items: Vec<ResumeItem>,
}

/// A loaded collection
#[derive(Debug, Clone, PartialEq)]
pub enum Collection {
    Blog(Vec<BlogEntry>),
    Resume(Vec<ResumeEntry>),
}

impl Collection {
    /// Number of entries (files) in the collection
    pub fn len(&self) -> usize {
        match self {
            Collection::Blog(entries) => entries.len(),
            Collection::Resume(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
