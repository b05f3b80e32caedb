//! Fixtures for tests that need a content directory on disk

use std::fs;
use std::path::Path;

/// Render a blog post file the way an author would write it
pub(crate) fn post(title: &str, pub_date: &str, tags: Option<&[&str]>) -> String {
    let mut out = format!(
        "---\ntitle: {}\ndescription: {} description\npubDate: {}\n",
        title, title, pub_date
    );
    if let Some(tags) = tags {
        let list: Vec<String> = tags.iter().map(|t| format!("\"{}\"", t)).collect();
        out.push_str(&format!("tags: [{}]\n", list.join(", ")));
    }
    out.push_str("---\n");
    out.push_str(&format!("{} content\n", title));
    out
}

/// Write a file below `root`, creating parent directories
pub(crate) fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}
