//! URL helper functions

use crate::config::SiteConfig;

/// Site-relative URL of a collection entry
///
/// # Examples
/// ```ignore
/// entry_url("blog", "hello-world") // -> "/blog/hello-world"
/// ```
pub fn entry_url(collection: &str, slug: &str) -> String {
    format!("/{}/{}", collection, slug)
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/blog/hello-world") // -> "https://example.com/blog/hello-world"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}
