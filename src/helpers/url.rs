//! URL helper functions

use crate::config::SiteConfig;

/// Site-relative URL of a post
pub fn post_url(slug: &str) -> String {
    format!("/post/{}/", slug)
}

/// Site-relative URL of an index page; page 1 lives at the root
pub fn page_url(page_num: usize) -> String {
    if page_num <= 1 {
        "/".to_string()
    } else {
        format!("/page/{}/", page_num)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/about/") // -> "https://example.com/about/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    format!("{}/{}", config.base_url(), path.trim_start_matches('/'))
}
