//! Site configuration (sitegen.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub copyright: String,

    // URL
    pub url: String,
    pub stylesheet: String,

    // Directory
    pub source_dir: String,
    pub output_dir: String,
    pub asset_dir: String,
    pub template: String,
    pub assets: Vec<String>,

    // Aggregate page dates (home, archive, about)
    pub published: String,
    pub modified: String,

    // Pagination
    pub per_page: usize,

    // Preview server
    pub port: u16,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "redshiftzero".to_string(),
            description:
                "Personal blog about cryptography, security, privacy, and technology.".to_string(),
            author: "redshiftzero".to_string(),
            copyright: "© 1969–2025 redshiftzero".to_string(),

            url: "https://www.redshiftzero.com".to_string(),
            stylesheet:
                "/css/meme.min.0c24096f9051894f1547a4f579eebdb58f9b546189c9b7bfe789edf9d4be9a9a.css"
                    .to_string(),

            source_dir: "../content".to_string(),
            output_dir: ".".to_string(),
            asset_dir: "..".to_string(),
            template: "base-template.html".to_string(),
            assets: default_assets(),

            published: "2025-02-15T00:00:00+00:00".to_string(),
            modified: "2025-03-09T11:04:37-04:00".to_string(),

            per_page: 5,

            port: 8000,
        }
    }
}

fn default_assets() -> Vec<String> {
    [
        "css",
        "js",
        "img",
        "fonts",
        "icons",
        "favicon.ico",
        "manifest.json",
        "robots.txt",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(config)
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Page size, never zero
    pub fn page_size(&self) -> usize {
        self.per_page.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "redshiftzero");
        assert_eq!(config.per_page, 5);
        assert_eq!(config.port, 8000);
        assert_eq!(config.template, "base-template.html");
        assert!(config.assets.contains(&"robots.txt".to_string()));
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
url: https://blog.example.com/
per_page: 3
assets:
  - css
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.base_url(), "https://blog.example.com");
        assert_eq!(config.per_page, 3);
        assert_eq!(config.assets, vec!["css"]);
        // Unset keys keep their defaults
        assert_eq!(config.source_dir, "../content");
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let config = SiteConfig {
            per_page: 0,
            ..Default::default()
        };
        assert_eq!(config.page_size(), 1);
    }
}
