//! sitegen: a small static blog generator
//!
//! Reads Markdown posts from a content directory, renders them into a shared
//! HTML template and writes a paginated home page, an archive and an about
//! page. The [`server`] module previews the result over HTTP.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Name of the optional configuration file in the base directory
pub const CONFIG_FILE: &str = "sitegen.yml";

/// The main site handle: configuration plus resolved directories
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory (posts and about page)
    pub source_dir: PathBuf,
    /// Output directory
    pub output_dir: PathBuf,
    /// Directory the static assets are copied from
    pub asset_dir: PathBuf,
}

impl Site {
    /// Create a new site from a directory, reading `sitegen.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let source_dir = base_dir.join(&config.source_dir);
        let output_dir = base_dir.join(&config.output_dir);
        let asset_dir = base_dir.join(&config.asset_dir);

        Self {
            config,
            base_dir,
            source_dir,
            output_dir,
            asset_dir,
        }
    }

    /// Directory holding the post sources
    pub fn posts_dir(&self) -> PathBuf {
        self.source_dir.join("post")
    }

    /// Source of the about page
    pub fn about_path(&self) -> PathBuf {
        self.source_dir.join("about").join("index.md")
    }

    /// Shared page template
    pub fn template_path(&self) -> PathBuf {
        self.output_dir.join(&self.config.template)
    }

    /// Build the static site
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Serve the output directory until interrupted
    pub async fn serve(&self, open: bool) -> Result<()> {
        commands::serve::run(self, open).await
    }
}
