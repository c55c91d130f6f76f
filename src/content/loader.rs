//! Content loader - loads posts and the about page from the source directory

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::{FrontMatter, MarkdownRenderer, Post};
use crate::helpers::normalize_newlines;
use crate::Site;

/// Loads content from the source directory
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        Self {
            site,
            renderer: MarkdownRenderer::for_posts(),
        }
    }

    /// Markdown files directly under `<source>/post`, in file-name order
    pub fn post_files(&self) -> Result<Vec<PathBuf>> {
        let posts_dir = self.site.posts_dir();
        if !posts_dir.is_dir() {
            tracing::warn!("Posts directory not found: {:?}", posts_dir);
            return Ok(Vec::new());
        }

        let pattern = format!(
            "{}/*.md",
            glob::Pattern::escape(&posts_dir.to_string_lossy())
        );
        let mut files = Vec::new();
        for entry in glob::glob(&pattern).context("Invalid posts pattern")? {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => tracing::warn!("Skipping unreadable entry: {}", e),
            }
        }
        files.sort();

        Ok(files)
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path) -> Result<Post> {
        let text =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        Ok(Post::from_source(path, &text, &self.renderer))
    }

    /// Markdown body of the about page with its front-matter split off, or
    /// `None` if the page does not exist
    pub fn load_about(&self) -> Result<Option<String>> {
        let path = self.site.about_path();
        if !path.is_file() {
            return Ok(None);
        }

        let text =
            fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;
        let text = normalize_newlines(&text);
        Ok(Some(FrontMatter::strip_raw(&text).to_string()))
    }
}
