//! Page assembly by token substitution into the shared base template
//!
//! The template is a plain HTML file carrying `{{TOKEN}}` placeholders. Each
//! token is substituted in one pass; tokens the template does not contain are
//! simply skipped, and stray tokens in the template are left as-is.

pub mod partials;

use std::fs;
use std::path::Path;

use crate::config::SiteConfig;

pub const PAGE_TITLE: &str = "{{PAGE_TITLE}}";
pub const PAGE_DESCRIPTION: &str = "{{PAGE_DESCRIPTION}}";
pub const CANONICAL_URL: &str = "{{CANONICAL_URL}}";
pub const OG_TYPE: &str = "{{OG_TYPE}}";
pub const TWITTER_CARD: &str = "{{TWITTER_CARD}}";
pub const SCHEMA_TYPE: &str = "{{SCHEMA_TYPE}}";
pub const PUBLISH_DATE: &str = "{{PUBLISH_DATE}}";
pub const MODIFIED_DATE: &str = "{{MODIFIED_DATE}}";
pub const MAIN_CONTENT: &str = "{{MAIN_CONTENT}}";

/// Per-page values substituted into the template head
#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    pub og_type: &'static str,
    pub twitter_card: &'static str,
    pub schema_type: &'static str,
    pub publish_date: String,
    pub modified_date: String,
}

impl PageMeta {
    /// Metadata for a site-level page (home, archive, about), which carries
    /// the configured site dates
    pub fn website(
        config: &SiteConfig,
        title: String,
        description: String,
        canonical_url: String,
        schema_type: &'static str,
    ) -> Self {
        Self {
            title,
            description,
            canonical_url,
            og_type: "website",
            twitter_card: "summary",
            schema_type,
            publish_date: config.published.clone(),
            modified_date: config.modified.clone(),
        }
    }

    /// Metadata for a single post
    pub fn article(title: String, description: String, canonical_url: String, date: String) -> Self {
        Self {
            title,
            description,
            canonical_url,
            og_type: "article",
            twitter_card: "summary",
            schema_type: "Article",
            publish_date: date.clone(),
            modified_date: date,
        }
    }
}

/// Shape of the document a page is rendered into
#[derive(Debug, Clone)]
enum Layout {
    /// Contents of the base template file
    File(String),
    /// Built-in minimal document used when no template file exists
    Inline,
}

/// The shared page template
#[derive(Debug, Clone)]
pub struct Template {
    layout: Layout,
    site_title: String,
    stylesheet: String,
    copyright: String,
}

impl Template {
    /// Load the template file, falling back to the inline document when it is
    /// missing or unreadable
    pub fn load(path: &Path, config: &SiteConfig) -> Self {
        let layout = match fs::read_to_string(path) {
            Ok(content) => Layout::File(content),
            Err(e) => {
                tracing::warn!(
                    "Template {:?} not available ({}), using built-in layout",
                    path,
                    e
                );
                Layout::Inline
            }
        };

        Self {
            layout,
            site_title: config.title.clone(),
            stylesheet: config.stylesheet.clone(),
            copyright: config.copyright.clone(),
        }
    }

    /// Template from an in-memory string
    pub fn from_string(content: impl Into<String>, config: &SiteConfig) -> Self {
        Self {
            layout: Layout::File(content.into()),
            site_title: config.title.clone(),
            stylesheet: config.stylesheet.clone(),
            copyright: config.copyright.clone(),
        }
    }

    #[cfg(test)]
    fn is_inline(&self) -> bool {
        matches!(self.layout, Layout::Inline)
    }

    /// Render a full HTML document
    pub fn render(&self, meta: &PageMeta, main_content: &str) -> String {
        match &self.layout {
            Layout::File(template) => template
                .replace(PAGE_TITLE, &meta.title)
                .replace(PAGE_DESCRIPTION, &meta.description)
                .replace(CANONICAL_URL, &meta.canonical_url)
                .replace(OG_TYPE, meta.og_type)
                .replace(TWITTER_CARD, meta.twitter_card)
                .replace(SCHEMA_TYPE, meta.schema_type)
                .replace(PUBLISH_DATE, &meta.publish_date)
                .replace(MODIFIED_DATE, &meta.modified_date)
                .replace(MAIN_CONTENT, main_content),
            Layout::Inline => self.render_inline(meta, main_content),
        }
    }

    fn render_inline(&self, meta: &PageMeta, main_content: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="{stylesheet}">
</head>
<body>
    <div class="container">
        <header class="header">
            <div class="site-brand">
                <a href="/" class="brand">{site}</a>
            </div>
        </header>

        <main class="main">
            {main}
        </main>

        <footer class="footer">
            <div class="site-info">{copyright}</div>
        </footer>
    </div>
</body>
</html>"#,
            title = meta.title,
            stylesheet = self.stylesheet,
            site = self.site_title,
            main = main_content,
            copyright = self.copyright,
        )
    }
}
