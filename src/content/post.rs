//! Post model

use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};

use super::{FrontMatter, MarkdownRenderer};
use crate::helpers::{normalize_newlines, summarize, SUMMARY_LENGTH};

/// A blog post, built once from its source file
#[derive(Debug, Clone)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Publication date, timezone-naive
    pub date: NaiveDateTime,

    /// Slug (URL-friendly name)
    pub slug: String,

    /// Page description, the title unless front-matter sets one
    pub description: String,

    /// Plain-text summary for the index pages
    pub summary: String,

    /// Rendered HTML body
    pub body: String,

    /// Full source file path
    pub source: PathBuf,
}

impl Post {
    /// Build a post from raw file text. Missing front-matter fields default
    /// here: title and slug to the file stem, date to now.
    pub fn from_source(path: &Path, text: &str, renderer: &MarkdownRenderer) -> Self {
        let text = normalize_newlines(text);
        let (fm, content) = FrontMatter::parse(&text);

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        let title = fm.title.unwrap_or_else(|| stem.clone());
        let date = fm.date.unwrap_or_else(|| Local::now().naive_local());
        let slug = fm.slug.unwrap_or(stem);
        let description = fm.description.unwrap_or_else(|| title.clone());

        Self {
            summary: summarize(content, SUMMARY_LENGTH),
            body: renderer.render_post(content),
            title,
            date,
            slug,
            description,
            source: path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_post_from_key_value_source() {
        let renderer = MarkdownRenderer::for_posts();
        let text = "+++\ntitle = \"Threat Models\"\ndate = \"2018-06-02\"\n+++\n\nA short intro.\n\n## Details\n";
        let post = Post::from_source(Path::new("content/post/threats.md"), text, &renderer);

        assert_eq!(post.title, "Threat Models");
        assert_eq!(post.slug, "threats");
        assert_eq!(post.description, "Threat Models");
        assert_eq!(
            post.date,
            NaiveDate::from_ymd_opt(2018, 6, 2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
        assert_eq!(post.summary, "A short intro.");
        assert!(post.body.contains("<p>A short intro.</p>"));
    }

    #[test]
    fn test_crlf_source_summary_stops_at_first_paragraph() {
        let renderer = MarkdownRenderer::for_posts();
        let text = "+++\r\ntitle = \"T\"\r\ndate = \"2019-03-10\"\r\n+++\r\n\r\nFirst para.\r\n\r\nSecond para.\r\n";
        let post = Post::from_source(Path::new("post/crlf.md"), text, &renderer);

        assert_eq!(post.title, "T");
        assert_eq!(post.summary, "First para.");
        assert!(post.body.contains("<p>First para.</p>"));
        assert!(post.body.contains("<p>Second para.</p>"));
        assert!(!post.body.contains('\r'));
    }

    #[test]
    fn test_post_defaults_from_file_stem() {
        let renderer = MarkdownRenderer::for_posts();
        let post = Post::from_source(Path::new("post/no-meta.md"), "Just text.", &renderer);
        assert_eq!(post.title, "no-meta");
        assert_eq!(post.slug, "no-meta");
    }

    #[test]
    fn test_post_slug_and_description_override() {
        let renderer = MarkdownRenderer::for_posts();
        let text = "---\ntitle: Hello\nslug: hi-there\ndescription: A greeting\n---\nBody";
        let post = Post::from_source(Path::new("post/hello.md"), text, &renderer);
        assert_eq!(post.slug, "hi-there");
        assert_eq!(post.description, "A greeting");
    }
}
