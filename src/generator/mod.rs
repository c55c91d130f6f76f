//! Generator module - writes the static HTML tree
//!
//! One build pass copies the static assets, converts every post, then writes
//! the paginated index, the archive and the about page. The generator owns the
//! list of posts built during the pass.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::loader::ContentLoader;
use crate::content::{MarkdownRenderer, Post};
use crate::helpers::{date_iso, full_url_for, post_url};
use crate::templates::{partials, PageMeta, Template};
use crate::Site;

/// Static site generator
pub struct Generator<'a> {
    site: &'a Site,
    loader: ContentLoader<'a>,
    template: Template,
    posts: Vec<Post>,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(site: &'a Site) -> Self {
        Self {
            site,
            loader: ContentLoader::new(site),
            template: Template::load(&site.template_path(), &site.config),
            posts: Vec::new(),
        }
    }

    /// Posts converted so far, newest first once the index has been written
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Generate the entire site
    pub fn build(&mut self) -> Result<()> {
        tracing::info!("Building static site...");

        fs::create_dir_all(&self.site.output_dir).with_context(|| {
            format!("Failed to create output dir {:?}", self.site.output_dir)
        })?;

        self.copy_assets()?;
        self.convert_posts()?;

        // Newest first; equal dates keep their load order
        self.posts.sort_by(|a, b| b.date.cmp(&a.date));

        self.generate_index_pages()?;
        self.generate_archive_page()?;
        self.generate_about_page()?;

        tracing::info!("Static site built successfully!");
        Ok(())
    }

    /// Copy CSS, JS, images, and other static assets
    fn copy_assets(&self) -> Result<()> {
        tracing::info!("Copying static assets...");

        for name in &self.site.config.assets {
            let src = self.site.asset_dir.join(name);
            let dst = self.site.output_dir.join(name);

            if !src.exists() {
                continue;
            }
            if is_same_path(&src, &dst) {
                tracing::debug!("Skipping {:?}, already in place", src);
                continue;
            }

            if src.is_file() {
                fs::copy(&src, &dst)
                    .with_context(|| format!("Failed to copy {:?} -> {:?}", src, dst))?;
            } else {
                if dst.exists() {
                    fs::remove_dir_all(&dst)
                        .with_context(|| format!("Failed to remove {:?}", dst))?;
                }
                copy_dir(&src, &dst)?;
            }
            tracing::info!("  Copied {} -> {}", src.display(), name);
        }

        Ok(())
    }

    /// Convert every post source and write both URL layouts
    fn convert_posts(&mut self) -> Result<()> {
        tracing::info!("Converting posts...");

        for path in self.loader.post_files()? {
            tracing::info!(
                "  Converting {}",
                path.file_name().unwrap_or_default().to_string_lossy()
            );
            match self.loader.load_post(&path) {
                Ok(post) => {
                    self.write_post(&post)?;
                    self.posts.push(post);
                }
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {:#}", path, e);
                }
            }
        }

        Ok(())
    }

    /// Write a post to `posts/<slug>.html` and `post/<slug>/index.html`
    fn write_post(&self, post: &Post) -> Result<()> {
        let config = &self.site.config;
        let meta = PageMeta::article(
            format!("{} | {}", post.title, config.title),
            post.description.clone(),
            full_url_for(config, &post_url(&post.slug)),
            date_iso(&post.date),
        );
        let html = self.template.render(&meta, &partials::post_article(post));

        self.write_page(&format!("posts/{}.html", post.slug), &html)?;
        self.write_page(&format!("post/{}/index.html", post.slug), &html)?;
        Ok(())
    }

    /// Generate index pages with pagination
    fn generate_index_pages(&self) -> Result<()> {
        tracing::info!("  Generating main index with pagination...");

        let config = &self.site.config;
        let per_page = config.page_size();
        let total_pages = self.posts.len().div_ceil(per_page);

        for (i, page_posts) in self.posts.chunks(per_page).enumerate() {
            let page_num = i + 1;

            let title = if page_num == 1 {
                config.title.clone()
            } else {
                format!("{} - Page {}", config.title, page_num)
            };
            let meta = PageMeta::website(
                config,
                title,
                config.description.clone(),
                full_url_for(config, "/"),
                "WebSite",
            );

            let content =
                partials::index_page(page_posts, &partials::pagination(page_num, total_pages));
            let html = self.template.render(&meta, &content);

            let output_path = if page_num == 1 {
                "index.html".to_string()
            } else {
                format!("page/{}/index.html", page_num)
            };
            self.write_page(&output_path, &html)?;
        }

        tracing::info!(
            "    Generated {} pages with {} posts total",
            total_pages,
            self.posts.len()
        );
        Ok(())
    }

    /// Generate the archive page listing every post
    fn generate_archive_page(&self) -> Result<()> {
        tracing::info!("  Generating archive page...");

        let config = &self.site.config;
        let meta = PageMeta::website(
            config,
            format!("Archive | {}", config.title),
            "Complete archive of all blog posts".to_string(),
            full_url_for(config, "/archive/"),
            "WebPage",
        );
        let html = self.template.render(&meta, &partials::archive(&self.posts));

        self.write_page("archive/index.html", &html)
    }

    /// Generate the about page, with placeholder content if there is no source
    fn generate_about_page(&self) -> Result<()> {
        tracing::info!("  Generating about page...");

        let body = match self.loader.load_about() {
            Ok(Some(markdown)) => {
                tracing::info!("    Created about page from Markdown content");
                MarkdownRenderer::for_pages().render(&markdown)
            }
            Ok(None) => {
                tracing::warn!("    No about/index.md found, using placeholder");
                partials::ABOUT_PLACEHOLDER.to_string()
            }
            Err(e) => {
                tracing::warn!("    Could not read about page ({:#}), using placeholder", e);
                partials::ABOUT_PLACEHOLDER.to_string()
            }
        };

        let config = &self.site.config;
        let meta = PageMeta::website(
            config,
            format!("About | {}", config.title),
            format!("About {}", config.title),
            full_url_for(config, "/about/"),
            "WebPage",
        );
        let html = self
            .template
            .render(&meta, &partials::page_article("About", &body));

        self.write_page("about/index.html", &html)
    }

    /// Write a document below the output directory
    fn write_page(&self, relative: &str, html: &str) -> Result<()> {
        let output_path = self.site.output_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, html)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }
}

/// Recursively copy a directory tree
fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(src)?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create dir {:?}", target))?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy {:?}", entry.path()))?;
        }
    }
    Ok(())
}

fn is_same_path(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const TEMPLATE: &str = "<html><head><title>{{PAGE_TITLE}}</title>\
        <meta name=\"description\" content=\"{{PAGE_DESCRIPTION}}\">\
        <link rel=\"canonical\" href=\"{{CANONICAL_URL}}\">\
        <meta property=\"og:type\" content=\"{{OG_TYPE}}\">\
        <meta name=\"twitter:card\" content=\"{{TWITTER_CARD}}\">\
        <script>{\"@type\": \"{{SCHEMA_TYPE}}\", \"datePublished\": \"{{PUBLISH_DATE}}\", \
        \"dateModified\": \"{{MODIFIED_DATE}}\"}</script></head>\
        <body>{{MAIN_CONTENT}}</body></html>";

    struct Fixture {
        dir: TempDir,
        site: Site,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let config = SiteConfig {
                source_dir: "content".to_string(),
                output_dir: "public".to_string(),
                asset_dir: "static".to_string(),
                ..Default::default()
            };
            let site = Site::with_config(dir.path(), config);
            fs::create_dir_all(site.posts_dir()).unwrap();
            fs::create_dir_all(&site.output_dir).unwrap();
            fs::write(site.template_path(), TEMPLATE).unwrap();
            Self { dir, site }
        }

        fn add_post(&self, name: &str, date: &str, body: &str) {
            let text = format!(
                "+++\ntitle = \"Post {}\"\ndate = \"{}\"\n+++\n\n{}\n",
                name, date, body
            );
            fs::write(self.site.posts_dir().join(format!("{}.md", name)), text).unwrap();
        }

        fn build(&self) -> Vec<Post> {
            let mut generator = Generator::new(&self.site);
            generator.build().unwrap();
            generator.posts().to_vec()
        }

        fn read(&self, relative: &str) -> String {
            fs::read_to_string(self.site.output_dir.join(relative)).unwrap()
        }

        fn exists(&self, relative: &str) -> bool {
            self.site.output_dir.join(relative).exists()
        }

        fn snapshot(&self) -> BTreeMap<PathBuf, Vec<u8>> {
            WalkDir::new(&self.site.output_dir)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| {
                    let relative = e.path().strip_prefix(self.dir.path()).unwrap().to_path_buf();
                    (relative, fs::read(e.path()).unwrap())
                })
                .collect()
        }
    }

    #[test]
    fn test_post_publish_date_is_midnight() {
        let fixture = Fixture::new();
        fixture.add_post("hello", "2019-03-10", "Hello there.");
        fixture.build();

        let html = fixture.read("post/hello/index.html");
        assert!(html.contains(r#""datePublished": "2019-03-10T00:00:00""#));
        assert!(html.contains(r#""dateModified": "2019-03-10T00:00:00""#));
        assert!(html.contains("<title>Post hello | redshiftzero</title>"));
        assert!(html.contains(r#"href="https://www.redshiftzero.com/post/hello/""#));
        assert!(html.contains(r#"content="article""#));
        assert!(html.contains(r#""@type": "Article""#));
    }

    #[test]
    fn test_dual_paths_are_identical() {
        let fixture = Fixture::new();
        fixture.add_post("twin", "2020-01-01", "Same bytes.");
        fixture.build();

        assert_eq!(
            fs::read(fixture.site.output_dir.join("post/twin/index.html")).unwrap(),
            fs::read(fixture.site.output_dir.join("posts/twin.html")).unwrap()
        );
    }

    #[test]
    fn test_pagination_page_count_and_order() {
        let fixture = Fixture::new();
        for day in 1..=12 {
            fixture.add_post(&format!("p{:02}", day), &format!("2021-01-{:02}", day), "Text.");
        }
        let posts = fixture.build();

        // Newest first
        assert_eq!(posts.first().unwrap().slug, "p12");
        assert_eq!(posts.last().unwrap().slug, "p01");

        assert!(fixture.exists("index.html"));
        assert!(fixture.exists("page/2/index.html"));
        assert!(fixture.exists("page/3/index.html"));
        assert!(!fixture.exists("page/4/index.html"));
        assert!(!fixture.exists("page/1/index.html"));

        let first = fixture.read("index.html");
        for day in 8..=12 {
            assert!(first.contains(&format!(r#"href="/post/p{:02}/""#, day)));
        }
        assert!(!first.contains(r#"href="/post/p07/""#));
        assert!(first.contains("<title>redshiftzero</title>"));

        let last = fixture.read("page/3/index.html");
        assert!(last.contains(r#"href="/post/p02/""#));
        assert!(last.contains(r#"href="/post/p01/""#));
        assert!(!last.contains(r#"href="/post/p03/""#));
        assert!(last.contains("<title>redshiftzero - Page 3</title>"));
        assert!(last.contains(r#"<a href="/page/2/" rel="prev">"#));
    }

    #[test]
    fn test_few_posts_single_page_without_navigation() {
        let fixture = Fixture::new();
        fixture.add_post("only", "2022-05-05", "Alone.");
        fixture.build();

        let index = fixture.read("index.html");
        assert!(index.contains(r#"href="/post/only/""#));
        assert!(!index.contains("pagination"));
        assert!(!fixture.exists("page/2/index.html"));
    }

    #[test]
    fn test_equal_dates_keep_file_order() {
        let fixture = Fixture::new();
        fixture.add_post("a", "2022-05-05", "A.");
        fixture.add_post("b", "2022-05-05", "B.");
        fixture.add_post("c", "2023-01-01", "C.");
        let posts = fixture.build();

        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_reference_in_code_block_survives_build() {
        let fixture = Fixture::new();
        fixture.add_post(
            "code",
            "2022-01-01",
            "```\n[label]: https://example.com\n```\n\nSee [home].\n\n[home]: https://example.org",
        );
        fixture.build();

        let html = fixture.read("posts/code.html");
        assert!(html.contains("[label]: https://example.com"));
        assert!(html.contains(r#"<a href="https://example.org">home</a>"#));
    }

    // Holds for dated posts only: an undated post takes the build time
    #[test]
    fn test_build_is_idempotent() {
        let fixture = Fixture::new();
        fixture.add_post("one", "2020-01-01", "First.");
        fixture.add_post("two", "2020-02-01", "Second with `code`.");
        let asset_css = fixture.dir.path().join("static/css");
        fs::create_dir_all(&asset_css).unwrap();
        fs::write(asset_css.join("site.css"), "body {}").unwrap();
        fs::write(fixture.dir.path().join("static/robots.txt"), "User-agent: *").unwrap();

        fixture.build();
        let first = fixture.snapshot();
        fixture.build();
        let second = fixture.snapshot();

        assert_eq!(first, second);
        assert!(fixture.exists("css/site.css"));
        assert!(fixture.exists("robots.txt"));
    }

    #[test]
    fn test_asset_dir_is_replaced() {
        let fixture = Fixture::new();
        let asset_js = fixture.dir.path().join("static/js");
        fs::create_dir_all(&asset_js).unwrap();
        fs::write(asset_js.join("app.js"), "1").unwrap();
        fs::create_dir_all(fixture.site.output_dir.join("js")).unwrap();
        fs::write(fixture.site.output_dir.join("js/stale.js"), "0").unwrap();

        fixture.build();
        assert!(fixture.exists("js/app.js"));
        assert!(!fixture.exists("js/stale.js"));
    }

    #[test]
    fn test_missing_about_uses_placeholder() {
        let fixture = Fixture::new();
        fixture.build();

        let about = fixture.read("about/index.html");
        assert!(about.contains("This is a placeholder about page."));
        assert!(about.contains("<title>About | redshiftzero</title>"));
    }

    #[test]
    fn test_about_from_markdown_keeps_line_breaks() {
        let fixture = Fixture::new();
        let about_dir = fixture.site.source_dir.join("about");
        fs::create_dir_all(&about_dir).unwrap();
        fs::write(
            about_dir.join("index.md"),
            "+++\ntitle = \"About\"\n+++\nFirst line\nSecond line\n",
        )
        .unwrap();
        fixture.build();

        let about = fixture.read("about/index.html");
        assert!(about.contains("First line<br />"));
        assert!(!about.contains("title = "));
        assert!(!about.contains("placeholder"));
    }

    #[test]
    fn test_missing_posts_dir_still_builds() {
        let fixture = Fixture::new();
        fs::remove_dir_all(fixture.site.posts_dir()).unwrap();
        let posts = fixture.build();

        assert!(posts.is_empty());
        assert!(!fixture.exists("index.html"));
        assert!(fixture.read("archive/index.html").contains("all 0 blog posts"));
        assert!(fixture.exists("about/index.html"));
    }

    #[test]
    fn test_missing_template_uses_inline_layout() {
        let fixture = Fixture::new();
        fs::remove_file(fixture.site.template_path()).unwrap();
        fixture.add_post("plain", "2021-06-01", "Body.");
        fixture.build();

        let html = fixture.read("post/plain/index.html");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Post plain | redshiftzero</title>"));
        assert!(html.contains("<p>Body.</p>"));
    }
}
