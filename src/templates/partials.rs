//! HTML fragments placed into `{{MAIN_CONTENT}}`

use crate::content::Post;
use crate::helpers::{date_iso, format_date, link_to, page_url, post_url, CALENDAR_ICON};

/// Body shown on the about page when no source file exists
pub const ABOUT_PLACEHOLDER: &str = r#"<p>Welcome to my blog! I write about cryptography, security, privacy, and technology.</p>
                        <p>This is a placeholder about page. Create a <code>content/about/index.md</code> file to add your content.</p>"#;

/// `<time>` element with the calendar glyph
fn post_meta(date: &chrono::NaiveDateTime) -> String {
    format!(
        r#"<div class="post-meta">
                        <time datetime="{}" class="post-meta-item published dt-published">
                            {} {}
                        </time>
                    </div>"#,
        date_iso(date),
        CALENDAR_ICON,
        format_date(date)
    )
}

/// Full article for a single post page
pub fn post_article(post: &Post) -> String {
    format!(
        r#"
                <article class="content post h-entry">
                    <h1 class="post-title p-name">{title}</h1>

                    {meta}

                    <div class="post-body e-content">
                        {body}
                    </div>
                </article>
            "#,
        title = post.title,
        meta = post_meta(&post.date),
        body = post.body,
    )
}

/// Summary card for a post on an index page
pub fn post_card(post: &Post) -> String {
    let url = post_url(&post.slug);
    format!(
        r#"
                <article class="content post home h-entry">
                    <h2 class="post-title p-name">
                        {title_link}
                    </h2>

                    {meta}

                    <summary class="summary p-summary">
                        <p>{summary}</p>
                    </summary>

                    <div class="read-more-container">
                        {read_more}
                    </div>
                </article>
                "#,
        title_link = link_to(&url, &post.title, Some("summary-title-link u-url")),
        meta = post_meta(&post.date),
        summary = post.summary,
        read_more = link_to(&url, "Read More »", Some("read-more-link")),
    )
}

/// Previous / numbered / next navigation. Empty when there is a single page.
pub fn pagination(current: usize, total: usize) -> String {
    if total <= 1 {
        return String::new();
    }

    let mut html = String::from(r#"<ul class="pagination">"#);

    if current > 1 {
        html.push_str(&format!(
            r#"<li class="pagination-prev"><a href="{}" rel="prev">&lt; Newer</a></li>"#,
            page_url(current - 1)
        ));
    }

    for page_num in 1..=total {
        if page_num == current {
            html.push_str(&format!(
                r#"<li class="pagination-item current"><span>{}</span></li>"#,
                page_num
            ));
        } else {
            html.push_str(&format!(
                r#"<li class="pagination-item"><a href="{}">{}</a></li>"#,
                page_url(page_num),
                page_num
            ));
        }
    }

    if current < total {
        html.push_str(&format!(
            r#"<li class="pagination-next"><a href="{}" rel="next">Older &gt;</a></li>"#,
            page_url(current + 1)
        ));
    }

    html.push_str("</ul>");
    html
}

/// Main content of an index page
pub fn index_page(posts: &[Post], pagination_html: &str) -> String {
    let posts_html: String = posts.iter().map(post_card).collect();
    format!(
        r#"
                {}
                {}
            "#,
        posts_html, pagination_html
    )
}

/// Main content of the archive page
pub fn archive(posts: &[Post]) -> String {
    let mut list = String::from(r#"<div class="archive-list">"#);
    for post in posts {
        list.push_str(&format!(
            r#"
            <div class="archive-item">
                <time class="archive-date">{}</time>
                {}
            </div>
            "#,
            format_date(&post.date),
            link_to(&post_url(&post.slug), &post.title, Some("archive-title"))
        ));
    }
    list.push_str("</div>");

    format!(
        r#"
                <article class="content page">
                    <h1 class="page-title">Archive</h1>
                    <p>Complete list of all {} blog posts:</p>
                    {}
                </article>
            "#,
        posts.len(),
        list
    )
}

/// Main content of a standalone page such as the about page
pub fn page_article(title: &str, body: &str) -> String {
    format!(
        r#"
                <article class="content page">
                    <h1 class="page-title">{}</h1>
                    <div class="page-body">
                        {}
                    </div>
                </article>
                "#,
        title, body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn post(slug: &str, title: &str) -> Post {
        Post {
            title: title.to_string(),
            date: NaiveDate::from_ymd_opt(2020, 2, 29)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            slug: slug.to_string(),
            description: title.to_string(),
            summary: "Short summary".to_string(),
            body: "<p>Body</p>".to_string(),
            source: PathBuf::from(format!("{}.md", slug)),
        }
    }

    #[test]
    fn test_single_page_has_no_pagination() {
        assert_eq!(pagination(1, 1), "");
        assert_eq!(pagination(1, 0), "");
    }

    #[test]
    fn test_pagination_first_page() {
        let html = pagination(1, 3);
        assert!(!html.contains("pagination-prev"));
        assert!(html.contains(r#"<li class="pagination-item current"><span>1</span></li>"#));
        assert!(html.contains(r#"<li class="pagination-item"><a href="/page/2/">2</a></li>"#));
        assert!(html.contains(
            r#"<li class="pagination-next"><a href="/page/2/" rel="next">Older &gt;</a></li>"#
        ));
    }

    #[test]
    fn test_pagination_links_back_to_root() {
        let html = pagination(2, 2);
        assert!(html.contains(
            r#"<li class="pagination-prev"><a href="/" rel="prev">&lt; Newer</a></li>"#
        ));
        assert!(html.contains(r#"<li class="pagination-item"><a href="/">1</a></li>"#));
        assert!(!html.contains("pagination-next"));
    }

    #[test]
    fn test_post_card() {
        let html = post_card(&post("leap", "Leap Day"));
        assert!(html.contains(
            r#"<a href="/post/leap/" class="summary-title-link u-url">Leap Day</a>"#
        ));
        assert!(html.contains(r#"datetime="2020-02-29T00:00:00""#));
        assert!(html.contains("2020.02.29"));
        assert!(html.contains("<p>Short summary</p>"));
        assert!(html.contains("Read More »"));
    }

    #[test]
    fn test_archive() {
        let html = archive(&[post("b", "Second"), post("a", "First")]);
        assert!(html.contains("Complete list of all 2 blog posts:"));
        let second = html.find("Second").unwrap();
        let first = html.find("First").unwrap();
        assert!(second < first);
        assert!(html.contains(r#"<a href="/post/a/" class="archive-title">First</a>"#));
    }
}
