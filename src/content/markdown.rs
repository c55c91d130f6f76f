//! Markdown rendering with syntax highlighting

use indexmap::IndexMap;
use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use regex::Regex;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::helpers::html_escape;

lazy_static! {
    static ref REFERENCE_DEF: Regex =
        Regex::new(r"^\[([^\]]+)\]:\s*(.+)$").expect("valid reference regex");
    static ref RESIDUAL_PLUS_BLOCK: Regex =
        Regex::new(r"(?s)^\+\+\+.*?\+\+\+\s*").expect("valid +++ regex");
    static ref RESIDUAL_DASH_BLOCK: Regex =
        Regex::new(r"(?s)^---.*?---\s*").expect("valid --- regex");
}

/// Paragraph that gets replaced by the table of contents
const TOC_MARKER: &str = "<p>[TOC]</p>";

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    options: Options,
    hard_breaks: bool,
}

impl MarkdownRenderer {
    /// Renderer for blog posts: footnotes and definition lists on, newlines
    /// inside a paragraph stay soft.
    pub fn for_posts() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            options: Options::ENABLE_TABLES
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_DEFINITION_LIST
                | Options::ENABLE_HEADING_ATTRIBUTES,
            hard_breaks: false,
        }
    }

    /// Renderer for standalone pages: every newline becomes a `<br />`.
    pub fn for_pages() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            options: Options::ENABLE_TABLES | Options::ENABLE_HEADING_ATTRIBUTES,
            hard_breaks: true,
        }
    }

    /// Render a post body: drop leftover front-matter, pull out reference
    /// definitions, convert, then put the references back as anchors.
    pub fn render_post(&self, content: &str) -> String {
        let content = strip_residual_frontmatter(content.trim());
        let (content, references) = extract_references(&content);
        tracing::debug!("Extracted {} reference links", references.len());
        let html = self.render(&content);
        references.reinject(&html)
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;
        let mut heading: Option<PendingHeading> = None;
        let mut toc = Toc::default();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(|lang| lang.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                    continue;
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let highlighted = self.highlight_code(&code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                    continue;
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, code)) = code_block.as_mut() {
                        code.push_str(&text);
                    }
                    continue;
                }
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }) => {
                    heading = Some(PendingHeading {
                        level,
                        id: id.map(|id| id.to_string()),
                        classes,
                        attrs,
                        text: String::new(),
                        events: Vec::new(),
                    });
                    continue;
                }
                Event::End(TagEnd::Heading(level)) => {
                    if let Some(pending) = heading.take() {
                        let id = match pending.id {
                            Some(id) => id,
                            None => toc.unique_id(&pending.text),
                        };
                        toc.push(level, &id, &pending.text);
                        events.push(Event::Start(Tag::Heading {
                            level,
                            id: Some(CowStr::from(id)),
                            classes: pending.classes,
                            attrs: pending.attrs,
                        }));
                        events.extend(pending.events);
                        events.push(Event::End(TagEnd::Heading(level)));
                    }
                    continue;
                }
                _ => {}
            }

            let event = match event {
                Event::SoftBreak if self.hard_breaks => Event::HardBreak,
                other => other,
            };

            match heading.as_mut() {
                Some(pending) => {
                    if let Event::Text(text) | Event::Code(text) = &event {
                        pending.text.push_str(text);
                    }
                    pending.events.push(event);
                }
                None => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        if html_output.contains(TOC_MARKER) {
            html_output = html_output.replace(TOC_MARKER, &toc.to_html());
        }

        html_output
    }

    /// Highlight a code block into class-annotated spans
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let syntax = lang
            .and_then(|lang| {
                self.syntax_set
                    .find_syntax_by_token(lang)
                    .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            })
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, ClassStyle::Spaced);
        let mut highlighted = None;
        for line in LinesWithEndings::from(code) {
            if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
                tracing::warn!("Highlighting failed, emitting plain code: {}", e);
                highlighted = Some(html_escape(code));
                break;
            }
        }
        let highlighted = highlighted.unwrap_or_else(|| generator.finalize());

        let class = lang
            .map(|lang| format!(r#" class="language-{}""#, html_escape(lang)))
            .unwrap_or_default();
        format!(
            "<div class=\"codehilite\"><pre><code{}>{}</code></pre></div>\n",
            class, highlighted
        )
    }
}

/// Heading whose inner events are held back until its id is known
struct PendingHeading<'a> {
    level: HeadingLevel,
    id: Option<String>,
    classes: Vec<CowStr<'a>>,
    attrs: Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
    text: String,
    events: Vec<Event<'a>>,
}

/// Headings seen so far, for ids and the `[TOC]` list
#[derive(Default)]
struct Toc {
    entries: Vec<(usize, String, String)>,
    used_ids: Vec<String>,
}

impl Toc {
    fn unique_id(&mut self, text: &str) -> String {
        let base = match slug::slugify(text) {
            s if s.is_empty() => "section".to_string(),
            s => s,
        };
        let mut id = base.clone();
        let mut n = 1;
        while self.used_ids.contains(&id) {
            id = format!("{}_{}", base, n);
            n += 1;
        }
        self.used_ids.push(id.clone());
        id
    }

    fn push(&mut self, level: HeadingLevel, id: &str, text: &str) {
        self.entries
            .push((level as usize, id.to_string(), text.to_string()));
    }

    fn to_html(&self) -> String {
        let mut html = String::from("<div class=\"toc\">\n");
        let mut open: Vec<usize> = Vec::new();

        for (level, id, text) in &self.entries {
            match open.last() {
                Some(&top) if *level <= top => {
                    html.push_str("</li>\n");
                    while let Some(&top) = open.last() {
                        if *level < top && open.len() > 1 {
                            html.push_str("</ul>\n</li>\n");
                            open.pop();
                        } else {
                            break;
                        }
                    }
                }
                _ => {
                    html.push_str("<ul>\n");
                    open.push(*level);
                }
            }
            html.push_str(&format!(
                "<li><a href=\"#{}\">{}</a>",
                id,
                html_escape(text)
            ));
        }

        while open.pop().is_some() {
            html.push_str("</li>\n</ul>\n");
        }
        html.push_str("</div>\n");
        html
    }
}

/// Remove a `+++ ... +++` or `--- ... ---` block that survived the split
fn strip_residual_frontmatter(content: &str) -> String {
    let content = RESIDUAL_PLUS_BLOCK.replace(content, "");
    RESIDUAL_DASH_BLOCK.replace(&content, "").into_owned()
}

/// Reference-style link definitions pulled out of one post
#[derive(Debug, Default)]
pub struct References {
    links: IndexMap<String, String>,
}

impl References {
    #[cfg(test)]
    fn get(&self, label: &str) -> Option<&str> {
        self.links.get(label).map(|s| s.as_str())
    }

    fn len(&self) -> usize {
        self.links.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Turn every literal `[label]` left in the HTML into an anchor
    pub fn reinject(&self, html: &str) -> String {
        let mut html = html.to_string();
        for (label, url) in &self.links {
            let needle = format!("[{}]", label);
            if html.contains(&needle) {
                html = html.replace(&needle, &format!(r#"<a href="{}">{}</a>"#, url, label));
            }
        }
        html
    }
}

/// Tracks whether a line scan is inside a fenced code block
#[derive(Default)]
struct FenceTracker {
    open: Option<(char, usize)>,
}

impl FenceTracker {
    /// Feed one line; returns true if the line belongs to a code block,
    /// fences included.
    fn observe(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        let fence = ['`', '~'].into_iter().find_map(|c| {
            let run = trimmed.chars().take_while(|&x| x == c).count();
            (run >= 3).then_some((c, run))
        });

        match (self.open, fence) {
            (None, Some(fence)) => {
                self.open = Some(fence);
                true
            }
            (Some((c, len)), Some((fc, run))) if c == fc && run >= len => {
                // A closing fence carries no info string
                if trimmed[run..].trim().is_empty() {
                    self.open = None;
                }
                true
            }
            (Some(_), _) => true,
            (None, None) => false,
        }
    }
}

/// Pull `[label]: url` lines out of the content, skipping fenced code.
/// Footnote definitions (`[^note]: ...`) are left alone.
pub fn extract_references(content: &str) -> (String, References) {
    let mut references = References::default();
    let mut fences = FenceTracker::default();
    let mut kept = Vec::new();

    for line in content.split('\n') {
        if !fences.observe(line) {
            if let Some(caps) = REFERENCE_DEF.captures(line.trim()) {
                let label = &caps[1];
                if !label.starts_with('^') {
                    references
                        .links
                        .insert(label.to_string(), caps[2].trim().to_string());
                    continue;
                }
            }
        }
        kept.push(line);
    }

    (kept.join("\n"), references)
}
