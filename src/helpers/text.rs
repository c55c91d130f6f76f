//! Plain-text helpers

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref MARKUP_CHARS: Regex = Regex::new(r"[#*`]").expect("valid markup regex");
    static ref INLINE_LINK: Regex = Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("valid link regex");
}

/// Default summary length in characters
pub const SUMMARY_LENGTH: usize = 200;

/// Convert `\r\n` and lone `\r` line endings to `\n`
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Build a plain-text summary from Markdown: markup characters and link
/// targets are dropped, and the first paragraph is cut to `max_length`
/// characters with a trailing `...`.
pub fn summarize(markdown: &str, max_length: usize) -> String {
    let text = MARKUP_CHARS.replace_all(markdown, "");
    let text = INLINE_LINK.replace_all(&text, "$1");

    let Some(first) = text.split("\n\n").map(str::trim).find(|p| !p.is_empty()) else {
        return String::new();
    };

    if first.chars().count() > max_length {
        let cut: String = first.chars().take(max_length).collect();
        format!("{}...", cut)
    } else {
        first.to_string()
    }
}
