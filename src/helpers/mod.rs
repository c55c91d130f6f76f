//! Helper functions shared by the page generators
//!
//! Date formatting, HTML snippets, URL building and summary extraction.

mod date;
mod html;
mod text;
mod url;

pub use date::*;
pub use html::*;
pub use text::*;
pub use url::*;
