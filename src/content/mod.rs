//! Content module - handles posts, front-matter and markdown processing

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::{parse_date_string, FieldValue, FrontMatter};
pub use markdown::{extract_references, MarkdownRenderer, References};
pub use post::Post;
