//! Front-matter parsing
//!
//! Two families of front-matter are understood. Posts migrated from Hugo use a
//! `+++` block of `key = value` lines which is split by hand here; everything
//! else (`---` YAML, `;;;`/`{` JSON) goes through serde. Both produce the same
//! flat field map, which is then folded into a [`FrontMatter`] record once.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;

/// A raw front-matter value: either a scalar or a list of strings
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    fn into_text(self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    /// List view of the value; a scalar becomes a one-item list
    #[cfg(test)]
    fn as_list(&self) -> Vec<&str> {
        match self {
            FieldValue::Text(s) if s.is_empty() => Vec::new(),
            FieldValue::Text(s) => vec![s.as_str()],
            FieldValue::List(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

/// Front-matter data from a post or page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub slug: Option<String>,
    pub description: Option<String>,

    /// Additional custom fields
    pub extra: IndexMap<String, FieldValue>,
}

/// Errors raised while reading a front-matter block. These never escape
/// [`FrontMatter::parse`]; they are logged and replaced by an empty record.
#[derive(Debug, thiserror::Error)]
enum FrontMatterError {
    #[error("unclosed {0} front-matter block")]
    Unclosed(&'static str),

    #[error("invalid YAML front-matter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("invalid JSON front-matter: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("front-matter is not a key/value mapping")]
    NotAMapping,
}

/// Front-matter dialect, picked from the leading delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    /// Hugo-style `+++` block of `key = value` lines
    KeyValue,
    /// `---` YAML block
    Yaml,
    /// `;;;` fenced or bare `{...}` JSON object
    Json,
    None,
}

impl Dialect {
    fn sniff(content: &str) -> Self {
        if content.starts_with("+++") {
            Dialect::KeyValue
        } else if content.starts_with("---") {
            Dialect::Yaml
        } else if content.starts_with(";;;") || content.starts_with('{') {
            Dialect::Json
        } else {
            Dialect::None
        }
    }
}

type Fields = IndexMap<String, FieldValue>;

impl FrontMatter {
    /// Parse front-matter from content string.
    /// Returns (front_matter, remaining_content). Leading whitespace before the
    /// opening delimiter is skipped. Malformed blocks are logged and yield an
    /// empty record with the whole text as content.
    pub fn parse(content: &str) -> (Self, &str) {
        let content = content.trim_start();

        let parsed = match Dialect::sniff(content) {
            Dialect::KeyValue => parse_key_value(content).or_else(|_| {
                // Without a closing marker the general parsers get a try
                parse_general(content)
            }),
            Dialect::Yaml | Dialect::Json => parse_general(content),
            Dialect::None => return (FrontMatter::default(), content),
        };

        match parsed {
            Ok((fields, remaining)) => (Self::from_fields(fields), remaining),
            Err(e) => {
                tracing::warn!("Ignoring front-matter: {}", e);
                (FrontMatter::default(), content)
            }
        }
    }

    /// Fold a raw field map into the typed record
    fn from_fields(fields: Fields) -> Self {
        let mut fm = FrontMatter::default();

        for (key, value) in fields {
            match key.as_str() {
                "title" => fm.title = value.into_text(),
                "date" => {
                    fm.date = value.into_text().map(|s| {
                        parse_date_string(&s).unwrap_or_else(|| {
                            tracing::debug!("Unparsable date {:?}, using now", s);
                            Local::now().naive_local()
                        })
                    })
                }
                "slug" => fm.slug = value.into_text().filter(|s| !s.is_empty()),
                "description" => fm.description = value.into_text(),
                _ => {
                    fm.extra.insert(key, value);
                }
            }
        }

        fm
    }

    /// List-valued custom field; missing keys give an empty list
    #[cfg(test)]
    fn list(&self, key: &str) -> Vec<&str> {
        self.extra
            .get(key)
            .map(FieldValue::as_list)
            .unwrap_or_default()
    }

    /// Drop a leading front-matter block by raw splitting, without parsing it.
    /// `---` is tried first, then `+++`; a block with no closing marker leaves
    /// the text untouched.
    pub fn strip_raw(content: &str) -> &str {
        for delimiter in ["---", "+++"] {
            if content.starts_with(delimiter) {
                let mut parts = content.splitn(3, delimiter);
                parts.next();
                parts.next();
                return parts.next().unwrap_or(content);
            }
        }
        content
    }
}

/// Hand-split `+++` block: `key = value` per line, quotes stripped, `[a, b]`
/// values become lists.
fn parse_key_value(content: &str) -> Result<(Fields, &str), FrontMatterError> {
    let rest = &content[3..];
    let end = rest.find("+++").ok_or(FrontMatterError::Unclosed("+++"))?;
    let block = &rest[..end];
    let remaining = rest[end + 3..].trim_start();

    let mut fields = Fields::new();
    for line in block.trim().lines() {
        let line = line.trim();
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = strip_quotes(value.trim());

        let value = if value.starts_with('[') && value.ends_with(']') {
            FieldValue::List(
                value[1..value.len() - 1]
                    .split(',')
                    .map(|item| strip_quotes(item.trim()).to_string())
                    .collect(),
            )
        } else {
            FieldValue::Text(value.to_string())
        };

        fields.insert(key.to_string(), value);
    }

    Ok((fields, remaining))
}

fn strip_quotes(s: &str) -> &str {
    s.trim_matches('"').trim_matches('\'')
}

/// Serde-backed dialects
fn parse_general(content: &str) -> Result<(Fields, &str), FrontMatterError> {
    match Dialect::sniff(content) {
        Dialect::Yaml => parse_yaml(content),
        Dialect::Json => parse_json(content),
        Dialect::KeyValue => Err(FrontMatterError::Unclosed("+++")),
        Dialect::None => Ok((Fields::new(), content)),
    }
}

fn parse_yaml(content: &str) -> Result<(Fields, &str), FrontMatterError> {
    let rest = &content[3..];
    let end_pos = rest.find("\n---").ok_or(FrontMatterError::Unclosed("---"))?;
    let yaml_content = &rest[..end_pos];
    let remaining = rest[end_pos + 4..].trim_start();

    if yaml_content.trim().is_empty() {
        return Ok((Fields::new(), remaining));
    }

    let value: serde_yaml::Value = serde_yaml::from_str(yaml_content)?;
    let serde_yaml::Value::Mapping(map) = value else {
        return Err(FrontMatterError::NotAMapping);
    };

    let mut fields = Fields::new();
    for (key, value) in map {
        let Some(key) = yaml_scalar(&key) else {
            continue;
        };
        let value = match value {
            serde_yaml::Value::Sequence(items) => {
                FieldValue::List(items.iter().filter_map(yaml_scalar).collect())
            }
            other => match yaml_scalar(&other) {
                Some(s) => FieldValue::Text(s),
                None => continue,
            },
        };
        fields.insert(key, value);
    }

    Ok((fields, remaining))
}

fn yaml_scalar(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn parse_json(content: &str) -> Result<(Fields, &str), FrontMatterError> {
    // JSON front-matter fenced by ;;;
    let (json_content, remaining) = if let Some(rest) = content.strip_prefix(";;;") {
        let end_pos = rest.find(";;;").ok_or(FrontMatterError::Unclosed(";;;"))?;
        (&rest[..end_pos], &rest[end_pos + 3..])
    } else {
        // Bare object: find the matching closing brace
        let mut depth = 0usize;
        let mut end_pos = None;
        for (i, c) in content.char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        end_pos = Some(i + 1);
                        break;
                    }
                }
                _ => {}
            }
        }
        let end_pos = end_pos.ok_or(FrontMatterError::Unclosed("{"))?;
        (&content[..end_pos], &content[end_pos..])
    };

    let serde_json::Value::Object(map) = serde_json::from_str::<serde_json::Value>(json_content)? else {
        return Err(FrontMatterError::NotAMapping);
    };

    let mut fields = Fields::new();
    for (key, value) in map {
        let value = match value {
            serde_json::Value::Array(items) => {
                FieldValue::List(items.iter().filter_map(json_scalar).collect())
            }
            other => match json_scalar(&other) {
                Some(s) => FieldValue::Text(s),
                None => continue,
            },
        };
        fields.insert(key, value);
    }

    Ok((fields, remaining.trim_start()))
}

fn json_scalar(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse a date string in various formats into a timezone-naive timestamp.
/// Offsets are dropped, keeping the wall-clock time as written.
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S%z",
        "%Y-%m-%dT%H:%M:%S%.f%z",
        "%Y-%m-%d %H:%M:%S%z",
        "%Y-%m-%d %H:%M:%S %z",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let date_formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y.%m.%d",
        "%B %d, %Y",
        "%b %d, %Y",
        "%d %B %Y",
        "%d %b %Y",
    ];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.naive_local());
    }

    None
}
