use serde::Deserialize;
use serde_yaml::Value;
use thiserror::Error;

pub const MARKER: &str = "---";

#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("invalid front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("front matter must be a mapping")]
    NotMapping,
}

/// Decoded metadata block. `title` and `category` are kept as raw YAML
/// values so numbers and booleans can still be displayed. Other keys are
/// ignored.
#[derive(Debug, Default, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    category: Option<Value>,
}

impl Metadata {
    pub fn title(&self) -> Option<String> {
        self.title.as_ref().and_then(value_to_string)
    }

    pub fn category(&self) -> Option<String> {
        self.category.as_ref().and_then(value_to_string)
    }
}

#[derive(Debug)]
pub struct Parsed {
    pub metadata: Metadata,
    pub markdown: String,
}

/// Raw text cut around every marker, with empty pieces dropped.
///
/// Dropping empty pieces means runs of six or more dashes, or a marker at the
/// very end of the text, do not survive [`Split::body`].
#[derive(Debug)]
pub struct Split<'a> {
    pub header: Option<&'a str>,
    pub body_segments: Vec<&'a str>,
}

impl Split<'_> {
    pub fn body(&self) -> String {
        self.body_segments.join(MARKER).trim().to_string()
    }
}

pub fn split(text: &str) -> Split<'_> {
    if !text.contains(MARKER) {
        return Split {
            header: None,
            body_segments: vec![text],
        };
    }

    let mut segments = text.split(MARKER).filter(|s| !s.is_empty());
    let header = segments.next().map(str::trim);
    Split {
        header,
        body_segments: segments.collect(),
    }
}

/// Parse a document into metadata and Markdown body.
///
/// Text opening with the marker is fenced front matter and any decoding
/// problem in it is an error. Unfenced text only yields metadata when its
/// first segment decodes to a mapping; otherwise (a setext heading, a
/// thematic break) the whole text is the body.
pub fn parse(text: &str) -> Result<Parsed, FrontmatterError> {
    let parts = split(text);
    let Some(header) = parts.header else {
        return Ok(body_only(text));
    };

    if text.trim_start().starts_with(MARKER) {
        return Ok(Parsed {
            metadata: decode(header)?,
            markdown: parts.body(),
        });
    }

    match decode(header) {
        Ok(metadata) => Ok(Parsed {
            metadata,
            markdown: parts.body(),
        }),
        Err(_) => Ok(body_only(text)),
    }
}

fn body_only(text: &str) -> Parsed {
    Parsed {
        metadata: Metadata::default(),
        markdown: text.trim().to_string(),
    }
}

fn decode(header: &str) -> Result<Metadata, FrontmatterError> {
    match serde_yaml::from_str::<Value>(header)? {
        Value::Null => Ok(Metadata::default()),
        value @ Value::Mapping(_) => Ok(serde_yaml::from_value(value)?),
        _ => Err(FrontmatterError::NotMapping),
    }
}

fn value_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
