//! URI and slash-path helpers.
//!
//! Local paths in a METS package are slash-separated and never escaped; they may
//! contain characters that are illegal in a URI. Storage locations and rights
//! statements, on the other hand, must be absolute URIs.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriError {
    #[error("URI is empty")]
    Empty,
    #[error("URI has no scheme: {0}")]
    MissingScheme(String),
    #[error("URI has an invalid scheme: {0}")]
    InvalidScheme(String),
    #[error("URI has nothing after its scheme: {0}")]
    EmptyRemainder(String),
}

/// An absolute URI, validated on construction. Whitespace inside the value is
/// percent-encoded rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbsoluteUri(String);

impl AbsoluteUri {
    pub fn parse(value: &str) -> Result<Self, UriError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(UriError::Empty);
        }
        let value = escape_whitespace(value);
        let value = value.as_str();

        let Some((scheme, rest)) = value.split_once(':') else {
            return Err(UriError::MissingScheme(value.to_string()));
        };

        let mut chars = scheme.chars();
        let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
        let valid_tail = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if !starts_alpha || !valid_tail {
            return Err(UriError::InvalidScheme(value.to_string()));
        }
        if rest.is_empty() || rest == "//" {
            return Err(UriError::EmptyRemainder(value.to_string()));
        }

        Ok(AbsoluteUri(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn scheme(&self) -> &str {
        self.0.split(':').next().unwrap_or_default()
    }
}

fn escape_whitespace(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_whitespace() {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                escaped.push_str(&format!("%{:02X}", byte));
            }
        } else {
            escaped.push(c);
        }
    }
    escaped
}

impl fmt::Display for AbsoluteUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The URI of the container holding `uri`, with a trailing slash.
///
/// `file:///data/pkg/mets.xml` becomes `file:///data/pkg/`, and
/// `s3://bucket/pkg/` becomes `s3://bucket/`. Returns `None` at the root.
pub fn parent_uri(uri: &str) -> Option<String> {
    let path_start = match uri.find("://") {
        Some(i) => i + 3 + uri[i + 3..].find('/')?,
        None => uri.find(':')? + 1,
    };
    let path = &uri[path_start..];
    if path.is_empty() || path == "/" {
        return None;
    }
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    let cut = trimmed.rfind('/')?;
    Some(format!("{}{}", &uri[..path_start], &trimmed[..=cut]))
}

/// Last segment of a slash path, ignoring one trailing slash.
pub fn slug(path: &str) -> &str {
    let path = path.strip_suffix('/').unwrap_or(path);
    path.rsplit('/').next().unwrap_or(path)
}

/// Parent of a slash path; `None` when the path has no segments.
///
/// A leading slash is preserved; the parent of a single segment is the empty path.
pub fn parent_path(path: &str) -> Option<String> {
    let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
    let (_, init) = parts.split_last()?;
    let joined = init.join("/");
    if path.starts_with('/') {
        Some(format!("/{}", joined))
    } else {
        Some(joined)
    }
}

/// Canonical lookup key of a slash path: empty segments removed.
pub fn normalize_path(path: &str) -> String {
    path.split('/')
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
