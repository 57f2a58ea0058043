//! # Messages
//!
//! Failure-message templates keyed by name. Templates use positional
//! `{0}`, `{1}`, ... placeholders filled from the caller's parameters.

use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{PropertiesError, parse_properties};

pub const EXPECTED_HTTP_STATUS: &str = "expected.http.status";
pub const USER_NOT_FOUND: &str = "user.not.found";
pub const POST_NOT_FOUND: &str = "post.not.found";
pub const COMMENT_NOT_FOUND: &str = "comment.not.found";
pub const INVALID_EMAIL: &str = "invalid.email";
pub const USER_FOUND: &str = "user.found";
pub const POST_FOUND: &str = "post.found";
pub const USERNAME_MISMATCH: &str = "username.mismatch";
pub const PAYLOAD_CHANGED: &str = "payload.changed";

const BUILTIN: [(&str, &str); 9] = [
    (EXPECTED_HTTP_STATUS, "Expected HTTP status {0}, received {1}"),
    (USER_NOT_FOUND, "User not found for username `{0}`"),
    (POST_NOT_FOUND, "No posts found for user ID {0}"),
    (COMMENT_NOT_FOUND, "No comments found for post ID {0}"),
    (INVALID_EMAIL, "Invalid email format: `{0}` (comment {1}, post {2})"),
    (USER_FOUND, "Expected no users for username `{0}`, found {1}"),
    (POST_FOUND, "Expected no posts for user ID {0}, found {1}"),
    (USERNAME_MISMATCH, "Expected username `{0}`, got `{1}`"),
    (PAYLOAD_CHANGED, "Repeated lookup of `{0}` returned a different response"),
];

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("failed to read message bundle `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid message bundle: {0}")]
    Parse(#[from] PropertiesError),
    #[error("no message template for key `{0}`")]
    MissingKey(String),
}

#[derive(Debug, Clone, Default)]
pub struct Messages {
    templates: HashMap<String, String>,
}

impl Messages {
    /// The templates shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            templates: BUILTIN
                .iter()
                .map(|(key, template)| (key.to_string(), template.to_string()))
                .collect(),
        }
    }

    /// Load templates from a properties file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MessageError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| MessageError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, MessageError> {
        Ok(Self {
            templates: parse_properties(raw)?,
        })
    }

    /// Overlay `other` on top of `self`; templates in `other` win.
    pub fn merge(mut self, other: Messages) -> Self {
        self.templates.extend(other.templates);
        self
    }

    /// Look up `key` and substitute `{N}` with the N-th parameter.
    ///
    /// Placeholders without a matching parameter are left as written.
    pub fn get_message(&self, key: &str, params: &[&dyn Display]) -> Result<String, MessageError> {
        let template = self
            .templates
            .get(key)
            .ok_or_else(|| MessageError::MissingKey(key.to_string()))?;
        Ok(substitute(template, params))
    }

    /// Like [`get_message`](Self::get_message), but falls back to the key and
    /// its parameters when the template is missing. Used where a failure is
    /// already being reported and a lookup error must not hide it.
    pub fn describe(&self, key: &str, params: &[&dyn Display]) -> String {
        self.get_message(key, params).unwrap_or_else(|_| {
            let rendered: Vec<String> = params.iter().map(|p| p.to_string()).collect();
            format!("{key}: {}", rendered.join(", "))
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.templates.contains_key(key)
    }

    /// Built-in keys that this bundle does not define.
    pub fn missing_builtin_keys(&self) -> Vec<&'static str> {
        BUILTIN
            .iter()
            .map(|(key, _)| *key)
            .filter(|key| !self.contains(key))
            .collect()
    }
}

/// Single left-to-right pass, so text coming from a parameter is never
/// scanned for placeholders again.
fn substitute(template: &str, params: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let digits = tail
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(tail.len());
        let param = if digits > 0 && tail[digits..].starts_with('}') {
            tail[..digits]
                .parse::<usize>()
                .ok()
                .and_then(|index| params.get(index))
        } else {
            None
        };

        match param {
            Some(param) => {
                out.push_str(&param.to_string());
                rest = &tail[digits + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}
