use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropertiesError {
    #[error("line {line}: expected `key=value`, got `{raw}`")]
    MissingSeparator { line: usize, raw: String },
    #[error("line {line}: key cannot be empty in `{raw}`")]
    EmptyKey { line: usize, raw: String },
}

/// Parse `key=value` (or `key: value`) lines into a map.
///
/// Blank lines and lines starting with `#` or `!` are skipped. Keys and values
/// are trimmed; the first `=` or `:` separates them, so values may contain
/// either character. Later duplicates replace earlier ones.
pub fn parse_properties(input: &str) -> Result<HashMap<String, String>, PropertiesError> {
    let mut pairs = HashMap::new();

    for (index, line) in input.lines().enumerate() {
        let raw = line.trim();
        if raw.is_empty() || raw.starts_with('#') || raw.starts_with('!') {
            continue;
        }

        let (key, value) = raw
            .split_once(|c| c == '=' || c == ':')
            .ok_or_else(|| PropertiesError::MissingSeparator {
                line: index + 1,
                raw: raw.to_string(),
            })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(PropertiesError::EmptyKey {
                line: index + 1,
                raw: raw.to_string(),
            });
        }
        pairs.insert(key.to_string(), value.trim().to_string());
    }

    Ok(pairs)
}
