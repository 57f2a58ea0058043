use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read test data file `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse test data file `{path}`: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Named lists of usernames, one scenario per entry.
///
/// Every list is optional in the file; a missing list is empty and unknown
/// keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub valid_usernames: Vec<String>,
    #[serde(default)]
    pub invalid_usernames: Vec<String>,
    #[serde(default)]
    pub edge_usernames: Vec<String>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            valid_usernames: vec!["Delphine".into()],
            invalid_usernames: vec!["NonExistentUser".into()],
            edge_usernames: vec![String::new(), "Del#phine$".into()],
        }
    }
}

impl Dataset {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| DatasetError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn len(&self) -> usize {
        self.valid_usernames.len() + self.invalid_usernames.len() + self.edge_usernames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_lists_are_empty() {
        let dataset: Dataset =
            serde_json::from_str(r#"{"valid_usernames": ["Bret"], "notes": "ignored"}"#).unwrap();
        assert_eq!(dataset.valid_usernames, vec!["Bret"]);
        assert!(dataset.invalid_usernames.is_empty());
        assert!(dataset.edge_usernames.is_empty());
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn default_covers_every_list() {
        let dataset = Dataset::default();
        assert_eq!(dataset.valid_usernames, vec!["Delphine"]);
        assert_eq!(dataset.invalid_usernames, vec!["NonExistentUser"]);
        assert!(dataset.edge_usernames.contains(&String::new()));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"valid_usernames": ["Delphine", "Bret"], "edge_usernames": [""]}}"#
        )
        .unwrap();

        let dataset = Dataset::load(file.path()).unwrap();
        assert_eq!(dataset.valid_usernames.len(), 2);
        assert_eq!(dataset.edge_usernames, vec![""]);
    }

    #[test]
    fn load_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[not an object").unwrap();
        assert!(matches!(
            Dataset::load(file.path()),
            Err(DatasetError::Parse { .. })
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        assert!(matches!(
            Dataset::load("no/such/test_data.json"),
            Err(DatasetError::Read { .. })
        ));
    }
}
