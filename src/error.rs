use thiserror::Error;

use crate::config::ConfigError;
use crate::http::ClientError;
use crate::messages::MessageError;
use crate::testing::DatasetError;

/// Anything that stops the runner before a scenario executes.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Messages(#[from] MessageError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("failed to write report `{path}`: {source}")]
    Report {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
