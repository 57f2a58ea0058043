//! # CLI Support
//!
//! Command-line interface for running the suite in CI pipelines. The exit
//! code tells the pipeline whether every scenario passed.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use crate::config::BASE_URL_ENV;

/// Exit status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
    /// Configuration, messages or test data could not be loaded.
    SetupError,
}

impl Outcome {
    /// Process exit status: 0 all passed, 1 a scenario failed, 2 setup failed.
    pub fn code(self) -> u8 {
        match self {
            Outcome::Passed => 0,
            Outcome::Failed => 1,
            Outcome::SetupError => 2,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.code())
    }
}

/// CLI configuration parsed from command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "apiprobe", version, about = "Run the users/posts/comments API suite")]
pub struct CliConfig {
    /// Properties file holding `base.url`.
    #[arg(long, default_value = "config/config.properties")]
    pub config: PathBuf,

    /// Properties file with message templates; overrides the built-in ones.
    #[arg(long, default_value = "config/messages.properties")]
    pub messages: PathBuf,

    /// JSON file with `valid_usernames`, `invalid_usernames`, `edge_usernames`.
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Replaces `base.url` from the config file.
    #[arg(long, env = BASE_URL_ENV)]
    pub base_url: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also write the JSON report to this path.
    #[arg(long)]
    pub report: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Output format for CLI reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}
