//! Wires the CLI flags to a loaded suite and renders its report.

use std::fmt::Write as _;
use std::fs;

use crate::cli::{CliConfig, Outcome, OutputFormat};
use crate::config::{BASE_URL_KEY, Config};
use crate::error::{Error, Result};
use crate::http::ApiClient;
use crate::messages::Messages;
use crate::testing::{Dataset, RunReport, Suite};

/// Everything a run needs, loaded before any request is sent.
#[derive(Debug)]
pub struct Setup {
    pub client: ApiClient,
    pub messages: Messages,
    pub suite: Suite,
}

/// Load config, messages and test data.
///
/// # Errors
///
/// Fails when any of the three sources is missing or malformed, or when the
/// HTTP client cannot be built from the configuration.
pub fn prepare(cli: &CliConfig) -> Result<Setup> {
    let config = Config::load(&cli.config)?.with_override(BASE_URL_KEY, cli.base_url.clone());
    let client = ApiClient::new(&config)?;

    let loaded = Messages::load(&cli.messages)?;
    let missing = loaded.missing_builtin_keys();
    if !missing.is_empty() {
        tracing::warn!(
            path = %cli.messages.display(),
            missing = ?missing,
            "message bundle lacks keys, built-in templates used for them"
        );
    }
    let messages = Messages::builtin().merge(loaded);

    let dataset = match &cli.data {
        Some(path) => Dataset::load(path)?,
        None => Dataset::default(),
    };

    tracing::info!(
        base_url = %client.base_url(),
        cases = dataset.len(),
        "suite prepared"
    );
    Ok(Setup {
        client,
        messages,
        suite: Suite::from_dataset(&dataset),
    })
}

/// Prepare and execute, mapping every way a run can end to an [`Outcome`].
pub async fn run(cli: &CliConfig) -> Outcome {
    let setup = match prepare(cli) {
        Ok(setup) => setup,
        Err(err) => {
            tracing::error!(error = %err, "setup failed, no scenario was run");
            return Outcome::SetupError;
        }
    };

    match execute(cli, &setup).await {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::error!(error = %err, "run failed");
            Outcome::Failed
        }
    }
}

/// Run the prepared suite, print and optionally save its report.
pub async fn execute(cli: &CliConfig, setup: &Setup) -> Result<Outcome> {
    let report = setup.suite.run(&setup.client, &setup.messages).await;

    if let Some(path) = &cli.report {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json).map_err(|source| Error::Report {
            path: path.clone(),
            source,
        })?;
    }

    println!("{}", render(&report, cli.format)?);

    Ok(if report.success() {
        Outcome::Passed
    } else {
        Outcome::Failed
    })
}

pub fn render(report: &RunReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => Ok(render_text(report)),
    }
}

fn render_text(report: &RunReport) -> String {
    let mut out = String::new();
    for result in &report.results {
        let mark = if result.passed { "PASS" } else { "FAIL" };
        let _ = writeln!(out, "{mark} {} ({} ms)", result.name, result.duration_ms);
        if let Some(message) = &result.message {
            let _ = writeln!(out, "     {message}");
        }
    }
    let _ = write!(
        out,
        "{} scenarios: {} passed, {} failed in {} ms",
        report.total, report.passed, report.failed, report.duration_ms
    );
    out
}
