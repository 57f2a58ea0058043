//! # Testing & Assertions
//!
//! Scenarios against the users/posts/comments endpoints and the runner that
//! executes them in order and collects a [`RunReport`].
//!
//! A [`Suite`] is normally built from a [`Dataset`]: each username list maps
//! to one scenario kind, so adding a case means adding a name to the data
//! file rather than writing another test.

pub mod dataset;
pub mod scenarios;

use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::http::ApiClient;
use crate::messages::Messages;

pub use dataset::{Dataset, DatasetError};
pub use scenarios::{Failure, Scenario, UNKNOWN_USER_ID, overlong_username};

/// Result of running one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub name: String,
    pub scenario: Scenario,
    pub passed: bool,
    pub duration_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Summary report for a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u128,
    pub results: Vec<ScenarioResult>,
}

impl RunReport {
    pub fn record(&mut self, result: ScenarioResult) {
        self.total += 1;
        if result.passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(result);
    }

    pub fn success(&self) -> bool {
        self.failed == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}

/// An ordered list of scenarios.
#[derive(Debug, Clone, Default)]
pub struct Suite {
    scenarios: Vec<Scenario>,
}

impl Suite {
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        Self { scenarios }
    }

    /// One chain and one repeat-lookup per valid username, one empty-result
    /// check per invalid or edge username (plus an overlong one), and the
    /// unknown-user posts check.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut scenarios = Vec::with_capacity(dataset.len() * 2 + 2);

        for username in &dataset.valid_usernames {
            scenarios.push(Scenario::KnownUser {
                username: username.clone(),
            });
            scenarios.push(Scenario::Idempotent {
                username: username.clone(),
            });
        }
        for username in &dataset.invalid_usernames {
            scenarios.push(Scenario::UnknownUser {
                username: username.clone(),
            });
        }
        for username in &dataset.edge_usernames {
            scenarios.push(Scenario::EdgeUsername {
                username: username.clone(),
            });
        }
        scenarios.push(Scenario::EdgeUsername {
            username: overlong_username(),
        });
        scenarios.push(Scenario::PostsForUnknownUser {
            user_id: UNKNOWN_USER_ID,
        });

        Self { scenarios }
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub async fn run(&self, client: &ApiClient, messages: &Messages) -> RunReport {
        let started = Instant::now();
        let mut report = RunReport::default();

        for scenario in &self.scenarios {
            let name = scenario.name();
            let scenario_started = Instant::now();
            let outcome = scenario.run(client, messages).await;
            let duration_ms = scenario_started.elapsed().as_millis();

            let message = match outcome {
                Ok(()) => {
                    info!(
                        scenario = %name,
                        duration_ms = duration_ms as u64,
                        "scenario passed"
                    );
                    None
                }
                Err(err) => {
                    warn!(scenario = %name, error = %err, "scenario failed");
                    Some(err.to_string())
                }
            };
            report.record(ScenarioResult {
                name,
                scenario: scenario.clone(),
                passed: message.is_none(),
                duration_ms,
                message,
            });
        }

        report.duration_ms = started.elapsed().as_millis();
        report
    }
}
