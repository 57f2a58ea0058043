//! Black-box checks for a users/posts/comments REST service.
//!
//! The [`ApiClient`] issues the three fixed GET requests, [`Config`] and
//! [`Messages`] supply the base URL and failure text, and
//! [`testing::Suite`] runs the scenarios.

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod messages;
pub mod model;
pub mod runner;
pub mod testing;

pub use config::Config;
pub use error::{Error, Result};
pub use http::{ApiClient, ApiResponse};
pub use messages::Messages;
