use std::fmt::Display;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::http::{ApiClient, ApiResponse, ClientError};
use crate::messages::{self, Messages};
use crate::model::{Comment, Post, User};

pub const HTTP_OK: u16 = 200;
/// A user id the backing dataset never assigns.
pub const UNKNOWN_USER_ID: i64 = 9999;
/// Longer than any username column is expected to hold.
pub const OVERLONG_USERNAME_LEN: usize = 256;

#[derive(Debug, Error)]
pub enum Failure {
    #[error("{0}")]
    Assertion(String),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("unexpected payload shape: {0}")]
    Shape(#[from] serde_json::Error),
}

/// One independent case of the suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scenario {
    /// Resolve the user, then walk its posts and their comments.
    KnownUser { username: String },
    UnknownUser { username: String },
    EdgeUsername { username: String },
    PostsForUnknownUser { user_id: i64 },
    /// The same lookup twice must agree.
    Idempotent { username: String },
}

impl Scenario {
    pub fn name(&self) -> String {
        match self {
            Scenario::KnownUser { username } => format!("known user `{}`", label(username)),
            Scenario::UnknownUser { username } => format!("unknown user `{}`", label(username)),
            Scenario::EdgeUsername { username } => format!("edge username `{}`", label(username)),
            Scenario::PostsForUnknownUser { user_id } => format!("posts for unknown user {user_id}"),
            Scenario::Idempotent { username } => format!("repeat lookup `{}`", label(username)),
        }
    }

    pub async fn run(&self, client: &ApiClient, messages: &Messages) -> Result<(), Failure> {
        match self {
            Scenario::KnownUser { username } => {
                let user = resolve_user(client, messages, username).await?;
                let posts = posts_for_user(client, messages, user.id).await?;
                for post in &posts {
                    validate_comments(client, messages, post.id).await?;
                }
                info!(
                    username = %username,
                    user_id = user.id,
                    posts = posts.len(),
                    "user chain validated"
                );
            }
            Scenario::UnknownUser { username } | Scenario::EdgeUsername { username } => {
                expect_no_users(client, messages, username).await?;
            }
            Scenario::PostsForUnknownUser { user_id } => {
                expect_no_posts(client, messages, *user_id).await?;
            }
            Scenario::Idempotent { username } => {
                let first = client.get_users_by_username(username).await?;
                let second = client.get_users_by_username(username).await?;
                if !first.same_payload(&second) {
                    return Err(fail(messages, messages::PAYLOAD_CHANGED, &[&username]));
                }
            }
        }
        Ok(())
    }
}

/// Look up `username` and return the first exact match.
pub async fn resolve_user(
    client: &ApiClient,
    messages: &Messages,
    username: &str,
) -> Result<User, Failure> {
    let response = client.get_users_by_username(username).await?;
    expect_status(&response, HTTP_OK, messages)?;

    let users: Vec<User> = response.decode()?;
    let user = users
        .into_iter()
        .next()
        .ok_or_else(|| fail(messages, messages::USER_NOT_FOUND, &[&username]))?;
    if user.username != username {
        return Err(fail(
            messages,
            messages::USERNAME_MISMATCH,
            &[&username, &user.username],
        ));
    }
    Ok(user)
}

/// Fetch the posts of `user_id`; at least one is required.
pub async fn posts_for_user(
    client: &ApiClient,
    messages: &Messages,
    user_id: i64,
) -> Result<Vec<Post>, Failure> {
    let response = client.get_posts_by_user_id(user_id).await?;
    expect_status(&response, HTTP_OK, messages)?;

    let posts: Vec<Post> = response.decode()?;
    if posts.is_empty() {
        return Err(fail(messages, messages::POST_NOT_FOUND, &[&user_id]));
    }
    Ok(posts)
}

/// Fetch the comments of `post_id`; at least one is required and every email
/// must be well formed.
pub async fn validate_comments(
    client: &ApiClient,
    messages: &Messages,
    post_id: i64,
) -> Result<Vec<Comment>, Failure> {
    let response = client.get_comments_by_post_id(post_id).await?;
    expect_status(&response, HTTP_OK, messages)?;

    let comments: Vec<Comment> = response.decode()?;
    if comments.is_empty() {
        return Err(fail(messages, messages::COMMENT_NOT_FOUND, &[&post_id]));
    }
    if let Some(bad) = comments.iter().find(|c| !c.has_valid_email()) {
        let email = bad.email.as_deref().unwrap_or_default();
        return Err(fail(
            messages,
            messages::INVALID_EMAIL,
            &[&email, &bad.id, &bad.post_id],
        ));
    }
    tracing::debug!(post_id, comments = comments.len(), "comments validated");
    Ok(comments)
}

/// An unmatched username answers 200 with an empty list.
pub async fn expect_no_users(
    client: &ApiClient,
    messages: &Messages,
    username: &str,
) -> Result<(), Failure> {
    let response = client.get_users_by_username(username).await?;
    expect_status(&response, HTTP_OK, messages)?;
    if !response.is_empty() {
        return Err(fail(
            messages,
            messages::USER_FOUND,
            &[&username, &response.len()],
        ));
    }
    Ok(())
}

pub async fn expect_no_posts(
    client: &ApiClient,
    messages: &Messages,
    user_id: i64,
) -> Result<(), Failure> {
    let response = client.get_posts_by_user_id(user_id).await?;
    expect_status(&response, HTTP_OK, messages)?;
    if !response.is_empty() {
        return Err(fail(
            messages,
            messages::POST_FOUND,
            &[&user_id, &response.len()],
        ));
    }
    Ok(())
}

pub fn expect_status(
    response: &ApiResponse,
    expected: u16,
    messages: &Messages,
) -> Result<(), Failure> {
    if response.status == expected {
        return Ok(());
    }
    Err(fail(
        messages,
        messages::EXPECTED_HTTP_STATUS,
        &[&expected, &response.status],
    ))
}

/// A username that repeats `Delphine` until it is [`OVERLONG_USERNAME_LEN`] long.
pub fn overlong_username() -> String {
    "Delphine"
        .chars()
        .cycle()
        .take(OVERLONG_USERNAME_LEN)
        .collect()
}

fn fail(messages: &Messages, key: &str, params: &[&dyn Display]) -> Failure {
    Failure::Assertion(messages.describe(key, params))
}

fn label(username: &str) -> String {
    const MAX: usize = 24;
    let count = username.chars().count();
    if count <= MAX {
        return username.to_string();
    }
    let head: String = username.chars().take(MAX).collect();
    format!("{head}... ({count} chars)")
}
