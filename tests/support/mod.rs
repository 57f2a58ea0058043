//! In-process stand-in for the users/posts/comments service.
//!
//! Serves a deterministic dataset shaped like the public service: ten users,
//! ten posts per user and five comments per post, filtered by the same query
//! parameters.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use apiprobe::config::BASE_URL_KEY;
use apiprobe::{ApiClient, Config};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

pub const USERNAMES: [&str; 10] = [
    "Bret",
    "Antonette",
    "Samantha",
    "Karianne",
    "Kamren",
    "Leopoldo_Corkery",
    "Elwyn.Skiles",
    "Maxime_Nienow",
    "Delphine",
    "Moriah.Stanton",
];
pub const POSTS_PER_USER: i64 = 10;
pub const COMMENTS_PER_POST: i64 = 5;

#[derive(Debug, Clone)]
pub struct Fixture {
    users: Vec<Value>,
    posts: Vec<Value>,
    comments: Vec<Value>,
    users_status: Option<StatusCode>,
    volatile_users: bool,
}

impl Fixture {
    pub fn standard() -> Self {
        let users = USERNAMES
            .iter()
            .zip(1..)
            .map(|(username, id): (&&str, i64)| {
                json!({
                    "id": id,
                    "name": format!("User {id}"),
                    "username": username,
                    "email": format!("user{id}@example.net"),
                })
            })
            .collect::<Vec<_>>();

        let mut posts = Vec::new();
        let mut comments = Vec::new();
        for user_id in 1..=USERNAMES.len() as i64 {
            for n in 1..=POSTS_PER_USER {
                let post_id = (user_id - 1) * POSTS_PER_USER + n;
                posts.push(json!({
                    "userId": user_id,
                    "id": post_id,
                    "title": format!("post {post_id}"),
                    "body": "lorem ipsum",
                }));
                for m in 1..=COMMENTS_PER_POST {
                    let comment_id = (post_id - 1) * COMMENTS_PER_POST + m;
                    comments.push(json!({
                        "postId": post_id,
                        "id": comment_id,
                        "name": format!("comment {comment_id}"),
                        "email": format!("Reader_{comment_id}.x+news@mail-{post_id}.example.biz"),
                        "body": "dolor sit amet",
                    }));
                }
            }
        }

        Self {
            users,
            posts,
            comments,
            users_status: None,
            volatile_users: false,
        }
    }

    pub fn with_user(mut self, id: i64, username: &str) -> Self {
        self.users.push(json!({ "id": id, "username": username }));
        self
    }

    pub fn with_comment_email(mut self, comment_id: i64, email: &str) -> Self {
        if let Some(comment) = self.comments.iter_mut().find(|c| c["id"] == comment_id) {
            comment["email"] = json!(email);
        }
        self
    }

    pub fn without_comments_for(mut self, post_id: i64) -> Self {
        self.comments.retain(|c| c["postId"] != post_id);
        self
    }

    /// Answer every `/users` request with `status` and an empty body.
    pub fn with_users_status(mut self, status: StatusCode) -> Self {
        self.users_status = Some(status);
        self
    }

    /// Append a marker object to every `/users` response so no two agree.
    pub fn with_volatile_users(mut self) -> Self {
        self.volatile_users = true;
        self
    }
}

struct AppState {
    fixture: Fixture,
    hits: AtomicUsize,
}

pub struct TestServer {
    pub addr: SocketAddr,
    state: Arc<AppState>,
}

impl TestServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> ApiClient {
        client_for(&self.base_url())
    }

    /// Number of requests served so far.
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

pub fn client_for(base_url: &str) -> ApiClient {
    ApiClient::new(&Config::from_pairs([(BASE_URL_KEY, base_url)])).unwrap()
}

pub async fn spawn(fixture: Fixture) -> TestServer {
    let state = Arc::new(AppState {
        fixture,
        hits: AtomicUsize::new(0),
    });
    let app = Router::new()
        .route("/users", get(users))
        .route("/posts", get(posts))
        .route("/comments", get(comments))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer { addr, state }
}

type Params = Query<HashMap<String, String>>;

async fn users(State(state): State<Arc<AppState>>, Query(params): Params) -> Response {
    let hit = state.hits.fetch_add(1, Ordering::SeqCst);
    if let Some(status) = state.fixture.users_status {
        return status.into_response();
    }
    let mut found = filter(&state.fixture.users, "username", params.get("username"));
    if state.fixture.volatile_users {
        found.push(json!({ "id": -1, "username": format!("hit-{hit}") }));
    }
    Json(found).into_response()
}

async fn posts(State(state): State<Arc<AppState>>, Query(params): Params) -> Json<Vec<Value>> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    Json(filter(&state.fixture.posts, "userId", params.get("userId")))
}

async fn comments(State(state): State<Arc<AppState>>, Query(params): Params) -> Json<Vec<Value>> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    Json(filter(&state.fixture.comments, "postId", params.get("postId")))
}

/// Exact, case-sensitive match on `field`; no parameter means no filter.
fn filter(items: &[Value], field: &str, wanted: Option<&String>) -> Vec<Value> {
    let Some(wanted) = wanted else {
        return items.to_vec();
    };
    items
        .iter()
        .filter(|item| match &item[field] {
            Value::String(s) => s == wanted,
            Value::Number(n) => n.to_string() == *wanted,
            _ => false,
        })
        .cloned()
        .collect()
}
