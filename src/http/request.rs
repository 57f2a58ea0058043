use std::fmt::{self, Display};

use url::Url;

/// The three request shapes the suite issues. Each is a GET on one resource
/// collection filtered by a single query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    UsersByUsername(&'a str),
    PostsByUserId(i64),
    CommentsByPostId(i64),
}

impl Endpoint<'_> {
    pub fn resource(&self) -> &'static str {
        match self {
            Endpoint::UsersByUsername(_) => "users",
            Endpoint::PostsByUserId(_) => "posts",
            Endpoint::CommentsByPostId(_) => "comments",
        }
    }

    pub fn query(&self) -> (&'static str, String) {
        match self {
            Endpoint::UsersByUsername(username) => ("username", (*username).to_string()),
            Endpoint::PostsByUserId(user_id) => ("userId", user_id.to_string()),
            Endpoint::CommentsByPostId(post_id) => ("postId", post_id.to_string()),
        }
    }

    /// Resolve against `base`, keeping any path prefix the base carries.
    /// The query value is percent-encoded.
    pub fn url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        let path = format!("{}/{}", base.path().trim_end_matches('/'), self.resource());
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);

        let (key, value) = self.query();
        url.query_pairs_mut().append_pair(key, &value);
        url
    }
}

impl Display for Endpoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (key, value) = self.query();
        write!(f, "GET /{}?{key}={value}", self.resource())
    }
}
