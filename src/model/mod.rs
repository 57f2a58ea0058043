//! Typed views over the service's users, posts and comments.
//!
//! Only the fields the suite asserts on are modelled; anything else in the
//! payload is ignored during decoding.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    #[serde(default)]
    pub email: Option<String>,
}

impl Comment {
    /// A comment without an email passes; a present email must be well formed.
    pub fn has_valid_email(&self) -> bool {
        self.email.as_deref().is_none_or(is_valid_email)
    }
}

/// `local-part@domain`, where the local part holds letters, digits and
/// `+_.-`, and the domain is non-empty.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_well_formed_emails() {
        for email in [
            "Eliseo@gardner.biz",
            "Jayne_Kuhic@sydney.com",
            "Nikita@garfield.biz",
            "first.last+tag@mail.example-domain.org",
        ] {
            assert!(is_valid_email(email), "{email}");
        }
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in [
            "",
            "no-at-sign.example.com",
            "@example.com",
            "user@",
            "us er@example.com",
            "user@exa mple.com",
            "user@@example.com",
            "user#x@example.com",
        ] {
            assert!(!is_valid_email(email), "{email}");
        }
    }

    #[test]
    fn comment_without_email_passes() {
        let comment: Comment = serde_json::from_value(json!({"id": 1, "postId": 2})).unwrap();
        assert_eq!(comment.email, None);
        assert!(comment.has_valid_email());
    }

    #[test]
    fn decodes_camel_case_fields_and_ignores_extras() {
        let post: Post = serde_json::from_value(json!({
            "userId": 9,
            "id": 81,
            "title": "ut cupiditate sequi",
            "body": "..."
        }))
        .unwrap();
        assert_eq!(post, Post { id: 81, user_id: 9 });

        let comment: Comment = serde_json::from_value(json!({
            "postId": 81,
            "id": 401,
            "email": "bad email@x.com"
        }))
        .unwrap();
        assert!(!comment.has_valid_email());
    }
}
