//! Wire types for the DevBlog API.
//!
//! Field names follow the server's JSON shapes (`_id`, `imageUrl`,
//! `createdAt`); serde renames keep the Rust side idiomatic.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The authenticated identity returned by the auth endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Post author as embedded in post payloads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAuthor {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
}

/// A blog post, as returned by both the list and detail endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub content: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub author: PostAuthor,
}

/// Successful login/signup payload: a fresh credential plus the identity.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthSuccess {
    pub token: String,
    pub user: User,
}

/// `GET /api/auth/verify` response.
#[derive(Clone, Debug, Deserialize)]
pub struct VerifyResponse {
    pub user: User,
}

/// Error payload convention: a JSON body with an optional `message`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl Post {
    /// Excerpt shown on post cards: the first 150 characters of content.
    #[must_use]
    pub fn excerpt(&self) -> String {
        // Count chars, not bytes, so multi-byte content never splits.
        if self.content.chars().count() > 150 {
            let cut: String = self.content.chars().take(150).collect();
            format!("{cut}...")
        } else {
            self.content.clone()
        }
    }

    /// Whether `user` authored this post.
    #[must_use]
    pub fn is_authored_by(&self, user: &User) -> bool {
        self.author.id == user.id
    }

    /// Calendar date portion of `created_at` (the server sends an ISO
    /// timestamp).
    #[must_use]
    pub fn created_date(&self) -> &str {
        self.created_at
            .split_once('T')
            .map_or(self.created_at.as_str(), |(date, _)| date)
    }
}
