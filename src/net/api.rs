//! Typed post endpoints over the transport client.
//!
//! Thin wrappers: build the request, decode the response, classify failures
//! as [`ApiError`]. Create/update send multipart form data because the
//! server accepts an optional cover-image upload alongside the text fields.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::net::client::{ApiClient, ApiError, Body, FormValue, Method, Transport};
use crate::net::types::Post;
use crate::util::credentials::CredentialStore;

/// Editable post fields, as gathered by the create/edit forms.
#[derive(Clone, Debug, Default)]
pub struct PostDraft {
    pub title: String,
    pub subtitle: String,
    pub content: String,
    /// Cover image picked in the browser, if any.
    #[cfg(feature = "csr")]
    pub image: Option<web_sys::File>,
}

impl PostDraft {
    fn form_fields(&self) -> Vec<(String, FormValue)> {
        let mut fields = vec![
            ("title".to_owned(), FormValue::Text(self.title.clone())),
            ("subtitle".to_owned(), FormValue::Text(self.subtitle.clone())),
            ("content".to_owned(), FormValue::Text(self.content.clone())),
        ];
        #[cfg(feature = "csr")]
        if let Some(file) = &self.image {
            fields.push(("image".to_owned(), FormValue::File(file.clone())));
        }
        fields
    }
}

/// Fetch all posts from `GET /api/posts`.
///
/// # Errors
///
/// Any transport or decode failure.
pub async fn fetch_posts<T: Transport, S: CredentialStore>(
    client: &ApiClient<T, S>,
) -> Result<Vec<Post>, ApiError> {
    client
        .request(Method::Get, "/api/posts", Body::Empty)
        .await?
        .json()
}

/// Fetch one post from `GET /api/posts/:id`.
///
/// # Errors
///
/// Any transport or decode failure.
pub async fn fetch_post<T: Transport, S: CredentialStore>(
    client: &ApiClient<T, S>,
    id: &str,
) -> Result<Post, ApiError> {
    client
        .request(Method::Get, &format!("/api/posts/{id}"), Body::Empty)
        .await?
        .json()
}

/// Create a post via `POST /api/posts` (multipart).
///
/// # Errors
///
/// Any transport or decode failure.
pub async fn create_post<T: Transport, S: CredentialStore>(
    client: &ApiClient<T, S>,
    draft: &PostDraft,
) -> Result<Post, ApiError> {
    client
        .request(Method::Post, "/api/posts", Body::Form(draft.form_fields()))
        .await?
        .json()
}

/// Update a post via `PUT /api/posts/:id` (multipart).
///
/// # Errors
///
/// Any transport or decode failure.
pub async fn update_post<T: Transport, S: CredentialStore>(
    client: &ApiClient<T, S>,
    id: &str,
    draft: &PostDraft,
) -> Result<Post, ApiError> {
    client
        .request(
            Method::Put,
            &format!("/api/posts/{id}"),
            Body::Form(draft.form_fields()),
        )
        .await?
        .json()
}

/// Delete a post via `DELETE /api/posts/:id`.
///
/// # Errors
///
/// Any transport failure.
pub async fn delete_post<T: Transport, S: CredentialStore>(
    client: &ApiClient<T, S>,
    id: &str,
) -> Result<(), ApiError> {
    client
        .request(Method::Delete, &format!("/api/posts/{id}"), Body::Empty)
        .await?;
    Ok(())
}
