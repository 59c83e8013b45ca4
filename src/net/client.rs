//! HTTP transport client with credential hooks.
//!
//! `ApiClient` wraps a [`Transport`] (browser fetch in production, a
//! scripted fake in tests) and runs two hooks around every exchange:
//!
//! - outgoing: consult the credential store and attach
//!   `Authorization: Bearer <token>` when a token is present;
//! - incoming: on any 401 response, clear the credential store and notify
//!   invalidation listeners, then propagate the error unchanged.
//!
//! ERROR HANDLING
//! ==============
//! Every exchange resolves to `Result<RawResponse, ApiError>`; HTTP error
//! statuses become `ApiError::Http` carrying the server's optional
//! `{ message }` payload so callers can surface it verbatim.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::fmt;
use std::sync::Mutex;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::net::types::ErrorBody;
use crate::util::credentials::CredentialStore;

/// Fixed per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// API server address: `DEVBLOG_API_URL` at build time, else the local
/// development server.
#[must_use]
pub fn default_base_url() -> String {
    option_env!("DEVBLOG_API_URL")
        .unwrap_or("http://localhost:5000")
        .to_owned()
}

/// HTTP methods used by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A multipart form field value.
#[derive(Clone, Debug)]
pub enum FormValue {
    Text(String),
    /// A file picked in the browser. Only constructible with a DOM.
    #[cfg(feature = "csr")]
    File(web_sys::File),
}

/// Request body variants the API uses.
#[derive(Clone, Debug)]
pub enum Body {
    Empty,
    Json(serde_json::Value),
    /// Multipart form data; the browser supplies the content-type boundary.
    Form(Vec<(String, FormValue)>),
}

/// A fully-built request handed to the transport.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

/// A raw HTTP response: status plus body text, any status code.
#[derive(Clone, Debug)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Classified transport failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiError {
    /// No response: DNS, connection, or fetch failure.
    Network(String),
    /// No response within [`REQUEST_TIMEOUT`].
    Timeout,
    /// An HTTP error status, with the server's `message` when it sent one.
    Http { status: u16, message: Option<String> },
    /// The response arrived but its body had an unexpected shape.
    Decode(String),
}

impl ApiError {
    /// Human-readable message for the UI: the server's own `message` when
    /// present, otherwise `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Http {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_owned(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(detail) => write!(f, "network error: {detail}"),
            Self::Timeout => write!(f, "request timed out"),
            Self::Http { status, message } => match message {
                Some(message) => write!(f, "HTTP {status}: {message}"),
                None => write!(f, "HTTP {status}"),
            },
            Self::Decode(detail) => write!(f, "unexpected response shape: {detail}"),
        }
    }
}

/// The seam between the client pipeline and the actual I/O.
///
/// Implementations return `Ok` for any HTTP response regardless of status;
/// `Err` is reserved for exchanges that produced no response at all.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn dispatch(&self, req: &ApiRequest) -> Result<RawResponse, ApiError>;
}

/// Browser fetch transport via `gloo-net`, with the fixed request timeout.
///
/// Outside the browser every dispatch fails with a network error, mirroring
/// the fact that there is nothing to fetch with.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    #[cfg(feature = "csr")]
    async fn dispatch(&self, req: &ApiRequest) -> Result<RawResponse, ApiError> {
        use futures::FutureExt;

        let request = build_fetch_request(req)?;
        let fetch = request.send().fuse();
        let timeout = gloo_timers::future::sleep(REQUEST_TIMEOUT).fuse();
        futures::pin_mut!(fetch, timeout);

        futures::select! {
            resp = fetch => match resp {
                Ok(resp) => {
                    let status = resp.status();
                    let body = resp.text().await.unwrap_or_default();
                    Ok(RawResponse { status, body })
                }
                Err(e) => Err(ApiError::Network(e.to_string())),
            },
            () = timeout => Err(ApiError::Timeout),
        }
    }

    #[cfg(not(feature = "csr"))]
    async fn dispatch(&self, req: &ApiRequest) -> Result<RawResponse, ApiError> {
        let _ = req;
        Err(ApiError::Network("no browser fetch available".to_owned()))
    }
}

#[cfg(feature = "csr")]
fn build_fetch_request(req: &ApiRequest) -> Result<gloo_net::http::Request, ApiError> {
    use gloo_net::http::RequestBuilder;

    let mut builder = RequestBuilder::new(&req.url).method(fetch_method(req.method));
    for (name, value) in &req.headers {
        builder = builder.header(name, value);
    }

    match &req.body {
        Body::Empty => builder.build().map_err(|e| ApiError::Network(e.to_string())),
        Body::Json(value) => {
            let json = serde_json::to_string(value)
                .map_err(|e| ApiError::Decode(e.to_string()))?;
            builder
                .body(json)
                .map_err(|e| ApiError::Network(e.to_string()))
        }
        Body::Form(fields) => {
            let form = web_sys::FormData::new()
                .map_err(|_| ApiError::Network("FormData unavailable".to_owned()))?;
            for (name, value) in fields {
                let appended = match value {
                    FormValue::Text(text) => form.append_with_str(name, text),
                    FormValue::File(file) => form.append_with_blob(name, file),
                };
                if appended.is_err() {
                    return Err(ApiError::Network("failed to build form data".to_owned()));
                }
            }
            builder
                .body(form)
                .map_err(|e| ApiError::Network(e.to_string()))
        }
    }
}

#[cfg(feature = "csr")]
fn fetch_method(method: Method) -> gloo_net::http::Method {
    match method {
        Method::Get => gloo_net::http::Method::GET,
        Method::Post => gloo_net::http::Method::POST,
        Method::Put => gloo_net::http::Method::PUT,
        Method::Delete => gloo_net::http::Method::DELETE,
    }
}

/// Configured API client: base address, transport, credential store, and
/// the invalidation listeners fired by the incoming 401 hook.
pub struct ApiClient<T, S> {
    base_url: String,
    transport: T,
    store: S,
    invalidation_listeners: Mutex<Vec<Box<dyn Fn() + Send + Sync>>>,
}

impl<T: Transport, S: CredentialStore> ApiClient<T, S> {
    pub fn new(base_url: impl Into<String>, transport: T, store: S) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            store,
            invalidation_listeners: Mutex::new(Vec::new()),
        }
    }

    /// The credential store consulted by the outgoing hook.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Register a callback fired whenever a 401 clears the stored
    /// credential. The session manager subscribes here so the in-memory
    /// session converges with the store.
    pub fn on_credential_invalidated(&self, listener: impl Fn() + Send + Sync + 'static) {
        if let Ok(mut listeners) = self.invalidation_listeners.lock() {
            listeners.push(Box::new(listener));
        }
    }

    /// Perform one request through both hooks.
    ///
    /// # Errors
    ///
    /// [`ApiError::Network`]/[`ApiError::Timeout`] when no response arrived,
    /// [`ApiError::Http`] for any non-2xx status.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Body,
    ) -> Result<RawResponse, ApiError> {
        let req = ApiRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers: self.request_headers(&body),
            body,
        };

        let resp = self.transport.dispatch(&req).await?;

        // Incoming hook: a rejected credential is cleaned up here, but the
        // error still propagates unchanged to the caller.
        if resp.status == 401 {
            self.store.clear();
            if let Ok(listeners) = self.invalidation_listeners.lock() {
                for listener in listeners.iter() {
                    listener();
                }
            }
        }

        if (200..300).contains(&resp.status) {
            Ok(resp)
        } else {
            let message = serde_json::from_str::<ErrorBody>(&resp.body)
                .ok()
                .and_then(|b| b.message);
            Err(ApiError::Http {
                status: resp.status,
                message,
            })
        }
    }

    /// Outgoing hook: default headers plus the bearer credential when one
    /// is stored. An empty store never blocks the request.
    fn request_headers(&self, body: &Body) -> Vec<(String, String)> {
        let mut headers = Vec::new();
        if let Body::Json(_) = body {
            headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
        }
        if let Some(token) = self.store.get() {
            headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        }
        headers
    }
}
