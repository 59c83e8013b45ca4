//! # devblog-client
//!
//! Leptos + WASM single-page client for the DevBlog application. All
//! persistent state lives on the remote API server; this crate is the
//! rendering and form-handling layer over HTTP, with a bearer token held in
//! `localStorage` for session persistence.
//!
//! This crate contains pages, components, the session state, the API
//! transport with its credential hooks, and the credential store. Browser
//! integration is gated behind the `csr` feature so the session and
//! transport logic stay testable under plain `cargo test`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;
