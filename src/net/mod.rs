//! Networking: transport client, typed endpoints, and session operations.

pub mod api;
pub mod auth;
pub mod client;
pub mod types;
