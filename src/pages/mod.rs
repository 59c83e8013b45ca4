//! Route-level page components.

pub mod create_post;
pub mod edit_post;
pub mod home;
pub mod login;
pub mod signup;
pub mod view_post;
