//! Reusable UI components.

pub mod navbar;
pub mod post_card;
