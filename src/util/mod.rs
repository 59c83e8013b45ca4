//! Small shared utilities outside the net/state layers.

pub mod credentials;
