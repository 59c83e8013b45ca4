//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State lives in plain structs provided to components as `RwSignal`
//! contexts. Transitions are ordinary methods so the state machine can be
//! exercised without a browser or a reactive runtime.

pub mod session;
