//! Shared helpers for the backend's unit and integration tests.
//!
//! Kept free of backend types so the assertions check the wire contract,
//! not the Rust structs that produce it.

pub mod logging;
pub mod problem_details;
