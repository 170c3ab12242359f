//! Test helpers module
//!
//! This module provides utilities and helpers for testing the TodoBuddy application.
//! It includes a mock LINE API server, a recording store, webhook event builders,
//! and test context setup.

#![allow(dead_code)]

pub mod line_mock;
pub mod recording_store;
pub mod test_context;
pub mod test_data;

pub use line_mock::*;
pub use recording_store::*;
pub use test_context::*;
pub use test_data::*;
