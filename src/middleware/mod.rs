//! Middleware module
//!
//! This module contains middleware for webhook request processing

pub mod signature;
pub mod logging;

// Re-export commonly used middleware
pub use signature::{SignatureVerifier, SIGNATURE_HEADER};
