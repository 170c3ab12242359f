//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod todo;

// Re-export repositories
pub use todo::TodoRepository;
