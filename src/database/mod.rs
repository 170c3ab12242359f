//! Database module
//!
//! This module handles the keyed store that holds to-do items

pub mod store;
pub mod connection;
pub mod repositories;
pub mod redis_store;
pub mod memory;
pub mod service;

// Re-export commonly used database components
pub use store::TodoStore;
pub use connection::{DatabasePool, DatabaseConfig, create_pool};
pub use repositories::TodoRepository;
pub use redis_store::RedisTodoStore;
pub use memory::MemoryTodoStore;
pub use service::connect_store;
