//! Tasks Module
//!
//! Background maintenance tasks for the pool cache.

pub mod cleanup;

pub use cleanup::spawn_cleanup_task;
