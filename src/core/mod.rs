//! Core Module for studentdb
//!
//! This module contains the database backends and the shared error type
//! used by the client, the output layer and the entry point.

pub mod db;
pub mod error;

// Re-export commonly used types for convenience
pub use error::{ErrorKind, Result, StudentDbError};
