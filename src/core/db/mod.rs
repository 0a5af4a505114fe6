//! Database Module
//!
//! This module provides the storage side of studentdb, organized into focused
//! submodules:
//!
//! - **Connection Management** (`connection.rs`): connection targets, driver selection and the `StudentStore` seam
//! - **Records** (`student.rs`): the row types of the `students` relation
//! - **Drivers** (`postgres.rs`, `sqlite.rs`): one `StudentStore` per engine, each behind its cargo feature
//!
//! ## Error Handling
//!
//! Driver errors convert into `StudentDbError` and are reported as data-access failures.
pub mod connection;
#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod student;

pub use connection::*;
pub use student::*;
