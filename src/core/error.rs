//! studentdb Error Module
//!
//! This module defines the error types for studentdb. Every failure that can
//! reach the top level is a `StudentDbError`, and every `StudentDbError`
//! belongs to exactly one `ErrorKind` which decides how the run is reported.
//!
//! Variants that wrap a driver or library error leave that error out of their
//! own message and expose it through `source()` instead.
use std::error::Error as _;
use thiserror::Error;

/// Error type for the studentdb application.
///
/// This enum covers all error scenarios that can occur within studentdb:
/// - Driver selection (unknown scheme, driver compiled out)
/// - Data access (connect, query, update, closed handle)
/// - Configuration loading
/// - Console output and export formats
#[derive(Error, Debug)]
pub enum StudentDbError {
    /// No driver is available for the requested scheme
    #[error("Driver unavailable: {0}")]
    DriverUnavailable(String),

    /// Errors raised by the PostgreSQL driver
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error")]
    Postgres(#[from] postgres::Error),

    /// Errors raised by the SQLite driver
    #[cfg(feature = "sqlite")]
    #[error("SQLite error")]
    Sqlite(#[from] rusqlite::Error),

    /// The connection target could not be turned into driver parameters
    #[error("Invalid connection target: {0}")]
    InvalidTarget(String),

    /// An operation was attempted after the connection was closed
    #[error("Connection error: the database connection is already closed")]
    ConnectionClosed,

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Console and file I/O errors
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// JSON export errors
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// Output formatting errors (export formats, display issues)
    #[error("UI error: {0}")]
    Ui(String),
}

/// The category a `StudentDbError` is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The database driver cannot be located or loaded
    DriverUnavailable,
    /// Any failure during connect, query, or update
    DataAccess,
    /// The configuration file is unreadable or malformed
    Config,
    /// Writing to the console failed
    Output,
}

impl StudentDbError {
    /// Classifies this error for top-level reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StudentDbError::DriverUnavailable(_) => ErrorKind::DriverUnavailable,
            #[cfg(feature = "postgres")]
            StudentDbError::Postgres(_) => ErrorKind::DataAccess,
            #[cfg(feature = "sqlite")]
            StudentDbError::Sqlite(_) => ErrorKind::DataAccess,
            StudentDbError::InvalidTarget(_) | StudentDbError::ConnectionClosed => {
                ErrorKind::DataAccess
            }
            StudentDbError::Config(_) => ErrorKind::Config,
            StudentDbError::Io(_) | StudentDbError::Json(_) | StudentDbError::Ui(_) => {
                ErrorKind::Output
            }
        }
    }

    /// The message and every `source()` below it, joined with `: `.
    pub fn report(&self) -> String {
        let mut report = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            report.push_str(": ");
            report.push_str(&cause.to_string());
            source = cause.source();
        }
        report
    }
}

/// Type alias for Result to use StudentDbError as the error type.
pub type Result<T> = std::result::Result<T, StudentDbError>;
