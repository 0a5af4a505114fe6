//! Connection Management Module
//!
//! This module turns the command-line connection arguments into a target,
//! selects a driver from the target's scheme, and defines the `StudentStore`
//! seam every driver implements.

use crate::core::db::student::{NewStudent, Student};
use crate::core::{Result, StudentDbError};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Scheme used when neither the config nor the caller picks one.
pub const DEFAULT_SCHEME: &str = "postgresql";

/// Relational engines studentdb knows how to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    /// PostgreSQL over TCP
    Postgres,
    /// A local SQLite database file
    Sqlite,
}

impl Engine {
    /// Resolves a url scheme to an engine.
    ///
    /// Unknown schemes have no driver and fail with `DriverUnavailable`.
    pub fn from_scheme(scheme: &str) -> Result<Self> {
        match scheme.to_ascii_lowercase().as_str() {
            "postgresql" | "postgres" => Ok(Engine::Postgres),
            "sqlite" => Ok(Engine::Sqlite),
            other => Err(StudentDbError::DriverUnavailable(format!(
                "no driver registered for scheme '{}'. Supported schemes: postgresql, sqlite",
                other
            ))),
        }
    }

    /// Human readable engine name used in console messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Engine::Postgres => "PostgreSQL",
            Engine::Sqlite => "SQLite",
        }
    }
}

/// Everything needed to reach one database.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    pub scheme: String,
    pub host: String,
    /// Kept as given on the command line; drivers that need a number parse it
    pub port: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl ConnectionTarget {
    pub fn new(
        scheme: impl Into<String>,
        host: impl Into<String>,
        port: impl Into<String>,
        database: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        ConnectionTarget {
            scheme: scheme.into(),
            host: host.into(),
            port: port.into(),
            database: database.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// `<scheme>://<host>:<port>/<database>`
    pub fn url(&self) -> String {
        format!(
            "{}://{}:{}/{}",
            self.scheme, self.host, self.port, self.database
        )
    }

    /// The password with every character replaced by `*`.
    pub fn masked_password(&self) -> String {
        "*".repeat(self.password.chars().count())
    }

    pub fn engine(&self) -> Result<Engine> {
        Engine::from_scheme(&self.scheme)
    }

    /// Parses the port for drivers that connect over TCP.
    pub fn port_number(&self) -> Result<u16> {
        self.port.parse::<u16>().map_err(|_| {
            StudentDbError::InvalidTarget(format!(
                "port '{}' is not a valid TCP port number",
                self.port
            ))
        })
    }
}

// The password never shows up in debug output or logs.
impl fmt::Debug for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionTarget")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &self.masked_password())
            .finish()
    }
}

/// Driver tuning that does not belong in the target itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Upper bound on establishing the connection, where the driver supports one
    pub connect_timeout: Option<Duration>,
}

/// Storage operations on the `students` relation.
///
/// Each implementation owns exactly one live driver connection. All calls
/// block until the server answers.
pub trait StudentStore {
    /// The engine behind this store
    fn engine(&self) -> Engine;

    /// Reads every row, in whatever order the engine returns them
    fn fetch_all(&mut self) -> Result<Vec<Student>>;

    /// Inserts one row and returns the id the database generated for it
    fn insert(&mut self, student: &NewStudent) -> Result<i32>;

    /// Sets the email of the matching row; returns the affected row count
    fn update_email(&mut self, student_id: i32, new_email: &str) -> Result<u64>;

    /// Deletes the matching row; returns the affected row count
    fn delete(&mut self, student_id: i32) -> Result<u64>;

    /// Releases the driver connection
    fn close(self: Box<Self>) -> Result<()>;
}

/// Opens a connection to `target` with the driver its scheme selects.
///
/// # Returns
///
/// A boxed store holding the live connection, `StudentDbError::DriverUnavailable`
/// when no driver serves the scheme, or a data-access error when the driver
/// cannot connect.
pub fn open_store(target: &ConnectionTarget, options: &ConnectOptions) -> Result<Box<dyn StudentStore>> {
    let engine = target.engine()?;
    debug!(?target, ?engine, "opening connection");
    let store = match engine {
        Engine::Postgres => open_postgres(target, options)?,
        Engine::Sqlite => open_sqlite(target)?,
    };
    info!(url = %target.url(), "connected to {}", engine.display_name());
    Ok(store)
}

#[cfg(feature = "postgres")]
fn open_postgres(target: &ConnectionTarget, options: &ConnectOptions) -> Result<Box<dyn StudentStore>> {
    let store = super::postgres::PostgresStore::connect(target, options)?;
    Ok(Box::new(store))
}

#[cfg(not(feature = "postgres"))]
fn open_postgres(_target: &ConnectionTarget, _options: &ConnectOptions) -> Result<Box<dyn StudentStore>> {
    Err(StudentDbError::DriverUnavailable(
        "studentdb was built without the `postgres` feature".to_string(),
    ))
}

#[cfg(feature = "sqlite")]
fn open_sqlite(target: &ConnectionTarget) -> Result<Box<dyn StudentStore>> {
    let store = super::sqlite::SqliteStore::open(&target.database)?;
    Ok(Box::new(store))
}

#[cfg(not(feature = "sqlite"))]
fn open_sqlite(_target: &ConnectionTarget) -> Result<Box<dyn StudentStore>> {
    Err(StudentDbError::DriverUnavailable(
        "studentdb was built without the `sqlite` feature".to_string(),
    ))
}
