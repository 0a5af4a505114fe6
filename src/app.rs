//! The connect-and-run sequence.
//!
//! [`connect_and_run`] opens one connection, runs the demo operations in
//! order and closes the connection. Any failure stops the sequence and is
//! returned to the caller, which reports it with [`report_error`].

use crate::client::DatabaseClient;
use crate::config::{Config, DemoConfig};
use crate::core::db::{open_store, ConnectionTarget, NewStudent};
use crate::core::{ErrorKind, Result, StudentDbError};
use crate::output::Console;
use chrono::NaiveDate;
use std::error::Error as _;
use std::io::Write;
use tracing::info;

const DEFAULT_FIRST_NAME: &str = "Tarō";
const DEFAULT_LAST_NAME: &str = "Yamada";
const DEFAULT_EMAIL: &str = "t.yamada@example.com";
const DEFAULT_NEW_EMAIL: &str = "taro.yamada@example.com";

/// The values the demo sequence inserts, updates and deletes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoPlan {
    pub student: NewStudent,
    /// Row to update and delete; `None` targets the row just inserted
    pub target_id: Option<i32>,
    pub new_email: String,
}

impl DemoPlan {
    pub fn from_config(demo: &DemoConfig, today: NaiveDate) -> Self {
        DemoPlan {
            student: NewStudent::new(
                demo.first_name.as_deref().unwrap_or(DEFAULT_FIRST_NAME),
                demo.last_name.as_deref().unwrap_or(DEFAULT_LAST_NAME),
                demo.email.as_deref().unwrap_or(DEFAULT_EMAIL),
                demo.enrollment_date.unwrap_or(today),
            ),
            target_id: demo.target_id,
            new_email: demo
                .new_email
                .clone()
                .unwrap_or_else(|| DEFAULT_NEW_EMAIL.to_string()),
        }
    }
}

/// Runs list, insert, update-email and delete, strictly in that order.
pub fn run_demo<W: Write>(client: &mut DatabaseClient<'_, W>, plan: &DemoPlan) -> Result<()> {
    client.list_all()?;
    let inserted_id = client.insert(&plan.student)?;
    let target_id = plan.target_id.unwrap_or(inserted_id);
    client.update_email(target_id, &plan.new_email)?;
    client.delete(target_id)?;
    Ok(())
}

/// Announces the target, connects, runs the demo and closes the connection.
///
/// The connection is released on every path: explicitly on success, and by
/// the client's `Drop` when an operation fails part way.
pub fn connect_and_run<W: Write>(
    target: &ConnectionTarget,
    config: &Config,
    plan: &DemoPlan,
    console: &mut Console<W>,
) -> Result<()> {
    let palette = console.palette();
    let format = config.output_format()?;

    console.program(&format!(
        "Received database URL {}.",
        palette.input(&target.url())
    ))?;
    console.program(&format!(
        "Database username set to {}.",
        palette.input(&target.username)
    ))?;
    console.program(&format!(
        "Database password set to {}.",
        palette.input(&target.masked_password())
    ))?;
    console.program("Attempting to log in to database...")?;

    let engine = target.engine()?;
    let store = open_store(target, &config.connect_options())?;
    let mut client = DatabaseClient::new(store, console).with_format(format);

    if client.is_open() {
        client
            .console()
            .program(&format!("Connected to {} successfully.", engine.display_name()))?;
        run_demo(&mut client, plan)?;
    } else {
        client
            .console()
            .program("Failed to establish connection to database.")?;
    }

    client.close()?;
    client.console().program("Database connection closed.")?;
    info!("demo sequence finished");
    Ok(())
}

/// Prints a fatal error and its source chain under the error category.
pub fn report_error<W: Write>(console: &mut Console<W>, err: &StudentDbError) -> Result<()> {
    let headline = match err.kind() {
        ErrorKind::DriverUnavailable => "No database driver is available for this connection.",
        ErrorKind::DataAccess => "Exception thrown by the database driver.",
        ErrorKind::Config => "Could not load the configuration.",
        ErrorKind::Output => "Could not write program output.",
    };
    console.error(headline)?;
    console.error("Printing error chain...")?;
    console.blank()?;
    console.block(&format!("\t{}\n", err))?;
    let mut source = err.source();
    while let Some(cause) = source {
        console.block(&format!("\tcaused by: {}\n", cause))?;
        source = cause.source();
    }
    console.blank()?;
    console.flush()
}
