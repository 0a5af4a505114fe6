use crate::core::db::ConnectionTarget;
use crate::core::Result;
use crate::output::Console;
use std::io::Write;

/// Usage line printed when arguments are missing.
pub const USAGE: &str = "usage: studentdb <host> <port> <database-name> <username> <password>";

/// Exit status for a run that never connected because arguments were missing.
pub const EXIT_USAGE: u8 = 2;

/// Exit status for any fatal error after argument parsing.
pub const EXIT_FAILURE: u8 = 1;

/// The five positional connection arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionArgs {
    pub host: String,
    pub port: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl ConnectionArgs {
    /// Takes the first five arguments (program name excluded).
    ///
    /// Returns `None` when fewer than five are given. Anything after the
    /// fifth is ignored.
    pub fn from_args<I>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        Some(ConnectionArgs {
            host: args.next()?,
            port: args.next()?,
            database: args.next()?,
            username: args.next()?,
            password: args.next()?,
        })
    }

    pub fn into_target(self, scheme: &str) -> ConnectionTarget {
        ConnectionTarget::new(
            scheme,
            self.host,
            self.port,
            self.database,
            self.username,
            self.password,
        )
    }
}

/// Tells the user the arguments are incomplete and prints the usage line.
pub fn report_missing_args<W: Write>(console: &mut Console<W>) -> Result<()> {
    console.program("Missing arguments. Exiting program...")?;
    console.program(USAGE)?;
    console.flush()
}
