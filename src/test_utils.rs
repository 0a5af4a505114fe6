//! # Test Utilities Module
//!
//! Shared fixtures for unit tests: an isolated SQLite database file holding
//! the `students` table, optionally seeded, plus helpers to capture console
//! output.

use crate::output::{Console, Palette};
#[cfg(feature = "sqlite")]
pub use fixture::*;

/// A console writing uncolored text into memory
pub fn plain_console() -> Console<Vec<u8>> {
    Console::new(Vec::new(), Palette::plain())
}

/// Everything written to `console` so far
pub fn captured(console: &Console<Vec<u8>>) -> String {
    String::from_utf8_lossy(console.writer()).into_owned()
}

#[cfg(feature = "sqlite")]
mod fixture {
    use crate::core::db::sqlite::SqliteStore;
    use crate::core::{Result, StudentDbError};
    use rusqlite::Connection;
    use tempfile::NamedTempFile;

    pub const STUDENTS_SCHEMA: &str = "
        CREATE TABLE students (
            student_id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT,
            last_name TEXT,
            email TEXT UNIQUE,
            enrollment_date DATE
        );
    ";

    pub const SAMPLE_STUDENTS: &str = "
        INSERT INTO students (first_name, last_name, email, enrollment_date) VALUES
            ('John', 'Doe', 'john.doe@example.com', '2023-09-01'),
            ('Jane', 'Smith', 'jane.smith@example.com', '2023-09-01'),
            ('Jim', 'Beam', 'jim.beam@example.com', '2023-09-02');
    ";

    /// Isolated database file with the students schema
    pub struct StudentFixture {
        pub file: NamedTempFile,
    }

    impl StudentFixture {
        /// Create an empty students table
        pub fn new() -> Result<Self> {
            let file = NamedTempFile::new()?;
            let conn = Connection::open(file.path())?;
            conn.execute_batch(STUDENTS_SCHEMA)?;
            Ok(StudentFixture { file })
        }

        /// Create the students table with three seed rows
        pub fn with_sample_data() -> Result<Self> {
            let fixture = Self::new()?;
            let conn = Connection::open(fixture.file.path())?;
            conn.execute_batch(SAMPLE_STUDENTS)?;
            Ok(fixture)
        }

        pub fn path(&self) -> Result<&str> {
            self.file
                .path()
                .to_str()
                .ok_or_else(|| StudentDbError::Config("temp path is not valid UTF-8".to_string()))
        }

        pub fn open_store(&self) -> Result<SqliteStore> {
            SqliteStore::open(self.path()?)
        }
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;
    use crate::core::db::StudentStore;

    #[test]
    fn test_empty_fixture() {
        let fixture = StudentFixture::new().unwrap();
        let mut store = fixture.open_store().unwrap();
        assert!(store.fetch_all().unwrap().is_empty());
    }

    #[test]
    fn test_sample_data_fixture() {
        let fixture = StudentFixture::with_sample_data().unwrap();
        let mut store = fixture.open_store().unwrap();
        assert_eq!(store.fetch_all().unwrap().len(), 3);
    }
}
