//! The demo database client.
//!
//! [`DatabaseClient`] owns one live [`StudentStore`] and reports every
//! operation on a [`Console`]. Each mutation is followed by a fresh listing
//! of the table.

use crate::core::db::{
    NewStudent, Student, StudentStore, STUDENTS_TABLE, STUDENT_COLUMNS,
};
use crate::core::{Result, StudentDbError};
use crate::output::Console;
use crate::results_grid::{OutputFormat, ResultsGrid};
use std::io::Write;
use tracing::{debug, info, warn};

/// Display widths of the listing columns, in `STUDENT_COLUMNS` order.
const COLUMN_WIDTHS: [usize; 5] = [10, 10, 10, 24, 15];

pub struct DatabaseClient<'c, W: Write> {
    store: Option<Box<dyn StudentStore>>,
    console: &'c mut Console<W>,
    format: OutputFormat,
}

impl<'c, W: Write> DatabaseClient<'c, W> {
    pub fn new(store: Box<dyn StudentStore>, console: &'c mut Console<W>) -> Self {
        DatabaseClient {
            store: Some(store),
            console,
            format: OutputFormat::Table,
        }
    }

    /// Selects how `list_all` prints the table.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// The console this client reports to.
    pub fn console(&mut self) -> &mut Console<W> {
        &mut *self.console
    }

    /// Whether the client still holds its connection.
    ///
    /// This does not talk to the server, so a dropped TCP connection still
    /// reports as open until an operation fails.
    pub fn is_open(&self) -> bool {
        self.store.is_some()
    }

    fn store(&mut self) -> Result<&mut Box<dyn StudentStore>> {
        self.store.as_mut().ok_or(StudentDbError::ConnectionClosed)
    }

    /// Fetches every row without printing anything.
    pub fn students(&mut self) -> Result<Vec<Student>> {
        self.store()?.fetch_all()
    }

    /// Prints every row of the students table.
    pub fn list_all(&mut self) -> Result<()> {
        let students = self.students()?;
        debug!(rows = students.len(), "listing students");

        let mut grid = ResultsGrid::new();
        let columns: Vec<(&str, usize)> = STUDENT_COLUMNS
            .iter()
            .copied()
            .zip(COLUMN_WIDTHS)
            .collect();
        grid.set_columns(&columns);
        for student in &students {
            grid.add_row(student.to_cells());
        }

        let palette = self.console.palette();
        self.console.database(&format!(
            "Displaying all students in table {}.",
            palette.table(STUDENTS_TABLE)
        ))?;
        self.console.blank()?;
        let mut rendered = grid.export(self.format)?;
        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }
        self.console.block(&rendered)?;
        self.console.blank()?;
        Ok(())
    }

    /// Inserts a student, prints a confirmation and the updated table.
    ///
    /// # Returns
    ///
    /// The `student_id` the database generated for the new row.
    pub fn insert(&mut self, student: &NewStudent) -> Result<i32> {
        let student_id = self.store()?.insert(student)?;
        info!(student_id, "inserted student");

        let palette = self.console.palette();
        self.console.database(&format!(
            "Inserted student {{{}, {}, {}, {}}} into {}.",
            palette.input(&student.first_name),
            palette.input(&student.last_name),
            palette.input(&student.email),
            palette.input(&student.enrollment_date.to_string()),
            palette.table(STUDENTS_TABLE)
        ))?;
        self.list_all()?;
        Ok(student_id)
    }

    /// Sets the email of one student, prints a confirmation and the updated table.
    ///
    /// A missing `student_id` is not an error; it simply affects no rows.
    pub fn update_email(&mut self, student_id: i32, new_email: &str) -> Result<u64> {
        let affected = self.store()?.update_email(student_id, new_email)?;
        info!(student_id, affected, "updated student email");

        let palette = self.console.palette();
        self.console.database(&format!(
            "Updated email of student with ID {} to {}.",
            palette.table(&student_id.to_string()),
            palette.input(new_email)
        ))?;
        self.list_all()?;
        Ok(affected)
    }

    /// Deletes one student, prints a confirmation and the updated table.
    ///
    /// A missing `student_id` is not an error; it simply affects no rows.
    pub fn delete(&mut self, student_id: i32) -> Result<u64> {
        let affected = self.store()?.delete(student_id)?;
        info!(student_id, affected, "deleted student");

        let palette = self.console.palette();
        self.console.database(&format!(
            "Removed student with ID {}.",
            palette.table(&student_id.to_string())
        ))?;
        self.list_all()?;
        Ok(affected)
    }

    /// Releases the connection. Closing an already closed client does nothing.
    pub fn close(&mut self) -> Result<()> {
        match self.store.take() {
            Some(store) => {
                debug!(engine = ?store.engine(), "closing connection");
                store.close()
            }
            None => Ok(()),
        }
    }
}

impl<W: Write> Drop for DatabaseClient<'_, W> {
    fn drop(&mut self) {
        if let Some(store) = self.store.take() {
            if let Err(e) = store.close() {
                warn!("failed to close database connection: {}", e.report());
            }
        }
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;
    use crate::core::ErrorKind;
    use crate::test_utils::{captured, plain_console, StudentFixture};
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn enrollment() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
    }

    fn open_client<'c>(
        fixture: &StudentFixture,
        console: &'c mut Console<Vec<u8>>,
    ) -> DatabaseClient<'c, Vec<u8>> {
        let store = fixture.open_store().unwrap();
        DatabaseClient::new(Box::new(store), console)
    }

    #[test]
    fn test_list_all_prints_table() {
        let fixture = StudentFixture::with_sample_data().unwrap();
        let mut console = plain_console();
        {
            let mut client = open_client(&fixture, &mut console);
            client.list_all().unwrap();
        }
        let output = captured(&console);
        assert!(output.starts_with("[DATABASE]: Displaying all students in table students.\n\n"));
        assert!(output.contains(
            "\tstudent_id | first_name | last_name  | email                    | enrollment_date\n"
        ));
        assert!(output.contains(&format!("\t{}\n", "-".repeat(81))));
        assert!(output.contains(
            "\t1          | John       | Doe        | john.doe@example.com     | 2023-09-01     \n"
        ));
        assert!(output.ends_with("\n\n"));
    }

    #[test]
    fn test_insert_then_list_contains_row() {
        let fixture = StudentFixture::with_sample_data().unwrap();
        let mut console = plain_console();
        let mut client = open_client(&fixture, &mut console);

        let new = NewStudent::new("Tarō", "Yamada", "t.yamada@example.com", enrollment());
        let id = client.insert(&new).unwrap();

        let students = client.students().unwrap();
        assert_eq!(students.len(), 4);
        let stored = students.iter().find(|s| s.student_id == id).unwrap();
        assert!(new.matches(stored));
        drop(client);

        let output = captured(&console);
        assert!(output.contains(
            "[DATABASE]: Inserted student {Tarō, Yamada, t.yamada@example.com, 2024-09-01} into students."
        ));
        assert!(output.contains("t.yamada@example.com"));
    }

    #[test]
    fn test_update_email_changes_only_target() {
        let fixture = StudentFixture::with_sample_data().unwrap();
        let mut console = plain_console();
        let mut client = open_client(&fixture, &mut console);

        let before = client.students().unwrap();
        let affected = client.update_email(2, "jane@example.org").unwrap();
        assert_eq!(affected, 1);
        let after = client.students().unwrap();

        assert_eq!(before.len(), after.len());
        for old in &before {
            let new = after.iter().find(|s| s.student_id == old.student_id).unwrap();
            if old.student_id == 2 {
                assert_eq!(new.email.as_deref(), Some("jane@example.org"));
                assert_eq!(new.first_name, old.first_name);
                assert_eq!(new.last_name, old.last_name);
                assert_eq!(new.enrollment_date, old.enrollment_date);
            } else {
                assert_eq!(new, old);
            }
        }
        drop(client);
        assert!(captured(&console)
            .contains("[DATABASE]: Updated email of student with ID 2 to jane@example.org."));
    }

    #[test]
    fn test_delete_removes_exactly_one_row() {
        let fixture = StudentFixture::with_sample_data().unwrap();
        let mut console = plain_console();
        let mut client = open_client(&fixture, &mut console);

        let before = client.students().unwrap();
        assert_eq!(client.delete(3).unwrap(), 1);
        let after = client.students().unwrap();

        assert_eq!(after.len(), before.len() - 1);
        assert!(after.iter().all(|s| s.student_id != 3));
        drop(client);
        assert!(captured(&console).contains("[DATABASE]: Removed student with ID 3."));
    }

    #[test]
    fn test_missing_id_is_noop() {
        let fixture = StudentFixture::with_sample_data().unwrap();
        let mut console = plain_console();
        let mut client = open_client(&fixture, &mut console);

        let before: HashSet<Student> = client.students().unwrap().into_iter().collect();
        assert_eq!(client.update_email(999, "ghost@example.com").unwrap(), 0);
        assert_eq!(client.delete(999).unwrap(), 0);
        let after: HashSet<Student> = client.students().unwrap().into_iter().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_listing_is_idempotent() {
        let fixture = StudentFixture::with_sample_data().unwrap();
        let mut console = plain_console();
        let mut client = open_client(&fixture, &mut console);

        let first: HashSet<Student> = client.students().unwrap().into_iter().collect();
        let second: HashSet<Student> = client.students().unwrap().into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_operations_after_close_fail() {
        let fixture = StudentFixture::with_sample_data().unwrap();
        let mut console = plain_console();
        let mut client = open_client(&fixture, &mut console);

        assert!(client.is_open());
        client.close().unwrap();
        assert!(!client.is_open());
        client.close().unwrap();

        let err = client.list_all().unwrap_err();
        assert!(matches!(err, StudentDbError::ConnectionClosed));
        assert_eq!(err.kind(), ErrorKind::DataAccess);
        assert!(client.delete(1).is_err());
    }

    #[test]
    fn test_list_all_shows_null_columns() {
        let fixture = StudentFixture::with_sample_data().unwrap();
        let conn = rusqlite::Connection::open(fixture.path().unwrap()).unwrap();
        conn.execute_batch(
            "INSERT INTO students (first_name, last_name, email, enrollment_date) \
             VALUES ('No', NULL, 'no.date@example.com', NULL);",
        )
        .unwrap();
        drop(conn);

        let mut console = plain_console();
        {
            let mut client = open_client(&fixture, &mut console);
            client.list_all().unwrap();
        }
        let output = captured(&console);
        assert!(output.contains(
            "\t4          | No         | null       | no.date@example.com      | null           \n"
        ));
    }

    #[test]
    fn test_csv_listing_format() {
        let fixture = StudentFixture::with_sample_data().unwrap();
        let mut console = plain_console();
        {
            let mut client = open_client(&fixture, &mut console).with_format(OutputFormat::Csv);
            client.list_all().unwrap();
        }
        let output = captured(&console);
        assert!(output.contains("student_id,first_name,last_name,email,enrollment_date\n"));
        assert!(output.contains("1,John,Doe,john.doe@example.com,2023-09-01\n"));
    }

    #[test]
    fn test_missing_table_is_data_access_error() {
        let fixture = StudentFixture::with_sample_data().unwrap();
        let conn = rusqlite::Connection::open(fixture.path().unwrap()).unwrap();
        conn.execute_batch("DROP TABLE students;").unwrap();
        drop(conn);

        let mut console = plain_console();
        let mut client = open_client(&fixture, &mut console);
        let err = client.list_all().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataAccess);
    }
}
