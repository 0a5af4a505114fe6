//! SQLite backend built on `rusqlite`.
//!
//! The database file must already exist and hold the `students` table; the
//! store never creates files or schema.

use crate::core::db::connection::{Engine, StudentStore};
use crate::core::db::student::{NewStudent, Student};
use crate::core::Result;
use rusqlite::{params, Connection, OpenFlags, Row};
use tracing::debug;

const SELECT_ALL_SQL: &str =
    "SELECT student_id, first_name, last_name, email, enrollment_date FROM students";
const INSERT_SQL: &str = "INSERT INTO students (first_name, last_name, email, enrollment_date) \
     VALUES (?1, ?2, ?3, ?4)";
const UPDATE_EMAIL_SQL: &str = "UPDATE students SET email = ?1 WHERE student_id = ?2";
const DELETE_SQL: &str = "DELETE FROM students WHERE student_id = ?1";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens an existing database file read-write.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(SqliteStore { conn })
    }
}

fn student_from_row(row: &Row) -> rusqlite::Result<Student> {
    Ok(Student {
        student_id: row.get("student_id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        enrollment_date: row.get("enrollment_date")?,
    })
}

impl StudentStore for SqliteStore {
    fn engine(&self) -> Engine {
        Engine::Sqlite
    }

    fn fetch_all(&mut self) -> Result<Vec<Student>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_SQL)?;
        let student_iter = stmt.query_map([], student_from_row)?;

        let mut students = Vec::new();
        for student in student_iter {
            students.push(student?);
        }
        Ok(students)
    }

    fn insert(&mut self, student: &NewStudent) -> Result<i32> {
        self.conn.execute(
            INSERT_SQL,
            params![
                student.first_name,
                student.last_name,
                student.email,
                student.enrollment_date
            ],
        )?;
        let rowid = self.conn.last_insert_rowid();
        let student_id = i32::try_from(rowid)
            .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(0, rowid))?;
        debug!(student_id, "inserted student");
        Ok(student_id)
    }

    fn update_email(&mut self, student_id: i32, new_email: &str) -> Result<u64> {
        let affected = self
            .conn
            .execute(UPDATE_EMAIL_SQL, params![new_email, student_id])?;
        Ok(affected as u64)
    }

    fn delete(&mut self, student_id: i32) -> Result<u64> {
        let affected = self.conn.execute(DELETE_SQL, params![student_id])?;
        Ok(affected as u64)
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e)?;
        Ok(())
    }
}
