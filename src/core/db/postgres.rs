//! PostgreSQL backend built on the blocking `postgres` client.

use crate::core::db::connection::{ConnectOptions, ConnectionTarget, Engine, StudentStore};
use crate::core::db::student::{NewStudent, Student};
use crate::core::Result;
use postgres::{Client, Config, NoTls, Row};
use tracing::debug;

const SELECT_ALL_SQL: &str =
    "SELECT student_id, first_name, last_name, email, enrollment_date FROM students";
const INSERT_SQL: &str = "INSERT INTO students (first_name, last_name, email, enrollment_date) \
     VALUES ($1, $2, $3, $4) RETURNING student_id";
const UPDATE_EMAIL_SQL: &str = "UPDATE students SET email = $1 WHERE student_id = $2";
const DELETE_SQL: &str = "DELETE FROM students WHERE student_id = $1";

pub struct PostgresStore {
    client: Client,
}

impl PostgresStore {
    /// Connects without TLS using the target's host, port, database and credentials.
    pub fn connect(target: &ConnectionTarget, options: &ConnectOptions) -> Result<Self> {
        let mut config = Config::new();
        config
            .host(&target.host)
            .port(target.port_number()?)
            .dbname(&target.database)
            .user(&target.username)
            .password(&target.password);
        if let Some(timeout) = options.connect_timeout {
            config.connect_timeout(timeout);
        }

        let client = config.connect(NoTls)?;
        Ok(PostgresStore { client })
    }
}

fn student_from_row(row: &Row) -> Result<Student> {
    Ok(Student {
        student_id: row.try_get("student_id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        enrollment_date: row.try_get("enrollment_date")?,
    })
}

impl StudentStore for PostgresStore {
    fn engine(&self) -> Engine {
        Engine::Postgres
    }

    fn fetch_all(&mut self) -> Result<Vec<Student>> {
        let rows = self.client.query(SELECT_ALL_SQL, &[])?;
        rows.iter().map(student_from_row).collect()
    }

    fn insert(&mut self, student: &NewStudent) -> Result<i32> {
        let row = self.client.query_one(
            INSERT_SQL,
            &[
                &student.first_name,
                &student.last_name,
                &student.email,
                &student.enrollment_date,
            ],
        )?;
        let student_id: i32 = row.try_get(0)?;
        debug!(student_id, "inserted student");
        Ok(student_id)
    }

    fn update_email(&mut self, student_id: i32, new_email: &str) -> Result<u64> {
        let affected = self
            .client
            .execute(UPDATE_EMAIL_SQL, &[&new_email, &student_id])?;
        Ok(affected)
    }

    fn delete(&mut self, student_id: i32) -> Result<u64> {
        let affected = self.client.execute(DELETE_SQL, &[&student_id])?;
        Ok(affected)
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.client.close()?;
        Ok(())
    }
}
