//! Student Record Module
//!
//! Row types for the `students` relation. These are plain values: nothing
//! here holds on to a row between calls, every listing is fetched fresh.
use chrono::NaiveDate;

/// Name of the relation every operation targets.
pub const STUDENTS_TABLE: &str = "students";

/// Display text for a NULL cell.
pub const NULL_CELL: &str = "null";

/// Column names in the order they are selected and displayed.
pub const STUDENT_COLUMNS: [&str; 5] = [
    "student_id",
    "first_name",
    "last_name",
    "email",
    "enrollment_date",
];

/// One row of the `students` relation.
///
/// Only the key is guaranteed; every other column may hold NULL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Student {
    /// Primary key, assigned by the database
    pub student_id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
}

fn cell<T: ToString>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map_or_else(|| NULL_CELL.to_string(), ToString::to_string)
}

impl Student {
    /// Renders the row as display cells, in `STUDENT_COLUMNS` order.
    /// NULL columns show as `null`.
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.student_id.to_string(),
            cell(&self.first_name),
            cell(&self.last_name),
            cell(&self.email),
            cell(&self.enrollment_date),
        ]
    }
}

/// The client-supplied fields of an insert. The primary key is left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub enrollment_date: NaiveDate,
}

impl NewStudent {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        enrollment_date: NaiveDate,
    ) -> Self {
        NewStudent {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            enrollment_date,
        }
    }

    /// True when `student` carries exactly these field values.
    pub fn matches(&self, student: &Student) -> bool {
        student.first_name.as_deref() == Some(self.first_name.as_str())
            && student.last_name.as_deref() == Some(self.last_name.as_str())
            && student.email.as_deref() == Some(self.email.as_str())
            && student.enrollment_date == Some(self.enrollment_date)
    }
}
