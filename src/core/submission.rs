//! Submission assembly: flattening a valid selection into sink rows

use crate::core::models::{CatalogIndex, SelectionState};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::error::Error;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use thiserror::Error as ThisError;

/// Timestamp format stamped onto submission rows
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of the submission timestamp
///
/// Injected so assembly stays deterministic under test; the core never
/// reads the system clock directly.
pub trait Clock {
    /// Current local date and time
    fn now(&self) -> NaiveDateTime;
}

/// Clock backed by the local system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Clock pinned to a fixed instant (test helper)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Error raised when a submission is attempted on incomplete input
///
/// Recoverable: blocks only the submit action, never the session.
#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum IncompleteSelectionError {
    /// The student name is blank
    #[error("Student name is required for submission")]
    MissingStudentName,

    /// The student id is blank
    #[error("Student id is required for submission")]
    MissingStudentId,

    /// Nothing is selected
    #[error("Cannot submit an empty course selection")]
    EmptySelection,
}

/// One flattened submission row, one per selected course
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRow {
    /// Submission time, formatted "%Y-%m-%d %H:%M:%S"
    pub timestamp: String,
    /// Student display name
    pub student_name: String,
    /// Student id number
    pub student_id: String,
    /// Selected course id
    pub course_id: String,
    /// Selected course name
    pub course_name: String,
    /// Grade level of the course
    pub year: u8,
    /// Semester of the course
    pub semester: u8,
    /// Credit hours of the course
    pub hours: u32,
}

/// Flatten a selection into submission rows
///
/// Rows are ordered by slot ascending, then by catalog order within the
/// slot, and all carry one timestamp taken from the injected clock.
///
/// # Arguments
/// * `student_name` - Student display name (must be non-blank)
/// * `student_id` - Student id number (must be non-blank)
/// * `catalog` - Course catalog to resolve ids through
/// * `state` - The (validated) selection to flatten
/// * `clock` - Timestamp source
///
/// # Errors
/// Returns `IncompleteSelectionError` if either identity field is blank or
/// nothing is selected.
pub fn assemble(
    student_name: &str,
    student_id: &str,
    catalog: &CatalogIndex,
    state: &SelectionState,
    clock: &dyn Clock,
) -> Result<Vec<SubmissionRow>, IncompleteSelectionError> {
    let student_name = student_name.trim();
    let student_id = student_id.trim();

    if student_name.is_empty() {
        return Err(IncompleteSelectionError::MissingStudentName);
    }
    if student_id.is_empty() {
        return Err(IncompleteSelectionError::MissingStudentId);
    }
    if state.is_empty() {
        return Err(IncompleteSelectionError::EmptySelection);
    }

    let timestamp = clock.now().format(TIMESTAMP_FORMAT).to_string();
    let mut rows = Vec::with_capacity(state.len());

    for slot in state.slots() {
        let selected = state.selected_in(slot);
        for course in catalog.courses_of(slot) {
            if selected.contains(&course.id) {
                rows.push(SubmissionRow {
                    timestamp: timestamp.clone(),
                    student_name: student_name.to_string(),
                    student_id: student_id.to_string(),
                    course_id: course.id.clone(),
                    course_name: course.name.clone(),
                    year: course.year,
                    semester: course.semester,
                    hours: course.hours,
                });
            }
        }
    }

    crate::debug!(
        "Assembled {} submission row(s) for student '{student_name}'",
        rows.len()
    );
    Ok(rows)
}

/// Destination for assembled submission rows
///
/// The engine only guarantees the row shape; what the sink does with the
/// rows (file, spreadsheet, network) is the collaborator's concern.
pub trait SubmissionSink {
    /// Append rows to the sink
    ///
    /// # Errors
    /// Returns an error if the rows cannot be written
    fn append(&mut self, rows: &[SubmissionRow]) -> Result<(), Box<dyn Error>>;
}

/// Sink appending rows to a CSV file
///
/// Writes the header row when creating the file, then appends; repeated
/// submissions accumulate, mirroring the original worksheet behavior.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Create a sink targeting the given CSV file
    #[must_use]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path the sink writes to
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SubmissionSink for CsvSink {
    fn append(&mut self, rows: &[SubmissionRow]) -> Result<(), Box<dyn Error>> {
        let needs_header = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer.write_record([
                "Timestamp",
                "Student Name",
                "Student ID",
                "Course ID",
                "Course Name",
                "Year",
                "Semester",
                "Hours",
            ])?;
        }

        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        crate::info!(
            "Appended {} submission row(s) to {}",
            rows.len(),
            self.path.display()
        );
        Ok(())
    }
}
