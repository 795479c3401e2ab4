//! Error types for staffing operations.
//!
//! Every database operation returns [`Result`]; the binary decides how to
//! report a failure. Database errors that correspond to a violated constraint
//! are classified as [`StaffingError::Constraint`] on conversion.

use std::path::PathBuf;

use sqlx::error::ErrorKind as DbErrorKind;
use thiserror::Error;

use crate::models::ProjectSummary;

#[derive(Error, Debug)]
pub enum StaffingError {
    #[error("client with id {0} does not exist")]
    ClientNotFound(String),

    #[error("employee with id {0} does not exist")]
    EmployeeNotFound(String),

    #[error("project with id {0} does not exist")]
    ProjectNotFound(i32),

    /// The proposed lead exists but is not flagged as a manager
    #[error("employee {name} ({id}) is not a manager and cannot lead a project")]
    NotAManager { id: String, name: String },

    /// The proposed lead already leads projects in the requested period
    #[error(
        "{lead} already leads a project in that period: {}",
        list_conflicts(.conflicts)
    )]
    DateConflict {
        lead: String,
        conflicts: Vec<ProjectSummary>,
    },

    #[error("start date {start} is after end date {end}")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid fixture file {path:?}: {reason}")]
    Fixture { path: PathBuf, reason: String },

    /// Unique, foreign-key, not-null or check violation reported by the database
    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

/// Coarse classification of [`StaffingError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Constraint,
    BusinessRule,
    InvalidInput,
    Unexpected,
}

pub type Result<T> = std::result::Result<T, StaffingError>;

impl StaffingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ClientNotFound(_) | Self::EmployeeNotFound(_) | Self::ProjectNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::Constraint(_) => ErrorKind::Constraint,
            Self::NotAManager { .. } | Self::DateConflict { .. } | Self::InvalidDateRange { .. } => {
                ErrorKind::BusinessRule
            }
            Self::InvalidDate { .. } | Self::Config(_) | Self::Fixture { .. } => {
                ErrorKind::InvalidInput
            }
            Self::Database(_) => ErrorKind::Unexpected,
        }
    }

    pub fn invalid_date(value: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidDate {
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    pub fn fixture(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Fixture {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<sqlx::Error> for StaffingError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                DbErrorKind::UniqueViolation
                | DbErrorKind::ForeignKeyViolation
                | DbErrorKind::NotNullViolation
                | DbErrorKind::CheckViolation => {
                    return Self::Constraint(db_err.message().to_string());
                }
                _ => {}
            }
        }
        Self::Database(err)
    }
}

fn list_conflicts(conflicts: &[ProjectSummary]) -> String {
    conflicts
        .iter()
        .map(|p| format!("{} (ID: {})", p.title, p.id))
        .collect::<Vec<_>>()
        .join(", ")
}
