use serde::Deserialize;

/// Row of the employee/project join table
#[derive(sqlx::FromRow, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub employee_id: String,
    pub project_id: i32,
}

/// Result of an idempotent assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOutcome {
    Assigned,
    AlreadyAssigned,
}
