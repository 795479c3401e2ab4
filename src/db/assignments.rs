use tracing::info;

use super::Database;
use crate::error::{Result, StaffingError};
use crate::models::{Assignment, AssignmentOutcome};

impl Database {
    /// Link an existing employee to an existing project.
    ///
    /// Assigning a pair that is already linked succeeds without writing.
    pub async fn assign_employee(
        &self,
        employee_id: &str,
        project_id: i32,
    ) -> Result<AssignmentOutcome> {
        let mut tx = self.get_pool().begin().await?;

        let employee: String = sqlx::query_scalar("SELECT name FROM employees WHERE id = $1")
            .bind(employee_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StaffingError::EmployeeNotFound(employee_id.to_string()))?;

        let project: String = sqlx::query_scalar("SELECT title FROM projects WHERE id = $1")
            .bind(project_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StaffingError::ProjectNotFound(project_id))?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO employee_projects (employee_id, project_id)
            VALUES ($1, $2)
            ON CONFLICT (employee_id, project_id) DO NOTHING
            "#,
        )
        .bind(employee_id)
        .bind(project_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;

        if inserted == 0 {
            info!(%employee, %project, "employee already assigned to project");
            Ok(AssignmentOutcome::AlreadyAssigned)
        } else {
            info!(%employee, %project, "employee assigned to project");
            Ok(AssignmentOutcome::Assigned)
        }
    }

    /// Assignments of a project, ordered by employee id
    pub async fn get_assignments_by_project(&self, project_id: i32) -> Result<Vec<Assignment>> {
        let assignments = sqlx::query_as(
            r#"
            SELECT employee_id, project_id
            FROM employee_projects
            WHERE project_id = $1
            ORDER BY employee_id ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(self.get_pool())
        .await?;

        Ok(assignments)
    }
}
