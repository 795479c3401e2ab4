use tracing::{info, warn};

use super::Database;
use crate::error::{Result, StaffingError};
use crate::models::{Client, Employee, NewProject, Project};

const PROJECT_COLUMNS: &str =
    "id, title, description, start_date, end_date, budget, client_id, lead_id";

impl Database {
    /// Validate and insert a project, assigning its lead to it.
    ///
    /// Checks run in order and stop at the first failure: date range, client,
    /// lead, manager flag, overlap with the lead's other projects. All checks
    /// and both inserts share one transaction, and the lead's row is locked
    /// so concurrent creations for the same lead run one after the other.
    pub async fn create_project(&self, new: &NewProject) -> Result<Project> {
        let range = new.date_range()?;

        let mut tx = self.get_pool().begin().await?;

        let client: Option<Client> =
            sqlx::query_as("SELECT id, name, phone, email FROM clients WHERE id = $1")
                .bind(&new.client_id)
                .fetch_optional(&mut *tx)
                .await?;
        if client.is_none() {
            return Err(StaffingError::ClientNotFound(new.client_id.clone()));
        }

        let lead: Employee = sqlx::query_as(
            "SELECT id, name, is_manager, email FROM employees WHERE id = $1 FOR UPDATE",
        )
        .bind(&new.lead_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| StaffingError::EmployeeNotFound(new.lead_id.clone()))?;

        if !lead.is_manager {
            warn!(lead = %lead.id, "lead is not a manager");
            return Err(StaffingError::NotAManager {
                id: lead.id,
                name: lead.name,
            });
        }

        let led: Vec<Project> = sqlx::query_as(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE lead_id = $1 ORDER BY id"
        ))
        .bind(&lead.id)
        .fetch_all(&mut *tx)
        .await?;

        let conflicts: Vec<_> = led
            .iter()
            .filter(|existing| existing.date_range().overlaps(&range))
            .map(Project::summary)
            .collect();
        if !conflicts.is_empty() {
            warn!(lead = %lead.id, conflicts = conflicts.len(), "lead has overlapping projects");
            return Err(StaffingError::DateConflict {
                lead: lead.name,
                conflicts,
            });
        }

        let project: Project = sqlx::query_as(&format!(
            r#"
            INSERT INTO projects (title, description, start_date, end_date, budget, client_id, lead_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(&new.title)
        .bind(&new.description)
        .bind(range.start())
        .bind(range.end())
        .bind(new.budget)
        .bind(&new.client_id)
        .bind(&lead.id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO employee_projects (employee_id, project_id) VALUES ($1, $2)")
            .bind(&lead.id)
            .bind(project.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(
            project_id = project.id,
            title = %project.title,
            lead = %lead.name,
            "project created and lead assigned"
        );
        Ok(project)
    }

    pub async fn get_project(&self, id: i32) -> Result<Option<Project>> {
        let project = sqlx::query_as(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.get_pool())
        .await?;

        Ok(project)
    }

    pub async fn get_projects_by_lead(&self, lead_id: &str) -> Result<Vec<Project>> {
        let projects = sqlx::query_as(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE lead_id = $1 ORDER BY start_date ASC"
        ))
        .bind(lead_id)
        .fetch_all(self.get_pool())
        .await?;

        Ok(projects)
    }
}
