use tracing::{debug, info};

use super::Database;
use crate::error::Result;

// Dependency order: referenced tables come first.
const TABLES: &[(&str, &str)] = &[
    (
        "clients",
        r#"
        CREATE TABLE IF NOT EXISTS clients (
            id VARCHAR(9) PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            phone VARCHAR(15),
            email VARCHAR(100)
        )
        "#,
    ),
    (
        "employees",
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id VARCHAR(9) PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            is_manager BOOLEAN NOT NULL DEFAULT FALSE,
            email VARCHAR(100)
        )
        "#,
    ),
    (
        "projects",
        r#"
        CREATE TABLE IF NOT EXISTS projects (
            id SERIAL PRIMARY KEY,
            title VARCHAR(150) NOT NULL,
            description TEXT,
            start_date DATE NOT NULL,
            end_date DATE NOT NULL,
            budget DOUBLE PRECISION NOT NULL,
            client_id VARCHAR(9) NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
            lead_id VARCHAR(9) REFERENCES employees(id) ON DELETE SET NULL,
            CONSTRAINT projects_dates_ordered CHECK (start_date <= end_date)
        )
        "#,
    ),
    (
        "employee_projects",
        r#"
        CREATE TABLE IF NOT EXISTS employee_projects (
            employee_id VARCHAR(9) NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
            project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
            PRIMARY KEY (employee_id, project_id)
        )
        "#,
    ),
];

const LEAD_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS projects_lead_id_idx ON projects (lead_id, start_date)";

impl Database {
    /// Create the configured schema (if any) and all four tables
    pub async fn create_schema(&self) -> Result<()> {
        let mut tx = self.get_pool().begin().await?;

        if let Some(schema) = self.schema() {
            // Name was validated as a plain identifier when the config was loaded
            sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS \"{schema}\""))
                .execute(&mut *tx)
                .await?;
        }

        for (table, ddl) in TABLES {
            sqlx::query(ddl).execute(&mut *tx).await?;
            debug!(table, "table ready");
        }
        sqlx::query(LEAD_INDEX).execute(&mut *tx).await?;

        tx.commit().await?;
        info!("tables created");
        Ok(())
    }
}
