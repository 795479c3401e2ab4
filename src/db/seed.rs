use sqlx::query_builder::Separated;
use sqlx::{Postgres, QueryBuilder};
use tracing::info;

use super::Database;
use crate::error::Result;
use crate::models::{Client, Employee};

/// PostgreSQL caps a single statement at this many bind parameters
const MAX_BINDS: usize = u16::MAX as usize;

/// A fixture row that can be bulk inserted into its table
pub trait SeedRow {
    const TABLE: &'static str;
    /// Column list matching the binds pushed by `push_row`
    const COLUMNS: &'static str;

    fn push_row(&self, row: Separated<'_, '_, Postgres, &'static str>);
}

impl SeedRow for Client {
    const TABLE: &'static str = "clients";
    const COLUMNS: &'static str = "id, name, phone, email";

    fn push_row(&self, mut row: Separated<'_, '_, Postgres, &'static str>) {
        row.push_bind(self.id.clone())
            .push_bind(self.name.clone())
            .push_bind(self.phone.clone())
            .push_bind(self.email.clone());
    }
}

impl SeedRow for Employee {
    const TABLE: &'static str = "employees";
    const COLUMNS: &'static str = "id, name, is_manager, email";

    fn push_row(&self, mut row: Separated<'_, '_, Postgres, &'static str>) {
        row.push_bind(self.id.clone())
            .push_bind(self.name.clone())
            .push_bind(self.is_manager)
            .push_bind(self.email.clone());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The table was empty and this many rows were inserted
    Inserted(u64),
    /// The table already held rows; nothing was written
    Skipped { existing: i64 },
}

impl Database {
    pub async fn seed_clients(&self, clients: &[Client]) -> Result<SeedOutcome> {
        self.seed_table(clients).await
    }

    pub async fn seed_employees(&self, employees: &[Employee]) -> Result<SeedOutcome> {
        self.seed_table(employees).await
    }

    /// Insert `rows`, but only if the table is empty.
    ///
    /// The table is locked for the duration of the transaction so two seeders
    /// cannot both observe an empty table. Rows go out in as few multi-row
    /// inserts as the bind limit allows, all inside that one transaction.
    pub async fn seed_table<R: SeedRow>(&self, rows: &[R]) -> Result<SeedOutcome> {
        let mut tx = self.get_pool().begin().await?;

        sqlx::query(&format!(
            "LOCK TABLE {} IN SHARE ROW EXCLUSIVE MODE",
            R::TABLE
        ))
        .execute(&mut *tx)
        .await?;

        let existing: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", R::TABLE))
            .fetch_one(&mut *tx)
            .await?;

        if existing > 0 {
            info!(table = R::TABLE, existing, "rows already present, not seeding again");
            return Ok(SeedOutcome::Skipped { existing });
        }

        if rows.is_empty() {
            info!(table = R::TABLE, "no fixture rows to insert");
            return Ok(SeedOutcome::Inserted(0));
        }

        let mut inserted = 0;
        for chunk in rows.chunks(rows_per_insert::<R>()) {
            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new(format!("INSERT INTO {} ({}) ", R::TABLE, R::COLUMNS));
            builder.push_values(chunk, |row, item| item.push_row(row));
            inserted += builder.build().execute(&mut *tx).await?.rows_affected();
        }
        tx.commit().await?;

        info!(table = R::TABLE, inserted, "seeded");
        Ok(SeedOutcome::Inserted(inserted))
    }

    pub async fn client_count(&self) -> Result<i64> {
        self.count_rows(Client::TABLE).await
    }

    pub async fn employee_count(&self) -> Result<i64> {
        self.count_rows(Employee::TABLE).await
    }

    async fn count_rows(&self, table: &str) -> Result<i64> {
        let count = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(self.get_pool())
            .await?;
        Ok(count)
    }
}

fn rows_per_insert<R: SeedRow>() -> usize {
    MAX_BINDS / R::COLUMNS.split(',').count()
}
