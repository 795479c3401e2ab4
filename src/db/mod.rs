mod assignments;
mod projects;
mod schema;
mod seed;

use std::str::FromStr;

use log::LevelFilter;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, Executor, PgPool};
use tracing::{debug, info};

use crate::config::{Config, is_identifier};
use crate::error::{Result, StaffingError};

pub use seed::{SeedOutcome, SeedRow};

/// Handle to the staffing database, passed explicitly to every operation
pub struct Database {
    pool: PgPool,
    schema: Option<String>,
}

impl Database {
    /// Connect using the URL, pool size and optional schema from `config`
    pub async fn new(config: &Config) -> Result<Self> {
        let connect_options = PgConnectOptions::from_str(config.database_url())?
            .log_statements(LevelFilter::Debug);

        let mut pool_options = PgPoolOptions::new().max_connections(config.max_connections);

        let schema = config.database_schema().map(str::to_owned);
        if let Some(name) = schema.as_deref().filter(|name| !is_identifier(name)) {
            return Err(StaffingError::Config(format!(
                "schema '{name}' is not a valid identifier"
            )));
        }
        if let Some(name) = schema.clone() {
            pool_options = pool_options.after_connect(move |conn, _meta| {
                let statement = format!("SET search_path TO \"{name}\"");
                Box::pin(async move {
                    conn.execute(statement.as_str()).await?;
                    Ok(())
                })
            });
        }

        let pool = pool_options.connect_with(connect_options).await?;
        debug!(schema = ?schema, "database pool opened");

        Ok(Self { pool, schema })
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Round-trip a trivial query to prove the server is reachable
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(self.get_pool()).await?;
        Ok(())
    }

    /// Close every connection; later operations on this handle fail
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("database pool closed");
    }
}

/// Open the database and verify the connection
pub async fn init(config: &Config) -> Result<Database> {
    let db = Database::new(config).await?;
    db.ping().await?;
    info!("database connection established");
    Ok(db)
}
