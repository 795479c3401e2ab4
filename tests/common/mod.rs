//! Shared setup for tests that need PostgreSQL.
//!
//! Each test gets its own schema, created on connect and dropped by
//! `TestDb::finish`. Without `DATABASE_URL` the database tests are skipped.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};

use project_staffing::models::{NewProject, parse_iso_date};
use project_staffing::{Config, Database, Fixtures};

static NEXT_SCHEMA: AtomicU32 = AtomicU32::new(0);

pub const LAURA: &str = "17520760G";
pub const CARLOS: &str = "87744401E";
pub const MARTA: &str = "60657870Q";
pub const LUCIA: &str = "13769630J";

pub const TECHNOVA: &str = "E19329838";
pub const INNOVASOFT: &str = "H65740417";

pub struct TestDb {
    pub db: Database,
    schema: String,
}

impl TestDb {
    pub async fn connect() -> Option<Self> {
        dotenvy::dotenv().ok();
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL is not set, skipping database test");
            return None;
        };

        let schema = format!(
            "staffing_test_{}_{}_{}",
            std::process::id(),
            chrono::Utc::now().timestamp_micros(),
            NEXT_SCHEMA.fetch_add(1, Ordering::SeqCst)
        );

        let mut config = Config::with_url(url);
        config.max_connections = 4;
        config.database_schema = Some(schema.clone());

        let db = Database::new(&config).await.expect("connect to test database");
        db.create_schema().await.expect("create tables");
        Some(Self { db, schema })
    }

    /// Connect and seed the demo clients and employees
    pub async fn seeded() -> Option<Self> {
        let test_db = Self::connect().await?;
        let fixtures = Fixtures::demo().expect("demo fixture");
        test_db.db.seed_clients(&fixtures.clients).await.expect("seed clients");
        test_db
            .db
            .seed_employees(&fixtures.employees)
            .await
            .expect("seed employees");
        Some(test_db)
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub async fn finish(self) {
        sqlx::query(&format!("DROP SCHEMA \"{}\" CASCADE", self.schema))
            .execute(self.db.get_pool())
            .await
            .expect("drop test schema");
        self.db.close().await;
    }
}

/// Skip the calling test when no database is configured
macro_rules! require_db {
    ($setup:expr) => {
        match $setup.await {
            Some(test_db) => test_db,
            None => return,
        }
    };
}

pub fn project(title: &str, start: &str, end: &str, client: &str, lead: &str) -> NewProject {
    NewProject {
        title: title.to_string(),
        description: None,
        start_date: parse_iso_date(start).unwrap(),
        end_date: parse_iso_date(end).unwrap(),
        budget: 10_000.0,
        client_id: client.to_string(),
        lead_id: lead.to_string(),
    }
}
