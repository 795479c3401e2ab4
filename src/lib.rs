//! Seeding and validated inserts for a client / employee / project staffing
//! database on PostgreSQL.
//!
//! Business rules enforced by [`db::Database::create_project`]:
//! a project's lead must be a manager, and a manager cannot lead two projects
//! whose date ranges overlap (boundaries inclusive).

pub mod config;
pub mod db;
pub mod error;
pub mod fixtures;
pub mod models;

pub use config::Config;
pub use db::{Database, SeedOutcome};
pub use error::{ErrorKind, Result, StaffingError};
pub use fixtures::Fixtures;
