mod client;
mod employee;
mod project;
mod assignment;

pub use client::Client;
pub use employee::Employee;
pub use project::{DateRange, NewProject, Project, ProjectSummary, parse_iso_date};
pub use assignment::{Assignment, AssignmentOutcome};
