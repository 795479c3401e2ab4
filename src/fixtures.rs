//! Demo data loaded from TOML.
//!
//! A fixture file holds `[[clients]]`, `[[employees]]`, `[[projects]]` and
//! `[[assignments]]` tables. Project dates are quoted `YYYY-MM-DD` strings.
//! The built-in demo fixture is compiled into the binary.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, StaffingError};
use crate::models::{Assignment, Client, Employee, NewProject};

const DEMO_FIXTURE: &str = include_str!("../fixtures/demo.toml");

#[derive(Deserialize, Debug, Default, Clone)]
pub struct Fixtures {
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Projects the demo run tries to create, in order
    #[serde(default)]
    pub projects: Vec<NewProject>,
    /// Assignments the demo run performs after creating projects
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl Fixtures {
    /// The fixture shipped with the crate
    pub fn demo() -> Result<Self> {
        Self::parse(DEMO_FIXTURE, "<built-in demo>")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| StaffingError::fixture(path, e.to_string()))?;
        Self::parse(&text, path)
    }

    /// Parse fixture text; `origin` only labels errors
    pub fn parse(text: &str, origin: impl Into<PathBuf>) -> Result<Self> {
        let origin = origin.into();
        let fixtures: Fixtures =
            toml::from_str(text).map_err(|e| StaffingError::fixture(&origin, e.to_string()))?;
        fixtures.check_unique_ids(&origin)?;
        Ok(fixtures)
    }

    fn check_unique_ids(&self, origin: &Path) -> Result<()> {
        if let Some(id) = first_duplicate(self.clients.iter().map(|c| c.id.as_str())) {
            return Err(StaffingError::fixture(origin, format!("duplicate client id {id}")));
        }
        if let Some(id) = first_duplicate(self.employees.iter().map(|e| e.id.as_str())) {
            return Err(StaffingError::fixture(origin, format!("duplicate employee id {id}")));
        }
        Ok(())
    }
}

fn first_duplicate<'a>(mut ids: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    ids.find(|id| !seen.insert(*id))
}
