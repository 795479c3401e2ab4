use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{Result, StaffingError};

const ISO_DATE: &str = "%Y-%m-%d";

#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Project {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
    pub client_id: String,
    /// Cleared when the leading employee is removed
    pub lead_id: Option<String>,
}

impl Project {
    pub fn date_range(&self) -> DateRange {
        // The projects table rejects start_date > end_date
        DateRange {
            start: self.start_date,
            end: self.end_date,
        }
    }

    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            id: self.id,
            title: self.title.clone(),
        }
    }
}

/// A project proposal, validated by `Database::create_project`
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct NewProject {
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
    pub client_id: String,
    pub lead_id: String,
}

impl NewProject {
    pub fn date_range(&self) -> Result<DateRange> {
        DateRange::new(self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub id: i32,
    pub title: String,
}

/// Inclusive date interval with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(StaffingError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse both bounds from `YYYY-MM-DD` strings
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_iso_date(start)?, parse_iso_date(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Boundaries are inclusive: a range ending on the day another begins overlaps it.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE)
        .map_err(|e| StaffingError::invalid_date(value, e))
}
