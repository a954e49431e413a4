//! Doctor-patient assignments
//!
//! The backend calls these "mappings"; each one links a single patient to a single doctor.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A doctor-patient link with the names denormalized by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    #[serde(default = "unknown_name")]
    pub patient_name: String,
    #[serde(default = "unknown_name")]
    pub doctor_name: String,
    #[serde(default)]
    pub assigned_by_user_id: Option<String>,
    pub created_at: String,
}

fn unknown_name() -> String {
    "Unknown".to_string()
}

/// Body of `POST /api/mappings`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentInput {
    pub patient_id: String,
    pub doctor_id: String,
}

impl Assignment {
    /// Creation date as `M/D/YYYY`
    pub fn assigned_on(&self) -> String {
        format_date(&self.created_at)
    }
}

/// Formats a backend timestamp as a short date.
///
/// Accepts RFC 3339, naive ISO timestamps (with or without fractional seconds)
/// and bare dates. Anything else is returned unchanged.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));

    match date {
        Ok(date) => date.format("%-m/%-d/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}
