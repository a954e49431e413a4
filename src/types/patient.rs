//! Patient records

use serde::{Deserialize, Serialize};

/// A patient as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: i64,
    pub gender: String,
    #[serde(default)]
    pub medical_history: Option<String>,
    #[serde(default)]
    pub created_by_user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Fields submitted on create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientInput {
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub medical_history: String,
}

impl Patient {
    /// Medical history, or `None` when absent or blank
    pub fn history(&self) -> Option<&str> {
        self.medical_history
            .as_deref()
            .filter(|history| !history.trim().is_empty())
    }
}
