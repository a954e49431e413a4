//! Doctor records

use serde::{Deserialize, Serialize};

/// A doctor as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialization: String,
    pub experience_years: i64,
    #[serde(default)]
    pub contact_info: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Fields submitted on create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorInput {
    pub name: String,
    pub specialization: String,
    pub experience_years: i64,
    pub contact_info: String,
}

impl Doctor {
    pub fn contact(&self) -> Option<&str> {
        self.contact_info
            .as_deref()
            .filter(|contact| !contact.trim().is_empty())
    }

    /// Label used in the assignment dropdown
    pub fn option_label(&self) -> String {
        format!("{} ({})", self.name, self.specialization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_label() {
        let doctor = Doctor {
            id: "d1".into(),
            name: "Dr. House".into(),
            specialization: "Diagnostics".into(),
            experience_years: 20,
            contact_info: None,
            created_at: None,
            updated_at: None,
        };
        assert_eq!(doctor.option_label(), "Dr. House (Diagnostics)");
        assert_eq!(doctor.contact(), None);
    }
}
