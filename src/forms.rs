//! Entry forms
//!
//! Form state is kept as the raw text the user typed. Conversion to request
//! payloads happens on submit, where numeric fields are parsed; value ranges are
//! left to the backend.

use thiserror::Error;

use crate::types::{AssignmentInput, Doctor, DoctorInput, Patient, PatientInput};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{field} must be a whole number")]
    InvalidNumber { field: &'static str, value: String },
    #[error("Please select a {0}")]
    MissingSelection(&'static str),
}

fn parse_whole(field: &'static str, value: &str) -> Result<i64, FormError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| FormError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

/// Which modal dialog is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Patient,
    Doctor,
    Assignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn set(&mut self, field: LoginField, value: String) {
        match field {
            LoginField::Email => self.email = value,
            LoginField::Password => self.password = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Name,
    Email,
    Password,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn set(&mut self, field: RegisterField, value: String) {
        match field {
            RegisterField::Name => self.name = value,
            RegisterField::Email => self.email = value,
            RegisterField::Password => self.password = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientField {
    Name,
    Age,
    Gender,
    MedicalHistory,
}

/// Patient modal. A blank `id` means create mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientForm {
    pub id: String,
    pub name: String,
    pub age: String,
    pub gender: String,
    pub medical_history: String,
    /// Names of the doctors assigned to the patient being edited; read-only
    pub assigned_doctors: Vec<String>,
}

impl PatientForm {
    pub fn for_create() -> Self {
        Self::default()
    }

    pub fn for_edit(patient: &Patient) -> Self {
        Self {
            id: patient.id.clone(),
            name: patient.name.clone(),
            age: patient.age.to_string(),
            gender: patient.gender.clone(),
            medical_history: patient.medical_history.clone().unwrap_or_default(),
            assigned_doctors: Vec::new(),
        }
    }

    pub fn is_edit(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit Patient"
        } else {
            "Add Patient"
        }
    }

    pub fn set(&mut self, field: PatientField, value: String) {
        match field {
            PatientField::Name => self.name = value,
            PatientField::Age => self.age = value,
            PatientField::Gender => self.gender = value,
            PatientField::MedicalHistory => self.medical_history = value,
        }
    }

    pub fn to_input(&self) -> Result<PatientInput, FormError> {
        Ok(PatientInput {
            name: self.name.clone(),
            age: parse_whole("Age", &self.age)?,
            gender: self.gender.clone(),
            medical_history: self.medical_history.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoctorField {
    Name,
    Specialization,
    ExperienceYears,
    ContactInfo,
}

/// Doctor modal. A blank `id` means create mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorForm {
    pub id: String,
    pub name: String,
    pub specialization: String,
    pub experience_years: String,
    pub contact_info: String,
}

impl DoctorForm {
    pub fn for_create() -> Self {
        Self::default()
    }

    pub fn for_edit(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id.clone(),
            name: doctor.name.clone(),
            specialization: doctor.specialization.clone(),
            experience_years: doctor.experience_years.to_string(),
            contact_info: doctor.contact_info.clone().unwrap_or_default(),
        }
    }

    pub fn is_edit(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit Doctor"
        } else {
            "Add Doctor"
        }
    }

    pub fn set(&mut self, field: DoctorField, value: String) {
        match field {
            DoctorField::Name => self.name = value,
            DoctorField::Specialization => self.specialization = value,
            DoctorField::ExperienceYears => self.experience_years = value,
            DoctorField::ContactInfo => self.contact_info = value,
        }
    }

    pub fn to_input(&self) -> Result<DoctorInput, FormError> {
        Ok(DoctorInput {
            name: self.name.clone(),
            specialization: self.specialization.clone(),
            experience_years: parse_whole("Experience years", &self.experience_years)?,
            contact_info: self.contact_info.clone(),
        })
    }
}

/// `<option>` of a selection dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentField {
    Patient,
    Doctor,
}

/// Assignment modal with freshly fetched dropdown options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentForm {
    pub patient_id: String,
    pub doctor_id: String,
    pub patient_options: Vec<SelectOption>,
    pub doctor_options: Vec<SelectOption>,
}

impl AssignmentForm {
    pub fn with_options(patients: &[Patient], doctors: &[Doctor]) -> Self {
        Self {
            patient_options: patients
                .iter()
                .map(|p| SelectOption {
                    value: p.id.clone(),
                    label: p.name.clone(),
                })
                .collect(),
            doctor_options: doctors
                .iter()
                .map(|d| SelectOption {
                    value: d.id.clone(),
                    label: d.option_label(),
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn set(&mut self, field: AssignmentField, value: String) {
        match field {
            AssignmentField::Patient => self.patient_id = value,
            AssignmentField::Doctor => self.doctor_id = value,
        }
    }

    pub fn to_input(&self) -> Result<AssignmentInput, FormError> {
        if self.patient_id.trim().is_empty() {
            return Err(FormError::MissingSelection("patient"));
        }
        if self.doctor_id.trim().is_empty() {
            return Err(FormError::MissingSelection("doctor"));
        }
        Ok(AssignmentInput {
            patient_id: self.patient_id.clone(),
            doctor_id: self.doctor_id.clone(),
        })
    }
}

/// All entry forms; reset together at logout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forms {
    pub login: LoginForm,
    pub register: RegisterForm,
    pub patient: PatientForm,
    pub doctor: DoctorForm,
    pub assignment: AssignmentForm,
}

impl Forms {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
