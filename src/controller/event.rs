//! UI events
//!
//! Everything the interface can ask of the application, routed through
//! [`crate::controller::AppState::dispatch`].

use uuid::Uuid;

use crate::forms::{AssignmentField, DoctorField, LoginField, PatientField, RegisterField};

/// Main-view tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Dashboard,
    Patients,
    Doctors,
    Assignments,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Dashboard, Tab::Patients, Tab::Doctors, Tab::Assignments];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Patients => "Patients",
            Tab::Doctors => "Doctors",
            Tab::Assignments => "Assignments",
        }
    }
}

/// Record targeted by a delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Patient(String),
    Doctor(String),
    Assignment(String),
}

impl DeleteTarget {
    pub fn prompt(&self) -> &'static str {
        match self {
            DeleteTarget::Patient(_) => "Are you sure you want to delete this patient?",
            DeleteTarget::Doctor(_) => "Are you sure you want to delete this doctor?",
            DeleteTarget::Assignment(_) => "Are you sure you want to remove this assignment?",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    ResumeSession,
    LoginFieldChanged(LoginField, String),
    SubmitLogin,
    RegisterFieldChanged(RegisterField, String),
    SubmitRegister,
    Logout,

    SwitchTab(Tab),

    OpenCreatePatient,
    EditPatient(String),
    PatientFieldChanged(PatientField, String),
    SubmitPatient,

    OpenCreateDoctor,
    EditDoctor(String),
    DoctorFieldChanged(DoctorField, String),
    SubmitDoctor,

    OpenAssignmentModal,
    AssignmentFieldChanged(AssignmentField, String),
    SubmitAssignment,

    CloseModal,
    RequestDelete(DeleteTarget),
    Confirm,
    Cancel,
    DismissAlert(Uuid),
}

impl UiEvent {
    /// Event name for logs. Field values are left out since they may hold credentials.
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::ResumeSession => "resume_session",
            UiEvent::LoginFieldChanged(..) => "login_field_changed",
            UiEvent::SubmitLogin => "submit_login",
            UiEvent::RegisterFieldChanged(..) => "register_field_changed",
            UiEvent::SubmitRegister => "submit_register",
            UiEvent::Logout => "logout",
            UiEvent::SwitchTab(_) => "switch_tab",
            UiEvent::OpenCreatePatient => "open_create_patient",
            UiEvent::EditPatient(_) => "edit_patient",
            UiEvent::PatientFieldChanged(..) => "patient_field_changed",
            UiEvent::SubmitPatient => "submit_patient",
            UiEvent::OpenCreateDoctor => "open_create_doctor",
            UiEvent::EditDoctor(_) => "edit_doctor",
            UiEvent::DoctorFieldChanged(..) => "doctor_field_changed",
            UiEvent::SubmitDoctor => "submit_doctor",
            UiEvent::OpenAssignmentModal => "open_assignment_modal",
            UiEvent::AssignmentFieldChanged(..) => "assignment_field_changed",
            UiEvent::SubmitAssignment => "submit_assignment",
            UiEvent::CloseModal => "close_modal",
            UiEvent::RequestDelete(_) => "request_delete",
            UiEvent::Confirm => "confirm",
            UiEvent::Cancel => "cancel",
            UiEvent::DismissAlert(_) => "dismiss_alert",
        }
    }
}
