//! Shared type definitions
//!
//! Records exchanged with the backend and the payloads used to create or update them.

pub mod assignment;
pub mod doctor;
pub mod patient;
pub mod user;

pub use assignment::{Assignment, AssignmentInput};
pub use doctor::{Doctor, DoctorInput};
pub use patient::{Patient, PatientInput};
pub use user::User;
