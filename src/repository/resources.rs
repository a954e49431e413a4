//! The three backend collections

use crate::repository::{Resource, Updatable};
use crate::types::{Assignment, AssignmentInput, Doctor, DoctorInput, Patient, PatientInput};

pub struct Patients;
pub struct Doctors;
/// Doctor-patient links, served under `/api/mappings`
pub struct Assignments;

impl Resource for Patients {
    type Record = Patient;
    type Input = PatientInput;

    const PATH: &'static str = "/api/patients";
    const LIST_KEY: &'static str = "patients";
    const LOAD_ERROR: &'static str = "Failed to load patients";

    fn id(record: &Patient) -> &str {
        &record.id
    }
}

impl Updatable for Patients {}

impl Resource for Doctors {
    type Record = Doctor;
    type Input = DoctorInput;

    const PATH: &'static str = "/api/doctors";
    const LIST_KEY: &'static str = "doctors";
    const LOAD_ERROR: &'static str = "Failed to load doctors";

    fn id(record: &Doctor) -> &str {
        &record.id
    }
}

impl Updatable for Doctors {}

impl Resource for Assignments {
    type Record = Assignment;
    type Input = AssignmentInput;

    const PATH: &'static str = "/api/mappings";
    const LIST_KEY: &'static str = "mappings";
    const LOAD_ERROR: &'static str = "Failed to load mappings";

    fn id(record: &Assignment) -> &str {
        &record.id
    }
}
