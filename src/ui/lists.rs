//! Record lists for the patients, doctors and assignments tabs
//!
//! Each list renders exactly one of: the inline load error, the empty state, or
//! one card per record.

use dioxus::prelude::*;

use crate::analytics::capitalize_first;
use crate::controller::{DeleteTarget, UiEvent};
use crate::repository::LoadState;
use crate::types::{Assignment, Doctor, Patient};
use crate::ui::Dispatcher;

#[component]
fn SectionHeader(title: String, action: String, onclick: EventHandler<MouseEvent>) -> Element {
    rsx! {
        div {
            class: "section-header",
            h2 { "{title}" }
            button {
                class: "btn btn-primary",
                onclick: move |evt| onclick.call(evt),
                "{action}"
            }
        }
    }
}

#[component]
fn EmptyState(title: String, hint: String) -> Element {
    rsx! {
        div {
            class: "empty-state",
            h3 { "{title}" }
            p { "{hint}" }
        }
    }
}

#[component]
fn LoadError(message: String) -> Element {
    rsx! {
        div { class: "error-notice", "{message}" }
    }
}

#[component]
pub fn PatientList(patients: Vec<Patient>, state: LoadState, dispatcher: Dispatcher) -> Element {
    let d_add = dispatcher.clone();

    rsx! {
        section {
            id: "patients",
            SectionHeader {
                title: "Patients",
                action: "Add Patient",
                onclick: move |_| d_add.send(UiEvent::OpenCreatePatient),
            }

            if let LoadState::Failed(message) = &state {
                LoadError { message: message.clone() }
            } else if patients.is_empty() {
                EmptyState {
                    title: "No Patients Found",
                    hint: "Click \"Add Patient\" to create your first patient record.",
                }
            } else {
                div {
                    class: "grid",
                    for patient in patients {
                        PatientCard { key: "{patient.id}", patient: patient.clone(), dispatcher: dispatcher.clone() }
                    }
                }
            }
        }
    }
}

#[component]
fn PatientCard(patient: Patient, dispatcher: Dispatcher) -> Element {
    let d_edit = dispatcher.clone();
    let d_delete = dispatcher;
    let edit_id = patient.id.clone();
    let delete_id = patient.id.clone();
    let gender = capitalize_first(&patient.gender);

    rsx! {
        div {
            class: "card record-card",
            h3 { "{patient.name}" }
            p { class: "muted", "{patient.age} years old · {gender}" }
            if let Some(history) = patient.history() {
                p { class: "history", "{history}" }
            }
            div {
                class: "actions",
                button {
                    class: "btn",
                    onclick: move |_| d_edit.send(UiEvent::EditPatient(edit_id.clone())),
                    "Edit"
                }
                button {
                    class: "btn btn-danger",
                    onclick: move |_| d_delete.send(UiEvent::RequestDelete(DeleteTarget::Patient(delete_id.clone()))),
                    "Delete"
                }
            }
        }
    }
}

#[component]
pub fn DoctorList(doctors: Vec<Doctor>, state: LoadState, dispatcher: Dispatcher) -> Element {
    let d_add = dispatcher.clone();

    rsx! {
        section {
            id: "doctors",
            SectionHeader {
                title: "Doctors",
                action: "Add Doctor",
                onclick: move |_| d_add.send(UiEvent::OpenCreateDoctor),
            }

            if let LoadState::Failed(message) = &state {
                LoadError { message: message.clone() }
            } else if doctors.is_empty() {
                EmptyState {
                    title: "No Doctors Found",
                    hint: "Click \"Add Doctor\" to create your first doctor record.",
                }
            } else {
                div {
                    class: "grid",
                    for doctor in doctors {
                        DoctorCard { key: "{doctor.id}", doctor: doctor.clone(), dispatcher: dispatcher.clone() }
                    }
                }
            }
        }
    }
}

#[component]
fn DoctorCard(doctor: Doctor, dispatcher: Dispatcher) -> Element {
    let d_edit = dispatcher.clone();
    let d_delete = dispatcher;
    let edit_id = doctor.id.clone();
    let delete_id = doctor.id.clone();

    rsx! {
        div {
            class: "card record-card",
            h3 { "{doctor.name}" }
            p { class: "muted", "{doctor.specialization} · {doctor.experience_years} years experience" }
            if let Some(contact) = doctor.contact() {
                p { class: "contact", "{contact}" }
            }
            div {
                class: "actions",
                button {
                    class: "btn",
                    onclick: move |_| d_edit.send(UiEvent::EditDoctor(edit_id.clone())),
                    "Edit"
                }
                button {
                    class: "btn btn-danger",
                    onclick: move |_| d_delete.send(UiEvent::RequestDelete(DeleteTarget::Doctor(delete_id.clone()))),
                    "Delete"
                }
            }
        }
    }
}

#[component]
pub fn AssignmentList(assignments: Vec<Assignment>, state: LoadState, dispatcher: Dispatcher) -> Element {
    let d_add = dispatcher.clone();

    rsx! {
        section {
            id: "assignments",
            SectionHeader {
                title: "Assignments",
                action: "Create Assignment",
                onclick: move |_| d_add.send(UiEvent::OpenAssignmentModal),
            }

            if let LoadState::Failed(message) = &state {
                LoadError { message: message.clone() }
            } else if assignments.is_empty() {
                EmptyState {
                    title: "No Assignments Found",
                    hint: "Click \"Create Assignment\" to assign doctors to patients.",
                }
            } else {
                div {
                    class: "grid",
                    for assignment in assignments {
                        AssignmentCard { key: "{assignment.id}", assignment: assignment.clone(), dispatcher: dispatcher.clone() }
                    }
                }
            }
        }
    }
}

#[component]
fn AssignmentCard(assignment: Assignment, dispatcher: Dispatcher) -> Element {
    let id = assignment.id.clone();
    let assigned_on = assignment.assigned_on();

    rsx! {
        div {
            class: "card record-card",
            h3 { "{assignment.patient_name} → {assignment.doctor_name}" }
            p { class: "muted", "Assigned on {assigned_on}" }
            div {
                class: "actions",
                button {
                    class: "btn btn-danger",
                    onclick: move |_| dispatcher.send(UiEvent::RequestDelete(DeleteTarget::Assignment(id.clone()))),
                    "Remove"
                }
            }
        }
    }
}
