//! Create/edit dialogs for patients and doctors, and the assignment dialog

use dioxus::prelude::*;

use crate::controller::UiEvent;
use crate::forms::{
    AssignmentField, AssignmentForm, DoctorField, DoctorForm, Forms, Modal, PatientField,
    PatientForm, SelectOption,
};
use crate::ui::Dispatcher;

const GENDERS: [(&str, &str); 3] = [("male", "Male"), ("female", "Female"), ("other", "Other")];

#[component]
pub fn ModalHost(#[props(!optional)] modal: Option<Modal>, forms: Forms, dispatcher: Dispatcher) -> Element {
    match modal {
        None => rsx! {},
        Some(Modal::Patient) => rsx! {
            PatientModal { form: forms.patient, dispatcher }
        },
        Some(Modal::Doctor) => rsx! {
            DoctorModal { form: forms.doctor, dispatcher }
        },
        Some(Modal::Assignment) => rsx! {
            AssignmentModal { form: forms.assignment, dispatcher }
        },
    }
}

#[component]
fn ModalFrame(title: String, submit_label: String, dispatcher: Dispatcher, submit: UiEvent, children: Element) -> Element {
    let d_close = dispatcher.clone();
    let d_cancel = dispatcher.clone();
    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        dispatcher.send(submit.clone());
    };

    rsx! {
        div {
            class: "backdrop",
            onclick: move |_| d_close.send(UiEvent::CloseModal),

            form {
                class: "modal",
                onclick: move |evt| evt.stop_propagation(),
                onsubmit: on_submit,

                h2 { "{title}" }
                {children}

                footer {
                    button {
                        class: "btn",
                        r#type: "button",
                        onclick: move |_| d_cancel.send(UiEvent::CloseModal),
                        "Cancel"
                    }
                    button { class: "btn btn-primary", r#type: "submit", "{submit_label}" }
                }
            }
        }
    }
}

#[component]
fn PatientModal(form: PatientForm, dispatcher: Dispatcher) -> Element {
    let title = form.title().to_string();
    let is_edit = form.is_edit();
    let assigned = form.assigned_doctors.clone();
    let field = |field: PatientField| {
        let d = dispatcher.clone();
        move |evt: FormEvent| d.send(UiEvent::PatientFieldChanged(field, evt.value()))
    };

    rsx! {
        ModalFrame {
            title,
            submit_label: "Save Patient",
            dispatcher: dispatcher.clone(),
            submit: UiEvent::SubmitPatient,

            label { "Name" }
            input { r#type: "text", required: true, value: "{form.name}", oninput: field(PatientField::Name) }
            label { "Age" }
            input { r#type: "number", min: "0", max: "150", required: true, value: "{form.age}", oninput: field(PatientField::Age) }
            label { "Gender" }
            select {
                required: true,
                value: "{form.gender}",
                onchange: field(PatientField::Gender),
                option { value: "", "Select gender" }
                for (value, label) in GENDERS {
                    option { key: "{value}", value: "{value}", selected: form.gender == value, "{label}" }
                }
            }
            label { "Medical History" }
            textarea { rows: "3", value: "{form.medical_history}", oninput: field(PatientField::MedicalHistory) }

            if is_edit {
                label { "Assigned Doctors" }
                if assigned.is_empty() {
                    p { class: "muted", "No doctors assigned" }
                } else {
                    ul { class: "assigned-doctors",
                        for (index, name) in assigned.iter().enumerate() {
                            li { key: "{index}", "{name}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn DoctorModal(form: DoctorForm, dispatcher: Dispatcher) -> Element {
    let title = form.title().to_string();
    let field = |field: DoctorField| {
        let d = dispatcher.clone();
        move |evt: FormEvent| d.send(UiEvent::DoctorFieldChanged(field, evt.value()))
    };

    rsx! {
        ModalFrame {
            title,
            submit_label: "Save Doctor",
            dispatcher: dispatcher.clone(),
            submit: UiEvent::SubmitDoctor,

            label { "Name" }
            input { r#type: "text", required: true, value: "{form.name}", oninput: field(DoctorField::Name) }
            label { "Specialization" }
            input { r#type: "text", required: true, value: "{form.specialization}", oninput: field(DoctorField::Specialization) }
            label { "Experience (years)" }
            input { r#type: "number", min: "0", max: "60", required: true, value: "{form.experience_years}", oninput: field(DoctorField::ExperienceYears) }
            label { "Contact Info" }
            input { r#type: "text", value: "{form.contact_info}", oninput: field(DoctorField::ContactInfo) }
        }
    }
}

#[component]
fn AssignmentModal(form: AssignmentForm, dispatcher: Dispatcher) -> Element {
    let d_patient = dispatcher.clone();
    let d_doctor = dispatcher.clone();

    rsx! {
        ModalFrame {
            title: "Create Assignment",
            submit_label: "Assign",
            dispatcher: dispatcher.clone(),
            submit: UiEvent::SubmitAssignment,

            label { "Patient" }
            select {
                required: true,
                value: "{form.patient_id}",
                onchange: move |evt| d_patient.send(UiEvent::AssignmentFieldChanged(AssignmentField::Patient, evt.value())),
                OptionList { placeholder: "Select patient", options: form.patient_options.clone(), selected: form.patient_id.clone() }
            }
            label { "Doctor" }
            select {
                required: true,
                value: "{form.doctor_id}",
                onchange: move |evt| d_doctor.send(UiEvent::AssignmentFieldChanged(AssignmentField::Doctor, evt.value())),
                OptionList { placeholder: "Select doctor", options: form.doctor_options.clone(), selected: form.doctor_id.clone() }
            }
        }
    }
}

#[component]
fn OptionList(placeholder: String, options: Vec<SelectOption>, selected: String) -> Element {
    rsx! {
        option { value: "", "{placeholder}" }
        for opt in options {
            option {
                key: "{opt.value}",
                value: "{opt.value}",
                selected: opt.value == selected,
                "{opt.label}"
            }
        }
    }
}
