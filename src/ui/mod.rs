//! UI components for Carebook
//!
//! Components below [`Layout`] take everything they show as props, so they can
//! be rendered without a running controller.

pub mod auth;
pub mod dashboard;
pub mod feedback;
pub mod lists;
pub mod modals;
pub mod navbar;

use dioxus::prelude::*;

use crate::app::AppState;
use crate::controller::{Controller, Snapshot, UiEvent, View};

const STYLE: &str = include_str!("style.css");

/// Sends UI events to the controller from event handlers
#[derive(Clone, Default)]
pub struct Dispatcher(Option<Controller>);

impl Dispatcher {
    pub fn new(controller: Controller) -> Self {
        Self(Some(controller))
    }

    /// Dispatcher that drops every event, for static rendering
    pub fn noop() -> Self {
        Self(None)
    }

    pub fn send(&self, event: UiEvent) {
        if let Some(controller) = self.0.clone() {
            spawn(async move {
                controller.dispatch(event).await;
            });
        }
    }
}

impl PartialEq for Dispatcher {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => a.ptr_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// Root layout bound to the shared [`AppState`]
#[component]
pub fn Layout() -> Element {
    let app_state = use_context::<AppState>();
    let snapshot = app_state.snapshot.read().clone();
    let dispatcher = Dispatcher::new(app_state.controller.clone());

    rsx! {
        style { {STYLE} }
        Shell { snapshot, dispatcher }
    }
}

#[component]
pub fn Shell(snapshot: Snapshot, dispatcher: Dispatcher) -> Element {
    rsx! {
        div {
            class: "app",

            feedback::AlertStack { alerts: snapshot.alerts.clone(), dispatcher: dispatcher.clone() }

            {match snapshot.view {
                View::Auth => rsx! {
                    auth::AuthView { forms: snapshot.forms.clone(), dispatcher: dispatcher.clone() }
                },
                View::Main => rsx! {
                    MainView { snapshot: snapshot.clone(), dispatcher: dispatcher.clone() }
                },
            }}

            if let Some(confirmation) = snapshot.confirmation.clone() {
                feedback::ConfirmDialog { message: confirmation.message, dispatcher: dispatcher.clone() }
            }
        }
    }
}

#[component]
fn MainView(snapshot: Snapshot, dispatcher: Dispatcher) -> Element {
    use crate::controller::Tab;

    let stats = snapshot
        .dashboard
        .as_ref()
        .map(|d| d.stats)
        .unwrap_or_default();
    let user_name = snapshot
        .user
        .as_ref()
        .map(|u| u.name.clone())
        .unwrap_or_default();

    rsx! {
        navbar::Navbar { user_name, stats, tab: snapshot.tab, dispatcher: dispatcher.clone() }

        main {
            class: "content",
            {match snapshot.tab {
                Tab::Dashboard => rsx! {
                    dashboard::DashboardView { dashboard: snapshot.dashboard.clone() }
                },
                Tab::Patients => rsx! {
                    lists::PatientList {
                        patients: snapshot.patients.records.clone(),
                        state: snapshot.patients.state.clone(),
                        dispatcher: dispatcher.clone(),
                    }
                },
                Tab::Doctors => rsx! {
                    lists::DoctorList {
                        doctors: snapshot.doctors.records.clone(),
                        state: snapshot.doctors.state.clone(),
                        dispatcher: dispatcher.clone(),
                    }
                },
                Tab::Assignments => rsx! {
                    lists::AssignmentList {
                        assignments: snapshot.assignments.records.clone(),
                        state: snapshot.assignments.state.clone(),
                        dispatcher: dispatcher.clone(),
                    }
                },
            }}
        }

        modals::ModalHost { modal: snapshot.modal, forms: snapshot.forms.clone(), dispatcher }
    }
}
