//! Alert banners and the delete confirmation dialog

use dioxus::prelude::*;

use crate::controller::{Alert, UiEvent};
use crate::ui::Dispatcher;

#[component]
pub fn AlertStack(alerts: Vec<Alert>, dispatcher: Dispatcher) -> Element {
    rsx! {
        div {
            class: "alerts",
            for alert in alerts {
                AlertBanner { key: "{alert.id}", alert: alert.clone(), dispatcher: dispatcher.clone() }
            }
        }
    }
}

#[component]
fn AlertBanner(alert: Alert, dispatcher: Dispatcher) -> Element {
    let id = alert.id;

    rsx! {
        div {
            class: alert.kind.css_class(),
            role: "alert",
            span { "{alert.message}" }
            button {
                title: "Dismiss",
                onclick: move |_| dispatcher.send(UiEvent::DismissAlert(id)),
                "×"
            }
        }
    }
}

/// Modal yes/no prompt shown before any delete
#[component]
pub fn ConfirmDialog(message: String, dispatcher: Dispatcher) -> Element {
    let d_cancel = dispatcher.clone();
    let d_confirm = dispatcher;

    rsx! {
        div {
            class: "backdrop",
            div {
                class: "modal confirm",
                role: "alertdialog",
                p { "{message}" }
                footer {
                    button {
                        class: "btn",
                        onclick: move |_| d_cancel.send(UiEvent::Cancel),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-danger",
                        onclick: move |_| d_confirm.send(UiEvent::Confirm),
                        "Confirm"
                    }
                }
            }
        }
    }
}
