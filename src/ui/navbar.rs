use dioxus::prelude::*;

use crate::analytics::DashboardStats;
use crate::controller::{Tab, UiEvent};
use crate::ui::Dispatcher;

#[component]
pub fn Navbar(user_name: String, stats: DashboardStats, tab: Tab, dispatcher: Dispatcher) -> Element {
    let d_logout = dispatcher.clone();

    rsx! {
        nav {
            class: "navbar",

            span { class: "brand", "Carebook" }

            div {
                class: "tabs",
                for candidate in Tab::ALL {
                    TabButton {
                        key: "{candidate:?}",
                        active: candidate == tab,
                        label: candidate.label().to_string(),
                        onclick: {
                            let d = dispatcher.clone();
                            move |_| d.send(UiEvent::SwitchTab(candidate))
                        },
                    }
                }
            }

            div {
                class: "summary",
                span { id: "nav-patients", "{stats.patients} Patients" }
                span { id: "nav-doctors", "{stats.doctors} Doctors" }
                span { id: "nav-assignments", "{stats.assignments} Assignments" }
            }

            span { class: "spacer" }

            span { class: "muted", "Welcome, {user_name}" }
            button {
                class: "btn",
                onclick: move |_| d_logout.send(UiEvent::Logout),
                "Logout"
            }
        }
    }
}

#[component]
fn TabButton(active: bool, onclick: EventHandler<MouseEvent>, label: String) -> Element {
    let classes = if active { "tab active" } else { "tab" };

    rsx! {
        button {
            class: "{classes}",
            onclick: move |evt| onclick.call(evt),
            "{label}"
        }
    }
}
