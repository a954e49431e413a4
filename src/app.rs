//! Root Dioxus application component
//!
//! This module contains the main App component that serves as the root of the UI tree.

use dioxus::prelude::*;

use crate::controller::{Controller, Snapshot, UiEvent};
use crate::ui::Layout;

/// Global application state shared across components
#[derive(Clone)]
pub struct AppState {
    pub controller: Controller,
    /// Latest controller snapshot; refreshed whenever the controller reports a change
    pub snapshot: Signal<Snapshot>,
}

/// Root component. Expects a [`Controller`] in the root context.
#[component]
pub fn App() -> Element {
    let controller = use_context::<Controller>();
    let snapshot = use_signal(|| controller.snapshot());
    let app_state = use_context_provider(|| AppState {
        controller: controller.clone(),
        snapshot,
    });

    {
        let controller = app_state.controller.clone();
        let snapshot = app_state.snapshot;
        use_future(move || {
            let controller = controller.clone();
            let mut snapshot = snapshot;
            async move {
                let mut changes = controller.subscribe();
                while changes.changed().await.is_ok() {
                    snapshot.set(controller.snapshot());
                }
                tracing::debug!("Controller dropped, snapshot watcher stopped");
            }
        });
    }

    {
        let controller = app_state.controller.clone();
        use_effect(move || {
            let controller = controller.clone();
            spawn(async move {
                controller.dispatch(UiEvent::ResumeSession).await;
            });
        });
    }

    rsx! {
        Layout {}
    }
}
