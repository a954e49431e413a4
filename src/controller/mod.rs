//! Application controller
//!
//! Owns the session, the three repositories and all view state, and applies
//! [`UiEvent`]s to them. The UI never mutates state directly: it dispatches an
//! event, then re-reads a [`Snapshot`] whenever the revision channel ticks.

pub mod alerts;
pub mod event;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;

use crate::analytics::Dashboard;
use crate::api::{ApiClient, ReqwestTransport, Transport, TransportError};
use crate::forms::{AssignmentForm, DoctorForm, Forms, Modal, PatientForm};
use crate::repository::{Assignments, Doctors, LoadState, Patients, Repository};
use crate::session::service::SessionService;
use crate::session::SessionStore;
use crate::storage::settings::ClientSettings;
use crate::storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
use crate::types::{Assignment, Doctor, Patient, User};

pub use alerts::{Alert, AlertKind};
pub use event::{DeleteTarget, Tab, UiEvent};

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to create HTTP client: {0}")]
    Transport(#[from] TransportError),
    #[error("Failed to open local storage: {0}")]
    Storage(#[from] StorageError),
}

/// Top-level screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Auth,
    Main,
}

/// A delete waiting for the user's answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub message: String,
    pub target: DeleteTarget,
}

impl Confirmation {
    fn new(target: DeleteTarget) -> Self {
        Self {
            message: target.prompt().to_string(),
            target,
        }
    }
}

/// Cached collection plus the outcome of its last load
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    pub records: Vec<T>,
    pub state: LoadState,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            state: LoadState::Idle,
        }
    }
}

/// Everything the UI renders, copied out in one go
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub view: View,
    pub tab: Tab,
    pub user: Option<User>,
    pub patients: Collection<Patient>,
    pub doctors: Collection<Doctor>,
    pub assignments: Collection<Assignment>,
    pub forms: Forms,
    pub modal: Option<Modal>,
    pub confirmation: Option<Confirmation>,
    pub alerts: Vec<Alert>,
    pub dashboard: Option<Dashboard>,
}

#[derive(Debug, Clone, Default)]
struct UiState {
    view: View,
    tab: Tab,
    forms: Forms,
    modal: Option<Modal>,
    confirmation: Option<Confirmation>,
    alerts: Vec<Alert>,
    dashboard: Option<Dashboard>,
}

#[derive(Clone)]
pub struct Controller {
    settings: Arc<ClientSettings>,
    auth: SessionService,
    patients: Arc<Repository<Patients>>,
    doctors: Arc<Repository<Doctors>>,
    assignments: Arc<Repository<Assignments>>,
    ui: Arc<Mutex<UiState>>,
    revision: Arc<watch::Sender<u64>>,
}

impl Controller {
    pub fn new(
        settings: ClientSettings,
        transport: Arc<dyn Transport>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        let session = Arc::new(SessionStore::new(storage));
        let api = ApiClient::new(transport, session);
        let (revision, _) = watch::channel(0);

        Self {
            settings: Arc::new(settings),
            auth: SessionService::new(api.clone()),
            patients: Arc::new(Repository::new(api.clone())),
            doctors: Arc::new(Repository::new(api.clone())),
            assignments: Arc::new(Repository::new(api)),
            ui: Arc::new(Mutex::new(UiState::default())),
            revision: Arc::new(revision),
        }
    }

    /// Build against the configured backend with durable local storage.
    ///
    /// Falls back to in-memory storage when no data directory is available; the
    /// session then only lasts for this run.
    pub fn from_settings(settings: ClientSettings) -> Result<Self, StartupError> {
        let transport = Arc::new(ReqwestTransport::new(&settings)?);
        let storage: Arc<dyn KeyValueStore> = match FileStore::in_data_dir() {
            Ok(store) => {
                tracing::info!("Session storage at {}", store.path().display());
                Arc::new(store)
            }
            Err(e) => {
                tracing::warn!("No local storage, session will not persist: {}", e);
                Arc::new(MemoryStore::new())
            }
        };
        Ok(Self::new(settings, transport, storage))
    }

    /// Whether both handles drive the same application state
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.ui, &other.ui)
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        self.auth.store()
    }

    /// Receiver that ticks after every state change
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn snapshot(&self) -> Snapshot {
        let ui = self.ui.lock().expect("ui state lock poisoned").clone();
        Snapshot {
            view: ui.view,
            tab: ui.tab,
            user: self.session().user(),
            patients: Collection {
                records: self.patients.snapshot(),
                state: self.patients.load_state(),
            },
            doctors: Collection {
                records: self.doctors.snapshot(),
                state: self.doctors.load_state(),
            },
            assignments: Collection {
                records: self.assignments.snapshot(),
                state: self.assignments.load_state(),
            },
            forms: ui.forms,
            modal: ui.modal,
            confirmation: ui.confirmation,
            alerts: ui.alerts,
            dashboard: ui.dashboard,
        }
    }

    pub async fn dispatch(&self, event: UiEvent) {
        tracing::debug!(event = event.name(), "dispatch");

        match event {
            UiEvent::ResumeSession => self.resume_session().await,
            UiEvent::LoginFieldChanged(field, value) => {
                self.update_ui(|ui| ui.forms.login.set(field, value))
            }
            UiEvent::SubmitLogin => self.login().await,
            UiEvent::RegisterFieldChanged(field, value) => {
                self.update_ui(|ui| ui.forms.register.set(field, value))
            }
            UiEvent::SubmitRegister => self.register().await,
            UiEvent::Logout => self.logout(),

            UiEvent::SwitchTab(tab) => self.switch_tab(tab).await,

            UiEvent::OpenCreatePatient => self.update_ui(|ui| {
                ui.forms.patient = PatientForm::for_create();
                ui.modal = Some(Modal::Patient);
            }),
            UiEvent::EditPatient(id) => self.edit_patient(&id).await,
            UiEvent::PatientFieldChanged(field, value) => {
                self.update_ui(|ui| ui.forms.patient.set(field, value))
            }
            UiEvent::SubmitPatient => self.submit_patient().await,

            UiEvent::OpenCreateDoctor => self.update_ui(|ui| {
                ui.forms.doctor = DoctorForm::for_create();
                ui.modal = Some(Modal::Doctor);
            }),
            UiEvent::EditDoctor(id) => self.edit_doctor(&id),
            UiEvent::DoctorFieldChanged(field, value) => {
                self.update_ui(|ui| ui.forms.doctor.set(field, value))
            }
            UiEvent::SubmitDoctor => self.submit_doctor().await,

            UiEvent::OpenAssignmentModal => self.open_assignment_modal().await,
            UiEvent::AssignmentFieldChanged(field, value) => {
                self.update_ui(|ui| ui.forms.assignment.set(field, value))
            }
            UiEvent::SubmitAssignment => self.submit_assignment().await,

            UiEvent::CloseModal => self.update_ui(|ui| ui.modal = None),
            UiEvent::RequestDelete(target) => {
                self.update_ui(|ui| ui.confirmation = Some(Confirmation::new(target)))
            }
            UiEvent::Confirm => self.confirm().await,
            UiEvent::Cancel => self.update_ui(|ui| ui.confirmation = None),
            UiEvent::DismissAlert(id) => self.dismiss_alert(id),
        }

        self.handle_expiry();
        self.notify();
    }

    /// Reload all three collections and recompute the dashboard.
    pub async fn load_dashboard(&self) {
        let _ = tokio::join!(
            self.patients.load(),
            self.doctors.load(),
            self.assignments.load()
        );
        self.refresh_dashboard();
    }

    fn notify(&self) {
        self.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
    }

    fn update_ui<T>(&self, f: impl FnOnce(&mut UiState) -> T) -> T {
        let mut ui = self.ui.lock().expect("ui state lock poisoned");
        f(&mut ui)
    }

    fn push_alert(&self, kind: AlertKind, message: impl Into<String>) {
        let alert = Alert::new(kind, message);
        let id = alert.id;
        tracing::debug!(kind = ?alert.kind, "{}", alert.message);
        self.update_ui(|ui| ui.alerts.push(alert));

        // Outside a runtime (plain unit tests) alerts simply stay until dismissed.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let controller = self.clone();
            let delay = Duration::from_secs(self.settings.alert_dismiss_secs);
            handle.spawn(async move {
                tokio::time::sleep(delay).await;
                controller.dismiss_alert(id);
                controller.notify();
            });
        }
    }

    fn dismiss_alert(&self, id: uuid::Uuid) {
        self.update_ui(|ui| ui.alerts.retain(|alert| alert.id != id));
    }

    /// Apply an expiry flagged by the 401 interceptor: same end state as a
    /// logout, announced with a warning instead.
    fn handle_expiry(&self) {
        if self.session().take_expired() {
            tracing::warn!("Session expired, returning to sign-in");
            self.reset_to_signed_out();
            self.push_alert(AlertKind::Warning, SESSION_EXPIRED_MESSAGE);
        }
    }

    fn reset_to_signed_out(&self) {
        self.update_ui(|ui| {
            ui.view = View::Auth;
            ui.tab = Tab::Dashboard;
            ui.forms.reset();
            ui.modal = None;
            ui.confirmation = None;
            ui.dashboard = None;
        });
        self.patients.reset();
        self.doctors.reset();
        self.assignments.reset();
    }

    async fn enter_main(&self) {
        self.update_ui(|ui| {
            ui.view = View::Main;
            ui.tab = Tab::Dashboard;
        });
        self.notify();
        self.load_dashboard().await;
    }

    async fn resume_session(&self) {
        match self.auth.resume().await {
            Some(user) => {
                tracing::info!("Welcome back, {}", user.name);
                self.enter_main().await;
            }
            None => self.update_ui(|ui| ui.view = View::Auth),
        }
    }

    async fn login(&self) {
        let form = self.update_ui(|ui| ui.forms.login.clone());
        match self.auth.login(&form.email, &form.password).await {
            Ok(_) => {
                self.update_ui(|ui| ui.forms.login = Default::default());
                self.push_alert(AlertKind::Success, "Login successful!");
                self.enter_main().await;
            }
            Err(e) => {
                tracing::warn!("Login failed: {}", e);
                self.push_alert(AlertKind::Danger, e.user_message("Login failed"));
            }
        }
    }

    async fn register(&self) {
        let form = self.update_ui(|ui| ui.forms.register.clone());
        match self.auth.register(&form.name, &form.email, &form.password).await {
            Ok(_) => {
                self.update_ui(|ui| ui.forms.register = Default::default());
                self.push_alert(AlertKind::Success, "Registration successful!");
                self.enter_main().await;
            }
            Err(e) => {
                tracing::warn!("Registration failed: {}", e);
                self.push_alert(AlertKind::Danger, e.user_message("Registration failed"));
            }
        }
    }

    fn logout(&self) {
        self.auth.logout();
        self.reset_to_signed_out();
        self.push_alert(AlertKind::Info, "Logged out successfully");
    }

    async fn switch_tab(&self, tab: Tab) {
        self.update_ui(|ui| ui.tab = tab);
        self.notify();

        // Load failures surface through the collection's load state.
        match tab {
            Tab::Dashboard => self.load_dashboard().await,
            Tab::Patients => {
                let _ = self.patients.load().await;
            }
            Tab::Doctors => {
                let _ = self.doctors.load().await;
            }
            Tab::Assignments => {
                let _ = self.assignments.load().await;
            }
        }
    }

    fn refresh_dashboard(&self) {
        let dashboard = Dashboard::compute(
            &self.patients.snapshot(),
            &self.doctors.snapshot(),
            &self.assignments.snapshot(),
        );
        self.update_ui(|ui| ui.dashboard = Some(dashboard));
    }

    /// Open the edit modal, then fill in the patient's assigned doctors.
    async fn edit_patient(&self, id: &str) {
        let Some(patient) = self.patients.find(id) else {
            tracing::warn!("Edit requested for unknown patient {}", id);
            return;
        };
        self.update_ui(|ui| {
            ui.forms.patient = PatientForm::for_edit(&patient);
            ui.modal = Some(Modal::Patient);
        });
        self.notify();

        match self.assignments.for_patient(id).await {
            Ok(assignments) => {
                let doctors: Vec<String> = assignments.into_iter().map(|a| a.doctor_name).collect();
                self.update_ui(|ui| {
                    // the user may have moved on to another record meanwhile
                    if ui.forms.patient.id == id {
                        ui.forms.patient.assigned_doctors = doctors;
                    }
                });
            }
            Err(e) => tracing::warn!("Failed to load assigned doctors of {}: {}", id, e),
        }
    }

    fn edit_doctor(&self, id: &str) {
        match self.doctors.find(id) {
            Some(doctor) => self.update_ui(|ui| {
                ui.forms.doctor = DoctorForm::for_edit(&doctor);
                ui.modal = Some(Modal::Doctor);
            }),
            None => tracing::warn!("Edit requested for unknown doctor {}", id),
        }
    }

    async fn submit_patient(&self) {
        let form = self.update_ui(|ui| ui.forms.patient.clone());
        let input = match form.to_input() {
            Ok(input) => input,
            Err(e) => {
                self.push_alert(AlertKind::Danger, e.to_string());
                return;
            }
        };

        let result = if form.is_edit() {
            self.patients.update(&form.id, &input).await
        } else {
            self.patients.create(&input).await
        };

        match result {
            Ok(()) => {
                let message = if form.is_edit() {
                    "Patient updated successfully!"
                } else {
                    "Patient created successfully!"
                };
                self.push_alert(AlertKind::Success, message);
                self.update_ui(|ui| ui.modal = None);
                self.refresh_dashboard();
            }
            Err(e) => {
                tracing::error!("Failed to save patient: {}", e);
                self.push_alert(AlertKind::Danger, e.user_message("Failed to save patient"));
            }
        }
    }

    async fn submit_doctor(&self) {
        let form = self.update_ui(|ui| ui.forms.doctor.clone());
        let input = match form.to_input() {
            Ok(input) => input,
            Err(e) => {
                self.push_alert(AlertKind::Danger, e.to_string());
                return;
            }
        };

        let result = if form.is_edit() {
            self.doctors.update(&form.id, &input).await
        } else {
            self.doctors.create(&input).await
        };

        match result {
            Ok(()) => {
                let message = if form.is_edit() {
                    "Doctor updated successfully!"
                } else {
                    "Doctor created successfully!"
                };
                self.push_alert(AlertKind::Success, message);
                self.update_ui(|ui| ui.modal = None);
                self.refresh_dashboard();
            }
            Err(e) => {
                tracing::error!("Failed to save doctor: {}", e);
                self.push_alert(AlertKind::Danger, e.user_message("Failed to save doctor"));
            }
        }
    }

    /// Open the assignment modal with options fetched fresh from the backend,
    /// never from the cached collections.
    async fn open_assignment_modal(&self) {
        self.update_ui(|ui| {
            ui.forms.assignment = AssignmentForm::default();
            ui.modal = Some(Modal::Assignment);
        });
        self.notify();

        let (patients, doctors) = tokio::join!(self.patients.fetch_all(), self.doctors.fetch_all());
        match (patients, doctors) {
            (Ok(patients), Ok(doctors)) => self.update_ui(|ui| {
                ui.forms.assignment = AssignmentForm::with_options(&patients, &doctors);
            }),
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!("Failed to load assignment options: {}", e);
                self.push_alert(AlertKind::Danger, "Failed to load data for assignment");
            }
        }
    }

    async fn submit_assignment(&self) {
        let form = self.update_ui(|ui| ui.forms.assignment.clone());
        let input = match form.to_input() {
            Ok(input) => input,
            Err(e) => {
                self.push_alert(AlertKind::Danger, e.to_string());
                return;
            }
        };

        match self.assignments.create(&input).await {
            Ok(()) => {
                self.push_alert(AlertKind::Success, "Assignment created successfully!");
                self.update_ui(|ui| ui.modal = None);
                self.refresh_dashboard();
            }
            Err(e) => {
                tracing::error!("Failed to create assignment: {}", e);
                self.push_alert(AlertKind::Danger, e.user_message("Failed to create assignment"));
            }
        }
    }

    async fn confirm(&self) {
        let Some(confirmation) = self.update_ui(|ui| ui.confirmation.take()) else {
            return;
        };

        let (result, done, fallback) = match &confirmation.target {
            DeleteTarget::Patient(id) => (
                self.patients.remove(id).await,
                "Patient deleted successfully!",
                "Failed to delete patient",
            ),
            DeleteTarget::Doctor(id) => (
                self.doctors.remove(id).await,
                "Doctor deleted successfully!",
                "Failed to delete doctor",
            ),
            DeleteTarget::Assignment(id) => (
                self.assignments.remove(id).await,
                "Assignment removed successfully!",
                "Failed to remove assignment",
            ),
        };

        match result {
            Ok(()) => {
                self.push_alert(AlertKind::Success, done);
                self.refresh_dashboard();
            }
            Err(e) => {
                tracing::error!("{}: {}", fallback, e);
                self.push_alert(AlertKind::Danger, e.user_message(fallback));
            }
        }
    }
}
