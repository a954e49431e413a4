//! In-memory records backend for tests
//!
//! Serves the REST surface over the [`Transport`] seam with the same status codes
//! and messages as the real service, and records every request it receives.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Notify;

use crate::api::{ApiRequest, ApiResponse, Method, Transport, TransportError};
use crate::types::{Assignment, Doctor, Patient, User};

const TIMESTAMP: &str = "2024-05-01T09:30:00.000000";

struct Account {
    user: User,
    password: String,
}

struct Failure {
    method: Method,
    path: String,
    status: u16,
    message: String,
}

#[derive(Default)]
struct BackendState {
    accounts: Vec<Account>,
    tokens: HashMap<String, String>,
    patients: Vec<Patient>,
    doctors: Vec<Doctor>,
    mappings: Vec<Assignment>,
    requests: Vec<ApiRequest>,
    failures: Vec<Failure>,
    transport_down: bool,
    held: Option<Arc<Notify>>,
    next_id: u64,
}

impl BackendState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn issue_token(&mut self, user_id: &str) -> String {
        let token = format!("token-{}", self.next_id(user_id));
        self.tokens.insert(token.clone(), user_id.to_string());
        token
    }
}

pub struct FakeBackend {
    state: Mutex<BackendState>,
}

fn reply(status: u16, body: Value) -> ApiResponse {
    ApiResponse { status, body }
}

fn problem(status: u16, error: &str, message: &str) -> ApiResponse {
    reply(status, json!({ "error": error, "message": message }))
}

fn text(body: &Value, key: &str) -> Option<String> {
    body.get(key).and_then(Value::as_str).map(|s| s.trim().to_string())
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BackendState::default()),
        }
    }

    pub fn add_user(&self, name: &str, email: &str, password: &str) -> User {
        let mut state = self.state.lock().expect("backend mutex poisoned");
        let user = User {
            id: state.next_id("user"),
            name: name.to_string(),
            email: email.to_lowercase(),
            created_at: Some(TIMESTAMP.to_string()),
        };
        state.accounts.push(Account {
            user: user.clone(),
            password: password.to_string(),
        });
        user
    }

    /// Invalidate every issued token; the next authenticated call gets a 401.
    pub fn revoke_tokens(&self) {
        self.state.lock().expect("backend mutex poisoned").tokens.clear();
    }

    /// Answer every later `method path` request with `status`.
    pub fn fail(&self, method: Method, path: &str, status: u16, message: &str) {
        self.state
            .lock()
            .expect("backend mutex poisoned")
            .failures
            .push(Failure {
                method,
                path: path.to_string(),
                status,
                message: message.to_string(),
            });
    }

    /// Make every request fail before a status is produced.
    pub fn set_transport_down(&self, down: bool) {
        self.state.lock().expect("backend mutex poisoned").transport_down = down;
    }

    /// Park the next request after it is recorded until the returned gate is notified.
    pub fn hold_next_request(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state.lock().expect("backend mutex poisoned").held = Some(gate.clone());
        gate
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().expect("backend mutex poisoned").requests.clone()
    }

    pub fn patient_count(&self) -> usize {
        self.state.lock().expect("backend mutex poisoned").patients.len()
    }

    pub fn seed_patient(&self, owner: &User, name: &str, age: i64, gender: &str) -> Patient {
        let mut state = self.state.lock().expect("backend mutex poisoned");
        let patient = Patient {
            id: state.next_id("patient"),
            name: name.to_string(),
            age,
            gender: gender.to_string(),
            medical_history: None,
            created_by_user_id: Some(owner.id.clone()),
            created_at: Some(TIMESTAMP.to_string()),
            updated_at: Some(TIMESTAMP.to_string()),
        };
        state.patients.push(patient.clone());
        patient
    }

    pub fn seed_doctor(&self, name: &str, specialization: &str, experience_years: i64) -> Doctor {
        let mut state = self.state.lock().expect("backend mutex poisoned");
        let doctor = Doctor {
            id: state.next_id("doctor"),
            name: name.to_string(),
            specialization: specialization.to_string(),
            experience_years,
            contact_info: None,
            created_at: Some(TIMESTAMP.to_string()),
            updated_at: Some(TIMESTAMP.to_string()),
        };
        state.doctors.push(doctor.clone());
        doctor
    }

    fn handle(&self, request: &ApiRequest) -> ApiResponse {
        let mut state = self.state.lock().expect("backend mutex poisoned");

        if let Some(failure) = state
            .failures
            .iter()
            .find(|f| f.method == request.method && f.path == request.path)
        {
            return problem(failure.status, "Injected failure", &failure.message);
        }

        let body = request.body.clone().unwrap_or(Value::Null);
        let segments: Vec<&str> = request
            .path
            .trim_matches('/')
            .split('/')
            .collect();

        match (request.method, segments.as_slice()) {
            (Method::Post, ["api", "auth", "login"]) => return login(&mut state, &body),
            (Method::Post, ["api", "auth", "register"]) => return register(&mut state, &body),
            _ => {}
        }

        let user_id = match request
            .bearer
            .as_ref()
            .and_then(|token| state.tokens.get(token))
        {
            Some(user_id) => user_id.clone(),
            None => return reply(401, json!({ "msg": "Token has expired" })),
        };

        match (request.method, segments.as_slice()) {
            (Method::Get, ["api", "auth", "me"]) => {
                match state.accounts.iter().find(|a| a.user.id == user_id) {
                    Some(account) => reply(200, json!({ "user": account.user })),
                    None => problem(404, "User not found", "Current user not found"),
                }
            }

            (Method::Get, ["api", "patients"]) => {
                let patients: Vec<&Patient> = state
                    .patients
                    .iter()
                    .filter(|p| p.created_by_user_id.as_deref() == Some(user_id.as_str()))
                    .collect();
                reply(200, json!({ "patients": patients }))
            }
            (Method::Post, ["api", "patients"]) => create_patient(&mut state, &user_id, &body),
            (Method::Put, ["api", "patients", id]) => update_patient(&mut state, &user_id, id, &body),
            (Method::Delete, ["api", "patients", id]) => {
                let Some(index) = state.patients.iter().position(|p| p.id == *id) else {
                    return problem(404, "Patient not found", "Patient with the specified ID does not exist");
                };
                if state.patients[index].created_by_user_id.as_deref() != Some(user_id.as_str()) {
                    return problem(403, "Access denied", "You can only delete patients you created");
                }
                state.patients.remove(index);
                state.mappings.retain(|m| m.patient_id != *id);
                reply(200, json!({ "message": "Patient deleted successfully" }))
            }

            (Method::Get, ["api", "doctors"]) => reply(200, json!({ "doctors": state.doctors })),
            (Method::Post, ["api", "doctors"]) => create_doctor(&mut state, &body),
            (Method::Put, ["api", "doctors", id]) => update_doctor(&mut state, id, &body),
            (Method::Delete, ["api", "doctors", id]) => {
                let Some(index) = state.doctors.iter().position(|d| d.id == *id) else {
                    return problem(404, "Doctor not found", "Doctor with the specified ID does not exist");
                };
                state.doctors.remove(index);
                state.mappings.retain(|m| m.doctor_id != *id);
                reply(200, json!({ "message": "Doctor deleted successfully" }))
            }

            (Method::Get, ["api", "mappings"]) => reply(200, json!({ "mappings": state.mappings })),
            (Method::Post, ["api", "mappings"]) => create_mapping(&mut state, &user_id, &body),
            (Method::Get, ["api", "mappings", patient_id]) => {
                let Some(patient) = state.patients.iter().find(|p| p.id == *patient_id) else {
                    return problem(404, "Patient not found", "Patient with the specified ID does not exist");
                };
                if patient.created_by_user_id.as_deref() != Some(user_id.as_str()) {
                    return problem(403, "Access denied", "You can only view mappings for patients you created");
                }
                let mappings: Vec<&Assignment> = state
                    .mappings
                    .iter()
                    .filter(|m| m.patient_id == *patient_id)
                    .collect();
                reply(200, json!({ "mappings": mappings }))
            }
            (Method::Delete, ["api", "mappings", id]) => {
                let Some(index) = state.mappings.iter().position(|m| m.id == *id) else {
                    return problem(404, "Mapping not found", "Mapping with the specified ID does not exist");
                };
                state.mappings.remove(index);
                reply(200, json!({ "message": "Doctor removed from patient successfully" }))
            }

            _ => problem(404, "Not found", "The requested URL was not found on the server"),
        }
    }
}

#[async_trait]
impl Transport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let held = {
            let mut state = self.state.lock().expect("backend mutex poisoned");
            state.requests.push(request.clone());
            if state.transport_down {
                return Err(TransportError::Request("connection refused".to_string()));
            }
            state.held.take()
        };
        if let Some(gate) = held {
            gate.notified().await;
        }
        Ok(self.handle(&request))
    }
}

fn login(state: &mut BackendState, body: &Value) -> ApiResponse {
    let (Some(email), Some(password)) = (text(body, "email"), body.get("password").and_then(Value::as_str)) else {
        return problem(400, "Missing credentials", "Email and password are required");
    };
    let email = email.to_lowercase();
    let Some(user) = state
        .accounts
        .iter()
        .find(|a| a.user.email == email && a.password == password)
        .map(|a| a.user.clone())
    else {
        return problem(401, "Invalid credentials", "Invalid email or password");
    };
    let token = state.issue_token(&user.id);
    reply(
        200,
        json!({ "message": "Login successful", "user": user, "access_token": token }),
    )
}

fn register(state: &mut BackendState, body: &Value) -> ApiResponse {
    let (Some(name), Some(email), Some(password)) = (
        text(body, "name"),
        text(body, "email"),
        body.get("password").and_then(Value::as_str).map(str::to_string),
    ) else {
        return problem(400, "Missing required fields", "Name, email, and password are required");
    };
    let email = email.to_lowercase();
    if name.chars().count() < 2 {
        return problem(400, "Invalid name", "Name must be at least 2 characters long");
    }
    if password.chars().count() < 6 {
        return problem(400, "Invalid password", "Password must be at least 6 characters long");
    }
    if !email.contains('@') || !email.contains('.') {
        return problem(400, "Invalid email", "Please provide a valid email address");
    }
    if state.accounts.iter().any(|a| a.user.email == email) {
        return problem(409, "Email already exists", "A user with this email already exists");
    }

    let user = User {
        id: state.next_id("user"),
        name,
        email,
        created_at: Some(TIMESTAMP.to_string()),
    };
    state.accounts.push(Account {
        user: user.clone(),
        password,
    });
    let token = state.issue_token(&user.id);
    reply(
        201,
        json!({ "message": "User registered successfully", "user": user, "access_token": token }),
    )
}

fn check_patient_fields(body: &Value) -> Option<ApiResponse> {
    if let Some(name) = body.get("name") {
        if name.as_str().map(|n| n.trim().chars().count()).unwrap_or(0) < 2 {
            return Some(problem(400, "Invalid name", "Name must be at least 2 characters long"));
        }
    }
    if let Some(age) = body.get("age") {
        if !matches!(age.as_i64(), Some(0..=150)) {
            return Some(problem(400, "Invalid age", "Age must be a number between 0 and 150"));
        }
    }
    if let Some(gender) = body.get("gender") {
        let gender = gender.as_str().unwrap_or("").trim().to_lowercase();
        if !["male", "female", "other"].contains(&gender.as_str()) {
            return Some(problem(400, "Invalid gender", "Gender must be male, female, or other"));
        }
    }
    None
}

fn create_patient(state: &mut BackendState, user_id: &str, body: &Value) -> ApiResponse {
    if ["name", "age", "gender"].iter().any(|k| body.get(k).is_none()) {
        return problem(400, "Missing required fields", "Name, age, and gender are required");
    }
    if let Some(invalid) = check_patient_fields(body) {
        return invalid;
    }
    let patient = Patient {
        id: state.next_id("patient"),
        name: text(body, "name").unwrap_or_default(),
        age: body["age"].as_i64().unwrap_or_default(),
        gender: text(body, "gender").unwrap_or_default(),
        medical_history: body
            .get("medical_history")
            .and_then(Value::as_str)
            .map(str::to_string),
        created_by_user_id: Some(user_id.to_string()),
        created_at: Some(TIMESTAMP.to_string()),
        updated_at: Some(TIMESTAMP.to_string()),
    };
    state.patients.push(patient.clone());
    reply(201, json!({ "message": "Patient created successfully", "patient": patient }))
}

fn update_patient(state: &mut BackendState, user_id: &str, id: &str, body: &Value) -> ApiResponse {
    let Some(index) = state.patients.iter().position(|p| p.id == id) else {
        return problem(404, "Patient not found", "Patient with the specified ID does not exist");
    };
    if state.patients[index].created_by_user_id.as_deref() != Some(user_id) {
        return problem(403, "Access denied", "You can only update patients you created");
    }
    if let Some(invalid) = check_patient_fields(body) {
        return invalid;
    }
    let patient = &mut state.patients[index];
    if let Some(name) = text(body, "name") {
        patient.name = name;
    }
    if let Some(age) = body.get("age").and_then(Value::as_i64) {
        patient.age = age;
    }
    if let Some(gender) = text(body, "gender") {
        patient.gender = gender;
    }
    if let Some(history) = body.get("medical_history").and_then(Value::as_str) {
        patient.medical_history = Some(history.to_string());
    }
    let patient = patient.clone();
    reply(200, json!({ "message": "Patient updated successfully", "patient": patient }))
}

fn check_doctor_fields(body: &Value) -> Option<ApiResponse> {
    if let Some(name) = body.get("name") {
        if name.as_str().map(|n| n.trim().chars().count()).unwrap_or(0) < 2 {
            return Some(problem(400, "Invalid name", "Name must be at least 2 characters long"));
        }
    }
    if let Some(specialization) = body.get("specialization") {
        if specialization.as_str().map(|s| s.trim().chars().count()).unwrap_or(0) < 2 {
            return Some(problem(
                400,
                "Invalid specialization",
                "Specialization must be at least 2 characters long",
            ));
        }
    }
    if let Some(years) = body.get("experience_years") {
        if !matches!(years.as_i64(), Some(0..=60)) {
            return Some(problem(
                400,
                "Invalid experience",
                "Experience years must be a number between 0 and 60",
            ));
        }
    }
    None
}

fn create_doctor(state: &mut BackendState, body: &Value) -> ApiResponse {
    if ["name", "specialization", "experience_years"]
        .iter()
        .any(|k| body.get(k).is_none())
    {
        return problem(
            400,
            "Missing required fields",
            "Name, specialization, and experience_years are required",
        );
    }
    if let Some(invalid) = check_doctor_fields(body) {
        return invalid;
    }
    let doctor = Doctor {
        id: state.next_id("doctor"),
        name: text(body, "name").unwrap_or_default(),
        specialization: text(body, "specialization").unwrap_or_default(),
        experience_years: body["experience_years"].as_i64().unwrap_or_default(),
        contact_info: body
            .get("contact_info")
            .and_then(Value::as_str)
            .map(str::to_string),
        created_at: Some(TIMESTAMP.to_string()),
        updated_at: Some(TIMESTAMP.to_string()),
    };
    state.doctors.push(doctor.clone());
    reply(201, json!({ "message": "Doctor created successfully", "doctor": doctor }))
}

fn update_doctor(state: &mut BackendState, id: &str, body: &Value) -> ApiResponse {
    let Some(index) = state.doctors.iter().position(|d| d.id == id) else {
        return problem(404, "Doctor not found", "Doctor with the specified ID does not exist");
    };
    if let Some(invalid) = check_doctor_fields(body) {
        return invalid;
    }
    let doctor = &mut state.doctors[index];
    if let Some(name) = text(body, "name") {
        doctor.name = name;
    }
    if let Some(specialization) = text(body, "specialization") {
        doctor.specialization = specialization;
    }
    if let Some(years) = body.get("experience_years").and_then(Value::as_i64) {
        doctor.experience_years = years;
    }
    if let Some(contact) = body.get("contact_info").and_then(Value::as_str) {
        doctor.contact_info = Some(contact.to_string());
    }
    let doctor = doctor.clone();
    reply(200, json!({ "message": "Doctor updated successfully", "doctor": doctor }))
}

fn create_mapping(state: &mut BackendState, user_id: &str, body: &Value) -> ApiResponse {
    let (Some(patient_id), Some(doctor_id)) = (
        text(body, "patient_id").filter(|s| !s.is_empty()),
        text(body, "doctor_id").filter(|s| !s.is_empty()),
    ) else {
        return problem(400, "Missing required fields", "Patient ID and Doctor ID are required");
    };

    let Some(patient) = state.patients.iter().find(|p| p.id == patient_id).cloned() else {
        return problem(404, "Patient not found", "Patient with the specified ID does not exist");
    };
    if patient.created_by_user_id.as_deref() != Some(user_id) {
        return problem(403, "Access denied", "You can only assign doctors to patients you created");
    }
    let Some(doctor) = state.doctors.iter().find(|d| d.id == doctor_id).cloned() else {
        return problem(404, "Doctor not found", "Doctor with the specified ID does not exist");
    };
    if state
        .mappings
        .iter()
        .any(|m| m.patient_id == patient_id && m.doctor_id == doctor_id)
    {
        return problem(409, "Mapping already exists", "This doctor is already assigned to this patient");
    }

    let mapping = Assignment {
        id: state.next_id("mapping"),
        patient_id,
        doctor_id,
        patient_name: patient.name,
        doctor_name: doctor.name,
        assigned_by_user_id: Some(user_id.to_string()),
        created_at: TIMESTAMP.to_string(),
    };
    state.mappings.push(mapping.clone());
    reply(
        201,
        json!({ "message": "Doctor assigned to patient successfully", "mapping": mapping }),
    )
}
