//! Account types
//!
//! The authenticated user and the credential payloads exchanged with the auth endpoints.

use serde::{Deserialize, Serialize};

/// Authenticated account as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `POST /api/auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/auth/register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Successful login/register response
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `GET /api/auth/me`
#[derive(Debug, Clone, Deserialize)]
pub struct MeResponse {
    pub user: User,
}
