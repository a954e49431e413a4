//! Auth endpoints

use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::types::user::{AuthResponse, LoginRequest, MeResponse, RegisterRequest};

impl ApiClient {
    /// `POST /api/auth/login`
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("/api/auth/login", &request).await
    }

    /// `POST /api/auth/register`
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("/api/auth/register", &request).await
    }

    /// `GET /api/auth/me`
    pub async fn me(&self) -> Result<MeResponse, ApiError> {
        self.get("/api/auth/me").await
    }
}
