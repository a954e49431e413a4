//! Login, registration, resume and logout against the auth endpoints

use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::session::SessionStore;
use crate::types::user::AuthResponse;
use crate::types::User;

#[derive(Clone)]
pub struct SessionService {
    api: ApiClient,
}

impl SessionService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        self.api.session()
    }

    /// Exchange credentials for a token and make it the active session.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let response = self.api.login(email, password).await?;
        tracing::info!("User logged in");
        Ok(self.accept(response))
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, ApiError> {
        let response = self.api.register(name, email, password).await?;
        tracing::info!("User registered");
        Ok(self.accept(response))
    }

    /// Resume a persisted session.
    ///
    /// The stored session is made active before validation so the `/me` call
    /// carries its token. Any failure clears it silently and yields `None`.
    pub async fn resume(&self) -> Option<User> {
        let store = self.store();
        let session = store.restore()?;
        store.set_active(session);

        match self.api.me().await {
            Ok(me) => {
                if let Err(e) = store.update_user(me.user.clone()) {
                    tracing::warn!("Failed to persist refreshed user: {}", e);
                }
                tracing::info!("Resumed stored session");
                Some(me.user)
            }
            Err(e) => {
                tracing::info!("Stored session rejected, clearing it: {}", e);
                if let Err(e) = store.clear() {
                    tracing::error!("Failed to clear stored session: {}", e);
                }
                // The interceptor may have flagged an expiry; resume stays silent.
                store.take_expired();
                None
            }
        }
    }

    /// Drop the in-memory and durable session.
    pub fn logout(&self) {
        if let Err(e) = self.store().clear() {
            tracing::error!("Failed to clear stored session: {}", e);
        }
        tracing::info!("User logged out");
    }

    fn accept(&self, response: AuthResponse) -> User {
        let user = response.user.clone();
        if let Err(e) = self.store().activate(response.access_token, response.user) {
            tracing::warn!("Session is active but could not be persisted: {}", e);
        }
        user
    }
}
