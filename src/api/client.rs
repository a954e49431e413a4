use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::error::ApiError;
use crate::api::transport::{ApiRequest, Method, Transport};
use crate::session::SessionStore;

/// JSON client for the records backend
///
/// Attaches `Authorization: Bearer <token>` whenever the session holds one.
/// Any 401 expires the session before the error is returned, so every caller
/// observes the same logout.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<SessionStore>) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.send(Method::Get, path, None).await?;
        Ok(serde_json::from_value(body)?)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let response = self.send(Method::Post, path, Some(body)).await?;
        Ok(serde_json::from_value(response)?)
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let response = self.send(Method::Put, path, Some(body)).await?;
        Ok(serde_json::from_value(response)?)
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.send(Method::Delete, path, None).await
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        let bearer = self.session.token();

        let response = self
            .transport
            .send(ApiRequest {
                method,
                path: path.to_string(),
                bearer,
                body,
            })
            .await
            .map_err(|e| {
                tracing::error!("{} {} failed: {}", method, path, e);
                ApiError::from(e)
            })?;

        if response.is_success() {
            return Ok(response.body);
        }

        if response.status == 401 {
            tracing::warn!("{} {} returned 401, expiring session", method, path);
            self.session.expire();
        } else {
            tracing::warn!("{} {} returned {}", method, path, response.status);
        }

        Err(ApiError::from_response(response.status, &response.body))
    }
}
