//! HTTP client adapter
//!
//! Every backend call goes through [`ApiClient`], which injects the bearer token
//! and turns unauthorized responses into a session expiry.

pub mod auth;
pub mod client;
pub mod error;
pub mod transport;

pub use client::ApiClient;
pub use error::{ApiError, TransportError};
pub use transport::{ApiRequest, ApiResponse, Method, ReqwestTransport, Transport};
