//! Service seams for the two remote services. The controller and stores
//! only see these traits; production wires in the reqwest clients from
//! [`crate::api_client`], tests wire in in-memory fakes.

use async_trait::async_trait;
use serde_json::Value;

use haven_core::api::{
    AuthResponse, OtpMintResponse, ProfileUpdateRequest, UserRecord, VaultItemPayload,
};
use haven_core::error::AppError;

/// The identifier half of a password login.
#[derive(Debug, Clone)]
pub enum LoginId {
    Email(String),
    Mobile(String),
}

#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub id: LoginId,
    pub password: String,
}

impl LoginCredentials {
    pub fn by_email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: LoginId::Email(email.into()),
            password: password.into(),
        }
    }

    pub fn by_mobile(mobile: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: LoginId::Mobile(mobile.into()),
            password: password.into(),
        }
    }
}

/// Remote user/auth service. Bearer token required on the profile calls.
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn register(
        &self,
        name: &str,
        email: &str,
        mobile: &str,
        password: &str,
    ) -> Result<AuthResponse, AppError>;

    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, AppError>;

    /// Mint a one-time code for `email`. The code is returned for
    /// out-of-band delivery; it is not sent by the service itself.
    async fn request_otp(&self, email: &str) -> Result<OtpMintResponse, AppError>;

    async fn verify_otp(&self, email: &str, code: &str) -> Result<AuthResponse, AppError>;

    async fn get_profile(&self, token: &str) -> Result<UserRecord, AppError>;

    async fn update_profile(
        &self,
        token: &str,
        request: &ProfileUpdateRequest,
    ) -> Result<(), AppError>;
}

/// Remote vault storage service. Bearer token required on every call.
#[async_trait]
pub trait VaultApi: Send + Sync {
    async fn add_item(&self, token: &str, payload: &VaultItemPayload) -> Result<(), AppError>;

    async fn update_item(
        &self,
        token: &str,
        id: &str,
        payload: &VaultItemPayload,
    ) -> Result<(), AppError>;

    /// Returns the raw response body; the vault store is responsible for
    /// tolerating the shapes the service has shipped over time.
    async fn get_all_items(&self, token: &str) -> Result<Value, AppError>;

    async fn delete_item(&self, token: &str, id: &str) -> Result<(), AppError>;
}
