//! reqwest-backed clients for the user and vault services.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde_json::Value;
use tracing::warn;

use haven_core::api::{
    AuthResponse, LoginRequest, OtpMintResponse, OtpRequest, OtpVerifyRequest,
    ProfileUpdateRequest, RegisterRequest, UserRecord, VaultItemPayload,
};
use haven_core::error::AppError;

use crate::api::{LoginCredentials, LoginId, UserApi, VaultApi};

/// Build the shared HTTP client. The request timeout bounds every remote
/// call so a dead server fails the operation instead of hanging the
/// loading gate.
pub fn build_http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("haven-app/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .expect("reqwest client")
}

fn net_err(err: reqwest::Error) -> AppError {
    AppError::Network(err.to_string())
}

/// Best-effort extraction of the server's `message` field from a non-2xx
/// body, falling back to a generic message.
async fn error_message(res: Response) -> String {
    let status = res.status();
    let body: Value = res.json().await.unwrap_or_default();
    let message = body
        .get("message")
        .and_then(|v| v.as_str())
        .unwrap_or("Something went wrong");
    warn!("server returned {status}: {message}");
    message.to_string()
}

#[derive(Clone)]
pub struct HttpUserApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUserApi {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn register(
        &self,
        name: &str,
        email: &str,
        mobile: &str,
        password: &str,
    ) -> Result<AuthResponse, AppError> {
        let res = self
            .client
            .post(format!("{}/register", self.base_url))
            .json(&RegisterRequest {
                name: name.to_string(),
                email: email.to_string(),
                mobile_number: mobile.to_string(),
                password: password.to_string(),
            })
            .send()
            .await
            .map_err(net_err)?;
        if !res.status().is_success() {
            return Err(AppError::Auth(error_message(res).await));
        }
        res.json().await.map_err(net_err)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, AppError> {
        let (email, mobile_number) = match &credentials.id {
            LoginId::Email(email) => (Some(email.clone()), None),
            LoginId::Mobile(mobile) => (None, Some(mobile.clone())),
        };
        let res = self
            .client
            .post(format!("{}/login", self.base_url))
            .json(&LoginRequest {
                email,
                mobile_number,
                password: credentials.password.clone(),
            })
            .send()
            .await
            .map_err(net_err)?;
        if !res.status().is_success() {
            return Err(AppError::Auth(error_message(res).await));
        }
        res.json().await.map_err(net_err)
    }

    async fn request_otp(&self, email: &str) -> Result<OtpMintResponse, AppError> {
        let res = self
            .client
            .post(format!("{}/login/otp/request", self.base_url))
            .json(&OtpRequest {
                email: email.to_string(),
            })
            .send()
            .await
            .map_err(net_err)?;
        if !res.status().is_success() {
            return Err(AppError::Auth(error_message(res).await));
        }
        res.json().await.map_err(net_err)
    }

    async fn verify_otp(&self, email: &str, code: &str) -> Result<AuthResponse, AppError> {
        let res = self
            .client
            .post(format!("{}/login/otp/verify", self.base_url))
            .json(&OtpVerifyRequest {
                email: email.to_string(),
                otp: code.to_string(),
            })
            .send()
            .await
            .map_err(net_err)?;
        if !res.status().is_success() {
            // The service rejects wrong and expired codes alike.
            let status = res.status();
            let message = error_message(res).await;
            warn!("otp verification rejected ({status}): {message}");
            return Err(AppError::OtpInvalid);
        }
        res.json().await.map_err(net_err)
    }

    async fn get_profile(&self, token: &str) -> Result<UserRecord, AppError> {
        let res = self
            .client
            .get(format!("{}/profile", self.base_url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(net_err)?;
        if !res.status().is_success() {
            return Err(AppError::Auth(error_message(res).await));
        }
        res.json().await.map_err(net_err)
    }

    async fn update_profile(
        &self,
        token: &str,
        request: &ProfileUpdateRequest,
    ) -> Result<(), AppError> {
        let res = self
            .client
            .put(format!("{}/profile/update", self.base_url))
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .map_err(net_err)?;
        if !res.status().is_success() {
            return Err(AppError::Auth(error_message(res).await));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct HttpVaultApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpVaultApi {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn check(&self, res: Response) -> Result<Response, AppError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let message = error_message(res).await;
        Err(match status {
            StatusCode::NOT_FOUND => AppError::NotFound(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Auth(message),
            _ => AppError::Network(message),
        })
    }
}

#[async_trait]
impl VaultApi for HttpVaultApi {
    async fn add_item(&self, token: &str, payload: &VaultItemPayload) -> Result<(), AppError> {
        let res = self
            .client
            .post(format!("{}/addItem", self.base_url))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await
            .map_err(net_err)?;
        self.check(res).await?;
        Ok(())
    }

    async fn update_item(
        &self,
        token: &str,
        id: &str,
        payload: &VaultItemPayload,
    ) -> Result<(), AppError> {
        let res = self
            .client
            .put(format!("{}/updateItem/{id}", self.base_url))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await
            .map_err(net_err)?;
        self.check(res).await?;
        Ok(())
    }

    async fn get_all_items(&self, token: &str) -> Result<Value, AppError> {
        let res = self
            .client
            .get(format!("{}/getallItems", self.base_url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(net_err)?;
        let res = self.check(res).await?;
        res.json().await.map_err(net_err)
    }

    async fn delete_item(&self, token: &str, id: &str) -> Result<(), AppError> {
        let res = self
            .client
            .delete(format!("{}/deleteItem/{id}", self.base_url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(net_err)?;
        self.check(res).await?;
        Ok(())
    }
}
