//! Session lifecycle: login, OTP login, registration, boot-time resume,
//! logout, and step-up profile updates. The profile and the bearer token
//! are set and cleared together; the persistent token store mirrors the
//! in-memory token 1:1.

use std::sync::Arc;

use tracing::{info, warn};

use haven_core::api::ProfileUpdateRequest;
use haven_core::error::AppError;
use haven_core::models::UserProfile;

use crate::api::{LoginCredentials, UserApi};
use crate::mailer::OtpMailer;
use crate::secure_storage::TokenStore;

/// Result of the boot-time resume check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeOutcome {
    /// No stored credential: first visit, or a previous explicit logout.
    NoCredential,
    /// Stored credential accepted; session restored.
    Resumed,
    /// Stored credential rejected and discarded.
    Expired,
}

pub struct SessionStore {
    api: Arc<dyn UserApi>,
    mailer: Arc<dyn OtpMailer>,
    tokens: Arc<dyn TokenStore>,
    profile: Option<UserProfile>,
    token: Option<String>,
}

impl SessionStore {
    pub fn new(
        api: Arc<dyn UserApi>,
        mailer: Arc<dyn OtpMailer>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        Self {
            api,
            mailer,
            tokens,
            profile: None,
            token: None,
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn establish(&mut self, token: String, profile: UserProfile) {
        self.tokens.set(&token);
        self.token = Some(token);
        self.profile = Some(profile);
    }

    pub async fn login(&mut self, credentials: &LoginCredentials) -> Result<(), AppError> {
        let res = self.api.login(credentials).await?;
        info!("login ok for user {}", res.user.id);
        self.establish(res.token, UserProfile::from_record(res.user));
        Ok(())
    }

    /// Mint a code server-side, then dispatch it out of band. A dispatch
    /// failure leaves a live code on the server; retrying mints a
    /// superseding one, so the operation is idempotent for the caller.
    pub async fn request_otp(&self, email: &str) -> Result<(), AppError> {
        let minted = self.api.request_otp(email).await?;
        self.mailer.deliver(email, &minted.otp.code).await
    }

    pub async fn verify_otp(&mut self, email: &str, code: &str) -> Result<(), AppError> {
        let res = self.api.verify_otp(email, code).await?;
        info!("otp login ok for user {}", res.user.id);
        self.establish(res.token, UserProfile::from_record(res.user));
        Ok(())
    }

    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        mobile: &str,
        password: &str,
    ) -> Result<(), AppError> {
        let res = self.api.register(name, email, mobile, password).await?;
        info!("registered user {}", res.user.id);
        self.establish(res.token, UserProfile::from_record(res.user));
        Ok(())
    }

    /// Boot-time check. A missing credential is an expected shape and
    /// stays silent; a present-but-rejected credential is discarded so
    /// the next boot is a clean miss.
    pub async fn resume(&mut self) -> ResumeOutcome {
        let Some(token) = self.tokens.get() else {
            return ResumeOutcome::NoCredential;
        };
        match self.api.get_profile(&token).await {
            Ok(user) => {
                self.token = Some(token);
                self.profile = Some(UserProfile::from_record(user));
                ResumeOutcome::Resumed
            }
            Err(err) => {
                warn!("session resume rejected: {err}");
                self.tokens.remove();
                self.token = None;
                self.profile = None;
                ResumeOutcome::Expired
            }
        }
    }

    /// Clears the credential and profile together. Cannot fail.
    pub fn logout(&mut self) {
        self.tokens.remove();
        self.token = None;
        self.profile = None;
    }

    /// Step-up profile update: the current password rides along as the
    /// confirming credential. On success the in-memory profile is
    /// replaced with the values that were sent, not re-fetched.
    pub async fn update_profile(
        &mut self,
        name: &str,
        email: &str,
        mobile: Option<&str>,
        old_password: &str,
        new_password: Option<&str>,
    ) -> Result<(), AppError> {
        if let Some(new_password) = new_password {
            if new_password.len() < 6 {
                return Err(AppError::validation(
                    "New password must be at least 6 characters",
                ));
            }
        }
        let token = self
            .token
            .clone()
            .ok_or_else(|| AppError::Auth("Not logged in".to_string()))?;
        let request = ProfileUpdateRequest {
            name: name.to_string(),
            email: email.to_string(),
            mobile_number: mobile.unwrap_or_default().to_string(),
            old_password: old_password.to_string(),
            new_password: new_password.map(str::to_string),
        };
        self.api.update_profile(&token, &request).await?;
        if let Some(profile) = self.profile.as_mut() {
            profile.name = name.to_string();
            profile.email = email.to_string();
            profile.mobile = mobile.map(str::to_string).filter(|m| !m.is_empty());
        }
        Ok(())
    }
}
