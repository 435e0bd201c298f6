//! Out-of-band delivery of minted one-time codes.

use async_trait::async_trait;
use tracing::warn;

use haven_core::error::AppError;

use crate::config::MailConfig;

/// Delivery channel for one-time codes. A failure here is distinguishable
/// from "code not minted": the code already exists server-side.
#[async_trait]
pub trait OtpMailer: Send + Sync {
    async fn deliver(&self, recipient: &str, code: &str) -> Result<(), AppError>;
}

/// Dispatches codes through a transactional-email send endpoint
/// (EmailJS-style: service id, template id, public key).
#[derive(Clone)]
pub struct EmailJsMailer {
    client: reqwest::Client,
    endpoint: String,
    service_id: String,
    template_id: String,
    public_key: String,
}

impl EmailJsMailer {
    pub fn new(client: reqwest::Client, mail: &MailConfig) -> Self {
        Self {
            client,
            endpoint: mail.endpoint.clone(),
            service_id: mail.service_id.clone(),
            template_id: mail.template_id.clone(),
            public_key: mail.public_key.clone(),
        }
    }
}

#[async_trait]
impl OtpMailer for EmailJsMailer {
    async fn deliver(&self, recipient: &str, code: &str) -> Result<(), AppError> {
        let res = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({
                "service_id": self.service_id,
                "template_id": self.template_id,
                "user_id": self.public_key,
                "template_params": {
                    "email": recipient,
                    "passcode": code,
                },
            }))
            .send()
            .await
            .map_err(|e| AppError::OtpDispatch(e.to_string()))?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            warn!("otp mail dispatch failed ({status}): {body}");
            return Err(AppError::OtpDispatch(format!(
                "delivery service returned {status}"
            )));
        }
        Ok(())
    }
}
