//! Runtime configuration for the controller binary.

use serde::{Deserialize, Serialize};

/// Transactional-email dispatch settings for OTP delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub user_api_url: String,
    pub vault_api_url: String,
    /// Per-request timeout. Bounds every remote call so a hung request
    /// fails the operation instead of wedging the loading gate.
    pub request_timeout_secs: u64,
    pub mail: MailConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_api_url: "https://haven-vault.onrender.com/api/user".into(),
            vault_api_url: "https://haven-vault.onrender.com/api/vault".into(),
            request_timeout_secs: 30,
            mail: MailConfig {
                endpoint: "https://api.emailjs.com/api/v1.0/email/send".into(),
                service_id: "service_haven".into(),
                template_id: "template_otp".into(),
                public_key: "8kQzXjW2vYpL1nRda".into(),
            },
        }
    }
}
