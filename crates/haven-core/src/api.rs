//! Request/response types for the user and vault services. These map
//! directly to JSON bodies on the wire. Server-side names differ from the
//! client model (`mobile_number` vs `mobile`, `_id` vs `id`); the
//! translation happens here and in [`crate::models`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── User service ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub mobile_number: String,
    pub password: String,
}

/// Password login carries exactly one of `email` / `mobile_number`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpVerifyRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub mobile_number: Option<String>,
}

/// The minted one-time code, returned by the service for out-of-band
/// delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpMintResponse {
    pub otp: OtpCode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpCode {
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdateRequest {
    pub name: String,
    pub email: String,
    pub mobile_number: String,
    #[serde(rename = "oldPassword")]
    pub old_password: String,
    #[serde(rename = "newPassword", skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

// ── Vault service ────────────────────────────────────────────────────────────

/// Outbound item body. The service expects every field present; absent
/// client-side optionals are sent as empty strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultItemPayload {
    pub platform: String,
    pub email: String,
    pub mobile_number: String,
    pub username: String,
    pub password: String,
}

/// Inbound item record. Lenient on the id field (`_id` or `id`) and on
/// timestamps, which older service versions omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VaultItemRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub mongo_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: String,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl VaultItemRecord {
    /// The durable id, whichever field the service used for it.
    pub fn item_id(&self) -> Option<&str> {
        self.mongo_id.as_deref().or(self.id.as_deref())
    }
}

/// Extract the item list from a `getallItems` response body. The service
/// has shipped both a wrapper object (`{"items": [...]}`) and a bare
/// array; any other shape yields `None`. Records that fail to parse are
/// skipped rather than failing the whole list.
pub fn items_from_response(body: &Value) -> Option<Vec<VaultItemRecord>> {
    let list = body.get("items").unwrap_or(body);
    let entries = list.as_array()?;
    Some(
        entries
            .iter()
            .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrapped_and_bare_lists_both_parse() {
        let record = json!({"_id": "a1", "platform": "Gmail", "password": "p"});
        let wrapped = json!({"items": [record.clone()]});
        let bare = json!([record]);

        let from_wrapped = items_from_response(&wrapped).unwrap();
        let from_bare = items_from_response(&bare).unwrap();
        assert_eq!(from_wrapped.len(), 1);
        assert_eq!(from_bare.len(), 1);
        assert_eq!(from_wrapped[0].item_id(), Some("a1"));
    }

    #[test]
    fn non_list_shapes_yield_none() {
        assert!(items_from_response(&json!({"status": "ok"})).is_none());
        assert!(items_from_response(&json!("nope")).is_none());
        assert!(items_from_response(&json!({"items": null})).is_none());
    }

    #[test]
    fn id_falls_back_to_plain_field() {
        let record: VaultItemRecord =
            serde_json::from_value(json!({"id": "b2", "platform": "x", "password": "y"})).unwrap();
        assert_eq!(record.item_id(), Some("b2"));
    }

    #[test]
    fn login_request_serializes_one_identifier() {
        let by_email = LoginRequest {
            email: Some("a@x.com".into()),
            mobile_number: None,
            password: "pw".into(),
        };
        let body = serde_json::to_value(&by_email).unwrap();
        assert_eq!(body.get("email").unwrap(), "a@x.com");
        assert!(body.get("mobile_number").is_none());
    }

    #[test]
    fn profile_update_uses_server_field_names() {
        let request = ProfileUpdateRequest {
            name: "Ada".into(),
            email: "ada@x.com".into(),
            mobile_number: "+1000".into(),
            old_password: "secret1".into(),
            new_password: None,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("oldPassword").is_some());
        assert!(body.get("newPassword").is_none());
    }
}
