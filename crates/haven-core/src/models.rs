//! Client-side models and the wire↔model normalization rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{UserRecord, VaultItemPayload, VaultItemRecord};
use crate::error::AppError;
use crate::icons::icon_for_platform;

/// The authenticated user. Exists only while the bearer token does; the
/// two are set and cleared together by the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub mobile: Option<String>,
}

impl UserProfile {
    pub fn from_record(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            mobile: non_empty(record.mobile_number),
        }
    }
}

/// A stored credential entry as held client-side. Always a replica of
/// server state; `icon` is derived locally and never crosses the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultItem {
    pub id: String,
    pub platform: String,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub username: Option<String>,
    pub password: String,
    pub icon: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl VaultItem {
    /// Normalize a wire record into the client model. Records without an
    /// id or with an empty platform/password violate the item invariant
    /// and are dropped.
    pub fn from_record(record: VaultItemRecord) -> Option<Self> {
        let id = record.item_id()?.to_string();
        if record.platform.is_empty() || record.password.is_empty() {
            return None;
        }
        Some(Self {
            id,
            icon: icon_for_platform(&record.platform).to_string(),
            platform: record.platform,
            email: non_empty(record.email),
            mobile: non_empty(record.mobile_number),
            username: non_empty(record.username),
            password: record.password,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

/// Form-side draft of a vault item. Optional fields left blank stay
/// absent; they are only widened to empty strings at the wire boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub platform: String,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub username: Option<String>,
    pub password: String,
    /// Manual icon override. When absent, the display icon is derived
    /// from the platform.
    pub icon: Option<String>,
}

impl ItemDraft {
    /// Prefill the form for editing an existing item.
    pub fn from_item(item: &VaultItem) -> Self {
        Self {
            platform: item.platform.clone(),
            email: item.email.clone(),
            mobile: item.mobile.clone(),
            username: item.username.clone(),
            password: item.password.clone(),
            icon: Some(item.icon.clone()),
        }
    }

    /// Update the platform, auto-suggesting an icon when the user has not
    /// set one. A previously suggested or manually entered icon is kept.
    pub fn set_platform(&mut self, platform: &str) {
        if self.icon.is_none() && !platform.is_empty() {
            self.icon = Some(icon_for_platform(platform).to_string());
        }
        self.platform = platform.to_string();
    }

    /// Icon shown in the form: the override, or the derived glyph.
    pub fn display_icon(&self) -> String {
        self.icon
            .clone()
            .unwrap_or_else(|| icon_for_platform(&self.platform).to_string())
    }

    /// Client-side precondition for add/update: platform and password are
    /// required. Never reaches the network on failure.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.platform.trim().is_empty() {
            return Err(AppError::required("Platform name"));
        }
        if self.password.trim().is_empty() {
            return Err(AppError::required("Password"));
        }
        Ok(())
    }

    /// Widen to the wire format (absent optionals become empty strings).
    pub fn to_payload(&self) -> VaultItemPayload {
        VaultItemPayload {
            platform: self.platform.clone(),
            email: self.email.clone().unwrap_or_default(),
            mobile_number: self.mobile.clone().unwrap_or_default(),
            username: self.username.clone().unwrap_or_default(),
            password: self.password.clone(),
        }
    }
}

/// An inbound empty string means "not set". Keeping it as `Some("")`
/// would make a legitimately absent field look populated.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
