//! In-memory replica of the remote vault item list. Every mutation is
//! followed by a full reload, so the list is authoritative-after-mutation
//! and never locally patched.

use std::sync::Arc;

use tracing::{error, warn};

use haven_core::api::{items_from_response, VaultItemPayload};
use haven_core::error::AppError;
use haven_core::models::VaultItem;

use crate::api::VaultApi;

/// How a reload settled. `Malformed` and `Failed` both leave an empty
/// list; only `Failed` warrants a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    Synced,
    Malformed,
    Failed,
}

pub struct VaultStore {
    api: Arc<dyn VaultApi>,
    items: Vec<VaultItem>,
}

impl VaultStore {
    pub fn new(api: Arc<dyn VaultApi>) -> Self {
        Self {
            api,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[VaultItem] {
        &self.items
    }

    pub fn find(&self, id: &str) -> Option<&VaultItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Drop the replica (logout path).
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Full refresh from the server. Never fails the caller: an
    /// unexpected shape or a failed fetch resolves to an empty list
    /// rather than leaving a stale one visible.
    pub async fn reload(&mut self, token: &str) -> ReloadOutcome {
        let body = match self.api.get_all_items(token).await {
            Ok(body) => body,
            Err(err) => {
                error!("vault reload failed: {err}");
                self.items.clear();
                return ReloadOutcome::Failed;
            }
        };
        match items_from_response(&body) {
            Some(records) => {
                self.items = records
                    .into_iter()
                    .filter_map(VaultItem::from_record)
                    .collect();
                ReloadOutcome::Synced
            }
            None => {
                warn!("vault list response had an unexpected shape; showing no items");
                self.items.clear();
                ReloadOutcome::Malformed
            }
        }
    }

    /// Create on the server, then re-sync. The new item is never shown
    /// before the reload completes.
    pub async fn add(
        &mut self,
        token: &str,
        payload: &VaultItemPayload,
    ) -> Result<ReloadOutcome, AppError> {
        self.api.add_item(token, payload).await?;
        Ok(self.reload(token).await)
    }

    pub async fn update(
        &mut self,
        token: &str,
        id: &str,
        payload: &VaultItemPayload,
    ) -> Result<ReloadOutcome, AppError> {
        self.api.update_item(token, id, payload).await?;
        Ok(self.reload(token).await)
    }

    pub async fn delete(&mut self, token: &str, id: &str) -> Result<ReloadOutcome, AppError> {
        self.api.delete_item(token, id).await?;
        Ok(self.reload(token).await)
    }
}
