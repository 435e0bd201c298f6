//! Persistent storage for the bearer token.

use keyring::Entry;
use tracing::{debug, warn};

const SERVICE_NAME: &str = "HavenVault";
const TOKEN_KEY: &str = "auth_token";

/// One opaque value, lifecycle tied 1:1 to the session. Persistence is
/// best-effort: a write failure degrades to an in-memory session that
/// will not survive a restart, never to a failed login.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn remove(&self);
}

/// Keeps the token in the OS keyring.
pub struct KeyringTokenStore;

impl KeyringTokenStore {
    fn entry() -> Option<Entry> {
        match Entry::new(SERVICE_NAME, TOKEN_KEY) {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("keyring init: {err}");
                None
            }
        }
    }
}

impl TokenStore for KeyringTokenStore {
    fn get(&self) -> Option<String> {
        Self::entry()?.get_password().ok()
    }

    fn set(&self, token: &str) {
        if let Some(entry) = Self::entry() {
            if let Err(err) = entry.set_password(token) {
                warn!("store token: {err}");
            }
        }
    }

    fn remove(&self) {
        if let Some(entry) = Self::entry() {
            // Deleting an absent entry is not an error worth surfacing.
            if let Err(err) = entry.delete_password() {
                debug!("delete token: {err}");
            }
        }
    }
}
