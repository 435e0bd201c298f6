//! Top-level application controller. The only driver of screen
//! transitions: user actions invoke session or vault operations, the
//! loading gate brackets every network-touching call, and each public
//! operation emits exactly one success/error notice.

use std::sync::Arc;

use tracing::debug;

use haven_core::models::{ItemDraft, UserProfile, VaultItem};

use crate::api::{LoginCredentials, UserApi, VaultApi};
use crate::loading::LoadingGate;
use crate::mailer::OtpMailer;
use crate::nav::{Navigator, Screen};
use crate::notify::{NoticeKind, Notifier};
use crate::reauth::{ReauthGate, ReauthOutcome, ReauthPolicy, ReauthState};
use crate::secure_storage::TokenStore;
use crate::session::{ResumeOutcome, SessionStore};
use crate::vault::{ReloadOutcome, VaultStore};

/// OTP sub-state of the login screen. A failed request leaves it
/// untouched, so the UI never advances to code entry without a sent code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginFlow {
    pub email: Option<String>,
    pub otp_sent: bool,
}

pub struct AppController {
    session: SessionStore,
    vault: VaultStore,
    nav: Navigator,
    reauth: ReauthGate,
    gate: LoadingGate,
    notifier: Arc<dyn Notifier>,
    login_flow: LoginFlow,
}

impl AppController {
    pub fn new(
        user_api: Arc<dyn UserApi>,
        vault_api: Arc<dyn VaultApi>,
        mailer: Arc<dyn OtpMailer>,
        tokens: Arc<dyn TokenStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::with_policy(
            user_api,
            vault_api,
            mailer,
            tokens,
            notifier,
            ReauthPolicy::default(),
        )
    }

    pub fn with_policy(
        user_api: Arc<dyn UserApi>,
        vault_api: Arc<dyn VaultApi>,
        mailer: Arc<dyn OtpMailer>,
        tokens: Arc<dyn TokenStore>,
        notifier: Arc<dyn Notifier>,
        policy: ReauthPolicy,
    ) -> Self {
        Self {
            session: SessionStore::new(user_api, mailer, tokens),
            vault: VaultStore::new(vault_api),
            nav: Navigator::new(),
            reauth: ReauthGate::new(policy),
            gate: LoadingGate::new(),
            notifier,
            login_flow: LoginFlow::default(),
        }
    }

    // ── Read-side accessors ──────────────────────────────────────────────────

    pub fn screen(&self) -> Screen {
        self.nav.screen()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.session.profile()
    }

    pub fn items(&self) -> &[VaultItem] {
        self.vault.items()
    }

    pub fn editing(&self) -> Option<&VaultItem> {
        self.nav.editing()
    }

    pub fn viewing(&self) -> Option<&VaultItem> {
        self.nav.viewing()
    }

    pub fn login_flow(&self) -> &LoginFlow {
        &self.login_flow
    }

    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    pub fn reauth_state(&self) -> ReauthState {
        self.reauth.state()
    }

    pub fn reauth_message(&self) -> Option<&str> {
        self.reauth.message()
    }

    fn success(&self, message: &str) {
        self.notifier.notify(NoticeKind::Success, message);
    }

    fn failure(&self, message: &str) {
        self.notifier.notify(NoticeKind::Error, message);
    }

    fn report_reload(&self, outcome: ReloadOutcome) {
        if outcome == ReloadOutcome::Failed {
            self.failure("Failed to load your passwords");
        }
    }

    fn token_cloned(&self) -> Option<String> {
        self.session.token().map(str::to_string)
    }

    // ── Boot ─────────────────────────────────────────────────────────────────

    /// Boot-time session resume. Silent when there is nothing to resume;
    /// notifies only when a stored session turned out to be expired, so a
    /// first visit and a lapsed session are distinguishable.
    pub async fn resume_session(&mut self) {
        let Some(_guard) = self.gate.begin() else {
            return;
        };
        match self.session.resume().await {
            ResumeOutcome::NoCredential => {}
            ResumeOutcome::Resumed => {
                self.nav.go_home();
                if let Some(token) = self.token_cloned() {
                    let outcome = self.vault.reload(&token).await;
                    self.report_reload(outcome);
                }
            }
            ResumeOutcome::Expired => {
                self.failure("Session expired. Please login again.");
            }
        }
    }

    // ── Authentication ───────────────────────────────────────────────────────

    pub async fn login(&mut self, credentials: LoginCredentials) {
        let Some(_guard) = self.gate.begin() else {
            return;
        };
        match self.session.login(&credentials).await {
            Ok(()) => {
                self.login_flow = LoginFlow::default();
                self.nav.go_home();
                let outcome = match self.token_cloned() {
                    Some(token) => self.vault.reload(&token).await,
                    None => ReloadOutcome::Failed,
                };
                self.success("Login successful!");
                self.report_reload(outcome);
            }
            Err(err) => self.failure(&err.to_string()),
        }
    }

    /// Mint a one-time code and dispatch it. Only a fully delivered code
    /// advances the login flow to code entry.
    pub async fn request_otp(&mut self, email: &str) {
        let Some(_guard) = self.gate.begin() else {
            return;
        };
        match self.session.request_otp(email).await {
            Ok(()) => {
                self.login_flow = LoginFlow {
                    email: Some(email.to_string()),
                    otp_sent: true,
                };
                self.success("OTP sent to your email!");
            }
            Err(err) => self.failure(&err.to_string()),
        }
    }

    pub async fn login_with_otp(&mut self, email: &str, code: &str) {
        if code.trim().is_empty() {
            self.failure("Please enter the OTP");
            return;
        }
        let Some(_guard) = self.gate.begin() else {
            return;
        };
        match self.session.verify_otp(email, code).await {
            Ok(()) => {
                self.login_flow = LoginFlow::default();
                self.nav.go_home();
                let outcome = match self.token_cloned() {
                    Some(token) => self.vault.reload(&token).await,
                    None => ReloadOutcome::Failed,
                };
                self.success("Login successful!");
                self.report_reload(outcome);
            }
            Err(err) => self.failure(&err.to_string()),
        }
    }

    /// Registration lands on home without a vault load: a fresh account
    /// has nothing to fetch.
    pub async fn register(&mut self, name: &str, email: &str, mobile: &str, password: &str) {
        let Some(_guard) = self.gate.begin() else {
            return;
        };
        match self.session.register(name, email, mobile, password).await {
            Ok(()) => {
                self.nav.go_home();
                self.success("Registration successful!");
            }
            Err(err) => self.failure(&err.to_string()),
        }
    }

    /// Synchronous and infallible: session, vault replica, and all
    /// navigation context are gone afterwards.
    pub fn logout(&mut self) {
        self.session.logout();
        self.vault.clear();
        self.login_flow = LoginFlow::default();
        self.reauth.reset();
        self.nav.reset();
        self.success("Logged out successfully");
    }

    pub async fn update_profile(
        &mut self,
        name: &str,
        email: &str,
        mobile: Option<&str>,
        old_password: &str,
        new_password: Option<&str>,
    ) {
        let Some(_guard) = self.gate.begin() else {
            return;
        };
        match self
            .session
            .update_profile(name, email, mobile, old_password, new_password)
            .await
        {
            Ok(()) => self.success("Profile updated successfully!"),
            Err(err) => self.failure(&err.to_string()),
        }
    }

    // ── Vault operations ─────────────────────────────────────────────────────

    /// Save the add-item form: update when an item is under edit, create
    /// otherwise. Validation failures block submission locally and never
    /// reach the network.
    pub async fn save_item(&mut self, draft: ItemDraft) {
        if let Err(err) = draft.validate() {
            self.failure(&err.to_string());
            return;
        }
        let Some(_guard) = self.gate.begin() else {
            return;
        };
        let Some(token) = self.token_cloned() else {
            self.failure("Not logged in");
            return;
        };
        let payload = draft.to_payload();
        let editing_id = self.nav.editing().map(|item| item.id.clone());
        let result = match &editing_id {
            Some(id) => self
                .vault
                .update(&token, id, &payload)
                .await
                .map(|outcome| (outcome, "Password updated successfully!")),
            None => self
                .vault
                .add(&token, &payload)
                .await
                .map(|outcome| (outcome, "Password saved successfully!")),
        };
        match result {
            Ok((outcome, message)) => {
                self.nav.close_add();
                self.success(message);
                self.report_reload(outcome);
            }
            // The form stays up with its edit context intact for a retry.
            Err(err) => self.failure(&err.to_string()),
        }
    }

    pub async fn delete_item(&mut self, id: &str) {
        let Some(_guard) = self.gate.begin() else {
            return;
        };
        let Some(token) = self.token_cloned() else {
            self.failure("Not logged in");
            return;
        };
        match self.vault.delete(&token, id).await {
            Ok(outcome) => {
                // An orphaned detail view would outlive its item.
                if self.nav.viewing().is_some_and(|item| item.id == id) {
                    self.nav.go_home();
                }
                self.success("Password deleted successfully!");
                self.report_reload(outcome);
            }
            Err(err) => self.failure(&err.to_string()),
        }
    }

    // ── Navigation and reauth ────────────────────────────────────────────────

    pub fn open_login(&mut self) {
        self.nav.open_login();
    }

    pub fn open_register(&mut self) {
        self.nav.open_register();
    }

    pub fn back_to_welcome(&mut self) {
        self.nav.back_to_welcome();
    }

    pub fn back_home(&mut self) {
        self.nav.go_home();
    }

    pub fn open_add(&mut self) {
        self.nav.open_add();
    }

    pub fn close_add(&mut self) {
        self.nav.close_add();
    }

    pub fn open_profile(&mut self) {
        self.nav.open_profile();
    }

    pub fn view_item(&mut self, id: &str) {
        match self.vault.find(id).cloned() {
            Some(item) => self.nav.view_item(item),
            None => debug!("view requested for unknown item {id}"),
        }
    }

    /// Request an edit of an existing item; the reauth screen interposes
    /// itself before the form opens.
    pub fn request_edit(&mut self, id: &str) {
        match self.vault.find(id).cloned() {
            Some(item) => {
                self.reauth.reset();
                self.nav.request_edit(item);
            }
            None => debug!("edit requested for unknown item {id}"),
        }
    }

    /// One reauth attempt. A grant is consumed immediately: the pending
    /// item moves into edit mode and the gate resets.
    pub fn submit_reauth(&mut self, passphrase: &str) {
        if self.nav.screen() != Screen::Reauth {
            return;
        }
        if let ReauthOutcome::Granted = self.reauth.submit(passphrase) {
            self.nav.grant_edit();
        }
    }

    pub fn cancel_reauth(&mut self) {
        self.reauth.reset();
        self.nav.cancel_reauth();
    }
}
