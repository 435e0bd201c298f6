//! In-memory fakes of the controller's collaborators.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

use haven_app::api::{LoginCredentials, UserApi, VaultApi};
use haven_app::controller::AppController;
use haven_app::mailer::OtpMailer;
use haven_app::notify::{NoticeKind, Notifier};
use haven_app::secure_storage::TokenStore;
use haven_core::api::{
    AuthResponse, OtpCode, OtpMintResponse, ProfileUpdateRequest, UserRecord, VaultItemPayload,
};
use haven_core::error::AppError;

pub const TEST_TOKEN: &str = "tok-1";
pub const TEST_OTP: &str = "482913";

fn ada() -> UserRecord {
    UserRecord {
        id: "u1".to_string(),
        name: "Ada".to_string(),
        email: "ada@x.com".to_string(),
        mobile_number: Some("+1000".to_string()),
    }
}

pub struct FakeUserApi {
    pub login_ok: AtomicBool,
    pub register_ok: AtomicBool,
    pub mint_ok: AtomicBool,
    pub verify_ok: AtomicBool,
    pub profile_ok: AtomicBool,
    pub update_ok: AtomicBool,
    pub mint_calls: AtomicUsize,
    pub last_update: Mutex<Option<ProfileUpdateRequest>>,
}

impl FakeUserApi {
    pub fn new() -> Self {
        Self {
            login_ok: AtomicBool::new(true),
            register_ok: AtomicBool::new(true),
            mint_ok: AtomicBool::new(true),
            verify_ok: AtomicBool::new(true),
            profile_ok: AtomicBool::new(true),
            update_ok: AtomicBool::new(true),
            mint_calls: AtomicUsize::new(0),
            last_update: Mutex::new(None),
        }
    }
}

#[async_trait]
impl UserApi for FakeUserApi {
    async fn register(
        &self,
        name: &str,
        email: &str,
        mobile: &str,
        _password: &str,
    ) -> Result<AuthResponse, AppError> {
        if !self.register_ok.load(Ordering::SeqCst) {
            return Err(AppError::Auth("Email already registered".to_string()));
        }
        Ok(AuthResponse {
            token: TEST_TOKEN.to_string(),
            user: UserRecord {
                id: "u1".to_string(),
                name: name.to_string(),
                email: email.to_string(),
                mobile_number: Some(mobile.to_string()),
            },
        })
    }

    async fn login(&self, _credentials: &LoginCredentials) -> Result<AuthResponse, AppError> {
        if !self.login_ok.load(Ordering::SeqCst) {
            return Err(AppError::Auth("Invalid credentials".to_string()));
        }
        Ok(AuthResponse {
            token: TEST_TOKEN.to_string(),
            user: ada(),
        })
    }

    async fn request_otp(&self, _email: &str) -> Result<OtpMintResponse, AppError> {
        self.mint_calls.fetch_add(1, Ordering::SeqCst);
        if !self.mint_ok.load(Ordering::SeqCst) {
            return Err(AppError::Auth("No account for that email".to_string()));
        }
        Ok(OtpMintResponse {
            otp: OtpCode {
                code: TEST_OTP.to_string(),
            },
        })
    }

    async fn verify_otp(&self, _email: &str, code: &str) -> Result<AuthResponse, AppError> {
        if !self.verify_ok.load(Ordering::SeqCst) || code != TEST_OTP {
            return Err(AppError::OtpInvalid);
        }
        Ok(AuthResponse {
            token: TEST_TOKEN.to_string(),
            user: ada(),
        })
    }

    async fn get_profile(&self, _token: &str) -> Result<UserRecord, AppError> {
        if !self.profile_ok.load(Ordering::SeqCst) {
            return Err(AppError::Auth("jwt expired".to_string()));
        }
        Ok(ada())
    }

    async fn update_profile(
        &self,
        _token: &str,
        request: &ProfileUpdateRequest,
    ) -> Result<(), AppError> {
        if !self.update_ok.load(Ordering::SeqCst) {
            return Err(AppError::Auth("Old password incorrect".to_string()));
        }
        *self.last_update.lock() = Some(request.clone());
        Ok(())
    }
}

/// In-memory stand-in for the vault service, storing records the way the
/// real one does (empty strings for blank optionals, `_id` for the id).
pub struct FakeVaultApi {
    pub records: Mutex<Vec<Value>>,
    next_id: AtomicUsize,
    /// Respond with `{"items": [...]}` when set, a bare array otherwise.
    pub wrap_response: AtomicBool,
    pub fail_fetch: AtomicBool,
    pub malformed: AtomicBool,
    pub fetch_calls: AtomicUsize,
}

impl FakeVaultApi {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
            wrap_response: AtomicBool::new(true),
            fail_fetch: AtomicBool::new(false),
            malformed: AtomicBool::new(false),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    pub fn seed(&self, platform: &str, password: &str) -> String {
        let id = format!("srv-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.records.lock().push(json!({
            "_id": id,
            "platform": platform,
            "email": "",
            "mobile_number": "",
            "username": "",
            "password": password,
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00Z",
        }));
        id
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().len()
    }
}

#[async_trait]
impl VaultApi for FakeVaultApi {
    async fn add_item(&self, _token: &str, payload: &VaultItemPayload) -> Result<(), AppError> {
        let id = format!("srv-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.records.lock().push(json!({
            "_id": id,
            "platform": payload.platform,
            "email": payload.email,
            "mobile_number": payload.mobile_number,
            "username": payload.username,
            "password": payload.password,
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00Z",
        }));
        Ok(())
    }

    async fn update_item(
        &self,
        _token: &str,
        id: &str,
        payload: &VaultItemPayload,
    ) -> Result<(), AppError> {
        let mut records = self.records.lock();
        let record = records
            .iter_mut()
            .find(|r| r.get("_id").and_then(|v| v.as_str()) == Some(id))
            .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;
        record["platform"] = json!(payload.platform);
        record["email"] = json!(payload.email);
        record["mobile_number"] = json!(payload.mobile_number);
        record["username"] = json!(payload.username);
        record["password"] = json!(payload.password);
        record["updatedAt"] = json!("2024-05-02T09:00:00Z");
        Ok(())
    }

    async fn get_all_items(&self, _token: &str) -> Result<Value, AppError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(AppError::Network("connection refused".to_string()));
        }
        if self.malformed.load(Ordering::SeqCst) {
            return Ok(json!({"status": "ok"}));
        }
        let items = Value::Array(self.records.lock().clone());
        if self.wrap_response.load(Ordering::SeqCst) {
            Ok(json!({ "items": items }))
        } else {
            Ok(items)
        }
    }

    async fn delete_item(&self, _token: &str, id: &str) -> Result<(), AppError> {
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|r| r.get("_id").and_then(|v| v.as_str()) != Some(id));
        if records.len() == before {
            return Err(AppError::NotFound("Item not found".to_string()));
        }
        Ok(())
    }
}

pub struct FakeMailer {
    pub fail: AtomicBool,
    pub sent: Mutex<Vec<(String, String)>>,
}

impl FakeMailer {
    pub fn new() -> Self {
        Self {
            fail: AtomicBool::new(false),
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl OtpMailer for FakeMailer {
    async fn deliver(&self, recipient: &str, code: &str) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::OtpDispatch("smtp relay unavailable".to_string()));
        }
        self.sent
            .lock()
            .push((recipient.to_string(), code.to_string()));
        Ok(())
    }
}

pub struct MemoryTokenStore {
    pub token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self {
            token: Mutex::new(None),
        }
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }

    /// Inherent read access so tests don't need the trait in scope.
    pub fn get_token(&self) -> Option<String> {
        self.token.lock().clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.lock().clone()
    }

    fn set(&self, token: &str) {
        *self.token.lock() = Some(token.to_string());
    }

    fn remove(&self) {
        *self.token.lock() = None;
    }
}

pub struct RecordingNotifier {
    pub notices: Mutex<Vec<(NoticeKind, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            notices: Mutex::new(Vec::new()),
        }
    }

    pub fn successes(&self) -> Vec<String> {
        self.of_kind(NoticeKind::Success)
    }

    pub fn errors(&self) -> Vec<String> {
        self.of_kind(NoticeKind::Error)
    }

    fn of_kind(&self, kind: NoticeKind) -> Vec<String> {
        self.notices
            .lock()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.lock().is_empty()
    }

    pub fn clear(&self) {
        self.notices.lock().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        self.notices.lock().push((kind, message.to_string()));
    }
}

/// A controller wired to fakes, with handles kept for inspection.
pub struct Harness {
    pub controller: AppController,
    pub user_api: Arc<FakeUserApi>,
    pub vault_api: Arc<FakeVaultApi>,
    pub mailer: Arc<FakeMailer>,
    pub tokens: Arc<MemoryTokenStore>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_tokens(MemoryTokenStore::new())
    }

    pub fn with_tokens(tokens: MemoryTokenStore) -> Self {
        let user_api = Arc::new(FakeUserApi::new());
        let vault_api = Arc::new(FakeVaultApi::new());
        let mailer = Arc::new(FakeMailer::new());
        let tokens = Arc::new(tokens);
        let notifier = Arc::new(RecordingNotifier::new());
        let controller = AppController::new(
            user_api.clone(),
            vault_api.clone(),
            mailer.clone(),
            tokens.clone(),
            notifier.clone(),
        );
        Self {
            controller,
            user_api,
            vault_api,
            mailer,
            tokens,
            notifier,
        }
    }

    pub async fn login(&mut self) {
        self.controller
            .login(LoginCredentials::by_email("ada@x.com", "secret1"))
            .await;
    }
}
