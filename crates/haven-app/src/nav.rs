//! Screen state machine. The navigator is the only component that changes
//! which screen is visible, and every transition that leaves `add-item`
//! or `reauth` clears the matching context slot itself, so stale context
//! cannot outlive its screen.

use haven_core::models::VaultItem;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Welcome,
    Register,
    Login,
    Home,
    AddItem,
    ItemDetail,
    Reauth,
    Profile,
}

#[derive(Debug, Default)]
pub struct Navigator {
    screen: Screen,
    /// Item under edit in the add-item form (edit mode).
    editing: Option<VaultItem>,
    /// Item shown on the detail screen.
    viewing: Option<VaultItem>,
    /// Edit was requested but not yet authorized by the reauth gate.
    pending_edit: Option<VaultItem>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn editing(&self) -> Option<&VaultItem> {
        self.editing.as_ref()
    }

    pub fn viewing(&self) -> Option<&VaultItem> {
        self.viewing.as_ref()
    }

    pub fn pending_edit(&self) -> Option<&VaultItem> {
        self.pending_edit.as_ref()
    }

    // ── Unauthenticated edges ────────────────────────────────────────────────

    pub fn open_login(&mut self) {
        self.screen = Screen::Login;
    }

    pub fn open_register(&mut self) {
        self.screen = Screen::Register;
    }

    pub fn back_to_welcome(&mut self) {
        self.screen = Screen::Welcome;
    }

    /// Full reset (logout). Drops the session's entire navigation context.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // ── Authenticated edges ──────────────────────────────────────────────────

    /// Entering home clears every transient slot.
    pub fn go_home(&mut self) {
        self.editing = None;
        self.viewing = None;
        self.pending_edit = None;
        self.screen = Screen::Home;
    }

    /// Open the add-item form in create mode.
    pub fn open_add(&mut self) {
        self.editing = None;
        self.screen = Screen::AddItem;
    }

    /// Leave the add-item form (save success or back), clearing the edit
    /// context on the way out.
    pub fn close_add(&mut self) {
        self.editing = None;
        self.go_home();
    }

    pub fn view_item(&mut self, item: VaultItem) {
        self.viewing = Some(item);
        self.screen = Screen::ItemDetail;
    }

    /// Request an edit: parks the item and interposes the reauth screen.
    pub fn request_edit(&mut self, item: VaultItem) {
        self.pending_edit = Some(item);
        self.screen = Screen::Reauth;
    }

    /// Consume the reauth grant: the pending item moves into the edit
    /// context and the add-item form opens in edit mode. Returns the item
    /// now being edited, or `None` when nothing was pending.
    pub fn grant_edit(&mut self) -> Option<&VaultItem> {
        let item = self.pending_edit.take()?;
        self.viewing = None;
        self.editing = Some(item);
        self.screen = Screen::AddItem;
        self.editing.as_ref()
    }

    /// Abandon the reauth attempt: discard the pending item and return to
    /// the detail screen when an item is still being viewed, else home.
    pub fn cancel_reauth(&mut self) {
        self.pending_edit = None;
        if self.viewing.is_some() {
            self.screen = Screen::ItemDetail;
        } else {
            self.go_home();
        }
    }

    pub fn open_profile(&mut self) {
        self.screen = Screen::Profile;
    }
}
