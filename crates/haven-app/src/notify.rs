//! User-visible notification channel. Whether a notice fires, and its
//! classification, is part of every controller operation's contract; the
//! wording is for the front-end to render as it likes.

use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NoticeKind, message: &str);
}

/// Routes notices to the log. A UI front-end supplies its own impl.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Success => info!("{message}"),
            NoticeKind::Error => error!("{message}"),
        }
    }
}
