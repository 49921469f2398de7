//! Toast notifications

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: ToastKind::Success }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: ToastKind::Error }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: ToastKind::Info }
    }
}

/// Receives user-facing notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// In-memory notifier; the shell drains it to render toasts
#[derive(Debug, Clone, Default)]
pub struct ToastLog {
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl ToastLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All toasts received so far
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Take the queued toasts, leaving the log empty
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn count(&self, kind: ToastKind) -> usize {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|t| t.kind == kind)
            .count()
    }
}

impl Notifier for ToastLog {
    fn notify(&self, toast: Toast) {
        log::debug!("toast {:?}: {}", toast.kind, toast.message);
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner).push(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_log_collects_and_drains() {
        let log = ToastLog::new();
        log.notify(Toast::success("Saved"));
        log.notify(Toast::error("Failed to save order"));

        assert_eq!(log.count(ToastKind::Error), 1);
        assert_eq!(log.drain().len(), 2);
        assert!(log.toasts().is_empty());
    }

    #[test]
    fn test_toast_kind_serializes_lowercase() {
        let json = serde_json::to_string(&Toast::info("Copied")).unwrap();
        assert_eq!(json, r#"{"message":"Copied","kind":"info"}"#);
    }
}
