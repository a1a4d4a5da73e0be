//! Narrow interfaces to the host application.
//!
//! The core never talks to the host's plugin API, widget toolkit or vault
//! directly; everything it needs is expressed through the traits below so
//! the pipeline is portable across hosts (editor plugin, CLI, tests).

use crate::error::AppResult;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Sink for short user-visible status messages.
/// Rendering (toast, notice bar, stderr) is a host concern.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str);
}

/// Source of the user's current text selection.
pub trait SelectionSource: Send + Sync {
    fn current_selection(&self) -> Option<String>;
}

/// Opaque key-value persistence for the settings record.
/// The stored format is irrelevant to the core; it round-trips JSON.
#[async_trait]
pub trait SettingsStorage: Send + Sync {
    /// Returns `None` when nothing has been persisted yet.
    async fn load(&self) -> AppResult<Option<serde_json::Value>>;

    /// Overwrites the whole persisted record.
    async fn save(&self, record: serde_json::Value) -> AppResult<()>;
}

/// Binary blob and text-item access to the host's storage.
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Write a named binary blob, creating intermediate folders as needed.
    async fn write_blob(&self, path: &str, data: &[u8]) -> AppResult<()>;

    /// Enumerate the paths of text-bearing items directly under a folder.
    /// Fails with a configuration error when the folder does not exist.
    async fn list_text_items(&self, folder: &str) -> AppResult<Vec<String>>;

    /// Read the text content of one item.
    async fn read_text(&self, path: &str) -> AppResult<String>;
}

/// Cooperative cancellation flag, checked at each suspend point of the
/// pipeline (network call, storage write, playback, between batch items).
#[derive(Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fails with `AppError::Cancelled` once the token has been triggered.
    pub fn check(&self) -> AppResult<()> {
        if self.is_cancelled() {
            Err(crate::error::AppError::Cancelled)
        } else {
            Ok(())
        }
    }
}
