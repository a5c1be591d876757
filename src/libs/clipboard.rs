//! Clipboard access for copy detection.
//!
//! Reading the clipboard is permission-gated and may fail at any time. A
//! failure is an expected outcome: the activity log turns it into an alert
//! entry instead of propagating it.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    /// The platform refused to hand out the clipboard contents.
    #[error("clipboard read denied: {0}")]
    Denied(String),
    /// No clipboard could be reached at all.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

/// A readable clipboard.
///
/// `read_text` is blocking; the monitor calls it on the blocking thread pool.
pub trait ClipboardSource: Send + Sync + 'static {
    fn read_text(&self) -> Result<String, ClipboardError>;
}

/// The system clipboard, accessed through `arboard`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSource for SystemClipboard {
    fn read_text(&self) -> Result<String, ClipboardError> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        clipboard.get_text().map_err(|e| match e {
            arboard::Error::ClipboardNotSupported => ClipboardError::Unavailable(e.to_string()),
            other => ClipboardError::Denied(other.to_string()),
        })
    }
}

/// A clipboard with fixed contents, or one that always denies access.
#[derive(Debug, Clone, Default)]
pub struct FixedClipboard {
    text: Option<String>,
}

impl FixedClipboard {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()) }
    }

    pub fn denied() -> Self {
        Self { text: None }
    }
}

impl ClipboardSource for FixedClipboard {
    fn read_text(&self) -> Result<String, ClipboardError> {
        self.text.clone().ok_or_else(|| ClipboardError::Denied("access not granted".to_string()))
    }
}

/// Reads the text currently selected on screen.
///
/// Only X11/Wayland expose a primary selection; elsewhere the selection is
/// reported as empty, which the activity log ignores.
#[cfg(target_os = "linux")]
pub fn read_primary_selection() -> String {
    use arboard::{GetExtLinux, LinuxClipboardKind};

    match arboard::Clipboard::new() {
        Ok(mut clipboard) => clipboard.get().clipboard(LinuxClipboardKind::Primary).text().unwrap_or_default(),
        Err(e) => {
            tracing::debug!("primary selection unavailable: {}", e);
            String::new()
        }
    }
}

#[cfg(not(target_os = "linux"))]
pub fn read_primary_selection() -> String {
    String::new()
}
