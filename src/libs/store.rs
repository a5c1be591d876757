//! The activity log store.
//!
//! [`ActivityLog`] keeps the ordered, append-only sequence of [`LogEntry`]
//! values together with two independent flags: `idle` (no qualifying
//! interaction for a full idle period) and `tab_active` (the watched surface is
//! visible and focused).
//!
//! ## Idle state machine
//!
//! ```text
//!            idle period without interaction
//!   Active ───────────────────────────────────▶ Idle
//!      ▲                                          │
//!      └──────── qualifying interaction ──────────┘
//! ```
//!
//! The store is synchronous and single-owner. The monitor loop drives the
//! idle deadline and feeds asynchronous clipboard results back in.

use crate::libs::clipboard::ClipboardError;
use crate::libs::formatter::format_log_line_now;
use crate::libs::messages::Message;
use crate::libs::timer::DebounceTimer;
use serde::Serialize;
use std::fmt::Display;
use std::time::Duration;
use tokio::time::Instant;

/// Tracing target of the tab-leave diagnostic channel.
pub const TAB_LEAVE_TARGET: &str = "tab_leave";

/// One line of the activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// `[HH:MM:SS] <message>`
    pub text: String,
    /// Whether the entry signals loss of attention or presence.
    pub is_alert: bool,
}

/// A source of a tab activity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabChange {
    DocumentHidden,
    DocumentVisible,
    WindowBlurred,
    WindowFocused,
}

impl TabChange {
    pub fn is_active(self) -> bool {
        matches!(self, TabChange::DocumentVisible | TabChange::WindowFocused)
    }

    pub fn message(self) -> Message {
        match self {
            TabChange::DocumentHidden => Message::DocumentHidden,
            TabChange::DocumentVisible => Message::DocumentVisible,
            TabChange::WindowBlurred => Message::WindowLostFocus,
            TabChange::WindowFocused => Message::WindowGainedFocus,
        }
    }
}

/// A point-in-time copy of the store, for rendering and inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityState {
    pub idle: bool,
    pub tab_active: bool,
    pub entries: Vec<LogEntry>,
}

#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
    idle: bool,
    tab_active: bool,
    idle_timer: DebounceTimer,
}

impl ActivityLog {
    /// Creates an empty log in the `Active` state with a visible, focused tab.
    ///
    /// The idle timer stays unarmed until the first [`reset_idle_timer`](Self::reset_idle_timer).
    pub fn new(idle_period: Duration) -> Self {
        Self {
            entries: Vec::new(),
            idle: false,
            tab_active: true,
            idle_timer: DebounceTimer::new(idle_period),
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_idle(&self) -> bool {
        self.idle
    }

    pub fn is_tab_active(&self) -> bool {
        self.tab_active
    }

    /// Current idle deadline, `None` while the timer is unarmed.
    pub fn idle_deadline(&self) -> Option<Instant> {
        self.idle_timer.deadline()
    }

    pub fn snapshot(&self) -> ActivityState {
        ActivityState {
            idle: self.idle,
            tab_active: self.tab_active,
            entries: self.entries.clone(),
        }
    }

    /// Appends a timestamped entry. Alerts are also reported on the
    /// `tab_leave` tracing target.
    pub fn record(&mut self, message: impl Display, is_alert: bool) -> &LogEntry {
        let message = message.to_string();
        if is_alert {
            tracing::warn!(target: TAB_LEAVE_TARGET, "[TAB LEAVE DETECTED] {}", message);
        }
        self.entries.push(LogEntry {
            text: format_log_line_now(&message),
            is_alert,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// Leaves the idle state if needed and re-arms the idle timer.
    pub fn reset_idle_timer(&mut self) {
        if self.idle {
            self.idle = false;
            self.record(Message::UserActiveAgain, false);
        }
        self.idle_timer.reset();
    }

    /// Handles the idle deadline firing. The timer is single-shot, so it is
    /// left unarmed until the next interaction.
    pub fn expire_idle(&mut self) {
        self.idle_timer.cancel();
        if self.idle {
            return;
        }
        self.idle = true;
        self.record(Message::UserIdle(self.idle_timer.period().as_secs()), true);
    }

    /// Updates `tab_active` and records the change. Leaving is an alert,
    /// returning is not. Repeated changes in the same direction are recorded too.
    pub fn set_tab_active(&mut self, change: TabChange) {
        let active = change.is_active();
        self.tab_active = active;
        self.record(change.message(), !active);
    }

    /// Records the pending-unload alert. The flags are left untouched.
    pub fn leave_page(&mut self) {
        self.record(Message::LeavingPage, true);
    }

    /// Applies the outcome of a clipboard read triggered by a copy action.
    pub fn handle_copy(&mut self, read: Result<String, ClipboardError>) {
        match read {
            Ok(text) => {
                self.record(Message::UserCopied(text), false);
            }
            Err(e) => {
                tracing::debug!("clipboard read failed: {}", e);
                self.record(Message::CopyReadDenied, true);
            }
        }
    }

    /// Records a key press, but only while the tab is active.
    pub fn handle_keydown(&mut self, key: &str) {
        if self.tab_active {
            self.record(Message::KeyPressed(key.to_string()), false);
        }
    }

    /// Records a non-empty text selection.
    pub fn handle_selection(&mut self, text: &str) {
        if !text.is_empty() {
            self.record(Message::TextHighlighted(text.to_string()), false);
        }
    }
}
