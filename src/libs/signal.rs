//! Inbound activity signals.
//!
//! A [`Signal`] is one notification from the host environment. Signals are
//! produced by the global input hook, the terminal session and the JSON
//! signal feed, and all of them end up at the monitor's single dispatch point.
//!
//! The serialized form is internally tagged:
//!
//! ```json
//! {"type": "visibility", "state": "hidden"}
//! {"type": "key_down", "key": "a"}
//! {"type": "pointer_up", "selection": "some text"}
//! ```

use serde::{Deserialize, Serialize};

/// Visibility state of the watched surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Hidden,
    Visible,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Signal {
    /// The surface became hidden or visible.
    Visibility { state: Visibility },
    /// The window lost focus.
    Blur,
    /// The window gained focus.
    Focus,
    /// The session is about to be torn down.
    BeforeUnload,
    PointerMove,
    KeyDown { key: String },
    Scroll,
    Click,
    /// A copy action happened; the copied text must be read from the clipboard.
    Copy,
    /// The pointer was released, carrying whatever text is currently selected.
    PointerUp {
        #[serde(default)]
        selection: String,
    },
}

impl Signal {
    /// Qualifying interactions reset the idle timer.
    pub fn is_qualifying(&self) -> bool {
        matches!(self, Signal::PointerMove | Signal::KeyDown { .. } | Signal::Scroll | Signal::Click)
    }
}
