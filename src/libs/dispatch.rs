//! Single dispatch point for inbound signals.
//!
//! Each concern that reacts to signals is a [`SignalObserver`]. A raw event
//! that matters to several concerns (a key press resets the idle timer *and*
//! may be logged) is delivered once to the [`Dispatcher`], which hands it to
//! every observer in subscription order.

use crate::libs::signal::{Signal, Visibility};
use crate::libs::store::{ActivityLog, TabChange};

/// Work an observer asks the monitor to perform outside the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Read the clipboard and feed the result to [`ActivityLog::handle_copy`].
    ReadClipboard,
}

pub trait SignalObserver: Send + Sync {
    fn observe(&self, signal: &Signal, log: &mut ActivityLog) -> Option<Effect>;
}

/// Resets the idle timer on every qualifying interaction.
#[derive(Debug, Default)]
pub struct IdleObserver;

impl SignalObserver for IdleObserver {
    fn observe(&self, signal: &Signal, log: &mut ActivityLog) -> Option<Effect> {
        if signal.is_qualifying() {
            log.reset_idle_timer();
        }
        None
    }
}

/// Tracks visibility, focus and pending unload.
#[derive(Debug, Default)]
pub struct PresenceObserver;

impl SignalObserver for PresenceObserver {
    fn observe(&self, signal: &Signal, log: &mut ActivityLog) -> Option<Effect> {
        match signal {
            Signal::Visibility { state: Visibility::Hidden } => log.set_tab_active(TabChange::DocumentHidden),
            Signal::Visibility { state: Visibility::Visible } => log.set_tab_active(TabChange::DocumentVisible),
            Signal::Blur => log.set_tab_active(TabChange::WindowBlurred),
            Signal::Focus => log.set_tab_active(TabChange::WindowFocused),
            Signal::BeforeUnload => log.leave_page(),
            _ => {}
        }
        None
    }
}

/// Logs key presses.
#[derive(Debug, Default)]
pub struct KeystrokeObserver;

impl SignalObserver for KeystrokeObserver {
    fn observe(&self, signal: &Signal, log: &mut ActivityLog) -> Option<Effect> {
        if let Signal::KeyDown { key } = signal {
            log.handle_keydown(key);
        }
        None
    }
}

/// Logs text selections made with the pointer.
#[derive(Debug, Default)]
pub struct SelectionObserver;

impl SignalObserver for SelectionObserver {
    fn observe(&self, signal: &Signal, log: &mut ActivityLog) -> Option<Effect> {
        if let Signal::PointerUp { selection } = signal {
            log.handle_selection(selection);
        }
        None
    }
}

/// Requests a clipboard read on copy.
#[derive(Debug, Default)]
pub struct ClipboardObserver;

impl SignalObserver for ClipboardObserver {
    fn observe(&self, signal: &Signal, _log: &mut ActivityLog) -> Option<Effect> {
        matches!(signal, Signal::Copy).then_some(Effect::ReadClipboard)
    }
}

#[derive(Default)]
pub struct Dispatcher {
    observers: Vec<Box<dyn SignalObserver>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// The observer set of the activity monitor. The idle observer runs first,
    /// so leaving the idle state is logged before whatever the signal itself logs.
    pub fn standard() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.subscribe(IdleObserver);
        dispatcher.subscribe(PresenceObserver);
        dispatcher.subscribe(KeystrokeObserver);
        dispatcher.subscribe(SelectionObserver);
        dispatcher.subscribe(ClipboardObserver);
        dispatcher
    }

    pub fn subscribe(&mut self, observer: impl SignalObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Delivers `signal` to every observer and collects the requested effects.
    pub fn dispatch(&self, signal: &Signal, log: &mut ActivityLog) -> Vec<Effect> {
        self.observers.iter().filter_map(|observer| observer.observe(signal, log)).collect()
    }
}
