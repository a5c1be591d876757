//! Global keyboard and mouse hook.
//!
//! [`InputHook`] runs `rdev::listen` on a dedicated thread and turns raw
//! device events into [`Signal`]s. `rdev::listen` blocks for the lifetime of
//! the process and cannot be stopped, so deregistration happens on our side:
//! dropping the hook detaches the sender and every later event is discarded.

use crate::libs::clipboard::read_primary_selection;
use crate::libs::messages::Message;
use crate::libs::monitor::SignalSender;
use crate::libs::signal::Signal;
use crate::{msg_debug, msg_warning};
use parking_lot::Mutex;
use rdev::{listen, Event, EventType, Key};
use std::sync::Arc;
use std::time::Duration;

type SharedSender = Arc<Mutex<Option<SignalSender>>>;

/// Tracks held modifiers to recognise the copy chord, and the last selection
/// reported on pointer release.
#[derive(Debug, Default)]
pub struct ChordState {
    control: bool,
    meta: bool,
    last_selection: String,
}

impl ChordState {
    /// Converts one device event into the signals it stands for.
    ///
    /// Ctrl+C (Cmd+C on macOS) yields a `Copy` after the `KeyDown`.
    /// `read_selection` is only called on button release.
    pub fn translate(&mut self, event: &Event, read_selection: impl FnOnce() -> String) -> Vec<Signal> {
        match event.event_type {
            EventType::KeyPress(key) => {
                self.set_modifier(key, true);
                let mut signals = vec![Signal::KeyDown { key: key_name(event, key) }];
                if key == Key::KeyC && (self.control || self.meta) {
                    signals.push(Signal::Copy);
                }
                signals
            }
            EventType::KeyRelease(key) => {
                self.set_modifier(key, false);
                Vec::new()
            }
            EventType::ButtonPress(_) => vec![Signal::Click],
            EventType::ButtonRelease(_) => vec![Signal::PointerUp {
                selection: self.fresh_selection(read_selection()),
            }],
            EventType::MouseMove { .. } => vec![Signal::PointerMove],
            EventType::Wheel { .. } => vec![Signal::Scroll],
        }
    }

    /// The primary selection outlives the highlight, so only a selection that
    /// differs from the previous release counts as new.
    fn fresh_selection(&mut self, selection: String) -> String {
        if selection == self.last_selection {
            return String::new();
        }
        self.last_selection = selection.clone();
        selection
    }

    fn set_modifier(&mut self, key: Key, pressed: bool) {
        match key {
            Key::ControlLeft | Key::ControlRight => self.control = pressed,
            Key::MetaLeft | Key::MetaRight => self.meta = pressed,
            _ => {}
        }
    }
}

/// The typed character when there is one, the key name otherwise.
fn key_name(event: &Event, key: Key) -> String {
    match &event.name {
        Some(name) if !name.trim().is_empty() && !name.chars().any(char::is_control) => name.clone(),
        _ => format!("{:?}", key),
    }
}

/// Registration of the global input hook.
pub struct InputHook {
    sender: SharedSender,
}

impl InputHook {
    /// Spawns the listener thread. Listener failures are retried every second.
    pub fn start(sender: SignalSender) -> Self {
        let shared: SharedSender = Arc::new(Mutex::new(Some(sender)));
        let listener_sender = Arc::clone(&shared);

        std::thread::spawn(move || loop {
            let callback_sender = Arc::clone(&listener_sender);
            let mut chords = ChordState::default();
            let result = listen(move |event: Event| {
                // Clone out so selection reads never run under the lock.
                let Some(sender) = callback_sender.lock().clone() else {
                    return;
                };
                for signal in chords.translate(&event, read_primary_selection) {
                    if !sender.send(signal) {
                        msg_debug!("monitor stopped, dropping input event");
                    }
                }
            });

            if listener_sender.lock().is_none() {
                break;
            }
            match result {
                Err(e) => {
                    msg_warning!(Message::InputHookFailed(format!("{:?}", e)));
                    std::thread::sleep(Duration::from_secs(1));
                }
                // listen only returns on error; a clean return means the platform hook went away.
                Ok(()) => break,
            }
        });

        Self { sender: shared }
    }
}

impl Drop for InputHook {
    fn drop(&mut self) {
        self.sender.lock().take();
    }
}
