//! Terminal session: raw mode, focus reporting and quit keys.
//!
//! The terminal window stands in for the watched window: losing focus is a
//! `Blur`, regaining it is a `Focus`. Raw mode is required to receive focus
//! reports, so the session also owns the quit keys (`q`, Esc, Ctrl+C) that the
//! shell would otherwise turn into signals.

use crate::libs::console;
use crate::libs::monitor::SignalSender;
use crate::libs::signal::Signal;
use anyhow::Result;
use crossterm::event::{self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{execute, terminal};
use std::io::stdout;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// What a terminal event means to the watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalInput {
    Signal(Signal),
    Quit,
}

/// Maps a crossterm event; `None` for events the watcher ignores.
pub fn translate(event: &Event) -> Option<TerminalInput> {
    match event {
        Event::FocusLost => Some(TerminalInput::Signal(Signal::Blur)),
        Event::FocusGained => Some(TerminalInput::Signal(Signal::Focus)),
        Event::Key(key) if is_quit_key(key) => Some(TerminalInput::Quit),
        _ => None,
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Esc => true,
        _ => false,
    }
}

/// An active raw-mode session. Dropping it stops the reader thread and
/// restores the terminal.
pub struct TerminalSession {
    running: Arc<AtomicBool>,
    reader: Option<JoinHandle<()>>,
}

impl TerminalSession {
    /// Enters raw mode, enables focus reporting and starts the reader thread.
    ///
    /// Focus signals go to `sender`; quit requests go to the returned receiver.
    pub fn start(sender: SignalSender) -> Result<(Self, mpsc::UnboundedReceiver<()>)> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(stdout(), EnableFocusChange) {
            let _ = terminal::disable_raw_mode();
            return Err(e.into());
        }
        console::set_raw_mode(true);

        let running = Arc::new(AtomicBool::new(true));
        let (quit_tx, quit_rx) = mpsc::unbounded_channel();
        let reader_running = Arc::clone(&running);

        let reader = std::thread::spawn(move || {
            while reader_running.load(Ordering::Relaxed) && !sender.is_closed() {
                match event::poll(POLL_INTERVAL) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(e) => {
                        tracing::debug!("terminal poll failed: {}", e);
                        break;
                    }
                }
                let event = match event::read() {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::debug!("terminal read failed: {}", e);
                        break;
                    }
                };
                match translate(&event) {
                    Some(TerminalInput::Signal(signal)) => {
                        if !sender.send(signal) {
                            break;
                        }
                    }
                    Some(TerminalInput::Quit) => {
                        let _ = quit_tx.send(());
                    }
                    None => {}
                }
            }
        });

        Ok((
            Self {
                running,
                reader: Some(reader),
            },
            quit_rx,
        ))
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }
        let _ = execute!(stdout(), DisableFocusChange);
        let _ = terminal::disable_raw_mode();
        console::set_raw_mode(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_events_become_signals() {
        assert_eq!(translate(&Event::FocusLost), Some(TerminalInput::Signal(Signal::Blur)));
        assert_eq!(translate(&Event::FocusGained), Some(TerminalInput::Signal(Signal::Focus)));
    }

    #[test]
    fn test_quit_keys() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let plain_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);

        assert_eq!(translate(&Event::Key(ctrl_c)), Some(TerminalInput::Quit));
        assert_eq!(translate(&Event::Key(q)), Some(TerminalInput::Quit));
        assert_eq!(translate(&Event::Key(plain_c)), None);
    }
}
