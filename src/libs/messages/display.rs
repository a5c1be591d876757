//! Display implementation for tabmon messages.
//!
//! Every piece of user-facing text lives here, including the wording of the
//! activity log entries themselves, so the log vocabulary and the CLI output
//! are defined in one place.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === ACTIVITY LOG MESSAGES ===
            Message::UserActiveAgain => "User is active again".to_string(),
            Message::UserIdle(secs) => format!("User is idle (no interaction for {}s)", secs),
            Message::DocumentHidden => "Document hidden (tab switch or minimized)".to_string(),
            Message::DocumentVisible => "Document visible".to_string(),
            Message::WindowLostFocus => "Window lost focus".to_string(),
            Message::WindowGainedFocus => "Window gained focus".to_string(),
            Message::LeavingPage => "User is attempting to leave the page".to_string(),
            Message::UserCopied(text) => format!("User copied: \"{}\"", text),
            Message::CopyReadDenied => "Copy detected but clipboard read denied".to_string(),
            Message::KeyPressed(key) => format!("Key pressed: {}", key),
            Message::TextHighlighted(text) => format!("User highlighted text: \"{}\"", text),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigNotFound => "No configuration file found, nothing to remove".to_string(),
            Message::ConfigModuleMonitor => "Monitor settings".to_string(),
            Message::PromptIdleThreshold => "Idle threshold in seconds".to_string(),
            Message::InvalidIdleThreshold(secs) => format!("Idle threshold must be greater than zero, got {}", secs),

            // === MONITOR MESSAGES ===
            Message::MonitorStarted { idle_threshold } => {
                format!("Activity monitor started (idle after {}s without interaction)", idle_threshold)
            }
            Message::MonitorStopped { entries } => format!("Activity monitor stopped after {} log entries", entries),
            Message::MonitorShuttingDown => "Shutting down activity monitor...".to_string(),
            Message::MonitorNotRunning => "Activity monitor is not running".to_string(),
            Message::MonitorTaskPanicked(e) => format!("Activity monitor task panicked: {}", e),
            Message::ActiveStatus => "active".to_string(),
            Message::InactiveStatus => "inactive".to_string(),

            // === INPUT SOURCE MESSAGES ===
            Message::InputHookRegistering => "Registering global input hook (failures are retried every second)".to_string(),
            Message::InputHookFailed(e) => format!("Failed to listen for input events: {}. Retrying in 1 second...", e),
            Message::TerminalSessionStarting => "Enabling terminal focus reporting (press q or Ctrl+C to quit)".to_string(),
            Message::TerminalSessionUnavailable(e) => format!("Terminal focus reporting unavailable: {}", e),
            Message::WatcherReceivedSigterm => "Received SIGTERM".to_string(),
            Message::WatcherReceivedSigint => "Received SIGINT".to_string(),
            Message::WatcherQuitRequested => "Quit requested from terminal".to_string(),
            Message::WatcherSignalHandlingNotSupported => "Signal handling not supported on this platform".to_string(),

            // === FEED MESSAGES ===
            Message::FeedFinished(count) => format!("Signal feed finished after {} signals", count),

            // === REPLAY MESSAGES ===
            Message::ReplayHeader(source) => format!("Activity log replayed from {}", source),
            Message::ReplayEmpty => "Replay produced no log entries".to_string(),
        };
        write!(f, "{}", text)
    }
}
