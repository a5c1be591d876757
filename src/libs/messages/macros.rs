//! Convenient macros for application messaging and logging.
//!
//! The macros route output depending on the run mode:
//!
//! ```text
//! msg_info!(..) ──▶ debug mode? ──yes──▶ tracing::info!
//!                        │
//!                        └──no───▶ println! / eprintln!
//! ```
//!
//! Debug mode is on when `TABMON_DEBUG` or `RUST_LOG` is set. The check is
//! cached on first use. Single-line prints end with
//! [`line_ending`](crate::libs::console::line_ending), so they stay aligned in raw mode.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tabmon::{msg_info, msg_error_anyhow};
//! use tabmon::libs::messages::Message;
//!
//! msg_info!(Message::MonitorShuttingDown);
//! let error = msg_error_anyhow!(Message::MonitorNotRunning);
//! ```

use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Returns `true` when `TABMON_DEBUG` or `RUST_LOG` is present in the environment.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("TABMON_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Prints a plain message.
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("{}", $msg);
        } else {
            print!("{}{}", $msg, $crate::libs::console::line_ending());
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n{}\n", $msg);
        } else {
            println!("\n{}\n", $msg);
        }
    };
}

/// Prints a success message with ✅ prefix.
#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("✅ {}", $msg);
        } else {
            print!("✅ {}{}", $msg, $crate::libs::console::line_ending());
        }
    };
}

/// Prints an error message with ❌ prefix to stderr.
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprint!("❌ {}{}", $msg, $crate::libs::console::line_ending());
        }
    };
}

/// Prints a warning message with ⚠️ prefix to stderr.
///
/// Warnings go to stderr so they never interleave with a rendered log on stdout.
#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("⚠️ {}", $msg);
        } else {
            eprint!("⚠️ {}{}", $msg, $crate::libs::console::line_ending());
        }
    };
}

/// Prints an informational message with ℹ️ prefix.
#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("ℹ️ {}", $msg);
        } else {
            print!("ℹ️ {}{}", $msg, $crate::libs::console::line_ending());
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\nℹ️ {}\n", $msg);
        } else {
            println!("\nℹ️ {}\n", $msg);
        }
    };
}

/// Emits a debug message, only in debug mode.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

/// Builds an `anyhow::Error` from a message.
#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("❌ {}", $msg)
    };
}

/// Returns early with an `anyhow::Error` built from a message.
#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("❌ {}", $msg)
    };
}
