//! # Tabmon - Tab & User Activity Monitor
//!
//! Watches window focus, visibility, idle time, clipboard copies, keystrokes
//! and text selections, and keeps an append-only, timestamped log of what
//! happened. Entries that signal loss of attention are flagged as alerts.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tabmon::libs::clipboard::SystemClipboard;
//! use tabmon::libs::config::MonitorConfig;
//! use tabmon::libs::monitor::Monitor;
//! use tabmon::libs::signal::Signal;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let handle = Monitor::new(MonitorConfig::default(), Arc::new(SystemClipboard)).spawn();
//!     handle.send(Signal::Blur)?;
//!     let log = handle.shutdown().await?;
//!     println!("{} entries", log.len());
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod libs;
