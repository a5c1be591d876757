//! Replays a recorded signal feed through a fresh monitor.
//!
//! The clipboard is simulated: `--clipboard TEXT` grants reads returning
//! `TEXT`, otherwise every copy is denied.

use crate::libs::clipboard::{ClipboardSource, FixedClipboard};
use crate::libs::config::Config;
use crate::libs::feed;
use crate::libs::messages::Message;
use crate::libs::monitor::Monitor;
use crate::libs::store::ActivityState;
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// JSON-lines signal feed ("-" for stdin)
    pub path: String,
    /// Text returned by clipboard reads; without it every read is denied
    #[arg(long, value_name = "TEXT")]
    pub clipboard: Option<String>,
    /// Idle threshold in seconds, overriding the configuration
    #[arg(long, value_name = "SECS")]
    pub idle_threshold: Option<u64>,
    /// Print the final state as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub async fn cmd(args: ReplayArgs) -> Result<()> {
    let state = run(&args).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }
    if state.entries.is_empty() {
        msg_info!(Message::ReplayEmpty);
        return Ok(());
    }

    msg_print!(Message::ReplayHeader(args.path.clone()), true);
    View::entries(&state.entries)
}

/// Feeds the whole file, waits for outstanding clipboard reads and returns the final state.
pub async fn run(args: &ReplayArgs) -> Result<ActivityState> {
    let mut monitor_config = Config::read()?.monitor.unwrap_or_default();
    if let Some(idle_threshold) = args.idle_threshold {
        monitor_config.idle_threshold = idle_threshold;
    }
    monitor_config.validate()?;

    let clipboard: Arc<dyn ClipboardSource> = match &args.clipboard {
        Some(text) => Arc::new(FixedClipboard::with_text(text.as_str())),
        None => Arc::new(FixedClipboard::denied()),
    };

    // The simulated clipboard holds its contents before the copy arrives.
    let handle = Monitor::new(monitor_config, clipboard)
        .with_copy_read_delay(Duration::ZERO)
        .spawn();
    let reader = feed::open(&args.path).await?;
    feed::pump(reader, &handle.sender()).await?;
    handle.settle().await?;

    let log = handle.shutdown().await?;
    Ok(log.snapshot())
}
