//! Live activity monitoring.
//!
//! Wires the signal sources (global input hook, terminal focus reporting,
//! optional JSON feed) into a monitor and renders its log as it grows. On
//! Ctrl+C, SIGTERM or a quit key the watcher dispatches `BeforeUnload` first,
//! then tears everything down in reverse order of acquisition.

use crate::libs::clipboard::SystemClipboard;
use crate::libs::config::Config;
use crate::libs::feed;
use crate::libs::input::InputHook;
use crate::libs::messages::Message;
use crate::libs::monitor::{Monitor, SignalSender};
use crate::libs::signal::Signal;
use crate::libs::terminal::TerminalSession;
use crate::libs::view::TerminalView;
use crate::{msg_debug, msg_error_anyhow, msg_info, msg_warning};
use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Also read signals from a JSON-lines feed ("-" for stdin)
    #[arg(long, value_name = "PATH")]
    pub feed: Option<String>,
    /// Do not register the global keyboard and mouse hook
    #[arg(long)]
    pub no_input_hook: bool,
    /// Do not switch the terminal to raw mode for focus reporting
    #[arg(long)]
    pub no_terminal: bool,
}

pub async fn cmd(args: WatchArgs) -> Result<()> {
    let monitor_config = Config::read()?.monitor.unwrap_or_default();
    monitor_config.validate()?;
    msg_info!(Message::MonitorStarted {
        idle_threshold: monitor_config.idle_threshold,
    });

    let mut handle = Monitor::new(monitor_config, Arc::new(SystemClipboard)).spawn();
    let mut updates = handle.take_updates().ok_or_else(|| msg_error_anyhow!(Message::MonitorNotRunning))?;
    let mut shutdown_rx = spawn_shutdown_listener();
    let mut listening = true;

    let hook = if args.no_input_hook {
        None
    } else {
        msg_info!(Message::InputHookRegistering);
        Some(InputHook::start(handle.sender()))
    };

    let feed_task = args.feed.map(|path| tokio::spawn(run_feed(path, handle.sender())));

    let (session, mut quit_rx) = if args.no_terminal {
        (None, None)
    } else {
        // Printed before raw mode, which would break plain line endings.
        msg_info!(Message::TerminalSessionStarting);
        match TerminalSession::start(handle.sender()) {
            Ok((session, quit_rx)) => (Some(session), Some(quit_rx)),
            Err(e) => {
                msg_warning!(Message::TerminalSessionUnavailable(e.to_string()));
                (None, None)
            }
        }
    };

    let mut view = TerminalView::stdout(session.is_some())?;
    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Some(update) => view.apply(&update)?,
                None => break,
            },
            _ = recv_quit(&mut quit_rx) => {
                msg_debug!(Message::WatcherQuitRequested);
                break;
            }
            received = &mut shutdown_rx, if listening => {
                if received.is_ok() {
                    break;
                }
                // No signal handler could be installed; only quit keys remain.
                listening = false;
            }
        }
    }

    // Teardown: announce the unload, stop the sources, then stop the monitor.
    msg_debug!(Message::MonitorShuttingDown);
    let _ = handle.send(Signal::BeforeUnload);
    drop(hook);
    if let Some(task) = feed_task {
        task.abort();
    }
    let log = handle.shutdown().await?;
    while let Ok(update) = updates.try_recv() {
        view.apply(&update)?;
    }
    drop(view);
    drop(session);

    msg_info!(Message::MonitorStopped { entries: log.len() });
    Ok(())
}

async fn recv_quit(quit_rx: &mut Option<mpsc::UnboundedReceiver<()>>) {
    match quit_rx {
        Some(rx) => {
            if rx.recv().await.is_none() {
                // Reader thread is gone; keep watching without quit keys.
                std::future::pending::<()>().await;
            }
        }
        None => std::future::pending::<()>().await,
    }
}

async fn run_feed(path: String, sender: SignalSender) {
    let result = match feed::open(&path).await {
        Ok(reader) => feed::pump(reader, &sender).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(sent) => msg_debug!(Message::FeedFinished(sent)),
        Err(e) => msg_warning!(e),
    }
}

/// Resolves once the process is asked to terminate.
fn spawn_shutdown_listener() -> oneshot::Receiver<()> {
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    #[cfg(unix)]
    {
        tokio::spawn(async move {
            use tokio::signal::unix::{signal, SignalKind};

            let (mut sigterm, mut sigint) = match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(sigterm), Ok(sigint)) => (sigterm, sigint),
                _ => {
                    msg_warning!(Message::WatcherSignalHandlingNotSupported);
                    return;
                }
            };

            tokio::select! {
                _ = sigterm.recv() => msg_debug!(Message::WatcherReceivedSigterm),
                _ = sigint.recv() => msg_debug!(Message::WatcherReceivedSigint),
            }

            let _ = shutdown_tx.send(());
        });
    }

    #[cfg(windows)]
    {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                msg_debug!(Message::WatcherReceivedSigint);
                let _ = shutdown_tx.send(());
            }
        });
    }

    #[cfg(not(any(unix, windows)))]
    {
        msg_warning!(Message::WatcherSignalHandlingNotSupported);
        drop(shutdown_tx);
    }

    shutdown_rx
}
