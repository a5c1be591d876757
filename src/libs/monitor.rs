//! The activity monitor event loop.
//!
//! A single tokio task owns the [`ActivityLog`]. Everything that touches the
//! log is serialized through that task:
//!
//! ```text
//!  input hook ─┐
//!  terminal   ─┼─▶ SignalSender ─▶ ┌──────────────────────┐ ─▶ ViewUpdate stream
//!  feed       ─┘                   │ monitor task          │
//!                 idle deadline ─▶ │  Dispatcher          │
//!            clipboard reads ───▶ │  ActivityLog          │
//!                                   └──────────────────────┘
//! ```
//!
//! Clipboard reads run on the blocking pool while the loop keeps serving
//! other signals; each finished read is applied as one update. A copy signal
//! is observed as the chord is pressed, before the foreground application has
//! written the clipboard, so the read starts [`COPY_READ_DELAY`] later.
//! Dropping the [`MonitorHandle`] aborts the task, which releases the idle
//! deadline and any pending reads with it.

use crate::libs::clipboard::{ClipboardError, ClipboardSource};
use crate::libs::config::MonitorConfig;
use crate::libs::dispatch::{Dispatcher, Effect};
use crate::libs::messages::Message;
use crate::libs::signal::Signal;
use crate::libs::store::{ActivityLog, ActivityState, LogEntry};
use crate::libs::timer;
use crate::{msg_debug, msg_error_anyhow};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::{self, JoinHandle, JoinSet};
use tokio::time;

/// Time the copying application gets to publish the clipboard contents.
pub const COPY_READ_DELAY: Duration = Duration::from_millis(150);

/// Outbound notification for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewUpdate {
    /// A new entry, delivered in log order.
    Appended(LogEntry),
    /// The tab activity flag changed.
    TabActive(bool),
}

enum Command {
    Signal(Signal),
    Snapshot(oneshot::Sender<ActivityState>),
    Settle(oneshot::Sender<()>),
    Shutdown,
}

/// Cloneable entry point for signal producers.
#[derive(Debug, Clone)]
pub struct SignalSender {
    tx: mpsc::UnboundedSender<Command>,
}

impl SignalSender {
    /// Queues a signal. Returns `false` once the monitor has stopped.
    pub fn send(&self, signal: Signal) -> bool {
        self.tx.send(Command::Signal(signal)).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Forwards whatever the log gained since the last call.
struct Publisher {
    tx: mpsc::UnboundedSender<ViewUpdate>,
    published: usize,
    tab_active: Option<bool>,
}

impl Publisher {
    fn new(tx: mpsc::UnboundedSender<ViewUpdate>) -> Self {
        Self {
            tx,
            published: 0,
            tab_active: None,
        }
    }

    fn publish(&mut self, log: &ActivityLog) {
        // A closed receiver only means nobody renders; the log keeps going.
        for entry in &log.entries()[self.published..] {
            let _ = self.tx.send(ViewUpdate::Appended(entry.clone()));
        }
        self.published = log.len();

        let tab_active = log.is_tab_active();
        if self.tab_active != Some(tab_active) {
            let _ = self.tx.send(ViewUpdate::TabActive(tab_active));
            self.tab_active = Some(tab_active);
        }
    }
}

pub struct Monitor {
    config: MonitorConfig,
    clipboard: Arc<dyn ClipboardSource>,
    dispatcher: Dispatcher,
    copy_read_delay: Duration,
}

impl Monitor {
    /// Creates a monitor with the standard observer set.
    pub fn new(config: MonitorConfig, clipboard: Arc<dyn ClipboardSource>) -> Self {
        Self {
            config,
            clipboard,
            dispatcher: Dispatcher::standard(),
            copy_read_delay: COPY_READ_DELAY,
        }
    }

    /// Sets how long a copy waits before the clipboard is read.
    pub fn with_copy_read_delay(mut self, delay: Duration) -> Self {
        self.copy_read_delay = delay;
        self
    }

    /// Starts the monitor task on the current tokio runtime.
    pub fn spawn(self) -> MonitorHandle {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(self.run(command_rx, update_tx));

        MonitorHandle {
            sender: SignalSender { tx: command_tx },
            updates: Some(update_rx),
            task: Some(task),
        }
    }

    async fn run(self, mut commands: mpsc::UnboundedReceiver<Command>, updates: mpsc::UnboundedSender<ViewUpdate>) -> ActivityLog {
        let mut log = ActivityLog::new(self.config.idle_period());
        let mut reads: JoinSet<Result<String, ClipboardError>> = JoinSet::new();
        let mut settling: Vec<oneshot::Sender<()>> = Vec::new();
        let mut publisher = Publisher::new(updates);

        // Mount: arm the idle timer and announce the initial tab state.
        log.reset_idle_timer();
        publisher.publish(&log);

        loop {
            let deadline = log.idle_deadline();
            tokio::select! {
                biased;
                _ = timer::wait(deadline) => log.expire_idle(),
                Some(joined) = reads.join_next(), if !reads.is_empty() => {
                    let read = joined.unwrap_or_else(|e| Err(ClipboardError::Unavailable(e.to_string())));
                    log.handle_copy(read);
                }
                command = commands.recv() => match command {
                    Some(Command::Signal(signal)) => {
                        msg_debug!(format!("dispatching {:?}", signal));
                        for effect in self.dispatcher.dispatch(&signal, &mut log) {
                            match effect {
                                Effect::ReadClipboard => {
                                    reads.spawn(read_clipboard(Arc::clone(&self.clipboard), self.copy_read_delay));
                                }
                            }
                        }
                    }
                    Some(Command::Snapshot(reply)) => {
                        let _ = reply.send(log.snapshot());
                    }
                    Some(Command::Settle(reply)) => settling.push(reply),
                    Some(Command::Shutdown) | None => break,
                },
            }

            if reads.is_empty() {
                for reply in settling.drain(..) {
                    let _ = reply.send(());
                }
            }
            publisher.publish(&log);
        }

        reads.abort_all();
        log
    }
}

async fn read_clipboard(clipboard: Arc<dyn ClipboardSource>, delay: Duration) -> Result<String, ClipboardError> {
    if !delay.is_zero() {
        time::sleep(delay).await;
    }
    task::spawn_blocking(move || clipboard.read_text())
        .await
        .unwrap_or_else(|e| Err(ClipboardError::Unavailable(e.to_string())))
}

/// Owner-side handle of a running monitor.
///
/// Dropping the handle without calling [`shutdown`](Self::shutdown) aborts the
/// monitor task.
pub struct MonitorHandle {
    sender: SignalSender,
    updates: Option<mpsc::UnboundedReceiver<ViewUpdate>>,
    task: Option<JoinHandle<ActivityLog>>,
}

impl MonitorHandle {
    pub fn sender(&self) -> SignalSender {
        self.sender.clone()
    }

    pub fn send(&self, signal: Signal) -> Result<()> {
        if !self.sender.send(signal) {
            return Err(msg_error_anyhow!(Message::MonitorNotRunning));
        }
        Ok(())
    }

    /// Takes the outbound update stream. Only the first call returns it.
    pub fn take_updates(&mut self) -> Option<mpsc::UnboundedReceiver<ViewUpdate>> {
        self.updates.take()
    }

    /// Returns the state after every signal queued so far has been handled.
    pub async fn snapshot(&self) -> Result<ActivityState> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command(Command::Snapshot(reply_tx))?;
        reply_rx.await.map_err(|_| msg_error_anyhow!(Message::MonitorNotRunning))
    }

    /// Waits until every clipboard read started so far has been applied.
    pub async fn settle(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command(Command::Settle(reply_tx))?;
        reply_rx.await.map_err(|_| msg_error_anyhow!(Message::MonitorNotRunning))
    }

    /// Stops the monitor after the signals already queued and returns the final log.
    pub async fn shutdown(mut self) -> Result<ActivityLog> {
        let task = self.task.take().ok_or_else(|| msg_error_anyhow!(Message::MonitorNotRunning))?;
        // The task may already be gone; awaiting it reports why.
        let _ = self.sender.tx.send(Command::Shutdown);
        task.await.map_err(|e| msg_error_anyhow!(Message::MonitorTaskPanicked(e.to_string())))
    }

    fn command(&self, command: Command) -> Result<()> {
        self.sender.tx.send(command).map_err(|_| msg_error_anyhow!(Message::MonitorNotRunning))
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
