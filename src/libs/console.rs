//! Console output that stays readable while the terminal is in raw mode.
//!
//! Raw mode turns off the terminal's `\n` → `\r\n` translation, so every
//! diagnostic written to stderr during `watch` would start where the previous
//! line ended. [`Console`] is the `tracing` writer of the binary: it restores
//! the carriage return while raw mode is on, and it mutes the `tab_leave`
//! channel while a live view already renders the same alerts on that terminal.

use crate::libs::store::TAB_LEAVE_TARGET;
use std::io::{self, IsTerminal, Stderr, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::Metadata;
use tracing_subscriber::fmt::MakeWriter;

static RAW_MODE: AtomicBool = AtomicBool::new(false);
static VIEW_RENDERING: AtomicBool = AtomicBool::new(false);

pub fn set_raw_mode(enabled: bool) {
    RAW_MODE.store(enabled, Ordering::SeqCst);
}

pub fn is_raw_mode() -> bool {
    RAW_MODE.load(Ordering::SeqCst)
}

pub fn set_view_rendering(rendering: bool) {
    VIEW_RENDERING.store(rendering, Ordering::SeqCst);
}

pub fn is_view_rendering() -> bool {
    VIEW_RENDERING.load(Ordering::SeqCst)
}

/// Line terminator for direct console prints.
pub fn line_ending() -> &'static str {
    if is_raw_mode() {
        "\r\n"
    } else {
        "\n"
    }
}

/// Whether an event on `target` stays off the console.
///
/// Alerts are already on screen when a live view renders to the terminal
/// stderr points at. Redirected stderr keeps the full channel.
pub fn mutes(target: &str, view_rendering: bool, stderr_is_terminal: bool) -> bool {
    target == TAB_LEAVE_TARGET && view_rendering && stderr_is_terminal
}

/// One console write. Muted lines are swallowed.
pub struct ConsoleLine<W: Write> {
    inner: Option<W>,
    raw: bool,
}

impl<W: Write> ConsoleLine<W> {
    pub fn new(inner: W, raw: bool) -> Self {
        Self { inner: Some(inner), raw }
    }

    pub fn muted() -> Self {
        Self { inner: None, raw: false }
    }
}

impl<W: Write> Write for ConsoleLine<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let Some(inner) = self.inner.as_mut() else {
            return Ok(buf.len());
        };
        if !self.raw {
            return inner.write(buf);
        }

        let mut start = 0;
        for (i, byte) in buf.iter().enumerate() {
            if *byte == b'\n' && (i == 0 || buf[i - 1] != b'\r') {
                inner.write_all(&buf[start..i])?;
                inner.write_all(b"\r\n")?;
                start = i + 1;
            }
        }
        inner.write_all(&buf[start..])?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.inner.as_mut() {
            Some(inner) => inner.flush(),
            None => Ok(()),
        }
    }
}

/// `tracing` writer over stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console;

impl<'a> MakeWriter<'a> for Console {
    type Writer = ConsoleLine<Stderr>;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleLine::new(io::stderr(), is_raw_mode())
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        if mutes(meta.target(), is_view_rendering(), io::stderr().is_terminal()) {
            return ConsoleLine::muted();
        }
        self.make_writer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_lines_get_carriage_returns() {
        let mut buffer = Vec::new();
        let mut line = ConsoleLine::new(&mut buffer, true);
        line.write_all(b"first\nsecond\r\nthird\n").unwrap();
        assert_eq!(buffer, b"first\r\nsecond\r\nthird\r\n");
    }

    #[test]
    fn test_cooked_lines_pass_through() {
        let mut buffer = Vec::new();
        let mut line = ConsoleLine::new(&mut buffer, false);
        line.write_all(b"first\nsecond\n").unwrap();
        assert_eq!(buffer, b"first\nsecond\n");
    }

    #[test]
    fn test_muted_line_writes_nothing() {
        let mut line: ConsoleLine<Vec<u8>> = ConsoleLine::muted();
        assert_eq!(line.write(b"alert\n").unwrap(), 6);
        assert!(line.inner.is_none());
    }

    #[test]
    fn test_tab_leave_muted_only_under_live_view_on_terminal() {
        assert!(mutes(TAB_LEAVE_TARGET, true, true));
        assert!(!mutes(TAB_LEAVE_TARGET, false, true));
        assert!(!mutes(TAB_LEAVE_TARGET, true, false));
        assert!(!mutes("tabmon::libs::monitor", true, true));
    }
}
