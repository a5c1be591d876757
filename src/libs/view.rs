//! Rendering of the activity log.
//!
//! [`TerminalView`] is the live rendering surface: entries scroll by in
//! arrival order, alerts in red and everything else in green, and the
//! terminal title carries the `active`/`inactive` state. [`View`] prints a
//! finished log as a table.

use super::console;
use super::messages::Message;
use super::monitor::ViewUpdate;
use super::store::LogEntry;
use anyhow::Result;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::SetTitle;
use crossterm::{execute, queue};
use prettytable::{row, Table};
use std::io::{stdout, Write};

pub const TITLE: &str = "Tab & User Activity Monitor";

/// Title text reflecting the tab state.
pub fn title_for(tab_active: bool) -> String {
    let status = if tab_active { Message::ActiveStatus } else { Message::InactiveStatus };
    format!("{} [{}]", TITLE, status)
}

pub fn entry_color(entry: &LogEntry) -> Color {
    if entry.is_alert {
        Color::Red
    } else {
        Color::Green
    }
}

/// Live rendering surface bound to a terminal. Dropping it resets colors and title.
///
/// While a view exists the console mutes its own copy of the alert channel.
pub struct TerminalView<W: Write = std::io::Stdout> {
    out: W,
    raw_mode: bool,
}

impl TerminalView {
    /// Binds the view to stdout. `raw_mode` switches line endings to `\r\n`.
    pub fn stdout(raw_mode: bool) -> Result<Self> {
        TerminalView::new(stdout(), raw_mode)
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(mut out: W, raw_mode: bool) -> Result<Self> {
        execute!(out, SetTitle(title_for(true)))?;
        console::set_view_rendering(true);
        Ok(Self { out, raw_mode })
    }

    pub fn apply(&mut self, update: &ViewUpdate) -> Result<()> {
        match update {
            ViewUpdate::Appended(entry) => self.print_entry(entry),
            ViewUpdate::TabActive(active) => {
                execute!(self.out, SetTitle(title_for(*active)))?;
                Ok(())
            }
        }
    }

    fn print_entry(&mut self, entry: &LogEntry) -> Result<()> {
        let line_end = if self.raw_mode { "\r\n" } else { "\n" };
        queue!(
            self.out,
            SetForegroundColor(entry_color(entry)),
            Print(&entry.text),
            ResetColor,
            Print(line_end)
        )?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Drop for TerminalView<W> {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, SetTitle(""));
        console::set_view_rendering(false);
    }
}

pub struct View {}

impl View {
    /// Builds the table of a finished log.
    pub fn entries_table(entries: &[LogEntry]) -> Table {
        let mut table = Table::new();

        table.add_row(row!["#", "ENTRY", "ALERT"]);
        for (index, entry) in entries.iter().enumerate() {
            let alert = if entry.is_alert { "yes" } else { "" };
            table.add_row(row![index + 1, entry.text, alert]);
        }
        table
    }

    pub fn entries(entries: &[LogEntry]) -> Result<()> {
        Self::entries_table(entries).printstd();
        Ok(())
    }
}
