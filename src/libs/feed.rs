//! JSON-lines signal feed.
//!
//! A feed is a text stream with one signal per line, optionally delayed:
//!
//! ```text
//! # comments and blank lines are skipped
//! {"type": "focus"}
//! {"type": "key_down", "key": "a", "delay_ms": 250}
//! {"type": "visibility", "state": "hidden", "delay_ms": 1000}
//! ```
//!
//! `delay_ms` is slept before the signal is sent, so a recorded session can be
//! replayed with its original pacing.

use crate::libs::monitor::SignalSender;
use crate::libs::signal::Signal;
use serde::Deserialize;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::{self, Duration};

/// Path that selects standard input.
pub const STDIN_PATH: &str = "-";

/// A boxed line reader over a file or stdin.
pub type FeedReader = Box<dyn AsyncBufRead + Unpin + Send>;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("invalid signal on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to open signal feed {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read signal feed: {0}")]
    Io(#[from] std::io::Error),
    #[error("activity monitor stopped at line {0}")]
    Closed(usize),
}

/// One parsed feed line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedLine {
    #[serde(default)]
    pub delay_ms: u64,
    #[serde(flatten)]
    pub signal: Signal,
}

impl FeedLine {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Opens `path` for reading, or stdin when `path` is `-`.
pub async fn open(path: &str) -> Result<FeedReader, FeedError> {
    if path == STDIN_PATH {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).await.map_err(|source| FeedError::Open {
        path: path.to_string(),
        source,
    })?;
    Ok(Box::new(BufReader::new(file)))
}

/// Parses line `number` (1-based). Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str, number: usize) -> Result<Option<FeedLine>, FeedError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some).map_err(|source| FeedError::Parse { line: number, source })
}

/// Streams every signal of `reader` into the monitor. Returns the number of signals sent.
pub async fn pump<R>(reader: R, sender: &SignalSender) -> Result<usize, FeedError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut number = 0;
    let mut sent = 0;

    while let Some(line) = lines.next_line().await? {
        number += 1;
        let Some(feed_line) = parse_line(&line, number)? else {
            continue;
        };
        if feed_line.delay_ms > 0 {
            time::sleep(feed_line.delay()).await;
        }
        if !sender.send(feed_line.signal) {
            return Err(FeedError::Closed(number));
        }
        sent += 1;
    }

    Ok(sent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::signal::Visibility;

    #[test]
    fn test_parse_line_with_delay() {
        let line = parse_line(r#"{"type":"visibility","state":"visible","delay_ms":1500}"#, 1).unwrap().unwrap();
        assert_eq!(line.delay(), Duration::from_millis(1500));
        assert_eq!(line.signal, Signal::Visibility { state: Visibility::Visible });
    }

    #[test]
    fn test_parse_line_skips_comments_and_blanks() {
        assert!(parse_line("", 1).unwrap().is_none());
        assert!(parse_line("   ", 2).unwrap().is_none());
        assert!(parse_line("# focus first", 3).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        let error = open("/nonexistent/tabmon/feed.jsonl").await.err().unwrap();
        assert!(matches!(error, FeedError::Open { .. }));
    }

    #[test]
    fn test_parse_line_reports_line_number() {
        let error = parse_line(r#"{"type":"teleport"}"#, 7).unwrap_err();
        assert!(matches!(error, FeedError::Parse { line: 7, .. }));
        assert!(error.to_string().starts_with("invalid signal on line 7"));
    }
}
