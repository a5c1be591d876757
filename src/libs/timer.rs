//! Single-shot debounced timer.
//!
//! [`DebounceTimer`] holds a deadline rather than a running task. Re-arming is
//! a plain assignment, so cancel-and-reschedule never leaves a stale timer
//! behind. The owner awaits [`wait`] on the current deadline inside its event
//! loop and calls [`DebounceTimer::cancel`] once the deadline fires.

use std::future;
use tokio::time::{self, Duration, Instant};

#[derive(Debug, Clone)]
pub struct DebounceTimer {
    period: Duration,
    deadline: Option<Instant>,
}

impl DebounceTimer {
    /// Creates an unarmed timer with the given quiet window.
    pub fn new(period: Duration) -> Self {
        Self { period, deadline: None }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Arms the timer to fire one period from now.
    pub fn start(&mut self) {
        self.deadline = Some(Instant::now() + self.period);
    }

    /// Cancels any pending deadline and schedules a fresh one.
    pub fn reset(&mut self) {
        self.cancel();
        self.start();
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

/// Resolves at `deadline`, or never when the timer is unarmed.
pub async fn wait(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer_is_unarmed() {
        let timer = DebounceTimer::new(Duration::from_secs(60));
        assert!(timer.deadline().is_none());
        assert_eq!(timer.period(), Duration::from_secs(60));
    }

    #[test]
    fn test_cancel_disarms() {
        let mut timer = DebounceTimer::new(Duration::from_secs(60));
        timer.start();
        assert!(timer.deadline().is_some());
        timer.cancel();
        assert!(timer.deadline().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_pushes_deadline_forward() {
        let mut timer = DebounceTimer::new(Duration::from_secs(60));
        timer.start();
        let first = timer.deadline().unwrap();

        time::advance(Duration::from_secs(30)).await;
        timer.reset();
        let second = timer.deadline().unwrap();

        assert_eq!(second - first, Duration::from_secs(30));
        assert_eq!(second, Instant::now() + Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_resolves_at_deadline() {
        let mut timer = DebounceTimer::new(Duration::from_secs(5));
        timer.start();
        let started = Instant::now();
        wait(timer.deadline()).await;
        assert!(started.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_without_deadline_never_resolves() {
        let outcome = time::timeout(Duration::from_secs(3600), wait(None)).await;
        assert!(outcome.is_err());
    }
}
