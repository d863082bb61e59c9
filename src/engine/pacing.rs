//! Pacing primitives shared between the controller and a worker
//!
//! - [`StepDelay`]: the process-wide pause between steps, tunable at any
//!   time from the UI thread
//! - [`CancelToken`]: a one-shot stop flag whose wait wakes up as soon as
//!   the flag is raised, so a stop never waits out a full delay

use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Shortest pause the engine will honour
pub const MIN_STEP_DELAY: Duration = Duration::from_micros(1);

/// Delay the worker sleeps for after each step
#[derive(Debug)]
pub struct StepDelay {
    micros: AtomicU64,
}

impl StepDelay {
    pub fn new(delay: Duration) -> Self {
        StepDelay {
            micros: AtomicU64::new(Self::to_micros(delay)),
        }
    }

    fn to_micros(delay: Duration) -> u64 {
        let delay = delay.max(MIN_STEP_DELAY);
        u64::try_from(delay.as_micros()).unwrap_or(u64::MAX)
    }

    pub fn get(&self) -> Duration {
        Duration::from_micros(self.micros.load(Ordering::Relaxed))
    }

    /// Replace the delay; a zero duration is raised to [`MIN_STEP_DELAY`]
    pub fn set(&self, delay: Duration) {
        self.micros.store(Self::to_micros(delay), Ordering::Relaxed);
    }
}

impl Default for StepDelay {
    fn default() -> Self {
        Self::new(Duration::from_millis(50))
    }
}

/// Cooperative cancellation flag for one run
#[derive(Debug, Default)]
pub struct CancelToken {
    cancelled: Mutex<bool>,
    wake: Condvar,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag and wake a worker blocked in [`CancelToken::wait`]
    pub fn cancel(&self) {
        let mut cancelled = self.cancelled.lock();
        *cancelled = true;
        self.wake.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.lock()
    }

    /// Sleep for `timeout` or until cancelled, whichever comes first.
    ///
    /// Returns `true` if the token was cancelled.
    pub fn wait(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut cancelled = self.cancelled.lock();
        while !*cancelled {
            if self.wake.wait_until(&mut cancelled, deadline).timed_out() {
                break;
            }
        }
        *cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_delay_clamped() {
        let delay = StepDelay::new(Duration::ZERO);
        assert_eq!(delay.get(), MIN_STEP_DELAY);

        delay.set(Duration::from_millis(120));
        assert_eq!(delay.get(), Duration::from_millis(120));
    }

    #[test]
    fn test_wait_times_out() {
        let token = CancelToken::new();
        let start = Instant::now();
        assert!(!token.wait(Duration::from_millis(20)));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_cancel_interrupts_wait() {
        let token = Arc::new(CancelToken::new());
        let waiter = {
            let token = Arc::clone(&token);
            thread::spawn(move || {
                let start = Instant::now();
                let cancelled = token.wait(Duration::from_secs(30));
                (cancelled, start.elapsed())
            })
        };

        thread::sleep(Duration::from_millis(20));
        token.cancel();

        let (cancelled, elapsed) = waiter.join().unwrap();
        assert!(cancelled);
        assert!(elapsed < Duration::from_secs(5));
    }

    #[test]
    fn test_wait_after_cancel_returns_immediately() {
        let token = CancelToken::new();
        token.cancel();
        assert!(token.is_cancelled());
        assert!(token.wait(Duration::from_secs(30)));
    }
}
