//! Sliding-window limiter for provider calls.
//!
//! At most `max_calls` calls start within any `window`. A caller that finds
//! the window full sleeps until the oldest call ages out, but never longer
//! than `max_wait` in total. Durations too large to add to the clock mean
//! "no deadline" for `max_wait` and "never frees" for `window`.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RateLimitError {
    #[error("Rate limit saturated after waiting {waited:?}")]
    WaitExceeded { waited: Duration },
}

/// Shared call-timestamp window. One instance per provider, injected into
/// every invoker that talks to it.
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    max_calls: usize,
    window: Duration,
    max_wait: Duration,
    calls: Mutex<VecDeque<Instant>>,
}

impl SlidingWindowLimiter {
    pub fn new(max_calls: usize, window: Duration, max_wait: Duration) -> Self {
        Self {
            max_calls: max_calls.max(1),
            window,
            max_wait,
            calls: Mutex::new(VecDeque::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Instant>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reserve a slot for one call, waiting for capacity if needed.
    pub async fn acquire(&self) -> Result<(), RateLimitError> {
        let start = Instant::now();
        let deadline = start.checked_add(self.max_wait);

        loop {
            let wait = {
                let mut calls = self.lock();
                let now = Instant::now();
                while calls
                    .front()
                    .is_some_and(|oldest| now.duration_since(*oldest) >= self.window)
                {
                    calls.pop_front();
                }

                if calls.len() < self.max_calls {
                    calls.push_back(now);
                    return Ok(());
                }

                match calls.front().map(|oldest| oldest.checked_add(self.window)) {
                    Some(Some(free_at)) => free_at.saturating_duration_since(now),
                    Some(None) => Duration::MAX,
                    None => Duration::ZERO,
                }
            };

            let now = Instant::now();
            if let Some(deadline) = deadline
                && now.checked_add(wait).is_none_or(|ready| ready > deadline)
            {
                return Err(RateLimitError::WaitExceeded {
                    waited: now.duration_since(start),
                });
            }

            debug!("Rate limit window full, waiting {:?}", wait);
            tokio::time::sleep(wait).await;
        }
    }

    /// Calls recorded in the current window.
    pub fn in_flight(&self) -> usize {
        let now = Instant::now();
        self.lock()
            .iter()
            .filter(|t| now.duration_since(**t) < self.window)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_allows_calls_up_to_limit() {
        let limiter = SlidingWindowLimiter::new(3, Duration::from_secs(60), Duration::ZERO);
        for _ in 0..3 {
            limiter.acquire().await.unwrap();
        }
        assert_eq!(limiter.in_flight(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_window_to_free() {
        let limiter = SlidingWindowLimiter::new(2, Duration::from_secs(1), Duration::from_secs(5));
        limiter.acquire().await.unwrap();
        limiter.acquire().await.unwrap();

        let before = Instant::now();
        limiter.acquire().await.unwrap();
        assert!(before.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fails_beyond_wait_ceiling() {
        let limiter = SlidingWindowLimiter::new(1, Duration::from_secs(60), Duration::from_secs(1));
        limiter.acquire().await.unwrap();

        let err = limiter.acquire().await.unwrap_err();
        assert!(matches!(err, RateLimitError::WaitExceeded { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_max_wait_means_no_deadline() {
        let limiter =
            SlidingWindowLimiter::new(1, Duration::from_secs(1), Duration::from_secs(u64::MAX));
        limiter.acquire().await.unwrap();

        let before = Instant::now();
        limiter.acquire().await.unwrap();
        assert!(before.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_window_never_frees() {
        let limiter =
            SlidingWindowLimiter::new(1, Duration::from_secs(u64::MAX), Duration::from_secs(1));
        limiter.acquire().await.unwrap();

        let err = limiter.acquire().await.unwrap_err();
        assert!(matches!(err, RateLimitError::WaitExceeded { .. }));
        assert_eq!(limiter.in_flight(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_old_calls_age_out() {
        let limiter = SlidingWindowLimiter::new(1, Duration::from_secs(10), Duration::ZERO);
        limiter.acquire().await.unwrap();
        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(limiter.in_flight(), 0);
        limiter.acquire().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_share_window() {
        let limiter = Arc::new(SlidingWindowLimiter::new(
            2,
            Duration::from_secs(60),
            Duration::ZERO,
        ));
        let handles: Vec<_> = (0..5)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                tokio::spawn(async move { limiter.acquire().await.is_ok() })
            })
            .collect();

        let mut granted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                granted += 1;
            }
        }
        assert_eq!(granted, 2);
    }
}
