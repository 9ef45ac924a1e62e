//! Sliding-window admission control, one window per source.
//!
//! Each window admits at most `capacity` lookups in any trailing 60-second interval. Callers
//! for the same source serialize through a single admission slot: whoever holds the slot
//! prunes expired timestamps, then either records an admission or sleeps until the oldest
//! timestamp ages out. Admission order is lock-arrival order and is not strictly fair; a late
//! arrival can wait through several windows under sustained contention.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use shelfmark_core::{ShelfmarkError, Source};
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

/// Length of the rolling window.
pub const WINDOW: Duration = Duration::from_secs(60);

/// Admission state for a single source.
#[derive(Debug)]
pub struct SlidingWindow {
    capacity: usize,
    window: Duration,
    slot: tokio::sync::Mutex<()>,
    admitted: Mutex<VecDeque<Instant>>,
}

impl SlidingWindow {
    /// A 60-second window admitting `capacity` lookups. A capacity of zero is treated as one.
    #[must_use]
    pub fn new(capacity: u32) -> Self {
        Self::with_window(capacity, WINDOW)
    }

    /// A window of arbitrary length.
    #[must_use]
    pub fn with_window(capacity: u32, window: Duration) -> Self {
        let capacity = usize::try_from(capacity.max(1)).unwrap_or(usize::MAX);
        Self {
            capacity,
            window,
            slot: tokio::sync::Mutex::new(()),
            admitted: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
        }
    }

    /// Maximum admissions per window.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of admissions recorded within the trailing window.
    #[must_use]
    pub fn admitted_in_window(&self) -> usize {
        let now = Instant::now();
        let admitted = self.admitted.lock().unwrap_or_else(PoisonError::into_inner);
        admitted
            .iter()
            .filter(|t| now.duration_since(**t) < self.window)
            .count()
    }

    /// Wait until a lookup may proceed, then record it.
    ///
    /// # Errors
    /// Returns `ShelfmarkError::Cancelled` if `cancel` fires before admission. A cancelled
    /// caller never records a timestamp.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<(), ShelfmarkError> {
        let _slot = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(ShelfmarkError::Cancelled),
            guard = self.slot.lock() => guard,
        };

        loop {
            let Some(deadline) = self.try_admit(Instant::now()) else {
                return Ok(());
            };

            #[cfg(feature = "tracing")]
            tracing::debug!(
                wait_ms = u64::try_from(
                    deadline.saturating_duration_since(Instant::now()).as_millis()
                )
                .unwrap_or(u64::MAX),
                capacity = self.capacity,
                "rate window full; waiting for oldest admission to expire"
            );

            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(ShelfmarkError::Cancelled),
                () = sleep_until(deadline) => {}
            }
        }
    }

    /// Prune and admit at `now`. Returns the instant to retry at when the window is full.
    fn try_admit(&self, now: Instant) -> Option<Instant> {
        let mut admitted = self.admitted.lock().unwrap_or_else(PoisonError::into_inner);
        while admitted
            .front()
            .is_some_and(|t| now.duration_since(*t) >= self.window)
        {
            admitted.pop_front();
        }
        if admitted.len() < self.capacity {
            admitted.push_back(now);
            return None;
        }
        // capacity >= 1, so a full window has a front entry
        admitted.front().map(|oldest| *oldest + self.window)
    }
}

/// Per-source rate gate.
///
/// Windows are created on first use from the configured limit, or from
/// [`Source::default_rate_limit`] when none was configured, and live as long as the gate.
#[derive(Debug, Default)]
pub struct RateGate {
    limits: HashMap<Source, u32>,
    windows: Mutex<HashMap<Source, Arc<SlidingWindow>>>,
}

impl RateGate {
    /// A gate using the default limit of every source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A gate with explicit per-minute limits.
    #[must_use]
    pub fn with_limits(limits: impl IntoIterator<Item = (Source, u32)>) -> Self {
        Self {
            limits: limits.into_iter().collect(),
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Configured per-minute limit for `source`.
    #[must_use]
    pub fn limit(&self, source: Source) -> u32 {
        self.limits
            .get(&source)
            .copied()
            .unwrap_or_else(|| source.default_rate_limit())
    }

    /// The shared window for `source`.
    #[must_use]
    pub fn window(&self, source: Source) -> Arc<SlidingWindow> {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            windows
                .entry(source)
                .or_insert_with(|| Arc::new(SlidingWindow::new(self.limit(source)))),
        )
    }

    /// Wait for admission on `source`'s window.
    ///
    /// # Errors
    /// Returns `ShelfmarkError::Cancelled` if `cancel` fires before admission.
    pub async fn acquire(
        &self,
        source: Source,
        cancel: &CancellationToken,
    ) -> Result<(), ShelfmarkError> {
        self.window(source).acquire(cancel).await
    }
}
