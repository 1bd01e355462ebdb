//! Per-venue request nonces.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use dashmap::DashMap;
use model::{ExchangeId, ExchangeIdentity};

/// Source of nonce candidates, in microseconds.
pub type NonceClock = fn() -> u64;

fn system_clock_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or_default()
}

/// Issues strictly increasing nonces, one sequence per venue identity.
///
/// The candidate is the current time in microseconds; when calls arrive
/// faster than the clock advances (or the clock steps back) the previous
/// value plus one is issued instead. State lives only as long as the
/// registry, so a new process starts from the clock again.
pub struct NonceRegistry {
    last_issued: DashMap<ExchangeId, AtomicU64>,
    clock: NonceClock,
}

impl NonceRegistry {
    pub fn new() -> Self {
        Self::with_clock(system_clock_micros)
    }

    /// Registry driven by a custom clock.
    pub fn with_clock(clock: NonceClock) -> Self {
        Self {
            last_issued: DashMap::new(),
            clock,
        }
    }

    /// Issue the next nonce for `identity`.
    ///
    /// Concurrent callers sharing an identity always receive distinct values.
    pub fn next_nonce(&self, identity: &ExchangeIdentity) -> u64 {
        let candidate = (self.clock)();

        let (previous, issued) = {
            let counter = self
                .last_issued
                .entry(identity.id())
                .or_insert_with(|| AtomicU64::new(0));

            let mut issued = candidate;
            let previous = counter
                .fetch_update(Ordering::AcqRel, Ordering::Acquire, |previous| {
                    issued = if candidate <= previous {
                        previous + 1
                    } else {
                        candidate
                    };
                    Some(issued)
                })
                .unwrap_or_else(|previous| previous);
            (previous, issued)
        };

        tracing::debug!(
            exchange = %identity,
            previous_nonce = previous,
            candidate = candidate,
            nonce = issued,
            "Generated nonce"
        );

        issued
    }

    /// Last nonce issued for `id`, if any.
    pub fn last_issued(&self, id: ExchangeId) -> Option<u64> {
        self.last_issued
            .get(&id)
            .map(|counter| counter.load(Ordering::Acquire))
    }
}

impl Default for NonceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NonceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonceRegistry")
            .field("identities", &self.last_issued.len())
            .finish()
    }
}
