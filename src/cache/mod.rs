//! TTL-bounded, single-flight memoization in front of the analysis engine.

use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::api::RequestKey;
use crate::error::ChartResult;
use crate::render::VisualizationBundle;

/// Default entry lifetime, matching the upstream analysis cache.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Runtime metrics exposed by the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub coalesced: u64,
    pub size: usize,
}

/// Outcome shared between the computing leader and coalesced waiters.
struct Flight {
    outcome: Mutex<Option<ChartResult<Arc<VisualizationBundle>>>>,
    done: Condvar,
}

impl Flight {
    fn new() -> Self {
        Self {
            outcome: Mutex::new(None),
            done: Condvar::new(),
        }
    }

    fn resolve(&self, result: ChartResult<Arc<VisualizationBundle>>) {
        let mut outcome = lock_ignoring_poison(&self.outcome);
        *outcome = Some(result);
        self.done.notify_all();
    }

    fn wait(&self) -> ChartResult<Arc<VisualizationBundle>> {
        let mut outcome = lock_ignoring_poison(&self.outcome);
        loop {
            if let Some(result) = outcome.as_ref() {
                return result.clone();
            }
            outcome = self
                .done
                .wait(outcome)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

enum Slot {
    Ready {
        bundle: Arc<VisualizationBundle>,
        expires_at: Instant,
    },
    InFlight(Arc<Flight>),
}

#[derive(Default)]
struct CacheState {
    slots: HashMap<RequestKey, Slot>,
    hits: u64,
    misses: u64,
    coalesced: u64,
}

enum Role {
    Hit(Arc<VisualizationBundle>),
    Waiter(Arc<Flight>),
    Leader(Arc<Flight>),
}

/// Key-addressed memoization store with lazy TTL expiry.
///
/// At most one `compute` runs per key at a time: the first caller for an
/// absent key becomes the leader and computes with no lock held, while
/// concurrent callers for the same key block until the leader resolves and
/// then observe the identical outcome. A failed computation leaves no
/// entry, so the next caller retries from scratch. Entries become visible
/// atomically; distinct keys never wait on each other.
pub struct AnalysisCache {
    ttl: Duration,
    state: Mutex<CacheState>,
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl AnalysisCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: Mutex::new(CacheState::default()),
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached bundle for `key`, computing it at most once.
    pub fn get_or_compute<F>(
        &self,
        key: RequestKey,
        compute: F,
    ) -> ChartResult<Arc<VisualizationBundle>>
    where
        F: FnOnce() -> ChartResult<VisualizationBundle>,
    {
        let role = {
            let mut state = self.lock_state();
            match state.slots.get(&key) {
                Some(Slot::Ready { bundle, expires_at }) if *expires_at > Instant::now() => {
                    let bundle = Arc::clone(bundle);
                    state.hits += 1;
                    Role::Hit(bundle)
                }
                Some(Slot::InFlight(flight)) => {
                    let flight = Arc::clone(flight);
                    state.coalesced += 1;
                    Role::Waiter(flight)
                }
                _ => {
                    // Absent or past its TTL; this caller leads.
                    state.misses += 1;
                    let flight = Arc::new(Flight::new());
                    state
                        .slots
                        .insert(key.clone(), Slot::InFlight(Arc::clone(&flight)));
                    Role::Leader(flight)
                }
            }
        };

        match role {
            Role::Hit(bundle) => {
                trace!(?key, "analysis cache hit");
                Ok(bundle)
            }
            Role::Waiter(flight) => {
                trace!(?key, "awaiting in-flight analysis");
                flight.wait()
            }
            Role::Leader(flight) => {
                debug!(?key, "computing analysis");
                let result = compute().map(Arc::new);
                {
                    let mut state = self.lock_state();
                    match &result {
                        Ok(bundle) => {
                            state.slots.insert(
                                key,
                                Slot::Ready {
                                    bundle: Arc::clone(bundle),
                                    expires_at: Instant::now() + self.ttl,
                                },
                            );
                        }
                        Err(_) => {
                            // Failures must not poison the cache.
                            state.slots.remove(&key);
                        }
                    }
                }
                flight.resolve(result.clone());
                result
            }
        }
    }

    /// Drops entries past their TTL, returning how many were removed.
    /// Expiry is otherwise lazy; no background sweep exists.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut state = self.lock_state();
        let before = state.slots.len();
        state.slots.retain(|_, slot| match slot {
            Slot::Ready { expires_at, .. } => *expires_at > now,
            Slot::InFlight(_) => true,
        });
        before - state.slots.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock_state().slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock_state().slots.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let state = self.lock_state();
        CacheStats {
            hits: state.hits,
            misses: state.misses,
            coalesced: state.coalesced,
            size: state.slots.len(),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, CacheState> {
        lock_ignoring_poison(&self.state)
    }
}

fn lock_ignoring_poison<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
