use crate::error::ApiError;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::oneshot;
use tracing::debug;

/// Outcome of one refresh attempt: the new access token or the failure.
pub type RefreshOutcome = std::result::Result<String, ApiError>;

type Waiter = oneshot::Sender<RefreshOutcome>;

enum RefreshState {
    Idle,
    Refreshing { waiters: VecDeque<Waiter> },
}

struct Gate {
    state: RefreshState,
    /// Bumped each time an exchange settles with a real outcome.
    generation: u64,
    last: Option<RefreshOutcome>,
}

enum Entry {
    Lead,
    Wait(oneshot::Receiver<RefreshOutcome>),
    Settled(RefreshOutcome),
}

/// Single-flight gate for token refresh.
///
/// - Idle: the first caller becomes the leader and runs the exchange.
/// - Refreshing: later callers queue and receive the leader's outcome.
/// - Settlement drains the queue FIFO, once, with one outcome for everybody.
///
/// Callers pass the [`generation`](Self::generation) they observed before
/// sending. A caller that arrives after a newer exchange already settled gets
/// that outcome instead of starting another one.
///
/// The exchange future is responsible for updating the credential store, so
/// the store is already current when waiters wake up.
pub struct RefreshCoordinator {
    gate: Mutex<Gate>,
    started: AtomicU64,
}

impl Default for RefreshCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self {
            gate: Mutex::new(Gate {
                state: RefreshState::Idle,
                generation: 0,
                last: None,
            }),
            started: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Gate> {
        // Critical sections never panic mid-update, so a poisoned gate is still consistent.
        self.gate.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_refreshing(&self) -> bool {
        matches!(self.lock().state, RefreshState::Refreshing { .. })
    }

    /// Callers currently queued behind the in-flight refresh.
    pub fn pending(&self) -> usize {
        match &self.lock().state {
            RefreshState::Refreshing { waiters } => waiters.len(),
            RefreshState::Idle => 0,
        }
    }

    /// Number of exchanges started since creation.
    pub fn refreshes_started(&self) -> u64 {
        self.started.load(Ordering::SeqCst)
    }

    /// Number of exchanges settled since creation. Abandoned ones don't count.
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Run `exchange` unless a refresh is already in flight, in which case
    /// wait for that one instead. If one settled after `seen_generation`, its
    /// outcome is returned as is.
    pub async fn run<F, Fut>(&self, seen_generation: u64, exchange: F) -> RefreshOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = RefreshOutcome>,
    {
        let entry = {
            let mut gate = self.lock();
            let Gate {
                state,
                generation,
                last,
            } = &mut *gate;
            match &mut *state {
                RefreshState::Refreshing { waiters } => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push_back(tx);
                    debug!(queued = waiters.len(), "token refresh in flight, queued");
                    Entry::Wait(rx)
                }
                RefreshState::Idle => match last {
                    Some(outcome) if *generation != seen_generation => {
                        debug!(
                            seen_generation,
                            generation = *generation,
                            "token refresh already settled, reusing outcome"
                        );
                        Entry::Settled(outcome.clone())
                    }
                    _ => {
                        *state = RefreshState::Refreshing {
                            waiters: VecDeque::new(),
                        };
                        Entry::Lead
                    }
                },
            }
        };

        match entry {
            Entry::Settled(outcome) => return outcome,
            Entry::Wait(rx) => return rx.await.unwrap_or_else(|_| Err(abandoned())),
            Entry::Lead => {}
        }

        self.started.fetch_add(1, Ordering::SeqCst);
        let mut leader = Leader {
            coordinator: self,
            settled: false,
        };
        let outcome = exchange().await;
        leader.settle(&outcome);
        outcome
    }

    /// Resolve every queued waiter with `outcome` and return to idle.
    /// `record` marks a real settlement that later callers may reuse.
    fn drain(&self, outcome: &RefreshOutcome, record: bool) {
        let waiters = {
            let mut gate = self.lock();
            if record {
                gate.generation += 1;
                gate.last = Some(outcome.clone());
            }
            match std::mem::replace(&mut gate.state, RefreshState::Idle) {
                RefreshState::Refreshing { waiters } => waiters,
                RefreshState::Idle => VecDeque::new(),
            }
        };
        debug!(
            waiters = waiters.len(),
            success = outcome.is_ok(),
            "token refresh settled"
        );
        for waiter in waiters {
            // A waiter whose caller was dropped simply misses the result.
            let _ = waiter.send(outcome.clone());
        }
    }
}

fn abandoned() -> ApiError {
    ApiError::authentication_required("token refresh was abandoned before completing")
}

/// Settles the coordinator even if the leader's future is dropped mid-refresh.
struct Leader<'a> {
    coordinator: &'a RefreshCoordinator,
    settled: bool,
}

impl Leader<'_> {
    fn settle(&mut self, outcome: &RefreshOutcome) {
        self.settled = true;
        self.coordinator.drain(outcome, true);
    }
}

impl Drop for Leader<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.coordinator.drain(&Err(abandoned()), false);
        }
    }
}
