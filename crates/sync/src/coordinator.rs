// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::transport::{DraftTransport, SaveRequest};
use carsale::DraftStore;
use carsale_domain::IdempotencyKey;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

/// Quiet period measured from the most recent edit before an
/// autosave fires.
pub const AUTOSAVE_QUIET_PERIOD: Duration = Duration::from_secs(3);

/// Shared handle to the draft store.
///
/// The store itself stays the single source of truth; this handle
/// only adds the locking needed to share it between the wizard side
/// and the autosave coordinator. Closures run synchronously under
/// the lock and never across an await, so snapshots cannot tear.
#[derive(Debug, Clone)]
pub struct SharedDraftStore(Arc<Mutex<DraftStore>>);

impl SharedDraftStore {
    /// Wraps a store for shared access.
    #[must_use]
    pub fn new(store: DraftStore) -> Self {
        Self(Arc::new(Mutex::new(store)))
    }

    /// Runs a closure against the store under the lock.
    pub fn with<R>(&self, f: impl FnOnce(&mut DraftStore) -> R) -> R {
        let mut guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl Default for SharedDraftStore {
    fn default() -> Self {
        Self::new(DraftStore::new())
    }
}

/// Notifies the coordinator that the draft was edited.
///
/// The wizard side calls [`EditSignal::notify`] after every store
/// mutation; the coordinator debounces from there.
#[derive(Debug)]
pub struct EditSignal {
    tx: watch::Sender<u64>,
}

impl EditSignal {
    /// Creates the signal and the receiver half for a coordinator.
    #[must_use]
    pub fn channel() -> (Self, watch::Receiver<u64>) {
        let (tx, rx) = watch::channel(0);
        (Self { tx }, rx)
    }

    /// Records one edit.
    pub fn notify(&self) {
        self.tx.send_modify(|edits| *edits += 1);
    }
}

/// A save snapshot taken under the store lock.
struct Snapshot {
    request: SaveRequest,
    /// Identity of the draft this save was scheduled for. The
    /// idempotency key is stable for the draft's lifetime and changes
    /// on reset, which makes it the stale-write guard: a response for
    /// a superseded draft must not write into the new draft's
    /// metadata.
    generation: IdempotencyKey,
}

/// Keeps the remote draft store approximately in sync with local
/// edits, without ever touching the finalize path.
///
/// Saves are debounced behind a quiet period measured from the most
/// recent edit; any edit inside the window re-arms the timer. At most
/// one save is logically in flight; failures are silent and the next
/// dirty edit retries.
#[derive(Debug)]
pub struct AutosaveCoordinator<T> {
    store: SharedDraftStore,
    transport: T,
    edits: watch::Receiver<u64>,
    quiet_period: Duration,
}

impl<T: DraftTransport> AutosaveCoordinator<T> {
    /// Creates a coordinator with the default quiet period.
    #[must_use]
    pub const fn new(store: SharedDraftStore, transport: T, edits: watch::Receiver<u64>) -> Self {
        Self {
            store,
            transport,
            edits,
            quiet_period: AUTOSAVE_QUIET_PERIOD,
        }
    }

    /// Overrides the quiet period.
    #[must_use]
    pub const fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    /// Drives the autosave loop until every edit signal is gone.
    ///
    /// Intended to be raced against a teardown signal; dropping the
    /// future cancels any scheduled (not yet fired) save, after which
    /// [`AutosaveCoordinator::flush`] delivers the replacement save.
    pub async fn run(&mut self) {
        loop {
            if self.edits.changed().await.is_err() {
                break;
            }
            self.debounce().await;
            self.attempt_save(false).await;
        }
    }

    /// Best-effort immediate save for the teardown path.
    ///
    /// Bypasses the debounce window and the in-flight guard so the
    /// latest payload still goes out; does nothing when the draft is
    /// clean.
    pub async fn flush(&self) {
        self.attempt_save(true).await;
    }

    /// Waits out the quiet period, re-arming on every further edit.
    async fn debounce(&mut self) {
        loop {
            let timer = tokio::time::sleep(self.quiet_period);
            tokio::pin!(timer);
            tokio::select! {
                () = &mut timer => return,
                changed = self.edits.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
            }
        }
    }

    async fn attempt_save(&self, is_flush: bool) {
        let Some(snapshot) = self.take_snapshot(is_flush) else {
            return;
        };

        match self.transport.save(snapshot.request).await {
            Ok(saved) => self.store.with(|store| {
                if store.meta().idempotency_key == snapshot.generation {
                    store.mark_saved(saved.id, saved.updated_at);
                } else {
                    debug!("discarding save response for a superseded draft");
                }
            }),
            Err(err) => {
                debug!(error = %err, "autosave failed; the next edit retries");
                self.store.with(|store| {
                    if store.meta().idempotency_key == snapshot.generation {
                        store.clear_saving();
                    }
                });
            }
        }
    }

    fn take_snapshot(&self, is_flush: bool) -> Option<Snapshot> {
        self.store.with(|store| {
            if !store.session().is_dirty {
                return None;
            }
            if store.session().is_saving && !is_flush {
                return None;
            }
            store.mark_saving();
            Some(Snapshot {
                request: SaveRequest {
                    id: store.meta().draft_id.clone(),
                    payload: store.draft().clone(),
                },
                generation: store.meta().idempotency_key.clone(),
            })
        })
    }
}
