//! Publisher loop: rebuilds and republishes the snapshot once per host tick

use crate::game::{build_snapshot, BuildResult};
use crate::roster::RosterSource;
use crate::state::{Journal, SharedState};
use journal_shared::{TagRequest, EMPTY_SNAPSHOT_JSON};
use log::{debug, error, info};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Owns the path from the host roster to the published snapshot.
///
/// Shared by the tick loop and the HTTP handlers; every mutation of the
/// journal goes through here under the write lock.
pub struct Publisher {
    roster: Arc<dyn RosterSource>,
    state: SharedState,
    ticks: AtomicU64,
    session_active: AtomicBool,
}

impl Publisher {
    pub fn new(roster: Arc<dyn RosterSource>, state: SharedState) -> Self {
        Self {
            roster,
            state,
            ticks: AtomicU64::new(0),
            session_active: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// Number of ticks handled so far
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Tick handler. Unconditionally rebuilds and republishes.
    pub async fn tick(&self) -> BuildResult {
        let tick = self.ticks.fetch_add(1, Ordering::Relaxed) + 1;

        let mut journal = self.state.write().await;
        let result = self.rebuild(&mut journal);

        if tick % 300 == 0 {
            debug!(
                "Tick {}: {} players, {} notes",
                tick,
                result.snapshot.players.len(),
                journal.notes.len()
            );
        }

        result
    }

    /// Applies a tag write and republishes inside the same critical section.
    pub async fn apply_tag(&self, request: &TagRequest) {
        let mut journal = self.state.write().await;

        if request.is_clear() {
            journal.notes.clear(request.player_id);
            info!("Player {} note cleared", request.player_id);
        } else {
            journal.notes.set(request.player_id, request.tag.clone());
            info!("Player {} tagged as {}", request.player_id, request.tag);
        }

        self.rebuild(&mut journal);
    }

    /// Current published snapshot
    pub async fn snapshot(&self) -> Arc<str> {
        self.state.read().await.snapshot()
    }

    fn rebuild(&self, journal: &mut Journal) -> BuildResult {
        let result = build_snapshot(self.roster.as_ref(), &mut journal.notes);

        let json = match result.snapshot.to_json() {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize snapshot: {}", e);
                EMPTY_SNAPSHOT_JSON.to_string()
            }
        };
        journal.publish(json);

        let was_active = self
            .session_active
            .swap(result.session_active, Ordering::Relaxed);
        if was_active != result.session_active {
            if result.session_active {
                info!(
                    "Session started with {} players",
                    result.snapshot.players.len()
                );
            } else {
                info!("Session ended");
            }
        }

        result
    }
}

/// Runs the publisher once for every tick notification from the host.
///
/// Returns when the host drops its sender.
pub async fn run_publisher(publisher: Arc<Publisher>, mut host_ticks: mpsc::Receiver<u64>) {
    info!("Publisher loop started");

    while let Some(host_tick) = host_ticks.recv().await {
        let result = publisher.tick().await;
        if host_tick % 300 == 0 {
            debug!(
                "Host tick {} published (session active: {})",
                host_tick, result.session_active
            );
        }
    }

    info!("Host tick source closed, publisher loop stopping");
}
