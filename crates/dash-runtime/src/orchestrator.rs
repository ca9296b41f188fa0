//! Async dashboard orchestrator.
//!
//! Runs the [`Dispatcher`] in a tokio task.  The TUI sends [`ControlChange`]s
//! over one `mpsc` channel and receives [`FigureUpdate`]s on another, so the
//! event loop never blocks on figure computation and no state is shared.

use std::sync::Arc;

use dash_core::chart::Figure;
use dash_data::dataset::Dataset;
use tokio::sync::mpsc;

use crate::controls::{ControlChange, Controls};
use crate::dispatcher::{Dispatcher, FigureId};

// ── Public types ──────────────────────────────────────────────────────────────

/// A freshly rendered figure forwarded to the presentation layer.
#[derive(Debug, Clone)]
pub struct FigureUpdate {
    pub id: FigureId,
    pub figure: Figure,
}

// ── DashboardOrchestrator ─────────────────────────────────────────────────────

/// Background figure renderer.
///
/// Call [`DashboardOrchestrator::start`] to spawn the loop and receive the
/// channel endpoints.
pub struct DashboardOrchestrator {
    dataset: Arc<Dataset>,
    controls: Controls,
}

/// Channel endpoints returned by [`DashboardOrchestrator::start`].
pub struct OrchestratorChannels {
    pub changes: mpsc::Sender<ControlChange>,
    pub updates: mpsc::Receiver<FigureUpdate>,
}

impl DashboardOrchestrator {
    pub fn new(dataset: Arc<Dataset>, controls: Controls) -> Self {
        Self { dataset, controls }
    }

    /// Spawn the render loop.
    ///
    /// All five figures are rendered and sent immediately; afterwards only
    /// figures affected by a change are re-sent.  The loop exits when the
    /// change sender is dropped or the update receiver is closed.
    pub fn start(self) -> (OrchestratorChannels, DashboardHandle) {
        let (change_tx, change_rx) = mpsc::channel(32);
        let (update_tx, update_rx) = mpsc::channel(32);

        let handle = tokio::spawn(async move {
            self.render_loop(change_rx, update_tx).await;
        });

        (
            OrchestratorChannels {
                changes: change_tx,
                updates: update_rx,
            },
            DashboardHandle { handle },
        )
    }

    // ── Private implementation ────────────────────────────────────────────

    async fn render_loop(
        self,
        mut changes: mpsc::Receiver<ControlChange>,
        updates: mpsc::Sender<FigureUpdate>,
    ) {
        let mut dispatcher = Dispatcher::new(self.dataset, self.controls);

        if !send_all(&updates, dispatcher.render_all()).await {
            return;
        }

        while let Some(change) = changes.recv().await {
            tracing::debug!(?change, "control change received");
            if !send_all(&updates, dispatcher.apply(change)).await {
                return;
            }
        }

        tracing::debug!("control channel closed; exiting render loop");
    }
}

/// Forward rendered figures; returns `false` once the receiver is gone.
async fn send_all(tx: &mpsc::Sender<FigureUpdate>, figures: Vec<(FigureId, Figure)>) -> bool {
    for (id, figure) in figures {
        if let Err(e) = tx.send(FigureUpdate { id, figure }).await {
            tracing::warn!(error = %e, "failed to send figure update; receiver dropped");
            return false;
        }
    }
    true
}

// ── DashboardHandle ───────────────────────────────────────────────────────────

/// A handle to the background render task.
pub struct DashboardHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl DashboardHandle {
    /// Immediately abort the render loop.
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
