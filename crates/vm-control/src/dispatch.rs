//! Message passing from background update checks to the panel.

use crate::{FetchMode, UpdateReconciler, UpdateState};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// Replace the update indicator
    Indicator(UpdateState),
    /// Ask whether to apply `behind` pending updates
    PromptUpdate { behind: u32 },
}

/// Sending half of the panel's event queue. Posting never blocks.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<PanelEvent>,
}

impl Dispatcher {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PanelEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn post(&self, event: PanelEvent) {
        if self.tx.send(event).is_err() {
            debug!("Panel event dropped, receiver closed");
        }
    }

    /// Post a terminal state, followed by a prompt when updates are pending.
    pub fn post_result(&self, state: UpdateState) {
        let pending = state.pending_updates();
        self.post(PanelEvent::Indicator(state));

        if let Some(behind) = pending {
            self.post(PanelEvent::PromptUpdate { behind });
        }
    }
}

/// Run one reconciliation pass on a background task.
///
/// Posts `Checking`, then the terminal state, then at most one prompt.
pub fn spawn_update_check(
    reconciler: UpdateReconciler,
    mode: FetchMode,
    dispatcher: Dispatcher,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        dispatcher.post(PanelEvent::Indicator(UpdateState::Checking));
        let state = reconciler.reconcile(mode).await;
        dispatcher.post_result(state);
    })
}
