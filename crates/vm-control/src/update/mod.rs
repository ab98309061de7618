mod outcome;
mod reconciler;
mod sync_counts;
mod update_state;

pub use outcome::{ApplyOutcome, ManualUpdate};
pub use reconciler::UpdateReconciler;
pub use sync_counts::SyncCounts;
pub use update_state::{Indicator, UpdateState};

pub(crate) use update_state::plural;
