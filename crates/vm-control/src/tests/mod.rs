
mod reconciler;
mod sync_counts;
