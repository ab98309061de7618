/// Result of pulling updates and refreshing dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// `false` when the best-effort dependency refresh failed
    pub dependencies_refreshed: bool,
}

/// Result of an operator-initiated fetch and pull.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualUpdate {
    /// Trimmed standard output of the pull, shown to the operator when non-empty
    pub pull_output: String,
}
