use crate::{ControlError, ControlResult, UpdateState};

/// Ahead/behind counts of local HEAD against its upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncCounts {
    pub ahead: u32,
    pub behind: u32,
}

impl SyncCounts {
    /// Parse `rev-list --left-right --count` output: exactly two integers,
    /// ahead first, behind second.
    pub fn parse(output: &str) -> ControlResult<Self> {
        let fields: Vec<&str> = output.split_whitespace().collect();

        let [ahead, behind] = fields.as_slice() else {
            return Err(ControlError::sync_parse_failed(output));
        };

        match (ahead.parse(), behind.parse()) {
            (Ok(ahead), Ok(behind)) => Ok(Self { ahead, behind }),
            _ => Err(ControlError::sync_parse_failed(output)),
        }
    }

    pub fn state(&self) -> UpdateState {
        UpdateState::classify(self.ahead, self.behind)
    }
}
