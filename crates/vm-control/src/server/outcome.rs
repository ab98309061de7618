use crate::ControlError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started { pid: u32 },
    /// A live server existed; only the UI was reopened
    AlreadyRunning { pid: u32 },
}

/// How a stop request ended. The server handle is cleared in every case.
#[derive(Debug)]
pub enum StopOutcome {
    NotRunning,
    Stopped { exit_code: Option<i32> },
    /// Did not exit within the stop timeout and was killed
    ForceStopped,
    Failed { error: ControlError },
}
