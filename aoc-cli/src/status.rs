//! Terminal status of one solution run

/// Exit code for harness-level failures: bad selection, discovery, or any
/// non-success run while running everything
pub const HARNESS_FATAL: i32 = 1;

/// How a single run ended
///
/// Every status maps to a fixed process exit code, and the worker process
/// reports its status to the host through that code alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunStatus {
    Success,
    Cancelled,
    Skipped,
    Internal,
    TestFailed,
}

impl RunStatus {
    pub const fn code(self) -> i32 {
        match self {
            RunStatus::Success => 0,
            RunStatus::Cancelled => 7,
            RunStatus::Skipped => 43,
            RunStatus::Internal => 68,
            RunStatus::TestFailed => 69,
        }
    }

    /// Anything outside the table is an internal error
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => RunStatus::Success,
            7 => RunStatus::Cancelled,
            43 => RunStatus::Skipped,
            69 => RunStatus::TestFailed,
            _ => RunStatus::Internal,
        }
    }

    pub fn is_success(self) -> bool {
        self == RunStatus::Success
    }
}
