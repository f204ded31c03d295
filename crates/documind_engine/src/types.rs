use std::fmt;
use std::time::Duration;

use documind_core::TimerId;

/// Work sent from the app to the engine thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    StartTimer { timer: TimerId, delay: Duration },
    CancelTimer { timer: TimerId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// The timer ran to completion without being cancelled or replaced.
    TimerElapsed { timer: TimerId },
}

impl fmt::Display for EngineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineEvent::TimerElapsed { timer } => write!(f, "{timer} elapsed"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
