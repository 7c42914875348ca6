use serde::{Deserialize, Serialize};
use std::fmt;

/// Process-termination signals the supervisor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt => write!(f, "SIGINT"),
            Self::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// Events that can trigger supervisor state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SupervisorEvent {
    /// A termination signal arrived
    Shutdown(ShutdownSignal),
    /// The configured wait after the first shutdown request ran out
    StopTimeoutElapsed,
}

impl SupervisorEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Shutdown(_) => "shutdown",
            Self::StopTimeoutElapsed => "stop_timeout_elapsed",
        }
    }

    pub fn signal(&self) -> Option<ShutdownSignal> {
        match self {
            Self::Shutdown(signal) => Some(*signal),
            Self::StopTimeoutElapsed => None,
        }
    }
}
