use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a supervised child process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SupervisorState {
    /// Child executing normally
    #[default]
    Running,
    /// A shutdown was requested; waiting for the child to exit on its own
    Stopping,
    /// Child was forcibly terminated
    Killed,
}

impl SupervisorState {
    /// Check if this is a terminal state (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Killed)
    }

    /// Check if a shutdown has been requested
    pub fn is_shutting_down(&self) -> bool {
        matches!(self, Self::Stopping | Self::Killed)
    }
}

impl fmt::Display for SupervisorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Stopping => write!(f, "stopping"),
            Self::Killed => write!(f, "killed"),
        }
    }
}

impl std::str::FromStr for SupervisorState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(Self::Running),
            "stopping" => Ok(Self::Stopping),
            "killed" => Ok(Self::Killed),
            _ => Err(format!("Invalid supervisor state: {s}")),
        }
    }
}
