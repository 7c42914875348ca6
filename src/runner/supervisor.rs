//! Supervisor task for a launched child process.
//!
//! The task owns the child and waits on three things at once: the child's
//! exit, shutdown messages from the signal listener, and (while stopping) an
//! optional stop deadline. A fixed tick keeps the loop awake and does nothing
//! else. There is no deadline unless one is configured: after the first
//! signal the supervisor waits for the child for as long as it takes.

use crate::config::SupervisorConfig;
use crate::error::{Result, SpiritError};
use crate::state_machine::{
    ShutdownSignal, SupervisorAction, SupervisorEvent, SupervisorState, SupervisorStateMachine,
};
use std::process::ExitStatus;
use std::time::Duration;
use tokio::process::Child;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

/// How supervision ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupervisorOutcome {
    pub pid: Option<u32>,
    /// State at the moment supervision ended
    pub final_state: SupervisorState,
    /// Exit status when the child exited by itself; `None` after a kill
    pub exit_status: Option<ExitStatus>,
}

impl SupervisorOutcome {
    pub fn was_killed(&self) -> bool {
        self.final_state == SupervisorState::Killed
    }
}

#[derive(Debug, Clone)]
pub struct ProcessSupervisor {
    tick_interval: Duration,
    stop_timeout: Option<Duration>,
}

impl ProcessSupervisor {
    pub fn new(config: &SupervisorConfig) -> Self {
        Self {
            tick_interval: config.tick_interval(),
            stop_timeout: config.stop_timeout(),
        }
    }

    /// Supervise `child` on its own task; awaiting the handle is the single
    /// completion notification for the caller
    pub fn spawn(
        self,
        child: Child,
        signals: mpsc::Receiver<ShutdownSignal>,
    ) -> JoinHandle<Result<SupervisorOutcome>> {
        tokio::spawn(async move { self.supervise(child, signals).await })
    }

    pub async fn supervise(
        &self,
        mut child: Child,
        mut signals: mpsc::Receiver<ShutdownSignal>,
    ) -> Result<SupervisorOutcome> {
        let pid = child.id();
        let mut machine = SupervisorStateMachine::new(pid);
        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut stop_deadline: Option<Instant> = None;
        let mut signals_open = true;

        info!(pid = ?pid, "Supervising process");

        loop {
            let event = tokio::select! {
                status = child.wait() => {
                    let status = status.map_err(|e| {
                        SpiritError::runtime(format!("failed to wait for process {pid:?}: {e}"))
                    })?;
                    let final_state = machine.current_state();
                    info!(pid = ?pid, state = %final_state, status = %status, "Process exited");
                    return Ok(SupervisorOutcome {
                        pid,
                        final_state,
                        exit_status: Some(status),
                    });
                }
                received = signals.recv(), if signals_open => match received {
                    Some(signal) => SupervisorEvent::Shutdown(signal),
                    None => {
                        debug!(pid = ?pid, "Signal listener closed, waiting for process exit only");
                        signals_open = false;
                        continue;
                    }
                },
                _ = deadline_elapsed(stop_deadline) => SupervisorEvent::StopTimeoutElapsed,
                _ = ticker.tick() => {
                    trace!(pid = ?pid, state = %machine.current_state(), "Supervisor tick");
                    continue;
                }
            };

            let action = match machine.transition(event) {
                Ok(action) => action,
                Err(e) => {
                    warn!(pid = ?pid, error = %e, "Ignoring supervisor event");
                    continue;
                }
            };

            match action {
                SupervisorAction::AwaitExit => {
                    info!(pid = ?pid, "Stopping process, waiting for it to exit");
                    if stop_deadline.is_none() {
                        stop_deadline = self.stop_timeout.map(|timeout| Instant::now() + timeout);
                    }
                }
                SupervisorAction::Kill => {
                    child.start_kill().map_err(|e| {
                        SpiritError::runtime(format!("failed to kill process {pid:?}: {e}"))
                    })?;
                    info!(pid = ?pid, "Killed process");
                    return Ok(SupervisorOutcome {
                        pid,
                        final_state: machine.current_state(),
                        exit_status: None,
                    });
                }
            }
        }
    }
}

async fn deadline_elapsed(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
