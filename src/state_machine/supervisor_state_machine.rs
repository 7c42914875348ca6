use super::{
    errors::{StateMachineError, StateMachineResult},
    events::SupervisorEvent,
    states::SupervisorState,
};
use tracing::info;

/// What the supervisor must do after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorAction {
    /// Keep waiting for the child to exit
    AwaitExit,
    /// Terminate the child now and return without waiting
    Kill,
}

/// Cooperative shutdown state machine for one child process
#[derive(Debug, Clone)]
pub struct SupervisorStateMachine {
    pid: Option<u32>,
    state: SupervisorState,
}

impl SupervisorStateMachine {
    pub fn new(pid: Option<u32>) -> Self {
        Self {
            pid,
            state: SupervisorState::default(),
        }
    }

    pub fn current_state(&self) -> SupervisorState {
        self.state
    }

    /// Attempt to transition on `event`, returning the action to carry out
    pub fn transition(&mut self, event: SupervisorEvent) -> StateMachineResult<SupervisorAction> {
        let target = Self::determine_target_state(self.state, &event)?;

        info!(
            pid = ?self.pid,
            from = %self.state,
            to = %target,
            event = event.event_type(),
            signal = ?event.signal(),
            "Supervisor state transition"
        );
        self.state = target;

        Ok(match target {
            SupervisorState::Killed => SupervisorAction::Kill,
            SupervisorState::Running | SupervisorState::Stopping => SupervisorAction::AwaitExit,
        })
    }

    /// Determine the target state based on current state and event
    fn determine_target_state(
        current_state: SupervisorState,
        event: &SupervisorEvent,
    ) -> StateMachineResult<SupervisorState> {
        let target = match (current_state, event) {
            (SupervisorState::Running, SupervisorEvent::Shutdown(_)) => SupervisorState::Stopping,
            (SupervisorState::Stopping, SupervisorEvent::Shutdown(_)) => SupervisorState::Killed,
            (SupervisorState::Stopping, SupervisorEvent::StopTimeoutElapsed) => {
                SupervisorState::Killed
            }

            (from_state, _) => {
                return Err(StateMachineError::InvalidTransition {
                    from: from_state.to_string(),
                    event: event.event_type().to_string(),
                })
            }
        };

        Ok(target)
    }
}
