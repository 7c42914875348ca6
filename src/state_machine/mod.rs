// State machine module for child process supervision
//
// Three states: Running, Stopping, Killed. A first shutdown signal moves
// Running to Stopping, a second one (or an elapsed stop timeout) moves
// Stopping to Killed. A natural child exit ends supervision from either
// non-terminal state without a transition.

pub mod errors;
pub mod events;
pub mod states;
pub mod supervisor_state_machine;

// Re-export main types for convenient access
pub use errors::{StateMachineError, StateMachineResult};
pub use events::{ShutdownSignal, SupervisorEvent};
pub use states::SupervisorState;
pub use supervisor_state_machine::{SupervisorAction, SupervisorStateMachine};
