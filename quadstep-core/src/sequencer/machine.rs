//! Loop lifecycle state machine
//!
//! The sequencer loop starts `Running` and only ever moves forward:
//!
//! ```text
//! Running ──CancelObserved──▶ Stopping ──CleanupComplete──▶ Stopped
//! ```

use super::events::LoopEvent;

/// Sequencer loop states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopState {
    /// Ticking; outputs are being driven
    Running,
    /// Cancellation observed; no further output changes, cleanup pending
    Stopping,
    /// Loop has exited (terminal)
    Stopped,
}

impl LoopState {
    /// Check if this state allows driving the outputs
    pub fn output_allowed(&self) -> bool {
        matches!(self, LoopState::Running)
    }

    /// Check if this is the terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoopState::Stopped)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: LoopEvent) -> Self {
        use LoopEvent::*;
        use LoopState::*;

        match (self, event) {
            (Running, CancelObserved) => Stopping,
            (Stopping, CleanupComplete) => Stopped,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_to_stopped() {
        let state = LoopState::Running;
        let stopping = state.transition(LoopEvent::CancelObserved);
        assert_eq!(stopping, LoopState::Stopping);

        let stopped = stopping.transition(LoopEvent::CleanupComplete);
        assert_eq!(stopped, LoopState::Stopped);
    }

    #[test]
    fn test_cleanup_requires_cancel_first() {
        let state = LoopState::Running;
        assert_eq!(state.transition(LoopEvent::CleanupComplete), LoopState::Running);
    }

    #[test]
    fn test_stopped_is_terminal() {
        let state = LoopState::Stopped;
        for event in [LoopEvent::CancelObserved, LoopEvent::CleanupComplete] {
            assert_eq!(state.transition(event), LoopState::Stopped);
        }
        assert!(state.is_terminal());
    }

    #[test]
    fn test_output_allowed() {
        assert!(LoopState::Running.output_allowed());
        assert!(!LoopState::Stopping.output_allowed());
        assert!(!LoopState::Stopped.output_allowed());
    }

    #[test]
    fn test_repeated_cancel_is_idempotent() {
        let state = LoopState::Running
            .transition(LoopEvent::CancelObserved)
            .transition(LoopEvent::CancelObserved);
        assert_eq!(state, LoopState::Stopping);
    }
}
