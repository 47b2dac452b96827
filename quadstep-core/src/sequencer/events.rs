//! Sequencer events
//!
//! [`LoopEvent`]s drive the lifecycle state machine. [`SequencerEvent`]s
//! are reported outward (for logging/debugging) through an [`EventSink`].

use crate::sequence::Mode;

/// Events that trigger lifecycle transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopEvent {
    /// Stop request seen at a tick boundary or during the inter-tick sleep
    CancelObserved,
    /// Final cleanup after the last tick has run
    CleanupComplete,
}

/// Observable things the sequencer loop did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerEvent {
    /// Loop entered `Running`
    Started { mode: Mode, period_ms: u32 },
    /// Active mode differs from the previous tick
    ModeChanged {
        from: Mode,
        to: Mode,
        /// Step counter restarted because the sequence length differs
        counter_reset: bool,
    },
    /// Period differs from the previous tick
    PeriodChanged { from: u32, to: u32 },
    /// Output bank rejected a pattern; the loop carries on
    OutputFault { mode: Mode, step: u8 },
    /// Loop reached `Stopped` after running `ticks` ticks
    Stopped { ticks: u32 },
}

impl SequencerEvent {
    /// Check if this event reports a fault
    pub fn is_fault(&self) -> bool {
        matches!(self, SequencerEvent::OutputFault { .. })
    }
}

/// Destination for [`SequencerEvent`]s
///
/// Publishing must not block; sinks that can fill up drop the event.
pub trait EventSink {
    /// Hand one event to the sink
    fn publish(&mut self, event: SequencerEvent);
}

/// Discards every event
impl EventSink for () {
    fn publish(&mut self, _event: SequencerEvent) {}
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn publish(&mut self, event: SequencerEvent) {
        (**self).publish(event);
    }
}
