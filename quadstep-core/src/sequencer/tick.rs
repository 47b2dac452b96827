//! Per-tick sequencing logic
//!
//! [`Sequencer`] owns the step counter and the lifecycle state. Each call
//! to [`Sequencer::tick`] performs one tick body:
//!
//! 1. Read a [`Snapshot`] of the control values
//! 2. Look up the pattern for the current step
//! 3. Apply it to the output bank
//! 4. Advance the step counter
//!
//! Checking for cancellation and sleeping `period / 2` between ticks is
//! left to the async runner, so this part stays runtime-free and can be
//! driven from tests one tick at a time.

use super::events::{LoopEvent, SequencerEvent};
use super::machine::LoopState;
use crate::control::{ControlState, Snapshot};
use crate::sequence::{Pattern, SequenceTable};
use crate::traits::OutputBank;

/// Everything that happened during one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick<E> {
    /// Control values the tick ran with
    pub snapshot: Snapshot,
    /// Step index that was applied
    pub step: u8,
    /// Pattern sent to the bank
    pub pattern: Pattern,
    /// Result of the bank write
    pub output: Result<(), E>,
    /// Mode/period change notices detected this tick
    changes: [Option<SequencerEvent>; 2],
}

impl<E> Tick<E> {
    /// Time to sleep before the next tick
    pub fn sleep_ms(&self) -> u32 {
        self.snapshot.half_period_ms()
    }

    /// Events worth reporting for this tick
    pub fn events(&self) -> impl Iterator<Item = SequencerEvent> + '_ {
        let fault = self.output.is_err().then_some(SequencerEvent::OutputFault {
            mode: self.snapshot.mode,
            step: self.step,
        });
        self.changes.iter().flatten().copied().chain(fault)
    }
}

/// Step counter plus lifecycle state for one sequencer loop
#[derive(Debug, Clone)]
pub struct Sequencer {
    state: LoopState,
    /// Index of the next step within the active mode's sequence
    counter: u8,
    /// Control values seen on the previous tick
    last: Option<Snapshot>,
    ticks: u32,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequencer {
    /// Create a sequencer in `Running`, positioned at step 0
    pub const fn new() -> Self {
        Self {
            state: LoopState::Running,
            counter: 0,
            last: None,
            ticks: 0,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Index of the step the next tick will apply
    pub fn counter(&self) -> u8 {
        self.counter
    }

    /// Number of ticks run so far
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Run one tick body against `bank`
    ///
    /// Returns `None` without touching the bank once cancellation has
    /// been observed. A failed bank write is reported in the returned
    /// [`Tick`] and the counter still advances.
    pub fn tick<B: OutputBank>(
        &mut self,
        control: &ControlState,
        bank: &mut B,
    ) -> Option<Tick<B::Error>> {
        if !self.state.output_allowed() {
            return None;
        }

        let snapshot = control.snapshot();
        let changes = self.observe(snapshot);

        let len = SequenceTable::len(snapshot.mode);
        let step = if self.counter < len { self.counter } else { 0 };
        let (pattern, next) = SequenceTable::next(snapshot.mode, step);

        let output = bank.apply(pattern);

        self.counter = next;
        self.ticks = self.ticks.wrapping_add(1);

        Some(Tick {
            snapshot,
            step,
            pattern,
            output,
            changes,
        })
    }

    /// Record a stop request
    pub fn cancel(&mut self) -> LoopState {
        self.state = self.state.transition(LoopEvent::CancelObserved);
        self.state
    }

    /// Mark cleanup done and produce the final event
    ///
    /// Has no effect unless [`Sequencer::cancel`] was called first.
    pub fn finish(&mut self) -> Option<SequencerEvent> {
        self.state = self.state.transition(LoopEvent::CleanupComplete);
        self.state.is_terminal().then_some(SequencerEvent::Stopped { ticks: self.ticks })
    }

    /// Compare against the previous tick and restart the counter when the
    /// new mode's sequence has a different length
    fn observe(&mut self, snapshot: Snapshot) -> [Option<SequencerEvent>; 2] {
        let mut changes = [None, None];

        if let Some(last) = self.last {
            if last.mode != snapshot.mode {
                let counter_reset =
                    SequenceTable::len(last.mode) != SequenceTable::len(snapshot.mode);
                if counter_reset {
                    self.counter = 0;
                }
                changes[0] = Some(SequencerEvent::ModeChanged {
                    from: last.mode,
                    to: snapshot.mode,
                    counter_reset,
                });
            }
            if last.period_ms != snapshot.period_ms {
                changes[1] = Some(SequencerEvent::PeriodChanged {
                    from: last.period_ms,
                    to: snapshot.period_ms,
                });
            }
        }

        self.last = Some(snapshot);
        changes
    }
}
