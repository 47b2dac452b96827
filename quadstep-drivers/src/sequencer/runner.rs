//! Sequencer loop runner
//!
//! Runs the tick body every `period / 2` until the stop signal fires.
//! Cancellation is observed at two points:
//!
//! - at the top of each tick, before anything is written
//! - while sleeping between ticks, which cuts the sleep short
//!
//! Either way no pattern is written once the stop has been seen, so a
//! stop request takes effect within one tick.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use embedded_hal_async::delay::DelayNs;
use quadstep_core::control::ControlState;
use quadstep_core::sequencer::{EventSink, LoopState, Sequencer, SequencerEvent};
use quadstep_core::traits::OutputBank;

/// What a finished run hands back
pub struct RunSummary<B> {
    /// The bank, still holding its lines; shut it down next
    pub bank: B,
    /// Ticks that ran before the stop
    pub ticks: u32,
}

/// One sequencer loop bound to a bank, a delay and a stop signal
pub struct SequencerRunner<'a, M: RawMutex, B, D, S = ()> {
    control: &'a ControlState,
    stop: &'a Signal<M, ()>,
    bank: B,
    delay: D,
    events: S,
    sequencer: Sequencer,
}

impl<'a, M: RawMutex, B: OutputBank, D: DelayNs> SequencerRunner<'a, M, B, D> {
    /// Create a runner that discards its events
    pub fn new(control: &'a ControlState, stop: &'a Signal<M, ()>, bank: B, delay: D) -> Self {
        Self {
            control,
            stop,
            bank,
            delay,
            events: (),
            sequencer: Sequencer::new(),
        }
    }

    /// Report events to `events` instead
    pub fn with_events<S: EventSink>(self, events: S) -> SequencerRunner<'a, M, B, D, S> {
        SequencerRunner {
            control: self.control,
            stop: self.stop,
            bank: self.bank,
            delay: self.delay,
            events,
            sequencer: self.sequencer,
        }
    }
}

impl<'a, M: RawMutex, B: OutputBank, D: DelayNs, S: EventSink> SequencerRunner<'a, M, B, D, S> {
    /// Run until stopped
    ///
    /// A bank error is reported as an event and the loop keeps going.
    pub async fn run(mut self) -> RunSummary<B> {
        let snapshot = self.control.snapshot();
        self.events.publish(SequencerEvent::Started {
            mode: snapshot.mode,
            period_ms: snapshot.period_ms,
        });

        loop {
            if self.stop.signaled() {
                self.stop.reset();
                self.sequencer.cancel();
                break;
            }

            let Some(tick) = self.sequencer.tick(self.control, &mut self.bank) else {
                break;
            };
            for event in tick.events() {
                self.events.publish(event);
            }

            match select(self.delay.delay_ms(tick.sleep_ms()), self.stop.wait()).await {
                Either::First(()) => {}
                Either::Second(()) => {
                    self.sequencer.cancel();
                    break;
                }
            }
        }

        debug_assert_eq!(self.sequencer.state(), LoopState::Stopping);
        if let Some(event) = self.sequencer.finish() {
            self.events.publish(event);
        }

        RunSummary {
            bank: self.bank,
            ticks: self.sequencer.ticks(),
        }
    }
}
