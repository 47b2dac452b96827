//! Sequencer task
//!
//! Runs the sequencer loop until a stop request, then deasserts the
//! lines, releases them and acknowledges through [`STOPPED`].

use defmt::*;
use embassy_time::Delay;

use quadstep_core::traits::OutputBank;
use quadstep_drivers::sequencer::{ChannelSink, SequencerRunner};
use quadstep_hal::LineAllocator;

use crate::board::Bank;
use crate::channels::{CONTROL, EVENT_CHANNEL, STOP, STOPPED};

#[embassy_executor::task]
pub async fn sequencer_task(bank: Bank, mut allocator: LineAllocator) {
    info!("Sequencer task started");

    let sink = ChannelSink::new(&EVENT_CHANNEL);
    let summary = SequencerRunner::new(&CONTROL, &STOP, bank, Delay)
        .with_events(sink)
        .run()
        .await;

    let mut bank = summary.bank;
    if let Err(fault) = bank.shutdown() {
        warn!(
            "Line {} could not be deasserted: {:?}",
            fault.line,
            Debug2Format(&fault.error)
        );
    }
    let _pins = bank.release(&mut allocator);
    info!("Output lines released");

    STOPPED.signal(summary.ticks);
}
