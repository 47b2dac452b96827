//! Sequencer event log task

use defmt::*;

use quadstep_core::sequencer::SequencerEvent;

use crate::channels::EVENT_CHANNEL;

/// Drain the event channel into the defmt log
#[embassy_executor::task]
pub async fn event_task() {
    loop {
        match EVENT_CHANNEL.receive().await {
            SequencerEvent::Started { mode, period_ms } => {
                info!("Sequencer running: mode={} period={}ms", mode.as_token(), period_ms);
            }
            SequencerEvent::ModeChanged {
                from,
                to,
                counter_reset,
            } => {
                info!(
                    "Mode {} -> {} (counter reset: {})",
                    from.as_token(),
                    to.as_token(),
                    counter_reset
                );
            }
            SequencerEvent::PeriodChanged { from, to } => {
                debug!("Period {}ms -> {}ms", from, to);
            }
            SequencerEvent::OutputFault { mode, step } => {
                warn!("Output write failed at {} step {}", mode.as_token(), step);
            }
            SequencerEvent::Stopped { ticks } => {
                info!("Sequencer stopped after {} ticks", ticks);
            }
        }
    }
}
