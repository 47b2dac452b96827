//! Channel-backed event sink

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use quadstep_core::sequencer::{EventSink, SequencerEvent};

/// Forwards events into a bounded channel without waiting
///
/// When the channel is full the event is dropped and counted.
pub struct ChannelSink<'c, M: RawMutex, const N: usize> {
    channel: &'c Channel<M, SequencerEvent, N>,
    dropped: u32,
}

impl<'c, M: RawMutex, const N: usize> ChannelSink<'c, M, N> {
    pub fn new(channel: &'c Channel<M, SequencerEvent, N>) -> Self {
        Self {
            channel,
            dropped: 0,
        }
    }

    /// Events lost to a full channel
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<M: RawMutex, const N: usize> EventSink for ChannelSink<'_, M, N> {
    fn publish(&mut self, event: SequencerEvent) {
        if self.channel.try_send(event).is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_drops_when_full() {
        let channel: Channel<NoopRawMutex, SequencerEvent, 2> = Channel::new();
        let mut sink = ChannelSink::new(&channel);

        for ticks in 0..3 {
            sink.publish(SequencerEvent::Stopped { ticks });
        }

        assert_eq!(sink.dropped(), 1);
        assert_eq!(channel.try_receive(), Ok(SequencerEvent::Stopped { ticks: 0 }));
        assert_eq!(channel.try_receive(), Ok(SequencerEvent::Stopped { ticks: 1 }));
        assert!(channel.try_receive().is_err());
    }
}
