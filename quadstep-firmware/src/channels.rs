//! Inter-task communication channels
//!
//! Defines the statics shared between Embassy tasks. Uses embassy-sync
//! primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use quadstep_core::control::ControlState;
use quadstep_core::sequencer::SequencerEvent;

/// Channel capacity for sequencer events
pub const EVENT_CHANNEL_SIZE: usize = 8;

/// Live mode and period (written by the control task, read by the sequencer)
pub static CONTROL: ControlState = ControlState::new();

/// Request the sequencer to stop
pub static STOP: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Sequencer has stopped and released its lines; carries the tick count
pub static STOPPED: Signal<CriticalSectionRawMutex, u32> = Signal::new();

/// Sequencer events (for logging/debugging)
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, SequencerEvent, EVENT_CHANNEL_SIZE> =
    Channel::new();
