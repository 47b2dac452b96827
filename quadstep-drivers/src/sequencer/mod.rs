//! Async sequencer runner
//!
//! Wraps the synchronous tick logic from `quadstep-core` with an
//! `embedded-hal-async` delay and a stop signal.

pub mod runner;
pub mod sink;

pub use runner::{RunSummary, SequencerRunner};
pub use sink::ChannelSink;
