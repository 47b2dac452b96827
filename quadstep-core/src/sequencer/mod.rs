//! Sequencer loop logic
//!
//! The loop's lifecycle is an explicit, finite state machine. The per-tick
//! body is plain synchronous code; the async runner in `quadstep-drivers`
//! adds cancellation and sleeping around it.

pub mod events;
pub mod machine;
pub mod tick;

pub use events::{EventSink, LoopEvent, SequencerEvent};
pub use machine::LoopState;
pub use tick::{Sequencer, Tick};
