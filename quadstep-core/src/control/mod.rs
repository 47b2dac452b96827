//! Live control of mode and period
//!
//! [`ControlState`] is the only state shared between the control link and
//! the sequencer loop. [`ControlInterface`] is the validating front door
//! the control link talks to.

pub mod interface;
pub mod state;

pub use interface::{AttrValue, ControlInterface, Rejection, WriteOutcome, MAX_VALUE_LEN};
pub use state::{
    is_valid_period, ControlState, Snapshot, DEFAULT_PERIOD_MS, MAX_PERIOD_MS, MIN_PERIOD_MS,
};
