//! Attribute read/write boundary
//!
//! Translates protocol-level attribute requests into [`ControlState`]
//! reads and validated writes. Invalid writes never reach the shared
//! state; the caller gets a [`WriteOutcome`] it may log, but nothing is
//! surfaced to the remote writer besides the unchanged value.

use core::fmt::Write;

use heapless::String;
use quadstep_protocol::Attribute;

use super::state::ControlState;

/// Maximum rendered attribute value length
pub const MAX_VALUE_LEN: usize = 16;

/// Rendered attribute value
pub type AttrValue = String<MAX_VALUE_LEN>;

/// Why a write was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rejection {
    /// Token is not one of the mode names
    UnknownMode,
    /// Period value is not a decimal integer
    NotANumber,
    /// Period value is outside `1 < ms <= 10000`
    PeriodOutOfRange(u32),
    /// Attribute cannot be written
    ReadOnly,
}

/// Result of a write request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WriteOutcome {
    /// Value was stored
    Accepted,
    /// Value was ignored; the previous value is retained
    Rejected(Rejection),
}

impl WriteOutcome {
    /// Whether the write was stored
    pub fn is_accepted(&self) -> bool {
        matches!(self, WriteOutcome::Accepted)
    }
}

/// Control surface over a shared [`ControlState`]
#[derive(Clone, Copy)]
pub struct ControlInterface<'a> {
    state: &'a ControlState,
    name: &'a str,
}

impl<'a> ControlInterface<'a> {
    /// Create an interface for `state`, reporting `name` as the instance name
    pub fn new(state: &'a ControlState, name: &'a str) -> Self {
        Self { state, name }
    }

    /// Render the current value of an attribute
    pub fn read(&self, attribute: Attribute) -> AttrValue {
        let mut out = AttrValue::new();
        match attribute {
            Attribute::Mode => {
                let _ = out.push_str(self.state.mode().as_token());
            }
            Attribute::Period => {
                let _ = write!(out, "{}", self.state.period_ms());
            }
            Attribute::Name => {
                for c in self.name.chars() {
                    if out.push(c).is_err() {
                        break;
                    }
                }
            }
        }
        out
    }

    /// Validate and apply a raw write
    ///
    /// A trailing newline is tolerated, as terminals and shell `echo`
    /// append one. Mode tokens are matched exactly and case-sensitively.
    pub fn write(&self, attribute: Attribute, raw: &str) -> WriteOutcome {
        let raw = raw.trim_end_matches(|c: char| c == '\n' || c == '\r');

        match attribute {
            Attribute::Mode => {
                if self.state.set_mode_token(raw) {
                    WriteOutcome::Accepted
                } else {
                    WriteOutcome::Rejected(Rejection::UnknownMode)
                }
            }
            Attribute::Period => {
                let Ok(ms) = raw.trim().parse::<u32>() else {
                    return WriteOutcome::Rejected(Rejection::NotANumber);
                };
                if self.state.set_period(ms) {
                    WriteOutcome::Accepted
                } else {
                    WriteOutcome::Rejected(Rejection::PeriodOutOfRange(ms))
                }
            }
            Attribute::Name => WriteOutcome::Rejected(Rejection::ReadOnly),
        }
    }
}
