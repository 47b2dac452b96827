//! Output bank implementations
//!
//! [`LineBank`] drives four [`quadstep_hal::OutputPin`]s as one unit.
//! [`HalLine`] adapts any `embedded-hal` output pin to that trait.

pub mod bank;
pub mod embedded;

pub use bank::{InitError, LineBank, LineFault};
pub use embedded::HalLine;
