//! Board pin assignments

use embassy_rp::gpio::Output;
use quadstep_drivers::output::{HalLine, LineBank};

/// GPIO numbers of the output lines, in bank order
pub const LINE_IDS: [u8; 4] = [5, 6, 13, 19];

/// One output line
pub type Line = HalLine<Output<'static>>;

/// The output bank the sequencer drives
pub type Bank = LineBank<Line>;
