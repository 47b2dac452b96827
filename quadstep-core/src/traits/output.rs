//! Output bank trait

use crate::sequence::Pattern;

/// Four binary output lines driven as one unit
///
/// The bank exclusively owns its lines. Implementations must not block
/// in [`OutputBank::apply`]; the sequencer calls it once per tick.
pub trait OutputBank {
    /// Error produced when a line cannot be driven
    type Error: core::fmt::Debug;

    /// Drive all four lines to `pattern`
    ///
    /// If any line fails, the bank must not leave a partial pattern in
    /// place: it deasserts every line it can before returning the error.
    fn apply(&mut self, pattern: Pattern) -> Result<(), Self::Error>;

    /// Pattern currently driven on the lines
    fn current(&self) -> Pattern;

    /// Deassert every line
    ///
    /// Called once after the sequencer has stopped. Best-effort: every
    /// line is attempted even if an earlier one fails, and the first
    /// failure is returned.
    fn shutdown(&mut self) -> Result<(), Self::Error>;
}
