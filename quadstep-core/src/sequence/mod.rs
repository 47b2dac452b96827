//! Sequencing data
//!
//! Modes, output patterns and the static table that maps
//! `(mode, step)` to the next pattern. Everything here is pure.

pub mod mode;
pub mod pattern;
pub mod table;

pub use mode::Mode;
pub use pattern::{Pattern, LINE_COUNT};
pub use table::{SequenceStep, SequenceTable};
