//! Static step tables for each mode
//!
//! Every sequence is cyclic: the last step points back at index 0. Each
//! step asserts exactly one line, so a coil driver never has two phases
//! energized at once.
//!
//! | Mode         | Steps                                   |
//! |--------------|-----------------------------------------|
//! | `SweepRight` | `1000 0100 0010 0001`                   |
//! | `SweepLeft`  | `0001 0010 0100 1000`                   |
//! | `Shuffle`    | `0001 0010 0100 1000 0100 0010`         |

use super::mode::Mode;
use super::pattern::Pattern;

/// One entry of a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequenceStep {
    /// Line levels to apply for this step
    pub pattern: Pattern,
    /// Index of the following step
    pub next: u8,
}

const fn step(line: usize, next: u8) -> SequenceStep {
    SequenceStep {
        pattern: Pattern::single(line),
        next,
    }
}

static SWEEP_RIGHT: [SequenceStep; 4] = [step(0, 1), step(1, 2), step(2, 3), step(3, 0)];

static SWEEP_LEFT: [SequenceStep; 4] = [step(3, 1), step(2, 2), step(1, 3), step(0, 0)];

static SHUFFLE: [SequenceStep; 6] = [
    step(3, 1),
    step(2, 2),
    step(1, 3),
    step(0, 4),
    step(1, 5),
    step(2, 0),
];

/// Mode → cyclic step sequence lookup
pub struct SequenceTable;

impl SequenceTable {
    /// Full step sequence for a mode
    pub fn sequence(mode: Mode) -> &'static [SequenceStep] {
        match mode {
            Mode::SweepRight => &SWEEP_RIGHT,
            Mode::SweepLeft => &SWEEP_LEFT,
            Mode::Shuffle => &SHUFFLE,
        }
    }

    /// Number of steps in a mode's sequence
    pub fn len(mode: Mode) -> u8 {
        Self::sequence(mode).len() as u8
    }

    /// Look up the pattern for `state` and the index that follows it
    ///
    /// An out-of-range `state` (left over from a longer sequence) restarts
    /// the sequence: the pattern at index 0 is returned along with that
    /// step's successor.
    pub fn next(mode: Mode, state: u8) -> (Pattern, u8) {
        let sequence = Self::sequence(mode);
        let step = sequence.get(state as usize).unwrap_or(&sequence[0]);
        (step.pattern, step.next)
    }
}
