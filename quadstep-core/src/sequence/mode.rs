//! Sequencing modes

/// Directional sequencing behavior
///
/// The wire tokens are stable: they are what the control link reads and
/// writes, and what the startup config accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Single high line travels from line 1 to line 4
    #[default]
    SweepRight,
    /// Single high line travels from line 4 to line 1
    SweepLeft,
    /// Single high line bounces 4 → 1 → 4
    Shuffle,
}

impl Mode {
    /// All modes, in discriminant order
    pub const ALL: [Mode; 3] = [Mode::SweepRight, Mode::SweepLeft, Mode::Shuffle];

    /// Parse a mode from its wire token
    ///
    /// Matching is exact and case-sensitive.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "sweepright" => Some(Mode::SweepRight),
            "sweepleft" => Some(Mode::SweepLeft),
            "shuffle" => Some(Mode::Shuffle),
            _ => None,
        }
    }

    /// Wire token for this mode
    pub fn as_token(&self) -> &'static str {
        match self {
            Mode::SweepRight => "sweepright",
            Mode::SweepLeft => "sweepleft",
            Mode::Shuffle => "shuffle",
        }
    }

    /// Compact numeric code used in the packed control word
    pub(crate) const fn code(self) -> u32 {
        match self {
            Mode::SweepRight => 0,
            Mode::SweepLeft => 1,
            Mode::Shuffle => 2,
        }
    }

    /// Inverse of [`Mode::code`]; unknown codes fall back to the default
    pub(crate) const fn from_code(code: u32) -> Self {
        match code {
            1 => Mode::SweepLeft,
            2 => Mode::Shuffle,
            _ => Mode::SweepRight,
        }
    }
}
