//! Output patterns
//!
//! A [`Pattern`] is the desired state of all four output lines for one
//! step. Index 0 is line 1 (the first configured GPIO).

use core::fmt;

/// Number of output lines driven by the sequencer
pub const LINE_COUNT: usize = 4;

/// Desired level for each of the four output lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pattern([bool; LINE_COUNT]);

impl Pattern {
    /// Every line deasserted
    pub const OFF: Pattern = Pattern([false; LINE_COUNT]);

    /// Every line asserted
    pub const ALL_ON: Pattern = Pattern([true; LINE_COUNT]);

    /// Create a pattern from explicit line levels
    pub const fn new(lines: [bool; LINE_COUNT]) -> Self {
        Self(lines)
    }

    /// Create a pattern with exactly one line asserted
    ///
    /// `line` must be below [`LINE_COUNT`].
    pub const fn single(line: usize) -> Self {
        let mut lines = [false; LINE_COUNT];
        lines[line] = true;
        Self(lines)
    }

    /// Line levels
    pub const fn lines(&self) -> [bool; LINE_COUNT] {
        self.0
    }

    /// Level of one line (`false` for out-of-range indices)
    pub fn is_set(&self, line: usize) -> bool {
        self.0.get(line).copied().unwrap_or(false)
    }

    /// Number of asserted lines
    pub fn active_count(&self) -> usize {
        self.0.iter().filter(|&&on| on).count()
    }

    /// Index of the asserted line, if exactly one is asserted
    pub fn active_line(&self) -> Option<usize> {
        if self.active_count() != 1 {
            return None;
        }
        self.0.iter().position(|&on| on)
    }

    /// Parse a pattern written as four `0`/`1` characters, line 1 first
    ///
    /// `"1000"` asserts only line 1.
    pub fn from_bits(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != LINE_COUNT {
            return None;
        }

        let mut lines = [false; LINE_COUNT];
        for (slot, &b) in lines.iter_mut().zip(bytes) {
            *slot = match b {
                b'1' => true,
                b'0' => false,
                _ => return None,
            };
        }
        Some(Self(lines))
    }
}

impl From<[bool; LINE_COUNT]> for Pattern {
    fn from(lines: [bool; LINE_COUNT]) -> Self {
        Self(lines)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &on in &self.0 {
            f.write_str(if on { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn test_single() {
        let p = Pattern::single(2);
        assert_eq!(p.lines(), [false, false, true, false]);
        assert_eq!(p.active_count(), 1);
        assert_eq!(p.active_line(), Some(2));
    }

    #[test]
    fn test_active_line_requires_exactly_one() {
        assert_eq!(Pattern::OFF.active_line(), None);
        assert_eq!(Pattern::ALL_ON.active_line(), None);
        assert_eq!(Pattern::ALL_ON.active_count(), 4);
    }

    #[test]
    fn test_from_bits() {
        assert_eq!(Pattern::from_bits("1000"), Some(Pattern::single(0)));
        assert_eq!(Pattern::from_bits("1111"), Some(Pattern::ALL_ON));
        assert_eq!(Pattern::from_bits("0000"), Some(Pattern::OFF));
        assert_eq!(Pattern::from_bits("100"), None);
        assert_eq!(Pattern::from_bits("10001"), None);
        assert_eq!(Pattern::from_bits("10x0"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Pattern::single(3).to_string(), "0001");
        assert_eq!(Pattern::new([true, false, true, false]).to_string(), "1010");
    }

    #[test]
    fn test_is_set_out_of_range() {
        assert!(!Pattern::ALL_ON.is_set(LINE_COUNT));
    }
}
