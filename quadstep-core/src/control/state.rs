//! Shared live control values
//!
//! [`ControlState`] holds the mode and period that the control link writes
//! and the sequencer loop reads. Both fields live in one atomic word:
//!
//! ```text
//! 31            18 17  16 15                     0
//! ┌──────────────┬───────┬────────────────────────┐
//! │   reserved   │ mode  │      period (ms)       │
//! └──────────────┴───────┴────────────────────────┘
//! ```
//!
//! A snapshot is one load, so the loop never sees a mode from one write
//! paired with a period from a half-finished other write. Setters update
//! their own field with a compare-and-swap so concurrent writes to the
//! other field are never lost.

use core::sync::atomic::Ordering;

use portable_atomic::AtomicU32;

use crate::sequence::Mode;

/// Smallest accepted period in milliseconds
pub const MIN_PERIOD_MS: u32 = 2;

/// Largest accepted period in milliseconds
pub const MAX_PERIOD_MS: u32 = 10_000;

/// Period used until something else is configured
pub const DEFAULT_PERIOD_MS: u32 = 1000;

const PERIOD_MASK: u32 = 0xFFFF;
const MODE_SHIFT: u32 = 16;
const MODE_MASK: u32 = 0b11 << MODE_SHIFT;

/// Check a period against the accepted range (`1 < ms <= 10000`)
pub const fn is_valid_period(ms: u32) -> bool {
    ms >= MIN_PERIOD_MS && ms <= MAX_PERIOD_MS
}

const fn pack(mode: Mode, period_ms: u32) -> u32 {
    (mode.code() << MODE_SHIFT) | (period_ms & PERIOD_MASK)
}

/// Consistent view of the control values at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    /// Active sequencing mode
    pub mode: Mode,
    /// Full step period in milliseconds
    pub period_ms: u32,
}

impl Snapshot {
    fn unpack(word: u32) -> Self {
        Self {
            mode: Mode::from_code((word & MODE_MASK) >> MODE_SHIFT),
            period_ms: word & PERIOD_MASK,
        }
    }

    /// Sleep between ticks: the output advances twice per period
    pub const fn half_period_ms(&self) -> u32 {
        self.period_ms / 2
    }
}

/// Mode and period shared between the control link and the sequencer
pub struct ControlState {
    word: AtomicU32,
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlState {
    /// Create control state with the default mode and period
    pub const fn new() -> Self {
        Self::with_values(Mode::SweepRight, DEFAULT_PERIOD_MS)
    }

    /// Create control state with explicit initial values
    ///
    /// An out-of-range period is replaced by [`DEFAULT_PERIOD_MS`].
    pub const fn with_values(mode: Mode, period_ms: u32) -> Self {
        let period_ms = if is_valid_period(period_ms) {
            period_ms
        } else {
            DEFAULT_PERIOD_MS
        };
        Self {
            word: AtomicU32::new(pack(mode, period_ms)),
        }
    }

    /// Read mode and period together
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::unpack(self.word.load(Ordering::Acquire))
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.snapshot().mode
    }

    /// Current period in milliseconds
    pub fn period_ms(&self) -> u32 {
        self.snapshot().period_ms
    }

    /// Replace the mode, leaving the period untouched
    pub fn set_mode(&self, mode: Mode) {
        self.update(|word| (word & !MODE_MASK) | (mode.code() << MODE_SHIFT));
    }

    /// Replace the mode from a wire token
    ///
    /// Unknown tokens leave the mode unchanged. Returns whether the token
    /// was accepted.
    pub fn set_mode_token(&self, token: &str) -> bool {
        match Mode::from_token(token) {
            Some(mode) => {
                self.set_mode(mode);
                true
            }
            None => false,
        }
    }

    /// Replace the period, leaving the mode untouched
    ///
    /// Values outside `1 < ms <= 10000` are ignored. Returns whether the
    /// value was accepted.
    pub fn set_period(&self, ms: u32) -> bool {
        if !is_valid_period(ms) {
            return false;
        }
        self.update(|word| (word & !PERIOD_MASK) | ms);
        true
    }

    fn update(&self, f: impl Fn(u32) -> u32) {
        // The closure always returns Some, so fetch_update cannot fail
        let _ = self
            .word
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |word| Some(f(word)));
    }
}
