//! Startup configuration
//!
//! Values fixed at boot. Mode and period can later be changed through the
//! control link; the output id and startup pattern cannot.

use core::fmt::Write;

use heapless::String;

use crate::control::{is_valid_period, DEFAULT_PERIOD_MS};
use crate::sequence::{Mode, Pattern};

/// Maximum instance name length ("led" + three digits)
pub const MAX_NAME_LEN: usize = 8;

/// Default output identifier
pub const DEFAULT_OUTPUT_ID: u8 = 17;

/// Immutable instance name
pub type InstanceName = String<MAX_NAME_LEN>;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Section header other than `[sequencer]`
    InvalidSection,
    /// Key not recognised
    UnknownKey,
    /// Value has the wrong type or format
    InvalidValue,
    /// Period outside `1 < ms <= 10000`
    PeriodOutOfRange(u32),
}

/// Sequencer startup configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequencerConfig {
    output_id: u8,
    period_ms: u32,
    mode: Mode,
    startup: Pattern,
    /// Derived from `output_id` once, at construction
    name: InstanceName,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            output_id: DEFAULT_OUTPUT_ID,
            period_ms: DEFAULT_PERIOD_MS,
            mode: Mode::SweepRight,
            startup: Pattern::ALL_ON,
            name: instance_name(DEFAULT_OUTPUT_ID),
        }
    }
}

impl SequencerConfig {
    /// Build a validated configuration
    pub fn new(
        output_id: u8,
        period_ms: u32,
        mode: Mode,
        startup: Pattern,
    ) -> Result<Self, ConfigError> {
        if !is_valid_period(period_ms) {
            return Err(ConfigError::PeriodOutOfRange(period_ms));
        }
        Ok(Self {
            output_id,
            period_ms,
            mode,
            startup,
            name: instance_name(output_id),
        })
    }

    /// Output identifier the instance is named after
    pub fn output_id(&self) -> u8 {
        self.output_id
    }

    /// Initial period in milliseconds
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Initial mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Pattern driven while the bank initializes, before the first tick
    pub fn startup(&self) -> Pattern {
        self.startup
    }

    /// Instance name, e.g. `led17`
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Build the instance name for an output id
pub fn instance_name(output_id: u8) -> InstanceName {
    let mut name = InstanceName::new();
    // "led255" is the longest possible name and fits MAX_NAME_LEN
    let _ = write!(name, "led{}", output_id);
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SequencerConfig::default();
        assert_eq!(config.output_id(), 17);
        assert_eq!(config.period_ms(), 1000);
        assert_eq!(config.mode(), Mode::SweepRight);
        assert_eq!(config.startup(), Pattern::ALL_ON);
        assert_eq!(config.name(), "led17");
    }

    #[test]
    fn test_instance_name() {
        assert_eq!(instance_name(0).as_str(), "led0");
        assert_eq!(instance_name(255).as_str(), "led255");
    }

    #[test]
    fn test_new_validates_period() {
        assert_eq!(
            SequencerConfig::new(5, 1, Mode::Shuffle, Pattern::OFF),
            Err(ConfigError::PeriodOutOfRange(1))
        );
        let config = SequencerConfig::new(5, 2, Mode::Shuffle, Pattern::OFF).unwrap();
        assert_eq!(config.name(), "led5");
    }
}
