//! Simple TOML parser for the startup configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the sequencer configuration. It does NOT support full TOML syntax.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - An optional `[sequencer]` section header
//! - Comments (# ...), including trailing comments
//!
//! Example:
//! ```toml
//! [sequencer]
//! output_id = 17
//! period_ms = 1000      # full period; the lines step every 500 ms
//! mode = "sweepright"
//! startup = "1111"
//! ```

use super::types::{ConfigError, SequencerConfig};
use crate::sequence::{Mode, Pattern};

/// Only section header the parser accepts
const SECTION: &str = "sequencer";

/// Parse TOML configuration into a [`SequencerConfig`]
///
/// Keys that are absent keep their defaults.
pub fn parse_config(input: &str) -> Result<SequencerConfig, ConfigError> {
    let defaults = SequencerConfig::default();
    let mut output_id = defaults.output_id();
    let mut period_ms = defaults.period_ms();
    let mut mode = defaults.mode();
    let mut startup = defaults.startup();

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            if line[1..line.len() - 1].trim() != SECTION {
                return Err(ConfigError::InvalidSection);
            }
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ConfigError::InvalidValue)?;
        match key {
            "output_id" => output_id = parse_int(value)?,
            "period_ms" => period_ms = parse_int(value)?,
            "mode" => {
                mode = Mode::from_token(parse_string(value)).ok_or(ConfigError::InvalidValue)?
            }
            "startup" => {
                startup =
                    Pattern::from_bits(parse_string(value)).ok_or(ConfigError::InvalidValue)?
            }
            _ => return Err(ConfigError::UnknownKey),
        }
    }

    SequencerConfig::new(output_id, period_ms, mode, startup)
}

/// Split a `period_ms = 500  # note` line into `("period_ms", "500")`
///
/// A `#` inside a quoted value such as `mode = "a#b"` does not start a
/// comment. Returns `None` when either side is empty.
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = line.split_once('=')?;
    let key = key.trim();
    let value = strip_comment(rest.trim());

    (!key.is_empty() && !value.is_empty()).then_some((key, value))
}

/// Drop a trailing comment that starts outside a quoted string
fn strip_comment(value: &str) -> &str {
    let mut quoted = false;
    for (i, c) in value.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '#' if !quoted => return value[..i].trim_end(),
            _ => {}
        }
    }
    value
}

/// Unwrap a `mode` or `startup` value; quotes are optional
fn parse_string(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Parse a numeric value (`output_id`, `period_ms`)
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let input = r#"
# Quadstep startup configuration
[sequencer]
output_id = 22
period_ms = 400   # fast sweep
mode = "shuffle"
startup = "1000"
"#;
        let config = parse_config(input).unwrap();
        assert_eq!(config.output_id(), 22);
        assert_eq!(config.period_ms(), 400);
        assert_eq!(config.mode(), Mode::Shuffle);
        assert_eq!(config.startup(), Pattern::single(0));
        assert_eq!(config.name(), "led22");
    }

    #[test]
    fn test_empty_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, SequencerConfig::default());
    }

    #[test]
    fn test_header_optional_and_unquoted_strings() {
        let config = parse_config("mode = sweepleft\nperiod_ms = 2").unwrap();
        assert_eq!(config.mode(), Mode::SweepLeft);
        assert_eq!(config.period_ms(), 2);
    }

    #[test]
    fn test_period_out_of_range() {
        assert_eq!(
            parse_config("period_ms = 10001"),
            Err(ConfigError::PeriodOutOfRange(10_001))
        );
        assert_eq!(
            parse_config("period_ms = 1"),
            Err(ConfigError::PeriodOutOfRange(1))
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_config("[stepper]"), Err(ConfigError::InvalidSection));
        assert_eq!(parse_config("speed = 3"), Err(ConfigError::UnknownKey));
        assert_eq!(parse_config("mode = \"Shuffle\""), Err(ConfigError::InvalidValue));
        assert_eq!(parse_config("output_id = 300"), Err(ConfigError::InvalidValue));
        assert_eq!(parse_config("startup = \"11\""), Err(ConfigError::InvalidValue));
        assert_eq!(parse_config("period_ms ="), Err(ConfigError::InvalidValue));
        assert_eq!(parse_config("just words"), Err(ConfigError::InvalidValue));
    }

    #[test]
    fn test_hash_inside_string_kept() {
        assert_eq!(parse_key_value("mode = \"a#b\""), Some(("mode", "\"a#b\"")));
        assert_eq!(
            parse_key_value("mode = \"a#b\" # trailing"),
            Some(("mode", "\"a#b\""))
        );
        assert_eq!(parse_key_value("period_ms = # nothing"), None);
    }

    #[test]
    fn test_parse_string_quotes_optional() {
        assert_eq!(parse_string("\"shuffle\""), "shuffle");
        assert_eq!(parse_string("shuffle"), "shuffle");
        // A lone quote is left as is
        assert_eq!(parse_string("\""), "\"");
    }
}
