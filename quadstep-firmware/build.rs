//! Build script for quadstep-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates sequencer.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Mode tokens accepted by the firmware
const MODES: [&str; 3] = ["sweepright", "sweepleft", "shuffle"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate sequencer.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=sequencer.toml");

    let config_path = Path::new("sequencer.toml");

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read sequencer.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in sequencer.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let errors = validate_sequencer(&config);
    if !errors.is_empty() {
        fail("Invalid sequencer configuration", &errors);
    }

    println!("cargo:warning=sequencer.toml validated successfully");
}

/// Check top-level keys and the optional `[sequencer]` table
///
/// The firmware parser reads keys the same way with or without the
/// header, so both places are validated.
fn validate_sequencer(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(root) = config.as_table() else {
        return errors;
    };

    validate_table(root, "", &mut errors);

    match root.get("sequencer") {
        Some(toml::Value::Table(t)) => validate_table(t, "[sequencer] ", &mut errors),
        Some(_) => errors.push("[sequencer] must be a table".to_string()),
        None => {}
    }

    errors
}

fn validate_table(table: &toml::Table, prefix: &str, errors: &mut Vec<String>) {
    for (key, value) in table {
        let ok = match key.as_str() {
            "output_id" => matches!(value, toml::Value::Integer(id) if (0..=255).contains(id)),
            "period_ms" => matches!(value, toml::Value::Integer(ms) if (2..=10_000).contains(ms)),
            "mode" => matches!(value, toml::Value::String(m) if MODES.contains(&m.as_str())),
            "startup" => matches!(
                value,
                toml::Value::String(bits)
                    if bits.len() == 4 && bits.chars().all(|c| c == '0' || c == '1')
            ),
            // Section itself, checked by the caller
            "sequencer" if prefix.is_empty() => continue,
            _ => {
                errors.push(format!("{}unknown key '{}'", prefix, key));
                continue;
            }
        };

        if !ok {
            errors.push(format!("{}{}: {}", prefix, key, expected(key)));
        }
    }
}

/// What a known key must hold
fn expected(key: &str) -> &'static str {
    match key {
        "output_id" => "must be an integer 0-255",
        "period_ms" => "must be an integer 2-10000",
        "mode" => "must be 'sweepright', 'sweepleft' or 'shuffle'",
        _ => "must be four '0'/'1' characters",
    }
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(lines)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| {
            let truncated = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.clone()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
