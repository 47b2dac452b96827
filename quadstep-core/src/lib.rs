//! Board-agnostic core logic for the four-line output sequencer
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Sequencing modes and the static step tables
//! - Shared control state (mode + period) and its validating interface
//! - Sequencer lifecycle state machine and per-tick logic
//! - Output bank trait
//! - Startup configuration and parser

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod control;
pub mod sequence;
pub mod sequencer;
pub mod traits;
