//! Quadstep Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction used by the sequencer
//! drivers. Chip-specific code (the RP2040 firmware, or mocks in host
//! tests) implements these traits so the same driver code runs on any
//! board.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (quadstep-firmware)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  quadstep-drivers (LineBank, runner)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  quadstep-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Contents
//!
//! - [`gpio::OutputPin`] - Fallible digital output line
//! - [`gpio::LineAllocator`] - Reservation tracking for output lines

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;

// Re-export key items at crate root for convenience
pub use gpio::{LineAllocator, LineError, OutputPin, MAX_LINE_ID};
