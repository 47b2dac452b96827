//! Hardware-facing implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in quadstep-core:
//!
//! - [`output::LineBank`]: four GPIO lines driven as one output bank
//! - [`output::HalLine`]: adapter from `embedded-hal` pins
//! - [`sequencer::SequencerRunner`]: the async sequencer loop

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod output;
pub mod sequencer;
