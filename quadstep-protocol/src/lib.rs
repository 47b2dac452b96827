//! Quadstep Control Protocol
//!
//! This crate defines the UART protocol used to inspect and change the
//! sequencer's live attributes. It is a plain-text key/value protocol so
//! a serial terminal is enough to drive it.
//!
//! # Protocol Overview
//!
//! Every request and response is one newline-terminated ASCII line:
//! ```text
//! → mode                 ← mode=sweepright
//! → period=500           ← period=500
//! → period=0             ← period=500        (rejected, value retained)
//! → name                 ← name=led17
//! → stop                 ← stopped
//! → speed                ← err unknown-attribute
//! ```
//!
//! A write always answers with the attribute's value after the write, so a
//! rejected write is visible only as an unchanged value. Trailing `\r` is
//! ignored so both `\n` and `\r\n` terminals work.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod line;
pub mod messages;

pub use line::{Line, LineParser, MAX_LINE_LEN};
pub use messages::{Attribute, ProtocolError, Request, Response, MAX_RESPONSE_LEN};
