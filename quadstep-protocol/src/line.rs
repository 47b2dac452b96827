//! Line assembly for the control protocol.
//!
//! Bytes arrive from the UART in arbitrary chunks. [`LineParser`] collects
//! them until a `\n` and hands back the completed line:
//! - `\r` bytes are dropped
//! - blank lines are skipped
//! - a line longer than [`MAX_LINE_LEN`] is discarded up to its newline
//!   and reported once as [`ProtocolError::LineTooLong`]

use heapless::{String, Vec};

use crate::messages::ProtocolError;

/// Maximum request line length in bytes (excluding the newline)
pub const MAX_LINE_LEN: usize = 48;

/// A complete request line
pub type Line = String<MAX_LINE_LEN>;

/// State machine for assembling incoming lines
#[derive(Debug, Clone, Default)]
pub struct LineParser {
    buffer: Vec<u8, MAX_LINE_LEN>,
    /// Set once the current line exceeded the buffer; cleared at newline
    overflowed: bool,
}

impl LineParser {
    /// Create a new line parser
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(line))` when a complete line is available,
    /// `Ok(None)` when more bytes are needed, or `Err` when the finished
    /// line could not be used.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, ProtocolError> {
        match byte {
            b'\n' => {
                if self.overflowed {
                    self.reset();
                    return Err(ProtocolError::LineTooLong);
                }
                if self.buffer.is_empty() {
                    return Ok(None);
                }

                let result = core::str::from_utf8(&self.buffer)
                    .map_err(|_| ProtocolError::InvalidUtf8)
                    .and_then(|s| Line::try_from(s).map_err(|_| ProtocolError::LineTooLong));
                self.reset();
                result.map(Some)
            }
            b'\r' => Ok(None),
            _ => {
                if !self.overflowed && self.buffer.push(byte).is_err() {
                    self.overflowed = true;
                    self.buffer.clear();
                }
                Ok(None)
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete line found, if any.
    /// Remaining bytes after a complete line are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Line>, ProtocolError> {
        for &byte in bytes {
            if let Some(line) = self.feed(byte)? {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }
}
