//! Request and response types for the control protocol
//!
//! Requests are parsed from a single line produced by
//! [`LineParser`](crate::line::LineParser). Responses encode back into a
//! newline-terminated line ready for the UART.

use core::fmt::Write;

use heapless::String;

/// Maximum encoded response length, including the trailing newline
pub const MAX_RESPONSE_LEN: usize = 64;

/// Keyword that halts the sequencer
const STOP_KEYWORD: &str = "stop";

/// Errors that can occur while parsing requests or encoding responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Line held nothing but whitespace
    Empty,
    /// Key does not name a known attribute
    UnknownAttribute,
    /// Attempted to write a read-only attribute
    ReadOnly,
    /// Line exceeded the receive buffer
    LineTooLong,
    /// Line contained bytes that are not valid UTF-8
    InvalidUtf8,
    /// Response did not fit the encode buffer
    BufferTooSmall,
}

impl ProtocolError {
    /// Short token used in `err <token>` replies
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolError::Empty => "empty",
            ProtocolError::UnknownAttribute => "unknown-attribute",
            ProtocolError::ReadOnly => "read-only",
            ProtocolError::LineTooLong => "line-too-long",
            ProtocolError::InvalidUtf8 => "invalid-utf8",
            ProtocolError::BufferTooSmall => "buffer-too-small",
        }
    }
}

/// Attributes exposed on the control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Attribute {
    /// Active sequencing mode
    Mode,
    /// Step period in milliseconds
    Period,
    /// Instance name derived from the configured output id (read-only)
    Name,
}

impl Attribute {
    /// All attributes, in listing order
    pub const ALL: [Attribute; 3] = [Attribute::Mode, Attribute::Period, Attribute::Name];

    /// Look up an attribute by its wire key
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "mode" => Some(Attribute::Mode),
            "period" => Some(Attribute::Period),
            "name" => Some(Attribute::Name),
            _ => None,
        }
    }

    /// Wire key for this attribute
    pub fn key(&self) -> &'static str {
        match self {
            Attribute::Mode => "mode",
            Attribute::Period => "period",
            Attribute::Name => "name",
        }
    }

    /// Whether writes to this attribute are permitted
    pub fn is_writable(&self) -> bool {
        !matches!(self, Attribute::Name)
    }
}

/// A parsed control request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request<'a> {
    /// Read the current value of an attribute
    Read(Attribute),
    /// Write a raw value to an attribute; validation happens downstream
    Write(Attribute, &'a str),
    /// Halt the sequencer
    Stop,
}

impl<'a> Request<'a> {
    /// Parse a request from one line
    ///
    /// Surrounding whitespace is trimmed from the line, the key and the
    /// value. Values are passed through untouched otherwise: deciding
    /// whether `mode=Shuffle` is acceptable is not the protocol's job.
    pub fn parse(line: &'a str) -> Result<Self, ProtocolError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ProtocolError::Empty);
        }

        if line == STOP_KEYWORD {
            return Ok(Request::Stop);
        }

        match line.split_once('=') {
            Some((key, value)) => {
                let attribute =
                    Attribute::from_key(key.trim()).ok_or(ProtocolError::UnknownAttribute)?;
                if !attribute.is_writable() {
                    return Err(ProtocolError::ReadOnly);
                }
                Ok(Request::Write(attribute, value.trim()))
            }
            None => Attribute::from_key(line)
                .map(Request::Read)
                .ok_or(ProtocolError::UnknownAttribute),
        }
    }
}

/// Replies sent back over the control link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response<'a> {
    /// Current value of an attribute (answer to both reads and writes)
    Value(Attribute, &'a str),
    /// Sequencer acknowledged a stop request
    Stopped,
    /// Request could not be served
    Error(ProtocolError),
}

impl<'a> Response<'a> {
    /// Encode this response as a newline-terminated line
    pub fn encode(&self) -> Result<String<MAX_RESPONSE_LEN>, ProtocolError> {
        let mut out = String::new();
        let written = match self {
            Response::Value(attribute, value) => writeln!(out, "{}={}", attribute.key(), value),
            Response::Stopped => writeln!(out, "stopped"),
            Response::Error(e) => writeln!(out, "err {}", e.as_str()),
        };
        written.map_err(|_| ProtocolError::BufferTooSmall)?;
        Ok(out)
    }
}
