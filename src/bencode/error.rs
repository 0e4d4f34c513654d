use std::fmt;

use thiserror::Error;

use super::value::ValueKind;

/// The grammar production a decoder failure originated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Production {
    /// `i<digits>e`
    Integer,
    /// `<len>:<bytes>`
    ByteString,
    /// `l<items>e`
    List,
    /// `d<key><value>...e`
    Dictionary,
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Production::Integer => "integer",
            Production::ByteString => "byte string",
            Production::List => "list",
            Production::Dictionary => "dictionary",
        };
        f.write_str(name)
    }
}

/// Errors produced while decoding, encoding or manipulating bencode values.
///
/// Positions are absolute byte offsets into the buffer handed to the decoder.
#[derive(Debug, Error)]
pub enum BencodeError {
    /// The buffer, or the part of it after the start offset, is empty.
    #[error("empty input")]
    EmptyInput,

    /// The start offset lies past the end of the buffer.
    #[error("offset {offset} out of range for input of {len} bytes")]
    OffsetOutOfRange { offset: usize, len: usize },

    /// The byte at `position` does not start any production.
    #[error("unexpected character {found:?} at position {position}")]
    UnexpectedChar { found: char, position: usize },

    /// A terminator (`e` or `:`) was not found where the production needs one.
    #[error("{production}: expected {expected:?} at position {position}")]
    MissingDelimiter {
        production: Production,
        expected: char,
        position: usize,
    },

    /// A decimal field is malformed: empty, `-0`, leading zeros, stray
    /// characters, or out of range.
    #[error("{production}: invalid integer literal {literal:?} at position {position}")]
    InvalidInteger {
        production: Production,
        literal: String,
        position: usize,
    },

    /// A dictionary key decoded to something other than a byte string.
    #[error("dictionary key at position {position} is a {found}, expected a byte string")]
    InvalidKeyType { found: ValueKind, position: usize },

    /// A byte string declares more content than the buffer holds.
    #[error("byte string at position {position} declares {declared} bytes but only {available} remain")]
    Truncated {
        declared: usize,
        available: usize,
        position: usize,
    },

    /// A list index is outside the valid range.
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Lists and dictionaries are nested deeper than the configured limit.
    #[error("nesting deeper than {max_depth} levels at position {position}")]
    NestingTooDeep { max_depth: usize, position: usize },

    /// A complete value was decoded but bytes remain after it.
    #[error("trailing data after value at position {position}")]
    TrailingData { position: usize },

    /// Encoding was requested for an absent value.
    #[error("encode error: {0}")]
    Encode(&'static str),

    /// A character cannot be represented as a single Latin-1 byte.
    #[error("character {0:?} is not representable in Latin-1")]
    NotLatin1(char),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BencodeError {
    /// Returns the byte position the error refers to, if it has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            BencodeError::UnexpectedChar { position, .. }
            | BencodeError::MissingDelimiter { position, .. }
            | BencodeError::InvalidInteger { position, .. }
            | BencodeError::InvalidKeyType { position, .. }
            | BencodeError::Truncated { position, .. }
            | BencodeError::NestingTooDeep { position, .. }
            | BencodeError::TrailingData { position } => Some(*position),
            BencodeError::OffsetOutOfRange { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    /// Returns the production that was being decoded when the error occurred.
    pub fn production(&self) -> Option<Production> {
        match self {
            BencodeError::MissingDelimiter { production, .. }
            | BencodeError::InvalidInteger { production, .. } => Some(*production),
            BencodeError::InvalidKeyType { .. } => Some(Production::Dictionary),
            BencodeError::Truncated { .. } => Some(Production::ByteString),
            _ => None,
        }
    }
}
