use super::dict::Dict;
use super::error::{BencodeError, Production};
use super::list::List;
use super::scan::{find_byte, find_first_of, is_digit};
use super::value::Value;
use crate::constants::{
    DEFAULT_MAX_DEPTH, DICT_START, END, INTEGER_START, LENGTH_SEPARATOR, LIST_START,
};
use bytes::Bytes;
use std::io::Read;
use tracing::{debug, trace};

/// Decoder settings.
///
/// # Examples
///
/// ```
/// use rbencode::DecodeOptions;
///
/// let options = DecodeOptions::new().with_max_depth(2).allow_trailing(true);
/// assert!(options.decode(b"llee").is_ok());
/// assert!(options.decode(b"llleee").is_err());
/// assert!(options.decode(b"i1eextra").is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    max_depth: usize,
    allow_trailing: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_trailing: false,
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many lists and dictionaries may be nested inside each other.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether [`DecodeOptions::decode`] accepts bytes after the first value.
    pub fn allow_trailing(mut self, allow: bool) -> Self {
        self.allow_trailing = allow;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Decodes the single value that makes up `data`.
    ///
    /// # Errors
    ///
    /// Fails on malformed input, and on bytes left over after the value unless
    /// trailing data is allowed.
    pub fn decode(&self, data: &[u8]) -> Result<Value, BencodeError> {
        let (value, consumed) = self.decode_at(data, 0)?;

        if !self.allow_trailing && consumed != data.len() {
            debug!("trailing data after bencode value at offset {}", consumed);
            return Err(BencodeError::TrailingData { position: consumed });
        }

        Ok(value)
    }

    /// Decodes one value starting at `offset`.
    ///
    /// Returns the value and the number of bytes it occupied. Bytes after the
    /// value are left for the caller.
    pub fn decode_at(&self, data: &[u8], offset: usize) -> Result<(Value, usize), BencodeError> {
        if offset > data.len() {
            return Err(BencodeError::OffsetOutOfRange {
                offset,
                len: data.len(),
            });
        }
        if offset == data.len() {
            return Err(BencodeError::EmptyInput);
        }

        let mut pos = offset;
        match decode_value(data, &mut pos, 0, self.max_depth) {
            Ok(value) => Ok((value, pos - offset)),
            Err(e) => {
                debug!("bencode decode starting at offset {} failed: {}", offset, e);
                Err(e)
            }
        }
    }
}

/// Decodes a complete bencode document.
///
/// # Errors
///
/// Returns an error if `data` is not exactly one well-formed value.
///
/// # Examples
///
/// ```
/// use rbencode::{decode, BencodeError};
///
/// let value = decode(b"li5e5:Helloe").unwrap();
/// assert_eq!(value.as_list().unwrap().len(), 2);
///
/// assert!(matches!(decode(b"i-0e"), Err(BencodeError::InvalidInteger { .. })));
/// assert!(matches!(decode(b"5:Hel"), Err(BencodeError::Truncated { .. })));
/// ```
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    DecodeOptions::default().decode(data)
}

/// Decodes one value starting at `offset`, returning it with the number of
/// bytes consumed.
///
/// # Examples
///
/// ```
/// use rbencode::{decode_at, Value};
///
/// let (value, consumed) = decode_at(b"xxi42eyy", 2).unwrap();
/// assert_eq!(value, Value::Integer(42));
/// assert_eq!(consumed, 4);
/// ```
pub fn decode_at(data: &[u8], offset: usize) -> Result<(Value, usize), BencodeError> {
    DecodeOptions::default().decode_at(data, offset)
}

/// Reads `reader` to the end and decodes the whole content as one value.
pub fn decode_reader<R: Read>(mut reader: R) -> Result<Value, BencodeError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    decode(&buf)
}

fn decode_value(
    data: &[u8],
    pos: &mut usize,
    depth: usize,
    max_depth: usize,
) -> Result<Value, BencodeError> {
    let Some(&lead) = data.get(*pos) else {
        return Err(BencodeError::EmptyInput);
    };

    match lead {
        INTEGER_START => decode_integer(data, pos),
        LIST_START => {
            let depth = enter(depth, max_depth, *pos)?;
            decode_list(data, pos, depth, max_depth)
        }
        DICT_START => {
            let depth = enter(depth, max_depth, *pos)?;
            decode_dict(data, pos, depth, max_depth)
        }
        b'0'..=b'9' => decode_bytes(data, pos),
        c => Err(BencodeError::UnexpectedChar {
            found: c as char,
            position: *pos,
        }),
    }
}

fn enter(depth: usize, max_depth: usize, position: usize) -> Result<usize, BencodeError> {
    let depth = depth + 1;
    if depth > max_depth {
        return Err(BencodeError::NestingTooDeep {
            max_depth,
            position,
        });
    }
    Ok(depth)
}

fn decode_integer(data: &[u8], pos: &mut usize) -> Result<Value, BencodeError> {
    let start = *pos + 1;
    let end = find_byte(data, start, END).ok_or(BencodeError::MissingDelimiter {
        production: Production::Integer,
        expected: END as char,
        position: data.len(),
    })?;

    let value = parse_decimal(&data[start..end], Production::Integer, start)?;

    *pos = end + 1;
    Ok(Value::Integer(value))
}

fn decode_bytes(data: &[u8], pos: &mut usize) -> Result<Value, BencodeError> {
    let start = *pos;
    let missing_colon = |position| BencodeError::MissingDelimiter {
        production: Production::ByteString,
        expected: LENGTH_SEPARATOR as char,
        position,
    };

    let colon = find_first_of(data, start, |b| !is_digit(b))
        .ok_or_else(|| missing_colon(data.len()))?;
    if data[colon] != LENGTH_SEPARATOR {
        return Err(missing_colon(colon));
    }

    let field = &data[start..colon];
    let declared = parse_decimal(field, Production::ByteString, start).and_then(|n| {
        usize::try_from(n).map_err(|_| invalid_literal(field, Production::ByteString, start))
    })?;

    let content = colon + 1;
    let available = data.len() - content;
    if declared > available {
        return Err(BencodeError::Truncated {
            declared,
            available,
            position: start,
        });
    }

    let bytes = Bytes::copy_from_slice(&data[content..content + declared]);
    *pos = content + declared;

    Ok(Value::Bytes(bytes))
}

fn decode_list(
    data: &[u8],
    pos: &mut usize,
    depth: usize,
    max_depth: usize,
) -> Result<Value, BencodeError> {
    *pos += 1;
    let mut list = List::new();

    loop {
        match data.get(*pos) {
            Some(&END) => break,
            Some(_) => list.push(decode_value(data, pos, depth, max_depth)?),
            None => return Err(missing_end(Production::List, *pos)),
        }
    }

    *pos += 1;
    Ok(Value::List(list))
}

fn decode_dict(
    data: &[u8],
    pos: &mut usize,
    depth: usize,
    max_depth: usize,
) -> Result<Value, BencodeError> {
    *pos += 1;
    let mut dict = Dict::new();

    loop {
        match data.get(*pos) {
            Some(&END) => break,
            Some(_) => {}
            None => return Err(missing_end(Production::Dictionary, *pos)),
        }

        let key_start = *pos;
        let key = match decode_value(data, pos, depth, max_depth)? {
            Value::Bytes(b) => b,
            other => {
                return Err(BencodeError::InvalidKeyType {
                    found: other.kind(),
                    position: key_start,
                })
            }
        };

        if *pos >= data.len() {
            return Err(missing_end(Production::Dictionary, *pos));
        }
        let value = decode_value(data, pos, depth, max_depth)?;

        // Keys are not required to arrive sorted or unique; the last one wins.
        if dict.contains_key(&key) {
            trace!(
                "duplicate dictionary key {:?} at offset {} overwrites earlier value",
                String::from_utf8_lossy(&key),
                key_start
            );
        }
        dict.put(key, value);
    }

    *pos += 1;
    Ok(Value::Dict(dict))
}

/// Parses a strict base-10 literal: an optional `-` followed by digits with
/// no leading zero, except for a lone `0`. `-0` is rejected.
fn parse_decimal(
    literal: &[u8],
    production: Production,
    position: usize,
) -> Result<i64, BencodeError> {
    let digits = literal.strip_prefix(b"-").unwrap_or(literal);
    let negative = digits.len() != literal.len();

    if digits.is_empty() || !digits.iter().copied().all(is_digit) {
        return Err(invalid_literal(literal, production, position));
    }
    if digits[0] == b'0' && (digits.len() > 1 || negative) {
        return Err(invalid_literal(literal, production, position));
    }

    std::str::from_utf8(literal)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| invalid_literal(literal, production, position))
}

fn invalid_literal(literal: &[u8], production: Production, position: usize) -> BencodeError {
    BencodeError::InvalidInteger {
        production,
        literal: String::from_utf8_lossy(literal).into_owned(),
        position,
    }
}

fn missing_end(production: Production, position: usize) -> BencodeError {
    BencodeError::MissingDelimiter {
        production,
        expected: END as char,
        position,
    }
}
