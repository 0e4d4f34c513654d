//! Latin-1 text boundary.
//!
//! Bencode is byte oriented. Callers that hold documents as text treat every
//! character as one byte in the range `0x00..=0xFF`, which makes the mapping
//! between text and bytes lossless in both directions.

use bytes::Bytes;

use super::decode::decode_at;
use super::encode::encode;
use super::error::BencodeError;
use super::value::Value;

/// Converts Latin-1 text to bytes, one byte per character.
///
/// # Errors
///
/// Returns [`BencodeError::NotLatin1`] for the first character above `U+00FF`.
pub fn latin1_to_bytes(text: &str) -> Result<Bytes, BencodeError> {
    text.chars()
        .map(|c| u8::try_from(c).map_err(|_| BencodeError::NotLatin1(c)))
        .collect::<Result<Vec<u8>, _>>()
        .map(Bytes::from)
}

/// Converts bytes to text, reading each byte as a Latin-1 character.
pub fn bytes_to_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Encodes `value` and returns the canonical form as Latin-1 text.
///
/// # Examples
///
/// ```
/// use rbencode::{encode_latin1, Value};
///
/// let value = Value::from(vec![Value::Integer(5), Value::string("Hello")]);
/// assert_eq!(encode_latin1(&value).unwrap(), "li5e5:Helloe");
/// ```
pub fn encode_latin1(value: &Value) -> Result<String, BencodeError> {
    encode(value).map(|bytes| bytes_to_latin1(&bytes))
}

/// Decodes one value from Latin-1 text starting at character `offset`.
///
/// Offsets and the returned consumed count are in characters, which equal
/// bytes under Latin-1.
pub fn decode_latin1(text: &str, offset: usize) -> Result<(Value, usize), BencodeError> {
    let bytes = latin1_to_bytes(text)?;
    decode_at(&bytes, offset)
}
