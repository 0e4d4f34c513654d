//! Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format used throughout BitTorrent for storing
//! and transmitting structured data, including `.torrent` files and tracker
//! responses.
//!
//! # Data Types
//!
//! Bencode supports four data types:
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! # Canonical form
//!
//! Every [`Value`] has exactly one encoding: integers carry no leading zeros
//! and never read `-0`, and dictionary keys appear in ascending byte order.
//! [`Dict`] keeps its keys sorted at all times, so the order is visible to
//! readers as well as to the encoder. [`Value::canonical_length`] reports the
//! size of that encoding without producing it.
//!
//! # Examples
//!
//! ## Decoding bencode data
//!
//! ```
//! use rbencode::{decode, decode_at, Value};
//!
//! let value = decode(b"i42e").unwrap();
//! assert_eq!(value.as_integer(), Some(42));
//!
//! let value = decode(b"d3:foo3:bare").unwrap();
//! assert_eq!(value.get(b"foo").and_then(|v| v.as_str()), Some("bar"));
//!
//! // Decode from an offset and learn how much was consumed.
//! let (value, consumed) = decode_at(b"junk4:spam", 4).unwrap();
//! assert_eq!(value.as_str(), Some("spam"));
//! assert_eq!(consumed, 6);
//! ```
//!
//! ## Building and encoding
//!
//! ```
//! use rbencode::{encode, Dict, List, Value};
//!
//! let mut foo = List::new();
//! foo.push(Value::Integer(5));
//! foo.push(Value::string("Hello"));
//!
//! let mut dict = Dict::new();
//! dict.put("foo", Value::List(foo));
//! dict.put("bar", Value::Integer(1));
//!
//! let value = Value::Dict(dict);
//! let encoded = encode(&value).unwrap();
//! assert_eq!(encoded, b"d3:bari1e3:fooli5e5:Helloee");
//! assert_eq!(encoded.len(), value.canonical_length());
//! ```
//!
//! # Error Handling
//!
//! Decoding fails fast with the first problem found and never returns a
//! partial value. Each [`BencodeError`] names the byte position and, for
//! grammar errors, the [`Production`] being decoded:
//!
//! - [`BencodeError::UnexpectedChar`] - No production starts with this byte
//! - [`BencodeError::MissingDelimiter`] - A terminating `e` or `:` is missing
//! - [`BencodeError::InvalidInteger`] - Malformed number (e.g. `-0`, leading zeros)
//! - [`BencodeError::InvalidKeyType`] - Dictionary key is not a byte string
//! - [`BencodeError::Truncated`] - Byte string longer than the remaining input
//! - [`BencodeError::NestingTooDeep`] - Nesting limit exceeded (64 levels by default)
//! - [`BencodeError::TrailingData`] - Extra data after the value
//!
//! Dictionaries with unsorted or repeated keys are accepted; for a repeated
//! key the last value wins.
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod dict;
mod encode;
mod error;
mod list;
pub mod scan;
mod sync;
mod text;
mod value;

pub use decode::{decode, decode_at, decode_reader, DecodeOptions};
pub use dict::Dict;
pub use encode::{encode, encode_optional, encode_to};
pub use error::{BencodeError, Production};
pub use list::List;
pub use sync::{SyncDict, SyncList};
pub use text::{bytes_to_latin1, decode_latin1, encode_latin1, latin1_to_bytes};
pub use value::{Value, ValueKind};

#[cfg(test)]
mod tests;
