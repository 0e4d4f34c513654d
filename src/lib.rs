//! rbencode - canonical Bencode for BitTorrent metadata
//!
//! This library provides the Bencode value model together with a decoder and
//! an encoder that agree on one canonical byte form, following BEP-3.
//!
//! # Modules
//!
//! - [`bencode`] - Value model, decoder, encoder and helpers
//! - [`constants`] - Decoder limits and wire format delimiters

pub mod bencode;
pub mod constants;

pub use bencode::{
    bytes_to_latin1, decode, decode_at, decode_latin1, decode_reader, encode, encode_latin1,
    encode_optional, encode_to, latin1_to_bytes, BencodeError, DecodeOptions, Dict, List,
    Production, SyncDict, SyncList, Value, ValueKind,
};
