use super::dict::Dict;
use super::error::BencodeError;
use super::list::List;
use super::value::Value;
use std::io::Write;

/// Encodes a bencode value to a byte vector.
///
/// The output follows the canonical bencode format:
/// - Integers: `i<number>e`
/// - Byte strings: `<length>:<data>`
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e` (keys sorted lexicographically)
///
/// The result is always exactly [`Value::canonical_length`] bytes long.
///
/// # Errors
///
/// Returns an error if writing to the internal buffer fails.
///
/// # Examples
///
/// ```
/// use rbencode::{encode, Dict, Value};
///
/// // Encode an integer
/// let encoded = encode(&Value::Integer(42)).unwrap();
/// assert_eq!(encoded, b"i42e");
///
/// // Encode a string
/// let encoded = encode(&Value::string("hello")).unwrap();
/// assert_eq!(encoded, b"5:hello");
///
/// // Encode a list
/// let list = Value::from(vec![Value::Integer(1), Value::string("two")]);
/// let encoded = encode(&list).unwrap();
/// assert_eq!(encoded, b"li1e3:twoe");
///
/// // Encode a dictionary
/// let mut dict = Dict::new();
/// dict.put("b", Value::Integer(2));
/// dict.put("a", Value::Integer(1));
/// let encoded = encode(&Value::Dict(dict)).unwrap();
/// assert_eq!(encoded, b"d1:ai1e1:bi2ee");
/// ```
pub fn encode(value: &Value) -> Result<Vec<u8>, BencodeError> {
    let mut buf = Vec::with_capacity(value.canonical_length());
    encode_value(value, &mut buf)?;
    Ok(buf)
}

/// Encodes a value that may be absent.
///
/// # Errors
///
/// Returns [`BencodeError::Encode`] when `value` is `None`; nothing is produced.
pub fn encode_optional(value: Option<&Value>) -> Result<Vec<u8>, BencodeError> {
    match value {
        Some(v) => encode(v),
        None => Err(BencodeError::Encode("cannot encode an absent value")),
    }
}

/// Streams the canonical encoding of `value` into `writer`.
///
/// # Errors
///
/// Returns [`BencodeError::Io`] if the writer fails.
pub fn encode_to<W: Write>(value: &Value, mut writer: W) -> Result<(), BencodeError> {
    encode_value(value, &mut writer)
}

fn encode_value<W: Write>(value: &Value, writer: &mut W) -> Result<(), BencodeError> {
    match value {
        Value::Integer(i) => {
            write!(writer, "i{}e", i)?;
        }
        Value::Bytes(b) => {
            encode_bytes(b, writer)?;
        }
        Value::List(l) => encode_list(l, writer)?,
        Value::Dict(d) => encode_dict(d, writer)?,
    }
    Ok(())
}

pub(crate) fn list_to_vec(list: &List) -> Result<Vec<u8>, BencodeError> {
    let mut buf = Vec::with_capacity(list.canonical_length());
    encode_list(list, &mut buf)?;
    Ok(buf)
}

pub(crate) fn dict_to_vec(dict: &Dict) -> Result<Vec<u8>, BencodeError> {
    let mut buf = Vec::with_capacity(dict.canonical_length());
    encode_dict(dict, &mut buf)?;
    Ok(buf)
}

fn encode_list<W: Write>(list: &List, writer: &mut W) -> Result<(), BencodeError> {
    writer.write_all(b"l")?;
    for item in list {
        encode_value(item, writer)?;
    }
    writer.write_all(b"e")?;
    Ok(())
}

fn encode_dict<W: Write>(dict: &Dict, writer: &mut W) -> Result<(), BencodeError> {
    writer.write_all(b"d")?;
    for (key, val) in dict {
        encode_bytes(key, writer)?;
        encode_value(val, writer)?;
    }
    writer.write_all(b"e")?;
    Ok(())
}

fn encode_bytes<W: Write>(bytes: &[u8], writer: &mut W) -> Result<(), BencodeError> {
    write!(writer, "{}:", bytes.len())?;
    writer.write_all(bytes)?;
    Ok(())
}
