use std::collections::BTreeMap;
use std::io;

use bytes::Bytes;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;

fn hello_list(n: i64, s: &str) -> Value {
    Value::from(vec![Value::Integer(n), Value::string(s)])
}

#[test]
fn test_decode_integer() {
    assert_eq!(decode(b"i42e").unwrap(), Value::Integer(42));
    assert_eq!(decode(b"i-42e").unwrap(), Value::Integer(-42));
    assert_eq!(decode(b"i0e").unwrap(), Value::Integer(0));
    assert_eq!(
        decode(b"i-9223372036854775808e").unwrap(),
        Value::Integer(i64::MIN)
    );
}

#[test]
fn test_decode_integer_invalid() {
    for input in [
        &b"i-0e"[..],
        b"i03e",
        b"i-03e",
        b"ie",
        b"i-e",
        b"i+5e",
        b"i1.5e",
        b"i 1e",
        b"i9223372036854775808e",
    ] {
        assert!(
            matches!(
                decode(input),
                Err(BencodeError::InvalidInteger {
                    production: Production::Integer,
                    position: 1,
                    ..
                })
            ),
            "accepted {:?}",
            String::from_utf8_lossy(input)
        );
    }
}

#[test]
fn test_negative_zero_literal_is_reported() {
    match decode(b"i-0e") {
        Err(BencodeError::InvalidInteger { literal, .. }) => assert_eq!(literal, "-0"),
        other => panic!("expected invalid integer, got {:?}", other),
    }
}

#[test]
fn test_decode_bytes() {
    assert_eq!(
        decode(b"4:spam").unwrap(),
        Value::Bytes(Bytes::from_static(b"spam"))
    );

    let hello = decode(b"5:Hello").unwrap();
    assert_eq!(hello.as_str(), Some("Hello"));
    assert_eq!(hello.canonical_length(), 7);

    let empty = decode(b"0:").unwrap();
    assert_eq!(empty, Value::Bytes(Bytes::new()));
    assert_eq!(empty.canonical_length(), 2);
}

#[test]
fn test_decode_bytes_non_utf8() {
    let value = decode(b"3:\xff\x00\xfe").unwrap();
    assert_eq!(&value.as_bytes().unwrap()[..], b"\xff\x00\xfe");
    assert_eq!(value.as_str(), None);
}

#[test]
fn test_decode_bytes_truncated() {
    match decode(b"5:Hel") {
        Err(BencodeError::Truncated {
            declared,
            available,
            position,
        }) => {
            assert_eq!(declared, 5);
            assert_eq!(available, 3);
            assert_eq!(position, 0);
        }
        other => panic!("expected truncated content, got {:?}", other),
    }
}

#[test]
fn test_decode_bytes_leading_zero_length() {
    assert!(matches!(
        decode(b"007:abcdefg"),
        Err(BencodeError::InvalidInteger {
            production: Production::ByteString,
            position: 0,
            ..
        })
    ));
    assert!(matches!(
        decode(b"00:"),
        Err(BencodeError::InvalidInteger { .. })
    ));
}

#[test]
fn test_decode_bytes_missing_colon() {
    assert!(matches!(
        decode(b"3"),
        Err(BencodeError::MissingDelimiter {
            production: Production::ByteString,
            expected: ':',
            position: 1,
        })
    ));
    assert!(matches!(
        decode(b"3x:abc"),
        Err(BencodeError::MissingDelimiter {
            production: Production::ByteString,
            position: 1,
            ..
        })
    ));
}

#[test]
fn test_decode_list() {
    let result = decode(b"l4:spami42ee").unwrap();
    match result {
        Value::List(l) => {
            assert_eq!(l.len(), 2);
            assert_eq!(l[0], Value::Bytes(Bytes::from_static(b"spam")));
            assert_eq!(l[1], Value::Integer(42));
        }
        _ => panic!("expected list"),
    }
    assert_eq!(decode(b"le").unwrap(), Value::List(List::new()));
}

#[test]
fn test_nested_list_reencodes_exactly() {
    let data = b"li5e5:Helloe";
    let decoded = decode(data).unwrap();
    assert_eq!(decoded, hello_list(5, "Hello"));
    assert_eq!(encode(&decoded).unwrap(), data);
    assert_eq!(decoded.canonical_length(), data.len());
}

#[test]
fn test_decode_dict() {
    let result = decode(b"d3:cow3:moo4:spam4:eggse").unwrap();
    match result {
        Value::Dict(d) => {
            assert_eq!(d.len(), 2);
            assert_eq!(
                d.get(b"cow"),
                Some(&Value::Bytes(Bytes::from_static(b"moo")))
            );
        }
        _ => panic!("expected dict"),
    }
    assert_eq!(decode(b"de").unwrap(), Value::Dict(Dict::new()));
}

#[test]
fn test_decode_dict_unsorted_and_duplicate_keys() {
    let data = b"d3:fooi1e3:bari2e3:fooi3ee";
    let (value, consumed) = decode_at(data, 0).unwrap();
    assert_eq!(consumed, data.len());

    let dict = value.as_dict().unwrap();
    assert_eq!(dict.len(), 2);
    assert_eq!(dict.get(b"foo"), Some(&Value::Integer(3)));
    assert_eq!(dict.first_key().map(|k| &k[..]), Some(&b"bar"[..]));

    assert_eq!(encode(&value).unwrap(), b"d3:bari2e3:fooi3ee");
    assert_eq!(value.canonical_length(), 18);
}

#[test]
fn test_decode_dict_invalid_key_type() {
    assert!(matches!(
        decode(b"di1ei2ee"),
        Err(BencodeError::InvalidKeyType {
            found: ValueKind::Integer,
            position: 1,
        })
    ));
    assert!(matches!(
        decode(b"dlei1ee"),
        Err(BencodeError::InvalidKeyType {
            found: ValueKind::List,
            ..
        })
    ));
}

#[test]
fn test_decode_missing_terminators() {
    assert!(matches!(
        decode(b"i42"),
        Err(BencodeError::MissingDelimiter {
            production: Production::Integer,
            expected: 'e',
            position: 3,
        })
    ));
    assert!(matches!(
        decode(b"li1e"),
        Err(BencodeError::MissingDelimiter {
            production: Production::List,
            position: 4,
            ..
        })
    ));
    assert!(matches!(
        decode(b"d3:foo"),
        Err(BencodeError::MissingDelimiter {
            production: Production::Dictionary,
            position: 6,
            ..
        })
    ));
    assert!(matches!(
        decode(b"d3:fooi1e"),
        Err(BencodeError::MissingDelimiter {
            production: Production::Dictionary,
            ..
        })
    ));
}

#[test]
fn test_decode_unexpected_character() {
    assert!(matches!(
        decode(b"x"),
        Err(BencodeError::UnexpectedChar {
            found: 'x',
            position: 0,
        })
    ));
    assert!(matches!(
        decode(b"l-1e"),
        Err(BencodeError::UnexpectedChar {
            found: '-',
            position: 1,
        })
    ));
    // A key without a value runs into the dictionary terminator.
    assert!(matches!(
        decode(b"d3:fooe"),
        Err(BencodeError::UnexpectedChar {
            found: 'e',
            position: 6,
        })
    ));
}

#[test]
fn test_decode_empty_and_offsets() {
    assert!(matches!(decode(b""), Err(BencodeError::EmptyInput)));
    assert!(matches!(decode_at(b"i1e", 3), Err(BencodeError::EmptyInput)));
    assert!(matches!(
        decode_at(b"i1e", 4),
        Err(BencodeError::OffsetOutOfRange { offset: 4, len: 3 })
    ));

    let data = b"i1e4:spamle";
    let (first, n1) = decode_at(data, 0).unwrap();
    let (second, n2) = decode_at(data, n1).unwrap();
    let (third, n3) = decode_at(data, n1 + n2).unwrap();
    assert_eq!(first, Value::Integer(1));
    assert_eq!(second.as_str(), Some("spam"));
    assert_eq!(third, Value::List(List::new()));
    assert_eq!(n1 + n2 + n3, data.len());
}

#[test]
fn test_nesting_limit() {
    let mut ok = vec![b'l'; 64];
    ok.extend(vec![b'e'; 64]);
    assert!(decode(&ok).is_ok());

    let mut deep = vec![b'l'; 65];
    deep.extend(vec![b'e'; 65]);
    assert!(matches!(
        decode(&deep),
        Err(BencodeError::NestingTooDeep {
            max_depth: 64,
            position: 64,
        })
    ));

    let options = DecodeOptions::new().with_max_depth(0);
    assert!(options.decode(b"i1e").is_ok());
    assert!(options.decode(b"le").is_err());
}

#[test]
fn test_trailing_data_error() {
    assert!(matches!(
        decode(b"i42eextra"),
        Err(BencodeError::TrailingData { position: 4 })
    ));
    let lenient = DecodeOptions::new().allow_trailing(true);
    assert_eq!(lenient.decode(b"i42eextra").unwrap(), Value::Integer(42));
}

#[test]
fn test_error_context() {
    let err = decode(b"li1ei-0ee").unwrap_err();
    assert_eq!(err.position(), Some(5));
    assert_eq!(err.production(), Some(Production::Integer));
    assert!(err.to_string().contains("integer"));

    let err = decode(b"5:Hel").unwrap_err();
    assert_eq!(err.production(), Some(Production::ByteString));
    assert!(decode(b"").unwrap_err().position().is_none());
}

#[test]
fn test_encode_integer() {
    assert_eq!(encode(&Value::Integer(42)).unwrap(), b"i42e");
    assert_eq!(encode(&Value::Integer(-42)).unwrap(), b"i-42e");
    assert_eq!(encode(&Value::Integer(0)).unwrap(), b"i0e");
}

#[test]
fn test_encode_bytes() {
    assert_eq!(
        encode(&Value::Bytes(Bytes::from_static(b"spam"))).unwrap(),
        b"4:spam"
    );
    assert_eq!(encode(&Value::Bytes(Bytes::new())).unwrap(), b"0:");
}

#[test]
fn test_encode_list() {
    let list = Value::from(vec![
        Value::Bytes(Bytes::from_static(b"spam")),
        Value::Integer(42),
    ]);
    assert_eq!(encode(&list).unwrap(), b"l4:spami42ee");
}

#[test]
fn test_encode_dict() {
    let mut dict = Dict::new();
    dict.put("foo", hello_list(5, "Hello"));
    dict.put("bar", hello_list(50_000_000, "Hello World"));

    let value = Value::Dict(dict);
    let encoded = encode(&value).unwrap();
    assert_eq!(
        encoded,
        b"d3:barli50000000e11:Hello Worlde3:fooli5e5:Helloee".to_vec()
    );
    assert_eq!(encoded.len(), value.canonical_length());
}

#[test]
fn test_dict_keys_sorted_bytewise() {
    let mut dict = Dict::new();
    for key in ["foo", "bar", "boo", "90", "100", "ABC90", "ABC100"] {
        dict.put(key, Value::Integer(1));
    }

    let keys: Vec<String> = dict
        .keys()
        .map(|k| String::from_utf8_lossy(k).into_owned())
        .collect();
    assert_eq!(keys, vec!["100", "90", "ABC100", "ABC90", "bar", "boo", "foo"]);

    let sorted = keys
        .windows(2)
        .all(|w| scan::compare_keys(w[0].as_bytes(), w[1].as_bytes()).is_lt());
    assert!(sorted);
}

#[test]
fn test_encode_optional() {
    assert!(matches!(
        encode_optional(None),
        Err(BencodeError::Encode(_))
    ));
    assert_eq!(encode_optional(Some(&Value::Integer(7))).unwrap(), b"i7e");
}

#[test]
fn test_encode_to_and_decode_reader() {
    let value = decode(b"d4:infod4:name4:testee").unwrap();

    let mut out = Vec::new();
    encode_to(&value, &mut out).unwrap();
    assert_eq!(out, b"d4:infod4:name4:testee");

    let back = decode_reader(io::Cursor::new(out)).unwrap();
    assert_eq!(back, value);
}

struct FailingReader;

impl io::Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("disk gone"))
    }
}

#[test]
fn test_decode_reader_io_error() {
    assert!(matches!(
        decode_reader(FailingReader),
        Err(BencodeError::Io(_))
    ));
}

#[test]
fn test_roundtrip() {
    // Keys must be sorted lexicographically for bencode roundtrip
    let original = b"d8:announce15:http://test.com4:infod4:name4:test12:piece lengthi16384eee";
    let decoded = decode(original).unwrap();
    let encoded = encode(&decoded).unwrap();
    assert_eq!(encoded, original);
    assert_eq!(decoded.canonical_length(), original.len());
}

#[test]
fn test_roundtrip_built_values() {
    let mut inner = Dict::new();
    inner.put("neg", Value::Integer(-17));
    inner.put("raw", Value::from(vec![0u8, 255, 10]));

    let mut outer = Dict::new();
    outer.put("z", Value::Dict(inner));
    outer.put("a", Value::from(vec![Value::from(List::new()), Value::Integer(i64::MAX)]));

    let value = Value::Dict(outer);
    let encoded = encode(&value).unwrap();
    assert_eq!(encoded.len(), value.canonical_length());
    assert_eq!(decode(&encoded).unwrap(), value);
}

#[test]
fn test_nested_structures() {
    let data = b"d4:listl4:spami42eee";
    let decoded = decode(data).unwrap();
    let encoded = encode(&decoded).unwrap();
    assert_eq!(encoded, data);
}

#[test]
fn test_canonical_length_by_variant() {
    assert_eq!(Value::Integer(0).canonical_length(), 3);
    assert_eq!(Value::Integer(-1).canonical_length(), 4);
    assert_eq!(Value::Integer(50_000_000).canonical_length(), 10);
    assert_eq!(Value::string("Hello World").canonical_length(), 14);
    assert_eq!(Value::from(Vec::<Value>::new()).canonical_length(), 2);
    assert_eq!(hello_list(5, "Hello").canonical_length(), 12);

    let mut dict = Dict::new();
    dict.put("ab", Value::Integer(1));
    // d + 2:ab + i1e + e
    assert_eq!(dict.canonical_length(), 9);
}

#[test]
fn test_list_operations() {
    let mut list = List::new();
    list.push(Value::Integer(1));
    list.push(Value::Integer(3));
    list.insert(1, Value::Integer(2)).unwrap();
    list.insert(3, Value::Integer(4)).unwrap();
    assert_eq!(
        list.iter().filter_map(Value::as_integer).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );

    assert_eq!(list.set(0, Value::string("one")).unwrap(), Value::Integer(1));
    assert_eq!(list.remove(1).unwrap(), Value::Integer(2));
    assert_eq!(list.len(), 3);
    assert_eq!(list.position(&Value::Integer(4)), Some(2));
    assert!(list.contains(&Value::string("one")));
}

#[test]
fn test_list_index_out_of_range() {
    let mut list = List::from(vec![Value::Integer(1)]);
    assert!(matches!(
        list.get(1),
        Err(BencodeError::IndexOutOfRange { index: 1, len: 1 })
    ));
    assert!(matches!(
        list.set(5, Value::Integer(0)),
        Err(BencodeError::IndexOutOfRange { index: 5, len: 1 })
    ));
    assert!(matches!(
        list.remove(1),
        Err(BencodeError::IndexOutOfRange { .. })
    ));
    assert!(matches!(
        list.insert(2, Value::Integer(0)),
        Err(BencodeError::IndexOutOfRange { index: 2, len: 1 })
    ));
    assert_eq!(list.len(), 1);
}

#[test]
fn test_dict_operations() {
    let mut dict = Dict::new();
    assert!(dict.put("k", Value::Integer(1)).is_none());
    assert_eq!(dict.put("k", Value::Integer(2)), Some(Value::Integer(1)));
    assert!(dict.contains_key(b"k"));
    assert!(!dict.contains_key(b"K"));
    assert_eq!(dict.remove(b"k"), Some(Value::Integer(2)));
    assert!(dict.remove(b"k").is_none());
    assert!(dict.is_empty());
}

#[test]
fn test_dict_equality_ignores_insertion_order() {
    let a: Dict = [("x", Value::Integer(1)), ("y", Value::Integer(2))]
        .into_iter()
        .collect();
    let b: Dict = [("y", Value::Integer(2)), ("x", Value::Integer(1))]
        .into_iter()
        .collect();
    assert_eq!(a, b);

    let c: Dict = [("x", Value::Integer(1)), ("y", Value::Integer(3))]
        .into_iter()
        .collect();
    assert_ne!(a, c);
}

#[test]
fn test_clone_is_deep() {
    let mut dict = Dict::new();
    dict.put("list", hello_list(5, "Hello"));
    let original = Value::Dict(dict);

    let mut copy = original.clone();
    copy.as_dict_mut()
        .and_then(|d| d.get_mut(b"list"))
        .and_then(Value::as_list_mut)
        .unwrap()
        .push(Value::Integer(6));

    assert_eq!(original.get(b"list").unwrap().as_list().unwrap().len(), 2);
    assert_eq!(copy.get(b"list").unwrap().as_list().unwrap().len(), 3);
    assert_ne!(original, copy);
}

#[test]
fn test_list_shuffle_and_sample() {
    let items: List = (0..10).map(Value::Integer).collect();
    let mut rng = StdRng::seed_from_u64(7);

    let mut shuffled = items.clone();
    shuffled.shuffle_with(&mut rng);
    assert_eq!(shuffled.len(), items.len());
    assert!(items.iter().all(|v| shuffled.contains(v)));

    let sample = items.random_sample_with(&mut rng, 3);
    assert_eq!(sample.len(), 3);
    assert!(sample.iter().all(|v| items.contains(v)));
    let mut seen: Vec<i64> = sample.iter().filter_map(Value::as_integer).collect();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 3);

    assert_eq!(items.random_sample(50).len(), 10);
}

#[test]
fn test_value_accessors() {
    let value = Value::Integer(42);
    assert_eq!(value.as_integer(), Some(42));
    assert!(value.as_bytes().is_none());
    assert_eq!(value.kind(), ValueKind::Integer);

    let value = Value::Bytes(Bytes::from_static(b"test"));
    assert_eq!(value.as_str(), Some("test"));
    assert!(value.as_integer().is_none());

    let value = Value::from(Vec::<Value>::new());
    assert!(value.as_list().is_some());
    assert!(value.as_dict().is_none());

    let map: BTreeMap<Bytes, Value> = BTreeMap::new();
    let value = Value::from(map);
    assert_eq!(value.kind(), ValueKind::Dict);
    assert!(value.into_dict().is_some());
}

#[test]
fn test_display_is_canonical_text() {
    assert_eq!(hello_list(5, "Hello").to_string(), "li5e5:Helloe");
}

#[test]
fn test_sync_dict_concurrent_puts() {
    let dict = SyncDict::new();
    std::thread::scope(|s| {
        for t in 0..8 {
            let dict = &dict;
            s.spawn(move || {
                for i in 0..100 {
                    dict.put(format!("t{}-{:03}", t, i), Value::Integer(i));
                }
            });
        }
    });

    assert_eq!(dict.len(), 800);
    let keys = dict.keys();
    assert!(keys.windows(2).all(|w| w[0] < w[1]));

    let encoded = dict.encode().unwrap();
    assert_eq!(encoded.len(), dict.canonical_length());
    assert_eq!(decode(&encoded).unwrap(), Value::Dict(dict.snapshot()));
}

#[test]
fn test_sync_list_operations() {
    let list = SyncList::from(List::from(vec![Value::Integer(1)]));
    list.push(Value::Integer(2));
    list.insert(0, Value::Integer(0)).unwrap();
    assert_eq!(list.get(2).unwrap(), Value::Integer(2));
    assert!(matches!(
        list.get(3),
        Err(BencodeError::IndexOutOfRange { index: 3, len: 3 })
    ));
    assert_eq!(list.remove(0).unwrap(), Value::Integer(0));
    list.write(|l| l.push(Value::string("x")));
    assert_eq!(list.read(List::len), 3);
    assert_eq!(list.encode().unwrap(), b"li1ei2e1:xe");
}
