use std::collections::btree_map::{self, BTreeMap};

use bytes::Bytes;

use super::value::{byte_string_length, Value};

/// A bencode dictionary.
///
/// Keys are byte strings held in a `BTreeMap`, so iteration, encoding and
/// every other read observe ascending byte-wise key order no matter in which
/// order entries were inserted. Putting an existing key replaces its value.
///
/// # Examples
///
/// ```
/// use rbencode::{Dict, Value};
///
/// let mut dict = Dict::new();
/// dict.put("foo", Value::Integer(1));
/// dict.put("bar", Value::Integer(2));
///
/// let keys: Vec<&[u8]> = dict.keys().map(|k| &k[..]).collect();
/// assert_eq!(keys, vec![b"bar".as_slice(), b"foo".as_slice()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dict {
    entries: BTreeMap<Bytes, Value>,
}

impl Dict {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts `value` under `key`, returning the value it replaced.
    pub fn put(&mut self, key: impl Into<Bytes>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &[u8]) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Keys in ascending byte order.
    pub fn keys(&self) -> btree_map::Keys<'_, Bytes, Value> {
        self.entries.keys()
    }

    pub fn values(&self) -> btree_map::Values<'_, Bytes, Value> {
        self.entries.values()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Bytes, Value> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> btree_map::IterMut<'_, Bytes, Value> {
        self.entries.iter_mut()
    }

    /// The smallest key, if any.
    pub fn first_key(&self) -> Option<&Bytes> {
        self.entries.keys().next()
    }

    /// The largest key, if any.
    pub fn last_key(&self) -> Option<&Bytes> {
        self.entries.keys().next_back()
    }

    /// `2` for the `d`/`e` delimiters plus, per entry, the key encoded as a
    /// byte string and the encoded value.
    pub fn canonical_length(&self) -> usize {
        2 + self
            .entries
            .iter()
            .map(|(k, v)| byte_string_length(k.len()) + v.canonical_length())
            .sum::<usize>()
    }

    pub fn into_inner(self) -> BTreeMap<Bytes, Value> {
        self.entries
    }
}

impl From<BTreeMap<Bytes, Value>> for Dict {
    fn from(entries: BTreeMap<Bytes, Value>) -> Self {
        Self { entries }
    }
}

impl<K: Into<Bytes>> FromIterator<(K, Value)> for Dict {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut dict = Dict::new();
        dict.extend(iter);
        dict
    }
}

impl<K: Into<Bytes>> Extend<(K, Value)> for Dict {
    fn extend<I: IntoIterator<Item = (K, Value)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl IntoIterator for Dict {
    type Item = (Bytes, Value);
    type IntoIter = btree_map::IntoIter<Bytes, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dict {
    type Item = (&'a Bytes, &'a Value);
    type IntoIter = btree_map::Iter<'a, Bytes, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
