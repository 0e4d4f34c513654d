//! Lock-guarded containers for value trees shared between threads.
//!
//! Each container owns one `RwLock`. Mutations take the write lock; reads,
//! encoding and length computation take the read lock and may run
//! concurrently with each other but never with a mutation. Nested values are
//! stored by value inside the guarded container, so a whole subtree is
//! covered by the lock of the node that owns it.

use bytes::Bytes;
use parking_lot::RwLock;

use super::dict::Dict;
use super::encode::{dict_to_vec, list_to_vec};
use super::error::BencodeError;
use super::list::List;
use super::value::Value;

/// A dictionary that can be shared and mutated across threads.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use rbencode::{SyncDict, Value};
///
/// let dict = Arc::new(SyncDict::new());
/// let handles: Vec<_> = (0..4)
///     .map(|i| {
///         let dict = Arc::clone(&dict);
///         std::thread::spawn(move || {
///             dict.put(format!("key{}", i), Value::Integer(i));
///         })
///     })
///     .collect();
/// for h in handles {
///     h.join().unwrap();
/// }
/// assert_eq!(dict.len(), 4);
/// ```
#[derive(Debug, Default)]
pub struct SyncDict {
    inner: RwLock<Dict>,
}

impl SyncDict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, key: impl Into<Bytes>, value: Value) -> Option<Value> {
        self.inner.write().put(key, value)
    }

    pub fn remove(&self, key: &[u8]) -> Option<Value> {
        self.inner.write().remove(key)
    }

    /// Returns a deep copy of the value stored under `key`.
    pub fn get(&self, key: &[u8]) -> Option<Value> {
        self.inner.read().get(key).cloned()
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.inner.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Keys in ascending byte order at the time of the call.
    pub fn keys(&self) -> Vec<Bytes> {
        self.inner.read().keys().cloned().collect()
    }

    pub fn canonical_length(&self) -> usize {
        self.inner.read().canonical_length()
    }

    pub fn encode(&self) -> Result<Vec<u8>, BencodeError> {
        dict_to_vec(&self.inner.read())
    }

    /// Deep copy of the current contents.
    pub fn snapshot(&self) -> Dict {
        self.inner.read().clone()
    }

    /// Runs `f` with shared access to the dictionary.
    pub fn read<R>(&self, f: impl FnOnce(&Dict) -> R) -> R {
        f(&self.inner.read())
    }

    /// Runs `f` with exclusive access to the dictionary.
    pub fn write<R>(&self, f: impl FnOnce(&mut Dict) -> R) -> R {
        f(&mut self.inner.write())
    }

    pub fn into_inner(self) -> Dict {
        self.inner.into_inner()
    }
}

impl From<Dict> for SyncDict {
    fn from(dict: Dict) -> Self {
        Self {
            inner: RwLock::new(dict),
        }
    }
}

/// A list that can be shared and mutated across threads.
#[derive(Debug, Default)]
pub struct SyncList {
    inner: RwLock<List>,
}

impl SyncList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, value: Value) {
        self.inner.write().push(value);
    }

    pub fn insert(&self, index: usize, value: Value) -> Result<(), BencodeError> {
        self.inner.write().insert(index, value)
    }

    pub fn set(&self, index: usize, value: Value) -> Result<Value, BencodeError> {
        self.inner.write().set(index, value)
    }

    pub fn remove(&self, index: usize) -> Result<Value, BencodeError> {
        self.inner.write().remove(index)
    }

    /// Returns a deep copy of the element at `index`.
    pub fn get(&self, index: usize) -> Result<Value, BencodeError> {
        self.inner.read().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn canonical_length(&self) -> usize {
        self.inner.read().canonical_length()
    }

    pub fn encode(&self) -> Result<Vec<u8>, BencodeError> {
        list_to_vec(&self.inner.read())
    }

    pub fn snapshot(&self) -> List {
        self.inner.read().clone()
    }

    pub fn read<R>(&self, f: impl FnOnce(&List) -> R) -> R {
        f(&self.inner.read())
    }

    pub fn write<R>(&self, f: impl FnOnce(&mut List) -> R) -> R {
        f(&mut self.inner.write())
    }

    pub fn into_inner(self) -> List {
        self.inner.into_inner()
    }
}

impl From<List> for SyncList {
    fn from(list: List) -> Self {
        Self {
            inner: RwLock::new(list),
        }
    }
}
