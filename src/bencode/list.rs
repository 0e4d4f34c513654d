use std::ops::Index;

use rand::seq::{IndexedRandom as _, SliceRandom as _};
use rand::Rng;

use super::error::BencodeError;
use super::value::Value;

/// An ordered bencode list.
///
/// Insertion order is encoding order. Index-taking operations are bounds
/// checked and report [`BencodeError::IndexOutOfRange`] instead of panicking;
/// `insert` accepts `index == len()` to append.
///
/// # Examples
///
/// ```
/// use rbencode::{List, Value};
///
/// let mut list = List::new();
/// list.push(Value::Integer(5));
/// list.insert(0, Value::string("first")).unwrap();
/// assert_eq!(list.len(), 2);
/// assert_eq!(list.get(1).unwrap(), &Value::Integer(5));
/// assert!(list.get(2).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct List {
    items: Vec<Value>,
}

impl List {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the element at `index`.
    pub fn get(&self, index: usize) -> Result<&Value, BencodeError> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(BencodeError::IndexOutOfRange { index, len })
    }

    /// Returns a mutable reference to the element at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Value, BencodeError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(BencodeError::IndexOutOfRange { index, len })
    }

    /// Replaces the element at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: Value) -> Result<Value, BencodeError> {
        let slot = self.get_mut(index)?;
        Ok(std::mem::replace(slot, value))
    }

    /// Inserts `value` before `index`, shifting later elements right.
    pub fn insert(&mut self, index: usize, value: Value) -> Result<(), BencodeError> {
        let len = self.items.len();
        if index > len {
            return Err(BencodeError::IndexOutOfRange { index, len });
        }
        self.items.insert(index, value);
        Ok(())
    }

    /// Removes and returns the element at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Value, BencodeError> {
        let len = self.items.len();
        if index >= len {
            return Err(BencodeError::IndexOutOfRange { index, len });
        }
        Ok(self.items.remove(index))
    }

    pub fn push(&mut self, value: Value) {
        self.items.push(value);
    }

    pub fn pop(&mut self) -> Option<Value> {
        self.items.pop()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.items.contains(value)
    }

    /// Returns the index of the first element equal to `value`.
    pub fn position(&self, value: &Value) -> Option<usize> {
        self.items.iter().position(|v| v == value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Value> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }

    /// `2` for the `l`/`e` delimiters plus the length of every element.
    pub fn canonical_length(&self) -> usize {
        2 + self.items.iter().map(Value::canonical_length).sum::<usize>()
    }

    /// Shuffles the elements in place using the thread-local RNG.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.items.shuffle(rng);
    }

    /// Returns up to `amount` distinct elements chosen at random.
    ///
    /// The returned list is a deep copy; the receiver is left untouched.
    pub fn random_sample(&self, amount: usize) -> List {
        self.random_sample_with(&mut rand::rng(), amount)
    }

    pub fn random_sample_with<R: Rng + ?Sized>(&self, rng: &mut R, amount: usize) -> List {
        self.items.choose_multiple(rng, amount).cloned().collect()
    }
}

impl Index<usize> for List {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.items[index]
    }
}

impl From<Vec<Value>> for List {
    fn from(items: Vec<Value>) -> Self {
        Self { items }
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl Extend<Value> for List {
    fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
