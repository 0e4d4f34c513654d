//! Byte scanning and ordering primitives shared by the decoder and the
//! value model.

use std::cmp::Ordering;

/// Returns true for the ASCII digits `0` through `9`.
#[inline]
pub fn is_digit(byte: u8) -> bool {
    byte.is_ascii_digit()
}

/// Returns the index of the first byte at or after `from` that satisfies
/// `pred`, or `None` if the rest of the buffer has no such byte.
pub fn find_first_of<F>(data: &[u8], from: usize, pred: F) -> Option<usize>
where
    F: Fn(u8) -> bool,
{
    data.get(from..)?
        .iter()
        .position(|&b| pred(b))
        .map(|i| from + i)
}

/// Returns the index of the first occurrence of `needle` at or after `from`.
pub fn find_byte(data: &[u8], from: usize, needle: u8) -> Option<usize> {
    find_first_of(data, from, |b| b == needle)
}

/// Number of bytes in the decimal representation of `n`, sign included.
pub fn decimal_len(n: i64) -> usize {
    let sign = usize::from(n < 0);
    let mut magnitude = n.unsigned_abs();
    let mut digits = 1;
    while magnitude >= 10 {
        magnitude /= 10;
        digits += 1;
    }
    sign + digits
}

/// Byte-wise lexicographic ordering of dictionary keys.
///
/// A shorter key sorts before any longer key it is a prefix of, so
/// `"ABC100" < "ABC90"` and `"100" < "90"`.
pub fn compare_keys(a: &[u8], b: &[u8]) -> Ordering {
    a.cmp(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_first_of() {
        let data = b"123:abc";
        assert_eq!(find_first_of(data, 0, |b| !is_digit(b)), Some(3));
        assert_eq!(find_first_of(data, 4, is_digit), None);
        assert_eq!(find_first_of(data, 100, is_digit), None);
    }

    #[test]
    fn test_find_byte() {
        assert_eq!(find_byte(b"i42e", 0, b'e'), Some(3));
        assert_eq!(find_byte(b"i42e", 4, b'e'), None);
        assert_eq!(find_byte(b"i42", 0, b'e'), None);
    }

    #[test]
    fn test_decimal_len() {
        assert_eq!(decimal_len(0), 1);
        assert_eq!(decimal_len(9), 1);
        assert_eq!(decimal_len(10), 2);
        assert_eq!(decimal_len(-1), 2);
        assert_eq!(decimal_len(50_000_000), 8);
        assert_eq!(decimal_len(i64::MAX), 19);
        assert_eq!(decimal_len(i64::MIN), 20);
    }

    #[test]
    fn test_compare_keys() {
        assert_eq!(compare_keys(b"100", b"90"), Ordering::Less);
        assert_eq!(compare_keys(b"ABC100", b"ABC90"), Ordering::Less);
        assert_eq!(compare_keys(b"Z", b"a"), Ordering::Less);
        assert_eq!(compare_keys(b"foo", b"fo"), Ordering::Greater);
        assert_eq!(compare_keys(b"bar", b"bar"), Ordering::Equal);
    }
}
