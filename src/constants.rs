//! Codec constants and tuning parameters.

// ============================================================================
// Decoder limits
// ============================================================================

/// Maximum nesting depth of lists and dictionaries accepted by the decoder.
///
/// Decoding recurses once per nesting level, so this bounds stack usage for
/// hostile input such as `llllllll...`.
pub const DEFAULT_MAX_DEPTH: usize = 64;

// ============================================================================
// Wire format delimiters
// ============================================================================

/// Lead byte of an integer production.
pub const INTEGER_START: u8 = b'i';

/// Lead byte of a list production.
pub const LIST_START: u8 = b'l';

/// Lead byte of a dictionary production.
pub const DICT_START: u8 = b'd';

/// Terminator shared by integers, lists and dictionaries.
pub const END: u8 = b'e';

/// Separator between a byte string's length field and its content.
pub const LENGTH_SEPARATOR: u8 = b':';
