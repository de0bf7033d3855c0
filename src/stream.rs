//! Symbol stream operations
//!
//! Modular differencing plus the position-removal helpers used to build
//! decoy-removal hypotheses. Streams are plain slices; removal always copies.

use crate::alphabet::Symbol;
use crate::kernel;

/// Modular elementwise difference `(s1[i] - s2[i]) mod 27`
///
/// Both inputs are truncated to the shorter length, never padded.
///
/// # Example
/// ```
/// use cribador::stream::diff;
///
/// assert_eq!(diff(&[1, 0, 26, 9], &[3, 0, 1]), vec![25, 0, 25]);
/// ```
pub fn diff(s1: &[Symbol], s2: &[Symbol]) -> Vec<Symbol> {
    kernel::mod_sub(s1, s2)
}

/// Add `c` modulo 27 to every symbol
pub fn shift(stream: &[Symbol], c: Symbol) -> Vec<Symbol> {
    kernel::mod_add_scalar(stream, c)
}

/// Copy of `stream` without the symbol at `index`
///
/// An out-of-range index leaves the stream unchanged.
pub fn remove_at(stream: &[Symbol], index: usize) -> Vec<Symbol> {
    let mut out = Vec::with_capacity(stream.len().saturating_sub(1));
    out.extend_from_slice(&stream[..index.min(stream.len())]);
    if index < stream.len() {
        out.extend_from_slice(&stream[index + 1..]);
    }
    out
}

/// Remove a strictly increasing set of absolute positions, keeping at most
/// `keep` symbols of the result
///
/// Indices refer to the original stream, not to the progressively shortened
/// one: removing `[2, 9]` drops the symbols originally at positions 2 and 9.
pub fn remove_positions(stream: &[Symbol], indices: &[usize], keep: usize) -> Vec<Symbol> {
    debug_assert!(indices.windows(2).all(|w| w[0] < w[1]));

    let mut out = Vec::with_capacity(keep);
    let mut next = indices.iter().peekable();
    for (i, &s) in stream.iter().enumerate() {
        if out.len() == keep {
            break;
        }
        if next.peek() == Some(&&i) {
            next.next();
            continue;
        }
        out.push(s);
    }
    out
}
