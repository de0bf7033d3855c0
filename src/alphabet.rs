//! Alphabet codec for the 27-symbol cipher alphabet
//!
//! Symbol 0 is the space character, symbols 1-26 are `a`-`z`. The lookup
//! tables are built at compile time and never mutated.

use thiserror::Error;

/// A single alphabet symbol in `[0, 26]`
pub type Symbol = u8;

/// Number of symbols in the alphabet (space + a-z)
pub const ALPHABET_SIZE: usize = 27;

/// Symbol -> character table
const SYMBOL_TO_CHAR: [char; ALPHABET_SIZE] = [
    ' ', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q',
    'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Sentinel for bytes outside the alphabet
const INVALID: u8 = u8::MAX;

/// ASCII byte -> symbol table
const CHAR_TO_SYMBOL: [u8; 128] = build_char_table();

const fn build_char_table() -> [u8; 128] {
    let mut table = [INVALID; 128];
    table[b' ' as usize] = 0;
    let mut c = b'a';
    while c <= b'z' {
        table[c as usize] = c - b'a' + 1;
        c += 1;
    }
    table
}

/// Errors raised by the codec
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlphabetError {
    #[error("Invalid character {character:?} at position {position}: only space and a-z are allowed")]
    InvalidCharacter { character: char, position: usize },

    #[error("Invalid symbol {symbol} at position {position}: symbols must be in [0, 26]")]
    InvalidSymbol { symbol: u8, position: usize },
}

/// Map a single character to its symbol
pub fn char_to_symbol(c: char) -> Option<Symbol> {
    if c.is_ascii() {
        let symbol = CHAR_TO_SYMBOL[c as usize];
        (symbol != INVALID).then_some(symbol)
    } else {
        None
    }
}

/// Map a single symbol to its character
pub fn symbol_to_char(symbol: Symbol) -> Option<char> {
    SYMBOL_TO_CHAR.get(symbol as usize).copied()
}

/// Encode text into a symbol stream
///
/// Fails on the first character outside `{space, a-z}`.
///
/// # Example
/// ```
/// use cribador::alphabet::encode;
///
/// assert_eq!(encode("ab z").unwrap(), vec![1, 2, 0, 26]);
/// assert!(encode("Abc").is_err());
/// ```
pub fn encode(text: &str) -> Result<Vec<Symbol>, AlphabetError> {
    text.chars()
        .enumerate()
        .map(|(position, character)| {
            char_to_symbol(character).ok_or(AlphabetError::InvalidCharacter {
                character,
                position,
            })
        })
        .collect()
}

/// Decode a symbol stream back into text
pub fn decode(symbols: &[Symbol]) -> Result<String, AlphabetError> {
    symbols
        .iter()
        .enumerate()
        .map(|(position, &symbol)| {
            symbol_to_char(symbol).ok_or(AlphabetError::InvalidSymbol { symbol, position })
        })
        .collect()
}
