//! International Morse Code lookup table

use crate::types::EncodedSymbol;

/// Number of entries in a code table: digits 0-9 then letters A-Z
pub const TABLE_SIZE: usize = 36;

const LETTER_OFFSET: usize = 10;

/// Fixed lookup from digits and letters to their packed sequences.
///
/// Index 0-9 holds '0'-'9', index 10-35 holds 'A'-'Z'. Space and anything
/// else has no entry; the writer handles those itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CodeTable([EncodedSymbol; TABLE_SIZE]);

impl CodeTable {
    /// Build a table from 36 packed entries
    pub const fn new(entries: [EncodedSymbol; TABLE_SIZE]) -> Self {
        Self(entries)
    }

    /// Table index for a character.
    ///
    /// Digits map directly, letters are matched case-insensitively.
    pub const fn index_of(c: char) -> Option<usize> {
        if c.is_ascii_digit() {
            return Some(c as usize - '0' as usize);
        }

        let upper = c.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            Some(LETTER_OFFSET + (upper as usize - 'A' as usize))
        } else {
            None
        }
    }

    /// Returns true if the table has an entry for this character
    pub const fn supports(c: char) -> bool {
        Self::index_of(c).is_some()
    }

    /// Packed sequence for a character, if it has one
    pub fn lookup(&self, c: char) -> Option<EncodedSymbol> {
        Self::index_of(c).map(|index| self.0[index])
    }

    /// Entry by raw index
    pub fn get(&self, index: usize) -> Option<EncodedSymbol> {
        self.0.get(index).copied()
    }

    /// All entries in index order
    pub fn entries(&self) -> &[EncodedSymbol; TABLE_SIZE] {
        &self.0
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        ITU
    }
}

/// Standard ITU table
pub static ITU: CodeTable = CodeTable::new([
    EncodedSymbol::from_code("-----"), // 0
    EncodedSymbol::from_code(".----"), // 1
    EncodedSymbol::from_code("..---"), // 2
    EncodedSymbol::from_code("...--"), // 3
    EncodedSymbol::from_code("....-"), // 4
    EncodedSymbol::from_code("....."), // 5
    EncodedSymbol::from_code("-...."), // 6
    EncodedSymbol::from_code("--..."), // 7
    EncodedSymbol::from_code("---.."), // 8
    EncodedSymbol::from_code("----."), // 9
    EncodedSymbol::from_code(".-"),    // A
    EncodedSymbol::from_code("-..."),  // B
    EncodedSymbol::from_code("-.-."),  // C
    EncodedSymbol::from_code("-.."),   // D
    EncodedSymbol::from_code("."),     // E
    EncodedSymbol::from_code("..-."),  // F
    EncodedSymbol::from_code("--."),   // G
    EncodedSymbol::from_code("...."),  // H
    EncodedSymbol::from_code(".."),    // I
    EncodedSymbol::from_code(".---"),  // J
    EncodedSymbol::from_code("-.-"),   // K
    EncodedSymbol::from_code(".-.."),  // L
    EncodedSymbol::from_code("--"),    // M
    EncodedSymbol::from_code("-."),    // N
    EncodedSymbol::from_code("---"),   // O
    EncodedSymbol::from_code(".--."),  // P
    EncodedSymbol::from_code("--.-"),  // Q
    EncodedSymbol::from_code(".-."),   // R
    EncodedSymbol::from_code("..."),   // S
    EncodedSymbol::from_code("-"),     // T
    EncodedSymbol::from_code("..-"),   // U
    EncodedSymbol::from_code("...-"),  // V
    EncodedSymbol::from_code(".--"),   // W
    EncodedSymbol::from_code("-..-"),  // X
    EncodedSymbol::from_code("-.--"),  // Y
    EncodedSymbol::from_code("--.."),  // Z
]);
