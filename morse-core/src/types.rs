//! Core data types for the Morse writer

use core::fmt;

/// Longest dot/dash sequence a packed symbol can hold
pub const MAX_LENGTH: u8 = 5;

const LENGTH_MASK: u8 = 0b0000_0111;
const PATTERN_SHIFT: u8 = 3;

/// Morse code elements
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Symbol {
    /// Dot (short element)
    Dot,
    /// Dash (long element)
    Dash,
}

impl Symbol {
    /// Returns the keyed duration of this element in units
    pub const fn on_units(&self) -> u32 {
        match self {
            Symbol::Dot => 1,
            Symbol::Dash => 3,
        }
    }

    /// Returns the pattern bit value for this element (dash = 1)
    pub const fn bit(&self) -> u8 {
        match self {
            Symbol::Dot => 0,
            Symbol::Dash => 1,
        }
    }

    /// Character used in textual patterns
    pub const fn as_char(&self) -> char {
        match self {
            Symbol::Dot => '.',
            Symbol::Dash => '-',
        }
    }
}

/// Errors for symbol construction and configuration
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MorseError {
    /// Sequence longer than five elements
    InvalidLength,
    /// Pattern has bits set above its length
    PatternOverflow,
    /// Textual pattern contains something other than '.' or '-'
    InvalidSymbol,
    /// Dot duration of zero or WPM out of range
    InvalidSpeed,
}

#[cfg(feature = "std")]
impl core::fmt::Display for MorseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MorseError::InvalidLength => write!(f, "Morse sequence longer than {} elements", MAX_LENGTH),
            MorseError::PatternOverflow => write!(f, "Pattern bits set beyond sequence length"),
            MorseError::InvalidSymbol => write!(f, "Pattern may only contain '.' and '-'"),
            MorseError::InvalidSpeed => write!(f, "Dot duration must be non-zero and WPM between 1 and 100"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MorseError {}

/// One character's dot/dash sequence packed into a byte.
///
/// Bits 2..0 hold the number of elements, bits 7..3 hold the elements
/// themselves with 1 = dash and 0 = dot. The first element sent is bit 3.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncodedSymbol(u8);

impl EncodedSymbol {
    /// Zero-length encoding, sends nothing
    pub const EMPTY: EncodedSymbol = EncodedSymbol(0);

    /// Pack a length and pattern, panicking on invalid input.
    ///
    /// Meant for table literals, where the panic surfaces at compile time.
    pub const fn pack(length: u8, pattern: u8) -> Self {
        assert!(length <= MAX_LENGTH, "Morse sequence longer than five elements");
        assert!(pattern >> length == 0, "Pattern bits set beyond sequence length");
        Self(length | (pattern << PATTERN_SHIFT))
    }

    /// Pack a textual pattern such as `"-.-"` in a const context.
    ///
    /// Panics (at compile time for table literals) on anything [`parse`](Self::parse) rejects.
    pub const fn from_code(code: &str) -> Self {
        let bytes = code.as_bytes();
        assert!(bytes.len() <= MAX_LENGTH as usize, "Morse sequence longer than five elements");

        let mut pattern = 0u8;
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'.' => {}
                b'-' => pattern |= 1 << i,
                _ => panic!("Pattern may only contain '.' and '-'"),
            }
            i += 1;
        }

        Self::pack(bytes.len() as u8, pattern)
    }

    /// Pack a length and pattern with validation
    pub fn new(length: u8, pattern: u8) -> Result<Self, MorseError> {
        if length > MAX_LENGTH {
            return Err(MorseError::InvalidLength);
        }
        if pattern >> length != 0 {
            return Err(MorseError::PatternOverflow);
        }
        Ok(Self(length | (pattern << PATTERN_SHIFT)))
    }

    /// Wrap a raw packed byte without validation
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw packed byte
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Number of elements in the sequence
    pub const fn length(&self) -> u8 {
        self.0 & LENGTH_MASK
    }

    /// Element bits, masked to the meaningful low `length` bits
    pub const fn pattern(&self) -> u8 {
        let raw = self.0 >> PATTERN_SHIFT;
        let length = self.length();
        if length >= MAX_LENGTH {
            raw
        } else {
            raw & ((1 << length) - 1)
        }
    }

    /// Elements in transmission order
    pub const fn symbols(&self) -> Symbols {
        Symbols {
            remaining: self.length(),
            pattern: self.0 >> PATTERN_SHIFT,
        }
    }

    /// Encode a textual pattern such as `".-"`
    pub fn parse(text: &str) -> Result<Self, MorseError> {
        if text.len() > MAX_LENGTH as usize {
            return Err(MorseError::InvalidLength);
        }

        let mut pattern = 0u8;
        for (i, c) in text.bytes().enumerate() {
            match c {
                b'.' => {}
                b'-' => pattern |= 1 << i,
                _ => return Err(MorseError::InvalidSymbol),
            }
        }

        Self::new(text.len() as u8, pattern)
    }
}

impl From<u8> for EncodedSymbol {
    fn from(bits: u8) -> Self {
        Self::from_bits(bits)
    }
}

impl From<EncodedSymbol> for u8 {
    fn from(symbol: EncodedSymbol) -> Self {
        symbol.bits()
    }
}

impl fmt::Display for EncodedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.symbols() {
            write!(f, "{}", symbol.as_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for EncodedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncodedSymbol({:#010b} \"{}\")", self.0, self)
    }
}

/// Iterator over the elements of an [`EncodedSymbol`], lowest bit first
#[derive(Clone, Debug)]
pub struct Symbols {
    remaining: u8,
    pattern: u8,
}

impl Iterator for Symbols {
    type Item = Symbol;

    fn next(&mut self) -> Option<Symbol> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let symbol = if self.pattern & 0x1 != 0 {
            Symbol::Dash
        } else {
            Symbol::Dot
        };
        self.pattern >>= 1;
        Some(symbol)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Symbols {}

/// Writer timing configuration
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MorseConfig {
    /// Basic timing unit (dot duration) in milliseconds
    pub dot_duration_ms: u32,
}

impl Default for MorseConfig {
    fn default() -> Self {
        Self {
            dot_duration_ms: 250, // ~5 WPM beacon pace
        }
    }
}

impl MorseConfig {
    /// Dash length in units
    pub const DASH_UNITS: u32 = 3;
    /// Gap added after a character, on top of the trailing element gap
    pub const LETTER_GAP_UNITS: u32 = 3;
    /// Gap added after a space, on top of the trailing element gap
    pub const WORD_GAP_UNITS: u32 = 7;

    /// Create a new configuration with validation
    pub fn new(dot_duration_ms: u32) -> Result<Self, MorseError> {
        if dot_duration_ms == 0 {
            return Err(MorseError::InvalidSpeed);
        }
        Ok(Self { dot_duration_ms })
    }

    /// Configuration for a speed in words per minute
    pub fn from_wpm(wpm: u32) -> Result<Self, MorseError> {
        if wpm == 0 || wpm > 100 {
            return Err(MorseError::InvalidSpeed);
        }

        // PARIS standard: 50 units per word
        Ok(Self {
            dot_duration_ms: 1200 / wpm,
        })
    }

    /// Get Words Per Minute from current unit timing
    pub fn wpm(&self) -> u32 {
        (1200 / self.dot_duration_ms.max(1)).max(1)
    }

    /// Dot on-time in milliseconds
    pub fn dot_duration(&self) -> u32 {
        self.dot_duration_ms
    }

    /// Dash on-time in milliseconds
    pub fn dash_duration(&self) -> u32 {
        self.units(Self::DASH_UNITS)
    }

    /// Letter gap hold in milliseconds
    pub fn letter_gap_duration(&self) -> u32 {
        self.units(Self::LETTER_GAP_UNITS)
    }

    /// Word gap hold in milliseconds
    pub fn word_gap_duration(&self) -> u32 {
        self.units(Self::WORD_GAP_UNITS)
    }

    /// Convert a count of time units to milliseconds
    pub fn units(&self, count: u32) -> u32 {
        self.dot_duration_ms.saturating_mul(count)
    }
}
