//! Blocking pulse writer that keys Morse code onto an output line

use crate::hal::{Delay, KeyOutput};
use crate::table::{CodeTable, ITU};
use crate::types::{EncodedSymbol, MorseConfig, Symbol};

/// "S" as a packed literal: three dots
const SOS_S: EncodedSymbol = EncodedSymbol::from_bits(0b0000_0011);
/// "O" as a packed literal: three dashes
const SOS_O: EncodedSymbol = EncodedSymbol::from_bits(0b0011_1011);

/// Keys characters, strings and packed symbols onto an output.
///
/// Every call blocks in the delay capability until its timing is complete.
/// Each element ends with a one unit key-up gap, so letter and word gaps
/// only add the remaining 3 and 7 units on top of it. The writer keeps no
/// state between calls.
pub struct MorseWriter<'t, O, D> {
    output: O,
    delay: D,
    config: MorseConfig,
    table: &'t CodeTable,
}

impl<O, D> MorseWriter<'static, O, D>
where
    O: KeyOutput,
    D: Delay,
{
    /// Create a writer using the standard ITU table
    pub fn new(output: O, delay: D, config: MorseConfig) -> Self {
        Self::with_table(output, delay, config, &ITU)
    }
}

#[cfg(feature = "embassy-time")]
impl<O> MorseWriter<'static, O, crate::hal::EmbassyDelay>
where
    O: KeyOutput,
{
    /// Create a writer on the ITU table that blocks on the embassy time driver
    pub fn with_default_delay(output: O, config: MorseConfig) -> Self {
        Self::new(output, crate::hal::EmbassyDelay, config)
    }
}

impl<'t, O, D> MorseWriter<'t, O, D>
where
    O: KeyOutput,
    D: Delay,
{
    /// Create a writer with a substitute code table
    pub fn with_table(output: O, delay: D, config: MorseConfig, table: &'t CodeTable) -> Self {
        #[cfg(feature = "defmt")]
        defmt::debug!("Morse writer: {} ms dot, {} WPM", config.dot_duration_ms, config.wpm());

        Self {
            output,
            delay,
            config,
            table,
        }
    }

    /// Key a single character followed by its gap.
    ///
    /// Digits and letters (either case) are looked up in the table. A space
    /// is followed by a word gap. Anything else keys nothing but is still
    /// followed by a letter gap.
    pub fn write_character(&mut self, c: char) -> Result<(), O::Error> {
        if let Some(encoded) = self.table.lookup(c) {
            self.write_encoded(encoded)?;
        } else if c != ' ' {
            #[cfg(feature = "defmt")]
            defmt::trace!("No code for {}", c);
        }

        if c == ' ' {
            self.write_word_gap()
        } else {
            self.write_letter_gap()
        }
    }

    /// Key every character of `text` in order, including the final gap
    pub fn write_string(&mut self, text: &str) -> Result<(), O::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Sending {=str}", text);

        for c in text.chars() {
            self.write_character(c)?;
        }
        Ok(())
    }

    /// Key the elements of a packed symbol, lowest pattern bit first
    pub fn write_encoded(&mut self, encoded: EncodedSymbol) -> Result<(), O::Error> {
        for symbol in encoded.symbols() {
            self.write_symbol(symbol)?;
        }
        Ok(())
    }

    /// Key one element and its trailing one unit gap
    pub fn write_symbol(&mut self, symbol: Symbol) -> Result<(), O::Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("Element {}", symbol);

        self.output.key_down()?;
        self.delay.delay_ms(self.config.units(symbol.on_units()));
        self.output.key_up()?;
        self.delay.delay_ms(self.config.dot_duration_ms);
        Ok(())
    }

    /// On for one unit, off for one unit
    pub fn write_dot(&mut self) -> Result<(), O::Error> {
        self.write_symbol(Symbol::Dot)
    }

    /// On for three units, off for one unit
    pub fn write_dash(&mut self) -> Result<(), O::Error> {
        self.write_symbol(Symbol::Dash)
    }

    /// Off for three units
    pub fn write_letter_gap(&mut self) -> Result<(), O::Error> {
        self.output.key_up()?;
        self.delay.delay_ms(self.config.letter_gap_duration());
        Ok(())
    }

    /// Off for seven units
    pub fn write_word_gap(&mut self) -> Result<(), O::Error> {
        self.output.key_up()?;
        self.delay.delay_ms(self.config.word_gap_duration());
        Ok(())
    }

    /// Key "SOS" and a word gap without touching the table
    pub fn write_sos(&mut self) -> Result<(), O::Error> {
        self.write_encoded(SOS_S)?;
        self.write_encoded(SOS_O)?;
        self.write_encoded(SOS_S)?;
        self.write_word_gap()
    }

    /// Get current configuration
    pub fn config(&self) -> &MorseConfig {
        &self.config
    }

    /// Table used for character lookups
    pub fn table(&self) -> &'t CodeTable {
        self.table
    }

    /// Take back the output and delay capabilities
    pub fn release(self) -> (O, D) {
        (self.output, self.delay)
    }

    /// Time units `write_character(c)` will take
    pub fn units_for_character(&self, c: char) -> u32 {
        let keyed = self
            .table
            .lookup(c)
            .map(units_for_encoded)
            .unwrap_or(0);

        let gap = if c == ' ' {
            MorseConfig::WORD_GAP_UNITS
        } else {
            MorseConfig::LETTER_GAP_UNITS
        };

        keyed.saturating_add(gap)
    }

    /// Time units `write_string(text)` will take
    pub fn units_for_string(&self, text: &str) -> u32 {
        saturating_total(text.chars().map(|c| self.units_for_character(c)))
    }
}

fn saturating_total<I: IntoIterator<Item = u32>>(units: I) -> u32 {
    units.into_iter().fold(0, u32::saturating_add)
}

/// Time units taken by the elements of a packed symbol, trailing gaps included
pub fn units_for_encoded(encoded: EncodedSymbol) -> u32 {
    saturating_total(encoded.symbols().map(|symbol| symbol.on_units() + 1))
}
