use super::layout::{LayoutError, FREQUENCY, HEADER, SYMBOL_RECORD};
use alloc::vec::Vec;

/// Size of one `[u32 frequency][u8 symbol][3 bytes padding]` record.
const RECORD_SIZE: usize = 8;

/// The three u32 fields at the very start of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableHeader {
    /// Size of the whole container in bytes, as written by the encoder.
    /// Informational, only checked in strict mode.
    pub container_size: u32,
    /// Always zero in known containers. Never interpreted.
    pub reserved: u32,
    pub symbol_count: u32,
}

/// Symbols and their frequencies in the order they appear in the container.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrequencyTable {
    entries: Vec<(u8, u64)>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum FrequencyTableError {
    #[error("Error while reading the frequency table header: {0}")]
    Header(#[source] LayoutError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("Header announces {expected_entries} symbols, which need {need} bytes, but only {got} bytes are left")]
    TruncatedTable {
        expected_entries: u32,
        need: usize,
        got: usize,
    },
    #[error("Symbol 0x{symbol:02X} appears a second time at table index {index}")]
    DuplicateSymbol { symbol: u8, index: usize },
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a symbol at the end of the table. Returns false and leaves the table
    /// untouched if the symbol is already present.
    pub fn insert(&mut self, symbol: u8, frequency: u64) -> bool {
        if self.frequency(symbol).is_some() {
            return false;
        }
        self.entries.push((symbol, frequency));
        true
    }

    pub fn frequency(&self, symbol: u8) -> Option<u64> {
        self.entries
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, f)| *f)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all frequencies.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, f)| f).sum()
    }

    /// Iterate over `(symbol, frequency)` in table order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.entries.iter().copied()
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    /// A symbol keeps the position of its first occurrence and the frequency of
    /// its last one.
    fn from_iter<T: IntoIterator<Item = (u8, u64)>>(iter: T) -> Self {
        let mut table = FrequencyTable::new();
        for (symbol, frequency) in iter {
            match table.entries.iter_mut().find(|(s, _)| *s == symbol) {
                Some((_, f)) => *f = frequency,
                None => table.entries.push((symbol, frequency)),
            }
        }
        table
    }
}

/// Parses the table header and the frequency table from the front of `source`.
///
/// Returns the header, the table and the bytes following the last table record.
pub fn read_frequency_table(
    source: &[u8],
) -> Result<(TableHeader, FrequencyTable, &[u8]), FrequencyTableError> {
    use FrequencyTableError as err;

    let (values, mut rest) = HEADER.read(source).map_err(err::Header)?;
    let header = TableHeader {
        container_size: values.u32(0).map_err(err::Header)?,
        reserved: values.u32(1).map_err(err::Header)?,
        symbol_count: values.u32(2).map_err(err::Header)?,
    };

    // check before allocating so a bogus count can't make us reserve gigabytes
    let need = (header.symbol_count as usize).saturating_mul(RECORD_SIZE);
    if rest.len() < need {
        return Err(err::TruncatedTable {
            expected_entries: header.symbol_count,
            need,
            got: rest.len(),
        });
    }

    let mut table = FrequencyTable {
        entries: Vec::with_capacity((header.symbol_count as usize).min(256)),
    };
    for index in 0..header.symbol_count as usize {
        let (values, tail) = FREQUENCY.read(rest)?;
        let frequency = values.int(0)?;
        let (values, tail) = SYMBOL_RECORD.read(tail)?;
        let symbol = values.char(0)?;
        rest = tail;

        if !table.insert(symbol, frequency) {
            return Err(err::DuplicateSymbol { symbol, index });
        }
    }

    vprintln!(
        "Read frequency table with {} symbols, total frequency {}",
        table.len(),
        table.total()
    );

    Ok((header, table, rest))
}
