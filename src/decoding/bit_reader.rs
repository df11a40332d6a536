/// Random access to the bits of a byte slice, most significant bit of each byte
/// first, limited to a declared number of bits. Bits past that limit are padding
/// and can't be read.
#[derive(Debug, Clone, Copy)]
pub struct BitReader<'s> {
    source: &'s [u8],
    num_bits: usize,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum BitReaderError {
    #[error("Bitstream should hold {requested} bits but the source only has {available} bits")]
    NotEnoughBits { requested: usize, available: usize },
}

impl<'s> BitReader<'s> {
    pub fn new(source: &'s [u8], num_bits: usize) -> Result<BitReader<'s>, BitReaderError> {
        let available = source.len().saturating_mul(8);
        if num_bits > available {
            return Err(BitReaderError::NotEnoughBits {
                requested: num_bits,
                available,
            });
        }
        Ok(BitReader { source, num_bits })
    }

    /// Number of readable bits.
    pub fn len(&self) -> usize {
        self.num_bits
    }

    pub fn is_empty(&self) -> bool {
        self.num_bits == 0
    }

    /// Returns bit `idx`, counting from the most significant bit of the first byte.
    ///
    /// `idx` must be lower than [`BitReader::len`].
    pub fn get(&self, idx: usize) -> bool {
        debug_assert!(
            idx < self.num_bits,
            "bit {} read from a stream of {} bits",
            idx,
            self.num_bits
        );
        let byte = self.source[idx / 8];
        (byte >> (7 - (idx % 8))) & 1 == 1
    }

    /// Iterate over all readable bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.num_bits).map(move |idx| self.get(idx))
    }
}
