//! Decoding of whole containers.
//!
//! A container is laid out as follows, all integers are little-endian u32:
//!
//! ```text
//! [container_size][reserved][symbol_count N]
//! N times: [frequency][symbol: u8][3 bytes padding]
//! [packed_bits][packed_bytes][decoded_symbols]
//! [ceil(packed_bits / 8) bytes of huffman coded bits, MSB first]
//! ```
//!
//! Decoding goes through the sections in order: table header, frequency table,
//! tree construction, payload header and finally the walk over the payload bits.

use super::bit_reader::{BitReader, BitReaderError};
use super::frequency_table::{
    read_frequency_table, FrequencyTable, FrequencyTableError, TableHeader,
};
use super::huffman_tree::{HuffmanTree, Node, TreeError};
use super::layout::{LayoutError, HEADER};
use alloc::string::String;
use alloc::vec::Vec;

/// The three u32 fields that precede the packed bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PayloadHeader {
    /// Number of meaningful bits in the payload. Everything after is padding.
    pub packed_bits: u32,
    /// Number of payload bytes the encoder wrote. Informational.
    pub packed_bytes: u32,
    /// Number of symbols the encoder wrote. Informational.
    pub decoded_symbols: u32,
}

/// How much the informational header fields are trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    /// Only the fields needed for decoding are looked at.
    #[default]
    Lenient,
    /// The container size, packed byte count and symbol count must match what
    /// is actually found in the container.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecoderConfig {
    pub validation: Validation,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    #[error(transparent)]
    FrequencyTable(#[from] FrequencyTableError),
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error("Error while reading the payload header: {0}")]
    PayloadHeader(#[source] LayoutError),
    #[error(transparent)]
    BitReader(#[from] BitReaderError),
    #[error("Bitstream ended in the middle of a code. Position: {position}, bits in stream: {bit_count}")]
    TruncatedCodeword { position: usize, bit_count: usize },
    #[error("Bit {position} leads to a node that does not exist in the huffman tree")]
    InvalidCodePath { position: usize },
    #[error("Header says the container is {expected} bytes long but it is {got} bytes long")]
    ContainerSizeMismatch { expected: u32, got: usize },
    #[error("{packed_bits} packed bits need {need} bytes but the payload header says {got} bytes")]
    PackedByteCountMismatch {
        packed_bits: u32,
        need: usize,
        got: u32,
    },
    #[error("Payload header announces {expected} symbols but {got} symbols were decoded")]
    SymbolCountMismatch { expected: u32, got: usize },
}

/// Coarse classification of [`DecodeError`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Some section of the container is cut short.
    TruncatedInput,
    /// The bits do not describe a path through the tree, or the table can't
    /// describe a tree.
    InvalidTree,
    /// The frequency table has no symbols.
    EmptyInput,
    /// Informational header fields contradict the container (strict mode only).
    Inconsistent,
}

impl DecodeError {
    pub fn kind(&self) -> ErrorKind {
        use DecodeError as err;
        match self {
            err::FrequencyTable(FrequencyTableError::DuplicateSymbol { .. }) => {
                ErrorKind::InvalidTree
            }
            err::FrequencyTable(_)
            | err::PayloadHeader(_)
            | err::BitReader(_)
            | err::TruncatedCodeword { .. } => ErrorKind::TruncatedInput,
            err::Tree(TreeError::EmptyTable) => ErrorKind::EmptyInput,
            err::InvalidCodePath { .. } => ErrorKind::InvalidTree,
            err::ContainerSizeMismatch { .. }
            | err::PackedByteCountMismatch { .. }
            | err::SymbolCountMismatch { .. } => ErrorKind::Inconsistent,
        }
    }
}

/// Everything in a container except the decoded text.
#[derive(Debug, Clone)]
pub struct ParsedContainer<'s> {
    pub table_header: TableHeader,
    pub table: FrequencyTable,
    pub tree: HuffmanTree,
    pub payload_header: PayloadHeader,
    pub bits: BitReader<'s>,
}

impl ParsedContainer<'_> {
    /// Walks the tree once for every code in the payload and collects the symbols.
    pub fn decode_bytes(&self) -> Result<Vec<u8>, DecodeError> {
        use DecodeError as err;

        let bit_count = self.bits.len();
        let capacity = (self.payload_header.decoded_symbols as usize).min(bit_count);
        let mut output = Vec::with_capacity(capacity);

        let mut pos = 0;
        while pos < bit_count {
            let mut node = self.tree.node(self.tree.root());
            loop {
                if pos >= bit_count {
                    return Err(err::TruncatedCodeword {
                        position: pos,
                        bit_count,
                    });
                }
                let child = node
                    .child(self.bits.get(pos))
                    .ok_or(err::InvalidCodePath { position: pos })?;
                pos += 1;

                node = self.tree.node(child);
                if let Node::Leaf { symbol, .. } = node {
                    output.push(*symbol);
                    break;
                }
            }
        }

        Ok(output)
    }
}

/// Decodes containers according to a [`DecoderConfig`].
///
/// The decoder holds no state between calls; one instance can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Decoder {
        Decoder { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Reads all headers and the frequency table and builds the tree, without
    /// decoding the payload.
    pub fn parse<'s>(&self, source: &'s [u8]) -> Result<ParsedContainer<'s>, DecodeError> {
        use DecodeError as err;

        let (table_header, table, rest) = read_frequency_table(source)?;
        let tree = HuffmanTree::build(&table)?;

        let (values, payload) = HEADER.read(rest).map_err(err::PayloadHeader)?;
        let payload_header = PayloadHeader {
            packed_bits: values.u32(0).map_err(err::PayloadHeader)?,
            packed_bytes: values.u32(1).map_err(err::PayloadHeader)?,
            decoded_symbols: values.u32(2).map_err(err::PayloadHeader)?,
        };
        vprintln!(
            "Payload header: {} bits in {} bytes, {} symbols",
            payload_header.packed_bits,
            payload_header.packed_bytes,
            payload_header.decoded_symbols
        );

        if self.config.validation == Validation::Strict {
            if table_header.container_size as usize != source.len() {
                return Err(err::ContainerSizeMismatch {
                    expected: table_header.container_size,
                    got: source.len(),
                });
            }
            let need = (payload_header.packed_bits as usize).div_ceil(8);
            if payload_header.packed_bytes as usize != need {
                return Err(err::PackedByteCountMismatch {
                    packed_bits: payload_header.packed_bits,
                    need,
                    got: payload_header.packed_bytes,
                });
            }
        }

        let bits = BitReader::new(payload, payload_header.packed_bits as usize)?;

        Ok(ParsedContainer {
            table_header,
            table,
            tree,
            payload_header,
            bits,
        })
    }

    pub fn decode_bytes(&self, source: &[u8]) -> Result<Vec<u8>, DecodeError> {
        let container = self.parse(source)?;
        let output = container.decode_bytes()?;

        if self.config.validation == Validation::Strict
            && container.payload_header.decoded_symbols as usize != output.len()
        {
            return Err(DecodeError::SymbolCountMismatch {
                expected: container.payload_header.decoded_symbols,
                got: output.len(),
            });
        }

        vprintln!("Decoded {} symbols", output.len());
        Ok(output)
    }

    /// Decodes the container into text. Every decoded byte becomes the character
    /// with the same code point.
    pub fn decode(&self, source: &[u8]) -> Result<String, DecodeError> {
        let output = self.decode_bytes(source)?;
        Ok(output.into_iter().map(char::from).collect())
    }
}

/// Decodes a container into text with the default configuration.
pub fn decode(source: &[u8]) -> Result<String, DecodeError> {
    Decoder::default().decode(source)
}

/// Decodes a container into raw bytes with the default configuration.
pub fn decode_bytes(source: &[u8]) -> Result<Vec<u8>, DecodeError> {
    Decoder::default().decode_bytes(source)
}
