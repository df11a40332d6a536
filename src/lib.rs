//! A decoder for a small Huffman container format.
//!
//! A container starts with a frequency table, followed by a header describing the
//! packed payload and the payload itself. The decoder rebuilds the Huffman tree from
//! the table and walks it bit by bit to recover the original text.
//!
//! ```
//! let container = hex_fixture();
//! let text = huffdec::decode(&container).unwrap();
//! assert_eq!(text, "53801-198-55428-4050|53802-0-17725-70000|");
//! # fn hex_fixture() -> Vec<u8> {
//! #     hex::decode(concat!(
//! #         "81000000000000000B000000060000002D00000009000000300000000300000031000000",
//! #         "030000003200000002000000330000000200000034000000060000003500000003000000",
//! #         "3700000004000000380000000100000039000000020000007C0000008500000011000000",
//! #         "29000000D30C7890FB1D0E6E4B4C35DF1775BDAA90",
//! #     )).unwrap()
//! # }
//! ```
#![no_std]
#![deny(trivial_casts, trivial_numeric_casts, rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

macro_rules! vprintln {
    ($($x:expr),*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($x),*);
    }
}

pub mod decoding;
#[cfg(test)]
mod tests;

pub use decoding::decoder::{
    decode, decode_bytes, DecodeError, Decoder, DecoderConfig, ErrorKind, ParsedContainer,
    PayloadHeader, Validation,
};
pub use decoding::frequency_table::{FrequencyTable, TableHeader};
pub use decoding::huffman_tree::{Code, HuffmanTree};
