#[cfg(feature = "std")]
mod properties;

use alloc::vec::Vec;

/// A real container. Most other fixtures are variations of it.
pub(crate) const DIGITS: &str = concat!(
    "81000000000000000B000000060000002D00000009000000300000000300000031000000",
    "030000003200000002000000330000000200000034000000060000003500000003000000",
    "3700000004000000380000000100000039000000020000007C0000008500000011000000",
    "29000000D30C7890FB1D0E6E4B4C35DF1775BDAA90",
);
pub(crate) const DIGITS_TEXT: &str = "53801-198-55428-4050|53802-0-17725-70000|";

pub(crate) fn unhex(fixture: &str) -> Vec<u8> {
    hex::decode(fixture).unwrap()
}
