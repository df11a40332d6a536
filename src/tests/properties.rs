use crate::{decode, decode_bytes, FrequencyTable, HuffmanTree};
use alloc::vec;
use alloc::vec::Vec;
use proptest::prelude::*;

/// Packs `text` with the codes of the tree built from its symbol counts.
fn pack(text: &[u8]) -> Vec<u8> {
    let mut counts: Vec<(u8, u64)> = vec![];
    for &symbol in text {
        match counts.iter_mut().find(|(s, _)| *s == symbol) {
            Some((_, count)) => *count += 1,
            None => counts.push((symbol, 1)),
        }
    }
    let table: FrequencyTable = counts.iter().copied().collect();
    let codes = HuffmanTree::build(&table).unwrap().codes();

    let mut bits = vec![];
    for symbol in text {
        let code = codes.iter().find(|c| c.symbol == *symbol).unwrap();
        bits.extend(code.bits());
    }
    let mut payload = vec![0u8; bits.len().div_ceil(8)];
    for (idx, bit) in bits.iter().enumerate() {
        if *bit {
            payload[idx / 8] |= 0x80 >> (idx % 8);
        }
    }

    let mut raw = vec![];
    for field in [0, 0, counts.len() as u32] {
        raw.extend_from_slice(&field.to_le_bytes());
    }
    for (symbol, count) in &counts {
        raw.extend_from_slice(&(*count as u32).to_le_bytes());
        raw.extend_from_slice(&[*symbol, 0, 0, 0]);
    }
    for field in [bits.len() as u32, payload.len() as u32, text.len() as u32] {
        raw.extend_from_slice(&field.to_le_bytes());
    }
    raw.extend_from_slice(&payload);
    raw
}

proptest! {
    #[test]
    fn arbitrary_bytes_never_panic(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        let _ = decode(&data);
    }

    #[test]
    fn decode_is_repeatable(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        prop_assert_eq!(decode_bytes(&data), decode_bytes(&data));
    }

    #[test]
    fn packed_text_comes_back(text in proptest::collection::vec(b'a'..=b'h', 2..200)) {
        // a single distinct symbol has no code to pack with
        prop_assume!(text.iter().any(|c| *c != text[0]));
        let raw = pack(&text);
        prop_assert_eq!(decode_bytes(&raw).unwrap(), text);
    }

    #[test]
    fn never_more_symbols_than_bits(text in proptest::collection::vec(any::<u8>(), 2..100)) {
        prop_assume!(text.iter().any(|c| *c != text[0]));
        let raw = pack(&text);
        let parsed = crate::Decoder::default().parse(&raw).unwrap();
        let output = parsed.decode_bytes().unwrap();
        prop_assert!(output.len() <= parsed.bits.len());
    }

    #[test]
    fn cutting_the_table_always_fails(text in proptest::collection::vec(b'0'..=b'9', 2..64), cut in 0usize..1000) {
        prop_assume!(text.iter().any(|c| *c != text[0]));
        let raw = pack(&text);
        let symbols = u32::from_le_bytes([raw[8], raw[9], raw[10], raw[11]]) as usize;
        let cut = cut % (12 + symbols * 8);
        prop_assert!(decode(&raw[..cut]).is_err());
    }
}
