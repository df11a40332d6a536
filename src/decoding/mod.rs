//! Structures and utilities used for decoding huffman containers

pub mod bit_reader;
pub mod decoder;
pub mod frequency_table;
pub mod huffman_tree;
pub mod layout;
pub mod min_heap;
