#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate huffdec;
use huffdec::decoding::min_heap::{MinHeap, Weighted};

struct W(u64);

impl Weighted for W {
    fn weight(&self) -> u64 {
        self.0
    }
}

fuzz_target!(|data: &[u8]| {
    let mut heap = MinHeap::new();
    for chunk in data.chunks(2) {
        // a zero byte pops, everything else pushes
        if chunk[0] == 0 {
            heap.pop();
        } else {
            heap.push(W(u64::from(*chunk.last().unwrap())));
        }
        assert!(heap.is_valid());
    }

    let mut last = 0;
    while let Some(W(w)) = heap.pop() {
        assert!(w >= last);
        last = w;
    }
});
