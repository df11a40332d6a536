#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate huffdec;

fuzz_target!(|data: &[u8]| {
    // errors are fine, it just should never panic on invalid input
    if let Ok(container) = huffdec::Decoder::default().parse(data) {
        if let Ok(output) = container.decode_bytes() {
            assert!(output.len() <= container.bits.len());
        }
    }
});
