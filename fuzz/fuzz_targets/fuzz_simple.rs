#![no_main]
use libfuzzer_sys::fuzz_target;
use dualbits::{BitOrder, BitStream, BitStreamReader};

fuzz_target!(|data: &[u8]| {
    for order in [BitOrder::LsbFirst, BitOrder::MsbFirst] {
        let mut bits = BitStreamReader::with_order(data, order);

        loop {
            if bits.read_uint(17).is_err() {
                assert!(!bits.has_bits_remaining(17));
                break;
            }
        }
    }
});
