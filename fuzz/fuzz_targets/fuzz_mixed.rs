#![no_main]
use libfuzzer_sys::fuzz_target;
use dualbits::{BitOrder, BitStream, BitStreamReader};

// The first half of the input drives the operations, the second half is read.
// Every MSB-first fast path read is checked against a bit-by-bit clone.
fuzz_target!(|data: &[u8]| {
    let (ops, payload) = data.split_at(data.len() / 2);
    let mut bits = BitStreamReader::new(payload);

    for &op in ops {
        let width = u32::from(op & 0x1f) + 1;
        match op >> 5 {
            0 => bits.align(),
            1 => bits.set_bit_order(BitOrder::LsbFirst),
            2 => bits.set_bit_order(BitOrder::MsbFirst),
            3 => {
                let _ = bits.read_bit();
            }
            _ => {
                let mut slow = bits.clone();
                let fast = bits.read_uint(width).map(u64::from);
                assert_eq!(fast, slow.read_ulong(width));
                assert_eq!(bits.bit_position(), slow.bit_position());
            }
        }
    }
});
