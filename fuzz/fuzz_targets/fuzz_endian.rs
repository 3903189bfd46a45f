#![no_main]
use libfuzzer_sys::fuzz_target;
use dualbits::{BitOrder, BitStream, BitStreamReader};

fuzz_target!(|data: &[u8]| {
    let mut lebits = BitStreamReader::with_order(data, BitOrder::LsbFirst);
    let mut bebits = BitStreamReader::with_order(data, BitOrder::MsbFirst);
    for &i in data {
        assert_eq!(lebits.read_u8().unwrap(), i);
        assert_eq!(bebits.read_u8().unwrap(), i);
    }

    assert!(lebits.read_u8().is_err());
    assert!(bebits.read_u8().is_err());
    assert!(lebits.is_empty());
    assert!(bebits.is_empty());
});
