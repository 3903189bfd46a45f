use dualbits::{BitOrder, BitStream, BitStreamReader};
use std::io::Read;

// Using debug_assertions as a poor man's way to omit no_panic compilation on
// unoptimized builds.
#[cfg_attr(not(debug_assertions), no_panic::no_panic)]
#[inline(never)]
fn read_data(data: &[u8]) -> Option<i64> {
    let mut reader = BitStreamReader::new(data);
    let mut result = i64::from(reader.read_int(27).ok()?);
    result += i64::from(reader.read_i8().ok()?);

    reader.set_bit_order(BitOrder::MsbFirst);
    result += i64::from(reader.read_uint(13).ok()?);
    result += reader.read_long(40).ok()?;

    reader.align();
    let mut buf = [0u8; 10];
    reader.read_bytes(&mut buf).ok()?;

    Some(result + i64::from(buf[0]))
}

fn main() {
    let stdin = std::io::stdin();
    let mut data = Vec::new();
    stdin.lock().read_to_end(&mut data).unwrap();
    println!("{:?}", read_data(&data));
}
