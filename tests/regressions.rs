use dualbits::{BitOrder, BitStream, BitStreamReader, Error};

#[test]
fn vorbis_identification_header() {
    let mut packet = vec![0x01];
    packet.extend_from_slice(b"vorbis");
    packet.extend_from_slice(&0u32.to_le_bytes());
    packet.push(2);
    packet.extend_from_slice(&44100u32.to_le_bytes());
    packet.extend_from_slice(&0i32.to_le_bytes());
    packet.extend_from_slice(&128000i32.to_le_bytes());
    packet.extend_from_slice(&(-1i32).to_le_bytes());
    packet.push(0xb8);
    packet.push(0x01);

    let mut bits = BitStreamReader::new(&packet);
    assert_eq!(bits.read_u8(), Ok(1));

    let mut magic = [0u8; 6];
    assert!(bits.read_bytes(&mut magic).is_ok());
    assert_eq!(&magic, b"vorbis");

    assert_eq!(bits.read_u32(), Ok(0));
    assert_eq!(bits.read_u8(), Ok(2));
    assert_eq!(bits.read_u32(), Ok(44100));
    assert_eq!(bits.read_i32(), Ok(0));
    assert_eq!(bits.read_i32(), Ok(128000));
    assert_eq!(bits.read_i32(), Ok(-1));

    assert_eq!(bits.read_uint(4).map(|x| 1 << x), Ok(256));
    assert_eq!(bits.read_uint(4).map(|x| 1 << x), Ok(2048));
    assert_eq!(bits.read_bit(), Ok(true));

    assert!(!bits.is_empty());
    bits.align();
    assert!(bits.is_empty());
}

#[test]
fn vorbis_codebook_prefix() {
    let data = [0x42, 0x43, 0x56, 0x02, 0x00, 0x10, 0x00, 0x00, 0x26];
    let mut bits = BitStreamReader::new(&data);

    assert_eq!(bits.read_uint(24), Ok(0x564342));
    assert_eq!(bits.read_uint(16), Ok(2));
    assert_eq!(bits.read_uint(24), Ok(16));

    // ordered, sparse, first entry present, first entry length
    assert_eq!(bits.read_bit(), Ok(false));
    assert_eq!(bits.read_bit(), Ok(true));
    assert_eq!(bits.read_bit(), Ok(true));
    assert_eq!(bits.read_uint(5).map(|x| x + 1), Ok(5));
    assert!(bits.is_empty());
}

#[test]
fn adts_style_header() {
    let mut bits = BitStreamReader::with_order(&[0xff, 0xf1, 0x50, 0x80], BitOrder::MsbFirst);

    assert_eq!(bits.read_uint(12), Ok(0xfff));
    assert_eq!(bits.read_bit(), Ok(false));
    assert_eq!(bits.read_uint(2), Ok(0));
    assert_eq!(bits.read_bit(), Ok(true));
    assert_eq!(bits.read_uint(2), Ok(1));
    assert_eq!(bits.read_uint(4), Ok(4));
    assert_eq!(bits.read_bit(), Ok(false));
    assert_eq!(bits.read_uint(3), Ok(2));
    assert_eq!(bits.bit_position(), Some(26));
}

#[test]
fn mixed_order_packet() {
    let data = [0b0000_0101, 0xca, 0xfe, 0b0000_0011];
    let mut bits = BitStreamReader::new(&data);

    assert_eq!(bits.read_uint(3), Ok(0b101));
    bits.set_bit_order(BitOrder::MsbFirst);
    assert_eq!(bits.read_uint(16), Ok(0xcafe));
    assert!(bits.byte_aligned());

    bits.set_bit_order(BitOrder::LsbFirst);
    assert_eq!(bits.read_uint(2), Ok(0b11));
    assert_eq!(bits.read_uint(6), Ok(0));
    assert!(bits.is_empty());
}

#[test]
fn stale_byte_after_align() {
    let data = [0x0f, 0xf0];

    let mut bits = BitStreamReader::new(&data);
    assert_eq!(bits.read_uint(4), Ok(0xf));
    bits.align();
    assert_eq!(bits.read_uint(4), Ok(0x0));

    let mut bits = BitStreamReader::with_order(&data, BitOrder::MsbFirst);
    assert_eq!(bits.read_uint(4), Ok(0x0));
    bits.align();
    assert_eq!(bits.read_uint(4), Ok(0xf));
}

#[test]
fn truncated_packet() {
    let mut bits = BitStreamReader::new(&[0x01, b'v', b'o']);
    assert_eq!(bits.read_u8(), Ok(1));

    let mut magic = [0u8; 6];
    assert_eq!(
        bits.read_bytes(&mut magic),
        Err(Error::OutOfBounds {
            requested: 48,
            available: 16
        })
    );
    assert_eq!(magic, [0u8; 6]);
    assert_eq!(bits.read_u8(), Ok(b'v'));
}

#[test]
fn error_messages() {
    let err = Error::InvalidArgument {
        requested: 33,
        max: 32,
    };
    assert_eq!(
        err.to_string(),
        "cannot read 33 bits at once, the maximum is 32"
    );

    let err = Error::OutOfBounds {
        requested: 9,
        available: 8,
    };
    assert_eq!(
        err.to_string(),
        "read of 9 bits runs past the end of the buffer (8 bits left)"
    );
}
