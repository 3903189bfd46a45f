/*!

***Reading bits both ways***

Dualbits reads arbitrary-width integers out of a byte slice in either bit order,
least-significant-bit first or most-significant-bit first, and lets the order
change mid-stream. It was written for compressed audio bitstreams (Vorbis
headers and packets, ADTS style frame headers) where fields are packed at sub
byte granularity and both conventions show up.

## Features

 - ✔ LSB-first and MSB-first bit orders, switchable between bytes
 - ✔ request an arbitrary amount of bits (up to 32 for `read_uint`, 64 for `read_ulong`)
 - ✔ signed reads with two's-complement sign extension of any width
 - ✔ an MSB-first fast path that extracts whole bytes instead of looping per bit
 - ✔ failed reads never move the cursor
 - ✔ zero allocations
 - ✔ `no_std` compatible

## Example

Decoding the start of a Vorbis identification header, which packs its fields
LSB-first:

```rust
use dualbits::{BitStream, BitStreamReader};
let packet = [0x01, b'v', b'o', b'r', b'b', b'i', b's', 0xb8, 0x01];
let mut bits = BitStreamReader::new(&packet);

assert_eq!(bits.read_u8(), Ok(1));
let mut magic = [0u8; 6];
bits.read_bytes(&mut magic)?;
assert_eq!(&magic, b"vorbis");

// blocksize exponents are two nibbles, low nibble first
assert_eq!(bits.read_uint(4), Ok(8));
assert_eq!(bits.read_uint(4), Ok(11));

// framing flag
assert_eq!(bits.read_bit(), Ok(true));
# Ok::<(), dualbits::Error>(())
```

The bit order can be switched at any point. A switch in the middle of a byte
discards the rest of that byte, exactly like [`align`](BitStream::align):

```rust
use dualbits::{BitOrder, BitStream, BitStreamReader};
let mut bits = BitStreamReader::new(&[0b0000_0001, 0b1011_0010]);
assert_eq!(bits.read_bit(), Ok(true));

bits.set_bit_order(BitOrder::MsbFirst);
assert_eq!(bits.read_uint(4), Ok(0b1011));
assert_eq!(bits.read_uint(4), Ok(0b0010));
assert!(bits.is_empty());
```

Reads that would run past the end of the buffer fail without consuming
anything, so a caller can inspect how much is left before bailing out:

```rust
use dualbits::{BitStream, BitStreamReader, Error};
let mut bits = BitStreamReader::new(&[0xff]);
assert_eq!(bits.read_uint(3), Ok(0b111));
assert_eq!(
    bits.read_uint(6),
    Err(Error::OutOfBounds { requested: 6, available: 5 })
);
assert_eq!(bits.read_uint(5), Ok(0b1_1111));
```

### `no_std` crates

This crate has a feature, `std`, that is enabled by default. To use this crate
in a `no_std` context, add the following to your `Cargo.toml`:

```toml
[dependencies]
dualbits = { version = "x", default-features = false }
```

*/

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

mod error;

pub use crate::error::{Error, Result};

/// The direction in which the bits of each byte are consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BitOrder {
    /// Bit 0 of a byte is read first and becomes the least significant bit
    /// of the result
    #[default]
    LsbFirst,

    /// Bit 7 of a byte is read first and becomes the most significant bit of
    /// the result
    MsbFirst,
}

impl BitOrder {
    /// Bit index of the first bit read out of a freshly loaded byte
    #[inline]
    const fn first_bit(self) -> i32 {
        match self {
            BitOrder::LsbFirst => 0,
            BitOrder::MsbFirst => 7,
        }
    }

    /// Bit index marking the current byte as fully consumed
    #[inline]
    const fn parked(self) -> i32 {
        match self {
            BitOrder::LsbFirst => 8,
            BitOrder::MsbFirst => -1,
        }
    }
}

/// The maximum width accepted by [`read_uint`](BitStream::read_uint) and
/// [`read_int`](BitStream::read_int)
pub const MAX_INT_BITS: u32 = u32::BITS;

/// The maximum width accepted by [`read_ulong`](BitStream::read_ulong) and
/// [`read_long`](BitStream::read_long)
pub const MAX_LONG_BITS: u32 = u64::BITS;

macro_rules! gen_read {
    ($name:ident, $t:ty, $via:ident) => {
        #[doc = concat!("Consume `", stringify!($t), "::BITS` bits in the current bit order")]
        #[inline]
        fn $name(&mut self) -> Result<$t> {
            self.$via(<$t>::BITS).map(|x| x as $t)
        }
    };
}

/// Read bits in a switchable bit order
pub trait BitStream {
    /// Consume a bit and return if the bit was enabled
    ///
    /// ```rust
    /// use dualbits::{BitOrder, BitStream, BitStreamReader};
    /// let mut bits = BitStreamReader::with_order(&[0b1001_0011], BitOrder::MsbFirst);
    /// assert_eq!(bits.read_bit(), Ok(true));
    /// assert_eq!(bits.read_bit(), Ok(false));
    /// ```
    fn read_bit(&mut self) -> Result<bool>;

    /// Reads an arbitrary number of bits from 0 to 32 (inclusive) and
    /// returns the unsigned result
    ///
    /// In LSB-first order the first bit read lands in the least significant
    /// position of the result, in MSB-first order it lands in the most
    /// significant one.
    ///
    /// ```rust
    /// use dualbits::{BitOrder, BitStream, BitStreamReader};
    /// let mut bits = BitStreamReader::with_order(&[0x12, 0x34], BitOrder::MsbFirst);
    /// assert_eq!(bits.read_uint(12), Ok(0x123));
    /// assert_eq!(bits.read_uint(4), Ok(0x4));
    ///
    /// let mut bits = BitStreamReader::new(&[0xab, 0xcd]);
    /// assert_eq!(bits.read_uint(16), Ok(0xcdab));
    /// ```
    fn read_uint(&mut self, bits: u32) -> Result<u32>;

    /// Reads an arbitrary number of bits from 0 to 64 (inclusive) and
    /// returns the unsigned result
    ///
    /// ```rust
    /// use dualbits::{BitOrder, BitStream, BitStreamReader};
    /// let data = 0x0123_4567_89ab_cdefu64.to_be_bytes();
    /// let mut bits = BitStreamReader::with_order(&data, BitOrder::MsbFirst);
    /// assert_eq!(bits.read_ulong(64), Ok(0x0123_4567_89ab_cdef));
    /// ```
    fn read_ulong(&mut self, bits: u32) -> Result<u64>;

    /// Reads an arbitrary number of bits from 0 to 32 (inclusive) and
    /// returns the signed result. If the most significant bit of the field
    /// is enabled, the result will be negative.
    ///
    /// ```rust
    /// use dualbits::{BitOrder, BitStream, BitStreamReader};
    /// let mut bits = BitStreamReader::with_order(&[0xfa, 0x93], BitOrder::MsbFirst);
    /// assert_eq!(bits.read_int(4), Ok(-1));
    /// assert_eq!(bits.read_int(4), Ok(-6));
    /// assert_eq!(bits.read_int(4), Ok(-7));
    /// assert_eq!(bits.read_int(4), Ok(3));
    /// ```
    #[inline]
    fn read_int(&mut self, bits: u32) -> Result<i32> {
        self.read_uint(bits)
            .map(|x| sign_extend(u64::from(x), bits) as i32)
    }

    /// Reads an arbitrary number of bits from 0 to 64 (inclusive) and
    /// returns the signed result
    ///
    /// ```rust
    /// use dualbits::{BitStream, BitStreamReader};
    /// let data = (-500i64).to_le_bytes();
    /// let mut bits = BitStreamReader::new(&data);
    /// assert_eq!(bits.read_long(64), Ok(-500));
    /// ```
    #[inline]
    fn read_long(&mut self, bits: u32) -> Result<i64> {
        self.read_ulong(bits).map(|x| sign_extend(x, bits))
    }

    gen_read!(read_u8, u8, read_uint);
    gen_read!(read_i8, i8, read_int);
    gen_read!(read_u16, u16, read_uint);
    gen_read!(read_i16, i16, read_int);
    gen_read!(read_u32, u32, read_uint);
    gen_read!(read_i32, i32, read_int);
    gen_read!(read_u64, u64, read_ulong);
    gen_read!(read_i64, i64, read_long);

    /// Fill the provided buffer with successive 8 bit reads. If there aren't
    /// enough bits remaining, then the bit stream and buffer remain unchanged
    ///
    /// ```rust
    /// # use dualbits::{BitStream, BitStreamReader};
    /// let mut bits = BitStreamReader::new(&[0b1010_1010, 0b0101_0101]);
    /// let mut buf = [0; 1];
    /// assert_eq!(bits.read_bit(), Ok(false));
    /// assert!(bits.read_bytes(&mut buf).is_ok());
    /// assert_eq!(&buf, &[0b1101_0101]);
    /// assert!(bits.read_bytes(&mut buf).is_err());
    /// assert_eq!(bits.read_uint(1), Ok(0));
    /// ```
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Discard the unread remainder of the current byte so the next read
    /// starts on a byte boundary. Does nothing when already aligned.
    ///
    /// ```rust
    /// use dualbits::{BitOrder, BitStream, BitStreamReader};
    /// let mut bits = BitStreamReader::with_order(&[0xf0, 0x00], BitOrder::MsbFirst);
    /// assert_eq!(bits.read_uint(4), Ok(0xf));
    /// bits.align();
    /// assert_eq!(bits.read_uint(8), Ok(0x00));
    /// ```
    fn align(&mut self);

    /// Change the bit order. When the order actually changes the stream is
    /// first [aligned](BitStream::align).
    fn set_bit_order(&mut self, order: BitOrder);

    /// The bit order subsequent reads use
    fn bit_order(&self) -> BitOrder;

    /// Returns how many complete bytes are left in the bitstream.
    ///
    /// ```rust
    /// # use dualbits::{BitStream, BitStreamReader};
    /// let mut bits = BitStreamReader::new(&[0xff]);
    /// assert_eq!(bits.bytes_remaining(), 1);
    /// assert!(bits.read_bit().is_ok());
    /// assert_eq!(bits.bytes_remaining(), 0);
    /// ```
    fn bytes_remaining(&self) -> usize;

    /// Returns the exact number of bits remaining in the bitstream if the
    /// number of bits can fit within a `usize`.
    ///
    /// ```rust
    /// # use dualbits::{BitStream, BitStreamReader};
    /// let mut bits = BitStreamReader::new(&[0xff]);
    /// assert_eq!(bits.bits_remaining(), Some(8));
    /// assert!(bits.read_bit().is_ok());
    /// assert_eq!(bits.bits_remaining(), Some(7));
    /// ```
    fn bits_remaining(&self) -> Option<usize>;

    /// Returns true if at least `bits` number of bits are left in the stream
    ///
    /// ```rust
    /// # use dualbits::{BitStream, BitStreamReader};
    /// let mut bits = BitStreamReader::new(&[0xff]);
    /// assert!(bits.has_bits_remaining(8));
    /// assert!(!bits.has_bits_remaining(9));
    /// assert!(bits.read_uint(7).is_ok());
    /// assert!(bits.has_bits_remaining(1));
    /// assert!(!bits.has_bits_remaining(2));
    /// ```
    fn has_bits_remaining(&self, bits: usize) -> bool;

    /// Returns if the bitstream has no bits left
    #[inline]
    fn is_empty(&self) -> bool {
        !self.has_bits_remaining(1)
    }

    /// Returns true if the reader is not partway through a byte
    ///
    /// ```rust
    /// # use dualbits::{BitStream, BitStreamReader};
    /// let mut bits = BitStreamReader::new(&[0b1010_1010, 0b0101_0101]);
    /// assert!(bits.byte_aligned());
    /// assert_eq!(bits.read_bit(), Ok(false));
    /// assert!(!bits.byte_aligned());
    /// bits.align();
    /// assert!(bits.byte_aligned());
    /// ```
    fn byte_aligned(&self) -> bool;

    /// Number of bits consumed so far, counting bits skipped by alignment
    fn bit_position(&self) -> Option<usize>;
}

/// Two's-complement interpretation of the low `bits` bits of `value`
#[inline]
fn sign_extend(value: u64, bits: u32) -> i64 {
    if bits == 0 {
        return 0;
    }

    let value = i128::from(value);
    let half = 1i128 << (bits - 1);
    if value >= half {
        (value - (half << 1)) as i64
    } else {
        value as i64
    }
}

#[inline]
fn bit_mask(bits: u32) -> u32 {
    debug_assert!(bits > 0 && bits <= MAX_INT_BITS);
    u32::MAX >> (MAX_INT_BITS - bits)
}

#[inline]
fn check_width(bits: u32, max: u32) -> Result<()> {
    if bits > max {
        Err(Error::InvalidArgument {
            requested: bits,
            max,
        })
    } else {
        Ok(())
    }
}

/// Reads bits from a borrowed byte slice
///
/// ```rust
/// use dualbits::{BitStream, BitStreamReader};
/// let mut bits = BitStreamReader::new(&[0b0000_0001]);
/// assert_eq!(bits.read_bit(), Ok(true));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitStreamReader<'a> {
    data: &'a [u8],

    /// Index of the next byte to load into `current`
    pos: usize,

    /// Copy of `data[pos - 1]`, stale while parked
    current: u8,

    /// Next bit of `current` to read, or the order's parked sentinel
    bit_index: i32,

    order: BitOrder,
}

impl<'a> BitStreamReader<'a> {
    /// Reader positioned at the first bit of `data`, LSB-first
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_order(data, BitOrder::default())
    }

    /// Reader positioned at the first bit of `data` in the given order
    #[inline]
    pub fn with_order(data: &'a [u8], order: BitOrder) -> Self {
        Self {
            data,
            pos: 0,
            current: 0,
            bit_index: order.parked(),
            order,
        }
    }

    /// Bits of `current` not yet consumed
    #[inline]
    fn unread_bits(&self) -> u32 {
        let unread = match self.order {
            BitOrder::LsbFirst => 8 - self.bit_index,
            BitOrder::MsbFirst => self.bit_index + 1,
        };
        unread as u32
    }

    #[inline]
    fn reload(&mut self) -> Result<()> {
        match self.data.get(self.pos) {
            Some(&byte) => {
                self.current = byte;
                self.pos += 1;
                self.bit_index = self.order.first_bit();
                Ok(())
            }
            None => Err(Error::OutOfBounds {
                requested: 1,
                available: 0,
            }),
        }
    }

    /// Fail before touching the cursor if fewer than `bits` are left
    #[inline]
    fn ensure_bits(&self, bits: usize) -> Result<()> {
        if self.has_bits_remaining(bits) {
            Ok(())
        } else {
            let available = self.bits_remaining().unwrap_or(usize::MAX);
            log::debug!(
                "rejecting read of {} bits at byte {}: {} bits left",
                bits,
                self.pos,
                available
            );
            Err(Error::OutOfBounds {
                requested: bits,
                available,
            })
        }
    }

    fn read_uint_lsb(&mut self, bits: u32) -> Result<u32> {
        let mut result = 0u32;
        for i in 0..bits {
            if self.read_bit()? {
                result |= 1u32 << i;
            }
        }

        Ok(result)
    }

    // Extracts whole bitfields per byte rather than looping per bit. A byte
    // is only loaded once at least one of its bits is consumed, so a read
    // ending on a byte boundary leaves the cursor parked.
    fn read_uint_msb(&mut self, bits: u32) -> Result<u32> {
        if self.bit_index < 0 {
            self.reload()?;
        }

        let available = self.unread_bits();
        let current = u32::from(self.current);
        if bits <= available {
            self.bit_index -= bits as i32;
            return Ok((current >> (available - bits)) & bit_mask(bits));
        }

        let mut remaining = bits - available;
        let mut result = (current & bit_mask(available)) << remaining;
        loop {
            self.reload()?;
            let current = u32::from(self.current);
            if remaining >= 8 {
                remaining -= 8;
                result |= current << remaining;
                if remaining == 0 {
                    self.bit_index = self.order.parked();
                    return Ok(result);
                }
            } else {
                result |= current >> (8 - remaining);
                self.bit_index = 7 - remaining as i32;
                return Ok(result);
            }
        }
    }
}

impl<'a> BitStream for BitStreamReader<'a> {
    #[inline]
    fn read_bit(&mut self) -> Result<bool> {
        if self.bit_index == self.order.parked() {
            self.reload()?;
        }

        let bit = (self.current >> self.bit_index) & 1 == 1;
        match self.order {
            BitOrder::LsbFirst => self.bit_index += 1,
            BitOrder::MsbFirst => self.bit_index -= 1,
        }

        Ok(bit)
    }

    #[inline]
    fn read_uint(&mut self, bits: u32) -> Result<u32> {
        check_width(bits, MAX_INT_BITS)?;
        if bits == 0 {
            return Ok(0);
        }

        self.ensure_bits(bits as usize)?;
        match self.order {
            BitOrder::LsbFirst => self.read_uint_lsb(bits),
            BitOrder::MsbFirst => self.read_uint_msb(bits),
        }
    }

    fn read_ulong(&mut self, bits: u32) -> Result<u64> {
        check_width(bits, MAX_LONG_BITS)?;
        self.ensure_bits(bits as usize)?;

        let mut result = 0u64;
        for i in 0..bits {
            if self.read_bit()? {
                result |= match self.order {
                    BitOrder::LsbFirst => 1u64 << i,
                    BitOrder::MsbFirst => 1u64 << (bits - 1 - i),
                };
            }
        }

        Ok(result)
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        self.ensure_bits(buf.len().saturating_mul(8))?;

        if self.byte_aligned() {
            let end = self.pos + buf.len();
            if let Some(src) = self.data.get(self.pos..end) {
                for (dst, byte) in buf.iter_mut().zip(src) {
                    *dst = *byte;
                }
                self.pos = end;
                return Ok(());
            }
        }

        for dst in buf.iter_mut() {
            *dst = self.read_uint(8)? as u8;
        }

        Ok(())
    }

    #[inline]
    fn align(&mut self) {
        if !self.byte_aligned() {
            log::trace!(
                "aligning: skipping {} bits of byte {}",
                self.unread_bits(),
                self.pos - 1
            );
            self.bit_index = self.order.parked();
        }
    }

    fn set_bit_order(&mut self, order: BitOrder) {
        if order == self.order {
            return;
        }

        self.align();
        log::trace!("switching bit order to {:?} at byte {}", order, self.pos);
        self.order = order;
        self.bit_index = order.parked();
    }

    #[inline]
    fn bit_order(&self) -> BitOrder {
        self.order
    }

    #[inline]
    fn bytes_remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    #[inline]
    fn bits_remaining(&self) -> Option<usize> {
        self.bytes_remaining()
            .checked_mul(8)
            .map(|x| x + self.unread_bits() as usize)
    }

    #[inline]
    fn has_bits_remaining(&self, bits: usize) -> bool {
        let bytes = self.bytes_remaining();
        bytes >= bits || bytes.saturating_mul(8) + self.unread_bits() as usize >= bits
    }

    #[inline]
    fn byte_aligned(&self) -> bool {
        self.unread_bits() == 0
    }

    #[inline]
    fn bit_position(&self) -> Option<usize> {
        self.pos
            .checked_mul(8)
            .map(|x| x - self.unread_bits() as usize)
    }
}
