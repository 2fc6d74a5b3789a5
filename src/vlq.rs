//! Variable length quantities, the 7 bits per byte big endian integers used for delta times and
//! meta/sysex lengths

use crate::{
    error::{DecodeError, ErrorKind},
    reader::ByteCursor,
};

/// Largest number of bytes a well formed quantity occupies
pub const MAX_VLQ_BYTES: usize = 4;

/// Largest value representable in [`MAX_VLQ_BYTES`] bytes
pub const MAX_VLQ_VALUE: u32 = 0x0FFF_FFFF;

/// Payload bits of each byte
const MASK: u8 = 0x7F;

/// Reads a variable length quantity from the cursor
pub fn decode<ITER: Iterator<Item = u8>>(
    cursor: &mut ByteCursor<ITER>,
) -> Result<u32, DecodeError> {
    let start = cursor.position();
    let mut result: u32 = 0;

    for _ in 0..MAX_VLQ_BYTES {
        let byte = cursor.read_byte()?;
        result = (result << 7) | (byte & MASK) as u32;

        if !msb_is_one(byte) {
            return Ok(result);
        }
    }

    Err(DecodeError::malformed(start, ErrorKind::VariableLengthTooLong))
}

/// Encodes a value as its shortest variable length form. Bits above 28 are dropped.
pub fn encode(value: u32) -> Vec<u8> {
    let mut value = value & MAX_VLQ_VALUE;
    let mut bytes = Vec::with_capacity(MAX_VLQ_BYTES);

    loop {
        let mut byte = (value & MASK as u32) as u8;
        value >>= 7;

        if !bytes.is_empty() {
            byte |= 0x80;
        }

        bytes.push(byte);

        if value == 0 {
            break;
        }
    }

    bytes.reverse();
    bytes
}

/// Returns true if the msb of a byte is 1
fn msb_is_one(byte: u8) -> bool {
    byte >> 7 == 1
}
