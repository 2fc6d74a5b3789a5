//! Chunk header reading and the parsers for the chunk bodies

use crate::{
    error::{DecodeError, ErrorKind},
    reader::ByteCursor,
    Chunk,
};

pub mod chunk_types;
pub mod header;
pub mod track;

/// Reads an 8 byte chunk header: a 4 byte ASCII tag followed by a big endian 32 bit length
pub fn read_header<ITER: Iterator<Item = u8>>(
    cursor: &mut ByteCursor<ITER>,
) -> Result<Chunk, DecodeError> {
    let start = cursor.position();
    let raw: [u8; 8] = cursor.read_array().map_err(|err| match err.kind() {
        Some(ErrorKind::UnexpectedEndOfInput) => {
            DecodeError::malformed(start, ErrorKind::TruncatedChunkHeader)
        }
        _ => err,
    })?;

    Ok(u64::from_be_bytes(raw).into())
}

/// Reads a chunk header and checks that its tag is `tag`
pub fn expect_tag<ITER: Iterator<Item = u8>>(
    cursor: &mut ByteCursor<ITER>,
    tag: [u8; 4],
) -> Result<Chunk, DecodeError> {
    let start = cursor.position();
    let chunk = read_header(cursor)?;

    if chunk.chunk_type != tag {
        return Err(DecodeError::malformed(
            start,
            ErrorKind::UnexpectedChunkTag {
                expected: tag,
                found: chunk.chunk_type,
            },
        ));
    }

    log::debug!(
        "{} chunk of {} bytes at offset {start}",
        String::from_utf8_lossy(&tag),
        chunk.len()
    );

    Ok(chunk)
}
