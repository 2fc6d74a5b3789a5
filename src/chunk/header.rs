//! Header Chunk Enum and Struct Definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{chunk_types::HEADER_CHUNK, expect_tag};
use crate::{
    error::{DecodeError, ErrorKind},
    reader::ByteCursor,
};

/// Size of the fixed header payload: format, ntrks and division as 3 16 bit unsigned integers
pub const HEADER_PAYLOAD_LEN: u32 = 6;

/// Header chunk data, including format, ntrks and division
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FileHeader {
    /// The MIDI format
    pub format: Format,
    /// Number of track chunks that follow
    pub track_count: u16,
    /// Meaning of the delta times
    pub division: Division,
}

impl FileHeader {
    /// Reads the `MThd` chunk. Payload bytes past the first 6 are skipped. With `strict` set, a
    /// single track file must declare exactly one track.
    pub fn parse<ITER: Iterator<Item = u8>>(
        cursor: &mut ByteCursor<ITER>,
        strict: bool,
    ) -> Result<Self, DecodeError> {
        let chunk = expect_tag(cursor, HEADER_CHUNK)?;
        if chunk.length() < HEADER_PAYLOAD_LEN {
            return Err(cursor.error(ErrorKind::UnsupportedHeaderSize(chunk.length())));
        }

        let format_offset = cursor.position();
        let format = cursor.read_u16_be()?;
        let track_count = cursor.read_u16_be()?;
        let division = cursor.read_u16_be()?;

        // Newer revisions may extend the header
        let extra = (chunk.length() - HEADER_PAYLOAD_LEN) as usize;
        for _ in 0..extra {
            cursor.read_byte()?;
        }

        let format = Format::try_from(format)
            .map_err(|kind| DecodeError::malformed(format_offset, kind))?;

        if strict && format == Format::SingleTrack && track_count != 1 {
            return Err(DecodeError::malformed(
                format_offset + 2,
                ErrorKind::TrackCountMismatch(track_count),
            ));
        }

        let header = Self {
            format,
            track_count,
            division: division.into(),
        };
        log::debug!("{header:?}");

        Ok(header)
    }
}

/// The overall organization of the MIDI file. Only three values are valid, making most of the 16
/// bits irrelevant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Format {
    /// The file contains a single multi-channel track
    SingleTrack,
    /// The file contains one or more simultaneous tracks (or MIDI outputs) of a sequence
    MultiTrackSynchronous,
    /// The file contains one or more sequentially independent single-track patterns
    MultiTrackAsynchronous,
}

impl TryFrom<u16> for Format {
    type Error = ErrorKind;
    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Format::SingleTrack),
            1 => Ok(Format::MultiTrackSynchronous),
            2 => Ok(Format::MultiTrackAsynchronous),
            _ => Err(ErrorKind::InvalidFormatType(value)),
        }
    }
}

/// The meaning of the delta-times in the MIDI sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Division {
    /// When bit 15 is a 0, bits 14-0 represent ticks per quarter note
    Ticks(u16),
    /// When bit 15 is 1, bits 15-8 hold the negated SMPTE frame rate in two's complement and
    /// bits 7-0 the ticks per frame
    Smpte {
        /// Frames per second, 24, 25, 29 (drop frame 30) or 30 in well formed files
        frames_per_second: u8,
        /// Resolution within a frame
        ticks_per_frame: u8,
    },
}

impl From<u16> for Division {
    fn from(value: u16) -> Self {
        const MASK: u16 = 0x7FFF;
        let [high, low] = value.to_be_bytes();

        match value >> 15 {
            0 => Division::Ticks(value & MASK),
            _ => Division::Smpte {
                frames_per_second: (high as i8).unsigned_abs(),
                ticks_per_frame: low,
            },
        }
    }
}
