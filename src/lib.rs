//! # notemidi
//!
//! A minimal dependency Standard MIDI File decoder. It reads the header chunk and every track
//! chunk of a file and surfaces the note on and note off events of each track, with their delta
//! times, for a note or score model to build on.
//!
//! ## Overview
//!
//! MIDI files are structured as a series of chunks. Each chunk contains a 4-character ASCII
//! type identifier and a 32-bit length that specifies how many bytes of data follow. The `MThd`
//! chunk describes the file, and each `MTrk` chunk holds a sequence of delta timed events. Event
//! statuses may be omitted ("running status"), so tracks are decoded strictly in order.
//!
//! - **Minimal dependencies**: only `thiserror` and the `log` facade by default. Opt in to serde
//!   support with the `serde` feature.
//! - **Streaming-friendly**: decoding pulls bytes from any `Iterator<Item = u8>` through a
//!   [`reader::ByteCursor`], and sources implementing [`reader::MidiReadable`] (file paths and
//!   [`reader::MidiData`]) can be decoded directly.
//! - **Fail fast**: the first structural problem aborts decoding with an [`error::ErrorKind`]
//!   and the byte offset where it was found.
//!
//! ## Example Usage
//!
//! ```rust
//! use notemidi::{decode_file, reader::MidiData};
//!
//! let bytes = vec![
//!     b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0, // header
//!     b'M', b'T', b'r', b'k', 0, 0, 0, 8, // track
//!     0x00, 0x90, 60, 64, // note on
//!     0x60, 0x80, 60, 0, // note off
//! ];
//!
//! let decoded = decode_file(MidiData::new(bytes)).expect("Decode MIDI bytes");
//! for note in &decoded.tracks[0] {
//!     println!("{note:?}");
//! }
//! ```
//!
//! ## Library Structure
//!
//! - **[`chunk`]**: Chunk header reading, plus the `header` and `track` parsers for the chunk
//!   bodies.
//! - **[`message`]**: The status byte registry describing every message kind and its length.
//! - **[`vlq`]**: Variable length quantities used for delta times and payload lengths.
//! - **[`reader`]**: Byte sources and the cursor parsers read through.
//! - **[`decoder`]**: Drives the parsers over a whole file.
//!
//! ## Extensibility
//!
//! [`decode_file`] keeps only notes. To see every event of a track, including meta and system
//! exclusive events, iterate [`chunk::track::TrackEvents`] directly.

pub mod chunk;
pub mod decoder;
pub mod error;
pub mod message;
pub mod reader;
pub mod vlq;

pub use chunk::track::FilteredEvent;
pub use decoder::{decode_file, decode_file_with, DecodeOptions, DecodeResult, Decoder};
pub use error::{DecodeError, ErrorKind};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents a raw MIDI Chunk header.
/// A MIDI Chunk consists of a 4-character ASCII type identifier and a 32-bit unsigned integer
/// specifying the length of its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Chunk {
    /// 4 character ASCII chunk type
    pub chunk_type: [u8; 4],
    /// Length of the data that follows
    length: u32,
}

impl Chunk {
    /// Creates a chunk header
    pub fn new(chunk_type: [u8; 4], length: u32) -> Self {
        Self { chunk_type, length }
    }

    /// Gets the length of the chunk as a usize
    pub fn len(&self) -> usize {
        self.length as usize
    }

    /// Gets the declared length
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Returns if the chunk has no attributed data
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl From<u64> for Chunk {
    fn from(value: u64) -> Self {
        let high = (value >> 32) as u32;
        let low = value as u32;

        Self {
            chunk_type: high.to_be_bytes(),
            length: low,
        }
    }
}
