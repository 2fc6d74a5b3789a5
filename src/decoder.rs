//! File level decoding: one header chunk followed by the declared number of track chunks

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    chunk::{
        chunk_types::TRACK_DATA_CHUNK,
        expect_tag,
        header::FileHeader,
        track::{FilteredEvent, TrackEvents},
    },
    error::DecodeError,
    reader::{ByteCursor, MidiReadable, DEFAULT_MAX_MESSAGE_LEN},
};

/// Settings that bound how much the decoder trusts its input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecodeOptions {
    /// Largest meta, sysex or message payload that will be read
    pub max_message_len: usize,
    /// Reject single track files that declare more than one track
    pub strict: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
            strict: true,
        }
    }
}

impl DecodeOptions {
    /// Sets the payload ceiling
    pub fn with_max_message_len(mut self, max_message_len: usize) -> Self {
        self.max_message_len = max_message_len;
        self
    }

    /// Sets whether header invariants are enforced
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// A decoded file: its header and the note events of each track, in file order
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecodeResult {
    /// The `MThd` chunk
    pub header: FileHeader,
    /// Note on and note off events, one sequence per `MTrk` chunk
    pub tracks: Vec<Vec<FilteredEvent>>,
}

/// Decodes whole MIDI files with a fixed set of options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoder {
    /// Options applied to every decode
    options: DecodeOptions,
}

impl Decoder {
    /// Creates a decoder with the given options
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// The options this decoder applies
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decodes a file from any byte iterator. Stops at the first error, no partial result is
    /// returned.
    pub fn decode<ITER: Iterator<Item = u8>>(
        &self,
        bytes: ITER,
    ) -> Result<DecodeResult, DecodeError> {
        let mut cursor = ByteCursor::with_max_message_len(bytes, self.options.max_message_len);
        let header = FileHeader::parse(&mut cursor, self.options.strict)?;

        let mut tracks = Vec::with_capacity(header.track_count as usize);
        for index in 0..header.track_count {
            let chunk = expect_tag(&mut cursor, TRACK_DATA_CHUNK)?;
            let notes = TrackEvents::new(&mut cursor, chunk).notes()?;
            log::debug!("track {index}: {} note events", notes.len());

            tracks.push(notes);
        }

        Ok(DecodeResult { header, tracks })
    }

    /// Opens `source` and decodes it
    pub fn decode_source<SOURCE: MidiReadable>(
        &self,
        source: SOURCE,
    ) -> Result<DecodeResult, DecodeError> {
        let bytes = source
            .get_midi_bytes()
            .map_err(Into::<DecodeError>::into)?;
        self.decode(bytes)
    }
}

/// Decodes a MIDI file with the default options
pub fn decode_file<SOURCE: MidiReadable>(source: SOURCE) -> Result<DecodeResult, DecodeError> {
    Decoder::default().decode_source(source)
}

/// Decodes a MIDI file with the given options
pub fn decode_file_with<SOURCE: MidiReadable>(
    source: SOURCE,
    options: DecodeOptions,
) -> Result<DecodeResult, DecodeError> {
    Decoder::new(options).decode_source(source)
}
