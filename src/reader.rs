//! MIDI file reader trait, allows for in memory byte spans to be read or files, and the
//! [`ByteCursor`] every parser in this crate pulls its bytes through

use std::{convert::Infallible, path::Path};

use crate::error::{DecodeError, ErrorKind};

/// Default ceiling for a single requested byte run
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 1000;

/// Trait that allows for different types to be translated to a MIDI parseable format
pub trait MidiReadable {
    /// Error type that may be returned from the Midi Sequence
    type Error: Into<DecodeError>;
    /// Creates a byte iterator from the type
    fn get_midi_bytes(self) -> Result<impl Iterator<Item = u8>, Self::Error>;
}

/// Wrapper struct to allow passing Vec<u8> to MidiReadable trait
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MidiData(Vec<u8>);

impl MidiData {
    /// Wraps an in memory MIDI file
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }
}

impl From<Vec<u8>> for MidiData {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for MidiData {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl MidiReadable for MidiData {
    type Error = Infallible;
    fn get_midi_bytes(self) -> Result<impl Iterator<Item = u8>, Self::Error> {
        Ok(self.0.into_iter())
    }
}

impl<PATH> MidiReadable for PATH
where
    PATH: AsRef<Path>,
{
    type Error = std::io::Error;
    fn get_midi_bytes(self) -> Result<impl Iterator<Item = u8>, Self::Error> {
        let bytes = std::fs::read(self.as_ref())?;
        Ok(bytes.into_iter())
    }
}

/// A recorded cursor position, used to measure how far a chunk body has been read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Sequential, fallible reader over a stream of bytes.
///
/// Every failure carries the offset of the byte that could not be read, so errors raised by
/// parsers built on top of the cursor point at the right place in the file.
#[derive(Debug)]
pub struct ByteCursor<ITER> {
    /// Underlying byte source
    bytes: ITER,
    /// Bytes consumed so far
    position: usize,
    /// Largest run [`ByteCursor::read_bytes`] will allocate for
    max_message_len: usize,
}

impl<ITER> ByteCursor<ITER>
where
    ITER: Iterator<Item = u8>,
{
    /// Creates a cursor with the default message length ceiling
    pub fn new(bytes: ITER) -> Self {
        Self::with_max_message_len(bytes, DEFAULT_MAX_MESSAGE_LEN)
    }

    /// Creates a cursor that refuses byte runs longer than `max_message_len`
    pub fn with_max_message_len(bytes: ITER, max_message_len: usize) -> Self {
        Self {
            bytes,
            position: 0,
            max_message_len,
        }
    }

    /// Bytes consumed since the cursor was created
    pub fn position(&self) -> usize {
        self.position
    }

    /// Records the current position
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.position)
    }

    /// Bytes consumed since `checkpoint` was recorded
    pub fn since(&self, checkpoint: Checkpoint) -> usize {
        self.position - checkpoint.0
    }

    /// Builds an error located at the current position
    pub fn error(&self, kind: ErrorKind) -> DecodeError {
        DecodeError::malformed(self.position, kind)
    }

    /// Reads a single byte
    pub fn read_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = self
            .bytes
            .next()
            .ok_or_else(|| self.error(ErrorKind::UnexpectedEndOfInput))?;
        self.position += 1;
        Ok(byte)
    }

    /// Reads exactly `n` bytes, refusing runs longer than the configured ceiling
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, DecodeError> {
        self.check_len(n)?;

        let mut bytes = Vec::with_capacity(n);
        for _ in 0..n {
            bytes.push(self.read_byte()?);
        }

        Ok(bytes)
    }

    /// Discards exactly `n` bytes, under the same ceiling as [`ByteCursor::read_bytes`]
    pub fn skip(&mut self, n: usize) -> Result<(), DecodeError> {
        self.check_len(n)?;

        for _ in 0..n {
            self.read_byte()?;
        }

        Ok(())
    }

    /// Reads a fixed size run of bytes
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut bytes = [0u8; N];
        for byte in bytes.iter_mut() {
            *byte = self.read_byte()?;
        }

        Ok(bytes)
    }

    /// Reads a big endian 16 bit integer
    pub fn read_u16_be(&mut self) -> Result<u16, DecodeError> {
        self.read_array().map(u16::from_be_bytes)
    }

    /// Fails when `n` exceeds the message ceiling
    fn check_len(&self, n: usize) -> Result<(), DecodeError> {
        if n > self.max_message_len {
            Err(self.error(ErrorKind::MessageTooLong {
                length: n,
                max: self.max_message_len,
            }))
        } else {
            Ok(())
        }
    }
}
