//! Error types raised while decoding a MIDI file
//!
//! Every structural problem is reported as an [`ErrorKind`] paired with the byte offset (counted
//! from the start of the input) where it was detected. Decoding stops at the first error.

use thiserror::Error;

/// The specific structural violation found in the input
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source ran out of bytes in the middle of a field
    #[error("Unexpected end of input")]
    UnexpectedEndOfInput,
    /// Fewer than 8 bytes were left where a chunk header was expected
    #[error("Truncated chunk header")]
    TruncatedChunkHeader,
    /// A chunk tag did not match the tag required at this position
    #[error("Expected chunk tag {}, found {}", tag_str(.expected), tag_str(.found))]
    UnexpectedChunkTag {
        /// Tag that was required
        expected: [u8; 4],
        /// Tag that was read
        found: [u8; 4],
    },
    /// The header chunk is shorter than its mandatory 6 byte payload
    #[error("Unsupported header chunk size {0}, expected at least 6")]
    UnsupportedHeaderSize(u32),
    /// The header format field is not 0, 1 or 2
    #[error("Invalid file format type {0}")]
    InvalidFormatType(u16),
    /// A single track file declared some other number of tracks
    #[error("Single track file declares {0} tracks")]
    TrackCountMismatch(u16),
    /// The status byte has no registered message
    #[error("Undefined status byte 0x{0:02X}")]
    UndefinedStatus(u8),
    /// A data byte showed up where a status byte was expected, with no status to reuse
    #[error("Running status byte 0x{0:02X} without a prior status")]
    RunningStatusWithoutPriorStatus(u8),
    /// A message data byte has its high bit set
    #[error("Data byte 0x{0:02X} outside of 0..=127")]
    DataByteOutOfRange(u8),
    /// A byte run is longer than the configured ceiling
    #[error("Message length {length} exceeds maximum length {max}")]
    MessageTooLong {
        /// Requested length
        length: usize,
        /// Configured ceiling
        max: usize,
    },
    /// A variable length quantity continued past 4 bytes
    #[error("Variable length quantity longer than 4 bytes")]
    VariableLengthTooLong,
    /// Events inside a track chunk ran past its declared length
    #[error("Track events consumed {consumed} bytes of a {declared} byte chunk")]
    ChunkLengthMismatch {
        /// Declared chunk length
        declared: u32,
        /// Bytes actually consumed at the event boundary
        consumed: usize,
    },
}

/// Error returned by the decoder
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The input is not a well formed MIDI file
    #[error("{kind} at byte offset {offset}")]
    Malformed {
        /// Byte offset from the start of the input
        offset: usize,
        /// What went wrong
        kind: ErrorKind,
    },
    /// The source could not be opened or read
    #[error("Failed to read MIDI source")]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// Creates a structural error at the given offset
    pub fn malformed(offset: usize, kind: ErrorKind) -> Self {
        Self::Malformed { offset, kind }
    }

    /// The structural error kind, if this is not an I/O failure
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Malformed { kind, .. } => Some(*kind),
            Self::Io(_) => None,
        }
    }

    /// The byte offset of a structural error
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Malformed { offset, .. } => Some(*offset),
            Self::Io(_) => None,
        }
    }
}

impl From<std::convert::Infallible> for DecodeError {
    fn from(value: std::convert::Infallible) -> Self {
        match value {}
    }
}

/// Renders a chunk tag, replacing non-ASCII bytes
fn tag_str(tag: &[u8; 4]) -> String {
    String::from_utf8_lossy(tag).into_owned()
}
