//! Track chunk decoding
//!
//! A track body is a sequence of events, each a variable length delta time followed by a message.
//! [`TrackEvents`] walks the body as a small state machine:
//!
//! ```text
//! AwaitingDeltaTime -> AwaitingStatus -> DispatchingMessage -> AwaitingDeltaTime | Done
//! ```
//!
//! The end of the track is only checked at `AwaitingDeltaTime`, so events that do not line up with
//! the declared chunk length are reported rather than cut short.

use event::RawEvent;
use status::{ResolvedStatus, RunningStatus, META_STATUS};

use crate::{
    error::{DecodeError, ErrorKind},
    message,
    reader::{ByteCursor, Checkpoint},
    vlq, Chunk,
};

pub use event::{FilteredEvent, TrackEvent};

pub mod event;
pub mod status;

/// Where the decoder is inside the current event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackState {
    /// At an event boundary, the next field is a delta time
    AwaitingDeltaTime,
    /// Delta time read, the next byte is a status or a running status data byte
    AwaitingStatus {
        /// Delta time of the event being read
        delta_time: u32,
    },
    /// Status known, the message body follows
    DispatchingMessage {
        /// Delta time of the event being read
        delta_time: u32,
        /// Resolved status and any data byte consumed while resolving it
        resolved: ResolvedStatus,
        /// Offset of the status position
        offset: usize,
    },
    /// The declared chunk length was reached, or an error was returned
    Done,
}

/// Iterator over the events of one track chunk, reading from a shared cursor
#[derive(Debug)]
pub struct TrackEvents<'a, ITER> {
    /// Source of the chunk body
    cursor: &'a mut ByteCursor<ITER>,
    /// Header of the chunk being read
    chunk: Chunk,
    /// Position of the first body byte
    start: Checkpoint,
    /// Last status seen in this track
    running_status: RunningStatus,
    /// Current decoder state
    state: TrackState,
}

impl<'a, ITER> TrackEvents<'a, ITER>
where
    ITER: Iterator<Item = u8>,
{
    /// Starts decoding the body of `chunk`, which the cursor must be positioned at
    pub fn new(cursor: &'a mut ByteCursor<ITER>, chunk: Chunk) -> Self {
        let start = cursor.checkpoint();
        Self {
            cursor,
            chunk,
            start,
            running_status: RunningStatus::default(),
            state: TrackState::AwaitingDeltaTime,
        }
    }

    /// Decodes the remaining events, keeping only note on and note off
    pub fn notes(self) -> Result<Vec<FilteredEvent>, DecodeError> {
        let mut notes = vec![];

        for event in self {
            if let Some(note) = event?.as_note() {
                notes.push(note);
            }
        }

        Ok(notes)
    }

    /// Drives the state machine until an event is complete or the track ends
    fn next_event(&mut self) -> Result<Option<TrackEvent>, DecodeError> {
        loop {
            self.state = match self.state {
                TrackState::AwaitingDeltaTime => {
                    let consumed = self.cursor.since(self.start);
                    if consumed == self.chunk.len() {
                        TrackState::Done
                    } else if consumed > self.chunk.len() {
                        return Err(self.cursor.error(ErrorKind::ChunkLengthMismatch {
                            declared: self.chunk.length(),
                            consumed,
                        }));
                    } else {
                        TrackState::AwaitingStatus {
                            delta_time: vlq::decode(self.cursor)?,
                        }
                    }
                }

                TrackState::AwaitingStatus { delta_time } => {
                    let offset = self.cursor.position();
                    let candidate = self.cursor.read_byte()?;
                    let resolved = self.running_status.resolve(candidate).ok_or_else(|| {
                        DecodeError::malformed(
                            offset,
                            ErrorKind::RunningStatusWithoutPriorStatus(candidate),
                        )
                    })?;

                    TrackState::DispatchingMessage {
                        delta_time,
                        resolved,
                        offset,
                    }
                }

                TrackState::DispatchingMessage {
                    delta_time,
                    resolved,
                    offset,
                } => {
                    let event = self.dispatch(delta_time, resolved, offset)?;
                    self.state = TrackState::AwaitingDeltaTime;
                    log::trace!("{event:?}");

                    return Ok(Some(event));
                }

                TrackState::Done => return Ok(None),
            }
        }
    }

    /// Reads the body of a message whose status has been resolved
    fn dispatch(
        &mut self,
        delta_time: u32,
        resolved: ResolvedStatus,
        offset: usize,
    ) -> Result<TrackEvent, DecodeError> {
        let ResolvedStatus { status, peeked } = resolved;

        if status == META_STATUS {
            let meta_type = self.cursor.read_byte()?;
            let length = vlq::decode(self.cursor)?;
            self.cursor.skip(length as usize)?;

            return Ok(TrackEvent::Meta {
                delta_time,
                meta_type,
                length,
            });
        }

        let spec = message::lookup(status).map_err(|kind| DecodeError::malformed(offset, kind))?;

        let Some(data_len) = spec.data_len() else {
            // Under a sysex running status the byte at the status position is dropped and the
            // length follows it
            let length = vlq::decode(self.cursor)?;
            self.cursor.skip(length as usize)?;

            return Ok(TrackEvent::Sysex {
                delta_time,
                status,
                length,
            });
        };

        let remaining = data_len.saturating_sub(resolved.peeked_len());
        let data_offset = self.cursor.position();
        let read = self.cursor.read_bytes(remaining)?;

        if let Some(index) = read.iter().position(|byte| *byte >= 0x80) {
            return Err(DecodeError::malformed(
                data_offset + index,
                ErrorKind::DataByteOutOfRange(read[index]),
            ));
        }

        let data = peeked.into_iter().chain(read).collect();

        Ok(TrackEvent::Message(RawEvent {
            delta_time,
            status,
            kind: spec.kind,
            data,
        }))
    }
}

impl<ITER> Iterator for TrackEvents<'_, ITER>
where
    ITER: Iterator<Item = u8>,
{
    type Item = Result<TrackEvent, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_event() {
            Ok(event) => event.map(Ok),
            Err(err) => {
                self.state = TrackState::Done;
                Some(Err(err))
            }
        }
    }
}
