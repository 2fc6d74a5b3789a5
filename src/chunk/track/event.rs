//! Decoded track events

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::message::MessageKind;

/// A note on or note off, the only event surfaced past the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilteredEvent {
    /// True for note on, false for note off. A note on with velocity 0 stays a note on.
    pub note_on: bool,
    /// Note key, 0-127
    pub note_number: u8,
    /// Ticks since the previous event in the same track
    pub delta_time: u32,
}

/// A channel voice or system message, status byte resolved
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawEvent {
    /// Ticks since the previous event in the same track
    pub delta_time: u32,
    /// Status byte, the running status when the message omitted it
    pub status: u8,
    /// Kind registered for the status
    pub kind: MessageKind,
    /// Data bytes, each 0-127
    pub data: Vec<u8>,
}

impl RawEvent {
    /// Converts a note on or note off into a [`FilteredEvent`]
    pub fn as_note(&self) -> Option<FilteredEvent> {
        if !self.kind.is_note() {
            return None;
        }

        self.data.first().map(|&note_number| FilteredEvent {
            note_on: self.kind == MessageKind::NoteOn,
            note_number,
            delta_time: self.delta_time,
        })
    }
}

/// Any event that may occur inside a track
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrackEvent {
    /// A channel voice, system common or system real time message
    Message(RawEvent),
    /// A meta event, payload skipped
    Meta {
        /// Ticks since the previous event
        delta_time: u32,
        /// Meta event type byte
        meta_type: u8,
        /// Length of the skipped payload
        length: u32,
    },
    /// A system exclusive or escape event, payload skipped
    Sysex {
        /// Ticks since the previous event
        delta_time: u32,
        /// `0xF0` or `0xF7`
        status: u8,
        /// Length of the skipped payload
        length: u32,
    },
}

impl TrackEvent {
    /// Ticks since the previous event
    pub fn delta_time(&self) -> u32 {
        match self {
            Self::Message(raw) => raw.delta_time,
            Self::Meta { delta_time, .. } | Self::Sysex { delta_time, .. } => *delta_time,
        }
    }

    /// The note this event carries, if it is a note on or note off
    pub fn as_note(&self) -> Option<FilteredEvent> {
        match self {
            Self::Message(raw) => raw.as_note(),
            _ => None,
        }
    }
}
