//! Registry of MIDI messages keyed by status byte
//!
//! The table is built once per process from a short list of message definitions. Channel voice
//! messages (`0x80..=0xEF`) are registered under all 16 of their channel variants, system messages
//! under their single status byte. Bytes `0xF4`, `0xF5`, `0xF9` and `0xFD` are undefined by the
//! protocol and have no entry, nor does any byte below `0x80`.

use std::sync::LazyLock;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

/// Every message kind the registry knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MessageKind {
    /// A note is released
    NoteOff,
    /// A note is depressed
    NoteOn,
    /// Polyphonic key pressure
    PolyTouch,
    /// A controller value changed
    ControlChange,
    /// The patch number changed
    ProgramChange,
    /// Channel pressure
    Aftertouch,
    /// Pitch wheel change, as a fourteen bit value
    PitchWheel,
    /// Start of a system exclusive message
    Sysex,
    /// MIDI time code quarter frame
    QuarterFrame,
    /// Song position pointer
    SongPosition,
    /// Song select
    SongSelect,
    /// Tune request
    TuneRequest,
    /// End of exclusive, or escape sequence inside a file
    SysexEscape,
    /// Timing clock
    Clock,
    /// Start the current sequence
    Start,
    /// Continue the current sequence
    Continue,
    /// Stop the current sequence
    Stop,
    /// Active sensing
    ActiveSensing,
    /// System reset on the wire, meta event prefix inside a file
    Reset,
}

impl MessageKind {
    /// The conventional snake case name of the message
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoteOff => "note_off",
            Self::NoteOn => "note_on",
            Self::PolyTouch => "polytouch",
            Self::ControlChange => "control_change",
            Self::ProgramChange => "program_change",
            Self::Aftertouch => "aftertouch",
            Self::PitchWheel => "pitchwheel",
            Self::Sysex => "sysex",
            Self::QuarterFrame => "quarter_frame",
            Self::SongPosition => "songpos",
            Self::SongSelect => "song_select",
            Self::TuneRequest => "tune_request",
            Self::SysexEscape => "sysex_escape",
            Self::Clock => "clock",
            Self::Start => "start",
            Self::Continue => "continue",
            Self::Stop => "stop",
            Self::ActiveSensing => "active_sensing",
            Self::Reset => "reset",
        }
    }

    /// True for note on and note off, the kinds surfaced by the decoder
    pub fn is_note(&self) -> bool {
        matches!(self, Self::NoteOn | Self::NoteOff)
    }
}

/// Total size of a message, status byte included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MessageLength {
    /// Status byte plus a fixed number of data bytes
    Fixed(usize),
    /// Length carried by the message itself
    Unbounded,
}

/// Static description of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageSpec {
    /// Kind of message
    pub kind: MessageKind,
    /// Names of the values carried, in wire order. Channelled messages start with `channel`,
    /// which lives in the status byte rather than a data byte.
    pub field_names: &'static [&'static str],
    /// Total length, status byte included
    pub length: MessageLength,
}

impl MessageSpec {
    /// Data bytes that follow the status byte, if the length is fixed
    pub fn data_len(&self) -> Option<usize> {
        match self.length {
            MessageLength::Fixed(total) => Some(total - 1),
            MessageLength::Unbounded => None,
        }
    }
}

/// Defines a message spec constant
macro_rules! message_spec {
    ($kind:ident, [$($field:literal),*], $length:expr_2021) => {
        MessageSpec {
            kind: MessageKind::$kind,
            field_names: &[$($field),*],
            length: $length,
        }
    };
}

/// Message definitions as (status, spec) pairs. Channelled entries use the channel 0 status.
const DEFINITIONS: [(u8, MessageSpec); 19] = [
    (0x80, message_spec!(NoteOff, ["channel", "note", "velocity"], MessageLength::Fixed(3))),
    (0x90, message_spec!(NoteOn, ["channel", "note", "velocity"], MessageLength::Fixed(3))),
    (0xA0, message_spec!(PolyTouch, ["channel", "note", "value"], MessageLength::Fixed(3))),
    (0xB0, message_spec!(ControlChange, ["channel", "control", "value"], MessageLength::Fixed(3))),
    (0xC0, message_spec!(ProgramChange, ["channel", "program"], MessageLength::Fixed(2))),
    (0xD0, message_spec!(Aftertouch, ["channel", "value"], MessageLength::Fixed(2))),
    (0xE0, message_spec!(PitchWheel, ["channel", "pitch"], MessageLength::Fixed(3))),
    // System common, 0xF4 and 0xF5 are undefined
    (0xF0, message_spec!(Sysex, ["data"], MessageLength::Unbounded)),
    (0xF1, message_spec!(QuarterFrame, ["frame_type", "frame_value"], MessageLength::Fixed(2))),
    (0xF2, message_spec!(SongPosition, ["pos"], MessageLength::Fixed(3))),
    (0xF3, message_spec!(SongSelect, ["song"], MessageLength::Fixed(2))),
    (0xF6, message_spec!(TuneRequest, [], MessageLength::Fixed(1))),
    (0xF7, message_spec!(SysexEscape, ["data"], MessageLength::Unbounded)),
    // System real time, 0xF9 and 0xFD are undefined
    (0xF8, message_spec!(Clock, [], MessageLength::Fixed(1))),
    (0xFA, message_spec!(Start, [], MessageLength::Fixed(1))),
    (0xFB, message_spec!(Continue, [], MessageLength::Fixed(1))),
    (0xFC, message_spec!(Stop, [], MessageLength::Fixed(1))),
    (0xFE, message_spec!(ActiveSensing, [], MessageLength::Fixed(1))),
    (0xFF, message_spec!(Reset, [], MessageLength::Fixed(1))),
];

/// Lookup table indexed by status byte
pub struct MessageSpecTable {
    /// One slot per possible status byte
    specs: [Option<MessageSpec>; 256],
}

/// The process wide table, built on first use and never mutated afterwards
static TABLE: LazyLock<MessageSpecTable> = LazyLock::new(MessageSpecTable::build);

impl MessageSpecTable {
    /// Shared instance of the table
    pub fn global() -> &'static Self {
        &TABLE
    }

    /// Builds the table from the message definitions
    fn build() -> Self {
        let mut specs = [None; 256];

        for (status, spec) in DEFINITIONS {
            if (0x80..0xF0).contains(&status) {
                for channel in 0..16u8 {
                    specs[(status | channel) as usize] = Some(spec);
                }
            } else {
                specs[status as usize] = Some(spec);
            }
        }

        Self { specs }
    }

    /// Looks up the spec registered for `status`
    pub fn lookup(&self, status: u8) -> Result<&MessageSpec, ErrorKind> {
        self.specs[status as usize]
            .as_ref()
            .ok_or(ErrorKind::UndefinedStatus(status))
    }
}

/// Looks up `status` in the shared table
pub fn lookup(status: u8) -> Result<&'static MessageSpec, ErrorKind> {
    MessageSpecTable::global().lookup(status)
}

#[cfg(test)]
mod tests {
    use super::{lookup, MessageKind, MessageLength, MessageSpecTable};
    use crate::error::ErrorKind;

    #[test]
    fn channel_voice_statuses_cover_every_channel() {
        for channel in 0..16u8 {
            assert_eq!(lookup(0x80 | channel).unwrap().kind, MessageKind::NoteOff);
            assert_eq!(lookup(0x90 | channel).unwrap().kind, MessageKind::NoteOn);
            assert_eq!(lookup(0xA0 | channel).unwrap().kind, MessageKind::PolyTouch);
            assert_eq!(lookup(0xB0 | channel).unwrap().kind, MessageKind::ControlChange);
            assert_eq!(lookup(0xC0 | channel).unwrap().kind, MessageKind::ProgramChange);
            assert_eq!(lookup(0xD0 | channel).unwrap().kind, MessageKind::Aftertouch);
            assert_eq!(lookup(0xE0 | channel).unwrap().kind, MessageKind::PitchWheel);
        }
    }

    #[test]
    fn message_lengths_include_status_byte() {
        assert_eq!(lookup(0x93).unwrap().length, MessageLength::Fixed(3));
        assert_eq!(lookup(0xC7).unwrap().data_len(), Some(1));
        assert_eq!(lookup(0xF2).unwrap().data_len(), Some(2));
        assert_eq!(lookup(0xF8).unwrap().data_len(), Some(0));
        assert_eq!(lookup(0xF0).unwrap().length, MessageLength::Unbounded);
        assert_eq!(lookup(0xF7).unwrap().data_len(), None);
    }

    #[test]
    fn field_names_follow_wire_order() {
        let spec = lookup(0xB5).unwrap();

        assert_eq!(spec.field_names, &["channel", "control", "value"]);
        assert_eq!(lookup(0xF1).unwrap().field_names, &["frame_type", "frame_value"]);
        assert_eq!(spec.kind.name(), "control_change")
    }

    #[test]
    fn undefined_statuses_are_rejected() {
        for status in [0xF4, 0xF5, 0xF9, 0xFD, 0x00, 0x7F] {
            assert_eq!(lookup(status), Err(ErrorKind::UndefinedStatus(status)));
        }
    }

    #[test]
    fn table_has_expected_entry_count() {
        // 7 channelled kinds over 16 channels, plus 12 system statuses
        let table = MessageSpecTable::global();
        let registered = (0..=u8::MAX)
            .filter(|status| table.lookup(*status).is_ok())
            .count();

        assert_eq!(registered, 7 * 16 + 12)
    }

    #[test]
    fn only_note_kinds_are_notes() {
        let notes: Vec<u8> = (0..=u8::MAX)
            .filter(|status| lookup(*status).is_ok_and(|spec| spec.kind.is_note()))
            .collect();

        assert_eq!(notes.len(), 32);
        assert!(notes.iter().all(|status| (0x80..0xA0).contains(status)))
    }
}
