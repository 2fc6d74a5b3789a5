//! Whole file decoding through the public API

use notemidi::{
    chunk::{
        header::{Division, Format},
        track::{TrackEvent, TrackEvents},
    },
    decode_file,
    reader::{ByteCursor, MidiData},
    vlq, DecodeOptions, Decoder, ErrorKind, FilteredEvent,
};
use pretty_assertions::assert_eq;

/// Builds a track body from (delta time, message bytes) pairs
fn track(events: &[(u32, &[u8])]) -> Vec<u8> {
    events
        .iter()
        .flat_map(|(delta, message)| {
            vlq::encode(*delta)
                .into_iter()
                .chain(message.iter().copied())
        })
        .collect()
}

fn chunk(tag: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut bytes = tag.to_vec();
    bytes.extend((body.len() as u32).to_be_bytes());
    bytes.extend(body);
    bytes
}

fn midi_file(format: u16, division: u16, tracks: &[Vec<u8>]) -> Vec<u8> {
    let mut header = format.to_be_bytes().to_vec();
    header.extend((tracks.len() as u16).to_be_bytes());
    header.extend(division.to_be_bytes());

    let mut bytes = chunk(b"MThd", &header);
    for body in tracks {
        bytes.extend(chunk(b"MTrk", body));
    }

    bytes
}

fn note(note_on: bool, note_number: u8, delta_time: u32) -> FilteredEvent {
    FilteredEvent {
        note_on,
        note_number,
        delta_time,
    }
}

#[test]
fn multi_track_file_with_every_event_family() {
    let conductor = track(&[
        (0, &[0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20]),
        (0, &[0xFF, 0x58, 0x04, 0x04, 0x02, 0x18, 0x08]),
        (0, &[0xFF, 0x2F, 0x00]),
    ]);
    let piano = track(&[
        (0, &[0xFF, 0x03, 0x05, b'P', b'i', b'a', b'n', b'o']),
        (0, &[0xC0, 0x00]),
        (0, &[0xB0, 0x07, 0x64]),
        (0, &[0x90, 0x3C, 0x50]),
        (0, &[0x40, 0x50]),
        (240, &[0xE0, 0x00, 0x40]),
        (240, &[0x80, 0x3C, 0x00]),
        (0, &[0x40, 0x00]),
        (0, &[0xFF, 0x2F, 0x00]),
    ]);
    let drums = track(&[
        (0, &[0xF0, 0x05, 0x7E, 0x7F, 0x09, 0x01, 0xF7]),
        (10_000, &[0x99, 0x24, 0x7F]),
        (0, &[0xF8]),
        (0, &[0x89, 0x24, 0x00]),
        (0, &[0xFF, 0x2F, 0x00]),
    ]);

    let bytes = midi_file(1, 480, &[conductor, piano, drums]);
    let result = decode_file(MidiData::new(bytes)).expect("Decode file");

    assert_eq!(result.header.format, Format::MultiTrackSynchronous);
    assert_eq!(result.header.track_count, 3);
    assert_eq!(result.header.division, Division::Ticks(480));
    assert_eq!(
        result.tracks,
        vec![
            vec![],
            vec![
                note(true, 0x3C, 0),
                note(true, 0x40, 0),
                note(false, 0x3C, 240),
                note(false, 0x40, 0),
            ],
            vec![note(true, 0x24, 10_000), note(false, 0x24, 0)],
        ]
    )
}

#[test]
fn smpte_division_is_decoded() {
    let bytes = midi_file(0, 0xE250, &[track(&[(0, &[0xFF, 0x2F, 0x00])])]);
    let result = decode_file(MidiData::new(bytes)).expect("Decode file");

    assert_eq!(
        result.header.division,
        Division::Smpte {
            frames_per_second: 30,
            ticks_per_frame: 0x50
        }
    )
}

#[test]
fn wrong_header_tag_is_rejected() {
    let mut bytes = midi_file(0, 96, &[track(&[(0, &[0xFF, 0x2F, 0x00])])]);
    bytes[..4].copy_from_slice(b"XXXX");

    let err = decode_file(MidiData::new(bytes)).expect_err("Not a MIDI file");
    assert_eq!(
        err.kind(),
        Some(ErrorKind::UnexpectedChunkTag {
            expected: *b"MThd",
            found: *b"XXXX"
        })
    );
    assert_eq!(err.offset(), Some(0))
}

#[test]
fn error_offset_points_into_track() {
    let body = track(&[(0, &[0x90, 0x3C, 0x40]), (0, &[0xB0, 0x07, 0x80])]);
    let bytes = midi_file(0, 96, &[body]);

    let err = Decoder::default()
        .decode(bytes.into_iter())
        .expect_err("Data byte out of range");

    // 14 header bytes, 8 track header bytes, 4 bytes of note on, delta, status, controller
    assert_eq!(err.kind(), Some(ErrorKind::DataByteOutOfRange(0x80)));
    assert_eq!(err.offset(), Some(14 + 8 + 4 + 3));
    assert_eq!(
        err.to_string(),
        "Data byte 0x80 outside of 0..=127 at byte offset 29"
    )
}

#[test]
fn empty_input_is_truncated_header() {
    let err = decode_file(MidiData::default()).expect_err("Nothing to read");

    assert_eq!(err.kind(), Some(ErrorKind::TruncatedChunkHeader))
}

#[test]
fn decoder_reports_its_options() {
    let options = DecodeOptions::default().with_max_message_len(64).with_strict(false);
    let decoder = Decoder::new(options);

    assert_eq!(decoder.options().max_message_len, 64);
    assert!(!decoder.options().strict)
}

#[test]
fn track_events_can_be_walked_directly() {
    let body = track(&[
        (0, &[0xFF, 0x01, 0x02, b'h', b'i']),
        (5, &[0xF7, 0x01, 0xF8]),
        (7, &[0xA0, 0x3C, 0x10]),
    ]);
    let bytes = chunk(b"MTrk", &body);
    let mut cursor = ByteCursor::new(bytes.into_iter());
    let header = notemidi::chunk::expect_tag(&mut cursor, *b"MTrk").expect("Track header");

    let events: Vec<TrackEvent> = TrackEvents::new(&mut cursor, header)
        .collect::<Result<_, _>>()
        .expect("Decode events");
    let deltas: Vec<u32> = events.iter().map(TrackEvent::delta_time).collect();

    assert_eq!(deltas, vec![0, 5, 7]);
    assert!(matches!(events[1], TrackEvent::Sysex { status: 0xF7, .. }));
    assert!(events.iter().all(|event| event.as_note().is_none()))
}
