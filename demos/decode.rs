//! Example program that decodes a MIDI file and prints the note events of each track
//!
//! ```sh
//! RUST_LOG=debug cargo run --example decode -- song.mid
//! ```

use std::path::PathBuf;

use clap::Parser;
use notemidi::{decode_file_with, DecodeOptions};

/// Print the note on and note off events of a Standard MIDI File
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// MIDI file to decode
    path: PathBuf,

    /// Largest meta or sysex payload to accept
    #[arg(long, default_value_t = 1000)]
    max_message_len: usize,

    /// Accept single track files that declare several tracks
    #[arg(long)]
    lenient: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let options = DecodeOptions::default()
        .with_max_message_len(args.max_message_len)
        .with_strict(!args.lenient);

    match decode_file_with(&args.path, options) {
        Ok(decoded) => {
            println!("{:?}", decoded.header);
            for (index, track) in decoded.tracks.iter().enumerate() {
                println!("Track {index}: {} notes", track.len());
                for note in track {
                    let state = if note.note_on { "on " } else { "off" };
                    println!("  +{:<6} {state} {}", note.delta_time, note.note_number);
                }
            }
        }
        Err(e) => {
            eprintln!("Failed to decode {}: {e}", args.path.display());
            std::process::exit(1);
        }
    }
}
