//! Fuzzing tests for the SMF importer
//!
//! Feeds random and deliberately malformed byte blobs into the MIDI file
//! parser to make sure it returns errors instead of panicking.

use melody_studio::project::{export_midi, import_midi};
use melody_studio::sequencer::{Score, Tracks};
use rand::Rng;

/// Pure random bytes must never panic the importer
#[test]
fn fuzz_import_random_bytes() {
    let mut rng = rand::thread_rng();

    for _ in 0..1000 {
        let length = rng.gen_range(1..=512);
        let bytes: Vec<u8> = (0..length).map(|_| rng.gen::<u8>()).collect();

        let _ = import_midi(&bytes);
    }
}

/// Blobs that start with a valid SMF header but degrade into garbage
#[test]
fn fuzz_import_truncated_headers() {
    let mut rng = rand::thread_rng();
    let header: &[u8] = b"MThd\x00\x00\x00\x06\x00\x01\x00\x01\x01\xe0";

    for _ in 0..500 {
        let mut bytes = header.to_vec();
        // Sometimes announce a track chunk, sometimes not
        if rng.gen_bool(0.5) {
            bytes.extend_from_slice(b"MTrk");
            bytes.extend_from_slice(&rng.gen::<u32>().to_be_bytes());
        }
        let tail = rng.gen_range(0..=256);
        bytes.extend((0..tail).map(|_| rng.gen::<u8>()));

        let _ = import_midi(&bytes);
    }
}

/// Valid exports with random single-byte corruption either parse or error,
/// never panic
#[test]
fn fuzz_import_bitflipped_exports() {
    let mut rng = rand::thread_rng();

    let mut tracks = Tracks::new();
    let t = tracks.add_track(Some("Fuzz"));
    let mut score = Score::new();
    for i in 0..16 {
        score.add_note(48 + i, i as f64 * 0.25, 0.25, 100, &t);
    }
    let clean = export_midi(tracks.tracks(), score.notes()).unwrap();

    for _ in 0..500 {
        let mut bytes = clean.clone();
        let flips = rng.gen_range(1..=8);
        for _ in 0..flips {
            let idx = rng.gen_range(0..bytes.len());
            bytes[idx] ^= 1 << rng.gen_range(0..8);
        }

        let _ = import_midi(&bytes);
    }
}

/// Empty and tiny inputs are rejected cleanly
#[test]
fn fuzz_import_degenerate_inputs() {
    assert!(import_midi(&[]).is_err());
    assert!(import_midi(b"M").is_err());
    assert!(import_midi(b"MThd").is_err());
    assert!(import_midi(b"RIFF....WAVE").is_err());
}
