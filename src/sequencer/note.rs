// Note representation for the sequencer
// A note is a timed MIDI event with pitch, velocity, and an owning track

use serde::{Deserialize, Serialize};

/// Lowest pitch reachable from the editing surface (A0 on a piano)
pub const PITCH_MIN: u8 = 21;

/// Highest pitch reachable from the editing surface (C8 on a piano)
pub const PITCH_MAX: u8 = 108;

/// Shortest duration a note can be resized to, in beats
pub const MIN_DURATION: f64 = 0.25;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// A musical note in the score
///
/// Times are expressed in beats; the owning track's tempo decides how they
/// map to wall-clock seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier (UUID v4)
    pub id: String,

    /// MIDI note number (0-127, where 60 = C4)
    pub pitch: u8,

    /// Start position in beats
    #[serde(rename = "startTime")]
    pub start_time: f64,

    /// Duration in beats (always > 0)
    pub duration: f64,

    /// MIDI velocity (0-127)
    pub velocity: u8,

    /// Id of the track this note belongs to
    #[serde(rename = "trackId")]
    pub track_id: String,
}

impl Note {
    /// Creates a note with a fresh unique id, clamping fields into range
    pub fn new(pitch: u8, start_time: f64, duration: f64, velocity: u8, track_id: &str) -> Self {
        Self {
            id: generate_note_id(),
            pitch: pitch.min(127),
            start_time: start_time.max(0.0),
            duration: if duration > 0.0 { duration } else { MIN_DURATION },
            velocity: velocity.min(127),
            track_id: track_id.to_string(),
        }
    }

    /// End position of this note in beats
    pub fn end(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Check if this note overlaps the half-open beat range `[start, end)`
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        self.start_time < end && self.end() > start
    }

    /// Get the note name (e.g., "C4", "A#5")
    pub fn name(&self) -> String {
        pitch_to_name(self.pitch)
    }
}

/// Generate a fresh unique note id
pub fn generate_note_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Plain note payload without identity or track ownership
///
/// This is the shape melody generation returns and the score re-validates
/// before adopting notes into the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteData {
    pub pitch: u8,
    #[serde(rename = "startTime")]
    pub start_time: f64,
    pub duration: f64,
    pub velocity: u8,
}

impl NoteData {
    /// Check the Note invariants without clamping
    ///
    /// Used on untrusted input (generated melodies), where out-of-range
    /// notes are skipped rather than corrected.
    pub fn is_valid(&self) -> bool {
        self.pitch <= 127 && self.velocity <= 127 && self.start_time >= 0.0 && self.duration > 0.0
    }
}

/// Name for a MIDI pitch (e.g., 60 -> "C4", 21 -> "A0")
pub fn pitch_to_name(pitch: u8) -> String {
    let octave = (pitch / 12) as i32 - 1;
    let note_index = (pitch % 12) as usize;
    format!("{}{}", NOTE_NAMES[note_index], octave)
}

/// Whether the pitch falls on a black key of a piano keyboard
pub fn is_black_key(pitch: u8) -> bool {
    matches!(pitch % 12, 1 | 3 | 6 | 8 | 10)
}

/// Vertical piano-roll position of a pitch (highest pitch at y = 0)
pub fn pitch_to_y(pitch: u8, row_height: f64) -> f64 {
    (PITCH_MAX as f64 - pitch as f64) * row_height
}

/// Pitch for a vertical piano-roll position, clamped to the playable range
pub fn y_to_pitch(y: f64, row_height: f64) -> u8 {
    let pitch = PITCH_MAX as i64 - (y / row_height).floor() as i64;
    pitch.clamp(PITCH_MIN as i64, PITCH_MAX as i64) as u8
}
