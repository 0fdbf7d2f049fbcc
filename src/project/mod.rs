// Project persistence - versioned JSON project files and standard MIDI files

pub mod midi_file;
pub mod serialization;

use crate::sequencer::note::Note;
use crate::sequencer::track::Track;
use serde::{Deserialize, Serialize};

pub use midi_file::{export_midi, import_midi, load_midi_file, save_midi_file};
pub use serialization::{export_json, import_json, load_project_file, save_project_file};

/// Current project file format version
pub const PROJECT_VERSION: &str = "2.0.0";

/// Project error types
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("Project validation failed: {0}")]
    ValidationFailed(String),

    #[error("MIDI file contains no note data")]
    NoNoteData,

    #[error("MIDI parse error: {0}")]
    Midi(#[from] midly::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// On-disk project snapshot
///
/// A verbatim structural serialization of the track and note collections,
/// stamped with a name, creation time, and format version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectData {
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub tracks: Vec<Track>,
    pub notes: Vec<Note>,
    pub version: String,
}

impl ProjectData {
    /// Snapshot the current stores under a project name
    pub fn new(name: &str, tracks: &[Track], notes: &[Note]) -> Self {
        Self {
            name: name.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            tracks: tracks.to_vec(),
            notes: notes.to_vec(),
            version: PROJECT_VERSION.to_string(),
        }
    }
}

/// Validate a parsed project before it is adopted
///
/// Structural problems (missing arrays, wrong types) already failed at the
/// JSON parse; this walks the value ranges and aborts on the first offender,
/// naming its index. No partial load happens on failure.
pub fn validate_project(project: &ProjectData) -> Result<(), ProjectError> {
    for (index, track) in project.tracks.iter().enumerate() {
        if track.id.is_empty() {
            return Err(ProjectError::ValidationFailed(format!(
                "track {index} has an empty id"
            )));
        }
        if track.tempo == 0 {
            return Err(ProjectError::ValidationFailed(format!(
                "track {index} has tempo 0"
            )));
        }
        if !(0.0..=1.0).contains(&track.volume) {
            return Err(ProjectError::ValidationFailed(format!(
                "track {index} volume {} outside 0.0-1.0",
                track.volume
            )));
        }
    }

    for (index, note) in project.notes.iter().enumerate() {
        if note.pitch > 127 {
            return Err(ProjectError::ValidationFailed(format!(
                "note {index} pitch {} exceeds MIDI range (0-127)",
                note.pitch
            )));
        }
        if note.velocity > 127 {
            return Err(ProjectError::ValidationFailed(format!(
                "note {index} velocity {} exceeds MIDI range (0-127)",
                note.velocity
            )));
        }
        if note.start_time < 0.0 {
            return Err(ProjectError::ValidationFailed(format!(
                "note {index} has negative start time {}",
                note.start_time
            )));
        }
        if note.duration <= 0.0 {
            return Err(ProjectError::ValidationFailed(format!(
                "note {index} has non-positive duration {}",
                note.duration
            )));
        }
    }

    Ok(())
}
