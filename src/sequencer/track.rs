// Tracks - the mutable collection of independently-tempoed tracks
// Each track owns its tempo, mix flags, and a palette color

use serde::{Deserialize, Serialize};

/// Slowest supported tempo in BPM
pub const TEMPO_MIN: u16 = 40;

/// Fastest supported tempo in BPM
pub const TEMPO_MAX: u16 = 240;

/// Fixed palette cycled through as tracks are added
pub const TRACK_COLORS: [&str; 8] = [
    "#e74c3c", "#3498db", "#2ecc71", "#f39c12", "#9b59b6", "#1abc9c", "#e67e22", "#e84393",
];

/// One track of the score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique identifier (UUID v4)
    pub id: String,

    /// Display name
    pub name: String,

    /// Tempo in BPM (40-240); drives this track's beat clock
    pub tempo: u16,

    /// Display color (hex)
    pub color: String,

    /// Mix volume (0.0-1.0)
    pub volume: f32,

    /// Excluded from playback (unless soloed elsewhere, see Player)
    pub muted: bool,

    /// Part of the solo allow-list
    pub solo: bool,
}

impl Track {
    fn new(name: String, color: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            tempo: 120,
            color: color.to_string(),
            volume: 0.8,
            muted: false,
            solo: false,
        }
    }
}

/// Partial update applied by `Tracks::update_track`
///
/// Only the present fields change. Callers pre-validate ranges for fields
/// without a dedicated clamping setter.
#[derive(Debug, Clone, Default)]
pub struct TrackUpdate {
    pub name: Option<String>,
    pub tempo: Option<u16>,
    pub color: Option<String>,
    pub volume: Option<f32>,
    pub muted: Option<bool>,
    pub solo: Option<bool>,
}

/// Owns the track collection and the selected-track reference
///
/// The selected track is a weak id, not an ownership link; it falls back
/// to the first remaining track when its target is removed.
#[derive(Debug, Clone, Default)]
pub struct Tracks {
    tracks: Vec<Track>,
    selected_track_id: String,
}

impl Tracks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn get_track(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Id of the currently selected track ("" when no tracks exist)
    pub fn selected_track_id(&self) -> &str {
        &self.selected_track_id
    }

    pub fn select_track(&mut self, id: &str) {
        if self.get_track(id).is_some() {
            self.selected_track_id = id.to_string();
        }
    }

    /// Add a track with the next palette color and default settings
    ///
    /// Defaults: tempo 120, volume 0.8, unmuted, unsoloed. An omitted name
    /// becomes "Track N". The first track added becomes the selection.
    pub fn add_track(&mut self, name: Option<&str>) -> String {
        let color = TRACK_COLORS[self.tracks.len() % TRACK_COLORS.len()];
        let name = match name {
            Some(n) => n.to_string(),
            None => format!("Track {}", self.tracks.len() + 1),
        };
        let track = Track::new(name, color);
        let id = track.id.clone();
        if self.tracks.is_empty() {
            self.selected_track_id = id.clone();
        }
        self.tracks.push(track);
        id
    }

    /// Remove a track
    ///
    /// If the removed track was selected, the selection falls back to the
    /// first remaining track, or "" when none remain. Notes referencing the
    /// track are NOT removed; see `Score::remove_notes_for_track` for the
    /// explicit cascade.
    pub fn remove_track(&mut self, id: &str) -> Option<Track> {
        let index = self.tracks.iter().position(|t| t.id == id)?;
        let removed = self.tracks.remove(index);
        if self.selected_track_id == id {
            self.selected_track_id = self
                .tracks
                .first()
                .map(|t| t.id.clone())
                .unwrap_or_default();
        }
        Some(removed)
    }

    /// Shallow-merge the present fields of `changes` into a track
    pub fn update_track(&mut self, id: &str, changes: TrackUpdate) {
        if let Some(track) = self.tracks.iter_mut().find(|t| t.id == id) {
            if let Some(name) = changes.name {
                track.name = name;
            }
            if let Some(tempo) = changes.tempo {
                track.tempo = tempo;
            }
            if let Some(color) = changes.color {
                track.color = color;
            }
            if let Some(volume) = changes.volume {
                track.volume = volume;
            }
            if let Some(muted) = changes.muted {
                track.muted = muted;
            }
            if let Some(solo) = changes.solo {
                track.solo = solo;
            }
        }
    }

    /// Set a track's tempo, clamped to the supported BPM range
    pub fn set_tempo(&mut self, id: &str, bpm: u16) {
        if let Some(track) = self.tracks.iter_mut().find(|t| t.id == id) {
            track.tempo = bpm.clamp(TEMPO_MIN, TEMPO_MAX);
        }
    }

    /// Set a track's volume, clamped to [0, 1]
    pub fn set_volume(&mut self, id: &str, volume: f32) {
        if let Some(track) = self.tracks.iter_mut().find(|t| t.id == id) {
            track.volume = volume.clamp(0.0, 1.0);
        }
    }

    pub fn toggle_mute(&mut self, id: &str) {
        if let Some(track) = self.tracks.iter_mut().find(|t| t.id == id) {
            track.muted = !track.muted;
        }
    }

    /// Flip a track's solo flag; several tracks may be soloed at once
    pub fn toggle_solo(&mut self, id: &str) {
        if let Some(track) = self.tracks.iter_mut().find(|t| t.id == id) {
            track.solo = !track.solo;
        }
    }

    /// Whether any track currently has solo enabled
    pub fn any_solo(&self) -> bool {
        self.tracks.iter().any(|t| t.solo)
    }

    /// Replace the whole track collection (project load)
    pub fn replace_tracks(&mut self, tracks: Vec<Track>) {
        self.selected_track_id = tracks.first().map(|t| t.id.clone()).unwrap_or_default();
        self.tracks = tracks;
    }
}
