// Score - the mutable collection of notes and the current selection
// All mutations clamp their inputs; store operations never fail

use crate::sequencer::note::{MIN_DURATION, Note, NoteData, PITCH_MAX, PITCH_MIN};
use std::collections::HashSet;

/// Owns every note in the project plus the set of selected note ids
///
/// The selection is always a subset of the existing note ids; removal
/// operations prune it.
#[derive(Debug, Clone, Default)]
pub struct Score {
    notes: Vec<Note>,
    selection: HashSet<String>,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notes, in insertion order
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Ids of the currently selected notes
    pub fn selection(&self) -> &HashSet<String> {
        &self.selection
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get_note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    /// Add a note, clamping out-of-range fields, and return its fresh id
    ///
    /// New notes start unselected.
    pub fn add_note(
        &mut self,
        pitch: u8,
        start_time: f64,
        duration: f64,
        velocity: u8,
        track_id: &str,
    ) -> String {
        let note = Note::new(pitch, start_time, duration, velocity, track_id);
        let id = note.id.clone();
        self.notes.push(note);
        id
    }

    /// Remove a note and prune it from the selection
    pub fn remove_note(&mut self, id: &str) -> Option<Note> {
        self.selection.remove(id);
        let index = self.notes.iter().position(|n| n.id == id)?;
        Some(self.notes.remove(index))
    }

    /// Remove every selected note, then clear the selection
    pub fn remove_selected(&mut self) {
        let selection = std::mem::take(&mut self.selection);
        self.notes.retain(|n| !selection.contains(&n.id));
    }

    /// Remove every note belonging to a track
    ///
    /// `Tracks::remove_track` deliberately does not cascade; this is the
    /// explicit helper for callers that want orphan cleanup.
    pub fn remove_notes_for_track(&mut self, track_id: &str) {
        self.notes.retain(|n| {
            if n.track_id == track_id {
                self.selection.remove(&n.id);
                false
            } else {
                true
            }
        });
    }

    /// Move a note to a new pitch and start time
    ///
    /// Pitch is clamped to the playable piano range, matching the range
    /// the editing surface can create notes in; start is clamped to >= 0.
    pub fn move_note(&mut self, id: &str, new_pitch: u8, new_start: f64) {
        if let Some(note) = self.notes.iter_mut().find(|n| n.id == id) {
            note.pitch = new_pitch.clamp(PITCH_MIN, PITCH_MAX);
            note.start_time = new_start.max(0.0);
        }
    }

    /// Apply the same pitch/time delta to every selected note
    ///
    /// Each note clamps independently; overlaps are permitted, notes never
    /// block each other.
    pub fn move_selected(&mut self, pitch_delta: i32, time_delta: f64) {
        for note in self.notes.iter_mut() {
            if self.selection.contains(&note.id) {
                let pitch = note.pitch as i32 + pitch_delta;
                note.pitch = pitch.clamp(PITCH_MIN as i32, PITCH_MAX as i32) as u8;
                note.start_time = (note.start_time + time_delta).max(0.0);
            }
        }
    }

    /// Resize a note, clamping the duration to the minimum grid length
    pub fn resize_note(&mut self, id: &str, new_duration: f64) {
        if let Some(note) = self.notes.iter_mut().find(|n| n.id == id) {
            note.duration = new_duration.max(MIN_DURATION);
        }
    }

    /// Select a note
    ///
    /// With `add_to_selection` false the selection becomes exactly `{id}`;
    /// with true, membership of `id` is toggled (multi-select UX).
    pub fn select(&mut self, id: &str, add_to_selection: bool) {
        if !add_to_selection {
            self.selection.clear();
            self.selection.insert(id.to_string());
        } else if !self.selection.remove(id) {
            self.selection.insert(id.to_string());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn select_all(&mut self) {
        self.selection = self.notes.iter().map(|n| n.id.clone()).collect();
    }

    /// Add every note inside a beat/pitch rectangle to the selection
    ///
    /// A note is included if its interval touches `[min_time, max_time]`
    /// and its pitch lies in `[min_pitch, max_pitch]`. Box selection only
    /// ever adds; it never deselects.
    pub fn box_select(&mut self, min_time: f64, max_time: f64, min_pitch: u8, max_pitch: u8) {
        for note in &self.notes {
            if note.end() >= min_time
                && note.start_time <= max_time
                && note.pitch >= min_pitch
                && note.pitch <= max_pitch
            {
                self.selection.insert(note.id.clone());
            }
        }
    }

    /// Notes whose interval `[start_time, end)` overlaps `[start, end)`
    pub fn notes_in_range(&self, start: f64, end: f64) -> Vec<&Note> {
        self.notes.iter().filter(|n| n.overlaps(start, end)).collect()
    }

    /// Adopt generated notes into the score
    ///
    /// With `overlay` false the incoming notes replace the whole score (and
    /// the selection is cleared); with true they are appended. Each incoming
    /// note is re-validated against the Note invariants: invalid ones are
    /// skipped, valid ones get fresh ids and the given track id. Returns the
    /// number of notes adopted.
    pub fn import_generated(
        &mut self,
        incoming: &[NoteData],
        track_id: &str,
        overlay: bool,
    ) -> usize {
        if !overlay {
            self.notes.clear();
            self.selection.clear();
        }

        let mut imported = 0;
        for data in incoming {
            if !data.is_valid() {
                log::debug!(
                    "skipping invalid generated note (pitch {}, start {}, duration {})",
                    data.pitch,
                    data.start_time,
                    data.duration
                );
                continue;
            }
            self.notes.push(Note::new(
                data.pitch,
                data.start_time,
                data.duration,
                data.velocity,
                track_id,
            ));
            imported += 1;
        }
        imported
    }

    /// Replace the whole note collection (project load)
    pub fn replace_notes(&mut self, notes: Vec<Note>) {
        self.notes = notes;
        self.selection.clear();
    }
}
