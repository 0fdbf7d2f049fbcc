// Musical scale model - root + mode to MIDI pitch sets

use serde::{Deserialize, Serialize};

/// A musical scale given by a root note name and a mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    /// Root note (e.g., "C", "C#", "Eb")
    pub root: String,
    /// Scale mode ("major" or "minor")
    pub mode: String,
}

impl Scale {
    pub fn new(root: &str, mode: &str) -> Self {
        Self {
            root: root.to_string(),
            mode: mode.to_string(),
        }
    }

    /// All MIDI note numbers belonging to this scale (0-127)
    pub fn midi_notes(&self) -> Vec<u8> {
        let root_offset = Self::note_to_offset(&self.root);
        let intervals: &[i32] = match self.mode.to_lowercase().as_str() {
            "major" => &[0, 2, 4, 5, 7, 9, 11],
            "minor" => &[0, 2, 3, 5, 7, 8, 10],
            _ => &[0, 2, 4, 5, 7, 9, 11], // Default to major
        };

        let mut notes = Vec::new();
        for octave in 0..11 {
            for &interval in intervals {
                let midi_note = (octave * 12) + root_offset + interval;
                if midi_note <= 127 {
                    notes.push(midi_note as u8);
                }
            }
        }
        notes
    }

    /// Whether a pitch belongs to this scale
    pub fn contains(&self, pitch: u8) -> bool {
        self.midi_notes().contains(&pitch)
    }

    /// Convert a note name to its semitone offset (C=0, C#=1, ..., B=11)
    ///
    /// Flat spellings map to their enharmonic sharp; unknown names fall
    /// back to C.
    fn note_to_offset(note: &str) -> i32 {
        match note.to_uppercase().as_str() {
            "C" => 0,
            "C#" | "DB" => 1,
            "D" => 2,
            "D#" | "EB" => 3,
            "E" => 4,
            "F" => 5,
            "F#" | "GB" => 6,
            "G" => 7,
            "G#" | "AB" => 8,
            "A" => 9,
            "A#" | "BB" => 10,
            "B" => 11,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_major_notes() {
        let c_major = Scale::new("C", "major");
        let notes = c_major.midi_notes();

        // C major in the first octave: C(0), D(2), E(4), F(5), G(7), A(9), B(11)
        for pitch in [0, 2, 4, 5, 7, 9, 11] {
            assert!(notes.contains(&pitch), "expected pitch {pitch} in C major");
        }

        // Should NOT contain C#(1)
        assert!(!notes.contains(&1));
    }

    #[test]
    fn test_a_minor_notes() {
        let a_minor = Scale::new("A", "minor");

        // A minor: A, B, C, D, E, F, G
        assert!(a_minor.contains(69)); // A4
        assert!(a_minor.contains(71)); // B4
        assert!(a_minor.contains(72)); // C5
        assert!(!a_minor.contains(70)); // A#4
    }

    #[test]
    fn test_flat_roots_alias_sharps() {
        let eb = Scale::new("Eb", "major");
        let ds = Scale::new("D#", "major");
        assert_eq!(eb.midi_notes(), ds.midi_notes());
    }

    #[test]
    fn test_unknown_mode_defaults_to_major() {
        let weird = Scale::new("C", "phrygian-ish");
        let major = Scale::new("C", "major");
        assert_eq!(weird.midi_notes(), major.midi_notes());
    }

    #[test]
    fn test_mode_is_case_insensitive() {
        let upper = Scale::new("C", "MINOR");
        let lower = Scale::new("C", "minor");
        assert_eq!(upper.midi_notes(), lower.midi_notes());
    }

    #[test]
    fn test_notes_stay_in_midi_range() {
        let b = Scale::new("B", "major");
        assert!(b.midi_notes().iter().all(|&p| p <= 127));
    }
}
