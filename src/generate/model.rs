// Request/response model for melody generation, with explicit validation

use crate::generate::GenerateError;
use crate::generate::provider::Provider;
use crate::sequencer::note::NoteData;
use crate::sequencer::scale::Scale;
use serde::{Deserialize, Serialize};

/// Request for melody generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MelodyRequest {
    /// User's prompt describing the desired melody
    pub prompt: String,

    /// Optional scale constraint
    pub scale: Option<Scale>,

    /// Number of measures to generate (1-16)
    pub measures: u32,

    /// Backend to use
    pub provider: Provider,

    /// Sampling temperature (0.0-2.0, default 1.0)
    pub temperature: Option<f32>,
}

impl Default for MelodyRequest {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            scale: None,
            measures: 4,
            provider: Provider::OpenAI,
            temperature: Some(1.0),
        }
    }
}

impl MelodyRequest {
    /// Check the request preconditions before dispatch
    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.prompt.is_empty() || self.prompt.chars().count() > 1000 {
            return Err(GenerateError::InvalidRequest(
                "prompt must be 1-1000 characters".to_string(),
            ));
        }
        if !(1..=16).contains(&self.measures) {
            return Err(GenerateError::InvalidRequest(
                "measures must be 1-16".to_string(),
            ));
        }
        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(GenerateError::InvalidRequest(
                    "temperature must be 0.0-2.0".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Metadata about one generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationMetadata {
    pub provider: Provider,

    /// RFC 3339 timestamp of the generation
    pub timestamp: String,

    /// Model name/version (e.g., "gpt-4", "gemini-pro")
    #[serde(rename = "modelName")]
    pub model_name: String,

    pub temperature: f32,

    pub scale: Option<Scale>,
}

/// Response from melody generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MelodyResponse {
    pub notes: Vec<NoteData>,
    pub metadata: GenerationMetadata,
}

impl MelodyResponse {
    /// Validate the generated notes against the request constraints
    ///
    /// Every note must satisfy the Note invariants, end within the
    /// requested measure count (4 beats per measure), and, when a scale was
    /// requested, use only pitches from it. The first violation aborts,
    /// naming the note index.
    pub fn validate(&self, measures: u32, scale: Option<&Scale>) -> Result<(), GenerateError> {
        let max_beats = measures as f64 * 4.0;
        let scale_notes = scale.map(|s| s.midi_notes());

        for (index, note) in self.notes.iter().enumerate() {
            if !note.is_valid() {
                return Err(GenerateError::InvalidResponse(format!(
                    "note {index} violates pitch/velocity/timing bounds"
                )));
            }
            if note.start_time + note.duration > max_beats {
                return Err(GenerateError::InvalidResponse(format!(
                    "note {index} extends past the requested {measures} measures"
                )));
            }
            if let Some(allowed) = &scale_notes {
                if !allowed.contains(&note.pitch) {
                    return Err(GenerateError::InvalidResponse(format!(
                        "note {index} pitch {} is outside the requested scale",
                        note.pitch
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> MelodyRequest {
        MelodyRequest {
            prompt: "a gentle melody".to_string(),
            ..Default::default()
        }
    }

    fn response(notes: Vec<NoteData>) -> MelodyResponse {
        MelodyResponse {
            notes,
            metadata: GenerationMetadata {
                provider: Provider::OpenAI,
                timestamp: chrono::Utc::now().to_rfc3339(),
                model_name: "test-model".to_string(),
                temperature: 1.0,
                scale: None,
            },
        }
    }

    fn note(pitch: u8, start: f64, duration: f64) -> NoteData {
        NoteData {
            pitch,
            start_time: start,
            duration,
            velocity: 100,
        }
    }

    #[test]
    fn test_request_defaults_are_valid() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_request_rejects_bad_prompt() {
        let mut r = request();
        r.prompt = String::new();
        assert!(matches!(r.validate(), Err(GenerateError::InvalidRequest(_))));

        r.prompt = "x".repeat(1001);
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_prompt_bound_counts_characters_not_bytes() {
        let mut r = request();
        // 1000 two-byte characters stay within the bound
        r.prompt = "é".repeat(1000);
        assert!(r.validate().is_ok());

        r.prompt = "é".repeat(1001);
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_request_rejects_bad_measures() {
        let mut r = request();
        r.measures = 0;
        assert!(r.validate().is_err());
        r.measures = 17;
        assert!(r.validate().is_err());
        r.measures = 16;
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_request_rejects_bad_temperature() {
        let mut r = request();
        r.temperature = Some(2.5);
        assert!(r.validate().is_err());
        r.temperature = Some(0.0);
        assert!(r.validate().is_ok());
        r.temperature = None;
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_response_accepts_notes_within_bounds() {
        let resp = response(vec![note(60, 0.0, 1.0), note(64, 15.0, 1.0)]);
        assert!(resp.validate(4, None).is_ok());
    }

    #[test]
    fn test_response_rejects_note_past_measure_bound() {
        // 4 measures = 16 beats; this note ends at 16.5
        let resp = response(vec![note(60, 0.0, 1.0), note(64, 15.5, 1.0)]);
        let err = resp.validate(4, None).unwrap_err();
        assert!(err.to_string().contains("note 1"));
    }

    #[test]
    fn test_response_rejects_invalid_note() {
        let resp = response(vec![note(60, 0.0, 0.0)]);
        let err = resp.validate(4, None).unwrap_err();
        assert!(err.to_string().contains("note 0"));
    }

    #[test]
    fn test_response_rejects_pitch_outside_scale() {
        let c_major = Scale::new("C", "major");
        // C#5 (61) is not in C major
        let resp = response(vec![note(60, 0.0, 1.0), note(61, 1.0, 1.0)]);
        let err = resp.validate(4, Some(&c_major)).unwrap_err();
        assert!(err.to_string().contains("note 1"));
        assert!(err.to_string().contains("scale"));
    }
}
