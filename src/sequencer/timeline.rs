// Timeline - Musical time conversions
// Handles conversion between beats, seconds, and piano-roll pixels

/// Convert beats to horizontal pixels
pub fn beats_to_pixels(beats: f64, px_per_beat: f64) -> f64 {
    beats * px_per_beat
}

/// Convert horizontal pixels back to beats
pub fn pixels_to_beats(pixels: f64, px_per_beat: f64) -> f64 {
    pixels / px_per_beat
}

/// Duration of `beats` in seconds at the given tempo
pub fn beats_to_seconds(beats: f64, bpm: f64) -> f64 {
    assert!(bpm > 0.0, "BPM must be positive");
    beats * 60.0 / bpm
}

/// Number of beats covered by `seconds` at the given tempo
pub fn seconds_to_beats(seconds: f64, bpm: f64) -> f64 {
    assert!(bpm > 0.0, "BPM must be positive");
    seconds * bpm / 60.0
}

/// Snap a beat value to the nearest grid subdivision
/// Example: division = 4 snaps to sixteenth-note positions (1/4 beat)
///
/// Uses round-half-away-from-zero so move and resize land on the same
/// grid lines.
pub fn snap_to_grid(value: f64, division: u32) -> f64 {
    assert!(division > 0, "Grid division must be > 0");
    let division = division as f64;
    (value * division).round() / division
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beats_pixels_round_trip() {
        let px = beats_to_pixels(2.5, 40.0);
        assert_eq!(px, 100.0);
        assert_eq!(pixels_to_beats(px, 40.0), 2.5);
    }

    #[test]
    fn test_beats_to_seconds() {
        // At 120 BPM, one beat = 0.5s
        assert_eq!(beats_to_seconds(1.0, 120.0), 0.5);
        // At 60 BPM, beats and seconds coincide
        assert_eq!(beats_to_seconds(3.0, 60.0), 3.0);
        assert_eq!(seconds_to_beats(0.5, 120.0), 1.0);
    }

    #[test]
    fn test_seconds_beats_round_trip() {
        let beats = 7.25;
        let secs = beats_to_seconds(beats, 97.0);
        assert!((seconds_to_beats(secs, 97.0) - beats).abs() < 1e-12);
    }

    #[test]
    fn test_snap_to_grid() {
        // division = 4: grid lines every 0.25 beats
        assert_eq!(snap_to_grid(0.26, 4), 0.25);
        assert_eq!(snap_to_grid(0.13, 4), 0.25);
        assert_eq!(snap_to_grid(0.12, 4), 0.0);

        // Exact multiples are stable
        assert_eq!(snap_to_grid(1.0, 4), 1.0);
        assert_eq!(snap_to_grid(0.75, 4), 0.75);
    }

    #[test]
    fn test_snap_rounds_half_away_from_zero() {
        // 0.125 sits exactly between 0.0 and 0.25
        assert_eq!(snap_to_grid(0.125, 4), 0.25);
        assert_eq!(snap_to_grid(0.375, 4), 0.5);
    }

    #[test]
    fn test_snap_whole_beats() {
        assert_eq!(snap_to_grid(2.4, 1), 2.0);
        assert_eq!(snap_to_grid(2.5, 1), 3.0);
    }

    #[test]
    #[should_panic(expected = "BPM must be positive")]
    fn test_zero_bpm_panics() {
        beats_to_seconds(1.0, 0.0);
    }
}
