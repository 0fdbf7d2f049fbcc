// Player - the multi-track playback scheduler
// A cooperative task: an external driver calls tick() with wall-clock deltas

use crate::sequencer::score::Score;
use crate::sequencer::timeline::beats_to_seconds;
use crate::sequencer::track::Tracks;
use crate::sequencer::transport::TransportState;
use std::collections::{HashMap, HashSet};

/// External sound engine seam
///
/// The player fires note-on triggers through this trait; it never owns the
/// audio path. Implementations must return failures rather than panic, and
/// must tolerate rapid calls.
pub trait NotePlayer {
    /// Trigger one note. Duration is in wall-clock seconds.
    fn play_note(&mut self, pitch: u8, duration_secs: f64, velocity: u8) -> Result<(), String>;

    /// Silence everything currently sounding
    fn stop_all_notes(&mut self);

    /// Set the master volume (0.0-1.0)
    fn set_volume(&mut self, volume: f32);
}

/// The playback scheduler
///
/// Each track advances an independent beat clock at its own tempo. The
/// aggregate `current_time` is the mean of those clocks - a deliberate
/// approximation the playhead relies on. A played-notes set guarantees
/// each note fires exactly once per pass; it resets on stop, seek, and
/// loop-back.
#[derive(Debug, Default)]
pub struct Player {
    state: TransportState,
    /// Per-track beat clocks, keyed by track id
    clocks: HashMap<String, f64>,
    /// Ids of notes already triggered in the current pass
    played: HashSet<String>,
    /// Aggregate position in beats (mean of the track clocks)
    current_time: f64,
    /// Master volume (0.0-1.0)
    volume: f32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            state: TransportState::Stopped,
            clocks: HashMap::new(),
            played: HashSet::new(),
            current_time: 0.0,
            volume: 1.0,
        }
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    /// Aggregate playhead position in beats
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Beat clock of one track (0 if it has not started)
    pub fn track_clock(&self, track_id: &str) -> f64 {
        self.clocks.get(track_id).copied().unwrap_or(0.0)
    }

    /// Stopped/Paused -> Playing. The wall-clock reference lives in the
    /// driver; the player only consumes tick deltas.
    pub fn play(&mut self) {
        self.state = TransportState::Playing;
    }

    /// Playing -> Paused; clocks and the played set survive
    pub fn pause(&mut self) {
        if self.state == TransportState::Playing {
            self.state = TransportState::Paused;
        }
    }

    /// Any state -> Stopped; position and bookkeeping reset
    pub fn stop(&mut self, player: &mut dyn NotePlayer) {
        self.state = TransportState::Stopped;
        self.clocks.clear();
        self.played.clear();
        self.current_time = 0.0;
        player.stop_all_notes();
    }

    /// Jump every track clock to `beat` without changing play/pause state
    ///
    /// The played set is cleared so notes at or after the new position can
    /// re-trigger.
    pub fn seek(&mut self, beat: f64) {
        let beat = beat.max(0.0);
        for clock in self.clocks.values_mut() {
            *clock = beat;
        }
        self.current_time = beat;
        self.played.clear();
    }

    /// Set the master volume and forward it to the sound engine
    pub fn set_volume(&mut self, volume: f32, player: &mut dyn NotePlayer) {
        self.volume = volume.clamp(0.0, 1.0);
        player.set_volume(self.volume);
    }

    /// Advance playback by `delta_seconds` of wall-clock time
    ///
    /// A tick while not Playing is a no-op, which makes a stray late
    /// callback after pause/stop harmless.
    pub fn tick(
        &mut self,
        delta_seconds: f64,
        score: &Score,
        tracks: &Tracks,
        player: &mut dyn NotePlayer,
    ) {
        if self.state != TransportState::Playing {
            return;
        }

        // Tracks removed mid-playback drop out of the bookkeeping; a stale
        // clock would otherwise skew the aggregate and block loop detection.
        self.clocks.retain(|id, _| tracks.get_track(id).is_some());

        let any_solo = tracks.any_solo();

        for track in tracks.tracks() {
            // A track joining mid-pass starts at the aggregate position
            let clock = self.clocks.entry(track.id.clone()).or_insert(self.current_time);
            let old_beat = *clock;
            let new_beat = old_beat + delta_seconds * track.tempo as f64 / 60.0;
            *clock = new_beat;

            // Solo is a global allow-list: with any track soloed, only
            // soloed (and unmuted) tracks sound.
            let audible = !track.muted && (!any_solo || track.solo);
            if !audible {
                continue;
            }

            for note in score.notes() {
                if note.track_id != track.id || self.played.contains(&note.id) {
                    continue;
                }
                // Onset window is half-open [old, new): a note sitting
                // exactly at beat 0 or at a seek target fires.
                if note.start_time >= old_beat && note.start_time < new_beat {
                    self.played.insert(note.id.clone());
                    let duration_secs = beats_to_seconds(note.duration, track.tempo as f64);
                    if let Err(err) = player.play_note(note.pitch, duration_secs, note.velocity) {
                        log::warn!("note trigger failed, playback continues: {err}");
                    }
                }
            }
        }

        self.current_time = if self.clocks.is_empty() {
            0.0
        } else {
            self.clocks.values().sum::<f64>() / self.clocks.len() as f64
        };

        self.check_loop(score);
    }

    /// Seamless loop: once every clock passes the last note's end, rewind
    /// everything to 0 so the pass restarts.
    fn check_loop(&mut self, score: &Score) {
        let end_beat = score
            .notes()
            .iter()
            .map(|n| n.end())
            .fold(0.0_f64, f64::max);
        if end_beat <= 0.0 {
            return;
        }
        if self.clocks.values().all(|&c| c >= end_beat) && !self.clocks.is_empty() {
            for clock in self.clocks.values_mut() {
                *clock = 0.0;
            }
            self.played.clear();
            self.current_time = 0.0;
        }
    }
}
