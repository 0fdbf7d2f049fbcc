// Standard MIDI file import/export (SMF format 1, PPQ 480)
//
// The file carries a single header tempo, so multi-tempo projects are
// approximated: each note's beat times are converted to seconds with its
// own track's tempo, then to ticks at the header tempo. The app's own
// player keeps true per-track tempo; only MIDI-reading tools see the
// approximation.

use crate::project::ProjectError;
use crate::sequencer::note::{MIN_DURATION, Note};
use crate::sequencer::timeline::{beats_to_seconds, seconds_to_beats};
use crate::sequencer::track::{TEMPO_MAX, TEMPO_MIN, TRACK_COLORS, Track};
use midly::num::{u4, u7, u15, u24, u28};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};
use std::collections::HashMap;
use std::path::Path;

const TICKS_PER_BEAT: u16 = 480;

/// Encode the score as a standard MIDI file
///
/// One SMF track per non-empty app track, named by a TrackName meta. The
/// tempo header comes from the first exported track.
pub fn export_midi(tracks: &[Track], notes: &[Note]) -> Result<Vec<u8>, ProjectError> {
    let mut notes_by_track: HashMap<&str, Vec<&Note>> = HashMap::new();
    for note in notes {
        notes_by_track.entry(&note.track_id).or_default().push(note);
    }

    let populated: Vec<&Track> = tracks
        .iter()
        .filter(|t| notes_by_track.contains_key(t.id.as_str()))
        .collect();
    if populated.is_empty() {
        return Err(ProjectError::NoNoteData);
    }

    // Single header tempo for the whole file
    let header_bpm = populated[0].tempo;
    let tempo_us = 60_000_000 / header_bpm as u32;

    let mut smf_tracks = Vec::new();
    for (index, track) in populated.iter().enumerate() {
        let mut events: Vec<(u32, TrackEventKind)> = Vec::new();

        if index == 0 {
            events.push((0, TrackEventKind::Meta(MetaMessage::Tempo(u24::new(tempo_us)))));
        }
        events.push((
            0,
            TrackEventKind::Meta(MetaMessage::TrackName(track.name.as_bytes())),
        ));

        for note in &notes_by_track[track.id.as_str()] {
            // Beats -> seconds at the note's own track tempo, seconds ->
            // ticks at the header tempo.
            let start_secs = beats_to_seconds(note.start_time, track.tempo as f64);
            let end_secs = beats_to_seconds(note.end(), track.tempo as f64);
            let start_tick = seconds_to_ticks(start_secs, header_bpm);
            let end_tick = seconds_to_ticks(end_secs, header_bpm);

            let channel = u4::new(0);
            let key = u7::new(note.pitch.min(127));

            events.push((
                start_tick,
                TrackEventKind::Midi {
                    channel,
                    // Velocity 0 would read back as NoteOff, so floor at 1
                    message: MidiMessage::NoteOn {
                        key,
                        vel: u7::new(note.velocity.clamp(1, 127)),
                    },
                },
            ));
            events.push((
                end_tick,
                TrackEventKind::Midi {
                    channel,
                    message: MidiMessage::NoteOff {
                        key,
                        vel: u7::new(0),
                    },
                },
            ));
        }

        // Stable sort keeps NoteOff before a same-tick NoteOn of the next
        // note on the same pitch.
        events.sort_by_key(|(tick, _)| *tick);

        let mut smf_track = Vec::new();
        let mut last_tick: u32 = 0;
        for (tick, kind) in events {
            smf_track.push(TrackEvent {
                delta: u28::new(tick - last_tick),
                kind,
            });
            last_tick = tick;
        }
        smf_track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });
        smf_tracks.push(smf_track);
    }

    let smf = Smf {
        header: Header {
            format: Format::Parallel,
            timing: Timing::Metrical(u15::new(TICKS_PER_BEAT)),
        },
        tracks: smf_tracks,
    };

    let mut buffer = Vec::new();
    // midly reports encode failures as plain strings
    smf.write(&mut buffer).map_err(std::io::Error::other)?;
    Ok(buffer)
}

fn seconds_to_ticks(seconds: f64, header_bpm: u16) -> u32 {
    let beats = seconds_to_beats(seconds, header_bpm as f64);
    (beats * TICKS_PER_BEAT as f64).round() as u32
}

/// Decode a standard MIDI file into tracks and notes
///
/// Each input track containing notes becomes one app track at the header
/// tempo (rounded to integer BPM, clamped to the supported range) with a
/// palette color cycling by track index. Unterminated NoteOns are dropped.
pub fn import_midi(bytes: &[u8]) -> Result<(Vec<Track>, Vec<Note>), ProjectError> {
    let smf = Smf::parse(bytes)?;

    let ticks_per_beat = match smf.header.timing {
        Timing::Metrical(tpb) => tpb.as_int() as f64,
        _ => TICKS_PER_BEAT as f64,
    };

    // First declared tempo governs the whole file; 120 BPM when absent
    let mut tempo_us: u32 = 500_000;
    'scan: for track in &smf.tracks {
        for event in track {
            if let TrackEventKind::Meta(MetaMessage::Tempo(us)) = event.kind {
                tempo_us = us.as_int();
                break 'scan;
            }
        }
    }
    let header_bpm = 60_000_000.0 / tempo_us as f64;
    let track_tempo = (header_bpm.round() as i64)
        .clamp(TEMPO_MIN as i64, TEMPO_MAX as i64) as u16;

    let mut tracks = Vec::new();
    let mut notes = Vec::new();

    for smf_track in &smf.tracks {
        let mut time: u32 = 0;
        let mut name: Option<String> = None;
        let mut pending: HashMap<u8, (f64, u8)> = HashMap::new();
        let mut track_notes: Vec<(u8, f64, f64, u8)> = Vec::new();

        for event in smf_track {
            time += event.delta.as_int();
            // Tick -> seconds at the exact header tempo
            let seconds = time as f64 / ticks_per_beat * tempo_us as f64 / 1_000_000.0;

            match event.kind {
                TrackEventKind::Midi { message, .. } => match message {
                    MidiMessage::NoteOn { key, vel } => {
                        if vel.as_int() > 0 {
                            pending.insert(key.as_int(), (seconds, vel.as_int()));
                        } else if let Some((start, velocity)) = pending.remove(&key.as_int()) {
                            track_notes.push((key.as_int(), start, seconds - start, velocity));
                        }
                    }
                    MidiMessage::NoteOff { key, .. } => {
                        if let Some((start, velocity)) = pending.remove(&key.as_int()) {
                            track_notes.push((key.as_int(), start, seconds - start, velocity));
                        }
                    }
                    _ => {}
                },
                TrackEventKind::Meta(MetaMessage::TrackName(bytes)) => {
                    name = Some(String::from_utf8_lossy(bytes).into_owned());
                }
                _ => {}
            }
        }

        if track_notes.is_empty() {
            continue;
        }

        let index = tracks.len();
        let track = Track {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.unwrap_or_else(|| format!("Track {}", index + 1)),
            tempo: track_tempo,
            color: TRACK_COLORS[index % TRACK_COLORS.len()].to_string(),
            volume: 0.8,
            muted: false,
            solo: false,
        };

        for (pitch, start_secs, duration_secs, velocity) in track_notes {
            let start_time = seconds_to_beats(start_secs, track.tempo as f64);
            let duration =
                seconds_to_beats(duration_secs, track.tempo as f64).max(MIN_DURATION);
            notes.push(Note::new(pitch, start_time, duration, velocity, &track.id));
        }
        tracks.push(track);
    }

    if tracks.is_empty() {
        return Err(ProjectError::NoNoteData);
    }

    log::debug!(
        "imported MIDI file: {} tracks, {} notes, header tempo {} BPM",
        tracks.len(),
        notes.len(),
        track_tempo
    );
    Ok((tracks, notes))
}

/// Write the score to a .mid file
pub fn save_midi_file(path: &Path, tracks: &[Track], notes: &[Note]) -> Result<(), ProjectError> {
    let bytes = export_midi(tracks, notes)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Read a .mid file into tracks and notes
pub fn load_midi_file(path: &Path) -> Result<(Vec<Track>, Vec<Note>), ProjectError> {
    let bytes = std::fs::read(path)?;
    import_midi(&bytes)
}
