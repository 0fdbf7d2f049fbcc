// Quick demonstration of the sequencer core
// Run with: cargo run --bin demo_playback

use melody_studio::project::{load_midi_file, load_project_file, save_midi_file, save_project_file};
use melody_studio::sequencer::{NotePlayer, Player, Score, Tracks, pitch_to_name};
use std::time::Instant;

/// Console "sound engine": prints every trigger instead of synthesizing
struct ConsolePlayer;

impl NotePlayer for ConsolePlayer {
    fn play_note(&mut self, pitch: u8, duration_secs: f64, velocity: u8) -> Result<(), String> {
        println!(
            "   ♪ {} (pitch {}, {:.3}s, velocity {})",
            pitch_to_name(pitch),
            pitch,
            duration_secs,
            velocity
        );
        Ok(())
    }

    fn stop_all_notes(&mut self) {
        println!("   ■ all notes off");
    }

    fn set_volume(&mut self, volume: f32) {
        println!("   🔊 volume {volume:.2}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("🎵 Melody Studio - Sequencer Core Demo");
    println!("======================================");

    // Two tracks at independent tempos
    let mut tracks = Tracks::new();
    let lead = tracks.add_track(Some("Lead"));
    let bass = tracks.add_track(Some("Bass"));
    tracks.set_tempo(&lead, 120);
    tracks.set_tempo(&bass, 60);

    let mut score = Score::new();
    // A little C major phrase on the lead
    for (i, pitch) in [60u8, 64, 67, 72].iter().enumerate() {
        score.add_note(*pitch, i as f64, 0.5, 100, &lead);
    }
    // Slow roots underneath
    score.add_note(36, 0.0, 2.0, 90, &bass);
    score.add_note(43, 2.0, 2.0, 90, &bass);

    println!(
        "✅ Built score: {} notes across {} tracks",
        score.note_count(),
        tracks.track_count()
    );

    // Drive the scheduler off the real clock for a couple of seconds
    println!("\n▶ Playing for 2 seconds…");
    let mut player = Player::new();
    let mut engine = ConsolePlayer;
    player.play();

    let started = Instant::now();
    let mut last = started;
    while started.elapsed().as_secs_f64() < 2.0 {
        let now = Instant::now();
        player.tick(now.duration_since(last).as_secs_f64(), &score, &tracks, &mut engine);
        last = now;
        std::thread::sleep(std::time::Duration::from_millis(16));
    }
    player.stop(&mut engine);
    println!("   playhead returned to beat {:.1}", player.current_time());

    // Round-trip the project through both file formats
    let dir = std::env::temp_dir();
    let json_path = dir.join("demo_project.json");
    let midi_path = dir.join("demo_project.mid");

    save_project_file(&json_path, "Demo Project", tracks.tracks(), score.notes())?;
    println!("\n💾 Saved project JSON to {}", json_path.display());

    let loaded = load_project_file(&json_path)?;
    assert_eq!(loaded.notes.len(), score.note_count());
    assert_eq!(loaded.tracks.len(), tracks.track_count());
    println!("📂 Reloaded {} notes / {} tracks", loaded.notes.len(), loaded.tracks.len());

    save_midi_file(&midi_path, tracks.tracks(), score.notes())?;
    println!("💾 Saved MIDI file to {}", midi_path.display());

    let (midi_tracks, midi_notes) = load_midi_file(&midi_path)?;
    println!(
        "📂 Re-imported MIDI: {} tracks, {} notes",
        midi_tracks.len(),
        midi_notes.len()
    );

    std::fs::remove_file(&json_path)?;
    std::fs::remove_file(&midi_path)?;
    println!("\n🧹 Cleaned up demo files");

    println!("\n🎉 Demo completed successfully!");
    Ok(())
}
