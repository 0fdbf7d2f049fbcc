// Melody Studio - Library exports for tests and benchmarks

pub mod generate;
pub mod project;
pub mod sequencer;
pub mod settings;

// Re-export commonly used types for convenience
pub use generate::{
    GenerateError, GenerationService, MelodyGenerator, MelodyRequest, MelodyResponse, Provider,
    RateLimiter,
};
pub use project::{ProjectData, ProjectError};
pub use sequencer::{
    Note, NoteData, NotePlayer, Player, Scale, Score, Track, TrackUpdate, Tracks, TransportState,
};
pub use settings::GenerationSettings;
