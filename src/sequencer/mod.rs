// Sequencer - note/track model, musical time, and the playback scheduler

pub mod note;
pub mod player;
pub mod scale;
pub mod score;
pub mod timeline;
pub mod track;
pub mod transport;

pub use note::{Note, NoteData, is_black_key, pitch_to_name, pitch_to_y, y_to_pitch};
pub use player::{NotePlayer, Player};
pub use scale::Scale;
pub use score::Score;
pub use timeline::{
    beats_to_pixels, beats_to_seconds, pixels_to_beats, seconds_to_beats, snap_to_grid,
};
pub use track::{Track, TrackUpdate, Tracks};
pub use transport::TransportState;
