// Leadline - Lead melody extraction for polyphonic scores
// Module declarations

pub mod extract;
pub mod pipeline;
pub mod score;
pub mod segment;
pub mod settings;

pub use extract::{filter_and_extract, skyline};
pub use pipeline::{process_song, MelodySegment, SongMelodies};
pub use score::{MelodySource, Note, NoteList, Part, Song, REST_PITCH};
pub use settings::ExtractSettings;
