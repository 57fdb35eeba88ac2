// Score module
// In-memory note model: timed pitch events, ordered note sequences, parts and songs

pub mod note;
pub mod note_list;
pub mod song;

pub use note::{round_to_quarter, Note, REST_PITCH};
pub use note_list::NoteList;
pub use song::{MelodySource, Part, Song};
