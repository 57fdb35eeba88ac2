// Part and Song containers, plus the normalized extractor input
// A Part is one voice of a Song; both expose an order-merged notes() view

use serde::{Deserialize, Serialize};

use super::note::{round_to_quarter, Note};
use super::note_list::NoteList;

/// One voice or instrument line of a song.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Id stamped onto every note of this part
    pub id: u32,

    /// Instrument or voice name from the source score
    pub name: String,

    /// Notes in insertion order
    pub notes: NoteList,
}

impl Part {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Part {
            id,
            name: name.into(),
            notes: NoteList::new(),
        }
    }

    /// Insert a note, quantizing offset and length to the quarter-beat grid
    /// and tagging it with this part's id.
    pub fn insert(&mut self, offset: f64, length: f64, pitch: f64, volume: f64) {
        self.notes.push(Note::new(
            round_to_quarter(offset),
            round_to_quarter(length),
            pitch,
            volume,
            self.id,
        ));
    }

    /// Insert a pre-built note without quantization.
    pub fn push_raw(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// A fresh offset-ordered copy of this part's notes.
    pub fn notes(&self) -> NoteList {
        let mut notes = self.notes.clone();
        notes.sort_by_offset();
        notes
    }
}

/// An ordered collection of parts belonging to one piece.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Source identifier, typically the path of the originating score file
    pub id: String,

    pub parts: Vec<Part>,
}

impl Song {
    pub fn new(id: impl Into<String>) -> Self {
        Song {
            id: id.into(),
            parts: Vec::new(),
        }
    }

    pub fn push_part(&mut self, part: Part) {
        self.parts.push(part);
    }

    /// A fresh offset-ordered merge of all parts' notes.
    ///
    /// The merge is stable: notes at equal offsets keep part order, which is
    /// what the extractor's tie-break rules rely on.
    pub fn notes(&self) -> NoteList {
        let mut merged = NoteList::new();
        for part in &self.parts {
            merged.extend_from(&part.notes);
        }
        merged.sort_by_offset();
        merged
    }
}

/// Input accepted by the skyline extractor.
///
/// Every accepted shape reduces to one owned, ordered `NoteList` before the
/// algorithm runs, so the extractor never aliases caller-owned storage.
#[derive(Debug, Clone, PartialEq)]
pub enum MelodySource {
    /// A raw note list, consumed in its given order
    Notes(NoteList),

    /// A single part, normalized through its ordered view
    Part(Part),

    /// A whole song, normalized through its ordered merge
    Song(Song),

    /// Any mixture of the above, concatenated and re-sorted
    Many(Vec<MelodySource>),
}

impl MelodySource {
    /// Reduce to one owned note list.
    ///
    /// A `Notes` source is taken as-is and deliberately not re-sorted; the
    /// caller's ordering is part of the contract. `Part` and `Song` already
    /// produce ordered fresh copies. `Many` concatenates its children and
    /// re-sorts the result, stable on offset ties.
    pub fn into_notes(self) -> NoteList {
        match self {
            MelodySource::Notes(notes) => notes,
            MelodySource::Part(part) => part.notes(),
            MelodySource::Song(song) => song.notes(),
            MelodySource::Many(sources) => {
                let mut merged = NoteList::new();
                for source in sources {
                    merged.extend_from(&source.into_notes());
                }
                merged.sort_by_offset();
                merged
            }
        }
    }
}

impl From<NoteList> for MelodySource {
    fn from(notes: NoteList) -> Self {
        MelodySource::Notes(notes)
    }
}

impl From<&NoteList> for MelodySource {
    fn from(notes: &NoteList) -> Self {
        MelodySource::Notes(notes.clone())
    }
}

impl From<Part> for MelodySource {
    fn from(part: Part) -> Self {
        MelodySource::Part(part)
    }
}

impl From<&Part> for MelodySource {
    fn from(part: &Part) -> Self {
        MelodySource::Part(part.clone())
    }
}

impl From<Song> for MelodySource {
    fn from(song: Song) -> Self {
        MelodySource::Song(song)
    }
}

impl From<&Song> for MelodySource {
    fn from(song: &Song) -> Self {
        MelodySource::Song(song.clone())
    }
}

impl From<Vec<MelodySource>> for MelodySource {
    fn from(sources: Vec<MelodySource>) -> Self {
        MelodySource::Many(sources)
    }
}

impl From<Vec<NoteList>> for MelodySource {
    fn from(lists: Vec<NoteList>) -> Self {
        MelodySource::Many(lists.into_iter().map(MelodySource::Notes).collect())
    }
}
