// NoteList - An ordered, mutable sequence of notes
// Only meaningful as a total order on offset; ties keep their source order

use serde::{Deserialize, Serialize};

use super::note::Note;

/// An ordered sequence of notes.
///
/// After extraction a `NoteList` satisfies the sequence invariant: adjacent
/// notes never overlap in time (touching is allowed). Before extraction it
/// may hold arbitrary polyphonic material.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteList {
    /// Notes in iteration order
    pub notes: Vec<Note>,
}

impl NoteList {
    /// Create an empty list.
    pub fn new() -> Self {
        NoteList { notes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Append a note at the end of the list.
    pub fn push(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// Append all notes of `other`, keeping their order.
    pub fn extend_from(&mut self, other: &NoteList) {
        self.notes.extend_from_slice(&other.notes);
    }

    /// Sort by offset. The sort is stable, so notes at the same offset keep
    /// their source order.
    pub fn sort_by_offset(&mut self) {
        self.notes.sort_by(|a, b| {
            a.offset
                .partial_cmp(&b.offset)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// Whether no two adjacent notes overlap in time.
    ///
    /// This is the postcondition of the skyline extractor: for every adjacent
    /// pair, the first note ends at or before the second one starts.
    pub fn is_sequence(&self) -> bool {
        self.notes
            .windows(2)
            .all(|pair| pair[0].end() <= pair[1].offset)
    }

    pub fn first(&self) -> Option<&Note> {
        self.notes.first()
    }

    pub fn last(&self) -> Option<&Note> {
        self.notes.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }
}

impl From<Vec<Note>> for NoteList {
    fn from(notes: Vec<Note>) -> Self {
        NoteList { notes }
    }
}

impl<'a> IntoIterator for &'a NoteList {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}
