// Rest splitting and minimum-length pruning
// Cuts a melody into runs at long silences and drops runs too short to train on

use crate::score::NoteList;

/// Split a melody at rests longer than `max_rest` beats and keep only runs
/// long enough to be worth training on.
///
/// A boundary falls between two adjacent notes whenever the silence between
/// the first one's end and the second one's onset exceeds `max_rest`. A run
/// `[i1, i2)` survives only when
/// `notes[i1].end() + min_melody_length <= notes[i2 - 1].offset`: the length
/// check runs up to the last note's *onset*, not its end, so a run whose
/// final note starts early is pruned even when the note itself sustains past
/// the bound. That boundary is intentional and must not be widened.
pub fn split_at_rests(melody: &NoteList, max_rest: f64, min_melody_length: f64) -> Vec<NoteList> {
    if melody.is_empty() {
        return Vec::new();
    }

    let mut split_indexes = vec![0];
    for (i, pair) in melody.notes.windows(2).enumerate() {
        if pair[1].offset > pair[0].end() + max_rest {
            split_indexes.push(i + 1);
        }
    }
    split_indexes.push(melody.len());

    let mut runs = Vec::new();
    for bounds in split_indexes.windows(2) {
        let (i1, i2) = (bounds[0], bounds[1]);
        if melody.notes[i1].end() + min_melody_length <= melody.notes[i2 - 1].offset {
            runs.push(NoteList::from(melody.notes[i1..i2].to_vec()));
        }
    }

    runs
}
