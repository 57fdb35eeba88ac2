// Segmentation module
// Splits a monophonic melody into fixed-quality, measure-aligned fragments

pub mod align;
pub mod split;

pub use align::{rebase_and_fill, MEASURE_BEATS};
pub use split::split_at_rests;

use crate::score::NoteList;

/// Split a melody at long rests and normalize each surviving run.
///
/// Runs shorter than `min_melody_length` beats are dropped. Each kept run is
/// rebased to the measure boundary at or before its first note, and internal
/// gaps are filled with explicit rests, so every returned list is contiguous
/// from beat 0 of its measure.
///
/// Returns `None` for an empty melody. A melody whose runs are all too short
/// yields `Some` with an empty list.
pub fn segment(
    melody: &NoteList,
    max_rest: f64,
    min_melody_length: f64,
) -> Option<Vec<(f64, NoteList)>> {
    if melody.is_empty() {
        return None;
    }

    let runs = split_at_rests(melody, max_rest, min_melody_length);

    Some(runs.iter().map(rebase_and_fill).collect())
}
