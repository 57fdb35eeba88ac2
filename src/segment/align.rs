// Measure alignment and gap filling
// Rebases a run to its measure boundary and makes silence explicit

use crate::score::{Note, NoteList};

/// Fixed measure length in beats. The pipeline only handles 4/4 material;
/// the ingestion collaborator rejects everything else upstream.
pub const MEASURE_BEATS: f64 = 4.0;

/// Rebase a run of notes to the measure boundary at or before its first note
/// and fill every silence with an explicit rest.
///
/// Returns the measure boundary (in the original timeline) together with the
/// rebased, gap-filled notes. The output starts at offset 0: when the first
/// note falls inside its measure, a leading rest covers the pickup, carrying
/// the first note's part id. Interior rests carry the part id of the note
/// emitted just before them.
pub fn rebase_and_fill(run: &NoteList) -> (f64, NoteList) {
    let start = match run.first() {
        Some(first) => first.offset,
        None => return (0.0, NoteList::new()),
    };
    let first_measure_start = (start / MEASURE_BEATS).floor() * MEASURE_BEATS;

    let rebased: Vec<Note> = run
        .iter()
        .map(|n| Note {
            offset: n.offset - first_measure_start,
            ..*n
        })
        .collect();

    let mut full = NoteList::new();

    let first = rebased[0];
    if first.offset > 0.0 {
        full.push(Note::rest(0.0, first.offset, first.part));
    }
    full.push(first);
    let mut last = first;

    for &note in &rebased[1..] {
        if note.offset > last.end() {
            let rest = Note::rest(last.end(), note.offset - last.end(), last.part);
            full.push(rest);
            last = rest;
        }
        full.push(note);
        last = note;
    }

    (first_measure_start, full)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::REST_PITCH;

    fn note(offset: f64, length: f64, pitch: f64) -> Note {
        Note::new(offset, length, pitch, 80.0, 0)
    }

    #[test]
    fn test_run_on_measure_boundary_is_unchanged() {
        let run = NoteList::from(vec![note(4.0, 1.0, 60.0), note(5.0, 1.0, 62.0)]);
        let (start, filled) = rebase_and_fill(&run);

        assert_eq!(start, 4.0);
        assert_eq!(filled.len(), 2);
        assert_eq!(filled.notes[0].offset, 0.0);
        assert_eq!(filled.notes[1].offset, 1.0);
        assert!(!filled.notes[0].is_rest());
    }

    #[test]
    fn test_measure_rebasing_with_leading_rest() {
        // First note at 5.5: the measure boundary is 4.0, the rebased note
        // starts at 1.5, and a 1.5-beat rest leads in.
        let run = NoteList::from(vec![note(5.5, 1.0, 60.0), note(6.5, 1.0, 62.0)]);
        let (start, filled) = rebase_and_fill(&run);

        assert_eq!(start, 4.0);
        assert_eq!(filled.len(), 3);

        let lead_in = filled.notes[0];
        assert!(lead_in.is_rest());
        assert_eq!(lead_in.offset, 0.0);
        assert_eq!(lead_in.length, 1.5);
        assert_eq!(lead_in.part, 0);

        assert_eq!(filled.notes[1].offset, 1.5);
        assert_eq!(filled.notes[1].pitch, 60.0);
    }

    #[test]
    fn test_gap_filling() {
        // Notes at 0, 2, 6 with length 1 need rests over [1,2) and [3,6).
        let run = NoteList::from(vec![
            note(0.0, 1.0, 60.0),
            note(2.0, 1.0, 62.0),
            note(6.0, 1.0, 64.0),
        ]);
        let (start, filled) = rebase_and_fill(&run);

        assert_eq!(start, 0.0);
        assert_eq!(filled.len(), 5);

        let first_rest = filled.notes[1];
        assert_eq!(first_rest.pitch, REST_PITCH);
        assert_eq!(first_rest.offset, 1.0);
        assert_eq!(first_rest.length, 1.0);

        let second_rest = filled.notes[3];
        assert_eq!(second_rest.pitch, REST_PITCH);
        assert_eq!(second_rest.offset, 3.0);
        assert_eq!(second_rest.length, 3.0);

        // Fully contiguous output.
        assert!(filled.is_sequence());
        for pair in filled.notes.windows(2) {
            assert!((pair[0].end() - pair[1].offset).abs() < 1e-9);
        }
    }

    #[test]
    fn test_interior_rest_carries_previous_part() {
        let run = NoteList::from(vec![
            Note::new(0.0, 1.0, 60.0, 80.0, 7),
            Note::new(3.0, 1.0, 62.0, 80.0, 2),
        ]);
        let (_, filled) = rebase_and_fill(&run);

        let rest = filled.notes[1];
        assert!(rest.is_rest());
        // The gap rest belongs to the note before it, not after.
        assert_eq!(rest.part, 7);
    }

    #[test]
    fn test_touching_notes_get_no_rest() {
        let run = NoteList::from(vec![note(0.0, 2.0, 60.0), note(2.0, 2.0, 62.0)]);
        let (_, filled) = rebase_and_fill(&run);
        assert_eq!(filled.len(), 2);
    }

    #[test]
    fn test_fractional_measure_start() {
        // 10.25 lies in the measure starting at 8.0.
        let run = NoteList::from(vec![note(10.25, 1.0, 60.0), note(11.25, 6.0, 62.0)]);
        let (start, filled) = rebase_and_fill(&run);

        assert_eq!(start, 8.0);
        assert_eq!(filled.notes[0].length, 2.25);
        assert_eq!(filled.notes[1].offset, 2.25);
    }
}
