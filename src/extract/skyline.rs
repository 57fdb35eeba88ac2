// Skyline extraction - greedy monophonic reduction of polyphonic input
// Single forward pass over the time-ordered notes, keeping the "skyline" voice

use crate::score::{MelodySource, Note, NoteList};
use crate::segment::segment;
use crate::settings::ExtractSettings;

/// Largest allowed downward pitch leap from the current candidate, in
/// semitones. Anything further down than an octave is never the melody
/// continuing; it is an accompaniment voice cutting in.
const MAX_DOWNWARD_LEAP: f64 = 12.0;

/// Extract a monophonic melody line with default settings.
///
/// `source` may be a `NoteList`, a `Part`, a `Song`, or a mixed list of
/// those; see [`MelodySource`]. With `split == false` the whole melody is
/// returned as a single `(0.0, melody)` segment. With `split == true` the
/// melody is cut at long rests and measure-aligned, and the result is `None`
/// when the melody is empty.
pub fn skyline(
    source: impl Into<MelodySource>,
    split: bool,
) -> Option<Vec<(f64, NoteList)>> {
    skyline_with_settings(source, split, &ExtractSettings::default())
}

/// Extract a monophonic melody line with explicit settings.
pub fn skyline_with_settings(
    source: impl Into<MelodySource>,
    split: bool,
    settings: &ExtractSettings,
) -> Option<Vec<(f64, NoteList)>> {
    let notes = source.into().into_notes();
    let melody = extract_melody(&notes, settings);

    if !split {
        return Some(vec![(0.0, melody)]);
    }

    segment(&melody, settings.max_rest, settings.min_melody_length)
}

/// The skyline pass itself: one sweep over time-ordered notes, tracking the
/// current candidate melody note.
///
/// Rules, in order, for each incoming note:
/// 1. Discard it when its pitch is outside the valid band (this also drops
///    rests, whose sentinel pitch lies above any band).
/// 2. Discard it when it sits more than an octave below the candidate.
/// 3. When the candidate has ended by the note's onset, commit the candidate
///    and adopt the note.
/// 4. When the note overlaps the candidate but has a strictly higher pitch,
///    or starts later within the same part, it wins: the candidate is
///    truncated at the note's onset and committed (or silently dropped when
///    both start together), and the note is adopted.
/// 5. Otherwise the candidate keeps priority and the note is discarded.
pub(crate) fn extract_melody(notes: &NoteList, settings: &ExtractSettings) -> NoteList {
    let mut current: Option<Note> = None;
    // End of the active candidate; -1 means nothing is active yet.
    let mut current_end = -1.0;

    let mut melody = NoteList::new();

    for &note in notes.iter() {
        if note.pitch < settings.min_pitch || note.pitch > settings.max_pitch {
            continue;
        }

        if let Some(cur) = current {
            if cur.pitch - note.pitch > MAX_DOWNWARD_LEAP {
                continue;
            }
        }

        if current_end <= note.offset {
            if let Some(cur) = current {
                melody.push(cur);
            }
            current = Some(note);
            current_end = note.end();
        } else if let Some(cur) = current.as_mut() {
            if note.pitch > cur.pitch || (note.offset > cur.offset && note.part == cur.part) {
                if note.offset > cur.offset {
                    cur.length = note.offset - cur.offset;
                    melody.push(*cur);
                }
                *cur = note;
                current_end = note.end();
            }
        }
    }

    if let Some(cur) = current {
        melody.push(cur);
    }

    debug_assert!(
        melody.is_sequence(),
        "skyline output contains overlapping notes"
    );

    melody
}
