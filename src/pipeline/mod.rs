// Pipeline execution module
// Runs the full extraction for one song and packages the result for training

pub mod trace;

pub use trace::{read_trace_log, Stage, TraceEntry, TraceError, TraceLog};

use serde::{Deserialize, Serialize};

use crate::extract::filter_and_extract_with_settings;
use crate::score::{NoteList, Song};
use crate::settings::ExtractSettings;

/// One measure-aligned, gap-filled melody fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MelodySegment {
    /// Measure boundary in the song's original timeline where this segment
    /// starts
    pub start_offset: f64,

    /// Contiguous notes of the segment, rests included, starting at beat 0
    pub notes: NoteList,
}

/// All melody fragments extracted from one song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongMelodies {
    /// Source identifier of the song
    pub song_id: String,

    pub segments: Vec<MelodySegment>,
}

impl SongMelodies {
    /// Total number of notes across all segments, rests included.
    pub fn note_count(&self) -> usize {
        self.segments.iter().map(|s| s.notes.len()).sum()
    }
}

/// Run part filtering, skyline extraction, and segmentation for one song.
///
/// Returns `None` when the song yields no usable melody, either because the
/// pooled statistics have too little data or because every run falls below
/// the minimum length. Both outcomes are routine for real corpora and are
/// logged, not raised.
pub fn process_song(song: &Song, settings: &ExtractSettings) -> Option<SongMelodies> {
    log::debug!(
        "processing song {} with {} parts",
        song.id,
        song.parts.len()
    );

    let segments = match filter_and_extract_with_settings(song, true, settings) {
        Some(segments) => segments,
        None => {
            log::info!("song {} has too few notes for part statistics", song.id);
            return None;
        }
    };

    if segments.is_empty() {
        log::info!("song {} produced no segment of usable length", song.id);
        return None;
    }

    let melodies = SongMelodies {
        song_id: song.id.clone(),
        segments: segments
            .into_iter()
            .map(|(start_offset, notes)| MelodySegment {
                start_offset,
                notes,
            })
            .collect(),
    };

    log::info!(
        "song {}: {} segments, {} notes",
        melodies.song_id,
        melodies.segments.len(),
        melodies.note_count()
    );

    Some(melodies)
}

/// Like [`process_song`], recording each stage into the given trace log.
pub fn process_song_traced(
    song: &Song,
    settings: &ExtractSettings,
    trace: &TraceLog,
) -> Result<Option<SongMelodies>, TraceError> {
    trace.append(&TraceEntry::with_data(
        &song.id,
        Stage::PartFilter,
        "scoring parts",
        serde_json::json!({ "parts": song.parts.len() }),
    ))?;

    let result = process_song(song, settings);

    match &result {
        Some(melodies) => {
            trace.append_batch(&[
                TraceEntry::new(&song.id, Stage::Skyline, "melody extracted"),
                TraceEntry::with_data(
                    &song.id,
                    Stage::Segmentation,
                    "melody segmented",
                    serde_json::json!({
                        "segments": melodies.segments.len(),
                        "notes": melodies.note_count(),
                    }),
                ),
            ])?;
        }
        None => {
            trace.append(&TraceEntry::new(
                &song.id,
                Stage::Segmentation,
                "no usable melody",
            ))?;
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::Part;
    use tempfile::TempDir;

    /// A two-part song whose lead carries an 18-beat line and whose bass sits
    /// below the pitch band.
    fn make_song() -> Song {
        let mut song = Song::new("fixture.pb");

        let mut lead = Part::new(0, "Lead");
        for i in 0..18 {
            lead.insert(i as f64, 1.0, 70.0, 90.0);
        }
        song.push_part(lead);

        let mut bass = Part::new(1, "Bass");
        for i in 0..18 {
            bass.insert(i as f64, 1.0, 36.0, 90.0);
        }
        song.push_part(bass);

        song
    }

    #[test]
    fn test_process_song_end_to_end() {
        let song = make_song();
        let melodies = process_song(&song, &ExtractSettings::default()).unwrap();

        assert_eq!(melodies.song_id, "fixture.pb");
        assert_eq!(melodies.segments.len(), 1);

        let segment = &melodies.segments[0];
        assert_eq!(segment.start_offset, 0.0);
        assert_eq!(segment.notes.len(), 18);
        assert!(segment.notes.is_sequence());
        // The out-of-band bass never reaches the output.
        assert!(segment.notes.iter().all(|n| n.part == 0));
    }

    #[test]
    fn test_process_song_insufficient_data() {
        let mut song = Song::new("tiny.pb");
        let mut lead = Part::new(0, "Lead");
        lead.insert(0.0, 1.0, 70.0, 90.0);
        song.push_part(lead);

        assert!(process_song(&song, &ExtractSettings::default()).is_none());
    }

    #[test]
    fn test_process_song_all_runs_too_short() {
        let mut song = Song::new("short.pb");
        let mut lead = Part::new(0, "Lead");
        for i in 0..8 {
            lead.insert(i as f64, 1.0, 70.0, 90.0);
        }
        song.push_part(lead);

        assert!(process_song(&song, &ExtractSettings::default()).is_none());
    }

    #[test]
    fn test_process_song_traced_records_stages() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("trace.jsonl");
        let log = TraceLog::new(path.clone());

        let song = make_song();
        let result = process_song_traced(&song, &ExtractSettings::default(), &log).unwrap();
        assert!(result.is_some());

        let entries = read_trace_log(&path).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].stage, Stage::PartFilter);
        assert_eq!(entries[1].stage, Stage::Skyline);
        assert_eq!(entries[2].stage, Stage::Segmentation);
        assert_eq!(entries[2].data.as_ref().unwrap()["segments"], 1);
    }

    #[test]
    fn test_process_song_traced_records_failure() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("trace.jsonl");
        let log = TraceLog::new(path.clone());

        let song = Song::new("empty.pb");
        let result = process_song_traced(&song, &ExtractSettings::default(), &log).unwrap();
        assert!(result.is_none());

        let entries = read_trace_log(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].message, "no usable melody");
    }

    #[test]
    fn test_song_melodies_serialization_round_trip() {
        let song = make_song();
        let melodies = process_song(&song, &ExtractSettings::default()).unwrap();

        let json = serde_json::to_string(&melodies).unwrap();
        let parsed: SongMelodies = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, melodies);
    }
}
