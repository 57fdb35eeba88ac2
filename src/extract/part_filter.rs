// Statistical part filter - "enhanced skyline" discarding improbable parts
// Parts unlikely to carry the melody are excluded before re-extraction

use crate::score::{NoteList, Song};
use crate::settings::ExtractSettings;

use super::skyline::{extract_melody, skyline_with_settings};

/// Extract a melody from a song, first discarding parts that are unlikely to
/// carry it. Uses default settings.
///
/// Returns `None` when the song does not yield enough notes to compute
/// reliable statistics; callers must treat that as "no usable melody in this
/// song", a common and expected outcome.
pub fn filter_and_extract(song: &Song, split: bool) -> Option<Vec<(f64, NoteList)>> {
    filter_and_extract_with_settings(song, split, &ExtractSettings::default())
}

/// Extract a melody from a song with explicit settings.
///
/// Every part is skylined on its own first; parts whose reduction is empty
/// are dropped. The remaining reductions are pooled, and a part is kept as a
/// probable melody carrier when its mean volume reaches the pooled mean
/// minus one standard deviation, or, failing that, when its mean pitch does.
/// The survivors are then merged and skylined again.
pub fn filter_and_extract_with_settings(
    song: &Song,
    split: bool,
    settings: &ExtractSettings,
) -> Option<Vec<(f64, NoteList)>> {
    let mut parts: Vec<NoteList> = Vec::new();

    for part in &song.parts {
        let extracted = extract_melody(&part.notes(), settings);
        if !extracted.is_empty() {
            parts.push(extracted);
        }
    }

    let mut average_volumes = Vec::with_capacity(parts.len());
    let mut average_pitches = Vec::with_capacity(parts.len());
    let mut all_volumes = Vec::new();
    let mut all_pitches = Vec::new();

    for part in &parts {
        debug_assert!(part.is_sequence());
        average_volumes.push(mean(&part.iter().map(|n| n.volume).collect::<Vec<_>>()));
        average_pitches.push(mean(&part.iter().map(|n| n.pitch).collect::<Vec<_>>()));
        all_volumes.extend(part.iter().map(|n| n.volume));
        all_pitches.extend(part.iter().map(|n| n.pitch));
    }

    // Standard deviation needs at least 2 notes; melody_length / 4 is a lower
    // bound on the note count any acceptable melody would have anyway.
    let min_pool = usize::max(2, (settings.min_melody_length / 4.0).floor() as usize);
    if all_volumes.len() < min_pool {
        return None;
    }

    let mean_volume = mean(&all_volumes);
    let stdev_volume = stdev(&all_volumes);
    let mean_pitch = mean(&all_pitches);
    let stdev_pitch = stdev(&all_pitches);

    let mut probable_melody_parts: Vec<NoteList> = Vec::new();

    for ((avg_vol, avg_pitch), part) in average_volumes
        .into_iter()
        .zip(average_pitches)
        .zip(parts)
    {
        if avg_vol >= mean_volume - stdev_volume {
            probable_melody_parts.push(part);
        } else if avg_pitch >= mean_pitch - stdev_pitch {
            probable_melody_parts.push(part);
        }
    }

    skyline_with_settings(probable_melody_parts, split, settings)
}

/// Arithmetic mean. Callers guarantee a non-empty slice.
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator). Callers guarantee at least
/// two values.
fn stdev(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>()
        / (values.len() - 1) as f64;
    variance.sqrt()
}
