// Note - A single timed pitch event
// The basic value type every stage of the extraction pipeline operates on

use serde::{Deserialize, Serialize};

/// Sentinel pitch marking a rest (silence).
///
/// Rests are stored with a pitch far above any valid melodic pitch band, so
/// the band filter in the extractor drops them for free. Deserialized input
/// never contains rests; they are only synthesized by the segmenter when it
/// fills gaps.
pub const REST_PITCH: f64 = 200.0;

/// A timed pitch event inside a stream of notes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Beat position relative to the start of the containing stream (>= 0)
    pub offset: f64,

    /// Duration in beats (> 0)
    pub length: f64,

    /// Pitch value; `REST_PITCH` marks a rest
    pub pitch: f64,

    /// Loudness, used only for statistical part filtering (0 for rests)
    pub volume: f64,

    /// Id of the originating part, used for overlap tie-breaking
    pub part: u32,
}

impl Note {
    /// Create a sounding note.
    pub fn new(offset: f64, length: f64, pitch: f64, volume: f64, part: u32) -> Self {
        Note {
            offset,
            length,
            pitch,
            volume,
            part,
        }
    }

    /// Create a rest covering `[offset, offset + length)`.
    pub fn rest(offset: f64, length: f64, part: u32) -> Self {
        Note {
            offset,
            length,
            pitch: REST_PITCH,
            volume: 0.0,
            part,
        }
    }

    /// Beat position where this note stops sounding.
    pub fn end(&self) -> f64 {
        self.offset + self.length
    }

    /// Whether this note is a synthesized rest.
    pub fn is_rest(&self) -> bool {
        self.pitch == REST_PITCH
    }
}

/// Round a beat value to the quarter-beat grid.
///
/// The ingestion step quantizes offsets and lengths of incoming notes so the
/// whole pipeline works on a sixteenth-note resolution. Exact half-step ties
/// (eighth-beat values like 0.125) round to the even grid line.
pub fn round_to_quarter(value: f64) -> f64 {
    (value * 4.0).round_ties_even() / 4.0
}
