//! # Chords Module
//!
//! Attach recognized chords to lyric syllables for display above the text.
//!
//! ## Sub-modules
//! - `simplifier` - `"A:min7"` → `"Am7"` display labels
//! - `mapper` - best-overlap chord lookup, range queries, coverage stats
//!
//! ## Matching Rule
//! A syllable over `[s, e)` takes the chord with the largest overlap
//! `max(0, min(e, chord.end) - max(s, chord.start))`. Equal overlaps go to the
//! chord listed first in the input. The match is dropped when the overlap is
//! below `threshold * (e - s)` (10% by default).
//!
//! ## Example
//! ```rust
//! use songmap::chords::{map_chord, ChordIndex};
//! use songmap::ChordInterval;
//!
//! let chords = vec![ChordInterval::new(0.0, 2.0, "C:maj")];
//! let index = ChordIndex::new(&chords);
//!
//! assert_eq!(map_chord(&index, 0.5, 0.8, 0.1, true).as_deref(), Some("C"));
//! assert_eq!(map_chord(&index, 2.5, 3.0, 0.1, true), None);
//! ```

mod mapper;
mod simplifier;

pub use mapper::{
    chord_mapping_stats, find_overlapping_chords, interval_overlap, map_chord, ChordIndex,
    ChordMappingStats,
};
pub use simplifier::simplify_chord_label;
