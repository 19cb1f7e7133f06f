//! # songmap
//!
//! Turns a flat audio-analysis result (word timings, chord intervals,
//! section intervals, tempo and key estimates) into a sections → lines →
//! syllables hierarchy, and answers per-frame "what is being sung now"
//! queries against it.
//!
//! ## Modules
//! - `flat` - analysis input types and shape checking
//! - `hierarchy` - output types and validation
//! - `config` - adapter options (code or YAML)
//! - `metadata` - title, artist, key, BPM
//! - `chords` - label simplification and chord-to-syllable mapping
//! - `lines` - silence-gap line grouping
//! - `sections` - section assignment and name numbering
//! - `api` - the adapter entry points
//! - `playback` - active syllable lookup, render window, scroll layout
//! - `diagnostics` - non-fatal lint of analysis results

pub mod api;
pub mod chords;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod flat;
pub mod hierarchy;
pub mod lines;
pub mod metadata;
pub mod playback;
pub mod sections;

pub use api::{adapt, adapt_batch, adapt_json, adapt_safe, adapt_value, empty_hierarchy};
pub use chords::{
    chord_mapping_stats, find_overlapping_chords, simplify_chord_label, ChordMappingStats,
};
pub use config::AdaptOptions;
pub use diagnostics::{lint, Diagnostic, Severity};
pub use error::{ErrorCode, SongMapError};
pub use flat::{
    ChordInterval, FlatInput, KeyEstimate, LyricEvent, Provenance, SectionInterval, Tempo,
};
pub use hierarchy::{validate, Hierarchy, Line, Section, Syllable};
pub use lines::group_lines;
pub use metadata::{extract_bpm, extract_key, extract_metadata, format_key, SongMetadata};
pub use sections::{build_sections, drop_empty_sections, number_repeated_names};
