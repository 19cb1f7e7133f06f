//! # Public API
//!
//! Entry points that turn a flat analysis result into a song map hierarchy.
//!
//! ## Transformation Functions
//!
//! - [`adapt()`] - typed input, returns the hierarchy or an error
//! - [`adapt_value()`] / [`adapt_json()`] - shape-check JSON first
//! - [`adapt_batch()`] - many inputs, one independent result each
//! - [`adapt_safe()`] - swallow errors, return `None`
//! - [`empty_hierarchy()`] - placeholder for when nothing could be built
//!
//! ## Pipeline
//! 1. Validate options and numeric fields
//! 2. Extract title, artist, key, and BPM
//! 3. Sort lyric events by start and group them into lines
//! 4. Attach the best-overlapping chord to every syllable
//! 5. Place lines into sections and number repeated names
//! 6. Validate the assembled hierarchy
//!
//! `adapt` never returns a partial result: it either succeeds fully or
//! returns an error.
//!
//! ## Typical Usage
//!
//! ```rust
//! use songmap::{adapt_json, AdaptOptions};
//!
//! let flat = r#"{
//!     "id": "demo",
//!     "durationSeconds": 2.0,
//!     "tempo": { "bpmGlobal": 96.4 },
//!     "chords": [{ "start": 0.0, "end": 2.0, "label": "C:maj" }],
//!     "lyrics": [
//!         { "start": 0.5, "end": 0.8, "text": "Hel" },
//!         { "start": 0.8, "end": 1.1, "text": "lo" }
//!     ]
//! }"#;
//!
//! let song = adapt_json(flat, &AdaptOptions::default())?;
//! assert_eq!(song.bpm, 96);
//! assert_eq!(song.sections[0].name, "Song");
//! assert_eq!(song.sections[0].lines[0].syllables[1].chord.as_deref(), Some("C"));
//! # Ok::<(), songmap::SongMapError>(())
//! ```

use std::borrow::Cow;

use serde_json::Value;

use crate::chords::{chord_mapping_stats, map_chord, ChordIndex};
use crate::config::AdaptOptions;
use crate::error::SongMapError;
use crate::flat::{FlatInput, LyricEvent};
use crate::hierarchy::{Hierarchy, Line, Syllable};
use crate::lines::group_lines;
use crate::metadata::{extract_metadata, UNKNOWN_ARTIST, UNKNOWN_KEY, UNKNOWN_TITLE};
use crate::sections::build_sections;

/// Transform a typed flat input into a hierarchy.
///
/// # Errors
/// - [`SongMapError::InvalidOptions`] for out-of-range thresholds
/// - [`SongMapError::InvalidInputShape`] for non-finite duration, tempo,
///   lyric times, or section bounds
/// - [`SongMapError::InvalidHierarchy`] if the result fails validation
pub fn adapt(input: &FlatInput, options: &AdaptOptions) -> Result<Hierarchy, SongMapError> {
    options.validate()?;
    input.check_numbers()?;

    let metadata = extract_metadata(input, options);

    let lyrics = sorted_by_start(&input.lyrics);
    let chord_index = ChordIndex::new(&input.chords);
    let lines: Vec<Line> = group_lines(&lyrics, options.line_gap_threshold)
        .into_iter()
        .map(|events| Line {
            syllables: events
                .iter()
                .map(|event| to_syllable(event, &chord_index, options))
                .collect(),
        })
        .collect();
    let line_count = lines.len();

    let sections = build_sections(lines, input.provided_sections());

    let hierarchy = Hierarchy {
        title: metadata.title,
        artist: metadata.artist,
        key: metadata.key,
        bpm: metadata.bpm,
        sections,
    };
    hierarchy.check()?;

    let stats = chord_mapping_stats(&hierarchy);
    tracing::debug!(
        id = input.id.as_str(),
        lines = line_count,
        sections = hierarchy.sections.len(),
        syllables = stats.total_syllables,
        chord_coverage = format!("{:.1}", stats.coverage_percentage),
        "adapt: built hierarchy"
    );
    Ok(hierarchy)
}

/// Shape-check a JSON value, then [`adapt`] it.
pub fn adapt_value(value: &Value, options: &AdaptOptions) -> Result<Hierarchy, SongMapError> {
    let input = FlatInput::from_value(value)?;
    adapt(&input, options)
}

/// Parse JSON text, shape-check it, then [`adapt`] it.
pub fn adapt_json(text: &str, options: &AdaptOptions) -> Result<Hierarchy, SongMapError> {
    let input = FlatInput::from_json(text)?;
    adapt(&input, options)
}

/// Adapt every input independently; one bad input does not stop the rest.
pub fn adapt_batch(values: &[Value], options: &AdaptOptions) -> Vec<Result<Hierarchy, SongMapError>> {
    values.iter().map(|value| adapt_value(value, options)).collect()
}

/// Like [`adapt_value`], but errors become `None`.
///
/// Callers are expected to show [`empty_hierarchy`] in that case.
pub fn adapt_safe(value: &Value, options: &AdaptOptions) -> Option<Hierarchy> {
    match adapt_value(value, options) {
        Ok(hierarchy) => Some(hierarchy),
        Err(err) => {
            tracing::debug!(code = err.code().as_str(), error = %err, "adapt: returning no hierarchy");
            None
        }
    }
}

/// Minimal valid hierarchy: unknown key, zero BPM, no sections.
pub fn empty_hierarchy(title: Option<&str>, artist: Option<&str>) -> Hierarchy {
    Hierarchy {
        title: title.unwrap_or(UNKNOWN_TITLE).to_string(),
        artist: artist.unwrap_or(UNKNOWN_ARTIST).to_string(),
        key: UNKNOWN_KEY.to_string(),
        bpm: 0,
        sections: Vec::new(),
    }
}

fn sorted_by_start(events: &[LyricEvent]) -> Cow<'_, [LyricEvent]> {
    if events.windows(2).all(|w| w[0].start <= w[1].start) {
        return Cow::Borrowed(events);
    }
    let mut sorted = events.to_vec();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));
    Cow::Owned(sorted)
}

fn to_syllable(event: &LyricEvent, chords: &ChordIndex<'_>, options: &AdaptOptions) -> Syllable {
    if event.end < event.start {
        tracing::warn!(
            text = event.text.as_str(),
            start = event.start,
            end = event.end,
            "adapt: reversed lyric interval, using zero duration"
        );
    }
    Syllable {
        text: event.text.clone(),
        start_time: event.start,
        duration: (event.end - event.start).max(0.0),
        chord: map_chord(
            chords,
            event.start,
            event.end,
            options.chord_overlap_threshold,
            options.simplify_chords,
        ),
    }
}
