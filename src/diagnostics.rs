//! # Analysis Lint
//!
//! Non-fatal checks on a flat analysis result. `adapt` tolerates everything
//! reported here (reversed intervals clamp, empty lyrics give an empty
//! section); lint only tells the caller the analysis looks suspicious.
//!
//! ## Checks
//! - Interval with `start > end` (chords, sections, lyrics, key)
//! - Zero-duration chord
//! - Chord or lyric ending after `durationSeconds`
//! - Lyric confidence outside `[0, 1]`
//! - No lyrics at all
//!
//! ## Example
//! ```rust
//! use songmap::{lint, ChordInterval, FlatInput};
//!
//! let mut input = FlatInput::new("x", 10.0, 120.0);
//! input.chords.push(ChordInterval::new(4.0, 2.0, "C:maj"));
//!
//! let warnings = lint(&input);
//! assert!(warnings.iter().any(|d| d.field == "chords[0]"));
//! ```

use serde::Serialize;

use crate::flat::FlatInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Path of the offending field, e.g. `lyrics[4]`.
    pub field: String,
    pub message: String,
}

impl Diagnostic {
    fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { severity: Severity::Warning, field: field.into(), message: message.into() }
    }
}

/// Collect warnings about a flat input, in field order.
pub fn lint(input: &FlatInput) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let duration = input.duration_seconds;

    for (i, chord) in input.chords.iter().enumerate() {
        let field = format!("chords[{}]", i);
        if chord.start > chord.end {
            diagnostics.push(Diagnostic::warning(
                &field,
                format!("start {} is after end {}", chord.start, chord.end),
            ));
        } else if chord.start == chord.end {
            diagnostics.push(Diagnostic::warning(&field, "zero duration"));
        }
        if chord.end > duration {
            diagnostics.push(Diagnostic::warning(
                &field,
                format!("end {} exceeds song duration {}", chord.end, duration),
            ));
        }
    }

    if let Some(sections) = &input.sections {
        for (i, section) in sections.iter().enumerate() {
            if section.start > section.end {
                diagnostics.push(Diagnostic::warning(
                    format!("sections[{}]", i),
                    format!("start {} is after end {}", section.start, section.end),
                ));
            }
        }
    }

    if input.lyrics.is_empty() {
        diagnostics.push(Diagnostic::warning("lyrics", "no lyrics detected"));
    }
    for (i, lyric) in input.lyrics.iter().enumerate() {
        let field = format!("lyrics[{}]", i);
        if lyric.start > lyric.end {
            diagnostics.push(Diagnostic::warning(
                &field,
                format!("start {} is after end {}", lyric.start, lyric.end),
            ));
        }
        if lyric.end > duration {
            diagnostics.push(Diagnostic::warning(
                &field,
                format!("end {} exceeds song duration {}", lyric.end, duration),
            ));
        }
        if let Some(confidence) = lyric.confidence {
            if !(0.0..=1.0).contains(&confidence) {
                diagnostics.push(Diagnostic::warning(
                    &field,
                    format!("confidence {} is outside [0, 1]", confidence),
                ));
            }
        }
    }

    if let Some(keys) = &input.key {
        for (i, key) in keys.iter().enumerate() {
            if key.start > key.end {
                diagnostics.push(Diagnostic::warning(
                    format!("key[{}]", i),
                    format!("start {} is after end {}", key.start, key.end),
                ));
            }
        }
    }

    diagnostics
}
