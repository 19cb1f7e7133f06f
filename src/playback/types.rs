//! Playback lookup result types
//!
//! These are what the display layer receives once per animation frame.

use serde::Serialize;

use crate::hierarchy::Syllable;

/// The syllable sounding at the queried time.
///
/// # Fields
/// - `section_index`, `line_index`, `syllable_index`: path into the hierarchy
/// - `global_line_index`: line number counted across all sections, for
///   [`render_window`](super::render_window) and scroll positioning
/// - `progress`: fraction of the syllable already sung, in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSyllable {
    pub section_index: usize,
    pub line_index: usize,
    pub syllable_index: usize,
    pub global_line_index: usize,
    pub progress: f64,
}

/// Highlight state of one syllable at a playback time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase", tag = "state")]
pub enum SyllableState {
    /// Not reached yet
    Upcoming,
    /// Currently sounding
    Active { progress: f64 },
    /// Started before the current time
    Sung,
}

/// `clamp((time - start) / duration, 0, 1)`; a zero-length syllable is
/// either not started (0) or finished (1).
pub fn syllable_progress(syllable: &Syllable, time: f64) -> f64 {
    if syllable.duration <= 0.0 {
        return if time >= syllable.start_time { 1.0 } else { 0.0 };
    }
    ((time - syllable.start_time) / syllable.duration).clamp(0.0, 1.0)
}

/// Whether the syllable started before `time`.
pub fn is_sung(syllable: &Syllable, time: f64) -> bool {
    syllable.start_time < time
}

/// Highlight state for a syllable, given whether the locator picked it.
pub fn syllable_state(syllable: &Syllable, time: f64, is_active: bool) -> SyllableState {
    if is_active {
        SyllableState::Active { progress: syllable_progress(syllable, time) }
    } else if is_sung(syllable, time) {
        SyllableState::Sung
    } else {
        SyllableState::Upcoming
    }
}
