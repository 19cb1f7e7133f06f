//! # Song Map Hierarchy
//!
//! The render-ready structure held by the display layer:
//!
//! ```text
//! Hierarchy
//!   ├── title, artist, key ("C Major" | "Unknown"), bpm
//!   └── Vec<Section>
//!         ├── name ("Verse 1", "Chorus", "Song")
//!         └── Vec<Line>
//!               └── Vec<Syllable> { text, start_time, duration, chord? }
//! ```
//!
//! Built once per flat input and never mutated afterwards. Serializes with
//! camelCase names (`startTime`); an absent chord is left out of the JSON.

use serde::{Deserialize, Serialize};

use crate::error::SongMapError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hierarchy {
    pub title: String,
    pub artist: String,
    pub key: String,
    pub bpm: u32,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub name: String,
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub syllables: Vec<Syllable>,
}

/// Smallest timed unit of display text.
///
/// Occupies `[start_time, start_time + duration)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Syllable {
    pub text: String,
    pub start_time: f64,
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chord: Option<String>,
}

impl Syllable {
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Half-open containment; the end instant belongs to the next syllable.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start_time && time < self.end_time()
    }
}

impl Line {
    pub fn start_time(&self) -> Option<f64> {
        self.syllables.first().map(|s| s.start_time)
    }

    pub fn end_time(&self) -> Option<f64> {
        self.syllables.last().map(Syllable::end_time)
    }

    /// Display text of the whole line, syllables joined by spaces.
    pub fn text(&self) -> String {
        self.syllables
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Section {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), lines: Vec::new() }
    }
}

impl Hierarchy {
    /// Iterate every syllable in display order.
    pub fn syllables(&self) -> impl Iterator<Item = &Syllable> {
        self.sections
            .iter()
            .flat_map(|section| section.lines.iter())
            .flat_map(|line| line.syllables.iter())
    }

    /// Number of lines across all sections.
    pub fn line_count(&self) -> usize {
        self.sections.iter().map(|s| s.lines.len()).sum()
    }

    /// Check the structure the display layer relies on.
    ///
    /// Title and artist must be non-blank, and every syllable needs a finite
    /// start and a finite, non-negative duration.
    pub fn check(&self) -> Result<(), SongMapError> {
        if self.title.trim().is_empty() {
            return Err(SongMapError::InvalidHierarchy("title is empty".to_string()));
        }
        if self.artist.trim().is_empty() {
            return Err(SongMapError::InvalidHierarchy("artist is empty".to_string()));
        }
        for (s, section) in self.sections.iter().enumerate() {
            for (l, line) in section.lines.iter().enumerate() {
                for (i, syllable) in line.syllables.iter().enumerate() {
                    if !syllable.start_time.is_finite() {
                        return Err(SongMapError::InvalidHierarchy(format!(
                            "sections[{}].lines[{}].syllables[{}] has a non-finite start time",
                            s, l, i
                        )));
                    }
                    if !syllable.duration.is_finite() || syllable.duration < 0.0 {
                        return Err(SongMapError::InvalidHierarchy(format!(
                            "sections[{}].lines[{}].syllables[{}] has an invalid duration {}",
                            s, l, i, syllable.duration
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }
}

/// Boolean form of [`Hierarchy::check`].
pub fn validate(hierarchy: &Hierarchy) -> bool {
    hierarchy.is_valid()
}
