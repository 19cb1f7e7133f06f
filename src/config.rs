//! Adapter options.
//!
//! Both thresholds are tunable rather than fixed; they can be set in code or
//! read from a small YAML document:
//!
//! ```yaml
//! line-gap-threshold: 1.5
//! chord-overlap-threshold: 0.25
//! simplify-chords: false
//! title: My Song
//! ```

use serde::Deserialize;

use crate::error::SongMapError;

/// Options for one transformation call.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptOptions {
    /// Silence (seconds) between two lyric events that starts a new line.
    pub line_gap_threshold: f64,
    /// Minimum chord overlap, as a fraction of the syllable's duration.
    pub chord_overlap_threshold: f64,
    /// Shorten `"A:min7"` style labels to `"Am7"`.
    pub simplify_chords: bool,
    pub title: Option<String>,
    pub artist: Option<String>,
}

impl AdaptOptions {
    pub const DEFAULT_LINE_GAP_THRESHOLD: f64 = 1.0;
    pub const DEFAULT_CHORD_OVERLAP_THRESHOLD: f64 = 0.1;

    pub fn with_line_gap_threshold(mut self, seconds: f64) -> Self {
        self.line_gap_threshold = seconds;
        self
    }

    pub fn with_chord_overlap_threshold(mut self, fraction: f64) -> Self {
        self.chord_overlap_threshold = fraction;
        self
    }

    pub fn with_simplify_chords(mut self, simplify: bool) -> Self {
        self.simplify_chords = simplify;
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_artist(mut self, artist: &str) -> Self {
        self.artist = Some(artist.to_string());
        self
    }

    /// Parse options from YAML. Missing keys keep their defaults.
    pub fn from_yaml(content: &str) -> Result<Self, SongMapError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawOptions =
            serde_yaml::from_str(content).map_err(|e| SongMapError::Config(e.to_string()))?;
        let defaults = Self::default();
        let options = Self {
            line_gap_threshold: raw.line_gap_threshold.unwrap_or(defaults.line_gap_threshold),
            chord_overlap_threshold: raw
                .chord_overlap_threshold
                .unwrap_or(defaults.chord_overlap_threshold),
            simplify_chords: raw.simplify_chords.unwrap_or(defaults.simplify_chords),
            title: raw.title,
            artist: raw.artist,
        };
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), SongMapError> {
        if !self.line_gap_threshold.is_finite() || self.line_gap_threshold < 0.0 {
            return Err(SongMapError::InvalidOptions(format!(
                "line gap threshold must be a non-negative number of seconds, got {}",
                self.line_gap_threshold
            )));
        }
        let overlap = self.chord_overlap_threshold;
        if !overlap.is_finite() || !(0.0..=1.0).contains(&overlap) {
            return Err(SongMapError::InvalidOptions(format!(
                "chord overlap threshold must be a fraction in [0, 1], got {}",
                overlap
            )));
        }
        Ok(())
    }

    /// Title override, ignoring blank strings.
    pub(crate) fn title_override(&self) -> Option<&str> {
        non_blank(self.title.as_deref())
    }

    pub(crate) fn artist_override(&self) -> Option<&str> {
        non_blank(self.artist.as_deref())
    }
}

impl Default for AdaptOptions {
    fn default() -> Self {
        Self {
            line_gap_threshold: Self::DEFAULT_LINE_GAP_THRESHOLD,
            chord_overlap_threshold: Self::DEFAULT_CHORD_OVERLAP_THRESHOLD,
            simplify_chords: true,
            title: None,
            artist: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawOptions {
    line_gap_threshold: Option<f64>,
    chord_overlap_threshold: Option<f64>,
    simplify_chords: Option<bool>,
    title: Option<String>,
    artist: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
