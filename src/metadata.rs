//! Display metadata: title, artist, key, and tempo.
//!
//! Title and artist come from the uploaded file name when the caller does not
//! supply them: `"/uploads/yesterday-the_beatles.mp3"` splits on `-` and `_`
//! into `["yesterday", "the", "beatles"]`, giving title `"Yesterday"` and
//! artist `"The"`.

use crate::config::AdaptOptions;
use crate::flat::{FlatInput, KeyEstimate, Provenance};

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_KEY: &str = "Unknown";

/// Display values derived from one flat input.
#[derive(Debug, Clone, PartialEq)]
pub struct SongMetadata {
    pub title: String,
    pub artist: String,
    pub key: String,
    pub bpm: u32,
}

pub fn extract_metadata(input: &FlatInput, options: &AdaptOptions) -> SongMetadata {
    let provenance = input.provenance.as_ref();
    SongMetadata {
        title: extract_title(provenance, options.title_override()),
        artist: extract_artist(provenance, options.artist_override()),
        key: extract_key(input.key.as_deref()),
        bpm: extract_bpm(input.tempo.bpm_global),
    }
}

pub fn extract_title(provenance: Option<&Provenance>, explicit: Option<&str>) -> String {
    if let Some(title) = explicit {
        return title.to_string();
    }
    file_segment(provenance, 0).unwrap_or_else(|| UNKNOWN_TITLE.to_string())
}

pub fn extract_artist(provenance: Option<&Provenance>, explicit: Option<&str>) -> String {
    if let Some(artist) = explicit {
        return artist.to_string();
    }
    file_segment(provenance, 1).unwrap_or_else(|| UNKNOWN_ARTIST.to_string())
}

/// Format the first key estimate, or `"Unknown"`.
pub fn extract_key(key: Option<&[KeyEstimate]>) -> String {
    match key.and_then(|k| k.first()) {
        Some(estimate) => format_key(&estimate.tonic, &estimate.mode),
        None => UNKNOWN_KEY.to_string(),
    }
}

/// `("c#", "minor")` -> `"C# Minor"`.
pub fn format_key(tonic: &str, mode: &str) -> String {
    let tonic = tonic.trim();
    if tonic.is_empty() {
        return UNKNOWN_KEY.to_string();
    }
    let tonic = capitalize(tonic);
    let mode = mode.trim();
    if mode.is_empty() {
        return tonic;
    }
    format!("{} {}", tonic, capitalize(&mode.to_lowercase()))
}

/// Rounded tempo, never negative; non-finite tempos give 0.
pub fn extract_bpm(bpm_global: f64) -> u32 {
    if !bpm_global.is_finite() || bpm_global <= 0.0 {
        return 0;
    }
    let rounded = bpm_global.round();
    if rounded >= u32::MAX as f64 {
        u32::MAX
    } else {
        rounded as u32
    }
}

/// Uppercase the first letter of every whitespace-separated word.
pub fn capitalize_words(text: &str) -> String {
    text.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// File name without directories or extension.
fn file_stem(path: &str) -> &str {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}

fn file_segment(provenance: Option<&Provenance>, index: usize) -> Option<String> {
    let path = provenance?.source_path.as_deref()?;
    file_stem(path)
        .split(['_', '-'])
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .nth(index)
        .map(capitalize_words)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provenance(path: &str) -> Provenance {
        Provenance { source_path: Some(path.to_string()) }
    }

    fn key(tonic: &str, mode: &str) -> KeyEstimate {
        KeyEstimate { start: 0.0, end: 10.0, tonic: tonic.to_string(), mode: mode.to_string() }
    }

    #[test]
    fn title_and_artist_from_path() {
        let p = provenance("/uploads/yesterday-beatles.mp3");
        assert_eq!(extract_title(Some(&p), None), "Yesterday");
        assert_eq!(extract_artist(Some(&p), None), "Beatles");
    }

    #[test]
    fn windows_paths() {
        let p = provenance(r"C:\music\hey jude_the beatles.wav");
        assert_eq!(extract_title(Some(&p), None), "Hey Jude");
        assert_eq!(extract_artist(Some(&p), None), "The Beatles");
    }

    #[test]
    fn missing_path_gives_unknowns() {
        assert_eq!(extract_title(None, None), UNKNOWN_TITLE);
        assert_eq!(extract_artist(None, None), UNKNOWN_ARTIST);

        let empty = Provenance::default();
        assert_eq!(extract_title(Some(&empty), None), UNKNOWN_TITLE);
    }

    #[test]
    fn single_segment_has_no_artist() {
        let p = provenance("track.wav");
        assert_eq!(extract_title(Some(&p), None), "Track");
        assert_eq!(extract_artist(Some(&p), None), UNKNOWN_ARTIST);
    }

    #[test]
    fn explicit_values_win() {
        let p = provenance("a-b.wav");
        assert_eq!(extract_title(Some(&p), Some("Real Title")), "Real Title");
        assert_eq!(extract_artist(Some(&p), Some("Real Artist")), "Real Artist");
    }

    #[test]
    fn key_formatting() {
        assert_eq!(extract_key(Some(&[key("C", "major")][..])), "C Major");
        assert_eq!(extract_key(Some(&[key("f#", "MINOR"), key("A", "major")][..])), "F# Minor");
        assert_eq!(extract_key(Some(&[][..])), UNKNOWN_KEY);
        assert_eq!(extract_key(None), UNKNOWN_KEY);
        assert_eq!(format_key("", "major"), UNKNOWN_KEY);
        assert_eq!(format_key("Bb", ""), "Bb");
    }

    #[test]
    fn bpm_rounding_and_clamping() {
        assert_eq!(extract_bpm(120.0), 120);
        assert_eq!(extract_bpm(98.6), 99);
        assert_eq!(extract_bpm(0.4), 0);
        assert_eq!(extract_bpm(0.0), 0);
        assert_eq!(extract_bpm(-12.0), 0);
        assert_eq!(extract_bpm(f64::NAN), 0);
    }

    #[test]
    fn capitalizes_each_word() {
        assert_eq!(capitalize_words("  the   long road "), "The Long Road");
        assert_eq!(capitalize_words("élan vital"), "Élan Vital");
    }
}
