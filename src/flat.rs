//! # Flat Analysis Input
//!
//! The time-indexed, non-hierarchical result produced by the audio-analysis
//! pipeline. Every interval is half-open `[start, end)` in seconds.
//!
//! ## Type Hierarchy
//! ```text
//! FlatInput
//!   ├── id, duration_seconds
//!   ├── tempo: Tempo { bpm_global }
//!   ├── chords: Vec<ChordInterval>      (may be empty or unsorted)
//!   ├── lyrics: Vec<LyricEvent>         (word/syllable events)
//!   ├── sections: Option<Vec<SectionInterval>>
//!   ├── key: Option<Vec<KeyEstimate>>   (first entry wins)
//!   └── provenance: Option<Provenance>  (source path for title/artist)
//! ```
//!
//! Field names are camelCase; the analysis backend's snake_case spellings
//! (`duration_sec`, `bpm_global`, `source_path`) are accepted as aliases.
//!
//! ## Shape checking
//! [`FlatInput::from_value`] checks the required fields one by one before
//! deserializing, so a broken input is reported with the exact field path
//! instead of a generic serde message.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SongMapError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatInput {
    pub id: String,
    #[serde(alias = "duration_sec")]
    pub duration_seconds: f64,
    pub tempo: Tempo,
    pub chords: Vec<ChordInterval>,
    pub lyrics: Vec<LyricEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<SectionInterval>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Vec<KeyEstimate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tempo {
    #[serde(alias = "bpm_global")]
    pub bpm_global: f64,
}

/// A recognized chord over `[start, end)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordInterval {
    pub start: f64,
    pub end: f64,
    pub label: String,
}

/// A transcribed word or syllable over `[start, end)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricEvent {
    pub start: f64,
    pub end: f64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionInterval {
    pub start: f64,
    pub end: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyEstimate {
    pub start: f64,
    pub end: f64,
    pub tonic: String,
    pub mode: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    #[serde(default, alias = "source_path", skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
}

impl ChordInterval {
    pub fn new(start: f64, end: f64, label: &str) -> Self {
        Self { start, end, label: label.to_string() }
    }
}

impl LyricEvent {
    pub fn new(start: f64, end: f64, text: &str) -> Self {
        Self { start, end, text: text.to_string(), confidence: None }
    }
}

impl SectionInterval {
    pub fn new(start: f64, end: f64, label: &str) -> Self {
        Self { start, end, label: label.to_string() }
    }
}

impl FlatInput {
    /// Minimal input with no chords, lyrics, or optional fields.
    pub fn new(id: &str, duration_seconds: f64, bpm_global: f64) -> Self {
        Self {
            id: id.to_string(),
            duration_seconds,
            tempo: Tempo { bpm_global },
            chords: Vec::new(),
            lyrics: Vec::new(),
            sections: None,
            key: None,
            provenance: None,
        }
    }

    /// Parse flat input from JSON text, checking its shape first.
    pub fn from_json(text: &str) -> Result<Self, SongMapError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| SongMapError::Json(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Check the shape of an already-parsed JSON value and deserialize it.
    ///
    /// Required: `id` (string), `durationSeconds` (number), `tempo.bpmGlobal`
    /// (number), `lyrics` (array), `chords` (array). Every event in
    /// `lyrics`, `chords`, `sections` and `key` needs numeric `start`/`end`
    /// plus its text field; errors name the element, e.g. `lyrics[3].end`.
    pub fn from_value(value: &Value) -> Result<Self, SongMapError> {
        let obj = value
            .as_object()
            .ok_or_else(|| SongMapError::shape("$", "expected an object"))?;

        match obj.get("id") {
            Some(Value::String(_)) => {}
            Some(_) => return Err(SongMapError::shape("id", "expected a string")),
            None => return Err(SongMapError::shape("id", "missing required field")),
        }

        require_number(field(obj, &["durationSeconds", "duration_sec"]), "durationSeconds")?;

        let tempo = match obj.get("tempo") {
            Some(Value::Object(tempo)) => tempo,
            Some(_) => return Err(SongMapError::shape("tempo", "expected an object")),
            None => return Err(SongMapError::shape("tempo", "missing required field")),
        };
        require_number(field(tempo, &["bpmGlobal", "bpm_global"]), "tempo.bpmGlobal")?;

        for name in ["lyrics", "chords"] {
            match obj.get(name) {
                Some(Value::Array(_)) => {}
                Some(_) => return Err(SongMapError::shape(name, "expected an array")),
                None => return Err(SongMapError::shape(name, "missing required field")),
            }
        }
        for name in ["sections", "key"] {
            match obj.get(name) {
                None | Some(Value::Null) | Some(Value::Array(_)) => {}
                Some(_) => return Err(SongMapError::shape(name, "expected an array")),
            }
        }

        check_events(obj, "lyrics", &["text"])?;
        check_events(obj, "chords", &["label"])?;
        check_events(obj, "sections", &["label"])?;
        check_events(obj, "key", &["tonic", "mode"])?;

        let input: FlatInput = serde_json::from_value(value.clone())
            .map_err(|e| SongMapError::shape("$", e.to_string()))?;
        input.check_numbers()?;
        Ok(input)
    }

    /// Reject non-finite values in the fields every later step does
    /// arithmetic on. Reversed intervals are left alone; they are clamped
    /// downstream.
    pub fn check_numbers(&self) -> Result<(), SongMapError> {
        if !self.duration_seconds.is_finite() {
            return Err(SongMapError::shape("durationSeconds", "expected a finite number"));
        }
        if !self.tempo.bpm_global.is_finite() {
            return Err(SongMapError::shape("tempo.bpmGlobal", "expected a finite number"));
        }
        for (i, lyric) in self.lyrics.iter().enumerate() {
            require_finite("lyrics", i, lyric.start, lyric.end)?;
        }
        for (i, section) in self.sections.iter().flatten().enumerate() {
            require_finite("sections", i, section.start, section.end)?;
        }
        Ok(())
    }

    /// Sections supplied by the analysis, treating an empty list as absent.
    pub fn provided_sections(&self) -> Option<&[SectionInterval]> {
        match self.sections.as_deref() {
            Some(sections) if !sections.is_empty() => Some(sections),
            _ => None,
        }
    }
}

fn field<'a>(obj: &'a serde_json::Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| obj.get(*name))
}

fn require_number(value: Option<&Value>, path: &str) -> Result<(), SongMapError> {
    match value {
        Some(Value::Number(_)) => Ok(()),
        Some(_) => Err(SongMapError::shape(path, "expected a number")),
        None => Err(SongMapError::shape(path, "missing required field")),
    }
}

fn require_string(value: Option<&Value>, path: &str) -> Result<(), SongMapError> {
    match value {
        Some(Value::String(_)) => Ok(()),
        Some(_) => Err(SongMapError::shape(path, "expected a string")),
        None => Err(SongMapError::shape(path, "missing required field")),
    }
}

/// Check every element of the array `name` (if present) for numeric
/// `start`/`end` and the given string fields.
fn check_events(
    obj: &serde_json::Map<String, Value>,
    name: &str,
    strings: &[&str],
) -> Result<(), SongMapError> {
    let Some(Value::Array(events)) = obj.get(name) else {
        return Ok(());
    };
    for (i, event) in events.iter().enumerate() {
        let event = event
            .as_object()
            .ok_or_else(|| SongMapError::shape(format!("{}[{}]", name, i), "expected an object"))?;
        for key in ["start", "end"] {
            require_number(event.get(key), &format!("{}[{}].{}", name, i, key))?;
        }
        for key in strings {
            require_string(event.get(*key), &format!("{}[{}].{}", name, i, key))?;
        }
    }
    Ok(())
}

fn require_finite(name: &str, i: usize, start: f64, end: f64) -> Result<(), SongMapError> {
    if !start.is_finite() {
        return Err(SongMapError::shape(format!("{}[{}].start", name, i), "expected a finite number"));
    }
    if !end.is_finite() {
        return Err(SongMapError::shape(format!("{}[{}].end", name, i), "expected a finite number"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> Value {
        json!({
            "id": "song-1",
            "durationSeconds": 10.0,
            "tempo": { "bpmGlobal": 120.0 },
            "chords": [],
            "lyrics": []
        })
    }

    #[test]
    fn parses_minimal_input() {
        let input = FlatInput::from_value(&minimal()).unwrap();
        assert_eq!(input.id, "song-1");
        assert_eq!(input.tempo.bpm_global, 120.0);
        assert!(input.sections.is_none());
        assert!(input.provided_sections().is_none());
    }

    #[test]
    fn accepts_backend_snake_case() {
        let value = json!({
            "id": "yt_abc",
            "duration_sec": 3.5,
            "tempo": { "bpm_global": 98.6, "confidence": 0.5 },
            "chords": [{ "start": 0.0, "end": 1.0, "label": "C:maj" }],
            "lyrics": [{ "start": 0.1, "end": 0.4, "text": "hi", "confidence": 0.9 }],
            "provenance": { "source_path": "/tmp/a_b.wav" },
            "beats": [0.5, 1.0]
        });
        let input = FlatInput::from_value(&value).unwrap();
        assert_eq!(input.duration_seconds, 3.5);
        assert_eq!(input.lyrics[0].confidence, Some(0.9));
        assert_eq!(
            input.provenance.unwrap().source_path.as_deref(),
            Some("/tmp/a_b.wav")
        );
    }

    #[test]
    fn reports_missing_fields() {
        for name in ["id", "durationSeconds", "tempo", "chords", "lyrics"] {
            let mut value = minimal();
            value.as_object_mut().unwrap().remove(name);
            match FlatInput::from_value(&value) {
                Err(SongMapError::InvalidInputShape { field, .. }) => assert_eq!(field, name),
                other => panic!("expected shape error for {}, got {:?}", name, other),
            }
        }
    }

    #[test]
    fn reports_mistyped_fields() {
        let mut value = minimal();
        value["tempo"]["bpmGlobal"] = json!("fast");
        match FlatInput::from_value(&value) {
            Err(SongMapError::InvalidInputShape { field, message }) => {
                assert_eq!(field, "tempo.bpmGlobal");
                assert_eq!(message, "expected a number");
            }
            other => panic!("unexpected {:?}", other),
        }

        let mut value = minimal();
        value["lyrics"] = json!({});
        assert!(FlatInput::from_value(&value).is_err());

        assert!(FlatInput::from_value(&json!([1, 2])).is_err());
    }

    fn shape_field(value: &Value) -> String {
        match FlatInput::from_value(value) {
            Err(SongMapError::InvalidInputShape { field, .. }) => field,
            other => panic!("expected shape error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_malformed_nested_events() {
        let mut value = minimal();
        value["lyrics"] = json!([
            { "start": 0.0, "end": 0.2, "text": "a" },
            { "start": 0.2, "text": "b" }
        ]);
        assert_eq!(shape_field(&value), "lyrics[1].end");

        let mut value = minimal();
        value["chords"] = json!([{ "start": "0", "end": 1.0, "label": "C:maj" }]);
        assert_eq!(shape_field(&value), "chords[0].start");

        let mut value = minimal();
        value["chords"] = json!([{ "start": 0.0, "end": 1.0, "label": 7 }]);
        assert_eq!(shape_field(&value), "chords[0].label");

        let mut value = minimal();
        value["lyrics"] = json!([42]);
        assert_eq!(shape_field(&value), "lyrics[0]");
    }

    #[test]
    fn rejects_malformed_optional_arrays() {
        let mut value = minimal();
        value["sections"] = json!([{ "start": 0.0, "end": 4.0 }]);
        assert_eq!(shape_field(&value), "sections[0].label");

        let mut value = minimal();
        value["key"] = json!([{ "start": 0.0, "end": 4.0, "tonic": "C" }]);
        assert_eq!(shape_field(&value), "key[0].mode");

        let mut value = minimal();
        value["sections"] = json!("verse");
        assert_eq!(shape_field(&value), "sections");

        let mut value = minimal();
        value["sections"] = Value::Null;
        assert!(FlatInput::from_value(&value).unwrap().sections.is_none());
    }

    #[test]
    fn empty_sections_count_as_absent() {
        let mut input = FlatInput::new("x", 1.0, 60.0);
        input.sections = Some(vec![]);
        assert!(input.provided_sections().is_none());
        input.sections = Some(vec![SectionInterval::new(0.0, 1.0, "Verse")]);
        assert_eq!(input.provided_sections().unwrap().len(), 1);
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let mut input = FlatInput::new("x", f64::NAN, 60.0);
        assert!(input.check_numbers().is_err());
        input.duration_seconds = 1.0;
        input.lyrics.push(LyricEvent::new(0.0, f64::INFINITY, "x"));
        match input.check_numbers() {
            Err(SongMapError::InvalidInputShape { field, .. }) => assert_eq!(field, "lyrics[0].end"),
            other => panic!("unexpected {:?}", other),
        }

        input.lyrics.clear();
        input.sections = Some(vec![
            SectionInterval::new(0.0, 1.0, "Verse"),
            SectionInterval::new(f64::NAN, 2.0, "Chorus"),
        ]);
        match input.check_numbers() {
            Err(SongMapError::InvalidInputShape { field, .. }) => assert_eq!(field, "sections[1].start"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn invalid_json_text() {
        assert!(matches!(FlatInput::from_json("{nope"), Err(SongMapError::Json(_))));
    }
}
