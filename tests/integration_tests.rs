//! Integration tests for the song map adapter
//!
//! Tests the full pipeline from flat analysis JSON to hierarchy and playback
//! lookups.

use std::time::Instant;

use serde_json::{json, Value};
use songmap::chords::interval_overlap;
use songmap::playback::{render_window, Locator};
use songmap::{
    adapt, adapt_batch, adapt_json, adapt_safe, adapt_value, chord_mapping_stats, empty_hierarchy,
    validate, AdaptOptions, ChordInterval, ErrorCode, FlatInput, LyricEvent, SectionInterval,
};

/// Synthetic song: `words` lyric events of 0.3s with short gaps, a 1.5s
/// pause every 8 words, a chord every 2 seconds, and 4 sections.
fn synthetic_song(words: usize) -> FlatInput {
    let mut input = FlatInput::new("synthetic", 0.0, 118.7);
    let mut t = 0.5;
    for i in 0..words {
        input.lyrics.push(LyricEvent::new(t, t + 0.3, &format!("w{}", i)));
        t += if i % 8 == 7 { 1.8 } else { 0.35 };
    }
    input.duration_seconds = t + 1.0;

    let labels = ["C:maj", "A:min", "F:maj", "G:7"];
    let mut c = 0.0;
    let mut n = 0;
    while c < input.duration_seconds {
        input.chords.push(ChordInterval::new(c, c + 2.0, labels[n % labels.len()]));
        c += 2.0;
        n += 1;
    }

    let quarter = input.duration_seconds / 4.0;
    let names = ["Verse", "Chorus", "Verse", "Chorus"];
    input.sections = Some(
        names
            .iter()
            .enumerate()
            .map(|(i, name)| SectionInterval::new(i as f64 * quarter, (i + 1) as f64 * quarter, name))
            .collect(),
    );
    input
}

#[test]
fn test_scenario_a_single_default_section() {
    let flat = json!({
        "id": "a",
        "durationSeconds": 2.0,
        "tempo": { "bpmGlobal": 120.0 },
        "chords": [{ "start": 0.0, "end": 2.0, "label": "C:maj" }],
        "lyrics": [
            { "start": 0.5, "end": 0.8, "text": "Hel" },
            { "start": 0.8, "end": 1.1, "text": "lo" }
        ]
    });
    let song = adapt_value(&flat, &AdaptOptions::default()).unwrap();

    assert_eq!(song.sections.len(), 1);
    assert_eq!(song.sections[0].name, "Song");
    assert_eq!(song.sections[0].lines.len(), 1);
    let syllables = &song.sections[0].lines[0].syllables;
    assert_eq!(syllables.len(), 2);
    assert_eq!(syllables[0].chord.as_deref(), Some("C"));
    assert_eq!(syllables[1].chord.as_deref(), Some("C"));
    assert_eq!(syllables[0].start_time, 0.5);
    assert!((syllables[0].duration - 0.3).abs() < 1e-9);
}

#[test]
fn test_scenario_b_zero_tempo() {
    let mut input = FlatInput::new("b", 1.0, 0.0);
    input.lyrics.push(LyricEvent::new(0.0, 0.5, "la"));
    assert_eq!(adapt(&input, &AdaptOptions::default()).unwrap().bpm, 0);

    input.tempo.bpm_global = -80.0;
    assert_eq!(adapt(&input, &AdaptOptions::default()).unwrap().bpm, 0);
}

#[test]
fn test_scenario_c_no_lyrics() {
    let song = adapt(&FlatInput::new("c", 30.0, 90.0), &AdaptOptions::default()).unwrap();
    assert_eq!(song.sections.len(), 1);
    assert!(song.sections[0].lines.is_empty());
    assert!(validate(&song));
}

#[test]
fn test_scenario_d_gap_threshold() {
    let mut input = FlatInput::new("d", 5.0, 100.0);
    input.lyrics = vec![LyricEvent::new(0.0, 0.4, "one"), LyricEvent::new(2.0, 2.4, "two")];

    let split = adapt(&input, &AdaptOptions::default()).unwrap();
    assert_eq!(split.sections[0].lines.len(), 2);

    let merged = adapt(&input, &AdaptOptions::default().with_line_gap_threshold(2.0)).unwrap();
    assert_eq!(merged.sections[0].lines.len(), 1);
}

#[test]
fn test_section_names_are_numbered() {
    let mut input = FlatInput::new("n", 30.0, 100.0);
    input.sections = Some(vec![
        SectionInterval::new(0.0, 10.0, "Verse"),
        SectionInterval::new(10.0, 20.0, "Verse"),
        SectionInterval::new(20.0, 30.0, "Chorus"),
    ]);
    let song = adapt(&input, &AdaptOptions::default()).unwrap();
    let names: Vec<&str> = song.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Verse 1", "Verse 2", "Chorus"]);
}

#[test]
fn test_chord_attachment_respects_threshold() {
    let input = synthetic_song(200);
    for threshold in [0.0, 0.1, 0.5, 0.9] {
        let options = AdaptOptions::default().with_chord_overlap_threshold(threshold).with_simplify_chords(false);
        let song = adapt(&input, &options).unwrap();
        for syllable in song.syllables() {
            assert!(syllable.duration >= 0.0);
            if let Some(label) = &syllable.chord {
                let end = syllable.start_time + syllable.duration;
                let best = input
                    .chords
                    .iter()
                    .filter(|c| &c.label == label)
                    .map(|c| interval_overlap(syllable.start_time, end, c.start, c.end))
                    .fold(0.0, f64::max);
                assert!(best >= threshold * syllable.duration - 1e-12);
            }
        }
    }
}

#[test]
fn test_stats_add_up() {
    let song = adapt(&synthetic_song(120), &AdaptOptions::default().with_chord_overlap_threshold(0.9)).unwrap();
    let stats = chord_mapping_stats(&song);
    assert_eq!(stats.total_syllables, 120);
    assert_eq!(stats.syllables_with_chords + stats.syllables_without_chords, stats.total_syllables);
    let expected = 100.0 * stats.syllables_with_chords as f64 / stats.total_syllables as f64;
    assert!((stats.coverage_percentage - expected).abs() < 1e-9);
}

#[test]
fn test_adapt_is_deterministic() {
    let input = synthetic_song(300);
    let first = adapt(&input, &AdaptOptions::default()).unwrap();
    let second = adapt(&input, &AdaptOptions::default()).unwrap();
    assert_eq!(first, second);
    assert_eq!(serde_json::to_string(&first).unwrap(), serde_json::to_string(&second).unwrap());
}

#[test]
fn test_input_is_not_mutated() {
    let input = synthetic_song(50);
    let copy = input.clone();
    let _ = adapt(&input, &AdaptOptions::default()).unwrap();
    assert_eq!(input, copy);
}

#[test]
fn test_shape_errors_have_codes() {
    let err = adapt_json(r#"{"id": "x", "durationSeconds": "long"}"#, &AdaptOptions::default()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidInputShape);

    let err = adapt_json("not json", &AdaptOptions::default()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidJson);
}

#[test]
fn test_safe_and_batch() {
    let good = serde_json::to_value(synthetic_song(16)).unwrap();
    let bad: Value = json!({ "id": "broken", "durationSeconds": 1.0, "tempo": {}, "chords": [], "lyrics": [] });

    assert!(adapt_safe(&bad, &AdaptOptions::default()).is_none());
    let fallback = adapt_safe(&bad, &AdaptOptions::default()).unwrap_or_else(|| empty_hierarchy(None, None));
    assert!(validate(&fallback));
    assert!(fallback.sections.is_empty());

    let results = adapt_batch(&[bad, good], &AdaptOptions::default());
    assert!(results[0].is_err());
    assert_eq!(results[1].as_ref().unwrap().syllables().count(), 16);
}

#[test]
fn test_output_json_shape() {
    let mut input = FlatInput::new("j", 2.0, 120.0);
    input.lyrics = vec![LyricEvent::new(0.0, 0.5, "la"), LyricEvent::new(0.5, 1.0, "di")];
    input.chords = vec![ChordInterval::new(0.5, 1.0, "G:min")];
    let song = adapt(&input, &AdaptOptions::default()).unwrap();
    let value = serde_json::to_value(&song).unwrap();

    assert_eq!(value["key"], "Unknown");
    assert_eq!(value["bpm"], 120);
    let syllables = &value["sections"][0]["lines"][0]["syllables"];
    assert_eq!(syllables[0]["startTime"], 0.0);
    assert!(syllables[0].get("chord").is_none());
    assert_eq!(syllables[1]["chord"], "Gm");
}

#[test]
fn test_performance_500_events() {
    let input = synthetic_song(500);
    let options = AdaptOptions::default();

    let start = Instant::now();
    let song = adapt(&input, &options).unwrap();
    let elapsed = start.elapsed();
    assert_eq!(song.syllables().count(), 500);
    assert!(elapsed.as_millis() < 50, "adapt took {:?}", elapsed);

    let runs = 10;
    let start = Instant::now();
    for _ in 0..runs {
        adapt(&input, &options).unwrap();
    }
    let average = start.elapsed() / runs;
    assert!(average.as_millis() < 50, "average adapt took {:?}", average);
}

#[test]
fn test_performance_batch() {
    let songs: Vec<Value> = [120, 250, 400, 180, 300]
        .iter()
        .map(|&n| serde_json::to_value(synthetic_song(n)).unwrap())
        .collect();
    let start = Instant::now();
    let results = adapt_batch(&songs, &AdaptOptions::default());
    let elapsed = start.elapsed();
    assert!(results.iter().all(Result::is_ok));
    assert!(elapsed.as_millis() < 150, "batch took {:?}", elapsed);
}

#[test]
fn test_locator_frame_budget() {
    let song = adapt(&synthetic_song(5000), &AdaptOptions::default()).unwrap();
    let mut locator = Locator::new(&song);
    let end = song.syllables().last().map(|s| s.start_time + s.duration).unwrap_or(0.0);

    let frames = (end * 60.0) as usize;
    let start = Instant::now();
    let mut hits = 0;
    for frame in 0..frames {
        let t = frame as f64 / 60.0;
        if let Some(active) = locator.locate(t) {
            hits += 1;
            let window = render_window(locator.index().line_count(), Some(active.global_line_index), 10);
            assert!(window.contains(&active.global_line_index));
        }
    }
    let per_frame = start.elapsed() / frames.max(1) as u32;
    assert!(hits > 0);
    assert!(per_frame.as_micros() < 1000, "locate took {:?} per frame", per_frame);
}
