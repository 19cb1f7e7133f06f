//! Chord-to-syllable mapping
//!
//! Each syllable takes the chord interval it overlaps most. Chords are
//! indexed by start time with a running maximum of their end times, so a
//! lookup binary-searches to the candidates that can overlap instead of
//! scanning every chord.

use serde::{Deserialize, Serialize};

use crate::flat::ChordInterval;
use crate::hierarchy::Hierarchy;

use super::simplifier::simplify_chord_label;

/// Length of the intersection of `[a_start, a_end)` and `[b_start, b_end)`.
///
/// Reversed intervals clamp to zero rather than going negative.
pub fn interval_overlap(a_start: f64, a_end: f64, b_start: f64, b_end: f64) -> f64 {
    (a_end.min(b_end) - a_start.max(b_start)).max(0.0)
}

#[derive(Debug, Clone, Copy)]
struct IndexedChord {
    start: f64,
    end: f64,
    /// Position in the caller's chord list; breaks ties.
    order: usize,
}

/// Start-sorted chord index.
#[derive(Debug, Clone)]
pub struct ChordIndex<'a> {
    chords: &'a [ChordInterval],
    sorted: Vec<IndexedChord>,
    /// `max_end[i]` = largest `end` among `sorted[..=i]`.
    max_end: Vec<f64>,
}

impl<'a> ChordIndex<'a> {
    pub fn new(chords: &'a [ChordInterval]) -> Self {
        let mut sorted: Vec<IndexedChord> = Vec::with_capacity(chords.len());
        for (order, chord) in chords.iter().enumerate() {
            if !chord.start.is_finite() || !chord.end.is_finite() {
                tracing::warn!(index = order, label = chord.label.as_str(), "chords: skipping non-finite interval");
                continue;
            }
            if chord.end < chord.start {
                tracing::warn!(
                    index = order,
                    start = chord.start,
                    end = chord.end,
                    "chords: reversed interval never overlaps"
                );
            }
            sorted.push(IndexedChord { start: chord.start, end: chord.end, order });
        }
        sorted.sort_by(|a, b| a.start.total_cmp(&b.start).then(a.order.cmp(&b.order)));

        let mut max_end = Vec::with_capacity(sorted.len());
        let mut running = f64::NEG_INFINITY;
        for chord in &sorted {
            running = running.max(chord.end);
            max_end.push(running);
        }

        Self { chords, sorted, max_end }
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Sorted positions that may intersect anything touching `[start, end]`.
    fn candidates(&self, start: f64, end_inclusive: f64) -> &[IndexedChord] {
        let lo = self.max_end.partition_point(|&m| m <= start);
        let hi = self.sorted.partition_point(|c| c.start <= end_inclusive);
        if lo >= hi {
            &[]
        } else {
            &self.sorted[lo..hi]
        }
    }

    /// Chord with the largest overlap with `[start, end)` and that overlap.
    ///
    /// Equal overlaps go to the chord listed first. Returns `None` when
    /// nothing overlaps.
    pub fn best_overlap(&self, start: f64, end: f64) -> Option<(&'a ChordInterval, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for chord in self.candidates(start, end) {
            let overlap = interval_overlap(start, end, chord.start, chord.end);
            if overlap <= 0.0 {
                continue;
            }
            best = match best {
                Some((order, best_overlap))
                    if best_overlap > overlap || (best_overlap == overlap && order < chord.order) =>
                {
                    Some((order, best_overlap))
                }
                _ => Some((chord.order, overlap)),
            };
        }
        best.map(|(order, overlap)| (&self.chords[order], overlap))
    }

    /// First-listed chord whose half-open interval contains `time`.
    pub fn chord_at(&self, time: f64) -> Option<&'a ChordInterval> {
        self.candidates(time, time)
            .iter()
            .filter(|c| c.start <= time && time < c.end)
            .map(|c| c.order)
            .min()
            .map(|order| &self.chords[order])
    }

    /// Chord for a syllable spanning `[start, end)`, if its overlap is at
    /// least `threshold` of the syllable's duration.
    ///
    /// A zero-length syllable has no overlap to measure; it takes the chord
    /// sounding at its start.
    pub fn chord_for(&self, start: f64, end: f64, threshold: f64) -> Option<&'a ChordInterval> {
        let duration = (end - start).max(0.0);
        if duration == 0.0 {
            return self.chord_at(start);
        }
        let (chord, overlap) = self.best_overlap(start, end)?;
        if overlap >= threshold * duration {
            Some(chord)
        } else {
            None
        }
    }

    /// Every chord with positive overlap with `[start, end)`, in input order.
    pub fn overlapping(&self, start: f64, end: f64) -> Vec<&'a ChordInterval> {
        let mut orders: Vec<usize> = self
            .candidates(start, end)
            .iter()
            .filter(|c| interval_overlap(start, end, c.start, c.end) > 0.0)
            .map(|c| c.order)
            .collect();
        orders.sort_unstable();
        orders.into_iter().map(|order| &self.chords[order]).collect()
    }
}

/// Display label for the chord under `[start, end)`, or `None`.
pub fn map_chord(
    index: &ChordIndex<'_>,
    start: f64,
    end: f64,
    threshold: f64,
    simplify: bool,
) -> Option<String> {
    let chord = index.chord_for(start, end, threshold)?;
    if simplify {
        Some(simplify_chord_label(&chord.label))
    } else {
        Some(chord.label.clone())
    }
}

/// Chords overlapping `[start, end)`, in input order.
pub fn find_overlapping_chords(chords: &[ChordInterval], start: f64, end: f64) -> Vec<&ChordInterval> {
    ChordIndex::new(chords).overlapping(start, end)
}

/// How many syllables carry a chord.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordMappingStats {
    pub total_syllables: usize,
    pub syllables_with_chords: usize,
    pub syllables_without_chords: usize,
    /// `100 * with / total`, or 0 for a song without syllables.
    pub coverage_percentage: f64,
}

pub fn chord_mapping_stats(hierarchy: &Hierarchy) -> ChordMappingStats {
    let mut total = 0usize;
    let mut with_chords = 0usize;
    for syllable in hierarchy.syllables() {
        total += 1;
        if syllable.chord.is_some() {
            with_chords += 1;
        }
    }
    let coverage_percentage = if total == 0 {
        0.0
    } else {
        100.0 * with_chords as f64 / total as f64
    };
    ChordMappingStats {
        total_syllables: total,
        syllables_with_chords: with_chords,
        syllables_without_chords: total - with_chords,
        coverage_percentage,
    }
}
