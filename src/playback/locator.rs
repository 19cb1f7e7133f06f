//! Active syllable lookup
//!
//! Flattens the hierarchy into a start-sorted syllable index once, then
//! answers "which syllable is sounding at time t" per frame. The stateful
//! [`Locator`] remembers the previous answer and checks it and its successor
//! before falling back to a binary search, so steady playback is O(1) and a
//! seek in either direction is O(log n).
//!
//! Syllables may overlap (a held note under a short ad-lib). The last
//! syllable to start before `t` is then not necessarily still sounding, so
//! the lookup walks back from it while a prefix maximum of end times says an
//! earlier entry can still contain `t`. The latest-started match wins.

use crate::hierarchy::Hierarchy;

use super::types::ActiveSyllable;

#[derive(Debug, Clone, Copy, PartialEq)]
struct TimedSyllable {
    start: f64,
    end: f64,
    section_index: usize,
    line_index: usize,
    syllable_index: usize,
    global_line_index: usize,
}

impl TimedSyllable {
    fn contains(&self, time: f64) -> bool {
        time >= self.start && time < self.end
    }

    fn at(&self, time: f64) -> ActiveSyllable {
        ActiveSyllable {
            section_index: self.section_index,
            line_index: self.line_index,
            syllable_index: self.syllable_index,
            global_line_index: self.global_line_index,
            progress: ((time - self.start) / (self.end - self.start)).clamp(0.0, 1.0),
        }
    }
}

/// Start-sorted index over every syllable that can be active.
///
/// Zero-length syllables are left out: their interval `[t, t)` contains no
/// time at all.
#[derive(Debug, Clone, Default)]
pub struct PlaybackIndex {
    entries: Vec<TimedSyllable>,
    /// `max_end[i]` is the latest end among `entries[..=i]`.
    max_end: Vec<f64>,
    /// Global index of each section's first line.
    line_offsets: Vec<usize>,
    line_count: usize,
}

impl PlaybackIndex {
    pub fn new(hierarchy: &Hierarchy) -> Self {
        let mut entries = Vec::new();
        let mut line_offsets = Vec::with_capacity(hierarchy.sections.len());
        let mut global_line_index = 0;

        for (section_index, section) in hierarchy.sections.iter().enumerate() {
            line_offsets.push(global_line_index);
            for (line_index, line) in section.lines.iter().enumerate() {
                for (syllable_index, syllable) in line.syllables.iter().enumerate() {
                    let start = syllable.start_time;
                    let end = syllable.end_time();
                    if !start.is_finite() || !end.is_finite() || end <= start {
                        continue;
                    }
                    entries.push(TimedSyllable {
                        start,
                        end,
                        section_index,
                        line_index,
                        syllable_index,
                        global_line_index,
                    });
                }
                global_line_index += 1;
            }
        }

        // Display order is almost always time order already; the stable sort
        // keeps display order among equal starts.
        entries.sort_by(|a, b| a.start.total_cmp(&b.start));

        let max_end = entries
            .iter()
            .scan(f64::NEG_INFINITY, |latest, entry| {
                *latest = latest.max(entry.end);
                Some(*latest)
            })
            .collect();

        Self { entries, max_end, line_offsets, line_count: global_line_index }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of lines across all sections.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Global line number of `(section, line)`.
    pub fn global_line_index(&self, section_index: usize, line_index: usize) -> Option<usize> {
        let offset = *self.line_offsets.get(section_index)?;
        let next = self.line_offsets.get(section_index + 1).copied().unwrap_or(self.line_count);
        let global = offset + line_index;
        if global < next {
            Some(global)
        } else {
            None
        }
    }

    /// Position of the last entry starting at or before `time`.
    fn last_started(&self, time: f64) -> Option<usize> {
        self.entries.partition_point(|e| e.start <= time).checked_sub(1)
    }

    /// Whether `pos` is the last entry that has started by `time`.
    fn is_last_started(&self, pos: usize, time: f64) -> bool {
        match (self.entries.get(pos), self.entries.get(pos + 1)) {
            (Some(entry), Some(next)) => entry.start <= time && next.start > time,
            (Some(entry), None) => entry.start <= time,
            _ => false,
        }
    }

    /// Latest-started entry at or before `pos` whose interval contains
    /// `time`. Every entry up to `pos` must have started by `time`.
    fn active_from(&self, pos: usize, time: f64) -> Option<ActiveSyllable> {
        let mut pos = pos;
        loop {
            let entry = self.entries.get(pos)?;
            if entry.contains(time) {
                return Some(entry.at(time));
            }
            if pos == 0 || self.max_end[pos - 1] <= time {
                return None;
            }
            pos -= 1;
        }
    }

    /// Stateless lookup by binary search.
    pub fn locate(&self, time: f64) -> Option<ActiveSyllable> {
        if !time.is_finite() {
            return None;
        }
        let pos = self.last_started(time)?;
        self.active_from(pos, time)
    }
}

/// Per-session lookup that reuses the previous frame's position.
///
/// Frames arrive one after another; a seek is just a time that is not near
/// the previous one and is answered by binary search.
#[derive(Debug, Clone)]
pub struct Locator {
    index: PlaybackIndex,
    cursor: Option<usize>,
}

impl Locator {
    pub fn new(hierarchy: &Hierarchy) -> Self {
        Self::from_index(PlaybackIndex::new(hierarchy))
    }

    pub fn from_index(index: PlaybackIndex) -> Self {
        Self { index, cursor: None }
    }

    pub fn index(&self) -> &PlaybackIndex {
        &self.index
    }

    /// Forget the previous position, e.g. when a new song is loaded.
    pub fn reset(&mut self) {
        self.cursor = None;
    }

    /// Active syllable at `time`, or `None` in a silence gap.
    ///
    /// The right edge of every syllable is exclusive: at exactly
    /// `start + duration` the next syllable (if it starts there) is active.
    pub fn locate(&mut self, time: f64) -> Option<ActiveSyllable> {
        if !time.is_finite() {
            return None;
        }

        if let Some(cursor) = self.cursor {
            for pos in [cursor, cursor + 1] {
                if self.index.is_last_started(pos, time) {
                    self.cursor = Some(pos);
                    return self.index.active_from(pos, time);
                }
            }
        }

        self.cursor = self.index.last_started(time);
        self.index.active_from(self.cursor?, time)
    }

    /// Same answer as [`Locator::locate`] without touching the cursor.
    pub fn locate_at(&self, time: f64) -> Option<ActiveSyllable> {
        self.index.locate(time)
    }
}
