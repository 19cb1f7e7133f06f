//! Line grouping
//!
//! Splits a start-ordered run of lyric events into display lines wherever
//! the singer pauses for longer than the gap threshold.

use crate::flat::LyricEvent;

/// Group start-sorted lyric events into lines.
///
/// A new line starts when `current.start - previous.end` exceeds
/// `gap_threshold` seconds. Every returned line is non-empty; no events
/// means no lines.
///
/// # Example
/// ```
/// use songmap::{group_lines, LyricEvent};
///
/// let events = vec![
///     LyricEvent::new(0.0, 0.4, "one"),
///     LyricEvent::new(0.5, 0.9, "two"),
///     LyricEvent::new(2.5, 2.9, "three"),
/// ];
/// let lines = group_lines(&events, 1.0);
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[1][0].text, "three");
/// ```
pub fn group_lines(events: &[LyricEvent], gap_threshold: f64) -> Vec<&[LyricEvent]> {
    let mut lines = Vec::new();
    if events.is_empty() {
        return lines;
    }

    let mut line_start = 0;
    for i in 1..events.len() {
        let gap = events[i].start - events[i - 1].end;
        if gap > gap_threshold {
            lines.push(&events[line_start..i]);
            line_start = i;
        }
    }
    lines.push(&events[line_start..]);
    lines
}

/// `[first.start, last.end)` of one grouped line.
pub fn line_span(line: &[LyricEvent]) -> Option<(f64, f64)> {
    let first = line.first()?;
    let last = line.last()?;
    Some((first.start, last.end.max(first.start)))
}
