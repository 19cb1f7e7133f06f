//! Render windowing and scroll positioning
//!
//! Long songs keep only a band of lines around the active one materialized.
//! The scroll offset is always computed from a cumulative line-height table
//! and the active line, never by nudging the previous offset, so a dropped
//! frame or relayout cannot make it drift.

use std::ops::Range;

pub const DEFAULT_RENDER_BUFFER: usize = 10;

/// Lines to keep materialized: `[i - buffer, i + buffer + 1)` clipped to
/// `[0, total)`.
///
/// With no active line the window is the first `buffer` lines.
///
/// # Example
/// ```
/// use songmap::playback::render_window;
///
/// assert_eq!(render_window(100, Some(50), 10), 40..61);
/// assert_eq!(render_window(100, Some(3), 10), 0..14);
/// assert_eq!(render_window(100, None, 10), 0..10);
/// ```
pub fn render_window(total: usize, active: Option<usize>, buffer: usize) -> Range<usize> {
    match active {
        Some(i) => {
            let end = i.saturating_add(buffer).saturating_add(1).min(total);
            let start = i.saturating_sub(buffer).min(end);
            start..end
        }
        None => 0..buffer.min(total),
    }
}

/// Cumulative line heights for absolute scroll positioning.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollLayout {
    /// `tops[i]` is the top edge of line `i`; the last entry is the total height.
    tops: Vec<f64>,
}

impl ScrollLayout {
    /// Negative or non-finite heights count as zero.
    pub fn new(line_heights: &[f64]) -> Self {
        let mut tops = Vec::with_capacity(line_heights.len() + 1);
        let mut y = 0.0;
        tops.push(y);
        for &height in line_heights {
            if height.is_finite() && height > 0.0 {
                y += height;
            }
            tops.push(y);
        }
        Self { tops }
    }

    pub fn line_count(&self) -> usize {
        self.tops.len() - 1
    }

    pub fn total_height(&self) -> f64 {
        self.tops[self.tops.len() - 1]
    }

    pub fn line_top(&self, line: usize) -> Option<f64> {
        if line < self.line_count() {
            Some(self.tops[line])
        } else {
            None
        }
    }

    pub fn line_height(&self, line: usize) -> Option<f64> {
        Some(self.tops.get(line + 1)? - self.line_top(line)?)
    }

    /// Offset that centers `line` in a viewport of `viewport_height`,
    /// clamped to the scrollable range.
    pub fn centered_offset(&self, line: usize, viewport_height: f64) -> Option<f64> {
        let top = self.line_top(line)?;
        let height = self.line_height(line)?;
        let max_offset = (self.total_height() - viewport_height).max(0.0);
        let offset = top + height / 2.0 - viewport_height / 2.0;
        Some(offset.clamp(0.0, max_offset))
    }
}
