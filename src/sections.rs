//! # Section Building
//!
//! Places grouped lines into the analysis' section intervals.
//!
//! ## Assignment Rules
//! 1. Sections are ordered by start time (input order among equal starts).
//! 2. A line goes to the section its span overlaps most.
//! 3. Equal overlap: the earliest-starting section wins.
//! 4. A line that overlaps no section is not dropped. It goes to the nearest
//!    section by gap, ties again to the earliest-starting one.
//! 5. Without sections, one synthetic `"Song"` section holds every line.
//!
//! Repeated names are then numbered in order of appearance
//! (`Verse, Verse, Chorus` → `Verse 1, Verse 2, Chorus`).
//!
//! Empty sections are kept: an instrumental track still shows its
//! structure. Call [`drop_empty_sections`] where placeholders are unwanted.

use std::collections::{HashMap, HashSet};

use crate::chords::interval_overlap;
use crate::flat::SectionInterval;
use crate::hierarchy::{Line, Section};

pub const DEFAULT_SECTION_NAME: &str = "Song";

/// Assign lines to sections and number repeated names.
pub fn build_sections(lines: Vec<Line>, provided: Option<&[SectionInterval]>) -> Vec<Section> {
    let intervals = match provided {
        Some(intervals) if !intervals.is_empty() => intervals,
        _ => {
            return vec![Section { name: DEFAULT_SECTION_NAME.to_string(), lines }];
        }
    };

    let mut ordered: Vec<&SectionInterval> = intervals.iter().collect();
    ordered.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut sections: Vec<Section> = ordered.iter().map(|s| Section::new(&s.label)).collect();
    for line in lines {
        let Some(span) = line_bounds(&line) else {
            continue;
        };
        let target = assign_line(span, &ordered);
        sections[target].lines.push(line);
    }

    let names: Vec<String> = sections.iter().map(|s| s.name.clone()).collect();
    for (section, name) in sections.iter_mut().zip(number_repeated_names(&names)) {
        section.name = name;
    }

    tracing::debug!(
        sections = sections.len(),
        empty = sections.iter().filter(|s| s.lines.is_empty()).count(),
        "sections: assigned lines"
    );
    sections
}

fn line_bounds(line: &Line) -> Option<(f64, f64)> {
    let start = line.start_time()?;
    let end = line.end_time()?.max(start);
    Some((start, end))
}

/// Index into `ordered` that should hold a line spanning `span`.
///
/// `ordered` must be non-empty and sorted by start.
fn assign_line((start, end): (f64, f64), ordered: &[&SectionInterval]) -> usize {
    let mut best: Option<(usize, f64)> = None;
    for (i, section) in ordered.iter().enumerate() {
        let overlap = interval_overlap(start, end, section.start, section.end);
        if overlap > 0.0 && best.map_or(true, |(_, b)| overlap > b) {
            best = Some((i, overlap));
        }
    }
    if let Some((i, _)) = best {
        return i;
    }

    let mut nearest = 0;
    let mut nearest_gap = f64::INFINITY;
    for (i, section) in ordered.iter().enumerate() {
        let gap = gap_between(start, end, section.start, section.end.max(section.start));
        if gap < nearest_gap {
            nearest = i;
            nearest_gap = gap;
        }
    }
    nearest
}

/// Distance between two intervals; zero when they touch or overlap.
fn gap_between(a_start: f64, a_end: f64, b_start: f64, b_end: f64) -> f64 {
    if a_end <= b_start {
        b_start - a_end
    } else if a_start >= b_end {
        a_start - b_end
    } else {
        0.0
    }
}

/// Suffix names that occur more than once with a 1-based occurrence number.
///
/// A suffix that would collide with another section's name is skipped, so
/// every returned name is distinct.
///
/// # Example
/// ```
/// use songmap::number_repeated_names;
///
/// let names = ["Verse", "Verse", "Chorus"].map(String::from);
/// assert_eq!(number_repeated_names(&names), vec!["Verse 1", "Verse 2", "Chorus"]);
/// ```
pub fn number_repeated_names(names: &[String]) -> Vec<String> {
    let mut totals: HashMap<&str, usize> = HashMap::new();
    for name in names {
        *totals.entry(name.as_str()).or_insert(0) += 1;
    }

    let mut taken: HashSet<String> =
        names.iter().filter(|name| totals[name.as_str()] < 2).cloned().collect();
    let mut seen: HashMap<&str, usize> = HashMap::new();
    names
        .iter()
        .map(|name| {
            if totals[name.as_str()] < 2 {
                return name.clone();
            }
            let n = seen.entry(name.as_str()).or_insert(0);
            loop {
                *n += 1;
                let numbered = format!("{} {}", name, n);
                if taken.insert(numbered.clone()) {
                    return numbered;
                }
            }
        })
        .collect()
}

/// Remove sections without lines.
pub fn drop_empty_sections(sections: &mut Vec<Section>) {
    sections.retain(|section| !section.lines.is_empty());
}
