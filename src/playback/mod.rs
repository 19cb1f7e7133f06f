//! # Playback Module
//!
//! Per-frame queries the display layer runs against a finished hierarchy
//! while the song plays.
//!
//! ## Purpose
//! 1. **Highlighting** - find the syllable sounding at the current time and
//!    how far through it the singer is
//! 2. **Windowing** - bound how many lines are materialized around it
//! 3. **Scrolling** - center the active line from a height table
//!
//! ## Sub-modules
//! - `types` - ActiveSyllable, SyllableState and per-syllable helpers
//! - `locator` - PlaybackIndex (sorted flat index) and Locator (cursor + binary search)
//! - `window` - render_window and ScrollLayout
//!
//! ## Timing Rules
//! - Syllables occupy `[startTime, startTime + duration)`; the end instant
//!   belongs to whatever starts there.
//! - Times in a silence gap resolve to `None`.
//! - Seeking backwards or far forwards needs no special call; the next
//!   lookup simply binary-searches.
//!
//! ## Example
//! ```rust
//! use songmap::playback::{render_window, Locator, DEFAULT_RENDER_BUFFER};
//! use songmap::{adapt, AdaptOptions, FlatInput, LyricEvent};
//!
//! let mut input = FlatInput::new("demo", 2.0, 120.0);
//! input.lyrics = vec![LyricEvent::new(0.5, 0.8, "Hel"), LyricEvent::new(0.8, 1.1, "lo")];
//! let song = adapt(&input, &AdaptOptions::default()).unwrap();
//!
//! let mut locator = Locator::new(&song);
//! let active = locator.locate(0.65).unwrap();
//! assert_eq!(active.syllable_index, 0);
//! assert!((active.progress - 0.5).abs() < 1e-9);
//!
//! assert_eq!(locator.locate(0.8).unwrap().syllable_index, 1);
//! assert!(locator.locate(1.5).is_none());
//!
//! let lines = locator.index().line_count();
//! assert_eq!(render_window(lines, Some(active.global_line_index), DEFAULT_RENDER_BUFFER), 0..1);
//! ```
//!
//! ## Related Modules
//! - `hierarchy` - the read-only structure these queries walk
//! - `api` - builds that structure

mod locator;
mod types;
mod window;


pub use locator::{Locator, PlaybackIndex};
pub use types::{is_sung, syllable_progress, syllable_state, ActiveSyllable, SyllableState};
pub use window::{render_window, ScrollLayout, DEFAULT_RENDER_BUFFER};
