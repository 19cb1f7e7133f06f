//! Chord label simplification
//!
//! Recognizers emit verbose `"<Root>:<quality>"` labels (`"A:min7"`). The
//! display wants lead-sheet symbols (`"Am7"`).

/// Shorten a verbose chord label for display.
///
/// Labels that are not in `"<Root>:<quality>"` form, or whose quality is not
/// in the table, come back unchanged. An empty label stays empty.
///
/// # Quality Table
/// - **Triads**: `maj` → ``, `min` → `m`, `dim` → `dim`, `aug` → `aug`
/// - **Suspended**: `sus2` → `sus2`, `sus4` → `sus4`
/// - **Sevenths**: `7` → `7`, `maj7` → `maj7`, `min7` → `m7`, `dim7` → `dim7`,
///   `hdim7` → `m7b5`, `minmaj7` → `mMaj7`
/// - **Sixths**: `maj6` → `6`, `min6` → `m6`
/// - **Ninths**: `9` → `9`, `maj9` → `maj9`, `min9` → `m9`
///
/// # Examples
/// ```
/// use songmap::simplify_chord_label;
///
/// assert_eq!(simplify_chord_label("C:maj"), "C");
/// assert_eq!(simplify_chord_label("A:min7"), "Am7");
/// assert_eq!(simplify_chord_label("G:sus4"), "Gsus4");
///
/// // Already simplified or unknown: unchanged
/// assert_eq!(simplify_chord_label("Am7"), "Am7");
/// assert_eq!(simplify_chord_label("N"), "N");
/// ```
pub fn simplify_chord_label(label: &str) -> String {
    let Some((root, quality)) = label.split_once(':') else {
        return label.to_string();
    };
    let root = root.trim();
    if root.is_empty() {
        return label.to_string();
    }

    match quality_suffix(quality.trim()) {
        Some(suffix) => format!("{}{}", root, suffix),
        None => label.to_string(),
    }
}

fn quality_suffix(quality: &str) -> Option<&'static str> {
    let suffix = match quality {
        // Triads
        "maj" | "" => "",
        "min" => "m",
        "dim" => "dim",
        "aug" => "aug",

        // Suspended
        "sus2" => "sus2",
        "sus4" => "sus4",

        // Sevenths
        "7" => "7",
        "maj7" => "maj7",
        "min7" => "m7",
        "dim7" => "dim7",
        "hdim7" => "m7b5",
        "minmaj7" => "mMaj7",

        // Sixths
        "maj6" => "6",
        "min6" => "m6",

        // Ninths
        "9" => "9",
        "maj9" => "maj9",
        "min9" => "m9",

        _ => return None,
    };
    Some(suffix)
}
