use serde::Serialize;
use songmap::playback::{render_window as window_range, Locator, DEFAULT_RENDER_BUFFER};
use songmap::{AdaptOptions, FlatInput, Hierarchy, SongMapError};
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct AdaptError {
    code: &'static str,
    message: String,
}

#[derive(Serialize)]
struct Diagnostic {
    severity: String,
    field: String,
    message: String,
}

#[derive(Serialize)]
struct RenderRange {
    start: usize,
    end: usize,
}

fn to_js_error(e: SongMapError) -> JsValue {
    let error = AdaptError { code: e.code().as_str(), message: e.to_string() };
    let json = serde_json::to_string(&error)
        .unwrap_or_else(|_| format!(r#"{{"code":"{}","message":""}}"#, error.code));
    JsValue::from_str(&json)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| to_js_error(SongMapError::Json(e.to_string())))
}

fn options(options_yaml: Option<String>) -> Result<AdaptOptions, SongMapError> {
    match options_yaml.as_deref() {
        Some(yaml) => AdaptOptions::from_yaml(yaml),
        None => Ok(AdaptOptions::default()),
    }
}

fn range_json(start: usize, end: usize) -> String {
    serde_json::to_string(&RenderRange { start, end }).unwrap_or_else(|_| "{}".to_string())
}

/// Adapt a flat analysis result (JSON) into a hierarchy (JSON)
#[wasm_bindgen]
pub fn adapt(json: &str, options_yaml: Option<String>) -> Result<String, JsValue> {
    let options = options(options_yaml).map_err(to_js_error)?;
    let hierarchy = songmap::adapt_json(json, &options).map_err(to_js_error)?;
    to_json(&hierarchy)
}

/// Adapt, falling back to an empty hierarchy on any error
#[wasm_bindgen]
pub fn adapt_safe(json: &str, options_yaml: Option<String>) -> String {
    let hierarchy = options(options_yaml)
        .ok()
        .and_then(|options| {
            let value: serde_json::Value = serde_json::from_str(json).ok()?;
            songmap::adapt_safe(&value, &options)
        })
        .unwrap_or_else(|| songmap::empty_hierarchy(None, None));
    serde_json::to_string(&hierarchy).unwrap_or_else(|_| "{}".to_string())
}

/// Lint a flat analysis result and return diagnostics as a JSON array.
/// Inputs that fail the shape check produce a single error diagnostic.
#[wasm_bindgen]
pub fn lint(json: &str) -> String {
    let diagnostics: Vec<Diagnostic> = match FlatInput::from_json(json) {
        Ok(input) => songmap::lint(&input)
            .into_iter()
            .map(|d| Diagnostic {
                severity: "warning".to_string(),
                field: d.field,
                message: d.message,
            })
            .collect(),
        Err(e) => {
            let field = match &e {
                SongMapError::InvalidInputShape { field, .. } => field.clone(),
                _ => String::new(),
            };
            vec![Diagnostic { severity: "error".to_string(), field, message: e.to_string() }]
        }
    };

    serde_json::to_string(&diagnostics).unwrap_or_else(|_| "[]".to_string())
}

#[wasm_bindgen]
pub fn empty_hierarchy(title: Option<String>, artist: Option<String>) -> String {
    let hierarchy = songmap::empty_hierarchy(title.as_deref(), artist.as_deref());
    serde_json::to_string(&hierarchy).unwrap_or_else(|_| "{}".to_string())
}

/// Range of global line indices to render, as `{ start, end }` JSON.
/// A negative `active` means no line is active.
#[wasm_bindgen]
pub fn render_window(total: usize, active: i32, buffer: Option<usize>) -> String {
    let range = window_range(total, usize::try_from(active).ok(), buffer.unwrap_or(DEFAULT_RENDER_BUFFER));
    range_json(range.start, range.end)
}

/// Per-frame lookups against one adapted song
#[wasm_bindgen]
pub struct PlaybackSession {
    locator: Locator,
}

#[wasm_bindgen]
impl PlaybackSession {
    #[wasm_bindgen(constructor)]
    pub fn new(hierarchy_json: &str) -> Result<PlaybackSession, JsValue> {
        let hierarchy: Hierarchy = serde_json::from_str(hierarchy_json)
            .map_err(|e| to_js_error(SongMapError::Json(e.to_string())))?;
        hierarchy.check().map_err(to_js_error)?;
        Ok(PlaybackSession { locator: Locator::new(&hierarchy) })
    }

    /// Active syllable at `time`, or `null` when nothing is being sung
    pub fn locate(&mut self, time: f64) -> JsValue {
        match self.locator.locate(time) {
            Some(active) => serde_wasm_bindgen::to_value(&active).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }

    pub fn line_count(&self) -> usize {
        self.locator.index().line_count()
    }

    pub fn reset(&mut self) {
        self.locator.reset();
    }

    pub fn render_window(&self, active: i32, buffer: Option<usize>) -> String {
        render_window(self.line_count(), active, buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lint_reports_shape_errors() {
        let json = lint(r#"{"id": "x", "durationSeconds": 1.0}"#);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["severity"], "error");
        assert_eq!(parsed[0]["field"], "tempo");
    }

    #[test]
    fn adapt_safe_falls_back() {
        let json = adapt_safe("not json", None);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["title"], "Unknown Title");
        assert_eq!(parsed["sections"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn render_window_without_active_line() {
        assert_eq!(render_window(30, -1, None), r#"{"start":0,"end":10}"#);
        assert_eq!(render_window(30, 15, Some(2)), r#"{"start":13,"end":18}"#);
    }
}
