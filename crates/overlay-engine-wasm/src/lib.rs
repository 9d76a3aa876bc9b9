//! WASM bindings for overlay-engine.
//!
//! Exposes overlay composition, density blocks, classification, and meeting
//! window ranking to the JavaScript calendar via `wasm-bindgen`. All complex
//! types are passed as JSON strings. Any failure surfaces as a thrown string so
//! the calendar can fall back to an empty overlay.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p overlay-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/overlay-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/overlay_engine_wasm.wasm
//! # Rename .js -> .cjs for ESM compatibility
//! mv packages/overlay-engine-js/wasm/overlay_engine_wasm.js \
//!    packages/overlay-engine-js/wasm/overlay_engine_wasm.cjs
//! ```

use overlay_engine::{
    classify_density, compose_overlay, compose_overlay_within, compute_density_blocks,
    parse_busy_records, parse_instant, parse_preferred_records, preferred_ranges,
    rank_meeting_windows, OverlayError, Palette, TextEmphasis,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ClassificationDto<'a> {
    band: u8,
    emphasis: TextEmphasis,
    fill: &'a str,
    text: &'a str,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn err_string(e: OverlayError) -> String {
    e.to_string()
}

fn parse_palette(json: Option<&str>) -> Result<Palette, String> {
    match json {
        Some(json) => serde_json::from_str(json).map_err(|e| format!("Invalid palette JSON: {}", e)),
        None => Ok(Palette::default()),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

// ---------------------------------------------------------------------------
// Boundary logic (plain `Result<_, String>` so it runs off-wasm too)
// ---------------------------------------------------------------------------

fn compose(busy_json: &str, preferred_json: &str) -> Result<String, String> {
    let busy = parse_busy_records(busy_json).map_err(err_string)?;
    let preferred = parse_preferred_records(preferred_json).map_err(err_string)?;
    to_json(&compose_overlay(&busy, &preferred))
}

fn compose_within(
    busy_json: &str,
    preferred_json: &str,
    window_start: &str,
    window_end: &str,
) -> Result<String, String> {
    let busy = parse_busy_records(busy_json).map_err(err_string)?;
    let preferred = parse_preferred_records(preferred_json).map_err(err_string)?;
    let ws = parse_instant(window_start).map_err(err_string)?;
    let we = parse_instant(window_end).map_err(err_string)?;
    let segments = compose_overlay_within(&busy, &preferred, ws, we).map_err(err_string)?;
    to_json(&segments)
}

fn density_blocks(preferred_json: &str) -> Result<String, String> {
    let preferred = parse_preferred_records(preferred_json).map_err(err_string)?;
    to_json(&compute_density_blocks(&preferred_ranges(&preferred)))
}

fn classify(count: u32, palette_json: Option<&str>) -> Result<String, String> {
    let palette = parse_palette(palette_json)?;
    let c = classify_density(count as usize);
    to_json(&ClassificationDto {
        band: c.band.level(),
        emphasis: c.emphasis,
        fill: palette.fill(c.band),
        text: palette.text(c.emphasis),
    })
}

fn meeting_windows(
    busy_json: &str,
    preferred_json: &str,
    min_duration_minutes: i64,
) -> Result<String, String> {
    let busy = parse_busy_records(busy_json).map_err(err_string)?;
    let preferred = parse_preferred_records(preferred_json).map_err(err_string)?;
    let segments = compose_overlay(&busy, &preferred);
    to_json(&rank_meeting_windows(&segments, min_duration_minutes))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compose the calendar overlay from busy and preferred record arrays.
///
/// `busy_json` is an array of `{start_time, end_time, busy_participants_count}`;
/// `preferred_json` is an array of
/// `{id, user_id, user_name, start_time_utc, end_time_utc}`. Returns a JSON array
/// of render segments tagged by `kind` (`busy`, `preferred`, `overlap`).
#[wasm_bindgen(js_name = "composeOverlay")]
pub fn compose_overlay_js(busy_json: &str, preferred_json: &str) -> Result<String, JsValue> {
    compose(busy_json, preferred_json).map_err(js_err)
}

/// Like `composeOverlay`, clipping every interval to `[window_start, window_end)`.
#[wasm_bindgen(js_name = "composeOverlayWithin")]
pub fn compose_overlay_within_js(
    busy_json: &str,
    preferred_json: &str,
    window_start: &str,
    window_end: &str,
) -> Result<String, JsValue> {
    compose_within(busy_json, preferred_json, window_start, window_end).map_err(js_err)
}

/// Compute density blocks for a preferred record array.
#[wasm_bindgen(js_name = "computeDensityBlocks")]
pub fn compute_density_blocks_js(preferred_json: &str) -> Result<String, JsValue> {
    density_blocks(preferred_json).map_err(js_err)
}

/// Classify a user count. Returns `{band, emphasis, fill, text}`, with colors
/// taken from `palette_json` (`{band1..band5, textColor, textColorInverse}`) or
/// the built-in scale when omitted.
#[wasm_bindgen(js_name = "classifyDensity")]
pub fn classify_density_js(count: u32, palette_json: Option<String>) -> Result<String, JsValue> {
    classify(count, palette_json.as_deref()).map_err(js_err)
}

/// Rank conflict-free preferred windows of at least `min_duration_minutes`.
#[wasm_bindgen(js_name = "rankMeetingWindows")]
pub fn rank_meeting_windows_js(
    busy_json: &str,
    preferred_json: &str,
    min_duration_minutes: i32,
) -> Result<String, JsValue> {
    meeting_windows(busy_json, preferred_json, min_duration_minutes as i64).map_err(js_err)
}
