//! The full pipeline: raw records → busy/density blocks → render segments.

use chrono::{DateTime, Utc};

use crate::busy::{map_busy_blocks, BusyBlock};
use crate::density::{compute_density_blocks, preferred_ranges, PreferredRange};
use crate::error::{OverlayError, Result};
use crate::interval::Interval;
use crate::overlap::resolve_overlaps;
use crate::records::{parse_busy_records, parse_preferred_records, BusyRecord, PreferredRecord};
use crate::segment::{RenderSegment, SegmentKind};

/// Compute the render segments for one event's busy and preferred records.
///
/// Records with `end <= start` are dropped; empty inputs produce an empty
/// overlay.
pub fn compose_overlay(busy: &[BusyRecord], preferred: &[PreferredRecord]) -> Vec<RenderSegment> {
    compose(map_busy_blocks(busy), preferred_ranges(preferred))
}

/// Like [`compose_overlay`], but every interval is first clipped to
/// `[window_start, window_end)`. Intervals entirely outside the window are
/// discarded.
///
/// # Errors
/// Returns `OverlayError::InvalidWindow` if `window_end <= window_start`.
pub fn compose_overlay_within(
    busy: &[BusyRecord],
    preferred: &[PreferredRecord],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Result<Vec<RenderSegment>> {
    let window = Interval::new(window_start, window_end).ok_or(OverlayError::InvalidWindow {
        start: window_start,
        end: window_end,
    })?;

    let busy_blocks: Vec<BusyBlock> = map_busy_blocks(busy)
        .into_iter()
        .filter_map(|block| {
            block.interval.intersection(&window).map(|interval| BusyBlock {
                interval,
                ..block
            })
        })
        .collect();

    let ranges: Vec<PreferredRange> = preferred_ranges(preferred)
        .into_iter()
        .filter_map(|range| {
            range
                .interval
                .intersection(&window)
                .map(|interval| PreferredRange { interval, ..range })
        })
        .collect();

    Ok(compose(busy_blocks, ranges))
}

/// JSON in, JSON out: parse both record arrays, compose, and serialize the
/// segments.
///
/// # Errors
/// Returns the record errors of [`parse_busy_records`] and
/// [`parse_preferred_records`] (malformed JSON, a `null` or missing bound, an
/// unrecognized datetime), and `OverlayError::Serialization` if the output
/// cannot be encoded.
pub fn compose_overlay_json(busy_json: &str, preferred_json: &str) -> Result<String> {
    let busy = parse_busy_records(busy_json)?;
    let preferred = parse_preferred_records(preferred_json)?;
    let segments = compose_overlay(&busy, &preferred);
    Ok(serde_json::to_string(&segments)?)
}

fn compose(busy: Vec<BusyBlock>, ranges: Vec<PreferredRange>) -> Vec<RenderSegment> {
    let density = compute_density_blocks(&ranges);
    tracing::trace!(
        busy_blocks = busy.len(),
        preferred_ranges = ranges.len(),
        density_blocks = density.len(),
        "computed overlay inputs"
    );

    let segments = resolve_overlaps(&busy, &density);

    let count = |kind: SegmentKind| segments.iter().filter(|s| s.kind() == kind).count();
    tracing::debug!(
        busy = count(SegmentKind::Busy),
        preferred = count(SegmentKind::Preferred),
        overlap = count(SegmentKind::Overlap),
        "composed overlay segments"
    );

    segments
}
