//! # overlay-engine
//!
//! Interval-algebra engine for rendering group availability on a single
//! calendar surface.
//!
//! Participants mark "busy" and "preferred" time windows. The engine turns the
//! raw, possibly-overlapping per-user ranges into a minimal, non-overlapping,
//! correctly-labeled partition of the timeline: busy-only, preferred-only, and
//! overlap segments, each carrying accurate counts. Every function is pure and
//! synchronous; nothing is cached between calls.
//!
//! ## Modules
//!
//! - [`interval`] — Half-open `[start, end)` intervals and their algebra
//! - [`records`] — Inbound busy/preferred record contracts (serde)
//! - [`busy`] — Busy records → busy blocks
//! - [`density`] — Preferred ranges → deduplicated density blocks (sweep)
//! - [`classify`] — User count → five-band scale, text emphasis, palette
//! - [`overlap`] — Busy × density → busy-only / preferred-only / overlap
//! - [`segment`] — Render segment output types
//! - [`overlay`] — End-to-end pipeline, window clipping, JSON boundary
//! - [`suggest`] — Rank conflict-free preferred windows
//! - [`error`] — Error types

pub mod busy;
pub mod classify;
pub mod density;
pub mod error;
pub mod interval;
pub mod overlap;
pub mod overlay;
pub mod records;
pub mod segment;
pub mod suggest;

pub use busy::{map_busy_blocks, BusyBlock};
pub use classify::{
    classify_density, Classification, DensityBand, Palette, TextEmphasis, BAND_UPPER_BOUNDS,
    INVERSE_TEXT_THRESHOLD,
};
pub use density::{
    compute_density_blocks, merge_adjacent_blocks, preferred_ranges, DensityBlock,
    PreferredRange,
};
pub use error::OverlayError;
pub use interval::Interval;
pub use overlap::resolve_overlaps;
pub use overlay::{compose_overlay, compose_overlay_json, compose_overlay_within};
pub use records::{
    parse_busy_records, parse_instant, parse_preferred_records, BusyRecord, PreferredRecord,
    RecordId,
};
pub use segment::{RenderSegment, SegmentColors, SegmentKind};
pub use suggest::{best_meeting_window, rank_meeting_windows};
