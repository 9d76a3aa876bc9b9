//! Pick candidate meeting times from a composed overlay.
//!
//! Only preferred-only segments qualify: they are preferred by at least one
//! user and nobody is busy during them.

use std::cmp::Reverse;

use crate::segment::{PreferredSegment, RenderSegment};

/// Preferred-only segments lasting at least `min_duration_minutes`, best first.
///
/// Ordering: more preferring users, then earlier start, then longer duration.
pub fn rank_meeting_windows(
    segments: &[RenderSegment],
    min_duration_minutes: i64,
) -> Vec<&PreferredSegment> {
    let mut windows: Vec<&PreferredSegment> = segments
        .iter()
        .filter_map(|segment| match segment {
            RenderSegment::PreferredOnly(p) => Some(p),
            _ => None,
        })
        .filter(|p| p.duration_minutes >= min_duration_minutes)
        .collect();

    windows.sort_by_key(|p| {
        (
            Reverse(p.user_count),
            p.interval.start(),
            Reverse(p.duration_minutes),
        )
    });
    windows
}

/// The top-ranked window from [`rank_meeting_windows`], if any qualifies.
pub fn best_meeting_window(
    segments: &[RenderSegment],
    min_duration_minutes: i64,
) -> Option<&PreferredSegment> {
    rank_meeting_windows(segments, min_duration_minutes)
        .into_iter()
        .next()
}
