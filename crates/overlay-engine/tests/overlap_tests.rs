//! Tests for overlap resolution between busy and density blocks.

use chrono::{DateTime, Utc};
use overlay_engine::classify::DensityBand;
use overlay_engine::segment::{RenderSegment, SegmentKind};
use overlay_engine::{resolve_overlaps, BusyBlock, DensityBlock, Interval, RecordId};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn at(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn interval(start: &str, end: &str) -> Interval {
    Interval::new(at(start), at(end)).unwrap()
}

fn busy(start: &str, end: &str, count: u32) -> BusyBlock {
    BusyBlock {
        interval: interval(start, end),
        busy_count: count,
    }
}

fn density(start: &str, end: &str, users: &[&str]) -> DensityBlock {
    DensityBlock {
        interval: interval(start, end),
        user_count: users.len(),
        user_ids: users.iter().map(|u| RecordId::from(*u)).collect(),
        user_names: users.iter().map(|u| u.to_string()).collect(),
        range_ids: users.iter().map(|u| RecordId::from(format!("r-{}", u))).collect(),
    }
}

fn of_kind(segments: &[RenderSegment], kind: SegmentKind) -> Vec<&RenderSegment> {
    segments.iter().filter(|s| s.kind() == kind).collect()
}

// ── Interior overlap splits the busy block ──────────────────────────────────

#[test]
fn density_inside_busy_splits_busy_into_two_remainders() {
    let busy_blocks = vec![busy("2026-03-16T09:00:00Z", "2026-03-16T11:00:00Z", 3)];
    let density_blocks = vec![density(
        "2026-03-16T10:00:00Z",
        "2026-03-16T10:30:00Z",
        &["a", "b"],
    )];

    let segments = resolve_overlaps(&busy_blocks, &density_blocks);

    assert_eq!(segments.len(), 3);

    match &segments[0] {
        RenderSegment::Busy(s) => {
            assert_eq!(
                s.interval,
                interval("2026-03-16T09:00:00Z", "2026-03-16T10:00:00Z")
            );
            assert_eq!(s.busy_count, 3);
        }
        other => panic!("expected busy segment, got {:?}", other),
    }

    match &segments[1] {
        RenderSegment::Overlap(s) => {
            assert_eq!(
                s.interval,
                interval("2026-03-16T10:00:00Z", "2026-03-16T10:30:00Z")
            );
            assert_eq!(s.busy_count, 3);
            assert_eq!(s.preferred_count, 2);
            assert_eq!(s.classification.band, DensityBand::Band1);
        }
        other => panic!("expected overlap segment, got {:?}", other),
    }

    match &segments[2] {
        RenderSegment::Busy(s) => {
            assert_eq!(
                s.interval,
                interval("2026-03-16T10:30:00Z", "2026-03-16T11:00:00Z")
            );
            assert_eq!(s.busy_count, 3);
        }
        other => panic!("expected busy segment, got {:?}", other),
    }

    // The density block is fully consumed by the overlap.
    assert!(of_kind(&segments, SegmentKind::Preferred).is_empty());
}

#[test]
fn busy_inside_density_yields_single_overlap_and_no_busy_remainder() {
    let busy_blocks = vec![busy("2026-03-16T10:00:00Z", "2026-03-16T10:30:00Z", 1)];
    let density_blocks = vec![density(
        "2026-03-16T09:00:00Z",
        "2026-03-16T12:00:00Z",
        &["a"],
    )];

    let segments = resolve_overlaps(&busy_blocks, &density_blocks);

    assert!(of_kind(&segments, SegmentKind::Busy).is_empty());

    let overlaps = of_kind(&segments, SegmentKind::Overlap);
    assert_eq!(overlaps.len(), 1);
    assert_eq!(overlaps[0].interval(), busy_blocks[0].interval);

    // The density block keeps both sides around the busy block.
    let preferred = of_kind(&segments, SegmentKind::Preferred);
    assert_eq!(preferred.len(), 2);
    assert_eq!(
        preferred[0].interval(),
        interval("2026-03-16T09:00:00Z", "2026-03-16T10:00:00Z")
    );
    assert_eq!(
        preferred[1].interval(),
        interval("2026-03-16T10:30:00Z", "2026-03-16T12:00:00Z")
    );
}

// ── No busy input ───────────────────────────────────────────────────────────

#[test]
fn no_busy_blocks_yields_only_preferred_segments() {
    let density_blocks = vec![
        density("2026-03-16T09:00:00Z", "2026-03-16T10:00:00Z", &["a"]),
        density("2026-03-16T13:00:00Z", "2026-03-16T14:00:00Z", &["b"]),
    ];

    let segments = resolve_overlaps(&[], &density_blocks);

    assert_eq!(segments.len(), 2);
    for segment in &segments {
        match segment {
            RenderSegment::PreferredOnly(p) => assert_eq!(p.user_count, 1),
            other => panic!("expected preferred segment, got {:?}", other),
        }
    }
}

#[test]
fn no_density_blocks_passes_busy_through() {
    let busy_blocks = vec![busy("2026-03-16T09:00:00Z", "2026-03-16T10:00:00Z", 4)];

    let segments = resolve_overlaps(&busy_blocks, &[]);

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].kind(), SegmentKind::Busy);
    assert_eq!(segments[0].interval(), busy_blocks[0].interval);
}

#[test]
fn empty_inputs_yield_nothing() {
    assert!(resolve_overlaps(&[], &[]).is_empty());
}

// ── Touching is not overlapping ─────────────────────────────────────────────

#[test]
fn touching_blocks_produce_no_overlap() {
    let busy_blocks = vec![busy("2026-03-16T09:00:00Z", "2026-03-16T10:00:00Z", 2)];
    let density_blocks = vec![density(
        "2026-03-16T10:00:00Z",
        "2026-03-16T11:00:00Z",
        &["a"],
    )];

    let segments = resolve_overlaps(&busy_blocks, &density_blocks);

    assert!(of_kind(&segments, SegmentKind::Overlap).is_empty());
    assert_eq!(of_kind(&segments, SegmentKind::Busy).len(), 1);
    assert_eq!(of_kind(&segments, SegmentKind::Preferred).len(), 1);
}

// ── One busy block spanning several density blocks ──────────────────────────

#[test]
fn busy_spanning_several_density_blocks() {
    // Busy 09:00-12:00; density {a} 08:00-10:00, {a,b} 10:00-11:00, {b} 11:30-13:00
    let busy_blocks = vec![busy("2026-03-16T09:00:00Z", "2026-03-16T12:00:00Z", 2)];
    let density_blocks = vec![
        density("2026-03-16T08:00:00Z", "2026-03-16T10:00:00Z", &["a"]),
        density("2026-03-16T10:00:00Z", "2026-03-16T11:00:00Z", &["a", "b"]),
        density("2026-03-16T11:30:00Z", "2026-03-16T13:00:00Z", &["b"]),
    ];

    let segments = resolve_overlaps(&busy_blocks, &density_blocks);

    let overlaps: Vec<Interval> = of_kind(&segments, SegmentKind::Overlap)
        .iter()
        .map(|s| s.interval())
        .collect();
    assert_eq!(
        overlaps,
        vec![
            interval("2026-03-16T09:00:00Z", "2026-03-16T10:00:00Z"),
            interval("2026-03-16T10:00:00Z", "2026-03-16T11:00:00Z"),
            interval("2026-03-16T11:30:00Z", "2026-03-16T12:00:00Z"),
        ]
    );

    let busy_only: Vec<Interval> = of_kind(&segments, SegmentKind::Busy)
        .iter()
        .map(|s| s.interval())
        .collect();
    assert_eq!(
        busy_only,
        vec![interval("2026-03-16T11:00:00Z", "2026-03-16T11:30:00Z")]
    );

    let preferred: Vec<Interval> = of_kind(&segments, SegmentKind::Preferred)
        .iter()
        .map(|s| s.interval())
        .collect();
    assert_eq!(
        preferred,
        vec![
            interval("2026-03-16T08:00:00Z", "2026-03-16T09:00:00Z"),
            interval("2026-03-16T12:00:00Z", "2026-03-16T13:00:00Z"),
        ]
    );
}

// ── Ids and ordering ────────────────────────────────────────────────────────

#[test]
fn ids_are_unique_and_numbered_per_kind() {
    let busy_blocks = vec![
        busy("2026-03-16T14:00:00Z", "2026-03-16T15:00:00Z", 1),
        busy("2026-03-16T09:00:00Z", "2026-03-16T11:00:00Z", 3),
    ];
    let density_blocks = vec![density(
        "2026-03-16T10:00:00Z",
        "2026-03-16T10:30:00Z",
        &["a"],
    )];

    let segments = resolve_overlaps(&busy_blocks, &density_blocks);
    let ids: Vec<&str> = segments.iter().map(|s| s.id()).collect();

    assert_eq!(ids, vec!["busy-0", "overlap-0", "busy-1", "busy-2"]);
}

#[test]
fn segments_are_sorted_by_start() {
    let busy_blocks = vec![
        busy("2026-03-16T14:00:00Z", "2026-03-16T15:00:00Z", 1),
        busy("2026-03-16T09:00:00Z", "2026-03-16T10:00:00Z", 1),
    ];
    let density_blocks = vec![density(
        "2026-03-16T11:00:00Z",
        "2026-03-16T12:00:00Z",
        &["a"],
    )];

    let segments = resolve_overlaps(&busy_blocks, &density_blocks);

    for pair in segments.windows(2) {
        assert!(pair[0].interval().start() <= pair[1].interval().start());
    }
}
