//! Render segments: the flat, category-tagged output consumed by the calendar.

use serde::Serialize;

use crate::busy::BusyBlock;
use crate::classify::{classify_density, Classification, Palette};
use crate::density::DensityBlock;
use crate::interval::Interval;
use crate::records::RecordId;

/// Output category of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Busy,
    Preferred,
    Overlap,
}

impl SegmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SegmentKind::Busy => "busy",
            SegmentKind::Preferred => "preferred",
            SegmentKind::Overlap => "overlap",
        }
    }
}

/// Time with busy participants and no preferring users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusySegment {
    pub id: String,
    #[serde(flatten)]
    pub interval: Interval,
    pub duration_minutes: i64,
    pub busy_count: u32,
}

/// Time preferred by at least one user with nobody busy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferredSegment {
    pub id: String,
    #[serde(flatten)]
    pub interval: Interval,
    pub duration_minutes: i64,
    pub user_count: usize,
    pub user_ids: Vec<RecordId>,
    pub user_names: Vec<String>,
    pub range_ids: Vec<RecordId>,
    #[serde(flatten)]
    pub classification: Classification,
}

/// Time that is both busy and preferred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlapSegment {
    pub id: String,
    #[serde(flatten)]
    pub interval: Interval,
    pub duration_minutes: i64,
    pub busy_count: u32,
    pub preferred_count: usize,
    /// Classified from the preferred side.
    #[serde(flatten)]
    pub classification: Classification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RenderSegment {
    Busy(BusySegment),
    #[serde(rename = "preferred")]
    PreferredOnly(PreferredSegment),
    Overlap(OverlapSegment),
}

/// Resolved fill and text colors for a density-classified segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentColors<'a> {
    pub fill: &'a str,
    pub text: &'a str,
}

impl RenderSegment {
    pub(crate) fn busy(interval: Interval, block: &BusyBlock) -> Self {
        RenderSegment::Busy(BusySegment {
            id: String::new(),
            interval,
            duration_minutes: interval.duration_minutes(),
            busy_count: block.busy_count,
        })
    }

    pub(crate) fn preferred(interval: Interval, block: &DensityBlock) -> Self {
        RenderSegment::PreferredOnly(PreferredSegment {
            id: String::new(),
            interval,
            duration_minutes: interval.duration_minutes(),
            user_count: block.user_count,
            user_ids: block.user_ids.clone(),
            user_names: block.user_names.clone(),
            range_ids: block.range_ids.clone(),
            classification: classify_density(block.user_count),
        })
    }

    pub(crate) fn overlap(interval: Interval, busy: &BusyBlock, density: &DensityBlock) -> Self {
        RenderSegment::Overlap(OverlapSegment {
            id: String::new(),
            interval,
            duration_minutes: interval.duration_minutes(),
            busy_count: busy.busy_count,
            preferred_count: density.user_count,
            classification: classify_density(density.user_count),
        })
    }

    pub fn kind(&self) -> SegmentKind {
        match self {
            RenderSegment::Busy(_) => SegmentKind::Busy,
            RenderSegment::PreferredOnly(_) => SegmentKind::Preferred,
            RenderSegment::Overlap(_) => SegmentKind::Overlap,
        }
    }

    /// Batch-unique identifier of the form `<kind>-<n>`.
    pub fn id(&self) -> &str {
        match self {
            RenderSegment::Busy(s) => &s.id,
            RenderSegment::PreferredOnly(s) => &s.id,
            RenderSegment::Overlap(s) => &s.id,
        }
    }

    pub fn interval(&self) -> Interval {
        match self {
            RenderSegment::Busy(s) => s.interval,
            RenderSegment::PreferredOnly(s) => s.interval,
            RenderSegment::Overlap(s) => s.interval,
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        self.interval().duration_minutes()
    }

    /// Density classification, if the segment carries preferred users.
    pub fn classification(&self) -> Option<Classification> {
        match self {
            RenderSegment::Busy(_) => None,
            RenderSegment::PreferredOnly(s) => Some(s.classification),
            RenderSegment::Overlap(s) => Some(s.classification),
        }
    }

    /// Look up this segment's colors in `palette`. Busy-only segments have no
    /// density colors.
    pub fn colors<'a>(&self, palette: &'a Palette) -> Option<SegmentColors<'a>> {
        self.classification().map(|c| SegmentColors {
            fill: palette.fill(c.band),
            text: palette.text(c.emphasis),
        })
    }

    fn set_id(&mut self, id: String) {
        match self {
            RenderSegment::Busy(s) => s.id = id,
            RenderSegment::PreferredOnly(s) => s.id = id,
            RenderSegment::Overlap(s) => s.id = id,
        }
    }
}

/// Order segments by start (then category) and number them per category.
pub(crate) fn finalize(mut segments: Vec<RenderSegment>) -> Vec<RenderSegment> {
    segments.sort_by_key(|s| (s.interval().start(), s.kind()));

    let (mut busy, mut preferred, mut overlap) = (0usize, 0usize, 0usize);
    for segment in &mut segments {
        let counter = match segment.kind() {
            SegmentKind::Busy => &mut busy,
            SegmentKind::Preferred => &mut preferred,
            SegmentKind::Overlap => &mut overlap,
        };
        let id = format!("{}-{}", segment.kind().as_str(), *counter);
        *counter += 1;
        segment.set_id(id);
    }
    segments
}
