//! Overlap resolution between busy blocks and density blocks.
//!
//! For every busy block, each intersecting density block yields one overlap
//! segment and the intersection is carved out of the busy block; whatever
//! survives is emitted as busy-only. The symmetric pass carves busy time out of
//! each density block to produce the preferred-only segments. Overlaps are only
//! emitted by the first pass.
//!
//! Blocks that merely touch (`a.end == b.start`) have an empty intersection
//! under half-open semantics and never produce an overlap.

use crate::busy::BusyBlock;
use crate::density::DensityBlock;
use crate::interval::{subtract_all, Interval};
use crate::segment::{self, RenderSegment};

/// Resolve busy and density blocks into disjoint busy-only, preferred-only, and
/// overlap segments.
///
/// Both inputs must be non-overlapping within themselves. The result is sorted
/// by start and carries batch-unique ids.
pub fn resolve_overlaps(busy: &[BusyBlock], density: &[DensityBlock]) -> Vec<RenderSegment> {
    let mut busy_sorted: Vec<&BusyBlock> = busy.iter().collect();
    busy_sorted.sort_by_key(|b| b.interval);
    let mut density_sorted: Vec<&DensityBlock> = density.iter().collect();
    density_sorted.sort_by_key(|d| d.interval);

    let mut segments = Vec::new();

    for block in &busy_sorted {
        let hits: Vec<(Interval, &DensityBlock)> = density_sorted
            .iter()
            .filter_map(|d| block.interval.intersection(&d.interval).map(|cut| (cut, *d)))
            .collect();

        segments.extend(
            hits.iter()
                .map(|(cut, d)| RenderSegment::overlap(*cut, block, d)),
        );
        segments.extend(
            carve(block.interval, hits.iter().map(|(cut, _)| *cut))
                .into_iter()
                .map(|piece| RenderSegment::busy(piece, block)),
        );
    }

    for block in &density_sorted {
        let cuts = busy_sorted
            .iter()
            .filter_map(|b| block.interval.intersection(&b.interval));

        segments.extend(
            carve(block.interval, cuts)
                .into_iter()
                .map(|piece| RenderSegment::preferred(piece, block)),
        );
    }

    segment::finalize(segments)
}

/// Subtract every cut from `outer`, returning the surviving pieces in order.
fn carve<I>(outer: Interval, cuts: I) -> Vec<Interval>
where
    I: IntoIterator<Item = Interval>,
{
    cuts.into_iter()
        .fold(vec![outer], |remaining, cut| subtract_all(&remaining, &cut))
}
