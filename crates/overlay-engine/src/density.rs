//! Preferred density computation.
//!
//! Collapses raw, possibly-overlapping per-user preferred ranges into the
//! maximal non-overlapping blocks over which the set of covering users is
//! constant. Each block carries the deduplicated user count, so a user who
//! submitted two overlapping ranges is still counted once.
//!
//! The sweep uses coordinate compression: every range start and end becomes a
//! boundary, consecutive boundaries form elementary slices, and a slice is
//! covered by a range iff `range.start <= slice.start && range.end >= slice.end`.
//! Adjacent slices with identical user sets are then folded together.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::interval::Interval;
use crate::records::{PreferredRecord, RecordId};

/// A validated preferred range owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferredRange {
    pub id: RecordId,
    pub user_id: RecordId,
    pub user_name: String,
    pub interval: Interval,
}

/// A maximal interval over which the set of preferring users is constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DensityBlock {
    #[serde(flatten)]
    pub interval: Interval,
    /// Number of distinct users covering the interval.
    pub user_count: usize,
    /// Covering users, ascending and unique.
    pub user_ids: Vec<RecordId>,
    /// Display names, parallel to `user_ids`.
    pub user_names: Vec<String>,
    /// Preferred ranges that contributed to this block, ascending and unique.
    pub range_ids: Vec<RecordId>,
}

impl DensityBlock {
    /// Build the block for one elementary slice from the ranges covering it.
    /// Returns `None` when nothing covers the slice.
    fn from_cover(
        interval: Interval,
        covering: &[&PreferredRange],
        names: &BTreeMap<&RecordId, &str>,
    ) -> Option<Self> {
        if covering.is_empty() {
            return None;
        }

        let users: BTreeSet<&RecordId> = covering.iter().map(|r| &r.user_id).collect();
        let range_ids: BTreeSet<&RecordId> = covering.iter().map(|r| &r.id).collect();

        Some(DensityBlock {
            interval,
            user_count: users.len(),
            user_names: users
                .iter()
                .map(|id| names.get(id).copied().unwrap_or_default().to_string())
                .collect(),
            user_ids: users.into_iter().cloned().collect(),
            range_ids: range_ids.into_iter().cloned().collect(),
        })
    }

    /// Adjacent in time and covered by exactly the same users.
    fn continues_into(&self, next: &DensityBlock) -> bool {
        self.interval.is_adjacent_to(&next.interval) && self.user_ids == next.user_ids
    }

    fn absorb(mut self, next: DensityBlock) -> Self {
        self.interval = self.interval.hull(&next.interval);
        let range_ids: BTreeSet<RecordId> =
            self.range_ids.into_iter().chain(next.range_ids).collect();
        self.range_ids = range_ids.into_iter().collect();
        self
    }

    /// Re-expand the block into one range per covering user.
    ///
    /// Feeding these back into [`compute_density_blocks`] reproduces the same
    /// intervals and user sets.
    pub fn as_ranges(&self) -> Vec<PreferredRange> {
        self.user_ids
            .iter()
            .zip(&self.user_names)
            .map(|(user_id, user_name)| PreferredRange {
                id: RecordId::from(format!(
                    "{}@{}",
                    user_id,
                    self.interval.start().to_rfc3339()
                )),
                user_id: user_id.clone(),
                user_name: user_name.clone(),
                interval: self.interval,
            })
            .collect()
    }
}

/// Convert preferred records into validated ranges, dropping records whose end
/// is not after their start. Missing names become empty labels.
pub fn preferred_ranges(records: &[PreferredRecord]) -> Vec<PreferredRange> {
    records
        .iter()
        .filter_map(|record| {
            let Some(interval) = Interval::new(record.start_time_utc, record.end_time_utc) else {
                tracing::debug!(
                    id = %record.id,
                    user_id = %record.user_id,
                    start = %record.start_time_utc,
                    end = %record.end_time_utc,
                    "dropping preferred record with non-positive duration"
                );
                return None;
            };
            Some(PreferredRange {
                id: record.id.clone(),
                user_id: record.user_id.clone(),
                user_name: record.user_name.clone().unwrap_or_default(),
                interval,
            })
        })
        .collect()
}

/// Compute density blocks from preferred ranges.
///
/// Returns blocks sorted by start, non-overlapping, with no two adjacent blocks
/// sharing the same user set. Slices covered by nobody produce no block.
pub fn compute_density_blocks(ranges: &[PreferredRange]) -> Vec<DensityBlock> {
    if ranges.is_empty() {
        return Vec::new();
    }

    // Sort by (start, end) so the coverage scan can stop at the first range
    // starting after the slice.
    let mut sorted: Vec<&PreferredRange> = ranges.iter().collect();
    sorted.sort_by(|a, b| a.interval.cmp(&b.interval).then_with(|| a.id.cmp(&b.id)));

    let names = display_names(&sorted);

    let mut boundaries: Vec<DateTime<Utc>> = sorted
        .iter()
        .flat_map(|r| [r.interval.start(), r.interval.end()])
        .collect();
    boundaries.sort();
    boundaries.dedup();

    let slices = boundaries.windows(2).filter_map(|pair| {
        let slice = Interval::new(pair[0], pair[1])?;
        let covering: Vec<&PreferredRange> = sorted
            .iter()
            .take_while(|r| r.interval.start() <= slice.start())
            .filter(|r| r.interval.end() >= slice.end())
            .copied()
            .collect();
        DensityBlock::from_cover(slice, &covering, &names)
    });

    merge_adjacent_blocks(slices)
}

/// One display name per user: the first non-empty name in range order, so a
/// user is labeled the same way in every block they appear in.
fn display_names<'a>(sorted: &[&'a PreferredRange]) -> BTreeMap<&'a RecordId, &'a str> {
    let mut names: BTreeMap<&RecordId, &str> = BTreeMap::new();
    for range in sorted {
        let name = names.entry(&range.user_id).or_insert(range.user_name.as_str());
        if name.is_empty() {
            *name = range.user_name.as_str();
        }
    }
    names
}

/// Fold consecutive blocks into one whenever they are adjacent and carry the
/// same user set. Blocks must already be in ascending order.
pub fn merge_adjacent_blocks<I>(blocks: I) -> Vec<DensityBlock>
where
    I: IntoIterator<Item = DensityBlock>,
{
    blocks
        .into_iter()
        .fold(Vec::new(), |mut merged: Vec<DensityBlock>, block| {
            match merged.pop() {
                Some(last) if last.continues_into(&block) => merged.push(last.absorb(block)),
                Some(last) => {
                    merged.push(last);
                    merged.push(block);
                }
                None => merged.push(block),
            }
            merged
        })
}
