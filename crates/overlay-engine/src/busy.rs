//! Busy block mapping.
//!
//! Busy intervals are merged upstream, so this stage only wraps each record in
//! the engine's [`BusyBlock`] representation. Order is preserved and the
//! participant count is trusted as-is.

use serde::Serialize;

use crate::interval::Interval;
use crate::records::BusyRecord;

/// An atomic busy interval with the number of busy participants covering it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusyBlock {
    #[serde(flatten)]
    pub interval: Interval,
    pub busy_count: u32,
}

/// Map busy records one-to-one into busy blocks, dropping records whose end is
/// not after their start.
pub fn map_busy_blocks(records: &[BusyRecord]) -> Vec<BusyBlock> {
    records
        .iter()
        .filter_map(|record| {
            let Some(interval) = Interval::new(record.start_time, record.end_time) else {
                tracing::debug!(
                    start = %record.start_time,
                    end = %record.end_time,
                    "dropping busy record with non-positive duration"
                );
                return None;
            };
            Some(BusyBlock {
                interval,
                busy_count: record.busy_participants_count,
            })
        })
        .collect()
}
