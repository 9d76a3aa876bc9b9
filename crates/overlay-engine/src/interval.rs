//! Half-open time intervals over UTC instants.
//!
//! An [`Interval`] is `[start, end)` with `start < end`. Zero-length and inverted
//! ranges cannot be constructed, so every downstream computation can rely on a
//! positive duration. Two intervals that only touch (`a.end == b.start`) do NOT
//! overlap.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A non-empty half-open range `[start, end)` of UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Interval {
    /// Build an interval, or `None` if `end <= start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whole minutes between start and end (truncated).
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Whether `instant` lies inside `[start, end)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Whether `other` lies entirely within this interval.
    pub fn covers(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// `self` ends exactly where `other` starts.
    pub fn is_adjacent_to(&self, other: &Interval) -> bool {
        self.end == other.start
    }

    /// `[max(starts), min(ends))`, or `None` when the intervals are disjoint or
    /// only touch.
    pub fn intersection(&self, other: &Interval) -> Option<Interval> {
        Interval::new(self.start.max(other.start), self.end.min(other.end))
    }

    /// The smallest interval spanning both `self` and `other`.
    pub fn hull(&self, other: &Interval) -> Interval {
        Interval {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// The parts of `self` not covered by `cut`, in ascending order.
    ///
    /// Yields nothing when `cut` covers `self`, one piece when the cut is at an
    /// edge (or misses entirely), and two pieces when the cut is strictly
    /// interior.
    pub fn subtract(&self, cut: &Interval) -> Vec<Interval> {
        if !self.overlaps(cut) {
            return vec![*self];
        }
        [
            Interval::new(self.start, cut.start),
            Interval::new(cut.end, self.end),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Subtract `cut` from every interval in `pieces`, keeping ascending order.
pub fn subtract_all(pieces: &[Interval], cut: &Interval) -> Vec<Interval> {
    pieces.iter().flat_map(|piece| piece.subtract(cut)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 16, hour, min, 0).unwrap()
    }

    fn iv(sh: u32, sm: u32, eh: u32, em: u32) -> Interval {
        Interval::new(at(sh, sm), at(eh, em)).unwrap()
    }

    #[test]
    fn rejects_empty_and_inverted() {
        assert!(Interval::new(at(9, 0), at(9, 0)).is_none());
        assert!(Interval::new(at(10, 0), at(9, 0)).is_none());
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let a = iv(9, 0, 10, 0);
        let b = iv(10, 0, 11, 0);
        assert!(!a.overlaps(&b));
        assert!(a.is_adjacent_to(&b));
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn subtract_interior_cut_yields_two_pieces() {
        let outer = iv(9, 0, 11, 0);
        let pieces = outer.subtract(&iv(10, 0, 10, 30));
        assert_eq!(pieces, vec![iv(9, 0, 10, 0), iv(10, 30, 11, 0)]);
    }

    #[test]
    fn subtract_edge_cut_yields_one_piece() {
        let outer = iv(9, 0, 11, 0);
        assert_eq!(outer.subtract(&iv(8, 0, 9, 30)), vec![iv(9, 30, 11, 0)]);
        assert_eq!(outer.subtract(&iv(10, 0, 12, 0)), vec![iv(9, 0, 10, 0)]);
    }

    #[test]
    fn subtract_covering_cut_yields_nothing() {
        assert!(iv(9, 0, 10, 0).subtract(&iv(8, 0, 11, 0)).is_empty());
        assert!(iv(9, 0, 10, 0).subtract(&iv(9, 0, 10, 0)).is_empty());
    }

    #[test]
    fn subtract_disjoint_cut_is_identity() {
        let a = iv(9, 0, 10, 0);
        assert_eq!(a.subtract(&iv(10, 0, 11, 0)), vec![a]);
    }

    #[test]
    fn intersection_with_window_discards_outside() {
        let window = iv(8, 0, 17, 0);
        assert_eq!(iv(7, 0, 9, 0).intersection(&window), Some(iv(8, 0, 9, 0)));
        assert_eq!(iv(18, 0, 19, 0).intersection(&window), None);
    }
}
