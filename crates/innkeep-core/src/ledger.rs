use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifier of a generated room (1-based, assigned in creation order).
pub type RoomId = u64;

/// Half-open `[check_in, check_out)` stay expressed in day offsets from "now".
///
/// A stay covers the nights starting at `check_in` up to, but not including,
/// `check_out`, so back-to-back stays sharing a boundary day do not conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "DayRangeFields")]
pub struct DayRange {
    check_in: u32,
    check_out: u32,
}

#[derive(Deserialize)]
struct DayRangeFields {
    check_in: u32,
    check_out: u32,
}

impl TryFrom<DayRangeFields> for DayRange {
    type Error = String;

    fn try_from(fields: DayRangeFields) -> Result<Self, Self::Error> {
        DayRange::new(fields.check_in, fields.check_out).ok_or_else(|| {
            format!(
                "check_out ({}) must be after check_in ({})",
                fields.check_out, fields.check_in
            )
        })
    }
}

impl DayRange {
    /// Build a range, returning `None` unless `check_out > check_in`.
    pub fn new(check_in: u32, check_out: u32) -> Option<Self> {
        (check_out > check_in).then_some(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> u32 {
        self.check_in
    }

    pub fn check_out(&self) -> u32 {
        self.check_out
    }

    /// Number of nights covered by the stay.
    pub fn nights(&self) -> u32 {
        self.check_out - self.check_in
    }

    /// True when both ranges share at least one day offset.
    pub fn overlaps(&self, other: &DayRange) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }
}

/// Per-room record of committed stays for one generation run.
///
/// Rooms are created on first access with an empty history. Committed
/// ranges keep their insertion order and are pairwise disjoint per room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoomBookingLedger {
    rooms: BTreeMap<RoomId, Vec<DayRange>>,
}

impl RoomBookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure the room has an entry and return its committed stays.
    pub fn entry(&mut self, room_id: RoomId) -> &[DayRange] {
        self.rooms.entry(room_id).or_default()
    }

    /// Committed stays for a room, empty when the room was never touched.
    pub fn ranges(&self, room_id: RoomId) -> &[DayRange] {
        self.rooms
            .get(&room_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn contains_room(&self, room_id: RoomId) -> bool {
        self.rooms.contains_key(&room_id)
    }

    /// True when `candidate` shares a day with any stay already held by the room.
    pub fn conflicts(&self, room_id: RoomId, candidate: &DayRange) -> bool {
        self.ranges(room_id)
            .iter()
            .any(|committed| committed.overlaps(candidate))
    }

    /// Commit `candidate` for the room unless it conflicts.
    ///
    /// Returns `true` when the stay was recorded.
    pub fn try_commit(&mut self, room_id: RoomId, candidate: DayRange) -> bool {
        if self.conflicts(room_id, &candidate) {
            return false;
        }
        self.rooms.entry(room_id).or_default().push(candidate);
        true
    }

    /// Rooms known to the ledger, in ascending id order.
    pub fn rooms(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.rooms.keys().copied()
    }

    /// Total number of committed stays across all rooms.
    pub fn bookings(&self) -> usize {
        self.rooms.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Check the disjointness invariant for every room.
    pub fn is_consistent(&self) -> bool {
        self.rooms.values().all(|ranges| {
            ranges.iter().enumerate().all(|(index, range)| {
                ranges[index + 1..]
                    .iter()
                    .all(|other| !range.overlaps(other))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(check_in: u32, check_out: u32) -> DayRange {
        DayRange::new(check_in, check_out).expect("valid range")
    }

    #[test]
    fn rejects_empty_or_inverted_ranges() {
        assert!(DayRange::new(3, 3).is_none());
        assert!(DayRange::new(5, 2).is_none());
        assert_eq!(range(2, 5).nights(), 3);
    }

    #[test]
    fn adjacent_stays_do_not_overlap() {
        let first = range(0, 4);
        let second = range(4, 9);
        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
        assert!(first.overlaps(&range(3, 5)));
        assert!(range(1, 10).overlaps(&range(4, 5)));
    }

    #[test]
    fn entry_creates_room_on_first_access() {
        let mut ledger = RoomBookingLedger::new();
        assert!(!ledger.contains_room(7));
        assert!(ledger.entry(7).is_empty());
        assert!(ledger.contains_room(7));
        assert_eq!(ledger.rooms().collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn try_commit_refuses_conflicting_stay() {
        let mut ledger = RoomBookingLedger::new();
        assert!(ledger.try_commit(1, range(10, 15)));
        assert!(!ledger.try_commit(1, range(14, 16)));
        assert!(ledger.try_commit(1, range(15, 16)));
        assert!(ledger.try_commit(2, range(10, 15)));

        assert_eq!(ledger.ranges(1), &[range(10, 15), range(15, 16)]);
        assert_eq!(ledger.bookings(), 3);
        assert!(ledger.is_consistent());
    }

    #[test]
    fn conflicts_checks_only_the_named_room() {
        let mut ledger = RoomBookingLedger::new();
        assert!(ledger.try_commit(1, range(2, 6)));

        assert!(ledger.conflicts(1, &range(5, 8)));
        assert!(!ledger.conflicts(1, &range(6, 8)));
        assert!(!ledger.conflicts(2, &range(2, 6)));
        assert!(!ledger.contains_room(2));
    }

    #[test]
    fn deserializing_validates_range_order() {
        let parsed: DayRange =
            serde_json::from_str(r#"{"check_in":2,"check_out":5}"#).expect("valid range");
        assert_eq!(parsed, range(2, 5));

        assert!(serde_json::from_str::<DayRange>(r#"{"check_in":5,"check_out":2}"#).is_err());
        assert!(serde_json::from_str::<DayRange>(r#"{"check_in":4,"check_out":4}"#).is_err());
    }
}
