use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::ledger::{DayRange, RoomBookingLedger, RoomId};

/// Bounds applied to every random stay draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllocationLimits {
    /// Latest day offset a check-in may start on (inclusive).
    pub max_offset: u32,
    /// Longest stay in nights (inclusive).
    pub max_stay: u32,
    /// Draws attempted before giving up on the room.
    pub max_attempts: u32,
}

impl Default for AllocationLimits {
    fn default() -> Self {
        Self {
            max_offset: 210,
            max_stay: 7,
            max_attempts: 10_000,
        }
    }
}

impl AllocationLimits {
    pub fn validate(&self) -> Result<()> {
        if self.max_stay == 0 {
            return Err(Error::InvalidLimits("max_stay must be at least 1".to_string()));
        }
        if self.max_attempts == 0 {
            return Err(Error::InvalidLimits(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if self.max_offset.checked_add(self.max_stay).is_none() {
            return Err(Error::InvalidLimits(
                "max_offset + max_stay overflows".to_string(),
            ));
        }
        Ok(())
    }
}

/// A committed stay plus the number of draws it took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub range: DayRange,
    pub attempts: u32,
}

impl Allocation {
    /// Draws that conflicted before the committed one.
    pub fn retries(&self) -> u32 {
        self.attempts.saturating_sub(1)
    }
}

/// Draw a stay for `room_id` that does not overlap any stay already held by
/// the room, commit it to the ledger and return it.
///
/// `check_in` is uniform over `[0, max_offset]` and `check_out` uniform over
/// `[check_in + 1, check_in + max_stay]`. The ledger is left untouched when
/// every one of `max_attempts` draws conflicts.
pub fn allocate<R>(
    rng: &mut R,
    ledger: &mut RoomBookingLedger,
    room_id: RoomId,
    limits: &AllocationLimits,
) -> Result<Allocation>
where
    R: Rng,
{
    limits.validate()?;
    ledger.entry(room_id);

    for attempt in 1..=limits.max_attempts {
        let check_in = rng.random_range(0..=limits.max_offset);
        let check_out = rng.random_range(check_in + 1..=check_in + limits.max_stay);
        let Some(candidate) = DayRange::new(check_in, check_out) else {
            continue;
        };

        if ledger.try_commit(room_id, candidate) {
            if attempt > 1 {
                debug!(room_id, attempt, "stay allocated after retries");
            }
            return Ok(Allocation {
                range: candidate,
                attempts: attempt,
            });
        }
    }

    Err(Error::CapacityExceeded {
        room_id,
        attempts: limits.max_attempts,
    })
}
