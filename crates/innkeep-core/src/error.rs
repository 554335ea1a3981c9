use thiserror::Error;

use crate::ledger::RoomId;

/// Core error type shared across innkeep crates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// No free stay could be found for the room within the attempt cap.
    #[error("capacity exceeded for room {room_id} after {attempts} attempts")]
    CapacityExceeded { room_id: RoomId, attempts: u32 },
    /// Allocation limits cannot produce a valid stay.
    #[error("invalid allocation limits: {0}")]
    InvalidLimits(String),
}

/// Convenience alias for results returned by innkeep crates.
pub type Result<T> = std::result::Result<T, Error>;
