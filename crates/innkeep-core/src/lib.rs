//! Core contracts for innkeep.
//!
//! This crate holds the per-room booking ledger and the conflict allocator
//! that hands out non-overlapping stays for generated reservations.

pub mod allocator;
pub mod error;
pub mod ledger;

pub use allocator::{Allocation, AllocationLimits, allocate};
pub use error::{Error, Result};
pub use ledger::{DayRange, RoomBookingLedger, RoomId};
