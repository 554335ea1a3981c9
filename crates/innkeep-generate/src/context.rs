use innkeep_core::{Allocation, AllocationLimits, RoomBookingLedger, RoomId, allocate};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::errors::GenerationError;
use crate::templates::{InsertRow, render_insert};

/// Monotonic 1-based id source for one entity kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdSequence {
    last: u64,
}

impl IdSequence {
    pub fn next_id(&mut self) -> u64 {
        self.last += 1;
        self.last
    }

    /// Number of ids handed out so far, which is also the latest id.
    pub fn issued(&self) -> u64 {
        self.last
    }
}

/// Mutable state of one generation run.
///
/// Owns the seeded random source, the per-entity id sequences, the booking
/// ledger and the rendered statements in emission order.
#[derive(Debug)]
pub struct GenerationContext {
    pub(crate) rng: ChaCha8Rng,
    pub chains: IdSequence,
    pub hotels: IdSequence,
    pub rooms: IdSequence,
    pub employees: IdSequence,
    pub customers: IdSequence,
    ledger: RoomBookingLedger,
    statements: Vec<String>,
    table_counts: Vec<(&'static str, u64)>,
    allocation_retries: u64,
}

impl GenerationContext {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            chains: IdSequence::default(),
            hotels: IdSequence::default(),
            rooms: IdSequence::default(),
            employees: IdSequence::default(),
            customers: IdSequence::default(),
            ledger: RoomBookingLedger::new(),
            statements: Vec::new(),
            table_counts: Vec::new(),
            allocation_retries: 0,
        }
    }

    /// Render and append one statement.
    pub fn emit<T: InsertRow>(&mut self, row: &T) {
        self.statements.push(render_insert(row));
        match self
            .table_counts
            .iter_mut()
            .find(|(table, _)| *table == T::TABLE)
        {
            Some((_, count)) => *count += 1,
            None => self.table_counts.push((T::TABLE, 1)),
        }
    }

    /// Reserve a conflict-free stay for the room.
    pub fn book_room(
        &mut self,
        room_id: RoomId,
        limits: &AllocationLimits,
    ) -> Result<Allocation, GenerationError> {
        let allocation = allocate(&mut self.rng, &mut self.ledger, room_id, limits)?;
        self.allocation_retries += u64::from(allocation.retries());
        Ok(allocation)
    }

    pub fn ledger(&self) -> &RoomBookingLedger {
        &self.ledger
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// Statement counts per table, in first-emitted order.
    pub fn table_counts(&self) -> &[(&'static str, u64)] {
        &self.table_counts
    }

    pub fn allocation_retries(&self) -> u64 {
        self.allocation_retries
    }

    pub fn into_parts(self) -> (Vec<String>, RoomBookingLedger) {
        (self.statements, self.ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    #[test]
    fn id_sequences_start_at_one() {
        let mut ids = IdSequence::default();
        assert_eq!(ids.issued(), 0);
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn emit_counts_per_table() {
        let mut ctx = GenerationContext::new(1);
        ctx.emit(&Role {
            name: "Maid".to_string(),
        });
        ctx.emit(&Role {
            name: "Bellboy".to_string(),
        });

        assert_eq!(ctx.table_counts(), &[("Role", 2)]);
        assert_eq!(
            ctx.statements()[1],
            "INSERT INTO Role(name, description) VALUES ('Bellboy', NULL);"
        );
    }

    #[test]
    fn book_room_tracks_ledger() {
        let mut ctx = GenerationContext::new(8);
        let limits = AllocationLimits::default();
        let first = ctx.book_room(2, &limits).expect("first booking");
        let second = ctx.book_room(2, &limits).expect("second booking");

        assert!(!first.range.overlaps(&second.range));
        assert_eq!(ctx.ledger().ranges(2).len(), 2);
    }
}
