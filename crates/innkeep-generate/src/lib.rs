//! Synthetic hotel-reservation data generation for innkeep.
//!
//! This crate turns a [`GeneratorConfig`] into a deterministic (for a fixed
//! seed) list of SQL `INSERT` statements covering chains, hotels, rooms,
//! staff, customers, bookings and their lookup tables.

pub mod config;
pub mod context;
pub mod engine;
pub mod errors;
pub mod model;
pub mod output;
pub mod pools;
pub mod templates;

pub use config::GeneratorConfig;
pub use context::GenerationContext;
pub use engine::{GeneratedDataset, GenerationEngine, GenerationResult};
pub use errors::GenerationError;
pub use model::{GenerationReport, TableReport};
pub use templates::{InsertRow, SqlValue, render_insert};
