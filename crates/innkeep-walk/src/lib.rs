//! File-tree walking and in-place find/replace for innkeep.
//!
//! Walks are bounded by depth and entry caps, and replacements report
//! whether each file actually changed.

mod atomic;
pub mod errors;
pub mod replace;
pub mod walker;

pub use errors::{WalkError, WalkResult};
pub use replace::{ReplaceOutcome, apply_replace};
pub use walker::{WalkOptions, collect_files, load_exclude_file};
