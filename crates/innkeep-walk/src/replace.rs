use std::path::Path;

use tracing::debug;

use crate::atomic::write_bytes_atomic;
use crate::errors::{WalkError, WalkResult};

/// What a replacement did to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOutcome {
    Replaced { occurrences: usize },
    /// The pattern was absent; the file was not rewritten.
    Unchanged,
}

/// Replace every occurrence of `old` with `new` in the file at `path`.
///
/// The file is rewritten only when at least one occurrence was found.
pub fn apply_replace(path: &Path, old: &str, new: &str) -> WalkResult<ReplaceOutcome> {
    if old.is_empty() {
        return Err(WalkError::EmptyPattern);
    }

    let data = std::fs::read_to_string(path).map_err(|err| WalkError::io(path, err))?;
    let occurrences = data.matches(old).count();
    if occurrences == 0 {
        return Ok(ReplaceOutcome::Unchanged);
    }

    let updated = data.replace(old, new);
    write_bytes_atomic(path, updated.as_bytes())?;
    debug!(path = %path.display(), occurrences, "file rewritten");

    Ok(ReplaceOutcome::Replaced { occurrences })
}
