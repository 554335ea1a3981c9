use std::collections::BTreeSet;
use std::fs::DirEntry;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{WalkError, WalkResult};

/// Options for collecting files under a root directory.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    pub root: PathBuf,
    /// Descend into sub-directories.
    pub recursive: bool,
    /// File or directory names skipped wherever they appear.
    pub exclude: BTreeSet<String>,
    /// Deepest directory level visited below `root`.
    pub max_depth: usize,
    /// Largest number of files a walk may return.
    pub max_entries: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            recursive: false,
            exclude: BTreeSet::new(),
            max_depth: 64,
            max_entries: 100_000,
        }
    }
}

/// Collect file paths under `options.root`.
///
/// Each directory lists its own files (sorted by name) before any of its
/// sub-directories are visited. Symlinked directories are not followed.
pub fn collect_files(options: &WalkOptions) -> WalkResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    visit(&options.root, 0, options, &mut files)?;
    debug!(
        root = %options.root.display(),
        recursive = options.recursive,
        files = files.len(),
        "walk finished"
    );
    Ok(files)
}

fn visit(
    dir: &Path,
    depth: usize,
    options: &WalkOptions,
    files: &mut Vec<PathBuf>,
) -> WalkResult<()> {
    if depth > options.max_depth {
        return Err(WalkError::LimitExceeded(format!(
            "directory depth {depth} exceeds {} at {}",
            options.max_depth,
            dir.display()
        )));
    }

    let mut directories = Vec::new();
    for entry in sorted_entries(dir)? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if options.exclude.contains(&name) {
            continue;
        }

        let path = entry.path();
        let file_type = entry.file_type().map_err(|err| WalkError::io(&path, err))?;
        if file_type.is_dir() {
            directories.push(path);
        } else if file_type.is_file() || (file_type.is_symlink() && path.is_file()) {
            if files.len() >= options.max_entries {
                return Err(WalkError::LimitExceeded(format!(
                    "more than {} files under {}",
                    options.max_entries,
                    options.root.display()
                )));
            }
            files.push(path);
        }
    }

    if options.recursive {
        for directory in directories {
            visit(&directory, depth + 1, options, files)?;
        }
    }

    Ok(())
}

fn sorted_entries(dir: &Path) -> WalkResult<Vec<DirEntry>> {
    let mut entries = std::fs::read_dir(dir)
        .and_then(|entries| entries.collect::<std::io::Result<Vec<_>>>())
        .map_err(|err| WalkError::io(dir, err))?;
    entries.sort_by_key(DirEntry::file_name);
    Ok(entries)
}

/// Read exclusions from a file, one name per line.
pub fn load_exclude_file(path: &Path) -> WalkResult<BTreeSet<String>> {
    let content = std::fs::read_to_string(path).map_err(|err| WalkError::io(path, err))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
