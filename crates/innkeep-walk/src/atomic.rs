use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::{WalkError, WalkResult};

/// Replace `path` with `data` via a sibling temp file and rename.
///
/// The temp file is removed again when any step after its creation fails.
pub fn write_bytes_atomic(path: &Path, data: &[u8]) -> WalkResult<()> {
    let tmp_path = temp_path(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)
        .map_err(|err| WalkError::io(&tmp_path, err))?;

    let result = file
        .write_all(data)
        .and_then(|()| file.sync_all())
        .map_err(|err| WalkError::io(&tmp_path, err))
        .and_then(|()| {
            std::fs::rename(&tmp_path, path).map_err(|err| WalkError::io(path, err))
        });

    if result.is_err() {
        drop(file);
        let _ = std::fs::remove_file(&tmp_path);
    }
    result
}

fn temp_path(path: &Path) -> WalkResult<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        WalkError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;
    let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("innkeep_atomic_{label}_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn replaces_contents_without_leftovers() {
        let dir = temp_dir("ok");
        let target = dir.join("notes.txt");
        std::fs::write(&target, "old").expect("seed file");

        write_bytes_atomic(&target, b"new").expect("write");

        assert_eq!(std::fs::read_to_string(&target).expect("read"), "new");
        assert!(!dir.join(".notes.txt.tmp").exists());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = temp_dir("rename");
        let target = dir.join("occupied");
        std::fs::create_dir_all(target.join("child")).expect("create blocking dir");

        let err = write_bytes_atomic(&target, b"data").expect_err("rename onto a directory");

        match err {
            WalkError::Io { path, .. } => assert_eq!(path, target),
            other => panic!("expected io error, got {other:?}"),
        }
        assert!(!dir.join(".occupied.tmp").exists());
        assert!(target.join("child").is_dir());

        let _ = std::fs::remove_dir_all(dir);
    }
}
