use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use crate::core::persistence::dataset::local_snapshot_repository_trait::LocalSaveOutcome;

/// `EROFS` on Linux and the BSDs.
const EROFS: i32 = 30;

pub fn is_read_only_error(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::ReadOnlyFilesystem || err.raw_os_error() == Some(EROFS)
}

/// Maps a local write error to its outcome; read-only filesystems become a skip.
pub fn classify_write_error(err: &io::Error) -> LocalSaveOutcome {
    if is_read_only_error(err) {
        LocalSaveOutcome::SkippedReadOnly
    } else {
        LocalSaveOutcome::Failed(err.to_string())
    }
}

/// Creates parent directories, then writes via temp file + rename.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }

    let tmp_path = path.with_extension("json.tmp");
    let result = (|| -> io::Result<()> {
        let mut f = File::create(&tmp_path)?;
        f.write_all(bytes)?;
        f.flush()?;
        f.sync_all()?;
        fs::rename(&tmp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_only_errors_are_recognized() {
        assert!(is_read_only_error(&io::Error::from(io::ErrorKind::ReadOnlyFilesystem)));
        assert!(is_read_only_error(&io::Error::from_raw_os_error(EROFS)));
        assert!(!is_read_only_error(&io::Error::from(io::ErrorKind::PermissionDenied)));
    }

    #[test]
    fn classification_separates_skip_from_failure() {
        assert_eq!(
            classify_write_error(&io::Error::from_raw_os_error(EROFS)),
            LocalSaveOutcome::SkippedReadOnly
        );
        assert!(matches!(
            classify_write_error(&io::Error::from(io::ErrorKind::PermissionDenied)),
            LocalSaveOutcome::Failed(_)
        ));
    }

    #[test]
    fn write_atomic_creates_directories_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("file.json");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
        assert!(!path.with_extension("json.tmp").exists());
    }
}
