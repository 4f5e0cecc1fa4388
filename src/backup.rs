//! Pre-mutation backup of the target file.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Copies `path` byte-for-byte to `<path>.bak` and returns the backup path.
///
/// The suffix is appended to the full file name (`beat.json` →
/// `beat.json.bak`), not substituted for the extension. An existing backup of
/// the same name is silently overwritten. Must run before any mutation; any
/// I/O failure aborts the run with the original file untouched.
pub fn create_backup(path: &Path) -> Result<PathBuf> {
    let backup_path = backup_path_for(path);
    fs_err::copy(path, &backup_path)?;
    tracing::debug!(backup = %backup_path.display(), "wrote backup copy");
    Ok(backup_path)
}

fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_is_appended_not_substituted() {
        let path = Path::new("/tmp/beats/rock.json");
        assert_eq!(
            backup_path_for(path),
            PathBuf::from("/tmp/beats/rock.json.bak")
        );
    }

    #[test]
    fn backup_matches_source_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("beat.json");
        fs_err::write(&source, b"{\"bpm\": 120}").unwrap();

        let backup = create_backup(&source).unwrap();
        assert_eq!(backup, dir.path().join("beat.json.bak"));
        assert_eq!(
            fs_err::read(&backup).unwrap(),
            fs_err::read(&source).unwrap()
        );
    }

    #[test]
    fn existing_backup_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("beat.json");
        fs_err::write(&source, b"new contents").unwrap();
        fs_err::write(dir.path().join("beat.json.bak"), b"stale").unwrap();

        let backup = create_backup(&source).unwrap();
        assert_eq!(fs_err::read(&backup).unwrap(), b"new contents");
    }
}
