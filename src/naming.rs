//! Sequential capture file names: `prefix_001.jpg`, `prefix_002.jpg`, ...
//!
//! Allocation starts at a caller-held counter and skips any name that
//! already exists, so a capture never overwrites an earlier file. The
//! counter is padded to three digits and simply grows wider past 999.

use std::io;
use std::path::{Path, PathBuf};

/// File name allocation error.
#[derive(Debug, thiserror::Error)]
pub enum NamingError {
    /// Every counter value up to `u32::MAX` is taken.
    #[error("no free file name left for prefix {prefix:?}")]
    Exhausted { prefix: String },
    /// Whether a candidate exists could not be determined.
    #[error("cannot check whether {} exists", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Extension of capture files.
pub const EXTENSION: &str = "jpg";

/// File name for one counter value, without directory.
///
/// ```
/// assert_eq!(zensheet::naming::file_name("cap", 7), "cap_007.jpg");
/// assert_eq!(zensheet::naming::file_name("cap", 1234), "cap_1234.jpg");
/// ```
pub fn file_name(prefix: &str, counter: u32) -> String {
    format!("{prefix}_{counter:03}.{EXTENSION}")
}

/// First free `directory/prefix_NNN.jpg` at or after `start`.
///
/// Returns the path and the counter that produced it. The caller's running
/// counter should become `used + 1`. A candidate whose existence cannot be
/// checked (permission denied, I/O error) fails with [`NamingError::Unreadable`]
/// rather than being treated as free.
pub fn next_file_name(
    directory: &Path,
    prefix: &str,
    start: u32,
) -> Result<(PathBuf, u32), NamingError> {
    next_file_name_with(directory, prefix, start, |p| p.try_exists())
}

/// [`next_file_name`] with a caller-supplied existence check.
pub fn next_file_name_with<F>(
    directory: &Path,
    prefix: &str,
    start: u32,
    mut exists: F,
) -> Result<(PathBuf, u32), NamingError>
where
    F: FnMut(&Path) -> io::Result<bool>,
{
    let mut counter = start;
    loop {
        let candidate = directory.join(file_name(prefix, counter));
        let taken = exists(&candidate).map_err(|source| NamingError::Unreadable {
            path: candidate.clone(),
            source,
        })?;
        if !taken {
            if counter != start {
                log::debug!(
                    "skipped {} existing capture name(s) for prefix {prefix:?}",
                    counter - start
                );
            }
            return Ok((candidate, counter));
        }
        counter = counter.checked_add(1).ok_or_else(|| NamingError::Exhausted {
            prefix: prefix.to_owned(),
        })?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn pads_to_three_digits() {
        assert_eq!(file_name("capture", 1), "capture_001.jpg");
        assert_eq!(file_name("capture", 42), "capture_042.jpg");
        assert_eq!(file_name("capture", 999), "capture_999.jpg");
        assert_eq!(file_name("capture", 1000), "capture_1000.jpg");
    }

    #[test]
    fn skips_existing_names() {
        let dir = Path::new("dir");
        let taken: HashSet<PathBuf> = [dir.join("cap_001.jpg"), dir.join("cap_002.jpg")]
            .into_iter()
            .collect();
        let (path, used) = next_file_name_with(dir, "cap", 1, |p| Ok(taken.contains(p))).unwrap();
        assert_eq!(path, dir.join("cap_003.jpg"));
        assert_eq!(used, 3);

        // Continuing from used + 1 finds the next name without re-colliding.
        let (path, used) = next_file_name_with(dir, "cap", used + 1, |p| Ok(taken.contains(p))).unwrap();
        assert_eq!(path, dir.join("cap_004.jpg"));
        assert_eq!(used, 4);
    }

    #[test]
    fn free_start_is_used_directly() {
        let (path, used) = next_file_name_with(Path::new("d"), "p", 10, |_| Ok(false)).unwrap();
        assert_eq!(path, Path::new("d").join("p_010.jpg"));
        assert_eq!(used, 10);
    }

    #[test]
    fn exhausted_counter() {
        let err = next_file_name_with(Path::new("d"), "p", u32::MAX - 1, |_| Ok(true)).unwrap_err();
        assert!(matches!(err, NamingError::Exhausted { prefix } if prefix == "p"));
    }

    #[test]
    fn unreadable_candidate_is_not_free() {
        let dir = Path::new("d");
        let denied = dir.join("p_002.jpg");
        let err = next_file_name_with(dir, "p", 1, |p| {
            if p == denied {
                Err(io::Error::from(io::ErrorKind::PermissionDenied))
            } else {
                Ok(p == dir.join("p_001.jpg"))
            }
        })
        .unwrap_err();
        match err {
            NamingError::Unreadable { path, source } => {
                assert_eq!(path, denied);
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn real_directory() {
        let dir = std::env::temp_dir().join(format!("zensheet-naming-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("cap_001.jpg"), b"x").unwrap();
        std::fs::write(dir.join("cap_002.jpg"), b"x").unwrap();

        let (path, used) = next_file_name(&dir, "cap", 1).unwrap();
        assert_eq!(path, dir.join("cap_003.jpg"));
        assert_eq!(used, 3);

        // Once written, starting again from 3 moves past it.
        std::fs::write(&path, b"x").unwrap();
        let (path, used) = next_file_name(&dir, "cap", 3).unwrap();
        assert_eq!(path, dir.join("cap_004.jpg"));
        assert_eq!(used, 4);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
