//! Local driver binary discovery.
//!
//! Settings resolve the local driver binary directory once, at
//! construction time, by scanning the process's executable search path
//! for the chromedriver binary. The scan is a pure function over an
//! explicit search-path string so it can be tested without touching the
//! real environment.

// ============================================================================
// Imports
// ============================================================================

use std::env;
use std::ffi::OsStr;
use std::path::PathBuf;

use tracing::debug;

// ============================================================================
// Constants
// ============================================================================

/// File name of the chromedriver executable.
#[cfg(windows)]
pub const CHROMEDRIVER_EXE: &str = "chromedriver.exe";

/// File name of the chromedriver executable.
#[cfg(not(windows))]
pub const CHROMEDRIVER_EXE: &str = "chromedriver";

// ============================================================================
// Search Path Scan
// ============================================================================

/// Scans `search_path` for the first directory containing `binary_name`.
///
/// `search_path` uses the platform's `PATH` syntax. Entries are checked
/// in order; the first directory holding the binary wins. Returns `None`
/// when no entry contains it.
#[must_use]
pub fn find_binary_directory_in(search_path: &OsStr, binary_name: &str) -> Option<PathBuf> {
    env::split_paths(search_path).find(|dir| dir.join(binary_name).is_file())
}

/// Scans the process `PATH` for the chromedriver binary directory.
///
/// Returns `None` when `PATH` is unset or no entry contains the binary.
#[must_use]
pub fn find_driver_directory() -> Option<PathBuf> {
    let path = env::var_os("PATH")?;
    let found = find_binary_directory_in(&path, CHROMEDRIVER_EXE);

    match &found {
        Some(dir) => debug!(directory = %dir.display(), "Resolved local driver directory"),
        None => debug!(binary = CHROMEDRIVER_EXE, "Driver binary not on search path"),
    }

    found
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::TempDir;

    fn join_paths(dirs: &[&std::path::Path]) -> std::ffi::OsString {
        env::join_paths(dirs.iter().copied()).unwrap()
    }

    #[test]
    fn test_finds_directory_containing_binary() {
        let empty = TempDir::new().unwrap();
        let with_binary = TempDir::new().unwrap();
        fs::write(with_binary.path().join(CHROMEDRIVER_EXE), b"").unwrap();

        let search = join_paths(&[empty.path(), with_binary.path()]);
        let found = find_binary_directory_in(&search, CHROMEDRIVER_EXE);

        assert_eq!(found.as_deref(), Some(with_binary.path()));
    }

    #[test]
    fn test_first_match_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::write(first.path().join(CHROMEDRIVER_EXE), b"").unwrap();
        fs::write(second.path().join(CHROMEDRIVER_EXE), b"").unwrap();

        let search = join_paths(&[first.path(), second.path()]);
        let found = find_binary_directory_in(&search, CHROMEDRIVER_EXE);

        assert_eq!(found.as_deref(), Some(first.path()));
    }

    #[test]
    fn test_no_match_returns_none() {
        let empty = TempDir::new().unwrap();
        let search = join_paths(&[empty.path()]);

        assert!(find_binary_directory_in(&search, CHROMEDRIVER_EXE).is_none());
    }

    #[test]
    fn test_directory_named_like_binary_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(CHROMEDRIVER_EXE)).unwrap();

        let search = join_paths(&[dir.path()]);
        assert!(find_binary_directory_in(&search, CHROMEDRIVER_EXE).is_none());
    }
}
