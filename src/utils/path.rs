//! Path utilities
//!
//! Resolves user-typed paths the way a shell would before touching the filesystem.

use std::path::{Path, PathBuf};

/// Expands a leading `~` to the home directory.
pub fn expand_path(input: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(input).as_ref())
}

/// Returns true if `input` resolves to an existing regular file.
pub fn file_exists(input: &str) -> bool {
    if input.is_empty() {
        return false;
    }
    is_file(&expand_path(input))
}

fn is_file(path: &Path) -> bool {
    path.metadata().map(|m| m.is_file()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn existing_file_is_found() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ssh-ed25519 AAAA test").unwrap();
        assert!(file_exists(file.path().to_str().unwrap()));
    }

    #[test]
    fn directories_and_missing_paths_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!file_exists(dir.path().to_str().unwrap()));
        assert!(!file_exists(dir.path().join("missing.pub").to_str().unwrap()));
        assert!(!file_exists(""));
    }

    #[test]
    fn plain_paths_are_not_rewritten() {
        assert_eq!(expand_path("/etc/hosts"), PathBuf::from("/etc/hosts"));
    }
}
