//! Artifact output.

use std::path::Path;

use testkit_common::error::{Result, TestkitError};

/// Writes `content` to `path`, creating parent directories as needed.
///
/// An existing file is replaced. The write is not atomic: a failure
/// partway through may leave a truncated file behind.
///
/// # Errors
///
/// Returns [`TestkitError::DirectoryCreate`] if the parent directory cannot
/// be created and [`TestkitError::FileWrite`] if the file cannot be written.
pub fn write_artifact(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| TestkitError::DirectoryCreate {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, content).map_err(|e| TestkitError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), bytes = content.len(), "wrote artifact");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("a/b/c/out.yaml");
        write_artifact(&path, "key: value\n").expect("should write");
        assert_eq!(
            std::fs::read_to_string(&path).expect("read back"),
            "key: value\n"
        );
    }

    #[test]
    fn write_overwrites_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.txt");
        write_artifact(&path, "first version that is longer").expect("first write");
        write_artifact(&path, "second").expect("second write");
        assert_eq!(std::fs::read_to_string(&path).expect("read back"), "second");
    }

    #[test]
    fn write_reports_directory_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file, not a directory").expect("write blocker");

        let result = write_artifact(&blocker.join("nested/out.txt"), "x");
        assert!(matches!(result, Err(TestkitError::DirectoryCreate { .. })));
    }

    #[test]
    fn write_reports_file_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = write_artifact(dir.path(), "x");
        assert!(matches!(result, Err(TestkitError::FileWrite { .. })));
    }
}
