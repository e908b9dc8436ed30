//! Resolving the target project directory

use crate::error::PackError;
use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

/// Absolute, lexically normalized project directory.
///
/// Relative paths are taken from the current directory; `None` means the
/// current directory itself.
pub fn resolve_project_root(dir: Option<&Path>) -> Result<PathBuf> {
    let current = std::env::current_dir().context("Failed to read current directory")?;
    let path = match dir {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => current.join(dir),
        None => current,
    };
    Ok(normalize(&path))
}

/// Fails with [`PackError::ProjectNotFound`] unless `path` is a directory
pub fn ensure_project_dir(path: &Path) -> Result<(), PackError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(PackError::ProjectNotFound(path.to_path_buf()))
    }
}

/// Drop `.` segments and fold `..` into its parent, without touching the filesystem
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_removes_dot_segments() {
        assert_eq!(
            normalize(Path::new("/work/app/./lib/../")),
            PathBuf::from("/work/app")
        );
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn test_parent_segment_keeps_a_project_name() {
        let root = resolve_project_root(Some(Path::new("/work/app/sub/.."))).unwrap();
        assert_eq!(root, PathBuf::from("/work/app"));
        assert_eq!(root.file_name().unwrap(), "app");
    }

    #[test]
    fn test_relative_dir_is_made_absolute() {
        let root = resolve_project_root(Some(Path::new("demo/./x/.."))).unwrap();
        assert!(root.is_absolute());
        assert!(root.ends_with("demo"));
        assert_eq!(resolve_project_root(None).unwrap(), normalize(&std::env::current_dir().unwrap()));
    }

    #[test]
    fn test_missing_project_is_precondition_error() {
        let tmp = TempDir::new().unwrap();
        assert!(ensure_project_dir(tmp.path()).is_ok());

        let missing = tmp.path().join("missing");
        let err = ensure_project_dir(&missing).unwrap_err();
        assert!(matches!(err, PackError::ProjectNotFound(ref path) if *path == missing));
    }
}
