//! Template packs compiled into a product binary
//!
//! A product lists its pack files with `include_bytes!` so an installed binary
//! works without the source tree. The engine only reads packs from disk, so an
//! embedded pack is written to a temporary directory that lives as long as the
//! [`TemplatePack`](super::TemplatePack) opened from it.

use crate::adapters::join_relative;
use anyhow::{Context, Result};
use std::path::Path;
use tempfile::TempDir;
use tokio::fs;
use tracing::debug;

/// One file of an embedded pack
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedFile {
    /// Pack-relative, `/`-separated
    pub path: &'static str,
    pub contents: &'static [u8],
    /// Gets mode 0755 on unix
    pub executable: bool,
}

/// Write `files` into a fresh temporary directory, removed when dropped
pub async fn extract(files: &[EmbeddedFile]) -> Result<TempDir> {
    let dir = tempfile::Builder::new()
        .prefix("packsync-")
        .tempdir()
        .context("Failed to create temporary pack directory")?;

    for file in files {
        let target = join_relative(dir.path(), file.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&target, file.contents)
            .await
            .with_context(|| format!("Failed to write file: {}", target.display()))?;
        if file.executable {
            mark_executable(&target).await?;
        }
    }

    debug!(root = %dir.path().display(), files = files.len(), "extracted embedded pack");
    Ok(dir)
}

#[cfg(unix)]
async fn mark_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .await
        .with_context(|| format!("Failed to set permissions: {}", path.display()))
}

#[cfg(not(unix))]
async fn mark_executable(_path: &Path) -> Result<()> {
    Ok(())
}
