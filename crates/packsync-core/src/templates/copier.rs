//! Template tree copying with placeholder substitution

use super::placeholder::substitute;
use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

/// OS-generated marker file never copied out of the pack
const IGNORED_FILE_NAME: &str = ".DS_Store";

/// Extensions copied byte-for-byte instead of going through substitution
const BINARY_EXTENSIONS: &[&str] = &[
    "a", "class", "dll", "dylib", "eot", "exe", "gif", "ico", "jpeg", "jpg", "mp3", "mp4", "otf",
    "pdf", "png", "so", "ttf", "wav", "webp", "woff", "woff2", "zip",
];

/// Whether a file gets placeholder substitution (files without an extension do)
pub fn is_text_file(path: &Path) -> bool {
    match path.extension() {
        Some(ext) => {
            let ext = ext.to_string_lossy().to_ascii_lowercase();
            !BINARY_EXTENSIONS.contains(&ext.as_str())
        }
        None => true,
    }
}

/// Mirror `source_dir` into `destination_dir`, resolving placeholders in text files.
///
/// With `overwrite_existing` the destination is removed first, so the result is an
/// exact mirror rather than a merge. Returns the number of files written.
pub async fn copy_tree(
    source_dir: &Path,
    destination_dir: &Path,
    project_root: &Path,
    overwrite_existing: bool,
) -> Result<usize> {
    if overwrite_existing {
        remove_existing(destination_dir).await?;
    }

    fs::create_dir_all(destination_dir)
        .await
        .with_context(|| format!("Failed to create directory: {}", destination_dir.display()))?;

    let walker = WalkDir::new(source_dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.file_name() != IGNORED_FILE_NAME);

    let mut written = 0;
    for entry in walker {
        let entry =
            entry.with_context(|| format!("Failed to read template: {}", source_dir.display()))?;
        let relative = entry.path().strip_prefix(source_dir).with_context(|| {
            format!("Template entry outside source: {}", entry.path().display())
        })?;
        let target = destination_dir.join(relative);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&target)
                .await
                .with_context(|| format!("Failed to create directory: {}", target.display()))?;
            continue;
        }
        if !file_type.is_file() {
            continue;
        }

        write_file(entry.path(), &target, project_root).await?;
        written += 1;
    }

    debug!(
        source = %source_dir.display(),
        destination = %destination_dir.display(),
        files = written,
        "copied template tree"
    );

    Ok(written)
}

/// Copy a single template file, creating parent directories as needed
pub async fn copy_file(source: &Path, destination: &Path, project_root: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    write_file(source, destination, project_root).await
}

async fn write_file(source: &Path, destination: &Path, project_root: &Path) -> Result<()> {
    if is_text_file(source) {
        let bytes = fs::read(source)
            .await
            .with_context(|| format!("Failed to read file: {}", source.display()))?;
        let result = match String::from_utf8(bytes) {
            Ok(text) => fs::write(destination, substitute(&text, project_root)).await,
            // Not actually text, keep it intact
            Err(err) => fs::write(destination, err.into_bytes()).await,
        };
        result.with_context(|| format!("Failed to write file: {}", destination.display()))?;
    } else {
        fs::copy(source, destination)
            .await
            .with_context(|| format!("Failed to copy file: {}", destination.display()))?;
    }

    copy_permissions(source, destination).await;
    Ok(())
}

/// Best-effort mode propagation; unsupported filesystems are ignored
async fn copy_permissions(source: &Path, destination: &Path) {
    if let Ok(metadata) = fs::metadata(source).await {
        let _ = fs::set_permissions(destination, metadata.permissions()).await;
    }
}

async fn remove_existing(path: &Path) -> Result<()> {
    let result = match fs::symlink_metadata(path).await {
        Ok(metadata) if metadata.is_dir() => fs::remove_dir_all(path).await,
        Ok(_) => fs::remove_file(path).await,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => Err(e),
    };
    result.with_context(|| format!("Failed to remove {}", path.display()))
}
