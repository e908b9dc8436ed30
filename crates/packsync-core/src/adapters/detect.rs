//! Detection of adapters already installed in a project

use super::{join_relative, resolve_path, Adapter, ADAPTERS};
use std::collections::BTreeSet;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Adapters with at least one marker path present under `project_root`.
///
/// Only reads the filesystem; nothing is created or modified.
pub async fn detect_installed(project_root: &Path, product: &str) -> BTreeSet<Adapter> {
    let mut detected = BTreeSet::new();

    for spec in &ADAPTERS {
        for marker in spec.markers {
            let path = join_relative(project_root, &resolve_path(marker, product));
            if fs::try_exists(&path).await.unwrap_or(false) {
                debug!(adapter = %spec.adapter, marker = %path.display(), "adapter detected");
                detected.insert(spec.adapter);
                break;
            }
        }
    }

    detected
}
