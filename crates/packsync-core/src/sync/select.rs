//! Resolving which adapters a run targets

use crate::adapters::{detect_installed, join_names, parse_selection, Adapter};
use anyhow::Result;
use std::collections::BTreeSet;
use std::path::Path;

/// Where a target set came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    /// Named by the caller
    Explicit,
    /// Found installed in the project
    Detected,
    /// Nothing installed, so every adapter
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSelection {
    pub adapters: BTreeSet<Adapter>,
    pub source: SelectionSource,
}

impl TargetSelection {
    /// Line announcing a detection result; explicit selections print nothing
    pub fn message(&self) -> Option<String> {
        match self.source {
            SelectionSource::Explicit => None,
            SelectionSource::Detected => {
                Some(format!("Detected adapters: {}", join_names(&self.adapters)))
            }
            SelectionSource::Fallback => {
                Some("No existing adapters detected. Syncing all adapters.".to_string())
            }
        }
    }
}

/// Targets for an install: the explicit list, or every adapter
pub fn install_targets(raw: Option<&str>) -> Result<TargetSelection> {
    let adapters = parse_selection(raw.unwrap_or("all"))?;
    Ok(TargetSelection {
        adapters,
        source: SelectionSource::Explicit,
    })
}

/// Targets for a sync: the explicit list, else the installed adapters, else all
pub async fn sync_targets(
    raw: Option<&str>,
    project_root: &Path,
    product: &str,
) -> Result<TargetSelection> {
    if let Some(raw) = raw {
        return install_targets(Some(raw));
    }

    let detected = detect_installed(project_root, product).await;
    if detected.is_empty() {
        return Ok(TargetSelection {
            adapters: Adapter::all(),
            source: SelectionSource::Fallback,
        });
    }

    Ok(TargetSelection {
        adapters: detected,
        source: SelectionSource::Detected,
    })
}
