//! Template pack manifest types and parsing

use crate::error::PackError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Manifest file name at the pack root
pub const MANIFEST_FILE_NAME: &str = "pack.yaml";

/// Optional pack manifest (templates/shared/pack.yaml)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackManifest {
    /// Display name of the pack
    #[serde(default)]
    pub name: Option<String>,

    /// Description of what the pack provides
    #[serde(default)]
    pub description: Option<String>,

    /// Semver version for CLI compatibility checking
    #[serde(default)]
    pub version: Option<String>,
}

impl PackManifest {
    /// Parse manifest YAML; `path` is only used for error messages
    pub fn parse(content: &str, path: &Path) -> Result<Self, PackError> {
        // An empty file deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| PackError::InvalidManifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// "name version" label for listings, if the manifest names the pack
    pub fn label(&self) -> Option<String> {
        let name = self.name.as_deref()?;
        Some(match self.version.as_deref() {
            Some(version) => format!("{} {}", name, version),
            None => name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_manifest() {
        let manifest = PackManifest::parse(
            "name: Flutter Pack\ndescription: Skills and rules\nversion: 0.2.0\n",
            Path::new("pack.yaml"),
        )
        .unwrap();

        assert_eq!(manifest.name.as_deref(), Some("Flutter Pack"));
        assert_eq!(manifest.version.as_deref(), Some("0.2.0"));
        assert_eq!(manifest.label().as_deref(), Some("Flutter Pack 0.2.0"));
    }

    #[test]
    fn test_empty_manifest_is_default() {
        let manifest = PackManifest::parse("  \n", Path::new("pack.yaml")).unwrap();
        assert_eq!(manifest, PackManifest::default());
        assert!(manifest.label().is_none());
    }

    #[test]
    fn test_invalid_manifest_is_error() {
        let err = PackManifest::parse("name: [unclosed", Path::new("pack.yaml")).unwrap_err();
        assert!(matches!(err, PackError::InvalidManifest { .. }));
        assert!(err.to_string().contains("pack.yaml"));
    }
}
