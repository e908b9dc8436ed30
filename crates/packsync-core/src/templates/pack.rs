//! Locating and opening the shared template pack
//!
//! The pack is resolved from (highest priority first):
//! 1. An explicit directory (e.g. `--template-dir`)
//! 2. The product's override environment variable
//! 3. The product's default template directory, if it has one
//! 4. The pack embedded in the product binary

use super::embedded::{self, EmbeddedFile};
use super::manifest::{PackManifest, MANIFEST_FILE_NAME};
use super::metadata::{self, Rule, Skill};
use super::version::check_compatibility;
use crate::error::PackError;
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;
use tracing::debug;

pub const SKILLS_DIR: &str = "skills";
pub const RULES_DIR: &str = "rules";
pub const SCRIPTS_DIR: &str = "scripts";

/// A read-only template pack on disk
#[derive(Debug, Clone)]
pub struct TemplatePack {
    root: PathBuf,
    manifest: PackManifest,
    /// Keeps an extracted embedded pack alive
    extracted: Option<Arc<TempDir>>,
}

impl TemplatePack {
    /// Directory chosen by the caller or the environment, if any
    pub fn override_root<C: ProductConfig>(config: &C, explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(dir) = explicit {
            return Some(dir.to_path_buf());
        }
        match std::env::var_os(config.template_dir_env()) {
            Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
            _ => None,
        }
    }

    /// Open the pack resolved for a product
    pub async fn from_config<C: ProductConfig>(config: &C, explicit: Option<&Path>) -> Result<Self> {
        if let Some(root) = Self::override_root(config, explicit) {
            return Self::open(root).await;
        }
        if let Some(root) = config.default_template_dir() {
            return Self::open(root).await;
        }

        let files = config.embedded_pack();
        if files.is_empty() {
            return Err(PackError::NoTemplatePack(config.name().to_string()).into());
        }
        Self::from_embedded(files).await
    }

    /// Extract a compiled-in pack and open it
    pub async fn from_embedded(files: &[EmbeddedFile]) -> Result<Self> {
        let dir = embedded::extract(files).await?;
        let mut pack = Self::open(dir.path().to_path_buf()).await?;
        pack.extracted = Some(Arc::new(dir));
        Ok(pack)
    }

    /// Open a pack directory, reading its manifest if present
    pub async fn open(root: PathBuf) -> Result<Self> {
        if !is_dir(&root).await {
            return Err(PackError::TemplateNotFound(root).into());
        }

        let manifest_path = root.join(MANIFEST_FILE_NAME);
        let manifest = if fs::try_exists(&manifest_path).await.unwrap_or(false) {
            let content = fs::read_to_string(&manifest_path)
                .await
                .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
            PackManifest::parse(&content, &manifest_path)?
        } else {
            PackManifest::default()
        };

        debug!(root = %root.display(), "opened template pack");
        Ok(Self {
            root,
            manifest,
            extracted: None,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_embedded(&self) -> bool {
        self.extracted.is_some()
    }

    /// Where the pack came from, for display
    pub fn source(&self) -> String {
        if self.is_embedded() {
            "bundled pack".to_string()
        } else {
            self.root.display().to_string()
        }
    }

    pub fn manifest(&self) -> &PackManifest {
        &self.manifest
    }

    /// Warning text when the pack expects a newer CLI than `cli_version`
    pub fn compatibility_warning(&self, cli_version: &str, upgrade_command: &str) -> Option<String> {
        let pack_version = self.manifest.version.as_deref()?;
        check_compatibility(cli_version, pack_version, upgrade_command)
    }

    /// Path of an artifact inside the pack (it may not exist)
    pub fn path(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }

    pub async fn load_skills(&self) -> Result<Vec<Skill>> {
        metadata::load_skills(&self.path(SKILLS_DIR)).await
    }

    pub async fn load_rules(&self) -> Result<Vec<Rule>> {
        metadata::load_rules(&self.path(RULES_DIR)).await
    }
}

/// Whether `path` exists and is a directory
pub async fn is_dir(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|metadata| metadata.is_dir())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Clone)]
    struct TestConfig {
        default_dir: Option<PathBuf>,
        embedded: &'static [EmbeddedFile],
    }

    static EMBEDDED: &[EmbeddedFile] = &[
        EmbeddedFile {
            path: "pack.yaml",
            contents: b"name: Bundled\nversion: 0.3.0\n",
            executable: false,
        },
        EmbeddedFile {
            path: "rules/ui.md",
            contents: b"# UI\n",
            executable: false,
        },
    ];

    impl ProductConfig for TestConfig {
        fn name(&self) -> &'static str {
            "test-pack"
        }
        fn display_name(&self) -> &'static str {
            "Test Pack"
        }
        fn default_template_dir(&self) -> Option<PathBuf> {
            self.default_dir.clone()
        }
        fn embedded_pack(&self) -> &'static [EmbeddedFile] {
            self.embedded
        }
        fn template_dir_env(&self) -> &'static str {
            "PACKSYNC_TEST_UNSET_TEMPLATE_DIR"
        }
        fn cli_description(&self) -> &'static str {
            "test"
        }
        fn upgrade_command(&self) -> &'static str {
            "cargo install test-pack --force"
        }
    }

    #[test]
    fn test_explicit_dir_wins() {
        let config = TestConfig {
            default_dir: Some(PathBuf::from("/default")),
            embedded: EMBEDDED,
        };
        let root = TemplatePack::override_root(&config, Some(Path::new("/explicit")));
        assert_eq!(root, Some(PathBuf::from("/explicit")));
        assert_eq!(TemplatePack::override_root(&config, None), None);
    }

    #[tokio::test]
    async fn test_default_dir_before_embedded_pack() {
        let tmp = TempDir::new().unwrap();
        let config = TestConfig {
            default_dir: Some(tmp.path().to_path_buf()),
            embedded: EMBEDDED,
        };

        let pack = TemplatePack::from_config(&config, None).await.unwrap();

        assert_eq!(pack.root(), tmp.path());
        assert!(!pack.is_embedded());
        assert_eq!(pack.source(), tmp.path().display().to_string());
    }

    #[tokio::test]
    async fn test_embedded_pack_without_default_dir() {
        let config = TestConfig {
            default_dir: None,
            embedded: EMBEDDED,
        };

        let pack = TemplatePack::from_config(&config, None).await.unwrap();
        let root = pack.root().to_path_buf();

        assert!(pack.is_embedded());
        assert_eq!(pack.source(), "bundled pack");
        assert_eq!(pack.manifest().label().as_deref(), Some("Bundled 0.3.0"));
        assert_eq!(pack.load_rules().await.unwrap()[0].file, "ui.md");

        // Clones share the extracted directory
        let clone = pack.clone();
        drop(pack);
        assert!(clone.root().is_dir());
        drop(clone);
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn test_no_pack_configured_is_error() {
        let config = TestConfig {
            default_dir: None,
            embedded: &[],
        };

        let err = TemplatePack::from_config(&config, None).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::NoTemplatePack(name)) if name == "test-pack"
        ));
    }

    #[tokio::test]
    async fn test_open_missing_pack_is_precondition_error() {
        let tmp = TempDir::new().unwrap();
        let err = TemplatePack::open(tmp.path().join("missing")).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::TemplateNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_open_reads_manifest() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("pack.yaml"), "name: Demo\nversion: 1.0.0\n").unwrap();

        let pack = TemplatePack::open(tmp.path().to_path_buf()).await.unwrap();

        assert_eq!(pack.manifest().label().as_deref(), Some("Demo 1.0.0"));
        assert_eq!(
            pack.path("github/workflows/gate.yml"),
            tmp.path().join("github").join("workflows").join("gate.yml")
        );
    }

    #[tokio::test]
    async fn test_compatibility_warning_needs_manifest_version() {
        let tmp = TempDir::new().unwrap();
        let pack = TemplatePack::open(tmp.path().to_path_buf()).await.unwrap();
        assert_eq!(pack.compatibility_warning("0.1.0", "upgrade"), None);

        std::fs::write(tmp.path().join("pack.yaml"), "version: 9.0.0\n").unwrap();
        let pack = TemplatePack::open(tmp.path().to_path_buf()).await.unwrap();
        let warning = pack.compatibility_warning("0.1.0", "upgrade").unwrap();
        assert!(warning.contains("9.0.0"));
        assert!(warning.ends_with("Consider updating: upgrade"));
    }
}
