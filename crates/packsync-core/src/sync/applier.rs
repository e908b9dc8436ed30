//! Applying the template pack to a project
//!
//! For every artifact the decision is the same: if the destination exists and
//! overwriting isn't allowed it is skipped, otherwise it is rewritten in full.
//! Artifacts are processed in a fixed order (shared utilities, then each
//! selected adapter in declaration order) and reported as they happen.

use super::entry::{build_entry_document, EntryContext};
use crate::adapters::prose::build_prose_document;
use crate::adapters::{join_relative, resolve_path, Adapter, AdapterSpec, EntryKind, EntrySpec};
use crate::error::PackError;
use crate::product::ProductConfig;
use crate::templates::copier::{copy_file, copy_tree};
use crate::templates::metadata::{Rule, Skill};
use crate::templates::pack::{is_dir, TemplatePack, RULES_DIR, SCRIPTS_DIR, SKILLS_DIR};
use anyhow::{Context, Result};
use colored::Colorize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// Pack directories mirrored to the project root regardless of adapters
const SHARED_UTILITY_DIRS: &[&str] = &["tool", "tools"];

const VSCODE_TASKS_SOURCE: &str = "vscode/tasks.json";
const VSCODE_TASKS_DESTINATION: &str = ".vscode/tasks.json";

/// Whether a run is a first install or a refresh of installed adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Respects the caller's force flag
    Install,
    /// Always overwrites, correcting drift from the pack
    Sync,
}

/// What happened to one artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Installed,
    Synced,
    Skipped,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Installed => "Installed",
            Action::Synced => "Synced",
            Action::Skipped => "Skipped",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Disposition of a single artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub label: String,
    pub destination: PathBuf,
    pub action: Action,
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            Action::Skipped => write!(
                f,
                "Skipped {} (exists): {}",
                self.label,
                self.destination.display()
            ),
            action => write!(
                f,
                "{} {}: {}",
                action,
                self.label,
                self.destination.display()
            ),
        }
    }
}

impl SyncOutcome {
    /// The outcome line with the verb colored for a terminal
    pub fn styled(&self) -> String {
        let destination = self.destination.display();
        match self.action {
            Action::Installed => format!("{} {}: {}", "Installed".green(), self.label, destination),
            Action::Synced => format!("{} {}: {}", "Synced".cyan(), self.label, destination),
            Action::Skipped => format!(
                "{} {} (exists): {}",
                "Skipped".yellow(),
                self.label,
                destination
            ),
        }
    }
}

/// Everything a run needs besides the pack itself
#[derive(Debug, Clone)]
pub struct ApplyRequest {
    /// Absolute project directory
    pub project_root: PathBuf,
    pub adapters: BTreeSet<Adapter>,
    pub force: bool,
    pub mode: Mode,
}

/// Applies a template pack for a product
pub struct PackApplier<'a, C: ProductConfig> {
    config: &'a C,
    pack: &'a TemplatePack,
}

impl<'a, C: ProductConfig> PackApplier<'a, C> {
    pub fn new(config: &'a C, pack: &'a TemplatePack) -> Self {
        Self { config, pack }
    }

    /// Run the pack against a project.
    ///
    /// `report` sees each outcome as soon as it is decided, so outcomes stay
    /// visible even if a later write fails. An error from `report` aborts the run.
    pub async fn apply<F>(&self, request: &ApplyRequest, report: F) -> Result<Vec<SyncOutcome>>
    where
        F: FnMut(&SyncOutcome) -> Result<()>,
    {
        if !is_dir(&request.project_root).await {
            return Err(PackError::ProjectNotFound(request.project_root.clone()).into());
        }

        let mut run = Run::new(request, report);

        self.sync_shared(&mut run).await?;

        let skills = self.pack.load_skills().await?;
        let rules = self.pack.load_rules().await?;
        debug!(skills = skills.len(), rules = rules.len(), "loaded pack metadata");

        for adapter in &request.adapters {
            self.sync_adapter(&mut run, adapter.spec(), &skills, &rules)
                .await?;
        }

        Ok(run.outcomes)
    }

    async fn sync_shared<F: FnMut(&SyncOutcome) -> Result<()>>(&self, run: &mut Run<'_, F>) -> Result<()> {
        let root = run.project_root();
        for dir in SHARED_UTILITY_DIRS {
            run.sync_directory(
                &format!("Workspace {}", dir),
                &self.pack.path(dir),
                &join_relative(&root, dir),
            )
            .await?;
        }

        run.sync_file(
            "Workspace VS Code tasks",
            &self.pack.path(VSCODE_TASKS_SOURCE),
            &join_relative(&root, VSCODE_TASKS_DESTINATION),
        )
        .await
    }

    async fn sync_adapter<F: FnMut(&SyncOutcome) -> Result<()>>(
        &self,
        run: &mut Run<'_, F>,
        spec: &AdapterSpec,
        skills: &[Skill],
        rules: &[Rule],
    ) -> Result<()> {
        let root = run.project_root();

        for (kind, destination) in [
            (SKILLS_DIR, spec.skills),
            (SCRIPTS_DIR, spec.scripts),
            (RULES_DIR, spec.rules),
        ] {
            run.sync_directory(
                &format!("{} {}", spec.label, kind),
                &self.pack.path(kind),
                &join_relative(&root, destination),
            )
            .await?;
        }

        for file in spec.files {
            run.sync_file(
                file.label,
                &self.pack.path(file.source),
                &join_relative(&root, file.destination),
            )
            .await?;
        }

        if let Some(entry) = spec.entry {
            let destination = join_relative(&root, &resolve_path(entry.path, self.config.name()));
            let content = self.entry_document(&root, spec, entry, skills, rules);
            run.write_document(&format!("{} adapter", spec.label), &destination, &content)
                .await?;
        }

        Ok(())
    }

    fn entry_document(
        &self,
        project_root: &Path,
        spec: &AdapterSpec,
        entry: EntrySpec,
        skills: &[Skill],
        rules: &[Rule],
    ) -> String {
        match entry.kind {
            EntryKind::Aggregated => {
                let project_name = project_root
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                build_entry_document(&EntryContext {
                    project_root,
                    project_name: &project_name,
                    skills,
                    rules,
                    pack_root: spec.root,
                    display_name: self.config.display_name(),
                })
            }
            EntryKind::Prose(style) => build_prose_document(self.config, spec, style),
        }
    }
}

/// Per-run state: the overwrite policy and the outcomes so far
struct Run<'r, F> {
    request: &'r ApplyRequest,
    overwrite: bool,
    report: F,
    outcomes: Vec<SyncOutcome>,
}

impl<'r, F: FnMut(&SyncOutcome) -> Result<()>> Run<'r, F> {
    fn new(request: &'r ApplyRequest, report: F) -> Self {
        Self {
            request,
            overwrite: request.force || request.mode == Mode::Sync,
            report,
            outcomes: Vec::new(),
        }
    }

    fn project_root(&self) -> PathBuf {
        self.request.project_root.clone()
    }

    fn written_action(&self) -> Action {
        match self.request.mode {
            Mode::Install => Action::Installed,
            Mode::Sync => Action::Synced,
        }
    }

    /// Returns true when the destination must be left alone
    async fn should_skip(&mut self, label: &str, destination: &Path) -> Result<bool> {
        if !self.overwrite && exists(destination).await {
            self.record(label, destination, Action::Skipped)?;
            return Ok(true);
        }
        Ok(false)
    }

    fn record(&mut self, label: &str, destination: &Path, action: Action) -> Result<()> {
        let outcome = SyncOutcome {
            label: label.to_string(),
            destination: destination.to_path_buf(),
            action,
        };
        (self.report)(&outcome)?;
        self.outcomes.push(outcome);
        Ok(())
    }

    async fn sync_directory(&mut self, label: &str, source: &Path, destination: &Path) -> Result<()> {
        if !is_dir(source).await {
            warn!(source = %source.display(), "{} not in template pack, skipping", label);
            return Ok(());
        }
        if self.should_skip(label, destination).await? {
            return Ok(());
        }

        copy_tree(source, destination, &self.request.project_root, true).await?;
        let action = self.written_action();
        self.record(label, destination, action)
    }

    async fn sync_file(&mut self, label: &str, source: &Path, destination: &Path) -> Result<()> {
        if !exists(source).await {
            debug!(source = %source.display(), "{} not in template pack, skipping", label);
            return Ok(());
        }
        if self.should_skip(label, destination).await? {
            return Ok(());
        }

        copy_file(source, destination, &self.request.project_root).await?;
        let action = self.written_action();
        self.record(label, destination, action)
    }

    async fn write_document(&mut self, label: &str, destination: &Path, content: &str) -> Result<()> {
        if self.should_skip(label, destination).await? {
            return Ok(());
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(destination, content)
            .await
            .with_context(|| format!("Failed to write file: {}", destination.display()))?;

        let action = self.written_action();
        self.record(label, destination, action)
    }
}

async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}
