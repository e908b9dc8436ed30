//! Charm-style CLI prompts using cliclack

use crate::adapters::{detect_installed, join_names, Adapter};
use crate::product::ProductConfig;
use crate::project::{ensure_project_dir, resolve_project_root};
use crate::sync::{install_targets, Action, ApplyRequest, Mode, PackApplier, SyncOutcome};
use crate::templates::TemplatePack;
use anyhow::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// CLI arguments for the interactive init
#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    /// Local directory to use for the template pack instead of the default
    pub template_dir: Option<PathBuf>,

    /// Project directory to install into
    pub directory: Option<PathBuf>,

    /// Adapters to install (`all` or comma-separated)
    pub adapters: Option<String>,

    /// Overwrite existing adapters without asking
    pub force: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the interactive init flow
pub async fn run<C: ProductConfig>(config: &C, args: InitArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(config.display_name())?;
    cliclack::log::remark(config.cli_description())?;

    // Step 1: Open the template pack
    let pack = open_pack(config, args.template_dir.as_deref()).await?;

    // Check version compatibility
    if let Some(warning) = pack.compatibility_warning(cli_version, config.upgrade_command()) {
        cliclack::log::warning(format!(
            "Version warning: {}",
            warning.lines().next().unwrap_or(&warning)
        ))?;
    }

    // Step 2: Select directory
    let project_dir = select_directory(&args)?;

    // Step 3: Select adapters, preselecting what is already installed
    let detected = detect_installed(&project_dir, config.name()).await;
    let adapters = select_adapters(&args, &detected)?;

    // Step 4: Confirm overwrites
    let force = confirm_overwrite(&args, &adapters, &detected)?;

    // Step 5: Install
    let request = ApplyRequest {
        project_root: project_dir,
        adapters,
        force,
        mode: Mode::Install,
    };
    let outcomes = PackApplier::new(config, &pack)
        .apply(&request, log_outcome)
        .await?;

    if outcomes.iter().any(|o| o.action == Action::Skipped) {
        cliclack::log::remark("Use --force to overwrite existing adapters.")?;
    }
    cliclack::outro("Done.")?;

    Ok(())
}

async fn open_pack<C: ProductConfig>(config: &C, template_dir: Option<&Path>) -> Result<TemplatePack> {
    let pack = TemplatePack::from_config(config, template_dir).await?;

    match pack.manifest().label() {
        Some(label) => cliclack::log::info(format!("Using {} from {}", label, pack.source()))?,
        None => cliclack::log::info(format!("Using templates from {}", pack.source()))?,
    }

    Ok(pack)
}

fn select_directory(args: &InitArgs) -> Result<PathBuf> {
    // Use --cwd flag if provided
    let path = if let Some(dir) = &args.directory {
        let path = resolve_project_root(Some(dir))?;
        cliclack::log::info(format!("Using directory: {}", path.display()))?;
        path
    } else if args.yes {
        resolve_project_root(None)?
    } else {
        let input: String = cliclack::input("Project directory")
            .placeholder(".")
            .default_input(".")
            .interact()?;

        if input.is_empty() {
            resolve_project_root(None)?
        } else {
            resolve_project_root(Some(Path::new(&input)))?
        }
    };

    ensure_project_dir(&path)?;
    Ok(path)
}

fn select_adapters(args: &InitArgs, detected: &BTreeSet<Adapter>) -> Result<BTreeSet<Adapter>> {
    if let Some(raw) = args.adapters.as_deref() {
        let selection = install_targets(Some(raw))?;
        cliclack::log::info(format!("Adapters: {}", join_names(&selection.adapters)))?;
        return Ok(selection.adapters);
    }

    let preselected = if detected.is_empty() {
        Adapter::all()
    } else {
        cliclack::log::info(format!("Detected adapters: {}", join_names(detected)))?;
        detected.clone()
    };

    if args.yes {
        return Ok(preselected);
    }

    let mut multi = cliclack::multiselect("Select adapters");
    for adapter in Adapter::ALL {
        let spec = adapter.spec();
        multi = multi.item(adapter, spec.label, spec.root);
    }

    let selected: Vec<Adapter> = multi
        .initial_values(preselected.into_iter().collect())
        .required(true)
        .interact()?;

    Ok(selected.into_iter().collect())
}

fn confirm_overwrite(
    args: &InitArgs,
    adapters: &BTreeSet<Adapter>,
    detected: &BTreeSet<Adapter>,
) -> Result<bool> {
    if args.force {
        return Ok(true);
    }

    let existing: BTreeSet<Adapter> = adapters.intersection(detected).copied().collect();
    if existing.is_empty() {
        return Ok(false);
    }

    cliclack::log::warning(format!(
        "Already installed: {}",
        console::style(join_names(&existing)).bold()
    ))?;

    // Keep existing files unless the user opts in
    if args.yes {
        return Ok(false);
    }

    let overwrite: bool = cliclack::confirm("Overwrite existing adapters?")
        .initial_value(false)
        .interact()?;

    Ok(overwrite)
}

fn log_outcome(outcome: &SyncOutcome) -> Result<()> {
    match outcome.action {
        Action::Skipped => cliclack::log::remark(outcome.to_string())?,
        _ => cliclack::log::success(outcome.to_string())?,
    }
    Ok(())
}
