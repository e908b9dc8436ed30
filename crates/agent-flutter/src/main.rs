//! agent-flutter CLI - Flutter skills/rules for AI coding assistants

mod pack;

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use colored::Colorize;
use packsync_core::project::resolve_project_root;
use packsync_core::sync::{self, ApplyRequest, Mode, PackApplier, SyncOutcome};
use packsync_core::templates::EmbeddedFile;
use packsync_core::{templates, ProductConfig, TemplatePack};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// agent-flutter product configuration
#[derive(Clone)]
pub struct AgentFlutterConfig;

impl ProductConfig for AgentFlutterConfig {
    fn name(&self) -> &'static str {
        "agent-flutter"
    }

    fn display_name(&self) -> &'static str {
        "Agent Flutter"
    }

    fn embedded_pack(&self) -> &'static [EmbeddedFile] {
        pack::FILES
    }

    fn template_dir_env(&self) -> &'static str {
        "AGENT_FLUTTER_TEMPLATE_DIR"
    }

    fn cli_description(&self) -> &'static str {
        "Install and sync Flutter skills/rules/scripts for AI coding assistants"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install agent-flutter --force"
    }

    fn bootstrap_script(&self) -> Option<&'static str> {
        Some("bootstrap_flutter_template.sh")
    }

    fn priority_rules(&self) -> &'static [&'static [&'static str]] {
        &[
            &["ui.md"],
            &["integration-api.md"],
            &["ci-cd-pr.md"],
            &["unit-test.md", "widget-test.md"],
        ]
    }

    fn handoff_rule(&self) -> Option<&'static str> {
        Some("ci-cd-pr.md")
    }

    fn conventions_note(&self) -> Option<&'static str> {
        Some("Preserve Flutter architecture conventions and localization requirements.")
    }
}

#[derive(Parser, Debug)]
#[command(name = "agent-flutter")]
#[command(about = "Install and sync Flutter skills/rules/scripts for AI coding assistants")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub interactive: InteractiveArgs,

    /// Project directory (defaults to the current directory)
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Local template pack directory instead of the bundled one (for development use)
    #[arg(long = "template-dir", global = true)]
    pub template_dir: Option<PathBuf>,

    /// Print debug diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Flags for the interactive setup run when no subcommand is given
#[derive(ClapArgs, Debug, Default)]
pub struct InteractiveArgs {
    /// IDE adapters to install without asking: all, or comma-separated names
    #[arg(long)]
    pub ide: Option<String>,

    /// Overwrite existing adapters without asking
    #[arg(long)]
    pub force: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl InteractiveArgs {
    fn is_set(&self) -> bool {
        self.ide.is_some() || self.force || self.yes
    }
}

impl Args {
    /// Interactive flags only make sense without a subcommand
    pub fn validate(&self) -> Result<()> {
        if self.command.is_some() && self.interactive.is_set() {
            anyhow::bail!(
                "--ide, --force and --yes before a subcommand only apply to interactive setup; pass them after the subcommand"
            );
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install Flutter skills/rules/scripts for selected IDE adapters
    Init(InitCommand),
    /// Update installed adapters from the latest template
    Sync(SyncCommand),
    /// Print available skills/rules from the template pack
    List,
}

#[derive(Parser, Debug)]
pub struct InitCommand {
    /// IDE adapters: all, or comma-separated trae,codex,cursor,windsurf,cline,github
    #[arg(long)]
    pub ide: Option<String>,

    /// Overwrite existing adapters
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct SyncCommand {
    /// IDE adapters to sync (detected from the project when omitted)
    #[arg(long)]
    pub ide: Option<String>,
}

#[tokio::main]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_tracing(args.verbose);

    let result = run(&AgentFlutterConfig, args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(err) = result {
        eprintln!("{} {:#}", "[agent-flutter]".red(), err);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run<C: ProductConfig>(config: &C, args: Args) -> Result<()> {
    args.validate()?;
    let Args {
        command,
        interactive,
        cwd,
        template_dir,
        ..
    } = args;

    match command {
        Some(Command::Init(cmd)) => {
            let project_root = resolve_project_root(cwd.as_deref())?;
            let targets = sync::install_targets(cmd.ide.as_deref())?;
            let pack = open_pack(config, template_dir.as_deref()).await?;

            let request = ApplyRequest {
                project_root,
                adapters: targets.adapters,
                force: cmd.force,
                mode: Mode::Install,
            };
            PackApplier::new(config, &pack)
                .apply(&request, print_outcome)
                .await?;

            println!();
            println!("{}", "Done.".green().bold());
            println!("Use --force to overwrite existing adapters.");
            Ok(())
        }
        Some(Command::Sync(cmd)) => {
            let project_root = resolve_project_root(cwd.as_deref())?;
            let pack = open_pack(config, template_dir.as_deref()).await?;
            let targets =
                sync::sync_targets(cmd.ide.as_deref(), &project_root, config.name()).await?;
            if let Some(message) = targets.message() {
                println!("{}", message);
            }

            let request = ApplyRequest {
                project_root,
                adapters: targets.adapters,
                force: true,
                mode: Mode::Sync,
            };
            PackApplier::new(config, &pack)
                .apply(&request, print_outcome)
                .await?;

            println!();
            println!("{}", "Sync completed.".green().bold());
            Ok(())
        }
        Some(Command::List) => {
            let pack = open_pack(config, template_dir.as_deref()).await?;
            templates::list_pack(&pack).await
        }
        None => run_default(config, interactive, cwd, template_dir).await,
    }
}

/// No subcommand: interactive init
#[cfg(feature = "tui")]
async fn run_default<C: ProductConfig>(
    config: &C,
    interactive: InteractiveArgs,
    cwd: Option<PathBuf>,
    template_dir: Option<PathBuf>,
) -> Result<()> {
    let init_args = init_args(interactive, cwd, template_dir);
    packsync_core::run(config, init_args, CLI_VERSION).await
}

#[cfg(feature = "tui")]
fn init_args(
    interactive: InteractiveArgs,
    cwd: Option<PathBuf>,
    template_dir: Option<PathBuf>,
) -> packsync_core::tui::InitArgs {
    packsync_core::tui::InitArgs {
        template_dir,
        directory: cwd,
        adapters: interactive.ide,
        force: interactive.force,
        yes: interactive.yes,
    }
}

/// No subcommand and no prompts compiled in: show usage
#[cfg(not(feature = "tui"))]
async fn run_default<C: ProductConfig>(
    _config: &C,
    _interactive: InteractiveArgs,
    _cwd: Option<PathBuf>,
    _template_dir: Option<PathBuf>,
) -> Result<()> {
    use clap::CommandFactory;
    Args::command().print_help()?;
    Ok(())
}

async fn open_pack<C: ProductConfig>(config: &C, template_dir: Option<&Path>) -> Result<TemplatePack> {
    let pack = TemplatePack::from_config(config, template_dir).await?;
    tracing::debug!(source = %pack.source(), root = %pack.root().display(), "using template pack");

    if let Some(warning) = pack.compatibility_warning(CLI_VERSION, config.upgrade_command()) {
        eprintln!("{} {}", "Warning:".yellow(), warning);
    }

    Ok(pack)
}

fn print_outcome(outcome: &SyncOutcome) -> Result<()> {
    println!("{}", outcome.styled());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_init() {
        let args =
            Args::try_parse_from(["agent-flutter", "init", "--ide", "codex,cursor", "--force"])
                .unwrap();
        match args.command {
            Some(Command::Init(cmd)) => {
                assert_eq!(cmd.ide.as_deref(), Some("codex,cursor"));
                assert!(cmd.force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_args_global_cwd_after_subcommand() {
        let args = Args::try_parse_from(["agent-flutter", "list", "--cwd", "/tmp/x"]).unwrap();
        assert!(matches!(args.command, Some(Command::List)));
        assert_eq!(args.cwd, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn test_sync_rejects_force() {
        assert!(Args::try_parse_from(["agent-flutter", "sync", "--force"]).is_err());
    }

    #[test]
    fn test_interactive_flags_without_subcommand() {
        let args =
            Args::try_parse_from(["agent-flutter", "--ide", "cursor", "--force", "-y"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.validate().is_ok());
        assert_eq!(args.interactive.ide.as_deref(), Some("cursor"));
        assert!(args.interactive.force);
        assert!(args.interactive.yes);
    }

    #[cfg(feature = "tui")]
    #[test]
    fn test_interactive_flags_reach_init_args() {
        let args = Args::try_parse_from([
            "agent-flutter",
            "--cwd",
            "app",
            "--template-dir",
            "pack",
            "--ide",
            "codex",
            "--yes",
        ])
        .unwrap();

        let init = init_args(args.interactive, args.cwd, args.template_dir);

        assert_eq!(init.directory, Some(PathBuf::from("app")));
        assert_eq!(init.template_dir, Some(PathBuf::from("pack")));
        assert_eq!(init.adapters.as_deref(), Some("codex"));
        assert!(init.yes);
        assert!(!init.force);
    }

    #[test]
    fn test_interactive_flags_before_subcommand_are_rejected() {
        let args = Args::try_parse_from(["agent-flutter", "--yes", "list"]).unwrap();
        assert!(args.validate().is_err());

        let args = Args::try_parse_from(["agent-flutter", "init", "--force"]).unwrap();
        assert!(args.validate().is_ok());
        assert!(!args.interactive.force);
    }

    #[test]
    fn test_default_pack_is_embedded() {
        assert!(AgentFlutterConfig.default_template_dir().is_none());
        assert!(AgentFlutterConfig
            .embedded_pack()
            .iter()
            .any(|file| file.path == "pack.yaml"));
    }

    #[tokio::test]
    async fn test_pack_opens_without_source_tree() {
        let pack = TemplatePack::from_config(&AgentFlutterConfig, None)
            .await
            .unwrap();
        assert_eq!(pack.source(), "bundled pack");
        assert_eq!(
            pack.manifest().label().as_deref(),
            Some("Agent Flutter Pack 0.1.0")
        );
    }
}
