//! Packsync Core - Shared library for AI assistant adapter packs
//!
//! This library installs and keeps in sync the instruction directories that AI
//! coding assistants (Trae, Codex, Cursor, Windsurf, Cline, GitHub Copilot)
//! read from a project, all fed from one shared template pack. It is designed
//! to be used by CLI binaries (e.g. `agent-flutter`) that share the engine but
//! ship their own pack and product configuration.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Pack metadata extraction, placeholder substitution, tree copying
//! - **Layer 2: Adapter Sync** - `ProductConfig` trait, adapter table/detection and `PackApplier`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use packsync_core::{sync, ProductConfig, TemplatePack};
//!
//! let pack = TemplatePack::from_config(&MyConfig, None).await?;
//! let targets = sync::install_targets(Some("codex,cursor"))?;
//! let request = sync::ApplyRequest {
//!     project_root: project_dir,
//!     adapters: targets.adapters,
//!     force: false,
//!     mode: sync::Mode::Install,
//! };
//! sync::PackApplier::new(&MyConfig, &pack)
//!     .apply(&request, |outcome| {
//!         println!("{}", outcome);
//!         Ok(())
//!     })
//!     .await?;
//! ```

pub mod adapters;
pub mod error;
pub mod product;
pub mod project;
pub mod sync;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use adapters::{detect_installed, parse_selection, Adapter, AdapterSpec, ADAPTERS};
pub use error::PackError;
pub use product::ProductConfig;
pub use sync::{Action, ApplyRequest, Mode, PackApplier, SyncOutcome};
pub use templates::{PackManifest, TemplatePack};

#[cfg(feature = "tui")]
pub use tui::run;
