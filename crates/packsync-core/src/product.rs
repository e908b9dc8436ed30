//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface that each product (e.g. agent-flutter) must
//! implement to configure where its template pack lives and how its adapter
//! documents are worded.

use crate::templates::EmbeddedFile;
use std::path::PathBuf;

/// Configuration trait for different CLI products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - Template pack location and its override variable
/// - Parameters for the generated adapter documents
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command and adapter document file names)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Template pack directory used when no override is set.
    ///
    /// Products that ship their pack inside the binary leave this as `None`.
    fn default_template_dir(&self) -> Option<PathBuf> {
        None
    }

    /// Pack files compiled into the product binary
    fn embedded_pack(&self) -> &'static [EmbeddedFile] {
        &[]
    }

    /// Environment variable name for overriding the template pack location
    fn template_dir_env(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// Scaffolding script shipped under `scripts/`, referenced by adapter documents
    fn bootstrap_script(&self) -> Option<&'static str> {
        None
    }

    /// Rule files read first, in order; files in the same tier share a priority
    fn priority_rules(&self) -> &'static [&'static [&'static str]] {
        &[]
    }

    /// Rule file to follow before handing off a finished feature
    fn handoff_rule(&self) -> Option<&'static str> {
        None
    }

    /// Extra project conventions line for checklist-style adapter documents
    fn conventions_note(&self) -> Option<&'static str> {
        None
    }
}
