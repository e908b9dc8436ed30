//! Template pack reading, copying and placeholder substitution
//!
//! This module provides:
//! - Template pack location and manifest (TemplatePack, PackManifest)
//! - Skill/rule metadata extraction from front-matter
//! - Template tree copying with placeholder substitution
//! - Packs compiled into a product binary
//! - Version compatibility checking
//! - The `list` report of a pack's contents

pub mod copier;
pub mod embedded;
pub mod manifest;
pub mod metadata;
pub mod pack;
pub mod placeholder;
pub mod version;

use anyhow::Result;
use colored::Colorize;

pub use copier::{copy_file, copy_tree, is_text_file};
pub use embedded::EmbeddedFile;
pub use manifest::PackManifest;
pub use metadata::{load_rules, load_skills, FrontMatter, Rule, Skill};
pub use pack::TemplatePack;
pub use placeholder::substitute;
pub use version::check_compatibility;

/// Print the skills and rules a pack provides
pub async fn list_pack(pack: &TemplatePack) -> Result<()> {
    let skills = pack.load_skills().await?;
    let rules = pack.load_rules().await?;

    println!("{} {}", "Source:".bold(), pack.source());
    if let Some(label) = pack.manifest().label() {
        println!("{} {}", "Pack:".bold(), label);
    }

    println!();
    println!("{}", format!("Skills ({})", skills.len()).cyan().bold());
    for skill in &skills {
        println!("  {} {} ({})", "-".blue(), skill.name, skill.slug);
    }

    println!();
    println!("{}", format!("Rules ({})", rules.len()).cyan().bold());
    for rule in &rules {
        println!("  {} {}", "-".blue(), rule.file);
    }

    Ok(())
}
