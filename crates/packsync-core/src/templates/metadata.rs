//! Skill and rule metadata extracted from the template pack

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// File that defines a skill inside its directory
pub const SKILL_FILE_NAME: &str = "SKILL.md";

/// Extension recognized for rule documents
const RULE_EXTENSION: &str = ".md";

const FRONT_MATTER_DELIMITER: &str = "---";

/// Leading `key: value` block of a markdown document.
///
/// Parsing never fails: anything that doesn't look like front-matter yields an
/// empty map, and malformed lines are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    values: HashMap<String, String>,
}

impl FrontMatter {
    pub fn parse(content: &str) -> Self {
        let mut lines = content.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));
        if lines.next() != Some(FRONT_MATTER_DELIMITER) {
            return Self::default();
        }

        let mut values = HashMap::new();
        for line in lines {
            if line == FRONT_MATTER_DELIMITER {
                break;
            }
            let Some(index) = line.find(':') else {
                continue;
            };
            if index == 0 {
                continue;
            }
            let key = line[..index].trim();
            if key.is_empty() {
                continue;
            }
            let value = strip_quotes(line[index + 1..].trim());
            values.insert(key.to_string(), value.to_string());
        }

        Self { values }
    }

    /// Value for `key`, treating an empty string as absent
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Drop one leading and one trailing quote character, independently
fn strip_quotes(value: &str) -> &str {
    let is_quote = |c: char| c == '"' || c == '\'';
    let value = value.strip_prefix(is_quote).unwrap_or(value);
    value.strip_suffix(is_quote).unwrap_or(value)
}

/// A skill directory from the pack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    /// Directory name, unique within the pack
    pub slug: String,
    /// Display name (defaults to the slug)
    pub name: String,
    /// Free text, may be empty
    pub description: String,
    /// Path to the skill's `SKILL.md`
    pub path: PathBuf,
}

/// A standalone rule document from the pack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub file: String,
    pub path: PathBuf,
}

/// Read every skill under `skills_dir`, sorted by slug.
///
/// Subdirectories without a `SKILL.md` are skipped; a missing directory yields
/// no skills.
pub async fn load_skills(skills_dir: &Path) -> Result<Vec<Skill>> {
    let mut skills = Vec::new();
    let Some(mut entries) = read_dir_if_exists(skills_dir).await? else {
        return Ok(skills);
    };

    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("Failed to read {}", skills_dir.display()))?
    {
        let file_type = entry
            .file_type()
            .await
            .with_context(|| format!("Failed to inspect {}", entry.path().display()))?;
        if !file_type.is_dir() {
            continue;
        }

        let slug = entry.file_name().to_string_lossy().into_owned();
        let skill_path = entry.path().join(SKILL_FILE_NAME);
        if !fs::try_exists(&skill_path).await.unwrap_or(false) {
            debug!(slug = %slug, "skipping skill directory without {}", SKILL_FILE_NAME);
            continue;
        }

        let content = fs::read_to_string(&skill_path)
            .await
            .with_context(|| format!("Failed to read {}", skill_path.display()))?;
        let front_matter = FrontMatter::parse(&content);

        skills.push(Skill {
            name: front_matter.get("name").unwrap_or(slug.as_str()).to_string(),
            description: front_matter.get("description").unwrap_or_default().to_string(),
            slug,
            path: skill_path,
        });
    }

    skills.sort_by(|a, b| a.slug.cmp(&b.slug));
    Ok(skills)
}

/// Read every `.md` file directly under `rules_dir`, sorted by file name
pub async fn load_rules(rules_dir: &Path) -> Result<Vec<Rule>> {
    let mut rules = Vec::new();
    let Some(mut entries) = read_dir_if_exists(rules_dir).await? else {
        return Ok(rules);
    };

    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("Failed to read {}", rules_dir.display()))?
    {
        let file_type = entry
            .file_type()
            .await
            .with_context(|| format!("Failed to inspect {}", entry.path().display()))?;
        let file = entry.file_name().to_string_lossy().into_owned();
        if !file_type.is_file() || !file.ends_with(RULE_EXTENSION) {
            continue;
        }
        rules.push(Rule {
            path: entry.path(),
            file,
        });
    }

    rules.sort_by(|a, b| a.file.cmp(&b.file));
    Ok(rules)
}

async fn read_dir_if_exists(dir: &Path) -> Result<Option<fs::ReadDir>> {
    match fs::metadata(dir).await {
        Ok(metadata) if metadata.is_dir() => {}
        Ok(_) => return Ok(None),
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("Failed to inspect {}", dir.display())),
    }
    let entries = fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read {}", dir.display()))?;
    Ok(Some(entries))
}
