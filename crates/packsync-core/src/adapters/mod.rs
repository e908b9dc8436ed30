//! Supported AI assistant adapters and their directory conventions
//!
//! Every adapter is described by one row of [`ADAPTERS`]. The orchestrator and
//! the detector only iterate this table, so adding an adapter is a data change.

pub mod detect;
pub mod prose;

use crate::error::PackError;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use detect::detect_installed;

/// Replaced with the product name in table paths
const PRODUCT_TOKEN: &str = "{product}";

/// Supported adapters, in declaration (and processing) order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Adapter {
    Trae,
    Codex,
    Cursor,
    Windsurf,
    Cline,
    Github,
}

impl Adapter {
    pub const ALL: [Adapter; 6] = [
        Adapter::Trae,
        Adapter::Codex,
        Adapter::Cursor,
        Adapter::Windsurf,
        Adapter::Cline,
        Adapter::Github,
    ];

    /// Identifier accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Adapter::Trae => "trae",
            Adapter::Codex => "codex",
            Adapter::Cursor => "cursor",
            Adapter::Windsurf => "windsurf",
            Adapter::Cline => "cline",
            Adapter::Github => "github",
        }
    }

    pub fn spec(&self) -> &'static AdapterSpec {
        match self {
            Adapter::Trae => &ADAPTERS[0],
            Adapter::Codex => &ADAPTERS[1],
            Adapter::Cursor => &ADAPTERS[2],
            Adapter::Windsurf => &ADAPTERS[3],
            Adapter::Cline => &ADAPTERS[4],
            Adapter::Github => &ADAPTERS[5],
        }
    }

    /// The full closed set
    pub fn all() -> BTreeSet<Adapter> {
        Self::ALL.into_iter().collect()
    }
}

impl fmt::Display for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Adapter {
    type Err = PackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|adapter| adapter.as_str() == value)
            .ok_or(PackError::UnsupportedAdapter(value))
    }
}

/// Parse an adapter selection: `all`, empty, or a comma-separated list
pub fn parse_selection(raw: &str) -> Result<BTreeSet<Adapter>, PackError> {
    let value = raw.trim().to_lowercase();
    if value.is_empty() || value == "all" {
        return Ok(Adapter::all());
    }

    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(Adapter::from_str)
        .collect()
}

/// Comma-separated identifiers, e.g. for "Detected adapters: ..." lines
pub fn join_names(adapters: &BTreeSet<Adapter>) -> String {
    adapters
        .iter()
        .map(Adapter::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// How an adapter's singleton entry document is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Generated from the pack's skill and rule metadata
    Aggregated,
    /// Static instructions pointing into the adapter's pack directories
    Prose(ProseStyle),
}

/// Wording of a static entry document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProseStyle {
    /// Cursor `.mdc` rule with front-matter and a priority list
    CursorRule,
    WindsurfRule,
    /// Checklist-style Cline rule
    ClineRule,
    CopilotInstructions,
}

/// Singleton entry document written for an adapter
#[derive(Debug, Clone, Copy)]
pub struct EntrySpec {
    /// Project-relative path, may contain `{product}`
    pub path: &'static str,
    pub kind: EntryKind,
}

/// A single file copied from the pack into the project
#[derive(Debug, Clone, Copy)]
pub struct TemplateFile {
    pub label: &'static str,
    /// Pack-relative source
    pub source: &'static str,
    /// Project-relative destination
    pub destination: &'static str,
}

/// Directory convention of one adapter
#[derive(Debug)]
pub struct AdapterSpec {
    pub adapter: Adapter,
    /// Label prefix used in outcome lines
    pub label: &'static str,
    /// Root marker directory, also the pack root named in generated documents
    pub root: &'static str,
    pub skills: &'static str,
    pub scripts: &'static str,
    pub rules: &'static str,
    /// Auxiliary files, synced only when present in the pack
    pub files: &'static [TemplateFile],
    pub entry: Option<EntrySpec>,
    /// Paths whose existence means the adapter is installed
    pub markers: &'static [&'static str],
}

/// Adapter table, in declaration order
pub static ADAPTERS: [AdapterSpec; 6] = [
    AdapterSpec {
        adapter: Adapter::Trae,
        label: "Trae",
        root: ".trae",
        skills: ".trae/skills",
        scripts: ".trae/scripts",
        rules: ".trae/rules",
        files: &[
            TemplateFile {
                label: "Trae ignore",
                source: ".ignore",
                destination: ".trae/.ignore",
            },
            TemplateFile {
                label: "Trae templates",
                source: "TEMPLATES.md",
                destination: ".trae/TEMPLATES.md",
            },
        ],
        entry: None,
        markers: &[".trae"],
    },
    AdapterSpec {
        adapter: Adapter::Codex,
        label: "Codex",
        root: ".codex",
        skills: ".codex/skills",
        scripts: ".codex/scripts",
        rules: ".codex/rules",
        files: &[],
        entry: Some(EntrySpec {
            path: "AGENTS.md",
            kind: EntryKind::Aggregated,
        }),
        markers: &["AGENTS.md", ".codex/skills"],
    },
    AdapterSpec {
        adapter: Adapter::Cursor,
        label: "Cursor",
        root: ".cursor",
        skills: ".cursor/skills",
        scripts: ".cursor/scripts",
        rules: ".cursor/rules/shared",
        files: &[],
        entry: Some(EntrySpec {
            path: ".cursor/rules/{product}.mdc",
            kind: EntryKind::Prose(ProseStyle::CursorRule),
        }),
        markers: &[".cursor/rules/{product}.mdc"],
    },
    AdapterSpec {
        adapter: Adapter::Windsurf,
        label: "Windsurf",
        root: ".windsurf",
        skills: ".windsurf/skills",
        scripts: ".windsurf/scripts",
        rules: ".windsurf/rules/shared",
        files: &[],
        entry: Some(EntrySpec {
            path: ".windsurf/rules/{product}.md",
            kind: EntryKind::Prose(ProseStyle::WindsurfRule),
        }),
        markers: &[".windsurf/rules/{product}.md"],
    },
    AdapterSpec {
        adapter: Adapter::Cline,
        label: "Cline",
        root: ".clinerules",
        skills: ".clinerules/skills",
        scripts: ".clinerules/scripts",
        rules: ".clinerules/rules",
        files: &[],
        entry: Some(EntrySpec {
            path: ".clinerules/{product}.md",
            kind: EntryKind::Prose(ProseStyle::ClineRule),
        }),
        markers: &[".clinerules/{product}.md"],
    },
    AdapterSpec {
        adapter: Adapter::Github,
        label: "GitHub",
        root: ".github",
        skills: ".github/skills",
        scripts: ".github/scripts",
        rules: ".github/rules",
        files: &[
            TemplateFile {
                label: "GitHub PR template",
                source: "github/pull_request_template.md",
                destination: ".github/pull_request_template.md",
            },
            TemplateFile {
                label: "GitHub PR gate workflow",
                source: "github/workflows/pr-template-gate.yml",
                destination: ".github/workflows/pr-template-gate.yml",
            },
        ],
        entry: Some(EntrySpec {
            path: ".github/copilot-instructions.md",
            kind: EntryKind::Prose(ProseStyle::CopilotInstructions),
        }),
        markers: &[".github/copilot-instructions.md", ".github/skills"],
    },
];

/// Expand `{product}` in a table path
pub fn resolve_path(path: &str, product: &str) -> String {
    path.replace(PRODUCT_TOKEN, product)
}

/// Join a `/`-separated table path onto `base`
pub fn join_relative(base: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(base.to_path_buf(), |path, segment| path.join(segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_declaration_order() {
        for (spec, adapter) in ADAPTERS.iter().zip(Adapter::ALL) {
            assert_eq!(spec.adapter, adapter);
            assert!(std::ptr::eq(adapter.spec(), spec));
        }
    }

    #[test]
    fn test_every_adapter_lives_under_its_root() {
        for spec in &ADAPTERS {
            for dir in [spec.skills, spec.scripts, spec.rules] {
                assert!(dir.starts_with(spec.root), "{} outside {}", dir, spec.root);
            }
            assert!(!spec.markers.is_empty());
        }
    }

    #[test]
    fn test_prose_styles_match_their_adapter() {
        let styles: Vec<_> = ADAPTERS
            .iter()
            .map(|spec| (spec.adapter, spec.entry.map(|entry| entry.kind)))
            .collect();
        assert_eq!(
            styles,
            [
                (Adapter::Trae, None),
                (Adapter::Codex, Some(EntryKind::Aggregated)),
                (Adapter::Cursor, Some(EntryKind::Prose(ProseStyle::CursorRule))),
                (Adapter::Windsurf, Some(EntryKind::Prose(ProseStyle::WindsurfRule))),
                (Adapter::Cline, Some(EntryKind::Prose(ProseStyle::ClineRule))),
                (
                    Adapter::Github,
                    Some(EntryKind::Prose(ProseStyle::CopilotInstructions))
                ),
            ]
        );
    }

    #[test]
    fn test_parse_all_and_empty() {
        assert_eq!(parse_selection("all").unwrap(), Adapter::all());
        assert_eq!(parse_selection(" ALL ").unwrap(), Adapter::all());
        assert_eq!(parse_selection("").unwrap(), Adapter::all());
    }

    #[test]
    fn test_parse_list_is_case_insensitive_and_ordered() {
        let selection = parse_selection("GitHub, trae,,codex").unwrap();
        let ordered: Vec<_> = selection.into_iter().collect();
        assert_eq!(ordered, [Adapter::Trae, Adapter::Codex, Adapter::Github]);
    }

    #[test]
    fn test_parse_unknown_adapter_is_error() {
        let err = parse_selection("codex,vim").unwrap_err();
        assert!(matches!(err, PackError::UnsupportedAdapter(ref name) if name == "vim"));
        assert_eq!(err.to_string(), "Unsupported IDE target: vim");
    }

    #[test]
    fn test_resolve_and_join_paths() {
        let path = resolve_path(".cursor/rules/{product}.mdc", "agent-flutter");
        assert_eq!(path, ".cursor/rules/agent-flutter.mdc");
        assert_eq!(
            join_relative(Path::new("/p"), &path),
            Path::new("/p/.cursor/rules/agent-flutter.mdc")
        );
    }

    #[test]
    fn test_join_names() {
        let set: BTreeSet<_> = [Adapter::Github, Adapter::Trae].into_iter().collect();
        assert_eq!(join_names(&set), "trae, github");
    }
}
