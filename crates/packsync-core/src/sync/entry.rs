//! Aggregated entry document listing every skill and rule of the pack

use crate::templates::metadata::{Rule, Skill, SKILL_FILE_NAME};
use crate::templates::pack::{RULES_DIR, SKILLS_DIR};
use crate::templates::placeholder::to_posix_path;
use std::path::Path;

/// Inputs for [`build_entry_document`]
#[derive(Debug, Clone, Copy)]
pub struct EntryContext<'a> {
    pub project_root: &'a Path,
    pub project_name: &'a str,
    pub skills: &'a [Skill],
    pub rules: &'a [Rule],
    /// Project-relative directory the pack was installed into, e.g. `.codex`
    pub pack_root: &'a str,
    /// Product display name used in the pack heading
    pub display_name: &'a str,
}

/// Render the entry document. Skills and rules keep the order they were given in.
pub fn build_entry_document(ctx: &EntryContext<'_>) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("# AGENTS.md instructions for {}", ctx.project_name));
    lines.push(String::new());
    lines.push(format!("## {} Local Pack", ctx.display_name));
    lines.push(format!(
        "This project uses local instructions installed at `{}`.",
        ctx.pack_root
    ));
    lines.push(String::new());

    lines.push("### Available skills".to_string());
    for skill in ctx.skills {
        let description = if skill.description.is_empty() {
            "No description"
        } else {
            skill.description.as_str()
        };
        lines.push(format!(
            "- {}: {} (file: {}/{}/{}/{})",
            skill.slug, description, ctx.pack_root, SKILLS_DIR, skill.slug, SKILL_FILE_NAME
        ));
    }
    lines.push(String::new());

    lines.push("### Available rules".to_string());
    for rule in ctx.rules {
        lines.push(format!(
            "- {} (file: {}/{}/{})",
            rule.file, ctx.pack_root, RULES_DIR, rule.file
        ));
    }
    lines.push(String::new());

    lines.push("### Trigger rules".to_string());
    lines.push("- If a task clearly matches a skill description, apply that skill first.".to_string());
    lines.push("- Apply matching rule files before making code changes.".to_string());
    lines.push("- Keep generated docs/specs updated when UI or API behavior changes.".to_string());
    lines.push(String::new());

    lines.push("### Location policy".to_string());
    lines.push(format!("- Project root: {}", to_posix_path(ctx.project_root)));
    lines.push(format!("- Local pack root: `{}`", ctx.pack_root));

    let mut document = lines.join("\n");
    document.push('\n');
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn skill(slug: &str, description: &str) -> Skill {
        Skill {
            slug: slug.to_string(),
            name: slug.to_string(),
            description: description.to_string(),
            path: PathBuf::from(format!("/pack/skills/{}/SKILL.md", slug)),
        }
    }

    fn rule(file: &str) -> Rule {
        Rule {
            file: file.to_string(),
            path: PathBuf::from(format!("/pack/rules/{}", file)),
        }
    }

    #[test]
    fn test_full_document() {
        let skills = vec![skill("auth", "Handles login"), skill("ui", "")];
        let rules = vec![rule("ci-cd-pr.md"), rule("ui.md")];
        let ctx = EntryContext {
            project_root: Path::new("/work/shop_app"),
            project_name: "shop_app",
            skills: &skills,
            rules: &rules,
            pack_root: ".codex",
            display_name: "Agent Flutter",
        };

        let expected = "\
# AGENTS.md instructions for shop_app

## Agent Flutter Local Pack
This project uses local instructions installed at `.codex`.

### Available skills
- auth: Handles login (file: .codex/skills/auth/SKILL.md)
- ui: No description (file: .codex/skills/ui/SKILL.md)

### Available rules
- ci-cd-pr.md (file: .codex/rules/ci-cd-pr.md)
- ui.md (file: .codex/rules/ui.md)

### Trigger rules
- If a task clearly matches a skill description, apply that skill first.
- Apply matching rule files before making code changes.
- Keep generated docs/specs updated when UI or API behavior changes.

### Location policy
- Project root: /work/shop_app
- Local pack root: `.codex`
";
        assert_eq!(build_entry_document(&ctx), expected);
    }

    #[test]
    fn test_empty_pack_still_has_sections() {
        let ctx = EntryContext {
            project_root: Path::new("/p"),
            project_name: "p",
            skills: &[],
            rules: &[],
            pack_root: ".codex",
            display_name: "Agent Flutter",
        };

        let doc = build_entry_document(&ctx);
        assert!(doc.contains("### Available skills\n\n### Available rules\n\n### Trigger rules"));
    }

    #[test]
    fn test_order_follows_input() {
        let skills = vec![skill("zeta", "z"), skill("alpha", "a")];
        let ctx = EntryContext {
            project_root: Path::new("/p"),
            project_name: "p",
            skills: &skills,
            rules: &[],
            pack_root: ".codex",
            display_name: "X",
        };

        let doc = build_entry_document(&ctx);
        let zeta = doc.find("- zeta").unwrap();
        let alpha = doc.find("- alpha").unwrap();
        assert!(zeta < alpha);
    }
}
