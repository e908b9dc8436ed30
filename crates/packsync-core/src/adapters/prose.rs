//! Static entry documents for adapters that don't list skills inline
//!
//! These only point the assistant at the adapter's pack directories; their
//! wording is parameterized by the product, never by pack contents.

use super::{AdapterSpec, ProseStyle};
use crate::product::ProductConfig;

/// Numbered markdown list that skips absent steps without leaving gaps
#[derive(Default)]
struct Steps {
    lines: Vec<String>,
}

impl Steps {
    fn push(&mut self, step: impl Into<String>) {
        let n = self.lines.len() + 1;
        self.lines.push(format!("{}. {}", n, step.into()));
    }

    fn push_opt(&mut self, step: Option<String>) {
        if let Some(step) = step {
            self.push(step);
        }
    }

    fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

/// Entry document in `style`, pointing into the directories of `spec`
pub fn build_prose_document<C: ProductConfig>(
    config: &C,
    spec: &AdapterSpec,
    style: ProseStyle,
) -> String {
    match style {
        ProseStyle::CursorRule => cursor_rule(config, spec),
        ProseStyle::WindsurfRule => windsurf_rule(config, spec),
        ProseStyle::ClineRule => cline_rule(config, spec),
        ProseStyle::CopilotInstructions => copilot_instructions(config, spec),
    }
}

fn bootstrap_command<C: ProductConfig>(config: &C, spec: &AdapterSpec) -> Option<String> {
    config
        .bootstrap_script()
        .map(|script| format!("bash {}/{}", spec.scripts, script))
}

fn handoff_step<C: ProductConfig>(config: &C, spec: &AdapterSpec, before: &str) -> Option<String> {
    config.handoff_rule().map(|rule| {
        format!(
            "For completed UI/API features, follow `{}/{}` before {}.",
            spec.rules, rule, before
        )
    })
}

fn cursor_rule<C: ProductConfig>(config: &C, spec: &AdapterSpec) -> String {
    let mut out = format!(
        "---\ndescription: {} local skills and rules\nalwaysApply: false\n---\n\
         Use local instructions from `{}`.\n",
        config.display_name(),
        spec.root
    );

    let tiers = config.priority_rules();
    if !tiers.is_empty() {
        let mut priority = Steps::default();
        for tier in tiers {
            let files: Vec<String> = tier
                .iter()
                .map(|file| format!("`{}/{}`", spec.rules, file))
                .collect();
            priority.push(files.join(" and "));
        }
        out.push_str("\nPriority:\n");
        out.push_str(&priority.render());
    }

    out.push_str(&format!(
        "\nWhen a task matches a skill, load the corresponding `SKILL.md` under:\n\
         `{}/<skill>/SKILL.md`\n",
        spec.skills
    ));

    if let Some(command) = bootstrap_command(config, spec) {
        out.push_str(&format!(
            "\nFor new project scaffolding, run:\n`{}`\n",
            command
        ));
    }

    out
}

fn windsurf_rule<C: ProductConfig>(config: &C, spec: &AdapterSpec) -> String {
    let mut steps = Steps::default();
    steps.push(format!("Apply relevant files in `{}/`.", spec.rules));
    steps.push(format!(
        "If task matches a skill, load `{}/<skill>/SKILL.md`.",
        spec.skills
    ));
    steps.push_opt(
        bootstrap_command(config, spec)
            .map(|command| format!("For new project scaffolding, run `{}`.", command)),
    );
    steps.push("Keep spec documentation synchronized after UI/API changes.");
    steps.push_opt(handoff_step(config, spec, "handoff"));

    format!(
        "# {} Rules\n\nUse local instructions in `{}`.\n\nRequired order:\n{}",
        config.display_name(),
        spec.root,
        steps.render()
    )
}

fn cline_rule<C: ProductConfig>(config: &C, spec: &AdapterSpec) -> String {
    let mut steps = Steps::default();
    steps.push(format!("Read matching rule files under `{}`.", spec.rules));
    steps.push(format!("Apply matching skills from `{}`.", spec.skills));
    steps.push_opt(
        bootstrap_command(config, spec)
            .map(|command| format!("For new project scaffolding, run `{}`.", command)),
    );
    steps.push_opt(config.conventions_note().map(str::to_string));
    steps.push("Update docs/specs after behavior changes.");
    steps.push_opt(handoff_step(config, spec, "handoff"));

    format!(
        "# {} Cline Rule\n\nThis repository uses local instructions in `{}`.\n\n\
         Execution checklist:\n{}",
        config.display_name(),
        spec.root,
        steps.render()
    )
}

fn copilot_instructions<C: ProductConfig>(config: &C, spec: &AdapterSpec) -> String {
    let mut steps = Steps::default();
    steps.push(format!("Read applicable files in `{}/`.", spec.rules));
    steps.push(format!(
        "If task matches a skill, read `{}/<skill>/SKILL.md`.",
        spec.skills
    ));
    steps.push_opt(
        bootstrap_command(config, spec)
            .map(|command| format!("For new project scaffolding, run `{}`.", command)),
    );
    steps.push("Keep architecture, localization, and UI conventions aligned with local instructions.");
    steps.push("Update specs/docs when UI/API behavior changes.");
    steps.push_opt(handoff_step(config, spec, "final handoff"));

    format!(
        "# {} Copilot Instructions\n\n\
         This repository uses local instruction packs in `{}`, `{}`, and `{}`.\n\n\
         Follow this order when generating code:\n{}",
        config.display_name(),
        spec.skills,
        spec.rules,
        spec.scripts,
        steps.render()
    )
}
