//! The Flutter template pack, compiled into the binary

use packsync_core::templates::EmbeddedFile;

macro_rules! pack_file {
    ($path:literal) => {
        pack_file!($path, false)
    };
    ($path:literal, $executable:expr) => {
        EmbeddedFile {
            path: $path,
            contents: include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/shared/", $path)),
            executable: $executable,
        }
    };
}

/// Every file under `templates/shared`
pub static FILES: &[EmbeddedFile] = &[
    pack_file!("pack.yaml"),
    pack_file!(".ignore"),
    pack_file!("TEMPLATES.md"),
    pack_file!("skills/flutter-api-integration/SKILL.md"),
    pack_file!("skills/flutter-bootstrap/SKILL.md"),
    pack_file!("skills/flutter-testing/SKILL.md"),
    pack_file!("skills/flutter-ui/SKILL.md"),
    pack_file!("rules/ci-cd-pr.md"),
    pack_file!("rules/integration-api.md"),
    pack_file!("rules/ui.md"),
    pack_file!("rules/unit-test.md"),
    pack_file!("rules/widget-test.md"),
    pack_file!("scripts/bootstrap_flutter_template.sh", true),
    pack_file!("tool/README.md"),
    pack_file!("vscode/tasks.json"),
    pack_file!("github/pull_request_template.md"),
    pack_file!("github/workflows/pr-template-gate.yml"),
];
