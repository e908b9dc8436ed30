//! Version comparison for CLI and template pack compatibility

use semver::Version;

/// Compare CLI version against the pack version
/// Returns a warning message if the CLI is older than the pack expects
pub fn check_compatibility(
    cli_version: &str,
    pack_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let cli_ver = parse_version(cli_version)?;
    let pack_ver = parse_version(pack_version)?;

    if cli_ver < pack_ver {
        Some(format!(
            "This template pack was designed for CLI version {} or newer.\n\
             You are running version {}.\n\
             Consider updating: {}",
            pack_version, cli_version, upgrade_command
        ))
    } else {
        None
    }
}

/// Parse version string, tolerating a leading 'v'
fn parse_version(version_str: &str) -> Option<Version> {
    let cleaned = version_str.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    Version::parse(cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPGRADE: &str = "cargo install agent-flutter --force";

    #[test]
    fn test_cli_older_than_pack() {
        let warning = check_compatibility("0.1.0", "0.2.0", UPGRADE);
        assert!(warning.is_some());
        assert!(warning.unwrap().contains("0.2.0"));
    }

    #[test]
    fn test_cli_same_as_pack() {
        assert!(check_compatibility("0.1.0", "v0.1.0", UPGRADE).is_none());
    }

    #[test]
    fn test_cli_newer_than_pack() {
        assert!(check_compatibility("0.2.0", "0.1.0", UPGRADE).is_none());
    }

    #[test]
    fn test_invalid_versions() {
        // Can't compare, no warning
        assert!(check_compatibility("invalid", "0.1.0", UPGRADE).is_none());
        assert!(check_compatibility("0.1.0", "latest", UPGRADE).is_none());
    }
}
