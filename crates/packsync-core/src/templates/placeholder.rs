//! Project placeholder substitution for template text

use std::path::Path;
use url::Url;

/// Replaced with the project root as a forward-slash path
pub const PROJECT_ROOT_TOKEN: &str = "{{PROJECT_ROOT}}";

/// Replaced with the project root as a `file://` URI without trailing slash
pub const PROJECT_ROOT_URI_TOKEN: &str = "{{PROJECT_ROOT_URI}}";

/// Convert a path to a forward-slash string without any other normalization
pub fn to_posix_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Canonical directory URI for the project root, trailing slash removed
pub fn project_root_uri(project_root: &Path) -> String {
    let uri = match Url::from_directory_path(project_root) {
        Ok(url) => url.to_string(),
        // Relative roots can't become URLs
        Err(()) => format!("file://{}", to_posix_path(project_root)),
    };
    uri.strip_suffix('/').map(str::to_string).unwrap_or(uri)
}

/// Replace every placeholder token in `content` with values derived from `project_root`
pub fn substitute(content: &str, project_root: &Path) -> String {
    let root_path = to_posix_path(project_root);
    let root_uri = project_root_uri(project_root);

    content
        .replace(PROJECT_ROOT_URI_TOKEN, &root_uri)
        .replace(PROJECT_ROOT_TOKEN, &root_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_every_occurrence() {
        let root = Path::new("/work/my_app");
        let text = "cd {{PROJECT_ROOT}} && open {{PROJECT_ROOT_URI}}/lib\n{{PROJECT_ROOT}}";
        let out = substitute(text, root);

        assert_eq!(
            out,
            "cd /work/my_app && open file:///work/my_app/lib\n/work/my_app"
        );
        assert!(!out.contains("{{PROJECT_ROOT"));
    }

    #[test]
    fn test_uri_has_no_trailing_slash() {
        assert_eq!(
            project_root_uri(Path::new("/work/my_app")),
            "file:///work/my_app"
        );
    }

    #[test]
    fn test_uri_percent_encodes_spaces() {
        assert_eq!(
            project_root_uri(Path::new("/work/my app")),
            "file:///work/my%20app"
        );
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        let out = substitute("{{project_root}} {{ PROJECT_ROOT }}", Path::new("/p"));
        assert_eq!(out, "{{project_root}} {{ PROJECT_ROOT }}");
    }

    #[test]
    fn test_substitution_is_idempotent_for_same_root() {
        let root = Path::new("/work/app");
        let once = substitute("root={{PROJECT_ROOT}}", root);
        let twice = substitute(&once, root);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_posix_path_converts_backslashes() {
        assert_eq!(
            to_posix_path(Path::new(r"C:\work\app")),
            "C:/work/app"
        );
    }
}
