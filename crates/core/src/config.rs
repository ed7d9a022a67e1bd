//! Configuration utilities for mediatools.
//!
//! This module resolves the editor used by the `edit` action and expands
//! shell variables like `~` in user supplied paths.

use std::env;

/// Editor used when neither `--editor`, `$EDITOR` nor `$VISUAL` is set
pub const DEFAULT_EDITOR: &str = "vi";

/// Prompt shown by the interactive mode
pub const PROMPT: &str = "mt> ";

/// Environment variables looked up for the editor, in order
const EDITOR_VARIABLES: [&str; 2] = ["EDITOR", "VISUAL"];

/// Expands shell variables like `~` in a path.
///
/// # Examples
///
/// ```
/// use mediatools_core::config::expand_path;
///
/// assert_eq!(expand_path("/absolute/path"), "/absolute/path");
/// assert!(!expand_path("~/scripts").starts_with('~'));
/// ```
#[must_use]
pub fn expand_path(path: &str) -> String {
    shellexpand::tilde(path).to_string()
}

/// Resolves the script file path given on the command line, if any.
#[must_use]
pub fn get_script_path(script_path_arg: &Option<String>) -> Option<String> {
    script_path_arg.as_deref().map(expand_path)
}

/// Resolves the editor command line.
///
/// Uses the explicit editor when provided, then the first non empty
/// `$EDITOR` or `$VISUAL`, and [`DEFAULT_EDITOR`] otherwise. The result may
/// hold arguments, e.g. `code --wait`.
#[must_use]
pub fn get_editor(editor_arg: &Option<String>) -> String {
    if let Some(editor) = editor_arg {
        return editor.clone();
    }

    EDITOR_VARIABLES
        .iter()
        .filter_map(|variable| env::var(variable).ok())
        .find(|editor| !editor.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path_with_tilde() {
        let result = expand_path("~/my-script.yml");
        assert!(!result.starts_with('~'));
        assert!(result.ends_with("my-script.yml"));
    }

    #[test]
    fn test_expand_path_without_tilde() {
        assert_eq!(expand_path("/absolute/path"), "/absolute/path");
    }

    #[test]
    fn test_get_script_path_with_some() {
        let result = get_script_path(&Some("~/scripts/tidy.yml".to_string()));

        let expanded = result.unwrap();
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("scripts/tidy.yml"));
    }

    #[test]
    fn test_get_script_path_with_none() {
        assert!(get_script_path(&None).is_none());
    }

    #[test]
    fn test_get_editor_with_custom_editor() {
        let result = get_editor(&Some("nano -w".to_string()));
        assert_eq!(result, "nano -w");
    }

    #[test]
    fn test_get_editor_never_empty() {
        assert!(!get_editor(&None).trim().is_empty());
    }
}
