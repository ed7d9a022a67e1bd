//! The `files` runtime: actions selecting, moving and processing files.
//!
//! Every action shares a [`FilesContext`] holding the current selection, so
//! a script can `select` files once and act on them in later commands.

mod edit;
mod exec;
mod help;
mod mv;
mod select;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use log::debug;
use mediatools_core::error::{Error, Result};
use mediatools_core::runtime::Runtime;

pub use edit::Edit;
pub use exec::Exec;
pub use help::Help;
pub use mv::Move;
pub use select::Select;

/// Name of the runtime, written into the scripts `edit` generates
pub const RUNTIME_NAME: &str = "files";

/// State shared by the `files` actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilesContext {
    /// The current selection
    pub files: BTreeSet<PathBuf>,
    /// Directory `select` lists files from
    pub directory: PathBuf,
    /// Editor command line used by `edit`
    pub editor: String,
    /// Print moves and external programs instead of running them
    pub dry_run: bool,
}

impl FilesContext {
    pub fn new(directory: impl Into<PathBuf>, editor: &str, dry_run: bool) -> Self {
        Self {
            files: BTreeSet::new(),
            directory: directory.into(),
            editor: editor.to_string(),
            dry_run,
        }
    }
}

/// Builds the `files` runtime with every action registered.
///
/// # Errors
///
/// Returns an error if an action's argument schema is invalid.
pub fn runtime() -> Result<Runtime<FilesContext>> {
    let mut runtime = Runtime::new(RUNTIME_NAME).with_description("Select and move files");

    runtime.register(Select::new()?)?;
    runtime.register(Move::new()?)?;
    runtime.register(Exec)?;
    runtime.register(Edit::new()?)?;
    runtime.register(Help::new()?)?;

    Ok(runtime)
}

/// Lists the files of `directory` whose name matches `pattern`, sorted.
///
/// Only the file name is matched, so `*` and `?` never cross into
/// subdirectories.
///
/// # Errors
///
/// Returns [`Error::InvalidPattern`] for a malformed pattern, or an I/O
/// error if the directory cannot be read.
pub fn list_matching(directory: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = Pattern::new(pattern).map_err(|e| Error::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.msg.to_string(),
    })?;

    let description = directory.display().to_string();
    let entries = fs::read_dir(directory)
        .map_err(|e| Error::io_error("directory".to_string(), description.clone(), e))?;

    let mut matches = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| Error::io_error("directory".to_string(), description.clone(), e))?;
        let file_name = entry.file_name();
        if matcher.matches(&file_name.to_string_lossy()) {
            matches.push(directory.join(file_name));
        }
    }

    matches.sort();
    debug!("Pattern `{}` matched {} file(s)", pattern, matches.len());
    Ok(matches)
}

/// Help text of an action: its description followed by its options.
fn describe(description: &str, options: &str) -> String {
    if options.is_empty() {
        description.to_string()
    } else {
        format!("{description}\n{options}")
    }
}
