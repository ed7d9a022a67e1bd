//! Reading and writing command set script files.

use std::fs::{self, File};

use log::debug;

use crate::command_set::CommandSet;
use crate::error::{Error, Result};

fn read_text(file_description: &str, path: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::io_error(file_description.to_string(), path.to_string(), e))
}

/// Loads a command set from a script file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The YAML is malformed or has no `run` sequence
///
/// # Examples
///
/// ```no_run
/// use mediatools_core::file_handling::read_command_set;
///
/// let set = read_command_set("tidy.yml")?;
/// println!("Loaded {} commands", set.len());
/// # Ok::<(), mediatools_core::error::Error>(())
/// ```
pub fn read_command_set(path: &str) -> Result<CommandSet> {
    debug!("Reading script `{}`", path);
    let text = read_text("script", path)?;

    CommandSet::load(&text)
}

/// Writes a command set to a script file, replacing any existing content.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be created or written to
/// - Serialization to YAML fails
pub fn write_command_set(path: &str, command_set: &CommandSet) -> Result<()> {
    let f = File::create(path)
        .map_err(|e| Error::io_error("script".to_string(), path.to_string(), e))?;

    serde_yaml::to_writer(f, command_set).map_err(|e| {
        Error::yaml_error(
            "writing".to_string(),
            "script".to_string(),
            path.to_string(),
            e,
        )
    })
}
