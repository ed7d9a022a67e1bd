//! Run mode determination.
//!
//! The CLI runs either a script file, a single command given on the command
//! line, or an interactive session, and these cannot be mixed.

use mediatools_core::command::Command;
use mediatools_core::error::{Error, Result};

/// What the CLI was asked to do.
#[derive(PartialEq, Clone, Debug)]
pub enum Mode {
    /// Read commands from stdin, one per line
    Interactive,
    /// Run every command of a script file
    Script(String),
    /// Print a script file back in its canonical form
    Print(String),
    /// Run one command given as trailing arguments
    Single(Command),
}

/// Trait for objects that can determine their run mode.
pub trait Provider {
    /// Validates that the mode arguments aren't mixed and returns the
    /// appropriate [`Mode`].
    ///
    /// # Errors
    ///
    /// Returns an error if a script and a command are both given, or if
    /// printing is asked without a script.
    fn get_mode(&self) -> Result<Mode>;
}

/// Determines the run mode from the script path, the print flag and the
/// trailing command words.
///
/// The command words were already split by the shell, so they are used as
/// they are instead of being tokenized again.
///
/// # Errors
///
/// Returns [`Error::Misc`] if a script and a command are both given, or if
/// `print` is set without a script.
///
/// # Examples
///
/// ```rust
/// use mediatools_cli::mode::{determine, Mode};
///
/// let mode = determine(None, false, &["select".to_string(), "-p".to_string()]).unwrap();
/// assert!(matches!(mode, Mode::Single(_)));
///
/// let mode = determine(None, false, &[]).unwrap();
/// assert_eq!(mode, Mode::Interactive);
/// ```
pub fn determine(script: Option<String>, print: bool, command: &[String]) -> Result<Mode> {
    match (script, command.split_first()) {
        (Some(_), Some(_)) => Err(Error::Misc(
            "A script and a command cannot be given together.".to_string(),
        )),
        (Some(script), None) if print => Ok(Mode::Print(script)),
        (Some(script), None) => Ok(Mode::Script(script)),
        (None, _) if print => Err(Error::Misc(
            "Printing needs a script to print.".to_string(),
        )),
        (None, Some((name, args))) => Ok(Mode::Single(Command::new(name.clone(), args.to_vec()))),
        (None, None) => Ok(Mode::Interactive),
    }
}
