use mediatools_core::argument::Argument;
use mediatools_core::arguments::Arguments;
use mediatools_core::command::Command;
use mediatools_core::error::{Error, Result};
use mediatools_core::runtime::{Action, Runtime};

use super::{describe, FilesContext};

#[derive(Debug, Default)]
struct HelpOptions {
    action: Option<String>,
}

/// `help [ACTION]`
pub struct Help {
    arguments: Arguments<HelpOptions>,
}

impl Help {
    /// # Errors
    ///
    /// Returns an error if the argument schema is invalid.
    pub fn new() -> Result<Self> {
        let arguments = Arguments::try_from(vec![Argument::optional(
            "ACTION",
            "action",
            |o: &mut HelpOptions| &mut o.action,
        )
        .with_help("Action to describe")])?;

        Ok(Self { arguments })
    }

    fn text(runtime: &Runtime<FilesContext>, action: Option<&str>) -> Result<String> {
        let Some(name) = action else {
            return Ok(runtime.help());
        };

        match runtime.action(name) {
            Some(action) => Ok(format!("{}: {}", action.name(), action.help())),
            None => Err(Error::unknown_action(name, None)),
        }
    }
}

impl Action<FilesContext> for Help {
    fn name(&self) -> &str {
        "help"
    }

    fn help(&self) -> String {
        describe("List the actions, or describe one.", &self.arguments.help())
    }

    fn call(
        &self,
        runtime: &Runtime<FilesContext>,
        _context: &mut FilesContext,
        command: &Command,
    ) -> Result<()> {
        let options = self.arguments.resolve(&command.args)?;
        println!("{}", Self::text(runtime, options.action.as_deref())?);
        Ok(())
    }
}
