use log::info;
use mediatools_core::argument::{Argument, Arity};
use mediatools_core::arguments::Arguments;
use mediatools_core::command::Command;
use mediatools_core::error::Result;
use mediatools_core::runtime::{Action, Runtime};

use super::{describe, list_matching, FilesContext};

#[derive(Debug, Default)]
struct SelectOptions {
    patterns: Vec<String>,
    reset: bool,
    print: bool,
}

/// `select [PATTERNS...] [-r|--reset] [-p|--print]`
pub struct Select {
    arguments: Arguments<SelectOptions>,
}

impl Select {
    /// # Errors
    ///
    /// Returns an error if the argument schema is invalid.
    pub fn new() -> Result<Self> {
        let arguments = Arguments::try_from(vec![
            Argument::list("FILES", "patterns", Arity::Unbounded, |o: &mut SelectOptions| {
                &mut o.patterns
            })
            .with_help("File name patterns to add to the selection"),
            Argument::flag("-r|--reset", "reset", |o: &mut SelectOptions| &mut o.reset)
                .with_help("Clear the selection first"),
            Argument::flag("-p|--print", "print", |o: &mut SelectOptions| &mut o.print)
                .with_help("Print the selection"),
        ])?;

        Ok(Self { arguments })
    }
}

impl Action<FilesContext> for Select {
    fn name(&self) -> &str {
        "select"
    }

    fn help(&self) -> String {
        describe(
            "Add files matching patterns to the selection.",
            &self.arguments.help(),
        )
    }

    fn call(
        &self,
        _runtime: &Runtime<FilesContext>,
        context: &mut FilesContext,
        command: &Command,
    ) -> Result<()> {
        let options = self.arguments.resolve(&command.args)?;

        if options.reset {
            context.files.clear();
        }

        for pattern in &options.patterns {
            let matches = list_matching(&context.directory, pattern)?;
            if matches.is_empty() {
                info!("No file matches `{}`", pattern);
            }
            context.files.extend(matches);
        }

        if options.print {
            for file in &context.files {
                println!("{}", file.display());
            }
        }

        Ok(())
    }
}
