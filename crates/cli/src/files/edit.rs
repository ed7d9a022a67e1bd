use std::env;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use mediatools_core::argument::Argument;
use mediatools_core::arguments::Arguments;
use mediatools_core::command::Command;
use mediatools_core::command_set::CommandSet;
use mediatools_core::error::{Error, Result};
use mediatools_core::execution::execute_program;
use mediatools_core::file_handling::{read_command_set, write_command_set};
use mediatools_core::runtime::{Action, Runtime};
use tempfile::Builder;

use super::{describe, FilesContext, RUNTIME_NAME};

#[derive(Debug, Default)]
struct EditOptions {
    script: Option<PathBuf>,
}

/// `edit [SCRIPT]`
///
/// Opens a script in the editor, then runs what was saved. Without a
/// script, a temporary one is generated with a `mv` line per selected file.
pub struct Edit {
    arguments: Arguments<EditOptions>,
}

impl Edit {
    /// # Errors
    ///
    /// Returns an error if the argument schema is invalid.
    pub fn new() -> Result<Self> {
        let arguments = Arguments::try_from(vec![Argument::optional(
            "SCRIPT",
            "script",
            |o: &mut EditOptions| &mut o.script,
        )
        .with_help("Script to edit instead of a generated one")])?;

        Ok(Self { arguments })
    }
}

impl Action<FilesContext> for Edit {
    fn name(&self) -> &str {
        "edit"
    }

    fn help(&self) -> String {
        describe(
            "Edit a script in the editor, then run it.",
            &self.arguments.help(),
        )
    }

    fn call(
        &self,
        runtime: &Runtime<FilesContext>,
        context: &mut FilesContext,
        command: &Command,
    ) -> Result<()> {
        let options = self.arguments.resolve(&command.args)?;
        let editor = Command::parse(&context.editor);
        if editor.is_empty() {
            return Err(Error::NoEditor);
        }

        // Kept alive until the edited script has run
        let mut temporary = None;
        let path = match options.script {
            Some(script) => script.display().to_string(),
            None => {
                let file = Builder::new()
                    .prefix("mediatools-")
                    .suffix(".yaml")
                    .tempfile()
                    .map_err(|e| temporary_error(&env::temp_dir(), e))?;
                let path = file.path().display().to_string();
                write_command_set(&path, &template(context))?;
                temporary = Some(file);
                path
            }
        };

        let mut args = editor.args.clone();
        args.push(path.clone());
        if context.dry_run {
            println!("{}", Command::new(editor.name.clone(), args));
        } else {
            execute_program(&editor.name, &args)?;
        }

        let script = read_command_set(&path)?;
        debug!("Running {} edited command(s) from `{}`", script.len(), path);
        runtime.run_all(context, &script)?;

        if let Some(file) = temporary {
            info!("Removing `{}`", path);
            file.close().map_err(|e| temporary_error(Path::new(&path), e))?;
        }

        Ok(())
    }
}

fn temporary_error(path: &Path, original: io::Error) -> Error {
    Error::io_error(
        "temporary script".to_string(),
        path.display().to_string(),
        original,
    )
}

/// Script offered for editing: one `mv` per selected file, into its own
/// directory, so only the targets need changing.
fn template(context: &FilesContext) -> CommandSet {
    let mut set = CommandSet::new(Some("edit".to_string()), Vec::new());
    set.runtime = Some(RUNTIME_NAME.to_string());

    if context.files.is_empty() {
        set.push(Command::new("select", vec!["-p".to_string()]));
    }

    for file in &context.files {
        let parent = file
            .parent()
            .map(|parent| parent.display().to_string())
            .unwrap_or_default();
        set.push(Command::new(
            "mv",
            vec![file.display().to_string(), "-t".to_string(), parent],
        ));
    }

    set
}
