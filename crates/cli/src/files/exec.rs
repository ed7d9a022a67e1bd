use mediatools_core::command::Command;
use mediatools_core::error::Result;
use mediatools_core::execution::execute_program;
use mediatools_core::runtime::{Action, Runtime};

use super::FilesContext;

/// `exec PROGRAM [ARGS...]`
///
/// The arguments are passed through untouched, options included.
pub struct Exec;

impl Action<FilesContext> for Exec {
    fn name(&self) -> &str {
        "exec"
    }

    fn help(&self) -> String {
        "Run an external program and wait for it.\nUsage: exec PROGRAM [ARGS...]".to_string()
    }

    fn call(
        &self,
        _runtime: &Runtime<FilesContext>,
        context: &mut FilesContext,
        command: &Command,
    ) -> Result<()> {
        let program = command.sub_command()?;

        if context.dry_run {
            println!("{program}");
            return Ok(());
        }

        execute_program(&program.name, &program.args)
    }
}
