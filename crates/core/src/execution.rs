use std::process::{Command as Process, Stdio};

use log::info;

use crate::error::{Error, Result};

/// Runs an external program with inherited standard streams and waits for it.
///
/// # Errors
///
/// Returns an error if the program cannot be started or exits with a
/// non-zero status.
pub fn execute_program(program: &str, args: &[String]) -> Result<()> {
    info!("Executing `{}` with arguments {:?}", program, args);

    let subprocess_exit_success = Process::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()?
        .wait()?
        .success();

    if subprocess_exit_success {
        Ok(())
    } else {
        Err(Error::SubProcessExit)
    }
}
