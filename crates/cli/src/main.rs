use std::io::{self, stdin, stdout};
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};
use mediatools_cli::cli_args::Args;
use mediatools_cli::files::{self, FilesContext};
use mediatools_cli::interactive;
use mediatools_cli::mode::{Mode, Provider};
use mediatools_core::config;
use mediatools_core::error::{Error, Result};
use mediatools_core::file_handling::read_command_set;

fn terminal_error(original: io::Error) -> Error {
    Error::io_error("terminal".to_string(), "stdin".to_string(), original)
}

fn execute() -> Result<()> {
    let args = Args::parse();
    let mode = args.get_mode()?;
    debug!("Running in {:?} mode", mode);

    let mut context = FilesContext::new(
        args.get_directory(),
        &config::get_editor(&args.editor),
        args.dry_run,
    );
    if context.dry_run {
        info!("Dry run: files are not moved and programs are not started");
    }

    let runtime = files::runtime()?;

    match mode {
        Mode::Script(path) => {
            let script = read_command_set(&path)?;
            info!(
                "Running script `{}` ({} commands)",
                script.name.as_deref().unwrap_or(&path),
                script.len()
            );
            runtime.run_all(&mut context, &script)
        }
        Mode::Single(command) => runtime.run(&mut context, &command),
        Mode::Interactive => {
            let failures =
                interactive::run_lines(&runtime, &mut context, stdin().lock(), &mut stdout())
                    .map_err(terminal_error)?;
            debug!("{} command(s) failed", failures);
            Ok(())
        }
        Mode::Print(path) => {
            print!("{}", read_command_set(&path)?.save());
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
