//! Interactive mode: a prompt reading one command per line.
//!
//! The loop stops on end of input or on `quit`/`exit`. A failing command
//! prints its error and the loop goes on with the next line.

use std::io::{self, BufRead, Write};

use crossterm::queue;
use crossterm::style::{PrintStyledContent, Stylize};
use log::debug;
use mediatools_core::command::Command;
use mediatools_core::config::PROMPT;
use mediatools_core::runtime::Runtime;

const QUIT_COMMANDS: [&str; 2] = ["quit", "exit"];

/// Runs the commands read from `input` until it ends or a quit command.
///
/// Returns the number of commands that failed.
///
/// # Errors
///
/// Returns an error if reading `input` or writing `output` fails.
pub fn run_lines<C, R: BufRead, W: Write>(
    runtime: &Runtime<C>,
    context: &mut C,
    input: R,
    output: &mut W,
) -> io::Result<usize> {
    let mut failures = 0;
    let mut lines = input.lines();

    loop {
        queue!(output, PrintStyledContent(PROMPT.dark_green()))?;
        output.flush()?;

        let Some(line) = lines.next().transpose()? else {
            writeln!(output)?;
            break;
        };

        let command = Command::parse(&line);
        if command.args.is_empty() && QUIT_COMMANDS.contains(&command.name.as_str()) {
            debug!("Leaving interactive mode");
            break;
        }

        if let Err(e) = runtime.run(context, &command) {
            failures += 1;
            queue!(output, PrintStyledContent(format!("{e}").red()))?;
            writeln!(output)?;
        }
    }

    output.flush()?;
    Ok(failures)
}
