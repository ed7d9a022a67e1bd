use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use mediatools_core::argument::{Argument, Arity};
use mediatools_core::arguments::Arguments;
use mediatools_core::command::Command;
use mediatools_core::config::expand_path;
use mediatools_core::error::{Error, Result};
use mediatools_core::runtime::{Action, Runtime};

use super::{describe, FilesContext};

const TARGET: &str = "-t|--target";

#[derive(Debug, Default)]
struct MoveOptions {
    files: Vec<PathBuf>,
    target: Option<String>,
    use_selection: bool,
}

/// `mv [FILES...] -t|--target DIR [-s|--use-selection]`
///
/// Relative paths are taken from the context directory. Moved files that
/// were selected stay selected under their new path.
pub struct Move {
    arguments: Arguments<MoveOptions>,
}

impl Move {
    /// # Errors
    ///
    /// Returns an error if the argument schema is invalid.
    pub fn new() -> Result<Self> {
        let arguments = Arguments::try_from(vec![
            Argument::list("FILES", "files", Arity::Unbounded, |o: &mut MoveOptions| {
                &mut o.files
            })
            .with_help("Files to move"),
            Argument::optional(TARGET, "target", |o: &mut MoveOptions| &mut o.target)
                .with_help("Directory to move the files into, created if missing"),
            Argument::flag("-s|--use-selection", "use_selection", |o: &mut MoveOptions| {
                &mut o.use_selection
            })
            .with_help("Move the selected files too"),
        ])?;

        Ok(Self { arguments })
    }
}

impl Action<FilesContext> for Move {
    fn name(&self) -> &str {
        "mv"
    }

    fn help(&self) -> String {
        describe("Move files into a directory.", &self.arguments.help())
    }

    fn call(
        &self,
        _runtime: &Runtime<FilesContext>,
        context: &mut FilesContext,
        command: &Command,
    ) -> Result<()> {
        let options = self.arguments.resolve(&command.args)?;
        let Some(target) = options.target else {
            return Err(Error::MissingValue(TARGET.to_string()));
        };
        let target = context.directory.join(expand_path(&target));

        let mut sources: Vec<PathBuf> = options
            .files
            .iter()
            .map(|file| context.directory.join(file))
            .collect();
        if options.use_selection {
            sources.extend(context.files.iter().cloned());
        }
        sources.sort();
        sources.dedup();

        let moves = plan(&sources, &target)?;
        if moves.is_empty() {
            info!("Nothing to move");
            return Ok(());
        }

        if context.dry_run {
            for (source, _) in &moves {
                println!("mv {} {}", source.display(), target.display());
            }
            return Ok(());
        }

        fs::create_dir_all(&target).map_err(|e| {
            Error::io_error("target directory".to_string(), target.display().to_string(), e)
        })?;

        for (source, destination) in moves {
            debug!("Moving `{}` to `{}`", source.display(), destination.display());
            fs::rename(&source, &destination).map_err(|e| {
                Error::io_error("file".to_string(), source.display().to_string(), e)
            })?;
            if context.files.remove(&source) {
                context.files.insert(destination);
            }
        }

        Ok(())
    }
}

/// Pairs each source with its destination in `target`, checking every
/// destination before anything moves: names must not collide with each
/// other or with files already in `target`. Files already in place are
/// left out.
fn plan(sources: &[PathBuf], target: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut moves: Vec<(PathBuf, PathBuf)> = Vec::new();

    for source in sources {
        let Some(file_name) = source.file_name() else {
            return Err(Error::Misc(format!(
                "Cannot move `{}`: it has no file name.",
                source.display()
            )));
        };

        let destination = target.join(file_name);
        if destination == *source {
            debug!("`{}` is already in place", source.display());
            continue;
        }

        if let Some((other, _)) = moves.iter().find(|(_, known)| *known == destination) {
            return Err(Error::Misc(format!(
                "Cannot move both `{}` and `{}` to `{}`.",
                other.display(),
                source.display(),
                destination.display()
            )));
        }

        if destination.exists() {
            return Err(Error::Misc(format!(
                "Cannot move `{}`: `{}` already exists.",
                source.display(),
                destination.display()
            )));
        }

        moves.push((source.clone(), destination));
    }

    Ok(moves)
}
