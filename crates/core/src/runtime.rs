//! Dispatch of commands to registered actions.
//!
//! A [`Runtime`] maps command names to [`Action`]s sharing a context type
//! `C`. Commands run one after the other, in order; the first failing
//! command stops the run.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use indexmap::IndexMap;
use itertools::Itertools;
use log::{info, warn};

use crate::command::Command;
use crate::command_set::CommandSet;
use crate::error::{Error, Result};

/// An action run by a [`Runtime`] for the commands carrying its name.
pub trait Action<C> {
    /// Name commands use to call the action.
    fn name(&self) -> &str;

    /// Help text shown by `help`.
    fn help(&self) -> String {
        String::new()
    }

    /// Runs the action for `command`.
    ///
    /// # Errors
    ///
    /// Returns an error when the command's arguments cannot be resolved or
    /// the action fails.
    fn call(&self, runtime: &Runtime<C>, context: &mut C, command: &Command) -> Result<()>;
}

/// A named table of actions.
pub struct Runtime<C> {
    name: String,
    description: String,
    actions: IndexMap<String, Box<dyn Action<C>>>,
}

impl<C> Runtime<C> {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            actions: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Registers an action under its name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateAction`] if the name is already taken.
    pub fn register(&mut self, action: impl Action<C> + 'static) -> Result<()> {
        let name = action.name().to_string();
        if self.actions.contains_key(&name) {
            return Err(Error::DuplicateAction(name));
        }

        self.actions.insert(name, Box::new(action));
        Ok(())
    }

    #[must_use]
    pub fn action(&self, name: &str) -> Option<&dyn Action<C>> {
        self.actions.get(name).map(AsRef::as_ref)
    }

    /// Registered actions, sorted by name.
    pub fn actions(&self) -> impl Iterator<Item = &dyn Action<C>> {
        self.actions
            .iter()
            .sorted_by(|a, b| a.0.cmp(b.0))
            .map(|(_, action)| action.as_ref())
    }

    /// Runs a single command. The empty command does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAction`] when no action has the command's
    /// name, or the action's own error.
    pub fn run(&self, context: &mut C, command: &Command) -> Result<()> {
        if command.is_empty() {
            return Ok(());
        }

        let Some(action) = self.action(&command.name) else {
            return Err(Error::unknown_action(
                &command.name,
                self.suggest(&command.name),
            ));
        };

        info!("Running `{}`", command);
        action.call(self, context, command)
    }

    /// Runs every command of the set, in order, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing command.
    pub fn run_all(&self, context: &mut C, commands: &CommandSet) -> Result<()> {
        if let Some(runtime) = &commands.runtime {
            if *runtime != self.name {
                warn!(
                    "Command set was written for runtime `{}`, running it with `{}`",
                    runtime, self.name
                );
            }
        }

        for command in commands {
            self.run(context, command)?;
        }

        Ok(())
    }

    /// Lists the actions with the first line of their help.
    #[must_use]
    pub fn help(&self) -> String {
        let mut help = format!("{}: {}", self.name, self.description);
        for action in self.actions() {
            let summary = action.help();
            let summary = summary.lines().next().unwrap_or_default();
            help.push_str(&format!("\n    {}: {}", action.name(), summary));
        }

        help
    }

    fn suggest(&self, name: &str) -> Option<&str> {
        let matcher = SkimMatcherV2::default();

        self.actions
            .keys()
            .filter_map(|known| {
                matcher
                    .fuzzy_match(known, name)
                    .map(|score| (score, known.as_str()))
            })
            .max_by_key(|(score, _)| *score)
            .map(|(_, known)| known)
    }
}
