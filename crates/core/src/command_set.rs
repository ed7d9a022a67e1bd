//! Named, ordered sets of commands and their YAML script format.
//!
//! A script is a mapping with an optional `name`, an optional `runtime` and a
//! `run` sequence holding one command line per item:
//!
//! ```yaml
//! name: tidy
//! run:
//!   - select -r *.mkv
//!   - mv -s -t "~/Videos/to sort"
//! ```
//!
//! Each line is tokenized into a [`Command`] on load, and rendered back to
//! its canonical form on save.

use log::error;
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::error::{Error, Result};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSet {
    /// Optional name of the set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Name of the runtime the set was written for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,

    /// Commands to execute, first in first out.
    #[serde(rename = "run")]
    pub items: Vec<Command>,
}

impl CommandSet {
    pub fn new(name: Option<String>, items: Vec<Command>) -> Self {
        Self {
            name,
            runtime: None,
            items,
        }
    }

    /// Reads a command set from its YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] when the text is not YAML, or when the `run`
    /// sequence is missing or is not a list of strings.
    ///
    /// # Examples
    ///
    /// ```
    /// use mediatools_core::command_set::CommandSet;
    ///
    /// let set = CommandSet::load("name: demo\nrun:\n  - select -p\n")?;
    /// assert_eq!(set.name.as_deref(), Some("demo"));
    /// assert_eq!(set.items[0].name, "select");
    /// # Ok::<(), mediatools_core::error::Error>(())
    /// ```
    pub fn load(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(Error::Format)
    }

    /// Writes the command set as YAML, each command rendered as its
    /// canonical line.
    ///
    /// The set only holds strings, which the YAML serializer always accepts;
    /// should it still fail, the error is logged and the text is empty.
    #[must_use]
    pub fn save(&self) -> String {
        serde_yaml::to_string(self).unwrap_or_else(|e| {
            error!("Cannot write command set as YAML: {}", e);
            String::new()
        })
    }

    pub fn push(&mut self, command: Command) {
        self.items.push(command);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Command> for CommandSet {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        Self::new(None, iter.into_iter().collect())
    }
}

impl IntoIterator for CommandSet {
    type Item = Command;
    type IntoIter = std::vec::IntoIter<Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a CommandSet {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands() -> Vec<Command> {
        vec![
            Command::parse("command_1 a b c"),
            Command::parse("command_2 d e f"),
        ]
    }

    fn schema() -> String {
        let mut schema = "name: commands_1\nrun:".to_string();
        for command in commands() {
            schema.push_str(&format!("\n    - {}", command.render()));
        }
        schema
    }

    #[test]
    fn test_load() {
        let set = CommandSet::load(&schema()).unwrap();

        assert_eq!(set.name, Some("commands_1".to_string()));
        assert_eq!(set.items, commands());
        assert!(set.runtime.is_none());
    }

    #[test]
    fn test_load_runtime() {
        let set = CommandSet::load("runtime: files\nrun: []").unwrap();

        assert_eq!(set.runtime.as_deref(), Some("files"));
        assert!(set.name.is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn test_load_quoted_lines() {
        let set = CommandSet::load("run:\n  - 'mv \"a b\" -t out'\n").unwrap();

        assert_eq!(set.items[0].args, vec!["a b", "-t", "out"]);
    }

    #[test]
    fn test_load_missing_run() {
        let result = CommandSet::load("name: nothing");
        assert!(matches!(result, Err(Error::Format(_))));
    }

    #[test]
    fn test_load_ill_typed_run() {
        assert!(matches!(
            CommandSet::load("run: select"),
            Err(Error::Format(_))
        ));
        assert!(matches!(
            CommandSet::load("run:\n  - [a, b]"),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_load_not_yaml() {
        let result = CommandSet::load("run: [select");
        assert!(matches!(result, Err(Error::Format(_))));
    }

    #[test]
    fn test_save_omits_missing_name() {
        let set: CommandSet = commands().into_iter().collect();
        let text = set.save();

        assert!(!text.contains("name:"));
        assert!(text.contains("run:"));
    }

    #[test]
    fn test_round_trip() {
        let mut set = CommandSet::new(Some("round trip".to_string()), commands());
        set.push(Command::new(
            "mv",
            vec![
                "my file".to_string(),
                "say \"hi\"".to_string(),
                "-t".to_string(),
                "a: b".to_string(),
            ],
        ));
        set.push(Command::parse("select -r -p"));
        set.push(Command::new(
            "mv",
            vec![
                "C:\\My Dir\\".to_string(),
                "-t".to_string(),
                "D:\\".to_string(),
            ],
        ));

        let loaded = CommandSet::load(&set.save()).unwrap();

        assert_eq!(loaded.name, set.name);
        assert_eq!(loaded.items, set.items);
    }

    #[test]
    fn test_iteration_order() {
        let set = CommandSet::new(None, commands());
        let names: Vec<&str> = set.iter().map(|command| command.name.as_str()).collect();

        assert_eq!(names, vec!["command_1", "command_2"]);
        assert_eq!(set.len(), 2);
    }
}
