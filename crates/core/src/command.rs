//! Command lines and their tokenizer.
//!
//! A [`Command`] is a name followed by raw string arguments. It is read from a
//! single line of text using a small shell-like grammar:
//!
//! - tokens are separated by whitespace;
//! - `\ ` inside a bare token is a literal space;
//! - a `"..."` span is one token, in which `\"` is a literal quote;
//! - any other backslash sequence is kept as is.
//!
//! [`Command::render`] writes a command back to its canonical line, quoting
//! any argument that needs it, so that parsing the rendered line gives the
//! same command again.

use std::convert::Infallible;
use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const ESCAPE: char = '\\';

/// One unit of work: an action name and its raw arguments.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub struct Command {
    pub name: String,
    pub args: Vec<String>,
}

impl Command {
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// The empty command, as read from a blank line.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reads a command from a line of text.
    ///
    /// The first token becomes the name, the following ones the arguments.
    /// A blank line gives the empty command. An unterminated quote is not an
    /// error: the quoted token runs to the end of the line.
    ///
    /// # Examples
    ///
    /// ```
    /// use mediatools_core::command::Command;
    ///
    /// let command = Command::parse(r#"mv "my file" other\ file -t out"#);
    /// assert_eq!(command.name, "mv");
    /// assert_eq!(command.args, vec!["my file", "other file", "-t", "out"]);
    /// ```
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let mut tokens = Tokenizer::new(line.trim());

        let Some(name) = tokens.next() else {
            return Self::empty();
        };

        Self {
            name,
            args: tokens.collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// Returns a new command whose name is this command's first argument and
    /// whose arguments are the remaining ones.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] when the command has no arguments.
    pub fn sub_command(&self) -> Result<Command> {
        let Some((name, args)) = self.args.split_first() else {
            return Err(Error::OutOfRange(self.name.clone()));
        };

        Ok(Command::new(name.clone(), args.to_vec()))
    }

    /// Renders the command as its canonical line.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Display for Command {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() && self.args.is_empty() {
            return Ok(());
        }

        let mut previous = render_token(&self.name);
        formatter.write_str(&previous)?;
        for arg in &self.args {
            // A trailing backslash before a space would escape it
            formatter.write_str(if previous.ends_with(ESCAPE) { "\t" } else { " " })?;
            previous = render_token(arg);
            formatter.write_str(&previous)?;
        }

        Ok(())
    }
}

fn needs_quotes(token: &str) -> bool {
    token.is_empty() || token.starts_with('"') || token.contains(char::is_whitespace)
}

/// Renders one token so that the tokenizer reads it back unchanged.
///
/// Inside quotes a final backslash would escape the closing quote, so a
/// token ending with one is written bare with its spaces escaped instead.
/// Only a token ending with a backslash that also starts with `"` or holds
/// whitespace other than spaces has no exact form; it is written quoted.
fn render_token(token: &str) -> Cow<'_, str> {
    if !needs_quotes(token) {
        return Cow::Borrowed(token);
    }

    let bare_escapable = token.ends_with(ESCAPE)
        && !token.starts_with('"')
        && token.chars().all(|c| c == ' ' || !c.is_whitespace());
    if bare_escapable {
        Cow::Owned(token.replace(' ', "\\ "))
    } else {
        Cow::Owned(format!("\"{}\"", token.replace('"', "\\\"")))
    }
}

impl FromStr for Command {
    type Err = Infallible;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(line))
    }
}

impl From<&str> for Command {
    fn from(line: &str) -> Self {
        Self::parse(line)
    }
}

impl From<String> for Command {
    fn from(line: String) -> Self {
        Self::parse(&line)
    }
}

impl From<Command> for String {
    fn from(command: Command) -> Self {
        command.render()
    }
}

/// Splits a line into unescaped tokens.
struct Tokenizer<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
        }
    }

    fn skip_blanks(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    /// Reads a `"..."` span, the opening quote being already consumed.
    fn read_quoted(&mut self) -> String {
        let mut token = String::new();

        while let Some((_, c)) = self.chars.next() {
            match c {
                '"' => break,
                '\\' if self.chars.next_if(|(_, next)| *next == '"').is_some() => token.push('"'),
                _ => token.push(c),
            }
        }

        token
    }

    fn read_bare(&mut self) -> String {
        let mut token = String::new();

        while let Some((_, c)) = self.chars.next_if(|(_, c)| !c.is_whitespace()) {
            if c == ESCAPE {
                if let Some((_, escaped)) = self.chars.next_if(|(_, next)| *next == ' ') {
                    token.push(escaped);
                    continue;
                }
            }
            token.push(c);
        }

        token
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_blanks();

        if self.chars.next_if(|(_, c)| *c == '"').is_some() {
            return Some(self.read_quoted());
        }

        self.chars.peek()?;
        Some(self.read_bare())
    }
}
