//! Argument sets and the resolution of command tokens into options.
//!
//! An [`Arguments`] set indexes [`Argument`] schemas by named alias and keeps
//! positional schemas in registration order. [`Arguments::resolve`] walks a
//! command's tokens and binds them to a fresh options value:
//!
//! - a named token (`-a`) selects its schema, and the values that follow it
//!   are read according to the schema's arity;
//! - any other token is read by the current positional schema, which hands
//!   over to the next one once it is satisfied (a single value, or a full
//!   bounded list).
//!
//! List slots accumulate across visits, so `-b 1 -b 2` binds `[1, 2]`.
//!
//! An unbounded positional schema claims every remaining positional token:
//! any positional schema registered after it can never be reached.
//!
//! # Examples
//!
//! ```
//! use mediatools_core::argument::{Argument, Arity};
//! use mediatools_core::arguments::Arguments;
//!
//! #[derive(Default)]
//! struct Options {
//!     first: String,
//!     second: Vec<i32>,
//!     a: i32,
//! }
//!
//! let arguments = Arguments::try_from(vec![
//!     Argument::single("FIRST", "first", |o: &mut Options| &mut o.first),
//!     Argument::list("SECOND", "second", Arity::Bounded(2), |o: &mut Options| &mut o.second),
//!     Argument::single("-a|--arg", "a", |o: &mut Options| &mut o.a),
//! ])?;
//!
//! let tokens: Vec<String> = ["first", "-a", "12", "20", "21"].map(String::from).to_vec();
//! let options = arguments.resolve(&tokens)?;
//!
//! assert_eq!(options.first, "first");
//! assert_eq!(options.a, 12);
//! assert_eq!(options.second, vec![20, 21]);
//! # Ok::<(), mediatools_core::error::Error>(())
//! ```

use std::fmt::Debug;

use indexmap::IndexMap;
use itertools::Itertools;
use log::debug;

use crate::argument::{is_named_alias, Argument, Arity};
use crate::error::{Error, Result};

/// A set of argument schemas for one options type.
pub struct Arguments<O> {
    schemas: Vec<Argument<O>>,
    named: IndexMap<String, usize>,
    positional: Vec<usize>,
}

impl<O> Default for Arguments<O> {
    fn default() -> Self {
        Self {
            schemas: Vec::new(),
            named: IndexMap::new(),
            positional: Vec::new(),
        }
    }
}

impl<O> Arguments<O> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an argument schema.
    ///
    /// Each named alias of the group is indexed, each positional alias adds
    /// a positional slot after the ones already registered. Nothing is
    /// registered when an error is returned.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateAlias`] if an alias is already registered.
    /// - [`Error::InvalidSchema`] if a positional alias is a flag, or the
    ///   schema itself is invalid (see [`Argument::validate`]).
    pub fn add(&mut self, argument: Argument<O>) -> Result<()> {
        argument.validate()?;

        for (position, alias) in argument.aliases().iter().enumerate() {
            if self.contains_alias(alias) || argument.aliases()[..position].contains(alias) {
                return Err(Error::DuplicateAlias(alias.clone()));
            }

            if !is_named_alias(alias) && argument.arity() == Arity::Flag {
                return Err(Error::invalid_schema(
                    argument.name(),
                    "a positional argument must accept at least one value",
                ));
            }
        }

        let index = self.schemas.len();
        for alias in argument.aliases() {
            if is_named_alias(alias) {
                self.named.insert(alias.clone(), index);
            } else {
                self.positional.push(index);
            }
        }
        self.schemas.push(argument);

        Ok(())
    }

    /// Registers an argument schema, builder style.
    ///
    /// # Errors
    ///
    /// See [`Arguments::add`].
    pub fn with(mut self, argument: Argument<O>) -> Result<Self> {
        self.add(argument)?;
        Ok(self)
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Argument<O>> {
        self.schemas.iter()
    }

    /// Looks up the schema of a named alias.
    #[must_use]
    pub fn named(&self, alias: &str) -> Option<&Argument<O>> {
        self.named.get(alias).map(|&index| &self.schemas[index])
    }

    /// Positional schemas, in the order they are filled.
    pub fn positional(&self) -> impl Iterator<Item = &Argument<O>> {
        self.positional.iter().map(|&index| &self.schemas[index])
    }

    fn contains_alias(&self, alias: &str) -> bool {
        self.named.contains_key(alias)
            || self
                .positional()
                .any(|argument| argument.aliases().iter().any(|known| known == alias))
    }

    /// Binds `tokens` into `options`, keeping the values already present:
    /// flags toggle from their current state and lists are extended.
    ///
    /// On error the fields written so far are left as they are.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownAlias`] for a named token without schema.
    /// - [`Error::ExhaustedPositionals`] for a positional token once every
    ///   positional schema is satisfied.
    /// - [`Error::MissingValue`], [`Error::Parse`] or [`Error::TypeMismatch`]
    ///   when a value cannot be read.
    pub fn resolve_into(&self, options: &mut O, tokens: &[String]) -> Result<()> {
        let mut index = 0;
        let mut position = 0;

        while index < tokens.len() {
            let token = &tokens[index];
            let named = is_named_alias(token);

            let schema = if named {
                let schema = *self
                    .named
                    .get(token.as_str())
                    .ok_or_else(|| Error::UnknownAlias(token.clone()))?;
                index += 1;
                schema
            } else {
                *self
                    .positional
                    .get(position)
                    .ok_or_else(|| Error::ExhaustedPositionals(token.clone()))?
            };

            let argument = &self.schemas[schema];
            let consumed = argument.read(options, &tokens[index..])?;
            debug!(
                "`{}` read {} value(s) into `{}`",
                argument.name(),
                consumed,
                argument.attribute()
            );
            index += consumed;

            if !named && argument.is_satisfied(options) {
                position += 1;
            }
        }

        Ok(())
    }

    /// Binds `tokens` into a new options value.
    ///
    /// Fields without a matching token keep their `Default` value; an empty
    /// token list gives the default options.
    ///
    /// # Errors
    ///
    /// See [`Arguments::resolve_into`].
    pub fn resolve(&self, tokens: &[String]) -> Result<O>
    where
        O: Default,
    {
        let mut options = O::default();
        self.resolve_into(&mut options, tokens)?;
        Ok(options)
    }

    /// Help text listing every argument, sorted by alias group.
    #[must_use]
    pub fn help(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let lines = self
            .schemas
            .iter()
            .sorted_by(|a, b| a.name().cmp(b.name()))
            .map(|argument| format!("    {}: {}", argument.name(), argument.help()))
            .join("\n");

        format!("Available options:\n{lines}")
    }
}

impl<O> TryFrom<Vec<Argument<O>>> for Arguments<O> {
    type Error = Error;

    fn try_from(arguments: Vec<Argument<O>>) -> Result<Self> {
        let mut set = Self::new();
        for argument in arguments {
            set.add(argument)?;
        }

        Ok(set)
    }
}

impl<O> Debug for Arguments<O> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Arguments")
            .field("schemas", &self.schemas)
            .field("named", &self.named)
            .field("positional", &self.positional)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Options {
        // positional
        first: String,
        second: Option<Vec<i32>>,
        third: Option<Vec<i32>>,
        // named
        a: i32,
        b: Option<Vec<i32>>,
        reset: bool,
    }

    impl Default for Options {
        fn default() -> Self {
            Self {
                first: String::new(),
                second: None,
                third: None,
                a: -1,
                b: None,
                reset: false,
            }
        }
    }

    fn arguments() -> Arguments<Options> {
        Arguments::try_from(vec![
            Argument::single("Positional 1", "first", |o: &mut Options| &mut o.first),
            Argument::optional_list("Positional 2", "second", Arity::Bounded(2), |o: &mut Options| {
                &mut o.second
            }),
            Argument::optional_list("Positional 3", "third", Arity::Unbounded, |o: &mut Options| {
                &mut o.third
            }),
            Argument::single("-a|--arg", "a", |o: &mut Options| &mut o.a),
            Argument::optional_list("-b|--b", "b", Arity::Unbounded, |o: &mut Options| &mut o.b),
            Argument::flag("-r|--reset", "reset", |o: &mut Options| &mut o.reset),
        ])
        .unwrap()
    }

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_resolve_options() {
        let input = tokens(&[
            "first", "-b", "9", "10", "11", "-a", "12", // positional values
            "20", "21", "30", "31", "32",
        ]);

        let options = arguments().resolve(&input).unwrap();

        assert_eq!(options.first, "first");
        assert_eq!(options.second, Some(vec![20, 21]));
        assert_eq!(options.third, Some(vec![30, 31, 32]));
        assert_eq!(options.a, 12);
        assert_eq!(options.b, Some(vec![9, 10, 11]));
        assert!(!options.reset);
    }

    #[test]
    fn test_resolve_empty_keeps_defaults() {
        let options = arguments().resolve(&[]).unwrap();

        assert_eq!(options.first, "");
        assert_eq!(options.a, -1);
        assert!(options.second.is_none());
        assert!(options.b.is_none());
    }

    #[test]
    fn test_flag_toggles() {
        let arguments = arguments();

        assert!(arguments.resolve(&tokens(&["-r"])).unwrap().reset);
        assert!(!arguments.resolve(&tokens(&["-r", "--reset"])).unwrap().reset);
    }

    #[test]
    fn test_named_list_accumulates() {
        let options = arguments()
            .resolve(&tokens(&["-b", "1", "-a", "3", "--b", "2"]))
            .unwrap();

        assert_eq!(options.b, Some(vec![1, 2]));
    }

    #[test]
    fn test_positional_list_resumes_after_named() {
        let options = arguments()
            .resolve(&tokens(&["x", "20", "-a", "1", "21", "30"]))
            .unwrap();

        assert_eq!(options.second, Some(vec![20, 21]));
        assert_eq!(options.third, Some(vec![30]));
    }

    #[test]
    fn test_unknown_alias() {
        let result = arguments().resolve(&tokens(&["-z"]));
        assert!(matches!(result, Err(Error::UnknownAlias(alias)) if alias == "-z"));
    }

    #[test]
    fn test_single_value_parse_error() {
        let result = arguments().resolve(&tokens(&["-a", "twelve"]));
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn test_named_single_without_value() {
        let result = arguments().resolve(&tokens(&["first", "-a"]));
        assert!(matches!(result, Err(Error::MissingValue(_))));
    }

    #[test]
    fn test_duplicate_alias() {
        let mut arguments = arguments();
        let result = arguments.add(Argument::flag("-x|--arg", "reset", |o: &mut Options| {
            &mut o.reset
        }));

        assert!(matches!(result, Err(Error::DuplicateAlias(alias)) if alias == "--arg"));
        assert!(arguments.named("-x").is_none());
    }

    #[test]
    fn test_duplicate_alias_within_group() {
        let result = Arguments::new().with(Argument::flag("-x|-x", "reset", |o: &mut Options| {
            &mut o.reset
        }));

        assert!(matches!(result, Err(Error::DuplicateAlias(_))));
    }

    #[test]
    fn test_positional_flag_is_invalid() {
        let result = Arguments::new().with(Argument::flag("RESET", "reset", |o: &mut Options| {
            &mut o.reset
        }));

        assert!(matches!(result, Err(Error::InvalidSchema { .. })));
    }

    #[test]
    fn test_lookup() {
        let arguments = arguments();

        assert_eq!(arguments.len(), 6);
        assert_eq!(arguments.named("--arg").unwrap().attribute(), "a");
        assert_eq!(
            arguments.positional().map(Argument::attribute).collect::<Vec<_>>(),
            vec!["first", "second", "third"]
        );
    }

    #[test]
    fn test_help() {
        let help = arguments().help();

        assert!(help.starts_with("Available options:\n"));
        assert!(help.contains("    -a|--arg: "));
        assert!(help.find("-a|--arg").unwrap() < help.find("-b|--b").unwrap());
    }
}
