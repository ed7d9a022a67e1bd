//! Argument schemas.
//!
//! An [`Argument`] describes one slot of an options structure `O`: the alias
//! group users type to reach it, how many values it takes ([`Arity`]) and the
//! accessor that stores the coerced values into `O`.
//!
//! Aliases are written as a `|` separated group. An alias starting with `-`
//! is *named* (`-a|--arg`), anything else is *positional* (`FILES`).
//!
//! The accessor is a closure returning a mutable reference to the target
//! field, so the field type is checked when the schema is built:
//!
//! ```
//! use mediatools_core::argument::{Argument, Arity};
//!
//! #[derive(Default)]
//! struct Options {
//!     reset: bool,
//!     files: Vec<String>,
//! }
//!
//! let reset = Argument::flag("-r|--reset", "reset", |o: &mut Options| &mut o.reset);
//! let files = Argument::list("FILES", "files", Arity::Unbounded, |o: &mut Options| &mut o.files)
//!     .with_help("Files to select.");
//! assert!(reset.is_named());
//! assert!(!files.is_named());
//! ```

use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;
use std::rc::Rc;

use crate::error::{Error, Result};

/// Leading character of a named alias.
pub const ALIAS_MARKER: char = '-';
/// Separator between the spellings of an alias group.
pub const ALIAS_SEPARATOR: char = '|';

/// Returns true when a token looks like a named alias.
#[must_use]
pub fn is_named_alias(token: &str) -> bool {
    token.starts_with(ALIAS_MARKER)
}

/// Number of values an argument takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No value, toggles a boolean.
    Flag,
    /// Exactly one value.
    Single,
    /// A list of up to `n` values, `n > 1`.
    Bounded(usize),
    /// A list of any length.
    Unbounded,
}

impl Arity {
    /// Reads the count encoding used by schema authors: `0` is a flag, `1` a
    /// single value, `n > 1` a bounded list and `-1` an unbounded list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSchema`] for any other count.
    pub fn from_count(count: i64) -> Result<Self> {
        match count {
            -1 => Ok(Self::Unbounded),
            0 => Ok(Self::Flag),
            1 => Ok(Self::Single),
            n if n > 1 => usize::try_from(n)
                .map(Self::Bounded)
                .map_err(|_| Error::invalid_schema(&n.to_string(), "count is too large")),
            n => Err(Error::invalid_schema(
                &n.to_string(),
                "count must be -1, 0, 1 or greater",
            )),
        }
    }

    #[must_use]
    pub fn count(self) -> i64 {
        match self {
            Self::Flag => 0,
            Self::Single => 1,
            Self::Bounded(n) => i64::try_from(n).unwrap_or(i64::MAX),
            Self::Unbounded => -1,
        }
    }

    #[must_use]
    pub fn is_list(self) -> bool {
        matches!(self, Self::Bounded(_) | Self::Unbounded)
    }

    /// Maximum number of values the slot holds, `None` when unbounded.
    #[must_use]
    pub fn capacity(self) -> Option<usize> {
        match self {
            Self::Flag => Some(0),
            Self::Single => Some(1),
            Self::Bounded(n) => Some(n),
            Self::Unbounded => None,
        }
    }
}

impl TryFrom<i64> for Arity {
    type Error = Error;

    fn try_from(count: i64) -> Result<Self> {
        Self::from_count(count)
    }
}

/// Kind of scalar a value is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Integer,
    Float,
    Boolean,
}

impl ValueKind {
    /// Coerces a raw token to a value of this kind.
    ///
    /// Text passes through unchanged, numbers use their canonical Rust
    /// format (integers are read wide enough for every integer field type) and booleans accept `true` or `false` in any case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] when the token is not valid for the kind.
    pub fn coerce(self, token: &str) -> Result<Value> {
        let parse_error = || Error::Parse {
            value: token.to_string(),
            kind: self,
        };

        match self {
            Self::Text => Ok(Value::Text(token.to_string())),
            Self::Integer => token
                .parse()
                .map(Value::Integer)
                .map_err(|_| parse_error()),
            Self::Float => token.parse().map(Value::Float).map_err(|_| parse_error()),
            Self::Boolean => match token.to_ascii_lowercase().as_str() {
                "true" => Ok(Value::Boolean(true)),
                "false" => Ok(Value::Boolean(false)),
                _ => Err(parse_error()),
            },
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(match self {
            Self::Text => "text",
            Self::Integer => "an integer",
            Self::Float => "a float",
            Self::Boolean => "a boolean",
        })
    }
}

/// A coerced scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i128),
    Float(f64),
    Boolean(bool),
}

impl Value {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Text,
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::Boolean(_) => ValueKind::Boolean,
        }
    }
}

/// A Rust type an argument value can be stored as.
pub trait Scalar: Sized + 'static {
    const KIND: ValueKind;

    /// Converts a coerced value, `None` when it does not fit the type.
    fn from_value(value: Value) -> Option<Self>;
}

impl Scalar for String {
    const KIND: ValueKind = ValueKind::Text;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl Scalar for PathBuf {
    const KIND: ValueKind = ValueKind::Text;

    fn from_value(value: Value) -> Option<Self> {
        String::from_value(value).map(PathBuf::from)
    }
}

impl Scalar for bool {
    const KIND: ValueKind = ValueKind::Boolean;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Boolean(flag) => Some(flag),
            _ => None,
        }
    }
}

impl Scalar for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(number) => Some(number),
            _ => None,
        }
    }
}

impl Scalar for f32 {
    const KIND: ValueKind = ValueKind::Float;

    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(number) if number.abs() <= f64::from(f32::MAX) || !number.is_finite() => {
                Some(number as f32)
            }
            _ => None,
        }
    }
}

macro_rules! integer_scalar {
    ($($ty:ty),*) => {
        $(
            impl Scalar for $ty {
                const KIND: ValueKind = ValueKind::Integer;

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::Integer(number) => <$ty>::try_from(number).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

integer_scalar!(i64, i32, u32, u64, usize, i128);

type Toggle<O> = Box<dyn Fn(&mut O)>;
type Setter<O> = Box<dyn Fn(&mut O, Value) -> Option<()>>;
type Counter<O> = Box<dyn Fn(&mut O) -> usize>;

enum Binding<O> {
    Flag(Toggle<O>),
    Single(Setter<O>),
    List { push: Setter<O>, len: Counter<O> },
}

/// Schema of one named or positional argument slot of `O`.
pub struct Argument<O> {
    name: String,
    aliases: Vec<String>,
    attribute: String,
    arity: Arity,
    kind: ValueKind,
    help: Option<String>,
    binding: Binding<O>,
}

impl<O: 'static> Argument<O> {
    fn build(name: &str, attribute: &str, arity: Arity, kind: ValueKind, binding: Binding<O>) -> Self {
        Self {
            name: name.to_string(),
            aliases: name.split(ALIAS_SEPARATOR).map(str::to_string).collect(),
            attribute: attribute.to_string(),
            arity,
            kind,
            help: None,
            binding,
        }
    }

    /// A flag: each occurrence inverts the boolean, so a repeated flag
    /// cancels out.
    pub fn flag(
        name: &str,
        attribute: &str,
        accessor: impl Fn(&mut O) -> &mut bool + 'static,
    ) -> Self {
        let toggle = move |options: &mut O| {
            let flag = accessor(options);
            *flag = !*flag;
        };

        Self::build(
            name,
            attribute,
            Arity::Flag,
            ValueKind::Boolean,
            Binding::Flag(Box::new(toggle)),
        )
    }

    /// A single value, overwritten on each occurrence.
    pub fn single<T: Scalar>(
        name: &str,
        attribute: &str,
        accessor: impl Fn(&mut O) -> &mut T + 'static,
    ) -> Self {
        let set = move |options: &mut O, value: Value| {
            *accessor(options) = T::from_value(value)?;
            Some(())
        };

        Self::build(name, attribute, Arity::Single, T::KIND, Binding::Single(Box::new(set)))
    }

    /// A single value stored in an optional field.
    pub fn optional<T: Scalar>(
        name: &str,
        attribute: &str,
        accessor: impl Fn(&mut O) -> &mut Option<T> + 'static,
    ) -> Self {
        let set = move |options: &mut O, value: Value| {
            *accessor(options) = Some(T::from_value(value)?);
            Some(())
        };

        Self::build(name, attribute, Arity::Single, T::KIND, Binding::Single(Box::new(set)))
    }

    /// A list of values, extended on each occurrence.
    pub fn list<T: Scalar>(
        name: &str,
        attribute: &str,
        arity: Arity,
        accessor: impl Fn(&mut O) -> &mut Vec<T> + 'static,
    ) -> Self {
        let accessor = Rc::new(accessor);
        let push = {
            let accessor = accessor.clone();
            move |options: &mut O, value: Value| {
                accessor(options).push(T::from_value(value)?);
                Some(())
            }
        };
        let len = move |options: &mut O| accessor(options).len();

        Self::build(
            name,
            attribute,
            arity,
            T::KIND,
            Binding::List {
                push: Box::new(push),
                len: Box::new(len),
            },
        )
    }

    /// A list of values stored in an optional field, created on first use.
    pub fn optional_list<T: Scalar>(
        name: &str,
        attribute: &str,
        arity: Arity,
        accessor: impl Fn(&mut O) -> &mut Option<Vec<T>> + 'static,
    ) -> Self {
        let accessor = Rc::new(accessor);
        let push = {
            let accessor = accessor.clone();
            move |options: &mut O, value: Value| {
                accessor(options)
                    .get_or_insert_with(Vec::new)
                    .push(T::from_value(value)?);
                Some(())
            }
        };
        let len = move |options: &mut O| accessor(options).as_ref().map_or(0, Vec::len);

        Self::build(
            name,
            attribute,
            arity,
            T::KIND,
            Binding::List {
                push: Box::new(push),
                len: Box::new(len),
            },
        )
    }
}

impl<O> Argument<O> {
    #[must_use]
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// The alias group as declared, e.g. `-a|--arg`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    #[must_use]
    pub fn arity(&self) -> Arity {
        self.arity
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    #[must_use]
    pub fn help(&self) -> &str {
        self.help.as_deref().unwrap_or_default()
    }

    /// True when the first alias of the group is named.
    #[must_use]
    pub fn is_named(&self) -> bool {
        self.aliases.first().is_some_and(|alias| is_named_alias(alias))
    }

    /// Checks the schema invariants that the accessor types cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSchema`] when an alias is empty, when a list
    /// field is given a non-list arity, or when a bounded list holds less
    /// than two values.
    pub fn validate(&self) -> Result<()> {
        if self.aliases.iter().any(|alias| alias.is_empty()) {
            return Err(Error::invalid_schema(&self.name, "aliases may not be empty"));
        }

        match (&self.binding, self.arity) {
            (Binding::List { .. }, Arity::Flag | Arity::Single) => Err(Error::invalid_schema(
                &self.name,
                "a list field needs a bounded or unbounded arity",
            )),
            (_, Arity::Bounded(n)) if n < 2 => Err(Error::invalid_schema(
                &self.name,
                "a bounded list must accept at least two values",
            )),
            _ => Ok(()),
        }
    }

    /// Reads this argument's values from `tokens` into `options`.
    ///
    /// `tokens` starts at the first value, after any alias. Returns the
    /// number of tokens consumed: none for a flag, one for a single value,
    /// and for a list every following token up to the next named alias,
    /// limited to the room left in a bounded list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingValue`] when a single value has no token,
    /// [`Error::Parse`] when a token cannot be coerced and
    /// [`Error::TypeMismatch`] when the value does not fit the field type.
    pub fn read(&self, options: &mut O, tokens: &[String]) -> Result<usize> {
        match &self.binding {
            Binding::Flag(toggle) => {
                toggle(options);
                Ok(0)
            }
            Binding::Single(set) => {
                let token = tokens
                    .first()
                    .ok_or_else(|| Error::MissingValue(self.name.clone()))?;
                self.store(set, options, token)?;
                Ok(1)
            }
            Binding::List { push, len } => {
                let room = self
                    .arity
                    .capacity()
                    .map_or(usize::MAX, |capacity| capacity.saturating_sub(len(options)));

                let mut consumed = 0;
                for token in tokens
                    .iter()
                    .take_while(|token| !is_named_alias(token))
                    .take(room)
                {
                    self.store(push, options, token)?;
                    consumed += 1;
                }

                Ok(consumed)
            }
        }
    }

    /// True once the slot needs no more values: always for flags and single
    /// values, and for lists once a bounded list is full.
    pub fn is_satisfied(&self, options: &mut O) -> bool {
        match &self.binding {
            Binding::Flag(_) | Binding::Single(_) => true,
            Binding::List { len, .. } => self
                .arity
                .capacity()
                .is_some_and(|capacity| len(options) >= capacity),
        }
    }

    fn store(&self, setter: &Setter<O>, options: &mut O, token: &str) -> Result<()> {
        let value = self.kind.coerce(token)?;

        setter(options, value).ok_or_else(|| Error::TypeMismatch {
            attribute: self.attribute.clone(),
            value: token.to_string(),
            kind: self.kind,
        })
    }
}

impl<O> Debug for Argument<O> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Argument")
            .field("name", &self.name)
            .field("attribute", &self.attribute)
            .field("arity", &self.arity)
            .field("kind", &self.kind)
            .field("help", &self.help)
            .finish_non_exhaustive()
    }
}
