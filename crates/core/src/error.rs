use thiserror::Error;

use crate::argument::ValueKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Alias `{}` is already registered.", .0)]
    DuplicateAlias(String),

    #[error("Invalid argument `{}`: {}", .name, .reason)]
    InvalidSchema { name: String, reason: String },

    #[error("Invalid argument `{}`", .0)]
    UnknownAlias(String),

    #[error("Unexpected value `{}`: no positional argument is left to take it", .0)]
    ExhaustedPositionals(String),

    #[error("Argument `{}` expects a value", .0)]
    MissingValue(String),

    #[error("Value `{}` for `{}` cannot be stored as {}", .value, .attribute, .kind)]
    TypeMismatch {
        attribute: String,
        value: String,
        kind: ValueKind,
    },

    #[error("Cannot read `{}` as {}", .value, .kind)]
    Parse { value: String, kind: ValueKind },

    #[error("Command `{}` has no argument to use as a sub command", .0)]
    OutOfRange(String),

    #[error("Invalid command set: {}", .0)]
    Format(#[source] serde_yaml::Error),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Action `{}` is already registered.", .0)]
    DuplicateAction(String),

    #[error("Unknown action `{}`.{}", .name, .hint)]
    UnknownAction { name: String, hint: String },

    #[error("The sub process exiting with non-success code.")]
    SubProcessExit,

    #[error("Error with sub process: {}", _0)]
    SubProcess(#[from] std::io::Error),

    #[error("Invalid file pattern `{}`: {}", .pattern, .reason)]
    InvalidPattern { pattern: String, reason: String },

    #[error("No editor found: set `$EDITOR` or pass `--editor`.")]
    NoEditor,

    #[error("Misc error: {}", .0)]
    Misc(String),
}

impl Error {
    pub fn invalid_schema(name: &str, reason: &str) -> Self {
        Self::InvalidSchema {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn unknown_action(name: &str, suggestion: Option<&str>) -> Self {
        let hint = match suggestion {
            Some(suggestion) => format!(" Did you mean `{suggestion}`?"),
            None => String::new(),
        };

        Self::UnknownAction {
            name: name.to_string(),
            hint,
        }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}
