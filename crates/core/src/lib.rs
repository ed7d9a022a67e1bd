//! Mediatools Core Library
//!
//! This crate provides the core functionality for mediatools, a small command
//! scripting toolkit: command lines are tokenized into named commands, each
//! command's tokens are bound to a typed options structure through a
//! declarative argument schema, and a runtime dispatches the commands to
//! registered actions.
//!
//! # Key Features
//!
//! - **Commands**: Shell-like tokenizer with quoting and escaping, and the
//!   canonical rendering back to a line
//! - **Argument Schemas**: Named and positional arguments with flag, single,
//!   bounded and unbounded arity, bound through typed field accessors
//! - **Resolution**: Binding of a command's tokens into an options value
//! - **Command Sets**: YAML scripts holding an ordered list of command lines
//! - **Runtime**: Name based dispatch of commands to actions
//!
//! # Examples
//!
//! Loading a script and reading its commands:
//!
//! ```
//! use mediatools_core::command_set::CommandSet;
//!
//! let script = CommandSet::load("name: demo\nrun:\n  - select -r \"my file.txt\"\n")?;
//! for command in &script {
//!     println!("{}: {:?}", command.name, command.args);
//! }
//! # Ok::<(), mediatools_core::error::Error>(())
//! ```

pub mod argument;
pub mod arguments;
pub mod command;
pub mod command_set;
pub mod config;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod runtime;
