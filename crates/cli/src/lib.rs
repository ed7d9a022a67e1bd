//! Mediatools CLI Library
//!
//! This crate provides the command-line interface for mediatools: the `files`
//! runtime of actions selecting and moving files, the run modes, and the
//! interactive prompt.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`mode`]: Choosing between script, single command and interactive runs
//! - [`files`]: The `files` runtime and its actions
//! - [`interactive`]: The line-by-line prompt
//!
//! # Examples
//!
//! The CLI binary (`mt`) can be used in several ways:
//!
//! ```bash
//! # Interactive mode, one command per line
//! mt
//!
//! # A single command
//! mt select -p "*.mkv"
//!
//! # A script, for real or as a dry run
//! mt --script tidy.yml
//! mt --dry-run --script tidy.yml
//!
//! # Print a script in its canonical form
//! mt --print --script tidy.yml
//! ```

pub mod cli_args;
pub mod files;
pub mod interactive;
pub mod mode;
