//! Integration tests for mediatools-core
//!
//! These tests verify that the core functionality works together correctly
//! by testing complete workflows end-to-end.

use mediatools_core::{
    argument::{Argument, Arity},
    arguments::Arguments,
    command::Command,
    command_set::CommandSet,
    error::Error,
    file_handling::{read_command_set, write_command_set},
    runtime::{Action, Runtime},
};
use std::io::Write;
use tempfile::NamedTempFile;

#[derive(Default, Debug)]
struct MixedOptions {
    first: String,
    second: Vec<i64>,
    a: i64,
}

fn mixed_arguments() -> Arguments<MixedOptions> {
    Arguments::new()
        .with(Argument::single("FIRST", "first", |o: &mut MixedOptions| {
            &mut o.first
        }))
        .and_then(|set| {
            set.with(Argument::list(
                "SECOND",
                "second",
                Arity::Bounded(2),
                |o: &mut MixedOptions| &mut o.second,
            ))
        })
        .and_then(|set| {
            set.with(Argument::single("-a", "a", |o: &mut MixedOptions| {
                &mut o.a
            }))
        })
        .unwrap()
}

/// Test tokenizing a line and resolving its arguments
#[test]
fn test_mixed_named_and_positional_workflow() {
    let command = Command::parse("run first -a 12 20 21");
    let options = mixed_arguments().resolve(&command.args).unwrap();

    assert_eq!(options.first, "first");
    assert_eq!(options.a, 12);
    assert_eq!(options.second, vec![20, 21]);
}

/// Test that a value left after every positional is filled is rejected
#[test]
fn test_exhausted_positionals_workflow() {
    let command = Command::parse("run first 20 21 22");
    let result = mixed_arguments().resolve(&command.args);

    assert!(matches!(result, Err(Error::ExhaustedPositionals(token)) if token == "22"));
}

#[derive(Default)]
struct BoundedOptions {
    b: Vec<i32>,
    rest: Vec<String>,
}

/// Test that a bounded named list leaves the extra values to the positionals
#[test]
fn test_bounded_list_workflow() {
    let tokens: Vec<String> = ["-b", "1", "2", "3"].map(String::from).to_vec();

    let only_named = Arguments::new()
        .with(Argument::list("-b", "b", Arity::Bounded(2), |o: &mut BoundedOptions| {
            &mut o.b
        }))
        .unwrap();
    let result = only_named.resolve(&tokens);
    assert!(matches!(result, Err(Error::ExhaustedPositionals(token)) if token == "3"));

    let with_rest = only_named
        .with(Argument::list("REST", "rest", Arity::Unbounded, |o: &mut BoundedOptions| {
            &mut o.rest
        }))
        .unwrap();
    let options = with_rest.resolve(&tokens).unwrap();
    assert_eq!(options.b, vec![1, 2]);
    assert_eq!(options.rest, vec!["3"]);
}

/// Test that a full bounded positional hands over without consuming
#[test]
fn test_full_bounded_positional_hands_over() {
    #[derive(Default)]
    struct Options {
        pair: Vec<String>,
        tail: Vec<String>,
    }

    let arguments = Arguments::new()
        .with(Argument::list("PAIR", "pair", Arity::Bounded(2), |o: &mut Options| {
            &mut o.pair
        }))
        .and_then(|set| {
            set.with(Argument::list("TAIL", "tail", Arity::Unbounded, |o: &mut Options| {
                &mut o.tail
            }))
        })
        .unwrap();

    let mut options = Options {
        pair: vec!["x".to_string(), "y".to_string()],
        tail: Vec::new(),
    };
    let tokens: Vec<String> = ["z"].map(String::from).to_vec();
    arguments.resolve_into(&mut options, &tokens).unwrap();

    assert_eq!(options.pair, vec!["x", "y"]);
    assert_eq!(options.tail, vec!["z"]);
}

/// Test that an unbounded positional takes the whole stream
#[test]
fn test_unbounded_positional_greed() {
    #[derive(Default)]
    struct Options {
        files: Vec<String>,
        never: Option<String>,
    }

    let arguments = Arguments::try_from(vec![
        Argument::list("FILES", "files", Arity::Unbounded, |o: &mut Options| &mut o.files),
        Argument::optional("NEVER", "never", |o: &mut Options| &mut o.never),
    ])
    .unwrap();

    let tokens: Vec<String> = ["x", "y", "z"].map(String::from).to_vec();
    let options = arguments.resolve(&tokens).unwrap();
    assert_eq!(options.files, vec!["x", "y", "z"]);
    assert!(options.never.is_none());
}

/// Test the script format end-to-end through a file
#[test]
fn test_script_file_workflow() {
    let yaml_content = r#"
name: "tidy"
runtime: "files"
run:
  - select -r "holiday 2024*.mkv"
  - mv -s -t ~/Videos/sorted
  - 'exec echo "done"'
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{yaml_content}").unwrap();
    let temp_path = temp_file.path().to_str().unwrap().to_string();

    let set = read_command_set(&temp_path).unwrap();
    assert_eq!(set.name, Some("tidy".to_string()));
    assert_eq!(set.runtime, Some("files".to_string()));
    assert_eq!(set.len(), 3);
    assert_eq!(set.items[0].args, vec!["-r", "holiday 2024*.mkv"]);
    assert_eq!(set.items[2].args, vec!["echo", "done"]);

    let out_file = NamedTempFile::new().unwrap();
    let out_path = out_file.path().to_str().unwrap().to_string();
    write_command_set(&out_path, &set).unwrap();

    let reread = read_command_set(&out_path).unwrap();
    assert_eq!(reread, set);
}

/// Test that every set survives a save and load
#[test]
fn test_command_set_round_trip_workflow() {
    let lines = [
        "select -p",
        r#"mv "a file" b\ c -t "dir with \"quotes\"""#,
        "exec  ls   -la",
        r#"edit """#,
    ];

    let set = CommandSet::new(
        Some("round".to_string()),
        lines.iter().map(|line| Command::parse(line)).collect(),
    );

    let loaded = CommandSet::load(&set.save()).unwrap();

    assert_eq!(loaded.name, set.name);
    assert_eq!(loaded.items.len(), set.items.len());
    for (loaded, original) in loaded.items.iter().zip(&set.items) {
        assert_eq!(loaded.name, original.name);
        assert_eq!(loaded.args, original.args);
    }
}

#[derive(Default)]
struct Counter {
    total: i64,
    reset: bool,
}

struct Add {
    arguments: Arguments<AddOptions>,
}

#[derive(Default)]
struct AddOptions {
    values: Vec<i64>,
    reset: bool,
}

impl Add {
    fn new() -> Self {
        let arguments = Arguments::try_from(vec![
            Argument::list("VALUES", "values", Arity::Unbounded, |o: &mut AddOptions| {
                &mut o.values
            }),
            Argument::flag("-r|--reset", "reset", |o: &mut AddOptions| &mut o.reset),
        ])
        .unwrap();

        Self { arguments }
    }
}

impl Action<Counter> for Add {
    fn name(&self) -> &str {
        "add"
    }

    fn call(
        &self,
        _runtime: &Runtime<Counter>,
        context: &mut Counter,
        command: &Command,
    ) -> mediatools_core::error::Result<()> {
        let options = self.arguments.resolve(&command.args)?;
        if options.reset {
            context.total = 0;
            context.reset = true;
        }
        context.total += options.values.iter().sum::<i64>();
        Ok(())
    }
}

/// Test a script dispatched through a runtime, in order
#[test]
fn test_runtime_script_workflow() {
    let mut runtime = Runtime::new("counter");
    runtime.register(Add::new()).unwrap();

    let script = CommandSet::load("run:\n  - add 1 2 3\n  - add -r 10\n  - add 5\n").unwrap();
    let mut counter = Counter::default();
    runtime.run_all(&mut counter, &script).unwrap();

    assert_eq!(counter.total, 15);
    assert!(counter.reset);
}

/// Test that a resolution error aborts the script
#[test]
fn test_runtime_script_error_workflow() {
    let mut runtime = Runtime::new("counter");
    runtime.register(Add::new()).unwrap();

    let script = CommandSet::load("run:\n  - add 1\n  - add -z\n  - add 5\n").unwrap();
    let mut counter = Counter::default();
    let result = runtime.run_all(&mut counter, &script);

    assert!(matches!(result, Err(Error::UnknownAlias(alias)) if alias == "-z"));
    assert_eq!(counter.total, 1);
}
