//! Executors: build, parse, extract, invoke.
//!
//! The `try_*_from` variants take an explicit token sequence and return every
//! failure. `execute_function` and `execute_functions` read the process
//! arguments and let usage errors terminate the process the way clap does
//! (usage message on stderr, exit status 2; `--help` exits 0).

use crate::error::{Error, Result};
use crate::function::Function;
use crate::schema::{ArgumentSchema, CommandSet};
use crate::types::display_value;
use serde_json::{Map, Value};
use std::ffi::OsString;

/// Run one function as a command. Tokens start with the binary name.
pub fn try_execute_function_from<I, T>(function: &Function, args: I) -> Result<Value>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let schema = ArgumentSchema::build(function)?;
    let namespace = schema.parse_from(args)?;
    namespace.extract()?.invoke()
}

/// Run one of several functions, selected by the first positional token.
pub fn try_execute_functions_from<I, T>(functions: &[Function], args: I) -> Result<Value>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let commands = CommandSet::build(functions)?;
    let namespace = commands.parse_from(args)?;
    tracing::debug!(command = namespace.function().name(), "dispatching");
    namespace.extract()?.invoke()
}

/// [`try_execute_function_from`] over the process arguments.
pub fn execute_function(function: &Function) -> Result<Value> {
    exit_on_usage(try_execute_function_from(function, std::env::args_os()))
}

/// [`try_execute_functions_from`] over the process arguments.
pub fn execute_functions(functions: &[Function]) -> Result<Value> {
    exit_on_usage(try_execute_functions_from(functions, std::env::args_os()))
}

fn exit_on_usage(result: Result<Value>) -> Result<Value> {
    match result {
        Err(Error::Usage(err)) => err.exit(),
        other => other,
    }
}

/// Command-line tokens equivalent to calling `function_name` with `kwargs`:
/// `["name", "--key=value", ...]`.
pub fn kwargs_to_args(function_name: &str, kwargs: &Map<String, Value>) -> Vec<String> {
    std::iter::once(function_name.to_string())
        .chain(
            kwargs
                .iter()
                .map(|(key, value)| format!("--{}={}", key, display_value(value))),
        )
        .collect()
}

/// [`kwargs_to_args`] joined into a single command line.
pub fn kwargs_to_call(function_name: &str, kwargs: &Map<String, Value>) -> String {
    kwargs_to_args(function_name, kwargs).join(" ")
}
