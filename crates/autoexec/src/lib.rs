//! autoexec: turn a function into a command-line program.
//!
//! A [`Function`] carries a handler, a parameter table and an optional
//! numpydoc docstring. From those three sources the crate derives the whole
//! command-line schema: flag names, value types, required/default status,
//! help text and the command description. No schema is written by hand.
//!
//! Pipeline:
//!
//! 1. [`resolve()`] picks each parameter's type (annotation, then default
//!    value, then docstring type text),
//! 2. [`ArgumentSchema`] turns the parameters into clap arguments,
//! 3. clap parses the tokens into a [`Namespace`],
//! 4. [`extract()`] splits the namespace into positional and keyword arguments,
//! 5. [`Function::call`] invokes the handler.
//!
//! [`execute_function`] runs the pipeline for one function,
//! [`execute_functions`] exposes several as sub-commands.

pub mod error;
pub mod exec;
pub mod extract;
pub mod function;
pub mod resolve;
pub mod schema;
pub mod types;

pub use error::{
    CallError, Error, ExtractionError, Result, SchemaBuildError, TypeResolutionError,
};
pub use exec::{
    execute_function, execute_functions, kwargs_to_args, kwargs_to_call,
    try_execute_function_from, try_execute_functions_from,
};
pub use extract::{extract, Extracted};
pub use function::{Arguments, Function, ParameterSpec};
pub use resolve::{resolve, ResolvedType, TypeSource};
pub use schema::{ArgumentSchema, CommandSet, Namespace, ResolvedArgument};
pub use types::{display_value, ArgType};

/// Re-export: values passed to and returned from functions.
pub use serde_json::Value;
