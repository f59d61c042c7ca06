//! Schema construction: one command per function, one flag per parameter.
//!
//! An [`ArgumentSchema`] is built purely from a [`Function`]: its docstring
//! supplies the description and per-parameter help, [`resolve`] supplies the
//! types. The schema renders to a [`clap::Command`] and turns the resulting
//! matches back into a [`Namespace`] of values.

use crate::error::SchemaBuildError;
use crate::function::Function;
use crate::resolve::{resolve, TypeSource};
use crate::types::{display_value, ArgType};
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};
use docscrape::Docstring;
use serde_json::{json, Map, Value};
use std::ffi::OsString;

/// Command name of a [`CommandSet`]; clap shows the invoked binary name instead.
const PROGRAM: &str = "autoexec";

/// Flags owned by the parsing engine itself.
const RESERVED_FLAGS: &[&str] = &["help"];

/// One parameter, reconciled into a single command-line field.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArgument {
    pub name: String,
    pub ty: ArgType,
    /// Which source decided `ty`.
    pub source: TypeSource,
    pub required: bool,
    /// Present iff the argument is optional.
    pub default: Option<Value>,
    pub help: String,
}

impl ResolvedArgument {
    fn to_arg(&self) -> Arg {
        Arg::new(self.name.clone())
            .long(self.name.clone())
            .value_name(self.name.to_uppercase())
            .value_parser(self.ty.clone())
            .action(ArgAction::Set)
            .required(self.required)
            .allow_negative_numbers(self.ty.is_numeric())
            .help(self.help.clone())
    }
}

/// The schema of one function's command.
#[derive(Debug, Clone)]
pub struct ArgumentSchema<'f> {
    function: &'f Function,
    summary: String,
    description: String,
    arguments: Vec<ResolvedArgument>,
}

impl<'f> ArgumentSchema<'f> {
    /// Build the schema of `function`, failing on the first parameter (in
    /// declared order) whose type cannot be resolved.
    pub fn build(function: &'f Function) -> Result<Self, SchemaBuildError> {
        let doc = docscrape::parse(function.docstring().unwrap_or_default());
        let summary = summarize(function.name(), &doc);
        let description = describe(&summary, &doc);

        let mut arguments: Vec<ResolvedArgument> = Vec::with_capacity(function.params().len());
        for param in function.params() {
            let name = param.name();
            if RESERVED_FLAGS.contains(&name) {
                return Err(SchemaBuildError::ReservedName {
                    function: function.name().to_string(),
                    param: name.to_string(),
                });
            }
            if arguments.iter().any(|a| a.name == name) {
                return Err(SchemaBuildError::DuplicateParameter {
                    function: function.name().to_string(),
                    param: name.to_string(),
                });
            }

            let record = doc.parameter(name);
            let resolved = resolve(param, record).map_err(|source| SchemaBuildError::Type {
                function: function.name().to_string(),
                source,
            })?;

            let help = match record.filter(|r| !r.description.is_empty()) {
                Some(r) => r.description.join("\n"),
                None => synthesize_help(&resolved.ty, param.default_value()),
            };

            tracing::debug!(
                function = function.name(),
                param = name,
                ty = %resolved.ty,
                source = ?resolved.source,
                "resolved parameter"
            );

            arguments.push(ResolvedArgument {
                name: name.to_string(),
                ty: resolved.ty,
                source: resolved.source,
                required: !param.has_default(),
                default: param.default_value().cloned(),
                help,
            });
        }

        Ok(Self {
            function,
            summary,
            description,
            arguments,
        })
    }

    /// The originating function; dispatch calls back into it.
    pub fn function(&self) -> &'f Function {
        self.function
    }

    pub fn name(&self) -> &'f str {
        self.function.name()
    }

    /// One-line form of the description, shown in sub-command listings.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Arguments in declared parameter order.
    pub fn arguments(&self) -> &[ResolvedArgument] {
        &self.arguments
    }

    pub fn argument(&self, name: &str) -> Option<&ResolvedArgument> {
        self.arguments.iter().find(|a| a.name == name)
    }

    /// Render as a clap command named after the function.
    pub fn command(&self) -> Command {
        Command::new(self.name().to_string())
            .about(self.summary.clone())
            .long_about(self.description.clone())
            .args(self.arguments.iter().map(ResolvedArgument::to_arg))
    }

    /// Collect parsed values. Optional arguments that were not given take
    /// their default, `null` included.
    pub fn namespace(&self, matches: &ArgMatches) -> Namespace<'f> {
        let mut values = Map::new();
        for arg in &self.arguments {
            let parsed = matches.try_get_one::<Value>(&arg.name).ok().flatten().cloned();
            if let Some(value) = parsed.or_else(|| arg.default.clone()) {
                values.insert(arg.name.clone(), value);
            }
        }
        Namespace {
            function: self.function,
            values,
        }
    }

    /// Parse a token sequence (binary name first) against this schema.
    pub fn parse_from<I, T>(&self, args: I) -> Result<Namespace<'f>, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command().try_get_matches_from(args)?;
        Ok(self.namespace(&matches))
    }

    /// JSON Schema of the accepted fields.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for arg in &self.arguments {
            let mut prop = json!({
                "type": arg.ty.json_type(),
                "description": arg.help,
            });
            if let ArgType::List(inner) = &arg.ty {
                prop["items"] = json!({ "type": inner.json_type() });
            }
            if let Some(default) = &arg.default {
                prop["default"] = default.clone();
            }
            properties.insert(arg.name.clone(), prop);
        }

        let required: Vec<&str> = self
            .arguments
            .iter()
            .filter(|a| a.required)
            .map(|a| a.name.as_str())
            .collect();

        json!({
            "type": "object",
            "description": self.description,
            "properties": properties,
            "required": required,
        })
    }
}

/// Several functions, each a sub-command selected by its name.
#[derive(Debug, Clone)]
pub struct CommandSet<'f> {
    schemas: Vec<ArgumentSchema<'f>>,
}

impl<'f> CommandSet<'f> {
    pub fn build(functions: &'f [Function]) -> Result<Self, SchemaBuildError> {
        let mut schemas: Vec<ArgumentSchema<'f>> = Vec::with_capacity(functions.len());
        for function in functions {
            if schemas.iter().any(|s| s.name() == function.name()) {
                return Err(SchemaBuildError::DuplicateCommand(function.name().to_string()));
            }
            schemas.push(ArgumentSchema::build(function)?);
        }
        Ok(Self { schemas })
    }

    pub fn schemas(&self) -> &[ArgumentSchema<'f>] {
        &self.schemas
    }

    pub fn get(&self, name: &str) -> Option<&ArgumentSchema<'f>> {
        self.schemas.iter().find(|s| s.name() == name)
    }

    /// The value space of the sub-command selector.
    pub fn names(&self) -> Vec<&'f str> {
        self.schemas.iter().map(|s| s.name()).collect()
    }

    /// Render as a clap command that requires exactly one sub-command.
    pub fn command(&self) -> Command {
        Command::new(PROGRAM)
            .subcommand_required(true)
            .disable_help_subcommand(true)
            .subcommands(self.schemas.iter().map(ArgumentSchema::command))
    }

    /// Parse a token sequence (binary name first); the first positional
    /// token selects the function.
    pub fn parse_from<I, T>(&self, args: I) -> Result<Namespace<'f>, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut cmd = self.command();
        let matches = cmd.try_get_matches_from_mut(args)?;

        let Some((name, sub_matches)) = matches.subcommand() else {
            return Err(cmd.error(ErrorKind::MissingSubcommand, "a command is required"));
        };
        let Some(schema) = self.get(name) else {
            return Err(cmd.error(
                ErrorKind::InvalidSubcommand,
                format!("unrecognized command '{}'", name),
            ));
        };

        tracing::debug!(command = name, "selected command");
        Ok(schema.namespace(sub_matches))
    }

    /// One JSON Schema per sub-command, keyed by name.
    pub fn input_schemas(&self) -> Map<String, Value> {
        self.schemas
            .iter()
            .map(|s| (s.name().to_string(), s.input_schema()))
            .collect()
    }
}

/// Parsed values for one command, plus the function they belong to.
#[derive(Debug, Clone)]
pub struct Namespace<'f> {
    pub(crate) function: &'f Function,
    pub(crate) values: Map<String, Value>,
}

impl<'f> Namespace<'f> {
    /// The function selected by the parse.
    pub fn function(&self) -> &'f Function {
        self.function
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

/// Summary if present, else "The <name> function.".
fn summarize(name: &str, doc: &Docstring) -> String {
    if doc.summary.is_empty() {
        format!("The {} function.", name)
    } else {
        doc.summary.join("\n")
    }
}

/// The summary, then the extended summary after a blank line.
fn describe(summary: &str, doc: &Docstring) -> String {
    let mut description = summary.to_string();
    if !doc.extended_summary.is_empty() {
        description.push_str("\n\n");
        description.push_str(&doc.extended_summary.join("\n"));
    }
    description
}

fn synthesize_help(ty: &ArgType, default: Option<&Value>) -> String {
    match default {
        Some(value) => format!("{}, default: {}", ty, display_value(value)),
        None => ty.name(),
    }
}
