//! Functions exposed to the command line: parameter metadata plus a handler.
//!
//! Rust cannot inspect a signature at runtime, so every [`Function`] carries
//! its own parameter table. Each [`ParameterSpec`] names one parameter and
//! optionally gives its type annotation and its default value.

use crate::error::CallError;
use crate::types::ArgType;
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;

/// One parameter of a function's signature.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    name: String,
    annotation: Option<ArgType>,
    default: Option<Value>,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotation: None,
            default: None,
        }
    }

    /// Attach a type annotation (`a: int`).
    pub fn annotated(mut self, ty: ArgType) -> Self {
        self.annotation = Some(ty);
        self
    }

    /// Make the parameter optional (`c=5`). `Value::Null` is the "none" default.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn annotation(&self) -> Option<&ArgType> {
        self.annotation.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// Arguments bound to a function's parameters, in declared order.
///
/// Every parameter has an entry; omitted optional ones hold their default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: Map<String, Value>,
}

impl Arguments {
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Deserialize one argument. `Option<T>` accepts a `null` default.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> anyhow::Result<T> {
        let value = self
            .values
            .get(name)
            .with_context(|| format!("no argument named `{}`", name))?;
        serde_json::from_value(value.clone())
            .with_context(|| format!("argument `{}` has unexpected value {}", name, value))
    }

    /// Deserialize all arguments into one struct keyed by parameter name.
    pub fn parse<T: DeserializeOwned>(&self) -> anyhow::Result<T> {
        serde_json::from_value(Value::Object(self.values.clone()))
            .context("arguments do not match the expected shape")
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }
}

type Handler = dyn Fn(&Arguments) -> anyhow::Result<Value> + Send + Sync;

/// A callable with the metadata needed to build its command-line schema.
pub struct Function {
    name: String,
    doc: Option<String>,
    params: Vec<ParameterSpec>,
    handler: Box<Handler>,
}

impl Function {
    pub fn new(
        name: impl Into<String>,
        handler: impl Fn(&Arguments) -> anyhow::Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            doc: None,
            params: Vec::new(),
            handler: Box::new(handler),
        }
    }

    /// Attach the numpydoc docstring.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Append a parameter; declaration order is call order.
    pub fn param(mut self, param: ParameterSpec) -> Self {
        self.params.push(param);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn docstring(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn params(&self) -> &[ParameterSpec] {
        &self.params
    }

    /// Call the function with positional and keyword arguments.
    ///
    /// Positional values fill parameters in declared order, keywords fill the
    /// rest by name, and any optional parameter left over takes its default.
    pub fn call(&self, args: Vec<Value>, mut kwargs: Map<String, Value>) -> crate::Result<Value> {
        let given = args.len();
        if given > self.params.len() {
            return Err(CallError::TooManyPositional {
                function: self.name.clone(),
                expected: self.params.len(),
                given,
            }
            .into());
        }

        let mut positional = args.into_iter();
        let mut values = Map::new();

        for param in &self.params {
            let value = match positional.next() {
                Some(value) => {
                    if kwargs.contains_key(param.name()) {
                        return Err(CallError::MultipleValues {
                            function: self.name.clone(),
                            param: param.name().to_string(),
                        }
                        .into());
                    }
                    value
                }
                None => match kwargs.remove(param.name()).or_else(|| param.default_value().cloned()) {
                    Some(value) => value,
                    None => {
                        return Err(CallError::MissingArgument {
                            function: self.name.clone(),
                            param: param.name().to_string(),
                        }
                        .into());
                    }
                },
            };
            values.insert(param.name().to_string(), value);
        }

        if let Some(extra) = kwargs.keys().next() {
            return Err(CallError::UnexpectedKeyword {
                function: self.name.clone(),
                param: extra.clone(),
            }
            .into());
        }

        tracing::debug!(function = %self.name, "invoking");
        let result = (self.handler)(&Arguments { values })?;
        Ok(result)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("doc", &self.doc)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
