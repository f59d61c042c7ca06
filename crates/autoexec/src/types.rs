//! Type registry: the bounded set of argument types and their conversions.
//!
//! Doc type text is looked up here by name; nothing is ever evaluated.

use clap::builder::TypedValueParser;
use clap::error::ErrorKind;
use serde_json::Value;
use std::ffi::OsStr;
use std::fmt;

/// An argument type: how a command-line token becomes a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgType {
    Int,
    Float,
    Bool,
    Str,
    /// Path to an existing regular file.
    File,
    /// Comma-separated values of the inner type.
    List(Box<ArgType>),
}

impl ArgType {
    /// Resolve a type name as written in documentation.
    ///
    /// `"int"`, `"list[float]"`, `"list of str"` and a few aliases are known;
    /// anything else is `None`.
    pub fn from_name(name: &str) -> Option<ArgType> {
        let name = name.trim();
        match name {
            "int" | "integer" => return Some(ArgType::Int),
            "float" | "number" => return Some(ArgType::Float),
            "bool" | "boolean" => return Some(ArgType::Bool),
            "str" | "string" => return Some(ArgType::Str),
            "file" => return Some(ArgType::File),
            "list" => return Some(ArgType::List(Box::new(ArgType::Str))),
            _ => {}
        }

        let inner = name
            .strip_prefix("list[")
            .and_then(|rest| rest.strip_suffix(']'))
            .or_else(|| name.strip_prefix("list of "))?;
        ArgType::from_name(inner).map(|t| ArgType::List(Box::new(t)))
    }

    /// The runtime type of a default value. `Null` and objects have none.
    pub fn of_value(value: &Value) -> Option<ArgType> {
        match value {
            Value::Bool(_) => Some(ArgType::Bool),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(ArgType::Int),
            Value::Number(_) => Some(ArgType::Float),
            Value::String(_) => Some(ArgType::Str),
            Value::Array(items) => {
                let inner = match items.first() {
                    Some(first) => ArgType::of_value(first)?,
                    None => ArgType::Str,
                };
                Some(ArgType::List(Box::new(inner)))
            }
            Value::Null | Value::Object(_) => None,
        }
    }

    /// Canonical name, used in synthesized help text.
    pub fn name(&self) -> String {
        match self {
            ArgType::Int => "int".to_string(),
            ArgType::Float => "float".to_string(),
            ArgType::Bool => "bool".to_string(),
            ArgType::Str => "str".to_string(),
            ArgType::File => "file".to_string(),
            ArgType::List(inner) => format!("list[{}]", inner.name()),
        }
    }

    /// JSON Schema `type` keyword for this type.
    pub fn json_type(&self) -> &'static str {
        match self {
            ArgType::Int => "integer",
            ArgType::Float => "number",
            ArgType::Bool => "boolean",
            ArgType::Str | ArgType::File => "string",
            ArgType::List(_) => "array",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ArgType::Int | ArgType::Float)
    }

    /// Convert a token to a value. Returns the converted value or an error message.
    pub fn parse(&self, value: &str) -> Result<Value, String> {
        match self {
            ArgType::Str => Ok(Value::String(value.to_string())),
            ArgType::Int => {
                // Unsigned fallback keeps every integer `of_value` accepts parseable.
                let token = value.trim();
                token
                    .parse::<i64>()
                    .map(Value::from)
                    .or_else(|_| token.parse::<u64>().map(Value::from))
                    .map_err(|_| format!("invalid type (int): {}", value))
            }
            ArgType::Float => match value.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(Value::from(f)),
                _ => Err(format!("invalid type (float): {}", value)),
            },
            ArgType::Bool => match value {
                "" | "false" | "0" => Ok(Value::Bool(false)),
                _ => Ok(Value::Bool(true)),
            },
            ArgType::File => {
                if std::path::Path::new(value).is_file() {
                    Ok(Value::String(value.to_string()))
                } else {
                    Err(format!("file not found: {}", value))
                }
            }
            ArgType::List(inner) => {
                if value.is_empty() {
                    return Ok(Value::Array(Vec::new()));
                }
                value
                    .split(',')
                    .map(|item| inner.parse(item))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array)
            }
        }
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Lets clap convert tokens straight into [`Value`]s.
impl TypedValueParser for ArgType {
    type Value = Value;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let Some(text) = value.to_str() else {
            return Err(clap::Error::new(ErrorKind::InvalidUtf8).with_cmd(cmd));
        };
        self.parse(text).map_err(|msg| {
            let flag = arg
                .and_then(|a| a.get_long())
                .map(|l| format!("--{}", l))
                .unwrap_or_default();
            clap::Error::raw(
                ErrorKind::ValueValidation,
                format!("invalid value '{}' for '{}': {}\n", text, flag, msg),
            )
            .with_cmd(cmd)
        })
    }
}

/// Render a value the way it is written on a command line: strings
/// unquoted, lists comma-joined.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_name_primitives() {
        assert_eq!(ArgType::from_name("int"), Some(ArgType::Int));
        assert_eq!(ArgType::from_name(" float "), Some(ArgType::Float));
        assert_eq!(ArgType::from_name("bool"), Some(ArgType::Bool));
        assert_eq!(ArgType::from_name("str"), Some(ArgType::Str));
        assert_eq!(ArgType::from_name("file"), Some(ArgType::File));
    }

    #[test]
    fn from_name_lists() {
        let ints = ArgType::List(Box::new(ArgType::Int));
        assert_eq!(ArgType::from_name("list[int]"), Some(ints.clone()));
        assert_eq!(ArgType::from_name("list of int"), Some(ints));
        assert_eq!(
            ArgType::from_name("list"),
            Some(ArgType::List(Box::new(ArgType::Str)))
        );
    }

    #[test]
    fn from_name_rejects_unknown() {
        assert_eq!(ArgType::from_name("__import__('os')"), None);
        assert_eq!(ArgType::from_name("dict"), None);
        assert_eq!(ArgType::from_name("list[dict]"), None);
        assert_eq!(ArgType::from_name(""), None);
    }

    #[test]
    fn of_value_runtime_types() {
        assert_eq!(ArgType::of_value(&json!(5)), Some(ArgType::Int));
        assert_eq!(ArgType::of_value(&json!(7.0)), Some(ArgType::Float));
        assert_eq!(ArgType::of_value(&json!(true)), Some(ArgType::Bool));
        assert_eq!(ArgType::of_value(&json!("x")), Some(ArgType::Str));
        assert_eq!(
            ArgType::of_value(&json!([1.5, 2.5])),
            Some(ArgType::List(Box::new(ArgType::Float)))
        );
        assert_eq!(ArgType::of_value(&Value::Null), None);
        assert_eq!(ArgType::of_value(&json!({"k": 1})), None);
    }

    #[test]
    fn parse_int() {
        assert_eq!(ArgType::Int.parse("42"), Ok(json!(42)));
        assert_eq!(ArgType::Int.parse("-3"), Ok(json!(-3)));
        assert!(ArgType::Int.parse("4.2").is_err());
    }

    #[test]
    fn parse_int_accepts_every_inferred_default() {
        let max = json!(u64::MAX);
        assert_eq!(ArgType::of_value(&max), Some(ArgType::Int));
        assert_eq!(ArgType::Int.parse(&display_value(&max)), Ok(max));
        assert_eq!(ArgType::Int.parse("-9223372036854775808"), Ok(json!(i64::MIN)));
        assert!(ArgType::Int.parse("18446744073709551616").is_err());
        assert!(ArgType::Int.parse("-9223372036854775809").is_err());
    }

    #[test]
    fn parse_float() {
        assert_eq!(ArgType::Float.parse("2.5"), Ok(json!(2.5)));
        assert_eq!(ArgType::Float.parse("3"), Ok(json!(3.0)));
        assert!(ArgType::Float.parse("abc").is_err());
        assert!(ArgType::Float.parse("inf").is_err());
    }

    #[test]
    fn parse_bool() {
        assert_eq!(ArgType::Bool.parse("false"), Ok(json!(false)));
        assert_eq!(ArgType::Bool.parse("0"), Ok(json!(false)));
        assert_eq!(ArgType::Bool.parse("yes"), Ok(json!(true)));
    }

    #[test]
    fn parse_list() {
        let ints = ArgType::List(Box::new(ArgType::Int));
        assert_eq!(ints.parse("1,2,3"), Ok(json!([1, 2, 3])));
        assert_eq!(ints.parse(""), Ok(json!([])));
        assert!(ints.parse("1,x").is_err());
    }

    #[test]
    fn parse_file_missing() {
        let err = ArgType::File.parse("/definitely/not/here").unwrap_err();
        assert!(err.contains("file not found"));
    }

    #[test]
    fn display_values() {
        assert_eq!(display_value(&json!(7.0)), "7.0");
        assert_eq!(display_value(&json!(5)), "5");
        assert_eq!(display_value(&json!("hi")), "hi");
        assert_eq!(display_value(&json!([1, 2])), "1,2");
        assert_eq!(display_value(&Value::Null), "null");
    }

    #[test]
    fn names() {
        assert_eq!(ArgType::List(Box::new(ArgType::Float)).name(), "list[float]");
        assert_eq!(ArgType::Int.to_string(), "int");
    }
}
