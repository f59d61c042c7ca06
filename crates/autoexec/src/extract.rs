//! Split a parsed value mapping back into a call.
//!
//! Walks the function's own parameters in declared order: required ones
//! become positional arguments, optional ones become keyword arguments when
//! the mapping has a value for them.

use crate::error::ExtractionError;
use crate::function::Function;
use crate::schema::Namespace;
use serde_json::{Map, Value};

/// A ready-to-invoke call: `function(*args, **kwargs)`.
#[derive(Debug, Clone)]
pub struct Extracted<'f> {
    pub function: &'f Function,
    pub args: Vec<Value>,
    pub kwargs: Map<String, Value>,
}

impl<'f> Extracted<'f> {
    pub fn invoke(self) -> crate::Result<Value> {
        self.function.call(self.args, self.kwargs)
    }
}

pub fn extract<'f>(
    values: &Map<String, Value>,
    function: &'f Function,
) -> Result<Extracted<'f>, ExtractionError> {
    let mut args = Vec::new();
    let mut kwargs = Map::new();

    for param in function.params() {
        let name = param.name();
        if param.has_default() {
            // Absent means the function's own default applies at call time.
            if let Some(value) = values.get(name) {
                kwargs.insert(name.to_string(), value.clone());
            }
        } else {
            let value = values.get(name).ok_or_else(|| ExtractionError::MissingRequired {
                function: function.name().to_string(),
                param: name.to_string(),
            })?;
            args.push(value.clone());
        }
    }

    Ok(Extracted {
        function,
        args,
        kwargs,
    })
}

impl<'f> Namespace<'f> {
    /// Extract the call for the function selected by the parse.
    pub fn extract(&self) -> Result<Extracted<'f>, ExtractionError> {
        extract(&self.values, self.function)
    }
}
