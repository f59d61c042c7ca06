use thiserror::Error;

/// No type source found for a parameter. Raised while building a schema;
/// it is the function author's mistake, not a runtime input problem.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeResolutionError {
    #[error(
        "unable to identify type of `{param}` parameter; specify the type as an \
         annotation, a default value, or in the docstring"
    )]
    Unresolved { param: String },

    #[error("unknown type `{type_name}` in the docstring of `{param}` parameter")]
    UnknownTypeName { param: String, type_name: String },

    #[error("default value of `{param}` parameter has no supported type: {default}")]
    UnsupportedDefault { param: String, default: String },
}

impl TypeResolutionError {
    /// The parameter that could not be typed.
    pub fn param(&self) -> &str {
        match self {
            TypeResolutionError::Unresolved { param }
            | TypeResolutionError::UnknownTypeName { param, .. }
            | TypeResolutionError::UnsupportedDefault { param, .. } => param,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaBuildError {
    #[error("cannot build command for `{function}`: {source}")]
    Type {
        function: String,
        #[source]
        source: TypeResolutionError,
    },

    #[error("`{function}` declares parameter `{param}` more than once")]
    DuplicateParameter { function: String, param: String },

    #[error("`{function}` parameter `{param}` collides with the built-in --{param} flag")]
    ReservedName { function: String, param: String },

    #[error("command `{0}` is registered more than once")]
    DuplicateCommand(String),
}

/// A required field is absent from an already-validated value mapping.
/// Means the schema and the extractor disagree about the function.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("parsed arguments for `{function}` have no value for required parameter `{param}`")]
    MissingRequired { function: String, param: String },
}

/// Binding call arguments to a function's parameters failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    #[error("{function}() takes {expected} positional arguments but {given} were given")]
    TooManyPositional { function: String, expected: usize, given: usize },

    #[error("{function}() got multiple values for argument `{param}`")]
    MultipleValues { function: String, param: String },

    #[error("{function}() missing required argument: `{param}`")]
    MissingArgument { function: String, param: String },

    #[error("{function}() got an unexpected keyword argument `{param}`")]
    UnexpectedKeyword { function: String, param: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaBuildError),

    /// Unparsable value, missing required flag, unknown sub-command, or a
    /// help/version request. Owned by clap; exit through [`clap::Error::exit`].
    #[error(transparent)]
    Usage(#[from] clap::Error),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Call(#[from] CallError),

    /// The function body itself failed.
    #[error(transparent)]
    Function(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
