//! docscrape: parse numpydoc-style docstrings.
//!
//! Extracts the pieces a command-line front end needs from a function's
//! documentation: the one-line summary, the extended summary and, for every
//! entry of the `Parameters` section, its declared type text and description.
//!
//! ```text
//! Some cool addition.
//!
//! Parameters
//! ----------
//! b : int, optional
//!     The second operand.
//! ```

pub mod model;
pub mod parser;

pub use model::{Docstring, Parameter};
pub use parser::parse;
