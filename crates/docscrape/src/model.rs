//! Data model for a parsed docstring.

/// Parsed numpydoc docstring.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Docstring {
    /// First paragraph, one entry per line.
    pub summary: Vec<String>,
    /// Everything between the summary and the first section, blank lines kept.
    pub extended_summary: Vec<String>,
    /// `Parameters` section entries in documented order.
    pub parameters: Vec<Parameter>,
}

/// One entry of the `Parameters` section.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    /// Raw type text after ` : `, e.g. "int, optional". Empty when absent.
    pub type_text: String,
    /// Dedented description lines.
    pub description: Vec<String>,
}

impl Docstring {
    /// Lookup a parameter record by name.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}
