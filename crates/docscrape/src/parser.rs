//! numpydoc parser: docstring cleanup, paragraph reader, section dispatch.

use crate::model::*;
use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_UNDERLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[[:blank:]]*(-+|=+)[[:blank:]]*$").unwrap());

// "name : type", "name :" (type group absent)
static RE_PARAM_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)[[:blank:]]+:(?:[[:blank:]]+(.*?))?[[:blank:]]*$").unwrap());

/// The only section collected into [`Docstring::parameters`].
const PARAMETERS_SECTION: &str = "Parameters";

// -- Public API ---------------------------------------------------------------

/// Parse a docstring into a [`Docstring`].
///
/// Empty or whitespace-only input yields an empty record.
pub fn parse(input: &str) -> Docstring {
    let lines = clean(input);
    let mut reader = Reader::new(&lines);
    let mut doc = Docstring::default();

    reader.skip_blank();
    if !reader.at_section() {
        doc.summary = reader.read_paragraph();
        reader.skip_blank();
    }
    if !reader.at_section() {
        doc.extended_summary = strip_blank(reader.read_until_section());
    }

    loop {
        reader.skip_blank();
        if reader.eof() {
            break;
        }
        if !reader.at_section() {
            // Stray text between sections
            reader.advance();
            continue;
        }

        let title = reader.current().trim().to_string();
        reader.advance(); // title
        reader.advance(); // underline
        let body = reader.read_until_section();

        if title == PARAMETERS_SECTION {
            doc.parameters.extend(parse_parameters(&body));
        }
    }

    doc
}

// -- Line reader --------------------------------------------------------------

struct Reader<'a> {
    lines: &'a [String],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(lines: &'a [String]) -> Self {
        Self { lines, pos: 0 }
    }

    fn eof(&self) -> bool {
        self.pos >= self.lines.len()
    }

    fn current(&self) -> &'a str {
        &self.lines[self.pos]
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn skip_blank(&mut self) {
        while !self.eof() && self.current().trim().is_empty() {
            self.advance();
        }
    }

    /// A section header is a non-empty line followed by an underline at
    /// least as long as the title.
    fn at_section(&self) -> bool {
        if self.pos + 1 >= self.lines.len() {
            return false;
        }
        let title = self.current().trim();
        let underline = self.lines[self.pos + 1].trim();
        !title.is_empty()
            && RE_UNDERLINE.is_match(underline)
            && underline.chars().count() >= title.chars().count()
    }

    fn read_paragraph(&mut self) -> Vec<String> {
        let mut out = Vec::new();
        while !self.eof() && !self.current().trim().is_empty() {
            out.push(self.current().to_string());
            self.advance();
        }
        out
    }

    fn read_until_section(&mut self) -> Vec<String> {
        let mut out = Vec::new();
        while !self.eof() && !self.at_section() {
            out.push(self.current().to_string());
            self.advance();
        }
        out
    }
}

// -- Sections -----------------------------------------------------------------

/// Parse the body of a `Parameters` section.
///
/// Each unindented line is a header; the indented lines below it are its
/// description. `x, y : int` documents both `x` and `y`.
fn parse_parameters(body: &[String]) -> Vec<Parameter> {
    let mut params = Vec::new();
    let mut i = 0;

    while i < body.len() {
        let header = body[i].trim();
        i += 1;
        if header.is_empty() {
            continue;
        }

        let start = i;
        while i < body.len() && (body[i].trim().is_empty() || body[i].starts_with(char::is_whitespace)) {
            i += 1;
        }
        let description = strip_blank(dedent(&body[start..i]));

        let (names, type_text) = match RE_PARAM_HEADER.captures(header) {
            Some(caps) => (
                caps[1].to_string(),
                caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default(),
            ),
            None => (header.to_string(), String::new()),
        };

        for name in names.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            params.push(Parameter {
                name: name.to_string(),
                type_text: type_text.clone(),
                description: description.clone(),
            });
        }
    }

    params
}

// -- Text helpers -------------------------------------------------------------

/// Byte length of the leading whitespace of `line`.
fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Docstring cleanup: the first line loses its leading whitespace, the rest
/// lose their common indentation, surrounding blank lines are dropped.
fn clean(input: &str) -> Vec<String> {
    let raw: Vec<&str> = input.lines().collect();
    let Some((first, rest)) = raw.split_first() else {
        return Vec::new();
    };

    let mut lines = vec![first.trim().to_string()];
    lines.extend(dedent_strs(rest));
    strip_blank(lines)
}

fn dedent(lines: &[String]) -> Vec<String> {
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    dedent_strs(&refs)
}

fn dedent_strs(lines: &[&str]) -> Vec<String> {
    let indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| indent_of(l))
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|l| {
            if l.trim().is_empty() {
                String::new()
            } else {
                l.get(indent..).unwrap_or_else(|| l.trim_start()).trim_end().to_string()
            }
        })
        .collect()
}

fn strip_blank(mut lines: Vec<String>) -> Vec<String> {
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    let leading = lines.iter().take_while(|l| l.trim().is_empty()).count();
    lines.drain(..leading);
    lines
}
