//! The arithmetic example shared by the demo binaries.
//!
//! Each parameter gets its type from a different place: `a` is annotated,
//! `b` and `e` are typed by the docstring, `c` and `d` by their defaults.

use anyhow::Context;
use autoexec::{ArgType, Function, ParameterSpec, Value};
use serde::Deserialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

const ADD_DOC: &str = "Some cool addition.

    It's super complicated.
    You know, adding and stuff.

    Parameters
    ----------
    b : int, optional
        This is the second complicated parameter
        super complicated
    e : int, optional
    ";

const SUBTRACT_DOC: &str = "Some cool subtraction.

    Parameters
    ----------
    a : int
        This is the first complicated parameter
        super complicated
    b : int, optional
    e : int, optional
    ";

#[derive(Deserialize)]
struct Operands {
    a: i64,
    b: i64,
    c: i64,
    d: f64,
    e: Option<i64>,
}

/// `(a: int, b, c=5, d=7.0, e=None)`
fn operands(function: Function) -> Function {
    function
        .param(ParameterSpec::new("a").annotated(ArgType::Int))
        .param(ParameterSpec::new("b"))
        .param(ParameterSpec::new("c").with_default(5))
        .param(ParameterSpec::new("d").with_default(7.0))
        .param(ParameterSpec::new("e").with_default(Value::Null))
}

pub fn add() -> Function {
    operands(
        Function::new("add", |args| {
            let o: Operands = args.parse()?;
            let sum = [o.b, o.c, o.e.unwrap_or(0)]
                .into_iter()
                .try_fold(o.a, i64::checked_add)
                .context("integer overflow")?;
            Ok(json!(sum as f64 + o.d))
        })
        .doc(ADD_DOC),
    )
}

// Only `calc` registers subtract.
#[allow(dead_code)]
pub fn subtract() -> Function {
    operands(
        Function::new("subtract", |args| {
            let o: Operands = args.parse()?;
            let difference = [o.b, o.c, o.e.unwrap_or(0)]
                .into_iter()
                .try_fold(o.a, i64::checked_sub)
                .context("integer overflow")?;
            Ok(json!(difference as f64 - o.d))
        })
        .doc(SUBTRACT_DOC),
    )
}

/// Log to stderr, filtered by `AUTOEXEC_LOG` (default: warn).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("AUTOEXEC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
