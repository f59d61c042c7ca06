use autoexec::{ArgType, Error, Function, ParameterSpec, Value};
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn calc() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_calc")))
}

fn add() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_add")))
}

// -- single function --

#[test]
fn add_uses_defaults() {
    add()
        .args(["--a=1", "--b=2"])
        .assert()
        .success()
        .stdout("15.0\n");
}

#[test]
fn add_overrides_defaults() {
    add()
        .args(["--a", "1", "--b", "2", "--c", "0", "--d=0.5", "--e=3"])
        .assert()
        .success()
        .stdout("6.5\n");
}

#[test]
fn add_accepts_negative_numbers() {
    add()
        .args(["--a", "-10", "--b=2"])
        .assert()
        .success()
        .stdout("4.0\n");
}

#[test]
fn add_reports_integer_overflow() {
    add()
        .args(["--a=9223372036854775807", "--b=1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("integer overflow"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn add_missing_required_flag() {
    add()
        .arg("--a=1")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--b"));
}

#[test]
fn add_invalid_value() {
    add()
        .args(["--a=one", "--b=2"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid type (int): one"));
}

#[test]
fn add_help_shows_docstring() {
    add()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Some cool addition."))
        .stdout(predicate::str::contains("You know, adding and stuff."))
        .stdout(predicate::str::contains("super complicated"))
        .stdout(predicate::str::contains("int, default: 5"))
        .stdout(predicate::str::contains("float, default: 7.0"));
}

// -- multiple functions --

#[test]
fn calc_dispatches_subtract() {
    calc()
        .args(["subtract", "--a=10", "--b=3"])
        .assert()
        .success()
        .stdout("-5.0\n");
}

#[test]
fn calc_dispatches_add() {
    calc()
        .args(["add", "--a=10", "--b=3"])
        .assert()
        .success()
        .stdout("25.0\n");
}

#[test]
fn calc_subtract_reports_integer_overflow() {
    calc()
        .args(["subtract", "--a=-9223372036854775808", "--b=1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("integer overflow"));
}

#[test]
fn calc_unknown_command() {
    calc()
        .args(["unknown", "--a=10"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unknown"));
}

#[test]
fn calc_requires_command() {
    calc().assert().failure().code(2);
}

#[test]
fn calc_help_lists_commands() {
    calc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("subtract"))
        .stdout(predicate::str::contains("Some cool subtraction."));
}

#[test]
fn calc_subcommand_help() {
    calc()
        .args(["subtract", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("This is the first complicated parameter"));
}

#[test]
fn calc_logs_resolution_when_enabled() {
    calc()
        .env("AUTOEXEC_LOG", "debug")
        .args(["add", "--a=1", "--b=2"])
        .assert()
        .success()
        .stdout("15.0\n")
        .stderr(predicate::str::contains("resolved parameter"));
}

#[test]
fn calc_quiet_by_default() {
    calc()
        .env_remove("AUTOEXEC_LOG")
        .args(["add", "--a=1", "--b=2"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

// -- library pipeline --

fn line_count() -> Function {
    Function::new("count", |args| {
        let path: String = args.get("path")?;
        let content = std::fs::read_to_string(&path)?;
        Ok(Value::from(content.lines().count()))
    })
    .doc("Count lines.\n\nParameters\n----------\npath : file\n    File to read.\n")
    .param(ParameterSpec::new("path"))
}

#[test]
fn file_argument_reads_existing_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"one\ntwo\nthree\n").unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let flag = format!("--path={}", path);
    let result = autoexec::try_execute_function_from(&line_count(), ["count", flag.as_str()]).unwrap();
    assert_eq!(result, Value::from(3));
}

#[test]
fn file_argument_rejects_missing_file() {
    let err = autoexec::try_execute_function_from(&line_count(), ["count", "--path=/no/such/file"])
        .unwrap_err();
    match err {
        Error::Usage(e) => assert!(e.to_string().contains("file not found")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn list_argument_from_default() {
    let mean = Function::new("mean", |args| {
        let xs: Vec<f64> = args.get("xs")?;
        Ok(Value::from(xs.iter().sum::<f64>() / xs.len() as f64))
    })
    .param(ParameterSpec::new("xs").with_default(vec![0.0]));

    let result = autoexec::try_execute_function_from(&mean, ["mean", "--xs=1,2,3"]).unwrap();
    assert_eq!(result, Value::from(2.0));
}

#[test]
fn handler_failure_is_returned() {
    let fail = Function::new("fail", |args| {
        let code: i64 = args.get("code")?;
        anyhow::bail!("failed with {}", code)
    })
    .param(ParameterSpec::new("code").annotated(ArgType::Int));

    let err = autoexec::try_execute_function_from(&fail, ["fail", "--code=3"]).unwrap_err();
    assert!(matches!(err, Error::Function(_)));
    assert_eq!(err.to_string(), "failed with 3");
}
