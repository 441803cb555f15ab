use assert_cmd::Command;
use serde_json::Value;
use std::time::Duration;
use tempfile::tempdir;

fn bind_dts_cli() -> Command {
  assert_cmd::cargo::cargo_bin_cmd!("bind-dts-cli")
}

#[test]
fn compiles_stdin_to_stdout() {
  let assert = bind_dts_cli()
    .timeout(Duration::from_secs(5))
    .arg("--no-header")
    .write_stdin("declare function now(): number;")
    .assert()
    .success();
  assert_eq!(
    String::from_utf8_lossy(&assert.get_output().stdout),
    "external now : unit -> float = \"now\" [@@bs.val]\n"
  );
}

#[test]
fn compiles_files_with_header_and_indent() {
  let dir = tempdir().unwrap();
  let input = dir.path().join("point.d.ts");
  let output = dir.path().join("point.ml");
  std::fs::write(&input, "declare interface Point { x: number }").unwrap();

  bind_dts_cli()
    .timeout(Duration::from_secs(5))
    .arg("--input")
    .arg(&input)
    .arg("--output")
    .arg(&output)
    .arg("--indent")
    .arg("4")
    .assert()
    .success();

  let ml = std::fs::read_to_string(&output).unwrap();
  assert!(ml.starts_with("(* Generated from "));
  assert!(ml.contains("point.d.ts by bind-dts. Do not edit. *)\n"));
  assert!(ml.ends_with(concat!(
    "module Point = struct\n",
    "    type t = < x : float > Js.t\n",
    "    external x : t -> float = \"x\" [@@bs.get]\n",
    "end\n",
  )));
}

#[test]
fn reports_failures_with_range_and_exit_code() {
  let assert = bind_dts_cli()
    .timeout(Duration::from_secs(5))
    .write_stdin("declare type Foo = string;")
    .assert()
    .failure()
    .code(1);
  let output = assert.get_output();
  assert!(output.stdout.is_empty());
  assert_eq!(
    String::from_utf8_lossy(&output.stderr).trim_end(),
    "1:13:1:16:type alias `Foo` must start with a lowercase letter"
  );
}

#[test]
fn reports_failures_as_json() {
  let assert = bind_dts_cli()
    .timeout(Duration::from_secs(5))
    .arg("--error-format")
    .arg("json")
    .write_stdin("declare var x;")
    .assert()
    .failure()
    .code(1);
  let failure: Value = serde_json::from_slice(&assert.get_output().stderr).unwrap();
  assert_eq!(failure["filename"], "<stdin>");
  assert_eq!(failure["range"]["start"]["line"], 1);
  assert_eq!(failure["range"]["start"]["column"], 12);
  assert_eq!(failure["message"], "variable `x` must have a type annotation");
}

#[test]
fn dumps_ast_as_json() {
  let assert = bind_dts_cli()
    .timeout(Duration::from_secs(5))
    .arg("--ast")
    .write_stdin("declare module \"fs\" { var sep: string; }")
    .assert()
    .success();
  let ast: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
  let module = &ast["body"][0];
  assert_eq!(module["$t"], "DeclareModule");
  assert_eq!(module["name"]["$t"], "String");
  assert_eq!(module["name"]["v"], "fs");
  assert_eq!(module["body"][0]["$t"], "DeclareVariable");
  assert_eq!(module["body"][0]["name"], "sep");
}

#[test]
fn ast_mode_reports_syntax_errors() {
  let assert = bind_dts_cli()
    .timeout(Duration::from_secs(5))
    .arg("--ast")
    .write_stdin("declare var a: ;")
    .assert()
    .failure()
    .code(1);
  assert_eq!(
    String::from_utf8_lossy(&assert.get_output().stderr).trim_end(),
    "1:15:1:16:syntax error: PS0002: expected type, found Semicolon"
  );
}

#[test]
fn missing_input_file_fails() {
  let dir = tempdir().unwrap();
  let assert = bind_dts_cli()
    .timeout(Duration::from_secs(5))
    .arg("--input")
    .arg(dir.path().join("missing.d.ts"))
    .assert()
    .failure();
  assert!(String::from_utf8_lossy(&assert.get_output().stderr).contains("failed to read"));
}
