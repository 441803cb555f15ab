use bind_dts::compile_with_options;
use bind_dts::print::PrintOptions;
use bind_dts::CompileOptions;
use similar::ChangeTag;
use similar::TextDiff;
use std::env::var;
use std::fs::read_dir;
use std::fs::read_to_string;
use std::fs::write;
use std::path::PathBuf;

// Compiles every `tests/fixtures/*.d.ts` and compares the result to the `.ml` file beside it.
// Set BIND_DTS_REGENERATE_FIXTURES=1 to overwrite the expectations instead.
#[test]
fn fixtures_compile_to_expected_bindings() {
  let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
  let regenerate = var("BIND_DTS_REGENERATE_FIXTURES").is_ok_and(|v| v == "1");
  let options = CompileOptions::default().with_print(PrintOptions::default().with_header(false));
  let mut count = 0;
  let mut entries = read_dir(&dir)
    .unwrap()
    .map(|e| e.unwrap().path())
    .collect::<Vec<_>>();
  entries.sort();
  for path in entries {
    let name = path.file_name().unwrap().to_str().unwrap().to_string();
    let Some(stem) = name.strip_suffix(".d.ts") else {
      continue;
    };
    println!("Testing {name}...");
    let source = read_to_string(&path).unwrap();
    let actual = match compile_with_options(&options, &name, &source) {
      Ok(out) => out,
      Err(err) => panic!("Failed {name}: {err}"),
    };
    let expected_path = dir.join(format!("{stem}.ml"));
    count += 1;
    if regenerate {
      write(&expected_path, &actual).unwrap();
      continue;
    };
    let expected = read_to_string(&expected_path).unwrap();
    if actual != expected {
      let mut msg = format!("Failed {name}, got:\n");
      let diff = TextDiff::from_lines(&expected, &actual);
      for change in diff.iter_all_changes() {
        let sign = match change.tag() {
          ChangeTag::Delete => "-",
          ChangeTag::Insert => "+",
          ChangeTag::Equal => " ",
        };
        msg.push_str(sign);
        msg.push_str(change.as_str().unwrap());
      }
      panic!("{}", msg);
    };
  }
  assert!(count > 0, "no fixtures found in {}", dir.display());
}
