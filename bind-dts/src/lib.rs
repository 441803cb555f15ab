//! Compiles ambient TypeScript declarations (`.d.ts`) into OCaml external bindings.
//!
//! ```
//! let ml = bind_dts::compile("greet.d.ts", "declare function greet(name: string): void;").unwrap();
//! assert!(ml.contains(r#"external greet : string -> unit = "greet" [@@bs.val]"#));
//! ```

use error::CompileFailure;
use error::CompileResult;
use out::Item;
use print::PrintOptions;
use scope::Scope;
use tracing::debug;
use tracing::debug_span;

pub mod casing;
pub mod compile;
pub mod convert;
pub mod error;
pub mod out;
pub mod parse;
pub mod pos;
pub mod print;
pub mod scope;

/// One declaration file to compile.
#[derive(Clone, Debug)]
pub struct SourceFile {
  pub filename: String,
  pub source: String,
}

impl SourceFile {
  pub fn new(filename: impl Into<String>, source: impl Into<String>) -> SourceFile {
    SourceFile {
      filename: filename.into(),
      source: source.into(),
    }
  }
}

#[derive(Clone, Debug, Default)]
pub struct CompileOptions {
  pub print: PrintOptions,
}

impl CompileOptions {
  pub fn with_print(mut self, print: PrintOptions) -> Self {
    self.print = print;
    self
  }
}

/// Parses and compiles `file` into bindings without printing them.
pub fn compile_items(file: &SourceFile) -> CompileResult<Vec<Item>> {
  let program = parse::parse_source(file)?;
  compile::compile_stmts(&Scope::with_prelude(), &program.stx.body)
}

pub fn compile(filename: &str, source: &str) -> Result<String, CompileFailure> {
  compile_with_options(&CompileOptions::default(), filename, source)
}

pub fn compile_with_options(
  options: &CompileOptions,
  filename: &str,
  source: &str,
) -> Result<String, CompileFailure> {
  let _span = debug_span!("compile", filename).entered();
  let file = SourceFile::new(filename, source);
  match compile_items(&file) {
    Ok(items) => {
      debug!(items = items.len(), "compiled");
      Ok(print::print(&options.print, filename, &items))
    }
    Err(err) => {
      debug!(error = %err, "compilation failed");
      Err(CompileFailure::from_error(filename, source, err))
    }
  }
}
