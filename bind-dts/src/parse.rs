use crate::error::Diagnostic;
use crate::error::ParseError;
use crate::SourceFile;
use parse_dts::ast::node::Node;
use parse_dts::ast::stx::TopLevel;
use parse_dts::error::SyntaxError;
use tracing::debug_span;

impl From<&SyntaxError> for Diagnostic {
  fn from(err: &SyntaxError) -> Self {
    Diagnostic {
      loc: err.loc,
      code: err.typ.code(),
      message: err.message(),
    }
  }
}

/// Parses a whole declaration file. The grammar stops at its first error, so a failure carries one diagnostic.
pub fn parse_source(file: &SourceFile) -> Result<Node<TopLevel>, ParseError> {
  let _span = debug_span!("parse", filename = file.filename.as_str()).entered();
  parse_dts::parse(&file.source).map_err(|err| ParseError {
    filename: file.filename.clone(),
    diagnostics: vec![Diagnostic::from(&err)],
  })
}

#[cfg(test)]
mod tests {
  use super::parse_source;
  use crate::SourceFile;
  use parse_dts::loc::Loc;

  #[test]
  fn returns_program_or_diagnostics() {
    let ok = parse_source(&SourceFile::new("ok.d.ts", "declare var a: string;")).unwrap();
    assert_eq!(ok.stx.body.len(), 1);

    let err = parse_source(&SourceFile::new("bad.d.ts", "declare var a: ;")).unwrap_err();
    assert_eq!(err.filename, "bad.d.ts");
    assert_eq!(err.diagnostics.len(), 1);
    assert_eq!(err.diagnostics[0].code, "PS0002");
    assert_eq!(err.diagnostics[0].loc, Loc(15, 16));
    assert_eq!(err.diagnostics[0].message, "expected type, found Semicolon");
  }
}
