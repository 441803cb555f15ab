use crate::pos::LineIndex;
use crate::pos::Range;
use parse_dts::loc::Loc;
use serde::ser::SerializeStruct;
use serde::Serialize;
use serde::Serializer;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// One diagnostic reported by the grammar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
  pub loc: Loc,
  pub code: &'static str,
  pub message: String,
}

/// The grammar rejected the input. No partial AST is kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
  pub filename: String,
  pub diagnostics: Vec<Diagnostic>,
}

impl Display for ParseError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for diagnostic in &self.diagnostics {
      if !first {
        write!(f, "; ")?;
      }
      first = false;
      write!(f, "{}: {}", diagnostic.code, diagnostic.message)?;
    }
    Ok(())
  }
}

impl std::error::Error for ParseError {}

impl ParseError {
  /// The range covering every diagnostic.
  pub fn loc(&self) -> Loc {
    self
      .diagnostics
      .iter()
      .map(|d| d.loc)
      .reduce(|a, b| a + b)
      .unwrap_or_default()
  }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileErrorKind {
  #[error("syntax error: {0}")]
  Parse(#[from] ParseError),

  #[error("module name must be a string literal")]
  ModuleNameMustBeStringLiteral,

  #[error("variable `{0}` must have a type annotation")]
  VarMustHaveType(String),

  /// A function parameter or return type lacks an annotation. The payload describes which one.
  #[error("{0} must have a type annotation")]
  FunctionMustHaveTypes(String),

  #[error("property `{0}` must have a type annotation")]
  MemberMustHaveType(String),

  #[error("type alias `{0}` must start with a lowercase letter")]
  TypeAliasNameMustBeLowercase(String),

  #[error("interface `{0}` must start with an uppercase letter")]
  InterfaceNameMustBeUppercase(String),

  #[error("type parameter `{0}` must start with a lowercase letter")]
  TypeParameterMustBeLowercase(String),

  #[error("unresolved type `{0}`")]
  UnresolvedType(String),

  #[error("type `{name}` expects {expected} type argument(s) but was given {actual}")]
  TypeArityMismatch {
    name: String,
    expected: usize,
    actual: usize,
  },

  #[error("unsupported type: {0}")]
  UnsupportedType(&'static str),

  #[error("unsupported interface member: {0}")]
  UnsupportedMember(&'static str),

  #[error("type alias `{alias}` cannot be used inside interface `{interface}`, whose own type is also `{alias}`")]
  AliasHiddenByInterface { alias: String, interface: String },

  #[error("member `{name}` binds as `{ident}`, like the earlier member `{earlier}`")]
  MemberNameCollision {
    name: String,
    earlier: String,
    ident: String,
  },
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct CompileError {
  pub kind: CompileErrorKind,
  pub loc: Loc,
}

impl CompileError {
  pub fn new(kind: CompileErrorKind, loc: Loc) -> CompileError {
    CompileError { kind, loc }
  }
}

impl From<ParseError> for CompileError {
  fn from(err: ParseError) -> Self {
    let loc = err.loc();
    CompileError::new(CompileErrorKind::Parse(err), loc)
  }
}

pub type CompileResult<T> = Result<T, CompileError>;

pub(crate) trait LocExt {
  fn compile_error(self, kind: CompileErrorKind) -> CompileError;
}

impl LocExt for Loc {
  fn compile_error(self, kind: CompileErrorKind) -> CompileError {
    CompileError::new(kind, self)
  }
}

/// A failed compilation, positioned within the source file.
///
/// Displays as `startLine:startCol:endLine:endCol:message`, with 1-based lines and 0-based columns.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{range}:{kind}")]
pub struct CompileFailure {
  pub filename: String,
  pub range: Range,
  pub kind: CompileErrorKind,
}

impl CompileFailure {
  pub fn from_error(filename: &str, source: &str, err: CompileError) -> CompileFailure {
    CompileFailure {
      filename: filename.to_string(),
      range: LineIndex::new(source).range(err.loc),
      kind: err.kind,
    }
  }

  /// The message without the position prefix.
  pub fn message(&self) -> String {
    self.kind.to_string()
  }
}

impl Serialize for CompileFailure {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut failure = serializer.serialize_struct("CompileFailure", 3)?;
    failure.serialize_field("filename", &self.filename)?;
    failure.serialize_field("range", &self.range)?;
    failure.serialize_field("message", &self.message())?;
    failure.end()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn failure_formats_with_range_prefix() {
    let source = "declare type Foo = string;";
    let err = Loc(13, 16).compile_error(CompileErrorKind::TypeAliasNameMustBeLowercase("Foo".into()));
    let failure = CompileFailure::from_error("a.d.ts", source, err);
    assert_eq!(
      failure.to_string(),
      "1:13:1:16:type alias `Foo` must start with a lowercase letter"
    );
    assert_eq!(
      serde_json::to_value(&failure).unwrap(),
      serde_json::json!({
        "filename": "a.d.ts",
        "range": {
          "start": { "line": 1, "column": 13 },
          "end": { "line": 1, "column": 16 }
        },
        "message": "type alias `Foo` must start with a lowercase letter"
      })
    );
  }

  #[test]
  fn parse_error_lists_every_diagnostic() {
    let err = ParseError {
      filename: "a.d.ts".into(),
      diagnostics: vec![
        Diagnostic {
          loc: Loc(1, 2),
          code: "PS0006",
          message: "expected token Colon".into(),
        },
        Diagnostic {
          loc: Loc(5, 9),
          code: "PS0002",
          message: "expected type".into(),
        },
      ],
    };
    assert_eq!(err.loc(), Loc(1, 9));
    assert_eq!(
      CompileError::from(err).to_string(),
      "syntax error: PS0006: expected token Colon; PS0002: expected type"
    );
  }
}
