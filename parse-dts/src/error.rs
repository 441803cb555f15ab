use crate::loc::Loc;
use crate::token::TT;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Formatter;
use std::error::Error;
use std::fmt::Display;

/// A stable classification of syntax errors produced by the parser.
///
/// Diagnostic codes (prefix `PS`) are assigned per variant and are stable. `PS0001` is retired.
/// - `PS0002`: [`SyntaxErrorType::ExpectedSyntax`]
/// - `PS0003`: [`SyntaxErrorType::InvalidCharacterEscape`]
/// - `PS0004`: [`SyntaxErrorType::LineTerminatorInString`]
/// - `PS0005`: [`SyntaxErrorType::MalformedLiteralNumber`]
/// - `PS0006`: [`SyntaxErrorType::RequiredTokenNotFound`]
/// - `PS0007`: [`SyntaxErrorType::UnexpectedEnd`]
/// - `PS0008`: [`SyntaxErrorType::UnterminatedComment`]
/// - `PS0009`: [`SyntaxErrorType::NestingTooDeep`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SyntaxErrorType {
  ExpectedSyntax(&'static str),
  InvalidCharacterEscape,
  LineTerminatorInString,
  MalformedLiteralNumber,
  NestingTooDeep,
  RequiredTokenNotFound(TT),
  UnexpectedEnd,
  UnterminatedComment,
}

#[derive(Clone)]
pub struct SyntaxError {
  pub typ: SyntaxErrorType,
  pub loc: Loc,
  pub actual_token: Option<TT>,
}

impl SyntaxError {
  pub fn new(typ: SyntaxErrorType, loc: Loc, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError {
      typ,
      loc,
      actual_token,
    }
  }

  /// Human-readable message, without location.
  pub fn message(&self) -> String {
    self.typ.message(self.actual_token)
  }
}

impl Debug for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} around loc [{}:{}]", self, self.loc.0, self.loc.1)
  }
}

impl Display for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.typ.code(), self.message())
  }
}

impl Error for SyntaxError {}

impl PartialEq for SyntaxError {
  fn eq(&self, other: &Self) -> bool {
    self.typ == other.typ
  }
}

impl Eq for SyntaxError {}

pub type SyntaxResult<T> = Result<T, SyntaxError>;

impl SyntaxErrorType {
  /// Stable diagnostic code for this syntax error variant.
  pub fn code(&self) -> &'static str {
    match self {
      SyntaxErrorType::ExpectedSyntax(_) => "PS0002",
      SyntaxErrorType::InvalidCharacterEscape => "PS0003",
      SyntaxErrorType::LineTerminatorInString => "PS0004",
      SyntaxErrorType::MalformedLiteralNumber => "PS0005",
      SyntaxErrorType::RequiredTokenNotFound(_) => "PS0006",
      SyntaxErrorType::UnexpectedEnd => "PS0007",
      SyntaxErrorType::UnterminatedComment => "PS0008",
      SyntaxErrorType::NestingTooDeep => "PS0009",
    }
  }

  /// Human-readable message describing this syntax error.
  pub fn message(&self, actual_token: Option<TT>) -> String {
    match self {
      SyntaxErrorType::ExpectedSyntax(expected) => match actual_token {
        Some(tok) => format!("expected {}, found {:?}", expected, tok),
        None => format!("expected {}", expected),
      },
      SyntaxErrorType::InvalidCharacterEscape => "invalid character escape".into(),
      SyntaxErrorType::LineTerminatorInString => {
        "line terminator not allowed in string literal".into()
      }
      SyntaxErrorType::MalformedLiteralNumber => "malformed number literal".into(),
      SyntaxErrorType::NestingTooDeep => "types or blocks nested too deeply".into(),
      SyntaxErrorType::RequiredTokenNotFound(token) => match actual_token {
        Some(tok) => format!("expected token {:?}, found {:?}", token, tok),
        None => format!("expected token {:?}", token),
      },
      SyntaxErrorType::UnexpectedEnd => "unexpected end of input".into(),
      SyntaxErrorType::UnterminatedComment => "unterminated block comment".into(),
    }
  }
}
