use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::loc::Loc;
use ahash::HashSet;
use ahash::HashSetExt;
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub enum TT {
  // Special token used to represent the end of the source code. Easier than using and handling Option everywhere.
  EOF,
  // Special token used to represent invalid source code. Easier than having to propagate SyntaxError from the lexer level, which means even peeking during parsing requires error handling.
  Invalid,
  // These are only used by lexer.
  CommentMultilineEnd,
  LineTerminator,
  Whitespace,

  Ampersand,
  Asterisk,
  Bar,
  BraceClose,
  BraceOpen,
  BracketClose,
  BracketOpen,
  ChevronLeft,
  ChevronRight,
  Colon,
  Comma,
  CommentMultiline,
  CommentSingle,
  Dot,
  DotDotDot,
  Equals,
  EqualsChevronRight,
  Hyphen,
  Identifier,
  KeywordAbstract,
  KeywordAs,
  KeywordClass,
  KeywordConst,
  KeywordDeclare,
  KeywordDefault,
  KeywordEnum,
  KeywordExport,
  KeywordExtends,
  KeywordFrom,
  KeywordFunction,
  KeywordGlobal,
  KeywordImplements,
  KeywordImport,
  KeywordInterface,
  KeywordKeyof,
  KeywordLet,
  KeywordModule,
  KeywordNamespace,
  KeywordNew,
  KeywordReadonly,
  KeywordThis,
  KeywordType,
  KeywordTypeof,
  KeywordVar,
  LiteralFalse,
  LiteralNumber,
  LiteralString,
  LiteralTrue,
  ParenthesisClose,
  ParenthesisOpen,
  Question,
  Semicolon,
}

// These can be used as type, variable and parameter names.
pub static UNRESERVED_KEYWORDS: Lazy<HashSet<TT>> = Lazy::new(|| {
  let mut set = HashSet::<TT>::new();
  set.insert(TT::KeywordAbstract);
  set.insert(TT::KeywordAs);
  set.insert(TT::KeywordDeclare);
  set.insert(TT::KeywordFrom);
  set.insert(TT::KeywordGlobal);
  set.insert(TT::KeywordImplements);
  set.insert(TT::KeywordInterface);
  set.insert(TT::KeywordKeyof);
  set.insert(TT::KeywordLet);
  set.insert(TT::KeywordModule);
  set.insert(TT::KeywordNamespace);
  set.insert(TT::KeywordReadonly);
  set.insert(TT::KeywordType);
  set
});

#[derive(Clone, Debug)]
pub struct Token {
  pub loc: Loc,
  // Whether one or more whitespace characters appear immediately before this token, and at least
  // one of those whitespace characters is a line terminator.
  pub preceded_by_line_terminator: bool,
  pub typ: TT,
}

impl Token {
  pub fn error(&self, typ: SyntaxErrorType) -> SyntaxError {
    self.loc.error(typ, Some(self.typ))
  }
}

impl TT {
  pub fn is_keyword(self) -> bool {
    crate::lex::KEYWORDS_MAPPING.contains_key(&self)
  }

  /// Whether this token can name a declaration, parameter or type.
  pub fn is_identifier_like(self) -> bool {
    self == TT::Identifier || UNRESERVED_KEYWORDS.contains(&self)
  }
}
