use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::lex_next;
use crate::lex::Lexer;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;

pub mod drive;
pub mod lit;
pub mod stmt;
#[cfg(test)]
mod tests;
pub mod type_expr;

#[derive(Debug)]
#[must_use]
pub struct MaybeToken {
  typ: TT,
  loc: Loc,
  matched: bool,
}

impl MaybeToken {
  pub fn is_match(&self) -> bool {
    self.matched
  }

  pub fn error(&self, err: SyntaxErrorType) -> SyntaxError {
    debug_assert!(!self.matched);
    self.loc.error(err, Some(self.typ))
  }
}

#[derive(Clone, Copy)]
pub struct ParserCheckpoint {
  next_tok_i: usize,
}

/// How many types or statement blocks may enclose one another before parsing fails.
pub const MAX_NESTING_DEPTH: usize = 100;

pub struct Parser<'a> {
  lexer: Lexer<'a>,
  buf: Vec<Token>,
  next_tok_i: usize,
  depth: usize,
}

// We extend this struct with added methods in the various submodules, instead of simply using free functions and passing `&mut Parser` around, so that `self.*` narrows autocomplete and no function needs importing.
impl<'a> Parser<'a> {
  pub fn new(lexer: Lexer<'a>) -> Parser<'a> {
    Parser {
      lexer,
      buf: Vec::new(),
      next_tok_i: 0,
      depth: 0,
    }
  }

  pub fn source_range(&self) -> Loc {
    self.lexer.source_range()
  }

  pub fn str(&self, loc: Loc) -> &str {
    &self.lexer[loc]
  }

  pub fn string(&self, loc: Loc) -> String {
    self.str(loc).to_string()
  }

  pub fn checkpoint(&self) -> ParserCheckpoint {
    ParserCheckpoint {
      next_tok_i: self.next_tok_i,
    }
  }

  /// The range from the first token consumed after `checkpoint` to the last token consumed so far.
  pub fn since_checkpoint(&self, checkpoint: &ParserCheckpoint) -> Loc {
    let start = match self.buf.get(checkpoint.next_tok_i) {
      Some(t) => t.loc.0,
      None => self.lexer.next(),
    };
    let end = if self.next_tok_i > checkpoint.next_tok_i {
      self.buf[self.next_tok_i - 1].loc.1
    } else {
      start
    };
    Loc(start, end)
  }

  pub fn restore_checkpoint(&mut self, checkpoint: ParserCheckpoint) {
    self.next_tok_i = checkpoint.next_tok_i;
  }

  fn forward<K: FnOnce(&Token) -> bool>(&mut self, keep: K) -> (bool, Token) {
    if self.buf.len() == self.next_tok_i {
      let token = lex_next(&mut self.lexer);
      self.buf.push(token);
    }
    let t = self.buf[self.next_tok_i].clone();
    let k = keep(&t);
    // EOF is sticky: consuming it never moves past the end of the buffer.
    if k && t.typ != TT::EOF {
      self.next_tok_i += 1;
    };
    (k, t)
  }

  pub fn consume(&mut self) -> Token {
    self.forward(|_| true).1
  }

  pub fn peek(&mut self) -> Token {
    self.forward(|_| false).1
  }

  pub fn peek_2(&mut self) -> (Token, Token) {
    let cp = self.checkpoint();
    let a = self.consume();
    let b = self.consume();
    self.restore_checkpoint(cp);
    (a, b)
  }

  pub fn peek_3(&mut self) -> (Token, Token, Token) {
    let cp = self.checkpoint();
    let a = self.consume();
    let b = self.consume();
    let c = self.consume();
    self.restore_checkpoint(cp);
    (a, b, c)
  }

  pub fn peek_4(&mut self) -> (Token, Token, Token, Token) {
    let cp = self.checkpoint();
    let a = self.consume();
    let b = self.consume();
    let c = self.consume();
    let d = self.consume();
    self.restore_checkpoint(cp);
    (a, b, c, d)
  }

  pub fn consume_if(&mut self, typ: TT) -> MaybeToken {
    let (matched, t) = self.forward(|t| t.typ == typ);
    MaybeToken {
      typ,
      matched,
      loc: t.loc,
    }
  }

  /// Builds an error for an unexpected token, replacing the generic error with a lexical one when the lexer gave up on this token.
  pub fn token_error(&self, t: &Token, typ: SyntaxErrorType) -> SyntaxError {
    if t.typ != TT::Invalid {
      return t.error(typ);
    };
    let raw = self.str(t.loc);
    let lexical = if raw.starts_with("/*") {
      SyntaxErrorType::UnterminatedComment
    } else if raw.starts_with(['"', '\'']) {
      if self.lexer_source_byte(t.loc.1) == Some(b'\n') {
        SyntaxErrorType::LineTerminatorInString
      } else {
        SyntaxErrorType::UnexpectedEnd
      }
    } else if raw.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
      SyntaxErrorType::MalformedLiteralNumber
    } else {
      typ
    };
    t.error(lexical)
  }

  fn lexer_source_byte(&self, offset: usize) -> Option<u8> {
    let range = self.source_range();
    if offset >= range.1 {
      return None;
    };
    self.str(Loc(offset, range.1)).as_bytes().first().copied()
  }

  pub fn require(&mut self, typ: TT) -> SyntaxResult<Token> {
    let t = self.consume();
    if t.typ != typ {
      Err(self.token_error(&t, SyntaxErrorType::RequiredTokenNotFound(typ)))
    } else {
      Ok(t)
    }
  }

  pub fn require_predicate<P: FnOnce(TT) -> bool>(
    &mut self,
    pred: P,
    expected: &'static str,
  ) -> SyntaxResult<Token> {
    let t = self.consume();
    if !pred(t.typ) {
      Err(self.token_error(&t, SyntaxErrorType::ExpectedSyntax(expected)))
    } else {
      Ok(t)
    }
  }

  /// Requires an identifier, allowing contextual keywords like `type` or `module`.
  pub fn require_identifier(&mut self) -> SyntaxResult<String> {
    let t = self.require_predicate(|tt| tt.is_identifier_like(), "identifier")?;
    Ok(self.string(t.loc))
  }

  /// Like [`Parser::require_identifier`] but also returns the identifier's location.
  pub fn require_identifier_with_loc(&mut self) -> SyntaxResult<(Loc, String)> {
    let t = self.require_predicate(|tt| tt.is_identifier_like(), "identifier")?;
    Ok((t.loc, self.string(t.loc)))
  }

  /// Ends a statement: either an explicit semicolon, or an automatically inserted one before a line break, `}` or the end of input.
  pub fn require_stmt_end(&mut self) -> SyntaxResult<()> {
    if self.consume_if(TT::Semicolon).is_match() {
      return Ok(());
    };
    let t = self.peek();
    if t.preceded_by_line_terminator || matches!(t.typ, TT::BraceClose | TT::EOF) {
      return Ok(());
    };
    Err(self.token_error(&t, SyntaxErrorType::RequiredTokenNotFound(TT::Semicolon)))
  }
}
