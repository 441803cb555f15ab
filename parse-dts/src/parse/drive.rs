use super::Parser;
use super::MAX_NESTING_DEPTH;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn with_loc<S, F>(&mut self, f: F) -> SyntaxResult<Node<S>>
  where
    F: FnOnce(&mut Self) -> SyntaxResult<S>,
  {
    let start = self.checkpoint();
    let stx = f(self)?;
    Ok(Node::new(self.since_checkpoint(&start), stx))
  }

  /// Runs `f` one nesting level deeper. Fails at the next token once [`MAX_NESTING_DEPTH`] levels are open.
  pub fn nested<S, F>(&mut self, f: F) -> SyntaxResult<S>
  where
    F: FnOnce(&mut Self) -> SyntaxResult<S>,
  {
    if self.depth >= MAX_NESTING_DEPTH {
      return Err(self.peek().error(SyntaxErrorType::NestingTooDeep));
    };
    self.depth += 1;
    let res = f(self);
    self.depth -= 1;
    res
  }

  pub fn repeat_while<S, F, W>(&mut self, w: W, f: F) -> SyntaxResult<Vec<S>>
  where
    F: Fn(&mut Self) -> SyntaxResult<S>,
    W: Fn(&mut Self) -> bool,
  {
    let mut nodes = Vec::new();
    while w(self) {
      nodes.push(f(self)?);
    }
    Ok(nodes)
  }

  /// Parses a `delim`-separated list up to and including `close`. The opening token must already be consumed.
  pub fn list_with_loc<S, F>(&mut self, delim: TT, close: TT, f: F) -> SyntaxResult<Vec<Node<S>>>
  where
    F: Fn(&mut Self) -> SyntaxResult<S>,
  {
    let mut nodes = Vec::new();
    while !self.consume_if(close).is_match() {
      nodes.push(self.with_loc(&f)?);
      // We require either the delimiter or the close token.
      // If the delimiter exists, it can still immediately be followed by the close token (trailing delimiter).
      if !self.consume_if(delim).is_match() {
        self.require(close)?;
        break;
      }
    }
    Ok(nodes)
  }
}
