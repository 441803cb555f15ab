mod stmt;
mod type_expr;

use super::Parser;
use crate::ast::node::Node;
use crate::ast::stmt::Stmt;
use crate::ast::stx::TopLevel;
use crate::lex::Lexer;
use crate::loc::Loc;
use crate::token::TT;

pub(super) fn parse_ok(source: &str) -> Node<TopLevel> {
  crate::parse(source).unwrap_or_else(|err| panic!("failed to parse {source:?}: {err:?}"))
}

pub(super) fn single_stmt(source: &str) -> Stmt {
  let mut top = *parse_ok(source).stx;
  assert_eq!(top.body.len(), 1, "expected one statement in {source:?}");
  *top.body.remove(0).stx
}

#[test]
fn test_parser() {
  let lexer = Lexer::new("declare var x: string;");
  let mut p = Parser::new(lexer);
  // Initial state.
  let cp = p.checkpoint();
  assert_eq!(p.next_tok_i, 0);

  // Peek the first token.
  let t = p.peek();
  assert_eq!(p.next_tok_i, 0);
  assert_eq!(p.buf.len(), 1);
  assert_eq!(t.typ, TT::KeywordDeclare);

  // Consume the first token.
  let t = p.consume();
  assert_eq!(p.next_tok_i, 1);
  assert_eq!(p.buf.len(), 1);
  assert_eq!(t.typ, TT::KeywordDeclare);

  // Consume the second token.
  let t = p.consume();
  assert_eq!(p.next_tok_i, 2);
  assert_eq!(p.buf.len(), 2);
  assert_eq!(t.typ, TT::KeywordVar);
  assert_eq!(p.since_checkpoint(&cp), Loc(0, 11));

  // Reset to a past point; the buffer is kept.
  p.restore_checkpoint(cp);
  assert_eq!(p.next_tok_i, 0);
  assert_eq!(p.buf.len(), 2);
  assert_eq!(p.peek_3().2.typ, TT::Identifier);
  assert_eq!(p.next_tok_i, 0);
}

#[test]
fn eof_is_sticky() {
  let mut p = Parser::new(Lexer::new(""));
  assert_eq!(p.consume().typ, TT::EOF);
  assert_eq!(p.consume().typ, TT::EOF);
  assert_eq!(p.next_tok_i, 0);
}

#[test]
fn statement_locations_cover_their_source() {
  let source = "declare var a: string;\ndeclare function f(): void;";
  let top = parse_ok(source);
  let locs: Vec<Loc> = top.stx.body.iter().map(|s| s.loc).collect();
  assert_eq!(locs, vec![Loc(0, 22), Loc(23, 50)]);
  assert_eq!(&source[locs[1].0..locs[1].1], "declare function f(): void;");
}

#[test]
fn serializes_tagged_statements() {
  let top = parse_ok("declare var a: string;");
  let json = serde_json::to_value(&*top.stx).unwrap();
  assert_eq!(json["body"][0]["$t"], "DeclareVariable");
  assert_eq!(json["body"][0]["name"], "a");
  assert_eq!(json["body"][0]["type_annotation"]["$t"], "Reference");
}
