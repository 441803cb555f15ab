use crate::lex::lex_next;
use crate::lex::Lexer;
use crate::token::TT;
use crate::token::TT::*;

fn check<const N: usize>(code: &str, expecteds: [TT; N]) {
  let mut lexer = Lexer::new(code);
  for expected in expecteds {
    let t = lex_next(&mut lexer);
    assert_eq!(t.typ, expected, "lexing {:?}", code);
  }
  let t = lex_next(&mut lexer);
  assert_eq!(EOF, t.typ);
}

#[test]
fn test_lex_keywords() {
  check("declare", [KeywordDeclare]);
  check("interface", [KeywordInterface]);
  check("module namespace", [KeywordModule, KeywordNamespace]);
}

#[test]
fn test_lex_identifiers() {
  check("h929", [Identifier]);
  check("types declared", [Identifier, Identifier]);
  check("$el _priv", [Identifier, Identifier]);
  check("string number", [Identifier, Identifier]);
  check("café", [Identifier]);
}

#[test]
fn test_lex_literal_numbers() {
  check("1", [LiteralNumber]);
  check(".5", [LiteralNumber]);
  check("1.25e-3", [LiteralNumber]);
  check("0xff", [LiteralNumber]);
  check("-1", [Hyphen, LiteralNumber]);
  check("1e", [Invalid]);
}

#[test]
fn test_lex_literal_strings() {
  check("'hello world'", [LiteralString]);
  check(r#""a \" b""#, [LiteralString]);
  check("'hello world\n'", [Invalid, Invalid]);
}

#[test]
fn test_lex_punctuation() {
  check("(...args) => void", [
    ParenthesisOpen,
    DotDotDot,
    Identifier,
    ParenthesisClose,
    EqualsChevronRight,
    Identifier,
  ]);
  check("a?: b[];", [
    Identifier,
    Question,
    Colon,
    Identifier,
    BracketOpen,
    BracketClose,
    Semicolon,
  ]);
}

#[test]
fn test_lex_comments() {
  check("// line\ndeclare", [KeywordDeclare]);
  check("/* block */ var /** doc\n */ x", [KeywordVar, Identifier]);
  check("var /* unterminated", [KeywordVar, Invalid]);
}

#[test]
fn test_line_terminator_tracking() {
  let mut lexer = Lexer::new("a\nb c");
  assert!(!lex_next(&mut lexer).preceded_by_line_terminator);
  assert!(lex_next(&mut lexer).preceded_by_line_terminator);
  assert!(!lex_next(&mut lexer).preceded_by_line_terminator);
}

#[test]
fn test_token_locations() {
  let mut lexer = Lexer::new("  declare var");
  let t = lex_next(&mut lexer);
  assert_eq!((t.loc.0, t.loc.1), (2, 9));
  let t = lex_next(&mut lexer);
  assert_eq!((t.loc.0, t.loc.1), (10, 13));
}
