use crate::ast::node::Node;
use crate::ast::type_expr::*;
use crate::error::SyntaxErrorType;
use crate::lex::Lexer;
use crate::loc::Loc;
use crate::parse::Parser;
use crate::token::TT;

fn parse_type(source: &str) -> Node<TypeExpr> {
  let mut parser = Parser::new(Lexer::new(source));
  let ty = parser
    .type_expr()
    .unwrap_or_else(|err| panic!("failed to parse {source:?}: {err:?}"));
  assert_eq!(parser.peek().typ, TT::EOF, "trailing input in {source:?}");
  ty
}

fn reference_name(ty: &TypeExpr) -> String {
  match ty {
    TypeExpr::Reference(r) => r.name.dotted(),
    other => panic!("expected reference, got {other:?}"),
  }
}

#[test]
fn parses_references_with_arguments() {
  let ty = parse_type("Map<string, Array<number>>");
  let TypeExpr::Reference(r) = ty.stx.as_ref() else {
    panic!("expected reference");
  };
  assert_eq!(r.name.dotted(), "Map");
  let args = r.type_arguments.as_ref().unwrap();
  assert_eq!(args.len(), 2);
  assert_eq!(reference_name(&args[1].stx), "Array");
  assert_eq!(ty.loc, Loc(0, 26));
}

#[test]
fn parses_qualified_names() {
  let ty = parse_type("NodeJS.ReadableStream");
  assert_eq!(reference_name(&ty.stx), "NodeJS.ReadableStream");
}

#[test]
fn parses_function_types() {
  let ty = parse_type("<t>(x: t, y?: number, ...rest: string[]) => t");
  let TypeExpr::Function(f) = ty.stx.as_ref() else {
    panic!("expected function");
  };
  assert_eq!(f.type_parameters.as_ref().map(|p| p.len()), Some(1));
  let params: Vec<_> = f
    .parameters
    .iter()
    .map(|p| (p.stx.name.as_str(), p.stx.optional, p.stx.rest))
    .collect();
  assert_eq!(params, vec![("x", false, false), ("y", true, false), ("rest", false, true)]);
  assert_eq!(reference_name(&f.return_type.stx), "t");

  assert!(matches!(parse_type("() => void").stx.as_ref(), TypeExpr::Function(f) if f.parameters.is_empty()));
  assert!(matches!(parse_type("(a) => void").stx.as_ref(), TypeExpr::Function(_)));
  assert!(matches!(parse_type("new (a: string) => Foo").stx.as_ref(), TypeExpr::Constructor(_)));
}

#[test]
fn distinguishes_parenthesized_types() {
  let ty = parse_type("(string | number)[]");
  let TypeExpr::Array(array) = ty.stx.as_ref() else {
    panic!("expected array");
  };
  let TypeExpr::Parenthesized(inner) = array.element_type.stx.as_ref() else {
    panic!("expected parenthesized");
  };
  assert!(matches!(inner.type_expr.stx.as_ref(), TypeExpr::Union(u) if u.types.len() == 2));
}

#[test]
fn unions_bind_looser_than_intersections() {
  let ty = parse_type("| a & b | c");
  let TypeExpr::Union(union) = ty.stx.as_ref() else {
    panic!("expected union");
  };
  assert_eq!(union.types.len(), 2);
  assert!(matches!(union.types[0].stx.as_ref(), TypeExpr::Intersection(i) if i.types.len() == 2));
  assert_eq!(ty.loc, Loc(0, 11));
}

#[test]
fn parses_postfix_and_prefix_operators() {
  let ty = parse_type("readonly string[][]");
  let TypeExpr::Array(outer) = ty.stx.as_ref() else {
    panic!("expected array");
  };
  assert!(outer.readonly);
  assert!(matches!(outer.element_type.stx.as_ref(), TypeExpr::Array(inner) if !inner.readonly));

  assert!(matches!(parse_type("Foo[\"bar\"]").stx.as_ref(), TypeExpr::IndexedAccess(_)));
  assert!(matches!(parse_type("keyof Foo").stx.as_ref(), TypeExpr::KeyOf(_)));
  assert!(matches!(parse_type("typeof foo.bar").stx.as_ref(), TypeExpr::Query(q) if q.expr_name.dotted() == "foo.bar"));
  assert!(matches!(parse_type("this").stx.as_ref(), TypeExpr::This));

  let mut parser = Parser::new(Lexer::new("readonly Foo"));
  let err = parser.type_expr().unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ExpectedSyntax("array or tuple type after readonly"));
}

#[test]
fn parses_literal_types() {
  let literals: Vec<_> = ["\"a\\tb\"", "42", "-1.5", "true", "false"]
    .iter()
    .map(|s| match *parse_type(s).stx {
      TypeExpr::Literal(l) => l,
      other => panic!("expected literal, got {other:?}"),
    })
    .collect();
  assert!(matches!(&literals[0], TypeLiteral::String(s) if s == "a\tb"));
  assert!(matches!(&literals[1], TypeLiteral::Number(n) if n == "42"));
  assert!(matches!(&literals[2], TypeLiteral::Number(n) if n == "-1.5"));
  assert!(matches!(&literals[3], TypeLiteral::Boolean(true)));
  assert!(matches!(&literals[4], TypeLiteral::Boolean(false)));
}

#[test]
fn parses_object_and_tuple_types() {
  let ty = parse_type("{ a: string, b?(): void; [Symbol.iterator](): Foo }");
  let TypeExpr::Object(obj) = ty.stx.as_ref() else {
    panic!("expected object");
  };
  let keys: Vec<_> = obj
    .members
    .iter()
    .map(|m| match m.stx.as_ref() {
      TypeMember::Property(p) => p.key.clone(),
      TypeMember::Method(m) => m.key.clone(),
      other => panic!("unexpected member {other:?}"),
    })
    .collect();
  assert_eq!(keys, vec!["a", "b", "[Symbol.iterator]"]);

  assert!(matches!(parse_type("[]").stx.as_ref(), TypeExpr::Tuple(t) if t.elements.is_empty()));
  assert!(matches!(parse_type("[a, b,]").stx.as_ref(), TypeExpr::Tuple(t) if t.elements.len() == 2));
}

#[test]
fn rejects_missing_type() {
  let mut parser = Parser::new(Lexer::new(": string"));
  let err = parser.type_expr().unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ExpectedSyntax("type"));
  assert_eq!(err.actual_token, Some(TT::Colon));
}

#[test]
fn limits_nesting_depth() {
  let nested = |n: usize| format!("{}string{}", "(".repeat(n), ")".repeat(n));
  assert!(matches!(
    parse_type(&nested(50)).stx.as_ref(),
    TypeExpr::Parenthesized(_)
  ));

  let source = nested(100_000);
  let mut parser = Parser::new(Lexer::new(&source));
  let err = parser.type_expr().unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::NestingTooDeep);
  assert_eq!(err.loc, Loc(100, 101));

  let source = "keyof ".repeat(100_000);
  let mut parser = Parser::new(Lexer::new(&source));
  assert_eq!(parser.type_expr().unwrap_err().typ, SyntaxErrorType::NestingTooDeep);
}
