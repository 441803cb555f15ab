use super::parse_ok;
use super::single_stmt;
use crate::ast::stmt::*;
use crate::ast::type_expr::TypeExpr;
use crate::ast::type_expr::TypeMember;
use crate::error::SyntaxErrorType;
use crate::loc::Loc;
use crate::token::TT;

#[test]
fn parses_module_with_string_name() {
  let Stmt::DeclareModule(module) = single_stmt(r#"declare module "fetch" { declare var x: number; }"#) else {
    panic!("expected module");
  };
  assert!(matches!(&module.stx.name, ModuleName::String(name) if name == "fetch"));
  assert_eq!(module.stx.name_loc, Loc(15, 22));
  assert_eq!(module.stx.body.as_ref().map(|b| b.len()), Some(1));
}

#[test]
fn parses_module_with_identifier_name_and_shorthand() {
  let Stmt::DeclareModule(module) = single_stmt("declare module Foo.Bar { }") else {
    panic!("expected module");
  };
  assert!(matches!(&module.stx.name, ModuleName::Identifier(name) if name == "Foo.Bar"));
  assert_eq!(module.stx.name_loc, Loc(15, 22));

  let Stmt::DeclareModule(module) = single_stmt(r#"declare module "untyped";"#) else {
    panic!("expected module");
  };
  assert!(module.stx.body.is_none());
}

#[test]
fn declare_keyword_is_optional() {
  let top = parse_ok("var a: string\nfunction f(): void\ninterface I {}\ntype t = string");
  let kinds: Vec<_> = top
    .stx
    .body
    .iter()
    .map(|s| match s.stx.as_ref() {
      Stmt::DeclareVariable(_) => "var",
      Stmt::DeclareFunction(_) => "function",
      Stmt::DeclareInterface(_) => "interface",
      Stmt::DeclareTypeAlias(_) => "type",
      other => panic!("unexpected {other:?}"),
    })
    .collect();
  assert_eq!(kinds, vec!["var", "function", "interface", "type"]);
}

#[test]
fn parses_variable_modes_and_exports() {
  let Stmt::DeclareVariable(var) = single_stmt("export declare const version: string;") else {
    panic!("expected variable");
  };
  assert_eq!(var.stx.export, Export::Named);
  assert_eq!(var.stx.mode, VarDeclMode::Const);
  assert_eq!(var.stx.name, "version");
  assert!(var.stx.type_annotation.is_some());

  let Stmt::DeclareVariable(var) = single_stmt("declare let untyped;") else {
    panic!("expected variable");
  };
  assert_eq!(var.stx.export, Export::None);
  assert!(var.stx.type_annotation.is_none());
}

#[test]
fn parses_function_declaration() {
  let Stmt::DeclareFunction(func) =
    single_stmt("export default function map<a, b>(xs: a[], f: (x: a) => b, ...rest): b[];")
  else {
    panic!("expected function");
  };
  assert_eq!(func.stx.export, Export::Default);
  assert_eq!(func.stx.name, "map");
  let params: Vec<_> = func
    .stx
    .type_parameters
    .as_ref()
    .unwrap()
    .iter()
    .map(|p| p.stx.name.as_str())
    .collect();
  assert_eq!(params, vec!["a", "b"]);
  assert_eq!(func.stx.parameters.len(), 3);
  assert!(func.stx.parameters[2].stx.rest);
  assert!(func.stx.parameters[2].stx.type_expr.is_none());
  assert!(matches!(
    func.stx.return_type.as_ref().map(|t| t.stx.as_ref()),
    Some(TypeExpr::Array(_))
  ));
}

#[test]
fn parses_type_alias_with_parameters() {
  let Stmt::DeclareTypeAlias(alias) = single_stmt("type pair<a> = [a, a];") else {
    panic!("expected type alias");
  };
  assert_eq!(alias.stx.name, "pair");
  assert_eq!(alias.stx.name_loc, Loc(5, 9));
  assert_eq!(alias.stx.type_parameters.as_ref().map(|p| p.len()), Some(1));
  assert!(matches!(alias.stx.type_expr.stx.as_ref(), TypeExpr::Tuple(t) if t.elements.len() == 2));
}

#[test]
fn parses_interface_members() {
  let Stmt::DeclareInterface(iface) = single_stmt(
    "declare interface Options<t> extends Base {
      readonly mode: string;
      body?: t,
      readonly: boolean
      send(data: t): void;
      (x: number): string;
      new (x: number): Options<t>;
      [key: string]: t;
      \"quoted-key\": number;
    }",
  ) else {
    panic!("expected interface");
  };
  assert_eq!(iface.stx.name, "Options");
  assert_eq!(iface.stx.extends.len(), 1);
  let members: Vec<_> = iface.stx.members.iter().map(|m| m.stx.as_ref()).collect();
  assert_eq!(members.len(), 8);
  assert!(matches!(members[0], TypeMember::Property(p) if p.readonly && p.key == "mode"));
  assert!(matches!(members[1], TypeMember::Property(p) if p.optional && p.key == "body"));
  assert!(matches!(members[2], TypeMember::Property(p) if !p.readonly && p.key == "readonly"));
  assert!(matches!(members[3], TypeMember::Method(m) if m.key == "send"));
  assert!(matches!(members[4], TypeMember::Call(_)));
  assert!(matches!(members[5], TypeMember::Construct(_)));
  assert!(matches!(members[6], TypeMember::Index(i) if i.parameter_name == "key"));
  assert!(matches!(members[7], TypeMember::Property(p) if p.key == "quoted-key"));
}

#[test]
fn parses_other_statement_kinds() {
  let top = parse_ok(
    r#"
    import { a, b as c } from "dep";
    import * as ns from "dep";
    import def from "dep";
    import "side-effect";
    declare class Client<T> extends Base implements Closeable {
      private constructor(url: string);
      static readonly version: string;
      send(x: T): void;
    }
    declare const enum Color { Red, Green = "green", Blue = -1 }
    declare namespace Foo.Bar { var x: number; }
    declare global { interface Window {} }
    export { a, c as d };
    export as namespace Lib;
    export = Client;
    ;
    "#,
  );
  let kinds: Vec<_> = top
    .stx
    .body
    .iter()
    .map(|s| match s.stx.as_ref() {
      Stmt::Import(_) => "import",
      Stmt::DeclareClass(_) => "class",
      Stmt::DeclareEnum(_) => "enum",
      Stmt::DeclareNamespace(_) => "namespace",
      Stmt::DeclareGlobal(_) => "global",
      Stmt::ExportList(_) => "export list",
      Stmt::ExportAsNamespace(_) => "export as namespace",
      Stmt::ExportAssignment(_) => "export assignment",
      Stmt::Empty(_) => "empty",
      other => panic!("unexpected {other:?}"),
    })
    .collect();
  assert_eq!(
    kinds,
    vec![
      "import",
      "import",
      "import",
      "import",
      "class",
      "enum",
      "namespace",
      "global",
      "export list",
      "export as namespace",
      "export assignment",
      "empty",
    ]
  );

  let Stmt::DeclareClass(class) = top.stx.body[4].stx.as_ref() else {
    unreachable!();
  };
  assert_eq!(class.stx.members.len(), 3);
  assert!(matches!(class.stx.members[1].stx.as_ref(), TypeMember::Property(p) if p.readonly && p.key == "version"));

  let Stmt::DeclareEnum(enum_) = top.stx.body[5].stx.as_ref() else {
    unreachable!();
  };
  assert!(enum_.stx.const_);
  assert!(matches!(&enum_.stx.members[2].stx.initializer, Some(EnumInitializer::Number(n)) if n == "-1"));
}

#[test]
fn inserts_semicolons_at_line_breaks_only() {
  assert_eq!(parse_ok("declare var a: string\ndeclare var b: string").stx.body.len(), 2);
  let err = crate::parse("declare var a: string declare var b: string").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::RequiredTokenNotFound(TT::Semicolon));
  assert_eq!(err.loc, Loc(22, 29));
}

#[test]
fn reports_missing_closing_brace() {
  let err = crate::parse(r#"declare module "m" { declare var x: number;"#).unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ExpectedSyntax("declaration"));
  assert_eq!(err.actual_token, Some(TT::EOF));
}

#[test]
fn reports_lexical_errors() {
  let err = crate::parse("declare var a: \"unterminated\n").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::LineTerminatorInString);
  let err = crate::parse("declare var a: string; /* open").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnterminatedComment);
  let err = crate::parse(r#"declare var a: "\1";"#).unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidCharacterEscape);
}

#[test]
fn limits_block_nesting_depth() {
  let nested = |n: usize| format!("{}{}", "namespace a { ".repeat(n), "}".repeat(n));
  assert_eq!(parse_ok(&nested(20)).stx.body.len(), 1);
  let err = crate::parse(&nested(100_000)).unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::NestingTooDeep);
}
