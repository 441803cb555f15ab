use super::node::Node;
use super::type_expr::TypeExpr;
use super::type_expr::TypeFunctionParameter;
use super::type_expr::TypeMember;
use super::type_expr::TypeParameter;
use crate::loc::Loc;
use derive_more::derive::From;
use derive_more::derive::TryInto;
use serde::Serialize;

// Every variant is wrapped in Node<T> so each declaration keeps its own location.
#[derive(Debug, From, Serialize, TryInto)]
#[serde(tag = "$t")]
pub enum Stmt {
  DeclareModule(Node<DeclareModule>),
  DeclareVariable(Node<DeclareVariable>),
  DeclareFunction(Node<DeclareFunction>),
  DeclareTypeAlias(Node<DeclareTypeAlias>),
  DeclareInterface(Node<DeclareInterface>),

  // Parsed so that real-world declaration files are accepted, but carry no bindable surface.
  DeclareClass(Node<DeclareClass>),
  DeclareEnum(Node<DeclareEnum>),
  DeclareNamespace(Node<DeclareNamespace>),
  DeclareGlobal(Node<DeclareGlobal>),
  Empty(Node<EmptyStmt>),
  ExportAsNamespace(Node<ExportAsNamespaceStmt>),
  ExportAssignment(Node<ExportAssignmentStmt>),
  ExportList(Node<ExportListStmt>),
  Import(Node<ImportStmt>),
}

/// How a declaration is exported from its enclosing module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Export {
  None,
  Named,
  Default,
}

/// Module declaration: declare module "foo" { }
#[derive(Debug, Serialize)]
pub struct DeclareModule {
  #[serde(skip_serializing)]
  pub name_loc: Loc,
  pub name: ModuleName,
  // `declare module "foo";` shorthand has no body.
  pub body: Option<Vec<Node<Stmt>>>,
}

/// Module name - either identifier or string literal
#[derive(Debug, Serialize)]
#[serde(tag = "$t", content = "v")]
pub enum ModuleName {
  Identifier(String),
  String(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum VarDeclMode {
  Const,
  Let,
  Var,
}

/// Ambient variable declaration: declare var foo: Type
#[derive(Debug, Serialize)]
pub struct DeclareVariable {
  pub export: Export,
  pub mode: VarDeclMode,
  #[serde(skip_serializing)]
  pub name_loc: Loc,
  pub name: String,
  pub type_annotation: Option<Node<TypeExpr>>,
}

/// Ambient function declaration: declare function foo<t>(x: t): void
#[derive(Debug, Serialize)]
pub struct DeclareFunction {
  pub export: Export,
  #[serde(skip_serializing)]
  pub name_loc: Loc,
  pub name: String,
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub parameters: Vec<Node<TypeFunctionParameter>>,
  pub return_type: Option<Node<TypeExpr>>,
}

/// Type alias declaration: declare type foo<t> = bar<t>
#[derive(Debug, Serialize)]
pub struct DeclareTypeAlias {
  pub export: Export,
  #[serde(skip_serializing)]
  pub name_loc: Loc,
  pub name: String,
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub type_expr: Node<TypeExpr>,
}

/// Interface declaration: declare interface Foo<t> extends Bar { }
#[derive(Debug, Serialize)]
pub struct DeclareInterface {
  pub export: Export,
  #[serde(skip_serializing)]
  pub name_loc: Loc,
  pub name: String,
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub extends: Vec<Node<TypeExpr>>,
  pub members: Vec<Node<TypeMember>>,
}

/// Class declaration: declare class Foo<T> extends Bar implements Baz { }
#[derive(Debug, Serialize)]
pub struct DeclareClass {
  pub export: Export,
  pub abstract_: bool,
  pub name: String,
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub extends: Option<Node<TypeExpr>>,
  pub implements: Vec<Node<TypeExpr>>,
  pub members: Vec<Node<TypeMember>>,
}

/// Enum declaration: declare const enum Color { Red, Green = "green" }
#[derive(Debug, Serialize)]
pub struct DeclareEnum {
  pub export: Export,
  pub const_: bool,
  pub name: String,
  pub members: Vec<Node<EnumMember>>,
}

#[derive(Debug, Serialize)]
pub struct EnumMember {
  pub name: String,
  pub initializer: Option<EnumInitializer>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "$t", content = "v")]
pub enum EnumInitializer {
  Number(String),
  String(String),
}

/// Namespace declaration: declare namespace Foo.Bar { }
#[derive(Debug, Serialize)]
pub struct DeclareNamespace {
  pub export: Export,
  // Dotted paths are kept joined, e.g. `Foo.Bar`.
  pub name: String,
  pub body: Vec<Node<Stmt>>,
}

/// Global augmentation: declare global { }
#[derive(Debug, Serialize)]
pub struct DeclareGlobal {
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug, Serialize)]
pub struct EmptyStmt {}

/// export as namespace Foo;
#[derive(Debug, Serialize)]
pub struct ExportAsNamespaceStmt {
  pub name: String,
}

/// export = Foo;
#[derive(Debug, Serialize)]
pub struct ExportAssignmentStmt {
  pub name: String,
}

/// export { a, b as c } from "mod";
#[derive(Debug, Serialize)]
pub struct ExportListStmt {
  pub type_only: bool,
  pub names: Vec<Node<ModuleExportImportName>>,
  pub from: Option<String>,
}

/// import x, { a, b as c } from "mod"; import * as ns from "mod"; import "mod";
#[derive(Debug, Serialize)]
pub struct ImportStmt {
  pub type_only: bool,
  pub default: Option<String>,
  pub namespace: Option<String>,
  pub names: Vec<Node<ModuleExportImportName>>,
  pub module: String,
}

/// One entry of an import or export list: `target` or `target as alias`.
#[derive(Debug, Serialize)]
pub struct ModuleExportImportName {
  pub target: String,
  pub alias: Option<String>,
}
