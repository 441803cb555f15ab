use super::node::Node;
use serde::Serialize;

/// Type expressions accepted in ambient declarations.
#[derive(Debug, Serialize)]
#[serde(tag = "$t")]
pub enum TypeExpr {
  Reference(TypeReference),
  Literal(TypeLiteral),
  Array(TypeArray),
  Tuple(TypeTuple),
  Union(TypeUnion),
  Intersection(TypeIntersection),
  Function(TypeFunction),
  Constructor(TypeFunction),
  Object(TypeObjectLiteral),
  Parenthesized(TypeParenthesized),
  IndexedAccess(TypeIndexedAccess),
  Query(TypeQuery),
  KeyOf(TypeKeyOf),
  This,
}

/// Type reference: Foo, Foo<t>, A.B.C<t, u>
#[derive(Debug, Serialize)]
pub struct TypeReference {
  pub name: TypeEntityName,
  pub type_arguments: Option<Vec<Node<TypeExpr>>>,
}

/// Entity name in type reference (can be qualified)
#[derive(Debug, Serialize)]
#[serde(tag = "$t", content = "v")]
pub enum TypeEntityName {
  Identifier(String),
  Qualified(Box<TypeQualifiedName>),
}

impl TypeEntityName {
  /// The dotted form of this name, e.g. `A.B.C`.
  pub fn dotted(&self) -> String {
    match self {
      TypeEntityName::Identifier(name) => name.clone(),
      TypeEntityName::Qualified(q) => format!("{}.{}", q.left.dotted(), q.right),
    }
  }
}

/// Qualified name: A.B.C
#[derive(Debug, Serialize)]
pub struct TypeQualifiedName {
  pub left: TypeEntityName,
  pub right: String,
}

/// Literal type: "foo", 42, -1, true
#[derive(Debug, Serialize)]
// Serialized inside the tagged `TypeExpr`, so it must not reuse `$t`.
#[serde(tag = "kind", content = "value")]
pub enum TypeLiteral {
  String(String),
  // Raw source text, including any leading minus sign.
  Number(String),
  Boolean(bool),
}

/// Array type: T[] or readonly T[]
#[derive(Debug, Serialize)]
pub struct TypeArray {
  pub readonly: bool,
  pub element_type: Node<TypeExpr>,
}

/// Tuple type: [T, U] or readonly [T, U]
#[derive(Debug, Serialize)]
pub struct TypeTuple {
  pub readonly: bool,
  pub elements: Vec<Node<TypeExpr>>,
}

/// Union type: T | U | V
#[derive(Debug, Serialize)]
pub struct TypeUnion {
  pub types: Vec<Node<TypeExpr>>,
}

/// Intersection type: T & U & V
#[derive(Debug, Serialize)]
pub struct TypeIntersection {
  pub types: Vec<Node<TypeExpr>>,
}

/// Function type: <t>(x: t, y?: u, ...rest: v[]) => w
#[derive(Debug, Serialize)]
pub struct TypeFunction {
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub parameters: Vec<Node<TypeFunctionParameter>>,
  pub return_type: Node<TypeExpr>,
}

/// Function parameter; also used by function declarations and method signatures.
#[derive(Debug, Serialize)]
pub struct TypeFunctionParameter {
  pub name: String,
  pub optional: bool,
  pub rest: bool,
  pub type_expr: Option<Node<TypeExpr>>,
}

/// Type parameter: t, t extends u, t = u
#[derive(Debug, Serialize)]
pub struct TypeParameter {
  pub name: String,
  pub constraint: Option<Node<TypeExpr>>,
  pub default: Option<Node<TypeExpr>>,
}

/// Object type literal: { x: T; y?: U; m(): V }
#[derive(Debug, Serialize)]
pub struct TypeObjectLiteral {
  pub members: Vec<Node<TypeMember>>,
}

#[derive(Debug, Serialize)]
pub struct TypeParenthesized {
  pub type_expr: Node<TypeExpr>,
}

/// Indexed access: T[K]
#[derive(Debug, Serialize)]
pub struct TypeIndexedAccess {
  pub object_type: Node<TypeExpr>,
  pub index_type: Node<TypeExpr>,
}

/// typeof x.y
#[derive(Debug, Serialize)]
pub struct TypeQuery {
  pub expr_name: TypeEntityName,
}

/// keyof T
#[derive(Debug, Serialize)]
pub struct TypeKeyOf {
  pub type_expr: Node<TypeExpr>,
}

/// Members of object types, interfaces and classes.
#[derive(Debug, Serialize)]
#[serde(tag = "$t")]
pub enum TypeMember {
  Property(TypePropertySignature),
  Method(TypeMethodSignature),
  Call(TypeCallSignature),
  Construct(TypeCallSignature),
  Index(TypeIndexSignature),
}

/// Property signature: readonly x?: T
#[derive(Debug, Serialize)]
pub struct TypePropertySignature {
  pub readonly: bool,
  pub key: String,
  pub optional: bool,
  pub type_annotation: Option<Node<TypeExpr>>,
}

/// Method signature: m<t>(x: t): u
#[derive(Debug, Serialize)]
pub struct TypeMethodSignature {
  pub key: String,
  pub optional: bool,
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub parameters: Vec<Node<TypeFunctionParameter>>,
  pub return_type: Option<Node<TypeExpr>>,
}

/// Call signature `(x: t): u`, or construct signature `new (x: t): u`.
#[derive(Debug, Serialize)]
pub struct TypeCallSignature {
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub parameters: Vec<Node<TypeFunctionParameter>>,
  pub return_type: Option<Node<TypeExpr>>,
}

/// Index signature: [key: string]: T
#[derive(Debug, Serialize)]
pub struct TypeIndexSignature {
  pub readonly: bool,
  pub parameter_name: String,
  pub parameter_type: Node<TypeExpr>,
  pub type_annotation: Node<TypeExpr>,
}
