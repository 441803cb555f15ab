use crate::casing::is_first_letter_lowercase;
use crate::error::CompileErrorKind;
use crate::error::CompileResult;
use crate::error::LocExt;
use crate::out::Arrow;
use crate::out::Field;
use crate::out::TargetType;
use crate::out::SELF_TYPE;
use crate::print::lowercase_ident;
use crate::scope::BuiltIn;
use crate::scope::Scope;
use crate::scope::ScopeEntry;
use ahash::HashMap;
use ahash::HashMapExt;
use parse_dts::ast::node::Node;
use parse_dts::ast::type_expr::*;
use parse_dts::loc::Loc;

/// Converts a declared type into its binding type, resolving names against `scope`.
pub fn convert_type(scope: &Scope, ty: &Node<TypeExpr>) -> CompileResult<TargetType> {
  let unsupported = |what| Err(ty.loc.compile_error(CompileErrorKind::UnsupportedType(what)));
  match ty.stx.as_ref() {
    TypeExpr::Reference(reference) => convert_reference(scope, ty.loc, reference),
    TypeExpr::Literal(TypeLiteral::String(_)) => Ok(TargetType::named("string")),
    TypeExpr::Literal(TypeLiteral::Number(_)) => Ok(TargetType::named("float")),
    TypeExpr::Literal(TypeLiteral::Boolean(_)) => Ok(TargetType::named("bool")),
    TypeExpr::Array(array) => Ok(TargetType::apply("array", vec![convert_type(
      scope,
      &array.element_type,
    )?])),
    TypeExpr::Tuple(tuple) => {
      if tuple.elements.len() < 2 {
        return unsupported("tuple with fewer than two elements");
      };
      let elements = tuple
        .elements
        .iter()
        .map(|e| convert_type(scope, e))
        .collect::<CompileResult<Vec<_>>>()?;
      Ok(TargetType::Tuple(elements))
    }
    TypeExpr::Union(union) => convert_union(scope, ty.loc, &union.types),
    TypeExpr::Function(func) => {
      let arrow = convert_function(
        scope,
        ty.loc,
        "function type",
        func.type_parameters.as_deref(),
        &func.parameters,
        Some(&func.return_type),
      )?
      .without_rest()?;
      Ok(TargetType::Arrow(arrow))
    }
    TypeExpr::Object(obj) => Ok(TargetType::Object(convert_members(scope, &obj.members)?)),
    TypeExpr::Parenthesized(paren) => convert_type(scope, &paren.type_expr),
    TypeExpr::Intersection(_) => unsupported("intersection type"),
    TypeExpr::Constructor(_) => unsupported("constructor type"),
    TypeExpr::IndexedAccess(_) => unsupported("indexed access type"),
    TypeExpr::Query(_) => unsupported("typeof type query"),
    TypeExpr::KeyOf(_) => unsupported("keyof type operator"),
    TypeExpr::This => unsupported("this type"),
  }
}

fn convert_reference(scope: &Scope, loc: Loc, reference: &TypeReference) -> CompileResult<TargetType> {
  let name = match &reference.name {
    TypeEntityName::Identifier(name) => name,
    TypeEntityName::Qualified(_) => {
      return Err(loc.compile_error(CompileErrorKind::UnsupportedType("qualified type name")))
    }
  };
  let entry = scope
    .lookup(name)
    .ok_or_else(|| loc.compile_error(CompileErrorKind::UnresolvedType(name.clone())))?;
  if let (ScopeEntry::TypeAlias { name, .. }, Some(interface)) = (entry, scope.interface()) {
    if name == SELF_TYPE {
      return Err(loc.compile_error(CompileErrorKind::AliasHiddenByInterface {
        alias: name.clone(),
        interface: interface.to_string(),
      }));
    };
  };
  let type_arguments = reference.type_arguments.as_deref().unwrap_or_default();
  if type_arguments.len() != entry.arity() {
    return Err(loc.compile_error(CompileErrorKind::TypeArityMismatch {
      name: name.clone(),
      expected: entry.arity(),
      actual: type_arguments.len(),
    }));
  };
  let args = type_arguments
    .iter()
    .map(|a| convert_type(scope, a))
    .collect::<CompileResult<Vec<_>>>()?;
  Ok(match entry {
    ScopeEntry::BuiltIn(b) => b.target(args),
    ScopeEntry::TypeAlias { name, .. } => TargetType::apply(name.clone(), args),
    // Inside its own body an interface is the wrapper module's local `t`.
    ScopeEntry::Interface { name, .. } if scope.interface() == Some(name.as_str()) => {
      TargetType::apply(SELF_TYPE, args)
    }
    ScopeEntry::Interface { name, .. } => TargetType::apply(format!("{name}.{SELF_TYPE}"), args),
    ScopeEntry::TypeVariable { var, .. } => TargetType::Variable(var.clone()),
  })
}

fn is_nullish(scope: &Scope, ty: &Node<TypeExpr>) -> bool {
  let TypeExpr::Reference(TypeReference {
    name: TypeEntityName::Identifier(name),
    type_arguments: None,
  }) = ty.stx.as_ref()
  else {
    return false;
  };
  matches!(
    scope.lookup(name),
    Some(ScopeEntry::BuiltIn(BuiltIn::Null | BuiltIn::Undefined))
  )
}

/// `T | null` and `T | undefined` become nullable; a union whose arms all convert to the same type (e.g. string literals) collapses to it.
fn convert_union(scope: &Scope, loc: Loc, arms: &[Node<TypeExpr>]) -> CompileResult<TargetType> {
  let (nullish, others): (Vec<_>, Vec<_>) = arms.iter().partition(|arm| is_nullish(scope, arm));
  if !nullish.is_empty() {
    let [inner] = others.as_slice() else {
      return Err(loc.compile_error(CompileErrorKind::UnsupportedType(
        "nullable union of more than one type",
      )));
    };
    return Ok(TargetType::apply("Js.Nullable.t", vec![convert_type(
      scope, inner,
    )?]));
  };
  let mut converted = arms.iter().map(|arm| convert_type(scope, arm));
  let Some(first) = converted.next().transpose()? else {
    return Err(loc.compile_error(CompileErrorKind::UnsupportedType("empty union")));
  };
  for arm in converted {
    if arm? != first {
      return Err(loc.compile_error(CompileErrorKind::UnsupportedType("union type")));
    };
  }
  Ok(first)
}

// `name`, or `name` with the smallest numeric suffix that no type variable in `scope` already prints as.
fn fresh_type_variable(scope: &Scope, name: &str) -> String {
  let taken = |candidate: &str| {
    let ident = lowercase_ident(candidate);
    scope
      .entries()
      .any(|e| matches!(e, ScopeEntry::TypeVariable { var, .. } if lowercase_ident(var) == ident))
  };
  let mut candidate = name.to_string();
  let mut suffix = 0;
  while taken(&candidate) {
    suffix += 1;
    candidate = format!("{name}{suffix}");
  }
  candidate
}

/// Pushes a [`ScopeEntry::TypeVariable`] per parameter onto `scope`, checking each name's case.
///
/// Returns the printed variable names, renamed where a parameter shadows an enclosing one.
pub fn bind_type_parameters(
  scope: &Scope,
  params: Option<&[Node<TypeParameter>]>,
) -> CompileResult<(Scope, Vec<String>)> {
  let mut scope = scope.clone();
  let mut names = Vec::new();
  for param in params.unwrap_or_default() {
    let name = &param.stx.name;
    if !is_first_letter_lowercase(name) {
      return Err(
        param
          .loc
          .compile_error(CompileErrorKind::TypeParameterMustBeLowercase(name.clone())),
      );
    };
    let var = fresh_type_variable(&scope, name);
    scope = scope.push(ScopeEntry::TypeVariable {
      name: name.clone(),
      var: var.clone(),
    });
    names.push(var);
  }
  Ok((scope, names))
}

/// A converted function signature.
pub struct Signature {
  pub arrow: Arrow,
  /// Where a trailing rest parameter was declared. Its array type is the last of `arrow.params`.
  pub rest: Option<Loc>,
}

impl Signature {
  /// The arrow alone, where an array cannot be spread into separate arguments.
  pub fn without_rest(self) -> CompileResult<Arrow> {
    match self.rest {
      Some(loc) => Err(loc.compile_error(CompileErrorKind::UnsupportedType(
        "rest parameter outside a function declaration",
      ))),
      None => Ok(self.arrow),
    }
  }
}

/// Converts a function signature. Its type parameters are bound in a branch of `scope` so they never reach the caller.
///
/// `what` names the signature in errors, e.g. "function `fetch`".
pub fn convert_function(
  scope: &Scope,
  loc: Loc,
  what: &str,
  type_parameters: Option<&[Node<TypeParameter>]>,
  parameters: &[Node<TypeFunctionParameter>],
  return_type: Option<&Node<TypeExpr>>,
) -> CompileResult<Signature> {
  let (scope, quantified) = bind_type_parameters(scope, type_parameters)?;
  let mut params = Vec::new();
  let mut rest_loc = None;
  for param in parameters {
    let TypeFunctionParameter {
      name,
      optional,
      rest,
      type_expr,
    } = param.stx.as_ref();
    // A `this` parameter only types the receiver and is not passed.
    if name == "this" {
      continue;
    };
    let type_expr = type_expr.as_ref().ok_or_else(|| {
      param.loc.compile_error(CompileErrorKind::FunctionMustHaveTypes(format!(
        "parameter `{name}` of {what}"
      )))
    })?;
    let ty = convert_type(&scope, type_expr)?;
    if *rest {
      if !matches!(&ty, TargetType::Constructor { name, .. } if name == "array") {
        return Err(param.loc.compile_error(CompileErrorKind::UnsupportedType(
          "rest parameter that is not an array",
        )));
      };
      rest_loc = Some(param.loc);
    };
    params.push(if *optional {
      TargetType::apply("Js.undefined", vec![ty])
    } else {
      ty
    });
  }
  if params.is_empty() {
    params.push(TargetType::unit());
  };
  let return_type = return_type.ok_or_else(|| {
    loc.compile_error(CompileErrorKind::FunctionMustHaveTypes(format!(
      "return type of {what}"
    )))
  })?;
  let ret = convert_type(&scope, return_type)?;
  Ok(Signature {
    arrow: Arrow {
      quantified,
      params,
      ret: Box::new(ret),
    },
    rest: rest_loc,
  })
}

/// Converts object type members into fields, in declaration order.
///
/// Two members whose names bind to the same OCaml identifier are rejected.
pub fn convert_members(scope: &Scope, members: &[Node<TypeMember>]) -> CompileResult<Vec<Field>> {
  let mut seen = HashMap::<String, String>::new();
  let mut fields = Vec::with_capacity(members.len());
  for member in members {
    let field = convert_member(scope, member)?;
    let ident = lowercase_ident(&field.name);
    if let Some(earlier) = seen.get(&ident) {
      return Err(member.loc.compile_error(CompileErrorKind::MemberNameCollision {
        name: field.name,
        earlier: earlier.clone(),
        ident,
      }));
    };
    seen.insert(ident, field.name.clone());
    fields.push(field);
  }
  Ok(fields)
}

fn convert_member(scope: &Scope, member: &Node<TypeMember>) -> CompileResult<Field> {
  let unsupported = |what| Err(member.loc.compile_error(CompileErrorKind::UnsupportedMember(what)));
  let (name, ty, optional) = match member.stx.as_ref() {
    TypeMember::Property(prop) => {
      let annotation = prop.type_annotation.as_ref().ok_or_else(|| {
        member
          .loc
          .compile_error(CompileErrorKind::MemberMustHaveType(prop.key.clone()))
      })?;
      (&prop.key, convert_type(scope, annotation)?, prop.optional)
    }
    TypeMember::Method(method) => {
      let arrow = convert_function(
        scope,
        member.loc,
        &format!("method `{}`", method.key),
        method.type_parameters.as_deref(),
        &method.parameters,
        method.return_type.as_ref(),
      )?
      .without_rest()?;
      (&method.key, TargetType::Arrow(arrow), method.optional)
    }
    TypeMember::Call(_) => return unsupported("call signature"),
    TypeMember::Construct(_) => return unsupported("construct signature"),
    TypeMember::Index(_) => return unsupported("index signature"),
  };
  if name.starts_with('[') {
    return unsupported("computed property name");
  };
  Ok(Field {
    name: name.clone(),
    ty: if optional {
      TargetType::apply("Js.undefined", vec![ty])
    } else {
      ty
    },
  })
}
