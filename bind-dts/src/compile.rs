use crate::casing::is_first_letter_lowercase;
use crate::casing::is_first_letter_uppercase;
use crate::convert::bind_type_parameters;
use crate::convert::convert_function;
use crate::convert::convert_members;
use crate::convert::convert_type;
use crate::error::CompileErrorKind;
use crate::error::CompileResult;
use crate::error::LocExt;
use crate::out::Arrow;
use crate::out::Extern;
use crate::out::Item;
use crate::out::Module;
use crate::out::TargetType;
use crate::out::TypeDeclaration;
use crate::out::SELF_TYPE;
use crate::print::lowercase_ident;
use crate::scope::Scope;
use crate::scope::ScopeEntry;
use parse_dts::ast::node::Node;
use parse_dts::ast::stmt::*;
use tracing::debug;
use tracing::trace;

/// Compiles statements in order, each seeing the declarations before it.
pub fn compile_stmts(scope: &Scope, stmts: &[Node<Stmt>]) -> CompileResult<Vec<Item>> {
  let mut scope = scope.clone();
  let mut items = Vec::new();
  for stmt in stmts {
    scope = compile_stmt(&scope, stmt, &mut items)?;
  }
  Ok(items)
}

/// Appends the bindings for `stmt` to `out` and returns the scope for the statements after it.
pub fn compile_stmt(scope: &Scope, stmt: &Node<Stmt>, out: &mut Vec<Item>) -> CompileResult<Scope> {
  match stmt.stx.as_ref() {
    Stmt::DeclareModule(module) => compile_module(scope, module, out),
    Stmt::DeclareVariable(var) => compile_variable(scope, var, out),
    Stmt::DeclareFunction(func) => compile_function(scope, func, out),
    Stmt::DeclareTypeAlias(alias) => compile_type_alias(scope, alias, out),
    Stmt::DeclareInterface(iface) => compile_interface(scope, iface, out),
    Stmt::DeclareClass(_)
    | Stmt::DeclareEnum(_)
    | Stmt::DeclareNamespace(_)
    | Stmt::DeclareGlobal(_)
    | Stmt::Empty(_)
    | Stmt::ExportAsNamespace(_)
    | Stmt::ExportAssignment(_)
    | Stmt::ExportList(_)
    | Stmt::Import(_) => {
      debug!(loc = ?stmt.loc, "skipping statement without bindings");
      Ok(scope.clone())
    }
  }
}

fn compile_module(
  scope: &Scope,
  module: &Node<DeclareModule>,
  out: &mut Vec<Item>,
) -> CompileResult<Scope> {
  let name = match &module.stx.name {
    ModuleName::String(name) => name,
    ModuleName::Identifier(_) => {
      return Err(
        module
          .stx
          .name_loc
          .compile_error(CompileErrorKind::ModuleNameMustBeStringLiteral),
      )
    }
  };
  trace!(module = name.as_str(), "compiling module");
  if let Some(body) = &module.stx.body {
    out.extend(compile_stmts(&scope.with_module(name), body)?);
  };
  // Declarations inside the module stay inside it.
  Ok(scope.clone())
}

// Only a module has a default export; outside one the declaration names a global.
fn is_default_export(scope: &Scope, export: Export) -> bool {
  export == Export::Default && scope.module_name().is_some()
}

fn compile_variable(
  scope: &Scope,
  var: &Node<DeclareVariable>,
  out: &mut Vec<Item>,
) -> CompileResult<Scope> {
  let DeclareVariable {
    export,
    name_loc,
    name,
    type_annotation,
    ..
  } = var.stx.as_ref();
  trace!(name = name.as_str(), "compiling variable");
  let annotation = type_annotation
    .as_ref()
    .ok_or_else(|| name_loc.compile_error(CompileErrorKind::VarMustHaveType(name.clone())))?;
  out.push(Item::Extern(Extern {
    module_name: scope.module_name().map(str::to_string),
    default_export: is_default_export(scope, *export),
    extern_name: name.clone(),
    extern_type: convert_type(scope, annotation)?,
    getter: false,
    variadic: false,
  }));
  Ok(scope.clone())
}

fn compile_function(
  scope: &Scope,
  func: &Node<DeclareFunction>,
  out: &mut Vec<Item>,
) -> CompileResult<Scope> {
  let DeclareFunction {
    export,
    name_loc,
    name,
    type_parameters,
    parameters,
    return_type,
  } = func.stx.as_ref();
  trace!(name = name.as_str(), "compiling function");
  let signature = convert_function(
    scope,
    *name_loc,
    &format!("function `{name}`"),
    type_parameters.as_deref(),
    parameters,
    return_type.as_ref(),
  )?;
  out.push(Item::Extern(Extern {
    module_name: scope.module_name().map(str::to_string),
    default_export: is_default_export(scope, *export),
    extern_name: name.clone(),
    extern_type: TargetType::Arrow(signature.arrow),
    getter: false,
    variadic: signature.rest.is_some(),
  }));
  Ok(scope.clone())
}

fn compile_type_alias(
  scope: &Scope,
  alias: &Node<DeclareTypeAlias>,
  out: &mut Vec<Item>,
) -> CompileResult<Scope> {
  let DeclareTypeAlias {
    name_loc,
    name,
    type_parameters,
    type_expr,
    ..
  } = alias.stx.as_ref();
  trace!(name = name.as_str(), "compiling type alias");
  if !is_first_letter_lowercase(name) {
    return Err(name_loc.compile_error(CompileErrorKind::TypeAliasNameMustBeLowercase(name.clone())));
  };
  let (body_scope, params) = bind_type_parameters(scope, type_parameters.as_deref())?;
  let alias_type = convert_type(&body_scope, type_expr)?;
  let entry = ScopeEntry::TypeAlias {
    name: name.clone(),
    type_param_count: params.len(),
  };
  // A body naming the alias refers to an earlier declaration, as the alias is not yet in scope.
  let ident = lowercase_ident(name);
  let nonrec = alias_type.any_constructor(&|c: &str| !c.contains('.') && lowercase_ident(c) == ident);
  out.push(Item::TypeDeclaration(TypeDeclaration {
    nonrec,
    alias_name: name.clone(),
    params,
    alias_type,
  }));
  Ok(scope.push(entry))
}

fn compile_interface(
  scope: &Scope,
  iface: &Node<DeclareInterface>,
  out: &mut Vec<Item>,
) -> CompileResult<Scope> {
  let DeclareInterface {
    name_loc,
    name,
    type_parameters,
    extends,
    members,
    ..
  } = iface.stx.as_ref();
  trace!(name = name.as_str(), "compiling interface");
  if !is_first_letter_uppercase(name) {
    return Err(name_loc.compile_error(CompileErrorKind::InterfaceNameMustBeUppercase(name.clone())));
  };
  if let Some(base) = extends.first() {
    return Err(base.loc.compile_error(CompileErrorKind::UnsupportedType("interface inheritance")));
  };
  let (body_scope, params) = bind_type_parameters(scope, type_parameters.as_deref())?;
  let entry = ScopeEntry::Interface {
    name: name.clone(),
    type_param_count: params.len(),
  };
  // Registered before the body is converted so members can refer to the interface itself.
  let body_scope = body_scope.push(entry.clone()).with_interface(name);
  let fields = convert_members(&body_scope, members)?;

  let self_type = TargetType::apply(
    SELF_TYPE,
    params.iter().cloned().map(TargetType::Variable).collect(),
  );
  let mut items = Vec::with_capacity(fields.len() + 1);
  let accessors = fields
    .iter()
    .map(|field| {
      Item::Extern(Extern {
        module_name: None,
        default_export: false,
        extern_name: field.name.clone(),
        extern_type: TargetType::Arrow(Arrow {
          quantified: Vec::new(),
          params: vec![self_type.clone()],
          ret: Box::new(field.ty.clone()),
        }),
        getter: true,
        variadic: false,
      })
    })
    .collect::<Vec<_>>();
  items.push(Item::TypeDeclaration(TypeDeclaration {
    nonrec: false,
    alias_name: SELF_TYPE.to_string(),
    params,
    alias_type: TargetType::Object(fields),
  }));
  items.extend(accessors);
  out.push(Item::Module(Module {
    name: name.clone(),
    items,
  }));
  // Later statements see the interface but not its type parameters.
  Ok(scope.push(entry))
}
