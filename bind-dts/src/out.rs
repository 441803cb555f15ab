//! The synthesized bindings, prior to printing.

/// The type each interface's wrapper module declares for the interface itself.
pub const SELF_TYPE: &str = "t";

/// A type in the output language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetType {
  /// A type constructor applied to arguments, e.g. `float`, `'a array`, `(string, float) Foo.t`.
  Constructor { name: String, args: Vec<TargetType> },
  /// A type parameter, printed as `'a`.
  Variable(String),
  Arrow(Arrow),
  Tuple(Vec<TargetType>),
  /// A JS object, printed as `< a : T; b : U > Js.t`.
  Object(Vec<Field>),
}

impl TargetType {
  pub fn named(name: impl Into<String>) -> TargetType {
    TargetType::Constructor {
      name: name.into(),
      args: Vec::new(),
    }
  }

  pub fn apply(name: impl Into<String>, args: Vec<TargetType>) -> TargetType {
    TargetType::Constructor {
      name: name.into(),
      args,
    }
  }

  pub fn unit() -> TargetType {
    TargetType::named("unit")
  }

  /// Whether `f` holds for the name of any constructor in this type.
  pub fn any_constructor(&self, f: &impl Fn(&str) -> bool) -> bool {
    match self {
      TargetType::Constructor { name, args } => f(name) || args.iter().any(|a| a.any_constructor(f)),
      TargetType::Variable(_) => false,
      TargetType::Arrow(arrow) => {
        arrow.params.iter().any(|p| p.any_constructor(f)) || arrow.ret.any_constructor(f)
      }
      TargetType::Tuple(elements) => elements.iter().any(|e| e.any_constructor(f)),
      TargetType::Object(fields) => fields.iter().any(|field| field.ty.any_constructor(f)),
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arrow {
  // Type parameters declared by the function type itself. Printed as an explicit quantifier inside object types.
  pub quantified: Vec<String>,
  pub params: Vec<TargetType>,
  pub ret: Box<TargetType>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
  pub name: String,
  pub ty: TargetType,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Item {
  Extern(Extern),
  TypeDeclaration(TypeDeclaration),
  Module(Module),
}

/// A value provided by JavaScript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extern {
  // The enclosing `declare module`, if any.
  pub module_name: Option<String>,
  pub default_export: bool,
  pub extern_name: String,
  pub extern_type: TargetType,
  // Property accessors read a field of their first argument instead of naming a global or module export.
  pub getter: bool,
  // The last parameter is an array spread into separate JS arguments.
  pub variadic: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDeclaration {
  // The body refers to an earlier type of the same name rather than to this one.
  pub nonrec: bool,
  pub alias_name: String,
  pub params: Vec<String>,
  pub alias_type: TargetType,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Module {
  pub name: String,
  pub items: Vec<Item>,
}
