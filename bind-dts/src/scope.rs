use crate::out::TargetType;
use std::rc::Rc;

/// Types every compilation starts with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuiltIn {
  String,
  Number,
  Boolean,
  Void,
  Undefined,
  Null,
  Any,
  Unknown,
  Object,
  Symbol,
  BigInt,
  Date,
  RegExp,
  Array,
  ReadonlyArray,
  Promise,
}

impl BuiltIn {
  pub const ALL: [BuiltIn; 16] = [
    BuiltIn::String,
    BuiltIn::Number,
    BuiltIn::Boolean,
    BuiltIn::Void,
    BuiltIn::Undefined,
    BuiltIn::Null,
    BuiltIn::Any,
    BuiltIn::Unknown,
    BuiltIn::Object,
    BuiltIn::Symbol,
    BuiltIn::BigInt,
    BuiltIn::Date,
    BuiltIn::RegExp,
    BuiltIn::Array,
    BuiltIn::ReadonlyArray,
    BuiltIn::Promise,
  ];

  pub fn name(self) -> &'static str {
    match self {
      BuiltIn::String => "string",
      BuiltIn::Number => "number",
      BuiltIn::Boolean => "boolean",
      BuiltIn::Void => "void",
      BuiltIn::Undefined => "undefined",
      BuiltIn::Null => "null",
      BuiltIn::Any => "any",
      BuiltIn::Unknown => "unknown",
      BuiltIn::Object => "object",
      BuiltIn::Symbol => "symbol",
      BuiltIn::BigInt => "bigint",
      BuiltIn::Date => "Date",
      BuiltIn::RegExp => "RegExp",
      BuiltIn::Array => "Array",
      BuiltIn::ReadonlyArray => "ReadonlyArray",
      BuiltIn::Promise => "Promise",
    }
  }

  pub fn arity(self) -> usize {
    match self {
      BuiltIn::Array | BuiltIn::ReadonlyArray | BuiltIn::Promise => 1,
      _ => 0,
    }
  }

  /// The target type for this built-in applied to `args`, which must already match [`BuiltIn::arity`].
  pub fn target(self, args: Vec<TargetType>) -> TargetType {
    match self {
      BuiltIn::String => TargetType::named("string"),
      BuiltIn::Number => TargetType::named("float"),
      BuiltIn::Boolean => TargetType::named("bool"),
      BuiltIn::Void | BuiltIn::Undefined => TargetType::unit(),
      BuiltIn::Null => TargetType::apply("Js.null", vec![TargetType::unit()]),
      BuiltIn::Any | BuiltIn::Unknown => TargetType::named("Js.Json.t"),
      BuiltIn::Object => TargetType::Object(Vec::new()),
      BuiltIn::Symbol => TargetType::named("Js.Types.symbol"),
      BuiltIn::BigInt => TargetType::named("Js.Types.bigint"),
      BuiltIn::Date => TargetType::named("Js.Date.t"),
      BuiltIn::RegExp => TargetType::named("Js.Re.t"),
      BuiltIn::Array | BuiltIn::ReadonlyArray => TargetType::apply("array", args),
      BuiltIn::Promise => TargetType::apply("Js.Promise.t", args),
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScopeEntry {
  BuiltIn(BuiltIn),
  TypeAlias { name: String, type_param_count: usize },
  Interface { name: String, type_param_count: usize },
  /// A type parameter called `name` in the declaration file, printed as `'var`. The two differ when an inner
  /// parameter would otherwise print like an outer one.
  TypeVariable { name: String, var: String },
}

impl ScopeEntry {
  pub fn name(&self) -> &str {
    match self {
      ScopeEntry::BuiltIn(b) => b.name(),
      ScopeEntry::TypeAlias { name, .. } => name,
      ScopeEntry::Interface { name, .. } => name,
      ScopeEntry::TypeVariable { name, .. } => name,
    }
  }

  /// The number of type arguments a reference to this entry must supply.
  pub fn arity(&self) -> usize {
    match self {
      ScopeEntry::BuiltIn(b) => b.arity(),
      ScopeEntry::TypeAlias {
        type_param_count, ..
      } => *type_param_count,
      ScopeEntry::Interface {
        type_param_count, ..
      } => *type_param_count,
      ScopeEntry::TypeVariable { .. } => 0,
    }
  }
}

struct Link {
  entry: ScopeEntry,
  next: Option<Rc<Link>>,
}

impl Drop for Link {
  // Unlink iteratively; the default recursive drop can overflow the stack on long scopes.
  fn drop(&mut self) {
    let mut next = self.next.take();
    while let Some(link) = next {
      match Rc::try_unwrap(link) {
        Ok(mut link) => next = link.next.take(),
        Err(_) => break,
      }
    }
  }
}

/// Names visible at a point in the declaration file, most recent first.
///
/// Scopes are persistent: [`Scope::push`] returns a new scope sharing every existing entry, so cloning
/// is cheap and nothing pushed onto a clone is ever visible through the original.
#[derive(Clone, Default)]
pub struct Scope {
  entries: Option<Rc<Link>>,
  module_name: Option<Rc<str>>,
  interface: Option<Rc<str>>,
}

impl Scope {
  /// An empty scope with no module context.
  pub fn new() -> Scope {
    Scope::default()
  }

  /// A scope holding every [`BuiltIn`].
  pub fn with_prelude() -> Scope {
    BuiltIn::ALL
      .iter()
      .fold(Scope::new(), |scope, b| scope.push(ScopeEntry::BuiltIn(*b)))
  }

  pub fn push(&self, entry: ScopeEntry) -> Scope {
    Scope {
      entries: Some(Rc::new(Link {
        entry,
        next: self.entries.clone(),
      })),
      module_name: self.module_name.clone(),
      interface: self.interface.clone(),
    }
  }

  /// The same entries, attributed to the `declare module` named `name`.
  pub fn with_module(&self, name: &str) -> Scope {
    Scope {
      module_name: Some(name.into()),
      ..self.clone()
    }
  }

  /// The same entries, while converting the body of interface `name`.
  pub fn with_interface(&self, name: &str) -> Scope {
    Scope {
      interface: Some(name.into()),
      ..self.clone()
    }
  }

  pub fn module_name(&self) -> Option<&str> {
    self.module_name.as_deref()
  }

  pub fn interface(&self) -> Option<&str> {
    self.interface.as_deref()
  }

  pub fn entries(&self) -> impl Iterator<Item = &ScopeEntry> {
    let mut next = self.entries.as_deref();
    std::iter::from_fn(move || {
      let link = next?;
      next = link.next.as_deref();
      Some(&link.entry)
    })
  }

  /// Finds the most recently pushed entry called `name`.
  pub fn lookup(&self, name: &str) -> Option<&ScopeEntry> {
    self.entries().find(|e| e.name() == name)
  }
}
