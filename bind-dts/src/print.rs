//! Prints bindings as OCaml source with BuckleScript externals.
//!
//! Names are mangled into valid OCaml identifiers (keywords gain a trailing `_`), while the string in each
//! `external` keeps the original JavaScript name.

use crate::out::Arrow;
use crate::out::Extern;
use crate::out::Field;
use crate::out::Item;
use crate::out::Module;
use crate::out::TargetType;
use crate::out::TypeDeclaration;
use ahash::HashSet;
use ahash::HashSetExt;
use once_cell::sync::Lazy;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrintOptions {
  /// Spaces per nesting level.
  pub indent: usize,
  /// Whether to start the output with a comment naming the source file.
  pub header: bool,
}

impl Default for PrintOptions {
  fn default() -> Self {
    PrintOptions {
      indent: 2,
      header: true,
    }
  }
}

impl PrintOptions {
  pub fn with_indent(mut self, indent: usize) -> Self {
    self.indent = indent;
    self
  }

  pub fn with_header(mut self, header: bool) -> Self {
    self.header = header;
    self
  }
}

static OCAML_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
  let mut set = HashSet::new();
  for kw in [
    "and", "as", "assert", "asr", "begin", "class", "constraint", "do", "done", "downto", "else", "end",
    "exception", "external", "false", "for", "fun", "function", "functor", "if", "in", "include",
    "inherit", "initializer", "land", "lazy", "let", "lor", "lsl", "lsr", "lxor", "match", "method",
    "mod", "module", "mutable", "new", "nonrec", "object", "of", "open", "or", "private", "rec", "sig",
    "struct", "then", "to", "true", "try", "type", "val", "virtual", "when", "while", "with",
  ] {
    set.insert(kw);
  }
  set
});

fn sanitize(name: &str) -> String {
  name
    .chars()
    .map(|c| {
      if c.is_ascii_alphanumeric() || c == '_' || c == '\'' {
        c
      } else {
        '_'
      }
    })
    .collect()
}

/// A lowercase identifier, usable for values, object methods, types and type variables.
pub fn lowercase_ident(name: &str) -> String {
  let mut ident = sanitize(name);
  match ident.chars().next() {
    None => ident.push('_'),
    Some(c) if c.is_ascii_uppercase() => ident.replace_range(..1, &c.to_ascii_lowercase().to_string()),
    Some(c) if c.is_ascii_digit() || c == '\'' => ident.insert(0, '_'),
    Some(_) => {}
  };
  if OCAML_KEYWORDS.contains(ident.as_str()) {
    ident.push('_');
  };
  ident
}

/// A capitalized identifier, usable for modules.
pub fn module_ident(name: &str) -> String {
  let mut ident = sanitize(name);
  match ident.chars().next() {
    Some(c) if c.is_ascii_lowercase() => ident.replace_range(..1, &c.to_ascii_uppercase().to_string()),
    Some(c) if c.is_ascii_uppercase() => {}
    _ => ident.insert(0, 'M'),
  };
  ident
}

fn string_literal(value: &str) -> String {
  let mut out = String::with_capacity(value.len() + 2);
  out.push('"');
  for c in value.chars() {
    match c {
      '"' => out.push_str("\\\""),
      '\\' => out.push_str("\\\\"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      c => out.push(c),
    };
  }
  out.push('"');
  out
}

/// Binding strength of a position in a type. Higher variants bind more tightly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum TypePrec {
  Arrow,
  Application,
}

pub struct Printer<'a> {
  out: String,
  options: &'a PrintOptions,
  depth: usize,
}

impl<'a> Printer<'a> {
  pub fn new(options: &'a PrintOptions) -> Self {
    Printer {
      out: String::new(),
      options,
      depth: 0,
    }
  }

  pub fn finish(self) -> String {
    self.out
  }

  fn line_start(&mut self) {
    for _ in 0..self.depth * self.options.indent {
      self.out.push(' ');
    }
  }

  pub fn print_header(&mut self, filename: &str) {
    let filename = filename.replace("*)", "* )");
    self
      .out
      .push_str(&format!("(* Generated from {filename} by bind-dts. Do not edit. *)\n\n"));
  }

  pub fn print_items(&mut self, items: &[Item]) {
    for item in items {
      self.print_item(item);
    }
  }

  pub fn print_item(&mut self, item: &Item) {
    match item {
      Item::Extern(ext) => self.print_extern(ext),
      Item::TypeDeclaration(decl) => self.print_type_declaration(decl),
      Item::Module(module) => self.print_module(module),
    }
  }

  fn print_extern(&mut self, ext: &Extern) {
    self.line_start();
    self.out.push_str("external ");
    self.out.push_str(&lowercase_ident(&ext.extern_name));
    self.out.push_str(" : ");
    self.print_type(&ext.extern_type, TypePrec::Arrow);
    self.out.push_str(" = ");
    let js_name = if ext.default_export {
      "default"
    } else {
      ext.extern_name.as_str()
    };
    self.out.push_str(&string_literal(js_name));
    if ext.getter {
      self.out.push_str(" [@@bs.get]");
    } else if let Some(module_name) = &ext.module_name {
      self.out.push_str(" [@@bs.module ");
      self.out.push_str(&string_literal(module_name));
      self.out.push(']');
    } else {
      self.out.push_str(" [@@bs.val]");
    };
    if ext.variadic {
      self.out.push_str(" [@@bs.variadic]");
    };
    self.out.push('\n');
  }

  fn print_type_declaration(&mut self, decl: &TypeDeclaration) {
    self.line_start();
    self.out.push_str(if decl.nonrec { "type nonrec " } else { "type " });
    match decl.params.as_slice() {
      [] => {}
      [param] => {
        self.print_type_variable(param);
        self.out.push(' ');
      }
      params => {
        self.out.push('(');
        for (i, param) in params.iter().enumerate() {
          if i > 0 {
            self.out.push_str(", ");
          };
          self.print_type_variable(param);
        }
        self.out.push_str(") ");
      }
    };
    self.out.push_str(&lowercase_ident(&decl.alias_name));
    self.out.push_str(" = ");
    self.print_type(&decl.alias_type, TypePrec::Arrow);
    self.out.push('\n');
  }

  fn print_module(&mut self, module: &Module) {
    self.line_start();
    self.out.push_str("module ");
    self.out.push_str(&module_ident(&module.name));
    self.out.push_str(" = struct\n");
    self.depth += 1;
    self.print_items(&module.items);
    self.depth -= 1;
    self.line_start();
    self.out.push_str("end\n");
  }

  fn print_type_variable(&mut self, name: &str) {
    self.out.push('\'');
    self.out.push_str(&lowercase_ident(name));
  }

  fn print_type_path(&mut self, path: &str) {
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
      if segments.peek().is_some() {
        self.out.push_str(&module_ident(segment));
        self.out.push('.');
      } else {
        self.out.push_str(&lowercase_ident(segment));
      };
    }
  }

  fn print_type(&mut self, ty: &TargetType, prec: TypePrec) {
    match ty {
      TargetType::Constructor { name, args } => {
        match args.as_slice() {
          [] => {}
          [arg] => {
            self.print_type(arg, TypePrec::Application);
            self.out.push(' ');
          }
          args => {
            self.out.push('(');
            for (i, arg) in args.iter().enumerate() {
              if i > 0 {
                self.out.push_str(", ");
              };
              self.print_type(arg, TypePrec::Arrow);
            }
            self.out.push_str(") ");
          }
        };
        self.print_type_path(name);
      }
      TargetType::Variable(name) => self.print_type_variable(name),
      TargetType::Arrow(arrow) => {
        let parenthesize = prec > TypePrec::Arrow;
        if parenthesize {
          self.out.push('(');
        };
        self.print_arrow(arrow);
        if parenthesize {
          self.out.push(')');
        };
      }
      TargetType::Tuple(elements) => {
        self.out.push('(');
        for (i, element) in elements.iter().enumerate() {
          if i > 0 {
            self.out.push_str(" * ");
          };
          self.print_type(element, TypePrec::Application);
        }
        self.out.push(')');
      }
      TargetType::Object(fields) => self.print_object(fields),
    }
  }

  fn print_arrow(&mut self, arrow: &Arrow) {
    for param in &arrow.params {
      self.print_type(param, TypePrec::Application);
      self.out.push_str(" -> ");
    }
    // A returned function stays parenthesized so `a -> (b -> c)` and `a -> b -> c` print differently.
    self.print_type(&arrow.ret, TypePrec::Application);
  }

  fn print_object(&mut self, fields: &[Field]) {
    if fields.is_empty() {
      self.out.push_str("< > Js.t");
      return;
    };
    self.out.push_str("< ");
    for (i, field) in fields.iter().enumerate() {
      if i > 0 {
        self.out.push_str("; ");
      };
      self.out.push_str(&lowercase_ident(&field.name));
      self.out.push_str(" : ");
      match &field.ty {
        // Methods with their own type parameters are explicitly polymorphic.
        TargetType::Arrow(arrow) if !arrow.quantified.is_empty() => {
          for (i, var) in arrow.quantified.iter().enumerate() {
            if i > 0 {
              self.out.push(' ');
            };
            self.print_type_variable(var);
          }
          self.out.push_str(". ");
          self.print_arrow(arrow);
        }
        ty => self.print_type(ty, TypePrec::Arrow),
      };
    }
    self.out.push_str(" > Js.t");
  }
}

/// Prints `items` as a complete OCaml file.
pub fn print(options: &PrintOptions, filename: &str, items: &[Item]) -> String {
  let mut printer = Printer::new(options);
  if options.header {
    printer.print_header(filename);
  };
  printer.print_items(items);
  printer.finish()
}
