use super::Parser;
use crate::ast::node::Node;
use crate::ast::stmt::*;
use crate::ast::stx::TopLevel;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn parse_top_level(&mut self) -> SyntaxResult<Node<TopLevel>> {
    let body = self.stmts(TT::EOF)?;
    self.require(TT::EOF)?;
    Ok(Node::new(self.source_range(), TopLevel { body }))
  }

  pub fn stmts(&mut self, end: TT) -> SyntaxResult<Vec<Node<Stmt>>> {
    self.repeat_while(|p| p.peek().typ != end, |p| p.stmt())
  }

  /// Parses a braced statement block, including both braces.
  fn stmt_block(&mut self) -> SyntaxResult<Vec<Node<Stmt>>> {
    self.require(TT::BraceOpen)?;
    let body = self.nested(|p| p.stmts(TT::BraceClose))?;
    self.require(TT::BraceClose)?;
    Ok(body)
  }

  pub fn stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.checkpoint();
    let (a, b) = self.peek_2();
    let stx: Stmt = match (a.typ, b.typ) {
      (TT::Semicolon, _) => self.with_loc(|p| {
        p.consume();
        Ok(EmptyStmt {})
      })?.into(),
      (TT::KeywordImport, _) => self.import_stmt()?.into(),
      (TT::KeywordExport, TT::Equals) => self.export_assignment_stmt()?.into(),
      (TT::KeywordExport, TT::KeywordAs) => self.export_as_namespace_stmt()?.into(),
      (TT::KeywordExport, TT::BraceOpen) => self.export_list_stmt()?.into(),
      (TT::KeywordExport, TT::KeywordType) if self.peek_3().2.typ == TT::BraceOpen => {
        self.export_list_stmt()?.into()
      }
      (TT::KeywordExport, TT::KeywordDefault) => {
        self.consume();
        self.consume();
        self.decl(Export::Default)?
      }
      (TT::KeywordExport, _) => {
        self.consume();
        self.decl(Export::Named)?
      }
      _ => self.decl(Export::None)?,
    };
    Ok(Node::new(self.since_checkpoint(&start), stx))
  }

  /// Parses a declaration after any `export` modifiers. Inside a declaration file every declaration is ambient, so `declare` is optional.
  fn decl(&mut self, export: Export) -> SyntaxResult<Stmt> {
    let declare = self.consume_if(TT::KeywordDeclare).is_match();
    let (a, b) = self.peek_2();
    Ok(match a.typ {
      TT::KeywordModule if matches!(b.typ, TT::LiteralString) || b.typ.is_identifier_like() => {
        self.module_decl()?.into()
      }
      TT::KeywordNamespace => self.namespace_decl(export)?.into(),
      TT::KeywordGlobal if declare && b.typ == TT::BraceOpen => self.global_decl()?.into(),
      TT::KeywordConst if b.typ == TT::KeywordEnum => self.enum_decl(export)?.into(),
      TT::KeywordVar | TT::KeywordLet | TT::KeywordConst => self.var_decl(export)?.into(),
      TT::KeywordFunction => self.function_decl(export)?.into(),
      TT::KeywordType => self.type_alias_decl(export)?.into(),
      TT::KeywordInterface => self.interface_decl(export)?.into(),
      TT::KeywordClass | TT::KeywordAbstract => self.class_decl(export)?.into(),
      TT::KeywordEnum => self.enum_decl(export)?.into(),
      _ => return Err(self.token_error(&a, SyntaxErrorType::ExpectedSyntax("declaration"))),
    })
  }

  /// Parse module declaration: module "foo" { } or declare module "foo";
  pub fn module_decl(&mut self) -> SyntaxResult<Node<DeclareModule>> {
    self.with_loc(|p| {
      p.require(TT::KeywordModule)?;
      let (name_loc, name) = if p.peek().typ == TT::LiteralString {
        let (loc, value) = p.lit_str_val_with_loc()?;
        (loc, ModuleName::String(value))
      } else {
        let start = p.checkpoint();
        let name = p.dotted_identifier()?;
        (p.since_checkpoint(&start), ModuleName::Identifier(name))
      };
      let body = if p.peek().typ == TT::BraceOpen {
        Some(p.stmt_block()?)
      } else {
        p.require_stmt_end()?;
        None
      };
      Ok(DeclareModule {
        name_loc,
        name,
        body,
      })
    })
  }

  fn dotted_identifier(&mut self) -> SyntaxResult<String> {
    let mut name = self.require_identifier()?;
    while self.consume_if(TT::Dot).is_match() {
      // Keywords are allowed in dotted paths, e.g. `chrome.debugger`.
      let t = self.require_predicate(|tt| tt == TT::Identifier || tt.is_keyword(), "identifier")?;
      name.push('.');
      name.push_str(self.str(t.loc));
    }
    Ok(name)
  }

  /// Parse namespace declaration: namespace Foo.Bar { }
  pub fn namespace_decl(&mut self, export: Export) -> SyntaxResult<Node<DeclareNamespace>> {
    self.with_loc(|p| {
      p.require(TT::KeywordNamespace)?;
      let name = p.dotted_identifier()?;
      let body = p.stmt_block()?;
      Ok(DeclareNamespace { export, name, body })
    })
  }

  /// Parse global augmentation: declare global { }
  pub fn global_decl(&mut self) -> SyntaxResult<Node<DeclareGlobal>> {
    self.with_loc(|p| {
      p.require(TT::KeywordGlobal)?;
      let body = p.stmt_block()?;
      Ok(DeclareGlobal { body })
    })
  }

  /// Parse variable declaration: declare var foo: Type;
  pub fn var_decl(&mut self, export: Export) -> SyntaxResult<Node<DeclareVariable>> {
    self.with_loc(|p| {
      let mode = match p.consume().typ {
        TT::KeywordConst => VarDeclMode::Const,
        TT::KeywordLet => VarDeclMode::Let,
        _ => VarDeclMode::Var,
      };
      let (name_loc, name) = p.require_identifier_with_loc()?;
      let type_annotation = if p.consume_if(TT::Colon).is_match() {
        Some(p.type_expr()?)
      } else {
        None
      };
      p.require_stmt_end()?;
      Ok(DeclareVariable {
        export,
        mode,
        name_loc,
        name,
        type_annotation,
      })
    })
  }

  /// Parse function declaration: declare function foo<t>(x: t): u;
  pub fn function_decl(&mut self, export: Export) -> SyntaxResult<Node<DeclareFunction>> {
    self.with_loc(|p| {
      p.require(TT::KeywordFunction)?;
      let (name_loc, name) = p.require_identifier_with_loc()?;
      let type_parameters = p.maybe_type_parameters()?;
      let parameters = p.function_parameters()?;
      let return_type = if p.consume_if(TT::Colon).is_match() {
        Some(p.type_expr()?)
      } else {
        None
      };
      p.require_stmt_end()?;
      Ok(DeclareFunction {
        export,
        name_loc,
        name,
        type_parameters,
        parameters,
        return_type,
      })
    })
  }

  /// Parse type alias: type foo<t> = bar<t>;
  pub fn type_alias_decl(&mut self, export: Export) -> SyntaxResult<Node<DeclareTypeAlias>> {
    self.with_loc(|p| {
      p.require(TT::KeywordType)?;
      let (name_loc, name) = p.require_identifier_with_loc()?;
      let type_parameters = p.maybe_type_parameters()?;
      p.require(TT::Equals)?;
      let type_expr = p.type_expr()?;
      p.require_stmt_end()?;
      Ok(DeclareTypeAlias {
        export,
        name_loc,
        name,
        type_parameters,
        type_expr,
      })
    })
  }

  /// Parse interface declaration: interface Foo<t> extends Bar { }
  pub fn interface_decl(&mut self, export: Export) -> SyntaxResult<Node<DeclareInterface>> {
    self.with_loc(|p| {
      p.require(TT::KeywordInterface)?;
      let (name_loc, name) = p.require_identifier_with_loc()?;
      let type_parameters = p.maybe_type_parameters()?;
      let mut extends = Vec::new();
      if p.consume_if(TT::KeywordExtends).is_match() {
        loop {
          extends.push(p.type_reference()?);
          if !p.consume_if(TT::Comma).is_match() {
            break;
          }
        }
      }
      let members = p.type_members()?;
      Ok(DeclareInterface {
        export,
        name_loc,
        name,
        type_parameters,
        extends,
        members,
      })
    })
  }

  /// Parse class declaration: declare abstract class Foo<T> extends Bar implements Baz { }
  pub fn class_decl(&mut self, export: Export) -> SyntaxResult<Node<DeclareClass>> {
    self.with_loc(|p| {
      let abstract_ = p.consume_if(TT::KeywordAbstract).is_match();
      p.require(TT::KeywordClass)?;
      let name = p.require_identifier()?;
      let type_parameters = p.maybe_type_parameters()?;
      let extends = if p.consume_if(TT::KeywordExtends).is_match() {
        Some(p.type_reference()?)
      } else {
        None
      };
      let mut implements = Vec::new();
      if p.consume_if(TT::KeywordImplements).is_match() {
        loop {
          implements.push(p.type_reference()?);
          if !p.consume_if(TT::Comma).is_match() {
            break;
          }
        }
      }
      let members = p.class_members()?;
      Ok(DeclareClass {
        export,
        abstract_,
        name,
        type_parameters,
        extends,
        implements,
        members,
      })
    })
  }

  /// Parse enum declaration: enum Color { Red, Green = "green" }
  pub fn enum_decl(&mut self, export: Export) -> SyntaxResult<Node<DeclareEnum>> {
    self.with_loc(|p| {
      let const_ = p.consume_if(TT::KeywordConst).is_match();
      p.require(TT::KeywordEnum)?;
      let name = p.require_identifier()?;
      p.require(TT::BraceOpen)?;
      let members = p.list_with_loc(TT::Comma, TT::BraceClose, |p| p.enum_member())?;
      Ok(DeclareEnum {
        export,
        const_,
        name,
        members,
      })
    })
  }

  fn enum_member(&mut self) -> SyntaxResult<EnumMember> {
    let name = match self.peek().typ {
      TT::LiteralString => self.lit_str_val()?,
      _ => self.require_identifier()?,
    };
    let initializer = if self.consume_if(TT::Equals).is_match() {
      Some(match self.peek().typ {
        TT::LiteralString => EnumInitializer::String(self.lit_str_val()?),
        TT::Hyphen => {
          self.consume();
          EnumInitializer::Number(format!("-{}", self.lit_num_raw()?))
        }
        _ => EnumInitializer::Number(self.lit_num_raw()?),
      })
    } else {
      None
    };
    Ok(EnumMember { name, initializer })
  }

  /// Parse import statement: import x, { a, b as c } from "mod";
  pub fn import_stmt(&mut self) -> SyntaxResult<Node<ImportStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordImport)?;
      // `import type` is only a modifier when followed by an import clause.
      let type_only = {
        let (a, b) = p.peek_2();
        a.typ == TT::KeywordType && (b.typ != TT::KeywordFrom && b.typ != TT::Comma)
      };
      if type_only {
        p.consume();
      };
      let mut default = None;
      let mut namespace = None;
      let mut names = Vec::new();
      if p.peek().typ == TT::LiteralString {
        let module = p.lit_str_val()?;
        p.require_stmt_end()?;
        return Ok(ImportStmt {
          type_only,
          default,
          namespace,
          names,
          module,
        });
      };
      if p.peek().typ.is_identifier_like() {
        default = Some(p.require_identifier()?);
        if !p.consume_if(TT::Comma).is_match() {
          p.require(TT::KeywordFrom)?;
          let module = p.lit_str_val()?;
          p.require_stmt_end()?;
          return Ok(ImportStmt {
            type_only,
            default,
            namespace,
            names,
            module,
          });
        };
      };
      if p.consume_if(TT::Asterisk).is_match() {
        p.require(TT::KeywordAs)?;
        namespace = Some(p.require_identifier()?);
      } else {
        p.require(TT::BraceOpen)?;
        names = p.list_with_loc(TT::Comma, TT::BraceClose, |p| p.export_import_name())?;
      };
      p.require(TT::KeywordFrom)?;
      let module = p.lit_str_val()?;
      p.require_stmt_end()?;
      Ok(ImportStmt {
        type_only,
        default,
        namespace,
        names,
        module,
      })
    })
  }

  fn export_import_name(&mut self) -> SyntaxResult<ModuleExportImportName> {
    let t = self.require_predicate(
      |tt| tt == TT::Identifier || tt.is_keyword(),
      "import or export name",
    )?;
    let target = self.string(t.loc);
    let alias = if self.consume_if(TT::KeywordAs).is_match() {
      Some(self.require_identifier()?)
    } else {
      None
    };
    Ok(ModuleExportImportName { target, alias })
  }

  /// Parse export assignment: export = Foo;
  pub fn export_assignment_stmt(&mut self) -> SyntaxResult<Node<ExportAssignmentStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordExport)?;
      p.require(TT::Equals)?;
      let name = p.dotted_identifier()?;
      p.require_stmt_end()?;
      Ok(ExportAssignmentStmt { name })
    })
  }

  /// Parse UMD global export: export as namespace Foo;
  pub fn export_as_namespace_stmt(&mut self) -> SyntaxResult<Node<ExportAsNamespaceStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordExport)?;
      p.require(TT::KeywordAs)?;
      p.require(TT::KeywordNamespace)?;
      let name = p.require_identifier()?;
      p.require_stmt_end()?;
      Ok(ExportAsNamespaceStmt { name })
    })
  }

  /// Parse export list: export { a, b as c } from "mod";
  pub fn export_list_stmt(&mut self) -> SyntaxResult<Node<ExportListStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordExport)?;
      let type_only = p.consume_if(TT::KeywordType).is_match();
      p.require(TT::BraceOpen)?;
      let names = p.list_with_loc(TT::Comma, TT::BraceClose, |p| p.export_import_name())?;
      let from = if p.consume_if(TT::KeywordFrom).is_match() {
        Some(p.lit_str_val()?)
      } else {
        None
      };
      p.require_stmt_end()?;
      Ok(ExportListStmt {
        type_only,
        names,
        from,
      })
    })
  }
}
