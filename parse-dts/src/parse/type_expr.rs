use super::Parser;
use crate::ast::node::Node;
use crate::ast::type_expr::*;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

// Anything that may appear as a property or method name.
fn is_member_key(tt: TT) -> bool {
  matches!(
    tt,
    TT::Identifier
      | TT::LiteralString
      | TT::LiteralNumber
      | TT::LiteralTrue
      | TT::LiteralFalse
  ) || tt.is_keyword()
}

// Class member modifiers. None of these are reserved, so they only act as modifiers when followed by a member key.
const CLASS_MODIFIERS: &[&str] = &[
  "static",
  "public",
  "private",
  "protected",
  "override",
  "accessor",
  "get",
  "set",
];

impl<'a> Parser<'a> {
  pub fn type_expr(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    self.nested(|p| match p.peek().typ {
      TT::ChevronLeft => p.function_type(),
      TT::KeywordNew => p.constructor_type(),
      TT::KeywordAbstract if p.peek_2().1.typ == TT::KeywordNew => {
        p.consume();
        p.constructor_type()
      }
      TT::ParenthesisOpen if p.is_start_of_function_type() => p.function_type(),
      _ => p.union_type(),
    })
  }

  /// Whether the upcoming `(` opens a function type's parameter list rather than a parenthesized type.
  fn is_start_of_function_type(&mut self) -> bool {
    let (_, b, c, d) = self.peek_4();
    match b.typ {
      TT::ParenthesisClose | TT::DotDotDot => true,
      tt if tt.is_identifier_like() || tt == TT::KeywordThis => match c.typ {
        TT::Colon | TT::Comma | TT::Question | TT::Equals => true,
        TT::ParenthesisClose => d.typ == TT::EqualsChevronRight,
        _ => false,
      },
      _ => false,
    }
  }

  /// Parse function type: <t>(x: t) => u
  fn function_type(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    self.with_loc(|p| {
      let type_parameters = p.maybe_type_parameters()?;
      let parameters = p.function_parameters()?;
      p.require(TT::EqualsChevronRight)?;
      let return_type = p.type_expr()?;
      Ok(TypeExpr::Function(TypeFunction {
        type_parameters,
        parameters,
        return_type,
      }))
    })
  }

  /// Parse constructor type: new (x: t) => u
  fn constructor_type(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    self.with_loc(|p| {
      p.require(TT::KeywordNew)?;
      let type_parameters = p.maybe_type_parameters()?;
      let parameters = p.function_parameters()?;
      p.require(TT::EqualsChevronRight)?;
      let return_type = p.type_expr()?;
      Ok(TypeExpr::Constructor(TypeFunction {
        type_parameters,
        parameters,
        return_type,
      }))
    })
  }

  fn union_type(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let start = self.checkpoint();
    // A leading `|` is permitted, e.g. for multi-line unions.
    let _ = self.consume_if(TT::Bar);
    let first = self.intersection_type()?;
    if self.peek().typ != TT::Bar {
      return Ok(first);
    };
    let mut types = vec![first];
    while self.consume_if(TT::Bar).is_match() {
      types.push(self.intersection_type()?);
    }
    Ok(Node::new(
      self.since_checkpoint(&start),
      TypeExpr::Union(TypeUnion { types }),
    ))
  }

  fn intersection_type(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let start = self.checkpoint();
    let _ = self.consume_if(TT::Ampersand);
    let first = self.type_operator()?;
    if self.peek().typ != TT::Ampersand {
      return Ok(first);
    };
    let mut types = vec![first];
    while self.consume_if(TT::Ampersand).is_match() {
      types.push(self.type_operator()?);
    }
    Ok(Node::new(
      self.since_checkpoint(&start),
      TypeExpr::Intersection(TypeIntersection { types }),
    ))
  }

  /// Parses `keyof T`, `readonly T[]`, or a postfix type.
  fn type_operator(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    match self.peek().typ {
      TT::KeywordKeyof => self.with_loc(|p| {
        p.consume();
        let type_expr = p.nested(|p| p.type_operator())?;
        Ok(TypeExpr::KeyOf(TypeKeyOf { type_expr }))
      }),
      TT::KeywordReadonly => {
        let t = self.consume();
        let mut operand = self.nested(|p| p.type_operator())?;
        let applied = match operand.stx.as_mut() {
          TypeExpr::Array(array) => {
            array.readonly = true;
            true
          }
          TypeExpr::Tuple(tuple) => {
            tuple.readonly = true;
            true
          }
          _ => false,
        };
        if !applied {
          return Err(operand.error(SyntaxErrorType::ExpectedSyntax(
            "array or tuple type after readonly",
          )));
        };
        operand.loc.0 = t.loc.0;
        Ok(operand)
      }
      _ => self.postfix_type(),
    }
  }

  /// Parses array suffixes `T[]` and indexed access `T[K]`.
  fn postfix_type(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let start = self.checkpoint();
    let mut ty = self.primary_type()?;
    loop {
      let t = self.peek();
      // A `[` on a new line starts a new member rather than continuing this type.
      if t.typ != TT::BracketOpen || t.preceded_by_line_terminator {
        break;
      };
      self.consume();
      let stx = if self.consume_if(TT::BracketClose).is_match() {
        TypeExpr::Array(TypeArray {
          readonly: false,
          element_type: ty,
        })
      } else {
        let index_type = self.type_expr()?;
        self.require(TT::BracketClose)?;
        TypeExpr::IndexedAccess(TypeIndexedAccess {
          object_type: ty,
          index_type,
        })
      };
      ty = Node::new(self.since_checkpoint(&start), stx);
    }
    Ok(ty)
  }

  fn primary_type(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let t = self.peek();
    match t.typ {
      TT::BraceOpen => self.with_loc(|p| {
        let members = p.type_members()?;
        Ok(TypeExpr::Object(TypeObjectLiteral { members }))
      }),
      TT::BracketOpen => self.with_loc(|p| {
        p.consume();
        let elements = p.type_expr_list(TT::BracketClose)?;
        Ok(TypeExpr::Tuple(TypeTuple {
          readonly: false,
          elements,
        }))
      }),
      TT::ParenthesisOpen => self.with_loc(|p| {
        p.consume();
        let type_expr = p.type_expr()?;
        p.require(TT::ParenthesisClose)?;
        Ok(TypeExpr::Parenthesized(TypeParenthesized { type_expr }))
      }),
      TT::LiteralString => self.with_loc(|p| {
        let value = p.lit_str_val()?;
        Ok(TypeExpr::Literal(TypeLiteral::String(value)))
      }),
      TT::LiteralNumber => self.with_loc(|p| {
        let raw = p.lit_num_raw()?;
        Ok(TypeExpr::Literal(TypeLiteral::Number(raw)))
      }),
      TT::Hyphen => self.with_loc(|p| {
        p.consume();
        let raw = p.lit_num_raw()?;
        Ok(TypeExpr::Literal(TypeLiteral::Number(format!("-{raw}"))))
      }),
      TT::LiteralTrue | TT::LiteralFalse => self.with_loc(|p| {
        let value = p.consume().typ == TT::LiteralTrue;
        Ok(TypeExpr::Literal(TypeLiteral::Boolean(value)))
      }),
      TT::KeywordThis => self.with_loc(|p| {
        p.consume();
        Ok(TypeExpr::This)
      }),
      TT::KeywordTypeof => self.with_loc(|p| {
        p.consume();
        let expr_name = p.type_entity_name()?;
        Ok(TypeExpr::Query(TypeQuery { expr_name }))
      }),
      tt if tt.is_identifier_like() => self.type_reference(),
      _ => Err(self.token_error(&t, SyntaxErrorType::ExpectedSyntax("type"))),
    }
  }

  fn type_entity_name(&mut self) -> SyntaxResult<TypeEntityName> {
    let mut name = TypeEntityName::Identifier(self.require_identifier()?);
    while self.peek().typ == TT::Dot {
      self.consume();
      let t = self.require_predicate(|tt| tt.is_identifier_like() || tt.is_keyword(), "identifier")?;
      name = TypeEntityName::Qualified(Box::new(TypeQualifiedName {
        left: name,
        right: self.string(t.loc),
      }));
    }
    Ok(name)
  }

  /// Parse type reference: Foo, Foo<t>, A.B<t, u>
  pub fn type_reference(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    self.with_loc(|p| {
      let name = p.type_entity_name()?;
      let type_arguments = if p.consume_if(TT::ChevronLeft).is_match() {
        Some(p.type_expr_list(TT::ChevronRight)?)
      } else {
        None
      };
      Ok(TypeExpr::Reference(TypeReference {
        name,
        type_arguments,
      }))
    })
  }

  /// Parses comma-separated types up to and including `close`. The opening token must already be consumed.
  fn type_expr_list(&mut self, close: TT) -> SyntaxResult<Vec<Node<TypeExpr>>> {
    let mut types = Vec::new();
    while !self.consume_if(close).is_match() {
      types.push(self.type_expr()?);
      if !self.consume_if(TT::Comma).is_match() {
        self.require(close)?;
        break;
      };
    }
    Ok(types)
  }

  pub fn maybe_type_parameters(&mut self) -> SyntaxResult<Option<Vec<Node<TypeParameter>>>> {
    if !self.consume_if(TT::ChevronLeft).is_match() {
      return Ok(None);
    };
    let params = self.list_with_loc(TT::Comma, TT::ChevronRight, |p| {
      let name = p.require_identifier()?;
      let constraint = if p.consume_if(TT::KeywordExtends).is_match() {
        Some(p.type_expr()?)
      } else {
        None
      };
      let default = if p.consume_if(TT::Equals).is_match() {
        Some(p.type_expr()?)
      } else {
        None
      };
      Ok(TypeParameter {
        name,
        constraint,
        default,
      })
    })?;
    Ok(Some(params))
  }

  /// Parses a parenthesized parameter list, including both parentheses.
  pub fn function_parameters(&mut self) -> SyntaxResult<Vec<Node<TypeFunctionParameter>>> {
    self.require(TT::ParenthesisOpen)?;
    self.list_with_loc(TT::Comma, TT::ParenthesisClose, |p| {
      let rest = p.consume_if(TT::DotDotDot).is_match();
      let t = p.require_predicate(
        |tt| tt.is_identifier_like() || tt == TT::KeywordThis,
        "parameter name",
      )?;
      let name = p.string(t.loc);
      let optional = p.consume_if(TT::Question).is_match();
      let type_expr = if p.consume_if(TT::Colon).is_match() {
        Some(p.type_expr()?)
      } else {
        None
      };
      Ok(TypeFunctionParameter {
        name,
        optional,
        rest,
        type_expr,
      })
    })
  }

  /// Parses a braced member list, as found in object types and interface bodies.
  pub fn type_members(&mut self) -> SyntaxResult<Vec<Node<TypeMember>>> {
    self.member_list(false)
  }

  /// Like [`Parser::type_members`], but skips access and `static` modifiers.
  pub fn class_members(&mut self) -> SyntaxResult<Vec<Node<TypeMember>>> {
    self.member_list(true)
  }

  fn member_list(&mut self, class: bool) -> SyntaxResult<Vec<Node<TypeMember>>> {
    self.require(TT::BraceOpen)?;
    let mut members = Vec::new();
    loop {
      // Stray separators, e.g. `;;` in class bodies.
      while self.consume_if(TT::Semicolon).is_match() {}
      if self.consume_if(TT::BraceClose).is_match() {
        break;
      };
      members.push(self.with_loc(|p| p.type_member(class))?);
      if self.consume_if(TT::Semicolon).is_match() || self.consume_if(TT::Comma).is_match() {
        continue;
      };
      let t = self.peek();
      if t.typ != TT::BraceClose && !t.preceded_by_line_terminator {
        return Err(self.token_error(&t, SyntaxErrorType::RequiredTokenNotFound(TT::Semicolon)));
      };
    }
    Ok(members)
  }

  fn type_member(&mut self, class: bool) -> SyntaxResult<TypeMember> {
    if class {
      self.skip_class_modifiers();
    };
    let (a, b, c) = self.peek_3();
    match (a.typ, b.typ) {
      (TT::ParenthesisOpen | TT::ChevronLeft, _) => {
        return Ok(TypeMember::Call(self.call_signature()?));
      }
      (TT::KeywordNew, TT::ParenthesisOpen | TT::ChevronLeft) => {
        self.consume();
        return Ok(TypeMember::Construct(self.call_signature()?));
      }
      _ => {}
    };
    // `readonly` is a modifier unless it is itself the key, e.g. `readonly: boolean`.
    let readonly = a.typ == TT::KeywordReadonly
      && !matches!(
        b.typ,
        TT::Colon | TT::Question | TT::ParenthesisOpen | TT::ChevronLeft | TT::Semicolon | TT::Comma
      );
    if readonly {
      self.consume();
    };
    let (a, b, c) = if readonly { self.peek_3() } else { (a, b, c) };
    if a.typ == TT::BracketOpen && b.typ.is_identifier_like() && c.typ == TT::Colon {
      return Ok(TypeMember::Index(self.index_signature(readonly)?));
    };
    let key = self.member_key()?;
    let optional = self.consume_if(TT::Question).is_match();
    if matches!(self.peek().typ, TT::ParenthesisOpen | TT::ChevronLeft) {
      let TypeCallSignature {
        type_parameters,
        parameters,
        return_type,
      } = self.call_signature()?;
      return Ok(TypeMember::Method(TypeMethodSignature {
        key,
        optional,
        type_parameters,
        parameters,
        return_type,
      }));
    };
    let type_annotation = if self.consume_if(TT::Colon).is_match() {
      Some(self.type_expr()?)
    } else {
      None
    };
    // Class properties may carry an initializer in declaration files, e.g. `static readonly x = 1;`.
    if class && self.consume_if(TT::Equals).is_match() {
      self.primary_type()?;
    };
    Ok(TypeMember::Property(TypePropertySignature {
      readonly,
      key,
      optional,
      type_annotation,
    }))
  }

  fn skip_class_modifiers(&mut self) {
    loop {
      let (a, b) = self.peek_2();
      let is_modifier = match a.typ {
        TT::KeywordAbstract | TT::KeywordDeclare => true,
        TT::Identifier => CLASS_MODIFIERS.contains(&self.str(a.loc)),
        _ => false,
      };
      if !is_modifier || !(is_member_key(b.typ) || b.typ == TT::BracketOpen) {
        break;
      };
      self.consume();
    }
  }

  fn member_key(&mut self) -> SyntaxResult<String> {
    let t = self.peek();
    match t.typ {
      TT::LiteralString => self.lit_str_val(),
      TT::LiteralNumber => self.lit_num_raw(),
      // Computed keys such as `[Symbol.iterator]` keep their brackets.
      TT::BracketOpen => {
        self.consume();
        let name = self.type_entity_name()?.dotted();
        self.require(TT::BracketClose)?;
        Ok(format!("[{name}]"))
      }
      tt if is_member_key(tt) => {
        self.consume();
        Ok(self.string(t.loc))
      }
      _ => Err(self.token_error(&t, SyntaxErrorType::ExpectedSyntax("member name"))),
    }
  }

  fn call_signature(&mut self) -> SyntaxResult<TypeCallSignature> {
    let type_parameters = self.maybe_type_parameters()?;
    let parameters = self.function_parameters()?;
    let return_type = if self.consume_if(TT::Colon).is_match() {
      Some(self.type_expr()?)
    } else {
      None
    };
    Ok(TypeCallSignature {
      type_parameters,
      parameters,
      return_type,
    })
  }

  fn index_signature(&mut self, readonly: bool) -> SyntaxResult<TypeIndexSignature> {
    self.require(TT::BracketOpen)?;
    let parameter_name = self.require_identifier()?;
    self.require(TT::Colon)?;
    let parameter_type = self.type_expr()?;
    self.require(TT::BracketClose)?;
    self.require(TT::Colon)?;
    let type_annotation = self.type_expr()?;
    Ok(TypeIndexSignature {
      readonly,
      parameter_name,
      parameter_type,
      type_annotation,
    })
  }
}
