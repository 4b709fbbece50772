//! Statements, declarations, functions and classes

use super::{Context, ParseResult, Parser, Speculation};
use crate::ast::{
    Block, CatchClause, Class, ClassMember, Declarator, ForInit, Function, Loc, MethodKind,
    PatternNode, PropertyKey, Statement, StatementNode, SwitchCase, Value, VarKind,
};
use crate::error::SyntaxError;
use crate::token::TokenKind;

impl<'src> Parser<'src> {
    pub(super) fn parse_statement(&mut self) -> ParseResult<StatementNode> {
        self.nested(Self::parse_statement_kind)
    }

    fn parse_statement_kind(&mut self) -> ParseResult<StatementNode> {
        let start = self.start();
        match self.current.kind {
            TokenKind::LBrace => {
                let block = self.parse_block()?;
                Ok(Loc::new(block.start, block.end, Statement::Block { body: block.item.body }))
            }
            TokenKind::Var | TokenKind::Let | TokenKind::Const => {
                let (kind, declarators) = self.parse_variable_declaration()?;
                self.consume_semicolon()?;
                Ok(self.finish(start, Statement::Declaration { kind, declarators }))
            }
            TokenKind::Function => {
                let function = self.parse_function(start, false, true)?;
                Ok(Loc::new(function.start, function.end, Statement::Function { function: function.item }))
            }
            TokenKind::Class => {
                let class = self.parse_class(true)?;
                Ok(Loc::new(class.start, class.end, Statement::Class { class: class.item }))
            }
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Do => self.parse_do_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Break | TokenKind::Continue => self.parse_jump_statement(),
            TokenKind::Throw => self.parse_throw_statement(),
            TokenKind::Try => self.parse_try_statement(),
            TokenKind::Switch => self.parse_switch_statement(),
            TokenKind::Semicolon => {
                self.advance()?;
                Ok(self.finish(start, Statement::Empty))
            }
            TokenKind::Debugger => {
                self.advance()?;
                self.consume_semicolon()?;
                Ok(self.finish(start, Statement::Debugger))
            }
            TokenKind::Identifier(_) => self.parse_identifier_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// Statement starting with an identifier: `async function`, a label,
    /// or a plain expression
    fn parse_identifier_statement(&mut self) -> ParseResult<StatementNode> {
        let start = self.start();
        let next = self.peek()?;

        if self.check_identifier("async") && matches!(next.kind, TokenKind::Function) && !next.newline_before {
            self.advance()?; // async
            let function = self.parse_function(start, true, true)?;
            return Ok(Loc::new(function.start, function.end, Statement::Function { function: function.item }));
        }

        if matches!(next.kind, TokenKind::Colon) {
            let label = self.expect_identifier()?;
            self.advance()?; // :
            let body = Box::new(self.parse_statement()?);
            return Ok(self.finish(start, Statement::Labeled { label, body }));
        }

        self.parse_expression_statement()
    }

    fn parse_expression_statement(&mut self) -> ParseResult<StatementNode> {
        let start = self.start();
        let expression = self.parse_expression()?;
        self.consume_semicolon()?;
        Ok(self.finish(start, Statement::Expression { expression }))
    }

    pub(super) fn parse_block(&mut self) -> ParseResult<Loc<Block>> {
        let start = self.start();
        self.consume(TokenKind::LBrace)?;

        let mut body = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.check(&TokenKind::Eof) {
            body.push(self.parse_statement()?);
        }
        self.consume(TokenKind::RBrace)?;

        Ok(self.finish(start, Block { body }))
    }

    /// `var` / `let` / `const` and its declarators, without the terminator.
    /// Initializers honor the current `in` restriction.
    pub(super) fn parse_variable_declaration(&mut self) -> ParseResult<(VarKind, Vec<Loc<Declarator>>)> {
        let kind = match self.current.kind {
            TokenKind::Var => VarKind::Var,
            TokenKind::Let => VarKind::Let,
            TokenKind::Const => VarKind::Const,
            _ => return Err(self.unexpected()),
        };
        self.advance()?;

        let mut declarators = Vec::new();
        loop {
            let start = self.start();
            let id = self.parse_binding_target()?;
            let init = if self.eat(&TokenKind::Eq)? {
                Some(self.parse_assignment()?)
            } else {
                None
            };
            declarators.push(self.finish(start, Declarator { id, init }));

            if !self.eat(&TokenKind::Comma)? {
                break;
            }
        }

        Ok((kind, declarators))
    }

    fn parse_if_statement(&mut self) -> ParseResult<StatementNode> {
        let start = self.start();
        self.advance()?; // if
        self.consume(TokenKind::LParen)?;
        let test = self.parse_expression()?;
        self.consume(TokenKind::RParen)?;

        let consequent = Box::new(self.parse_statement()?);
        let alternate = if self.eat(&TokenKind::Else)? {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(self.finish(start, Statement::If { test, consequent, alternate }))
    }

    fn parse_while_statement(&mut self) -> ParseResult<StatementNode> {
        let start = self.start();
        self.advance()?; // while
        self.consume(TokenKind::LParen)?;
        let test = self.parse_expression()?;
        self.consume(TokenKind::RParen)?;
        let body = Box::new(self.parse_statement()?);

        Ok(self.finish(start, Statement::While { test, body }))
    }

    fn parse_do_while_statement(&mut self) -> ParseResult<StatementNode> {
        let start = self.start();
        self.advance()?; // do
        let body = Box::new(self.parse_statement()?);
        self.consume(TokenKind::While)?;
        self.consume(TokenKind::LParen)?;
        let test = self.parse_expression()?;
        self.consume(TokenKind::RParen)?;
        // The terminator after `do-while` is always optional
        self.eat(&TokenKind::Semicolon)?;

        Ok(self.finish(start, Statement::Do { body, test }))
    }

    fn parse_for_statement(&mut self) -> ParseResult<StatementNode> {
        let start = self.start();
        self.advance()?; // for
        self.consume(TokenKind::LParen)?;

        let mut init = None;
        if !self.check(&TokenKind::Semicolon) {
            let head = self.parse_for_head()?;

            if self.check(&TokenKind::In) || self.check_identifier("of") {
                let is_of = !self.check(&TokenKind::In);
                let left = Box::new(self.for_left(head)?);
                self.advance()?; // in / of
                let right = if is_of {
                    self.parse_assignment()?
                } else {
                    self.parse_expression()?
                };
                self.consume(TokenKind::RParen)?;
                let body = Box::new(self.parse_statement()?);

                let item = if is_of {
                    Statement::ForOf { left, right, body }
                } else {
                    Statement::ForIn { left, right, body }
                };
                return Ok(self.finish(start, item));
            }

            init = Some(Box::new(head));
        }

        self.consume(TokenKind::Semicolon)?;
        let test = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume(TokenKind::Semicolon)?;
        let update = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume(TokenKind::RParen)?;
        let body = Box::new(self.parse_statement()?);

        Ok(self.finish(start, Statement::For { init, test, update, body }))
    }

    /// First clause of a `for` head, parsed with `in` disabled
    fn parse_for_head(&mut self) -> ParseResult<Loc<ForInit>> {
        let start = self.start();
        self.with_in(false, |p| {
            if matches!(p.current.kind, TokenKind::Var | TokenKind::Let | TokenKind::Const) {
                let (kind, declarators) = p.parse_variable_declaration()?;
                return Ok(p.finish(start, ForInit::Declaration { kind, declarators }));
            }

            if matches!(p.current.kind, TokenKind::LBracket | TokenKind::LBrace) {
                let pattern = p.speculate(Speculation::ForTarget, |p| {
                    let target = p.parse_assignment_pattern()?;
                    if p.check(&TokenKind::In) || p.check_identifier("of") {
                        Ok(target)
                    } else {
                        Err(p.unexpected())
                    }
                });
                if let Some(pattern) = pattern {
                    return Ok(Loc::new(pattern.start, pattern.end, ForInit::Pattern(pattern.item)));
                }
            }

            let expression = p.parse_expression()?;
            Ok(Loc::new(expression.start, expression.end, ForInit::Expression(expression.item)))
        })
    }

    /// Validate a `for` head as the left side of `for-in` / `for-of`
    fn for_left(&self, head: Loc<ForInit>) -> ParseResult<Loc<ForInit>> {
        let Loc { start, end, item } = head;
        match item {
            ForInit::Expression(expression) => {
                let target = self.expression_to_target(Loc::new(start, end, expression))?;
                Ok(Loc::new(start, end, ForInit::Pattern(target.item)))
            }
            ForInit::Declaration { ref declarators, .. } if declarators.len() != 1 => {
                Err(SyntaxError::invalid(start, end, "only one binding allowed in a for-in/of head"))
            }
            item => Ok(Loc::new(start, end, item)),
        }
    }

    fn parse_return_statement(&mut self) -> ParseResult<StatementNode> {
        if !self.context.in_function {
            return Err(self.unexpected());
        }
        let start = self.start();
        self.advance()?; // return

        let value = if self.at_statement_end() {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume_semicolon()?;

        Ok(self.finish(start, Statement::Return { value }))
    }

    fn parse_jump_statement(&mut self) -> ParseResult<StatementNode> {
        let start = self.start();
        let is_break = self.check(&TokenKind::Break);
        self.advance()?;

        let label = if matches!(self.current.kind, TokenKind::Identifier(_)) && !self.current.newline_before {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        self.consume_semicolon()?;

        let item = if is_break {
            Statement::Break { label }
        } else {
            Statement::Continue { label }
        };
        Ok(self.finish(start, item))
    }

    fn parse_throw_statement(&mut self) -> ParseResult<StatementNode> {
        let start = self.start();
        self.advance()?; // throw
        if self.current.newline_before {
            return Err(self.unexpected());
        }
        let value = self.parse_expression()?;
        self.consume_semicolon()?;

        Ok(self.finish(start, Statement::Throw { value }))
    }

    fn parse_try_statement(&mut self) -> ParseResult<StatementNode> {
        let start = self.start();
        self.advance()?; // try
        let block = self.parse_block()?;

        let handler = if self.check(&TokenKind::Catch) {
            let catch_start = self.start();
            self.advance()?;
            let param = if self.eat(&TokenKind::LParen)? {
                let param = self.parse_binding_target()?;
                self.consume(TokenKind::RParen)?;
                Some(param)
            } else {
                None
            };
            let body = self.parse_block()?;
            Some(self.finish(catch_start, CatchClause { param, body }))
        } else {
            None
        };

        let finalizer = if self.eat(&TokenKind::Finally)? {
            Some(self.parse_block()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(self.unexpected());
        }

        Ok(self.finish(start, Statement::Try { block, handler, finalizer }))
    }

    fn parse_switch_statement(&mut self) -> ParseResult<StatementNode> {
        let start = self.start();
        self.advance()?; // switch
        self.consume(TokenKind::LParen)?;
        let discriminant = self.parse_expression()?;
        self.consume(TokenKind::RParen)?;
        self.consume(TokenKind::LBrace)?;

        let mut cases = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            cases.push(self.parse_switch_case()?);
        }
        self.consume(TokenKind::RBrace)?;

        Ok(self.finish(start, Statement::Switch { discriminant, cases }))
    }

    fn parse_switch_case(&mut self) -> ParseResult<Loc<SwitchCase>> {
        let start = self.start();

        let test = if self.eat(&TokenKind::Case)? {
            Some(self.parse_expression()?)
        } else if self.eat(&TokenKind::Default)? {
            None
        } else {
            return Err(self.unexpected());
        };

        self.consume(TokenKind::Colon)?;

        let mut consequent = Vec::new();
        while !matches!(
            self.current.kind,
            TokenKind::Case | TokenKind::Default | TokenKind::RBrace | TokenKind::Eof
        ) {
            consequent.push(self.parse_statement()?);
        }

        Ok(self.finish(start, SwitchCase { test, consequent }))
    }

    /// `function` declaration or expression. `start` covers a leading
    /// `async` that the caller already consumed.
    pub(super) fn parse_function(&mut self, start: u32, is_async: bool, is_declaration: bool) -> ParseResult<Loc<Function>> {
        self.consume(TokenKind::Function)?;
        let is_generator = self.eat(&TokenKind::Star)?;

        let name = if is_declaration || !self.check(&TokenKind::LParen) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let (params, body) = self.parse_function_rest(is_async, is_generator)?;

        Ok(self.finish(start, Function { name, is_generator, is_async, params, body }))
    }

    /// Method value: a nameless function spanning parameters and body
    pub(super) fn parse_method(&mut self, is_async: bool, is_generator: bool) -> ParseResult<Loc<Function>> {
        let start = self.start();
        let (params, body) = self.parse_function_rest(is_async, is_generator)?;
        Ok(self.finish(start, Function { name: None, is_generator, is_async, params, body }))
    }

    fn parse_function_rest(&mut self, is_async: bool, is_generator: bool) -> ParseResult<(Vec<PatternNode>, Loc<Block>)> {
        let context = Context {
            in_function: true,
            in_generator: is_generator,
            in_async: is_async,
            allow_in: true,
        };
        self.with_context(context, |p| {
            let params = p.parse_formal_parameters()?;
            let body = p.parse_block()?;
            Ok((params, body))
        })
    }

    /// `class` declaration or expression
    pub(super) fn parse_class(&mut self, is_declaration: bool) -> ParseResult<Loc<Class>> {
        let start = self.start();
        self.consume(TokenKind::Class)?;

        let name = if is_declaration || matches!(self.current.kind, TokenKind::Identifier(_)) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let extends = if self.eat(&TokenKind::Extends)? {
            Some(Box::new(self.parse_left_hand_side()?))
        } else {
            None
        };

        let body_start = self.start();
        self.consume(TokenKind::LBrace)?;
        let members = self.with_in(true, |p| {
            let mut members = Vec::new();
            while !p.check(&TokenKind::RBrace) {
                if p.eat(&TokenKind::Semicolon)? {
                    continue;
                }
                members.push(p.parse_class_member()?);
            }
            Ok(members)
        })?;
        self.consume(TokenKind::RBrace)?;
        let body = self.finish(body_start, members);

        Ok(self.finish(start, Class { name, extends, body }))
    }

    fn parse_class_member(&mut self) -> ParseResult<Loc<ClassMember>> {
        let start = self.start();

        let mut is_static = false;
        if self.check_identifier("static") {
            let next = self.peek()?;
            if !matches!(
                next.kind,
                TokenKind::LParen | TokenKind::Eq | TokenKind::Semicolon | TokenKind::RBrace
            ) {
                self.advance()?;
                is_static = true;
            }
        }

        let (is_async, is_generator, accessor) = self.parse_method_modifiers()?;
        let key = self.parse_property_key()?;

        if is_async || is_generator || accessor.is_some() || self.check(&TokenKind::LParen) {
            let kind = match accessor {
                Some(kind) => kind,
                None if !is_static && !is_async && !is_generator && is_constructor_key(&key.item) => {
                    MethodKind::Constructor
                }
                None => MethodKind::Method,
            };
            let value = self.parse_method(is_async, is_generator)?;
            return Ok(self.finish(start, ClassMember::Method { is_static, key, kind, value }));
        }

        let value = if self.eat(&TokenKind::Eq)? {
            let context = Context { allow_in: true, ..Context::default() };
            Some(self.with_context(context, |p| p.parse_assignment())?)
        } else {
            None
        };
        self.consume_semicolon()?;

        Ok(self.finish(start, ClassMember::Field { is_static, key, value }))
    }
}

fn is_constructor_key(key: &PropertyKey) -> bool {
    match key {
        PropertyKey::Identifier(name) => &**name == "constructor",
        PropertyKey::Literal(Value::String(raw)) => &raw[1..raw.len() - 1] == "constructor",
        _ => false,
    }
}
