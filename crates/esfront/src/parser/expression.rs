//! Expressions
//!
//! Binary operators use precedence climbing over
//! [`TokenKind::precedence`]; everything else is recursive descent.

use super::pattern::identifier_pattern;
use super::{Context, ParseResult, Parser, Speculation};
use crate::ast::{
    ArrowBody, AssignOp, BinaryOp, Expression, ExpressionNode, Loc, LogicalOp, MethodKind,
    PatternNode, Property, PropertyKey, TemplateLiteral, UnaryOp, UpdateOp, Value,
};
use crate::error::SyntaxError;
use crate::token::TokenKind;

enum Operator {
    Binary(BinaryOp),
    Logical(LogicalOp),
}

fn binary_operator(kind: &TokenKind) -> Option<Operator> {
    let op = match kind {
        TokenKind::PipePipe => return Some(Operator::Logical(LogicalOp::Or)),
        TokenKind::AmpersandAmpersand => return Some(Operator::Logical(LogicalOp::And)),
        TokenKind::QuestionQuestion => return Some(Operator::Logical(LogicalOp::NullishCoalescing)),
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::LessThan => BinaryOp::LessThan,
        TokenKind::LessThanEq => BinaryOp::LessThanEq,
        TokenKind::GreaterThan => BinaryOp::GreaterThan,
        TokenKind::GreaterThanEq => BinaryOp::GreaterThanEq,
        TokenKind::EqEq => BinaryOp::Equal,
        TokenKind::NotEq => BinaryOp::NotEqual,
        TokenKind::EqEqEq => BinaryOp::StrictEqual,
        TokenKind::NotEqEq => BinaryOp::StrictNotEqual,
        TokenKind::LShift => BinaryOp::LeftShift,
        TokenKind::RShift => BinaryOp::RightShift,
        TokenKind::URShift => BinaryOp::UnsignedRightShift,
        TokenKind::Ampersand => BinaryOp::BitwiseAnd,
        TokenKind::Pipe => BinaryOp::BitwiseOr,
        TokenKind::Caret => BinaryOp::BitwiseXor,
        TokenKind::In => BinaryOp::In,
        TokenKind::Instanceof => BinaryOp::Instanceof,
        _ => return None,
    };
    Some(Operator::Binary(op))
}

fn assignment_operator(kind: &TokenKind) -> Option<AssignOp> {
    let op = match kind {
        TokenKind::Eq => AssignOp::Assign,
        TokenKind::PlusEq => AssignOp::AddAssign,
        TokenKind::MinusEq => AssignOp::SubAssign,
        TokenKind::StarEq => AssignOp::MulAssign,
        TokenKind::SlashEq => AssignOp::DivAssign,
        TokenKind::PercentEq => AssignOp::ModAssign,
        TokenKind::StarStarEq => AssignOp::PowAssign,
        TokenKind::LShiftEq => AssignOp::LeftShiftAssign,
        TokenKind::RShiftEq => AssignOp::RightShiftAssign,
        TokenKind::URShiftEq => AssignOp::UnsignedRightShiftAssign,
        TokenKind::AmpersandEq => AssignOp::BitwiseAndAssign,
        TokenKind::PipeEq => AssignOp::BitwiseOrAssign,
        TokenKind::CaretEq => AssignOp::BitwiseXorAssign,
        TokenKind::AmpersandAmpersandEq => AssignOp::AndAssign,
        TokenKind::PipePipeEq => AssignOp::OrAssign,
        TokenKind::QuestionQuestionEq => AssignOp::NullishAssign,
        _ => return None,
    };
    Some(op)
}

fn unary_operator(kind: &TokenKind) -> Option<UnaryOp> {
    let op = match kind {
        TokenKind::Minus => UnaryOp::Minus,
        TokenKind::Plus => UnaryOp::Plus,
        TokenKind::Bang => UnaryOp::Not,
        TokenKind::Tilde => UnaryOp::BitwiseNot,
        TokenKind::Typeof => UnaryOp::Typeof,
        TokenKind::Void => UnaryOp::Void,
        TokenKind::Delete => UnaryOp::Delete,
        _ => return None,
    };
    Some(op)
}

fn update_operator(kind: &TokenKind) -> Option<UpdateOp> {
    match kind {
        TokenKind::PlusPlus => Some(UpdateOp::Increment),
        TokenKind::MinusMinus => Some(UpdateOp::Decrement),
        _ => None,
    }
}

impl<'src> Parser<'src> {
    /// Comma-separated sequence
    pub(super) fn parse_expression(&mut self) -> ParseResult<ExpressionNode> {
        let start = self.start();
        let first = self.parse_assignment()?;
        if !self.check(&TokenKind::Comma) {
            return Ok(first);
        }

        let mut body = vec![first];
        while self.eat(&TokenKind::Comma)? {
            body.push(self.parse_assignment()?);
        }

        Ok(self.finish(start, Expression::Sequence { body }))
    }

    pub(super) fn parse_assignment(&mut self) -> ParseResult<ExpressionNode> {
        self.nested(Self::parse_assignment_expression)
    }

    fn parse_assignment_expression(&mut self) -> ParseResult<ExpressionNode> {
        if self.context.in_generator && self.check_identifier("yield") {
            return self.parse_yield();
        }

        if let Some(arrow) = self.try_parse_arrow()? {
            return Ok(arrow);
        }

        let start = self.start();

        if matches!(self.current.kind, TokenKind::LBracket | TokenKind::LBrace) {
            let target = self.speculate(Speculation::AssignmentTarget, |p| {
                let target = p.parse_assignment_pattern()?;
                if p.check(&TokenKind::Eq) {
                    Ok(target)
                } else {
                    Err(p.unexpected())
                }
            });
            if let Some(target) = target {
                self.advance()?; // =
                let right = self.parse_assignment()?;
                return Ok(self.finish(start, Expression::Assignment {
                    operator: AssignOp::Assign,
                    left: Box::new(target),
                    right: Box::new(right),
                }));
            }
        }

        let left = self.parse_conditional()?;
        let Some(operator) = assignment_operator(&self.current.kind) else {
            return Ok(left);
        };
        let target = self.expression_to_target(left)?;
        self.advance()?;
        let right = self.parse_assignment()?;

        Ok(self.finish(start, Expression::Assignment {
            operator,
            left: Box::new(target),
            right: Box::new(right),
        }))
    }

    fn parse_yield(&mut self) -> ParseResult<ExpressionNode> {
        let start = self.start();
        self.advance()?; // yield

        let delegate = !self.current.newline_before && self.eat(&TokenKind::Star)?;
        let has_argument = delegate
            || !(self.current.newline_before
                || matches!(
                    self.current.kind,
                    TokenKind::RParen
                        | TokenKind::RBracket
                        | TokenKind::RBrace
                        | TokenKind::Comma
                        | TokenKind::Semicolon
                        | TokenKind::Colon
                        | TokenKind::Eof
                        | TokenKind::TemplateMiddle(_)
                        | TokenKind::TemplateTail(_)
                ));

        let argument = if has_argument {
            Some(Box::new(self.parse_assignment()?))
        } else {
            None
        };

        Ok(self.finish(start, Expression::Yield { argument, delegate }))
    }

    /// Arrow function, if one starts here.
    ///
    /// `x =>` is recognized with one token of lookahead; parenthesized and
    /// `async` heads are parsed speculatively up to the `=>`.
    fn try_parse_arrow(&mut self) -> ParseResult<Option<ExpressionNode>> {
        let start = self.start();

        let head = match self.current.kind {
            TokenKind::LParen => self
                .speculate(Speculation::ArrowHead, |p| p.parse_arrow_head())
                .map(|params| (false, params)),
            TokenKind::Identifier(_) => {
                let next = self.peek()?;
                if matches!(next.kind, TokenKind::Arrow) && !next.newline_before {
                    let param = identifier_pattern(self.expect_identifier()?);
                    self.advance()?; // =>
                    Some((false, vec![param]))
                } else if self.check_identifier("async")
                    && !next.newline_before
                    && matches!(next.kind, TokenKind::Identifier(_) | TokenKind::LParen)
                {
                    self.speculate(Speculation::AsyncArrowHead, |p| {
                        p.advance()?; // async
                        Ok((true, p.parse_arrow_head()?))
                    })
                } else {
                    None
                }
            }
            _ => None,
        };

        let Some((is_async, params)) = head else {
            return Ok(None);
        };

        let context = Context {
            in_function: true,
            in_generator: false,
            in_async: is_async,
            allow_in: self.context.allow_in,
        };
        let body = self.with_context(context, |p| {
            if p.check(&TokenKind::LBrace) {
                p.with_in(true, |p| p.parse_block()).map(ArrowBody::Block)
            } else {
                p.parse_assignment().map(|e| ArrowBody::Expression(Box::new(e)))
            }
        })?;

        Ok(Some(self.finish(start, Expression::Arrow { is_async, params, body })))
    }

    /// Parameters followed by `=>` on the same line
    fn parse_arrow_head(&mut self) -> ParseResult<Vec<PatternNode>> {
        let params = if self.check(&TokenKind::LParen) {
            self.parse_formal_parameters()?
        } else {
            vec![identifier_pattern(self.expect_identifier()?)]
        };
        if !self.check(&TokenKind::Arrow) || self.current.newline_before {
            return Err(self.unexpected());
        }
        self.advance()?; // =>
        Ok(params)
    }

    fn parse_conditional(&mut self) -> ParseResult<ExpressionNode> {
        let start = self.start();
        let test = self.parse_binary(0)?;
        if !self.eat(&TokenKind::Question)? {
            return Ok(test);
        }

        let consequent = self.with_in(true, |p| p.parse_assignment())?;
        self.consume(TokenKind::Colon)?;
        let alternate = self.parse_assignment()?;

        Ok(self.finish(start, Expression::Conditional {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        }))
    }

    /// Left-associative binary operators binding tighter than `min_precedence`
    fn parse_binary(&mut self, min_precedence: u8) -> ParseResult<ExpressionNode> {
        let start = self.start();
        let mut left = self.parse_exponentiation()?;

        loop {
            self.rescan_divide();
            let precedence = self.current.kind.precedence();
            if precedence <= min_precedence || (!self.context.allow_in && self.check(&TokenKind::In)) {
                break;
            }
            let Some(operator) = binary_operator(&self.current.kind) else {
                break;
            };
            self.advance()?;
            let right = Box::new(self.parse_binary(precedence)?);
            let left_operand = Box::new(left);

            let item = match operator {
                Operator::Binary(operator) => Expression::Binary { operator, left: left_operand, right },
                Operator::Logical(operator) => Expression::Logical { operator, left: left_operand, right },
            };
            left = self.finish(start, item);
        }

        Ok(left)
    }

    /// Right-associative `**`. Its base may not be an unparenthesized unary
    /// expression.
    fn parse_exponentiation(&mut self) -> ParseResult<ExpressionNode> {
        let start = self.start();
        let unary_base = unary_operator(&self.current.kind).is_some()
            || (self.context.in_async && self.check_identifier("await"));

        let left = self.parse_unary()?;
        if !self.check(&TokenKind::StarStar) {
            return Ok(left);
        }
        if unary_base {
            return Err(SyntaxError::invalid(
                start,
                self.current.span.end,
                "unary operand of `**` must be parenthesized",
            ));
        }

        self.advance()?; // **
        let right = self.parse_exponentiation()?;

        Ok(self.finish(start, Expression::Binary {
            operator: BinaryOp::Pow,
            left: Box::new(left),
            right: Box::new(right),
        }))
    }

    fn parse_unary(&mut self) -> ParseResult<ExpressionNode> {
        let start = self.start();

        if let Some(operator) = unary_operator(&self.current.kind) {
            self.advance()?;
            let argument = Box::new(self.nested(Self::parse_unary)?);
            return Ok(self.finish(start, Expression::Unary { operator, argument }));
        }

        if let Some(operator) = update_operator(&self.current.kind) {
            self.advance()?;
            let argument = self.nested(Self::parse_unary)?;
            check_update_target(&argument)?;
            return Ok(self.finish(start, Expression::Update {
                operator,
                prefix: true,
                argument: Box::new(argument),
            }));
        }

        if self.context.in_async && self.check_identifier("await") {
            self.advance()?;
            let argument = Box::new(self.nested(Self::parse_unary)?);
            return Ok(self.finish(start, Expression::Await { argument }));
        }

        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> ParseResult<ExpressionNode> {
        let start = self.start();
        let expression = self.parse_left_hand_side()?;

        let Some(operator) = update_operator(&self.current.kind) else {
            return Ok(expression);
        };
        if self.current.newline_before {
            return Ok(expression);
        }
        check_update_target(&expression)?;
        self.advance()?;

        Ok(self.finish(start, Expression::Update {
            operator,
            prefix: false,
            argument: Box::new(expression),
        }))
    }

    /// Call, member and `new` expressions
    pub(super) fn parse_left_hand_side(&mut self) -> ParseResult<ExpressionNode> {
        let start = self.start();
        let expression = if self.check(&TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        self.parse_member_tail(start, expression, true)
    }

    fn parse_new(&mut self) -> ParseResult<ExpressionNode> {
        let start = self.start();
        self.consume(TokenKind::New)?;

        let callee_start = self.start();
        let callee = if self.check(&TokenKind::New) {
            self.nested(Self::parse_new)?
        } else {
            self.parse_primary()?
        };
        let callee = self.parse_member_tail(callee_start, callee, false)?;

        let arguments = if self.check(&TokenKind::LParen) {
            self.parse_arguments()?
        } else {
            Vec::new()
        };

        Ok(self.finish(start, Expression::New { callee: Box::new(callee), arguments }))
    }

    fn parse_member_tail(&mut self, start: u32, mut expression: ExpressionNode, allow_call: bool) -> ParseResult<ExpressionNode> {
        loop {
            expression = match self.current.kind {
                TokenKind::Dot => {
                    self.advance()?;
                    let property = self.expect_property_name()?;
                    self.finish(start, Expression::Member { object: Box::new(expression), property })
                }
                TokenKind::LBracket => {
                    self.advance()?;
                    let property = self.with_in(true, |p| p.parse_expression())?;
                    self.consume(TokenKind::RBracket)?;
                    self.finish(start, Expression::ComputedMember {
                        object: Box::new(expression),
                        property: Box::new(property),
                    })
                }
                TokenKind::LParen if allow_call => {
                    let arguments = self.parse_arguments()?;
                    self.finish(start, Expression::Call { callee: Box::new(expression), arguments })
                }
                TokenKind::NoSubstitutionTemplate(_) | TokenKind::TemplateHead(_) => {
                    let quasi = self.parse_template()?;
                    self.finish(start, Expression::TaggedTemplate { tag: Box::new(expression), quasi })
                }
                _ => return Ok(expression),
            };
        }
    }

    fn parse_arguments(&mut self) -> ParseResult<Vec<ExpressionNode>> {
        self.consume(TokenKind::LParen)?;
        let arguments = self.with_in(true, |p| {
            let mut arguments = Vec::new();
            while !p.check(&TokenKind::RParen) {
                arguments.push(if p.check(&TokenKind::DotDotDot) {
                    p.parse_spread()?
                } else {
                    p.parse_assignment()?
                });
                if !p.check(&TokenKind::RParen) {
                    p.consume(TokenKind::Comma)?;
                }
            }
            Ok(arguments)
        })?;
        self.consume(TokenKind::RParen)?;
        Ok(arguments)
    }

    fn parse_spread(&mut self) -> ParseResult<ExpressionNode> {
        let start = self.start();
        self.consume(TokenKind::DotDotDot)?;
        let argument = Box::new(self.parse_assignment()?);
        Ok(self.finish(start, Expression::Spread { argument }))
    }

    fn parse_primary(&mut self) -> ParseResult<ExpressionNode> {
        self.rescan_regex()?;
        let start = self.start();

        match self.current.kind {
            TokenKind::LParen => {
                self.advance()?;
                let expression = self.with_in(true, |p| p.parse_expression())?;
                self.consume(TokenKind::RParen)?;
                return Ok(expression);
            }
            TokenKind::LBracket => return self.parse_array_literal(),
            TokenKind::LBrace => return self.parse_object_literal(),
            TokenKind::Function => {
                let function = self.parse_function(start, false, false)?;
                return Ok(Loc::new(function.start, function.end, Expression::Function { function: function.item }));
            }
            TokenKind::Class => {
                let class = self.parse_class(false)?;
                return Ok(Loc::new(class.start, class.end, Expression::Class { class: class.item }));
            }
            TokenKind::NoSubstitutionTemplate(_) | TokenKind::TemplateHead(_) => {
                let template = self.parse_template()?;
                return Ok(Loc::new(template.start, template.end, Expression::Template(template.item)));
            }
            _ => {}
        }

        if self.check_identifier("async") {
            let next = self.peek()?;
            if matches!(next.kind, TokenKind::Function) && !next.newline_before {
                self.advance()?; // async
                let function = self.parse_function(start, true, false)?;
                return Ok(Loc::new(function.start, function.end, Expression::Function { function: function.item }));
            }
        }

        let item = match &self.current.kind {
            TokenKind::This => Expression::This,
            TokenKind::Super => Expression::Super,
            TokenKind::Identifier(name) => Expression::Identifier(name.clone()),
            TokenKind::Number(raw) => Expression::Value(Value::Number(raw.clone())),
            TokenKind::String(raw) => Expression::Value(Value::String(raw.clone())),
            TokenKind::Regex(raw) => Expression::Value(Value::RegEx(raw.clone())),
            TokenKind::Boolean(value) => Expression::Value(Value::Boolean(*value)),
            TokenKind::Null => Expression::Value(Value::Null),
            _ => return Err(self.unexpected()),
        };
        self.advance()?;

        Ok(self.finish(start, item))
    }

    fn parse_array_literal(&mut self) -> ParseResult<ExpressionNode> {
        let start = self.start();
        self.consume(TokenKind::LBracket)?;

        let body = self.with_in(true, |p| {
            let mut body = Vec::new();
            while !p.check(&TokenKind::RBracket) {
                if p.eat(&TokenKind::Comma)? {
                    body.push(None);
                    continue;
                }
                let element = if p.check(&TokenKind::DotDotDot) {
                    p.parse_spread()?
                } else {
                    p.parse_assignment()?
                };
                body.push(Some(element));
                if !p.check(&TokenKind::RBracket) {
                    p.consume(TokenKind::Comma)?;
                }
            }
            Ok(body)
        })?;
        self.consume(TokenKind::RBracket)?;

        Ok(self.finish(start, Expression::Array { body }))
    }

    fn parse_object_literal(&mut self) -> ParseResult<ExpressionNode> {
        let start = self.start();
        self.consume(TokenKind::LBrace)?;

        let body = self.with_in(true, |p| {
            let mut body = Vec::new();
            while !p.check(&TokenKind::RBrace) {
                body.push(p.parse_object_member()?);
                if !p.check(&TokenKind::RBrace) {
                    p.consume(TokenKind::Comma)?;
                }
            }
            Ok(body)
        })?;
        self.consume(TokenKind::RBrace)?;

        Ok(self.finish(start, Expression::Object { body }))
    }

    fn parse_object_member(&mut self) -> ParseResult<Loc<Property>> {
        let start = self.start();

        if self.eat(&TokenKind::DotDotDot)? {
            let argument = self.parse_assignment()?;
            return Ok(self.finish(start, Property::Spread { argument }));
        }

        let (is_async, is_generator, accessor) = self.parse_method_modifiers()?;
        let shorthand = match &self.current.kind {
            TokenKind::Identifier(name) => Some(name.clone()),
            _ => None,
        };
        let key = self.parse_property_key()?;

        if is_async || is_generator || accessor.is_some() || self.check(&TokenKind::LParen) {
            let kind = accessor.unwrap_or(MethodKind::Method);
            let value = self.parse_method(is_async, is_generator)?;
            return Ok(self.finish(start, Property::Method { key, kind, value }));
        }

        if self.eat(&TokenKind::Colon)? {
            let value = self.parse_assignment()?;
            return Ok(self.finish(start, Property::Literal { key, value }));
        }

        match shorthand {
            Some(name) => Ok(self.finish(start, Property::Shorthand(name))),
            None => Err(self.unexpected()),
        }
    }

    /// Leading `async`, `*`, `get` or `set` of a method definition.
    ///
    /// A modifier word directly followed by `(`, `:`, `=`, `,` or `}` is
    /// the property name itself.
    pub(super) fn parse_method_modifiers(&mut self) -> ParseResult<(bool, bool, Option<MethodKind>)> {
        let mut is_async = false;
        let mut accessor = None;

        if self.check_identifier("async") || self.check_identifier("get") || self.check_identifier("set") {
            let next = self.peek()?;
            let starts_key = next.kind.is_keyword()
                || matches!(
                    next.kind,
                    TokenKind::Identifier(_)
                        | TokenKind::String(_)
                        | TokenKind::Number(_)
                        | TokenKind::LBracket
                        | TokenKind::Star
                );

            if self.check_identifier("async") {
                if starts_key && !next.newline_before {
                    self.advance()?;
                    is_async = true;
                }
            } else if starts_key && !matches!(next.kind, TokenKind::Star) {
                accessor = Some(if self.check_identifier("get") { MethodKind::Get } else { MethodKind::Set });
                self.advance()?;
            }
        }

        let is_generator = self.eat(&TokenKind::Star)?;
        Ok((is_async, is_generator, accessor))
    }

    /// Object or class member key
    pub(super) fn parse_property_key(&mut self) -> ParseResult<Loc<PropertyKey>> {
        let start = self.start();

        if self.eat(&TokenKind::LBracket)? {
            let expression = self.with_in(true, |p| p.parse_assignment())?;
            self.consume(TokenKind::RBracket)?;
            return Ok(self.finish(start, PropertyKey::Computed(expression)));
        }

        let key = match &self.current.kind {
            TokenKind::Identifier(name) => PropertyKey::Identifier(name.clone()),
            TokenKind::String(raw) => PropertyKey::Literal(Value::String(raw.clone())),
            TokenKind::Number(raw) => PropertyKey::Literal(Value::Number(raw.clone())),
            kind => match kind.as_str() {
                Some(word) if kind.is_keyword() => PropertyKey::Identifier(word.into()),
                _ => return Err(self.unexpected()),
            },
        };
        self.advance()?;

        Ok(self.finish(start, key))
    }

    /// Template literal starting at the current head token
    fn parse_template(&mut self) -> ParseResult<Loc<TemplateLiteral>> {
        let start = self.start();
        let mut quasis = Vec::new();
        let mut expressions = Vec::new();

        let span = self.current.span;
        match &self.current.kind {
            TokenKind::NoSubstitutionTemplate(raw) => {
                quasis.push(Loc::new(span.start + 1, span.end - 1, raw.clone()));
                self.advance()?;
                return Ok(self.finish(start, TemplateLiteral { quasis, expressions }));
            }
            TokenKind::TemplateHead(raw) => {
                quasis.push(Loc::new(span.start + 1, span.end - 2, raw.clone()));
            }
            _ => return Err(self.unexpected()),
        }
        self.advance()?;

        loop {
            expressions.push(self.with_in(true, |p| p.parse_expression())?);

            let span = self.current.span;
            let (raw, tail) = match &self.current.kind {
                TokenKind::TemplateMiddle(raw) => (raw.clone(), false),
                TokenKind::TemplateTail(raw) => (raw.clone(), true),
                _ => return Err(self.unexpected()),
            };
            let quasi_end = if tail { span.end - 1 } else { span.end - 2 };
            quasis.push(Loc::new(span.start + 1, quasi_end, raw));
            self.advance()?;

            if tail {
                break;
            }
        }

        Ok(self.finish(start, TemplateLiteral { quasis, expressions }))
    }
}

fn check_update_target(expression: &ExpressionNode) -> ParseResult<()> {
    if expression.item.is_simple_target() {
        Ok(())
    } else {
        Err(SyntaxError::invalid(expression.start, expression.end, "invalid update target"))
    }
}
