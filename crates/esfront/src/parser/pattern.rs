//! Binding and assignment patterns

use super::{ParseResult, Parser};
use crate::ast::{Expression, ExpressionNode, IdentifierNode, Loc, Pattern, PatternNode, PatternProperty};
use crate::error::SyntaxError;
use crate::token::TokenKind;

/// Where a pattern appears. Binding patterns only bind identifiers;
/// assignment patterns may also target member expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PatternKind {
    Binding,
    Assignment,
}

pub(super) fn identifier_pattern(id: IdentifierNode) -> PatternNode {
    Loc::new(id.start, id.end, Pattern::Identifier(id.item))
}

impl<'src> Parser<'src> {
    /// Declarator, parameter or catch binding target
    pub(super) fn parse_binding_target(&mut self) -> ParseResult<PatternNode> {
        self.parse_target(PatternKind::Binding)
    }

    /// Destructuring assignment target (`[a.b, c] = ...`)
    pub(super) fn parse_assignment_pattern(&mut self) -> ParseResult<PatternNode> {
        self.parse_target(PatternKind::Assignment)
    }

    /// Parenthesized formal parameter list
    pub(super) fn parse_formal_parameters(&mut self) -> ParseResult<Vec<PatternNode>> {
        self.consume(TokenKind::LParen)?;

        let mut params = Vec::new();
        while !self.check(&TokenKind::RParen) {
            if self.check(&TokenKind::DotDotDot) {
                params.push(self.parse_rest(PatternKind::Binding)?);
                break;
            }
            params.push(self.parse_element(PatternKind::Binding)?);
            if !self.check(&TokenKind::RParen) {
                self.consume(TokenKind::Comma)?;
            }
        }
        self.consume(TokenKind::RParen)?;

        Ok(params)
    }

    /// Reinterpret an already parsed expression as a simple assignment target
    pub(super) fn expression_to_target(&self, expression: ExpressionNode) -> ParseResult<PatternNode> {
        let Loc { start, end, item } = expression;
        match item {
            Expression::Identifier(name) => Ok(Loc::new(start, end, Pattern::Identifier(name))),
            item @ (Expression::Member { .. } | Expression::ComputedMember { .. }) => {
                Ok(Loc::new(start, end, Pattern::Expression(item)))
            }
            _ => Err(SyntaxError::invalid(start, end, "invalid assignment target")),
        }
    }

    fn parse_target(&mut self, kind: PatternKind) -> ParseResult<PatternNode> {
        match self.current.kind {
            TokenKind::LBracket => self.nested(|p| p.parse_array_pattern(kind)),
            TokenKind::LBrace => self.nested(|p| p.parse_object_pattern(kind)),
            _ if kind == PatternKind::Binding => Ok(identifier_pattern(self.expect_identifier()?)),
            _ => {
                let expression = self.parse_left_hand_side()?;
                self.expression_to_target(expression)
            }
        }
    }

    /// Target with an optional default value
    fn parse_element(&mut self, kind: PatternKind) -> ParseResult<PatternNode> {
        let start = self.start();
        let target = self.parse_target(kind)?;
        if !self.eat(&TokenKind::Eq)? {
            return Ok(target);
        }
        let right = self.with_in(true, |p| p.parse_assignment())?;
        Ok(self.finish(start, Pattern::Assignment {
            left: Box::new(target),
            right: Box::new(right),
        }))
    }

    fn parse_rest(&mut self, kind: PatternKind) -> ParseResult<PatternNode> {
        let start = self.start();
        self.consume(TokenKind::DotDotDot)?;
        let argument = self.parse_target(kind)?;
        Ok(self.finish(start, Pattern::Rest { argument: Box::new(argument) }))
    }

    fn parse_array_pattern(&mut self, kind: PatternKind) -> ParseResult<PatternNode> {
        let start = self.start();
        self.consume(TokenKind::LBracket)?;

        let mut elements = Vec::new();
        while !self.check(&TokenKind::RBracket) {
            if self.eat(&TokenKind::Comma)? {
                elements.push(None);
                continue;
            }
            if self.check(&TokenKind::DotDotDot) {
                // Rest must be last
                elements.push(Some(self.parse_rest(kind)?));
                break;
            }
            elements.push(Some(self.parse_element(kind)?));
            if !self.check(&TokenKind::RBracket) {
                self.consume(TokenKind::Comma)?;
            }
        }
        self.consume(TokenKind::RBracket)?;

        Ok(self.finish(start, Pattern::Array { elements }))
    }

    fn parse_object_pattern(&mut self, kind: PatternKind) -> ParseResult<PatternNode> {
        let start = self.start();
        self.consume(TokenKind::LBrace)?;

        let mut properties = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            let property_start = self.start();

            if self.eat(&TokenKind::DotDotDot)? {
                let argument = Box::new(self.parse_target(kind)?);
                properties.push(self.finish(property_start, PatternProperty::Rest { argument }));
                break;
            }

            let shorthand = match &self.current.kind {
                TokenKind::Identifier(name) => Some(name.clone()),
                _ => None,
            };
            let key = self.parse_property_key()?;

            let item = if self.eat(&TokenKind::Colon)? {
                let value = self.parse_element(kind)?;
                PatternProperty::Property { key, value, shorthand: false }
            } else {
                let Some(name) = shorthand else {
                    return Err(self.unexpected());
                };
                let mut value = Loc::new(key.start, key.end, Pattern::Identifier(name));
                if self.eat(&TokenKind::Eq)? {
                    let right = self.with_in(true, |p| p.parse_assignment())?;
                    value = self.finish(key.start, Pattern::Assignment {
                        left: Box::new(value),
                        right: Box::new(right),
                    });
                }
                PatternProperty::Property { key, value, shorthand: true }
            };
            properties.push(self.finish(property_start, item));

            if !self.check(&TokenKind::RBrace) {
                self.consume(TokenKind::Comma)?;
            }
        }
        self.consume(TokenKind::RBrace)?;

        Ok(self.finish(start, Pattern::Object { properties }))
    }
}
