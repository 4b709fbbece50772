//! ECMAScript Parser
//!
//! Recursive descent for statements, precedence climbing for binary
//! operators. Arrow functions and destructuring assignment are resolved by
//! speculative parsing: the attempt runs from a lexer checkpoint and, on
//! failure, the cursor is restored and the partial tree dropped. Failed
//! attempts are remembered by position so nested heads are tried once.

mod expression;
mod pattern;
mod statement;

use std::collections::HashSet;

use crate::ast::{IdentifierNode, Loc, Program};
use crate::error::SyntaxError;
use crate::lexer::Lexer;
use crate::token::{Span, Token, TokenKind};

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Maximum nesting of statements and assignment expressions
const MAX_NESTING: u32 = 256;

/// Grammar parameters that change inside functions and `for` heads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
struct Context {
    in_function: bool,
    in_generator: bool,
    in_async: bool,
    /// `in` is a binary operator here (false inside `for (...;` initializers)
    allow_in: bool,
}

/// What a speculative attempt tries to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Speculation {
    /// Destructuring target followed by `=`
    AssignmentTarget,
    /// Destructuring target followed by `in` or `of`
    ForTarget,
    /// Arrow parameters followed by `=>`
    ArrowHead,
    /// `async` arrow parameters followed by `=>`
    AsyncArrowHead,
}

/// ECMAScript Parser
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    source: &'src str,
    current: Token,
    previous: Token,
    context: Context,
    /// Attempts known to fail: token start, kind and grammar context
    failed: HashSet<(u32, Speculation, Context)>,
    depth: u32,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> ParseResult<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            source,
            current,
            previous: Token::new(TokenKind::Eof, Span::new(0, 0)),
            context: Context { allow_in: true, ..Context::default() },
            failed: HashSet::new(),
            depth: 0,
        })
    }

    /// Parse a complete program
    pub fn parse(mut self) -> ParseResult<Program> {
        let mut body = Vec::new();

        while !self.check(&TokenKind::Eof) {
            body.push(self.parse_statement()?);
        }

        Ok(Program {
            start: 0,
            end: self.source.len() as u32,
            body,
        })
    }

    fn advance(&mut self) -> ParseResult<()> {
        let next = self.lexer.next_token()?;
        self.previous = std::mem::replace(&mut self.current, next);
        Ok(())
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    fn check_identifier(&self, name: &str) -> bool {
        matches!(&self.current.kind, TokenKind::Identifier(s) if &**s == name)
    }

    /// Consume the current token if it matches
    fn eat(&mut self, kind: &TokenKind) -> ParseResult<bool> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn consume(&mut self, kind: TokenKind) -> ParseResult<()> {
        if self.check(&kind) {
            self.advance()
        } else {
            Err(self.unexpected())
        }
    }

    /// Look at the token after `current` without consuming anything
    fn peek(&self) -> ParseResult<Token> {
        Ok(self.lexer.clone().next_token()?)
    }

    fn unexpected(&self) -> SyntaxError {
        SyntaxError::unexpected_token(&self.current, self.source)
    }

    fn start(&self) -> u32 {
        self.current.span.start
    }

    /// Wrap `item` in a span from `start` to the end of the last consumed token
    fn finish<T>(&self, start: u32, item: T) -> Loc<T> {
        Loc::new(start, self.previous.span.end, item)
    }

    /// Statement terminator with automatic semicolon insertion
    fn consume_semicolon(&mut self) -> ParseResult<()> {
        if self.eat(&TokenKind::Semicolon)? || self.at_statement_end() {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// A statement may end here without an explicit `;`
    fn at_statement_end(&self) -> bool {
        self.current.newline_before
            || matches!(self.current.kind, TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof)
    }

    /// Run `attempt` from a snapshot of the cursor. On failure the cursor
    /// is restored and the partial result discarded.
    fn speculate<T>(
        &mut self,
        kind: Speculation,
        attempt: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> Option<T> {
        let key = (self.current.span.start, kind, self.context);
        if self.failed.contains(&key) {
            return None;
        }

        let checkpoint = self.lexer.checkpoint();
        let current = self.current.clone();
        let previous = self.previous.clone();
        let context = self.context;

        match attempt(self) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::trace!(position = current.span.start, ?kind, %err, "Speculative parse rewound");
                self.lexer.rewind(checkpoint);
                self.current = current;
                self.previous = previous;
                self.context = context;
                self.failed.insert(key);
                None
            }
        }
    }

    /// Run `f` one nesting level deeper, failing past [`MAX_NESTING`]
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_NESTING {
            let span = self.current.span;
            return Err(SyntaxError::invalid(span.start, span.end, "nesting too deep"));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Operand position: `/` and `/=` start a regular expression here
    fn rescan_regex(&mut self) -> ParseResult<()> {
        if matches!(self.current.kind, TokenKind::Slash | TokenKind::SlashEq) {
            self.current = self.lexer.rescan_as_regex(&self.current)?;
        }
        Ok(())
    }

    /// Operator position: a regular expression guess here is a division
    fn rescan_divide(&mut self) {
        if matches!(self.current.kind, TokenKind::Regex(_)) {
            self.current = self.lexer.rescan_as_divide(&self.current);
        }
    }

    fn with_context<T>(
        &mut self,
        context: Context,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let saved = std::mem::replace(&mut self.context, context);
        let result = f(self);
        self.context = saved;
        result
    }

    fn with_in<T>(&mut self, allow_in: bool, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        let context = Context { allow_in, ..self.context };
        self.with_context(context, f)
    }

    /// Binding or label name; keywords are rejected
    fn expect_identifier(&mut self) -> ParseResult<IdentifierNode> {
        let name = match &self.current.kind {
            TokenKind::Identifier(name) => name.clone(),
            kind if kind.is_keyword() => {
                return Err(SyntaxError::reserved_word(&self.current, self.source));
            }
            _ => return Err(self.unexpected()),
        };
        if (self.context.in_generator && &*name == "yield") || (self.context.in_async && &*name == "await") {
            return Err(SyntaxError::reserved_word(&self.current, self.source));
        }
        let span = self.current.span;
        self.advance()?;
        Ok(Loc::at(span, name))
    }

    /// Property name after `.`; any identifier name including keywords
    fn expect_property_name(&mut self) -> ParseResult<IdentifierNode> {
        let name: Box<str> = match &self.current.kind {
            TokenKind::Identifier(name) => name.clone(),
            kind => match kind.as_str() {
                Some(word) if kind.is_keyword() => word.into(),
                _ => return Err(self.unexpected()),
            },
        };
        let span = self.current.span;
        self.advance()?;
        Ok(Loc::at(span, name))
    }
}
