//! ECMAScript Lexer
//!
//! Tokenizes source text lazily. Literal payloads are raw source slices;
//! nothing is decoded. The lexer is restartable through
//! [`Lexer::checkpoint`] / [`Lexer::rewind`].

use crate::error::LexError;
use crate::token::{keyword_from_str, Span, Token, TokenKind};

/// Restorable lexer position
#[derive(Debug, Clone)]
pub struct Checkpoint {
    pos: u32,
    regex_allowed: bool,
    templates: Vec<u32>,
}

/// ECMAScript Lexer
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    pos: u32,
    /// A `/` at this point starts a regular expression
    regex_allowed: bool,
    /// Open `${` depths, one entry per enclosing template substitution
    templates: Vec<u32>,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            regex_allowed: true,
            templates: Vec::new(),
        }
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            regex_allowed: self.regex_allowed,
            templates: self.templates.clone(),
        }
    }

    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.regex_allowed = checkpoint.regex_allowed;
        self.templates = checkpoint.templates;
    }

    /// Peek at the next character
    fn peek(&self) -> Option<char> {
        self.source[self.pos as usize..].chars().next()
    }

    /// Peek at the character after next
    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.pos as usize..].chars();
        iter.next();
        iter.next()
    }

    /// Advance to the next character
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8() as u32;
        Some(c)
    }

    /// Consume the next character if it matches
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skip whitespace and comments, reporting whether a line break was crossed
    fn skip_whitespace_and_comments(&mut self) -> Result<bool, LexError> {
        let mut newline = false;
        loop {
            match self.peek() {
                Some(c) if is_line_terminator(c) => {
                    self.advance();
                    newline = true;
                }
                Some(c) if c.is_whitespace() || c == '\u{feff}' => {
                    self.advance();
                }
                Some('/') => match self.peek_next() {
                    Some('/') => {
                        while matches!(self.peek(), Some(c) if !is_line_terminator(c)) {
                            self.advance();
                        }
                    }
                    Some('*') => {
                        let start = self.pos;
                        self.advance(); // /
                        self.advance(); // *
                        loop {
                            match self.advance() {
                                Some('*') if self.peek() == Some('/') => {
                                    self.advance();
                                    break;
                                }
                                Some(c) if is_line_terminator(c) => newline = true,
                                Some(_) => {}
                                None => {
                                    return Err(LexError::Unterminated { what: "comment", start });
                                }
                            }
                        }
                    }
                    _ => break,
                },
                _ => break,
            }
        }
        Ok(newline)
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let newline_before = self.skip_whitespace_and_comments()?;

        let start = self.pos;

        let Some(c) = self.advance() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                span: Span::new(start, start),
                newline_before: true,
            });
        };

        let kind = match c {
            c if is_identifier_start(c) => self.scan_identifier(start),

            '0'..='9' => self.scan_number(start),

            '"' | '\'' => self.scan_string(c, start)?,

            '`' => self.scan_template(start, true)?,

            '{' => {
                if let Some(depth) = self.templates.last_mut() {
                    *depth += 1;
                }
                TokenKind::LBrace
            }
            '}' => match self.templates.last_mut() {
                Some(0) => {
                    self.templates.pop();
                    self.scan_template(start, false)?
                }
                Some(depth) => {
                    *depth -= 1;
                    TokenKind::RBrace
                }
                None => TokenKind::RBrace,
            },
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '~' => TokenKind::Tilde,

            '.' => {
                if self.peek() == Some('.') && self.peek_next() == Some('.') {
                    self.advance();
                    self.advance();
                    TokenKind::DotDotDot
                } else if matches!(self.peek(), Some('0'..='9')) {
                    // Number starting with .
                    self.scan_decimal_number(start)
                } else {
                    TokenKind::Dot
                }
            }

            '?' => {
                if self.eat('?') {
                    if self.eat('=') {
                        TokenKind::QuestionQuestionEq
                    } else {
                        TokenKind::QuestionQuestion
                    }
                } else if self.peek() == Some('.') && !matches!(self.peek_next(), Some('0'..='9')) {
                    // `a?.5:b` is a conditional, not optional chaining
                    self.advance();
                    TokenKind::QuestionDot
                } else {
                    TokenKind::Question
                }
            }

            '+' => match self.peek() {
                Some('+') => { self.advance(); TokenKind::PlusPlus }
                Some('=') => { self.advance(); TokenKind::PlusEq }
                _ => TokenKind::Plus,
            },

            '-' => match self.peek() {
                Some('-') => { self.advance(); TokenKind::MinusMinus }
                Some('=') => { self.advance(); TokenKind::MinusEq }
                _ => TokenKind::Minus,
            },

            '*' => {
                if self.eat('*') {
                    if self.eat('=') {
                        TokenKind::StarStarEq
                    } else {
                        TokenKind::StarStar
                    }
                } else if self.eat('=') {
                    TokenKind::StarEq
                } else {
                    TokenKind::Star
                }
            }

            '/' => {
                if self.regex_allowed {
                    // A failed guess falls back to division; the parser
                    // re-reads it through `rescan_as_regex` when it expects
                    // an operand.
                    let body = self.pos;
                    match self.scan_regex(start) {
                        Ok(kind) => kind,
                        Err(_) => {
                            self.pos = body;
                            self.scan_slash()
                        }
                    }
                } else {
                    self.scan_slash()
                }
            }

            '%' => {
                if self.eat('=') {
                    TokenKind::PercentEq
                } else {
                    TokenKind::Percent
                }
            }

            '<' => {
                if self.eat('<') {
                    if self.eat('=') {
                        TokenKind::LShiftEq
                    } else {
                        TokenKind::LShift
                    }
                } else if self.eat('=') {
                    TokenKind::LessThanEq
                } else {
                    TokenKind::LessThan
                }
            }

            '>' => {
                if self.eat('>') {
                    if self.eat('>') {
                        if self.eat('=') {
                            TokenKind::URShiftEq
                        } else {
                            TokenKind::URShift
                        }
                    } else if self.eat('=') {
                        TokenKind::RShiftEq
                    } else {
                        TokenKind::RShift
                    }
                } else if self.eat('=') {
                    TokenKind::GreaterThanEq
                } else {
                    TokenKind::GreaterThan
                }
            }

            '=' => {
                if self.eat('=') {
                    if self.eat('=') {
                        TokenKind::EqEqEq
                    } else {
                        TokenKind::EqEq
                    }
                } else if self.eat('>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Eq
                }
            }

            '!' => {
                if self.eat('=') {
                    if self.eat('=') {
                        TokenKind::NotEqEq
                    } else {
                        TokenKind::NotEq
                    }
                } else {
                    TokenKind::Bang
                }
            }

            '&' => {
                if self.eat('&') {
                    if self.eat('=') {
                        TokenKind::AmpersandAmpersandEq
                    } else {
                        TokenKind::AmpersandAmpersand
                    }
                } else if self.eat('=') {
                    TokenKind::AmpersandEq
                } else {
                    TokenKind::Ampersand
                }
            }

            '|' => {
                if self.eat('|') {
                    if self.eat('=') {
                        TokenKind::PipePipeEq
                    } else {
                        TokenKind::PipePipe
                    }
                } else if self.eat('=') {
                    TokenKind::PipeEq
                } else {
                    TokenKind::Pipe
                }
            }

            '^' => {
                if self.eat('=') {
                    TokenKind::CaretEq
                } else {
                    TokenKind::Caret
                }
            }

            ch => return Err(LexError::UnexpectedCharacter { ch, position: start }),
        };

        self.regex_allowed = !kind.ends_operand();

        Ok(Token {
            kind,
            span: Span::new(start, self.pos),
            newline_before,
        })
    }

    /// Scan an identifier or keyword
    fn scan_identifier(&mut self, start: u32) -> TokenKind {
        while matches!(self.peek(), Some(c) if is_identifier_part(c)) {
            self.advance();
        }

        let text = &self.source[start as usize..self.pos as usize];

        keyword_from_str(text).unwrap_or_else(|| TokenKind::Identifier(text.into()))
    }

    /// Scan a number literal
    fn scan_number(&mut self, start: u32) -> TokenKind {
        let first_char = self.source.as_bytes()[start as usize];

        // Check for hex, octal, binary
        if first_char == b'0' {
            let radix = match self.peek() {
                Some('x' | 'X') => Some(16),
                Some('o' | 'O') => Some(8),
                Some('b' | 'B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                self.advance(); // prefix
                while matches!(self.peek(), Some(c) if c.is_digit(radix) || c == '_') {
                    self.advance();
                }
                self.eat('n');
                return self.raw_number(start);
            }
        }

        self.scan_decimal_number(start)
    }

    /// Decimal literal, `start` may point at a leading `.`
    fn scan_decimal_number(&mut self, start: u32) -> TokenKind {
        // Integer part
        while matches!(self.peek(), Some('0'..='9' | '_')) {
            self.advance();
        }

        // Fractional part
        if self.source.as_bytes()[start as usize] != b'.' && self.peek() == Some('.') {
            self.advance(); // .
            while matches!(self.peek(), Some('0'..='9' | '_')) {
                self.advance();
            }
        }

        // Exponent
        if matches!(self.peek(), Some('e' | 'E')) {
            let digits_follow = match self.peek_next() {
                Some('0'..='9') => true,
                Some('+' | '-') => {
                    let rest = &self.source.as_bytes()[self.pos as usize + 2..];
                    rest.first().is_some_and(u8::is_ascii_digit)
                }
                _ => false,
            };
            if digits_follow {
                self.advance(); // e
                if matches!(self.peek(), Some('+' | '-')) {
                    self.advance();
                }
                while matches!(self.peek(), Some('0'..='9' | '_')) {
                    self.advance();
                }
            }
        }

        // BigInt suffix
        self.eat('n');

        self.raw_number(start)
    }

    fn raw_number(&self, start: u32) -> TokenKind {
        TokenKind::Number(self.source[start as usize..self.pos as usize].into())
    }

    /// Scan a string literal, keeping quotes and escapes verbatim
    fn scan_string(&mut self, quote: char, start: u32) -> Result<TokenKind, LexError> {
        loop {
            match self.advance() {
                Some(c) if c == quote => break,
                Some('\\') => {
                    // Escaped character, including line continuations
                    if self.advance() == Some('\r') {
                        self.eat('\n');
                    }
                }
                Some('\n' | '\r') | None => {
                    return Err(LexError::Unterminated { what: "string", start });
                }
                Some(_) => {}
            }
        }
        Ok(TokenKind::String(self.source[start as usize..self.pos as usize].into()))
    }

    /// Scan a template chunk. `start` points at the opening backtick, or at
    /// the `}` closing a substitution when `head` is false.
    fn scan_template(&mut self, start: u32, head: bool) -> Result<TokenKind, LexError> {
        let body_start = self.pos as usize;

        loop {
            match self.peek() {
                Some('`') => {
                    let raw = self.source[body_start..self.pos as usize].into();
                    self.advance();
                    return Ok(if head {
                        TokenKind::NoSubstitutionTemplate(raw)
                    } else {
                        TokenKind::TemplateTail(raw)
                    });
                }
                Some('$') if self.peek_next() == Some('{') => {
                    let raw = self.source[body_start..self.pos as usize].into();
                    self.advance(); // $
                    self.advance(); // {
                    self.templates.push(0);
                    return Ok(if head {
                        TokenKind::TemplateHead(raw)
                    } else {
                        TokenKind::TemplateMiddle(raw)
                    });
                }
                Some('\\') => {
                    self.advance();
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
                None => return Err(LexError::Unterminated { what: "template", start }),
            }
        }
    }

    /// `/` or `/=` after the leading slash
    fn scan_slash(&mut self) -> TokenKind {
        if self.eat('=') {
            TokenKind::SlashEq
        } else {
            TokenKind::Slash
        }
    }

    /// Re-read a `/` or `/=` token as a regular expression literal.
    ///
    /// The lexer guesses regex-vs-divide from the previous token; the
    /// parser knows whether it expects an operand and corrects the guess.
    /// Only valid for the most recently returned token.
    pub fn rescan_as_regex(&mut self, token: &Token) -> Result<Token, LexError> {
        let start = token.span.start;
        self.pos = start + 1;
        let kind = self.scan_regex(start)?;
        self.regex_allowed = false;
        Ok(Token {
            kind,
            span: Span::new(start, self.pos),
            newline_before: token.newline_before,
        })
    }

    /// Re-read a regular expression token as `/` or `/=`
    pub fn rescan_as_divide(&mut self, token: &Token) -> Token {
        let start = token.span.start;
        self.pos = start + 1;
        let kind = self.scan_slash();
        self.regex_allowed = true;
        Token {
            kind,
            span: Span::new(start, self.pos),
            newline_before: token.newline_before,
        }
    }

    /// Scan a regular expression literal body and flags
    fn scan_regex(&mut self, start: u32) -> Result<TokenKind, LexError> {
        let mut in_class = false;
        loop {
            match self.advance() {
                Some('\\') => match self.advance() {
                    Some(c) if !is_line_terminator(c) => {}
                    _ => return Err(LexError::Unterminated { what: "regular expression", start }),
                },
                Some('[') => in_class = true,
                Some(']') => in_class = false,
                Some('/') if !in_class => break,
                Some(c) if is_line_terminator(c) => {
                    return Err(LexError::Unterminated { what: "regular expression", start });
                }
                Some(_) => {}
                None => return Err(LexError::Unterminated { what: "regular expression", start }),
            }
        }

        // Flags
        while matches!(self.peek(), Some(c) if is_identifier_part(c)) {
            self.advance();
        }

        Ok(TokenKind::Regex(self.source[start as usize..self.pos as usize].into()))
    }

    /// Tokenize all remaining input
    pub fn tokenize_all(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$' || (!c.is_ascii() && c.is_alphabetic())
}

fn is_identifier_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$' || (!c.is_ascii() && c.is_alphanumeric())
}
