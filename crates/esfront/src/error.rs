//! Error Types
//!
//! Lexing and parsing are all-or-nothing: the first failure aborts the
//! call with a single error carrying the byte offset of the problem.

use crate::token::Token;
use std::fmt::Write;

/// Lexer error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("unexpected character `{ch}` at {position}")]
    UnexpectedCharacter { ch: char, position: u32 },

    #[error("unterminated {what} starting at {start}")]
    Unterminated { what: &'static str, start: u32 },
}

impl LexError {
    pub fn position(&self) -> u32 {
        match self {
            LexError::UnexpectedCharacter { position, .. } => *position,
            LexError::Unterminated { start, .. } => *start,
        }
    }
}

/// Syntax error category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The lexer could not classify the input at this position
    UnexpectedCharacter,
    /// A token that is not valid in the current grammatical position
    UnexpectedToken,
    /// A keyword used where an identifier is required
    ReservedWordMisuse,
}

/// Parse error returned by every entry point.
///
/// The message always starts with `Unexpected token`; callers match on it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub kind: ErrorKind,
    pub message: String,
    pub start: u32,
    pub end: u32,
}

impl SyntaxError {
    /// Unexpected token error, described from its source text
    pub fn unexpected_token(token: &Token, source: &str) -> Self {
        Self {
            kind: ErrorKind::UnexpectedToken,
            message: format!("Unexpected token {} at {}", describe(token, source), token.span.start),
            start: token.span.start,
            end: token.span.end,
        }
    }

    /// Keyword found where a binding or label name was expected
    pub fn reserved_word(token: &Token, source: &str) -> Self {
        Self {
            kind: ErrorKind::ReservedWordMisuse,
            message: format!(
                "Unexpected token {} at {}: reserved word cannot be used as an identifier",
                describe(token, source),
                token.span.start
            ),
            start: token.span.start,
            end: token.span.end,
        }
    }

    /// Structurally invalid construct made of otherwise valid tokens
    /// (e.g. `1 = 2`, `-a ** b`)
    pub fn invalid(start: u32, end: u32, what: &str) -> Self {
        Self {
            kind: ErrorKind::UnexpectedToken,
            message: format!("Unexpected token at {}: {}", start, what),
            start,
            end,
        }
    }

    /// Render a code frame pointing at the failing token
    pub fn render(&self, source: &str) -> String {
        let start = clamp_to_boundary(source, self.start as usize);
        let end = clamp_to_boundary(source, (self.end as usize).max(start));

        let before = &source[..start];
        let line_index = before.matches('\n').count();
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = source[line_start..start].chars().count();
        let underline = source[start..end]
            .split('\n')
            .next()
            .map_or(0, |t| t.chars().count())
            .max(1);

        let lines: Vec<&str> = source.split('\n').collect();
        let first = line_index.saturating_sub(2);
        let last = (line_index + 2).min(lines.len().saturating_sub(1));
        let width = (last + 1).to_string().len();

        let mut out = String::new();
        let _ = writeln!(out, "Unexpected token at {}:{}\n", line_index + 1, column + 1);
        for (index, line) in lines.iter().enumerate().take(last + 1).skip(first) {
            let line = line.trim_end_matches('\r');
            if index == line_index {
                let _ = writeln!(out, "> {:>width$} | {}", index + 1, line, width = width);
                let _ = writeln!(
                    out,
                    "  {:width$} | {}{}",
                    "",
                    " ".repeat(column),
                    "^".repeat(underline),
                    width = width
                );
            } else {
                let _ = writeln!(out, "  {:>width$} | {}", index + 1, line, width = width);
            }
        }
        out
    }
}

impl From<LexError> for SyntaxError {
    fn from(err: LexError) -> Self {
        let position = err.position();
        Self {
            kind: ErrorKind::UnexpectedCharacter,
            message: format!("Unexpected token: {}", err),
            start: position,
            end: position,
        }
    }
}

fn describe(token: &Token, source: &str) -> String {
    let category = token.kind.category();
    if token.span.is_empty() {
        return category.to_string();
    }
    let text = source
        .get(token.span.start as usize..token.span.end as usize)
        .unwrap_or_default();
    format!("{} `{}`", category, text)
}

fn clamp_to_boundary(source: &str, mut index: usize) -> usize {
    index = index.min(source.len());
    while !source.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Span, TokenKind};

    #[test]
    fn test_unexpected_token_message() {
        let token = Token::new(TokenKind::Function, Span::new(9, 17));
        let err = SyntaxError::unexpected_token(&token, "function function () {}");
        assert_eq!(err.message, "Unexpected token keyword `function` at 9");
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_end_of_input_message() {
        let token = Token::new(TokenKind::Eof, Span::new(3, 3));
        let err = SyntaxError::unexpected_token(&token, "a +");
        assert_eq!(err.message, "Unexpected token end of input at 3");
    }

    #[test]
    fn test_lex_error_conversion() {
        let err: SyntaxError = LexError::UnexpectedCharacter { ch: '@', position: 2 }.into();
        assert_eq!(err.kind, ErrorKind::UnexpectedCharacter);
        assert!(err.message.starts_with("Unexpected token"));
        assert_eq!(err.start, 2);
    }

    #[test]
    fn test_render_code_frame() {
        let token = Token::new(TokenKind::Identifier("foo".into()), Span::new(0, 3));
        let err = SyntaxError::unexpected_token(&token, "foo");
        assert_eq!(err.render("foo"), "Unexpected token at 1:1\n\n> 1 | foo\n    | ^^^\n");
    }

    #[test]
    fn test_render_context_lines() {
        let source = "a;\nb;\nc d;\ne;";
        let err = SyntaxError::invalid(8, 9, "test");
        let frame = err.render(source);
        assert!(frame.starts_with("Unexpected token at 3:3\n"));
        assert!(frame.contains("> 3 | c d;\n"));
        assert!(frame.contains("  1 | a;\n"));
        assert!(frame.contains("  4 | e;\n"));
    }
}
