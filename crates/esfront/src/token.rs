//! Token Types
//!
//! ECMAScript token definitions. Literal payloads keep the exact source
//! text so the printer can reproduce them verbatim.

/// Source span (byte offsets, half-open)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Token with kind and span
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// A line terminator separates this token from the previous one
    pub newline_before: bool,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span, newline_before: false }
    }
}

/// Token kinds for ECMAScript
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals (raw source text)
    Number(Box<str>),
    String(Box<str>),
    Regex(Box<str>),
    Boolean(bool),
    Null,

    Identifier(Box<str>),

    // Keywords
    Break,
    Case,
    Catch,
    Class,
    Const,
    Continue,
    Debugger,
    Default,
    Delete,
    Do,
    Else,
    Enum,
    Export,
    Extends,
    Finally,
    For,
    Function,
    If,
    Import,
    In,
    Instanceof,
    Let,
    New,
    Return,
    Super,
    Switch,
    This,
    Throw,
    Try,
    Typeof,
    Var,
    Void,
    While,
    With,

    // Punctuators
    LBrace,      // {
    RBrace,      // }
    LParen,      // (
    RParen,      // )
    LBracket,    // [
    RBracket,    // ]
    Dot,         // .
    DotDotDot,   // ...
    Semicolon,   // ;
    Comma,       // ,
    Colon,       // :
    Question,    // ?
    QuestionDot, // ?.
    QuestionQuestion, // ??
    Arrow,       // =>

    // Operators
    Plus,        // +
    Minus,       // -
    Star,        // *
    StarStar,    // **
    Slash,       // /
    Percent,     // %
    PlusPlus,    // ++
    MinusMinus,  // --
    LessThan,    // <
    LessThanEq,  // <=
    GreaterThan, // >
    GreaterThanEq, // >=
    EqEq,        // ==
    NotEq,       // !=
    EqEqEq,      // ===
    NotEqEq,     // !==
    Ampersand,   // &
    Pipe,        // |
    Caret,       // ^
    Tilde,       // ~
    AmpersandAmpersand, // &&
    PipePipe,    // ||
    Bang,        // !
    LShift,      // <<
    RShift,      // >>
    URShift,     // >>>

    // Assignment
    Eq,          // =
    PlusEq,      // +=
    MinusEq,     // -=
    StarEq,      // *=
    StarStarEq,  // **=
    SlashEq,     // /=
    PercentEq,   // %=
    AmpersandEq, // &=
    PipeEq,      // |=
    CaretEq,     // ^=
    LShiftEq,    // <<=
    RShiftEq,    // >>=
    URShiftEq,   // >>>=
    AmpersandAmpersandEq, // &&=
    PipePipeEq,  // ||=
    QuestionQuestionEq, // ??=

    // Template literal chunks (raw text between the delimiters)
    TemplateHead(Box<str>),
    TemplateMiddle(Box<str>),
    TemplateTail(Box<str>),
    NoSubstitutionTemplate(Box<str>),

    Eof,
}

impl TokenKind {
    /// Check if this is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(self,
            TokenKind::Break | TokenKind::Case | TokenKind::Catch |
            TokenKind::Class | TokenKind::Const | TokenKind::Continue |
            TokenKind::Debugger | TokenKind::Default | TokenKind::Delete |
            TokenKind::Do | TokenKind::Else | TokenKind::Enum |
            TokenKind::Export | TokenKind::Extends | TokenKind::Finally |
            TokenKind::For | TokenKind::Function | TokenKind::If |
            TokenKind::Import | TokenKind::In | TokenKind::Instanceof |
            TokenKind::Let | TokenKind::New | TokenKind::Return |
            TokenKind::Super | TokenKind::Switch | TokenKind::This |
            TokenKind::Throw | TokenKind::Try | TokenKind::Typeof |
            TokenKind::Var | TokenKind::Void | TokenKind::While |
            TokenKind::With | TokenKind::Boolean(_) | TokenKind::Null
        )
    }

    /// Tokens that end an operand. A `/` following one of these is a
    /// division operator, anywhere else it starts a regular expression.
    pub fn ends_operand(&self) -> bool {
        matches!(self,
            TokenKind::Identifier(_) | TokenKind::Number(_) |
            TokenKind::String(_) | TokenKind::Regex(_) |
            TokenKind::Boolean(_) | TokenKind::Null |
            TokenKind::This | TokenKind::Super |
            TokenKind::RParen | TokenKind::RBracket |
            TokenKind::TemplateTail(_) | TokenKind::NoSubstitutionTemplate(_)
        )
    }

    /// Binary operator precedence (higher = binds tighter, 0 = not binary).
    ///
    /// Exponentiation is absent: it is right-associative and sits below
    /// the unary operators, so the parser handles it on its own level.
    pub fn precedence(&self) -> u8 {
        match self {
            TokenKind::PipePipe | TokenKind::QuestionQuestion => 4,
            TokenKind::AmpersandAmpersand => 5,
            TokenKind::Pipe => 6,
            TokenKind::Caret => 7,
            TokenKind::Ampersand => 8,
            TokenKind::EqEq | TokenKind::NotEq | TokenKind::EqEqEq | TokenKind::NotEqEq => 9,
            TokenKind::LessThan | TokenKind::LessThanEq | TokenKind::GreaterThan |
            TokenKind::GreaterThanEq | TokenKind::In | TokenKind::Instanceof => 10,
            TokenKind::LShift | TokenKind::RShift | TokenKind::URShift => 11,
            TokenKind::Plus | TokenKind::Minus => 12,
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => 13,
            _ => 0,
        }
    }

    /// Source spelling of keywords and punctuators
    pub fn as_str(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Boolean(true) => "true",
            TokenKind::Boolean(false) => "false",
            TokenKind::Null => "null",
            TokenKind::Break => "break",
            TokenKind::Case => "case",
            TokenKind::Catch => "catch",
            TokenKind::Class => "class",
            TokenKind::Const => "const",
            TokenKind::Continue => "continue",
            TokenKind::Debugger => "debugger",
            TokenKind::Default => "default",
            TokenKind::Delete => "delete",
            TokenKind::Do => "do",
            TokenKind::Else => "else",
            TokenKind::Enum => "enum",
            TokenKind::Export => "export",
            TokenKind::Extends => "extends",
            TokenKind::Finally => "finally",
            TokenKind::For => "for",
            TokenKind::Function => "function",
            TokenKind::If => "if",
            TokenKind::Import => "import",
            TokenKind::In => "in",
            TokenKind::Instanceof => "instanceof",
            TokenKind::Let => "let",
            TokenKind::New => "new",
            TokenKind::Return => "return",
            TokenKind::Super => "super",
            TokenKind::Switch => "switch",
            TokenKind::This => "this",
            TokenKind::Throw => "throw",
            TokenKind::Try => "try",
            TokenKind::Typeof => "typeof",
            TokenKind::Var => "var",
            TokenKind::Void => "void",
            TokenKind::While => "while",
            TokenKind::With => "with",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Dot => ".",
            TokenKind::DotDotDot => "...",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Question => "?",
            TokenKind::QuestionDot => "?.",
            TokenKind::QuestionQuestion => "??",
            TokenKind::Arrow => "=>",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::StarStar => "**",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::LessThan => "<",
            TokenKind::LessThanEq => "<=",
            TokenKind::GreaterThan => ">",
            TokenKind::GreaterThanEq => ">=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::EqEqEq => "===",
            TokenKind::NotEqEq => "!==",
            TokenKind::Ampersand => "&",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::Tilde => "~",
            TokenKind::AmpersandAmpersand => "&&",
            TokenKind::PipePipe => "||",
            TokenKind::Bang => "!",
            TokenKind::LShift => "<<",
            TokenKind::RShift => ">>",
            TokenKind::URShift => ">>>",
            TokenKind::Eq => "=",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::StarStarEq => "**=",
            TokenKind::SlashEq => "/=",
            TokenKind::PercentEq => "%=",
            TokenKind::AmpersandEq => "&=",
            TokenKind::PipeEq => "|=",
            TokenKind::CaretEq => "^=",
            TokenKind::LShiftEq => "<<=",
            TokenKind::RShiftEq => ">>=",
            TokenKind::URShiftEq => ">>>=",
            TokenKind::AmpersandAmpersandEq => "&&=",
            TokenKind::PipePipeEq => "||=",
            TokenKind::QuestionQuestionEq => "??=",
            _ => return None,
        };
        Some(text)
    }

    /// Token class used in diagnostics
    pub fn category(&self) -> &'static str {
        match self {
            TokenKind::Number(_) => "number",
            TokenKind::String(_) => "string",
            TokenKind::Regex(_) => "regular expression",
            TokenKind::Identifier(_) => "identifier",
            TokenKind::TemplateHead(_) | TokenKind::TemplateMiddle(_) |
            TokenKind::TemplateTail(_) | TokenKind::NoSubstitutionTemplate(_) => "template",
            TokenKind::Eof => "end of input",
            kind if kind.is_keyword() => "keyword",
            _ => "punctuator",
        }
    }
}

/// Keywords lookup table
pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
    match s {
        "break" => Some(TokenKind::Break),
        "case" => Some(TokenKind::Case),
        "catch" => Some(TokenKind::Catch),
        "class" => Some(TokenKind::Class),
        "const" => Some(TokenKind::Const),
        "continue" => Some(TokenKind::Continue),
        "debugger" => Some(TokenKind::Debugger),
        "default" => Some(TokenKind::Default),
        "delete" => Some(TokenKind::Delete),
        "do" => Some(TokenKind::Do),
        "else" => Some(TokenKind::Else),
        "enum" => Some(TokenKind::Enum),
        "export" => Some(TokenKind::Export),
        "extends" => Some(TokenKind::Extends),
        "false" => Some(TokenKind::Boolean(false)),
        "finally" => Some(TokenKind::Finally),
        "for" => Some(TokenKind::For),
        "function" => Some(TokenKind::Function),
        "if" => Some(TokenKind::If),
        "import" => Some(TokenKind::Import),
        "in" => Some(TokenKind::In),
        "instanceof" => Some(TokenKind::Instanceof),
        "let" => Some(TokenKind::Let),
        "new" => Some(TokenKind::New),
        "null" => Some(TokenKind::Null),
        "return" => Some(TokenKind::Return),
        "super" => Some(TokenKind::Super),
        "switch" => Some(TokenKind::Switch),
        "this" => Some(TokenKind::This),
        "throw" => Some(TokenKind::Throw),
        "true" => Some(TokenKind::Boolean(true)),
        "try" => Some(TokenKind::Try),
        "typeof" => Some(TokenKind::Typeof),
        "var" => Some(TokenKind::Var),
        "void" => Some(TokenKind::Void),
        "while" => Some(TokenKind::While),
        "with" => Some(TokenKind::With),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span() {
        let span = Span::new(0, 10);
        assert_eq!(span.len(), 10);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(keyword_from_str("if"), Some(TokenKind::If));
        assert_eq!(keyword_from_str("true"), Some(TokenKind::Boolean(true)));
        assert_eq!(keyword_from_str("null"), Some(TokenKind::Null));
        assert_eq!(keyword_from_str("of"), None);
        assert_eq!(keyword_from_str("notakeyword"), None);
    }

    #[test]
    fn test_precedence() {
        assert!(TokenKind::Star.precedence() > TokenKind::Plus.precedence());
        assert!(TokenKind::Plus.precedence() > TokenKind::PipePipe.precedence());
        assert_eq!(TokenKind::StarStar.precedence(), 0);
    }

    #[test]
    fn test_operand_ending() {
        assert!(TokenKind::RParen.ends_operand());
        assert!(TokenKind::Identifier("a".into()).ends_operand());
        assert!(!TokenKind::RBrace.ends_operand());
        assert!(!TokenKind::Return.ends_operand());
    }

    #[test]
    fn test_spelling() {
        assert_eq!(TokenKind::Function.as_str(), Some("function"));
        assert_eq!(TokenKind::URShiftEq.as_str(), Some(">>>="));
        assert_eq!(TokenKind::Function.category(), "keyword");
        assert_eq!(TokenKind::Comma.category(), "punctuator");
        assert_eq!(TokenKind::Eof.category(), "end of input");
    }
}
