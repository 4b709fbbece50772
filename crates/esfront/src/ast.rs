//! Abstract Syntax Tree
//!
//! Every node is wrapped in a [`Loc`], which binds a byte span to the node
//! payload. The tree is strictly owned: a `Program` drops as a unit.

use crate::token::Span;

/// Source location wrapper.
///
/// Equality ignores the span so trees produced from differently formatted
/// sources compare equal when their structure matches.
#[derive(Debug, Clone)]
pub struct Loc<T> {
    pub start: u32,
    pub end: u32,
    pub item: T,
}

impl<T> Loc<T> {
    pub fn new(start: u32, end: u32, item: T) -> Self {
        Self { start, end, item }
    }

    pub fn at(span: Span, item: T) -> Self {
        Self::new(span.start, span.end, item)
    }
}

impl<T: PartialEq> PartialEq for Loc<T> {
    fn eq(&self, other: &Self) -> bool {
        self.item == other.item
    }
}

pub type StatementNode = Loc<Statement>;
pub type ExpressionNode = Loc<Expression>;
pub type PatternNode = Loc<Pattern>;
pub type IdentifierNode = Loc<Box<str>>;

/// Parsed script
#[derive(Debug, Clone)]
pub struct Program {
    pub start: u32,
    pub end: u32,
    pub body: Vec<StatementNode>,
}

impl PartialEq for Program {
    fn eq(&self, other: &Self) -> bool {
        self.body == other.body
    }
}

/// Literal value, kept as raw source text where it has one
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Number(Box<str>),
    /// Including quotes
    String(Box<str>),
    /// `/pattern/flags`
    RegEx(Box<str>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Empty,
    Debugger,
    Expression {
        expression: ExpressionNode,
    },
    Declaration {
        kind: VarKind,
        declarators: Vec<Loc<Declarator>>,
    },
    Function {
        function: Function,
    },
    Class {
        class: Class,
    },
    Return {
        value: Option<ExpressionNode>,
    },
    Break {
        label: Option<IdentifierNode>,
    },
    Continue {
        label: Option<IdentifierNode>,
    },
    Throw {
        value: ExpressionNode,
    },
    If {
        test: ExpressionNode,
        consequent: Box<StatementNode>,
        alternate: Option<Box<StatementNode>>,
    },
    While {
        test: ExpressionNode,
        body: Box<StatementNode>,
    },
    Do {
        body: Box<StatementNode>,
        test: ExpressionNode,
    },
    For {
        init: Option<Box<Loc<ForInit>>>,
        test: Option<ExpressionNode>,
        update: Option<ExpressionNode>,
        body: Box<StatementNode>,
    },
    ForIn {
        left: Box<Loc<ForInit>>,
        right: ExpressionNode,
        body: Box<StatementNode>,
    },
    ForOf {
        left: Box<Loc<ForInit>>,
        right: ExpressionNode,
        body: Box<StatementNode>,
    },
    Switch {
        discriminant: ExpressionNode,
        cases: Vec<Loc<SwitchCase>>,
    },
    Try {
        block: Loc<Block>,
        handler: Option<Loc<CatchClause>>,
        finalizer: Option<Loc<Block>>,
    },
    Block {
        body: Vec<StatementNode>,
    },
    Labeled {
        label: IdentifierNode,
        body: Box<StatementNode>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind { Var, Let, Const }

impl VarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub id: PatternNode,
    pub init: Option<ExpressionNode>,
}

/// `for` head: initializer of a classic loop, or the left side of
/// `for-in` / `for-of`
#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    Declaration {
        kind: VarKind,
        declarators: Vec<Loc<Declarator>>,
    },
    Expression(Expression),
    Pattern(Pattern),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub body: Vec<StatementNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub param: Option<PatternNode>,
    pub body: Loc<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// `None` for `default:`
    pub test: Option<ExpressionNode>,
    pub consequent: Vec<StatementNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Option<IdentifierNode>,
    pub is_generator: bool,
    pub is_async: bool,
    pub params: Vec<PatternNode>,
    pub body: Loc<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub name: Option<IdentifierNode>,
    pub extends: Option<Box<ExpressionNode>>,
    pub body: Loc<Vec<Loc<ClassMember>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Method {
        is_static: bool,
        key: Loc<PropertyKey>,
        kind: MethodKind,
        value: Loc<Function>,
    },
    Field {
        is_static: bool,
        key: Loc<PropertyKey>,
        value: Option<ExpressionNode>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind { Constructor, Method, Get, Set }

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    Identifier(Box<str>),
    Literal(Value),
    Computed(ExpressionNode),
}

/// Object literal member
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    Shorthand(Box<str>),
    Literal {
        key: Loc<PropertyKey>,
        value: ExpressionNode,
    },
    Method {
        key: Loc<PropertyKey>,
        kind: MethodKind,
        value: Loc<Function>,
    },
    Spread {
        argument: ExpressionNode,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLiteral {
    /// Raw text chunks, always one more than `expressions`
    pub quasis: Vec<Loc<Box<str>>>,
    pub expressions: Vec<ExpressionNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    Expression(Box<ExpressionNode>),
    Block(Loc<Block>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    This,
    Super,
    Identifier(Box<str>),
    Value(Value),
    Template(TemplateLiteral),
    TaggedTemplate {
        tag: Box<ExpressionNode>,
        quasi: Loc<TemplateLiteral>,
    },
    Array {
        body: Vec<Option<ExpressionNode>>,
    },
    Object {
        body: Vec<Loc<Property>>,
    },
    Member {
        object: Box<ExpressionNode>,
        property: IdentifierNode,
    },
    ComputedMember {
        object: Box<ExpressionNode>,
        property: Box<ExpressionNode>,
    },
    Call {
        callee: Box<ExpressionNode>,
        arguments: Vec<ExpressionNode>,
    },
    New {
        callee: Box<ExpressionNode>,
        arguments: Vec<ExpressionNode>,
    },
    Unary {
        operator: UnaryOp,
        argument: Box<ExpressionNode>,
    },
    Update {
        operator: UpdateOp,
        prefix: bool,
        argument: Box<ExpressionNode>,
    },
    Binary {
        operator: BinaryOp,
        left: Box<ExpressionNode>,
        right: Box<ExpressionNode>,
    },
    Logical {
        operator: LogicalOp,
        left: Box<ExpressionNode>,
        right: Box<ExpressionNode>,
    },
    Assignment {
        operator: AssignOp,
        left: Box<PatternNode>,
        right: Box<ExpressionNode>,
    },
    Conditional {
        test: Box<ExpressionNode>,
        consequent: Box<ExpressionNode>,
        alternate: Box<ExpressionNode>,
    },
    Sequence {
        body: Vec<ExpressionNode>,
    },
    Spread {
        argument: Box<ExpressionNode>,
    },
    Arrow {
        is_async: bool,
        params: Vec<PatternNode>,
        body: ArrowBody,
    },
    Function {
        function: Function,
    },
    Class {
        class: Class,
    },
    Yield {
        argument: Option<Box<ExpressionNode>>,
        delegate: bool,
    },
    Await {
        argument: Box<ExpressionNode>,
    },
}

impl Expression {
    /// Valid target of a compound assignment or update
    pub fn is_simple_target(&self) -> bool {
        matches!(self,
            Expression::Identifier(_) | Expression::Member { .. } | Expression::ComputedMember { .. }
        )
    }
}

/// Binding pattern
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Identifier(Box<str>),
    /// Member expression target, only valid in assignment position
    Expression(Expression),
    Array {
        elements: Vec<Option<PatternNode>>,
    },
    Object {
        properties: Vec<Loc<PatternProperty>>,
    },
    /// Default value: `left = right`
    Assignment {
        left: Box<PatternNode>,
        right: Box<ExpressionNode>,
    },
    Rest {
        argument: Box<PatternNode>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PatternProperty {
    Property {
        key: Loc<PropertyKey>,
        value: PatternNode,
        shorthand: bool,
    },
    Rest {
        argument: Box<PatternNode>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp { Minus, Plus, Not, BitwiseNot, Typeof, Void, Delete }

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Minus => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Not => "!",
            UnaryOp::BitwiseNot => "~",
            UnaryOp::Typeof => "typeof",
            UnaryOp::Void => "void",
            UnaryOp::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOp { Increment, Decrement }

impl UpdateOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateOp::Increment => "++",
            UpdateOp::Decrement => "--",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add, Sub, Mul, Div, Mod, Pow, LessThan, LessThanEq, GreaterThan, GreaterThanEq,
    Equal, NotEqual, StrictEqual, StrictNotEqual, LeftShift, RightShift, UnsignedRightShift,
    BitwiseAnd, BitwiseOr, BitwiseXor, In, Instanceof,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
            BinaryOp::LessThan => "<",
            BinaryOp::LessThanEq => "<=",
            BinaryOp::GreaterThan => ">",
            BinaryOp::GreaterThanEq => ">=",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::StrictEqual => "===",
            BinaryOp::StrictNotEqual => "!==",
            BinaryOp::LeftShift => "<<",
            BinaryOp::RightShift => ">>",
            BinaryOp::UnsignedRightShift => ">>>",
            BinaryOp::BitwiseAnd => "&",
            BinaryOp::BitwiseOr => "|",
            BinaryOp::BitwiseXor => "^",
            BinaryOp::In => "in",
            BinaryOp::Instanceof => "instanceof",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp { And, Or, NullishCoalescing }

impl LogicalOp {
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOp::And => "&&",
            LogicalOp::Or => "||",
            LogicalOp::NullishCoalescing => "??",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp { Assign, AddAssign, SubAssign, MulAssign, DivAssign, ModAssign,
    PowAssign, LeftShiftAssign, RightShiftAssign, UnsignedRightShiftAssign,
    BitwiseAndAssign, BitwiseOrAssign, BitwiseXorAssign, AndAssign, OrAssign, NullishAssign }

impl AssignOp {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
            AssignOp::ModAssign => "%=",
            AssignOp::PowAssign => "**=",
            AssignOp::LeftShiftAssign => "<<=",
            AssignOp::RightShiftAssign => ">>=",
            AssignOp::UnsignedRightShiftAssign => ">>>=",
            AssignOp::BitwiseAndAssign => "&=",
            AssignOp::BitwiseOrAssign => "|=",
            AssignOp::BitwiseXorAssign => "^=",
            AssignOp::AndAssign => "&&=",
            AssignOp::OrAssign => "||=",
            AssignOp::NullishAssign => "??=",
        }
    }
}
