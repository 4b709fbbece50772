//! Source Printer
//!
//! Renders a [`Program`] back into source text. Parentheses are derived
//! from operator binding power rather than remembered from the input, and
//! a space is only forced where two tokens would otherwise fuse.

use crate::ast::{
    ArrowBody, BinaryOp, Block, Class, ClassMember, Declarator, Expression, ExpressionNode, ForInit,
    Function, Loc, LogicalOp, MethodKind, Pattern, PatternNode, PatternProperty, Program,
    Property, PropertyKey, Statement, StatementNode, TemplateLiteral, Value, VarKind,
};
use crate::config::Style;

const INDENT: &str = "    ";

/// Binding power levels, loosest first
mod bp {
    pub const SEQUENCE: u8 = 1;
    pub const ASSIGNMENT: u8 = 2;
    pub const CONDITIONAL: u8 = 3;
    pub const LOGICAL_OR: u8 = 4;
    pub const EXPONENT: u8 = 14;
    pub const UNARY: u8 = 15;
    pub const POSTFIX: u8 = 16;
    pub const CALL: u8 = 17;
    pub const PRIMARY: u8 = 18;
}

/// Print `program` in the given style
pub fn print(program: &Program, style: Style) -> String {
    let mut generator = Generator::new(style);
    for (i, statement) in program.body.iter().enumerate() {
        if i > 0 {
            generator.newline();
        }
        generator.statement(statement);
    }
    generator.out
}

fn binary_precedence(operator: BinaryOp) -> u8 {
    match operator {
        BinaryOp::BitwiseOr => 6,
        BinaryOp::BitwiseXor => 7,
        BinaryOp::BitwiseAnd => 8,
        BinaryOp::Equal | BinaryOp::NotEqual | BinaryOp::StrictEqual | BinaryOp::StrictNotEqual => 9,
        BinaryOp::LessThan
        | BinaryOp::LessThanEq
        | BinaryOp::GreaterThan
        | BinaryOp::GreaterThanEq
        | BinaryOp::In
        | BinaryOp::Instanceof => 10,
        BinaryOp::LeftShift | BinaryOp::RightShift | BinaryOp::UnsignedRightShift => 11,
        BinaryOp::Add | BinaryOp::Sub => 12,
        BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 13,
        BinaryOp::Pow => bp::EXPONENT,
    }
}

fn precedence(expression: &Expression) -> u8 {
    match expression {
        Expression::Sequence { .. } => bp::SEQUENCE,
        Expression::Assignment { .. }
        | Expression::Arrow { .. }
        | Expression::Yield { .. }
        | Expression::Spread { .. } => bp::ASSIGNMENT,
        Expression::Conditional { .. } => bp::CONDITIONAL,
        Expression::Logical { operator: LogicalOp::And, .. } => 5,
        Expression::Logical { .. } => bp::LOGICAL_OR,
        Expression::Binary { operator, .. } => binary_precedence(*operator),
        Expression::Unary { .. } | Expression::Await { .. } => bp::UNARY,
        Expression::Update { prefix: true, .. } => bp::UNARY,
        Expression::Update { prefix: false, .. } => bp::POSTFIX,
        Expression::Call { .. }
        | Expression::New { .. }
        | Expression::Member { .. }
        | Expression::ComputedMember { .. }
        | Expression::TaggedTemplate { .. } => bp::CALL,
        Expression::This
        | Expression::Super
        | Expression::Identifier(_)
        | Expression::Value(_)
        | Expression::Template(_)
        | Expression::Array { .. }
        | Expression::Object { .. }
        | Expression::Function { .. }
        | Expression::Class { .. } => bp::PRIMARY,
    }
}

/// The leftmost token would be read as a block, function or class
/// declaration at the start of a statement
fn starts_ambiguously(expression: &Expression) -> bool {
    match expression {
        Expression::Object { .. } | Expression::Function { .. } | Expression::Class { .. } => true,
        Expression::Member { object, .. } | Expression::ComputedMember { object, .. } => starts_ambiguously(&object.item),
        Expression::Call { callee, .. } => starts_ambiguously(&callee.item),
        Expression::TaggedTemplate { tag, .. } => starts_ambiguously(&tag.item),
        Expression::Binary { left, .. } | Expression::Logical { left, .. } => starts_ambiguously(&left.item),
        Expression::Conditional { test, .. } => starts_ambiguously(&test.item),
        Expression::Sequence { body } => body.first().is_some_and(|e| starts_ambiguously(&e.item)),
        Expression::Update { prefix: false, argument, .. } => starts_ambiguously(&argument.item),
        Expression::Assignment { left, .. } => match &left.item {
            Pattern::Object { .. } => true,
            Pattern::Expression(expression) => starts_ambiguously(expression),
            _ => false,
        },
        _ => false,
    }
}

/// A call somewhere in the member chain of a `new` callee
fn contains_call(expression: &Expression) -> bool {
    match expression {
        Expression::Call { .. } => true,
        Expression::Member { object, .. } | Expression::ComputedMember { object, .. } => contains_call(&object.item),
        Expression::TaggedTemplate { tag, .. } => contains_call(&tag.item),
        _ => false,
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '\\'
}

/// Two adjacent tokens would lex differently without a space between them
fn fuses(last: char, next: char) -> bool {
    (is_word_char(last) && is_word_char(next))
        || (last == '+' && next == '+')
        || (last == '-' && next == '-')
        || (last == '/' && (next == '/' || next == '*'))
}

struct Generator {
    out: String,
    minify: bool,
    indent: usize,
    /// Inside a `for (...;` initializer, where `in` must be parenthesized
    no_in: bool,
    /// Output length right after a regex literal. Identifier characters
    /// written at that point would be read as flags.
    regex_end: Option<usize>,
}

impl Generator {
    fn new(style: Style) -> Self {
        Self {
            out: String::new(),
            minify: style.is_minified(),
            indent: 0,
            no_in: false,
            regex_end: None,
        }
    }

    fn write(&mut self, text: &str) {
        if let (Some(last), Some(next)) = (self.out.chars().next_back(), text.chars().next()) {
            let after_regex = self.regex_end == Some(self.out.len());
            if fuses(last, next) || (after_regex && is_word_char(next)) {
                self.out.push(' ');
            }
        }
        self.out.push_str(text);
    }

    /// Space that only pretty output carries
    fn space(&mut self) {
        if !self.minify {
            self.out.push(' ');
        }
    }

    fn newline(&mut self) {
        if !self.minify {
            self.out.push('\n');
            for _ in 0..self.indent {
                self.out.push_str(INDENT);
            }
        }
    }

    /// `,` between list items
    fn comma(&mut self) {
        self.out.push(',');
        self.space();
    }

    /// Binary operator with pretty-mode padding
    fn operator(&mut self, operator: &str) {
        self.space();
        self.write(operator);
        self.space();
    }

    fn parenthesized(&mut self, f: impl FnOnce(&mut Self)) {
        let no_in = std::mem::replace(&mut self.no_in, false);
        self.write("(");
        f(self);
        self.write(")");
        self.no_in = no_in;
    }

    // Statements

    fn statement(&mut self, node: &StatementNode) {
        match &node.item {
            Statement::Empty => self.write(";"),
            Statement::Debugger => self.write("debugger;"),
            Statement::Expression { expression } => {
                if starts_ambiguously(&expression.item) {
                    self.parenthesized(|g| g.expression(expression, bp::SEQUENCE));
                } else {
                    self.expression(expression, bp::SEQUENCE);
                }
                self.write(";");
            }
            Statement::Declaration { kind, declarators } => {
                self.declaration(*kind, declarators);
                self.write(";");
            }
            Statement::Function { function } => self.function(function),
            Statement::Class { class } => self.class(class),
            Statement::Return { value } => {
                self.write("return");
                if let Some(value) = value {
                    self.space();
                    self.expression(value, bp::SEQUENCE);
                }
                self.write(";");
            }
            Statement::Break { label } => self.jump("break", label.as_ref()),
            Statement::Continue { label } => self.jump("continue", label.as_ref()),
            Statement::Throw { value } => {
                self.write("throw");
                self.space();
                self.expression(value, bp::SEQUENCE);
                self.write(";");
            }
            Statement::If { test, consequent, alternate } => {
                self.write("if");
                self.condition(test);
                self.body(consequent);
                if let Some(alternate) = alternate {
                    if matches!(consequent.item, Statement::Block { .. }) {
                        self.space();
                    } else {
                        self.newline();
                    }
                    self.write("else");
                    if matches!(alternate.item, Statement::If { .. }) {
                        self.space();
                        self.statement(alternate);
                    } else {
                        self.body(alternate);
                    }
                }
            }
            Statement::While { test, body } => {
                self.write("while");
                self.condition(test);
                self.body(body);
            }
            Statement::Do { body, test } => {
                self.write("do");
                self.body(body);
                self.space();
                self.write("while");
                self.condition(test);
                self.write(";");
            }
            Statement::For { init, test, update, body } => {
                self.write("for");
                self.space();
                self.write("(");
                if let Some(init) = init {
                    self.no_in = true;
                    self.for_init(init);
                    self.no_in = false;
                }
                self.write(";");
                if let Some(test) = test {
                    self.space();
                    self.expression(test, bp::SEQUENCE);
                }
                self.write(";");
                if let Some(update) = update {
                    self.space();
                    self.expression(update, bp::SEQUENCE);
                }
                self.write(")");
                self.body(body);
            }
            Statement::ForIn { left, right, body } => {
                self.write("for");
                self.space();
                self.write("(");
                self.for_init(left);
                self.write(" in");
                self.space();
                self.expression(right, bp::SEQUENCE);
                self.write(")");
                self.body(body);
            }
            Statement::ForOf { left, right, body } => {
                self.write("for");
                self.space();
                self.write("(");
                self.for_init(left);
                self.write(" of");
                self.space();
                self.expression(right, bp::ASSIGNMENT);
                self.write(")");
                self.body(body);
            }
            Statement::Switch { discriminant, cases } => {
                self.write("switch");
                self.condition(discriminant);
                self.space();
                self.write("{");
                self.indent += 1;
                for case in cases {
                    self.newline();
                    match &case.item.test {
                        Some(test) => {
                            self.write("case");
                            self.space();
                            self.expression(test, bp::SEQUENCE);
                        }
                        None => self.write("default"),
                    }
                    self.write(":");
                    self.indent += 1;
                    for statement in &case.item.consequent {
                        self.newline();
                        self.statement(statement);
                    }
                    self.indent -= 1;
                }
                self.indent -= 1;
                if !cases.is_empty() {
                    self.newline();
                }
                self.write("}");
            }
            Statement::Try { block, handler, finalizer } => {
                self.write("try");
                self.space();
                self.block(&block.item);
                if let Some(handler) = handler {
                    self.space();
                    self.write("catch");
                    if let Some(param) = &handler.item.param {
                        self.space();
                        self.write("(");
                        self.pattern(param);
                        self.write(")");
                    }
                    self.space();
                    self.block(&handler.item.body.item);
                }
                if let Some(finalizer) = finalizer {
                    self.space();
                    self.write("finally");
                    self.space();
                    self.block(&finalizer.item);
                }
            }
            Statement::Block { body } => self.statements_in_braces(body),
            Statement::Labeled { label, body } => {
                self.write(&label.item);
                self.write(":");
                self.space();
                self.statement(body);
            }
        }
    }

    fn jump(&mut self, keyword: &str, label: Option<&Loc<Box<str>>>) {
        self.write(keyword);
        if let Some(label) = label {
            self.out.push(' ');
            self.write(&label.item);
        }
        self.write(";");
    }

    /// Parenthesized statement head: `if (test)`
    fn condition(&mut self, test: &ExpressionNode) {
        self.space();
        self.write("(");
        self.expression(test, bp::SEQUENCE);
        self.write(")");
    }

    /// Body of a compound statement, on the same line when it is a block
    fn body(&mut self, body: &StatementNode) {
        match &body.item {
            Statement::Block { body } => {
                self.space();
                self.statements_in_braces(body);
            }
            Statement::Empty => self.write(";"),
            _ => {
                self.indent += 1;
                self.newline();
                self.statement(body);
                self.indent -= 1;
            }
        }
    }

    fn block(&mut self, block: &Block) {
        self.statements_in_braces(&block.body);
    }

    fn statements_in_braces(&mut self, body: &[StatementNode]) {
        self.write("{");
        if body.is_empty() {
            self.write("}");
            return;
        }
        self.indent += 1;
        for statement in body {
            self.newline();
            self.statement(statement);
        }
        self.indent -= 1;
        self.newline();
        self.write("}");
    }

    fn declaration(&mut self, kind: VarKind, declarators: &[Loc<Declarator>]) {
        self.write(kind.as_str());
        self.out.push(' ');
        for (i, declarator) in declarators.iter().enumerate() {
            if i > 0 {
                self.comma();
            }
            self.pattern(&declarator.item.id);
            if let Some(init) = &declarator.item.init {
                self.operator("=");
                self.expression(init, bp::ASSIGNMENT);
            }
        }
    }

    fn for_init(&mut self, init: &Loc<ForInit>) {
        match &init.item {
            ForInit::Declaration { kind, declarators } => self.declaration(*kind, declarators),
            ForInit::Expression(expression) => self.expression_item(expression, bp::SEQUENCE),
            ForInit::Pattern(pattern) => self.pattern_item(pattern),
        }
    }

    fn function(&mut self, function: &Function) {
        if function.is_async {
            self.write("async");
        }
        self.write("function");
        if function.is_generator {
            self.write("*");
        }
        match &function.name {
            Some(name) => {
                if function.is_generator {
                    self.space();
                }
                self.write(&name.item);
            }
            None => self.space(),
        }
        self.function_rest(function);
    }

    /// Parameters and body
    fn function_rest(&mut self, function: &Function) {
        self.params(&function.params);
        self.space();
        self.block(&function.body.item);
    }

    fn params(&mut self, params: &[PatternNode]) {
        self.write("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.comma();
            }
            self.pattern(param);
        }
        self.write(")");
    }

    fn class(&mut self, class: &Class) {
        self.write("class");
        if let Some(name) = &class.name {
            self.write(&name.item);
        }
        if let Some(extends) = &class.extends {
            self.write("extends");
            self.out.push(' ');
            self.expression(extends, bp::CALL);
        }
        self.space();
        self.write("{");
        if class.body.item.is_empty() {
            self.write("}");
            return;
        }

        self.indent += 1;
        for member in &class.body.item {
            self.newline();
            match &member.item {
                ClassMember::Method { is_static, key, kind, value } => {
                    if *is_static {
                        self.write("static");
                        self.out.push(' ');
                    }
                    self.method(key, *kind, &value.item);
                }
                ClassMember::Field { is_static, key, value } => {
                    if *is_static {
                        self.write("static");
                        self.out.push(' ');
                    }
                    self.property_key(key);
                    if let Some(value) = value {
                        self.operator("=");
                        self.expression(value, bp::ASSIGNMENT);
                    }
                    self.write(";");
                }
            }
        }
        self.indent -= 1;
        self.newline();
        self.write("}");
    }

    /// Method definition in a class body or object literal
    fn method(&mut self, key: &Loc<PropertyKey>, kind: MethodKind, function: &Function) {
        match kind {
            MethodKind::Get => {
                self.write("get");
                self.out.push(' ');
            }
            MethodKind::Set => {
                self.write("set");
                self.out.push(' ');
            }
            MethodKind::Method | MethodKind::Constructor => {}
        }
        if function.is_async {
            self.write("async");
            self.out.push(' ');
        }
        if function.is_generator {
            self.write("*");
        }
        self.property_key(key);
        self.function_rest(function);
    }

    fn property_key(&mut self, key: &Loc<PropertyKey>) {
        match &key.item {
            PropertyKey::Identifier(name) => self.write(name),
            PropertyKey::Literal(value) => self.value(value),
            PropertyKey::Computed(expression) => {
                self.write("[");
                self.expression(expression, bp::ASSIGNMENT);
                self.write("]");
            }
        }
    }

    // Expressions

    fn expression(&mut self, node: &ExpressionNode, min: u8) {
        self.expression_item(&node.item, min);
    }

    fn expression_item(&mut self, expression: &Expression, min: u8) {
        let needs_parens = precedence(expression) < min
            || (self.no_in && matches!(expression, Expression::Binary { operator: BinaryOp::In, .. }));
        if needs_parens {
            self.parenthesized(|g| g.expression_inner(expression));
        } else {
            self.expression_inner(expression);
        }
    }

    fn expression_inner(&mut self, expression: &Expression) {
        match expression {
            Expression::This => self.write("this"),
            Expression::Super => self.write("super"),
            Expression::Identifier(name) => self.write(name),
            Expression::Value(value) => self.value(value),
            Expression::Template(template) => self.template(template),
            Expression::TaggedTemplate { tag, quasi } => {
                self.expression(tag, bp::CALL);
                self.template(&quasi.item);
            }
            Expression::Array { body } => {
                self.write("[");
                for (i, element) in body.iter().enumerate() {
                    if i > 0 {
                        self.comma();
                    }
                    if let Some(element) = element {
                        self.expression(element, bp::ASSIGNMENT);
                    }
                }
                // A trailing hole needs its own comma
                if matches!(body.last(), Some(None)) {
                    self.write(",");
                }
                self.write("]");
            }
            Expression::Object { body } => self.object(body),
            Expression::Member { object, property } => {
                self.member_object(object);
                self.write(".");
                self.write(&property.item);
            }
            Expression::ComputedMember { object, property } => {
                self.member_object(object);
                self.write("[");
                self.expression(property, bp::SEQUENCE);
                self.write("]");
            }
            Expression::Call { callee, arguments } => {
                self.expression(callee, bp::CALL);
                self.arguments(arguments);
            }
            Expression::New { callee, arguments } => {
                self.write("new");
                self.out.push(' ');
                if contains_call(&callee.item) {
                    self.parenthesized(|g| g.expression(callee, bp::CALL));
                } else {
                    self.expression(callee, bp::CALL);
                }
                self.arguments(arguments);
            }
            Expression::Unary { operator, argument } => {
                let text = operator.as_str();
                self.write(text);
                if text.starts_with(char::is_alphabetic) {
                    self.space();
                }
                self.expression(argument, bp::UNARY);
            }
            Expression::Update { operator, prefix: true, argument } => {
                self.write(operator.as_str());
                self.expression(argument, bp::POSTFIX);
            }
            Expression::Update { operator, prefix: false, argument } => {
                self.expression(argument, bp::CALL);
                self.write(operator.as_str());
            }
            Expression::Binary { operator: BinaryOp::Pow, left, right } => {
                self.expression(left, bp::POSTFIX);
                self.operator("**");
                self.expression(right, bp::EXPONENT);
            }
            Expression::Binary { operator, left, right } => {
                let precedence = binary_precedence(*operator);
                self.expression(left, precedence);
                self.operator(operator.as_str());
                self.expression(right, precedence + 1);
            }
            Expression::Logical { operator, left, right } => {
                let precedence = precedence(expression);
                self.logical_operand(*operator, left, precedence);
                self.operator(operator.as_str());
                self.logical_operand(*operator, right, precedence + 1);
            }
            Expression::Assignment { operator, left, right } => {
                self.pattern(left);
                self.operator(operator.as_str());
                self.expression(right, bp::ASSIGNMENT);
            }
            Expression::Conditional { test, consequent, alternate } => {
                self.expression(test, bp::LOGICAL_OR);
                self.operator("?");
                self.expression(consequent, bp::ASSIGNMENT);
                self.operator(":");
                self.expression(alternate, bp::ASSIGNMENT);
            }
            Expression::Sequence { body } => {
                for (i, expression) in body.iter().enumerate() {
                    if i > 0 {
                        self.comma();
                    }
                    self.expression(expression, bp::ASSIGNMENT);
                }
            }
            Expression::Spread { argument } => {
                self.write("...");
                self.expression(argument, bp::ASSIGNMENT);
            }
            Expression::Arrow { is_async, params, body } => {
                if *is_async {
                    self.write("async");
                    self.space();
                }
                self.params(params);
                self.operator("=>");
                match body {
                    ArrowBody::Block(block) => self.block(&block.item),
                    ArrowBody::Expression(expression) if starts_ambiguously(&expression.item) => {
                        self.parenthesized(|g| g.expression(expression, bp::ASSIGNMENT));
                    }
                    ArrowBody::Expression(expression) => self.expression(expression, bp::ASSIGNMENT),
                }
            }
            Expression::Function { function } => self.function(function),
            Expression::Class { class } => self.class(class),
            Expression::Yield { argument, delegate } => {
                self.write("yield");
                if *delegate {
                    self.write("*");
                }
                if let Some(argument) = argument {
                    self.space();
                    self.expression(argument, bp::ASSIGNMENT);
                }
            }
            Expression::Await { argument } => {
                self.write("await");
                self.space();
                self.expression(argument, bp::UNARY);
            }
        }
    }

    /// `??` cannot be mixed with `||` or `&&` without parentheses
    fn logical_operand(&mut self, parent: LogicalOp, operand: &ExpressionNode, min: u8) {
        let mixed = match &operand.item {
            Expression::Logical { operator, .. } => {
                (parent == LogicalOp::NullishCoalescing) != (*operator == LogicalOp::NullishCoalescing)
            }
            _ => false,
        };
        if mixed {
            self.parenthesized(|g| g.expression(operand, bp::SEQUENCE));
        } else {
            self.expression(operand, min);
        }
    }

    fn member_object(&mut self, object: &ExpressionNode) {
        // `1.x` would lex as a malformed number
        if matches!(object.item, Expression::Value(Value::Number(_))) {
            self.parenthesized(|g| g.expression(object, bp::SEQUENCE));
        } else {
            self.expression(object, bp::CALL);
        }
    }

    fn arguments(&mut self, arguments: &[ExpressionNode]) {
        self.write("(");
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                self.comma();
            }
            self.expression(argument, bp::ASSIGNMENT);
        }
        self.write(")");
    }

    fn object(&mut self, body: &[Loc<Property>]) {
        self.write("{");
        if body.is_empty() {
            self.write("}");
            return;
        }
        self.space();
        for (i, property) in body.iter().enumerate() {
            if i > 0 {
                self.comma();
            }
            match &property.item {
                Property::Shorthand(name) => self.write(name),
                Property::Literal { key, value } => {
                    self.property_key(key);
                    self.write(":");
                    self.space();
                    self.expression(value, bp::ASSIGNMENT);
                }
                Property::Method { key, kind, value } => self.method(key, *kind, &value.item),
                Property::Spread { argument } => {
                    self.write("...");
                    self.expression(argument, bp::ASSIGNMENT);
                }
            }
        }
        self.space();
        self.write("}");
    }

    fn value(&mut self, value: &Value) {
        match value {
            Value::Null => self.write("null"),
            Value::Boolean(true) => self.write("true"),
            Value::Boolean(false) => self.write("false"),
            Value::Number(raw) | Value::String(raw) => self.write(raw),
            Value::RegEx(raw) => {
                self.write(raw);
                self.regex_end = Some(self.out.len());
            }
        }
    }

    fn template(&mut self, template: &TemplateLiteral) {
        // Raw chunks go straight to the buffer; they are not tokens
        self.out.push('`');
        for (i, quasi) in template.quasis.iter().enumerate() {
            self.out.push_str(&quasi.item);
            if let Some(expression) = template.expressions.get(i) {
                self.out.push_str("${");
                let no_in = std::mem::replace(&mut self.no_in, false);
                self.expression(expression, bp::SEQUENCE);
                self.no_in = no_in;
                self.out.push('}');
            }
        }
        self.out.push('`');
    }

    // Patterns

    fn pattern(&mut self, node: &PatternNode) {
        self.pattern_item(&node.item);
    }

    fn pattern_item(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::Identifier(name) => self.write(name),
            Pattern::Expression(expression) => self.expression_item(expression, bp::CALL),
            Pattern::Array { elements } => {
                self.write("[");
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.comma();
                    }
                    if let Some(element) = element {
                        self.pattern(element);
                    }
                }
                if matches!(elements.last(), Some(None)) {
                    self.write(",");
                }
                self.write("]");
            }
            Pattern::Object { properties } => {
                self.write("{");
                if properties.is_empty() {
                    self.write("}");
                    return;
                }
                self.space();
                for (i, property) in properties.iter().enumerate() {
                    if i > 0 {
                        self.comma();
                    }
                    match &property.item {
                        PatternProperty::Property { value, shorthand: true, .. } => self.pattern(value),
                        PatternProperty::Property { key, value, shorthand: false } => {
                            self.property_key(key);
                            self.write(":");
                            self.space();
                            self.pattern(value);
                        }
                        PatternProperty::Rest { argument } => {
                            self.write("...");
                            self.pattern(argument);
                        }
                    }
                }
                self.space();
                self.write("}");
            }
            Pattern::Assignment { left, right } => {
                self.pattern(left);
                self.operator("=");
                self.expression(right, bp::ASSIGNMENT);
            }
            Pattern::Rest { argument } => {
                self.write("...");
                self.pattern(argument);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn minified(source: &str) -> String {
        print(&Parser::new(source).unwrap().parse().unwrap(), Style::Minified)
    }

    fn pretty(source: &str) -> String {
        print(&Parser::new(source).unwrap().parse().unwrap(), Style::Pretty)
    }

    #[test]
    fn test_minified_call() {
        assert_eq!(minified("Math.pow(2, 2)"), "Math.pow(2,2);");
        assert_eq!(minified("a\nb"), "a;b;");
    }

    #[test]
    fn test_token_fusion_guard() {
        assert_eq!(minified("a + +b"), "a+ +b;");
        assert_eq!(minified("a - -b"), "a- -b;");
        assert_eq!(minified("a + ++b"), "a+ ++b;");
        assert_eq!(minified("typeof x"), "typeof x;");
        assert_eq!(minified("x = a / /re/g"), "x=a/ /re/g;");
        assert_eq!(minified("if (a) b(); else c()"), "if(a)b();else c();");
    }

    #[test]
    fn test_parenthesization() {
        assert_eq!(minified("(a + b) * c"), "(a+b)*c;");
        assert_eq!(minified("a - (b - c)"), "a-(b-c);");
        assert_eq!(minified("a - b - c"), "a-b-c;");
        assert_eq!(minified("(a ** b) ** c"), "(a**b)**c;");
        assert_eq!(minified("a ** b ** c"), "a**b**c;");
        assert_eq!(minified("(-a) ** b"), "(-a)**b;");
        assert_eq!(minified("(a, b) ? c : (d, e)"), "(a,b)?c:(d,e);");
        assert_eq!(minified("new (a())()"), "new (a())();");
        assert_eq!(minified("new a.b"), "new a.b();");
        assert_eq!(minified("(1).toString()"), "(1).toString();");
        assert_eq!(minified("(a ?? b) || c"), "(a??b)||c;");
        assert_eq!(minified("a ?? (b || c)"), "a??(b||c);");
    }

    #[test]
    fn test_statement_start_ambiguity() {
        assert_eq!(minified("({}).x"), "({}.x);");
        assert_eq!(minified("(function () {})()"), "(function(){}());");
        assert_eq!(minified("({ a } = b)"), "({a}=b);");
        assert_eq!(minified("x => ({ a: 1 })"), "(x)=>({a:1});");
    }

    #[test]
    fn test_for_in_initializer() {
        assert_eq!(minified("for (var i = (a in b); i;) ;"), "for(var i=(a in b);i;);");
        assert_eq!(minified("for (x of y) z()"), "for(x of y)z();");
    }

    #[test]
    fn test_array_holes() {
        assert_eq!(minified("[a, , b]"), "[a,,b];");
        assert_eq!(minified("[a, ,]"), "[a,,];");
    }

    #[test]
    fn test_pretty_layout() {
        assert_eq!(
            pretty("function f(a, b = 2) { if (a) { return a * b } }"),
            "function f(a, b = 2) {\n    if (a) {\n        return a * b;\n    }\n}"
        );
        assert_eq!(pretty("let x = 1; x++"), "let x = 1;\nx++;");
        assert_eq!(pretty("const o = { a, b: 1 }"), "const o = { a, b: 1 };");
    }

    #[test]
    fn test_classes_and_templates() {
        assert_eq!(
            minified("class A extends B { static x = 1; get y() { return 2 } }"),
            "class A extends B{static x=1;get y(){return 2;}}"
        );
        assert_eq!(minified("tag`a${b}c`"), "tag`a${b}c`;");
    }
}
