//! Rewrite Pass
//!
//! Replaces syntax newer than the target with older equivalents:
//! `a ** b` becomes `Math.pow(a, b)`, `a **= b` becomes
//! `a = Math.pow(a, b)` and, for ES5, `(a) => b` becomes
//! `function (a) { return b; }`. Children are visited before their
//! parent, so nested constructs are rewritten inside out.

use crate::ast::{
    ArrowBody, AssignOp, BinaryOp, Block, Class, ClassMember, Declarator, Expression,
    ExpressionNode, ForInit, Function, Loc, Pattern, PatternNode, PatternProperty, Program,
    Property, PropertyKey, Statement, StatementNode, TemplateLiteral,
};
use crate::config::Settings;

/// Apply the rewrites enabled in `settings`
pub fn rewrite(mut program: Program, settings: &Settings) -> Program {
    let mut transformer = Transformer { settings: *settings, rewritten: 0 };
    for statement in &mut program.body {
        transformer.visit_statement(statement);
    }
    tracing::debug!(rewritten = transformer.rewritten, "Rewrite pass finished");
    program
}

/// `Math.pow(left, right)`. The callee parts are zero-width at `start`.
fn math_pow(start: u32, left: ExpressionNode, right: ExpressionNode) -> Expression {
    let math = Loc::new(start, start, Expression::Identifier("Math".into()));
    let callee = Loc::new(start, start, Expression::Member {
        object: Box::new(math),
        property: Loc::new(start, start, "pow".into()),
    });
    Expression::Call {
        callee: Box::new(callee),
        arguments: vec![left, right],
    }
}

/// The read side of a compound assignment target
fn target_expression(target: &PatternNode) -> Option<ExpressionNode> {
    let item = match &target.item {
        Pattern::Identifier(name) => Expression::Identifier(name.clone()),
        Pattern::Expression(expression) => expression.clone(),
        Pattern::Array { .. } | Pattern::Object { .. } | Pattern::Assignment { .. } | Pattern::Rest { .. } => {
            return None;
        }
    };
    Some(Loc::new(target.start, target.end, item))
}

struct Transformer {
    settings: Settings,
    rewritten: usize,
}

impl Transformer {
    fn visit_statements(&mut self, body: &mut [StatementNode]) {
        for statement in body {
            self.visit_statement(statement);
        }
    }

    fn visit_statement(&mut self, node: &mut StatementNode) {
        match &mut node.item {
            Statement::Empty | Statement::Debugger | Statement::Break { .. } | Statement::Continue { .. } => {}
            Statement::Expression { expression } => self.visit_expression(expression),
            Statement::Declaration { declarators, .. } => self.visit_declarators(declarators),
            Statement::Function { function } => self.visit_function(function),
            Statement::Class { class } => self.visit_class(class),
            Statement::Return { value } => {
                if let Some(value) = value {
                    self.visit_expression(value);
                }
            }
            Statement::Throw { value } => self.visit_expression(value),
            Statement::If { test, consequent, alternate } => {
                self.visit_expression(test);
                self.visit_statement(consequent);
                if let Some(alternate) = alternate {
                    self.visit_statement(alternate);
                }
            }
            Statement::While { test, body } | Statement::Do { body, test } => {
                self.visit_expression(test);
                self.visit_statement(body);
            }
            Statement::For { init, test, update, body } => {
                if let Some(init) = init {
                    self.visit_for_init(init);
                }
                for expression in [test, update].into_iter().flatten() {
                    self.visit_expression(expression);
                }
                self.visit_statement(body);
            }
            Statement::ForIn { left, right, body } | Statement::ForOf { left, right, body } => {
                self.visit_for_init(left);
                self.visit_expression(right);
                self.visit_statement(body);
            }
            Statement::Switch { discriminant, cases } => {
                self.visit_expression(discriminant);
                for case in cases {
                    if let Some(test) = &mut case.item.test {
                        self.visit_expression(test);
                    }
                    self.visit_statements(&mut case.item.consequent);
                }
            }
            Statement::Try { block, handler, finalizer } => {
                self.visit_block(block);
                if let Some(handler) = handler {
                    if let Some(param) = &mut handler.item.param {
                        self.visit_pattern(param);
                    }
                    self.visit_block(&mut handler.item.body);
                }
                if let Some(finalizer) = finalizer {
                    self.visit_block(finalizer);
                }
            }
            Statement::Block { body } => self.visit_statements(body),
            Statement::Labeled { body, .. } => self.visit_statement(body),
        }
    }

    fn visit_block(&mut self, block: &mut Loc<Block>) {
        self.visit_statements(&mut block.item.body);
    }

    fn visit_declarators(&mut self, declarators: &mut [Loc<Declarator>]) {
        for declarator in declarators {
            self.visit_pattern(&mut declarator.item.id);
            if let Some(init) = &mut declarator.item.init {
                self.visit_expression(init);
            }
        }
    }

    fn visit_for_init(&mut self, init: &mut Loc<ForInit>) {
        match &mut init.item {
            ForInit::Declaration { declarators, .. } => self.visit_declarators(declarators),
            ForInit::Expression(expression) => self.visit_expression_at(init.start, expression),
            ForInit::Pattern(pattern) => self.walk_pattern(pattern),
        }
    }

    fn visit_function(&mut self, function: &mut Function) {
        for param in &mut function.params {
            self.visit_pattern(param);
        }
        self.visit_block(&mut function.body);
    }

    fn visit_class(&mut self, class: &mut Class) {
        if let Some(extends) = &mut class.extends {
            self.visit_expression(extends);
        }
        for member in &mut class.body.item {
            match &mut member.item {
                ClassMember::Method { key, value, .. } => {
                    self.visit_key(key);
                    self.visit_function(&mut value.item);
                }
                ClassMember::Field { key, value, .. } => {
                    self.visit_key(key);
                    if let Some(value) = value {
                        self.visit_expression(value);
                    }
                }
            }
        }
    }

    fn visit_key(&mut self, key: &mut Loc<PropertyKey>) {
        match &mut key.item {
            PropertyKey::Computed(expression) => self.visit_expression(expression),
            PropertyKey::Identifier(_) | PropertyKey::Literal(_) => {}
        }
    }

    fn visit_template(&mut self, template: &mut TemplateLiteral) {
        for expression in &mut template.expressions {
            self.visit_expression(expression);
        }
    }

    fn visit_pattern(&mut self, node: &mut PatternNode) {
        self.walk_pattern(&mut node.item);
    }

    fn walk_pattern(&mut self, pattern: &mut Pattern) {
        match pattern {
            Pattern::Identifier(_) => {}
            Pattern::Expression(expression) => self.walk_expression(expression),
            Pattern::Array { elements } => {
                for element in elements.iter_mut().flatten() {
                    self.visit_pattern(element);
                }
            }
            Pattern::Object { properties } => {
                for property in properties {
                    match &mut property.item {
                        PatternProperty::Property { key, value, .. } => {
                            self.visit_key(key);
                            self.visit_pattern(value);
                        }
                        PatternProperty::Rest { argument } => self.visit_pattern(argument),
                    }
                }
            }
            Pattern::Assignment { left, right } => {
                self.visit_pattern(left);
                self.visit_expression(right);
            }
            Pattern::Rest { argument } => self.visit_pattern(argument),
        }
    }

    fn visit_expression(&mut self, node: &mut ExpressionNode) {
        self.visit_expression_at(node.start, &mut node.item);
    }

    fn visit_expression_at(&mut self, start: u32, expression: &mut Expression) {
        self.walk_expression(expression);
        if self.settings.transform_exponentiation {
            self.rewrite_exponentiation(start, expression);
        }
        if self.settings.transform_arrow {
            self.rewrite_arrow(expression);
        }
    }

    fn walk_expression(&mut self, expression: &mut Expression) {
        match expression {
            Expression::This
            | Expression::Super
            | Expression::Identifier(_)
            | Expression::Value(_) => {}
            Expression::Template(template) => self.visit_template(template),
            Expression::TaggedTemplate { tag, quasi } => {
                self.visit_expression(tag);
                self.visit_template(&mut quasi.item);
            }
            Expression::Array { body } => {
                for element in body.iter_mut().flatten() {
                    self.visit_expression(element);
                }
            }
            Expression::Object { body } => {
                for property in body {
                    match &mut property.item {
                        Property::Shorthand(_) => {}
                        Property::Literal { key, value } => {
                            self.visit_key(key);
                            self.visit_expression(value);
                        }
                        Property::Method { key, value, .. } => {
                            self.visit_key(key);
                            self.visit_function(&mut value.item);
                        }
                        Property::Spread { argument } => self.visit_expression(argument),
                    }
                }
            }
            Expression::Member { object, .. } => self.visit_expression(object),
            Expression::ComputedMember { object, property } => {
                self.visit_expression(object);
                self.visit_expression(property);
            }
            Expression::Call { callee, arguments } | Expression::New { callee, arguments } => {
                self.visit_expression(callee);
                for argument in arguments {
                    self.visit_expression(argument);
                }
            }
            Expression::Unary { argument, .. }
            | Expression::Update { argument, .. }
            | Expression::Spread { argument }
            | Expression::Await { argument } => self.visit_expression(argument),
            Expression::Binary { left, right, .. } | Expression::Logical { left, right, .. } => {
                self.visit_expression(left);
                self.visit_expression(right);
            }
            Expression::Assignment { left, right, .. } => {
                self.visit_pattern(left);
                self.visit_expression(right);
            }
            Expression::Conditional { test, consequent, alternate } => {
                self.visit_expression(test);
                self.visit_expression(consequent);
                self.visit_expression(alternate);
            }
            Expression::Sequence { body } => {
                for expression in body {
                    self.visit_expression(expression);
                }
            }
            Expression::Arrow { params, body, .. } => {
                for param in params {
                    self.visit_pattern(param);
                }
                match body {
                    ArrowBody::Expression(expression) => self.visit_expression(expression),
                    ArrowBody::Block(block) => self.visit_block(block),
                }
            }
            Expression::Function { function } => self.visit_function(function),
            Expression::Class { class } => self.visit_class(class),
            Expression::Yield { argument, .. } => {
                if let Some(argument) = argument {
                    self.visit_expression(argument);
                }
            }
        }
    }

    fn rewrite_exponentiation(&mut self, start: u32, expression: &mut Expression) {
        let replace = match expression {
            Expression::Binary { operator: BinaryOp::Pow, .. } => true,
            Expression::Assignment { operator: AssignOp::PowAssign, left, .. } => target_expression(left).is_some(),
            _ => false,
        };
        if !replace {
            return;
        }

        let item = std::mem::replace(expression, Expression::This);
        *expression = match item {
            Expression::Binary { operator: BinaryOp::Pow, left, right } => math_pow(start, *left, *right),
            Expression::Assignment { operator: AssignOp::PowAssign, left, right } => match target_expression(&left) {
                Some(target) => {
                    let (call_start, call_end) = (target.start, right.end);
                    let call = math_pow(call_start, target, *right);
                    Expression::Assignment {
                        operator: AssignOp::Assign,
                        left,
                        right: Box::new(Loc::new(call_start, call_end, call)),
                    }
                }
                None => Expression::Assignment { operator: AssignOp::PowAssign, left, right },
            },
            item => item,
        };
        self.rewritten += 1;
    }

    /// An expression body becomes a block holding one `return` with the
    /// body's span. `this` and `arguments` are not rebound.
    fn rewrite_arrow(&mut self, expression: &mut Expression) {
        if !matches!(expression, Expression::Arrow { .. }) {
            return;
        }

        *expression = match std::mem::replace(expression, Expression::This) {
            Expression::Arrow { is_async, params, body } => {
                let body = match body {
                    ArrowBody::Block(block) => block,
                    ArrowBody::Expression(value) => {
                        let (start, end) = (value.start, value.end);
                        let ret = Loc::new(start, end, Statement::Return { value: Some(*value) });
                        Loc::new(start, end, Block { body: vec![ret] })
                    }
                };
                Expression::Function {
                    function: Function {
                        name: None,
                        is_generator: false,
                        is_async,
                        params,
                        body,
                    },
                }
            }
            item => item,
        };
        self.rewritten += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn rewritten(source: &str) -> Program {
        let program = Parser::new(source).unwrap().parse().unwrap();
        rewrite(program, &Settings::default())
    }

    fn first_expression(program: &Program) -> &ExpressionNode {
        match &program.body[0].item {
            Statement::Expression { expression } => expression,
            other => panic!("unexpected {:?}", other),
        }
    }

    fn is_math_pow(callee: &ExpressionNode) -> bool {
        match &callee.item {
            Expression::Member { object, property } => {
                &*property.item == "pow" && matches!(&object.item, Expression::Identifier(name) if &**name == "Math")
            }
            _ => false,
        }
    }

    #[test]
    fn test_exponentiation_becomes_call() {
        let program = rewritten("a ** b");
        let expression = first_expression(&program);
        assert_eq!((expression.start, expression.end), (0, 6));
        match &expression.item {
            Expression::Call { callee, arguments } => {
                assert!(is_math_pow(callee));
                assert_eq!((callee.start, callee.end), (0, 0));
                assert_eq!(arguments.len(), 2);
                assert!(matches!(&arguments[0].item, Expression::Identifier(name) if &**name == "a"));
                assert!(matches!(&arguments[1].item, Expression::Identifier(name) if &**name == "b"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_nested_exponentiation() {
        // Right-associative: a ** (b ** c)
        let program = rewritten("a ** b ** c");
        match &first_expression(&program).item {
            Expression::Call { arguments, .. } => {
                assert!(matches!(&arguments[1].item, Expression::Call { callee, .. } if is_math_pow(callee)));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_exponent_assignment() {
        let program = rewritten("x.y **= 2");
        match &first_expression(&program).item {
            Expression::Assignment { operator: AssignOp::Assign, left, right } => {
                assert!(matches!(left.item, Pattern::Expression(Expression::Member { .. })));
                assert_eq!((right.start, right.end), (0, 9));
                assert!(matches!(&right.item, Expression::Call { arguments, .. } if arguments.len() == 2));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_rewrites_every_position() {
        let source = "
            function f(a = 2 ** 3) {
                for (let i = x ** 2; i < n ** 2; i += 1) { g(`${i ** 2}`, [i ** 2], { k: i ** 2 }); }
                return () => a ** 2;
            }
            class C { [k ** 2] = v ** 2; m() { throw e ** 2; } }
        ";
        let program = rewritten(source);
        let dump = crate::dump::dump(&program);
        assert!(!dump.contains("Pow"));
    }

    #[test]
    fn test_idempotent() {
        let once = rewritten("y = (a ** b) * c ** d");
        let twice = rewrite(once.clone(), &Settings::default());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_arrow_becomes_function() {
        let program = Parser::new("f = async (a, b = 1) => a ** b").unwrap().parse().unwrap();
        let program = rewrite(program, &Settings::target_es5());
        match &first_expression(&program).item {
            Expression::Assignment { right, .. } => match &right.item {
                Expression::Function { function } => {
                    assert!(function.is_async && !function.is_generator);
                    assert!(function.name.is_none());
                    assert_eq!(function.params.len(), 2);
                    assert_eq!((function.body.start, function.body.end), (24, 30));
                    match &function.body.item.body[..] {
                        [ret] => match &ret.item {
                            Statement::Return { value: Some(value) } => {
                                assert!(matches!(&value.item, Expression::Call { callee, .. } if is_math_pow(callee)));
                            }
                            other => panic!("unexpected {:?}", other),
                        },
                        other => panic!("unexpected {:?}", other),
                    }
                }
                other => panic!("unexpected {:?}", other),
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_arrow_kept_for_es2015() {
        let program = rewritten("f = () => { return 1; }");
        assert!(matches!(
            &first_expression(&program).item,
            Expression::Assignment { right, .. } if matches!(right.item, Expression::Arrow { .. })
        ));
    }

    #[test]
    fn test_no_transform_preset() {
        let program = Parser::new("a ** b").unwrap().parse().unwrap();
        let untouched = rewrite(program.clone(), &Settings::no_transform());
        assert_eq!(program, untouched);
    }
}
