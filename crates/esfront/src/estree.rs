//! ESTree Export
//!
//! Converts a [`Program`] into the ESTree JSON shape. Every node object
//! starts with `type`, then the node's own fields, then `start` and `end`.

use serde_json::{json, Map, Value as Json};

use crate::ast::{
    ArrowBody, Block, Class, ClassMember, Declarator, Expression, ExpressionNode, ForInit,
    Function, IdentifierNode, Loc, MethodKind, Pattern, PatternNode, PatternProperty, Program,
    Property, PropertyKey, Statement, StatementNode, TemplateLiteral, Value, VarKind,
};
use crate::config::ExportOptions;

/// Node types exported with a zero span in legacy mode
const LEGACY_CONTAINERS: &[&str] = &[
    "Program",
    "VariableDeclaration",
    "VariableDeclarator",
    "FunctionExpression",
    "BlockStatement",
    "ReturnStatement",
];

/// Build the ESTree document for `program`
pub fn export(program: &Program, options: &ExportOptions) -> Json {
    let exporter = Exporter { legacy_container_spans: options.legacy_container_spans };
    exporter.node("Program", program.start, program.end, [
        ("body", exporter.statements(&program.body)),
        ("sourceType", json!("script")),
    ])
}

/// Serialize the ESTree document, indented when `options.pretty` is set
pub fn to_json(program: &Program, options: &ExportOptions) -> String {
    let document = export(program, options);
    if options.pretty {
        format!("{:#}", document)
    } else {
        document.to_string()
    }
}

struct Exporter {
    legacy_container_spans: bool,
}

impl Exporter {
    fn node<const N: usize>(&self, kind: &'static str, start: u32, end: u32, fields: [(&'static str, Json); N]) -> Json {
        let (start, end) = if self.legacy_container_spans && LEGACY_CONTAINERS.contains(&kind) {
            (0, 0)
        } else {
            (start, end)
        };

        let mut map = Map::with_capacity(N + 3);
        map.insert("type".into(), Json::from(kind));
        for (key, value) in fields {
            map.insert(key.into(), value);
        }
        map.insert("start".into(), Json::from(start));
        map.insert("end".into(), Json::from(end));
        Json::Object(map)
    }

    fn statements(&self, body: &[StatementNode]) -> Json {
        Json::Array(body.iter().map(|s| self.statement(s)).collect())
    }

    fn expressions(&self, body: &[ExpressionNode]) -> Json {
        Json::Array(body.iter().map(|e| self.expression(e)).collect())
    }

    fn patterns(&self, body: &[PatternNode]) -> Json {
        Json::Array(body.iter().map(|p| self.pattern(p)).collect())
    }

    fn optional_expression(&self, node: Option<&ExpressionNode>) -> Json {
        node.map_or(Json::Null, |e| self.expression(e))
    }

    fn identifier(&self, id: &IdentifierNode) -> Json {
        self.node("Identifier", id.start, id.end, [("name", json!(&*id.item))])
    }

    fn optional_identifier(&self, id: Option<&IdentifierNode>) -> Json {
        id.map_or(Json::Null, |id| self.identifier(id))
    }

    fn statement(&self, node: &StatementNode) -> Json {
        let (start, end) = (node.start, node.end);
        match &node.item {
            Statement::Empty => self.node("EmptyStatement", start, end, []),
            Statement::Debugger => self.node("DebuggerStatement", start, end, []),
            Statement::Expression { expression } => {
                self.node("ExpressionStatement", start, end, [("expression", self.expression(expression))])
            }
            Statement::Declaration { kind, declarators } => {
                self.variable_declaration(start, end, *kind, declarators)
            }
            Statement::Function { function } => self.function("FunctionDeclaration", start, end, function),
            Statement::Class { class } => self.class("ClassDeclaration", start, end, class),
            Statement::Return { value } => {
                self.node("ReturnStatement", start, end, [("argument", self.optional_expression(value.as_ref()))])
            }
            Statement::Break { label } => {
                self.node("BreakStatement", start, end, [("label", self.optional_identifier(label.as_ref()))])
            }
            Statement::Continue { label } => {
                self.node("ContinueStatement", start, end, [("label", self.optional_identifier(label.as_ref()))])
            }
            Statement::Throw { value } => self.node("ThrowStatement", start, end, [("argument", self.expression(value))]),
            Statement::If { test, consequent, alternate } => self.node("IfStatement", start, end, [
                ("test", self.expression(test)),
                ("consequent", self.statement(consequent)),
                ("alternate", alternate.as_ref().map_or(Json::Null, |s| self.statement(s))),
            ]),
            Statement::While { test, body } => self.node("WhileStatement", start, end, [
                ("test", self.expression(test)),
                ("body", self.statement(body)),
            ]),
            Statement::Do { body, test } => self.node("DoWhileStatement", start, end, [
                ("body", self.statement(body)),
                ("test", self.expression(test)),
            ]),
            Statement::For { init, test, update, body } => self.node("ForStatement", start, end, [
                ("init", init.as_ref().map_or(Json::Null, |init| self.for_init(init))),
                ("test", self.optional_expression(test.as_ref())),
                ("update", self.optional_expression(update.as_ref())),
                ("body", self.statement(body)),
            ]),
            Statement::ForIn { left, right, body } => self.node("ForInStatement", start, end, [
                ("left", self.for_init(left)),
                ("right", self.expression(right)),
                ("body", self.statement(body)),
            ]),
            Statement::ForOf { left, right, body } => self.node("ForOfStatement", start, end, [
                ("await", json!(false)),
                ("left", self.for_init(left)),
                ("right", self.expression(right)),
                ("body", self.statement(body)),
            ]),
            Statement::Switch { discriminant, cases } => {
                let cases = cases
                    .iter()
                    .map(|case| {
                        self.node("SwitchCase", case.start, case.end, [
                            ("test", self.optional_expression(case.item.test.as_ref())),
                            ("consequent", self.statements(&case.item.consequent)),
                        ])
                    })
                    .collect();
                self.node("SwitchStatement", start, end, [
                    ("discriminant", self.expression(discriminant)),
                    ("cases", Json::Array(cases)),
                ])
            }
            Statement::Try { block, handler, finalizer } => {
                let handler = handler.as_ref().map_or(Json::Null, |handler| {
                    self.node("CatchClause", handler.start, handler.end, [
                        ("param", handler.item.param.as_ref().map_or(Json::Null, |p| self.pattern(p))),
                        ("body", self.block(&handler.item.body)),
                    ])
                });
                self.node("TryStatement", start, end, [
                    ("block", self.block(block)),
                    ("handler", handler),
                    ("finalizer", finalizer.as_ref().map_or(Json::Null, |b| self.block(b))),
                ])
            }
            Statement::Block { body } => self.node("BlockStatement", start, end, [("body", self.statements(body))]),
            Statement::Labeled { label, body } => self.node("LabeledStatement", start, end, [
                ("label", self.identifier(label)),
                ("body", self.statement(body)),
            ]),
        }
    }

    fn block(&self, block: &Loc<Block>) -> Json {
        self.node("BlockStatement", block.start, block.end, [("body", self.statements(&block.item.body))])
    }

    fn variable_declaration(&self, start: u32, end: u32, kind: VarKind, declarators: &[Loc<Declarator>]) -> Json {
        let declarations = declarators
            .iter()
            .map(|d| {
                self.node("VariableDeclarator", d.start, d.end, [
                    ("id", self.pattern(&d.item.id)),
                    ("init", self.optional_expression(d.item.init.as_ref())),
                ])
            })
            .collect();

        self.node("VariableDeclaration", start, end, [
            ("declarations", Json::Array(declarations)),
            ("kind", json!(kind.as_str())),
        ])
    }

    fn for_init(&self, init: &Loc<ForInit>) -> Json {
        match &init.item {
            ForInit::Declaration { kind, declarators } => {
                self.variable_declaration(init.start, init.end, *kind, declarators)
            }
            ForInit::Expression(expression) => self.expression_at(init.start, init.end, expression),
            ForInit::Pattern(pattern) => self.pattern_at(init.start, init.end, pattern),
        }
    }

    fn function(&self, kind: &'static str, start: u32, end: u32, function: &Function) -> Json {
        self.node(kind, start, end, [
            ("id", self.optional_identifier(function.name.as_ref())),
            ("expression", json!(false)),
            ("generator", json!(function.is_generator)),
            ("async", json!(function.is_async)),
            ("params", self.patterns(&function.params)),
            ("body", self.block(&function.body)),
        ])
    }

    fn class(&self, kind: &'static str, start: u32, end: u32, class: &Class) -> Json {
        let members = class
            .body
            .item
            .iter()
            .map(|member| {
                let (start, end) = (member.start, member.end);
                match &member.item {
                    ClassMember::Method { is_static, key, kind, value } => {
                        let (key, computed) = self.property_key(key);
                        let kind = match kind {
                            MethodKind::Constructor => "constructor",
                            MethodKind::Method => "method",
                            MethodKind::Get => "get",
                            MethodKind::Set => "set",
                        };
                        self.node("MethodDefinition", start, end, [
                            ("static", json!(is_static)),
                            ("computed", json!(computed)),
                            ("key", key),
                            ("kind", json!(kind)),
                            ("value", self.function("FunctionExpression", value.start, value.end, &value.item)),
                        ])
                    }
                    ClassMember::Field { is_static, key, value } => {
                        let (key, computed) = self.property_key(key);
                        self.node("PropertyDefinition", start, end, [
                            ("static", json!(is_static)),
                            ("computed", json!(computed)),
                            ("key", key),
                            ("value", self.optional_expression(value.as_ref())),
                        ])
                    }
                }
            })
            .collect();

        self.node(kind, start, end, [
            ("id", self.optional_identifier(class.name.as_ref())),
            ("superClass", class.extends.as_ref().map_or(Json::Null, |e| self.expression(e))),
            ("body", self.node("ClassBody", class.body.start, class.body.end, [("body", Json::Array(members))])),
        ])
    }

    /// Key node and whether it is computed
    fn property_key(&self, key: &Loc<PropertyKey>) -> (Json, bool) {
        match &key.item {
            PropertyKey::Identifier(name) => {
                (self.node("Identifier", key.start, key.end, [("name", json!(&**name))]), false)
            }
            PropertyKey::Literal(value) => (self.literal(key.start, key.end, value), false),
            PropertyKey::Computed(expression) => (self.expression(expression), true),
        }
    }

    fn literal(&self, start: u32, end: u32, value: &Value) -> Json {
        match value {
            Value::Null => self.node("Literal", start, end, [("value", Json::Null), ("raw", json!("null"))]),
            Value::Boolean(b) => self.node("Literal", start, end, [
                ("value", json!(b)),
                ("raw", json!(if *b { "true" } else { "false" })),
            ]),
            // Numbers keep their source text
            Value::Number(raw) => self.node("Literal", start, end, [("value", json!(&**raw)), ("raw", json!(&**raw))]),
            Value::String(raw) => {
                let contents = raw.get(1..raw.len().saturating_sub(1)).unwrap_or_default();
                self.node("Literal", start, end, [("value", json!(contents)), ("raw", json!(&**raw))])
            }
            Value::RegEx(raw) => {
                let close = raw.rfind('/').unwrap_or(0);
                let pattern = raw.get(1..close).unwrap_or_default();
                let flags = raw.get(close + 1..).unwrap_or_default();
                self.node("Literal", start, end, [
                    ("value", Json::Null),
                    ("raw", json!(&**raw)),
                    ("regex", json!({ "pattern": pattern, "flags": flags })),
                ])
            }
        }
    }

    fn template(&self, start: u32, end: u32, template: &TemplateLiteral) -> Json {
        let last = template.quasis.len().saturating_sub(1);
        let quasis = template
            .quasis
            .iter()
            .enumerate()
            .map(|(i, quasi)| {
                self.node("TemplateElement", quasi.start, quasi.end, [
                    ("value", json!({ "raw": &*quasi.item, "cooked": &*quasi.item })),
                    ("tail", json!(i == last)),
                ])
            })
            .collect();

        self.node("TemplateLiteral", start, end, [
            ("expressions", self.expressions(&template.expressions)),
            ("quasis", Json::Array(quasis)),
        ])
    }

    fn expression(&self, node: &ExpressionNode) -> Json {
        self.expression_at(node.start, node.end, &node.item)
    }

    fn expression_at(&self, start: u32, end: u32, expression: &Expression) -> Json {
        match expression {
            Expression::This => self.node("ThisExpression", start, end, []),
            Expression::Super => self.node("Super", start, end, []),
            Expression::Identifier(name) => self.node("Identifier", start, end, [("name", json!(&**name))]),
            Expression::Value(value) => self.literal(start, end, value),
            Expression::Template(template) => self.template(start, end, template),
            Expression::TaggedTemplate { tag, quasi } => self.node("TaggedTemplateExpression", start, end, [
                ("tag", self.expression(tag)),
                ("quasi", self.template(quasi.start, quasi.end, &quasi.item)),
            ]),
            Expression::Array { body } => {
                let elements = body
                    .iter()
                    .map(|e| e.as_ref().map_or(Json::Null, |e| self.expression(e)))
                    .collect();
                self.node("ArrayExpression", start, end, [("elements", Json::Array(elements))])
            }
            Expression::Object { body } => {
                let properties = body.iter().map(|p| self.property(p)).collect();
                self.node("ObjectExpression", start, end, [("properties", Json::Array(properties))])
            }
            Expression::Member { object, property } => self.node("MemberExpression", start, end, [
                ("object", self.expression(object)),
                ("property", self.identifier(property)),
                ("computed", json!(false)),
                ("optional", json!(false)),
            ]),
            Expression::ComputedMember { object, property } => self.node("MemberExpression", start, end, [
                ("object", self.expression(object)),
                ("property", self.expression(property)),
                ("computed", json!(true)),
                ("optional", json!(false)),
            ]),
            Expression::Call { callee, arguments } => self.node("CallExpression", start, end, [
                ("callee", self.expression(callee)),
                ("arguments", self.expressions(arguments)),
                ("optional", json!(false)),
            ]),
            Expression::New { callee, arguments } => self.node("NewExpression", start, end, [
                ("callee", self.expression(callee)),
                ("arguments", self.expressions(arguments)),
            ]),
            Expression::Unary { operator, argument } => self.node("UnaryExpression", start, end, [
                ("operator", json!(operator.as_str())),
                ("prefix", json!(true)),
                ("argument", self.expression(argument)),
            ]),
            Expression::Update { operator, prefix, argument } => self.node("UpdateExpression", start, end, [
                ("operator", json!(operator.as_str())),
                ("prefix", json!(prefix)),
                ("argument", self.expression(argument)),
            ]),
            Expression::Binary { operator, left, right } => self.node("BinaryExpression", start, end, [
                ("left", self.expression(left)),
                ("operator", json!(operator.as_str())),
                ("right", self.expression(right)),
            ]),
            Expression::Logical { operator, left, right } => self.node("LogicalExpression", start, end, [
                ("left", self.expression(left)),
                ("operator", json!(operator.as_str())),
                ("right", self.expression(right)),
            ]),
            Expression::Assignment { operator, left, right } => self.node("AssignmentExpression", start, end, [
                ("operator", json!(operator.as_str())),
                ("left", self.pattern(left)),
                ("right", self.expression(right)),
            ]),
            Expression::Conditional { test, consequent, alternate } => {
                self.node("ConditionalExpression", start, end, [
                    ("test", self.expression(test)),
                    ("consequent", self.expression(consequent)),
                    ("alternate", self.expression(alternate)),
                ])
            }
            Expression::Sequence { body } => {
                self.node("SequenceExpression", start, end, [("expressions", self.expressions(body))])
            }
            Expression::Spread { argument } => {
                self.node("SpreadElement", start, end, [("argument", self.expression(argument))])
            }
            Expression::Arrow { is_async, params, body } => {
                let (is_expression, body) = match body {
                    ArrowBody::Expression(expression) => (true, self.expression(expression)),
                    ArrowBody::Block(block) => (false, self.block(block)),
                };
                self.node("ArrowFunctionExpression", start, end, [
                    ("id", Json::Null),
                    ("expression", json!(is_expression)),
                    ("generator", json!(false)),
                    ("async", json!(is_async)),
                    ("params", self.patterns(params)),
                    ("body", body),
                ])
            }
            Expression::Function { function } => self.function("FunctionExpression", start, end, function),
            Expression::Class { class } => self.class("ClassExpression", start, end, class),
            Expression::Yield { argument, delegate } => self.node("YieldExpression", start, end, [
                ("delegate", json!(delegate)),
                ("argument", argument.as_ref().map_or(Json::Null, |a| self.expression(a))),
            ]),
            Expression::Await { argument } => {
                self.node("AwaitExpression", start, end, [("argument", self.expression(argument))])
            }
        }
    }

    fn property(&self, property: &Loc<Property>) -> Json {
        let (start, end) = (property.start, property.end);
        match &property.item {
            Property::Shorthand(name) => {
                let id = self.node("Identifier", start, end, [("name", json!(&**name))]);
                self.object_property(start, end, id.clone(), id, "init", false, true, false)
            }
            Property::Literal { key, value } => {
                let (key, computed) = self.property_key(key);
                self.object_property(start, end, key, self.expression(value), "init", false, false, computed)
            }
            Property::Method { key, kind, value } => {
                let (key, computed) = self.property_key(key);
                let function = self.function("FunctionExpression", value.start, value.end, &value.item);
                let (kind, method) = match kind {
                    MethodKind::Get => ("get", false),
                    MethodKind::Set => ("set", false),
                    MethodKind::Method | MethodKind::Constructor => ("init", true),
                };
                self.object_property(start, end, key, function, kind, method, false, computed)
            }
            Property::Spread { argument } => {
                self.node("SpreadElement", start, end, [("argument", self.expression(argument))])
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn object_property(
        &self,
        start: u32,
        end: u32,
        key: Json,
        value: Json,
        kind: &'static str,
        method: bool,
        shorthand: bool,
        computed: bool,
    ) -> Json {
        self.node("Property", start, end, [
            ("method", json!(method)),
            ("shorthand", json!(shorthand)),
            ("computed", json!(computed)),
            ("key", key),
            ("value", value),
            ("kind", json!(kind)),
        ])
    }

    fn pattern(&self, node: &PatternNode) -> Json {
        self.pattern_at(node.start, node.end, &node.item)
    }

    fn pattern_at(&self, start: u32, end: u32, pattern: &Pattern) -> Json {
        match pattern {
            Pattern::Identifier(name) => self.node("Identifier", start, end, [("name", json!(&**name))]),
            Pattern::Expression(expression) => self.expression_at(start, end, expression),
            Pattern::Array { elements } => {
                let elements = elements
                    .iter()
                    .map(|e| e.as_ref().map_or(Json::Null, |e| self.pattern(e)))
                    .collect();
                self.node("ArrayPattern", start, end, [("elements", Json::Array(elements))])
            }
            Pattern::Object { properties } => {
                let properties = properties
                    .iter()
                    .map(|property| match &property.item {
                        PatternProperty::Property { key, value, shorthand } => {
                            let (key, computed) = self.property_key(key);
                            let value = self.pattern(value);
                            self.object_property(property.start, property.end, key, value, "init", false, *shorthand, computed)
                        }
                        PatternProperty::Rest { argument } => {
                            self.node("RestElement", property.start, property.end, [("argument", self.pattern(argument))])
                        }
                    })
                    .collect();
                self.node("ObjectPattern", start, end, [("properties", Json::Array(properties))])
            }
            Pattern::Assignment { left, right } => self.node("AssignmentPattern", start, end, [
                ("left", self.pattern(left)),
                ("right", self.expression(right)),
            ]),
            Pattern::Rest { argument } => self.node("RestElement", start, end, [("argument", self.pattern(argument))]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn export_source(source: &str) -> Json {
        let program = Parser::new(source).unwrap().parse().unwrap();
        export(&program, &ExportOptions::default())
    }

    fn first_expression(source: &str) -> Json {
        export_source(source)["body"][0]["expression"].clone()
    }

    #[test]
    fn test_key_order() {
        let document = export_source("x");
        let keys: Vec<&str> = document.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["type", "body", "sourceType", "start", "end"]);
    }

    #[test]
    fn test_literals() {
        assert_eq!(first_expression("0x1F")["value"], json!("0x1F"));
        assert_eq!(first_expression("'hi'")["value"], json!("hi"));
        assert_eq!(first_expression("'hi'")["raw"], json!("'hi'"));
        assert_eq!(first_expression("true")["value"], json!(true));
        assert_eq!(first_expression("null")["value"], Json::Null);

        let regex = first_expression("/a[/]b/gi");
        assert_eq!(regex["regex"], json!({ "pattern": "a[/]b", "flags": "gi" }));
    }

    #[test]
    fn test_member_and_call() {
        let call = first_expression("a.b[c](d, ...e)");
        assert_eq!(call["type"], "CallExpression");
        assert_eq!(call["callee"]["type"], "MemberExpression");
        assert_eq!(call["callee"]["computed"], json!(true));
        assert_eq!(call["callee"]["object"]["property"]["name"], "b");
        assert_eq!(call["arguments"][1]["type"], "SpreadElement");
    }

    #[test]
    fn test_object_properties() {
        let object = first_expression("({ a, b: 1, get c() {}, [d]() {} })");
        let properties = object["properties"].as_array().unwrap();
        assert_eq!(properties[0]["shorthand"], json!(true));
        assert_eq!(properties[0]["value"]["name"], "a");
        assert_eq!(properties[2]["kind"], "get");
        assert_eq!(properties[3]["method"], json!(true));
        assert_eq!(properties[3]["computed"], json!(true));
    }

    #[test]
    fn test_class_members() {
        let document = export_source("class A { constructor() {} static x = 1 }");
        let class = &document["body"][0];
        assert_eq!(class["type"], "ClassDeclaration");
        let members = class["body"]["body"].as_array().unwrap();
        assert_eq!(members[0]["type"], "MethodDefinition");
        assert_eq!(members[0]["kind"], "constructor");
        assert_eq!(members[1]["type"], "PropertyDefinition");
        assert_eq!(members[1]["static"], json!(true));
    }

    #[test]
    fn test_template() {
        let template = first_expression("`a${b}c`");
        assert_eq!(template["quasis"][0]["value"]["raw"], "a");
        assert_eq!(template["quasis"][1]["tail"], json!(true));
        assert_eq!(template["expressions"][0]["name"], "b");
    }

    #[test]
    fn test_legacy_container_spans() {
        let program = Parser::new("let a = 1").unwrap().parse().unwrap();
        let options = ExportOptions { legacy_container_spans: true, ..ExportOptions::default() };
        let document = export(&program, &options);
        assert_eq!((document["start"].clone(), document["end"].clone()), (json!(0), json!(0)));
        let declarator = &document["body"][0]["declarations"][0];
        assert_eq!(declarator["end"], json!(0));
        assert_eq!(declarator["init"]["start"], json!(8));
        assert_eq!(declarator["init"]["end"], json!(9));
    }

    #[test]
    fn test_pretty_output() {
        let program = Parser::new("a").unwrap().parse().unwrap();
        let compact = to_json(&program, &ExportOptions::default());
        let pretty = to_json(&program, &ExportOptions { pretty: true, ..ExportOptions::default() });
        assert!(!compact.contains('\n'));
        assert!(pretty.contains('\n'));
        assert_eq!(serde_json::from_str::<Json>(&compact).unwrap(), serde_json::from_str::<Json>(&pretty).unwrap());
    }
}
