use crate::ast::*;
use crate::loc::{find_line_col_for_pos, Loc};
use crate::source::Source;

/// Prints an AST as indented text with one node per braced group, in the shape of the standard
/// ESTree node names. Used by the CLI and the test suite.
struct Printer<'a> {
    buf: String,
    indent: usize,
    source: &'a Source,
}

impl<'a> Printer<'a> {
    fn new(source: &'a Source) -> Printer<'a> {
        Printer { buf: String::new(), indent: 0, source }
    }

    fn finish(self) -> String {
        self.buf
    }

    fn inc_indent(&mut self) {
        self.indent += 1;
    }

    fn dec_indent(&mut self) {
        self.indent -= 1;
    }

    fn indent(&mut self) {
        self.string(&"  ".repeat(self.indent))
    }

    fn string(&mut self, str: &str) {
        self.buf.push_str(str);
    }

    fn print_str(&mut self, string: &str) {
        self.buf.push('"');
        for char in string.chars() {
            match char {
                '"' => self.buf.push_str("\\\""),
                '\\' => self.buf.push_str("\\\\"),
                '\n' => self.buf.push_str("\\n"),
                '\r' => self.buf.push_str("\\r"),
                '\t' => self.buf.push_str("\\t"),
                other => self.buf.push(other),
            }
        }
        self.buf.push('"');
    }

    fn print_bool(&mut self, value: bool) {
        if value {
            self.string("true")
        } else {
            self.string("false")
        }
    }

    fn print_f64(&mut self, value: f64) {
        self.string(&value.to_string())
    }

    fn print_null(&mut self) {
        self.string("null")
    }

    fn start_node(&mut self, name: &str, loc: &Loc) {
        self.string("{\n");
        self.inc_indent();

        self.indent();
        self.string("type: ");
        self.print_str(name);
        self.string(",\n");

        let line_offsets = self.source.line_offsets();
        let start = find_line_col_for_pos(loc.start, line_offsets);
        let end = find_line_col_for_pos(loc.end, line_offsets);

        self.indent();
        self.string(&format!(
            "loc: \"{}:{}-{}:{}\",\n",
            start.line, start.col, end.line, end.col
        ));
    }

    fn end_node(&mut self) {
        self.dec_indent();
        self.indent();
        self.string("}");
    }

    fn property<T>(&mut self, name: &str, value: T, print_value_fn: fn(&mut Self, T)) {
        self.indent();
        self.string(name);
        self.string(": ");
        print_value_fn(self, value);
        self.string(",\n");
    }

    fn array_property<T>(&mut self, name: &str, values: Vec<T>, print_value_fn: fn(&mut Self, T)) {
        self.indent();
        self.string(name);

        if values.is_empty() {
            self.string(": [],\n");
            return;
        }

        self.string(": [\n");
        self.inc_indent();

        for value in values {
            self.indent();
            print_value_fn(self, value);
            self.string(",\n");
        }

        self.dec_indent();
        self.indent();
        self.string("],\n");
    }

    fn optional_property<T>(
        &mut self,
        name: &str,
        value: Option<T>,
        print_value_fn: fn(&mut Self, T),
    ) {
        self.indent();
        self.string(name);
        self.string(": ");
        match value {
            None => self.print_null(),
            Some(value) => print_value_fn(self, value),
        }
        self.string(",\n");
    }

    // Program and statements

    fn print_program(&mut self, program: &Program) {
        self.start_node("Program", &program.loc);
        let source_type = match program.source_type {
            crate::options::SourceType::Script => "script",
            crate::options::SourceType::Module => "module",
        };
        self.property("sourceType", source_type, Printer::print_str);
        self.array_property("body", program.body.iter().collect(), Printer::print_statement);
        self.end_node();
    }

    fn print_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Expr(stmt) => {
                self.start_node("ExpressionStatement", &stmt.loc);
                self.property("expression", &*stmt.expr, Printer::print_expression);
                if let Some(directive) = &stmt.directive {
                    self.property("directive", directive.as_str(), Printer::print_str);
                }
                self.end_node();
            }
            Statement::Block(block) => self.print_block(block),
            Statement::Empty(loc) => {
                self.start_node("EmptyStatement", loc);
                self.end_node();
            }
            Statement::Debugger(loc) => {
                self.start_node("DebuggerStatement", loc);
                self.end_node();
            }
            Statement::VarDecl(decl) => self.print_variable_declaration(decl),
            Statement::FuncDecl(function) => self.print_function(function, "FunctionDeclaration"),
            Statement::ClassDecl(class) => self.print_class(class, "ClassDeclaration"),
            Statement::If(stmt) => {
                self.start_node("IfStatement", &stmt.loc);
                self.property("test", &*stmt.test, Printer::print_expression);
                self.property("consequent", &*stmt.conseq, Printer::print_statement);
                self.optional_property(
                    "alternate",
                    stmt.altern.as_deref(),
                    Printer::print_statement,
                );
                self.end_node();
            }
            Statement::Switch(stmt) => {
                self.start_node("SwitchStatement", &stmt.loc);
                self.property("discriminant", &*stmt.discriminant, Printer::print_expression);
                self.array_property(
                    "cases",
                    stmt.cases.iter().collect(),
                    Printer::print_switch_case,
                );
                self.end_node();
            }
            Statement::For(stmt) => {
                self.start_node("ForStatement", &stmt.loc);
                self.optional_property("init", stmt.init.as_deref(), Printer::print_for_init);
                self.optional_property("test", stmt.test.as_deref(), Printer::print_expression);
                self.optional_property(
                    "update",
                    stmt.update.as_deref(),
                    Printer::print_expression,
                );
                self.property("body", &*stmt.body, Printer::print_statement);
                self.end_node();
            }
            Statement::ForEach(stmt) => {
                let name = match stmt.kind {
                    ForEachKind::In => "ForInStatement",
                    ForEachKind::Of => "ForOfStatement",
                };
                self.start_node(name, &stmt.loc);
                if stmt.kind == ForEachKind::Of {
                    self.property("await", stmt.is_await, Printer::print_bool);
                }
                self.property("left", &*stmt.left, Printer::print_for_each_init);
                self.property("right", &*stmt.right, Printer::print_expression);
                self.property("body", &*stmt.body, Printer::print_statement);
                self.end_node();
            }
            Statement::While(stmt) => {
                self.start_node("WhileStatement", &stmt.loc);
                self.property("test", &*stmt.test, Printer::print_expression);
                self.property("body", &*stmt.body, Printer::print_statement);
                self.end_node();
            }
            Statement::DoWhile(stmt) => {
                self.start_node("DoWhileStatement", &stmt.loc);
                self.property("body", &*stmt.body, Printer::print_statement);
                self.property("test", &*stmt.test, Printer::print_expression);
                self.end_node();
            }
            Statement::With(stmt) => {
                self.start_node("WithStatement", &stmt.loc);
                self.property("object", &*stmt.object, Printer::print_expression);
                self.property("body", &*stmt.body, Printer::print_statement);
                self.end_node();
            }
            Statement::Try(stmt) => {
                self.start_node("TryStatement", &stmt.loc);
                self.property("block", &*stmt.block, Printer::print_block);
                self.optional_property(
                    "handler",
                    stmt.handler.as_deref(),
                    Printer::print_catch_clause,
                );
                self.optional_property(
                    "finalizer",
                    stmt.finalizer.as_deref(),
                    Printer::print_block,
                );
                self.end_node();
            }
            Statement::Throw(stmt) => {
                self.start_node("ThrowStatement", &stmt.loc);
                self.property("argument", &*stmt.argument, Printer::print_expression);
                self.end_node();
            }
            Statement::Return(stmt) => {
                self.start_node("ReturnStatement", &stmt.loc);
                self.optional_property(
                    "argument",
                    stmt.argument.as_deref(),
                    Printer::print_expression,
                );
                self.end_node();
            }
            Statement::Break(stmt) => {
                self.start_node("BreakStatement", &stmt.loc);
                self.optional_property("label", stmt.label.as_deref(), Printer::print_identifier);
                self.end_node();
            }
            Statement::Continue(stmt) => {
                self.start_node("ContinueStatement", &stmt.loc);
                self.optional_property("label", stmt.label.as_deref(), Printer::print_identifier);
                self.end_node();
            }
            Statement::Labeled(stmt) => {
                self.start_node("LabeledStatement", &stmt.loc);
                self.property("label", &*stmt.label, Printer::print_identifier);
                self.property("body", &*stmt.body, Printer::print_statement);
                self.end_node();
            }
            Statement::Import(stmt) => {
                self.start_node("ImportDeclaration", &stmt.loc);
                self.array_property(
                    "specifiers",
                    stmt.specifiers.iter().collect(),
                    Printer::print_import_specifier,
                );
                self.property("source", &stmt.source, Printer::print_string_literal);
                self.end_node();
            }
            Statement::ExportNamed(stmt) => {
                self.start_node("ExportNamedDeclaration", &stmt.loc);
                self.optional_property(
                    "declaration",
                    stmt.declaration.as_deref(),
                    Printer::print_statement,
                );
                self.array_property(
                    "specifiers",
                    stmt.specifiers.iter().collect(),
                    Printer::print_export_specifier,
                );
                self.optional_property(
                    "source",
                    stmt.source.as_ref(),
                    Printer::print_string_literal,
                );
                self.end_node();
            }
            Statement::ExportDefault(stmt) => {
                self.start_node("ExportDefaultDeclaration", &stmt.loc);
                self.indent();
                self.string("declaration: ");
                match &stmt.declaration {
                    ExportDefaultKind::Function(function) => {
                        self.print_function(function, "FunctionDeclaration")
                    }
                    ExportDefaultKind::Class(class) => self.print_class(class, "ClassDeclaration"),
                    ExportDefaultKind::Expression(expr) => self.print_expression(expr),
                }
                self.string(",\n");
                self.end_node();
            }
            Statement::ExportAll(stmt) => {
                self.start_node("ExportAllDeclaration", &stmt.loc);
                self.optional_property(
                    "exported",
                    stmt.exported.as_deref(),
                    Printer::print_identifier,
                );
                self.property("source", &stmt.source, Printer::print_string_literal);
                self.end_node();
            }
        }
    }

    fn print_block(&mut self, block: &Block) {
        self.start_node("BlockStatement", &block.loc);
        self.array_property("body", block.body.iter().collect(), Printer::print_statement);
        self.end_node();
    }

    fn print_switch_case(&mut self, case: &SwitchCase) {
        self.start_node("SwitchCase", &case.loc);
        self.optional_property("test", case.test.as_deref(), Printer::print_expression);
        self.array_property("consequent", case.body.iter().collect(), Printer::print_statement);
        self.end_node();
    }

    fn print_catch_clause(&mut self, clause: &CatchClause) {
        self.start_node("CatchClause", &clause.loc);
        self.optional_property("param", clause.param.as_deref(), Printer::print_pattern);
        self.property("body", &*clause.body, Printer::print_block);
        self.end_node();
    }

    fn print_for_init(&mut self, init: &ForInit) {
        match init {
            ForInit::Expression(expr) => self.print_expression(expr),
            ForInit::VarDecl(decl) => self.print_variable_declaration(decl),
        }
    }

    fn print_for_each_init(&mut self, init: &ForEachInit) {
        match init {
            ForEachInit::VarDecl(decl) => self.print_variable_declaration(decl),
            ForEachInit::Pattern(pattern) => self.print_pattern(pattern),
        }
    }

    fn print_variable_declaration(&mut self, decl: &VariableDeclaration) {
        self.start_node("VariableDeclaration", &decl.loc);
        self.property("kind", decl.kind.as_str(), Printer::print_str);
        self.array_property(
            "declarations",
            decl.declarations.iter().collect(),
            Printer::print_variable_declarator,
        );
        self.end_node();
    }

    fn print_variable_declarator(&mut self, decl: &VariableDeclarator) {
        self.start_node("VariableDeclarator", &decl.loc);
        self.property("id", &*decl.id, Printer::print_pattern);
        self.optional_property("init", decl.init.as_deref(), Printer::print_expression);
        self.end_node();
    }

    fn print_import_specifier(&mut self, specifier: &ImportSpecifier) {
        match specifier {
            ImportSpecifier::Default(spec) => {
                self.start_node("ImportDefaultSpecifier", &spec.loc);
                self.property("local", &*spec.local, Printer::print_identifier);
                self.end_node();
            }
            ImportSpecifier::Namespace(spec) => {
                self.start_node("ImportNamespaceSpecifier", &spec.loc);
                self.property("local", &*spec.local, Printer::print_identifier);
                self.end_node();
            }
            ImportSpecifier::Named(spec) => {
                self.start_node("ImportSpecifier", &spec.loc);
                self.property("imported", &*spec.imported, Printer::print_identifier);
                self.property("local", &*spec.local, Printer::print_identifier);
                self.end_node();
            }
        }
    }

    fn print_export_specifier(&mut self, specifier: &ExportSpecifier) {
        self.start_node("ExportSpecifier", &specifier.loc);
        self.property("local", &*specifier.local, Printer::print_identifier);
        self.property("exported", &*specifier.exported, Printer::print_identifier);
        self.end_node();
    }

    // Expressions

    fn print_expression(&mut self, expr: &Expression) {
        match expr {
            Expression::Id(id) => self.print_identifier(id),
            Expression::Null(loc) => {
                self.start_node("Literal", loc);
                self.property("value", (), |p, _| p.print_null());
                self.end_node();
            }
            Expression::Boolean(literal) => {
                self.start_node("Literal", &literal.loc);
                self.property("value", literal.value, Printer::print_bool);
                self.end_node();
            }
            Expression::Number(literal) => {
                self.start_node("Literal", &literal.loc);
                self.property("value", literal.value, Printer::print_f64);
                self.end_node();
            }
            Expression::String(literal) => self.print_string_literal(literal),
            Expression::BigInt(literal) => {
                self.start_node("Literal", &literal.loc);
                let value = literal.value.to_string();
                self.property("bigint", value.as_str(), Printer::print_str);
                self.end_node();
            }
            Expression::RegExp(literal) => {
                self.start_node("Literal", &literal.loc);
                self.property("pattern", literal.pattern.as_str(), Printer::print_str);
                self.property("flags", literal.flags.as_str(), Printer::print_str);
                self.end_node();
            }
            Expression::This(loc) => {
                self.start_node("ThisExpression", loc);
                self.end_node();
            }
            Expression::Super(loc) => {
                self.start_node("Super", loc);
                self.end_node();
            }
            Expression::Array(array) => {
                self.start_node("ArrayExpression", &array.loc);
                self.array_property(
                    "elements",
                    array.elements.iter().collect(),
                    Printer::print_array_element,
                );
                self.end_node();
            }
            Expression::Object(object) => {
                self.start_node("ObjectExpression", &object.loc);
                self.array_property(
                    "properties",
                    object.properties.iter().collect(),
                    Printer::print_property,
                );
                self.end_node();
            }
            Expression::Function(function) => self.print_function(function, "FunctionExpression"),
            Expression::ArrowFunction(function) => {
                self.print_function(function, "ArrowFunctionExpression")
            }
            Expression::Class(class) => self.print_class(class, "ClassExpression"),
            Expression::Template(template) => self.print_template_literal(template),
            Expression::TaggedTemplate(tagged) => {
                self.start_node("TaggedTemplateExpression", &tagged.loc);
                self.property("tag", &*tagged.tag, Printer::print_expression);
                self.property("quasi", &*tagged.quasi, Printer::print_template_literal);
                self.end_node();
            }
            Expression::Unary(unary) => {
                self.start_node("UnaryExpression", &unary.loc);
                self.property("operator", unary.operator.as_str(), Printer::print_str);
                self.property("argument", &*unary.argument, Printer::print_expression);
                self.end_node();
            }
            Expression::Update(update) => {
                self.start_node("UpdateExpression", &update.loc);
                self.property("operator", update.operator.as_str(), Printer::print_str);
                self.property("prefix", update.is_prefix, Printer::print_bool);
                self.property("argument", &*update.argument, Printer::print_expression);
                self.end_node();
            }
            Expression::Binary(binary) => {
                self.start_node("BinaryExpression", &binary.loc);
                self.property("operator", binary.operator.as_str(), Printer::print_str);
                self.property("left", &*binary.left, Printer::print_expression);
                self.property("right", &*binary.right, Printer::print_expression);
                self.end_node();
            }
            Expression::Logical(logical) => {
                self.start_node("LogicalExpression", &logical.loc);
                self.property("operator", logical.operator.as_str(), Printer::print_str);
                self.property("left", &*logical.left, Printer::print_expression);
                self.property("right", &*logical.right, Printer::print_expression);
                self.end_node();
            }
            Expression::Assign(assign) => {
                self.start_node("AssignmentExpression", &assign.loc);
                self.property("operator", assign.operator.as_str(), Printer::print_str);
                self.property("left", &*assign.left, Printer::print_pattern);
                self.property("right", &*assign.right, Printer::print_expression);
                self.end_node();
            }
            Expression::Conditional(conditional) => {
                self.start_node("ConditionalExpression", &conditional.loc);
                self.property("test", &*conditional.test, Printer::print_expression);
                self.property("consequent", &*conditional.conseq, Printer::print_expression);
                self.property("alternate", &*conditional.altern, Printer::print_expression);
                self.end_node();
            }
            Expression::Call(call) => {
                self.start_node("CallExpression", &call.loc);
                self.property("optional", call.is_optional, Printer::print_bool);
                self.property("callee", &*call.callee, Printer::print_expression);
                self.array_property(
                    "arguments",
                    call.arguments.iter().collect(),
                    Printer::print_call_argument,
                );
                self.end_node();
            }
            Expression::New(new) => {
                self.start_node("NewExpression", &new.loc);
                self.property("callee", &*new.callee, Printer::print_expression);
                self.array_property(
                    "arguments",
                    new.arguments.iter().collect(),
                    Printer::print_call_argument,
                );
                self.end_node();
            }
            Expression::Sequence(sequence) => {
                self.start_node("SequenceExpression", &sequence.loc);
                self.array_property(
                    "expressions",
                    sequence.expressions.iter().collect(),
                    Printer::print_expression,
                );
                self.end_node();
            }
            Expression::Member(member) => self.print_member_expression(member),
            Expression::Chain(chain) => {
                self.start_node("ChainExpression", &chain.loc);
                self.property("expression", &*chain.expression, Printer::print_expression);
                self.end_node();
            }
            Expression::Await(await_expr) => {
                self.start_node("AwaitExpression", &await_expr.loc);
                self.property("argument", &*await_expr.argument, Printer::print_expression);
                self.end_node();
            }
            Expression::Yield(yield_expr) => {
                self.start_node("YieldExpression", &yield_expr.loc);
                self.property("delegate", yield_expr.delegate, Printer::print_bool);
                self.optional_property(
                    "argument",
                    yield_expr.argument.as_deref(),
                    Printer::print_expression,
                );
                self.end_node();
            }
            Expression::MetaProperty(meta) => {
                self.start_node("MetaProperty", &meta.loc);
                self.property("meta", &*meta.meta, Printer::print_identifier);
                self.property("property", &*meta.property, Printer::print_identifier);
                self.end_node();
            }
            Expression::ImportCall(import) => {
                self.start_node("ImportExpression", &import.loc);
                self.property("source", &*import.source, Printer::print_expression);
                self.end_node();
            }
            Expression::Paren(paren) => {
                self.start_node("ParenthesizedExpression", &paren.loc);
                self.property("expression", &*paren.expression, Printer::print_expression);
                self.end_node();
            }
        }
    }

    fn print_identifier(&mut self, id: &Identifier) {
        self.start_node("Identifier", &id.loc);
        self.property("name", id.name.as_str(), Printer::print_str);
        self.end_node();
    }

    fn print_string_literal(&mut self, literal: &StringLiteral) {
        self.start_node("Literal", &literal.loc);
        self.property("value", literal.value.as_str(), Printer::print_str);
        self.end_node();
    }

    fn print_member_expression(&mut self, member: &MemberExpression) {
        self.start_node("MemberExpression", &member.loc);
        self.property("computed", member.is_computed, Printer::print_bool);
        self.property("optional", member.is_optional, Printer::print_bool);
        self.property("object", &*member.object, Printer::print_expression);
        self.property("property", &*member.property, Printer::print_expression);
        self.end_node();
    }

    fn print_array_element(&mut self, element: &ArrayElement) {
        match element {
            ArrayElement::Expression(expr) => self.print_expression(expr),
            ArrayElement::Spread(spread) => self.print_spread_element(spread),
            ArrayElement::Hole => self.print_null(),
        }
    }

    fn print_spread_element(&mut self, spread: &SpreadElement) {
        self.start_node("SpreadElement", &spread.loc);
        self.property("argument", &*spread.argument, Printer::print_expression);
        self.end_node();
    }

    fn print_call_argument(&mut self, argument: &CallArgument) {
        match argument {
            CallArgument::Expression(expr) => self.print_expression(expr),
            CallArgument::Spread(spread) => self.print_spread_element(spread),
        }
    }

    fn print_property(&mut self, property: &Property) {
        if property.kind == PropertyKind::Spread {
            self.start_node("SpreadElement", &property.loc);
            self.property("argument", &*property.key, Printer::print_expression);
            self.end_node();
            return;
        }

        self.start_node("Property", &property.loc);
        let kind = match property.kind {
            PropertyKind::Init => "init",
            PropertyKind::Get => "get",
            PropertyKind::Set => "set",
            PropertyKind::Spread => unreachable!("spread handled above"),
        };
        self.property("kind", kind, Printer::print_str);
        self.property("computed", property.is_computed, Printer::print_bool);
        self.property("method", property.is_method, Printer::print_bool);
        self.property("shorthand", property.is_shorthand, Printer::print_bool);
        self.property("key", &*property.key, Printer::print_expression);
        match &property.value {
            Some(value) => self.property("value", &**value, Printer::print_expression),
            None => self.property("value", &*property.key, Printer::print_expression),
        }
        self.end_node();
    }

    fn print_template_literal(&mut self, template: &TemplateLiteral) {
        self.start_node("TemplateLiteral", &template.loc);
        self.array_property(
            "quasis",
            template.quasis.iter().collect(),
            Printer::print_template_element,
        );
        self.array_property(
            "expressions",
            template.expressions.iter().collect(),
            Printer::print_expression,
        );
        self.end_node();
    }

    fn print_template_element(&mut self, element: &TemplateElement) {
        self.start_node("TemplateElement", &element.loc);
        self.property("tail", element.is_tail, Printer::print_bool);
        self.property("raw", element.raw.as_str(), Printer::print_str);
        self.optional_property("cooked", element.cooked.as_deref(), Printer::print_str);
        self.end_node();
    }

    fn print_function(&mut self, function: &Function, name: &str) {
        self.start_node(name, &function.loc);
        self.property("async", function.is_async, Printer::print_bool);
        self.property("generator", function.is_generator, Printer::print_bool);
        self.optional_property("id", function.id.as_deref(), Printer::print_identifier);
        self.array_property(
            "params",
            function.params.iter().collect(),
            Printer::print_function_param,
        );
        self.indent();
        self.string("body: ");
        match function.body.as_ref() {
            FunctionBody::Block(block) => self.print_block(block),
            FunctionBody::Expression(expr) => self.print_expression(expr),
        }
        self.string(",\n");
        self.end_node();
    }

    fn print_function_param(&mut self, param: &FunctionParam) {
        match param {
            FunctionParam::Pattern(pattern) => self.print_pattern(pattern),
            FunctionParam::Rest(rest) => self.print_rest_element(rest),
        }
    }

    fn print_class(&mut self, class: &Class, name: &str) {
        self.start_node(name, &class.loc);
        self.optional_property("id", class.id.as_deref(), Printer::print_identifier);
        self.optional_property(
            "superClass",
            class.super_class.as_deref(),
            Printer::print_expression,
        );
        self.array_property("body", class.body.iter().collect(), Printer::print_class_method);
        self.end_node();
    }

    fn print_class_method(&mut self, method: &ClassMethod) {
        self.start_node("MethodDefinition", &method.loc);
        let kind = match method.kind {
            ClassMethodKind::Method => "method",
            ClassMethodKind::Constructor => "constructor",
            ClassMethodKind::Get => "get",
            ClassMethodKind::Set => "set",
        };
        self.property("kind", kind, Printer::print_str);
        self.property("static", method.is_static, Printer::print_bool);
        self.property("computed", method.is_computed, Printer::print_bool);
        self.property("key", &*method.key, Printer::print_expression);
        self.indent();
        self.string("value: ");
        self.print_function(&method.value, "FunctionExpression");
        self.string(",\n");
        self.end_node();
    }

    // Patterns

    fn print_pattern(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::Id(id) => self.print_identifier(id),
            Pattern::Array(array) => {
                self.start_node("ArrayPattern", &array.loc);
                self.array_property(
                    "elements",
                    array.elements.iter().collect(),
                    Printer::print_array_pattern_element,
                );
                self.end_node();
            }
            Pattern::Object(object) => {
                self.start_node("ObjectPattern", &object.loc);
                self.array_property(
                    "properties",
                    object.properties.iter().collect(),
                    Printer::print_object_pattern_property,
                );
                self.end_node();
            }
            Pattern::Assign(assign) => {
                self.start_node("AssignmentPattern", &assign.loc);
                self.property("left", &*assign.left, Printer::print_pattern);
                self.property("right", &*assign.right, Printer::print_expression);
                self.end_node();
            }
            Pattern::Expr(expr) => self.print_expression(expr),
        }
    }

    fn print_array_pattern_element(&mut self, element: &ArrayPatternElement) {
        match element {
            ArrayPatternElement::Pattern(pattern) => self.print_pattern(pattern),
            ArrayPatternElement::Rest(rest) => self.print_rest_element(rest),
            ArrayPatternElement::Hole => self.print_null(),
        }
    }

    fn print_rest_element(&mut self, rest: &RestElement) {
        self.start_node("RestElement", &rest.loc);
        self.property("argument", &*rest.argument, Printer::print_pattern);
        self.end_node();
    }

    fn print_object_pattern_property(&mut self, property: &ObjectPatternProperty) {
        if property.is_rest {
            self.start_node("RestElement", &property.loc);
            self.property("argument", &*property.value, Printer::print_pattern);
            self.end_node();
            return;
        }

        self.start_node("Property", &property.loc);
        self.property("computed", property.is_computed, Printer::print_bool);
        self.property("shorthand", property.key.is_none(), Printer::print_bool);
        match &property.key {
            Some(key) => self.property("key", &**key, Printer::print_expression),
            // Shorthand properties take their key from the bound name
            None => self.property("key", &*property.value, Printer::print_pattern),
        }
        self.property("value", &*property.value, Printer::print_pattern);
        self.end_node();
    }
}

pub fn print_program(program: &Program, source: &Source) -> String {
    let mut printer = Printer::new(source);
    printer.print_program(program);
    printer.string("\n");
    printer.finish()
}
