use pyrite::ast::*;
use pyrite::options::{EcmaVersion, OptionsBuilder};
use pyrite::{parse, parse_expression_at, parse_module};

fn parse_ok(source: &str) -> Program {
    match parse(source, OptionsBuilder::new().build()) {
        Ok(program) => program,
        Err(err) => panic!("parse failed for {:?}: {}", source, err),
    }
}

fn parse_err(source: &str) -> String {
    match parse(source, OptionsBuilder::new().build()) {
        Ok(_) => panic!("expected a parse error for {:?}", source),
        Err(err) => format!("{}", err),
    }
}

fn parse_module_err(source: &str) -> String {
    match parse_module(source, OptionsBuilder::new()) {
        Ok(_) => panic!("expected a parse error for {:?}", source),
        Err(err) => format!("{}", err),
    }
}

fn first_expression(program: &Program) -> &Expression {
    match &program.body[0] {
        Statement::Expr(stmt) => &stmt.expr,
        _ => panic!("expected an expression statement"),
    }
}

#[test]
fn test_var_declaration() {
    let program = parse_ok("var answer = 42;");
    match &program.body[0] {
        Statement::VarDecl(decl) => {
            assert_eq!(decl.kind, VarKind::Var);
            assert_eq!(decl.declarations.len(), 1);
            match decl.declarations[0].id.as_ref() {
                Pattern::Id(id) => assert_eq!(id.name, "answer"),
                _ => panic!("expected identifier pattern"),
            }
            match decl.declarations[0].init.as_deref() {
                Some(Expression::Number(literal)) => assert_eq!(literal.value, 42.0),
                _ => panic!("expected number initializer"),
            }
        }
        _ => panic!("expected variable declaration"),
    }
}

#[test]
fn test_node_spans_cover_source() {
    let source = "var answer = 42;";
    let program = parse_ok(source);
    let decl_loc = program.body[0].loc();
    assert_eq!(&source[decl_loc.start..decl_loc.end], "var answer = 42;");
}

#[test]
fn test_slash_is_regexp_at_expression_start() {
    let program = parse_ok("/a/g");
    match first_expression(&program) {
        Expression::RegExp(regexp) => {
            assert_eq!(regexp.pattern, "a");
            assert_eq!(regexp.flags, "g");
        }
        _ => panic!("expected regexp literal"),
    }
}

#[test]
fn test_slash_is_division_after_value() {
    // Left associative: (a / b) / g
    let program = parse_ok("a/b/g");
    match first_expression(&program) {
        Expression::Binary(outer) => {
            assert_eq!(outer.operator, BinaryOperator::Divide);
            match outer.left.as_ref() {
                Expression::Binary(inner) => {
                    assert_eq!(inner.operator, BinaryOperator::Divide);
                    assert!(matches!(inner.left.as_ref(), Expression::Id(id) if id.name == "a"));
                    assert!(matches!(inner.right.as_ref(), Expression::Id(id) if id.name == "b"));
                }
                _ => panic!("expected nested division"),
            }
            assert!(matches!(outer.right.as_ref(), Expression::Id(id) if id.name == "g"));
        }
        _ => panic!("expected division, not a regexp"),
    }
}

#[test]
fn test_arrow_function_from_parenthesized_list() {
    let program = parse_ok("(a,b)=>a+b");
    match first_expression(&program) {
        Expression::ArrowFunction(function) => {
            assert_eq!(function.params.len(), 2);
            assert!(matches!(
                &function.params[0],
                FunctionParam::Pattern(Pattern::Id(id)) if id.name == "a"
            ));
            match function.body.as_ref() {
                FunctionBody::Expression(Expression::Binary(binary)) => {
                    assert_eq!(binary.operator, BinaryOperator::Add)
                }
                _ => panic!("expected binary expression body"),
            }
        }
        _ => panic!("expected arrow function"),
    }
}

#[test]
fn test_parenthesized_sequence_is_not_an_arrow() {
    // Without a following arrow this is a plain sequence with an assignment
    let program = parse_ok("(a, b = 1)");
    match first_expression(&program) {
        Expression::Sequence(sequence) => assert_eq!(sequence.expressions.len(), 2),
        _ => panic!("expected sequence expression"),
    }
}

#[test]
fn test_shorthand_default_outside_pattern_is_an_error() {
    let message = parse_err("({a, b = 1})");
    assert!(
        message.contains("Shorthand property assignments are valid only in destructuring"),
        "unexpected message: {}",
        message
    );
}

#[test]
fn test_shorthand_default_resolved_as_pattern() {
    let program = parse_ok("({a = 1} = obj)");
    match first_expression(&program) {
        Expression::Assign(assign) => match assign.left.as_ref() {
            Pattern::Object(object) => {
                assert_eq!(object.properties.len(), 1);
                assert!(matches!(object.properties[0].value.as_ref(), Pattern::Assign(_)));
            }
            _ => panic!("expected object pattern"),
        },
        _ => panic!("expected assignment"),
    }
}

#[test]
fn test_destructuring_assignment_rewrites_array_literal() {
    let program = parse_ok("[a, ...rest] = xs");
    match first_expression(&program) {
        Expression::Assign(assign) => match assign.left.as_ref() {
            Pattern::Array(array) => {
                assert_eq!(array.elements.len(), 2);
                assert!(matches!(array.elements[1], ArrayPatternElement::Rest(_)));
            }
            _ => panic!("expected array pattern"),
        },
        _ => panic!("expected assignment"),
    }
}

#[test]
fn test_lexical_redeclaration_is_an_error() {
    let message = parse_err("let x = 1; let x = 2;");
    assert!(
        message.contains("Identifier 'x' has already been declared"),
        "unexpected message: {}",
        message
    );
}

#[test]
fn test_var_may_shadow_var() {
    parse_ok("var x = 1; var x = 2;");
}

#[test]
fn test_var_against_lexical_is_an_error() {
    let message = parse_err("let x = 1; var x = 2;");
    assert!(message.contains("already been declared"), "unexpected message: {}", message);
}

#[test]
fn test_simple_catch_param_may_be_shadowed_by_var() {
    parse_ok("try {} catch (e) { var e = 1; }");
}

#[test]
fn test_template_literal() {
    let program = parse_ok("`a${1+2}b`");
    match first_expression(&program) {
        Expression::Template(template) => {
            assert_eq!(template.quasis.len(), 2);
            assert_eq!(template.quasis[0].cooked.as_deref(), Some("a"));
            assert_eq!(template.quasis[1].cooked.as_deref(), Some("b"));
            assert!(template.quasis[1].is_tail);
            assert_eq!(template.expressions.len(), 1);
            assert!(matches!(
                &template.expressions[0],
                Expression::Binary(binary) if binary.operator == BinaryOperator::Add
            ));
        }
        _ => panic!("expected template literal"),
    }
}

#[test]
fn test_tagged_template_permits_invalid_escape() {
    let program = parse_ok("tag`\\u`");
    match first_expression(&program) {
        Expression::TaggedTemplate(tagged) => {
            assert_eq!(tagged.quasi.quasis[0].cooked, None);
        }
        _ => panic!("expected tagged template"),
    }

    let message = parse_err("`\\u`");
    assert!(message.contains("Bad escape sequence"), "unexpected message: {}", message);
}

#[test]
fn test_optional_chain() {
    let program = parse_ok("a?.b?.()");
    match first_expression(&program) {
        Expression::Chain(chain) => match chain.expression.as_ref() {
            Expression::Call(call) => {
                assert!(call.is_optional);
                match call.callee.as_ref() {
                    Expression::Member(member) => assert!(member.is_optional),
                    _ => panic!("expected member callee"),
                }
            }
            _ => panic!("expected call in chain"),
        },
        _ => panic!("expected chain expression"),
    }
}

#[test]
fn test_optional_chain_is_not_an_assignment_target() {
    parse_err("a?.b = 1");
}

#[test]
fn test_asi_after_return() {
    let program = parse_ok("function f() { return\n1 }");
    match &program.body[0] {
        Statement::FuncDecl(function) => match function.body.as_ref() {
            FunctionBody::Block(block) => {
                assert_eq!(block.body.len(), 2);
                assert!(matches!(
                    &block.body[0],
                    Statement::Return(ret) if ret.argument.is_none()
                ));
                assert!(matches!(&block.body[1], Statement::Expr(_)));
            }
            _ => panic!("expected block body"),
        },
        _ => panic!("expected function declaration"),
    }
}

#[test]
fn test_asi_before_prefix_update() {
    let program = parse_ok("a\n++b");
    assert_eq!(program.body.len(), 2);
    assert!(matches!(first_expression(&program), Expression::Id(id) if id.name == "a"));
    match &program.body[1] {
        Statement::Expr(stmt) => {
            assert!(matches!(
                stmt.expr.as_ref(),
                Expression::Update(update) if update.is_prefix
            ));
        }
        _ => panic!("expected expression statement"),
    }
}

#[test]
fn test_labels() {
    parse_ok("outer: for (;;) { break outer; }");
    parse_ok("outer: for (;;) { continue outer; }");

    let message = parse_err("break missing;");
    assert!(message.contains("Unsyntactic break"), "unexpected message: {}", message);

    // A label on a non-loop statement is not a continue target
    parse_err("x: { continue x; }");

    let message = parse_err("dup: dup: for (;;) {}");
    assert!(message.contains("already declared"), "unexpected message: {}", message);
}

#[test]
fn test_classes() {
    let program = parse_ok(
        "class A extends B {
            constructor() { super(); }
            static create() { return new A(); }
            get value() { return 1; }
            set value(next) {}
            *items() {}
            async load() {}
        }",
    );

    match &program.body[0] {
        Statement::ClassDecl(class) => {
            assert!(class.super_class.is_some());
            assert_eq!(class.body.len(), 6);
            assert_eq!(class.body[0].kind, ClassMethodKind::Constructor);
            assert!(class.body[1].is_static);
            assert_eq!(class.body[2].kind, ClassMethodKind::Get);
            assert_eq!(class.body[3].kind, ClassMethodKind::Set);
            assert!(class.body[4].value.is_generator);
            assert!(class.body[5].value.is_async);
        }
        _ => panic!("expected class declaration"),
    }
}

#[test]
fn test_duplicate_constructor_is_an_error() {
    let message = parse_err("class A { constructor() {} constructor() {} }");
    assert!(message.contains("Duplicate constructor"), "unexpected message: {}", message);
}

#[test]
fn test_super_outside_method_is_an_error() {
    let message = parse_err("super.x");
    assert!(message.contains("'super' keyword outside a method"), "unexpected message: {}", message);
}

#[test]
fn test_super_call_requires_derived_constructor() {
    parse_err("class A { constructor() { super(); } }");
    parse_ok("class A extends B { constructor() { super(); } }");
}

#[test]
fn test_strict_mode_restrictions() {
    let message = parse_err("\"use strict\"; with (x) {}");
    assert!(message.contains("'with' in strict mode"), "unexpected message: {}", message);

    parse_err("\"use strict\"; var x = 010;");
    parse_err("\"use strict\"; eval = 1;");
    parse_err("\"use strict\"; delete x;");

    // All allowed outside strict mode
    parse_ok("with (x) {}");
    parse_ok("eval = 1;");
    parse_ok("delete x;");
}

#[test]
fn test_legacy_octal_value() {
    let program = parse_ok("010");
    match first_expression(&program) {
        Expression::Number(literal) => assert_eq!(literal.value, 8.0),
        _ => panic!("expected number"),
    }
}

#[test]
fn test_directive_prologue() {
    let program = parse_ok("'use strict'; x;");
    assert!(program.has_use_strict_directive);
    match &program.body[0] {
        Statement::Expr(stmt) => assert_eq!(stmt.directive.as_deref(), Some("use strict")),
        _ => panic!("expected expression statement"),
    }
}

#[test]
fn test_use_strict_with_non_simple_params_is_an_error() {
    parse_err("function f(a = 1) { 'use strict'; }");
    parse_ok("function f(a) { 'use strict'; }");
}

#[test]
fn test_getter_setter_arity() {
    let message = parse_err("({ get x(a) {} })");
    assert!(message.contains("getter should have no params"), "unexpected message: {}", message);

    let message = parse_err("({ set x() {} })");
    assert!(
        message.contains("setter should have exactly one param"),
        "unexpected message: {}",
        message
    );

    parse_ok("({ get x() {}, set x(v) {} })");
}

#[test]
fn test_duplicate_proto_is_an_error() {
    let message = parse_err("({ __proto__: 1, __proto__: 2 })");
    assert!(message.contains("__proto__"), "unexpected message: {}", message);

    // Shorthand and computed properties do not populate the prototype slot
    parse_ok("({ __proto__: 1, ['__proto__']: 2 })");
    parse_ok("({ __proto__, __proto__: 1 })");
}

#[test]
fn test_yield_in_generator() {
    parse_ok("function* g() { yield 1; yield* g(); yield; }");

    let message = parse_err("function* g() { var yield = 1; }");
    assert!(
        message.contains("Cannot use 'yield' as identifier inside a generator"),
        "unexpected message: {}",
        message
    );

    // Outside generators, yield is an ordinary name in sloppy mode
    parse_ok("var yield = 1;");
}

#[test]
fn test_await_in_async_function() {
    parse_ok("async function f() { await x; }");
    parse_ok("const f = async (a) => await a;");
    parse_ok("const f = async a => await a;");

    let message = parse_err("async function f() { var await = 1; }");
    assert!(
        message.contains("Cannot use 'await' as identifier inside an async function"),
        "unexpected message: {}",
        message
    );

    // In a non-async function, `await x` is two tokens and fails to parse
    parse_err("function f() { await x; }");
}

#[test]
fn test_await_in_parameter_default_is_an_error() {
    let message = parse_err("async function f() { async (a = await x) => a; }");
    assert!(
        message.contains("Await expression cannot be a default value"),
        "unexpected message: {}",
        message
    );
}

#[test]
fn test_for_each_statements() {
    parse_ok("for (var x in obj) {}");
    parse_ok("for (const x of xs) {}");
    parse_ok("for ([a, b] of xs) {}");
    parse_ok("async function f() { for await (const x of xs) {} }");

    let message = parse_err("for (let x = 1 of xs) {}");
    assert!(
        message.contains("may not have an initializer"),
        "unexpected message: {}",
        message
    );

    // The legacy non-strict form allows an initializer for a plain var
    parse_ok("for (var i = 0 in obj) {}");
    parse_err("\"use strict\"; for (var i = 0 in obj) {}");
}

#[test]
fn test_for_await_flag_is_set() {
    let program = parse_ok("async function f() { for await (const x of xs) {} }");
    match &program.body[0] {
        Statement::FuncDecl(function) => match function.body.as_ref() {
            FunctionBody::Block(block) => match &block.body[0] {
                Statement::ForEach(for_each) => {
                    assert_eq!(for_each.kind, ForEachKind::Of);
                    assert!(for_each.is_await);
                }
                _ => panic!("expected for-of statement"),
            },
            _ => panic!("expected block"),
        },
        _ => panic!("expected function"),
    }
}

#[test]
fn test_new_target() {
    parse_ok("function f() { return new.target; }");

    let message = parse_err("new.target");
    assert!(
        message.contains("'new.target' can only be used in functions"),
        "unexpected message: {}",
        message
    );
}

#[test]
fn test_exponentiation() {
    // Right associative
    let program = parse_ok("a ** b ** c");
    match first_expression(&program) {
        Expression::Binary(outer) => {
            assert_eq!(outer.operator, BinaryOperator::Exponent);
            assert!(matches!(outer.left.as_ref(), Expression::Id(_)));
            assert!(matches!(
                outer.right.as_ref(),
                Expression::Binary(inner) if inner.operator == BinaryOperator::Exponent
            ));
        }
        _ => panic!("expected binary expression"),
    }

    // An unparenthesized unary operand is not allowed on the left
    parse_err("-a ** b");
    parse_ok("(-a) ** b");
}

#[test]
fn test_nullish_coalescing() {
    parse_ok("a ?? b");
    parse_ok("(a || b) ?? c");

    let message = parse_err("a || b ?? c");
    assert!(
        message.contains("cannot be mixed"),
        "unexpected message: {}",
        message
    );
}

#[test]
fn test_logical_assignment_operators() {
    for source in ["a ||= b", "a &&= b", "a ??= b"] {
        let program = parse_ok(source);
        assert!(matches!(first_expression(&program), Expression::Assign(_)));
    }
}

#[test]
fn test_bigint_literal() {
    let program = parse_ok("123n");
    match first_expression(&program) {
        Expression::BigInt(literal) => assert_eq!(literal.value.to_string(), "123"),
        _ => panic!("expected bigint literal"),
    }

    parse_err("08n");
}

#[test]
fn test_numeric_separators() {
    let program = parse_ok("1_000_000");
    match first_expression(&program) {
        Expression::Number(literal) => assert_eq!(literal.value, 1_000_000.0),
        _ => panic!("expected number"),
    }

    parse_err("1__0");
    parse_err("1_");
    parse_err("0b1_");
}

#[test]
fn test_rest_parameters() {
    parse_ok("function f(a, ...rest) {}");
    parse_ok("((a, ...rest) => rest)");

    let message = parse_err("((...a, b) => b)");
    assert!(
        message.contains("Comma is not permitted after the rest element"),
        "unexpected message: {}",
        message
    );

    parse_err("function f(a, ...rest, b) {}");
}

#[test]
fn test_duplicate_parameters() {
    // Allowed for simple sloppy-mode parameter lists only
    parse_ok("function f(a, a) {}");
    parse_err("\"use strict\"; function f(a, a) {}");
    parse_err("function f(a, [a]) {}");
    parse_err("((a, a) => a)");
}

#[test]
fn test_optional_catch_binding() {
    parse_ok("try { x } catch { y }");

    let err = parse(
        "try { x } catch { y }",
        OptionsBuilder::new().ecma_version(EcmaVersion::E9).build(),
    );
    assert!(err.is_err());
}

#[test]
fn test_object_literal_shapes() {
    parse_ok("({ m() {}, *g() {}, async a() {}, async *b() {} })");
    parse_ok("({ [key]: 1, 'str': 2, 3: 4 })");
    parse_ok("({ ...spread })");
    parse_ok("[...xs]");
    parse_ok("f(...xs)");
}

#[test]
fn test_html_comments_in_scripts() {
    let program = parse_ok("x = 1; <!-- a comment\ny = 2;");
    assert_eq!(program.body.len(), 2);

    let program = parse_ok("x = 1;\n--> also a comment\ny = 2;");
    assert_eq!(program.body.len(), 2);

    // HTML comments are not available in modules
    assert!(parse_module("x = 1; <!-- a comment", OptionsBuilder::new()).is_err());
}

#[test]
fn test_hashbang() {
    let program = parse(
        "#!/usr/bin/env node\nvar x = 1;",
        OptionsBuilder::new().allow_hash_bang(true).build(),
    )
    .unwrap();
    assert_eq!(program.body.len(), 1);

    assert!(parse("#!/usr/bin/env node\n", OptionsBuilder::new().build()).is_err());
}

#[test]
fn test_preserve_parens() {
    let program =
        parse("(a)", OptionsBuilder::new().preserve_parens(true).build()).unwrap();
    assert!(matches!(first_expression(&program), Expression::Paren(_)));

    let program = parse_ok("(a)");
    assert!(matches!(first_expression(&program), Expression::Id(_)));
}

#[test]
fn test_parse_expression_at() {
    let expr =
        parse_expression_at("var x = 5 + 3", 8, OptionsBuilder::new().build()).unwrap();
    match expr {
        Expression::Binary(binary) => assert_eq!(binary.operator, BinaryOperator::Add),
        _ => panic!("expected binary expression"),
    }
}

#[test]
fn test_return_outside_function() {
    parse_err("return 1;");
    parse(
        "return 1;",
        OptionsBuilder::new().allow_return_outside_function(true).build(),
    )
    .unwrap();
}

#[test]
fn test_modules() {
    let program = parse_module(
        "import def, { a as b } from 'mod';
         import * as ns from 'other';
         export const x = 1;
         export { x as y };
         export default function () {}
         export * from 'elsewhere';",
        OptionsBuilder::new(),
    )
    .unwrap();
    assert_eq!(program.body.len(), 6);
}

#[test]
fn test_import_export_only_in_modules() {
    let message = parse_err("import x from 'mod';");
    assert!(
        message.contains("'import' and 'export' may appear only with 'sourceType: module'"),
        "unexpected message: {}",
        message
    );
}

#[test]
fn test_undefined_export_is_an_error() {
    let message = parse_module_err("export { missing };");
    assert!(
        message.contains("Export 'missing' is not defined"),
        "unexpected message: {}",
        message
    );

    // Declarations may appear after the export
    parse_module("export { x }; var x;", OptionsBuilder::new()).unwrap();
}

#[test]
fn test_duplicate_export_is_an_error() {
    let message = parse_module_err("var a, b; export { a }; export { b as a };");
    assert!(message.contains("Duplicate export 'a'"), "unexpected message: {}", message);
}

#[test]
fn test_dynamic_import_and_import_meta() {
    parse_ok("import('mod')");
    parse_module("import.meta.url", OptionsBuilder::new()).unwrap();

    let message = parse_err("import.meta");
    assert!(
        message.contains("Cannot use 'import.meta' outside a module"),
        "unexpected message: {}",
        message
    );
}

#[test]
fn test_module_code_is_strict() {
    assert!(parse_module("with (x) {}", OptionsBuilder::new()).is_err());
    assert!(parse_module("var x = 010;", OptionsBuilder::new()).is_err());
}

#[test]
fn test_async_distinguished_from_identifier() {
    // A line break after async means it is a plain identifier
    let program = parse_ok("async\nfunction f() {}");
    assert_eq!(program.body.len(), 2);
    assert!(matches!(first_expression(&program), Expression::Id(id) if id.name == "async"));

    let program = parse_ok("async function f() {}");
    assert_eq!(program.body.len(), 1);
    match &program.body[0] {
        Statement::FuncDecl(function) => assert!(function.is_async),
        _ => panic!("expected async function declaration"),
    }

    // async as a call target
    let program = parse_ok("async(1)");
    assert!(matches!(first_expression(&program), Expression::Call(_)));

    // async arrow with parenthesized params
    let program = parse_ok("async (a) => a");
    match first_expression(&program) {
        Expression::ArrowFunction(function) => assert!(function.is_async),
        _ => panic!("expected async arrow"),
    }
}

#[test]
fn test_ecma_version_gates_grammar() {
    let old = |source: &str, version: EcmaVersion| {
        parse(source, OptionsBuilder::new().ecma_version(version).build())
    };

    assert!(old("a ?? b", EcmaVersion::E11).is_ok());
    assert!(old("a ?? b", EcmaVersion::E10).is_err());

    assert!(old("a ** b", EcmaVersion::E7).is_ok());
    assert!(old("a ** b", EcmaVersion::E6).is_err());

    assert!(old("1_000", EcmaVersion::E12).is_ok());
    assert!(old("1_000", EcmaVersion::E11).is_err());

    assert!(old("() => 1", EcmaVersion::E6).is_ok());
    assert!(old("() => 1", EcmaVersion::E5).is_err());

    assert!(old("class A {}", EcmaVersion::E6).is_ok());
    assert!(old("class A {}", EcmaVersion::E5).is_err());

    assert!(old("a?.b", EcmaVersion::E11).is_ok());
    assert!(old("import('m')", EcmaVersion::E11).is_ok());
    assert!(old("import('m')", EcmaVersion::E10).is_err());
}

#[test]
fn test_reserved_words() {
    parse_err("var enum = 1;");
    parse_err("\"use strict\"; var interface = 1;");
    parse_ok("var interface = 1;");

    // Keywords are fine as property names
    parse_ok("x.delete; ({ new: 1, typeof: 2 });");
}

#[test]
fn test_escaped_keywords_are_rejected() {
    // if spells `if`
    parse_err("\\u0069f (x) {}");

    // But escapes are fine in property names
    parse_ok("x.\\u0069f");
}

#[test]
fn test_keyword_like_member_names() {
    let program = parse_ok("obj.if");
    match first_expression(&program) {
        Expression::Member(member) => {
            assert!(matches!(member.property.as_ref(), Expression::Id(id) if id.name == "if"));
        }
        _ => panic!("expected member expression"),
    }
}

#[test]
fn test_sequence_and_conditional() {
    let program = parse_ok("a, b ? c : d, e");
    match first_expression(&program) {
        Expression::Sequence(sequence) => {
            assert_eq!(sequence.expressions.len(), 3);
            assert!(matches!(&sequence.expressions[1], Expression::Conditional(_)));
        }
        _ => panic!("expected sequence"),
    }
}

#[test]
fn test_labeled_function_restrictions() {
    // Allowed in sloppy mode
    parse_ok("label: function f() {}");
    // Forbidden in strict mode
    parse_err("\"use strict\"; label: function f() {}");
    // Never allowed as a loop body
    parse_err("while (x) function f() {}");
}

#[test]
fn test_lexical_declaration_in_single_statement_context() {
    let message = parse_err("if (x) let [a] = b;");
    assert!(
        message.contains("single-statement context"),
        "unexpected message: {}",
        message
    );

    // `let` as a plain identifier still works there
    parse_ok("if (x) let;");
}

#[test]
fn test_recoverable_errors_can_be_collected() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let collected = Rc::new(RefCell::new(vec![]));
    let sink = collected.clone();

    let options = OptionsBuilder::new()
        .on_recoverable_error(Box::new(move |error| sink.borrow_mut().push(error)))
        .build();

    let program = parse("({ __proto__: 1, __proto__: 2 })", options).unwrap();
    assert_eq!(program.body.len(), 1);
    assert_eq!(collected.borrow().len(), 1);
}

#[test]
fn test_on_token_callback_sees_all_tokens() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let count = Rc::new(RefCell::new(0));
    let sink = count.clone();

    let options = OptionsBuilder::new()
        .on_token(Box::new(move |_, _| *sink.borrow_mut() += 1))
        .build();

    parse("a + b;", options).unwrap();
    // a, +, b, ;, eof
    assert_eq!(*count.borrow(), 5);
}

#[test]
fn test_on_comment_callback() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let comments = Rc::new(RefCell::new(vec![]));
    let sink = comments.clone();

    let options = OptionsBuilder::new()
        .on_comment(Box::new(move |comment| {
            sink.borrow_mut().push((comment.text.clone(), comment.is_block))
        }))
        .build();

    parse("// line\n/* block */ x;", options).unwrap();
    let comments = comments.borrow();
    assert_eq!(comments[0], (" line".to_owned(), false));
    assert_eq!(comments[1], (" block ".to_owned(), true));
}
