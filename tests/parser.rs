mod common;

use rlox_tw::ast::{Expr, Stmt};
use rlox_tw::ast_printer::AstPrinter;
use rlox_tw::parser::Parser;
use rlox_tw::scanner::scan_tokens;
use rlox_tw::Lox;

fn parse_expr(source: &str) -> Expr {
    let (tokens, diagnostics) = scan_tokens(source);
    assert!(diagnostics.is_empty(), "scan errors: {}", diagnostics);
    match Parser::new(&tokens).parse_expression() {
        Ok(expr) => expr,
        Err(e) => panic!("parse errors for {:?}: {}", source, e),
    }
}

fn prefix(source: &str) -> String {
    AstPrinter::print(&parse_expr(source))
}

fn parse_errors(source: &str) -> Vec<String> {
    match Lox::parse(source) {
        Ok(stmts) => panic!("expected errors, parsed {} statement(s)", stmts.len()),
        Err(diagnostics) => diagnostics.iter().map(|d| d.to_string()).collect(),
    }
}

#[test]
fn precedence_climbs_from_primary_to_assignment() {
    assert_eq!(prefix("1 + 2 * 3"), "(+ 1.0 (* 2.0 3.0))");
    assert_eq!(prefix("(1 + 2) * 3"), "(* (group (+ 1.0 2.0)) 3.0)");
    assert_eq!(prefix("1 - 2 - 3"), "(- (- 1.0 2.0) 3.0)");
    assert_eq!(prefix("-a < b == !c"), "(== (< (- a) b) (! c))");
    assert_eq!(prefix("a or b and c"), "(or a (and b c))");
    assert_eq!(prefix("a = b = c"), "(= a (= b c))");
}

#[test]
fn postfix_calls_and_properties() {
    assert_eq!(prefix("f(1)(2)"), "(call (call f 1.0) 2.0)");
    assert_eq!(prefix("a.b.c(x)"), "(call (. (. a b) c) x)");
    assert_eq!(prefix("a.b = 1"), "(= (. a b) 1.0)");
    assert_eq!(prefix("super.m"), "(super m)");
}

#[test]
fn canonical_source_round_trips() {
    let sources = [
        "1 + 2 * 3",
        "(1 + 2) * -3",
        "a = b.c = !d or e and f",
        "make(1, \"two\", nil)(true).field",
        "-(-x) - -2.5 / (y >= 4)",
        "this.x != super.y(z)",
    ];

    for source in sources {
        let first = parse_expr(source);
        let printed = AstPrinter::source(&first);
        let second = parse_expr(&printed);

        assert_eq!(AstPrinter::print(&first), AstPrinter::print(&second), "{}", source);
        assert_eq!(printed, AstPrinter::source(&second));
    }
}

#[test]
fn for_loop_desugars_into_while() {
    let stmts = Lox::parse("for (var i = 0; i < 3; i = i + 1) print i;").unwrap();
    assert_eq!(stmts.len(), 1);
    assert_eq!(
        AstPrinter::print_stmt(&stmts[0]),
        "(block (var i 0.0) (while (< i 3.0) (block (print i) (; (= i (+ i 1.0))))))"
    );

    let stmts = Lox::parse("for (;;) print 1;").unwrap();
    assert_eq!(AstPrinter::print_stmt(&stmts[0]), "(while true (print 1.0))");
}

#[test]
fn class_declarations_keep_superclass_and_methods() {
    let stmts = Lox::parse("class B < A { init(x) { this.x = x; } get() { return this.x; } }")
        .unwrap();

    let Stmt::Class {
        name,
        superclass,
        methods,
    } = &stmts[0]
    else {
        panic!("expected a class, got {:?}", stmts[0]);
    };

    assert_eq!(name.lexeme, "B");
    assert!(matches!(superclass, Some(Expr::Variable { name, .. }) if name.lexeme == "A"));
    let names: Vec<&str> = methods.iter().map(|m| m.name.lexeme.as_str()).collect();
    assert_eq!(names, vec!["init", "get"]);
    assert_eq!(methods[0].params.len(), 1);
}

#[test]
fn identical_references_get_distinct_ids() {
    let expr = parse_expr("a + a");
    let Expr::Binary { left, right, .. } = expr else {
        panic!("expected a binary expression");
    };

    match (*left, *right) {
        (Expr::Variable { id: l, .. }, Expr::Variable { id: r, .. }) => assert_ne!(l, r),
        other => panic!("unexpected operands {:?}", other),
    }
}

#[test]
fn recovers_and_reports_each_independent_error() {
    let errors = parse_errors("var = 1;\nprint 2;\nvar b = ;\nprint (3;");

    assert_eq!(
        errors,
        vec![
            "[line 1] Error at '=': Expect variable name.",
            "[line 3] Error at ';': Expect expression.",
            "[line 4] Error at ';': Expect ')' after expression.",
        ]
    );
}

#[test]
fn missing_semicolon_at_end_of_input() {
    assert_eq!(
        parse_errors("print 1"),
        vec!["[line 1] Error at end: Expect ';' after value."]
    );
}

#[test]
fn invalid_assignment_target_is_reported_without_unwinding() {
    let errors = parse_errors("a + b = c;\nprint 1 = 2;\nvar ok = 3;");

    assert_eq!(
        errors,
        vec![
            "[line 1] Error at '=': Invalid assignment target.",
            "[line 2] Error at '=': Invalid assignment target.",
        ]
    );
}

#[test]
fn parameter_and_argument_limits() {
    let errors = parse_errors(
        "fun f(a, b, c, d, e, f, g, h, i) {}\nf(1, 2, 3, 4, 5, 6, 7, 8, 9);",
    );

    assert_eq!(
        errors,
        vec![
            "[line 1] Error at 'i': Can't have more than 8 parameters.",
            "[line 2] Error at '9': Can't have more than 8 arguments.",
        ]
    );

    assert!(Lox::parse("fun f(a, b, c, d, e, f, g, h) {} f(1, 2, 3, 4, 5, 6, 7, 8);").is_ok());
}

#[test]
fn super_requires_a_method_name() {
    assert_eq!(
        parse_errors("class A < B { m() { super; } }"),
        vec!["[line 1] Error at ';': Expect '.' after 'super'."]
    );
}

#[test]
fn scan_and_parse_errors_surface_together() {
    assert_eq!(
        parse_errors("var a = @;"),
        vec![
            "[line 1] Error: Unexpected character.",
            "[line 1] Error at ';': Expect expression.",
        ]
    );
}

#[test]
fn nesting_within_the_limit_parses_and_runs() {
    let depth = 200;
    let source = format!("print {}1{};", "(".repeat(depth), ")".repeat(depth));

    assert_eq!(common::output_lines(&source), vec!["1"]);
}

#[test]
fn excessive_nesting_is_reported_once() {
    let source = format!("var x = {}1{};\nprint 2;", "(".repeat(400), ")".repeat(400));
    let errors = parse_errors(&source);
    assert_eq!(errors.len(), 1, "{:?}", errors);
    assert_eq!(errors[0], "[line 1] Error at '(': Too much nesting.");

    let source = format!("{}{}", "{".repeat(400), "}".repeat(400));
    let errors = parse_errors(&source);
    assert_eq!(
        errors,
        vec![
            "[line 1] Error at '{': Too much nesting.",
            "[line 1] Error at end: Expect '}' after block.",
        ]
    );

    let errors = parse_errors(&format!("print {}x;", "!".repeat(400)));
    assert_eq!(errors, vec!["[line 1] Error at '!': Too much nesting."]);
}

#[test]
fn token_slice_without_eof_does_not_panic() {
    assert_eq!(Parser::new(&[]).parse(), Ok(Vec::new()));

    let errors = Parser::new(&[]).parse_expression().unwrap_err();
    let messages: Vec<String> = errors.iter().map(|d| d.to_string()).collect();
    assert_eq!(messages, vec!["[line 1] Error at end: Expect expression."]);

    let (mut tokens, _) = scan_tokens("print 1;");
    tokens.pop();
    assert_eq!(Parser::new(&tokens).parse().map(|stmts| stmts.len()), Ok(1));
}
