use pretty_assertions::assert_eq;

use rox::ast_printer::Ast;
use rox::error::LoxError;
use rox::expr::{Expr, LiteralValue};
use rox::parser::{Parser, ParserConfig};
use rox::scanner::scan_all;
use rox::stmt::Stmt;
use rox::token::TokenType;

fn parse_with(source: &str, config: ParserConfig) -> Result<Vec<Stmt>, LoxError> {
    let (tokens, errors) = scan_all(source);
    assert!(errors.is_empty(), "unexpected lex errors: {:?}", errors);

    Parser::with_config(tokens, config).parse()
}

fn parse(source: &str) -> Result<Vec<Stmt>, LoxError> {
    parse_with(source, ParserConfig::default())
}

/// Parse a single expression statement and render it fully parenthesised.
fn print_expr(source: &str) -> String {
    let statements = parse(&format!("{};", source)).expect("parse failed");

    match statements.as_slice() {
        [Stmt::Expression(expr)] => Ast.print(expr),
        other => panic!("expected one expression statement, got {:?}", other),
    }
}

fn parse_error(source: &str) -> (String, TokenType, String) {
    match parse(source) {
        Err(LoxError::Parse { message, token }) => (message, token.token_type, token.lexeme),
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_printer_round_trip() {
    assert_eq!(print_expr("-123 * (45.67)"), "(* (- 123) (Group 45.67))");
}

#[test]
fn test_precedence_levels() {
    assert_eq!(print_expr("1 + 2 * 3"), "(+ 1 (* 2 3))");
    assert_eq!(print_expr("1 < 2 == true"), "(== (< 1 2) true)");
    assert_eq!(print_expr("a or b and c"), "(or a (and b c))");
    assert_eq!(print_expr("!-x"), "(! (- x))");
    assert_eq!(print_expr("a == b or c"), "(or (== a b) c)");
}

#[test]
fn test_left_associativity() {
    assert_eq!(print_expr("10 - 2 - 3"), "(- (- 10 2) 3)");
    assert_eq!(print_expr("8 / 4 / 2"), "(/ (/ 8 4) 2)");
    assert_eq!(print_expr("a or b or c"), "(or (or a b) c)");
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(print_expr("a = b = 1"), "(= a (= b 1))");
}

#[test]
fn test_calls_are_postfix_and_chain() {
    assert_eq!(print_expr("f(1, g(2))(3)"), "(call (call f 1 (call g 2)) 3)");
    assert_eq!(print_expr("f()"), "(call f)");
}

#[test]
fn test_literals() {
    assert_eq!(print_expr("nil"), "nil");
    assert_eq!(print_expr("\"hi\""), "hi");

    let statements = parse("false;").unwrap();
    assert_eq!(
        statements,
        vec![Stmt::Expression(Expr::Literal(LiteralValue::Bool(false)))]
    );
}

#[test]
fn test_invalid_assignment_target() {
    let (message, kind, _) = parse_error("1 + a = 3;");

    assert_eq!(message, "Assignment target is invalid.");
    assert_eq!(kind, TokenType::EQUAL);
}

#[test]
fn test_argument_cap() {
    assert!(parse("f(1, 2, 3, 4, 5, 6, 7, 8);").is_ok());

    let (message, _, lexeme) = parse_error("f(1, 2, 3, 4, 5, 6, 7, 8, 9);");
    assert_eq!(message, "Can not have more than 8 arguments.");
    assert_eq!(lexeme, "9");
}

#[test]
fn test_parameter_cap() {
    assert!(parse("fun f(a, b, c, d, e, g, h, i) {}").is_ok());

    let (message, _, _) = parse_error("fun f(a, b, c, d, e, g, h, i, j) {}");
    assert_eq!(message, "Can not have more than 8 parameters.");
}

#[test]
fn test_missing_semicolon() {
    let (message, kind, _) = parse_error("print 1");

    assert_eq!(message, "Expect ';' after value.");
    assert_eq!(kind, TokenType::EOF);
}

#[test]
fn test_expect_expression() {
    let (message, _, lexeme) = parse_error("var x = ;");

    assert_eq!(message, "Expect expression.");
    assert_eq!(lexeme, ";");
}

#[test]
fn test_return_outside_function_is_rejected() {
    let (message, kind, _) = parse_error("return 1;");

    assert_eq!(message, "Can not return from top-level code.");
    assert_eq!(kind, TokenType::RETURN);

    assert!(parse("fun f() { { return 1; } }").is_ok());
}

#[test]
fn test_first_error_stops_the_parser() {
    let (tokens, _) = scan_all("print 1; print ; print 2;");
    let results: Vec<_> = Parser::new(tokens).collect();

    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
}

#[test]
fn test_parser_yields_one_statement_per_declaration() {
    let (tokens, _) = scan_all("var a = 1; fun f() {} { a; } print a;");

    assert_eq!(Parser::new(tokens).count(), 4);
}

#[test]
fn test_for_desugars_to_while() {
    let statements = parse("for (var i = 0; i < 3; i = i + 1) print i;").unwrap();

    let [Stmt::Block(outer)] = statements.as_slice() else {
        panic!("expected an outer block, got {:?}", statements);
    };

    assert!(matches!(&outer[0], Stmt::Var { name, .. } if name.lexeme == "i"));

    let Stmt::While { condition, body } = &outer[1] else {
        panic!("expected a while loop, got {:?}", outer[1]);
    };
    assert_eq!(Ast.print(condition), "(< i 3)");

    let Stmt::Block(inner) = body.as_ref() else {
        panic!("expected the loop body to be a block, got {:?}", body);
    };
    assert!(matches!(inner[0], Stmt::Print(_)));
    assert!(matches!(&inner[1], Stmt::Expression(e) if Ast.print(e) == "(= i (+ i 1))"));
}

#[test]
fn test_bare_for_loops_forever() {
    let statements = parse("for (;;) print 1;").unwrap();

    assert_eq!(
        statements,
        vec![Stmt::While {
            condition: Expr::Literal(LiteralValue::Bool(true)),
            body: Box::new(Stmt::Print(Expr::Literal(LiteralValue::Number(1.0)))),
        }]
    );
}

#[test]
fn test_implicit_print_only_when_enabled() {
    assert!(parse("1 + 2").is_err());

    let statements = parse_with("1 + 2", ParserConfig::repl()).unwrap();
    assert!(matches!(statements.as_slice(), [Stmt::Print(_)]));

    // Only the trailing expression qualifies.
    assert!(parse_with("1 2", ParserConfig::repl()).is_err());
}

#[test]
fn test_parse_is_repeatable() {
    let source = "fun add(a, b) { return a + b; } print add(1, 2);";

    assert_eq!(parse(source).unwrap(), parse(source).unwrap());
}

#[test]
fn test_parser_appends_missing_eof() {
    let (mut tokens, _) = scan_all("print 1;");
    tokens.pop();

    assert_eq!(Parser::new(tokens).parse().unwrap().len(), 1);
}
