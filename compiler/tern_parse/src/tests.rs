#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_parse_expression() {
    assert_eq!(
        parse_expression("(+ 1 2)").unwrap(),
        Expr::call("+", vec![Expr::int(1), Expr::int(2)])
    );
}

#[test]
fn test_parse_expression_counts_forms() {
    assert_eq!(
        parse_expression("  ; nothing here\n").unwrap_err(),
        ParseError::MissingExpression { span: Span::point(17) }
    );
    assert_eq!(
        parse_expression("1 2").unwrap_err(),
        ParseError::ExtraExpression { span: Span::new(2, 3) }
    );
}

#[test]
fn test_parse_expression_rejects_define() {
    assert!(parse_expression("(define (f) 1)").is_err());
}

#[test]
fn test_parse_program_factorial() {
    let source = "; factorial\n\
                  (define (fact x)\n  (if (== x 0) 1 (* x (fact (- x 1)))))\n\
                  (fact 6)";
    let program = parse_program(source).unwrap();
    assert_eq!(program.definitions.len(), 1);
    assert_eq!(
        program.to_string(),
        "fact(x) = (==(x, 0) ? 1 : *(x, fact(-(x, 1))))\nfact(6)"
    );
}

#[test]
fn test_parse_program_empty_source() {
    assert_eq!(
        parse_program("").unwrap_err(),
        ParseError::MissingExpression { span: Span::point(0) }
    );
}
