#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

fn read_one(source: &str) -> Sexp {
    let mut forms = read(source).unwrap();
    assert_eq!(forms.len(), 1, "expected one datum in {source:?}");
    forms.remove(0)
}

#[test]
fn test_read_atoms() {
    assert_eq!(read_one("42").kind, SexpKind::Int(42));
    assert_eq!(read_one("true").kind, SexpKind::Bool(true));
    assert_eq!(read_one("false").kind, SexpKind::Bool(false));
    assert_eq!(read_one("mod").kind, SexpKind::Symbol(Name::from("mod")));
}

#[test]
fn test_read_nested_list() {
    let datum = read_one("(fact (- x 1))");
    let items = datum.as_list().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_symbol().unwrap(), "fact");
    assert_eq!(items[1].as_list().unwrap().len(), 3);
    assert_eq!(datum.span, Span::new(0, 14));
}

#[test]
fn test_read_all_bracket_kinds() {
    let datum = read_one("[let x {+ 1 2} (* x x)]");
    assert_eq!(datum.to_string(), "(let x (+ 1 2) (* x x))");
}

#[test]
fn test_read_multiple_forms() {
    let forms = read("(define (f) 1) ; the entry point\n(f)").unwrap();
    assert_eq!(forms.len(), 2);
    assert_eq!(forms[1].to_string(), "(f)");
}

#[test]
fn test_unterminated_list() {
    let err = read("(+ 1 (* 2 3)").unwrap_err();
    assert_eq!(err, ParseError::UnterminatedList { span: Span::new(0, 1) });
}

#[test]
fn test_stray_closer() {
    let err = read("1 )").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedToken {
            found: ")".to_string(),
            span: Span::new(2, 3),
        }
    );
}

#[test]
fn test_mismatched_closer() {
    let err = read("(+ 1 2]").unwrap_err();
    assert_eq!(
        err,
        ParseError::MismatchedCloser {
            opened: "(".to_string(),
            found: "]".to_string(),
            span: Span::new(6, 7),
        }
    );
}

#[test]
fn test_lex_error_is_wrapped() {
    let err = read("(+ 1 123456789012345678901234)").unwrap_err();
    assert!(matches!(err, ParseError::Lex(_)));
    assert_eq!(err.span(), Span::new(5, 29));
}

#[test]
fn test_deep_nesting() {
    let depth = 5_000;
    let source = format!("{}0{}", "(f ".repeat(depth), ")".repeat(depth));
    let datum = read_one(&source);
    assert!(datum.as_list().is_some());
}

#[test]
fn test_read_deeply_nested_lists() {
    let depth = 200_000;
    let source = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
    let datum = read_one(&source);
    let copy = datum.clone();
    assert_eq!(copy.to_string(), source);
    drop(datum);
    drop(copy);
}
