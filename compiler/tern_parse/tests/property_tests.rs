//! Property-based tests for the front end.
//!
//! Random ASTs are rendered two ways, as surface syntax through `Display`
//! and as s-expressions, and each rendering must parse back to the same tree.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use tern_ir::Expr;
use tern_lexer::is_surface_identifier;
use tern_parse::{parse_expression, parse_surface, ParseError, RESERVED_WORDS};

// -- Strategies --

/// Identifier, possibly made of operator characters, that both syntaxes read
/// as a plain name.
fn identifier_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z_+*/<>=!&|-][a-z0-9_+*/<>=!&|-]{0,7}")
        .expect("valid regex")
        .prop_filter("not a keyword", |s| is_name(s))
}

fn is_name(s: &str) -> bool {
    !RESERVED_WORDS.contains(&s) && is_surface_identifier(s)
}

/// Any symbol the s-expression reader produces, including ones that clash
/// with surface punctuation or keywords.
fn symbol_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec!["in", "=", "&&", "||", "a:b", "x,y", "p?", "?:", ","])
            .prop_map(str::to_string),
        prop::string::string_regex("[a-z=,?:&|<!-][a-z0-9=,?:&|<!-]{0,5}").expect("valid regex"),
    ]
}

/// Callee names: primitives plus user identifiers.
fn function_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec!["+", "-", "*", "/", "mod", "==", "!=", "<=", "not"])
            .prop_map(str::to_string),
        identifier_strategy(),
    ]
}

fn expr_strategy() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Expr::int),
        any::<bool>().prop_map(Expr::bool),
        identifier_strategy().prop_map(Expr::var),
    ];
    leaf.prop_recursive(5, 48, 4, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::and(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::or(l, r)),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(c, t, f)| Expr::if_(c, t, f)),
            (identifier_strategy(), inner.clone(), inner.clone())
                .prop_map(|(name, rhs, body)| Expr::let_(name, rhs, body)),
            (function_strategy(), prop::collection::vec(inner, 0..4))
                .prop_map(|(function, arguments)| Expr::call(function, arguments)),
        ]
    })
}

// -- Helpers --

/// Render an expression as s-expression source.
fn to_sexp(expr: &Expr) -> String {
    match expr {
        Expr::Int(value) => value.to_string(),
        Expr::Bool(value) => value.to_string(),
        Expr::Var(name) => name.to_string(),
        Expr::And(l, r) => format!("(and {} {})", to_sexp(l), to_sexp(r)),
        Expr::Or(l, r) => format!("(or {} {})", to_sexp(l), to_sexp(r)),
        Expr::If {
            condition,
            consequent,
            alternative,
        } => format!(
            "(if {} {} {})",
            to_sexp(condition),
            to_sexp(consequent),
            to_sexp(alternative)
        ),
        Expr::Let { name, rhs, body } => {
            format!("(let {} {} {})", name, to_sexp(rhs), to_sexp(body))
        }
        Expr::Call {
            function,
            arguments,
        } => {
            let mut out = format!("({function}");
            for argument in arguments {
                out.push(' ');
                out.push_str(&to_sexp(argument));
            }
            out.push(')');
            out
        }
    }
}

// -- Properties --

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn surface_rendering_parses_back(expr in expr_strategy()) {
        let rendered = expr.to_string();
        let parsed = parse_surface(&rendered)
            .unwrap_or_else(|err| panic!("failed to parse {rendered:?}: {err}"));
        prop_assert_eq!(parsed, expr);
    }

    #[test]
    fn surface_rendering_is_stable(expr in expr_strategy()) {
        let once = expr.to_string();
        let twice = parse_surface(&once).unwrap().to_string();
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn sexp_rendering_parses_back(expr in expr_strategy()) {
        let source = to_sexp(&expr);
        let parsed = parse_expression(&source)
            .unwrap_or_else(|err| panic!("failed to parse {source:?}: {err}"));
        prop_assert_eq!(parsed, expr);
    }

    #[test]
    fn lowered_names_render_readably(name in symbol_strategy()) {
        let source = format!("(let {name} 1 ({name} {name}))");
        match parse_expression(&source) {
            Ok(expr) => {
                let rendered = expr.to_string();
                let reparsed = parse_surface(&rendered)
                    .unwrap_or_else(|err| panic!("failed to parse {rendered:?}: {err}"));
                prop_assert_eq!(reparsed.to_string(), rendered);
            }
            Err(ParseError::InvalidName { name: rejected, .. }) => {
                prop_assert!(!is_name(&rejected));
            }
            Err(_) => {}
        }
    }
}
