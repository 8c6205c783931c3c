//! S-expressions to AST.
//!
//! | Form | Node |
//! |------|------|
//! | integer / `true` / `false` | literal |
//! | symbol | variable reference |
//! | `(and a b)`, `(or a b)` | `And`, `Or` |
//! | `(if c t f)` | `If` |
//! | `(let name rhs body)` | `Let` |
//! | `(f args...)` | `Call` |
//! | `(define (f params...) body)` | `Definition` (top level only) |

use rustc_hash::FxHashSet;
use tern_ir::{Definition, Expr, Name, Program, Span};
use tern_lexer::is_surface_identifier;
use tern_stack::ensure_sufficient_stack;

use crate::{ParseError, Sexp, SexpKind};

/// Words with fixed meaning in head position; never variables or callees.
pub const RESERVED_WORDS: [&str; 5] = ["and", "or", "if", "let", "define"];

fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Lower one datum to an expression.
pub fn lower_expr(sexp: &Sexp) -> Result<Expr, ParseError> {
    ensure_sufficient_stack(|| lower_expr_inner(sexp))
}

fn lower_expr_inner(sexp: &Sexp) -> Result<Expr, ParseError> {
    match &sexp.kind {
        SexpKind::Int(value) => Ok(Expr::Int(*value)),
        SexpKind::Bool(value) => Ok(Expr::Bool(*value)),
        SexpKind::Symbol(name) => Ok(Expr::Var(binding_name(name, sexp.span)?)),
        SexpKind::List(items) => lower_form(items, sexp.span),
    }
}

fn lower_form(items: &[Sexp], span: Span) -> Result<Expr, ParseError> {
    let Some((head, operands)) = items.split_first() else {
        return Err(ParseError::EmptyForm { span });
    };
    let Some(function) = head.as_symbol() else {
        return Err(ParseError::Expected {
            expected: "a function name or special form",
            span: head.span,
        });
    };

    match function.as_str() {
        "and" => {
            let [left, right] = operands_of::<2>("and", operands, span)?;
            Ok(Expr::and(lower_expr(left)?, lower_expr(right)?))
        }
        "or" => {
            let [left, right] = operands_of::<2>("or", operands, span)?;
            Ok(Expr::or(lower_expr(left)?, lower_expr(right)?))
        }
        "if" => {
            let [condition, consequent, alternative] = operands_of::<3>("if", operands, span)?;
            Ok(Expr::if_(
                lower_expr(condition)?,
                lower_expr(consequent)?,
                lower_expr(alternative)?,
            ))
        }
        "let" => {
            let [name, rhs, body] = operands_of::<3>("let", operands, span)?;
            let Some(name_text) = name.as_symbol() else {
                return Err(ParseError::Expected {
                    expected: "a variable name",
                    span: name.span,
                });
            };
            Ok(Expr::let_(
                binding_name(name_text, name.span)?,
                lower_expr(rhs)?,
                lower_expr(body)?,
            ))
        }
        "define" => Err(ParseError::Expected {
            expected: "an expression; `define` is only allowed at top level",
            span,
        }),
        _ => {
            let arguments = operands
                .iter()
                .map(lower_expr)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Expr::Call {
                function: function_name(head)?,
                arguments,
            })
        }
    }
}

/// Check a special form's operand count and hand back the operands.
fn operands_of<'a, const N: usize>(
    form: &'static str,
    operands: &'a [Sexp],
    span: Span,
) -> Result<&'a [Sexp; N], ParseError> {
    operands
        .try_into()
        .map_err(|_| ParseError::SpecialFormArity {
            form,
            expected: N,
            actual: operands.len(),
            span,
        })
}

/// A symbol used to bind, reference or call.
///
/// Besides the reserved words, names the surface syntax would read as
/// something else are refused, so every lowered tree prints and parses back.
fn binding_name(name: &Name, span: Span) -> Result<Name, ParseError> {
    if is_reserved(name) {
        return Err(ParseError::ReservedWord {
            word: name.to_string(),
            span,
        });
    }
    if !is_surface_identifier(name) {
        return Err(ParseError::InvalidName {
            name: name.to_string(),
            span,
        });
    }
    Ok(name.clone())
}

/// Lower top-level forms into a program.
///
/// `end` is where a missing entry expression is reported.
pub fn lower_program(forms: &[Sexp], end: Span) -> Result<Program, ParseError> {
    let mut definitions = Vec::new();
    let mut expression = None;

    for form in forms {
        if is_definition(form) {
            definitions.push(lower_definition(form)?);
        } else if expression.is_some() {
            return Err(ParseError::ExtraExpression { span: form.span });
        } else {
            expression = Some(lower_expr(form)?);
        }
    }

    let expression = expression.ok_or(ParseError::MissingExpression { span: end })?;
    Ok(Program::new(definitions, expression))
}

fn is_definition(form: &Sexp) -> bool {
    form.as_list()
        .and_then(<[Sexp]>::first)
        .and_then(Sexp::as_symbol)
        .is_some_and(|head| head == "define")
}

/// `(define (name params...) body)`
fn lower_definition(form: &Sexp) -> Result<Definition, ParseError> {
    let items = form.as_list().unwrap_or_default();
    let [signature, body] = operands_of::<2>("define", items.get(1..).unwrap_or_default(), form.span)?;

    let Some((name, parameters)) = signature.as_list().and_then(<[Sexp]>::split_first) else {
        return Err(ParseError::Expected {
            expected: "a signature `(name params...)`",
            span: signature.span,
        });
    };
    let name = function_name(name)?;

    let mut seen = FxHashSet::default();
    let mut parameter_names = Vec::with_capacity(parameters.len());
    for parameter in parameters {
        let Some(text) = parameter.as_symbol() else {
            return Err(ParseError::Expected {
                expected: "a parameter name",
                span: parameter.span,
            });
        };
        let parameter_name = binding_name(text, parameter.span)?;
        if !seen.insert(parameter_name.clone()) {
            return Err(ParseError::DuplicateParameter {
                function: name.to_string(),
                parameter: parameter_name.to_string(),
                span: parameter.span,
            });
        }
        parameter_names.push(parameter_name);
    }

    Ok(Definition::new(name, parameter_names, lower_expr(body)?))
}

fn function_name(sexp: &Sexp) -> Result<Name, ParseError> {
    match sexp.as_symbol() {
        Some(name) => binding_name(name, sexp.span),
        None => Err(ParseError::Expected {
            expected: "a function name",
            span: sexp.span,
        }),
    }
}
