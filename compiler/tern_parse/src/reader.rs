//! S-expression reader.

use std::{fmt, mem};

use tern_ir::{Name, Span};
use tern_lexer::{lex_sexp, SexpToken, Spanned};
use tern_stack::ensure_sufficient_stack;

use crate::ParseError;

/// A datum read from source, before it is given meaning as an expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sexp {
    pub kind: SexpKind,
    pub span: Span,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SexpKind {
    Int(i64),
    Bool(bool),
    Symbol(Name),
    List(Vec<Sexp>),
}

impl Clone for SexpKind {
    fn clone(&self) -> Self {
        ensure_sufficient_stack(|| match self {
            SexpKind::Int(value) => SexpKind::Int(*value),
            SexpKind::Bool(value) => SexpKind::Bool(*value),
            SexpKind::Symbol(name) => SexpKind::Symbol(name.clone()),
            SexpKind::List(items) => SexpKind::List(items.clone()),
        })
    }
}

/// Nested lists are flattened onto a work list rather than dropped
/// recursively.
impl Drop for Sexp {
    fn drop(&mut self) {
        let SexpKind::List(items) = &mut self.kind else {
            return;
        };
        let mut pending = mem::take(items);
        while let Some(mut sexp) = pending.pop() {
            if let SexpKind::List(items) = &mut sexp.kind {
                pending.append(items);
            }
        }
    }
}

impl Sexp {
    /// The symbol's name, if this datum is a symbol.
    pub fn as_symbol(&self) -> Option<&Name> {
        match &self.kind {
            SexpKind::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// The elements, if this datum is a list.
    pub fn as_list(&self) -> Option<&[Sexp]> {
        match &self.kind {
            SexpKind::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Renders back to s-expression source; lists always use parentheses.
impl fmt::Display for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| self.fmt_inner(f))
    }
}

impl Sexp {
    fn fmt_inner(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SexpKind::Int(value) => write!(f, "{value}"),
            SexpKind::Bool(value) => write!(f, "{value}"),
            SexpKind::Symbol(name) => write!(f, "{name}"),
            SexpKind::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Read every datum in `source`.
pub fn read(source: &str) -> Result<Vec<Sexp>, ParseError> {
    let tokens = lex_sexp(source)?;
    let mut reader = Reader { tokens, pos: 0 };
    let mut forms = Vec::new();
    while !reader.at_end() {
        forms.push(reader.read_datum()?);
    }
    Ok(forms)
}

struct Reader {
    tokens: Vec<Spanned<SexpToken>>,
    pos: usize,
}

impl Reader {
    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Spanned<SexpToken>> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Spanned<SexpToken>> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn read_datum(&mut self) -> Result<Sexp, ParseError> {
        ensure_sufficient_stack(|| self.read_datum_inner())
    }

    fn read_datum_inner(&mut self) -> Result<Sexp, ParseError> {
        let Some(Spanned { value, span }) = self.next() else {
            let span = self
                .tokens
                .last()
                .map_or(Span::default(), |t| Span::point(t.span.end));
            return Err(ParseError::UnexpectedEof {
                expected: "an expression",
                span,
            });
        };

        let kind = match value {
            SexpToken::Int(value) => SexpKind::Int(value),
            SexpToken::Symbol(text) => match text.as_str() {
                "true" => SexpKind::Bool(true),
                "false" => SexpKind::Bool(false),
                _ => SexpKind::Symbol(Name::from(text)),
            },
            open if open.is_open() => return self.read_list(open, span),
            other => {
                return Err(ParseError::UnexpectedToken {
                    found: other.to_string(),
                    span,
                })
            }
        };
        Ok(Sexp { kind, span })
    }

    /// Read list elements up to the closer matching `open`.
    fn read_list(&mut self, open: SexpToken, open_span: Span) -> Result<Sexp, ParseError> {
        let closer = open.closer();
        let mut items = Vec::new();
        loop {
            let Some(token) = self.peek() else {
                return Err(ParseError::UnterminatedList { span: open_span });
            };
            if token.value.is_close() {
                let token_span = token.span;
                if Some(&token.value) != closer.as_ref() {
                    return Err(ParseError::MismatchedCloser {
                        opened: open.to_string(),
                        found: token.value.to_string(),
                        span: token_span,
                    });
                }
                self.pos += 1;
                return Ok(Sexp {
                    kind: SexpKind::List(items),
                    span: open_span.merge(token_span),
                });
            }
            items.push(self.read_datum()?);
        }
    }
}

#[cfg(test)]
mod tests;
