//! Parser for the infix surface syntax that `Expr`'s `Display` produces.
//!
//! ```text
//! expr := INT | "true" | "false"
//!       | "let" IDENT "=" expr "in" expr
//!       | IDENT "(" [expr ("," expr)*] ")"
//!       | IDENT
//!       | "(" expr ("&&" | "||") expr ")"
//!       | "(" expr "?" expr ":" expr ")"
//! ```
//!
//! Infix operators only appear inside parentheses, so no precedence table is
//! needed.

use tern_ir::{Expr, Name, Span};
use tern_lexer::{lex_surface, Spanned, SurfaceToken};
use tern_stack::ensure_sufficient_stack;

use crate::ParseError;

/// Parse surface syntax into an expression. The whole input must be consumed.
pub fn parse_surface(source: &str) -> Result<Expr, ParseError> {
    let tokens = lex_surface(source)?;
    let end = Span::point(u32::try_from(source.len()).unwrap_or(u32::MAX));
    let mut parser = Parser {
        tokens,
        pos: 0,
        end,
    };
    let expr = parser.expr()?;
    if let Some(extra) = parser.peek() {
        return Err(ParseError::UnexpectedToken {
            found: extra.value.to_string(),
            span: extra.span,
        });
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Spanned<SurfaceToken>>,
    pos: usize,
    end: Span,
}

impl Parser {
    fn peek(&self) -> Option<&Spanned<SurfaceToken>> {
        self.tokens.get(self.pos)
    }

    fn check(&self, expected: &SurfaceToken) -> bool {
        self.peek().is_some_and(|t| t.value == *expected)
    }

    fn advance(&mut self, expected: &'static str) -> Result<Spanned<SurfaceToken>, ParseError> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(ParseError::UnexpectedEof {
                expected,
                span: self.end,
            })?;
        self.pos += 1;
        Ok(token)
    }

    fn expect(&mut self, token: &SurfaceToken, expected: &'static str) -> Result<(), ParseError> {
        let found = self.advance(expected)?;
        if found.value == *token {
            Ok(())
        } else {
            Err(ParseError::Expected {
                expected,
                span: found.span,
            })
        }
    }

    fn ident(&mut self, expected: &'static str) -> Result<Name, ParseError> {
        let found = self.advance(expected)?;
        match found.value {
            SurfaceToken::Ident(text) => Ok(Name::from(text)),
            _ => Err(ParseError::Expected {
                expected,
                span: found.span,
            }),
        }
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.expr_inner())
    }

    fn expr_inner(&mut self) -> Result<Expr, ParseError> {
        let Spanned { value, span } = self.advance("an expression")?;
        match value {
            SurfaceToken::Int(value) => Ok(Expr::Int(value)),
            SurfaceToken::True => Ok(Expr::Bool(true)),
            SurfaceToken::False => Ok(Expr::Bool(false)),
            SurfaceToken::Let => {
                let name = self.ident("a variable name")?;
                self.expect(&SurfaceToken::Eq, "`=`")?;
                let rhs = self.expr()?;
                self.expect(&SurfaceToken::In, "`in`")?;
                let body = self.expr()?;
                Ok(Expr::let_(name, rhs, body))
            }
            SurfaceToken::Ident(text) => {
                let name = Name::from(text);
                if self.check(&SurfaceToken::LParen) {
                    self.pos += 1;
                    let arguments = self.arguments()?;
                    Ok(Expr::Call {
                        function: name,
                        arguments,
                    })
                } else {
                    Ok(Expr::Var(name))
                }
            }
            SurfaceToken::LParen => self.parenthesized(),
            other => Err(ParseError::UnexpectedToken {
                found: other.to_string(),
                span,
            }),
        }
    }

    /// Call arguments after the opening `(`, through the closing `)`.
    fn arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut arguments = Vec::new();
        if self.check(&SurfaceToken::RParen) {
            self.pos += 1;
            return Ok(arguments);
        }
        loop {
            arguments.push(self.expr()?);
            let found = self.advance("`,` or `)`")?;
            match found.value {
                SurfaceToken::Comma => {}
                SurfaceToken::RParen => return Ok(arguments),
                _ => {
                    return Err(ParseError::Expected {
                        expected: "`,` or `)`",
                        span: found.span,
                    })
                }
            }
        }
    }

    /// `&&`, `||` or `? :` form after the opening `(`.
    fn parenthesized(&mut self) -> Result<Expr, ParseError> {
        let first = self.expr()?;
        let operator = self.advance("`&&`, `||` or `?`")?;
        let expr = match operator.value {
            SurfaceToken::AndAnd => Expr::and(first, self.expr()?),
            SurfaceToken::OrOr => Expr::or(first, self.expr()?),
            SurfaceToken::Question => {
                let consequent = self.expr()?;
                self.expect(&SurfaceToken::Colon, "`:`")?;
                Expr::if_(first, consequent, self.expr()?)
            }
            _ => {
                return Err(ParseError::Expected {
                    expected: "`&&`, `||` or `?`",
                    span: operator.span,
                })
            }
        };
        self.expect(&SurfaceToken::RParen, "`)`")?;
        Ok(expr)
    }
}
