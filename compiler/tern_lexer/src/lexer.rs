use std::fmt;

use logos::Logos;
use tern_ir::Span;
use thiserror::Error;

/// Tokens of the s-expression program format.
///
/// Anything that is not whitespace, a bracket, a comment or an integer is a
/// symbol, so operator names such as `+`, `<=` and `mod` need no special
/// casing. `true` and `false` are symbols here; the reader turns them into
/// booleans.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum SexpToken {
    #[regex(r";[^\n]*", logos::skip)]
    Comment,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok(), priority = 3)]
    Int(i64),

    #[regex(r"[^ \t\r\n\f()\[\]{};]+", |lex| lex.slice().to_string())]
    Symbol(String),
}

impl SexpToken {
    /// Whether this token opens a list.
    pub fn is_open(&self) -> bool {
        matches!(self, SexpToken::LParen | SexpToken::LBracket | SexpToken::LBrace)
    }

    /// Whether this token closes a list.
    pub fn is_close(&self) -> bool {
        matches!(self, SexpToken::RParen | SexpToken::RBracket | SexpToken::RBrace)
    }

    /// The closer matching an opening bracket.
    pub fn closer(&self) -> Option<SexpToken> {
        match self {
            SexpToken::LParen => Some(SexpToken::RParen),
            SexpToken::LBracket => Some(SexpToken::RBracket),
            SexpToken::LBrace => Some(SexpToken::RBrace),
            _ => None,
        }
    }
}

/// Tokens of the infix surface syntax.
///
/// Identifiers are any run of characters other than whitespace and the
/// punctuation `( ) , ? :`. The longest match wins, and `=` is given a
/// higher priority than the identifier pattern, so `=` alone is [`Eq`] while
/// `==` and `<=` are identifiers.
///
/// [`Eq`]: SurfaceToken::Eq
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum SurfaceToken {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token("=", priority = 5)]
    Eq,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,

    #[token("let")]
    Let,
    #[token("in")]
    In,
    #[token("true")]
    True,
    #[token("false")]
    False,

    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok(), priority = 3)]
    Int(i64),

    #[regex(r"[^ \t\r\n\f(),?:]+", |lex| lex.slice().to_string())]
    Ident(String),
}

impl fmt::Display for SexpToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SexpToken::Comment => f.write_str("comment"),
            SexpToken::LParen => f.write_str("("),
            SexpToken::RParen => f.write_str(")"),
            SexpToken::LBracket => f.write_str("["),
            SexpToken::RBracket => f.write_str("]"),
            SexpToken::LBrace => f.write_str("{"),
            SexpToken::RBrace => f.write_str("}"),
            SexpToken::Int(value) => write!(f, "{value}"),
            SexpToken::Symbol(text) => f.write_str(text),
        }
    }
}

impl fmt::Display for SurfaceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceToken::LParen => f.write_str("("),
            SurfaceToken::RParen => f.write_str(")"),
            SurfaceToken::Comma => f.write_str(","),
            SurfaceToken::Question => f.write_str("?"),
            SurfaceToken::Colon => f.write_str(":"),
            SurfaceToken::Eq => f.write_str("="),
            SurfaceToken::AndAnd => f.write_str("&&"),
            SurfaceToken::OrOr => f.write_str("||"),
            SurfaceToken::Let => f.write_str("let"),
            SurfaceToken::In => f.write_str("in"),
            SurfaceToken::True => f.write_str("true"),
            SurfaceToken::False => f.write_str("false"),
            SurfaceToken::Int(value) => write!(f, "{value}"),
            SurfaceToken::Ident(text) => f.write_str(text),
        }
    }
}

/// A token together with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

/// Tokenization failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("invalid token `{text}`")]
    InvalidToken { text: String, span: Span },
    #[error("integer literal `{text}` does not fit in 64 bits")]
    IntegerOutOfRange { text: String, span: Span },
}

impl LexError {
    /// Classify an unmatched slice.
    fn at(text: &str, span: Span) -> Self {
        let digits = text.strip_prefix('-').unwrap_or(text);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            LexError::IntegerOutOfRange {
                text: text.to_string(),
                span,
            }
        } else {
            LexError::InvalidToken {
                text: text.to_string(),
                span,
            }
        }
    }

    pub fn span(&self) -> Span {
        match self {
            LexError::InvalidToken { span, .. } | LexError::IntegerOutOfRange { span, .. } => *span,
        }
    }
}

/// Whether `text` reads back as exactly one surface identifier.
///
/// Names that fail this (`in`, `=`, `&&`, anything containing `,` or `:`)
/// cannot be printed in the surface syntax without changing meaning.
pub fn is_surface_identifier(text: &str) -> bool {
    let mut lexer = SurfaceToken::lexer(text);
    matches!(lexer.next(), Some(Ok(SurfaceToken::Ident(_))))
        && lexer.span() == (0..text.len())
        && lexer.next().is_none()
}

/// Tokenize s-expression source.
pub fn lex_sexp(source: &str) -> Result<Vec<Spanned<SexpToken>>, LexError> {
    tokenize(source)
}

/// Tokenize surface-syntax source.
pub fn lex_surface(source: &str) -> Result<Vec<Spanned<SurfaceToken>>, LexError> {
    tokenize(source)
}

fn tokenize<'s, T>(source: &'s str) -> Result<Vec<Spanned<T>>, LexError>
where
    T: Logos<'s, Source = str, Error = ()>,
    T::Extras: Default,
{
    let mut tokens = Vec::new();
    let mut lexer = T::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::from_range(lexer.span());
        match result {
            Ok(value) => tokens.push(Spanned { value, span }),
            Err(()) => return Err(LexError::at(lexer.slice(), span)),
        }
    }

    Ok(tokens)
}
