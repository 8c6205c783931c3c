//! Front-end errors.

use tern_ir::Span;
use tern_lexer::LexError;
use thiserror::Error;

/// Failure to turn source text into an AST.
///
/// Every variant carries the span to underline when reporting.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("unexpected `{found}`")]
    UnexpectedToken { found: String, span: Span },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str, span: Span },

    #[error("unterminated list")]
    UnterminatedList { span: Span },

    #[error("`{found}` does not close the list opened with `{opened}`")]
    MismatchedCloser {
        opened: String,
        found: String,
        span: Span,
    },

    #[error("empty list is not an expression")]
    EmptyForm { span: Span },

    #[error("`{form}` expects {expected} operands, got {actual}")]
    SpecialFormArity {
        form: &'static str,
        expected: usize,
        actual: usize,
        span: Span,
    },

    #[error("expected {expected}")]
    Expected { expected: &'static str, span: Span },

    #[error("`{word}` is reserved and cannot be used as a name")]
    ReservedWord { word: String, span: Span },

    #[error("`{name}` cannot be written as a name in surface syntax")]
    InvalidName { name: String, span: Span },

    #[error("parameter `{parameter}` appears more than once in `{function}`")]
    DuplicateParameter {
        function: String,
        parameter: String,
        span: Span,
    },

    #[error("no expression to evaluate")]
    MissingExpression { span: Span },

    #[error("more than one expression to evaluate")]
    ExtraExpression { span: Span },
}

impl ParseError {
    /// Source location to underline.
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(err) => err.span(),
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedEof { span, .. }
            | ParseError::UnterminatedList { span }
            | ParseError::MismatchedCloser { span, .. }
            | ParseError::EmptyForm { span }
            | ParseError::SpecialFormArity { span, .. }
            | ParseError::Expected { span, .. }
            | ParseError::ReservedWord { span, .. }
            | ParseError::InvalidName { span, .. }
            | ParseError::DuplicateParameter { span, .. }
            | ParseError::MissingExpression { span }
            | ParseError::ExtraExpression { span } => *span,
        }
    }
}
