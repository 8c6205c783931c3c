//! Tern lexer.
//!
//! Two token sets, both generated with `logos`:
//!
//! - [`SexpToken`]: the s-expression program format read by `tern_parse::read`.
//! - [`SurfaceToken`]: the infix surface syntax that `Display` on AST nodes
//!   produces, read back by `tern_parse::parse_surface`.
//!
//! Both tokenizers stop at the first character sequence they cannot match and
//! report it as a [`LexError`] carrying its span.

mod lexer;

pub use lexer::{
    is_surface_identifier, lex_sexp, lex_surface, LexError, SexpToken, Spanned, SurfaceToken,
};
