//! Tern IR - syntax tree types shared by the front end and the evaluator.
//!
//! This crate contains:
//! - `Span` for source locations reported by the front end
//! - `Name` for identifiers (cheap to clone, compared by content)
//! - The AST: `Expr`, `Definition` and `Program`
//!
//! # Design Philosophy
//!
//! - **Closed node set**: `Expr` is an enum; every consumer matches exhaustively
//!   instead of implementing a visitor.
//! - **Owned trees**: children are boxed and owned by their parent; there is no
//!   sharing and no cycles.
//! - **Round-trippable rendering**: `Display` on every node produces the
//!   surface syntax accepted by `tern_parse::parse_surface`.

pub mod ast;
mod name;
mod span;

pub use ast::{Definition, Expr, Program};
pub use name::Name;
pub use span::Span;
