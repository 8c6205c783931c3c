//! Abstract syntax tree.
//!
//! Every node is immutable once built and owned by exactly one parent (or by
//! the `Program` for the roots). `Display` renders the surface syntax:
//!
//! | Node | Rendering |
//! |------|-----------|
//! | `Int` | decimal digits |
//! | `Bool` | `true` / `false` |
//! | `Var` | the name |
//! | `And` | `(L && R)` |
//! | `Or` | `(L || R)` |
//! | `If` | `(C ? T : F)` |
//! | `Let` | `let name = RHS in BODY` |
//! | `Call` | `name(a1, a2)` |
//!
//! Trees can be far deeper than the host stack allows for a plain recursive
//! walk. `Clone`, `Display` and `node_count` grow the stack as they descend,
//! and `Drop` unlinks nodes onto a heap work list instead of recursing.

use std::{fmt, mem};

use tern_stack::ensure_sufficient_stack;

use crate::Name;

/// An expression node.
#[derive(Debug, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Integer literal.
    Int(i64),
    /// Boolean literal.
    Bool(bool),
    /// Variable reference.
    Var(Name),
    /// Short-circuiting conjunction.
    And(Box<Expr>, Box<Expr>),
    /// Short-circuiting disjunction.
    Or(Box<Expr>, Box<Expr>),
    /// Conditional; exactly one branch is evaluated.
    If {
        condition: Box<Expr>,
        consequent: Box<Expr>,
        alternative: Box<Expr>,
    },
    /// Single binding visible only in `body`.
    Let {
        name: Name,
        rhs: Box<Expr>,
        body: Box<Expr>,
    },
    /// Call of a primitive or a top-level definition.
    Call { function: Name, arguments: Vec<Expr> },
}

impl Expr {
    pub fn int(value: i64) -> Self {
        Expr::Int(value)
    }

    pub fn bool(value: bool) -> Self {
        Expr::Bool(value)
    }

    pub fn var(name: impl Into<Name>) -> Self {
        Expr::Var(name.into())
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Or(Box::new(left), Box::new(right))
    }

    pub fn if_(condition: Expr, consequent: Expr, alternative: Expr) -> Self {
        Expr::If {
            condition: Box::new(condition),
            consequent: Box::new(consequent),
            alternative: Box::new(alternative),
        }
    }

    pub fn let_(name: impl Into<Name>, rhs: Expr, body: Expr) -> Self {
        Expr::Let {
            name: name.into(),
            rhs: Box::new(rhs),
            body: Box::new(body),
        }
    }

    pub fn call(function: impl Into<Name>, arguments: Vec<Expr>) -> Self {
        Expr::Call {
            function: function.into(),
            arguments,
        }
    }

    /// Number of nodes in this tree, counting `self`.
    pub fn node_count(&self) -> usize {
        ensure_sufficient_stack(|| self.node_count_inner())
    }

    fn node_count_inner(&self) -> usize {
        match self {
            Expr::Int(_) | Expr::Bool(_) | Expr::Var(_) => 1,
            Expr::And(left, right) | Expr::Or(left, right) => {
                1 + left.node_count() + right.node_count()
            }
            Expr::If {
                condition,
                consequent,
                alternative,
            } => 1 + condition.node_count() + consequent.node_count() + alternative.node_count(),
            Expr::Let { rhs, body, .. } => 1 + rhs.node_count() + body.node_count(),
            Expr::Call { arguments, .. } => 1 + arguments.iter().map(Expr::node_count).sum::<usize>(),
        }
    }

    /// Move every child into `out`, leaving leaf placeholders behind.
    fn detach_children(&mut self, out: &mut Vec<Expr>) {
        match self {
            Expr::Int(_) | Expr::Bool(_) | Expr::Var(_) => {}
            Expr::And(left, right) | Expr::Or(left, right) => {
                out.push(detach(left));
                out.push(detach(right));
            }
            Expr::If {
                condition,
                consequent,
                alternative,
            } => {
                out.push(detach(condition));
                out.push(detach(consequent));
                out.push(detach(alternative));
            }
            Expr::Let { rhs, body, .. } => {
                out.push(detach(rhs));
                out.push(detach(body));
            }
            Expr::Call { arguments, .. } => out.append(arguments),
        }
    }
}

fn detach(slot: &mut Expr) -> Expr {
    mem::replace(slot, Expr::Int(0))
}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.detach_children(&mut pending);
        }
    }
}

impl Clone for Expr {
    fn clone(&self) -> Self {
        ensure_sufficient_stack(|| match self {
            Expr::Int(value) => Expr::Int(*value),
            Expr::Bool(value) => Expr::Bool(*value),
            Expr::Var(name) => Expr::Var(name.clone()),
            Expr::And(left, right) => Expr::And(left.clone(), right.clone()),
            Expr::Or(left, right) => Expr::Or(left.clone(), right.clone()),
            Expr::If {
                condition,
                consequent,
                alternative,
            } => Expr::If {
                condition: condition.clone(),
                consequent: consequent.clone(),
                alternative: alternative.clone(),
            },
            Expr::Let { name, rhs, body } => Expr::Let {
                name: name.clone(),
                rhs: rhs.clone(),
                body: body.clone(),
            },
            Expr::Call {
                function,
                arguments,
            } => Expr::Call {
                function: function.clone(),
                arguments: arguments.clone(),
            },
        })
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| self.fmt_inner(f))
    }
}

impl Expr {
    fn fmt_inner(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Int(value) => write!(f, "{value}"),
            Expr::Bool(value) => write!(f, "{value}"),
            Expr::Var(name) => write!(f, "{name}"),
            Expr::And(left, right) => write!(f, "({left} && {right})"),
            Expr::Or(left, right) => write!(f, "({left} || {right})"),
            Expr::If {
                condition,
                consequent,
                alternative,
            } => write!(f, "({condition} ? {consequent} : {alternative})"),
            Expr::Let { name, rhs, body } => write!(f, "let {name} = {rhs} in {body}"),
            Expr::Call {
                function,
                arguments,
            } => {
                write!(f, "{function}(")?;
                write_comma_separated(f, arguments)?;
                f.write_str(")")
            }
        }
    }
}

fn write_comma_separated<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// A top-level function definition.
///
/// Parameter names are unique within one definition; the front end rejects
/// duplicates. Definitions with the same name may repeat across a program,
/// in which case the last one wins on lookup.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Definition {
    pub name: Name,
    pub parameters: Vec<Name>,
    pub body: Expr,
}

impl Definition {
    pub fn new(name: impl Into<Name>, parameters: Vec<Name>, body: Expr) -> Self {
        Definition {
            name: name.into(),
            parameters,
            body,
        }
    }

    /// Number of parameters the definition declares.
    #[inline]
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        write_comma_separated(f, &self.parameters)?;
        write!(f, ") = {}", self.body)
    }
}

/// A whole program: definitions plus the single entry expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Program {
    pub definitions: Vec<Definition>,
    pub expression: Expr,
}

impl Program {
    pub fn new(definitions: Vec<Definition>, expression: Expr) -> Self {
        Program {
            definitions,
            expression,
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for definition in &self.definitions {
            writeln!(f, "{definition}")?;
        }
        write!(f, "{}", self.expression)
    }
}
