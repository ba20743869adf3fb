//! Expression tree.

use std::fmt;

use super::operators::{BinaryOp, ChainOp};
use crate::{Name, StringLookup, Value};

/// Error building an expression node.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExprError {
    /// A chain operator or `list` form with no operands.
    #[error("operator `{operator}` requires at least one operand")]
    MalformedOperator { operator: &'static str },
}

/// Expression node.
///
/// Trees own their children and are never mutated after construction.
/// Chain operators and `list` store their operands as `first` + `rest`, so a
/// node with zero operands cannot exist; use [`Expr::chain`] and
/// [`Expr::list`] to build them from a `Vec`.
///
/// `Drop` and `PartialEq` are iterative. The derived `Clone` and `Debug`
/// recurse once per nesting level and need a thread stack sized for the
/// tree; clone or print very deep trees inside a grown stack.
#[derive(Clone, Debug)]
pub enum Expr {
    /// Literal value; evaluates to itself.
    Literal(Value),
    /// Variable reference, resolved through the environment.
    Var(Name),
    /// N-ary operator application.
    Chain {
        op: ChainOp,
        first: Box<Expr>,
        rest: Vec<Expr>,
    },
    /// Two-operand comparison.
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Build a pair from two sub-expressions.
    Cons(Box<Expr>, Box<Expr>),
    /// Left element of a pair.
    Car(Box<Expr>),
    /// Right element of a pair.
    Cdr(Box<Expr>),
    /// Build a proper list from one or more sub-expressions.
    List { first: Box<Expr>, rest: Vec<Expr> },
}

impl Expr {
    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn int(n: i64) -> Self {
        Expr::Literal(Value::Int(n))
    }

    pub fn bool(b: bool) -> Self {
        Expr::Literal(Value::Bool(b))
    }

    pub fn char(c: char) -> Self {
        Expr::Literal(Value::Char(c))
    }

    /// Quoted symbol literal.
    pub fn symbol(name: Name) -> Self {
        Expr::Literal(Value::Symbol(name))
    }

    pub fn nil() -> Self {
        Expr::Literal(Value::Nil)
    }

    pub fn var(name: Name) -> Self {
        Expr::Var(name)
    }

    /// Apply a chain operator to one or more operands.
    pub fn chain(op: ChainOp, operands: Vec<Expr>) -> Result<Self, ExprError> {
        let (first, rest) = split_first(operands).ok_or(ExprError::MalformedOperator {
            operator: op.as_symbol(),
        })?;
        Ok(Expr::Chain { op, first, rest })
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn cons(left: Expr, right: Expr) -> Self {
        Expr::Cons(Box::new(left), Box::new(right))
    }

    pub fn car(pair: Expr) -> Self {
        Expr::Car(Box::new(pair))
    }

    pub fn cdr(pair: Expr) -> Self {
        Expr::Cdr(Box::new(pair))
    }

    /// Build a list from one or more elements.
    pub fn list(elements: Vec<Expr>) -> Result<Self, ExprError> {
        let (first, rest) =
            split_first(elements).ok_or(ExprError::MalformedOperator { operator: "list" })?;
        Ok(Expr::List { first, rest })
    }

    /// Render this expression as an s-expression.
    pub fn display<'a, I: StringLookup + ?Sized>(&'a self, interner: &'a I) -> ExprDisplay<'a, I> {
        ExprDisplay {
            expr: self,
            interner,
        }
    }

    /// Move this node's children into `out`, leaving leaves in their place.
    fn take_children(&mut self, out: &mut Vec<Expr>) {
        match self {
            Expr::Literal(_) | Expr::Var(_) => {}
            Expr::Chain { first, rest, .. } | Expr::List { first, rest } => {
                out.push(std::mem::replace(&mut **first, Expr::nil()));
                out.append(rest);
            }
            Expr::Binary { left, right, .. } | Expr::Cons(left, right) => {
                out.push(std::mem::replace(&mut **left, Expr::nil()));
                out.push(std::mem::replace(&mut **right, Expr::nil()));
            }
            Expr::Car(inner) | Expr::Cdr(inner) => {
                out.push(std::mem::replace(&mut **inner, Expr::nil()));
            }
        }
    }
}

// Iterative drop: the derived glue recurses once per nesting level and would
// overflow the stack on the deep trees the evaluator is able to handle.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut child) = pending.pop() {
            child.take_children(&mut pending);
        }
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        let mut pending: Vec<(&Expr, &Expr)> = vec![(self, other)];
        while let Some(pair) = pending.pop() {
            match pair {
                (Expr::Literal(a), Expr::Literal(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (Expr::Var(a), Expr::Var(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (
                    Expr::Chain {
                        op: op_a,
                        first: first_a,
                        rest: rest_a,
                    },
                    Expr::Chain {
                        op: op_b,
                        first: first_b,
                        rest: rest_b,
                    },
                ) => {
                    if op_a != op_b || rest_a.len() != rest_b.len() {
                        return false;
                    }
                    pending.push((&**first_a, &**first_b));
                    pending.extend(rest_a.iter().zip(rest_b));
                }
                (
                    Expr::List {
                        first: first_a,
                        rest: rest_a,
                    },
                    Expr::List {
                        first: first_b,
                        rest: rest_b,
                    },
                ) => {
                    if rest_a.len() != rest_b.len() {
                        return false;
                    }
                    pending.push((&**first_a, &**first_b));
                    pending.extend(rest_a.iter().zip(rest_b));
                }
                (
                    Expr::Binary {
                        op: op_a,
                        left: left_a,
                        right: right_a,
                    },
                    Expr::Binary {
                        op: op_b,
                        left: left_b,
                        right: right_b,
                    },
                ) => {
                    if op_a != op_b {
                        return false;
                    }
                    pending.push((&**left_a, &**left_b));
                    pending.push((&**right_a, &**right_b));
                }
                (Expr::Cons(left_a, right_a), Expr::Cons(left_b, right_b)) => {
                    pending.push((&**left_a, &**left_b));
                    pending.push((&**right_a, &**right_b));
                }
                (Expr::Car(a), Expr::Car(b)) | (Expr::Cdr(a), Expr::Cdr(b)) => {
                    pending.push((&**a, &**b));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for Expr {}

fn split_first(mut operands: Vec<Expr>) -> Option<(Box<Expr>, Vec<Expr>)> {
    if operands.is_empty() {
        return None;
    }
    let first = operands.remove(0);
    Some((Box::new(first), operands))
}

/// [`Expr`] paired with an interner for printing.
pub struct ExprDisplay<'a, I: ?Sized> {
    expr: &'a Expr,
    interner: &'a I,
}

impl<I: StringLookup + ?Sized> ExprDisplay<'_, I> {
    fn form(&self, f: &mut fmt::Formatter<'_>, head: &str, operands: &[&Expr]) -> fmt::Result {
        write!(f, "({head}")?;
        for operand in operands {
            write!(f, " {}", operand.display(self.interner))?;
        }
        f.write_str(")")
    }
}

impl<I: StringLookup + ?Sized> fmt::Display for ExprDisplay<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expr {
            Expr::Literal(Value::Symbol(name)) => write!(f, "'{}", self.interner.lookup(*name)),
            Expr::Literal(value) => write!(f, "{}", value.display(self.interner)),
            Expr::Var(name) => f.write_str(self.interner.lookup(*name)),
            Expr::Chain { op, first, rest } => {
                let operands: Vec<&Expr> = std::iter::once(&**first).chain(rest).collect();
                self.form(f, op.as_symbol(), &operands)
            }
            Expr::Binary { op, left, right } => self.form(f, op.as_symbol(), &[&**left, &**right]),
            Expr::Cons(left, right) => self.form(f, "cons", &[&**left, &**right]),
            Expr::Car(inner) => self.form(f, "car", &[&**inner]),
            Expr::Cdr(inner) => self.form(f, "cdr", &[&**inner]),
            Expr::List { first, rest } => {
                let operands: Vec<&Expr> = std::iter::once(&**first).chain(rest).collect();
                self.form(f, "list", &operands)
            }
        }
    }
}
