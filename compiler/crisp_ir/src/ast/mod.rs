//! Expression tree and operator tags.

mod expr;
mod operators;

pub use expr::{Expr, ExprDisplay, ExprError};
pub use operators::{Arity, BinaryOp, ChainOp};
