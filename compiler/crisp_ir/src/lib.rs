//! Crisp IR - values and expression trees.
//!
//! This crate holds the data model shared by everything that builds or
//! evaluates Crisp programs:
//! - `Name` and `StringInterner` for interned symbols
//! - `Value`, the immutable runtime value (pairs behind `Heap`)
//! - `list`, a proper-list view with the usual list utilities
//! - `Expr`, the expression tree, and the operator tags
//!
//! It has no evaluation behavior; see `crisp_eval`.

pub mod ast;
mod interner;
pub mod list;
mod name;
mod value;

pub use ast::{Arity, BinaryOp, ChainOp, Expr, ExprDisplay, ExprError};
pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use list::{ListError, ListIter};
pub use name::Name;
pub use value::{Heap, Value, ValueDisplay};
