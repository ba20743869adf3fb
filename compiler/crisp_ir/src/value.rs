//! Runtime values.
//!
//! Every value is immutable. Scalars are stored inline; pairs live behind a
//! [`Heap`] handle so cloning a list is a reference-count bump. Lists are
//! not a separate variant: `(a b c)` is `Pair(a, Pair(b, Pair(c, Nil)))`.
//!
//! ```text
//! let list = Value::list([Value::int(1), Value::int(2)]);
//! assert_eq!(list, Value::pair(Value::int(1), Value::pair(Value::int(2), Value::Nil)));
//! ```

mod heap;

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::list::ListIter;
use crate::{Name, StringLookup};

pub use heap::Heap;

/// Runtime value in the Crisp interpreter.
///
/// Equality is structural: two values are equal when they are the same
/// variant with equal payloads, recursively for pairs.
///
/// Drop, equality, hashing and `Debug` loop down the right spine of pair
/// chains, so list length is not bounded by the thread stack. Only nesting
/// in the left position (lists of lists) recurses.
#[derive(Clone)]
pub enum Value {
    Bool(bool),
    Char(char),
    Int(i64),
    /// Quoted symbol. Evaluating a symbol literal yields the symbol itself.
    Symbol(Name),
    /// Empty list, and the terminator of every proper list.
    Nil,
    Pair(Heap<(Value, Value)>),
}

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    #[inline]
    pub fn char(c: char) -> Self {
        Value::Char(c)
    }

    #[inline]
    pub fn symbol(name: Name) -> Self {
        Value::Symbol(name)
    }

    #[inline]
    pub fn nil() -> Self {
        Value::Nil
    }

    /// Construct a pair (`cons` cell).
    pub fn pair(left: Value, right: Value) -> Self {
        Value::Pair(Heap::new((left, right)))
    }

    /// Build a proper list from its elements, terminated by `Nil`.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: DoubleEndedIterator,
    {
        items
            .into_iter()
            .rev()
            .fold(Value::Nil, |tail, item| Value::pair(item, tail))
    }

    /// Left element of a pair (`car`).
    pub fn left(&self) -> Option<&Value> {
        match self {
            Value::Pair(cell) => Some(&cell.0),
            _ => None,
        }
    }

    /// Right element of a pair (`cdr`).
    pub fn right(&self) -> Option<&Value> {
        match self {
            Value::Pair(cell) => Some(&cell.1),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<Name> {
        match self {
            Value::Symbol(name) => Some(*name),
            _ => None,
        }
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Iterate the elements of a list, stopping at `Nil`.
    ///
    /// An improper tail is reported as a final `Err` item.
    pub fn iter(&self) -> ListIter<'_> {
        ListIter::new(self)
    }

    /// Type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
            Value::Int(_) => "int",
            Value::Symbol(_) => "symbol",
            Value::Nil => "nil",
            Value::Pair(_) => "pair",
        }
    }

    /// Move uniquely owned child pairs into `out`, leaving `Nil` behind.
    fn detach_children(&mut self, out: &mut Vec<Value>) {
        let Value::Pair(cell) = self else { return };
        if let Some((left, right)) = Heap::get_mut(cell) {
            for child in [left, right] {
                if matches!(child, Value::Pair(_)) {
                    out.push(std::mem::replace(child, Value::Nil));
                }
            }
        }
    }

    /// Render this value with symbol names resolved through `interner`.
    pub fn display<'a, I: StringLookup + ?Sized>(&'a self, interner: &'a I) -> ValueDisplay<'a, I> {
        ValueDisplay {
            value: self,
            interner,
        }
    }
}

// Iterative drop: a cell is only taken apart when this is its last owner,
// so shared tails are left for their other owners.
impl Drop for Value {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut value) = pending.pop() {
            value.detach_children(&mut pending);
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        let (mut a, mut b) = (self, other);
        loop {
            match (a, b) {
                (Value::Pair(x), Value::Pair(y)) => {
                    if Heap::ptr_eq(x, y) {
                        return true;
                    }
                    if x.0 != y.0 {
                        return false;
                    }
                    a = &x.1;
                    b = &y.1;
                }
                (Value::Bool(x), Value::Bool(y)) => return x == y,
                (Value::Char(x), Value::Char(y)) => return x == y,
                (Value::Int(x), Value::Int(y)) => return x == y,
                (Value::Symbol(x), Value::Symbol(y)) => return x == y,
                (Value::Nil, Value::Nil) => return true,
                _ => return false,
            }
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut cursor = self;
        loop {
            std::mem::discriminant(cursor).hash(state);
            match cursor {
                Value::Bool(b) => b.hash(state),
                Value::Char(c) => c.hash(state),
                Value::Int(n) => n.hash(state),
                Value::Symbol(name) => name.hash(state),
                Value::Nil => {}
                Value::Pair(cell) => {
                    cell.0.hash(state);
                    cursor = &cell.1;
                    continue;
                }
            }
            return;
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cursor = self;
        let mut open = 0usize;
        loop {
            match cursor {
                Value::Pair(cell) => {
                    write!(f, "Pair({:?}, ", cell.0)?;
                    open += 1;
                    cursor = &cell.1;
                    continue;
                }
                Value::Bool(b) => write!(f, "Bool({b:?})")?,
                Value::Char(c) => write!(f, "Char({c:?})")?,
                Value::Int(n) => write!(f, "Int({n:?})")?,
                Value::Symbol(name) => write!(f, "Symbol({name:?})")?,
                Value::Nil => f.write_str("Nil")?,
            }
            break;
        }
        for _ in 0..open {
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

/// [`Value`] paired with an interner for printing.
pub struct ValueDisplay<'a, I: ?Sized> {
    value: &'a Value,
    interner: &'a I,
}

impl<I: StringLookup + ?Sized> fmt::Display for ValueDisplay<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Bool(true) => f.write_str("#t"),
            Value::Bool(false) => f.write_str("#f"),
            Value::Char(c) => write!(f, "#\\{c}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Symbol(name) => f.write_str(self.interner.lookup(*name)),
            Value::Nil => f.write_str("nil"),
            Value::Pair(_) => {
                f.write_str("(")?;
                let mut cursor = self.value;
                let mut first = true;
                while let Value::Pair(cell) = cursor {
                    if !first {
                        f.write_str(" ")?;
                    }
                    first = false;
                    write!(f, "{}", cell.0.display(self.interner))?;
                    cursor = &cell.1;
                }
                if !cursor.is_nil() {
                    write!(f, " . {}", cursor.display(self.interner))?;
                }
                f.write_str(")")
            }
        }
    }
}
