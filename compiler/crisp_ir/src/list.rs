//! Proper-list view over pair chains.
//!
//! A proper list is a right-nested chain of pairs ending in `Nil`. Every
//! function here walks the chain and rejects an improper tail rather than
//! silently treating it as an element.

use crate::Value;

/// Error from a list operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// The chain ended in something other than `Nil`.
    #[error("improper list: tail is {tail}, expected nil")]
    Improper { tail: &'static str },
    /// Operation needs at least one element.
    #[error("{operation} of an empty list")]
    Empty { operation: &'static str },
    /// `take` asked for more elements than the list holds.
    #[error("cannot take {requested} elements from a list of length {len}")]
    OutOfBounds { requested: usize, len: usize },
}

/// Iterator over the elements of a list.
///
/// Yields `Ok(element)` for each pair. If the chain ends in a non-`Nil`
/// value, a single `Err(ListError::Improper)` is yielded and iteration
/// stops.
pub struct ListIter<'a> {
    cursor: Option<&'a Value>,
}

impl<'a> ListIter<'a> {
    pub(crate) fn new(list: &'a Value) -> Self {
        ListIter { cursor: Some(list) }
    }
}

impl<'a> Iterator for ListIter<'a> {
    type Item = Result<&'a Value, ListError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.cursor.take()? {
            Value::Pair(cell) => {
                self.cursor = Some(&cell.1);
                Some(Ok(&cell.0))
            }
            Value::Nil => None,
            tail => Some(Err(ListError::Improper {
                tail: tail.type_name(),
            })),
        }
    }
}

/// Collect the elements of a proper list.
pub fn to_vec(list: &Value) -> Result<Vec<Value>, ListError> {
    list.iter().map(|item| item.cloned()).collect()
}

/// Number of elements in a proper list.
pub fn len(list: &Value) -> Result<usize, ListError> {
    list.iter().try_fold(0usize, |n, item| item.map(|_| n + 1))
}

/// First element.
pub fn head(list: &Value) -> Result<Value, ListError> {
    match list.iter().next() {
        Some(item) => item.cloned(),
        None => Err(ListError::Empty { operation: "head" }),
    }
}

/// Last element.
pub fn last(list: &Value) -> Result<Value, ListError> {
    let mut last = None;
    for item in list.iter() {
        last = Some(item?);
    }
    last.cloned().ok_or(ListError::Empty { operation: "last" })
}

/// Every element except the last.
pub fn init(list: &Value) -> Result<Value, ListError> {
    let mut items = to_vec(list)?;
    if items.pop().is_none() {
        return Err(ListError::Empty { operation: "init" });
    }
    Ok(Value::list(items))
}

/// Every element except the first.
pub fn tail(list: &Value) -> Result<Value, ListError> {
    // Validate the whole chain, not just the first cell.
    len(list)?;
    list.right()
        .cloned()
        .ok_or(ListError::Empty { operation: "tail" })
}

/// `list` with `item` added at the front.
pub fn prepended(list: &Value, item: Value) -> Result<Value, ListError> {
    len(list)?;
    Ok(Value::pair(item, list.clone()))
}

/// `list` with `item` added at the back.
pub fn appended(list: &Value, item: Value) -> Result<Value, ListError> {
    let mut items = to_vec(list)?;
    items.push(item);
    Ok(Value::list(items))
}

/// All elements of `front` followed by all elements of `back`.
///
/// The cells of `back` are shared, not copied.
pub fn concat(front: &Value, back: &Value) -> Result<Value, ListError> {
    let items = to_vec(front)?;
    len(back)?;
    Ok(items
        .into_iter()
        .rev()
        .fold(back.clone(), |tail, item| Value::pair(item, tail)))
}

/// The first `n` elements.
pub fn take(list: &Value, n: usize) -> Result<Value, ListError> {
    let items = to_vec(list)?;
    if n > items.len() {
        return Err(ListError::OutOfBounds {
            requested: n,
            len: items.len(),
        });
    }
    Ok(Value::list(items.into_iter().take(n).collect::<Vec<_>>()))
}
