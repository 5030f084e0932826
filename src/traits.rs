//! Common traits for cursor-based containers
//!
//! This module provides the capability traits shared by the containers in
//! this crate:
//!
//! - [`Container`]: size and capacity queries every container answers
//! - [`Cursored`]: access to a container's current item
//! - [`LinearCursor`]: navigation of a linear cursor over a container's items
//! - [`Keyed`]: the comparison-key capability required of items stored in
//!   keyed containers such as [`TwoThreeTree`](crate::twothree::TwoThreeTree)
//!
//! All fallible operations report failure through [`ContainerError`], a
//! single caller-checkable taxonomy. Conditions that can only arise from a
//! bug inside the library itself are not representable here; those panic.

use std::fmt;

/// Error type for container operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerError {
    /// Insert on a bounded container that is already at capacity
    Full,
    /// Access or delete on an empty container
    Empty,
    /// A cursor-relative operation was attempted while the cursor denotes
    /// no element
    NoCurrentItem,
    /// A cursor already past the last element was advanced again
    AfterTheEnd,
    /// A keyed insertion would duplicate a key that is already present
    DuplicateKey,
    /// An argument violated a documented precondition
    InvalidArgument(&'static str),
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerError::Full => write!(f, "container is at capacity"),
            ContainerError::Empty => write!(f, "container is empty"),
            ContainerError::NoCurrentItem => write!(f, "no current item at the cursor"),
            ContainerError::AfterTheEnd => write!(f, "cursor is already past the end"),
            ContainerError::DuplicateKey => {
                write!(f, "an item with this key is already present")
            }
            ContainerError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for ContainerError {}

/// Size and capacity queries
///
/// Bounded containers report a real capacity and become full; unbounded
/// containers answer `false` from [`is_full`](Container::is_full) forever.
pub trait Container {
    /// Returns the number of items currently stored
    fn len(&self) -> usize;

    /// Returns true if the container holds no items
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if no further item can be inserted
    fn is_full(&self) -> bool;
}

/// Access to the item a container's cursor currently denotes
///
/// Every container in this crate carries a notion of "current item": a
/// position for the arrayed heap, a search result for the AVL tree, a leaf
/// reference for the 2-3 tree. The accessor fails with
/// [`ContainerError::NoCurrentItem`] instead of panicking when the cursor
/// denotes nothing, so stale cursors are always detected.
pub trait Cursored {
    /// The item type stored in the container
    type Item;

    /// Returns true if the cursor currently denotes an item
    fn item_exists(&self) -> bool;

    /// Returns the item at the cursor
    ///
    /// # Errors
    /// [`ContainerError::NoCurrentItem`] when the cursor denotes no item.
    fn item(&self) -> Result<&Self::Item, ContainerError>;
}

/// Linear cursor navigation
///
/// A linear cursor visits items in a container-defined order and can also
/// sit in two boundary states: *before* the first item and *after* the
/// last. Advancing past the last item lands in the after state; advancing
/// again is an error rather than a wraparound.
pub trait LinearCursor {
    /// Returns true if the cursor is before the first item
    fn before(&self) -> bool;

    /// Returns true if the cursor is after the last item
    ///
    /// An empty container is always in the after state.
    fn after(&self) -> bool;

    /// Moves the cursor to the first item
    ///
    /// # Errors
    /// [`ContainerError::Empty`] when there is no first item to go to.
    fn go_first(&mut self) -> Result<(), ContainerError>;

    /// Advances the cursor one item
    ///
    /// Advancing from the before state lands on the first item; advancing
    /// off the last item lands in the after state.
    ///
    /// # Errors
    /// [`ContainerError::AfterTheEnd`] when the cursor is already after.
    fn go_forth(&mut self) -> Result<(), ContainerError>;

    /// Moves the cursor to the before state
    fn go_before(&mut self);

    /// Moves the cursor to the after state
    fn go_after(&mut self);
}

/// The comparison-key capability for items stored in keyed containers
///
/// Keyed containers order and look up items by the key the item itself
/// exposes, not by the whole item. Keys are cloned into interior routing
/// nodes, so they should be cheap to clone.
///
/// # Example
///
/// ```rust
/// use cursor_collections::Keyed;
///
/// struct Loot {
///     name: String,
///     gold_value: u32,
/// }
///
/// impl Keyed for Loot {
///     type Key = String;
///     fn key(&self) -> &String {
///         &self.name
///     }
/// }
/// ```
pub trait Keyed {
    /// The key items are compared by
    type Key: Ord + Clone;

    /// Returns the key of this item
    fn key(&self) -> &Self::Key;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ContainerError::Full.to_string(),
            "container is at capacity"
        );
        assert_eq!(ContainerError::Empty.to_string(), "container is empty");
        assert_eq!(
            ContainerError::NoCurrentItem.to_string(),
            "no current item at the cursor"
        );
        assert_eq!(
            ContainerError::AfterTheEnd.to_string(),
            "cursor is already past the end"
        );
        assert_eq!(
            ContainerError::InvalidArgument("edge weights must be non-negative").to_string(),
            "invalid argument: edge weights must be non-negative"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<ContainerError>();
    }
}
