//! Arrayed binary heap with positional iteration
//!
//! A fixed-capacity binary heap stored in an array, using the classic
//! 1-indexed layout: position `p` has children at `2p` and `2p + 1` and its
//! parent at `p / 2`. The sift direction is chosen by a [`SiftOrder`]
//! strategy type, so the same structure serves as a max-heap ([`MaxHeap`])
//! or a min-heap ([`MinHeap`]) without duplicated code.
//!
//! Besides the usual root-oriented operations, the heap supports deletion
//! at an arbitrary position through a positional cursor ([`HeapIter`]),
//! which is what lets [`PriorityQueue`](crate::priority_queue::PriorityQueue)
//! remove its minimum out of a max-heap.
//!
//! # Time Complexity
//!
//! | Operation        | Complexity |
//! |------------------|------------|
//! | `insert`         | O(log n)   |
//! | `delete_item`    | O(log n)   |
//! | `delete_at`      | O(log n)   |
//! | `item`           | O(1)       |
//! | cursor movement  | O(1)       |
//!
//! # Example
//!
//! ```rust
//! use cursor_collections::{Container, Cursored, MaxHeap};
//!
//! let mut heap = MaxHeap::with_capacity(8);
//! heap.insert(3)?;
//! heap.insert(7)?;
//! heap.insert(5)?;
//!
//! // The primary cursor sits at the root after an insert.
//! assert_eq!(heap.item()?, &7);
//! assert_eq!(heap.delete_item()?, 7);
//! assert_eq!(heap.item()?, &5);
//! # Ok::<(), cursor_collections::ContainerError>(())
//! ```

use std::marker::PhantomData;

use crate::traits::{Container, ContainerError, Cursored, LinearCursor};

/// Sift-order strategy for [`ArrayedHeap`]
///
/// Decides which of two items belongs closer to the root. The heap property
/// maintained is: no item precedes its parent.
pub trait SiftOrder {
    /// Returns true when `a` must sit closer to the root than `b`
    fn precedes<T: Ord>(a: &T, b: &T) -> bool;
}

/// Sift order placing the largest item at the root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxFirst;

impl SiftOrder for MaxFirst {
    fn precedes<T: Ord>(a: &T, b: &T) -> bool {
        a > b
    }
}

/// Sift order placing the smallest item at the root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinFirst;

impl SiftOrder for MinFirst {
    fn precedes<T: Ord>(a: &T, b: &T) -> bool {
        a < b
    }
}

/// A max-first arrayed heap
pub type MaxHeap<T> = ArrayedHeap<T, MaxFirst>;

/// A min-first arrayed heap
pub type MinHeap<T> = ArrayedHeap<T, MinFirst>;

/// A fixed-capacity arrayed binary heap
///
/// Positions are 1-based: the root is position 1 and positions 1..=len are
/// live. The heap keeps a primary cursor (a position; 0 means no current
/// item) which every insert parks at the root, so the most extreme item is
/// always one `item()` call away.
#[derive(Debug, Clone)]
pub struct ArrayedHeap<T, O: SiftOrder = MaxFirst> {
    items: Vec<T>,
    capacity: usize,
    /// Primary cursor position; 0 denotes no current item
    current: usize,
    order: PhantomData<O>,
}

impl<T: Ord, O: SiftOrder> ArrayedHeap<T, O> {
    /// Creates an empty heap holding at most `capacity` items
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            current: 0,
            order: PhantomData,
        }
    }

    /// Returns the fixed capacity set at construction
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Inserts an item and parks the primary cursor at the root
    ///
    /// # Errors
    /// [`ContainerError::Full`] when the heap is at capacity.
    pub fn insert(&mut self, item: T) -> Result<(), ContainerError> {
        if self.is_full() {
            return Err(ContainerError::Full);
        }
        self.items.push(item);
        self.current = 1;
        self.sift_up(self.items.len());
        Ok(())
    }

    /// Removes and returns the item at the primary cursor
    ///
    /// The last live item moves into the vacated position and is sifted to
    /// wherever the heap property puts it. The cursor keeps its position,
    /// or becomes 0 when the heap empties.
    ///
    /// # Errors
    /// [`ContainerError::NoCurrentItem`] when the cursor denotes no item.
    pub fn delete_item(&mut self) -> Result<T, ContainerError> {
        if !self.item_exists() {
            return Err(ContainerError::NoCurrentItem);
        }
        Ok(self.splice_out(self.current))
    }

    /// Removes and returns the item at a position saved from a [`HeapIter`]
    ///
    /// The primary cursor moves to the spliced position.
    ///
    /// # Errors
    /// [`ContainerError::Empty`] when the heap holds no items;
    /// [`ContainerError::NoCurrentItem`] when the position is not live.
    pub fn delete_at(&mut self, pos: usize) -> Result<T, ContainerError> {
        if self.is_empty() {
            return Err(ContainerError::Empty);
        }
        if pos == 0 || pos > self.items.len() {
            return Err(ContainerError::NoCurrentItem);
        }
        self.current = pos;
        Ok(self.splice_out(pos))
    }

    /// Returns the item at a live position
    ///
    /// # Errors
    /// [`ContainerError::NoCurrentItem`] when the position is not live.
    pub fn item_at(&self, pos: usize) -> Result<&T, ContainerError> {
        if pos == 0 || pos > self.items.len() {
            return Err(ContainerError::NoCurrentItem);
        }
        Ok(&self.items[pos - 1])
    }

    /// Returns a positional cursor over the heap, starting before the first
    /// position
    pub fn iterator(&self) -> HeapIter<'_, T, O> {
        HeapIter { heap: self, pos: 0 }
    }

    /// Removes the item at `pos`, refilling the hole with the last item
    fn splice_out(&mut self, pos: usize) -> T {
        let removed = self.items.swap_remove(pos - 1);
        if pos <= self.items.len() {
            self.restore_at(pos);
        }
        if self.items.is_empty() {
            self.current = 0;
        }
        removed
    }

    /// Re-establishes the heap property for the item at `pos`
    ///
    /// The moved item may belong above its new parent (possible when the
    /// hole was in another subtree) or below its children, so both
    /// directions are tried; at most one of them moves it.
    fn restore_at(&mut self, pos: usize) {
        if pos > 1 && O::precedes(&self.items[pos - 1], &self.items[pos / 2 - 1]) {
            self.sift_up(pos);
        } else {
            self.sift_down(pos);
        }
    }

    /// Moves the item at `pos` rootward while it precedes its parent
    fn sift_up(&mut self, mut pos: usize) {
        while pos > 1 {
            let parent = pos / 2;
            if O::precedes(&self.items[pos - 1], &self.items[parent - 1]) {
                self.items.swap(pos - 1, parent - 1);
                pos = parent;
            } else {
                break;
            }
        }
    }

    /// Moves the item at `pos` leafward while a child precedes it
    fn sift_down(&mut self, mut pos: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * pos;
            if left > len {
                break;
            }
            let right = left + 1;
            let mut target = left;
            if right <= len && O::precedes(&self.items[right - 1], &self.items[left - 1]) {
                target = right;
            }
            if O::precedes(&self.items[target - 1], &self.items[pos - 1]) {
                self.items.swap(target - 1, pos - 1);
                pos = target;
            } else {
                break;
            }
        }
    }
}

impl<T: Ord, O: SiftOrder> Container for ArrayedHeap<T, O> {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }
}

impl<T: Ord, O: SiftOrder> Cursored for ArrayedHeap<T, O> {
    type Item = T;

    fn item_exists(&self) -> bool {
        self.current >= 1 && self.current <= self.items.len()
    }

    fn item(&self) -> Result<&T, ContainerError> {
        if !self.item_exists() {
            return Err(ContainerError::NoCurrentItem);
        }
        Ok(&self.items[self.current - 1])
    }
}

/// A positional cursor over an [`ArrayedHeap`]
///
/// The cursor visits positions in array order (1, 2, ..., len), which is a
/// level-order walk of the heap. It holds a shared borrow of the heap, so
/// any number of cursors may be live at once; to delete at a cursor's
/// position, save [`position()`](HeapIter::position), drop the cursor, and
/// call [`ArrayedHeap::delete_at`].
#[derive(Debug, Clone)]
pub struct HeapIter<'a, T, O: SiftOrder> {
    heap: &'a ArrayedHeap<T, O>,
    pos: usize,
}

impl<'a, T: Ord, O: SiftOrder> HeapIter<'a, T, O> {
    /// Returns the saved position (0 = before, len + 1 = after)
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns true if the cursor denotes a live position
    pub fn item_exists(&self) -> bool {
        self.pos >= 1 && self.pos <= self.heap.items.len()
    }

    /// Returns the item at the cursor's position
    ///
    /// The borrow is tied to the heap, not to the cursor, so the item stays
    /// usable while the cursor moves on.
    ///
    /// # Errors
    /// [`ContainerError::NoCurrentItem`] when the position is not live.
    pub fn item(&self) -> Result<&'a T, ContainerError> {
        self.heap.item_at(self.pos)
    }
}

impl<'a, T: Ord, O: SiftOrder> LinearCursor for HeapIter<'a, T, O> {
    fn before(&self) -> bool {
        self.pos == 0
    }

    fn after(&self) -> bool {
        self.heap.is_empty() || self.pos > self.heap.items.len()
    }

    fn go_first(&mut self) -> Result<(), ContainerError> {
        if self.heap.is_empty() {
            return Err(ContainerError::Empty);
        }
        self.pos = 1;
        Ok(())
    }

    fn go_forth(&mut self) -> Result<(), ContainerError> {
        if self.after() {
            return Err(ContainerError::AfterTheEnd);
        }
        self.pos += 1;
        Ok(())
    }

    fn go_before(&mut self) {
        self.pos = 0;
    }

    fn go_after(&mut self) {
        if self.heap.is_empty() {
            self.pos = 0;
        } else {
            self.pos = self.heap.items.len() + 1;
        }
    }
}
