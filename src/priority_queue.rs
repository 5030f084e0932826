//! Bounded priority queue over the arrayed heap
//!
//! A thin wrapper around [`MaxHeap`] that adds minimum access. The maximum
//! is the heap root; the minimum has no fixed home in a max-heap, so it is
//! found by a linear scan over the live positions and removed through
//! [`ArrayedHeap::delete_at`](crate::arrayed_heap::ArrayedHeap::delete_at).
//!
//! # Time Complexity
//!
//! | Operation        | Complexity |
//! |------------------|------------|
//! | `insert`         | O(log n)   |
//! | `max_item`       | O(1)       |
//! | `delete_max`     | O(log n)   |
//! | `min_item`       | O(n)       |
//! | `delete_min`     | O(n)       |
//! | `delete_all_max` | O(k log n) for k equal maxima |
//!
//! # Example
//!
//! ```rust
//! use cursor_collections::{Container, PriorityQueue};
//!
//! let mut queue = PriorityQueue::with_capacity(4);
//! queue.insert(7)?;
//! queue.insert(3)?;
//! queue.insert(9)?;
//!
//! assert_eq!(queue.max_item()?, &9);
//! assert_eq!(queue.min_item()?, &3);
//! assert_eq!(queue.delete_min()?, 3);
//! assert_eq!(queue.delete_max()?, 9);
//! # Ok::<(), cursor_collections::ContainerError>(())
//! ```

use crate::arrayed_heap::MaxHeap;
use crate::traits::{Container, ContainerError, LinearCursor};

/// A bounded priority queue with both-end access
///
/// Items are ordered by their `Ord` implementation; the "priority" is the
/// item itself (wrap data in a struct whose ordering is its priority to get
/// the usual pairing). Ties are real: items comparing equal are removed
/// together by [`delete_all_max`](PriorityQueue::delete_all_max).
#[derive(Debug, Clone)]
pub struct PriorityQueue<T: Ord> {
    items: MaxHeap<T>,
}

impl<T: Ord> PriorityQueue<T> {
    /// Creates an empty queue holding at most `capacity` items
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: MaxHeap::with_capacity(capacity),
        }
    }

    /// Returns the fixed capacity set at construction
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Inserts an item
    ///
    /// # Errors
    /// [`ContainerError::Full`] when the queue is at capacity.
    pub fn insert(&mut self, item: T) -> Result<(), ContainerError> {
        self.items.insert(item)
    }

    /// Returns the highest-priority item
    ///
    /// # Errors
    /// [`ContainerError::Empty`] when the queue is empty.
    pub fn max_item(&self) -> Result<&T, ContainerError> {
        if self.is_empty() {
            return Err(ContainerError::Empty);
        }
        self.items.item_at(1)
    }

    /// Removes and returns the highest-priority item
    ///
    /// # Errors
    /// [`ContainerError::Empty`] when the queue is empty.
    pub fn delete_max(&mut self) -> Result<T, ContainerError> {
        if self.is_empty() {
            return Err(ContainerError::Empty);
        }
        self.items.delete_at(1)
    }

    /// Removes the maximum and every item comparing equal to it
    ///
    /// Equality here is the ordering function saying `Equal`, so items that
    /// differ in payload but tie in priority leave together.
    ///
    /// # Errors
    /// [`ContainerError::Empty`] when the queue is empty.
    pub fn delete_all_max(&mut self) -> Result<(), ContainerError> {
        let top = self.delete_max()?;
        while !self.is_empty() {
            if self.items.item_at(1)?.cmp(&top) != std::cmp::Ordering::Equal {
                break;
            }
            self.items.delete_at(1)?;
        }
        Ok(())
    }

    /// Returns the lowest-priority item, found by a linear scan
    ///
    /// # Errors
    /// [`ContainerError::Empty`] when the queue is empty.
    pub fn min_item(&self) -> Result<&T, ContainerError> {
        self.items.item_at(self.min_position()?)
    }

    /// Removes and returns the lowest-priority item
    ///
    /// # Errors
    /// [`ContainerError::Empty`] when the queue is empty.
    pub fn delete_min(&mut self) -> Result<T, ContainerError> {
        let pos = self.min_position()?;
        self.items.delete_at(pos)
    }

    /// Scans all live positions for the minimum, returning its position
    fn min_position(&self) -> Result<usize, ContainerError> {
        let mut it = self.items.iterator();
        it.go_first()?;
        let mut best_pos = it.position();
        let mut best = it.item()?;
        while !it.after() {
            let candidate = it.item()?;
            if candidate < best {
                best = candidate;
                best_pos = it.position();
            }
            it.go_forth()?;
        }
        Ok(best_pos)
    }
}

impl<T: Ord> Container for PriorityQueue<T> {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn is_full(&self) -> bool {
        self.items.is_full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An item carrying a payload, compared only by its numeric priority
    #[derive(Debug, Clone)]
    struct Task {
        priority: u32,
        name: &'static str,
    }

    impl Task {
        fn new(name: &'static str, priority: u32) -> Self {
            Self { priority, name }
        }
    }

    impl PartialEq for Task {
        fn eq(&self, other: &Self) -> bool {
            self.priority == other.priority
        }
    }

    impl Eq for Task {}

    impl PartialOrd for Task {
        fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for Task {
        fn cmp(&self, other: &Self) -> std::cmp::Ordering {
            self.priority.cmp(&other.priority)
        }
    }

    #[test]
    fn test_max_and_min_access() {
        let mut queue = PriorityQueue::with_capacity(5);
        queue.insert(Task::new("sing", 50)).unwrap();
        queue.insert(Task::new("fly", 50)).unwrap();
        queue.insert(Task::new("dance", 30)).unwrap();
        queue.insert(Task::new("jump", 70)).unwrap();
        queue.insert(Task::new("eat", 100)).unwrap();

        assert_eq!(queue.max_item().unwrap().name, "eat");
        assert_eq!(queue.min_item().unwrap().name, "dance");
        assert!(queue.is_full());
        assert_eq!(
            queue.insert(Task::new("sleep", 10)),
            Err(ContainerError::Full)
        );
    }

    #[test]
    fn test_delete_all_max_takes_ties() {
        let mut queue = PriorityQueue::with_capacity(6);
        queue.insert(Task::new("sing", 50)).unwrap();
        queue.insert(Task::new("fly", 50)).unwrap();
        queue.insert(Task::new("dance", 30)).unwrap();

        queue.delete_all_max().unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.max_item().unwrap().name, "dance");
    }

    #[test]
    fn test_delete_min_leaves_heap_usable() {
        let mut queue = PriorityQueue::with_capacity(8);
        for p in [6, 2, 9, 4, 7, 1] {
            queue.insert(Task::new("t", p)).unwrap();
        }
        assert_eq!(queue.delete_min().unwrap().priority, 1);
        assert_eq!(queue.delete_min().unwrap().priority, 2);
        assert_eq!(queue.delete_max().unwrap().priority, 9);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_empty_queue_errors() {
        let mut queue: PriorityQueue<i32> = PriorityQueue::with_capacity(3);
        assert_eq!(queue.max_item(), Err(ContainerError::Empty));
        assert_eq!(queue.min_item(), Err(ContainerError::Empty));
        assert_eq!(queue.delete_max(), Err(ContainerError::Empty));
        assert_eq!(queue.delete_min(), Err(ContainerError::Empty));
        assert_eq!(queue.delete_all_max(), Err(ContainerError::Empty));
    }

    #[test]
    fn test_single_item_round_trip() {
        let mut queue = PriorityQueue::with_capacity(1);
        queue.insert(42).unwrap();
        assert_eq!(queue.max_item().unwrap(), &42);
        assert_eq!(queue.min_item().unwrap(), &42);
        assert_eq!(queue.delete_min().unwrap(), 42);
        assert!(queue.is_empty());
    }
}
