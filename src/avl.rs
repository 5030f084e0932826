//! AVL tree with a path-based search cursor
//!
//! A recursive binary search tree that keeps itself height-balanced: after
//! every insert or delete, any node whose subtree heights differ by two is
//! repaired with one or two rotations. Heights are cached per node and
//! updated on the unwind, so rebalancing never rescans subtrees.
//!
//! Duplicates are allowed; an item equal to an existing one descends into
//! the right subtree.
//!
//! The tree carries a search cursor recorded as the comparison path from
//! the root. Any structural mutation invalidates the cursor, after which
//! cursor-relative operations fail with
//! [`ContainerError::NoCurrentItem`] instead of touching stale state.
//!
//! # Time Complexity
//!
//! | Operation     | Complexity |
//! |---------------|------------|
//! | `insert`      | O(log n)   |
//! | `delete`      | O(log n)   |
//! | `has`/`search`| O(log n)   |
//! | `item`        | O(log n)   |
//! | `delete_item` | O(log n)   |

use std::cmp::Ordering;

use crate::traits::{Container, ContainerError, Cursored};

type Link<T> = Option<Box<AvlNode<T>>>;

#[derive(Debug, Clone)]
struct AvlNode<T> {
    item: T,
    height: u32,
    left: Link<T>,
    right: Link<T>,
}

impl<T> AvlNode<T> {
    fn new(item: T) -> Self {
        Self {
            item,
            height: 1,
            left: None,
            right: None,
        }
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// Positive when left-heavy, negative when right-heavy
    fn balance_factor(&self) -> i32 {
        height(&self.left) as i32 - height(&self.right) as i32
    }
}

fn height<T>(link: &Link<T>) -> u32 {
    link.as_ref().map_or(0, |node| node.height)
}

/// One step of a root-to-node comparison path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// A self-balancing binary search tree
///
/// # Example
///
/// ```rust
/// use cursor_collections::{AvlTree, Container, Cursored};
///
/// let mut tree = AvlTree::new();
/// for x in [50, 30, 70, 20, 40] {
///     tree.insert(x);
/// }
/// assert!(tree.has(&40));
///
/// tree.search(&30);
/// assert_eq!(tree.item()?, &30);
/// assert_eq!(tree.delete_item()?, 30);
/// assert!(!tree.has(&30));
/// # Ok::<(), cursor_collections::ContainerError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AvlTree<T: Ord> {
    root: Link<T>,
    len: usize,
    /// Comparison path to the current item; cleared by every mutation
    cursor: Option<Vec<Side>>,
}

impl<T: Ord> AvlTree<T> {
    /// Creates an empty tree
    pub fn new() -> Self {
        Self {
            root: None,
            len: 0,
            cursor: None,
        }
    }

    /// Returns the height of the tree (0 when empty)
    pub fn height(&self) -> u32 {
        height(&self.root)
    }

    /// Inserts an item, keeping the tree balanced
    pub fn insert(&mut self, item: T) {
        self.cursor = None;
        Self::insert_into(&mut self.root, item);
        self.len += 1;
    }

    /// Returns true if an item equal to `target` is present
    pub fn has(&self, target: &T) -> bool {
        let mut link = &self.root;
        while let Some(node) = link {
            match target.cmp(&node.item) {
                Ordering::Equal => return true,
                Ordering::Less => link = &node.left,
                Ordering::Greater => link = &node.right,
            }
        }
        false
    }

    /// Positions the cursor at an item equal to `target`
    ///
    /// On a miss the cursor is cleared, so `item_exists()` reports whether
    /// the search succeeded.
    pub fn search(&mut self, target: &T) {
        let mut path = Vec::new();
        let mut link = &self.root;
        while let Some(node) = link {
            match target.cmp(&node.item) {
                Ordering::Equal => {
                    self.cursor = Some(path);
                    return;
                }
                Ordering::Less => {
                    path.push(Side::Left);
                    link = &node.left;
                }
                Ordering::Greater => {
                    path.push(Side::Right);
                    link = &node.right;
                }
            }
        }
        self.cursor = None;
    }

    /// Removes and returns the item at the cursor
    ///
    /// # Errors
    /// [`ContainerError::NoCurrentItem`] when the cursor denotes no item.
    pub fn delete_item(&mut self) -> Result<T, ContainerError> {
        let path = self.cursor.take().ok_or(ContainerError::NoCurrentItem)?;
        let removed = Self::delete_at_path(&mut self.root, &path);
        self.len -= 1;
        Ok(removed)
    }

    /// Removes and returns one item equal to `target`, if present
    pub fn delete(&mut self, target: &T) -> Option<T> {
        let removed = Self::delete_from(&mut self.root, target);
        if removed.is_some() {
            self.cursor = None;
            self.len -= 1;
        }
        removed
    }

    fn insert_into(link: &mut Link<T>, item: T) {
        let Some(node) = link else {
            *link = Some(Box::new(AvlNode::new(item)));
            return;
        };
        if item < node.item {
            Self::insert_into(&mut node.left, item);
        } else {
            Self::insert_into(&mut node.right, item);
        }
        Self::rebalance(link);
    }

    fn delete_from(link: &mut Link<T>, target: &T) -> Option<T> {
        let node = link.as_mut()?;
        let removed = match target.cmp(&node.item) {
            Ordering::Less => Self::delete_from(&mut node.left, target),
            Ordering::Greater => Self::delete_from(&mut node.right, target),
            Ordering::Equal => return Some(Self::splice(link)),
        };
        Self::rebalance(link);
        removed
    }

    fn delete_at_path(link: &mut Link<T>, path: &[Side]) -> T {
        let Some((side, rest)) = path.split_first() else {
            return Self::splice(link);
        };
        let node = link
            .as_mut()
            .expect("cursor paths are cleared before they can go stale");
        let removed = match side {
            Side::Left => Self::delete_at_path(&mut node.left, rest),
            Side::Right => Self::delete_at_path(&mut node.right, rest),
        };
        Self::rebalance(link);
        removed
    }

    /// Removes the node at `link`, wiring its subtrees back into the tree
    fn splice(link: &mut Link<T>) -> T {
        let node = link.as_mut().expect("splice target exists");
        let removed = if node.left.is_none() {
            let right = node.right.take();
            let old = std::mem::replace(link, right);
            old.expect("splice target exists").item
        } else if node.right.is_none() {
            let left = node.left.take();
            let old = std::mem::replace(link, left);
            old.expect("splice target exists").item
        } else {
            // Two children: the in-order successor replaces this item, so
            // equal keys (which insert sends right) keep their order.
            let successor = Self::delete_min(&mut node.right);
            std::mem::replace(&mut node.item, successor)
        };
        Self::rebalance(link);
        removed
    }

    /// Removes and returns the smallest item of a non-empty subtree
    fn delete_min(link: &mut Link<T>) -> T {
        let node = link.as_mut().expect("subtree is non-empty");
        if node.left.is_some() {
            let item = Self::delete_min(&mut node.left);
            Self::rebalance(link);
            item
        } else {
            let right = node.right.take();
            let old = std::mem::replace(link, right);
            old.expect("subtree is non-empty").item
        }
    }

    /// Repairs the balance at `link` after a child subtree changed height
    fn rebalance(link: &mut Link<T>) {
        let Some(node) = link.as_mut() else {
            return;
        };
        node.update_height();
        match node.balance_factor() {
            2 => {
                // A right-heavy left child needs the double rotation.
                if node.left.as_ref().map_or(0, |l| l.balance_factor()) < 0 {
                    Self::rotate_left(node.left.as_mut().expect("left child exists"));
                }
                Self::rotate_right(node);
            }
            -2 => {
                if node.right.as_ref().map_or(0, |r| r.balance_factor()) > 0 {
                    Self::rotate_right(node.right.as_mut().expect("right child exists"));
                }
                Self::rotate_left(node);
            }
            _ => {}
        }
    }

    fn rotate_right(node: &mut Box<AvlNode<T>>) {
        let mut pivot = node.left.take().expect("rotation requires a left child");
        node.left = pivot.right.take();
        node.update_height();
        std::mem::swap(node, &mut pivot);
        // `node` is now the old left child; `pivot` is the old root.
        node.right = Some(pivot);
        node.update_height();
    }

    fn rotate_left(node: &mut Box<AvlNode<T>>) {
        let mut pivot = node.right.take().expect("rotation requires a right child");
        node.right = pivot.left.take();
        node.update_height();
        std::mem::swap(node, &mut pivot);
        node.left = Some(pivot);
        node.update_height();
    }

    /// Walks the cursor path down from the root
    fn node_at_path(&self, path: &[Side]) -> Result<&AvlNode<T>, ContainerError> {
        let mut link = &self.root;
        for side in path {
            let node = link.as_ref().ok_or(ContainerError::NoCurrentItem)?;
            link = match side {
                Side::Left => &node.left,
                Side::Right => &node.right,
            };
        }
        link.as_deref().ok_or(ContainerError::NoCurrentItem)
    }
}

impl<T: Ord> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Container for AvlTree<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn is_full(&self) -> bool {
        false
    }
}

impl<T: Ord> Cursored for AvlTree<T> {
    type Item = T;

    fn item_exists(&self) -> bool {
        self.cursor.is_some()
    }

    fn item(&self) -> Result<&T, ContainerError> {
        let path = self.cursor.as_ref().ok_or(ContainerError::NoCurrentItem)?;
        Ok(&self.node_at_path(path)?.item)
    }
}
