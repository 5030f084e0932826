//! 2-3 tree with threaded leaves and a keyed linear cursor
//!
//! A balanced search tree in which data lives only at the leaves. Internal
//! nodes carry one or two routing keys and two or three children; every
//! leaf sits at the same depth. The leaves are additionally threaded into a
//! doubly-linked list in ascending key order, so the tree supports O(1)
//! steps between neighbouring items and O(1) access to the smallest and
//! largest.
//!
//! Nodes are stored in a slot-map arena. Leaf links, the root, and the
//! cursor are arena keys rather than owning pointers, which keeps the
//! linked leaf list and the tree structure from fighting over ownership. A
//! key left dangling by a deletion simply fails lookup (the arena versions
//! its keys), so a stale cursor reports
//! [`ContainerError::NoCurrentItem`] instead of reaching freed state.
//!
//! The tree is its own iterator: it keeps a (cursor, prev) pair of leaf
//! references and implements [`LinearCursor`] directly, with the keyed
//! operations ([`search`](TwoThreeTree::search),
//! [`search_ceiling_of`](TwoThreeTree::search_ceiling_of),
//! [`set_item`](TwoThreeTree::set_item),
//! [`delete_item`](TwoThreeTree::delete_item)) layered on top.
//!
//! # Time Complexity
//!
//! | Operation           | Complexity |
//! |---------------------|------------|
//! | `insert`            | O(log n)   |
//! | `delete`            | O(log n)   |
//! | `has` / `search`    | O(log n)   |
//! | `go_forth`          | O(1)       |
//! | `search_ceiling_of` | O(n)       |
//!
//! # Example
//!
//! ```rust
//! use cursor_collections::{Cursored, Keyed, LinearCursor, TwoThreeTree};
//!
//! #[derive(Debug)]
//! struct Score(u32);
//!
//! impl Keyed for Score {
//!     type Key = u32;
//!     fn key(&self) -> &u32 {
//!         &self.0
//!     }
//! }
//!
//! let mut tree = TwoThreeTree::new();
//! for v in [10, 5, 15] {
//!     tree.insert(Score(v))?;
//! }
//!
//! tree.go_first()?;
//! assert_eq!(tree.item_key()?, &5);
//! tree.go_forth()?;
//! assert_eq!(tree.item_key()?, &10);
//! # Ok::<(), cursor_collections::ContainerError>(())
//! ```

use slotmap::{new_key_type, SlotMap};
use smallvec::{smallvec, SmallVec};

use crate::traits::{Container, ContainerError, Cursored, Keyed, LinearCursor};

new_key_type! {
    /// Arena key for 2-3 tree nodes
    struct NodeKey;
}

/// A tree node: either a data-carrying leaf or a routing-only interior node
#[derive(Debug)]
enum Node<K, I> {
    Leaf(LeafNode<I>),
    Internal(InternalNode<K>),
}

#[derive(Debug)]
struct LeafNode<I> {
    item: I,
    prev: Option<NodeKey>,
    next: Option<NodeKey>,
}

/// Interior node holding 1-2 separator keys and 2-3 children
///
/// The inline capacities leave room for the transient fourth child and
/// third key that exist mid-split, so splitting never spills to the heap.
#[derive(Debug)]
struct InternalNode<K> {
    keys: SmallVec<[K; 3]>,
    children: SmallVec<[NodeKey; 4]>,
}

/// A 2-3 tree whose leaves form a sorted doubly-linked list
///
/// Items must implement [`Keyed`]; all ordering, lookup, and duplicate
/// detection go through the key the item exposes. Separator keys in
/// interior nodes are clones of item keys and are used only for routing.
#[derive(Debug)]
pub struct TwoThreeTree<I: Keyed> {
    nodes: SlotMap<NodeKey, Node<I::Key, I>>,
    root: Option<NodeKey>,
    /// First leaf in key order
    smallest: Option<NodeKey>,
    /// Last leaf in key order
    largest: Option<NodeKey>,
    cursor: Option<NodeKey>,
    /// The leaf before the cursor; meaningful when the cursor is nil to
    /// distinguish the before and after states
    prev: Option<NodeKey>,
    len: usize,
}

impl<I: Keyed> TwoThreeTree<I> {
    /// Creates an empty tree
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
            smallest: None,
            largest: None,
            cursor: None,
            prev: None,
            len: 0,
        }
    }

    /// Returns true if an item with this key is present
    pub fn has(&self, key: &I::Key) -> bool {
        self.find(key).is_some()
    }

    /// Inserts an item, keyed by what its [`Keyed`] impl exposes
    ///
    /// Inserting never disturbs the cursor.
    ///
    /// # Errors
    /// [`ContainerError::DuplicateKey`] when the key is already present.
    pub fn insert(&mut self, item: I) -> Result<(), ContainerError> {
        if self.has(item.key()) {
            return Err(ContainerError::DuplicateKey);
        }
        match self.root {
            None => {
                let leaf = self.new_leaf(item);
                self.root = Some(leaf);
                self.smallest = Some(leaf);
                self.largest = Some(leaf);
            }
            Some(root) if !self.is_internal(root) => {
                // Second item overall: grow the first interior node over
                // the two leaves.
                let item_first = item.key() < self.leaf(root).item.key();
                let new_leaf = self.new_leaf(item);
                let (first, second) = if item_first {
                    (new_leaf, root)
                } else {
                    (root, new_leaf)
                };
                self.leaf_mut(first).next = Some(second);
                self.leaf_mut(second).prev = Some(first);
                let separator = self.leaf(second).item.key().clone();
                let new_root = self.nodes.insert(Node::Internal(InternalNode {
                    keys: smallvec![separator],
                    children: smallvec![first, second],
                }));
                self.root = Some(new_root);
                self.smallest = Some(first);
                self.largest = Some(second);
            }
            Some(root) => {
                if let Some((extra, promoted)) = self.insert_below(root, item) {
                    let new_root = self.nodes.insert(Node::Internal(InternalNode {
                        keys: smallvec![promoted],
                        children: smallvec![root, extra],
                    }));
                    self.root = Some(new_root);
                }
            }
        }
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the item with this key, if present
    ///
    /// Deleting the cursor's leaf leaves the cursor stale; it then fails
    /// with [`ContainerError::NoCurrentItem`] until repositioned.
    pub fn delete(&mut self, key: &I::Key) -> Option<I> {
        let root = self.root?;
        if !self.is_internal(root) {
            if self.leaf(root).item.key() != key {
                return None;
            }
            self.root = None;
            self.smallest = None;
            self.largest = None;
            self.len = 0;
            return Some(self.take_leaf(root).item);
        }
        let removed = self.delete_below(root, key)?;
        self.len -= 1;
        if self.internal(root).children.len() == 1 {
            let only = self.internal(root).children[0];
            self.nodes.remove(root);
            self.root = Some(only);
            if !self.is_internal(only) {
                self.smallest = Some(only);
                self.largest = Some(only);
            }
        }
        Some(removed)
    }

    /// Returns the key of the item at the cursor
    ///
    /// # Errors
    /// [`ContainerError::NoCurrentItem`] when the cursor denotes no leaf.
    pub fn item_key(&self) -> Result<&I::Key, ContainerError> {
        Ok(self.current_leaf()?.item.key())
    }

    /// Returns the key and item at the cursor as a pair
    ///
    /// # Errors
    /// [`ContainerError::NoCurrentItem`] when the cursor denotes no leaf.
    pub fn key_item_pair(&self) -> Result<(&I::Key, &I), ContainerError> {
        let leaf = self.current_leaf()?;
        Ok((leaf.item.key(), &leaf.item))
    }

    /// Positions the cursor at the leaf holding `key`
    ///
    /// A successful search sets `prev` to the found leaf's list
    /// predecessor; a miss leaves the cursor in the after position.
    pub fn search(&mut self, key: &I::Key) {
        match self.find(key) {
            Some(leaf) => {
                self.prev = self.leaf(leaf).prev;
                self.cursor = Some(leaf);
            }
            None => self.go_after(),
        }
    }

    /// Positions the cursor at the first item whose key is >= `key`
    ///
    /// Scans forward from the first leaf; lands in the after position when
    /// every key is smaller. Does nothing on an empty tree.
    pub fn search_ceiling_of(&mut self, key: &I::Key) {
        if self.is_empty() {
            return;
        }
        let mut cur = self.smallest;
        let mut prev = None;
        while let Some(leaf) = cur {
            if self.leaf(leaf).item.key() >= key {
                break;
            }
            prev = cur;
            cur = self.leaf(leaf).next;
        }
        self.cursor = cur;
        self.prev = prev;
    }

    /// Replaces the item at the cursor with one carrying the same key
    ///
    /// # Errors
    /// [`ContainerError::NoCurrentItem`] when the cursor denotes no leaf;
    /// [`ContainerError::InvalidArgument`] when the keys differ.
    pub fn set_item(&mut self, item: I) -> Result<(), ContainerError> {
        let cursor = self.cursor.ok_or(ContainerError::NoCurrentItem)?;
        match self.nodes.get_mut(cursor) {
            Some(Node::Leaf(leaf)) => {
                if leaf.item.key() != item.key() {
                    return Err(ContainerError::InvalidArgument(
                        "replacement item must carry the current key",
                    ));
                }
                leaf.item = item;
                Ok(())
            }
            _ => Err(ContainerError::NoCurrentItem),
        }
    }

    /// Removes and returns the item at the cursor, then moves the cursor to
    /// that item's successor
    ///
    /// # Errors
    /// [`ContainerError::NoCurrentItem`] when the cursor denotes no leaf.
    pub fn delete_item(&mut self) -> Result<I, ContainerError> {
        let (successor, predecessor, key) = {
            let leaf = self.current_leaf()?;
            (leaf.next, leaf.prev, leaf.item.key().clone())
        };
        let removed = self.delete(&key).ok_or(ContainerError::NoCurrentItem)?;
        self.cursor = successor;
        self.prev = predecessor;
        Ok(removed)
    }

    /// Iterates the items in ascending key order
    ///
    /// The iterator walks the leaf list, so it is double-ended.
    pub fn iter(&self) -> Iter<'_, I> {
        Iter {
            tree: self,
            front: self.smallest,
            back: self.largest,
        }
    }

    // ==================== Tree Machinery ====================

    /// Descends to the leaf that would hold `key`, demanding an exact match
    fn find(&self, key: &I::Key) -> Option<NodeKey> {
        let mut node = self.root?;
        loop {
            match &self.nodes[node] {
                Node::Leaf(leaf) => return (leaf.item.key() == key).then_some(node),
                Node::Internal(int) => {
                    node = int.children[Self::branch_of(int, key)];
                }
            }
        }
    }

    /// Chooses which child of an interior node covers `key`
    fn branch_of(int: &InternalNode<I::Key>, key: &I::Key) -> usize {
        if key < &int.keys[0] {
            0
        } else if int.children.len() < 3 || key < &int.keys[1] {
            1
        } else {
            2
        }
    }

    /// Recursive insert below an interior node
    ///
    /// Returns the (new node, promoted key) pair when the child level
    /// overflowed and handed a split upward.
    fn insert_below(&mut self, node: NodeKey, item: I) -> Option<(NodeKey, I::Key)> {
        let branch = Self::branch_of(self.internal(node), item.key());
        let child = self.internal(node).children[branch];
        let extra = if self.is_internal(child) {
            self.insert_below(child, item)
        } else {
            Some(self.insert_at_leaf(child, item))
        };
        let (extra_node, promoted) = extra?;
        self.absorb_or_split(node, branch, extra_node, promoted)
    }

    /// Splits a new item against an existing leaf
    ///
    /// The existing leaf node keeps whichever item has the smaller key, so
    /// inserting before the first leaf never rewires `smallest`. The new
    /// leaf always splices in immediately after the existing one.
    fn insert_at_leaf(&mut self, leaf: NodeKey, item: I) -> (NodeKey, I::Key) {
        let displaced = if item.key() < self.leaf(leaf).item.key() {
            std::mem::replace(&mut self.leaf_mut(leaf).item, item)
        } else {
            item
        };
        let separator = displaced.key().clone();
        let new_leaf = self.new_leaf(displaced);
        self.splice_after(leaf, new_leaf);
        (new_leaf, separator)
    }

    /// Hands a freshly split-off child to its parent
    ///
    /// A 2-child parent absorbs the extra child; a 3-child parent splits in
    /// two and promotes its middle separator further up.
    fn absorb_or_split(
        &mut self,
        node: NodeKey,
        branch: usize,
        extra: NodeKey,
        promoted: I::Key,
    ) -> Option<(NodeKey, I::Key)> {
        let (spill_keys, spill_children, promote) = {
            let int = self.internal_mut(node);
            int.children.insert(branch + 1, extra);
            int.keys.insert(branch, promoted);
            if int.children.len() <= 3 {
                return None;
            }
            let spill_children: SmallVec<[NodeKey; 4]> = int.children.drain(2..).collect();
            let promote = int.keys.remove(1);
            let spill_keys: SmallVec<[I::Key; 3]> = int.keys.drain(1..).collect();
            (spill_keys, spill_children, promote)
        };
        let sibling = self.nodes.insert(Node::Internal(InternalNode {
            keys: spill_keys,
            children: spill_children,
        }));
        Some((sibling, promote))
    }

    /// Recursive delete below an interior node
    ///
    /// Returns the removed item; `None` when the key is absent. On the way
    /// back up, a child left with a single child is repaired in place.
    fn delete_below(&mut self, node: NodeKey, key: &I::Key) -> Option<I> {
        let branch = Self::branch_of(self.internal(node), key);
        let child = self.internal(node).children[branch];
        if self.is_internal(child) {
            let removed = self.delete_below(child, key)?;
            if self.internal(child).children.len() < 2 {
                self.repair_underflow(node, branch);
            }
            Some(removed)
        } else {
            if self.leaf(child).item.key() != key {
                return None;
            }
            self.unlink_leaf(child);
            let removed = self.take_leaf(child).item;
            let int = self.internal_mut(node);
            int.children.remove(branch);
            int.keys.remove(branch.saturating_sub(1));
            Some(removed)
        }
    }

    /// Repairs a child that deletion left with one child and no keys
    ///
    /// The repairs are tried in strict priority order: steal from the left
    /// sibling, steal from the right sibling, merge into the left sibling,
    /// merge into the right sibling.
    fn repair_underflow(&mut self, parent: NodeKey, branch: usize) {
        let left_sibling = if branch > 0 {
            Some(self.internal(parent).children[branch - 1])
        } else {
            None
        };
        let right_sibling = {
            let int = self.internal(parent);
            (branch + 1 < int.children.len()).then(|| int.children[branch + 1])
        };

        if let Some(left) = left_sibling {
            if self.internal(left).children.len() == 3 {
                self.steal_left(parent, branch);
                return;
            }
        }
        if let Some(right) = right_sibling {
            if self.internal(right).children.len() == 3 {
                self.steal_right(parent, branch);
                return;
            }
        }
        if left_sibling.is_some() {
            self.merge_left(parent, branch);
            return;
        }
        if right_sibling.is_some() {
            self.merge_right(parent, branch);
            return;
        }
        unreachable!("an underflowing 2-3 node always has a sibling");
    }

    /// Takes the left sibling's last child through the shared parent
    fn steal_left(&mut self, parent: NodeKey, branch: usize) {
        let left = self.internal(parent).children[branch - 1];
        let child = self.internal(parent).children[branch];
        let (moved_child, moved_key) = {
            let donor = self.internal_mut(left);
            (donor.children.remove(2), donor.keys.remove(1))
        };
        let separator =
            std::mem::replace(&mut self.internal_mut(parent).keys[branch - 1], moved_key);
        let taker = self.internal_mut(child);
        taker.children.insert(0, moved_child);
        taker.keys.insert(0, separator);
    }

    /// Takes the right sibling's first child through the shared parent
    fn steal_right(&mut self, parent: NodeKey, branch: usize) {
        let right = self.internal(parent).children[branch + 1];
        let child = self.internal(parent).children[branch];
        let (moved_child, moved_key) = {
            let donor = self.internal_mut(right);
            (donor.children.remove(0), donor.keys.remove(0))
        };
        let separator = std::mem::replace(&mut self.internal_mut(parent).keys[branch], moved_key);
        let taker = self.internal_mut(child);
        taker.children.push(moved_child);
        taker.keys.push(separator);
    }

    /// Folds the underflowing child into its left sibling
    fn merge_left(&mut self, parent: NodeKey, branch: usize) {
        let left = self.internal(parent).children[branch - 1];
        let (orphan, separator) = {
            let int = self.internal_mut(parent);
            let orphan = int.children.remove(branch);
            let separator = int.keys.remove(branch - 1);
            (orphan, separator)
        };
        let only = self.take_only_child(orphan);
        let target = self.internal_mut(left);
        target.keys.push(separator);
        target.children.push(only);
    }

    /// Folds the underflowing child into its right sibling
    fn merge_right(&mut self, parent: NodeKey, branch: usize) {
        let right = self.internal(parent).children[branch + 1];
        let (orphan, separator) = {
            let int = self.internal_mut(parent);
            let orphan = int.children.remove(branch);
            let separator = int.keys.remove(branch);
            (orphan, separator)
        };
        let only = self.take_only_child(orphan);
        let target = self.internal_mut(right);
        target.keys.insert(0, separator);
        target.children.insert(0, only);
    }

    // ==================== Leaf List Plumbing ====================

    fn new_leaf(&mut self, item: I) -> NodeKey {
        self.nodes.insert(Node::Leaf(LeafNode {
            item,
            prev: None,
            next: None,
        }))
    }

    /// Splices `new_leaf` into the list immediately after `existing`
    fn splice_after(&mut self, existing: NodeKey, new_leaf: NodeKey) {
        let old_next = self.leaf(existing).next;
        {
            let leaf = self.leaf_mut(new_leaf);
            leaf.prev = Some(existing);
            leaf.next = old_next;
        }
        self.leaf_mut(existing).next = Some(new_leaf);
        match old_next {
            Some(next) => self.leaf_mut(next).prev = Some(new_leaf),
            None => self.largest = Some(new_leaf),
        }
    }

    /// Unlinks a leaf from the list, updating the boundary references
    fn unlink_leaf(&mut self, leaf: NodeKey) {
        let (prev, next) = {
            let leaf = self.leaf(leaf);
            (leaf.prev, leaf.next)
        };
        match prev {
            Some(p) => self.leaf_mut(p).next = next,
            None => self.smallest = next,
        }
        match next {
            Some(n) => self.leaf_mut(n).prev = prev,
            None => self.largest = prev,
        }
    }

    // ==================== Arena Accessors ====================

    fn is_internal(&self, node: NodeKey) -> bool {
        matches!(self.nodes[node], Node::Internal(_))
    }

    fn leaf(&self, node: NodeKey) -> &LeafNode<I> {
        match &self.nodes[node] {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => unreachable!("expected a leaf node"),
        }
    }

    fn leaf_mut(&mut self, node: NodeKey) -> &mut LeafNode<I> {
        match &mut self.nodes[node] {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => unreachable!("expected a leaf node"),
        }
    }

    fn internal(&self, node: NodeKey) -> &InternalNode<I::Key> {
        match &self.nodes[node] {
            Node::Internal(int) => int,
            Node::Leaf(_) => unreachable!("expected an interior node"),
        }
    }

    fn internal_mut(&mut self, node: NodeKey) -> &mut InternalNode<I::Key> {
        match &mut self.nodes[node] {
            Node::Internal(int) => int,
            Node::Leaf(_) => unreachable!("expected an interior node"),
        }
    }

    /// Removes a leaf from the arena, returning its contents
    fn take_leaf(&mut self, node: NodeKey) -> LeafNode<I> {
        match self.nodes.remove(node) {
            Some(Node::Leaf(leaf)) => leaf,
            _ => unreachable!("expected a live leaf node"),
        }
    }

    /// Removes an underflowed interior node, returning its single child
    fn take_only_child(&mut self, node: NodeKey) -> NodeKey {
        match self.nodes.remove(node) {
            Some(Node::Internal(int)) => int.children[0],
            _ => unreachable!("expected a live interior node"),
        }
    }

    fn current_leaf(&self) -> Result<&LeafNode<I>, ContainerError> {
        let cursor = self.cursor.ok_or(ContainerError::NoCurrentItem)?;
        match self.nodes.get(cursor) {
            Some(Node::Leaf(leaf)) => Ok(leaf),
            _ => Err(ContainerError::NoCurrentItem),
        }
    }
}

impl<I: Keyed> Default for TwoThreeTree<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Keyed> Container for TwoThreeTree<I> {
    fn len(&self) -> usize {
        self.len
    }

    fn is_full(&self) -> bool {
        false
    }
}

impl<I: Keyed> Cursored for TwoThreeTree<I> {
    type Item = I;

    fn item_exists(&self) -> bool {
        self.current_leaf().is_ok()
    }

    fn item(&self) -> Result<&I, ContainerError> {
        Ok(&self.current_leaf()?.item)
    }
}

impl<I: Keyed> LinearCursor for TwoThreeTree<I> {
    fn before(&self) -> bool {
        self.cursor.is_none() && self.prev.is_none()
    }

    fn after(&self) -> bool {
        self.is_empty() || (self.cursor.is_none() && self.prev.is_some())
    }

    fn go_first(&mut self) -> Result<(), ContainerError> {
        if self.is_empty() {
            return Err(ContainerError::Empty);
        }
        self.prev = None;
        self.cursor = self.smallest;
        Ok(())
    }

    fn go_forth(&mut self) -> Result<(), ContainerError> {
        if self.after() {
            return Err(ContainerError::AfterTheEnd);
        }
        if self.before() {
            return self.go_first();
        }
        let next = self.current_leaf()?.next;
        self.prev = self.cursor;
        self.cursor = next;
        Ok(())
    }

    fn go_before(&mut self) {
        self.cursor = None;
        self.prev = None;
    }

    fn go_after(&mut self) {
        self.cursor = None;
        self.prev = self.largest;
    }
}

/// Double-ended iterator over a tree's items in key order
pub struct Iter<'a, I: Keyed> {
    tree: &'a TwoThreeTree<I>,
    front: Option<NodeKey>,
    back: Option<NodeKey>,
}

impl<I: Keyed + std::fmt::Debug> std::fmt::Debug for Iter<'_, I>
where
    I::Key: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Iter")
            .field("tree", &self.tree)
            .field("front", &self.front)
            .field("back", &self.back)
            .finish()
    }
}

impl<'a, I: Keyed> Iterator for Iter<'a, I> {
    type Item = &'a I;

    fn next(&mut self) -> Option<&'a I> {
        let key = self.front?;
        let leaf = self.tree.leaf(key);
        if self.back == Some(key) {
            self.front = None;
            self.back = None;
        } else {
            self.front = leaf.next;
        }
        Some(&leaf.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.tree.len))
    }
}

impl<'a, I: Keyed> DoubleEndedIterator for Iter<'a, I> {
    fn next_back(&mut self) -> Option<&'a I> {
        let key = self.back?;
        let leaf = self.tree.leaf(key);
        if self.front == Some(key) {
            self.front = None;
            self.back = None;
        } else {
            self.back = leaf.prev;
        }
        Some(&leaf.item)
    }
}
