//! Disjoint sets over the element ids 1..=n
//!
//! A union-find structure with union by rank and path compression. Elements
//! are dense integer ids starting at 1, matching the 1-indexed convention
//! used elsewhere in this crate; id 0 is never a valid element.
//!
//! # Time Complexity
//!
//! | Operation   | Complexity              |
//! |-------------|-------------------------|
//! | `find`      | O(α(n)) amortized       |
//! | `union`     | O(α(n)) amortized       |
//! | `connected` | O(α(n)) amortized       |
//!
//! where α is the inverse Ackermann function, below 5 for any feasible n.
//!
//! # Example
//!
//! ```rust
//! use cursor_collections::union_find::UnionFind;
//!
//! let mut sets = UnionFind::new(5);
//! sets.union(1, 2)?;
//! sets.union(4, 5)?;
//! assert!(sets.connected(1, 2)?);
//! assert!(!sets.connected(2, 4)?);
//! # Ok::<(), cursor_collections::ContainerError>(())
//! ```

use crate::traits::ContainerError;

/// Disjoint sets of the integers 1..=n
///
/// Every element starts in its own singleton set. `union` joins two sets;
/// `find` names a set by its current representative. Representatives are
/// stable between unions but not across them.
#[derive(Debug, Clone)]
pub struct UnionFind {
    /// parent[i] == i marks a set representative; slot 0 is unused
    parent: Vec<usize>,
    /// Upper bound on the height of the tree rooted at each representative
    rank: Vec<u32>,
}

impl UnionFind {
    /// Creates n singleton sets for the elements 1..=n
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..=n).collect(),
            rank: vec![0; n + 1],
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.parent.len() - 1
    }

    /// True when the structure holds no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the representative of the set containing `id`
    ///
    /// Compresses the path it walks, so repeated finds flatten the tree.
    ///
    /// # Errors
    /// [`ContainerError::InvalidArgument`] when `id` is 0 or past n.
    pub fn find(&mut self, id: usize) -> Result<usize, ContainerError> {
        self.check(id)?;
        let root = self.root_of(id);
        // Second pass: point everything on the path straight at the root.
        let mut cur = id;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        Ok(root)
    }

    /// Joins the sets containing `a` and `b`
    ///
    /// A no-op when they are already in the same set. On a rank tie the
    /// first argument's representative wins.
    ///
    /// # Errors
    /// [`ContainerError::InvalidArgument`] when either id is out of range.
    pub fn union(&mut self, a: usize, b: usize) -> Result<(), ContainerError> {
        let ra = self.find(a)?;
        let rb = self.find(b)?;
        if ra == rb {
            return Ok(());
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        Ok(())
    }

    /// True when `a` and `b` are in the same set
    ///
    /// # Errors
    /// [`ContainerError::InvalidArgument`] when either id is out of range.
    pub fn connected(&mut self, a: usize, b: usize) -> Result<bool, ContainerError> {
        Ok(self.find(a)? == self.find(b)?)
    }

    fn check(&self, id: usize) -> Result<(), ContainerError> {
        if id == 0 || id >= self.parent.len() {
            return Err(ContainerError::InvalidArgument(
                "element id out of range",
            ));
        }
        Ok(())
    }

    fn root_of(&self, id: usize) -> usize {
        let mut cur = id;
        while self.parent[cur] != cur {
            cur = self.parent[cur];
        }
        cur
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons_start_disjoint() {
        let mut sets = UnionFind::new(4);
        assert_eq!(sets.len(), 4);
        for a in 1..=4 {
            for b in 1..=4 {
                assert_eq!(sets.connected(a, b).unwrap(), a == b);
            }
        }
    }

    #[test]
    fn test_union_merges_transitively() {
        let mut sets = UnionFind::new(6);
        sets.union(1, 2).unwrap();
        sets.union(3, 4).unwrap();
        sets.union(2, 3).unwrap();
        assert!(sets.connected(1, 4).unwrap());
        assert!(!sets.connected(1, 5).unwrap());
        assert!(!sets.connected(4, 6).unwrap());
    }

    #[test]
    fn test_union_is_idempotent() {
        let mut sets = UnionFind::new(3);
        sets.union(1, 2).unwrap();
        let rep = sets.find(1).unwrap();
        sets.union(2, 1).unwrap();
        assert_eq!(sets.find(1).unwrap(), rep);
        assert_eq!(sets.find(2).unwrap(), rep);
    }

    #[test]
    fn test_rank_tie_keeps_first_root() {
        let mut sets = UnionFind::new(2);
        // Both singletons have rank 0, so the first argument's root wins.
        sets.union(2, 1).unwrap();
        assert_eq!(sets.find(1).unwrap(), 2);
        assert_eq!(sets.find(2).unwrap(), 2);
    }

    #[test]
    fn test_path_compression_flattens() {
        let mut sets = UnionFind::new(8);
        for i in 1..8 {
            sets.union(1, i + 1).unwrap();
        }
        let root = sets.find(8).unwrap();
        // After the find, every element points directly at the root.
        for i in 1..=8 {
            assert_eq!(sets.find(i).unwrap(), root);
            assert_eq!(sets.parent[i], root);
        }
    }

    #[test]
    fn test_out_of_range_ids_fail() {
        let mut sets = UnionFind::new(3);
        assert!(matches!(
            sets.find(0),
            Err(ContainerError::InvalidArgument(_))
        ));
        assert!(matches!(
            sets.find(4),
            Err(ContainerError::InvalidArgument(_))
        ));
        assert!(matches!(
            sets.union(1, 9),
            Err(ContainerError::InvalidArgument(_))
        ));
        assert!(matches!(
            sets.connected(0, 1),
            Err(ContainerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_empty_structure() {
        let mut sets = UnionFind::new(0);
        assert!(sets.is_empty());
        assert!(matches!(
            sets.find(1),
            Err(ContainerError::InvalidArgument(_))
        ));
    }
}
