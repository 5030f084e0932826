//! k-dimensional tree for orthogonal range search
//!
//! A static spatial index over points with `f64` coordinates. The tree is
//! built once from a point set: each level splits on one coordinate axis in
//! rotation, placing the median point (found by quickselect, no full sort)
//! at the node, points at or below the median value to the left, and the
//! rest to the right. The result is balanced by construction, giving
//! O(log n) depth regardless of input order.
//!
//! The one query operation is [`range_search`](KdTree::range_search): all
//! points inside an axis-aligned box, bounds inclusive. Subtrees whose
//! splitting value falls outside the box on the splitting axis are pruned.
//!
//! Coordinates must be finite; NaN has no place in an ordered structure,
//! so builds and searches reject it up front.
//!
//! # Example
//!
//! ```rust
//! use cursor_collections::kdtree::{KdTree, NdPoint};
//!
//! let tree = KdTree::build(
//!     2,
//!     vec![
//!         NdPoint::from([2.0, 3.0]),
//!         NdPoint::from([5.0, 4.0]),
//!         NdPoint::from([9.0, 6.0]),
//!     ],
//! )?;
//!
//! let hits = tree.range_search(&NdPoint::from([1.0, 1.0]), &NdPoint::from([6.0, 5.0]))?;
//! assert_eq!(hits.len(), 2);
//! # Ok::<(), cursor_collections::ContainerError>(())
//! ```

use std::cmp::Ordering;

use crate::traits::ContainerError;

/// A point in n-dimensional space
#[derive(Debug, Clone, PartialEq)]
pub struct NdPoint {
    coords: Vec<f64>,
}

impl NdPoint {
    /// Creates a point from its coordinates
    pub fn new(coords: Vec<f64>) -> Self {
        Self { coords }
    }

    /// Number of dimensions
    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    /// The coordinate on `axis`; panics when `axis >= dim()`
    pub fn coord(&self, axis: usize) -> f64 {
        self.coords[axis]
    }

    /// All coordinates in axis order
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }
}

impl<const N: usize> From<[f64; N]> for NdPoint {
    fn from(coords: [f64; N]) -> Self {
        Self {
            coords: coords.to_vec(),
        }
    }
}

#[derive(Debug)]
struct KdNode {
    point: NdPoint,
    left: Option<Box<KdNode>>,
    right: Option<Box<KdNode>>,
}

/// A balanced k-d tree over a fixed point set
#[derive(Debug)]
pub struct KdTree {
    dim: usize,
    root: Option<Box<KdNode>>,
    len: usize,
}

impl KdTree {
    /// Builds a tree of dimension `dim` over `points`
    ///
    /// # Errors
    /// [`ContainerError::InvalidArgument`] when `dim` is zero, a point has
    /// a different dimension, or a coordinate is not finite.
    pub fn build(dim: usize, points: Vec<NdPoint>) -> Result<Self, ContainerError> {
        if dim == 0 {
            return Err(ContainerError::InvalidArgument(
                "dimension must be at least 1",
            ));
        }
        if points.iter().any(|p| p.dim() != dim) {
            return Err(ContainerError::InvalidArgument(
                "point dimension does not match the tree",
            ));
        }
        if points
            .iter()
            .flat_map(|p| p.coords.iter())
            .any(|c| !c.is_finite())
        {
            return Err(ContainerError::InvalidArgument(
                "coordinates must be finite",
            ));
        }
        let len = points.len();
        let root = Self::build_subtree(points, 0, dim);
        Ok(Self { dim, root, len })
    }

    /// Number of dimensions each point carries
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of points in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the tree holds no points
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns every point inside the box spanned by `lower` and `upper`
    ///
    /// Bounds are inclusive on every axis. The returned order is the
    /// tree's traversal order, not sorted.
    ///
    /// # Errors
    /// [`ContainerError::InvalidArgument`] when a bound has the wrong
    /// dimension, a coordinate is not finite, or `lower` exceeds `upper`
    /// on some axis.
    pub fn range_search(
        &self,
        lower: &NdPoint,
        upper: &NdPoint,
    ) -> Result<Vec<&NdPoint>, ContainerError> {
        if lower.dim() != self.dim || upper.dim() != self.dim {
            return Err(ContainerError::InvalidArgument(
                "bound dimension does not match the tree",
            ));
        }
        if lower
            .coords
            .iter()
            .chain(upper.coords.iter())
            .any(|c| !c.is_finite())
        {
            return Err(ContainerError::InvalidArgument(
                "coordinates must be finite",
            ));
        }
        if lower.coords.iter().zip(&upper.coords).any(|(l, u)| l > u) {
            return Err(ContainerError::InvalidArgument(
                "lower bound exceeds upper bound",
            ));
        }
        let mut found = Vec::new();
        Self::search_subtree(&self.root, lower, upper, 0, self.dim, &mut found);
        Ok(found)
    }

    fn build_subtree(mut points: Vec<NdPoint>, depth: usize, dim: usize) -> Option<Box<KdNode>> {
        if points.is_empty() {
            return None;
        }
        let axis = depth % dim;
        let median = (points.len() - 1) / 2;
        Self::select_median(&mut points, median, axis);
        let mut upper = points.split_off(median);
        // The median point itself heads the upper half.
        let point = upper.swap_remove(0);
        Some(Box::new(KdNode {
            point,
            left: Self::build_subtree(points, depth + 1, dim),
            right: Self::build_subtree(upper, depth + 1, dim),
        }))
    }

    /// Quickselect: places the `target`-th smallest point (by the `axis`
    /// coordinate) at index `target`, smaller-or-equal points before it
    fn select_median(points: &mut [NdPoint], target: usize, axis: usize) {
        let (mut lo, mut hi) = (0, points.len() - 1);
        while lo < hi {
            let pivot = Self::partition(points, lo, hi, axis);
            match pivot.cmp(&target) {
                Ordering::Equal => return,
                Ordering::Less => lo = pivot + 1,
                Ordering::Greater => hi = pivot - 1,
            }
        }
    }

    /// Lomuto partition around the value at `hi`
    fn partition(points: &mut [NdPoint], lo: usize, hi: usize, axis: usize) -> usize {
        let pivot = points[hi].coord(axis);
        let mut store = lo;
        for i in lo..hi {
            if points[i].coord(axis) <= pivot {
                points.swap(i, store);
                store += 1;
            }
        }
        points.swap(store, hi);
        store
    }

    fn search_subtree<'a>(
        link: &'a Option<Box<KdNode>>,
        lower: &NdPoint,
        upper: &NdPoint,
        depth: usize,
        dim: usize,
        found: &mut Vec<&'a NdPoint>,
    ) {
        let Some(node) = link else {
            return;
        };
        let axis = depth % dim;
        let value = node.point.coord(axis);
        // Points at the splitting value may sit on either side, so both
        // descend conditions are inclusive.
        if lower.coord(axis) <= value {
            Self::search_subtree(&node.left, lower, upper, depth + 1, dim, found);
        }
        if (0..dim).all(|a| {
            let c = node.point.coord(a);
            lower.coord(a) <= c && c <= upper.coord(a)
        }) {
            found.push(&node.point);
        }
        if value <= upper.coord(axis) {
            Self::search_subtree(&node.right, lower, upper, depth + 1, dim, found);
        }
    }
}
