//! Cursor-Oriented Container Structures for Rust
//!
//! This crate provides classic container data structures built around an
//! explicit cursor: a container-owned position that code inspects and moves
//! instead of holding iterator state of its own. Every container reports
//! the same [`ContainerError`] taxonomy from the same trait surface
//! ([`Container`], [`Cursored`], [`LinearCursor`]), so the structures swap
//! cleanly under generic code.
//!
//! # Features
//!
//! - **Arrayed Heap**: fixed-capacity 1-indexed binary heap; max-first or
//!   min-first by strategy type; positional cursor with delete-at-position
//! - **Priority Queue**: max-priority queue over the arrayed heap, with
//!   min access, batch delete of equal maxima, and capacity errors
//! - **AVL Tree**: height-balanced search tree with cached heights and a
//!   path cursor into the last search
//! - **2-3 Tree**: leaf-storing balanced tree whose leaves thread into a
//!   sorted doubly-linked list, carrying a keyed linear cursor
//! - **Union-Find**: disjoint sets with union by rank and path compression
//! - **Graphs**: adjacency-list weighted graph with Dijkstra shortest
//!   paths and Kruskal minimum spanning trees
//! - **Huffman Coder**: frequency-fitted prefix code for ASCII text
//! - **k-d Tree**: median-balanced spatial index with orthogonal range
//!   search
//! - **Expression Tree**: infix parser and evaluator over f64 arithmetic
//!
//! # Example
//!
//! ```rust
//! use cursor_collections::{Container, Cursored, MaxHeap};
//!
//! let mut heap = MaxHeap::with_capacity(4);
//! heap.insert(3)?;
//! heap.insert(9)?;
//! heap.insert(7)?;
//! assert_eq!(heap.item()?, &9);
//! assert_eq!(heap.delete_item()?, 9);
//! assert_eq!(heap.len(), 2);
//! # Ok::<(), cursor_collections::ContainerError>(())
//! ```

pub mod arrayed_heap;
pub mod avl;
pub mod expression;
pub mod graph;
pub mod huffman;
pub mod kdtree;
pub mod priority_queue;
pub mod traits;
pub mod twothree;
pub mod union_find;

// Re-export the container surface for convenience
pub use arrayed_heap::{ArrayedHeap, HeapIter, MaxFirst, MaxHeap, MinFirst, MinHeap, SiftOrder};
pub use avl::AvlTree;
pub use priority_queue::PriorityQueue;
pub use traits::{Container, ContainerError, Cursored, Keyed, LinearCursor};
pub use twothree::TwoThreeTree;
