// Copyright 2025 the Sparsevox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=sparsevox_quadtree --heading-base-level=0

//! Sparsevox Quadtree: a sparse, lazily subdivided 2D spatial index.
//!
//! The tree stores payloads keyed by either a point or an axis-aligned
//! rectangular footprint, and answers point-location and
//! rectangle-overlap queries over them.
//!
//! - One recursive node type: the root *is* the tree. Each node covers a
//!   fixed [`Region`] and owns up to four children, one per quadrant,
//!   allocated only when an insertion first routes into them.
//! - Point-keyed values descend to the deepest node on the budgeted
//!   root-to-leaf path; rectangle-keyed values stop at the smallest single
//!   quadrant that still fully contains their footprint, so straddling
//!   footprints live near the root instead of being duplicated.
//! - The structure is build-then-query: values are never removed or moved,
//!   the tree never rebalances, and no locking is provided. Wrap the whole
//!   tree in a lock (or finish building before querying) if you need
//!   concurrent access.
//!
//! It is generic over the scalar type `T` (via [`Coord`]: `f32`, `f64`,
//! and `i64` out of the box) and over the payload type `P`, and does not
//! depend on any geometry crate. Higher layers can compute world-space
//! footprints and feed them here.
//!
//! # Example
//!
//! ```rust
//! use sparsevox_quadtree::{QuadTree, Region};
//!
//! // A 16x16 world subdivided at most twice (4-unit leaves).
//! let mut tree: QuadTree<i64, &str> = QuadTree::new(Region::new(0, 0, 16, 16), 2);
//! tree.insert_point(1, 1, "a").unwrap();
//! tree.insert_region(Region::new(0, 0, 8, 8), "b").unwrap();
//!
//! // Point location returns the deepest existing node for the point.
//! let node = tree.locate(1, 1).unwrap();
//! assert_eq!(node.region(), Region::new(0, 0, 4, 4));
//!
//! // Rectangle search returns every value whose footprint overlaps the
//! // window; point values participate through their degenerate footprint.
//! let mut hits = tree.search(Region::new(0, 0, 8, 8));
//! hits.sort_unstable();
//! assert_eq!(hits, ["a", "b"]);
//!
//! // Out-of-bounds insertions are rejected and leave the tree unchanged.
//! assert!(tree.insert_point(99, 0, "nope").is_err());
//! ```
//!
//! # Merge-aware insertion
//!
//! [`QuadTree::insert_point_with`] runs a caller-supplied merge on the
//! landing node's value list after every append. A merge that collapses a
//! homogeneous list to a single representative turns each leaf into a
//! compressed summary of its region, which is the building block for the
//! quadtree image compression in `sparsevox_mosaic`.
//!
//! ```rust
//! use sparsevox_quadtree::{QuadTree, Region};
//!
//! let mut tree: QuadTree<i64, u32> = QuadTree::new(Region::new(0, 0, 4, 4), 1);
//! let merge = |values: &mut Vec<u32>| {
//!     if values.iter().all(|&v| v == values[0]) {
//!         let keep = values[0];
//!         values.clear();
//!         values.push(keep);
//!     }
//! };
//! for (x, y) in [(0, 0), (1, 0), (0, 1)] {
//!     tree.insert_point_with(x, y, 7, merge).unwrap();
//! }
//! // Three identical insertions into the same 2x2 cell collapsed to one.
//! assert_eq!(tree.locate(0, 0).unwrap().values(), [7]);
//! ```
//!
//! ## Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates. Point
//! containment is half-open (`min <= v < max`), so a point exactly on the
//! root's max edge is out of bounds, just as it would be in the next tile
//! over.

#![no_std]

extern crate alloc;

mod iter;
mod region;
mod tree;

pub use iter::PostOrder;
pub use region::{Coord, Region};
pub use tree::{OutOfBounds, QuadTree};
