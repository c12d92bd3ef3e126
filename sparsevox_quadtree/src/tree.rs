// Copyright 2025 the Sparsevox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The recursive quadtree node and its insertion/query operations.

use alloc::boxed::Box;
use alloc::vec::Vec;

use thiserror::Error;

use crate::region::{Coord, Region};

/// Error returned when an insertion target is not covered by the tree's
/// root region.
///
/// This is a caller-correctable misuse signal, not a structural fault: the
/// offending operation is discarded and the tree is left unchanged.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("insertion target lies outside the tree's root region")]
pub struct OutOfBounds;

/// A sparse, lazily subdivided quadtree node.
///
/// The root node *is* the tree; insertion, location, and search all walk
/// the same recursive structure. Each node covers an immutable [`Region`]
/// and owns up to four children, one per quadrant, which are created the
/// first time an insertion routes into them and never removed. Values
/// whose footprint straddles a quadrant boundary, or that arrive once the
/// subdivision budget is exhausted, are stored directly at the node.
///
/// The structure is build-then-query: there is no removal, rebalancing, or
/// internal locking. See the crate docs for an end-to-end example.
pub struct QuadTree<T, P> {
    region: Region<T>,
    depth: usize,
    /// The four quadrant rectangles of `region`; `None` iff `depth == 0`.
    quadrants: Option<[Region<T>; 4]>,
    children: [Option<Box<QuadTree<T, P>>>; 4],
    values: Vec<P>,
    footprints: Vec<Region<T>>,
}

impl<T: Coord, P> core::fmt::Debug for QuadTree<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let populated = self.children.iter().filter(|c| c.is_some()).count();
        f.debug_struct("QuadTree")
            .field("region", &self.region)
            .field("depth", &self.depth)
            .field("local_values", &self.values.len())
            .field("populated_children", &populated)
            .finish_non_exhaustive()
    }
}

impl<T: Coord, P> QuadTree<T, P> {
    /// Create a node covering `region` with `max_depth` remaining levels of
    /// subdivision.
    ///
    /// No children are allocated here; the quadrant rectangles are
    /// precomputed once when `max_depth > 0` and children materialize only
    /// as insertions route into them. A `max_depth` of zero makes the node
    /// a leaf that stores everything locally.
    ///
    /// See [`Region::max_subdivisions`] for the conventional depth of a
    /// tree whose leaves should bottom out at unit-size cells.
    pub fn new(region: Region<T>, max_depth: usize) -> Self {
        debug_assert!(
            region.min_x <= region.max_x && region.min_y <= region.max_y,
            "root region must not be inverted"
        );
        Self {
            region,
            depth: max_depth,
            quadrants: (max_depth > 0).then(|| region.quadrants()),
            children: [None, None, None, None],
            values: Vec::new(),
            footprints: Vec::new(),
        }
    }

    /// The region this node is responsible for.
    #[inline]
    pub fn region(&self) -> Region<T> {
        self.region
    }

    /// Remaining subdivision budget; `0` marks a leaf.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Values stored directly at this node (not its descendants).
    #[inline]
    pub fn values(&self) -> &[P] {
        &self.values
    }

    /// Footprints of the values stored at this node, parallel to
    /// [`values`][Self::values]. Point insertions record a degenerate
    /// [`Region::point`] footprint.
    #[inline]
    pub fn footprints(&self) -> &[Region<T>] {
        &self.footprints
    }

    /// The child covering the given quadrant (0 = bottom-left,
    /// 1 = bottom-right, 2 = top-left, 3 = top-right), if it has been
    /// created.
    #[inline]
    pub fn child(&self, quadrant: usize) -> Option<&Self> {
        self.children.get(quadrant)?.as_deref()
    }

    /// Iterate the populated children in fixed quadrant order.
    #[inline]
    pub fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|c| c.as_deref())
    }

    /// Whether this node terminates its branch: either the subdivision
    /// budget is exhausted or no child has been populated.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.depth == 0 || self.children.iter().all(Option::is_none)
    }

    /// Total number of values stored in this subtree.
    pub fn len(&self) -> usize {
        self.values.len() + self.children().map(Self::len).sum::<usize>()
    }

    /// Whether the subtree stores no values at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.children().all(Self::is_empty)
    }

    /// Insert `value` keyed by a point.
    ///
    /// The value descends along the unique chain of quadrants containing
    /// the point until the subdivision budget runs out, creating children
    /// on demand, and is stored at the node it bottoms out in.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] (leaving the tree unchanged) if the point is
    /// not inside the root region.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparsevox_quadtree::{QuadTree, Region};
    ///
    /// let mut tree = QuadTree::new(Region::new(0.0, 0.0, 16.0, 16.0), 2);
    /// tree.insert_point(1.0, 1.0, "a").unwrap();
    /// assert!(tree.insert_point(16.0, 1.0, "outside").is_err());
    /// ```
    pub fn insert_point(&mut self, x: T, y: T, value: P) -> Result<(), OutOfBounds> {
        self.insert_point_with(x, y, value, |_| {})
    }

    /// Insert `value` keyed by a point, then run `merge` on the landing
    /// node's full value list.
    ///
    /// `merge` is invoked exactly once per insertion, immediately after the
    /// raw append. It may collapse the list to a smaller set of
    /// representative values (for example a mean, when the list is
    /// homogeneous enough); the tree does not interpret the list contents
    /// otherwise. If the merge changes the list length, the surviving
    /// values are re-footprinted to the landing node's whole region, since
    /// they now summarize it.
    ///
    /// The callback is expected to be idempotent: re-running it on an
    /// already-collapsed list must be a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] (leaving the tree unchanged) if the point is
    /// not inside the root region.
    pub fn insert_point_with<F>(&mut self, x: T, y: T, value: P, merge: F) -> Result<(), OutOfBounds>
    where
        F: FnOnce(&mut Vec<P>),
    {
        if !self.region.contains_point(x, y) {
            return Err(OutOfBounds);
        }
        self.place_point(x, y, value, merge);
        Ok(())
    }

    fn place_point<F>(&mut self, x: T, y: T, value: P, merge: F)
    where
        F: FnOnce(&mut Vec<P>),
    {
        if let Some(quadrants) = self.quadrants {
            let child_depth = self.depth - 1;
            for (slot, quadrant) in self.children.iter_mut().zip(quadrants) {
                if quadrant.contains_point(x, y) {
                    let child =
                        slot.get_or_insert_with(|| Box::new(Self::new(quadrant, child_depth)));
                    child.place_point(x, y, value, merge);
                    return;
                }
            }
        }
        // Depth exhausted, or no quadrant claimed the point.
        self.values.push(value);
        self.footprints.push(Region::point(x, y));
        merge(&mut self.values);
        if self.values.len() != self.footprints.len() {
            // The merge collapsed the list; the survivors stand for this
            // node's whole region.
            self.footprints.clear();
            self.footprints.resize(self.values.len(), self.region);
        }
    }

    /// Insert `value` keyed by a rectangular footprint.
    ///
    /// The value descends as deep as the smallest single quadrant that
    /// still fully contains `footprint`; a footprint straddling a quadrant
    /// boundary stays at the node where the straddle occurs, so it is
    /// stored exactly once rather than duplicated across children.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] (leaving the tree unchanged) if the root
    /// region does not fully contain `footprint`.
    pub fn insert_region(&mut self, footprint: Region<T>, value: P) -> Result<(), OutOfBounds> {
        if !self.region.contains_region(&footprint) {
            return Err(OutOfBounds);
        }
        self.place_region(footprint, value);
        Ok(())
    }

    fn place_region(&mut self, footprint: Region<T>, value: P) {
        if let Some(quadrants) = self.quadrants {
            let child_depth = self.depth - 1;
            for (slot, quadrant) in self.children.iter_mut().zip(quadrants) {
                if quadrant.contains_region(&footprint) {
                    let child =
                        slot.get_or_insert_with(|| Box::new(Self::new(quadrant, child_depth)));
                    child.place_region(footprint, value);
                    return;
                }
            }
        }
        // Depth exhausted, or the footprint straddles a quadrant boundary.
        self.values.push(value);
        self.footprints.push(footprint);
    }

    /// Find the deepest existing node whose region contains the point.
    ///
    /// The descent mirrors point insertion but never creates children:
    /// it stops at the first node whose matching quadrant has no child, or
    /// once the subdivision budget is exhausted. Returns `None` when the
    /// point is outside the root region. The returned node is where the
    /// point *would* bottom out, which is not necessarily a node that
    /// stores any values.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparsevox_quadtree::{QuadTree, Region};
    ///
    /// let mut tree: QuadTree<i64, &str> = QuadTree::new(Region::new(0, 0, 16, 16), 2);
    /// tree.insert_point(1, 1, "a").unwrap();
    ///
    /// let node = tree.locate(1, 1).unwrap();
    /// assert_eq!(node.region(), Region::new(0, 0, 4, 4));
    /// assert_eq!(node.values(), ["a"]);
    /// assert!(tree.locate(-1, 1).is_none());
    /// ```
    pub fn locate(&self, x: T, y: T) -> Option<&Self> {
        if !self.region.contains_point(x, y) {
            return None;
        }
        let mut node = self;
        loop {
            let Some(quadrants) = node.quadrants else {
                return Some(node);
            };
            let mut next = None;
            for (slot, quadrant) in node.children.iter().zip(quadrants) {
                if quadrant.contains_point(x, y) {
                    // Quadrants are disjoint; only this one can match.
                    next = slot.as_deref();
                    break;
                }
            }
            match next {
                Some(child) => node = child,
                None => return Some(node),
            }
        }
    }

    /// Collect every value whose footprint overlaps `target`.
    ///
    /// Point-keyed values participate through their degenerate point
    /// footprint. Results follow subtree traversal order (children in
    /// fixed quadrant order before a node's own values); each value is
    /// stored at exactly one node, so no deduplication is needed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparsevox_quadtree::{QuadTree, Region};
    ///
    /// let mut tree: QuadTree<i64, &str> = QuadTree::new(Region::new(0, 0, 16, 16), 2);
    /// tree.insert_point(1, 1, "a").unwrap();
    /// tree.insert_region(Region::new(0, 0, 8, 8), "b").unwrap();
    /// tree.insert_region(Region::new(9, 9, 12, 12), "c").unwrap();
    ///
    /// let mut hits = tree.search(Region::new(0, 0, 8, 8));
    /// hits.sort_unstable();
    /// assert_eq!(hits, ["a", "b"]);
    /// assert!(tree.search(Region::new(-4, -4, -1, -1)).is_empty());
    /// ```
    pub fn search(&self, target: Region<T>) -> Vec<P>
    where
        P: Clone,
    {
        let mut out = Vec::new();
        self.visit_overlapping(target, |value| out.push(value.clone()));
        out
    }

    /// Visit every value whose footprint overlaps `target`, without
    /// allocating result storage.
    ///
    /// Calls `visitor` for each match, in the same order as
    /// [`search`][Self::search].
    pub fn visit_overlapping<F: FnMut(&P)>(&self, target: Region<T>, mut visitor: F) {
        if self.region.overlaps(&target) {
            self.visit_overlapping_inner(&target, &mut visitor);
        }
    }

    fn visit_overlapping_inner<F: FnMut(&P)>(&self, target: &Region<T>, visitor: &mut F) {
        if target.contains_region(&self.region) {
            // The window subsumes this whole subtree; every stored
            // footprint lies inside the node's region, so no further
            // overlap tests are needed.
            self.visit_values_inner(visitor);
            return;
        }
        for child in self.children() {
            if child.region.overlaps(target) {
                child.visit_overlapping_inner(target, visitor);
            }
        }
        for (footprint, value) in self.footprints.iter().zip(&self.values) {
            if footprint.overlaps(target) {
                visitor(value);
            }
        }
    }

    pub(crate) fn visit_values_inner<F: FnMut(&P)>(&self, visitor: &mut F) {
        for child in self.children() {
            child.visit_values_inner(visitor);
        }
        for value in &self.values {
            visitor(value);
        }
    }
}
