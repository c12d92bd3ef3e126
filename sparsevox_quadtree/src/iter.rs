// Copyright 2025 the Sparsevox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole-tree traversal: post-order and leaf visitors, and a lazy
//! post-order iterator.

use alloc::vec;
use alloc::vec::Vec;

use crate::region::Coord;
use crate::tree::QuadTree;

impl<T: Coord, P> QuadTree<T, P> {
    /// Visit every node in post-order: all populated children (in fixed
    /// quadrant order) before the node itself, finishing with the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparsevox_quadtree::{QuadTree, Region};
    ///
    /// let mut tree: QuadTree<i64, ()> = QuadTree::new(Region::new(0, 0, 16, 16), 2);
    /// tree.insert_point(1, 1, ()).unwrap();
    ///
    /// let mut nodes = 0;
    /// tree.visit_post_order(|_| nodes += 1);
    /// assert_eq!(nodes, 3); // root, depth-1 child, depth-0 leaf
    /// ```
    pub fn visit_post_order<F: FnMut(&Self)>(&self, mut visitor: F) {
        self.post_order_inner(&mut visitor);
    }

    fn post_order_inner<F: FnMut(&Self)>(&self, visitor: &mut F) {
        for child in self.children() {
            child.post_order_inner(visitor);
        }
        visitor(self);
    }

    /// Visit every terminal node: those with an exhausted subdivision
    /// budget or without any populated children.
    ///
    /// This is the harvest pass for per-region representative data, e.g.
    /// one merged value per terminal region.
    pub fn visit_leaves<F: FnMut(&Self)>(&self, mut visitor: F) {
        self.leaves_inner(&mut visitor);
    }

    fn leaves_inner<F: FnMut(&Self)>(&self, visitor: &mut F) {
        if self.is_leaf() {
            visitor(self);
            return;
        }
        for child in self.children() {
            child.leaves_inner(visitor);
        }
    }

    /// Visit every value stored anywhere in this subtree, children (in
    /// fixed quadrant order) before the node's own values.
    pub fn visit_values<F: FnMut(&P)>(&self, mut visitor: F) {
        self.visit_values_inner(&mut visitor);
    }

    /// Collect every value stored anywhere in this subtree, in
    /// [`visit_values`][Self::visit_values] order.
    pub fn collect_values(&self) -> Vec<P>
    where
        P: Clone,
    {
        let mut out = Vec::new();
        self.visit_values_inner(&mut |value| out.push(value.clone()));
        out
    }

    /// A lazy post-order walk over the subtree's nodes.
    ///
    /// Yields the same nodes in the same order as
    /// [`visit_post_order`][Self::visit_post_order], but as a restartable
    /// iterator, so callers can stop early or interleave other work.
    pub fn iter_post_order(&self) -> PostOrder<'_, T, P> {
        PostOrder {
            stack: vec![(self, 0)],
        }
    }
}

/// Depth-first post-order iterator over the nodes of a [`QuadTree`].
///
/// Created by [`QuadTree::iter_post_order`].
pub struct PostOrder<'a, T, P> {
    // Each entry pairs a node with the next child slot to descend into.
    stack: Vec<(&'a QuadTree<T, P>, usize)>,
}

impl<T: Coord, P> core::fmt::Debug for PostOrder<'_, T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PostOrder")
            .field("pending", &self.stack.len())
            .finish_non_exhaustive()
    }
}

impl<'a, T: Coord, P> Iterator for PostOrder<'a, T, P> {
    type Item = &'a QuadTree<T, P>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let &mut (node, cursor) = self.stack.last_mut()?;
            let mut descend = None;
            for slot in cursor..4 {
                if let Some(child) = node.child(slot) {
                    descend = Some((child, slot + 1));
                    break;
                }
            }
            match descend {
                Some((child, resume)) => {
                    self.stack.last_mut().expect("stack checked non-empty").1 = resume;
                    self.stack.push((child, 0));
                }
                None => {
                    let _ = self.stack.pop();
                    return Some(node);
                }
            }
        }
    }
}
