// Copyright 2025 the Sparsevox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear RGBA colors and the mean/deviation merge predicate.

use alloc::vec::Vec;
use core::ops::{Add, Div};

/// A linear RGBA color with `f32` components.
///
/// Components are nominally in `0.0..=1.0` but are not clamped; sums and
/// means produced during merging may pass through out-of-range
/// intermediates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Color {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
    /// Alpha component.
    pub a: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a color from its four components.
    #[inline(always)]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB components.
    #[inline(always)]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Squared Euclidean distance between the RGB parts of two colors.
    ///
    /// Alpha is ignored, matching the homogeneity metric used by
    /// [`merge_by_mean`].
    #[inline]
    pub fn distance_sq(self, other: Self) -> f32 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        dr * dr + dg * dg + db * db
    }
}

impl Add for Color {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            r: self.r + rhs.r,
            g: self.g + rhs.g,
            b: self.b + rhs.b,
            a: self.a + rhs.a,
        }
    }
}

impl Div<f32> for Color {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f32) -> Self {
        Self {
            r: self.r / rhs,
            g: self.g / rhs,
            b: self.b / rhs,
            a: self.a / rhs,
        }
    }
}

/// Collapse `colors` to its mean if the list is homogeneous enough.
///
/// Computes the mean color, and if every element's RGB distance to the mean
/// is within `threshold`, replaces the whole list with the single mean.
/// Otherwise the list is left untouched. Distances are compared in squared
/// space, so no square root is taken; negative thresholds never merge.
///
/// This is the merge predicate for
/// [`QuadTree::insert_point_with`](sparsevox_quadtree::QuadTree::insert_point_with):
/// it is idempotent (a collapsed single-element list merges to itself) and
/// has no effect beyond the list it is handed.
pub fn merge_by_mean(colors: &mut Vec<Color>, threshold: f32) {
    if colors.is_empty() || threshold < 0.0 {
        return;
    }
    let sum = colors.iter().fold(Color::TRANSPARENT, |acc, &c| acc + c);
    let mean = sum / colors.len() as f32;
    let limit_sq = threshold * threshold;
    if colors.iter().any(|&c| mean.distance_sq(c) > limit_sq) {
        return;
    }
    colors.clear();
    colors.push(mean);
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn mean_of_identical_colors_is_the_color() {
        let mut colors = vec![Color::rgb(0.5, 0.25, 0.75); 4];
        merge_by_mean(&mut colors, 0.0);
        assert_eq!(colors, [Color::rgb(0.5, 0.25, 0.75)]);
    }

    #[test]
    fn merge_is_idempotent_on_a_collapsed_list() {
        let mut colors = vec![Color::rgb(0.1, 0.2, 0.3)];
        merge_by_mean(&mut colors, 0.5);
        let collapsed = colors.clone();
        merge_by_mean(&mut colors, 0.5);
        assert_eq!(colors, collapsed);
    }

    #[test]
    fn heterogeneous_list_is_left_untouched() {
        let mixed = vec![Color::BLACK, Color::WHITE];
        let mut colors = mixed.clone();
        merge_by_mean(&mut colors, 0.1);
        assert_eq!(colors, mixed);
    }

    #[test]
    fn threshold_bounds_the_deviation_not_the_spread() {
        // Black and white average to mid-grey; each is sqrt(3)/2 from the
        // mean, so a threshold just above that collapses the pair.
        let mut colors = vec![Color::BLACK, Color::WHITE];
        merge_by_mean(&mut colors, 0.9);
        assert_eq!(colors.len(), 1);
        assert!(colors[0].distance_sq(Color::rgb(0.5, 0.5, 0.5)) < 1e-6);
    }

    #[test]
    fn negative_threshold_never_merges() {
        let mut colors = vec![Color::WHITE, Color::WHITE];
        merge_by_mean(&mut colors, -1.0);
        assert_eq!(colors.len(), 2);
    }

    #[test]
    fn alpha_does_not_affect_the_distance_metric() {
        let opaque = Color::new(0.2, 0.4, 0.6, 1.0);
        let clear = Color::new(0.2, 0.4, 0.6, 0.0);
        assert_eq!(opaque.distance_sq(clear), 0.0);
    }
}
