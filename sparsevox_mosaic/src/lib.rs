// Copyright 2025 the Sparsevox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=sparsevox_mosaic --heading-base-level=0

//! Sparsevox Mosaic: quadtree-based reduced-color image compression.
//!
//! This crate feeds an image's pixels into a
//! [`QuadTree`](sparsevox_quadtree::QuadTree) using the merge-aware
//! insertion, so each terminal cell of the tree collapses to a single mean
//! color whenever its pixels are homogeneous enough, then rasterizes the
//! tree's leaves back into a pixel buffer.
//!
//! The cell granularity is the tree depth: with the default depth
//! (one unit per leaf) every pixel is its own cell and the output
//! reproduces the input; shallower depths give larger cells for pixels to
//! accumulate and merge in, trading fidelity for flatter regions. The
//! `threshold` bounds how far any pixel of a cell may deviate from the
//! cell's mean before the cell refuses to merge.
//!
//! # Example
//!
//! ```rust
//! use sparsevox_mosaic::{compress, Color, MosaicOptions, Pixmap};
//!
//! // A flat image compresses losslessly at any cell size.
//! let source = Pixmap::filled(8, 8, Color::rgb(0.8, 0.2, 0.2));
//! let options = MosaicOptions {
//!     threshold: 0.05,
//!     max_depth: Some(1),
//!     ..MosaicOptions::default()
//! };
//! let merged = compress(&source, &options);
//! assert_eq!(merged, source);
//! ```

#![no_std]

extern crate alloc;

mod color;

pub use color::{Color, merge_by_mean};

use alloc::vec;
use alloc::vec::Vec;

use sparsevox_quadtree::{QuadTree, Region};

/// An owned, row-major RGBA pixel buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<Color>,
}

impl Pixmap {
    /// Create a pixmap with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            data: vec![color; width as usize * height as usize],
        }
    }

    /// Create a pixmap by evaluating `pixel` at every coordinate.
    pub fn from_fn<F: FnMut(u32, u32) -> Color>(width: u32, height: u32, mut pixel: F) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(pixel(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.data
    }

    /// The color at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the pixmap.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.data[self.index(x, y)]
    }

    /// Set the color at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the pixmap.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.data[index] = color;
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel coordinate out of range");
        y as usize * self.width as usize + x as usize
    }
}

/// Parameters for [`compress`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MosaicOptions {
    /// Maximum RGB deviation from a cell's mean color before the cell
    /// refuses to merge.
    pub threshold: f32,
    /// Subdivision depth of the tree; `None` subdivides down to unit-size
    /// (single-pixel) cells.
    pub max_depth: Option<usize>,
    /// When set, each rendered cell is outlined with this color.
    pub border: Option<Color>,
}

fn image_region(source: &Pixmap) -> Region<i64> {
    Region::new(0, 0, i64::from(source.width()), i64::from(source.height()))
}

/// Build the merge tree for an image: every pixel is inserted with the
/// [`merge_by_mean`] predicate, so homogeneous cells collapse to their mean
/// as they fill up.
pub fn build_tree(source: &Pixmap, threshold: f32, max_depth: usize) -> QuadTree<i64, Color> {
    let mut tree = QuadTree::new(image_region(source), max_depth);
    for y in 0..source.height() {
        for x in 0..source.width() {
            let color = source.get(x, y);
            tree.insert_point_with(i64::from(x), i64::from(y), color, |colors| {
                merge_by_mean(colors, threshold);
            })
            .expect("pixel coordinates lie inside the image region");
        }
    }
    tree
}

/// Rasterize a merge tree back into a pixel buffer.
///
/// Each terminal node paints its representative (first) color across its
/// whole region; `border` optionally outlines every painted cell.
pub fn render(tree: &QuadTree<i64, Color>, width: u32, height: u32, border: Option<Color>) -> Pixmap {
    let mut out = Pixmap::filled(width, height, Color::TRANSPARENT);
    tree.visit_leaves(|node| {
        let Some(&color) = node.values().first() else {
            return;
        };
        let region = node.region();
        let x0 = u32::try_from(region.min_x).expect("leaf region lies inside the image");
        let y0 = u32::try_from(region.min_y).expect("leaf region lies inside the image");
        let x1 = u32::try_from(region.max_x).expect("leaf region lies inside the image");
        let y1 = u32::try_from(region.max_y).expect("leaf region lies inside the image");
        for y in y0..y1 {
            for x in x0..x1 {
                let on_edge = x == x0 || x + 1 == x1 || y == y0 || y + 1 == y1;
                match border {
                    Some(edge) if on_edge => out.set(x, y, edge),
                    _ => out.set(x, y, color),
                }
            }
        }
    });
    out
}

/// Compress an image into its reduced-color mosaic.
///
/// Equivalent to [`build_tree`] followed by [`render`], with the tree depth
/// defaulting to unit-size cells
/// (see [`Region::max_subdivisions`](sparsevox_quadtree::Region::max_subdivisions)).
pub fn compress(source: &Pixmap, options: &MosaicOptions) -> Pixmap {
    let region = image_region(source);
    let depth = options
        .max_depth
        .unwrap_or_else(|| region.max_subdivisions());
    let tree = build_tree(source, options.threshold, depth);
    render(&tree, source.width(), source.height(), options.border)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_tone(width: u32, height: u32) -> Pixmap {
        // Left half red, right half blue, split on a cell boundary.
        Pixmap::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Color::rgb(1.0, 0.0, 0.0)
            } else {
                Color::rgb(0.0, 0.0, 1.0)
            }
        })
    }

    #[test]
    fn homogeneous_cells_collapse_to_one_value_each() {
        let source = two_tone(8, 8);
        // Depth 2 gives 2x2 cells; each is a solid color, so each collapses.
        let tree = build_tree(&source, 0.0, 2);
        assert_eq!(tree.len(), 16);

        let merged = render(&tree, 8, 8, None);
        assert_eq!(merged, source);
    }

    #[test]
    fn zero_threshold_keeps_distinct_pixels_raw() {
        // Every pixel is a different color, so nothing may merge.
        let source = Pixmap::from_fn(8, 8, |x, y| {
            Color::rgb(x as f32 / 8.0, y as f32 / 8.0, 0.0)
        });
        let tree = build_tree(&source, 0.0, 2);
        assert_eq!(tree.len(), 64);
    }

    #[test]
    fn default_options_reproduce_the_image() {
        let source = Pixmap::from_fn(8, 8, |x, y| {
            Color::rgb(x as f32 / 8.0, 0.5, y as f32 / 8.0)
        });
        let merged = compress(&source, &MosaicOptions::default());
        assert_eq!(merged, source);
    }

    #[test]
    fn a_large_threshold_flattens_the_whole_cell() {
        let source = Pixmap::from_fn(2, 2, |x, y| {
            Color::rgb(0.5 + 0.01 * x as f32, 0.5 + 0.01 * y as f32, 0.5)
        });
        // Depth 0: all four pixels land at the root and merge to the mean.
        let options = MosaicOptions {
            threshold: 0.1,
            max_depth: Some(0),
            ..MosaicOptions::default()
        };
        let merged = compress(&source, &options);
        let mean = merged.get(0, 0);
        assert!(merged.pixels().iter().all(|&c| c == mean));
        // The running merge re-averages earlier collapses, so the result is
        // only close to the true mean, not equal to it.
        assert!(mean.distance_sq(Color::rgb(0.505, 0.505, 0.5)) < 1e-4);
    }

    #[test]
    fn border_outlines_each_cell() {
        let source = Pixmap::filled(8, 8, Color::WHITE);
        let options = MosaicOptions {
            threshold: 0.0,
            max_depth: Some(1),
            border: Some(Color::BLACK),
        };
        let merged = compress(&source, &options);
        // 4x4 cells: the cell edge is black, the interior keeps its color.
        assert_eq!(merged.get(0, 0), Color::BLACK);
        assert_eq!(merged.get(3, 3), Color::BLACK);
        assert_eq!(merged.get(4, 4), Color::BLACK);
        assert_eq!(merged.get(1, 1), Color::WHITE);
        assert_eq!(merged.get(5, 6), Color::WHITE);
    }

    #[test]
    fn every_pixel_is_painted() {
        let source = Pixmap::from_fn(7, 5, |x, y| {
            Color::rgb(x as f32 / 7.0, y as f32 / 5.0, 0.25)
        });
        // Odd dimensions produce uneven cells, which must still tile the
        // full image.
        let options = MosaicOptions {
            threshold: 2.0,
            max_depth: Some(2),
            ..MosaicOptions::default()
        };
        let merged = compress(&source, &options);
        assert!(merged.pixels().iter().all(|&c| c != Color::TRANSPARENT));
    }
}
