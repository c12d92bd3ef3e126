// Copyright 2025 the Sparsevox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reduced-color image compression with the merge-aware quadtree.
//!
//! Builds a synthetic image (three flat quadrants and one gradient
//! corner), compresses it at several threshold/depth combinations, and
//! reports how many values the tree retains versus the raw pixel count.
//!
//! Run:
//! - `cargo run -p sparsevox_demos --example image_merge`

use sparsevox_mosaic::{Color, Pixmap, build_tree, render};
use tracing::info;

const SIZE: u32 = 64;

fn synthetic_image() -> Pixmap {
    Pixmap::from_fn(SIZE, SIZE, |x, y| {
        let half = SIZE / 2;
        match (x < half, y < half) {
            (true, true) => Color::rgb(0.9, 0.2, 0.2),
            (false, true) => Color::rgb(0.2, 0.6, 0.9),
            (true, false) => Color::rgb(0.95, 0.85, 0.3),
            (false, false) => Color::rgb(x as f32 / SIZE as f32, y as f32 / SIZE as f32, 0.5),
        }
    })
}

fn distinct_colors(pixmap: &Pixmap) -> usize {
    let mut seen: Vec<Color> = Vec::new();
    for &color in pixmap.pixels() {
        if !seen.contains(&color) {
            seen.push(color);
        }
    }
    seen.len()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let source = synthetic_image();
    let pixels = SIZE * SIZE;
    info!(pixels, distinct = distinct_colors(&source), "source image");

    for (threshold, depth) in [(0.0, 4), (0.08, 4), (0.3, 4), (0.08, 3)] {
        let tree = build_tree(&source, threshold, depth);
        let mut cells = 0_usize;
        let mut collapsed = 0_usize;
        tree.visit_leaves(|node| {
            cells += 1;
            if node.values().len() == 1 {
                collapsed += 1;
            }
        });
        let merged = render(&tree, SIZE, SIZE, Some(Color::BLACK));
        info!(
            threshold,
            depth,
            cells,
            collapsed,
            stored = tree.len(),
            distinct = distinct_colors(&merged),
            "compressed"
        );
    }
}
