// Copyright 2025 the Sparsevox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle-keyed insertion and marquee selection.
//!
//! Spawns random circles, indexes their bounding rectangles, then sweeps
//! a selection window across the map and reports which objects fall
//! inside at each step.
//!
//! Run:
//! - `cargo run -p sparsevox_demos --example rect_select`

use kurbo::{Point, Rect, Vec2};
use rand::Rng;
use sparsevox_quadtree::{QuadTree, Region};
use tracing::{debug, info};

const MAP_SIZE: f64 = 40.0;
const OBJECT_COUNT: usize = 192;

/// A world-space kurbo rect as a tree region.
fn rect_to_region(rect: Rect) -> Region<f64> {
    Region::new(rect.x0, rect.y0, rect.x1, rect.y1)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let range = MAP_SIZE * 0.5;
    // The pad is smaller than the largest circle radius, so some bounding
    // rects poke past the indexed region and get rejected, exactly like a
    // caller feeding the tree unclamped scene data.
    let extent = range + 1.0;
    let bounds = Region::new(-extent, -extent, extent, extent);
    let mut tree: QuadTree<f64, usize> = QuadTree::new(bounds, 5);

    let mut rng = rand::rng();
    let mut indexed = 0_usize;
    for id in 0..OBJECT_COUNT {
        let center = Point::new(
            rng.random_range(-range..range),
            rng.random_range(-range..range),
        );
        let radius = rng.random_range(0.1..1.5);
        let footprint = rect_to_region(Rect::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        ));
        match tree.insert_region(footprint, id) {
            Ok(()) => indexed += 1,
            Err(err) => debug!(%err, ?footprint, "circle pokes past the map edge"),
        }
    }
    info!(indexed, skipped = OBJECT_COUNT - indexed, "scene indexed");

    // Drag a marquee diagonally across the map.
    let window = Rect::new(0.0, 0.0, 9.0, 6.0);
    for step in 0..5 {
        let t = step as f64 / 4.0;
        let offset = Vec2::new(
            -range + t * (MAP_SIZE - window.width()),
            -range + t * (MAP_SIZE - window.height()),
        );
        let selection = rect_to_region(window + offset);
        let selected = tree.search(selection);
        info!(step, selection = ?selection, count = selected.len(), "marquee selection");
    }
}
