// Copyright 2025 the Sparsevox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point-keyed insertion and point-location over a scattered scene.
//!
//! Spawns random objects on a square map, inserts their centers into a
//! quadtree, then "clicks" a few cursor positions and reports the node
//! each click selects, the way an editor would highlight the hovered
//! cell.
//!
//! Run:
//! - `cargo run -p sparsevox_demos --example point_select`

use kurbo::Point;
use rand::Rng;
use sparsevox_quadtree::{QuadTree, Region};
use tracing::info;

const MAP_SIZE: f64 = 40.0;
const OBJECT_COUNT: usize = 256;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Pad the indexed region a little past the spawn range, as a scene
    // would for objects sitting right on the map edge.
    let range = MAP_SIZE * 0.5;
    let extent = range + 2.0;
    let bounds = Region::new(-extent, -extent, extent, extent);
    let mut tree: QuadTree<f64, usize> = QuadTree::new(bounds, 5);

    let mut rng = rand::rng();
    let mut objects = Vec::with_capacity(OBJECT_COUNT);
    for id in 0..OBJECT_COUNT {
        let position = Point::new(
            rng.random_range(-range..range),
            rng.random_range(-range..range),
        );
        tree.insert_point(position.x, position.y, id)
            .expect("spawn range lies inside the indexed region");
        objects.push(position);
    }

    let mut nodes = 0;
    tree.visit_post_order(|_| nodes += 1);
    info!(objects = objects.len(), nodes, "scene indexed");

    // A few simulated cursor positions, the last one off the map.
    let clicks = [
        Point::new(0.0, 0.0),
        Point::new(-range + 0.5, range - 0.5),
        Point::new(7.5, -3.25),
        Point::new(MAP_SIZE, MAP_SIZE),
    ];
    for click in clicks {
        match tree.locate(click.x, click.y) {
            Some(node) => {
                info!(
                    click = ?click,
                    region = ?node.region(),
                    depth = node.depth(),
                    contents = node.values().len(),
                    "selected node"
                );
            }
            None => info!(click = ?click, "click landed outside the map"),
        }
    }
}
