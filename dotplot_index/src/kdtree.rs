// Copyright 2025 the Dotplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static, bbox-pruned spatial tree over one cluster list.

use alloc::boxed::Box;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::types::{ClusterPoint, SimRegion};

/// Leaves hold up to this many points before a further split.
const LEAF_SIZE: usize = 8;

/// A static 2D tree over one key's cluster points, keyed by simulation
/// coordinates.
///
/// The tree is built once from the immutable cluster list (median split along
/// the wider bounding-box dimension) and never rebalanced. Queries walk it
/// with [`KdTree::visit`], pruning every subtree whose bounding box misses the
/// region, for `O(log n + k)` behavior on the clustered distributions the
/// offline producer emits.
#[derive(Debug)]
pub struct KdTree {
    root: Option<Node>,
    len: usize,
}

#[derive(Debug)]
struct Node {
    /// Subtree bounds: `min_x, min_y, max_x, max_y`.
    bbox: [f64; 4],
    kind: NodeKind,
}

#[derive(Debug)]
enum NodeKind {
    Leaf(SmallVec<[u32; LEAF_SIZE]>),
    Branch(Box<Node>, Box<Node>),
}

impl KdTree {
    /// Builds a tree over the given cluster list.
    ///
    /// Point ids reported by [`KdTree::visit`] are indices into this same
    /// slice; callers must query with the list the tree was built from.
    #[must_use]
    pub fn build(points: &[ClusterPoint]) -> Self {
        if points.is_empty() {
            return Self {
                root: None,
                len: 0,
            };
        }
        let mut ids: Vec<u32> = (0..points.len())
            .map(|i| u32::try_from(i).unwrap_or(u32::MAX))
            .collect();
        let root = build_node(points, &mut ids);
        Self {
            root: Some(root),
            len: points.len(),
        }
    }

    /// Returns the number of indexed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree indexes no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Visits every point inside `region`, pruning non-intersecting subtrees.
    ///
    /// `points` must be the slice the tree was built from. The visitor
    /// receives the point's index in that slice and the point itself, in no
    /// particular order.
    pub fn visit<F: FnMut(u32, &ClusterPoint)>(
        &self,
        points: &[ClusterPoint],
        region: SimRegion,
        mut visitor: F,
    ) {
        debug_assert_eq!(points.len(), self.len, "tree queried with a foreign list");
        if let Some(root) = &self.root {
            visit_node(root, points, &region, &mut visitor);
        }
    }
}

fn build_node(points: &[ClusterPoint], ids: &mut [u32]) -> Node {
    let bbox = bbox_of(points, ids);
    if ids.len() <= LEAF_SIZE {
        return Node {
            bbox,
            kind: NodeKind::Leaf(ids.iter().copied().collect()),
        };
    }

    // Split along the wider bbox dimension at the median point.
    let split_x = (bbox[2] - bbox[0]) >= (bbox[3] - bbox[1]);
    let mid = ids.len() / 2;
    let coord = |id: u32| {
        let p = &points[id as usize];
        if split_x { p.x } else { p.y }
    };
    ids.select_nth_unstable_by(mid, |&a, &b| {
        coord(a)
            .partial_cmp(&coord(b))
            .unwrap_or(core::cmp::Ordering::Equal)
    });

    let (left_ids, right_ids) = ids.split_at_mut(mid);
    let left = build_node(points, left_ids);
    let right = build_node(points, right_ids);
    Node {
        bbox,
        kind: NodeKind::Branch(Box::new(left), Box::new(right)),
    }
}

fn bbox_of(points: &[ClusterPoint], ids: &[u32]) -> [f64; 4] {
    let mut bbox = [
        f64::INFINITY,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NEG_INFINITY,
    ];
    for &id in ids {
        let p = &points[id as usize];
        bbox[0] = bbox[0].min(p.x);
        bbox[1] = bbox[1].min(p.y);
        bbox[2] = bbox[2].max(p.x);
        bbox[3] = bbox[3].max(p.y);
    }
    bbox
}

fn visit_node<F: FnMut(u32, &ClusterPoint)>(
    node: &Node,
    points: &[ClusterPoint],
    region: &SimRegion,
    visitor: &mut F,
) {
    let [min_x, min_y, max_x, max_y] = node.bbox;
    if !region.intersects_box(min_x, min_y, max_x, max_y) {
        return;
    }
    let fully_inside = region.contains_box(min_x, min_y, max_x, max_y);
    match &node.kind {
        NodeKind::Leaf(ids) => {
            for &id in ids {
                let p = &points[id as usize];
                if fully_inside || region.contains(p.x, p.y) {
                    visitor(id, p);
                }
            }
        }
        NodeKind::Branch(left, right) => {
            if fully_inside {
                report_subtree(left, points, visitor);
                report_subtree(right, points, visitor);
            } else {
                visit_node(left, points, region, visitor);
                visit_node(right, points, region, visitor);
            }
        }
    }
}

/// Reports every point of a subtree without further range tests.
fn report_subtree<F: FnMut(u32, &ClusterPoint)>(
    node: &Node,
    points: &[ClusterPoint],
    visitor: &mut F,
) {
    match &node.kind {
        NodeKind::Leaf(ids) => {
            for &id in ids {
                visitor(id, &points[id as usize]);
            }
        }
        NodeKind::Branch(left, right) => {
            report_subtree(left, points, visitor);
            report_subtree(right, points, visitor);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::KdTree;
    use crate::types::{ClusterPoint, SimRegion};

    /// Deterministic xorshift so test data covers the domain without `std`.
    struct Rng(u64);

    impl Rng {
        fn next_f64(&mut self) -> f64 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            ((x >> 11) as f64) / ((1_u64 << 53) as f64)
        }
    }

    fn scattered(n: usize) -> Vec<ClusterPoint> {
        let mut rng = Rng(0x5EED_5EED_5EED_5EED);
        (0..n)
            .map(|i| {
                let x = rng.next_f64() * 2000.0 - 1000.0;
                let y = rng.next_f64() * 2000.0 - 1000.0;
                ClusterPoint::new(x, y, 1.0, [u32::try_from(i).unwrap()])
            })
            .collect()
    }

    fn query_ids(tree: &KdTree, points: &[ClusterPoint], region: SimRegion) -> Vec<u32> {
        let mut out = Vec::new();
        tree.visit(points, region, |id, _| out.push(id));
        out.sort_unstable();
        out
    }

    #[test]
    fn full_domain_query_returns_every_point() {
        let points = scattered(500);
        let tree = KdTree::build(&points);
        assert_eq!(tree.len(), 500);
        let ids = query_ids(&tree, &points, SimRegion::everything());
        assert_eq!(ids.len(), 500);
        assert_eq!(ids, (0..500).collect::<Vec<u32>>());
    }

    #[test]
    fn empty_region_returns_nothing() {
        let points = scattered(200);
        let tree = KdTree::build(&points);
        // A region far outside the populated domain.
        let ids = query_ids(&tree, &points, SimRegion::rect((5000.0, 6000.0), (5000.0, 6000.0)));
        assert!(ids.is_empty());
    }

    #[test]
    fn matches_linear_scan_on_random_rects() {
        let points = scattered(300);
        let tree = KdTree::build(&points);
        let mut rng = Rng(0xABCD_EF01_2345_6789);
        for _ in 0..50 {
            let x0 = rng.next_f64() * 2000.0 - 1000.0;
            let y0 = rng.next_f64() * 2000.0 - 1000.0;
            let region = SimRegion::rect((x0, x0 + 400.0), (y0, y0 + 400.0));

            let expected: Vec<u32> = points
                .iter()
                .enumerate()
                .filter(|(_, p)| region.contains(p.x, p.y))
                .map(|(i, _)| u32::try_from(i).unwrap())
                .collect();
            assert_eq!(query_ids(&tree, &points, region), expected);
        }
    }

    #[test]
    fn band_query_is_unbounded_on_the_free_axis() {
        let points = scattered(300);
        let tree = KdTree::build(&points);
        let region = SimRegion::x_band((100.0, 600.0));
        let expected: Vec<u32> = points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.x >= 100.0 && p.x <= 600.0)
            .map(|(i, _)| u32::try_from(i).unwrap())
            .collect();
        assert_eq!(query_ids(&tree, &points, region), expected);
    }

    #[test]
    fn empty_list_builds_an_empty_tree() {
        let tree = KdTree::build(&[]);
        assert!(tree.is_empty());
        tree.visit(&[], SimRegion::everything(), |_, _| {
            panic!("no points to visit")
        });
    }
}
