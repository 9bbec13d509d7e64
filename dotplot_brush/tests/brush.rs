// Copyright 2025 the Dotplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag sequences exercised end to end against the index cache.

use dotplot_brush::{BrushGesture, BrushMode, BrushRegion, FrameSnapshot};
use dotplot_index::{AggregationSet, AxisPair, ClusterIndexCache, ClusterPoint};
use dotplot_scale::{AxisRole, AxisScales, Scale, ScaleKind, SimScale};
use dotplot_zoom::ZoomTransform;

fn snapshot(transform: ZoomTransform) -> FrameSnapshot {
    FrameSnapshot::new(
        transform,
        AxisScales::new(
            Scale::new(ScaleKind::Linear, (1980.0, 2020.0), (0.0, 800.0)),
            SimScale::new((-1000.0, 1000.0), (0.0, 800.0)),
        ),
        AxisScales::new(
            Scale::new(ScaleKind::Linear, (0.0, 10.0), (600.0, 0.0)),
            SimScale::new((-1000.0, 1000.0), (600.0, 0.0)),
        ),
    )
}

/// A row of singleton clusters along sim y = 0, one every 100 sim units.
fn dataset() -> AggregationSet {
    let mut agg = AggregationSet::new(1, (-1000.0, 1000.0), (-1000.0, 1000.0));
    let points = (0..19_u32)
        .map(|i| {
            let x = -900.0 + f64::from(i) * 100.0;
            ClusterPoint::new(x, 0.0, 1.0, [i])
        })
        .collect();
    agg.insert(0, AxisPair::new("released", "budget"), points);
    agg
}

#[test]
fn a_drag_reuses_one_index_across_steps() {
    let agg = dataset();
    let resolved = agg.resolve(0, "released", "budget").unwrap();
    let mut cache = ClusterIndexCache::new();
    let snap = snapshot(ZoomTransform::IDENTITY);

    let mut brush = BrushGesture::new();
    brush.begin(BrushMode::Range(AxisRole::X));

    // The drag widens pixel by pixel; membership grows monotonically.
    let mut prev_len = 0;
    for step in 1..=10 {
        let end = 400.0 + f64::from(step) * 40.0;
        let outcome = brush
            .update(
                BrushRegion::Interval(400.0, end),
                &snap,
                &mut cache,
                &agg,
                &resolved,
            )
            .unwrap();
        assert!(outcome.item_ids.len() >= prev_len);
        prev_len = outcome.item_ids.len();
    }
    brush.end();

    // Every pointer-move queried the same memoized tree.
    assert_eq!(cache.build_count(), 1);
    // 400..800 px covers sim [0, 1000]: clusters at 0, 100, ..., 900.
    assert_eq!(prev_len, 10);
}

#[test]
fn endpoint_order_does_not_change_membership() {
    let agg = dataset();
    let resolved = agg.resolve(0, "released", "budget").unwrap();
    let mut cache = ClusterIndexCache::new();
    let snap = snapshot(ZoomTransform::IDENTITY);

    let mut brush = BrushGesture::new();
    brush.begin(BrushMode::Range(AxisRole::X));
    let forward = brush
        .update(
            BrushRegion::Interval(200.0, 600.0),
            &snap,
            &mut cache,
            &agg,
            &resolved,
        )
        .unwrap();
    let backward = brush
        .update(
            BrushRegion::Interval(600.0, 200.0),
            &snap,
            &mut cache,
            &agg,
            &resolved,
        )
        .unwrap();
    assert_eq!(forward.item_ids, backward.item_ids);
    assert_eq!(forward.raw_range, backward.raw_range);
}

#[test]
fn zoomed_snapshot_shifts_the_queried_window() {
    let agg = dataset();
    let resolved = agg.resolve(0, "released", "budget").unwrap();
    let mut cache = ClusterIndexCache::new();

    let mut brush = BrushGesture::new();
    brush.begin(BrushMode::Range(AxisRole::X));

    // Identity: pixels 0..400 cover sim [-1000, 0].
    let identity = brush
        .update(
            BrushRegion::Interval(0.0, 400.0),
            &snapshot(ZoomTransform::IDENTITY),
            &mut cache,
            &agg,
            &resolved,
        )
        .unwrap();
    assert_eq!(identity.item_ids.len(), 10);

    // k=2 anchored at the plot center: the same pixels now cover only
    // sim [-500, 0].
    let zoomed = brush
        .update(
            BrushRegion::Interval(0.0, 400.0),
            &snapshot(ZoomTransform::new(2.0, -400.0, -300.0)),
            &mut cache,
            &agg,
            &resolved,
        )
        .unwrap();
    assert_eq!(zoomed.item_ids.len(), 6);
    assert!(zoomed.item_ids.iter().all(|id| identity.item_ids.contains(id)));
}
