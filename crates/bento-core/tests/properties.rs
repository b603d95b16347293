// File: crates/bento-core/tests/properties.rs
// Purpose: Cross-module behaviour checks through the public API.

use std::f32::consts::PI;

use bento_core::bin::{bin, extent, BinStrategy};
use bento_core::data::{CategoryValue, HeatCell, MultiSeriesRow};
use bento_core::{BarChart, DonutChart, Heatmap, Mount, MultiLineChart, RadialGauge, Scene, Shape, Size, SizeOracle, Theme, Widget};

fn drawn<W: Widget>(w: &W, measured: Size) -> Scene {
    let size = w.layout(measured);
    let mut scene = Scene::new(size);
    w.draw(size, &Theme::dark(), &mut scene);
    scene.settled()
}

#[test]
fn bins_cover_the_extent_without_gaps() {
    let values: Vec<f64> = (0..500).map(|i| ((i * 37) % 101) as f64 * 0.73 - 12.0).collect();
    let (lo, hi) = extent(&values).unwrap();
    for strategy in [BinStrategy::EqualWidth, BinStrategy::NiceThresholds] {
        let bins = bin(&values, 20, strategy);
        assert!(bins.first().unwrap().x0 <= lo);
        assert!(bins.last().unwrap().x1 >= hi);
        for pair in bins.windows(2) {
            assert_eq!(pair[0].x1, pair[1].x0);
        }
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
    }
}

#[test]
fn equal_values_make_one_bin() {
    let bins = bin(&[7.0; 12], 20, BinStrategy::EqualWidth);
    assert_eq!(bins.len(), 1);
    assert_eq!(bins[0].count, 12);
}

#[test]
fn hiding_a_series_keeps_the_y_domain() {
    let rows = vec![
        MultiSeriesRow::new("d1").with("a", 10.0).with("b", 20.0),
        MultiSeriesRow::new("d2").with("a", 30.0).with("b", 5.0),
    ];
    let chart = MultiLineChart::new(rows, ["a", "b"]);
    assert!((chart.y_domain().1 - 33.0).abs() < 1e-9);

    let mut mount = Mount::new(chart, Theme::dark());
    assert_eq!(mount.scene().tagged("series:b").count(), 1);
    let (_, b_box) = mount.widget().legend_boxes().into_iter().find(|(k, _)| k == "b").unwrap();
    mount.click(b_box.center());
    assert!(!mount.widget().is_active("b"));
    assert!((mount.widget().y_domain().1 - 33.0).abs() < 1e-9);
    assert_eq!(mount.scene().tagged("series:b").count(), 0);
    assert_eq!(mount.scene().tagged("series:a").count(), 1);
}

#[test]
fn zero_bar_is_flat_and_max_bar_fills_the_plot() {
    let chart = BarChart::new(vec![CategoryValue::new("A", 0.0), CategoryValue::new("B", 10.0)]);
    let size = chart.layout(Size::new(600.0, 300.0));
    let rects = chart.bar_rects(size);
    assert_eq!(rects[0].height, 0.0);
    let inner = chart.margin.inner(size);
    assert!((rects[1].height - inner.height).abs() < 1e-3);
}

#[test]
fn all_zero_heatmap_uses_the_low_color() {
    let theme = Theme::dark();
    let map = Heatmap::new(vec![HeatCell::new("r1", "c1", 0.0), HeatCell::new("r2", "c1", 0.0)]);
    assert!(map.cell_colors(&theme).iter().all(|c| *c == theme.bg_tertiary));
    assert_eq!(drawn(&map, Size::new(600.0, 300.0)).tagged("cell:").count(), 2);
}

#[test]
fn half_and_half_donut() {
    let donut = DonutChart::new(vec![CategoryValue::new("x", 50.0), CategoryValue::new("y", 50.0)]);
    for arc in donut.arcs() {
        assert!((arc.sweep() - PI).abs() < 1e-5);
    }
    let scene = drawn(&donut, Size::new(600.0, 300.0));
    let label = scene.tagged("center:total").find_map(|it| match &it.shape {
        Shape::Text { content, .. } => Some(content.clone()),
        _ => None,
    });
    assert_eq!(label.as_deref(), Some("100"));
}

#[test]
fn gauge_clamps_to_the_ring() {
    assert_eq!(RadialGauge::new(150.0).fill_fraction(), 1.0);
    assert_eq!(RadialGauge::new(-5.0).fill_fraction(), 0.0);
    assert_eq!(drawn(&RadialGauge::new(-5.0), Size::default()).tagged("gauge:fill").count(), 0);
}

#[test]
fn size_oracle_floors_width_before_aspect() {
    let oracle = SizeOracle::new(300.0, Some(0.42));
    assert_eq!(oracle.compute(1000.0), Size::new(1000.0, 420.0));
    assert_eq!(oracle.compute(0.0), Size::new(320.0, 134.0));
}
