// File: crates/progress-core/tests/scene.rs
// Purpose: Mark construction from assembled series (lines, gaps, connection, markers, legend).

mod common;

use progress_core::scene::{GOAL_RADIUS, POINT_RADIUS};
use progress_core::{MarkerKind, PointScale, ValueScale};

#[test]
fn lines_markers_and_connection_per_user() {
    let chart = common::chart();
    let scene = chart.scene();

    let mia = scene.series("Mia").unwrap();
    assert_eq!(mia.actual_line.len(), 5);
    // -1.6, gap, -2.1: two single-point runs, no dashed segment
    assert_eq!(mia.projection_runs.iter().map(Vec::len).collect::<Vec<_>>(), [1, 1]);
    assert!(mia.connection.is_some());
    assert_eq!(mia.markers.iter().filter(|m| m.kind == MarkerKind::Actual).count(), 5);
    assert_eq!(mia.markers.iter().filter(|m| m.kind == MarkerKind::Projection).count(), 2);

    let barry = scene.series("Barry").unwrap();
    assert_eq!(barry.projection_runs.len(), 1);
    assert_eq!(barry.projection_runs[0].len(), 4);
    // first projected value is null, so there is nothing to bridge to
    assert!(barry.connection.is_none());

    let joyce = scene.series("Joyce").unwrap();
    assert!(joyce.projection_runs.is_empty());
    assert!(joyce.connection.is_none());
    assert!(joyce.goal.is_none());
}

#[test]
fn marks_sit_on_the_scales() {
    let chart = common::chart();
    let scene = chart.scene();
    let cfg = &chart.config;
    let (left, top) = (cfg.margins.left as f32, cfg.margins.top as f32);
    let x = PointScale::new(chart.assembled.axis.labels(), 0.0, cfg.plot_width());
    let y = ValueScale::from_domain(cfg.y_domain, cfg.plot_height());

    let mia = scene.series("Mia").unwrap();
    let first = mia.actual_line[0];
    assert!((first.x - (left + x.position("12.01").unwrap())).abs() < 1e-3);
    assert!((first.y - (top + y.to_px(-0.4))).abs() < 1e-3);

    let (from, to) = mia.connection.unwrap();
    assert_eq!(from, *mia.actual_line.last().unwrap());
    assert!((to.x - (left + x.position("12.06").unwrap())).abs() < 1e-3);
    assert!((to.y - (top + y.to_px(-1.6))).abs() < 1e-3);

    let goal = mia.goal.as_ref().unwrap();
    assert_eq!(goal.radius, GOAL_RADIUS);
    assert!((goal.center.x - (left + cfg.plot_width())).abs() < 1e-3, "goal date is the last axis label");
    assert!(mia.markers.iter().all(|m| m.radius == POINT_RADIUS));
}

#[test]
fn everything_starts_unhighlighted_and_hidden() {
    let scene = common::chart().scene();
    for s in &scene.series {
        assert_eq!(s.line_opacity, 1.0);
        assert!(!s.markers_visible);
    }
    assert!(scene.legend.iter().all(|e| e.opacity == 1.0));
    assert!(scene.marker_at(scene.series[0].markers[0].center).is_none());
}

#[test]
fn legend_stacks_right_of_plot_with_shared_colours() {
    let scene = common::chart().scene();
    assert_eq!(scene.legend.len(), 3);
    for (i, e) in scene.legend.iter().enumerate() {
        assert_eq!(e.swatch.left, scene.plot.right + 20.0);
        assert_eq!(e.swatch.top, scene.plot.top + 20.0 * i as f32);
        assert_eq!(e.color, scene.series[i].color);
        assert_eq!(scene.legend_at(e.label_at).map(str::to_string), Some(e.name.clone()));
    }
    assert_ne!(scene.legend[0].color, scene.legend[1].color);
}

#[test]
fn gridlines_and_title_follow_config() {
    let chart = common::chart();
    let scene = chart.scene();
    assert_eq!(scene.x_ticks.len(), chart.assembled.axis.len());
    assert_eq!(scene.y_ticks.len(), 9);
    let (title, at) = scene.title.clone().unwrap();
    assert_eq!(title, "Weight Loss December-January");
    // centred over the plot, not the whole canvas
    assert_eq!(at.x, scene.plot.left + scene.plot.width() / 2.0);
    assert_eq!(at.x, 375.0);
}
