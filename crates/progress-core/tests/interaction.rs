// File: crates/progress-core/tests/interaction.rs
// Purpose: Selection state machine, reset paths and tooltip behaviour.

mod common;

use std::time::{Duration, Instant};

use progress_core::geometry::PointF;
use progress_core::{ChartEvent, ChartSession, InteractionState, MarkerKind, Scene};

/// `(name, line opacity, markers visible, legend opacity)` for every user.
fn presentation(scene: &Scene) -> Vec<(String, f32, bool, f32)> {
    scene
        .series
        .iter()
        .zip(&scene.legend)
        .map(|(s, e)| (s.name.clone(), s.line_opacity, s.markers_visible, e.opacity))
        .collect()
}

fn session() -> ChartSession {
    common::chart().session()
}

#[test]
fn legend_click_highlights_one_user() {
    let mut s = session();
    assert!(s.handle(ChartEvent::LegendClick("Barry".into())));
    assert_eq!(s.state(), &InteractionState::Selected("Barry".into()));
    assert_eq!(
        presentation(s.scene()),
        vec![
            ("Mia".into(), 0.2, false, 0.2),
            ("Barry".into(), 1.0, true, 1.0),
            ("Joyce".into(), 0.2, false, 0.2),
        ]
    );
}

#[test]
fn select_then_reset_restores_initial_presentation() {
    let mut s = session();
    let before = presentation(s.scene());

    s.handle(ChartEvent::LegendClick("Mia".into()));
    assert!(s.handle(ChartEvent::DoubleClick));
    assert_eq!(s.state(), &InteractionState::Unselected);
    assert_eq!(presentation(s.scene()), before);

    s.handle(ChartEvent::LegendClick("Mia".into()));
    assert!(s.handle(ChartEvent::ClickOutside));
    assert_eq!(presentation(s.scene()), before);
    assert!(s.scene().series.iter().all(|m| !m.markers_visible), "goal markers hide too");
}

#[test]
fn click_outside_while_unselected_is_noop() {
    let mut s = session();
    let before = presentation(s.scene());
    assert!(!s.handle(ChartEvent::ClickOutside));
    assert!(!s.click(None, Instant::now()));
    assert_eq!(presentation(s.scene()), before);
}

#[test]
fn reclicking_selected_entry_keeps_selection() {
    let mut s = session();
    s.handle(ChartEvent::LegendClick("Joyce".into()));
    let highlighted = presentation(s.scene());
    assert!(!s.handle(ChartEvent::LegendClick("Joyce".into())));
    assert_eq!(s.state(), &InteractionState::Selected("Joyce".into()));
    assert_eq!(presentation(s.scene()), highlighted);
}

#[test]
fn switching_users_needs_no_reset() {
    let mut s = session();
    s.handle(ChartEvent::LegendClick("Mia".into()));
    assert!(s.handle(ChartEvent::LegendClick("Joyce".into())));
    let p = presentation(s.scene());
    assert_eq!(p[0], ("Mia".into(), 0.2, false, 0.2));
    assert_eq!(p[2], ("Joyce".into(), 1.0, true, 1.0));
}

#[test]
fn unknown_user_is_ignored() {
    let mut s = session();
    assert!(!s.handle(ChartEvent::LegendClick("Nobody".into())));
    assert_eq!(s.state(), &InteractionState::Unselected);
}

#[test]
fn raw_clicks_route_to_legend_and_double_click() {
    let mut s = session();
    let entry = s.scene().legend[1].label_at;
    let t0 = Instant::now();

    assert!(s.click(Some(entry), t0));
    assert_eq!(s.state(), &InteractionState::Selected("Barry".into()));

    // plot area single click: nothing happens
    let plot_centre = PointF::new(200.0, 150.0);
    assert!(!s.click(Some(plot_centre), t0 + Duration::from_secs(2)));
    assert_eq!(s.state(), &InteractionState::Selected("Barry".into()));

    // second quick click completes a double-click
    assert!(s.click(Some(plot_centre), t0 + Duration::from_millis(2100)));
    assert_eq!(s.state(), &InteractionState::Unselected);
}

#[test]
fn tooltip_only_for_visible_markers() {
    let mut s = session();
    let mia = s.scene().series("Mia").unwrap().clone();
    let actual = mia.markers.iter().find(|m| m.kind == MarkerKind::Actual).unwrap().clone();

    assert!(!s.handle(ChartEvent::PointerMove(actual.center)));
    assert!(s.tooltip().is_none());

    s.handle(ChartEvent::LegendClick("Mia".into()));
    assert!(s.handle(ChartEvent::PointerMove(actual.center)));
    let tip = s.tooltip().unwrap();
    assert_eq!(tip.lines, vec!["Date: 12.01".to_string(), "变化: -0.40".to_string()]);
    assert_eq!(tip.anchor, PointF::new(actual.center.x + 5.0, actual.center.y - 28.0));

    // moving within the same marker keeps a single tooltip in place
    assert!(!s.handle(ChartEvent::PointerMove(PointF::new(actual.center.x + 1.0, actual.center.y))));

    assert!(s.handle(ChartEvent::PointerOut));
    assert!(s.tooltip().is_none());
}

#[test]
fn tooltip_shows_projected_and_goal_values() {
    let mut s = session();
    s.handle(ChartEvent::LegendClick("Mia".into()));
    let mia = s.scene().series("Mia").unwrap().clone();

    let proj = mia.markers.iter().find(|m| m.kind == MarkerKind::Projection).unwrap();
    s.handle(ChartEvent::PointerMove(proj.center));
    assert_eq!(s.tooltip().unwrap().lines[1], "预测: -1.60");

    let goal = mia.goal.unwrap();
    s.handle(ChartEvent::PointerMove(goal.center));
    assert_eq!(s.tooltip().unwrap().lines, vec!["Date: 12.12".to_string(), "目标: -5.00".to_string()]);

    // a reset removes the tooltip with the markers
    assert!(s.handle(ChartEvent::DoubleClick));
    assert!(s.tooltip().is_none());
}
