// File: crates/progress-core/tests/svg.rs
// Purpose: SVG export reflects scene structure and the current selection.

mod common;

use progress_core::{render_to_svg, render_to_svg_string, ChartEvent, InteractionState, Theme};

#[test]
fn document_is_responsive_and_grouped_per_user() {
    let scene = common::chart().scene();
    let svg = render_to_svg_string(&scene, None, &Theme::light()).unwrap();

    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"viewBox="0 0 800 400""#));
    assert!(svg.contains(r#"preserveAspectRatio="xMidYMid meet""#));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches(r#"class="line-group""#).count(), 3);
    assert_eq!(svg.matches(r#"class="legend""#).count(), 3);
    assert!(svg.contains("Weight Loss December-January"));

    // Mia's two projection runs are single points, Barry's is one dashed path
    assert_eq!(svg.matches(r#"class="projection-line""#).count(), 1);
    assert_eq!(svg.matches(r#"class="connection-line""#).count(), 1);
    assert_eq!(svg.matches(r#"class="goal-point""#).count(), 2);
    assert!(!svg.contains("display:block"), "markers start hidden");
    assert!(!svg.contains(r#"class="tooltip""#));
}

#[test]
fn highlighted_export_shows_selected_markers_only() {
    let chart = common::chart();
    let scene = chart.scene_with(&InteractionState::Selected("Barry".into()));
    let svg = render_to_svg_string(&scene, None, &Theme::light()).unwrap();

    // Barry: 3 actual + 4 projection + 1 goal
    assert_eq!(svg.matches("display:block").count(), 8);
    assert!(svg.contains(r#"data-user="Barry" style="cursor:pointer;opacity:1""#));
    assert!(svg.contains(r#"data-user="Mia" style="cursor:pointer;opacity:0.2""#));
}

#[test]
fn tooltip_is_written_when_present() {
    let chart = common::chart();
    let mut session = chart.session();
    session.handle(ChartEvent::LegendClick("Joyce".into()));
    let target = session.scene().series("Joyce").unwrap().markers[2].center;
    session.handle(ChartEvent::PointerMove(target));

    let svg = render_to_svg_string(session.scene(), session.tooltip(), &Theme::dark()).unwrap();
    assert!(svg.contains(r#"class="tooltip""#));
    assert!(svg.contains("Date: 12.03"));
    assert!(svg.contains("变化: -0.20"));
}

#[test]
fn names_are_escaped() {
    let mut scene = common::chart().scene();
    scene.legend[0].name = "<Mia & co>".into();
    let svg = render_to_svg_string(&scene, None, &Theme::light()).unwrap();
    assert!(svg.contains("&lt;Mia &amp; co&gt;"));
    assert!(!svg.contains("<Mia"));
}

#[test]
fn writes_file_creating_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out/nested/chart.svg");
    render_to_svg(&common::chart().scene(), None, &Theme::light(), &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("responsive-svg"));
}
