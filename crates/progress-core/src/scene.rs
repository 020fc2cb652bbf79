// File: crates/progress-core/src/scene.rs
// Summary: Retained scene (display list) built once from assembled series; interaction only flips
// presentation attributes on it.
//
// All coordinates are logical canvas pixels (margins already applied), so the same scene feeds
// the Skia rasteriser, the SVG writer and pointer hit-testing.

use skia_safe as skia;
use tracing::debug;

use crate::assembly::{Assembled, UserSeries};
use crate::config::ChartConfig;
use crate::geometry::{PointF, RectF};
use crate::palette::ColorAssignment;
use crate::scale::{PointScale, ValueScale};

pub const LINE_WIDTH: f32 = 2.0;
pub const DASH: [f32; 2] = [4.0, 4.0];
pub const POINT_RADIUS: f32 = 4.0;
pub const GOAL_RADIUS: f32 = 5.0;
pub const LEGEND_GAP: f32 = 20.0;
pub const LEGEND_ROW: f32 = 20.0;
pub const LEGEND_SWATCH: f32 = 10.0;
pub const LEGEND_FONT: f32 = 12.0;
pub const AXIS_FONT: f32 = 11.0;
pub const TITLE_FONT: f32 = 16.0;
pub const TOOLTIP_FONT: f32 = 12.0;
pub const TOOLTIP_PAD: f32 = 5.0;
pub const TOOLTIP_LINE_HEIGHT: f32 = TOOLTIP_FONT * 1.3;
const Y_TICK_COUNT: usize = 10;
// rough glyph advance used to thin crowded date labels
const DATE_LABEL_ADVANCE: f32 = 6.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    Actual,
    Projection,
    Goal,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointMarker {
    pub kind: MarkerKind,
    pub center: PointF,
    pub radius: f32,
    pub date: String,
    /// Tooltip value: raw delta (actual), projected total (projection) or target (goal).
    pub value: f64,
}

impl PointMarker {
    pub fn hit(&self, p: PointF) -> bool {
        let r = self.radius + 1.0;
        self.center.distance_sq(p) <= r * r
    }
}

/// Every mark belonging to one user, plus the presentation attributes interaction may change.
#[derive(Clone, Debug)]
pub struct SeriesMarks {
    pub name: String,
    pub color: skia::Color,
    /// Solid polyline; fewer than two points draws nothing.
    pub actual_line: Vec<PointF>,
    /// Dashed polylines, one per run of defined projection values.
    pub projection_runs: Vec<Vec<PointF>>,
    /// Dashed bridge from the last actual point to the first projection point.
    pub connection: Option<(PointF, PointF)>,
    pub markers: Vec<PointMarker>,
    pub goal: Option<PointMarker>,
    pub line_opacity: f32,
    pub markers_visible: bool,
}

#[derive(Clone, Debug)]
pub struct LegendEntry {
    pub name: String,
    pub color: skia::Color,
    pub swatch: RectF,
    /// Baseline origin of the name label.
    pub label_at: PointF,
    /// Clickable area (swatch, label and the gutter to the right edge).
    pub bounds: RectF,
    pub opacity: f32,
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub plot: RectF,
    /// `(label, x, label shown)` per date; gridlines are drawn for every entry.
    pub x_ticks: Vec<(String, f32, bool)>,
    /// `(value, y)` per value tick.
    pub y_ticks: Vec<(f64, f32)>,
    pub title: Option<(String, PointF)>,
    pub series: Vec<SeriesMarks>,
    pub legend: Vec<LegendEntry>,
    pub dimmed_opacity: f32,
}

impl Scene {
    pub fn build(assembled: &Assembled, config: &ChartConfig, colors: &ColorAssignment) -> Self {
        let m = config.margins;
        let (left, top) = (m.left as f32, m.top as f32);
        let plot = RectF::from_ltwh(left, top, config.plot_width(), config.plot_height());

        let x = PointScale::new(assembled.axis.labels(), 0.0, plot.width());
        let y = ValueScale::from_domain(config.y_domain, plot.height());
        let at = |date: &str, v: f64| x.position(date).map(|px| PointF::new(left + px, top + y.to_px(v)));

        let stride = label_stride(assembled.axis.labels(), x.step());
        let x_ticks = x
            .ticks()
            .enumerate()
            .map(|(i, (label, px))| (label.to_string(), left + px, i % stride == 0))
            .collect();
        let y_ticks = y.ticks(Y_TICK_COUNT).into_iter().map(|v| (v, top + y.to_px(v))).collect();

        let title = config
            .title
            .clone()
            .map(|t| (t, PointF::new(plot.left + plot.width() / 2.0, top / 2.0)));

        let series = assembled
            .series
            .iter()
            .map(|s| build_series(s, colors, &at))
            .collect::<Vec<_>>();

        let legend = series
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let x0 = plot.right + LEGEND_GAP;
                let y0 = plot.top + i as f32 * LEGEND_ROW;
                LegendEntry {
                    name: s.name.clone(),
                    color: s.color,
                    swatch: RectF::from_ltwh(x0, y0, LEGEND_SWATCH, LEGEND_SWATCH),
                    label_at: PointF::new(x0 + 20.0, y0 + LEGEND_SWATCH),
                    bounds: RectF::from_ltrb(x0, y0 - 4.0, config.width as f32, y0 + LEGEND_ROW - 4.0),
                    opacity: 1.0,
                }
            })
            .collect();

        debug!(series = series.len(), ticks = assembled.axis.len(), "scene built");
        Self {
            width: config.width as f32,
            height: config.height as f32,
            plot,
            x_ticks,
            y_ticks,
            title,
            series,
            legend,
            dimmed_opacity: config.dimmed_opacity,
        }
    }

    /// Name of the legend entry under `p`.
    pub fn legend_at(&self, p: PointF) -> Option<&str> {
        self.legend.iter().find(|e| e.bounds.contains(p)).map(|e| e.name.as_str())
    }

    /// Topmost visible point marker under `p`, with the series it belongs to.
    /// Goal markers are drawn above all series, later series above earlier ones.
    pub fn marker_at(&self, p: PointF) -> Option<(&SeriesMarks, &PointMarker)> {
        let visible = || self.series.iter().rev().filter(|s| s.markers_visible);
        let goals = visible().filter_map(|s| s.goal.as_ref().map(|g| (s, g)));
        let points = visible().flat_map(|s| s.markers.iter().rev().map(move |m| (s, m)));
        goals.chain(points).find(|(_, m)| m.hit(p))
    }

    pub fn series(&self, name: &str) -> Option<&SeriesMarks> {
        self.series.iter().find(|s| s.name == name)
    }
}

fn build_series(
    s: &UserSeries,
    colors: &ColorAssignment,
    at: &impl Fn(&str, f64) -> Option<PointF>,
) -> SeriesMarks {
    let color = colors.get(&s.name).unwrap_or(skia::Color::BLACK);

    let actual_line = s.actual.iter().filter_map(|a| at(&a.date, a.cumulative)).collect::<Vec<_>>();

    let projection_runs = s
        .projection_runs()
        .into_iter()
        .map(|run| run.iter().filter_map(|p| p.value.and_then(|v| at(&p.date, v))).collect())
        .collect();

    let first_projection = s.projection.first().and_then(|p| p.value.and_then(|v| at(&p.date, v)));
    let connection = actual_line.last().copied().zip(first_projection);

    let mut markers = Vec::with_capacity(s.actual.len() + s.projection.len());
    for a in &s.actual {
        if let Some(center) = at(&a.date, a.cumulative) {
            markers.push(PointMarker { kind: MarkerKind::Actual, center, radius: POINT_RADIUS, date: a.date.clone(), value: a.raw });
        }
    }
    for p in &s.projection {
        let Some(v) = p.value else { continue };
        if let Some(center) = at(&p.date, v) {
            markers.push(PointMarker { kind: MarkerKind::Projection, center, radius: POINT_RADIUS, date: p.date.clone(), value: v });
        }
    }

    let goal = s.goal.as_ref().and_then(|g| {
        at(&g.date, g.value).map(|center| PointMarker {
            kind: MarkerKind::Goal,
            center,
            radius: GOAL_RADIUS,
            date: g.date.clone(),
            value: g.value,
        })
    });

    SeriesMarks {
        name: s.name.clone(),
        color,
        actual_line,
        projection_runs,
        connection,
        markers,
        goal,
        line_opacity: 1.0,
        markers_visible: false,
    }
}

/// Show every n-th date label so neighbouring labels do not overlap.
fn label_stride(labels: &[String], step: f32) -> usize {
    let widest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) as f32 * DATE_LABEL_ADVANCE;
    if step <= 0.0 || widest <= step {
        return 1;
    }
    (widest / step).ceil() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_thins_only_when_crowded() {
        let labels: Vec<String> = (0..10).map(|i| format!("12.{i:02}")).collect();
        assert_eq!(label_stride(&labels, 60.0), 1);
        assert_eq!(label_stride(&labels, 10.0), 4);
    }
}
