// File: crates/progress-core/src/svg.rs
// Summary: Serialise a scene to a responsive SVG document (viewBox + xMidYMid meet).
// Notes:
// - Presentation attributes (opacity, display) are written as they currently stand, so a
//   scene with a selection applied exports the highlighted view.

use std::fmt::{self, Write as _};
use std::path::Path;

use skia_safe as skia;
use tracing::info;

use crate::chart::{format_tick, write_output};
use crate::error::{ChartError, Result};
use crate::geometry::PointF;
use crate::interaction::Tooltip;
use crate::palette::to_hex;
use crate::scene::{
    MarkerKind, PointMarker, Scene, AXIS_FONT, LEGEND_FONT, LEGEND_SWATCH, LINE_WIDTH, TITLE_FONT, TOOLTIP_FONT,
    TOOLTIP_LINE_HEIGHT, TOOLTIP_PAD,
};
use crate::theme::Theme;

pub fn render_to_svg_string(scene: &Scene, tooltip: Option<&Tooltip>, theme: &Theme) -> Result<String> {
    let mut out = String::with_capacity(16 * 1024);
    write_svg(&mut out, scene, tooltip, theme).map_err(|e| ChartError::Encode(format!("svg: {e}")))?;
    Ok(out)
}

pub fn render_to_svg(scene: &Scene, tooltip: Option<&Tooltip>, theme: &Theme, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let svg = render_to_svg_string(scene, tooltip, theme)?;
    write_output(path, svg.as_bytes())?;
    info!(path = %path.display(), "wrote SVG");
    Ok(())
}

fn write_svg(out: &mut String, scene: &Scene, tooltip: Option<&Tooltip>, theme: &Theme) -> fmt::Result {
    let plot = scene.plot;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" preserveAspectRatio="xMidYMid meet" class="responsive-svg">"#,
        w = scene.width,
        h = scene.height
    )?;
    writeln!(out, r#"<rect width="100%" height="100%" fill="{}"/>"#, css(theme.background))?;

    // gridlines
    writeln!(out, r#"<g class="grid" stroke="{}" stroke-dasharray="4,4">"#, css(theme.grid))?;
    for (_, x, _) in &scene.x_ticks {
        writeln!(out, r#"<line x1="{x:.2}" y1="{:.2}" x2="{x:.2}" y2="{:.2}"/>"#, plot.top, plot.bottom)?;
    }
    for (_, y) in &scene.y_ticks {
        writeln!(out, r#"<line x1="{:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}"/>"#, plot.left, plot.right)?;
    }
    writeln!(out, "</g>")?;

    // axes
    let axis = css(theme.axis_line);
    let label = css(theme.axis_label);
    writeln!(out, r#"<g class="x-axis" font-size="{AXIS_FONT}" fill="{label}" text-anchor="middle">"#)?;
    writeln!(out, r#"<line x1="{:.2}" y1="{b:.2}" x2="{:.2}" y2="{b:.2}" stroke="{axis}"/>"#, plot.left, plot.right, b = plot.bottom)?;
    for (text, x, shown) in &scene.x_ticks {
        writeln!(out, r#"<line x1="{x:.2}" y1="{:.2}" x2="{x:.2}" y2="{:.2}" stroke="{axis}"/>"#, plot.bottom, plot.bottom + 6.0)?;
        if *shown {
            writeln!(out, r#"<text x="{x:.2}" y="{:.2}">{}</text>"#, plot.bottom + 20.0, escape(text))?;
        }
    }
    writeln!(out, "</g>")?;
    writeln!(out, r#"<g class="y-axis" font-size="{AXIS_FONT}" fill="{label}" text-anchor="end">"#)?;
    writeln!(out, r#"<line x1="{l:.2}" y1="{:.2}" x2="{l:.2}" y2="{:.2}" stroke="{axis}"/>"#, plot.top, plot.bottom, l = plot.left)?;
    for (value, y) in &scene.y_ticks {
        writeln!(out, r#"<line x1="{:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" stroke="{axis}"/>"#, plot.left - 6.0, plot.left)?;
        writeln!(out, r#"<text x="{:.2}" y="{:.2}">{}</text>"#, plot.left - 9.0, y + 4.0, format_tick(*value))?;
    }
    writeln!(out, "</g>")?;

    if let Some((title, at)) = &scene.title {
        writeln!(
            out,
            r#"<text class="title" x="{:.2}" y="{:.2}" text-anchor="middle" font-size="{TITLE_FONT}" font-weight="bold" fill="{}">{}</text>"#,
            at.x,
            at.y,
            css(theme.title),
            escape(title)
        )?;
    }

    for s in &scene.series {
        let color = to_hex(s.color);
        let display = if s.markers_visible { "block" } else { "none" };
        writeln!(out, r#"<g class="line-group" data-user="{}">"#, escape(&s.name))?;
        if s.actual_line.len() >= 2 {
            writeln!(
                out,
                r#"<path class="line" d="{}" fill="none" stroke="{color}" stroke-width="{LINE_WIDTH}" style="opacity:{}"/>"#,
                path_data(&s.actual_line),
                s.line_opacity
            )?;
        }
        for run in s.projection_runs.iter().filter(|r| r.len() >= 2) {
            writeln!(
                out,
                r#"<path class="projection-line" d="{}" fill="none" stroke="{color}" stroke-width="{LINE_WIDTH}" style="stroke-dasharray:4,4;opacity:{}"/>"#,
                path_data(run),
                s.line_opacity
            )?;
        }
        if let Some((a, b)) = s.connection {
            writeln!(
                out,
                r#"<line class="connection-line" x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{color}" stroke-width="{LINE_WIDTH}" style="stroke-dasharray:4,4;opacity:{}"/>"#,
                a.x, a.y, b.x, b.y, s.line_opacity
            )?;
        }
        for m in &s.markers {
            write_marker(out, m, &color, display)?;
        }
        writeln!(out, "</g>")?;
    }
    for s in &scene.series {
        if let Some(g) = &s.goal {
            let display = if s.markers_visible { "block" } else { "none" };
            write_marker(out, g, &to_hex(s.color), display)?;
        }
    }

    for e in &scene.legend {
        writeln!(
            out,
            r#"<g class="legend" data-user="{}" style="cursor:pointer;opacity:{}"><rect x="{:.2}" y="{:.2}" width="{LEGEND_SWATCH}" height="{LEGEND_SWATCH}" fill="{}"/><text x="{:.2}" y="{:.2}" font-size="{LEGEND_FONT}" fill="{}">{}</text></g>"#,
            escape(&e.name),
            e.opacity,
            e.swatch.left,
            e.swatch.top,
            to_hex(e.color),
            e.label_at.x,
            e.label_at.y,
            css(theme.legend_label),
            escape(&e.name)
        )?;
    }

    if let Some(tip) = tooltip {
        write_tooltip(out, tip, theme)?;
    }

    writeln!(out, "</svg>")
}

fn write_marker(out: &mut String, m: &PointMarker, color: &str, display: &str) -> fmt::Result {
    let class = match m.kind {
        MarkerKind::Actual => "actual-point",
        MarkerKind::Projection => "projection-point",
        MarkerKind::Goal => "goal-point",
    };
    writeln!(
        out,
        r#"<circle class="{class}" cx="{:.2}" cy="{:.2}" r="{}" fill="{color}" data-date="{}" data-value="{:.2}" style="display:{display}"/>"#,
        m.center.x,
        m.center.y,
        m.radius,
        escape(&m.date),
        m.value
    )
}

fn write_tooltip(out: &mut String, tip: &Tooltip, theme: &Theme) -> fmt::Result {
    // no font metrics here; approximate the box from character counts
    let chars = tip.lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as f32;
    let w = chars * TOOLTIP_FONT * 0.6 + TOOLTIP_PAD * 2.0;
    let h = TOOLTIP_LINE_HEIGHT * tip.lines.len() as f32 + TOOLTIP_PAD * 2.0;
    writeln!(
        out,
        r#"<g class="tooltip"><rect x="{:.2}" y="{:.2}" width="{w:.2}" height="{h:.2}" fill="{}" stroke="{}"/>"#,
        tip.anchor.x,
        tip.anchor.y,
        css(theme.tooltip_fill),
        css(theme.tooltip_border)
    )?;
    for (i, line) in tip.lines.iter().enumerate() {
        writeln!(
            out,
            r#"<text x="{:.2}" y="{:.2}" font-size="{TOOLTIP_FONT}" fill="{}">{}</text>"#,
            tip.anchor.x + TOOLTIP_PAD,
            tip.anchor.y + TOOLTIP_PAD + TOOLTIP_LINE_HEIGHT * i as f32 + TOOLTIP_FONT,
            css(theme.tooltip_text),
            escape(line)
        )?;
    }
    writeln!(out, "</g>")
}

fn path_data(points: &[PointF]) -> String {
    let mut d = String::with_capacity(points.len() * 16);
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{cmd}{:.2},{:.2}", p.x, p.y);
    }
    d
}

fn css(c: skia::Color) -> String {
    if c.a() == 255 {
        to_hex(c)
    } else {
        format!("rgba({},{},{},{:.2})", c.r(), c.g(), c.b(), c.a() as f32 / 255.0)
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
