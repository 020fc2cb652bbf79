// File: crates/progress-core/src/chart.rs
// Summary: ProgressChart (load -> assemble -> scene) and the Skia CPU raster pipeline for scenes.

use std::path::Path;

use skia_safe as skia;
use tracing::info;

use crate::assembly::{assemble, Assembled};
use crate::config::ChartConfig;
use crate::dataset::{load_dataset, RawDataset};
use crate::error::{ChartError, Result};
use crate::geometry::{PointF, Viewport};
use crate::interaction::{apply_selection, ChartSession, InteractionState, Tooltip};
use crate::palette::ColorAssignment;
use crate::scene::{
    Scene, SeriesMarks, AXIS_FONT, DASH, LEGEND_FONT, LINE_WIDTH, TITLE_FONT, TOOLTIP_FONT, TOOLTIP_LINE_HEIGHT,
    TOOLTIP_PAD,
};
use crate::text::TextShaper;
use crate::theme::{self, Theme};
use crate::types::{HEIGHT, WIDTH};

const TICK_SIZE: f32 = 6.0;

/// Output surface settings. The chart keeps its logical aspect ratio inside any surface size.
#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub theme: Theme,
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { width: WIDTH, height: HEIGHT, theme: Theme::light(), draw_labels: true }
    }
}

/// Assembled data plus everything needed to build scenes from it.
#[derive(Clone, Debug)]
pub struct ProgressChart {
    pub config: ChartConfig,
    pub assembled: Assembled,
    pub colors: ColorAssignment,
}

impl ProgressChart {
    pub fn new(data: &RawDataset, config: ChartConfig) -> Result<Self> {
        let assembled = assemble(data, config.goal.as_ref())?;
        let colors = ColorAssignment::new(assembled.series.iter().map(|s| s.name.as_str()), config.palette);
        Ok(Self { config, assembled, colors })
    }

    /// Load the dataset from `path` and assemble it. Fails before anything is drawn.
    pub fn load(path: impl AsRef<Path>, config: ChartConfig) -> Result<Self> {
        let data = load_dataset(path)?;
        Self::new(&data, config)
    }

    /// Fresh scene in the `Unselected` state.
    pub fn scene(&self) -> Scene {
        Scene::build(&self.assembled, &self.config, &self.colors)
    }

    /// Scene with `state` applied, for static output of a highlighted user.
    pub fn scene_with(&self, state: &InteractionState) -> Scene {
        let mut scene = self.scene();
        apply_selection(&mut scene, state);
        scene
    }

    pub fn session(&self) -> ChartSession {
        ChartSession::new(
            self.scene(),
            self.config.tooltip.clone(),
            std::time::Duration::from_millis(self.config.double_click_ms),
        )
    }

    /// Render options at `scale` times the logical canvas size, themed from the config.
    pub fn render_options(&self, scale: f32) -> RenderOptions {
        let scale = scale.max(0.1);
        RenderOptions {
            width: (self.config.width as f32 * scale).round() as i32,
            height: (self.config.height as f32 * scale).round() as i32,
            theme: theme::find(&self.config.theme),
            draw_labels: true,
        }
    }

    pub fn render_to_png(&self, opts: &RenderOptions, output_png_path: impl AsRef<Path>) -> Result<()> {
        render_to_png(&self.scene(), None, opts, output_png_path)
    }

    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        render_to_png_bytes(&self.scene(), None, opts)
    }
}

/// Render to a tightly packed RGBA8 buffer: `(pixels, width, height, row_bytes)`.
pub fn render_to_rgba8(scene: &Scene, tooltip: Option<&Tooltip>, opts: &RenderOptions) -> Result<(Vec<u8>, i32, i32, usize)> {
    let (w, h) = surface_size(opts)?;
    let mut surface = raster(scene, tooltip, opts)?;
    let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
    let row_bytes = w as usize * 4;
    let mut pixels = vec![0u8; row_bytes * h as usize];
    if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
        return Err(ChartError::Encode("reading back raster pixels failed".into()));
    }
    Ok((pixels, w, h, row_bytes))
}

pub fn render_to_png_bytes(scene: &Scene, tooltip: Option<&Tooltip>, opts: &RenderOptions) -> Result<Vec<u8>> {
    let mut surface = raster(scene, tooltip, opts)?;
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| ChartError::Encode("encode PNG failed".into()))?;
    Ok(data.as_bytes().to_vec())
}

pub fn render_to_png(
    scene: &Scene,
    tooltip: Option<&Tooltip>,
    opts: &RenderOptions,
    output_png_path: impl AsRef<Path>,
) -> Result<()> {
    let path = output_png_path.as_ref();
    let bytes = render_to_png_bytes(scene, tooltip, opts)?;
    write_output(path, &bytes)?;
    info!(path = %path.display(), width = opts.width, height = opts.height, "wrote PNG");
    Ok(())
}

pub(crate) fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    let io_err = |source| ChartError::Io { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, bytes).map_err(io_err)
}

/// Output size checked before any pixel memory is touched: both sides positive and the RGBA
/// buffer addressable.
fn surface_size(opts: &RenderOptions) -> Result<(i32, i32)> {
    let (w, h) = (opts.width, opts.height);
    let addressable = (w as i64)
        .checked_mul(h as i64)
        .and_then(|px| px.checked_mul(4))
        .is_some_and(|bytes| bytes <= isize::MAX as i64);
    if w <= 0 || h <= 0 || !addressable {
        return Err(ChartError::MountPoint(format!("cannot create a {w}x{h} raster surface")));
    }
    Ok((w, h))
}

fn raster(scene: &Scene, tooltip: Option<&Tooltip>, opts: &RenderOptions) -> Result<skia::Surface> {
    let (w, h) = surface_size(opts)?;
    let mut surface = skia::surfaces::raster_n32_premul((w, h))
        .ok_or_else(|| ChartError::MountPoint(format!("failed to create {w}x{h} raster surface")))?;
    let canvas = surface.canvas();
    canvas.clear(opts.theme.background);

    let vp = Viewport::fit(opts.width as f32, opts.height as f32, scene.width, scene.height);
    canvas.save();
    canvas.translate((vp.offset_x, vp.offset_y));
    canvas.scale((vp.scale, vp.scale));
    draw_scene(canvas, scene, tooltip, &opts.theme, opts.draw_labels);
    canvas.restore();
    Ok(surface)
}

/// Draw `scene` in logical coordinates onto `canvas`.
pub fn draw_scene(canvas: &skia::Canvas, scene: &Scene, tooltip: Option<&Tooltip>, theme: &Theme, draw_labels: bool) {
    let shaper = draw_labels.then(TextShaper::new);

    draw_grid(canvas, scene, theme);
    draw_axes(canvas, scene, theme, shaper.as_ref());

    for s in &scene.series {
        draw_series_lines(canvas, s);
    }
    for s in scene.series.iter().filter(|s| s.markers_visible) {
        let fill = fill_paint(s.color, 1.0);
        for m in &s.markers {
            canvas.draw_circle((m.center.x, m.center.y), m.radius, &fill);
        }
    }
    // goal markers sit above every series
    for s in scene.series.iter().filter(|s| s.markers_visible) {
        if let Some(g) = &s.goal {
            canvas.draw_circle((g.center.x, g.center.y), g.radius, &fill_paint(s.color, 1.0));
        }
    }

    draw_legend(canvas, scene, theme, shaper.as_ref());

    if let (Some(shaper), Some(tip)) = (shaper.as_ref(), tooltip) {
        draw_tooltip(canvas, tip, theme, shaper);
    }
}

// ---- helpers ----------------------------------------------------------------

fn stroke_paint(color: skia::Color, opacity: f32, width: f32, dashed: bool) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color);
    paint.set_alpha_f(opacity * color.a() as f32 / 255.0);
    if dashed {
        paint.set_path_effect(skia::PathEffect::dash(&DASH, 0.0));
    }
    paint
}

fn fill_paint(color: skia::Color, opacity: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color);
    paint.set_alpha_f(opacity * color.a() as f32 / 255.0);
    paint
}

fn polyline(points: &[PointF]) -> Option<skia::Path> {
    if points.len() < 2 {
        return None;
    }
    let mut path = skia::PathBuilder::new();
    path.move_to((points[0].x, points[0].y));
    for p in &points[1..] {
        path.line_to((p.x, p.y));
    }
    Some(path.detach())
}

fn draw_grid(canvas: &skia::Canvas, scene: &Scene, theme: &Theme) {
    let paint = stroke_paint(theme.grid, 1.0, 1.0, true);
    let plot = scene.plot;
    for (_, x, _) in &scene.x_ticks {
        canvas.draw_line((*x, plot.top), (*x, plot.bottom), &paint);
    }
    for (_, y) in &scene.y_ticks {
        canvas.draw_line((plot.left, *y), (plot.right, *y), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, scene: &Scene, theme: &Theme, shaper: Option<&TextShaper>) {
    let paint = stroke_paint(theme.axis_line, 1.0, 1.0, false);
    let plot = scene.plot;

    canvas.draw_line((plot.left, plot.bottom), (plot.right, plot.bottom), &paint);
    canvas.draw_line((plot.left, plot.top), (plot.left, plot.bottom), &paint);

    for (label, x, shown) in &scene.x_ticks {
        canvas.draw_line((*x, plot.bottom), (*x, plot.bottom + TICK_SIZE), &paint);
        if let (Some(shaper), true) = (shaper, *shown) {
            shaper.draw_centered(canvas, label, *x, plot.bottom + TICK_SIZE + AXIS_FONT + 3.0, AXIS_FONT, theme.axis_label, false);
        }
    }
    for (value, y) in &scene.y_ticks {
        canvas.draw_line((plot.left - TICK_SIZE, *y), (plot.left, *y), &paint);
        if let Some(shaper) = shaper {
            shaper.draw_right(canvas, &format_tick(*value), plot.left - TICK_SIZE - 3.0, *y + AXIS_FONT * 0.35, AXIS_FONT, theme.axis_label);
        }
    }

    if let (Some(shaper), Some((title, at))) = (shaper, &scene.title) {
        shaper.draw_centered(canvas, title, at.x, at.y, TITLE_FONT, theme.title, true);
    }
}

fn draw_series_lines(canvas: &skia::Canvas, s: &SeriesMarks) {
    let solid = stroke_paint(s.color, s.line_opacity, LINE_WIDTH, false);
    let dashed = stroke_paint(s.color, s.line_opacity, LINE_WIDTH, true);

    if let Some(path) = polyline(&s.actual_line) {
        canvas.draw_path(&path, &solid);
    }
    for run in &s.projection_runs {
        if let Some(path) = polyline(run) {
            canvas.draw_path(&path, &dashed);
        }
    }
    if let Some((a, b)) = s.connection {
        canvas.draw_line((a.x, a.y), (b.x, b.y), &dashed);
    }
}

fn draw_legend(canvas: &skia::Canvas, scene: &Scene, theme: &Theme, shaper: Option<&TextShaper>) {
    for e in &scene.legend {
        let r = e.swatch;
        canvas.draw_rect(skia::Rect::from_ltrb(r.left, r.top, r.right, r.bottom), &fill_paint(e.color, e.opacity));
        if let Some(shaper) = shaper {
            let color = theme.legend_label.with_a((e.opacity * theme.legend_label.a() as f32).round() as u8);
            shaper.draw_left(canvas, &e.name, e.label_at.x, e.label_at.y, LEGEND_FONT, color);
        }
    }
}

fn draw_tooltip(canvas: &skia::Canvas, tip: &Tooltip, theme: &Theme, shaper: &TextShaper) {
    let text_w = tip.lines.iter().map(|l| shaper.measure_width(l, TOOLTIP_FONT)).fold(0.0f32, f32::max);
    let rect = skia::Rect::from_xywh(
        tip.anchor.x,
        tip.anchor.y,
        text_w + TOOLTIP_PAD * 2.0,
        TOOLTIP_LINE_HEIGHT * tip.lines.len() as f32 + TOOLTIP_PAD * 2.0,
    );
    canvas.draw_rect(rect, &fill_paint(theme.tooltip_fill, 1.0));
    canvas.draw_rect(rect, &stroke_paint(theme.tooltip_border, 1.0, 1.0, false));
    for (i, line) in tip.lines.iter().enumerate() {
        let baseline = rect.top + TOOLTIP_PAD + TOOLTIP_LINE_HEIGHT * i as f32 + TOOLTIP_FONT;
        shaper.draw_left(canvas, line, rect.left + TOOLTIP_PAD, baseline, TOOLTIP_FONT, theme.tooltip_text);
    }
}

/// Axis label for a value tick: integers without decimals.
pub fn format_tick(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{}", v.round() as i64)
    } else {
        format!("{v:.1}")
    }
}
