// File: crates/progress-viewer/src/main.rs
// Summary: Windowed viewer; renders the chart session to an RGBA buffer and blits it with softbuffer.
// Notes:
// - The chart is letterboxed into the window (xMidYMid meet); clicks in the letterbox count as
//   clicks outside the chart.
// - Redraws only when the session reports a change or the window is resized.

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use progress_core::dataset::DEFAULT_DATA_PATH;
use progress_core::theme;
use progress_core::{render_to_rgba8, ChartConfig, ChartError, ChartSession, ProgressChart, RenderOptions, Viewport};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

#[derive(Parser, Debug)]
#[command(author, version, about = "Interactive weight-loss progress chart", long_about = None)]
struct Args {
    /// Dataset JSON (dates, raw_values, cumulative_values, projections)
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Chart config JSON; keys it omits keep the goal-tracking defaults
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Built-in preset used when no config file is given
    #[arg(long, default_value = "goals", value_parser = ["goals", "plain"])]
    preset: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let config = load_config(args.config.as_deref(), &args.preset)?;
    // nothing is shown until the dataset has loaded and assembled
    let chart = ProgressChart::load(&args.data, config)
        .with_context(|| format!("failed to build chart from '{}'", args.data.display()))?;
    info!(users = chart.assembled.series.len(), "chart ready");

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(chart.config.title.clone().unwrap_or_else(|| "Weight Loss Progress".into()))
        .with_inner_size(LogicalSize::new(chart.config.width as f64, chart.config.height as f64))
        .build(&event_loop)
        .map_err(|e| ChartError::MountPoint(format!("window: {e}")))?;

    // SAFETY: `window` is moved into the event loop closure below and outlives both handles.
    let context = unsafe { softbuffer::Context::new(&window) }
        .map_err(|e| ChartError::MountPoint(format!("softbuffer context: {e}")))?;
    let mut surface = unsafe { softbuffer::Surface::new(&context, &window) }
        .map_err(|e| ChartError::MountPoint(format!("softbuffer surface: {e}")))?;

    let theme = theme::find(&chart.config.theme);
    let (logical_w, logical_h) = (chart.config.width as f32, chart.config.height as f32);
    let mut session = chart.session();
    let mut size = window.inner_size();
    let mut cursor: Option<PhysicalPosition<f64>> = None;

    let viewport = move |size: PhysicalSize<u32>| {
        Viewport::fit(size.width.max(1) as f32, size.height.max(1) as f32, logical_w, logical_h)
    };
    let to_chart = move |size: PhysicalSize<u32>, pos: PhysicalPosition<f64>| {
        viewport(size).to_logical(pos.x as f32, pos.y as f32)
    };

    event_loop.run(move |event, _, cf| {
        *cf = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *cf = ControlFlow::Exit,
                WindowEvent::Resized(new_size) => {
                    size = new_size;
                    window.request_redraw();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    cursor = Some(position);
                    if session.pointer(to_chart(size, position)) {
                        window.request_redraw();
                    }
                }
                WindowEvent::CursorLeft { .. } => {
                    cursor = None;
                    if session.pointer(None) {
                        window.request_redraw();
                    }
                }
                WindowEvent::MouseInput { state: ElementState::Pressed, button: MouseButton::Left, .. } => {
                    let at = cursor.and_then(|c| to_chart(size, c));
                    if session.click(at, Instant::now()) {
                        debug!(state = ?session.state(), "selection changed");
                        window.request_redraw();
                    }
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                if let Err(e) = draw(&mut surface, &session, size, theme) {
                    error!("redraw failed: {e:#}");
                    *cf = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });
}

fn draw(
    surface: &mut softbuffer::Surface,
    session: &ChartSession,
    size: PhysicalSize<u32>,
    theme: theme::Theme,
) -> Result<()> {
    let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
        // minimised
        return Ok(());
    };
    surface.resize(w, h).map_err(|e| ChartError::MountPoint(format!("resize: {e}")))?;

    let opts = RenderOptions { width: w.get() as i32, height: h.get() as i32, theme, draw_labels: true };
    let (rgba, _, _, _) = render_to_rgba8(session.scene(), session.tooltip(), &opts)?;

    let mut frame = surface.buffer_mut().map_err(|e| ChartError::MountPoint(format!("frame: {e}")))?;
    // softbuffer pixels are 0RGB
    for (dst, px) in frame.iter_mut().zip(rgba.chunks_exact(4)) {
        *dst = (px[0] as u32) << 16 | (px[1] as u32) << 8 | px[2] as u32;
    }
    frame.present().map_err(|e| ChartError::MountPoint(format!("present: {e}")))?;
    Ok(())
}

fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
    Ok(())
}

fn load_config(path: Option<&Path>, preset: &str) -> Result<ChartConfig> {
    match path {
        Some(p) => Ok(ChartConfig::from_path(p)?),
        None => ChartConfig::preset(preset).with_context(|| format!("unknown preset '{preset}'")),
    }
}
