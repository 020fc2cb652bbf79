// File: crates/progress-render/src/main.rs
// Summary: Loads the dataset and chart config, then writes the chart as PNG and/or SVG.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use progress_core::dataset::DEFAULT_DATA_PATH;
use progress_core::{render_to_png, render_to_svg, ChartConfig, InteractionState, ProgressChart};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render the weight-loss progress chart to image files", long_about = None)]
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

    /// PNG output path
    #[arg(long, value_name = "FILE")]
    png: Option<PathBuf>,

    /// SVG output path
    #[arg(long, value_name = "FILE")]
    svg: Option<PathBuf>,

    /// Export with this user highlighted, as after a legend click
    #[arg(long, value_name = "USER")]
    select: Option<String>,

    /// Pixel scale applied to the logical canvas for PNG output
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let config = load_config(args.config.as_deref(), &args.preset)?;
    let chart = ProgressChart::load(&args.data, config)
        .with_context(|| format!("failed to build chart from '{}'", args.data.display()))?;
    info!(users = chart.assembled.series.len(), dates = chart.assembled.axis.len(), "chart assembled");

    let state = match args.select {
        Some(user) if chart.assembled.user(&user).is_some() => InteractionState::Selected(user),
        Some(user) => {
            warn!(user = %user, "no such user, exporting without highlight");
            InteractionState::Unselected
        }
        None => InteractionState::Unselected,
    };
    let scene = chart.scene_with(&state);

    // with no output named, write target/out/<dataset stem>.png
    let png = match (&args.png, &args.svg) {
        (None, None) => Some(default_png_path(&args.data)),
        (png, _) => png.clone(),
    };

    if let Some(path) = png {
        let opts = chart.render_options(args.scale);
        render_to_png(&scene, None, &opts, &path).with_context(|| format!("writing PNG '{}'", path.display()))?;
        println!("Wrote {}", path.display());
    }
    if let Some(path) = args.svg {
        let theme = chart.render_options(1.0).theme;
        render_to_svg(&scene, None, &theme, &path).with_context(|| format!("writing SVG '{}'", path.display()))?;
        println!("Wrote {}", path.display());
    }
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

/// `target/out/<dataset stem>.png`
fn default_png_path(data: &Path) -> PathBuf {
    let stem = data.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    PathBuf::from("target/out").join(format!("{stem}.png"))
}
