// File: crates/progress-core/tests/smoke.rs
// Purpose: End-to-end load + raster output.

mod common;

use std::io::Write;

use progress_core::{
    render_to_png_bytes, render_to_rgba8, ChartConfig, ChartError, InteractionState, ProgressChart, RenderOptions,
};

#[test]
fn png_bytes_decode_at_requested_size() -> anyhow::Result<()> {
    let chart = common::chart();
    let opts = chart.render_options(1.0);
    let bytes = chart.render_to_png_bytes(&opts)?;
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let img = image::load_from_memory(&bytes)?;
    assert_eq!((img.width(), img.height()), (800, 400));
    Ok(())
}

#[test]
fn png_file_is_written() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("chart.png");
    let chart = common::chart();
    chart.render_to_png(&chart.render_options(0.5), &path)?;
    let img = image::open(&path)?;
    assert_eq!((img.width(), img.height()), (400, 200));
    Ok(())
}

#[test]
fn rgba_buffer_letterboxes_into_any_surface() -> anyhow::Result<()> {
    let chart = common::chart();
    let scene = chart.scene_with(&InteractionState::Selected("Mia".into()));
    let opts = RenderOptions { width: 300, height: 300, ..RenderOptions::default() };
    let (pixels, w, h, row_bytes) = render_to_rgba8(&scene, None, &opts)?;
    assert_eq!((w, h, row_bytes), (300, 300, 1200));
    assert_eq!(pixels.len(), 300 * 1200);
    // top-left corner is letterbox background (white, opaque)
    assert_eq!(&pixels[..4], &[255, 255, 255, 255]);
    Ok(())
}

#[test]
fn load_reads_dataset_from_disk() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"{{"dates":["01.01","01.02"],"raw_values":{{"A":[-0.5]}},"cumulative_values":{{"A":[-0.5]}},"projections":{{"A":[-0.8]}}}}"#
    )?;
    let chart = ProgressChart::load(file.path(), ChartConfig::plain())?;
    assert_eq!(chart.assembled.axis.labels().to_vec(), vec!["01.01", "01.02"]);
    assert!(chart.scene().series("A").unwrap().connection.is_some());
    Ok(())
}

#[test]
fn missing_file_is_io_error() {
    let err = ProgressChart::load("definitely/not/here.json", ChartConfig::goals()).unwrap_err();
    assert!(matches!(err, ChartError::Io { .. }), "{err}");
    assert!(err.to_string().contains("here.json"));
}

#[test]
fn malformed_json_is_json_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{ not json").unwrap();
    let err = ProgressChart::load(file.path(), ChartConfig::goals()).unwrap_err();
    assert!(matches!(err, ChartError::Json(_)), "{err}");
}

#[test]
fn unallocatable_surface_is_mount_point_error() {
    let scene = common::chart().scene();
    let opts = RenderOptions { width: i32::MAX, height: i32::MAX, ..RenderOptions::default() };
    assert!(matches!(render_to_png_bytes(&scene, None, &opts), Err(ChartError::MountPoint(_))));
    assert!(matches!(render_to_rgba8(&scene, None, &opts), Err(ChartError::MountPoint(_))));
}

#[test]
fn non_positive_sizes_fail_before_drawing() {
    let scene = common::chart().scene();
    for (width, height) in [(0, 400), (800, 0), (-5, 400)] {
        let opts = RenderOptions { width, height, ..RenderOptions::default() };
        let err = render_to_rgba8(&scene, None, &opts).unwrap_err();
        assert!(matches!(err, ChartError::MountPoint(_)), "{width}x{height}: {err}");
        assert!(matches!(render_to_png_bytes(&scene, None, &opts), Err(ChartError::MountPoint(_))));
    }
}
