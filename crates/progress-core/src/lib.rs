// File: crates/progress-core/src/lib.rs
// Summary: Core library entry point; exports the dataset, assembly, scene, interaction and output API.

pub mod error;
pub mod types;
pub mod config;
pub mod dataset;
pub mod assembly;
pub mod scale;
pub mod grid;
pub mod geometry;
pub mod palette;
pub mod theme;
pub mod scene;
pub mod interaction;
pub mod text;
pub mod chart;
pub mod svg;

pub use error::{ChartError, Result};
pub use types::Insets;
pub use config::{ChartConfig, GoalPlan, TooltipLabels, YDomain};
pub use palette::PaletteKind;
pub use dataset::{load_dataset, RawDataset};
pub use assembly::{assemble, ActualPoint, Assembled, DateAxis, GoalPoint, ProjectionPoint, UserSeries};
pub use scale::{PointScale, ValueScale};
pub use geometry::{PointF, RectF, Viewport};
pub use palette::ColorAssignment;
pub use theme::Theme;
pub use scene::{Scene, SeriesMarks, MarkerKind};
pub use interaction::{ChartEvent, ChartSession, ClickKind, ClickTracker, InteractionState, Tooltip};
pub use text::TextShaper;
pub use chart::{render_to_png, render_to_png_bytes, render_to_rgba8, ProgressChart, RenderOptions};
pub use svg::{render_to_svg, render_to_svg_string};
