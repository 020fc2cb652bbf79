// File: crates/progress-core/src/config.rs
// Summary: Chart configuration (presets + JSON overrides) shared by the render CLI and the viewer.
// Notes:
// - Every field has a default, so a config file only needs the keys it changes.
// - `ChartConfig::default()` is the goal-tracking preset.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{ChartError, Result};
use crate::palette::PaletteKind;
use crate::types::{Insets, HEIGHT, WIDTH};

/// Fixed y-axis domain. `top` maps to the top edge of the plot.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct YDomain {
    pub top: f64,
    pub bottom: f64,
}

impl Default for YDomain {
    fn default() -> Self {
        Self { top: 4.0, bottom: -12.0 }
    }
}

/// Shared goal date plus per-user targets.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GoalPlan {
    /// Axis label of the goal date (`MM.DD`).
    pub date: String,
    /// Label appended before the goal date when the axis stops short of the day before it.
    pub placeholder: String,
    pub targets: IndexMap<String, f64>,
}

impl Default for GoalPlan {
    fn default() -> Self {
        let targets = [
            ("Fifi", -5.0), ("Sofya", -4.0), ("Nick", -4.0), ("Blue", -5.0), ("Joyce", -5.0),
            ("Jenny", -5.0), ("Yoyo", -8.0), ("Jimmy", -5.0), ("Jerry", -5.0), ("Summer G", -10.0),
            ("Barry", -8.0), ("Esther", -8.0), ("Ginger", -10.0), ("Mia", -10.0),
        ]
        .into_iter()
        .map(|(name, v)| (name.to_string(), v))
        .collect();
        Self { date: "01.16".into(), placeholder: "----".into(), targets }
    }
}

impl GoalPlan {
    pub fn target(&self, user: &str) -> Option<f64> {
        self.targets.get(user).copied()
    }
}

/// Tooltip line labels.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TooltipLabels {
    pub date: String,
    pub actual: String,
    pub projection: String,
    pub goal: String,
}

impl TooltipLabels {
    pub fn zh() -> Self {
        Self { date: "Date".into(), actual: "变化".into(), projection: "预测".into(), goal: "目标".into() }
    }

    pub fn en() -> Self {
        Self { date: "Date".into(), actual: "Change".into(), projection: "Projection".into(), goal: "Goal".into() }
    }
}

impl Default for TooltipLabels {
    fn default() -> Self { Self::zh() }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub title: Option<String>,
    /// Logical canvas width (SVG viewBox width).
    pub width: i32,
    /// Logical canvas height (SVG viewBox height).
    pub height: i32,
    pub margins: Insets,
    pub y_domain: YDomain,
    pub goal: Option<GoalPlan>,
    pub palette: PaletteKind,
    pub tooltip: TooltipLabels,
    pub theme: String,
    /// Opacity applied to marks of users that are not selected.
    pub dimmed_opacity: f32,
    /// Maximum gap between two clicks that still counts as a double-click.
    pub double_click_ms: u64,
}

impl ChartConfig {
    /// Goal-tracking chart: per-user targets, title, Chinese tooltip labels.
    pub fn goals() -> Self {
        Self {
            title: Some("Weight Loss December-January".into()),
            width: WIDTH,
            height: HEIGHT,
            margins: Insets::new(50, 100, 30, 50),
            y_domain: YDomain::default(),
            goal: Some(GoalPlan::default()),
            palette: PaletteKind::Classic,
            tooltip: TooltipLabels::zh(),
            theme: "light".into(),
            dimmed_opacity: 0.2,
            double_click_ms: 400,
        }
    }

    /// Plain chart: no goals, no title, wider legend gutter, English labels.
    pub fn plain() -> Self {
        Self {
            title: None,
            margins: Insets::new(50, 150, 50, 50),
            goal: None,
            palette: PaletteKind::Tableau10,
            tooltip: TooltipLabels::en(),
            ..Self::goals()
        }
    }

    /// Look up a preset by name (`goals` or `plain`).
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "goals" => Some(Self::goals()),
            "plain" => Some(Self::plain()),
            _ => None,
        }
    }

    /// Parse a config from JSON. Missing keys take the goal-tracking defaults.
    pub fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ChartError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let cfg = Self::from_json(&text).map_err(|e| ChartError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        cfg.validate().map_err(|reason| ChartError::Config { path: path.to_path_buf(), reason })?;
        Ok(cfg)
    }

    /// Check that the margins leave a drawable area and the y domain is not empty.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if i64::from(self.width) <= self.margins.hsum() || i64::from(self.height) <= self.margins.vsum() {
            return Err(format!(
                "margins {:?} leave no drawable area in a {}x{} canvas",
                self.margins, self.width, self.height
            ));
        }
        if (self.y_domain.top - self.y_domain.bottom).abs() < 1e-12 {
            return Err("y_domain top and bottom are equal".into());
        }
        if !(0.0..=1.0).contains(&self.dimmed_opacity) {
            return Err(format!("dimmed_opacity {} outside 0..=1", self.dimmed_opacity));
        }
        Ok(())
    }

    pub fn plot_width(&self) -> f32 {
        (i64::from(self.width) - self.margins.hsum()).max(1) as f32
    }

    pub fn plot_height(&self) -> f32 {
        (i64::from(self.height) - self.margins.vsum()).max(1) as f32
    }
}

impl Default for ChartConfig {
    fn default() -> Self { Self::goals() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = ChartConfig::from_json(r#"{ "title": "Spring", "margins": { "right": 150 } }"#).unwrap();
        assert_eq!(cfg.title.as_deref(), Some("Spring"));
        assert_eq!(cfg.margins, Insets::new(50, 150, 30, 50));
        assert_eq!(cfg.y_domain, YDomain { top: 4.0, bottom: -12.0 });
        assert_eq!(cfg.goal.as_ref().and_then(|g| g.target("Mia")), Some(-10.0));
    }

    #[test]
    fn null_goal_disables_goals() {
        let cfg = ChartConfig::from_json(r#"{ "goal": null }"#).unwrap();
        assert!(cfg.goal.is_none());
    }

    #[test]
    fn presets_differ_where_the_variants_differed() {
        let g = ChartConfig::goals();
        let p = ChartConfig::plain();
        assert!(g.goal.is_some() && p.goal.is_none());
        assert_eq!(p.tooltip, TooltipLabels::en());
        assert_eq!(p.margins.right, 150);
        assert!(ChartConfig::preset("PLAIN").is_some());
        assert!(ChartConfig::preset("fancy").is_none());
    }

    #[test]
    fn validate_rejects_oversized_margins() {
        let mut cfg = ChartConfig::goals();
        cfg.margins = Insets::new(500, 400, 0, 0);
        assert!(cfg.validate().is_err());
    }
}
