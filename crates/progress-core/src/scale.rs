// File: crates/progress-core/src/scale.rs
// Summary: Categorical date (X) and fixed linear value (Y) scales.

use std::collections::HashMap;

use crate::config::YDomain;
use crate::grid::nice_ticks;

/// Value Y coordinate (cumulative change).
pub type Value = f64;

/// Categorical point scale: labels are spread evenly over `[start, end]`, first label on `start`,
/// last on `end`. A single label sits in the middle of the range.
#[derive(Clone, Debug)]
pub struct PointScale {
    labels: Vec<String>,
    index: HashMap<String, usize>,
    start: f32,
    step: f32,
}

impl PointScale {
    pub fn new(labels: &[String], start: f32, end: f32) -> Self {
        let n = labels.len();
        let span = end - start;
        let (start, step) = match n {
            0 => (start, 0.0),
            1 => (start + span * 0.5, 0.0),
            _ => (start, span / (n - 1) as f32),
        };
        let index = labels.iter().enumerate().map(|(i, l)| (l.clone(), i)).collect();
        Self { labels: labels.to_vec(), index, start, step }
    }

    /// Pixel position of `label`, or `None` when it is not in the domain.
    pub fn position(&self, label: &str) -> Option<f32> {
        self.index.get(label).map(|&i| self.at(i))
    }

    #[inline]
    pub fn at(&self, i: usize) -> f32 {
        self.start + self.step * i as f32
    }

    pub fn step(&self) -> f32 { self.step }
    pub fn labels(&self) -> &[String] { &self.labels }

    /// `(label, px)` for every label in domain order.
    pub fn ticks(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        self.labels.iter().enumerate().map(|(i, l)| (l.as_str(), self.at(i)))
    }
}

/// Vertical value scale mapping a fixed domain to [top, bottom] pixels.
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: Value,
    pub vmax: Value,
}

impl ValueScale {
    /// `vmin` lands on `bottom_px`, `vmax` on `top_px`.
    pub fn new_linear(top_px: f32, bottom_px: f32, vmin: Value, vmax: Value) -> Self {
        let mut s = Self { top_px, bottom_px, vmin, vmax };
        if (s.vmax - s.vmin).abs() < 1e-12 { s.vmax = s.vmin + 1.0; }
        s
    }

    /// Scale for a configured domain; `domain.top` is drawn at y = 0.
    pub fn from_domain(domain: YDomain, height_px: f32) -> Self {
        Self::new_linear(0.0, height_px, domain.bottom, domain.top)
    }

    #[inline]
    pub fn to_px(&self, y: Value) -> f32 {
        let span = self.vmax - self.vmin;
        self.bottom_px - ((y - self.vmin) / span) as f32 * (self.bottom_px - self.top_px)
    }

    /// Round tick values inside the domain, about `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<Value> {
        nice_ticks(self.vmin, self.vmax, count)
    }
}
