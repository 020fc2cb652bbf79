// File: crates/progress-core/src/interaction.rs
// Summary: Selection state machine, tooltip handling and click classification.
//
// States: Unselected (initial) and Selected(user).
// - legend click on `u`        -> Selected(u), from either state (re-click re-applies)
// - double-click on the chart  -> Unselected
// - click outside the chart    -> Unselected (no-op when already Unselected)
// Every presentation change goes through `apply_selection`.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::TooltipLabels;
use crate::geometry::PointF;
use crate::scene::{MarkerKind, Scene};

/// Tooltip offset from the pointer.
pub const TOOLTIP_OFFSET: PointF = PointF::new(5.0, -28.0);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    Unselected,
    Selected(String),
}

impl InteractionState {
    pub fn selected(&self) -> Option<&str> {
        match self {
            InteractionState::Unselected => None,
            InteractionState::Selected(u) => Some(u),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChartEvent {
    LegendClick(String),
    DoubleClick,
    ClickOutside,
    /// Pointer position in logical canvas coordinates.
    PointerMove(PointF),
    PointerOut,
}

/// Set opacity/visibility of every mark from `state`. Underlying data is never touched.
pub fn apply_selection(scene: &mut Scene, state: &InteractionState) {
    let dim = scene.dimmed_opacity;
    let selected = state.selected();
    for s in &mut scene.series {
        let on = selected.map_or(true, |u| u == s.name);
        s.line_opacity = if on { 1.0 } else { dim };
        s.markers_visible = selected.is_some() && on;
    }
    for e in &mut scene.legend {
        e.opacity = if selected.map_or(true, |u| u == e.name) { 1.0 } else { dim };
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub series: String,
    pub kind: MarkerKind,
    pub date: String,
    pub lines: Vec<String>,
    /// Top-left corner in logical canvas coordinates.
    pub anchor: PointF,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickKind {
    Single,
    Double,
}

/// Classifies raw clicks; two clicks close in time and space form a double-click.
#[derive(Clone, Debug)]
pub struct ClickTracker {
    interval: Duration,
    max_distance: f32,
    last: Option<(Instant, PointF)>,
}

impl ClickTracker {
    pub fn new(interval: Duration) -> Self {
        Self { interval, max_distance: 4.0, last: None }
    }

    pub fn register(&mut self, now: Instant, at: PointF) -> ClickKind {
        let double = self.last.is_some_and(|(t, p)| {
            now.saturating_duration_since(t) <= self.interval
                && p.distance_sq(at) <= self.max_distance * self.max_distance
        });
        if double {
            self.last = None;
            ClickKind::Double
        } else {
            self.last = Some((now, at));
            ClickKind::Single
        }
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

/// One rendered chart plus its interaction state. Hosts feed it pointer input and redraw when
/// a handler reports a change.
#[derive(Clone, Debug)]
pub struct ChartSession {
    scene: Scene,
    state: InteractionState,
    tooltip: Option<Tooltip>,
    labels: TooltipLabels,
    clicks: ClickTracker,
}

impl ChartSession {
    pub fn new(mut scene: Scene, labels: TooltipLabels, double_click: Duration) -> Self {
        let state = InteractionState::Unselected;
        apply_selection(&mut scene, &state);
        Self { scene, state, tooltip: None, labels, clicks: ClickTracker::new(double_click) }
    }

    pub fn scene(&self) -> &Scene { &self.scene }
    pub fn state(&self) -> &InteractionState { &self.state }
    pub fn tooltip(&self) -> Option<&Tooltip> { self.tooltip.as_ref() }

    /// Apply one event. Returns `true` when the visible output changed.
    pub fn handle(&mut self, event: ChartEvent) -> bool {
        match event {
            ChartEvent::LegendClick(user) => {
                if self.scene.series(&user).is_none() {
                    warn!(user = %user, "legend click for unknown user ignored");
                    return false;
                }
                debug!(user = %user, "select");
                self.transition(InteractionState::Selected(user))
            }
            ChartEvent::DoubleClick | ChartEvent::ClickOutside => self.transition(InteractionState::Unselected),
            ChartEvent::PointerMove(p) => self.hover(p),
            ChartEvent::PointerOut => self.tooltip.take().is_some(),
        }
    }

    /// Raw primary click. `at` is `None` when the click landed outside the rendered chart.
    pub fn click(&mut self, at: Option<PointF>, now: Instant) -> bool {
        let Some(p) = at else {
            self.clicks.clear();
            return self.handle(ChartEvent::ClickOutside);
        };
        match self.clicks.register(now, p) {
            ClickKind::Double => self.handle(ChartEvent::DoubleClick),
            ClickKind::Single => match self.scene.legend_at(p).map(str::to_string) {
                Some(user) => self.handle(ChartEvent::LegendClick(user)),
                None => false,
            },
        }
    }

    /// Raw pointer motion. `at` is `None` when the pointer left the rendered chart.
    pub fn pointer(&mut self, at: Option<PointF>) -> bool {
        match at {
            Some(p) => self.handle(ChartEvent::PointerMove(p)),
            None => self.handle(ChartEvent::PointerOut),
        }
    }

    fn transition(&mut self, next: InteractionState) -> bool {
        let unchanged = self.state == next;
        self.state = next;
        apply_selection(&mut self.scene, &self.state);
        let had_tooltip = self.tooltip.take().is_some();
        !unchanged || had_tooltip
    }

    fn hover(&mut self, p: PointF) -> bool {
        let hit = self.scene.marker_at(p).map(|(s, m)| (s.name.clone(), m.clone()));
        match hit {
            None => self.tooltip.take().is_some(),
            Some((series, m)) => {
                let same = self
                    .tooltip
                    .as_ref()
                    .is_some_and(|t| t.series == series && t.kind == m.kind && t.date == m.date);
                if same {
                    return false;
                }
                let label = match m.kind {
                    MarkerKind::Actual => &self.labels.actual,
                    MarkerKind::Projection => &self.labels.projection,
                    MarkerKind::Goal => &self.labels.goal,
                };
                self.tooltip = Some(Tooltip {
                    series,
                    kind: m.kind,
                    lines: vec![format!("{}: {}", self.labels.date, m.date), format!("{}: {:.2}", label, m.value)],
                    date: m.date,
                    anchor: PointF::new(p.x + TOOLTIP_OFFSET.x, p.y + TOOLTIP_OFFSET.y),
                });
                true
            }
        }
    }
}
