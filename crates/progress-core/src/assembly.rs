// File: crates/progress-core/src/assembly.rs
// Summary: Reshape the raw dataset into per-user actual/projection/goal series on one date axis.
// Notes:
// - Each user's measured span is the length of their `raw_values`; the projection starts right
//   after it, so users who joined later have a later projection start.
// - Assembly is pure: the same dataset and goal plan always give the same output.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::GoalPlan;
use crate::dataset::RawDataset;
use crate::error::{ChartError, Result};

/// Ordered categorical date axis shared by all users.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateAxis {
    labels: Vec<String>,
    source_len: usize,
}

impl DateAxis {
    pub fn new(labels: Vec<String>) -> Self {
        let source_len = labels.len();
        Self { labels, source_len }
    }

    pub fn labels(&self) -> &[String] { &self.labels }
    pub fn len(&self) -> usize { self.labels.len() }
    pub fn is_empty(&self) -> bool { self.labels.is_empty() }

    /// Number of labels that came from the dataset (before goal extension).
    pub fn source_len(&self) -> usize { self.source_len }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Append the goal date (and a placeholder for the skipped stretch before it) when missing.
    /// Existing labels keep their positions.
    pub fn extend_for_goal(&mut self, plan: &GoalPlan) {
        if self.index_of(&plan.date).is_some() {
            return;
        }
        let adjacent = previous_day_label(&plan.date)
            .map(|prev| self.index_of(&prev).is_some())
            .unwrap_or(true);
        if !adjacent && self.index_of(&plan.placeholder).is_none() {
            self.labels.push(plan.placeholder.clone());
        }
        self.labels.push(plan.date.clone());
        debug!(goal = %plan.date, len = self.labels.len(), "extended date axis for goal");
    }
}

/// `MM.DD` label of the day before `label`. Uses a leap year so `02.29` stays valid.
pub fn previous_day_label(label: &str) -> Option<String> {
    let (m, d) = label.split_once('.')?;
    let date = NaiveDate::from_ymd_opt(2000, m.trim().parse().ok()?, d.trim().parse().ok()?)?;
    let prev = date.pred_opt()?;
    Some(prev.format("%m.%d").to_string())
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActualPoint {
    pub date: String,
    pub cumulative: f64,
    pub raw: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectionPoint {
    pub date: String,
    /// `None` marks a gap; it is never plotted or interpolated across.
    pub value: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GoalPoint {
    pub date: String,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UserSeries {
    pub name: String,
    pub actual: Vec<ActualPoint>,
    pub projection: Vec<ProjectionPoint>,
    pub goal: Option<GoalPoint>,
}

impl UserSeries {
    /// Maximal runs of consecutive defined projection points.
    pub fn projection_runs(&self) -> Vec<&[ProjectionPoint]> {
        self.projection
            .split(|p| p.value.is_none())
            .filter(|run| !run.is_empty())
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Assembled {
    pub axis: DateAxis,
    pub series: Vec<UserSeries>,
}

impl Assembled {
    pub fn user(&self, name: &str) -> Option<&UserSeries> {
        self.series.iter().find(|s| s.name == name)
    }
}

/// Build per-user series. Any misalignment between the date axis and a user's arrays fails the
/// whole assembly rather than producing a truncated series.
pub fn assemble(data: &RawDataset, goal: Option<&GoalPlan>) -> Result<Assembled> {
    let dates = &data.dates;

    let mut seen = HashSet::with_capacity(dates.len());
    if let Some(dup) = dates.iter().find(|d| !seen.insert(d.as_str())) {
        return Err(ChartError::shape(format!("date label {dup:?} appears more than once")));
    }

    check_same_users(data)?;

    let mut series = Vec::with_capacity(data.cumulative_values.len());
    for (name, cumulative) in &data.cumulative_values {
        // presence checked above
        let raw = &data.raw_values[name];
        let projected = &data.projections[name];

        if raw.len() > dates.len() {
            return Err(ChartError::shape(format!(
                "{name}: {} raw values but only {} dates",
                raw.len(),
                dates.len()
            )));
        }
        if cumulative.len() != raw.len() {
            return Err(ChartError::shape(format!(
                "{name}: {} cumulative values vs {} raw values",
                cumulative.len(),
                raw.len()
            )));
        }

        let span = raw.len();
        let actual = dates[..span]
            .iter()
            .zip(cumulative.iter().zip(raw))
            .map(|(date, (&cumulative, &raw))| ActualPoint { date: date.clone(), cumulative, raw })
            .collect::<Vec<_>>();

        let suffix = &dates[span..];
        if projected.len() > suffix.len() {
            debug!(user = %name, extra = projected.len() - suffix.len(), "ignoring projections past the date axis");
        }
        let projection = suffix
            .iter()
            .enumerate()
            .map(|(i, date)| ProjectionPoint { date: date.clone(), value: projected.get(i).copied().flatten() })
            .collect::<Vec<_>>();

        let goal = goal.and_then(|plan| {
            plan.target(name).map(|value| GoalPoint { date: plan.date.clone(), value })
        });

        series.push(UserSeries { name: name.clone(), actual, projection, goal });
    }

    let mut axis = DateAxis::new(dates.clone());
    if let Some(plan) = goal {
        axis.extend_for_goal(plan);
    }

    debug!(users = series.len(), axis = axis.len(), "assembled series");
    Ok(Assembled { axis, series })
}

fn check_same_users(data: &RawDataset) -> Result<()> {
    let maps = [
        ("raw_values", data.raw_values.keys().collect::<HashSet<_>>()),
        ("cumulative_values", data.cumulative_values.keys().collect::<HashSet<_>>()),
        ("projections", data.projections.keys().collect::<HashSet<_>>()),
    ];
    for (name_a, a) in &maps {
        for (name_b, b) in &maps {
            if let Some(missing) = a.difference(b).next() {
                return Err(ChartError::shape(format!("user {missing:?} is in {name_a} but missing from {name_b}")));
            }
        }
    }
    Ok(())
}
