// File: crates/progress-core/tests/common/mod.rs
// Purpose: Shared fixtures for integration tests.

#![allow(dead_code)]

use indexmap::IndexMap;
use progress_core::{ChartConfig, GoalPlan, ProgressChart, RawDataset};

pub fn fixture_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/data.json")
}

pub fn fixture() -> RawDataset {
    let text = std::fs::read_to_string(fixture_path()).expect("read fixture");
    RawDataset::from_json_str(&text).expect("parse fixture")
}

pub fn goal_plan() -> GoalPlan {
    let mut targets = IndexMap::new();
    targets.insert("Mia".to_string(), -5.0);
    targets.insert("Barry".to_string(), -4.0);
    GoalPlan { date: "12.12".into(), placeholder: "----".into(), targets }
}

pub fn config() -> ChartConfig {
    ChartConfig { goal: Some(goal_plan()), ..ChartConfig::goals() }
}

pub fn chart() -> ProgressChart {
    ProgressChart::new(&fixture(), config()).expect("assemble fixture")
}
