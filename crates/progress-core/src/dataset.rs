// File: crates/progress-core/src/dataset.rs
// Summary: Raw JSON dataset as produced upstream (`static/data.json`) and its loader.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{ChartError, Result};

/// Default location of the dataset, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "static/data.json";

/// Pre-computed dataset. Maps keep the user order of the JSON document.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RawDataset {
    /// Shared date axis (`MM.DD` labels).
    pub dates: Vec<String>,
    /// Daily deltas, one entry per measured day.
    pub raw_values: IndexMap<String, Vec<f64>>,
    /// Running totals, aligned with `raw_values`.
    pub cumulative_values: IndexMap<String, Vec<f64>>,
    /// Projected running totals for the dates after each user's measured span.
    #[serde(deserialize_with = "lenient_projections")]
    pub projections: IndexMap<String, Vec<Option<f64>>>,
}

impl RawDataset {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Read and parse the dataset. Nothing may be drawn until this succeeds.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<RawDataset> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ChartError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let data = RawDataset::from_json_str(&text)?;
    info!(
        path = %path.display(),
        dates = data.dates.len(),
        users = data.cumulative_values.len(),
        "loaded dataset"
    );
    Ok(data)
}

// A projection entry that is neither a number nor null becomes a gap instead of failing the load.
fn lenient_projections<'de, D>(de: D) -> std::result::Result<IndexMap<String, Vec<Option<f64>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, Vec<Value>>::deserialize(de)?;
    Ok(raw
        .into_iter()
        .map(|(user, values)| {
            let values = values
                .into_iter()
                .enumerate()
                .map(|(i, v)| match v {
                    Value::Null => None,
                    Value::Number(n) => n.as_f64(),
                    other => {
                        warn!(user = %user, index = i, value = %other, "non-numeric projection treated as gap");
                        None
                    }
                })
                .collect();
            (user, values)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_document_user_order() {
        let data = RawDataset::from_json_str(
            r#"{"dates":["12.01"],
                "raw_values":{"Zed":[1.0],"Amy":[0.5]},
                "cumulative_values":{"Zed":[1.0],"Amy":[0.5]},
                "projections":{"Zed":[],"Amy":[]}}"#,
        )
        .unwrap();
        assert_eq!(data.cumulative_values.keys().collect::<Vec<_>>(), vec!["Zed", "Amy"]);
    }

    #[test]
    fn malformed_projection_entries_become_gaps() {
        let data = RawDataset::from_json_str(
            r#"{"dates":["12.01","12.02","12.03","12.04"],
                "raw_values":{"A":[0.1]},
                "cumulative_values":{"A":[0.1]},
                "projections":{"A":[null,"n/a",-0.4]}}"#,
        )
        .unwrap();
        assert_eq!(data.projections["A"], vec![None, None, Some(-0.4)]);
    }

    #[test]
    fn non_numeric_actual_values_are_rejected() {
        let err = RawDataset::from_json_str(
            r#"{"dates":["12.01"],"raw_values":{"A":["x"]},
                "cumulative_values":{"A":[0.1]},"projections":{"A":[]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ChartError::Json(_)));
    }
}
