// SPDX-License-Identifier: MIT
//! Wire types for the radar backend's HTTP API.
//!
//! The backend is an opaque service; these types mirror its JSON bodies
//! exactly and do no interpretation beyond deserialization. Statistics
//! values are pre-formatted server-side and kept as raw JSON so they can
//! be echoed verbatim.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request body for `POST /start-recording`.
#[derive(Debug, Serialize)]
pub struct StartRequest<'a> {
    pub port: &'a str,
    pub duration: u64,
}

/// Response body from `POST /start-recording`.
#[derive(Debug, Deserialize)]
pub struct StartResponse {
    pub message: String,
}

/// Response body from `POST /stop-recording`.
#[derive(Debug, Deserialize)]
pub struct StopResponse {
    pub total_points: u64,
}

/// One live sample: seconds since session start and displacement in mm.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LiveDataPoint {
    pub time: f64,
    pub value: f64,
}

/// Response body from `GET /get-live-data`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiveData {
    #[serde(default)]
    pub data_points: Vec<LiveDataPoint>,
    #[serde(default)]
    pub is_recording: bool,
}

/// Response body from `GET /get-stats`.
///
/// The backend rounds these values itself; they are displayed as received,
/// never recomputed or reformatted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionStats {
    #[serde(default)]
    pub mean: Value,
    #[serde(default)]
    pub min: Value,
    #[serde(default)]
    pub max: Value,
    #[serde(default)]
    pub std: Value,
}

/// Display metadata the classifier attaches to each sleep stage label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StageMeta {
    pub emoji: String,
    pub description: String,
    pub color: String,
}

/// Response body from `POST /predict`.
///
/// `stage_counts` keeps the backend's own key order (serde_json is built
/// with `preserve_order`); the breakdown views iterate it as-is.
#[derive(Debug, Default, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub quality_score: i64,
    #[serde(default)]
    pub average_confidence: Value,
    #[serde(default)]
    pub stage_counts: Map<String, Value>,
    #[serde(default)]
    pub stage_info: HashMap<String, StageMeta>,
    #[serde(default)]
    pub stages: Vec<String>,
    #[serde(default)]
    pub total_windows: u64,
}

/// Render a raw JSON value the way the backend formatted it: strings
/// unquoted, numbers as-is, `null` (field absent) as a placeholder.
#[must_use]
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "--".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_value_passes_numbers_through() {
        assert_eq!(render_value(&json!(12.345)), "12.345");
        assert_eq!(render_value(&json!(-0.5)), "-0.5");
        assert_eq!(render_value(&json!(7)), "7");
    }

    #[test]
    fn render_value_unquotes_strings() {
        assert_eq!(render_value(&json!("1.234")), "1.234");
    }

    #[test]
    fn render_value_placeholder_for_null() {
        assert_eq!(render_value(&Value::Null), "--");
    }

    #[test]
    fn live_data_tolerates_missing_fields() {
        let live: LiveData = serde_json::from_str("{}").unwrap();
        assert!(live.data_points.is_empty());
        assert!(!live.is_recording);
    }

    #[test]
    fn predict_response_keeps_stage_order() {
        let body = json!({
            "success": true,
            "quality_score": 85,
            "average_confidence": 0.91,
            "stage_counts": {"Wake": 5, "N1": 10, "N3": 40, "REM": 30},
            "stage_info": {},
            "stages": ["Wake", "N1"],
            "total_windows": 85
        });
        let resp: PredictResponse = serde_json::from_value(body).unwrap();
        let keys: Vec<&str> = resp.stage_counts.keys().map(String::as_str).collect();
        assert_eq!(keys, ["Wake", "N1", "N3", "REM"]);
        assert_eq!(resp.quality_score, 85);
    }
}
