// SPDX-License-Identifier: MIT
//! Presentation computations over a classification result.
//!
//! Everything here is a pure function of the `/predict` response: stage
//! percentages, metadata lookup with a total fallback, and the breakdown
//! rows the report renders. No client-side re-classification happens.

pub mod recommend;

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::api::types::{PredictResponse, StageMeta};

/// Each classified window covers a fixed 30 seconds of signal. This is a
/// display heuristic; the backend reports no per-window duration.
pub const WINDOW_SECONDS: u64 = 30;

/// count/total as a percentage rounded to one decimal place.
#[must_use]
pub fn percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let raw = count as f64 / total as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

/// Look up display metadata for a stage label.
///
/// Must never fail: the backend may report labels the metadata map does not
/// cover, and those get a neutral placeholder.
#[must_use]
pub fn stage_meta(info: &HashMap<String, StageMeta>, label: &str) -> StageMeta {
    info.get(label).cloned().unwrap_or_else(|| StageMeta {
        emoji: "\u{2753}".to_string(),
        description: label.to_string(),
        color: "#999".to_string(),
    })
}

/// The stage-count mapping in the backend's own key order, with non-numeric
/// counts coerced to zero.
#[must_use]
pub fn ordered_counts(counts: &Map<String, Value>) -> Vec<(&str, u64)> {
    counts
        .iter()
        .map(|(label, count)| (label.as_str(), count.as_u64().unwrap_or(0)))
        .collect()
}

/// One row of the per-stage breakdown table.
pub struct BreakdownRow {
    pub label: String,
    pub meta: StageMeta,
    pub count: u64,
    pub seconds: u64,
    pub percent: f64,
}

#[must_use]
pub fn breakdown(resp: &PredictResponse) -> Vec<BreakdownRow> {
    ordered_counts(&resp.stage_counts)
        .into_iter()
        .map(|(label, count)| BreakdownRow {
            label: label.to_string(),
            meta: stage_meta(&resp.stage_info, label),
            count,
            seconds: count * WINDOW_SECONDS,
            percent: percent(count, resp.total_windows),
        })
        .collect()
}

/// Parse a `#rgb` or `#rrggbb` CSS color as carried in stage metadata.
#[must_use]
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    match hex.len() {
        3 => {
            let mut channels = hex.chars().map(|c| c.to_digit(16));
            let mut next = || {
                let digit = channels.next()??;
                u8::try_from(digit * 17).ok()
            };
            Some((next()?, next()?, next()?))
        }
        6 => {
            // get() rather than slicing: the color string comes from the
            // server and may not split on char boundaries.
            let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
            let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
            let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta_map() -> HashMap<String, StageMeta> {
        let mut info = HashMap::new();
        info.insert(
            "N3".to_string(),
            StageMeta {
                emoji: "\u{1F634}".to_string(),
                description: "Deep sleep".to_string(),
                color: "#2c5f8a".to_string(),
            },
        );
        info
    }

    #[test]
    fn percent_rounds_to_one_decimal() {
        assert!((percent(1, 3) - 33.3).abs() < f64::EPSILON);
        assert!((percent(2, 3) - 66.7).abs() < f64::EPSILON);
        assert!((percent(40, 100) - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn percent_zero_total_is_zero() {
        assert!(percent(10, 0).abs() < f64::EPSILON);
    }

    #[test]
    #[allow(clippy::cast_precision_loss)]
    fn percentages_sum_to_roughly_hundred() {
        let counts = [13_u64, 27, 19, 31, 10];
        let total: u64 = counts.iter().sum();
        let sum: f64 = counts.iter().map(|&c| percent(c, total)).sum();
        // One decimal of rounding error per stage at most.
        assert!((sum - 100.0).abs() <= 0.1 * counts.len() as f64);
    }

    #[test]
    fn stage_meta_known_label() {
        let info = meta_map();
        assert_eq!(stage_meta(&info, "N3").description, "Deep sleep");
    }

    #[test]
    fn stage_meta_fallback_for_unknown_label() {
        let info = meta_map();
        let meta = stage_meta(&info, "Hypnagogia");
        assert_eq!(meta.emoji, "\u{2753}");
        assert_eq!(meta.description, "Hypnagogia");
        assert_eq!(meta.color, "#999");
    }

    #[test]
    fn ordered_counts_preserves_order_and_coerces() {
        let map = json!({"REM": 30, "N1": "bogus", "Wake": 10});
        let Value::Object(map) = map else { unreachable!() };
        let counts = ordered_counts(&map);
        assert_eq!(counts, [("REM", 30), ("N1", 0), ("Wake", 10)]);
    }

    #[test]
    fn breakdown_estimates_seconds() {
        let resp: PredictResponse = serde_json::from_value(json!({
            "success": true,
            "stage_counts": {"N3": 40, "Unknown": 2},
            "stage_info": {},
            "total_windows": 100
        }))
        .unwrap();
        let rows = breakdown(&resp);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].seconds, 1200);
        assert!((rows[0].percent - 40.0).abs() < f64::EPSILON);
        assert_eq!(rows[1].meta.description, "Unknown");
    }

    #[test]
    fn hex_colors_short_and_long() {
        assert_eq!(parse_hex_color("#999"), Some((0x99, 0x99, 0x99)));
        assert_eq!(parse_hex_color("#4a90d9"), Some((0x4a, 0x90, 0xd9)));
        assert_eq!(parse_hex_color("rebeccapurple"), None);
        assert_eq!(parse_hex_color("#12345"), None);
    }

    #[test]
    fn hex_colors_tolerate_multibyte_input() {
        // Server-supplied metadata may hold arbitrary UTF-8; a 6-byte
        // value that is not 6 ASCII digits must parse to None, not panic.
        assert_eq!(parse_hex_color("#a\u{e9}a\u{e9}"), None);
        assert_eq!(parse_hex_color("#\u{1F634}\u{3A9}"), None);
        assert_eq!(parse_hex_color("#\u{e9}9\u{e9}"), None);
    }
}
