// SPDX-License-Identifier: MIT
//! Rule-based sleep recommendations.
//!
//! A fixed rule table evaluated in order; every matching rule appends its
//! messages and the output is the concatenation. Rules are not mutually
//! exclusive, there is no ranking or deduplication.

use serde_json::{Map, Value};

/// Generate recommendations from the stage histogram and quality score.
///
/// Total for every input: absent stages count as zero, and with
/// `total_windows == 0` every stage fraction is zero. One of the three
/// quality tiers always fires, so the result is never empty.
#[must_use]
pub fn recommendations(
    stage_counts: &Map<String, Value>,
    quality_score: i64,
    total_windows: u64,
) -> Vec<String> {
    let deep_sleep = stage_percent(stage_counts, "N3", total_windows);
    let rem = stage_percent(stage_counts, "REM", total_windows);
    let light_sleep = stage_percent(stage_counts, "N1", total_windows);
    let wake = stage_percent(stage_counts, "Wake", total_windows);

    let mut out = Vec::new();

    if quality_score >= 80 {
        out.push(
            "\u{1F31F} Excellent sleep quality! Keep maintaining your current sleep schedule."
                .to_string(),
        );
        out.push(
            "\u{1F4AA} Your sleep pattern shows healthy deep sleep and REM cycles.".to_string(),
        );
    } else if quality_score >= 60 {
        out.push(
            "\u{1F60C} Good sleep quality. Consider slightly earlier bedtime for more rest."
                .to_string(),
        );
        out.push("\u{1F3AF} You could benefit from more consistent sleep patterns.".to_string());
    } else {
        out.push(
            "\u{26A0}\u{FE0F} Your sleep quality needs improvement. Try to increase deep sleep."
                .to_string(),
        );
        out.push("\u{1F634} Aim for 7-9 hours of consistent sleep each night.".to_string());
    }

    if deep_sleep < 15.0 {
        out.push(
            "\u{1F4A4} Deep sleep is important for physical recovery. Reduce screen time 1 hour before bed."
                .to_string(),
        );
        out.push(
            "\u{1F6CF}\u{FE0F} Maintain a cool, dark bedroom (around 65-68\u{B0}F / 18-20\u{B0}C)."
                .to_string(),
        );
    }

    if rem < 20.0 {
        out.push(
            "\u{1F9E0} REM sleep is crucial for memory. Manage stress and avoid caffeine after 2 PM."
                .to_string(),
        );
        out.push("\u{1F3AD} Ensure 7-9 hours of total sleep for adequate REM cycles.".to_string());
    }

    if light_sleep > 30.0 {
        out.push(
            "\u{1F504} High light sleep may indicate frequent awakenings. Check your sleep environment."
                .to_string(),
        );
    }

    if wake > 5.0 {
        out.push(
            "\u{1F441}\u{FE0F} Minimize awakenings by establishing a relaxing pre-sleep routine."
                .to_string(),
        );
    }

    if quality_score < 100 {
        out.push("\u{1F4F1} Put your phone on silent and keep it away from bed.".to_string());
        out.push(
            "\u{1F375} Avoid alcohol 4-6 hours before sleep as it disrupts sleep cycles."
                .to_string(),
        );
    }

    out
}

/// Unrounded percentage of one stage; absent labels and an empty recording
/// both count as zero.
fn stage_percent(stage_counts: &Map<String, Value>, label: &str, total_windows: u64) -> f64 {
    if total_windows == 0 {
        return 0.0;
    }
    let count = stage_counts
        .get(label)
        .and_then(Value::as_u64)
        .unwrap_or(0);
    #[allow(clippy::cast_precision_loss)]
    let fraction = count as f64 / total_windows as f64;
    fraction * 100.0
}
