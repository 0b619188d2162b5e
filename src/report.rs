// SPDX-License-Identifier: MIT
//! Terminal report for a classification result.
//!
//! Pure function of the `/predict` response: quality score, stage
//! breakdown, a colored per-window timeline, the detail table, and the
//! recommendation list. Colors come from the backend's stage metadata and
//! are only emitted when the output is a terminal.

use std::io::Write;

use anyhow::Result;

use crate::analysis::recommend::recommendations;
use crate::analysis::{breakdown, ordered_counts, parse_hex_color, percent, stage_meta};
use crate::api::types::{PredictResponse, render_value};

const TIMELINE_COLUMNS: usize = 60;

/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn print_report(out: &mut impl Write, resp: &PredictResponse, color: bool) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Sleep Quality Score: {}/100", resp.quality_score)?;
    writeln!(
        out,
        "Average confidence:  {}",
        render_value(&resp.average_confidence)
    )?;

    writeln!(out)?;
    writeln!(out, "Stage breakdown ({} windows):", resp.total_windows)?;
    for (label, count) in ordered_counts(&resp.stage_counts) {
        let meta = stage_meta(&resp.stage_info, label);
        let pct = percent(count, resp.total_windows);
        let line = format!("  {} {label:<6} {count:>5} windows  {pct:>5.1}%", meta.emoji);
        writeln!(out, "{}", colorize(&line, &meta.color, color))?;
    }

    write_timeline(out, resp, color)?;

    writeln!(out)?;
    writeln!(out, "Analysis details:")?;
    for row in breakdown(resp) {
        writeln!(
            out,
            "  {} {}: {} windows (~{} seconds)  {:.1}%",
            row.meta.emoji, row.label, row.count, row.seconds, row.percent
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Recommendations:")?;
    for rec in recommendations(&resp.stage_counts, resp.quality_score, resp.total_windows) {
        writeln!(out, "  \u{2022} {rec}")?;
    }

    Ok(())
}

/// One colored block per classified window, 1-based window indices in the
/// gutter, followed by a color legend.
fn write_timeline(out: &mut impl Write, resp: &PredictResponse, color: bool) -> Result<()> {
    if resp.stages.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "Timeline (one block per 30 s window):")?;
    for (row, chunk) in resp.stages.chunks(TIMELINE_COLUMNS).enumerate() {
        write!(out, "  {:>5} ", row * TIMELINE_COLUMNS + 1)?;
        for label in chunk {
            let meta = stage_meta(&resp.stage_info, label);
            write!(out, "{}", colorize("\u{2588}", &meta.color, color))?;
        }
        writeln!(out)?;
    }

    write!(out, "        ")?;
    for (label, _) in ordered_counts(&resp.stage_counts) {
        let meta = stage_meta(&resp.stage_info, label);
        write!(out, "{} {label}  ", colorize("\u{2588}", &meta.color, color))?;
    }
    writeln!(out)?;
    Ok(())
}

fn colorize(text: &str, hex: &str, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match parse_hex_color(hex) {
        Some((r, g, b)) => format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m"),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_response() -> PredictResponse {
        serde_json::from_value(json!({
            "success": true,
            "quality_score": 85,
            "average_confidence": 0.91,
            "stage_counts": {"N3": 40, "REM": 30, "N1": 20, "Wake": 10},
            "stage_info": {
                "N3": {"emoji": "\u{1F634}", "description": "Deep sleep", "color": "#2c5f8a"}
            },
            "stages": ["N3", "N3", "REM", "Wake"],
            "total_windows": 100
        }))
        .unwrap()
    }

    #[test]
    fn report_contains_all_sections() {
        let mut out = Vec::new();
        print_report(&mut out, &sample_response(), false).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Sleep Quality Score: 85/100"));
        assert!(text.contains("Average confidence:  0.91"));
        assert!(text.contains("N3"));
        assert!(text.contains("40.0%"));
        assert!(text.contains("~1200 seconds"));
        assert!(text.contains("Timeline"));
        // Worked example: exactly five recommendations fire for this input.
        assert_eq!(text.matches('\u{2022}').count(), 5);
    }

    #[test]
    fn unknown_stage_labels_render_with_fallback() {
        let mut resp = sample_response();
        resp.stage_counts.insert("Artifact".to_string(), json!(5));
        resp.stages.push("Artifact".to_string());
        let mut out = Vec::new();
        print_report(&mut out, &resp, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\u{2753} Artifact"));
    }

    #[test]
    fn no_escape_codes_without_color() {
        let mut out = Vec::new();
        print_report(&mut out, &sample_response(), false).unwrap();
        assert!(!String::from_utf8(out).unwrap().contains('\x1b'));
    }

    #[test]
    fn colorize_emits_truecolor() {
        assert_eq!(
            colorize("x", "#4a90d9", true),
            "\x1b[38;2;74;144;217mx\x1b[0m"
        );
        assert_eq!(colorize("x", "not-a-color", true), "x");
        assert_eq!(colorize("x", "#4a90d9", false), "x");
    }
}
