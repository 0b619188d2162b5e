// SPDX-License-Identifier: MIT
//! Capture file selection for the analysis upload.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// A capture file accepted for upload. Replaced wholesale on re-selection.
#[derive(Debug)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub content: Vec<u8>,
}

impl SelectedFile {
    /// Accept a file for upload. The filename gate runs before any read:
    /// only names ending in the literal, case-sensitive suffix `.csv` pass.
    /// This matches the original web UI, which filtered on the name rather
    /// than content or MIME type.
    ///
    /// # Errors
    ///
    /// Returns an error for non-`.csv` names and unreadable files.
    pub fn open(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if !is_csv_name(&name) {
            bail!("Please select a CSV file");
        }

        let content = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let size = content.len() as u64;

        Ok(Self {
            name,
            size,
            content,
        })
    }

    /// Size in KB with two decimals, as shown next to the selected file.
    #[must_use]
    pub fn size_display(&self) -> String {
        #[allow(clippy::cast_precision_loss)]
        let kb = self.size as f64 / 1024.0;
        format!("{kb:.2} KB")
    }
}

fn is_csv_name(name: &str) -> bool {
    name.ends_with(".csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_lowercase_csv() {
        assert!(is_csv_name("data.csv"));
        assert!(is_csv_name("radar_data_20250101_010203.csv"));
    }

    #[test]
    fn suffix_check_is_case_sensitive() {
        assert!(!is_csv_name("DATA.CSV"));
        assert!(!is_csv_name("data.Csv"));
    }

    #[test]
    fn rejects_wrong_or_missing_suffix() {
        assert!(!is_csv_name("data.csv.txt"));
        assert!(!is_csv_name("data"));
        assert!(!is_csv_name(""));
    }

    #[test]
    fn open_rejects_non_csv_without_reading() {
        let err = SelectedFile::open(Path::new("/nonexistent/report.pdf")).unwrap_err();
        assert_eq!(err.to_string(), "Please select a CSV file");
    }

    #[test]
    fn size_display_two_decimals() {
        let file = SelectedFile {
            name: "data.csv".to_string(),
            size: 1536,
            content: Vec::new(),
        };
        assert_eq!(file.size_display(), "1.50 KB");
    }
}
