// SPDX-License-Identifier: MIT
//! Synchronous HTTP client for the radar backend.
//!
//! One client per invocation, built from the `--url` flag. All requests are
//! blocking, which also serializes live-data polls: a new poll cannot start
//! while the previous one is outstanding.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use super::types::{
    LiveData, PredictResponse, SessionStats, StartRequest, StartResponse, StopResponse,
};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
// Classification of a long capture can take a while server-side.
const PREDICT_TIMEOUT: Duration = Duration::from_secs(120);
const MULTIPART_BOUNDARY: &str = "----somnoscope-7da24f2e93b1";

/// Backend operations the recording session depends on.
///
/// [`BackendClient`] is the production implementation; session tests drive
/// the lifecycle with a scripted fake instead.
pub trait RadarApi {
    /// # Errors
    ///
    /// Returns the server's error message, or a transport error.
    fn start_recording(&self, port: &str, duration: u64) -> Result<StartResponse>;
    /// # Errors
    ///
    /// Returns the server's error message, or a transport error.
    fn stop_recording(&self) -> Result<StopResponse>;
    /// # Errors
    ///
    /// Returns an error if the request or deserialization fails.
    fn live_data(&self) -> Result<LiveData>;
    /// # Errors
    ///
    /// Returns an error if the request or deserialization fails.
    fn stats(&self) -> Result<SessionStats>;
}

pub struct BackendClient {
    base_url: String,
}

impl BackendClient {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Upload a CSV capture to `POST /predict` and return the analysis.
    ///
    /// A non-2xx status or a `success: false` body both surface the server's
    /// error message, falling back to a generic one when the body carries
    /// none.
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures, unparseable responses, and
    /// classifications the server reports as failed.
    pub fn predict(&self, file_name: &str, content: &[u8]) -> Result<PredictResponse> {
        let body = multipart_body(MULTIPART_BOUNDARY, file_name, content);
        let result = ureq::post(&self.url("/predict"))
            .timeout(PREDICT_TIMEOUT)
            .set(
                "Content-Type",
                &format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .send_bytes(&body);

        let resp = check(result, PREDICT_FALLBACK)?;
        let parsed: PredictResponse = resp
            .into_json()
            .context("failed to parse predict response")?;

        if !parsed.success {
            let message = parsed
                .error
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .unwrap_or(PREDICT_FALLBACK);
            bail!("{message}");
        }

        Ok(parsed)
    }
}

impl RadarApi for BackendClient {
    fn start_recording(&self, port: &str, duration: u64) -> Result<StartResponse> {
        let result = ureq::post(&self.url("/start-recording"))
            .timeout(REQUEST_TIMEOUT)
            .send_json(&StartRequest { port, duration });
        let resp = check(result, "Failed to start recording")?;
        resp.into_json()
            .context("failed to parse start-recording response")
    }

    fn stop_recording(&self) -> Result<StopResponse> {
        let result = ureq::post(&self.url("/stop-recording"))
            .timeout(REQUEST_TIMEOUT)
            .call();
        let resp = check(result, "Failed to stop recording")?;
        resp.into_json()
            .context("failed to parse stop-recording response")
    }

    fn live_data(&self) -> Result<LiveData> {
        let result = ureq::get(&self.url("/get-live-data"))
            .timeout(REQUEST_TIMEOUT)
            .call();
        let resp = check(result, "Failed to fetch live data")?;
        resp.into_json().context("failed to parse live data")
    }

    fn stats(&self) -> Result<SessionStats> {
        let result = ureq::get(&self.url("/get-stats"))
            .timeout(REQUEST_TIMEOUT)
            .call();
        let resp = check(result, "Failed to fetch statistics")?;
        resp.into_json().context("failed to parse statistics")
    }
}

const PREDICT_FALLBACK: &str = "An error occurred during analysis";

/// Error body every endpoint uses on failure.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

fn check(result: Result<ureq::Response, ureq::Error>, fallback: &str) -> Result<ureq::Response> {
    match result {
        Ok(resp) => Ok(resp),
        Err(ureq::Error::Status(_, resp)) => {
            let body = resp.into_string().unwrap_or_default();
            bail!("{}", extract_error(&body, fallback));
        }
        Err(err) => Err(err).with_context(|| format!("network error: {fallback}")),
    }
}

/// Pull the server-provided message out of an error body, or fall back.
fn extract_error(body: &str, fallback: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { error: Some(msg) }) if !msg.trim().is_empty() => msg,
        _ => fallback.to_string(),
    }
}

/// Minimal `multipart/form-data` payload with a single `file` part. The
/// backend only reads that one field, so a fixed boundary suffices.
fn multipart_body(boundary: &str, file_name: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(content.len() + 256);
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: text/csv\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let client = BackendClient::new("http://localhost:5000/");
        assert_eq!(client.url("/get-stats"), "http://localhost:5000/get-stats");
    }

    #[test]
    fn extract_error_prefers_server_message() {
        assert_eq!(
            extract_error(r#"{"error": "Recording already in progress"}"#, "fallback"),
            "Recording already in progress"
        );
    }

    #[test]
    fn extract_error_falls_back_on_garbage() {
        assert_eq!(extract_error("<html>502</html>", "fallback"), "fallback");
        assert_eq!(extract_error("", "fallback"), "fallback");
        assert_eq!(extract_error(r#"{"error": "  "}"#, "fallback"), "fallback");
    }

    #[test]
    fn multipart_body_frames_the_file_part() {
        let body = multipart_body("XYZ", "night.csv", b"time_sec,value\n0.0,1.0\n");
        let text = String::from_utf8(body).unwrap();
        assert!(text.starts_with("--XYZ\r\n"));
        assert!(text.contains("name=\"file\"; filename=\"night.csv\""));
        assert!(text.contains("time_sec,value"));
        assert!(text.ends_with("\r\n--XYZ--\r\n"));
    }
}
