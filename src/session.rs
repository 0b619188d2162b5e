// SPDX-License-Identifier: MIT
//! Recording session lifecycle.
//!
//! The session is an explicit state machine (`Idle` / `Recording` /
//! `Stopping`); both the manual stop path and the duration-based auto-stop
//! read the same state, so neither can race the other through UI state.
//! Polling runs at a fixed cadence from the caller's tick loop; the
//! synchronous client keeps at most one poll outstanding, and each applied
//! snapshot carries a sequence number so a stale response can never
//! overwrite a newer one.

use std::time::{Duration, Instant};

use anyhow::{Result, bail};

use crate::api::client::RadarApi;
use crate::api::types::{LiveData, LiveDataPoint, SessionStats};

pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Rows shown in the recent-samples table.
pub const TABLE_ROWS: usize = 10;

/// Cloud-sync badge shown in the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncBadge {
    Waiting,
    Syncing,
    Synced,
}

impl SyncBadge {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Waiting => "Waiting",
            Self::Syncing => "Syncing...",
            Self::Synced => "Synced \u{2713}",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum SessionState {
    Idle,
    Recording { started: Instant, deadline: Instant },
    Stopping { started: Instant, deadline: Instant },
}

/// View state for one recording session against the backend.
///
/// At most one session may be active at a time; `start` while already
/// recording is rejected locally before any request is made.
pub struct RecordingSession {
    state: SessionState,
    pub live: LiveData,
    pub stats: SessionStats,
    pub current_value: Option<f64>,
    pub elapsed: Duration,
    pub badge: SyncBadge,
    pub status: Option<String>,
    pub last_error: Option<String>,
    last_poll: Option<Instant>,
    poll_seq: u64,
    applied_seq: u64,
}

impl Default for RecordingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            live: LiveData::default(),
            stats: SessionStats::default(),
            current_value: None,
            elapsed: Duration::ZERO,
            badge: SyncBadge::Waiting,
            status: None,
            last_error: None,
            last_poll: None,
            poll_seq: 0,
            applied_seq: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        matches!(
            self.state,
            SessionState::Recording { .. } | SessionState::Stopping { .. }
        )
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.live.data_points.len()
    }

    /// The most recent samples, newest last.
    #[must_use]
    pub fn recent_points(&self) -> &[LiveDataPoint] {
        let points = &self.live.data_points;
        &points[points.len().saturating_sub(TABLE_ROWS)..]
    }

    /// Start a recording session.
    ///
    /// Local validation (non-empty port, positive duration, no session
    /// already active) runs before the backend is contacted; on a backend
    /// failure the state is unchanged and the server's message is returned.
    ///
    /// # Errors
    ///
    /// Returns validation errors locally and backend errors verbatim.
    pub fn start(
        &mut self,
        api: &dyn RadarApi,
        port: &str,
        duration_secs: u64,
        now: Instant,
    ) -> Result<()> {
        if self.is_recording() {
            bail!("A recording session is already active");
        }
        if port.trim().is_empty() {
            bail!("Please enter a COM port");
        }
        if duration_secs == 0 {
            bail!("Duration must be greater than 0");
        }

        let resp = api.start_recording(port, duration_secs)?;

        self.state = SessionState::Recording {
            started: now,
            deadline: now + Duration::from_secs(duration_secs),
        };
        self.badge = SyncBadge::Syncing;
        self.status = Some(format!("Recording: {}", resp.message));
        self.last_error = None;
        self.current_value = None;
        self.elapsed = Duration::ZERO;
        self.live = LiveData::default();
        self.last_poll = None;
        Ok(())
    }

    /// Stop the session.
    ///
    /// The session enters `Stopping` for the duration of the request. On
    /// failure it returns to `Recording` and polling resumes; the backend
    /// still considers the session live, so abandoning it locally would
    /// leave the two sides inconsistent.
    ///
    /// # Errors
    ///
    /// Returns the backend's stop error; the session stays live.
    pub fn stop(&mut self, api: &dyn RadarApi) -> Result<()> {
        match self.state {
            SessionState::Recording { started, deadline } => {
                self.state = SessionState::Stopping { started, deadline };
            }
            SessionState::Stopping { .. } => return Ok(()),
            SessionState::Idle => bail!("No recording in progress"),
        }

        match api.stop_recording() {
            Ok(resp) => {
                self.state = SessionState::Idle;
                self.badge = SyncBadge::Synced;
                self.status = Some(format!(
                    "Recording stopped. Total points: {}",
                    resp.total_points
                ));
                // One final statistics refresh; a failure here just leaves
                // the previous stats on screen.
                if let Ok(stats) = api.stats() {
                    self.stats = stats;
                }
                Ok(())
            }
            Err(err) => {
                // The interrupted session picks up where it left off,
                // deadline included.
                if let SessionState::Stopping { started, deadline } = self.state {
                    self.state = SessionState::Recording { started, deadline };
                }
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// One cooperative tick of the session.
    ///
    /// Fires the auto-stop once the deadline passes (a manual stop that
    /// landed first has already moved the state to `Idle`, making this a
    /// no-op) and otherwise polls at most once per [`POLL_INTERVAL`]. Poll
    /// failures are recorded but non-fatal; the next tick retries.
    pub fn tick(&mut self, api: &dyn RadarApi, now: Instant) {
        let SessionState::Recording { deadline, .. } = self.state else {
            return;
        };

        if now >= deadline {
            let _ = self.stop(api);
            return;
        }

        if self
            .last_poll
            .is_some_and(|t| now.duration_since(t) < POLL_INTERVAL)
        {
            return;
        }
        self.last_poll = Some(now);
        self.poll(api, now);
    }

    fn poll(&mut self, api: &dyn RadarApi, now: Instant) {
        let seq = self.poll_seq;
        self.poll_seq += 1;

        match api.live_data() {
            Ok(live) => self.apply_live(seq, live, now),
            Err(err) => {
                self.last_error = Some(format!("live-data poll failed: {err}"));
                return;
            }
        }

        match api.stats() {
            Ok(stats) => self.stats = stats,
            // Stale stats stay visible until a poll succeeds again.
            Err(err) => self.last_error = Some(format!("stats poll failed: {err}")),
        }
    }

    fn apply_live(&mut self, seq: u64, live: LiveData, now: Instant) {
        // A response that lost the race to a newer snapshot is dropped.
        if seq < self.applied_seq {
            return;
        }
        self.applied_seq = seq;

        if let Some(last) = live.data_points.last() {
            self.current_value = Some(last.value);
        }

        if live.is_recording
            && let SessionState::Recording { started, .. } = self.state
        {
            self.elapsed = now.duration_since(started);
        }

        self.live = live;
        self.last_error = None;
    }
}

/// `mm:ss` display of elapsed recording time.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_seconds = elapsed.as_secs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}
