//! Radiation Hazard Window Analysis
//!
//! Identifies intervals during which a satellite crosses designated
//! hazard zones — the South Atlantic Anomaly and the two polar caps —
//! over a sampled ground track, derives the complementary safe
//! intervals, and plans advisory commands for safe windows long enough
//! to schedule radiation-sensitive operations.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod advisory;
pub mod catalog;
pub mod elements;
pub mod ephemeris;
pub mod events;
pub mod report;
pub mod track;
pub mod windows;
pub mod zones;

pub use advisory::{AdvisoryCommand, AdvisoryOutcome, SafeWindowPlan};
pub use ephemeris::{EphemerisProvider, GeodeticPosition};
pub use events::{EventStream, EventType, HazardEvent};
pub use track::{GroundTrack, TimeSample, TrackSegment};
pub use windows::{Interval, IntervalKind};
pub use zones::HazardZone;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Unknown satellite: {0}")]
    UnknownSatellite(String),
    #[error("Element set unavailable: {0}")]
    ElementsUnavailable(String),
    #[error("Invalid analysis window: {0}")]
    InvalidWindow(String),
    #[error("Invalid TLE format: {0}")]
    InvalidTle(String),
    #[error("Propagation failed: {0}")]
    PropagationFailed(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Per-run analysis parameters. Built once and passed explicitly to
/// the sampler, classifier and planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Lookahead/lookback horizon in hours.
    pub horizon_hours: i64,
    /// Ground-track sample cadence in minutes.
    pub cadence_minutes: i64,
    /// Minimum safe-interval duration that qualifies for an advisory.
    pub min_safe_minutes: i64,
    /// Offset from a qualifying interval's start to the advisory instant.
    pub lead_minutes: i64,
    /// Elevation threshold above the polar observer for cap membership.
    pub cap_min_elevation_deg: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            horizon_hours: 6,
            cadence_minutes: 1,
            min_safe_minutes: 7,
            lead_minutes: 3,
            cap_min_elevation_deg: zones::CAP_MIN_ELEVATION_DEG,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        if self.horizon_hours <= 0 {
            return Err(AnalysisError::InvalidWindow(format!(
                "horizon must be positive, got {} hours",
                self.horizon_hours
            )));
        }
        if self.cadence_minutes <= 0 {
            return Err(AnalysisError::InvalidWindow(format!(
                "cadence must be positive, got {} minutes",
                self.cadence_minutes
            )));
        }
        Ok(())
    }

    pub fn horizon(&self) -> Duration {
        Duration::hours(self.horizon_hours)
    }

    pub fn cadence(&self) -> Duration {
        Duration::minutes(self.cadence_minutes)
    }
}

/// Result of one analysis run over a single `[start, end)` window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowAnalysis {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub intervals: Vec<Interval>,
    pub safe_windows: Vec<SafeWindowPlan>,
}

/// Run the full pipeline for one window: sample the ground track,
/// classify hazard-zone crossings, partition the window into
/// hazard/safe intervals and plan advisories for the safe ones.
///
/// Pure apart from the provider calls; re-running with the same inputs
/// yields identical output.
pub fn analyze_window<P: EphemerisProvider>(
    provider: &P,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    config: &AnalysisConfig,
) -> Result<WindowAnalysis> {
    config.validate()?;
    if end <= start {
        return Err(AnalysisError::InvalidWindow(format!(
            "window end {} not after start {}",
            end, start
        )));
    }

    let track = track::sample_track(provider, start, end - start, config.cadence())?;
    let stream = events::build_event_stream(&track, config.cap_min_elevation_deg);
    tracing::debug!(
        events = stream.events.len(),
        initially_inside = stream.initially_inside.len(),
        "event stream built"
    );

    let intervals = windows::extract_intervals(&stream, start, end);
    let safe_windows = advisory::plan_safe_windows(
        &intervals,
        Duration::minutes(config.min_safe_minutes),
        Duration::minutes(config.lead_minutes),
    );

    Ok(WindowAnalysis {
        start,
        end,
        intervals,
        safe_windows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::AdvisoryOutcome;
    use chrono::TimeZone;

    /// Synthetic ephemeris: inside the SAA for minutes [5, 12) after
    /// the reference instant, outside everywhere else, never near a
    /// pole.
    struct SaaDipProvider {
        reference: DateTime<Utc>,
    }

    impl EphemerisProvider for SaaDipProvider {
        fn subpoint_at(&self, instant: DateTime<Utc>) -> Result<GeodeticPosition> {
            let minute = (instant - self.reference).num_minutes();
            let (lat, lon) = if (5..12).contains(&minute) {
                (-20.0, -60.0)
            } else {
                (0.0, 0.0)
            };
            Ok(GeodeticPosition {
                latitude: lat,
                longitude: lon,
                altitude_km: 550.0,
            })
        }
    }

    #[test]
    fn test_end_to_end_saa_dip() {
        let start = Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap();
        let end = start + Duration::minutes(20);
        let provider = SaaDipProvider { reference: start };
        let config = AnalysisConfig::default();

        let analysis = analyze_window(&provider, start, end, &config).unwrap();

        assert_eq!(analysis.intervals.len(), 3);
        assert!(analysis.intervals[0].is_safe());
        assert_eq!(analysis.intervals[0].end, start + Duration::minutes(5));
        assert!(!analysis.intervals[1].is_safe());
        assert_eq!(analysis.intervals[1].end, start + Duration::minutes(12));
        assert!(analysis.intervals[2].is_safe());
        assert_eq!(analysis.intervals[2].end, end);

        // Leading 5-minute window: reported, no advisory. Trailing
        // 8-minute window: advisory 3 minutes in, at minute 15.
        assert_eq!(analysis.safe_windows.len(), 2);
        assert_eq!(analysis.safe_windows[0].outcome, AdvisoryOutcome::BelowMinimum);
        match &analysis.safe_windows[1].outcome {
            AdvisoryOutcome::Scheduled(cmd) => {
                assert_eq!(cmd.scheduled_at, start + Duration::minutes(15));
            }
            other => panic!("expected advisory, got {:?}", other),
        }
    }

    #[test]
    fn test_analyze_window_rejects_bad_config() {
        let start = Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap();
        let provider = SaaDipProvider { reference: start };

        let config = AnalysisConfig {
            horizon_hours: 0,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            analyze_window(&provider, start, start + Duration::hours(1), &config),
            Err(AnalysisError::InvalidWindow(_))
        ));

        let config = AnalysisConfig::default();
        assert!(matches!(
            analyze_window(&provider, start, start, &config),
            Err(AnalysisError::InvalidWindow(_))
        ));
    }

    #[test]
    fn test_analysis_serializes_to_json() {
        let start = Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap();
        let provider = SaaDipProvider { reference: start };
        let analysis = analyze_window(
            &provider,
            start,
            start + Duration::minutes(20),
            &AnalysisConfig::default(),
        )
        .unwrap();

        // The CLI's --json document embeds the analysis as-is.
        let json = serde_json::to_string_pretty(&analysis).unwrap();
        assert!(json.contains("\"intervals\""));
        assert!(json.contains("\"safe_windows\""));
        assert!(json.contains("SouthAtlanticAnomaly"));

        let back: WindowAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(back.intervals, analysis.intervals);
        assert_eq!(back.safe_windows, analysis.safe_windows);
    }

    #[test]
    fn test_quiet_window_is_one_safe_interval() {
        let start = Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap();
        // Reference far in the past so the dip never occurs in-window.
        let provider = SaaDipProvider {
            reference: start - Duration::hours(24),
        };
        let analysis =
            analyze_window(&provider, start, start + Duration::hours(1), &AnalysisConfig::default())
                .unwrap();
        assert_eq!(analysis.intervals.len(), 1);
        assert!(analysis.intervals[0].is_safe());
    }
}
