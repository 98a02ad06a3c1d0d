//! Ground-track sampling and dateline-safe segmentation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::ephemeris::{EphemerisProvider, GeodeticPosition};
use crate::{AnalysisError, Result};

/// One sampled sub-satellite point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimeSample {
    pub instant: DateTime<Utc>,
    pub position: GeodeticPosition,
}

/// A time-ordered sequence of samples covering one analysis window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundTrack {
    pub samples: Vec<TimeSample>,
}

impl GroundTrack {
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.samples.first().map(|s| s.instant)
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.samples.last().map(|s| s.instant)
    }
}

/// Sample a ground track at fixed cadence, inclusive of `start` and
/// covering at least `duration`. One provider call per instant.
pub fn sample_track<P: EphemerisProvider>(
    provider: &P,
    start: DateTime<Utc>,
    duration: Duration,
    cadence: Duration,
) -> Result<GroundTrack> {
    if cadence <= Duration::zero() {
        return Err(AnalysisError::InvalidWindow(format!(
            "cadence must be positive, got {} s",
            cadence.num_seconds()
        )));
    }
    if duration <= Duration::zero() {
        return Err(AnalysisError::InvalidWindow(format!(
            "duration must be positive, got {} s",
            duration.num_seconds()
        )));
    }

    let cadence_s = cadence.num_seconds();
    let duration_s = duration.num_seconds();
    // Ceiling division so the last sample lands at or past the window end.
    let steps = (duration_s + cadence_s - 1) / cadence_s;

    let mut samples = Vec::with_capacity(steps as usize + 1);
    for k in 0..=steps {
        let instant = start + Duration::seconds(k * cadence_s);
        let position = provider.subpoint_at(instant)?;
        samples.push(TimeSample { instant, position });
    }

    Ok(GroundTrack { samples })
}

/// A straight segment in longitude/latitude space, for rendering or
/// inspecting a track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackSegment {
    pub from_lon: f64,
    pub from_lat: f64,
    pub to_lon: f64,
    pub to_lat: f64,
}

/// Segment the leg between two chronologically adjacent positions.
///
/// If the destination longitude is numerically greater than the
/// origin's, the leg is one segment. Otherwise the track is assumed to
/// have crossed the ±180° anti-meridian and two segments are emitted —
/// origin to `dest + 360°` and `origin − 360°` to dest — so a plotted
/// track never draws a line across the full map width. Heuristic
/// inherited from the reference renderer; preserved exactly, including
/// at the poles where longitude is whatever the provider reports.
pub fn segments_between(origin: &GeodeticPosition, dest: &GeodeticPosition) -> Vec<TrackSegment> {
    if dest.longitude > origin.longitude {
        vec![TrackSegment {
            from_lon: origin.longitude,
            from_lat: origin.latitude,
            to_lon: dest.longitude,
            to_lat: dest.latitude,
        }]
    } else {
        vec![
            TrackSegment {
                from_lon: origin.longitude,
                from_lat: origin.latitude,
                to_lon: dest.longitude + 360.0,
                to_lat: dest.latitude,
            },
            TrackSegment {
                from_lon: origin.longitude - 360.0,
                from_lat: origin.latitude,
                to_lon: dest.longitude,
                to_lat: dest.latitude,
            },
        ]
    }
}

/// Segment a whole track leg by leg.
pub fn segment_track(track: &GroundTrack) -> Vec<TrackSegment> {
    track
        .samples
        .windows(2)
        .flat_map(|pair| segments_between(&pair[0].position, &pair[1].position))
        .collect()
}
