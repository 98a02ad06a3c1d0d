//! Hazard zone definitions and membership tests.
//!
//! The SAA is a fixed convex quadrilateral in latitude/longitude; its
//! boundary constants are part of the system contract and must not be
//! reformulated. The polar caps are elevation-threshold regions around
//! observers fixed at the poles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ephemeris::GeodeticPosition;
use crate::events::EventType;
use crate::track::GroundTrack;

const EARTH_RADIUS_KM: f64 = 6378.137;

/// Default elevation threshold above the polar observer. Generous by
/// intent: the satellite counts as "in the cap" well before a physical
/// horizon crossing.
pub const CAP_MIN_ELEVATION_DEG: f64 = -10.0;

/// A designated hazard zone. Ordering is the fixed merge priority:
/// SAA < NorthPolarCap < SouthPolarCap.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum HazardZone {
    SouthAtlanticAnomaly,
    NorthPolarCap,
    SouthPolarCap,
}

impl HazardZone {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SouthAtlanticAnomaly => "SAA",
            Self::NorthPolarCap => "North Pole",
            Self::SouthPolarCap => "South Pole",
        }
    }

    /// Observer latitude for the polar caps; the SAA has none.
    pub fn observer_latitude(&self) -> Option<f64> {
        match self {
            Self::SouthAtlanticAnomaly => None,
            Self::NorthPolarCap => Some(90.0),
            Self::SouthPolarCap => Some(-90.0),
        }
    }
}

/// SAA membership: all four boundary inequalities must hold.
pub fn saa_contains(position: &GeodeticPosition) -> bool {
    let lat = position.latitude;
    let lon = position.longitude;
    (lon * 2.0 / 7.0 + 150.0 / 7.0) > lat
        && (lon * (-5.0 / 8.0) - 15.0) > lat
        && (lon / 10.0 - 44.0) < lat
        && (lon * (-4.0 / 5.0) - 98.0) < lat
}

/// Elevation of the satellite above an observer's local horizon, in
/// degrees. Spherical Earth, ENU topocentric frame at the observer.
pub fn elevation_above_observer(
    observer_lat_deg: f64,
    observer_lon_deg: f64,
    satellite: &GeodeticPosition,
) -> f64 {
    let (ox, oy, oz) = spherical_ecef(observer_lat_deg, observer_lon_deg, 0.0);
    let (sx, sy, sz) = spherical_ecef(
        satellite.latitude,
        satellite.longitude,
        satellite.altitude_km,
    );

    let dx = sx - ox;
    let dy = sy - oy;
    let dz = sz - oz;

    let lat = observer_lat_deg.to_radians();
    let lon = observer_lon_deg.to_radians();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();

    let east = -sin_lon * dx + cos_lon * dy;
    let north = -sin_lat * cos_lon * dx - sin_lat * sin_lon * dy + cos_lat * dz;
    let up = cos_lat * cos_lon * dx + cos_lat * sin_lon * dy + sin_lat * dz;

    let range_horiz = (east * east + north * north).sqrt();
    up.atan2(range_horiz).to_degrees()
}

fn spherical_ecef(lat_deg: f64, lon_deg: f64, alt_km: f64) -> (f64, f64, f64) {
    let lat = lat_deg.to_radians();
    let lon = lon_deg.to_radians();
    let r = EARTH_RADIUS_KM + alt_km;
    (
        r * lat.cos() * lon.cos(),
        r * lat.cos() * lon.sin(),
        r * lat.sin(),
    )
}

/// Raw rise/culminate/set events for one polar cap over a sampled
/// track, plus whether the window opened already inside the cap.
#[derive(Debug, Clone)]
pub struct CapPasses {
    pub events: Vec<(DateTime<Utc>, EventType)>,
    pub initially_inside: bool,
}

/// Scan a track for threshold crossings of the cap observer's
/// elevation. Rise and set land on the first sample at the new state;
/// the culmination is the above-threshold sample of maximum elevation.
pub fn cap_passes(track: &GroundTrack, pole: HazardZone, min_elevation_deg: f64) -> CapPasses {
    let observer_lat = match pole.observer_latitude() {
        Some(lat) => lat,
        None => {
            return CapPasses {
                events: Vec::new(),
                initially_inside: false,
            }
        }
    };

    let mut events = Vec::new();
    let mut initially_inside = false;
    let mut above = false;
    let mut peak: Option<(DateTime<Utc>, f64)> = None;

    for (i, sample) in track.samples.iter().enumerate() {
        let elevation = elevation_above_observer(observer_lat, 0.0, &sample.position);
        let now_above = elevation >= min_elevation_deg;

        if i == 0 {
            initially_inside = now_above;
            above = now_above;
            if now_above {
                peak = Some((sample.instant, elevation));
            }
            continue;
        }

        match (above, now_above) {
            (false, true) => {
                events.push((sample.instant, EventType::Entering));
                peak = Some((sample.instant, elevation));
            }
            (true, true) => {
                if let Some((_, best)) = peak {
                    if elevation > best {
                        peak = Some((sample.instant, elevation));
                    }
                }
            }
            (true, false) => {
                if let Some((instant, _)) = peak.take() {
                    events.push((instant, EventType::Culminating));
                }
                events.push((sample.instant, EventType::Exiting));
            }
            (false, false) => {}
        }
        above = now_above;
    }

    // Pass still open at the end of the track: culmination so far is
    // known, the exit is not.
    if let Some((instant, _)) = peak.take() {
        if above {
            events.push((instant, EventType::Culminating));
        }
    }

    CapPasses {
        events,
        initially_inside,
    }
}
