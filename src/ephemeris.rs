//! Ephemeris provider: satellite sub-point at a given instant.
//!
//! The analysis core only depends on the [`EphemerisProvider`] trait;
//! the SGP4-backed implementation lives here. Latitude is geocentric
//! (sufficient for zone classification at this scale) and longitude is
//! rotated by GMST from the TEME frame, normalized to [-180, 180).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::elements::ElementSet;
use crate::{AnalysisError, Result};

const EARTH_RADIUS_KM: f64 = 6378.137;

/// Sub-satellite point in degrees, with the satellite's altitude above
/// the mean equatorial radius.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeodeticPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_km: f64,
}

/// Source of sub-satellite positions. The core invokes this exactly
/// once per sample instant and assumes nothing about latency.
pub trait EphemerisProvider {
    fn subpoint_at(&self, instant: DateTime<Utc>) -> Result<GeodeticPosition>;
}

/// SGP4 propagation from a two-line element set.
pub struct Sgp4Provider {
    constants: sgp4::Constants,
    epoch: DateTime<Utc>,
}

impl Sgp4Provider {
    pub fn from_element_set(set: &ElementSet) -> Result<Self> {
        let elements =
            sgp4::Elements::from_tle(None, set.line1.as_bytes(), set.line2.as_bytes())
                .map_err(|e| AnalysisError::InvalidTle(format!("{:?}", e)))?;

        let constants = sgp4::Constants::from_elements(&elements)
            .map_err(|e| AnalysisError::PropagationFailed(format!("{:?}", e)))?;

        let epoch = DateTime::<Utc>::from_naive_utc_and_offset(elements.datetime, Utc);

        Ok(Self { constants, epoch })
    }
}

impl EphemerisProvider for Sgp4Provider {
    fn subpoint_at(&self, instant: DateTime<Utc>) -> Result<GeodeticPosition> {
        let minutes_since_epoch =
            instant.signed_duration_since(self.epoch).num_seconds() as f64 / 60.0;

        let prediction = self
            .constants
            .propagate(minutes_since_epoch)
            .map_err(|e| AnalysisError::PropagationFailed(format!("{:?}", e)))?;

        let [x, y, z] = prediction.position;
        Ok(teme_to_subpoint(x, y, z, instant))
    }
}

/// Convert a TEME position (km) to the sub-satellite point.
pub fn teme_to_subpoint(x: f64, y: f64, z: f64, instant: DateTime<Utc>) -> GeodeticPosition {
    let r_xy = (x * x + y * y).sqrt();
    let latitude = z.atan2(r_xy).to_degrees();

    let gmst = gmst_rad(instant.timestamp());
    let longitude = normalize_longitude((y.atan2(x) - gmst).to_degrees());

    let altitude_km = (x * x + y * y + z * z).sqrt() - EARTH_RADIUS_KM;

    GeodeticPosition {
        latitude,
        longitude,
        altitude_km,
    }
}

/// Wrap a longitude in degrees into [-180, 180).
pub fn normalize_longitude(lon_deg: f64) -> f64 {
    let wrapped = lon_deg.rem_euclid(360.0);
    if wrapped >= 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// GMST (Greenwich Mean Sidereal Time) from a Unix timestamp, in
/// radians normalized to [0, 2π).
pub fn gmst_rad(unix_timestamp: i64) -> f64 {
    let jd = (unix_timestamp as f64 / 86400.0) + 2440587.5;
    let t = (jd - 2451545.0) / 36525.0;

    let gmst_sec = 67310.54841
        + (876600.0 * 3600.0 + 8640184.812866) * t
        + 0.093104 * t * t
        - 6.2e-6 * t * t * t;

    let gmst = ((gmst_sec / 240.0) * (PI / 180.0)) % (2.0 * PI);
    if gmst < 0.0 {
        gmst + 2.0 * PI
    } else {
        gmst
    }
}
