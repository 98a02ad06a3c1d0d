//! Tagged hazard-event streams.
//!
//! Converts per-sample SAA membership and polar-cap crossings into one
//! chronologically ordered stream of `(instant, zone, event)` records.
//! Numeric event codes are not used anywhere; the tagged representation
//! makes cross-zone collisions impossible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::track::GroundTrack;
use crate::zones::{self, HazardZone};

/// Kind of zone crossing. `Culminating` marks the deepest incursion of
/// a polar-cap pass; it is informational only and never bounds an
/// interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    Entering,
    Culminating,
    Exiting,
}

/// One zone crossing on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardEvent {
    pub instant: DateTime<Utc>,
    pub zone: HazardZone,
    pub event: EventType,
}

/// The merged event stream for one analysis window, with the set of
/// zones the satellite already occupied at the window's first sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventStream {
    pub events: Vec<HazardEvent>,
    pub initially_inside: BTreeSet<HazardZone>,
}

/// SAA enter/exit transitions between consecutive samples. The first
/// sample's membership seeds the initial state; no event is emitted
/// for it.
fn saa_transitions(track: &GroundTrack) -> (Vec<HazardEvent>, bool) {
    let mut events = Vec::new();
    let mut inside = false;

    for (i, sample) in track.samples.iter().enumerate() {
        let now_inside = zones::saa_contains(&sample.position);
        if i == 0 {
            inside = now_inside;
            continue;
        }
        if now_inside != inside {
            events.push(HazardEvent {
                instant: sample.instant,
                zone: HazardZone::SouthAtlanticAnomaly,
                event: if now_inside {
                    EventType::Entering
                } else {
                    EventType::Exiting
                },
            });
            inside = now_inside;
        }
    }

    let initially_inside = track
        .samples
        .first()
        .map(|s| zones::saa_contains(&s.position))
        .unwrap_or(false);
    (events, initially_inside)
}

/// Build the merged stream for a track: SAA transitions plus both
/// polar caps, `Culminating` discarded, sorted by instant with the
/// fixed zone priority breaking ties.
pub fn build_event_stream(track: &GroundTrack, cap_min_elevation_deg: f64) -> EventStream {
    let mut events = Vec::new();
    let mut initially_inside = BTreeSet::new();

    let (saa_events, saa_inside) = saa_transitions(track);
    events.extend(saa_events);
    if saa_inside {
        initially_inside.insert(HazardZone::SouthAtlanticAnomaly);
    }

    for pole in [HazardZone::NorthPolarCap, HazardZone::SouthPolarCap] {
        let passes = zones::cap_passes(track, pole, cap_min_elevation_deg);
        if passes.initially_inside {
            initially_inside.insert(pole);
        }
        events.extend(
            passes
                .events
                .into_iter()
                .filter(|&(_, kind)| kind != EventType::Culminating)
                .map(|(instant, kind)| HazardEvent {
                    instant,
                    zone: pole,
                    event: kind,
                }),
        );
    }

    events.sort_by_key(|e| (e.instant, e.zone));

    EventStream {
        events,
        initially_inside,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::GeodeticPosition;
    use crate::track::TimeSample;
    use chrono::{Duration, TimeZone};

    const SAA_INSIDE: (f64, f64) = (-20.0, -60.0);
    const SAA_OUTSIDE: (f64, f64) = (0.0, 0.0);

    fn track_of(points: &[(f64, f64)]) -> GroundTrack {
        let start = Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap();
        GroundTrack {
            samples: points
                .iter()
                .enumerate()
                .map(|(i, &(lat, lon))| TimeSample {
                    instant: start + Duration::minutes(i as i64),
                    position: GeodeticPosition {
                        latitude: lat,
                        longitude: lon,
                        altitude_km: 550.0,
                    },
                })
                .collect(),
        }
    }

    #[test]
    fn test_saa_enter_exit_pair() {
        let track = track_of(&[
            SAA_OUTSIDE,
            SAA_OUTSIDE,
            SAA_INSIDE,
            SAA_INSIDE,
            SAA_OUTSIDE,
        ]);
        let stream = build_event_stream(&track, zones::CAP_MIN_ELEVATION_DEG);

        assert!(stream.initially_inside.is_empty());
        let saa: Vec<&HazardEvent> = stream
            .events
            .iter()
            .filter(|e| e.zone == HazardZone::SouthAtlanticAnomaly)
            .collect();
        assert_eq!(saa.len(), 2);
        assert_eq!(saa[0].event, EventType::Entering);
        assert_eq!(saa[0].instant, track.samples[2].instant);
        assert_eq!(saa[1].event, EventType::Exiting);
        assert_eq!(saa[1].instant, track.samples[4].instant);
    }

    #[test]
    fn test_starting_inside_emits_no_entering() {
        let track = track_of(&[SAA_INSIDE, SAA_INSIDE, SAA_OUTSIDE]);
        let stream = build_event_stream(&track, zones::CAP_MIN_ELEVATION_DEG);

        assert!(stream
            .initially_inside
            .contains(&HazardZone::SouthAtlanticAnomaly));
        let saa: Vec<&HazardEvent> = stream
            .events
            .iter()
            .filter(|e| e.zone == HazardZone::SouthAtlanticAnomaly)
            .collect();
        assert_eq!(saa.len(), 1);
        assert_eq!(saa[0].event, EventType::Exiting);
    }

    #[test]
    fn test_per_zone_alternation() {
        let track = track_of(&[
            SAA_OUTSIDE,
            SAA_INSIDE,
            SAA_OUTSIDE,
            SAA_INSIDE,
            SAA_OUTSIDE,
            SAA_INSIDE,
        ]);
        let stream = build_event_stream(&track, zones::CAP_MIN_ELEVATION_DEG);

        for zone in [
            HazardZone::SouthAtlanticAnomaly,
            HazardZone::NorthPolarCap,
            HazardZone::SouthPolarCap,
        ] {
            let kinds: Vec<EventType> = stream
                .events
                .iter()
                .filter(|e| e.zone == zone)
                .map(|e| e.event)
                .collect();
            for pair in kinds.windows(2) {
                assert_ne!(pair[0], pair[1], "zone {:?} does not alternate", zone);
            }
        }
    }

    #[test]
    fn test_stream_is_sorted_and_culminations_dropped() {
        // Up over the north pole, then down through the SAA.
        let track = track_of(&[
            (0.0, 0.0),
            (60.0, 0.0),
            (90.0, 0.0),
            (60.0, 0.0),
            (0.0, 0.0),
            (-20.0, -60.0),
            (-20.0, -60.0),
            (0.0, 0.0),
        ]);
        let stream = build_event_stream(&track, zones::CAP_MIN_ELEVATION_DEG);

        assert!(stream
            .events
            .iter()
            .all(|e| e.event != EventType::Culminating));
        for pair in stream.events.windows(2) {
            assert!((pair[0].instant, pair[0].zone) <= (pair[1].instant, pair[1].zone));
        }
        assert!(stream
            .events
            .iter()
            .any(|e| e.zone == HazardZone::NorthPolarCap));
        assert!(stream
            .events
            .iter()
            .any(|e| e.zone == HazardZone::SouthAtlanticAnomaly));
    }

    #[test]
    fn test_empty_quiet_track() {
        let track = track_of(&[SAA_OUTSIDE, SAA_OUTSIDE, SAA_OUTSIDE]);
        let stream = build_event_stream(&track, zones::CAP_MIN_ELEVATION_DEG);
        assert!(stream.events.is_empty());
        assert!(stream.initially_inside.is_empty());
    }
}
