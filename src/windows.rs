//! Window extraction: partition an analysis window into hazard and
//! safe intervals from a merged event stream.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::events::{EventStream, EventType};
use crate::zones::HazardZone;

/// What an interval represents. Overlapping hazard spans from
/// different zones collapse into one interval carrying the union of
/// their zone tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntervalKind {
    Safe,
    Hazard(BTreeSet<HazardZone>),
}

/// One interval of the window partition. Intervals are contiguous,
/// non-overlapping and cover the window exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub kind: IntervalKind,
}

impl Interval {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn is_safe(&self) -> bool {
        matches!(self.kind, IntervalKind::Safe)
    }
}

/// A half-open hazard span for one zone, before cross-zone merging.
#[derive(Debug, Clone)]
struct ZoneSpan {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    zone: HazardZone,
}

/// Build each zone's hazard spans from its event sub-sequence.
///
/// The zone's state at the window start comes from the stream's
/// explicit membership set. A first event that contradicts it (an
/// `Exiting` while marked outside) re-derives the state as inside
/// instead of raising: that is a determinable edge case, not an
/// external failure. Later contradictory events are dropped.
fn zone_spans(
    stream: &EventStream,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<ZoneSpan> {
    let mut per_zone: BTreeMap<HazardZone, Vec<(DateTime<Utc>, EventType)>> = BTreeMap::new();
    for event in &stream.events {
        if event.event == EventType::Culminating {
            continue;
        }
        per_zone
            .entry(event.zone)
            .or_default()
            .push((event.instant, event.event));
    }
    for zone in &stream.initially_inside {
        per_zone.entry(*zone).or_default();
    }

    let mut spans = Vec::new();
    for (zone, events) in per_zone {
        let mut inside = stream.initially_inside.contains(&zone);
        if !inside {
            if let Some(&(_, first)) = events.first() {
                if first == EventType::Exiting {
                    tracing::debug!(?zone, "first event is an exit; re-deriving initial state");
                    inside = true;
                }
            }
        }

        let mut open = if inside { Some(window_start) } else { None };
        for (instant, kind) in events {
            match (kind, open) {
                (EventType::Entering, None) => open = Some(instant),
                (EventType::Exiting, Some(start)) => {
                    spans.push(ZoneSpan {
                        start,
                        end: instant,
                        zone,
                    });
                    open = None;
                }
                _ => {
                    tracing::debug!(?zone, ?kind, %instant, "dropping out-of-order event");
                }
            }
        }
        if let Some(start) = open {
            spans.push(ZoneSpan {
                start,
                end: window_end,
                zone,
            });
        }
    }
    spans
}

/// Partition `[start, end)` into alternating hazard/safe intervals.
///
/// Pure function of its inputs: running it twice on the same stream
/// and bounds yields identical interval lists. Both the forward and
/// the backward analysis use this one extractor.
pub fn extract_intervals(
    stream: &EventStream,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<Interval> {
    let mut spans = zone_spans(stream, start, end);

    // Clamp to the window and discard anything degenerate.
    for span in &mut spans {
        span.start = span.start.max(start);
        span.end = span.end.min(end);
    }
    spans.retain(|s| s.start < s.end);
    spans.sort_by_key(|s| (s.start, s.end, s.zone));

    // Merge overlapping or abutting spans across zones, keeping the
    // union of zone tags.
    let mut merged: Vec<(DateTime<Utc>, DateTime<Utc>, BTreeSet<HazardZone>)> = Vec::new();
    for span in spans {
        match merged.last_mut() {
            Some((_, cur_end, zones)) if span.start <= *cur_end => {
                *cur_end = (*cur_end).max(span.end);
                zones.insert(span.zone);
            }
            _ => {
                let mut zones = BTreeSet::new();
                zones.insert(span.zone);
                merged.push((span.start, span.end, zones));
            }
        }
    }

    // Fill the gaps with safe intervals.
    let mut intervals = Vec::new();
    let mut cursor = start;
    for (hazard_start, hazard_end, zones) in merged {
        if cursor < hazard_start {
            intervals.push(Interval {
                start: cursor,
                end: hazard_start,
                kind: IntervalKind::Safe,
            });
        }
        intervals.push(Interval {
            start: hazard_start,
            end: hazard_end,
            kind: IntervalKind::Hazard(zones),
        });
        cursor = hazard_end;
    }
    if cursor < end {
        intervals.push(Interval {
            start: cursor,
            end,
            kind: IntervalKind::Safe,
        });
    }

    intervals
}
