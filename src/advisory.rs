//! Safe-window advisory planning.
//!
//! Safe intervals at least the configured minimum long get one
//! advisory command, offset from the interval start by the lead time.
//! The advisory instant must fall strictly inside its interval; a lead
//! time that cannot keep the schedule margin is reported, not silently
//! clamped.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::report;
use crate::windows::Interval;

/// Slack required between the advisory instant and the interval end.
const SCHEDULE_MARGIN_SECONDS: i64 = 30;

/// A recommended command timestamp inside a safe interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryCommand {
    pub scheduled_at: DateTime<Utc>,
    pub label: String,
}

/// Outcome of planning one safe interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvisoryOutcome {
    /// The interval qualifies and an advisory was scheduled.
    Scheduled(AdvisoryCommand),
    /// The interval is shorter than the configured minimum.
    BelowMinimum,
    /// The interval qualifies, but the lead time would put the
    /// advisory outside the schedule margin. Caller-visible
    /// validation failure; analysis continues.
    LeadTimeTooLong,
}

/// One safe interval with its planning outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeWindowPlan {
    pub interval: Interval,
    pub outcome: AdvisoryOutcome,
}

/// Plan advisories for every safe interval of a window partition.
pub fn plan_safe_windows(
    intervals: &[Interval],
    min_duration: Duration,
    lead_time: Duration,
) -> Vec<SafeWindowPlan> {
    intervals
        .iter()
        .filter(|interval| interval.is_safe())
        .map(|interval| {
            let outcome = plan_one(interval, min_duration, lead_time);
            SafeWindowPlan {
                interval: interval.clone(),
                outcome,
            }
        })
        .collect()
}

fn plan_one(interval: &Interval, min_duration: Duration, lead_time: Duration) -> AdvisoryOutcome {
    let duration = interval.duration();
    if duration < min_duration {
        return AdvisoryOutcome::BelowMinimum;
    }
    if lead_time + Duration::seconds(SCHEDULE_MARGIN_SECONDS) >= duration {
        tracing::warn!(
            window_start = %report::format_instant(interval.start),
            window_minutes = duration.num_minutes(),
            lead_minutes = lead_time.num_minutes(),
            "lead time does not fit inside safe window; no advisory emitted"
        );
        return AdvisoryOutcome::LeadTimeTooLong;
    }

    let scheduled_at = interval.start + lead_time;
    AdvisoryOutcome::Scheduled(AdvisoryCommand {
        label: report::format_instant(scheduled_at),
        scheduled_at,
    })
}
