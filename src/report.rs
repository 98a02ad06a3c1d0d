//! Report rendering for the CLI.
//!
//! All instants are exchanged as `DD-MM-YYYY HH:MM:SS` UTC; the period
//! lines are `DD-MM-YYYY From HH:MM:SS to HH:MM:SS`. Both formats are
//! compatibility requirements.

use chrono::{DateTime, Utc};

use crate::advisory::{AdvisoryOutcome, SafeWindowPlan};
use crate::windows::{Interval, IntervalKind};
use crate::WindowAnalysis;

pub const TIMESTAMP_FMT: &str = "%d-%m-%Y %H:%M:%S";
const DATE_FMT: &str = "%d-%m-%Y";
const TIME_FMT: &str = "%H:%M:%S";

pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.format(TIMESTAMP_FMT).to_string()
}

/// `DD-MM-YYYY From HH:MM:SS to HH:MM:SS`, dated by the period start.
fn format_period(interval: &Interval) -> String {
    format!(
        "{} From {} to {}",
        interval.start.format(DATE_FMT),
        interval.start.format(TIME_FMT),
        interval.end.format(TIME_FMT)
    )
}

fn zone_tags(kind: &IntervalKind) -> String {
    match kind {
        IntervalKind::Safe => String::new(),
        IntervalKind::Hazard(zones) => zones
            .iter()
            .map(|z| format!("{} flyover", z.label()))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// The forward-looking report: safe periods with advisory annotations.
pub fn render_future_report(analysis: &WindowAnalysis) -> String {
    let mut out = String::new();
    out.push_str("You can schedule radiation sensitive activities during these periods:\n");

    if analysis.safe_windows.is_empty() {
        out.push_str("  (no safe periods in this window)\n");
        return out;
    }

    for plan in &analysis.safe_windows {
        out.push_str(&format!("{}\n", format_period(&plan.interval)));
        match &plan.outcome {
            AdvisoryOutcome::Scheduled(cmd) => {
                out.push_str(&format!("    schedule command at '{}'\n", cmd.label));
            }
            AdvisoryOutcome::BelowMinimum => {}
            AdvisoryOutcome::LeadTimeTooLong => {
                out.push_str("    (window qualifies but lead time does not fit; no command)\n");
            }
        }
        out.push('\n');
    }
    out
}

/// The backward-looking report: hazard periods only, tagged with their
/// zone names.
pub fn render_past_report(analysis: &WindowAnalysis, horizon_hours: i64) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Times of dangerous radiation area flyovers in the last {} hours:\n",
        horizon_hours
    ));

    let hazards: Vec<&Interval> = analysis
        .intervals
        .iter()
        .filter(|i| !i.is_safe())
        .collect();

    if hazards.is_empty() {
        out.push_str("  (no hazard flyovers in this window)\n");
        return out;
    }

    for interval in hazards {
        out.push_str(&format!(
            "{} {}\n",
            format_period(interval),
            zone_tags(&interval.kind)
        ));
    }
    out
}
