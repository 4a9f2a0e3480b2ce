//! OSR scheduling: an SM-2 style interval/ease update driven by three grades.
//!
//! - Easy raises ease by 20 and grows the interval by the new ease, then by the easy bonus
//! - Good grows the interval by the current ease (late days count half); a never-reviewed
//!   item answered Good is fast-tracked to exactly 2 days
//! - Hard lowers ease by 20 (never below 130) and halves the interval
//! - With load balancing on, intervals over a week are moved to the least used day
//!   inside a tolerance window instead of being fuzzed randomly
//! - Results are capped at the maximum interval and rounded to one decimal place

use super::schedule_info::delayed_days;
use super::{MIN_EASE, ReviewResponse};
use crate::config::Settings;
use crate::histogram::DueDateHistogram;

/// Interval a never-reviewed item gets on its first Good response.
pub const NEW_ITEM_GOOD_INTERVAL: f64 = 2.0;

const EASE_STEP: f64 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReviewInput {
    pub response: ReviewResponse,
    pub interval: f64,
    pub ease: f64,
    pub delayed_ticks: i64,
    pub is_new_item: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduleOutcome {
    pub interval: f64,
    pub ease: f64,
}

/// Calculates the next interval and ease for a review.
/// The histogram is only read, never updated.
pub fn schedule(
    input: &ReviewInput,
    settings: &Settings,
    histogram: Option<&dyn DueDateHistogram>,
) -> ScheduleOutcome {
    let delayed = delayed_days(input.delayed_ticks) as f64;
    let mut ease = input.ease;

    let mut interval = match input.response {
        ReviewResponse::Easy => {
            ease += EASE_STEP;
            let grown = ((input.interval + delayed) * ease / 100.0).round().max(1.0);
            (grown * settings.easy_bonus).round()
        }
        ReviewResponse::Good if input.is_new_item => NEW_ITEM_GOOD_INTERVAL,
        ReviewResponse::Good => (input.interval + delayed / 2.0) * ease / 100.0,
        ReviewResponse::Hard => {
            ease = (ease - EASE_STEP).max(MIN_EASE);
            (input.interval * 0.5).round().max(1.0)
        }
    };

    // First successful review skips load balancing, the cap and rounding.
    if input.is_new_item && input.response == ReviewResponse::Good {
        return ScheduleOutcome { interval, ease };
    }

    if let Some(histogram) = histogram.filter(|_| settings.load_balance) {
        interval = load_balance(interval, histogram);
    }

    interval = interval.min(settings.maximum_interval);
    interval = (interval * 10.0).round() / 10.0;

    ScheduleOutcome { interval, ease }
}

/// Half-width of the load balancing window for a rounded interval.
/// `None` for intervals of a week or less, which are never moved.
pub fn fuzz_window(interval: f64) -> Option<i64> {
    if interval <= 7.0 {
        None
    } else if interval <= 21.0 {
        Some(1)
    } else if interval <= 180.0 {
        Some(3_i64.min((interval * 0.05).floor() as i64))
    } else {
        Some(7_i64.min((interval * 0.025).floor() as i64))
    }
}

fn load_balance(interval: f64, histogram: &dyn DueDateHistogram) -> f64 {
    let interval = interval.round();
    match fuzz_window(interval) {
        Some(window) => {
            let chosen = histogram.least_used_interval_in_range(interval as i64, window);
            tracing::trace!(interval, window, chosen, "load balanced interval");
            chosen as f64
        }
        None => interval,
    }
}
