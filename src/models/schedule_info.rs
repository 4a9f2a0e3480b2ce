//! Schedule state carried by every note and card.
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Sub-day ticks (milliseconds) in one day.
pub const TICKS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Interval given to an item before its first review.
pub const INITIAL_INTERVAL: f64 = 1.0;

/// Ease never drops below this after a Hard response.
pub const MIN_EASE: f64 = 130.0;

/// Whether a schedule belongs to a whole note or to a single flashcard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Note,
    Card,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInfo {
    pub due_date: Option<NaiveDate>,
    pub interval: f64,
    pub ease: f64,
    #[serde(default)]
    pub delayed_before_review_ticks: i64,
}

impl ScheduleInfo {
    pub fn new(due_date: Option<NaiveDate>, interval: f64, ease: f64) -> Self {
        Self {
            due_date,
            interval,
            ease,
            delayed_before_review_ticks: 0,
        }
    }

    /// Whole days the review was late by. Early or unknown delays count as zero.
    pub fn delayed_days(&self) -> i64 {
        delayed_days(self.delayed_before_review_ticks)
    }
}

pub(crate) fn delayed_days(ticks: i64) -> i64 {
    ticks.div_euclid(TICKS_PER_DAY).max(0)
}

/// `today` plus the interval, rounded to whole days.
pub fn due_date_after(today: NaiveDate, interval: f64) -> NaiveDate {
    let days = interval.round().max(0.0) as u64;
    today
        .checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}
