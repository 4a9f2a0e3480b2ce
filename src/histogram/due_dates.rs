//! Per-day counts of scheduled items, used to spread new due dates.
//!
//! Days are counted from "today": day 1 is tomorrow. The scheduler only
//! queries the histogram; whoever commits a schedule is expected to call
//! [`DayHistogram::increment`] for its final interval.

use chrono::NaiveDate;
use std::collections::BTreeMap;

pub trait DueDateHistogram {
    /// Returns the interval in `[target - window, target + window]` whose day
    /// currently has the fewest scheduled items. Intervals below 1 are never
    /// returned.
    fn least_used_interval_in_range(&self, target: i64, window: i64) -> i64;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DayHistogram {
    counts: BTreeMap<i64, usize>,
}

impl DayHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a histogram from absolute due dates. Dates before `today` are
    /// counted as day 0 (overdue).
    pub fn from_due_dates(
        today: NaiveDate,
        due_dates: impl IntoIterator<Item = NaiveDate>,
    ) -> Self {
        let mut histogram = Self::new();
        for due in due_dates {
            let days = (due - today).num_days().max(0);
            histogram.increment(days);
        }
        histogram
    }

    pub fn increment(&mut self, days: i64) {
        *self.counts.entry(days).or_insert(0) += 1;
    }

    pub fn decrement(&mut self, days: i64) {
        if let Some(count) = self.counts.get_mut(&days) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&days);
            }
        }
    }

    pub fn count_for(&self, days: i64) -> usize {
        self.counts.get(&days).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl DueDateHistogram for DayHistogram {
    /// Tie-break: the target itself wins if its day is empty. Otherwise
    /// candidates are visited outward (target-1, target+1, target-2, ...);
    /// the first empty day is taken immediately and a strictly smaller count
    /// replaces the current best, so ties favour the day closest to the
    /// target, earlier before later.
    fn least_used_interval_in_range(&self, target: i64, window: i64) -> i64 {
        let target = target.max(1);
        let mut best = target;
        let mut best_count = self.count_for(target);
        if best_count == 0 {
            return best;
        }

        for offset in 1..=window.max(0) {
            for candidate in [target - offset, target + offset] {
                if candidate < 1 {
                    continue;
                }
                let count = self.count_for(candidate);
                if count == 0 {
                    tracing::trace!(wanted = target, candidate, "empty day found in fuzz window");
                    return candidate;
                }
                if count < best_count {
                    best = candidate;
                    best_count = count;
                }
            }
        }
        best
    }
}
