//! Source of "today" for scheduling calls.
//!
//! Each scheduling operation reads `today()` once, so a provider only needs
//! to stay stable for the duration of a single call. The simulated provider
//! lets callers preview schedules on an arbitrary date.

use crate::error::{Result, SchedulerError};
use chrono::{Days, Local, NaiveDate};

pub trait DateProvider {
    fn today(&self) -> NaiveDate;
}

/// Reads the local wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct LiveDateProvider;

impl DateProvider for LiveDateProvider {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A fixed, manually advanced date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulatedDateProvider {
    today: NaiveDate,
}

impl SimulatedDateProvider {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    /// Moves the simulated date forward (saturating at the last representable date).
    pub fn advance_days(&mut self, days: u64) {
        self.today = self
            .today
            .checked_add_days(Days::new(days))
            .unwrap_or(NaiveDate::MAX);
    }
}

impl DateProvider for SimulatedDateProvider {
    fn today(&self) -> NaiveDate {
        self.today
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    match NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(source) => Err(SchedulerError::InvalidDate {
            input: input.to_string(),
            source,
        }),
    }
}
