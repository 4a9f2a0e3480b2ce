//! Human readable interval labels ("NEW", "3 day(s)", "1.5 month(s)", "2.1 year(s)").
use std::fmt;

const DAYS_PER_TENTH_MONTH: f64 = 3.04375;
const DAYS_PER_TENTH_YEAR: f64 = 36.525;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IntervalText {
    /// The item has no interval yet.
    New,
    Days(f64),
    Months(f64),
    Years(f64),
}

impl IntervalText {
    /// Short form for narrow displays: "3d", "1.5m", "2.1y".
    pub fn compact(&self) -> String {
        match self {
            IntervalText::New => "NEW".to_string(),
            IntervalText::Days(n) => format!("{n}d"),
            IntervalText::Months(n) => format!("{n}m"),
            IntervalText::Years(n) => format!("{n}y"),
        }
    }
}

impl fmt::Display for IntervalText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalText::New => f.write_str("NEW"),
            IntervalText::Days(n) => write!(f, "{n} day(s)"),
            IntervalText::Months(n) => write!(f, "{n} month(s)"),
            IntervalText::Years(n) => write!(f, "{n} year(s)"),
        }
    }
}

/// Picks the largest unit in which the interval is at least 1, to one decimal.
/// An item that was never scheduled has no interval and reads as new.
pub fn describe_interval(interval: Option<f64>) -> IntervalText {
    let Some(interval) = interval else {
        return IntervalText::New;
    };
    let months = (interval / DAYS_PER_TENTH_MONTH).round() / 10.0;
    let years = (interval / DAYS_PER_TENTH_YEAR).round() / 10.0;

    if months < 1.0 {
        IntervalText::Days(interval)
    } else if years < 1.0 {
        IntervalText::Months(months)
    } else {
        IntervalText::Years(years)
    }
}
