pub mod due_dates;

pub use due_dates::{DayHistogram, DueDateHistogram};
