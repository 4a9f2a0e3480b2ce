pub mod config;
pub mod dates;
pub mod error;
pub mod histogram;
pub mod models;
pub mod registry;
pub mod scheduling;

pub use config::Settings;
pub use dates::{DateProvider, LiveDateProvider, SimulatedDateProvider};
pub use error::{Result, SchedulerError};
pub use histogram::{DayHistogram, DueDateHistogram};
pub use models::{Card, Note, NoteLinkStat, NoteLinkStatProvider, ReviewResponse, ScheduleInfo};
pub use registry::EaseRegistry;
pub use scheduling::SchedulingOrchestrator;
