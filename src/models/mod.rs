pub mod card;
pub mod ease;
pub mod interval_text;
pub mod link_stat;
pub mod note;
pub mod osr;
pub mod review_response;
pub mod schedule_info;

pub use card::Card;
pub use ease::average_ease;
pub use interval_text::{IntervalText, describe_interval};
pub use link_stat::{NoteLinkStat, NoteLinkStatProvider};
pub use note::{Note, Question};
pub use osr::{ReviewInput, ScheduleOutcome, fuzz_window, schedule};
pub use review_response::ReviewResponse;
pub use schedule_info::{
    INITIAL_INTERVAL, ItemKind, MIN_EASE, ScheduleInfo, TICKS_PER_DAY, due_date_after,
};
