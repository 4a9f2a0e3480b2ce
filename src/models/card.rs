//! Card is one reviewable side of a question. Only its schedule matters here.
use super::ScheduleInfo;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Card {
    pub front: String,
    pub back: String,
    pub schedule: Option<ScheduleInfo>,
}

impl Card {
    pub fn new(front: &str, back: &str) -> Self {
        Self {
            front: front.to_string(),
            back: back.to_string(),
            schedule: None,
        }
    }

    pub fn with_schedule(mut self, schedule: ScheduleInfo) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub fn has_schedule(&self) -> bool {
        self.schedule.is_some()
    }
}
