//! The grade a learner gives after reviewing a note or a card.
use crate::error::SchedulerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewResponse {
    Easy,
    Good,
    Hard,
}

impl fmt::Display for ReviewResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReviewResponse::Easy => "easy",
            ReviewResponse::Good => "good",
            ReviewResponse::Hard => "hard",
        };
        f.pad(name)
    }
}

impl FromStr for ReviewResponse {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(ReviewResponse::Easy),
            "good" => Ok(ReviewResponse::Good),
            "hard" => Ok(ReviewResponse::Hard),
            _ => Err(SchedulerError::UnknownResponse(s.to_string())),
        }
    }
}
