//! Error types for the boundaries of the scheduler: settings files, date
//! strings and response names. The scheduling arithmetic itself cannot fail.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("failed to read settings file {}: {source}", path.display())]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings JSON: {0}")]
    SettingsParse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    #[error("invalid date `{input}`, expected YYYY-MM-DD")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("unknown review response `{0}` (expected easy, good or hard)")]
    UnknownResponse(String),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
