//! Scheduler settings and their JSON loader.
//! Missing fields fall back to defaults; values are validated after parsing.

use crate::error::{Result, SchedulerError};
use crate::models::MIN_EASE;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Ease assumed for items with no review history.
    pub base_ease: f64,
    /// Multiplier applied to the interval on an Easy response.
    pub easy_bonus: f64,
    /// Upper clamp for every computed interval, in days.
    pub maximum_interval: f64,
    /// Cap on how much of a new note's ease comes from its links.
    pub max_link_factor: f64,
    /// Spread due dates using the due-date histogram.
    pub load_balance: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_ease: 250.0,
            easy_bonus: 1.3,
            maximum_interval: 36525.0,
            max_link_factor: 1.0,
            load_balance: true,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.base_ease.is_nan() || self.base_ease < MIN_EASE {
            return Err(SchedulerError::InvalidSetting {
                field: "baseEase",
                reason: format!("must be at least {MIN_EASE}, got {}", self.base_ease),
            });
        }
        if self.easy_bonus.is_nan() || self.easy_bonus < 1.0 {
            return Err(SchedulerError::InvalidSetting {
                field: "easyBonus",
                reason: format!("must be at least 1.0, got {}", self.easy_bonus),
            });
        }
        if self.maximum_interval.is_nan() || self.maximum_interval < 1.0 {
            return Err(SchedulerError::InvalidSetting {
                field: "maximumInterval",
                reason: format!("must be at least 1 day, got {}", self.maximum_interval),
            });
        }
        if !(0.0..=1.0).contains(&self.max_link_factor) {
            return Err(SchedulerError::InvalidSetting {
                field: "maxLinkFactor",
                reason: format!("must be between 0 and 1, got {}", self.max_link_factor),
            });
        }
        Ok(())
    }
}

/// Parses and validates settings from a JSON string.
pub fn settings_from_json(json: &str) -> Result<Settings> {
    let settings: Settings = serde_json::from_str(json)?;
    settings.validate()?;
    Ok(settings)
}

/// Loads settings from a JSON file.
/// Returns an error if the file can't be read, isn't valid JSON or holds out-of-range values.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let io_err = |source| SchedulerError::SettingsIo {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(io_err)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(io_err)?;

    let settings = settings_from_json(&contents)?;
    tracing::info!(path = %path.display(), "loaded scheduler settings");
    Ok(settings)
}
