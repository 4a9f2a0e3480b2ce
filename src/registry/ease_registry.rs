//! Latest known ease for every note path.
//!
//! Entries are created on first write and overwritten on every later review.
//! The registry never removes entries on its own; the owner of the note files
//! calls [`EaseRegistry::remove_path`] when a note goes away.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EaseRegistry {
    eases: HashMap<String, f64>,
}

impl EaseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_ease(&self, path: &str) -> bool {
        self.eases.contains_key(path)
    }

    pub fn get_ease(&self, path: &str) -> Option<f64> {
        self.eases.get(path).copied()
    }

    pub fn set_ease(&mut self, path: &str, ease: f64) {
        tracing::debug!(path, ease, "ease registry updated");
        self.eases.insert(path.to_string(), ease);
    }

    pub fn remove_path(&mut self, path: &str) -> Option<f64> {
        self.eases.remove(path)
    }

    pub fn len(&self) -> usize {
        self.eases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.eases.iter().map(|(path, ease)| (path.as_str(), *ease))
    }

    /// Mean ease over every registered path, `None` when empty.
    pub fn average_ease(&self) -> Option<f64> {
        if self.eases.is_empty() {
            return None;
        }
        let total: f64 = self.eases.values().sum();
        Some(total / self.eases.len() as f64)
    }
}
