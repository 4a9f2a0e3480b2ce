//! Aggregate link statistics for a note, produced by the note graph.
use crate::registry::EaseRegistry;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NoteLinkStat {
    pub total_link_count: u32,
    /// Sum of linked notes' ease, each weighted by its page rank.
    pub link_total: f64,
    /// Sum of the page-rank weights, the normaliser for `link_total`.
    pub link_pg_total: f64,
}

impl NoteLinkStat {
    /// Page-rank weighted mean ease of linked notes, if there is any usable weight.
    pub fn weighted_ease(&self) -> Option<f64> {
        (self.total_link_count > 0 && self.link_pg_total > 0.0)
            .then(|| self.link_total / self.link_pg_total)
    }
}

/// Computes link statistics for a note. Must be deterministic for a fixed
/// graph snapshot and registry state.
pub trait NoteLinkStatProvider {
    fn calc_link_stat(&self, path: &str, registry: &EaseRegistry) -> NoteLinkStat;
}
