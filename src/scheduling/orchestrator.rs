//! Note and card scheduling on top of the OSR algorithm.
//!
//! Notes and cards share [`schedule`]; they differ only in how the ease is
//! seeded for a first review and in how a Hard grade affects the due date.
//! The orchestrator owns the [`EaseRegistry`], which is written when a note
//! is reviewed or loaded and read when new notes and cards are scheduled.

use crate::config::Settings;
use crate::dates::DateProvider;
use crate::histogram::DueDateHistogram;
use crate::models::ease::{average_ease, sample_confidence};
use crate::models::{
    INITIAL_INTERVAL, ItemKind, Note, NoteLinkStat, NoteLinkStatProvider, ReviewInput,
    ReviewResponse, ScheduleInfo, due_date_after, schedule,
};
use crate::registry::EaseRegistry;
use chrono::NaiveDate;
use tracing::debug;

pub struct SchedulingOrchestrator {
    settings: Settings,
    registry: EaseRegistry,
}

impl SchedulingOrchestrator {
    pub fn new(settings: Settings) -> Self {
        Self::with_registry(settings, EaseRegistry::new())
    }

    /// Resumes with eases saved from an earlier session.
    pub fn with_registry(settings: Settings, registry: EaseRegistry) -> Self {
        Self { settings, registry }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn note_stats(&self) -> &EaseRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut EaseRegistry {
        &mut self.registry
    }

    /// First schedule for a note that has never been reviewed.
    ///
    /// The ease is seeded from the note's links, averaged with any ease the
    /// registry already holds for the path. The registry itself is not updated.
    pub fn new_schedule_for_note(
        &self,
        path: &str,
        graph: &dyn NoteLinkStatProvider,
        response: ReviewResponse,
        histogram: Option<&dyn DueDateHistogram>,
        dates: &dyn DateProvider,
    ) -> ScheduleInfo {
        let today = dates.today();
        let link_stat = graph.calc_link_stat(path, &self.registry);

        let mut ease = self.link_seeded_ease(&link_stat);
        if let Some(known) = self.registry.get_ease(path) {
            ease = (ease + known) / 2.0;
        }

        let provisional = ScheduleInfo::new(None, INITIAL_INTERVAL, ease.round());
        let result = self.reschedule(
            ItemKind::Note,
            response,
            &provisional,
            true,
            histogram,
            today,
        );
        debug!(
            path,
            %response,
            interval = result.interval,
            ease = result.ease,
            "new note schedule"
        );
        result
    }

    /// Blends the ease of a freshly loaded note's cards with the ease the
    /// note had before and stores the result, if there is one.
    pub fn on_note_loaded(
        &mut self,
        path: &str,
        note: Option<&Note>,
        prior_note_ease: Option<f64>,
    ) -> Option<f64> {
        let from_cards = note
            .and_then(|note| average_ease(note.cards(), &self.settings))
            .filter(|ease| *ease > 0.0);
        let prior = prior_note_ease.filter(|ease| *ease > 0.0);

        let ease = match (from_cards, prior) {
            (Some(cards), Some(prior)) => Some((cards + prior) / 2.0),
            (cards, prior) => cards.or(prior),
        }?;

        self.registry.set_ease(path, ease);
        Some(ease)
    }

    /// Schedule for a note after a review; records the new ease for the path.
    pub fn updated_schedule_for_note(
        &mut self,
        path: &str,
        prior: &ScheduleInfo,
        response: ReviewResponse,
        histogram: Option<&dyn DueDateHistogram>,
        dates: &dyn DateProvider,
    ) -> ScheduleInfo {
        let today = dates.today();
        let result = self.reschedule(ItemKind::Note, response, prior, false, histogram, today);
        self.registry.set_ease(path, result.ease);
        debug!(
            path,
            %response,
            interval = result.interval,
            ease = result.ease,
            "updated note schedule"
        );
        result
    }

    /// Initial schedule given to a card whose schedule is explicitly reset.
    pub fn reset_schedule(&self, dates: &dyn DateProvider) -> ScheduleInfo {
        let today = dates.today();
        ScheduleInfo::new(
            Some(due_date_after(today, INITIAL_INTERVAL)),
            INITIAL_INTERVAL,
            self.settings.base_ease,
        )
    }

    /// First schedule for a card, seeded with its note's ease when known.
    /// A Hard grade leaves the due date unset.
    pub fn new_schedule_for_card(
        &self,
        response: ReviewResponse,
        path: &str,
        histogram: Option<&dyn DueDateHistogram>,
        dates: &dyn DateProvider,
    ) -> ScheduleInfo {
        let today = dates.today();
        let ease = self
            .registry
            .get_ease(path)
            .map(f64::round)
            .unwrap_or(self.settings.base_ease);

        let provisional = ScheduleInfo::new(None, INITIAL_INTERVAL, ease);
        let result = self.reschedule(
            ItemKind::Card,
            response,
            &provisional,
            true,
            histogram,
            today,
        );
        debug!(
            path,
            %response,
            interval = result.interval,
            ease = result.ease,
            "new card schedule"
        );
        result
    }

    /// Schedule for a card after a review. A Hard grade keeps the prior due date.
    pub fn updated_schedule_for_card(
        &self,
        response: ReviewResponse,
        prior: &ScheduleInfo,
        histogram: Option<&dyn DueDateHistogram>,
        dates: &dyn DateProvider,
    ) -> ScheduleInfo {
        let today = dates.today();
        let result = self.reschedule(ItemKind::Card, response, prior, false, histogram, today);
        debug!(
            %response,
            interval = result.interval,
            ease = result.ease,
            "updated card schedule"
        );
        result
    }

    fn link_seeded_ease(&self, link_stat: &NoteLinkStat) -> f64 {
        let base = self.settings.base_ease;
        let confidence = sample_confidence(link_stat.total_link_count);
        let link_factor = self.settings.max_link_factor * confidence;
        let linked = link_stat.weighted_ease().unwrap_or(base);
        (1.0 - link_factor) * base + link_factor * linked
    }

    fn reschedule(
        &self,
        kind: ItemKind,
        response: ReviewResponse,
        prior: &ScheduleInfo,
        is_new_item: bool,
        histogram: Option<&dyn DueDateHistogram>,
        today: NaiveDate,
    ) -> ScheduleInfo {
        let input = ReviewInput {
            response,
            interval: prior.interval,
            ease: prior.ease,
            delayed_ticks: prior.delayed_before_review_ticks,
            is_new_item,
        };
        let outcome = schedule(&input, &self.settings, histogram);

        let due_date = match (kind, response) {
            (ItemKind::Card, ReviewResponse::Hard) => prior.due_date,
            _ => Some(due_date_after(today, outcome.interval)),
        };
        ScheduleInfo::new(due_date, outcome.interval, outcome.ease)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::SimulatedDateProvider;
    use crate::histogram::DayHistogram;
    use crate::models::{Card, Question, TICKS_PER_DAY};
    use std::cell::Cell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeGraph {
        stats: HashMap<String, NoteLinkStat>,
    }

    impl NoteLinkStatProvider for FakeGraph {
        fn calc_link_stat(&self, path: &str, _registry: &EaseRegistry) -> NoteLinkStat {
            self.stats.get(path).copied().unwrap_or_default()
        }
    }

    /// Fixed date that counts how often it was asked for.
    struct CountingDates {
        today: NaiveDate,
        reads: Cell<u32>,
    }

    impl DateProvider for CountingDates {
        fn today(&self) -> NaiveDate {
            self.reads.set(self.reads.get() + 1);
            self.today
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dates() -> SimulatedDateProvider {
        SimulatedDateProvider::new(date(2024, 6, 1))
    }

    fn scheduled(ease: f64) -> Card {
        Card::new("q", "a").with_schedule(ScheduleInfo::new(None, 4.0, ease))
    }

    fn note_with_eases(path: &str, eases: &[f64]) -> Note {
        Note {
            path: path.to_string(),
            questions: vec![Question {
                text: "q".to_string(),
                cards: eases.iter().map(|&ease| scheduled(ease)).collect(),
            }],
        }
    }

    #[test]
    fn test_new_note_without_links_uses_base_ease() {
        let scheduler = SchedulingOrchestrator::new(Settings::default());
        let result = scheduler.new_schedule_for_note(
            "a.md",
            &FakeGraph::default(),
            ReviewResponse::Good,
            None,
            &dates(),
        );

        assert_eq!(result.ease, 250.0);
        assert_eq!(result.interval, 2.0);
        assert_eq!(result.due_date, Some(date(2024, 6, 3)));
        assert!(!scheduler.note_stats().has_ease("a.md"));
    }

    #[test]
    fn test_new_note_ease_follows_links() {
        let mut graph = FakeGraph::default();
        graph.stats.insert(
            "linked.md".to_string(),
            NoteLinkStat {
                total_link_count: 63,
                link_total: 600.0,
                link_pg_total: 2.0,
            },
        );
        let scheduler = SchedulingOrchestrator::new(Settings::default());
        let result = scheduler.new_schedule_for_note(
            "linked.md",
            &graph,
            ReviewResponse::Good,
            None,
            &dates(),
        );

        // ln(63.5) / ln(64) ~ 0.998, so the ease sits just under the linked 300
        assert_eq!(result.ease, 300.0);
    }

    #[test]
    fn test_new_note_with_weightless_links_uses_base_ease() {
        let mut graph = FakeGraph::default();
        graph.stats.insert(
            "orphaned.md".to_string(),
            NoteLinkStat {
                total_link_count: 3,
                link_total: 0.0,
                link_pg_total: 0.0,
            },
        );
        let scheduler = SchedulingOrchestrator::new(Settings::default());
        let result = scheduler.new_schedule_for_note(
            "orphaned.md",
            &graph,
            ReviewResponse::Good,
            None,
            &dates(),
        );

        assert!(result.ease.is_finite());
        assert_eq!(result.ease, 250.0);
        assert_eq!(result.interval, 2.0);
    }

    #[test]
    fn test_new_note_averages_registry_ease() {
        let mut scheduler = SchedulingOrchestrator::new(Settings::default());
        scheduler.registry_mut().set_ease("a.md", 290.0);
        let result = scheduler.new_schedule_for_note(
            "a.md",
            &FakeGraph::default(),
            ReviewResponse::Easy,
            None,
            &dates(),
        );

        // (250 + 290) / 2 = 270, +20 on Easy
        assert_eq!(result.ease, 290.0);
        assert_eq!(scheduler.note_stats().get_ease("a.md"), Some(290.0));
    }

    #[test]
    fn test_new_note_hard_still_gets_due_date() {
        let scheduler = SchedulingOrchestrator::new(Settings::default());
        let result = scheduler.new_schedule_for_note(
            "a.md",
            &FakeGraph::default(),
            ReviewResponse::Hard,
            None,
            &dates(),
        );

        assert_eq!(result.interval, 1.0);
        assert_eq!(result.ease, 230.0);
        assert_eq!(result.due_date, Some(date(2024, 6, 2)));
    }

    #[test]
    fn test_updated_note_writes_registry() {
        let mut scheduler = SchedulingOrchestrator::new(Settings::default());
        let prior = ScheduleInfo::new(Some(date(2024, 5, 20)), 10.0, 250.0);
        let result = scheduler.updated_schedule_for_note(
            "a.md",
            &prior,
            ReviewResponse::Hard,
            None,
            &dates(),
        );

        assert_eq!(result.interval, 5.0);
        assert_eq!(result.ease, 230.0);
        assert_eq!(result.due_date, Some(date(2024, 6, 6)));
        assert_eq!(scheduler.note_stats().get_ease("a.md"), Some(230.0));
    }

    #[test]
    fn test_updated_note_resets_delay() {
        let mut scheduler = SchedulingOrchestrator::new(Settings::default());
        let mut prior = ScheduleInfo::new(Some(date(2024, 5, 20)), 10.0, 250.0);
        prior.delayed_before_review_ticks = 12 * TICKS_PER_DAY;
        let result = scheduler.updated_schedule_for_note(
            "a.md",
            &prior,
            ReviewResponse::Good,
            None,
            &dates(),
        );

        // (10 + 12 / 2) * 2.5 = 40
        assert_eq!(result.interval, 40.0);
        assert_eq!(result.delayed_before_review_ticks, 0);
    }

    #[test]
    fn test_on_note_loaded_blends_eases() {
        let mut scheduler = SchedulingOrchestrator::new(Settings::default());
        let note = note_with_eases("a.md", &[250.0; 64]);

        let stored = scheduler.on_note_loaded("a.md", Some(&note), Some(270.0));
        assert_eq!(stored, Some(260.0));
        assert_eq!(scheduler.note_stats().get_ease("a.md"), Some(260.0));
    }

    #[test]
    fn test_on_note_loaded_with_single_source() {
        let mut scheduler = SchedulingOrchestrator::new(Settings::default());

        let unscheduled = note_with_eases("a.md", &[]);
        let stored = scheduler.on_note_loaded("a.md", Some(&unscheduled), Some(280.0));
        assert_eq!(stored, Some(280.0));

        let note = note_with_eases("b.md", &[300.0; 64]);
        let stored = scheduler.on_note_loaded("b.md", Some(&note), None);
        assert_eq!(stored, Some(300.0));
        let stored = scheduler.on_note_loaded("b.md", Some(&note), Some(0.0));
        assert_eq!(stored, Some(300.0));
    }

    #[test]
    fn test_on_note_loaded_without_signal_leaves_registry() {
        let mut scheduler = SchedulingOrchestrator::new(Settings::default());
        assert_eq!(scheduler.on_note_loaded("a.md", None, None), None);
        assert!(scheduler.note_stats().is_empty());
    }

    #[test]
    fn test_reset_schedule() {
        let scheduler = SchedulingOrchestrator::new(Settings::default());
        let reset = scheduler.reset_schedule(&dates());
        assert_eq!(reset.interval, 1.0);
        assert_eq!(reset.ease, 250.0);
        assert_eq!(reset.due_date, Some(date(2024, 6, 2)));
    }

    #[test]
    fn test_new_card_seeded_from_note_ease() {
        let mut scheduler = SchedulingOrchestrator::new(Settings::default());
        scheduler.registry_mut().set_ease("a.md", 262.4);

        let result = scheduler.new_schedule_for_card(ReviewResponse::Easy, "a.md", None, &dates());
        // round(262.4) = 262, +20 on Easy; round(1 * 2.82) = 3, round(3 * 1.3) = 4
        assert_eq!(result.ease, 282.0);
        assert_eq!(result.interval, 4.0);
        assert_eq!(result.due_date, Some(date(2024, 6, 5)));
    }

    #[test]
    fn test_new_card_hard_has_no_due_date() {
        let scheduler = SchedulingOrchestrator::new(Settings::default());
        let result = scheduler.new_schedule_for_card(ReviewResponse::Hard, "a.md", None, &dates());
        assert_eq!(result.due_date, None);
        assert_eq!(result.interval, 1.0);
        assert_eq!(result.ease, 230.0);
    }

    #[test]
    fn test_new_card_good_ignores_histogram() {
        let scheduler = SchedulingOrchestrator::new(Settings::default());
        let mut histogram = DayHistogram::new();
        histogram.increment(2);
        let result = scheduler.new_schedule_for_card(
            ReviewResponse::Good,
            "a.md",
            Some(&histogram),
            &dates(),
        );
        assert_eq!(result.interval, 2.0);
        assert_eq!(result.due_date, Some(date(2024, 6, 3)));
    }

    #[test]
    fn test_updated_card_hard_keeps_due_date() {
        let scheduler = SchedulingOrchestrator::new(Settings::default());
        let mut prior = ScheduleInfo::new(Some(date(2024, 5, 28)), 8.0, 250.0);
        prior.delayed_before_review_ticks = 4 * TICKS_PER_DAY;

        let result =
            scheduler.updated_schedule_for_card(ReviewResponse::Hard, &prior, None, &dates());
        assert_eq!(result.due_date, prior.due_date);
        assert_eq!(result.interval, 4.0);
        assert_eq!(result.delayed_before_review_ticks, 0);
    }

    #[test]
    fn test_updated_card_good_uses_load_balancing() {
        let scheduler = SchedulingOrchestrator::new(Settings::default());
        let mut histogram = DayHistogram::new();
        for _ in 0..3 {
            histogram.increment(25);
        }
        histogram.increment(24);

        let prior = ScheduleInfo::new(Some(date(2024, 6, 1)), 10.0, 250.0);
        let result = scheduler.updated_schedule_for_card(
            ReviewResponse::Good,
            &prior,
            Some(&histogram),
            &dates(),
        );

        assert_eq!(result.interval, 26.0);
        assert_eq!(result.due_date, Some(date(2024, 6, 27)));
        assert!(scheduler.note_stats().is_empty());
    }

    #[test]
    fn test_each_operation_reads_today_once() {
        let mut scheduler = SchedulingOrchestrator::new(Settings::default());
        let dates = CountingDates {
            today: date(2024, 6, 1),
            reads: Cell::new(0),
        };
        let prior = ScheduleInfo::new(Some(date(2024, 5, 20)), 10.0, 250.0);
        let graph = FakeGraph::default();

        scheduler.new_schedule_for_note("a.md", &graph, ReviewResponse::Good, None, &dates);
        assert_eq!(dates.reads.get(), 1);
        scheduler.updated_schedule_for_note("a.md", &prior, ReviewResponse::Good, None, &dates);
        assert_eq!(dates.reads.get(), 2);
        scheduler.reset_schedule(&dates);
        assert_eq!(dates.reads.get(), 3);
        scheduler.new_schedule_for_card(ReviewResponse::Easy, "a.md", None, &dates);
        assert_eq!(dates.reads.get(), 4);
        scheduler.updated_schedule_for_card(ReviewResponse::Hard, &prior, None, &dates);
        assert_eq!(dates.reads.get(), 5);
    }
}
