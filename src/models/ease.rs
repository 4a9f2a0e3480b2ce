//! Note ease estimated from the ease of its scheduled flashcards.
use super::Card;
use crate::config::Settings;

/// Damping weight for `count` samples: grows logarithmically and reaches 1 at 64.
pub fn sample_confidence(count: u32) -> f64 {
    ((f64::from(count) + 0.5).ln() / 64_f64.ln()).min(1.0)
}

/// Average ease of the scheduled cards, pulled toward the base ease when
/// few cards have been reviewed. `None` when no card has a schedule.
pub fn average_ease<'a>(
    cards: impl IntoIterator<Item = &'a Card>,
    settings: &Settings,
) -> Option<f64> {
    let (total, count) = cards
        .into_iter()
        .filter_map(|card| card.schedule.as_ref())
        .fold((0.0, 0_u32), |(sum, n), info| (sum + info.ease, n + 1));

    if count == 0 {
        return None;
    }

    let average = total / f64::from(count);
    let contribution = sample_confidence(count);
    let pulled = settings.base_ease * (1.0 - contribution);
    Some(average * contribution + pulled)
}
