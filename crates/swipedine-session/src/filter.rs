//! Dedup and rating filter over normalized candidates.

use std::collections::HashSet;

use swipedine_core::restaurant::Restaurant;

/// Drops candidates the user has already swiped on (either verdict) and,
/// when `min_rating` is supplied, candidates rated below it.
///
/// Input order is preserved: randomizing the presentation is a separate,
/// explicit stage so this one stays testable on its own.
#[must_use]
pub fn filter_candidates(
    candidates: Vec<Restaurant>,
    decided_ids: &HashSet<String>,
    min_rating: Option<f64>,
) -> Vec<Restaurant> {
    candidates
        .into_iter()
        .filter(|candidate| !decided_ids.contains(&candidate.place_id))
        .filter(|candidate| min_rating.is_none_or(|min| candidate.rating >= min))
        .collect()
}
