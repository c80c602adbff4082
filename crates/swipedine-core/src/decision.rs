use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which way the user swiped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeVerdict {
    Liked,
    Disliked,
}

/// One recorded swipe. Decisions are append-only; both verdicts exclude the
/// place from future result sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeDecision {
    pub place_id: String,
    pub verdict: SwipeVerdict,
    pub decided_at: DateTime<Utc>,
}

impl SwipeDecision {
    /// Builds a decision stamped with the current time.
    #[must_use]
    pub fn new(place_id: impl Into<String>, verdict: SwipeVerdict) -> Self {
        Self {
            place_id: place_id.into(),
            verdict,
            decided_at: Utc::now(),
        }
    }
}
