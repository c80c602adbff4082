use crate::geo::Coordinate;

/// Parameters for one provider search. Built when an origin resolves and
/// immutable for the life of that search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub origin: Coordinate,
    /// Search radius around the origin.
    pub max_distance_meters: f64,
    /// Drop candidates rated below this, applied after normalization.
    pub min_rating: Option<f64>,
    /// Provider-side price cap, canonical 0–4 scale.
    pub max_price_level: Option<u8>,
}

impl SearchQuery {
    #[must_use]
    pub fn new(origin: Coordinate, max_distance_meters: f64) -> Self {
        Self {
            origin,
            max_distance_meters,
            min_rating: None,
            max_price_level: None,
        }
    }

    #[must_use]
    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    /// Caps results at the given price tier, clamped into the canonical 0–4
    /// range.
    #[must_use]
    pub fn with_max_price_level(mut self, max_price_level: u8) -> Self {
        self.max_price_level = Some(max_price_level.min(4));
        self
    }
}
