use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// A restaurant candidate normalized from a places provider, the canonical
/// shape every downstream stage operates on. Nothing in this record reveals
/// which provider backend produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    /// Provider place identifier; unique within a session and the identity
    /// key for swipe decisions.
    pub place_id: String,
    pub name: String,
    /// Human-readable address; empty when the provider omits it.
    pub address: String,
    /// Star rating on the 0–5 scale; `0.0` when the provider omits it.
    pub rating: f64,
    /// Price tier from `0` (free or unknown) through `4` (very expensive).
    pub price_level: u8,
    /// Display category, e.g. `"Portuguese restaurant"`. Falls back to the
    /// first raw type, then the literal `"Restaurant"`.
    pub primary_category: String,
    pub photos: Vec<Photo>,
    /// Website URL; empty when the provider omits it.
    pub website: String,
    pub reviews: Vec<Review>,
    pub opening_hours: Option<OpeningHours>,
    /// Geographic position, when the provider returned one.
    pub coordinate: Option<Coordinate>,
    /// Great-circle distance from the search origin, annotated after
    /// normalization; `None` until annotation runs.
    pub distance_meters: Option<f64>,
}

impl Restaurant {
    /// Returns the first photo, the one a card UI would lead with.
    #[must_use]
    pub fn lead_photo(&self) -> Option<&Photo> {
        self.photos.first()
    }

    /// Returns whether the place is open right now, when the provider said.
    #[must_use]
    pub fn is_open_now(&self) -> Option<bool> {
        self.opening_hours.as_ref().and_then(|hours| hours.open_now)
    }

    /// Returns `true` when the rating meets the given threshold.
    #[must_use]
    pub fn meets_rating(&self, min_rating: f64) -> bool {
        self.rating >= min_rating
    }
}

/// A provider photo reference. Only the reference is stored; fetching the
/// bytes is an external concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    /// Opaque provider reference used to retrieve the image elsewhere.
    pub reference: String,
    pub width_px: u32,
    pub height_px: u32,
}

/// A single user review attached to a restaurant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Reviewer display name; empty when attribution is withheld.
    pub author: String,
    pub rating: f64,
    pub text: String,
}

/// Opening-hours summary reshaped from either provider's wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningHours {
    pub open_now: Option<bool>,
    /// One human-readable line per weekday, e.g. `"Monday: 12–23"`.
    pub weekday_text: Vec<String>,
}
