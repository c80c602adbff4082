//! Normalization from raw provider shapes to [`swipedine_core::Restaurant`].
//!
//! This is the one place that branches on provider kind: both backends are
//! absorbed here, and everything downstream sees only the canonical record.
//! Normalization is total on well-formed input; unknown or missing fields
//! degrade to the documented defaults instead of failing.

use swipedine_core::geo::Coordinate;
use swipedine_core::restaurant::{OpeningHours, Photo, Restaurant, Review};

use crate::types::{LegacyPlace, ModernPlace, RawPlace};

/// Category used when a place carries neither a display category nor any
/// raw types.
const FALLBACK_CATEGORY: &str = "Restaurant";

/// Normalizes a raw place from either backend into a [`Restaurant`].
///
/// Defaults: missing rating → `0.0` (clamped into `[0, 5]`), missing price
/// level → `0`, missing photos/reviews → empty, missing name, address, and
/// website → empty strings, missing category → first raw type, then
/// `"Restaurant"`. `distance_meters` is left unset; annotation happens after
/// the whole result set is assembled.
#[must_use]
pub fn normalize_place(raw: RawPlace) -> Restaurant {
    match raw {
        RawPlace::Legacy(place) => normalize_legacy(place),
        RawPlace::Modern(place) => normalize_modern(place),
    }
}

fn normalize_legacy(place: LegacyPlace) -> Restaurant {
    let primary_category = place
        .types
        .first()
        .cloned()
        .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());

    let photos = place
        .photos
        .into_iter()
        .map(|photo| Photo {
            reference: photo.photo_reference,
            width_px: photo.width,
            height_px: photo.height,
        })
        .collect();

    let reviews = place
        .reviews
        .into_iter()
        .map(|review| Review {
            author: review.author_name.unwrap_or_default(),
            rating: review.rating.unwrap_or(0.0),
            text: review.text.unwrap_or_default(),
        })
        .collect();

    let opening_hours = place.opening_hours.map(|hours| OpeningHours {
        open_now: hours.open_now,
        weekday_text: hours.weekday_text,
    });

    let coordinate = place
        .geometry
        .map(|geometry| Coordinate::new(geometry.location.lat, geometry.location.lng));

    Restaurant {
        place_id: place.place_id,
        name: place.name.unwrap_or_default(),
        address: place.vicinity.unwrap_or_default(),
        rating: clamp_rating(place.rating),
        price_level: clamp_price_level(place.price_level),
        primary_category,
        photos,
        website: place.website.unwrap_or_default(),
        reviews,
        opening_hours,
        coordinate,
        distance_meters: None,
    }
}

fn normalize_modern(place: ModernPlace) -> Restaurant {
    // Prefer the localized display category; an empty text wrapper counts
    // as absent.
    let primary_category = place
        .primary_type_display_name
        .map(|localized| localized.text)
        .filter(|text| !text.is_empty())
        .or_else(|| place.types.first().cloned())
        .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());

    let photos = place
        .photos
        .into_iter()
        .map(|photo| Photo {
            reference: photo.name,
            width_px: photo.width_px,
            height_px: photo.height_px,
        })
        .collect();

    let reviews = place
        .reviews
        .into_iter()
        .map(|review| Review {
            author: review
                .author_attribution
                .map(|attribution| attribution.display_name)
                .unwrap_or_default(),
            rating: review.rating.unwrap_or(0.0),
            text: review.text.map(|localized| localized.text).unwrap_or_default(),
        })
        .collect();

    let opening_hours = place.current_opening_hours.map(|hours| OpeningHours {
        open_now: hours.open_now,
        weekday_text: hours.weekday_descriptions,
    });

    let coordinate = place
        .location
        .map(|location| Coordinate::new(location.latitude, location.longitude));

    Restaurant {
        place_id: place.id,
        name: place
            .display_name
            .map(|localized| localized.text)
            .unwrap_or_default(),
        address: place.formatted_address.unwrap_or_default(),
        rating: clamp_rating(place.rating),
        price_level: place
            .price_level
            .as_deref()
            .map_or(0, parse_price_level),
        primary_category,
        photos,
        website: place.website_uri.unwrap_or_default(),
        reviews,
        opening_hours,
        coordinate,
        distance_meters: None,
    }
}

/// Parses a provider price-level encoding into the canonical 0–4 tier.
///
/// Accepts the numeric strings `"0"` through `"4"` and the symbolic names
/// (`free`, `inexpensive`, `moderate`, `expensive`, `very_expensive`), with
/// or without the v1 `PRICE_LEVEL_` prefix and in any case. Anything else,
/// including `PRICE_LEVEL_UNSPECIFIED`, maps to `0`.
#[must_use]
pub fn parse_price_level(raw: &str) -> u8 {
    let symbol = raw.trim();
    match symbol {
        "0" => return 0,
        "1" => return 1,
        "2" => return 2,
        "3" => return 3,
        "4" => return 4,
        _ => {}
    }

    let lowered = symbol.to_ascii_lowercase();
    let name = lowered.strip_prefix("price_level_").unwrap_or(&lowered);
    match name {
        "free" => 0,
        "inexpensive" => 1,
        "moderate" => 2,
        "expensive" => 3,
        "very_expensive" => 4,
        _ => 0,
    }
}

fn clamp_rating(rating: Option<f64>) -> f64 {
    rating.unwrap_or(0.0).clamp(0.0, 5.0)
}

fn clamp_price_level(price_level: Option<i64>) -> u8 {
    match price_level {
        Some(level) if level >= 0 => u8::try_from(level.min(4)).unwrap_or(4),
        _ => 0,
    }
}
