pub mod client;
pub mod error;
pub mod geocode;
pub mod ip_lookup;
pub mod normalize;
pub mod types;

pub use client::PlacesClient;
pub use error::{FailureKind, PlacesError};
pub use geocode::GeocodeClient;
pub use ip_lookup::IpLookupClient;
pub use normalize::{normalize_place, parse_price_level};
pub use types::{RawPlace, ResultPage};
