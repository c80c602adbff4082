use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod decision;
pub mod geo;
pub mod query;
pub mod restaurant;

pub use app_config::{AppConfig, Environment, ProviderKind};
pub use config::{load_app_config, load_app_config_from_env};
pub use decision::{SwipeDecision, SwipeVerdict};
pub use geo::{annotate_distances, distance_meters, Coordinate};
pub use query::SearchQuery;
pub use restaurant::{OpeningHours, Photo, Restaurant, Review};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
