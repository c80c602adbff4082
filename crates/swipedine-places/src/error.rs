use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The provider answered 2xx but rejected the request inside the body
    /// envelope (e.g. `REQUEST_DENIED`, `OVER_QUERY_LIMIT`).
    #[error("provider rejected the search with status {status}{}", render_message(.message))]
    ProviderStatus {
        status: String,
        message: Option<String>,
    },

    #[error("pagination limit reached: exceeded {max_pages} pages without exhausting results")]
    PageLimit { max_pages: usize },

    #[error("no geocoding match for \"{query}\"")]
    NoGeocodeMatch { query: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

fn render_message(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// Coarse failure classes callers use to decide what to surface: the
/// provider could not be reached or refused us, versus the provider answered
/// with a body we do not understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Unavailable,
    InvalidResponse,
}

impl PlacesError {
    /// Classifies this error for caller-side handling.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            PlacesError::Deserialize { .. } => FailureKind::InvalidResponse,
            _ => FailureKind::Unavailable,
        }
    }
}
