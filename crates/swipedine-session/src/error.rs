use thiserror::Error;

use swipedine_places::{FailureKind, PlacesError};

/// Failures from a [`crate::store::DecisionStore`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read decision store at {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write decision store at {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("decision store at {path} is corrupt: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Everything that can go wrong driving a swipe session.
///
/// `NoResults` is deliberately absent: an empty candidate set is the
/// `Exhausted` state, not an error.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The origin hint could not be resolved to a coordinate and there is no
    /// further fallback.
    #[error("could not resolve a search origin: {reason}")]
    OriginUnavailable { reason: String },

    /// The places provider could not be reached or refused the request.
    #[error("places provider unavailable: {source}")]
    ProviderUnavailable {
        #[source]
        source: PlacesError,
    },

    /// The places provider answered with a body we do not understand.
    #[error("places provider returned an invalid response: {source}")]
    ProviderResponseInvalid {
        #[source]
        source: PlacesError,
    },

    /// A pipeline is already running; the session gates on state, not locks.
    #[error("a search is already in flight")]
    SearchInFlight,

    /// Swipe attempted with nothing left in the queue.
    #[error("no candidate available to swipe on")]
    NoActiveCandidate,

    /// An operation that needs an origin ran before one was resolved.
    #[error("no origin has been resolved yet")]
    NoOrigin,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SessionError {
    /// Maps a places-crate failure onto the session taxonomy using its
    /// unavailable-versus-invalid classification.
    pub(crate) fn from_places(source: PlacesError) -> Self {
        match source.kind() {
            FailureKind::Unavailable => SessionError::ProviderUnavailable { source },
            FailureKind::InvalidResponse => SessionError::ProviderResponseInvalid { source },
        }
    }

    /// One-line message suitable for showing to the user, without wire-level
    /// detail.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SessionError::OriginUnavailable { .. } => {
                "We couldn't figure out where to search. Check the postal code and try again."
                    .to_string()
            }
            SessionError::ProviderUnavailable { .. } => {
                "The restaurant search service is unavailable right now. Try again in a moment."
                    .to_string()
            }
            SessionError::ProviderResponseInvalid { .. } => {
                "The restaurant search service sent back something unexpected. Try again."
                    .to_string()
            }
            SessionError::Store(_) => {
                "Your saved swipes could not be read or written.".to_string()
            }
            other => other.to_string(),
        }
    }
}
