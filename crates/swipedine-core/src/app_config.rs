use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which place-search backend the provider client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Classic Nearby Search: GET with query parameters, in-body status
    /// envelope, token-based pagination.
    Legacy,
    /// Places API v1 `places:searchNearby`: POST with field-mask headers,
    /// single page.
    Modern,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Legacy => write!(f, "legacy"),
            ProviderKind::Modern => write!(f, "modern"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub google_api_key: String,
    pub places_api: ProviderKind,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_search_pages: usize,
    pub inter_page_delay_ms: u64,
    pub decisions_path: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("google_api_key", &"[redacted]")
            .field("places_api", &self.places_api)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_search_pages", &self.max_search_pages)
            .field("inter_page_delay_ms", &self.inter_page_delay_ms)
            .field("decisions_path", &self.decisions_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_api_key() {
        let config = AppConfig {
            env: Environment::Test,
            log_level: "info".to_string(),
            google_api_key: "AIzaSecretKey".to_string(),
            places_api: ProviderKind::Modern,
            request_timeout_secs: 30,
            user_agent: "swipedine/0.1".to_string(),
            max_search_pages: 5,
            inter_page_delay_ms: 2000,
            decisions_path: PathBuf::from("decisions.json"),
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("AIzaSecretKey"));
        assert!(rendered.contains("[redacted]"));
    }
}
