pub const DEFAULT_ENDPOINT: &str = "http://localhost:4000/graphql";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Full URL of the GraphQL endpoint.
    pub endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Reads `PINMARK_ENDPOINT`, falling back to the local dev server.
    pub fn from_env() -> Self {
        std::env::var("PINMARK_ENDPOINT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(Self::new)
            .unwrap_or_default()
    }
}
