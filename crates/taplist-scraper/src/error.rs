use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    /// Connection, TLS, timeout or body-read failure.
    #[error("upstream unreachable: {0}")]
    UpstreamUnreachable(#[from] reqwest::Error),

    #[error("upstream unavailable: HTTP {status} from {url}")]
    UpstreamUnavailable { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A JSON document embedded in a string field could not be read.
    ///
    /// Normalization recovers from this by treating the field as empty; it is
    /// never returned from a fetch.
    #[error("malformed embedded field {field}: {reason}")]
    MalformedEmbeddedField { field: String, reason: String },
}

impl ScraperError {
    /// HTTP status for [`ScraperError::UpstreamUnavailable`], if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UpstreamUnavailable { status, .. } => Some(*status),
            _ => None,
        }
    }
}
