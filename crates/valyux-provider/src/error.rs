use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("provider returned {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid provider base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl ProviderError {
    /// Whether this failure should be reported as a timeout rather than an error.
    ///
    /// Only transport failures qualify. For those, the reqwest source chain is
    /// also checked because some transports surface deadline expiry as a
    /// generic I/O error. Status and decode failures never count, whatever
    /// their message says.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            ProviderError::Timeout { .. } => true,
            ProviderError::Http(e) => e.is_timeout() || source_reports_timeout(e),
            ProviderError::UnexpectedStatus { .. }
            | ProviderError::Deserialize { .. }
            | ProviderError::InvalidBaseUrl { .. } => false,
        }
    }
}

/// Walks the causes of `error`, skipping its own message (which embeds the URL).
fn source_reports_timeout(error: &reqwest::Error) -> bool {
    let mut cause = std::error::Error::source(error);
    while let Some(inner) = cause {
        if inner
            .downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::TimedOut)
        {
            return true;
        }
        let message = inner.to_string().to_lowercase();
        if message.contains("timeout") || message.contains("timed out") {
            return true;
        }
        cause = inner.source();
    }
    false
}
