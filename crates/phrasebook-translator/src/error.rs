use crate::retry::RetryClass;

/// Failures a remote translation provider can produce
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Provider rate limit exceeded, try again later")]
    ProviderRateLimited,

    #[error("Provider server error")]
    ProviderServerError,

    #[error("Network timeout")]
    NetworkTimeout,

    #[error("Provider rejected the API key")]
    ProviderUnauthorized,

    #[error("Malformed provider response: {0}")]
    ProviderMalformedResponse(String),

    #[error("Provider returned an empty translation")]
    EmptyTranslation,

    #[error("{0}")]
    Unknown(String),
}

impl TranslateError {
    /// Retry class of this error, `None` when it must not be retried
    pub fn retry_class(&self) -> Option<RetryClass> {
        match self {
            TranslateError::ProviderRateLimited => Some(RetryClass::RateLimited),
            TranslateError::ProviderServerError => Some(RetryClass::ServerError),
            TranslateError::NetworkTimeout => Some(RetryClass::Timeout),
            TranslateError::InvalidInput(_)
            | TranslateError::ProviderUnauthorized
            | TranslateError::ProviderMalformedResponse(_)
            | TranslateError::EmptyTranslation
            | TranslateError::Unknown(_) => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.retry_class().is_some()
    }
}

pub type TranslateResult<T> = Result<T, TranslateError>;
