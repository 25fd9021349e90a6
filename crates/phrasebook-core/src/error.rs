use phrasebook_translator::TranslateError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Translation cancelled")]
    Cancelled,

    #[error("{0}, check your network connection or try again later")]
    Remote(#[source] TranslateError),
}

impl RouteError {
    /// Provider error behind a failed remote translation
    pub fn remote_error(&self) -> Option<&TranslateError> {
        match self {
            RouteError::Remote(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TranslateError> for RouteError {
    fn from(e: TranslateError) -> Self {
        match e {
            TranslateError::InvalidInput(msg) => RouteError::InvalidInput(msg),
            other => RouteError::Remote(other),
        }
    }
}
