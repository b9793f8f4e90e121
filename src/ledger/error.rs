use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerApiError {
    #[error("LedgerApiError - Transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("LedgerApiError - Decode: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("LedgerApiError - UrlParse: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("LedgerApiError - Service: code {code:?}: {description}")]
    Service {
        code: Option<i64>,
        description: String,
    },
    #[error("LedgerApiError - CancelNotReady: {0}")]
    CancelNotReady(String),
}
