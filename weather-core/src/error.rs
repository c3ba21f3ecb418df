use reqwest::StatusCode;
use thiserror::Error;

/// Shown when a current-weather lookup gets an unusable answer.
pub const CURRENT_UNAVAILABLE: &str = "City not found or API error";

/// Shown when a forecast lookup gets an unusable answer.
pub const FORECAST_UNAVAILABLE: &str = "Forecast data not available";

/// Why a lookup produced no data.
///
/// `Display` is the message shown to the end user; the variant only matters
/// for logging.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Non-200 status, or the body lacks the expected top-level key.
    #[error("{message}")]
    Unavailable {
        message: &'static str,
        status: StatusCode,
    },

    /// The request never produced a response (DNS, connect, timeout, ...).
    ///
    /// Displays the whole cause chain, e.g.
    /// `error sending request: operation timed out`.
    #[error("{}", with_causes(.0))]
    Transport(reqwest::Error),

    /// Body is not JSON, or a required field is missing or mistyped.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    /// Decoded fine but cannot be turned into a record.
    #[error("{0}")]
    Malformed(String),
}

// The request URL carries the API key in its query string.
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.without_url())
    }
}

fn with_causes(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.ends_with(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Unavailable { .. } => "unavailable",
            FetchError::Transport(_) => "transport",
            FetchError::Decode(_) => "decode",
            FetchError::Malformed(_) => "malformed",
        }
    }
}
