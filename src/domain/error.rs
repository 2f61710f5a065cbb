//! Domain error types.

/// Top-level error type for ollie.
#[derive(Debug, thiserror::Error)]
pub enum OllieError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid ticker symbol {symbol:?}: {reason}")]
    InvalidSymbol { symbol: String, reason: String },

    #[error("no data for {symbol}: ticker symbol not found")]
    NoData { symbol: String },

    #[error("request to {url} failed: {reason}")]
    Http { url: String, reason: String },

    #[error("unexpected response from {source_name}: {reason}")]
    ResponseParse { source_name: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl OllieError {
    pub fn http(url: &str, err: impl std::fmt::Display) -> Self {
        OllieError::Http {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }

    pub fn response(source_name: &str, reason: impl Into<String>) -> Self {
        OllieError::ResponseParse {
            source_name: source_name.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&OllieError> for std::process::ExitCode {
    fn from(err: &OllieError) -> Self {
        let code: u8 = match err {
            OllieError::Io(_) => 1,
            OllieError::ConfigParse { .. } | OllieError::ConfigInvalid { .. } => 2,
            OllieError::Http { .. } | OllieError::ResponseParse { .. } => 3,
            OllieError::InvalidSymbol { .. } => 4,
            OllieError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
