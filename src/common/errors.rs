/// Failures of a single USD price lookup.
#[derive(thiserror::Error, Debug)]
pub enum PriceError {
    #[error("Unknown coin: {0}")]
    UnknownCoin(String),

    #[error("Price provider rate limit exceeded")]
    RateLimited,

    #[error("Price provider returned status: {status}")]
    ProviderError { status: u16 },

    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Price not found for {0}")]
    PriceNotFound(String),

    #[error("Price lookup cancelled")]
    Cancelled,

    #[error("All price lookups failed: {}", join_failures(.0))]
    AllLookupsFailed(Vec<(String, PriceError)>),
}

impl PriceError {
    /// Whether the caller may reasonably retry the same lookup later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PriceError::RateLimited | PriceError::TransportError(_) | PriceError::Cancelled
        )
    }
}

fn join_failures(failures: &[(String, PriceError)]) -> String {
    failures
        .iter()
        .map(|(coin, err)| format!("{}: {}", coin, err))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failures talking to the swap aggregator.
#[derive(thiserror::Error, Debug)]
pub enum SwapError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("API key is required (set CYPHERGOAT_API_KEY)")]
    MissingApiKey,

    #[error("Invalid amount: {0} (must be a positive number)")]
    InvalidAmount(f64),

    #[error("Invalid selection: {index} (choose between 1 and {available})")]
    InvalidSelection { index: usize, available: usize },

    #[error("Receiving address is required")]
    EmptyAddress,

    #[error("Response field missing or malformed: {0}")]
    MissingField(&'static str),

    #[error("Price service error: {0}")]
    Price(#[from] PriceError),
}
