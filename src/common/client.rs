use std::time::Duration;

/// Timeout for calls to the swap aggregator.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub fn create_http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
}
