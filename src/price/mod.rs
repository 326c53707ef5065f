//! USD spot prices from CoinGecko's `/simple/price` endpoint.
//!
//! A [`PriceService`] owns a short-lived price cache and paces its own
//! outbound requests. Instances share nothing: two services never see each
//! other's cache or rate-limit clock.

mod tables;
mod types;

pub use tables::{CoinTables, DEFAULT_PROVIDER_IDS, DEFAULT_STABLECOINS};

use crate::common::{PriceError, create_http_client, normalize_ticker};
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, warn};
use types::SimplePriceResponse;

pub const DEFAULT_PRICE_API_BASE: &str = "https://api.coingecko.com/api/v3/simple/price";
pub const DEFAULT_PRICE_TIMEOUT: Duration = Duration::from_secs(10);
/// How long a fetched price stays usable.
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);
/// Minimum spacing between two outbound requests of one service.
pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(100);

const STABLECOIN_PRICE: f64 = 1.0;
const VS_CURRENCY: &str = "usd";

/// Anything that can resolve a ticker to a USD unit price.
#[async_trait]
pub trait PriceLookup: Send + Sync {
    async fn get_price(&self, coin: &str) -> Result<f64, PriceError>;
}

#[derive(Debug, Clone)]
pub struct PriceServiceConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub cache_ttl: Duration,
    pub min_request_interval: Duration,
    pub tables: CoinTables,
}

impl Default for PriceServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PRICE_API_BASE.to_string(),
            timeout: DEFAULT_PRICE_TIMEOUT,
            cache_ttl: CACHE_TTL,
            min_request_interval: MIN_REQUEST_INTERVAL,
            tables: CoinTables::default(),
        }
    }
}

impl PriceServiceConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    pub fn with_min_request_interval(mut self, interval: Duration) -> Self {
        self.min_request_interval = interval;
        self
    }

    pub fn with_tables(mut self, tables: CoinTables) -> Self {
        self.tables = tables;
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct CachedPrice {
    price: f64,
    fetched_at: Instant,
}

#[derive(Debug)]
pub struct PriceService {
    config: PriceServiceConfig,
    client: reqwest::Client,
    cache: RwLock<HashMap<String, CachedPrice>>,
    // Held across the spacing sleep so concurrent callers queue behind each other.
    last_request: Mutex<Option<Instant>>,
}

impl PriceService {
    pub fn new() -> Result<Self, PriceError> {
        Self::with_config(PriceServiceConfig::default())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, PriceError> {
        Self::with_config(PriceServiceConfig::default().with_base_url(base_url))
    }

    pub fn with_config(config: PriceServiceConfig) -> Result<Self, PriceError> {
        let client = create_http_client(config.timeout)?;
        Ok(Self {
            config,
            client,
            cache: RwLock::new(HashMap::new()),
            last_request: Mutex::new(None),
        })
    }

    pub fn is_stablecoin(&self, coin: &str) -> bool {
        self.config.tables.is_stablecoin(coin)
    }

    pub fn provider_id(&self, coin: &str) -> Option<&str> {
        self.config.tables.provider_id(coin)
    }

    /// USD price of one unit of `coin`.
    ///
    /// Stablecoins resolve to 1.0 and fresh cache entries are returned as is;
    /// neither touches the network or the rate-limit clock. Dropping the
    /// returned future abandons any pending wait or request.
    pub async fn get_price(&self, coin: &str) -> Result<f64, PriceError> {
        let ticker = normalize_ticker(coin);

        if self.config.tables.is_stablecoin(&ticker) {
            return Ok(STABLECOIN_PRICE);
        }

        if let Some(price) = self.cached_price(&ticker).await {
            debug!(coin = %ticker, price, "price cache hit");
            return Ok(price);
        }

        // Resolved before the rate-limit wait so an unknown coin neither
        // sleeps nor stamps the clock; only real requests are spaced.
        let provider_id = self
            .config
            .tables
            .provider_id(&ticker)
            .ok_or_else(|| PriceError::UnknownCoin(coin.to_string()))?;

        self.wait_for_request_slot().await;

        let price = self.fetch_price(provider_id).await?;
        self.cache_price(ticker, price).await;

        Ok(price)
    }

    /// [`get_price`](Self::get_price) bounded by `timeout`; elapsing yields [`PriceError::Cancelled`].
    pub async fn get_price_with_timeout(
        &self,
        coin: &str,
        timeout: Duration,
    ) -> Result<f64, PriceError> {
        tokio::time::timeout(timeout, self.get_price(coin))
            .await
            .map_err(|_| PriceError::Cancelled)?
    }

    /// Looks up every coin independently. Failed coins are left out of the map;
    /// the call only fails when no coin could be priced.
    pub async fn get_prices(&self, coins: &[&str]) -> Result<HashMap<String, f64>, PriceError> {
        let results = join_all(coins.iter().map(|coin| self.get_price(coin))).await;

        let mut prices = HashMap::new();
        let mut failures = Vec::new();

        for (coin, result) in coins.iter().zip(results) {
            match result {
                Ok(price) => {
                    prices.insert(coin.to_string(), price);
                }
                Err(e) => {
                    warn!(coin = %coin, error = %e, "price lookup failed");
                    failures.push((coin.to_string(), e));
                }
            }
        }

        if prices.is_empty() && !failures.is_empty() {
            return Err(PriceError::AllLookupsFailed(failures));
        }

        Ok(prices)
    }

    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }

    pub async fn cache_size(&self) -> usize {
        self.cache.read().await.len()
    }

    async fn cached_price(&self, ticker: &str) -> Option<f64> {
        let cache = self.cache.read().await;
        cache
            .get(ticker)
            .filter(|entry| entry.fetched_at.elapsed() < self.config.cache_ttl)
            .map(|entry| entry.price)
    }

    async fn cache_price(&self, ticker: String, price: f64) {
        self.cache.write().await.insert(
            ticker,
            CachedPrice {
                price,
                fetched_at: Instant::now(),
            },
        );
    }

    // Check, sleep and stamp happen under one lock.
    async fn wait_for_request_slot(&self) {
        let mut last_request = self.last_request.lock().await;

        if let Some(previous) = *last_request {
            let elapsed = previous.elapsed();
            if elapsed < self.config.min_request_interval {
                let wait = self.config.min_request_interval - elapsed;
                debug!(wait_ms = wait.as_millis() as u64, "pacing price request");
                tokio::time::sleep(wait).await;
            }
        }

        *last_request = Some(Instant::now());
    }

    async fn fetch_price(&self, provider_id: &str) -> Result<f64, PriceError> {
        debug!(provider_id, url = %self.config.base_url, "fetching USD price");

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[("ids", provider_id), ("vs_currencies", VS_CURRENCY)])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(PriceError::RateLimited);
        }
        if !status.is_success() {
            return Err(PriceError::ProviderError {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let parsed: SimplePriceResponse = serde_json::from_slice(&body)
            .map_err(|_| PriceError::PriceNotFound(provider_id.to_string()))?;

        parsed
            .get(provider_id)
            .and_then(|entry| entry.usd)
            .ok_or_else(|| PriceError::PriceNotFound(provider_id.to_string()))
    }
}

#[async_trait]
impl PriceLookup for PriceService {
    async fn get_price(&self, coin: &str) -> Result<f64, PriceError> {
        PriceService::get_price(self, coin).await
    }
}
