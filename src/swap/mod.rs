//! Client for the swap aggregator: quotes, trade creation and tracking.

mod types;

pub use types::{EstimateRates, EstimateResponse, Transaction, TransactionResponse};

use crate::common::{Settings, SwapError, create_http_client, format_amount};
use crate::price::{PriceLookup, PriceService, PriceServiceConfig};
use crate::quotes::{QuoteContext, ValuedQuote, normalize_quotes};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub struct SwapClient {
    client: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
    prices: Arc<dyn PriceLookup>,
}

impl SwapClient {
    /// Client with its own [`PriceService`] configured from `settings`.
    pub fn new(settings: &Settings) -> Result<Self, SwapError> {
        let prices = PriceService::with_config(
            PriceServiceConfig::default()
                .with_base_url(settings.price_api_base.clone())
                .with_timeout(settings.price_timeout),
        )?;
        Self::with_price_lookup(settings, Arc::new(prices))
    }

    pub fn with_price_lookup(
        settings: &Settings,
        prices: Arc<dyn PriceLookup>,
    ) -> Result<Self, SwapError> {
        Ok(Self {
            client: create_http_client(settings.swap_timeout)?,
            api_base: settings.swap_api_base.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            prices,
        })
    }

    /// Fetches every exchange's offer for `ctx`, valued in USD and ranked best first.
    pub async fn fetch_estimates(
        &self,
        ctx: &QuoteContext,
        best: bool,
    ) -> Result<Vec<ValuedQuote>, SwapError> {
        let amount = query_amount(ctx.send_amount)?;
        if self.api_key.is_none() {
            return Err(SwapError::MissingApiKey);
        }

        let mut params = vec![
            ("coin1", ctx.coin_from.clone()),
            ("coin2", ctx.coin_to.clone()),
            ("amount", amount),
            ("network1", ctx.network_from.clone()),
            ("network2", ctx.network_to.clone()),
        ];
        if best {
            params.push(("best", "true".to_string()));
        }

        debug!(
            from = %ctx.coin_from,
            to = %ctx.coin_to,
            amount = ctx.send_amount,
            network_from = %ctx.network_from,
            network_to = %ctx.network_to,
            "fetching estimates"
        );

        let body = self.get("estimate", &params).await?;
        let estimate: EstimateResponse = serde_json::from_value(body)?;

        Ok(normalize_quotes(self.prices.as_ref(), estimate.rates.results, ctx).await)
    }

    /// Opens a trade with the exchange behind `quote`, paying out to `address`.
    pub async fn create_trade(
        &self,
        quote: &ValuedQuote,
        address: &str,
    ) -> Result<Transaction, SwapError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(SwapError::EmptyAddress);
        }
        let amount = query_amount(quote.send_amount)?;

        let params = [
            ("coin1", quote.coin_from.clone()),
            ("coin2", quote.coin_to.clone()),
            ("amount", amount),
            ("partner", quote.exchange_name.clone()),
            ("address", address.to_string()),
            ("network1", quote.network_from.clone()),
            ("network2", quote.network_to.clone()),
        ];

        let body = self.get("swap", &params).await?;
        let response: TransactionResponse = serde_json::from_value(body)?;
        Ok(response.transaction)
    }

    /// Refreshes `tx.status` from the aggregator; every other field is kept.
    pub async fn track_transaction(&self, mut tx: Transaction) -> Result<Transaction, SwapError> {
        let body = self.get("transaction", &[("id", tx.id.clone())]).await?;

        tx.status = body
            .get("status")
            .and_then(Value::as_str)
            .ok_or(SwapError::MissingField("status"))?
            .to_string();

        Ok(tx)
    }

    pub async fn get_transaction(&self, id: &str) -> Result<Transaction, SwapError> {
        let body = self.get("transaction", &[("id", id.to_string())]).await?;
        let response: TransactionResponse = serde_json::from_value(body)?;
        Ok(response.transaction)
    }

    async fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value, SwapError> {
        let url = format!("{}/{}", self.api_base, endpoint);
        let mut request = self.client.get(&url).query(params);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let reason = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
                .unwrap_or(text);
            return Err(SwapError::ApiError(format!("{} - {}", status, reason)));
        }

        let body: Value = serde_json::from_str(&text)?;
        if let Some(error) = body.get("error").and_then(Value::as_str) {
            return Err(SwapError::ApiError(error.to_string()));
        }
        if !body.is_object() {
            return Err(SwapError::ApiError(format!(
                "unexpected response from {}",
                endpoint
            )));
        }

        Ok(body)
    }
}

// Positive amount that survives rendering as a non-zero decimal.
fn query_amount(amount: f64) -> Result<String, SwapError> {
    if amount <= 0.0 {
        return Err(SwapError::InvalidAmount(amount));
    }
    format_amount(amount).ok_or(SwapError::InvalidAmount(amount))
}

/// Picks the quote at a 1-based position, as shown to the user.
pub fn select_quote(quotes: &[ValuedQuote], index: usize) -> Result<&ValuedQuote, SwapError> {
    index
        .checked_sub(1)
        .and_then(|i| quotes.get(i))
        .ok_or(SwapError::InvalidSelection {
            index,
            available: quotes.len(),
        })
}
