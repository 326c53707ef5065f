mod types;

pub use types::{Quote, ValuedQuote};

use crate::common::normalize_ticker;
use crate::price::PriceLookup;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The swap a batch of quotes was requested for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteContext {
    pub coin_from: String,
    pub coin_to: String,
    pub network_from: String,
    pub network_to: String,
    pub send_amount: f64,
}

impl QuoteContext {
    /// Lowercases tickers; a missing or blank network defaults to the coin's own ticker.
    pub fn new(
        coin_from: &str,
        coin_to: &str,
        send_amount: f64,
        network_from: Option<&str>,
        network_to: Option<&str>,
    ) -> Self {
        let coin_from = normalize_ticker(coin_from);
        let coin_to = normalize_ticker(coin_to);
        let network_or = |network: Option<&str>, coin: &str| {
            network
                .map(normalize_ticker)
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| coin.to_string())
        };

        Self {
            network_from: network_or(network_from, &coin_from),
            network_to: network_or(network_to, &coin_to),
            coin_from,
            coin_to,
            send_amount,
        }
    }
}

/// Values and ranks `quotes` for the swap described by `ctx`.
///
/// Makes one price lookup for `ctx.coin_to`. A failed lookup values every
/// quote at 0 USD instead of failing; ranking never depends on pricing.
pub async fn normalize_quotes<P>(
    prices: &P,
    quotes: Vec<Quote>,
    ctx: &QuoteContext,
) -> Vec<ValuedQuote>
where
    P: PriceLookup + ?Sized,
{
    let unit_price = match prices.get_price(&ctx.coin_to).await {
        Ok(price) => price,
        Err(e) => {
            warn!(coin = %ctx.coin_to, error = %e, "USD price unavailable, valuing quotes at 0");
            0.0
        }
    };

    value_quotes(quotes, ctx, unit_price)
}

/// Stamps `quotes` with `ctx` and `unit_price`, sorted by receive amount, highest first.
///
/// The sort is stable: equal amounts keep their input order.
pub fn value_quotes(quotes: Vec<Quote>, ctx: &QuoteContext, unit_price: f64) -> Vec<ValuedQuote> {
    let mut valued: Vec<ValuedQuote> = quotes
        .into_iter()
        .map(|quote| ValuedQuote {
            trade_value_usd: quote.receive_amount * unit_price,
            exchange_name: quote.exchange_name,
            receive_amount: quote.receive_amount,
            min_amount: quote.min_amount,
            kyc_score: quote.kyc_score,
            coin_from: ctx.coin_from.clone(),
            coin_to: ctx.coin_to.clone(),
            network_from: ctx.network_from.clone(),
            network_to: ctx.network_to.clone(),
            send_amount: ctx.send_amount,
        })
        .collect();

    valued.sort_by(|a, b| b.receive_amount.total_cmp(&a.receive_amount));
    valued
}
