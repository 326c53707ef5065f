//! `swap-quote-scanner-rs`
//!
//! Fetch cross-exchange swap quotes from an aggregator, value them in USD and rank them.
//!
//! ## Quickstart (prices)
//!
//! ```no_run
//! use swap_quote_scanner_rs::PriceService;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), swap_quote_scanner_rs::PriceError> {
//! let prices = PriceService::new()?;
//! let btc = prices.get_price("BTC").await?;
//! println!("BTC = ${}", btc);
//! # Ok(())
//! # }
//! ```
//!
//! ## Quickstart (quotes)
//!
//! ```no_run
//! use swap_quote_scanner_rs::{QuoteContext, Settings, SwapClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), swap_quote_scanner_rs::SwapError> {
//! let client = SwapClient::new(&Settings::from_env())?;
//! let ctx = QuoteContext::new("btc", "xmr", 0.05, None, None);
//!
//! for quote in client.fetch_estimates(&ctx, false).await? {
//!     println!("{} {} (${:.2})", quote.exchange_name, quote.receive_amount, quote.trade_value_usd);
//! }
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod price;
pub mod quotes;
pub mod swap;

// Re-export common types
pub use common::{PriceError, Settings, SwapError, load_dotenv};
pub use price::{CoinTables, PriceLookup, PriceService, PriceServiceConfig};
pub use quotes::{Quote, QuoteContext, ValuedQuote, normalize_quotes, value_quotes};
pub use swap::{SwapClient, Transaction, select_quote};
