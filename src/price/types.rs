use serde::Deserialize;
use std::collections::HashMap;

/// `/simple/price` body: `{"bitcoin": {"usd": 45250.5}}`.
pub type SimplePriceResponse = HashMap<String, SimplePriceEntry>;

#[derive(Debug, Deserialize)]
pub struct SimplePriceEntry {
    pub usd: Option<f64>,
}
