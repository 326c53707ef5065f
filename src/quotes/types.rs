use serde::{Deserialize, Serialize};

/// One exchange's offer as returned by the aggregator's estimate endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "Exchange")]
    pub exchange_name: String,
    /// Amount of the destination coin the exchange says it will deliver.
    #[serde(rename = "Amount")]
    pub receive_amount: f64,
    #[serde(rename = "MinAmount", default)]
    pub min_amount: f64,
    #[serde(rename = "KYCScore", default, skip_serializing_if = "Option::is_none")]
    pub kyc_score: Option<i32>,
}

impl Quote {
    pub fn new(exchange_name: impl Into<String>, receive_amount: f64, min_amount: f64) -> Self {
        Self {
            exchange_name: exchange_name.into(),
            receive_amount,
            min_amount,
            kyc_score: None,
        }
    }
}

/// A quote stamped with its request context and a USD valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuedQuote {
    pub exchange_name: String,
    pub receive_amount: f64,
    pub min_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kyc_score: Option<i32>,
    pub coin_from: String,
    pub coin_to: String,
    pub network_from: String,
    pub network_to: String,
    pub send_amount: f64,
    /// `receive_amount` times the USD price of `coin_to`; 0 when pricing failed.
    pub trade_value_usd: f64,
}
