use crate::quotes::Quote;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `/estimate` body. Only the quote list is read; the aggregator's minimums
/// and fiat figures are ignored in favour of our price lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct EstimateResponse {
    #[serde(default)]
    pub rates: EstimateRates,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EstimateRates {
    #[serde(rename = "Results", default)]
    pub results: Vec<Quote>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionResponse {
    pub transaction: Transaction,
}

/// A trade as reported by the aggregator. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Transaction {
    #[serde(rename = "Coin1", skip_serializing_if = "String::is_empty")]
    pub coin_from: String,
    #[serde(rename = "Coin2", skip_serializing_if = "String::is_empty")]
    pub coin_to: String,
    #[serde(rename = "Network1", skip_serializing_if = "String::is_empty")]
    pub network_from: String,
    #[serde(rename = "Network2", skip_serializing_if = "String::is_empty")]
    pub network_to: String,
    /// Deposit address the user sends funds to.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
    pub estimate_amount: f64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub provider: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub send_amount: f64,
    /// Exchange-side tracking link, if any.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub track: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(rename = "KYC", skip_serializing_if = "String::is_empty")]
    pub kyc: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub token: String,
    pub done: bool,
    #[serde(rename = "CGID", skip_serializing_if = "String::is_empty")]
    pub cgid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
