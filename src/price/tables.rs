use crate::common::normalize_ticker;
use std::collections::{HashMap, HashSet};

/// Tickers pegged to the dollar; priced at exactly 1.0 without a lookup.
pub const DEFAULT_STABLECOINS: &[&str] =
    &["usdt", "usdc", "dai", "busd", "tusd", "gusd", "fusd", "usdd"];

/// Ticker -> CoinGecko coin id.
pub const DEFAULT_PROVIDER_IDS: &[(&str, &str)] = &[
    ("btc", "bitcoin"),
    ("eth", "ethereum"),
    ("sol", "solana"),
    ("bnb", "binancecoin"),
    ("xmr", "monero"),
    ("arrr", "pirate-chain"),
    ("zec", "zcash"),
    ("dero", "dero"),
    ("wow", "wownero"),
    ("firo", "zcoin"),
    ("zano", "zano"),
    ("dash", "dash"),
    ("bdx", "beldex"),
    ("ban", "banano"),
    ("ltc", "litecoin"),
    ("bch", "bitcoin-cash"),
    ("doge", "dogecoin"),
    ("dot", "polkadot"),
    ("link", "chainlink"),
    ("avax", "avalanche-2"),
    ("matic", "matic-network"),
    ("uni", "uniswap"),
    ("shib", "shiba-inu"),
    ("etc", "ethereum-classic"),
    ("hbar", "hedera-hashgraph"),
    ("xtz", "tezos"),
    ("ada", "cardano"),
    ("xrp", "binance-peg-xrp"),
    ("trx", "tron"),
    ("atom", "cosmos"),
    ("near", "near"),
    ("apt", "aptos"),
    ("sui", "sui"),
    ("dcr", "decred"),
    ("aave", "aave"),
    ("bat", "basic-attention-token"),
    ("paxg", "pax-gold"),
    ("hive", "hive"),
    ("zen", "horizen"),
    ("scrt", "secret"),
    ("leo", "leo-token"),
    ("tusd", "true-usd"),
    ("gusd", "gemini-dollar"),
    ("nvdax", "nvidia-xstock"),
];

/// Static lookup data owned by one price service instance.
///
/// Keys are stored normalized, so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinTables {
    stablecoins: HashSet<String>,
    provider_ids: HashMap<String, String>,
}

impl Default for CoinTables {
    fn default() -> Self {
        Self {
            stablecoins: DEFAULT_STABLECOINS.iter().map(|s| s.to_string()).collect(),
            provider_ids: DEFAULT_PROVIDER_IDS
                .iter()
                .map(|(ticker, id)| (ticker.to_string(), id.to_string()))
                .collect(),
        }
    }
}

impl CoinTables {
    /// Tables with no stablecoins and no provider ids.
    pub fn empty() -> Self {
        Self {
            stablecoins: HashSet::new(),
            provider_ids: HashMap::new(),
        }
    }

    pub fn with_stablecoin(mut self, ticker: &str) -> Self {
        self.stablecoins.insert(normalize_ticker(ticker));
        self
    }

    pub fn with_provider_id(mut self, ticker: &str, provider_id: &str) -> Self {
        self.provider_ids
            .insert(normalize_ticker(ticker), provider_id.to_string());
        self
    }

    pub fn is_stablecoin(&self, ticker: &str) -> bool {
        self.stablecoins.contains(&normalize_ticker(ticker))
    }

    pub fn provider_id(&self, ticker: &str) -> Option<&str> {
        self.provider_ids
            .get(&normalize_ticker(ticker))
            .map(String::as_str)
    }
}
