use std::{collections::HashMap, time::Duration};

use log::*;
use peerbill_engine::assets::{BSC, ETHEREUM};

const DEFAULT_TRADER_API_URL: &str = "http://localhost:8002";
const DEFAULT_RATES_API_URL: &str = "https://min-api.cryptocompare.com";
const DEFAULT_ETH_RPC_URL: &str = "http://localhost:8545";
const DEFAULT_BSC_RPC_URL: &str = "https://bsc-dataseed.binance.org";
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(3);

fn env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        warn!("🪛️ {key} is not set. Using the default, {default}");
        default.to_string()
    })
}

#[derive(Debug, Clone)]
pub struct TraderApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for TraderApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_TRADER_API_URL.to_string(), timeout: DEFAULT_HTTP_TIMEOUT }
    }
}

impl TraderApiConfig {
    pub fn new_from_env_or_default() -> Self {
        let base_url = env_or_default("PBG_TRADER_API_URL", DEFAULT_TRADER_API_URL);
        Self { base_url, timeout: DEFAULT_HTTP_TIMEOUT }
    }
}

#[derive(Debug, Clone)]
pub struct RatesApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for RatesApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_RATES_API_URL.to_string(), timeout: DEFAULT_HTTP_TIMEOUT }
    }
}

impl RatesApiConfig {
    pub fn new_from_env_or_default() -> Self {
        let base_url = env_or_default("PBG_RATES_API_URL", DEFAULT_RATES_API_URL);
        Self { base_url, timeout: DEFAULT_HTTP_TIMEOUT }
    }
}

/// JSON-RPC endpoints, keyed by network name.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub rpc_urls: HashMap<String, String>,
    pub receipt_poll_interval: Duration,
}

impl Default for ChainConfig {
    fn default() -> Self {
        let rpc_urls = [(ETHEREUM, DEFAULT_ETH_RPC_URL), (BSC, DEFAULT_BSC_RPC_URL)]
            .into_iter()
            .map(|(n, u)| (n.to_string(), u.to_string()))
            .collect();
        Self { rpc_urls, receipt_poll_interval: DEFAULT_RECEIPT_POLL_INTERVAL }
    }
}

impl ChainConfig {
    pub fn new_from_env_or_default() -> Self {
        let mut rpc_urls = HashMap::with_capacity(2);
        rpc_urls.insert(ETHEREUM.to_string(), env_or_default("PBG_ETH_RPC_URL", DEFAULT_ETH_RPC_URL));
        rpc_urls.insert(BSC.to_string(), env_or_default("PBG_BSC_RPC_URL", DEFAULT_BSC_RPC_URL));
        Self { rpc_urls, receipt_poll_interval: DEFAULT_RECEIPT_POLL_INTERVAL }
    }
}
