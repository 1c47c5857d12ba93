//! Server configuration, read from `PBG_*` environment variables (a `.env` file is honoured).
//!
//! Every setting has a default that is logged when it is used, except `PBG_DB_SOURCE`. [`ServerConfig::validate`]
//! reports the settings the server cannot start without.
use std::{env, str::FromStr, time::Duration};

use log::*;
use pbg_common::{helpers::parse_list, Secret};
use peerbill_clients::{ChainConfig, RatesApiConfig, TraderApiConfig};
use peerbill_engine::{ConfirmationPolicy, SettlementOptions, DEFAULT_CONFIRMATION_TIMEOUT, DEFAULT_SETTLE_DELAY};
use rust_decimal::Decimal;

use crate::errors::ServerError;

const DEFAULT_GRPC_SERVER_ADDR: &str = "0.0.0.0:9090";
const DEFAULT_HTTP_SERVER_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_WEBSOCKET_SERVER_ADDR: &str = "0.0.0.0:8081";
const DEFAULT_DB_DRIVER: &str = "sqlite";
const DEFAULT_MIGRATION_URL: &str = "file://migrations";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 25;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub grpc_addr: String,
    pub http_addr: String,
    pub websocket_addr: String,
    /// Origins allowed by the CORS policy of the JSON and WebSocket listeners. `*` allows any origin.
    pub allowed_origins: Vec<String>,
    pub database: DatabaseConfig,
    pub trader_api: TraderApiConfig,
    pub rates_api: RatesApiConfig,
    pub chain: ChainConfig,
    pub settlement: SettlementConfig,
    pub email: EmailConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub driver: String,
    pub source: String,
    pub migration_url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: DEFAULT_DB_DRIVER.to_string(),
            source: String::default(),
            migration_url: DEFAULT_MIGRATION_URL.to_string(),
            max_connections: DEFAULT_DB_MAX_CONNECTIONS,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SettlementConfig {
    pub operator_key: Secret<String>,
    pub confirmation: ConfirmationPolicy,
    /// Whole units of native coin sent to an escrow wallet before a token leaves it.
    pub token_gas_funding: Decimal,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        let defaults = SettlementOptions::default();
        Self {
            operator_key: Secret::default(),
            confirmation: defaults.confirmation,
            token_gas_funding: defaults.token_gas_funding,
        }
    }
}

impl SettlementConfig {
    pub fn options(&self) -> SettlementOptions {
        let operator_key = (!self.operator_key.is_empty()).then(|| self.operator_key.clone());
        SettlementOptions { operator_key, token_gas_funding: self.token_gas_funding, confirmation: self.confirmation }
    }
}

/// Sender identity for outgoing mail. Loaded so that deployments keep a single configuration surface; no flow sends
/// mail yet.
#[derive(Clone, Debug, Default)]
pub struct EmailConfig {
    pub sender_name: String,
    pub sender_address: String,
    pub sender_password: Secret<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            grpc_addr: DEFAULT_GRPC_SERVER_ADDR.to_string(),
            http_addr: DEFAULT_HTTP_SERVER_ADDR.to_string(),
            websocket_addr: DEFAULT_WEBSOCKET_SERVER_ADDR.to_string(),
            allowed_origins: Vec::new(),
            database: DatabaseConfig::default(),
            trader_api: TraderApiConfig::default(),
            rates_api: RatesApiConfig::default(),
            chain: ChainConfig::default(),
            settlement: SettlementConfig::default(),
            email: EmailConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env_or_default() -> Self {
        let grpc_addr = env_or_default("PBG_GRPC_SERVER_ADDR", DEFAULT_GRPC_SERVER_ADDR);
        let http_addr = env_or_default("PBG_HTTP_SERVER_ADDR", DEFAULT_HTTP_SERVER_ADDR);
        let websocket_addr = env_or_default("PBG_WEBSOCKET_SERVER_ADDR", DEFAULT_WEBSOCKET_SERVER_ADDR);
        let allowed_origins = env::var("PBG_ALLOWED_ORIGINS").map(|s| parse_list(&s)).unwrap_or_else(|_| {
            warn!("🪛️ PBG_ALLOWED_ORIGINS is not set. Cross-origin browser requests will be rejected.");
            Vec::new()
        });
        let database = DatabaseConfig {
            driver: env_or_default("PBG_DB_DRIVER", DEFAULT_DB_DRIVER),
            source: env::var("PBG_DB_SOURCE").unwrap_or_else(|_| {
                error!("🪛️ PBG_DB_SOURCE is not set. The server cannot start without a wallet store.");
                String::default()
            }),
            migration_url: env_or_default("PBG_MIGRATION_URL", DEFAULT_MIGRATION_URL),
            max_connections: env::var("PBG_DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| parse_or_warn::<u32>("PBG_DB_MAX_CONNECTIONS", &s))
                .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
        };
        let operator_key = env::var("PBG_OPERATOR_PRIVATE_KEY").map(Secret::new).unwrap_or_else(|_| {
            warn!("🪛️ PBG_OPERATOR_PRIVATE_KEY is not set. Token payouts that need gas funding will fail.");
            Secret::default()
        });
        let confirmation = confirmation_policy(
            env::var("PBG_TRANSFER_CONFIRMATION").ok(),
            env::var("PBG_TRANSFER_SETTLE_DELAY_SECS").ok(),
            env::var("PBG_TRANSFER_CONFIRM_TIMEOUT_SECS").ok(),
        );
        let token_gas_funding = env::var("PBG_TOKEN_GAS_FUNDING")
            .ok()
            .and_then(|s| parse_or_warn::<Decimal>("PBG_TOKEN_GAS_FUNDING", &s))
            .unwrap_or_else(|| SettlementOptions::default().token_gas_funding);
        let email = EmailConfig {
            sender_name: env::var("PBG_EMAIL_SENDER_NAME").unwrap_or_default(),
            sender_address: env::var("PBG_EMAIL_SENDER_ADDRESS").unwrap_or_default(),
            sender_password: Secret::new(env::var("PBG_EMAIL_SENDER_PASSWORD").unwrap_or_default()),
        };
        Self {
            grpc_addr,
            http_addr,
            websocket_addr,
            allowed_origins,
            database,
            trader_api: TraderApiConfig::new_from_env_or_default(),
            rates_api: RatesApiConfig::new_from_env_or_default(),
            chain: ChainConfig::new_from_env_or_default(),
            settlement: SettlementConfig { operator_key, confirmation, token_gas_funding },
            email,
        }
    }

    /// Checks the settings that have no usable default.
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.database.driver != DEFAULT_DB_DRIVER {
            return Err(ServerError::ConfigurationError(format!(
                "Unsupported database driver '{}'. Only '{DEFAULT_DB_DRIVER}' is available.",
                self.database.driver
            )));
        }
        if self.database.source.trim().is_empty() {
            return Err(ServerError::ConfigurationError("PBG_DB_SOURCE must be set".into()));
        }
        if self.settlement.token_gas_funding.is_sign_negative() {
            return Err(ServerError::ConfigurationError("PBG_TOKEN_GAS_FUNDING cannot be negative".into()));
        }
        for origin in &self.allowed_origins {
            if origin != "*" && !(origin.starts_with("http://") || origin.starts_with("https://")) {
                return Err(ServerError::ConfigurationError(format!("'{origin}' is not a valid CORS origin")));
            }
        }
        Ok(())
    }
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("🪛️ {key} is not set. Using the default, {default}");
        default.to_string()
    })
}

fn parse_or_warn<T>(key: &str, value: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| error!("🪛️ {value} is not a valid value for {key}. {e} Using the default instead."))
        .ok()
}

/// Builds the confirmation policy from `PBG_TRANSFER_CONFIRMATION` (`receipt` or `delay`) and its timing settings.
pub fn confirmation_policy(mode: Option<String>, delay: Option<String>, timeout: Option<String>) -> ConfirmationPolicy {
    let secs = |key: &str, value: Option<String>, default: Duration| {
        value.and_then(|v| parse_or_warn::<u64>(key, &v)).map(Duration::from_secs).unwrap_or(default)
    };
    match mode.as_deref().map(|m| m.trim().to_ascii_lowercase()) {
        Some(m) if m == "delay" => {
            ConfirmationPolicy::FixedDelay(secs("PBG_TRANSFER_SETTLE_DELAY_SECS", delay, DEFAULT_SETTLE_DELAY))
        },
        Some(m) if m != "receipt" => {
            error!("🪛️ {m} is not a valid PBG_TRANSFER_CONFIRMATION mode. Waiting for receipts instead.");
            ConfirmationPolicy::AwaitReceipt {
                timeout: secs("PBG_TRANSFER_CONFIRM_TIMEOUT_SECS", timeout, DEFAULT_CONFIRMATION_TIMEOUT),
            }
        },
        _ => ConfirmationPolicy::AwaitReceipt {
            timeout: secs("PBG_TRANSFER_CONFIRM_TIMEOUT_SECS", timeout, DEFAULT_CONFIRMATION_TIMEOUT),
        },
    }
}
