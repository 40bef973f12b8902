//! Fullnode endpoint configuration.

use crate::error::{SdkError, SdkResult};
use std::time::Duration;
use url::Url;

const MAINNET_RPC: &str = "https://fullnode.mainnet.sui.io:443";
const TESTNET_RPC: &str = "https://fullnode.testnet.sui.io:443";
const DEVNET_RPC: &str = "https://fullnode.devnet.sui.io:443";
const LOCAL_RPC: &str = "http://127.0.0.1:9000";

/// Environment variable overriding the RPC endpoint.
pub const RPC_URL_ENV: &str = "POND_RPC_URL";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for a Sui JSON-RPC fullnode.
///
/// # Example
///
/// ```rust
/// use pond_sdk::SuiConfig;
///
/// let config = SuiConfig::mainnet();
/// assert_eq!(config.rpc_url().as_str(), "https://fullnode.mainnet.sui.io/");
/// ```
#[derive(Clone, Debug)]
pub struct SuiConfig {
    rpc_url: Url,
    request_timeout: Duration,
}

impl SuiConfig {
    /// Settings for the public mainnet fullnode.
    pub fn mainnet() -> Self {
        Self {
            rpc_url: Url::parse(MAINNET_RPC).expect("mainnet URL is valid"),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Settings for the public testnet fullnode.
    pub fn testnet() -> Self {
        Self {
            rpc_url: Url::parse(TESTNET_RPC).expect("testnet URL is valid"),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Settings for the public devnet fullnode.
    pub fn devnet() -> Self {
        Self {
            rpc_url: Url::parse(DEVNET_RPC).expect("devnet URL is valid"),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Settings for a local node started with `sui start`.
    pub fn localnet() -> Self {
        Self {
            rpc_url: Url::parse(LOCAL_RPC).expect("local URL is valid"),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Settings for an arbitrary endpoint.
    pub fn custom(rpc_url: &str) -> SdkResult<Self> {
        Ok(Self {
            rpc_url: Url::parse(rpc_url)?,
            request_timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Reads the endpoint from `POND_RPC_URL`, falling back to mainnet.
    pub fn from_env() -> SdkResult<Self> {
        match std::env::var(RPC_URL_ENV) {
            Ok(value) => Self::custom(&value)
                .map_err(|e| SdkError::config(format!("{RPC_URL_ENV}: {e}"))),
            Err(_) => Ok(Self::mainnet()),
        }
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// The configured endpoint URL.
    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    /// The per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}
