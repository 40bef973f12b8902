//! Client SDK for the pond workspace's Sui transactions.
//!
//! The pieces fit together in one direction:
//!
//! 1. [`TransactionBuilder`] assembles a programmable transaction
//!    block from typed argument handles.
//! 2. [`SuiClient::sign_and_execute`] resolves the block's object
//!    inputs against the fullnode, selects a gas coin, signs with an
//!    [`Ed25519Keypair`] and submits, waiting for local execution.
//! 3. The returned [`TransactionBlockResponse`] carries the execution
//!    status and object changes.
//!
//! # Example
//!
//! ```rust,no_run
//! use pond_sdk::{Ed25519Keypair, SuiClient, SuiConfig, TransactionBuilder};
//! use pond_sdk_types::SuiAddress;
//!
//! # async fn run() -> Result<(), pond_sdk::SdkError> {
//! let client = SuiClient::new(SuiConfig::mainnet())?;
//! let keypair = Ed25519Keypair::from_env()?;
//!
//! let mut tx = TransactionBuilder::new();
//! let amount = tx.pure(&1000u64)?;
//! let coins = tx.split_coins(tx.gas_coin(), vec![amount])?;
//! let dest = tx.pure(&SuiAddress::from_hex("0xa0")?)?;
//! tx.transfer_objects(coins, dest)?;
//! tx.set_gas_budget(10_000_000);
//!
//! let response = client.sign_and_execute(&keypair, &tx.finish()?).await?;
//! println!("{}", response.digest);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations, rust_2018_idioms)]

pub mod client;
pub mod config;
pub mod error;
pub mod keypair;
pub mod manifest;
pub mod ptb;

pub use client::{Coin, CoinPage, SuiClient};
pub use config::{SuiConfig, RPC_URL_ENV};
pub use error::{SdkError, SdkResult};
pub use keypair::{Ed25519Keypair, PRIVATE_KEY_ENV};
pub use manifest::{Manifest, DEFAULT_MANIFEST_PATH, MANIFEST_PATH_ENV};
pub use ptb::{
    CallResults, PreparedTransaction, TransactionBuilder, TransactionInput, TxArgument,
};

pub use pond_sdk_types as types;
pub use pond_sdk_types::TransactionBlockResponse;
