//! One-off operational scripts for the pond protocol.
//!
//! Each binary assembles one programmable transaction block, signs it
//! with the operator key from `POND_KEY` and submits it to the
//! fullnode from `POND_RPC_URL`, printing the resulting object changes
//! and execution status. The transaction assembly is kept in plain
//! functions here so the block structure can be tested without a node.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod constants;

use constants::*;
use pond_sdk::{
    Ed25519Keypair, Manifest, PreparedTransaction, SdkResult, SuiClient, TransactionBuilder,
    TxArgument,
};
use pond_sdk_types::{
    ObjectId, SuiAddress, TransactionBlockResponse, TypeTag, CLOCK_OBJECT,
};

/// Manifest name of the deployed pond package.
pub const MANIFEST_PACKAGE: &str = "package";
/// Manifest name of the shared Pond object.
pub const MANIFEST_POND: &str = "pond::Pond";
/// Manifest name of the shared DuckManager object.
pub const MANIFEST_DUCK_MANAGER: &str = "duck::DuckManager";

/// The client and signing key every script needs.
#[derive(Debug)]
pub struct ScriptContext {
    /// Fullnode client from `POND_RPC_URL` (mainnet by default).
    pub client: SuiClient,
    /// Operator keypair from `POND_KEY`.
    pub keypair: Ed25519Keypair,
}

impl ScriptContext {
    /// Builds the context from the environment.
    pub fn from_env() -> SdkResult<Self> {
        Ok(Self {
            client: SuiClient::from_env()?,
            keypair: Ed25519Keypair::from_env()?,
        })
    }
}

/// Prints the object changes and execution status the way every
/// script reports them.
pub fn print_outcome(response: &TransactionBlockResponse) -> SdkResult<()> {
    println!(
        "result: {}",
        serde_json::to_string_pretty(&response.object_changes)?
    );
    println!(
        "status: {}",
        serde_json::to_string_pretty(&response.status())?
    );
    Ok(())
}

/// `send`: split 1000 base units off the operator's BUCK coin and
/// transfer the new coin to the test recipient.
pub fn build_send_tx() -> SdkResult<PreparedTransaction> {
    let mut tx = TransactionBuilder::new();
    let coin = tx.object(ObjectId::from_hex(BUCK_COIN)?)?;
    let amount = tx.pure(&SEND_AMOUNT)?;
    let split = tx.split_coins(coin, vec![amount])?;
    let recipient = tx.pure(&SuiAddress::from_hex(SEND_RECIPIENT)?)?;
    tx.transfer_objects(split, recipient)?;
    tx.set_gas_budget(GAS_BUDGET);
    tx.finish()
}

/// `buck`: split SUI collateral off the gas coin, refresh the oracle,
/// borrow BUCK against the collateral and keep the borrowed coin.
pub fn build_buck_tx(sender: SuiAddress) -> SdkResult<PreparedTransaction> {
    let mut tx = TransactionBuilder::new();

    let collateral = tx.pure(&COLLATERAL_AMOUNT)?;
    let coins = tx.split_coins(tx.gas_coin(), vec![collateral])?;
    let balance = tx.move_call(
        "0x2::coin::into_balance",
        vec![TypeTag::sui()],
        vec![coins[0]],
    )?;

    update_oracle_price(&mut tx)?;

    let protocol = tx.object(ObjectId::from_hex(BUCKET_PROTOCOL)?)?;
    let oracle = tx.object(ObjectId::from_hex(ORACLE)?)?;
    let clock = tx.object(CLOCK_OBJECT)?;
    let borrow_amount = tx.pure(&BORROW_AMOUNT)?;
    // No insertion hint: let the protocol find the bottle's position.
    let hint = tx.pure(&Vec::<SuiAddress>::new())?;
    let buck_balance = tx.move_call(
        &format!("{BUCKET_PACKAGE}::buck::borrow"),
        vec![TypeTag::sui()],
        vec![protocol, oracle, clock, balance.nth(0), borrow_amount, hint],
    )?;

    let buck_coin = tx.move_call(
        "0x2::coin::from_balance",
        vec![TypeTag::parse(BUCK_COIN_TYPE)?],
        vec![buck_balance.nth(0)],
    )?;

    let recipient = tx.pure(&sender)?;
    tx.transfer_objects(vec![buck_coin.nth(0)], recipient)?;
    tx.set_gas_budget(GAS_BUDGET);
    tx.finish()
}

/// `init`: seed the tank strategy with one base unit of BUCK.
pub fn build_init_tx(manifest: &Manifest) -> SdkResult<PreparedTransaction> {
    let package = manifest.resolve(MANIFEST_PACKAGE)?;
    let mut tx = TransactionBuilder::new();

    let coin = tx.object(ObjectId::from_hex(BUCK_COIN)?)?;
    let seed = tx.pure(&INIT_SEED_AMOUNT)?;
    let split = tx.split_coins(coin, vec![seed])?;

    let pond = tx.object(manifest.resolve(MANIFEST_POND)?)?;
    let protocol = tx.object(ObjectId::from_hex(BUCKET_PROTOCOL)?)?;
    tx.move_call(
        &format!("{}::bucket_tank::init_strategy", package.to_hex()),
        vec![],
        vec![pond, protocol, split[0]],
    )?;

    tx.set_gas_budget(INIT_GAS_BUDGET);
    tx.finish()
}

/// `pump`: compound the tank strategy, then mint DUCK against the
/// compounded position and keep it.
pub fn build_pump_tx(manifest: &Manifest, sender: SuiAddress) -> SdkResult<PreparedTransaction> {
    let package = manifest.resolve(MANIFEST_PACKAGE)?;
    let mut tx = TransactionBuilder::new();

    let request = compound(&mut tx, package, manifest)?;

    let cap = tx.object(ObjectId::from_hex(STRATEGY_CAP)?)?;
    let pond = tx.object(manifest.resolve(MANIFEST_POND)?)?;
    let duck_manager = tx.object(manifest.resolve(MANIFEST_DUCK_MANAGER)?)?;
    let clock = tx.object(CLOCK_OBJECT)?;
    let duck = tx.move_call(
        &format!("{}::pond::pump", package.to_hex()),
        vec![],
        vec![cap, request, pond, duck_manager, clock],
    )?;

    let recipient = tx.pure(&sender)?;
    tx.transfer_objects(vec![duck.nth(0)], recipient)?;
    tx.set_gas_budget(GAS_BUDGET);
    tx.finish()
}

/// `redeem`: compound the tank strategy, request a redemption against
/// the DUCK position, withdraw from the tank and keep the redeemed
/// BUCK.
pub fn build_redeem_tx(manifest: &Manifest, sender: SuiAddress) -> SdkResult<PreparedTransaction> {
    let package = manifest.resolve(MANIFEST_PACKAGE)?;
    let mut tx = TransactionBuilder::new();

    let request = compound(&mut tx, package, manifest)?;

    let cap = tx.object(ObjectId::from_hex(REDEEM_CAP)?)?;
    let pond = tx.object(manifest.resolve(MANIFEST_POND)?)?;
    let duck_manager = tx.object(manifest.resolve(MANIFEST_DUCK_MANAGER)?)?;
    let redeem_request = tx.move_call(
        &format!("{}::pond::request_redeem", package.to_hex()),
        vec![],
        vec![cap, request, pond, duck_manager],
    )?;
    let compound_req = redeem_request.nth(0);
    let withdraw_req = redeem_request.nth(1);

    let protocol = tx.object(ObjectId::from_hex(BUCKET_PROTOCOL)?)?;
    let oracle = tx.object(ObjectId::from_hex(ORACLE)?)?;
    let treasury = tx.object(ObjectId::from_hex(BUCKET_TREASURY)?)?;
    let clock = tx.object(CLOCK_OBJECT)?;
    tx.move_call(
        &format!("{}::bucket_tank::withdraw", package.to_hex()),
        vec![],
        vec![
            pond,
            compound_req,
            withdraw_req,
            protocol,
            oracle,
            treasury,
            clock,
        ],
    )?;

    let buck = tx.move_call(
        &format!("{}::pond::redeem", package.to_hex()),
        vec![],
        vec![compound_req, withdraw_req, pond],
    )?;

    let recipient = tx.pure(&sender)?;
    tx.transfer_objects(vec![buck.nth(0)], recipient)?;
    tx.set_gas_budget(GAS_BUDGET);
    tx.finish()
}

/// Opens a compound request, refreshes the oracle and compounds the
/// tank strategy. Returns the request handle, which the caller must
/// consume to close the hot potato.
fn compound(
    tx: &mut TransactionBuilder,
    package: ObjectId,
    manifest: &Manifest,
) -> SdkResult<TxArgument> {
    let request = tx
        .move_call(
            &format!("{}::pond::request_compound", package.to_hex()),
            vec![],
            vec![],
        )?
        .nth(0);

    update_oracle_price(tx)?;

    let pond = tx.object(manifest.resolve(MANIFEST_POND)?)?;
    let protocol = tx.object(ObjectId::from_hex(BUCKET_PROTOCOL)?)?;
    let oracle = tx.object(ObjectId::from_hex(ORACLE)?)?;
    let treasury = tx.object(ObjectId::from_hex(BUCKET_TREASURY)?)?;
    let clock = tx.object(CLOCK_OBJECT)?;
    tx.move_call(
        &format!("{}::bucket_tank::compound", package.to_hex()),
        vec![],
        vec![pond, request, protocol, oracle, treasury, clock],
    )?;
    Ok(request)
}

/// Refreshes the SUI price in the bucket oracle from the Switchboard
/// aggregator and Pyth feed.
fn update_oracle_price(tx: &mut TransactionBuilder) -> SdkResult<()> {
    let oracle = tx.object(ObjectId::from_hex(ORACLE)?)?;
    let clock = tx.object(CLOCK_OBJECT)?;
    let aggregator = tx.object(ObjectId::from_hex(SWITCHBOARD_AGGREGATOR)?)?;
    let feed = tx.object(ObjectId::from_hex(PRICE_FEED)?)?;
    let tolerance = tx.pure(&PRICE_TOLERANCE)?;
    tx.move_call(
        &format!("{ORACLE_PACKAGE}::bucket_oracle::update_price"),
        vec![TypeTag::sui()],
        vec![oracle, clock, aggregator, feed, tolerance],
    )?;
    Ok(())
}
