//! Borrows BUCK against 12 SUI of collateral split off the gas coin,
//! refreshing the oracle first, and keeps the borrowed coin.

use pond_scripts::{build_buck_tx, print_outcome, ScriptContext};
use pond_sdk::SdkResult;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        println!("{e}");
    }
}

async fn run() -> SdkResult<()> {
    println!("calling...");
    let ctx = ScriptContext::from_env()?;
    let prepared = build_buck_tx(ctx.keypair.address())?;
    let response = ctx.client.sign_and_execute(&ctx.keypair, &prepared).await?;
    print_outcome(&response)
}
