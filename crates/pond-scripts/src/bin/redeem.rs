//! Compounds the tank strategy, redeems DUCK for BUCK and keeps the
//! redeemed coin.

use pond_scripts::{build_redeem_tx, print_outcome, ScriptContext};
use pond_sdk::{Manifest, SdkResult};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        println!("{e}");
    }
}

async fn run() -> SdkResult<()> {
    println!("calling...");
    let ctx = ScriptContext::from_env()?;
    let manifest = Manifest::from_env()?;
    let prepared = build_redeem_tx(&manifest, ctx.keypair.address())?;
    let response = ctx.client.sign_and_execute(&ctx.keypair, &prepared).await?;
    print_outcome(&response)
}
