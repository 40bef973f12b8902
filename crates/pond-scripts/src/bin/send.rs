//! Splits 1000 base units off the operator's BUCK coin and transfers
//! the new coin to the test recipient.

use pond_scripts::{build_send_tx, print_outcome, ScriptContext};
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
    let prepared = build_send_tx()?;
    let response = ctx.client.sign_and_execute(&ctx.keypair, &prepared).await?;
    print_outcome(&response)
}
