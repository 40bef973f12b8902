//! Seeds the tank strategy with one base unit of BUCK.

use pond_scripts::{build_init_tx, print_outcome, ScriptContext};
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
    let prepared = build_init_tx(&manifest)?;
    let response = ctx.client.sign_and_execute(&ctx.keypair, &prepared).await?;
    print_outcome(&response)
}
