//! Prints the signed-in player's daily store and wallet.
//!
//! Needs a running game client on this machine. Pass the region as the
//! first argument (defaults to `na`).

use pvpnet::{Client, Error, Region};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let region: Region = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or("na")
        .parse()?;

    let mut client = Client::new(region)?;
    client.activate().await?;

    tracing::info!(
        puuid = client.puuid().unwrap_or("?"),
        name = client.player_name().unwrap_or("?"),
        tag = client.player_tag().unwrap_or("?"),
        "activated"
    );

    let storefront = client.store_fetch_storefront().await?;
    if let Some(panel) = storefront.pointer("/SkinsPanelLayout/SingleItemOffers") {
        println!("Daily offers: {panel:#}");
    }

    match client.store_fetch_wallet().await {
        Ok(wallet) => println!("Wallet: {wallet:#}"),
        Err(Error::EmptyResponse) => println!("Wallet: no data returned"),
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
