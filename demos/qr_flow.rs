//! QR flow: request a deposit address without an amount
//!
//! The address is activated for monitoring before anything is signed, so the
//! user can keep sending any amount to it afterwards. The transaction the
//! service returns is broadcast and scheduled with amount zero.
//!
//! Environment variables (set these in .env file):
//! - API_KEY: Bridge service API key
//! - DAPP_ID: Application id
//! - PRIVATE_KEY: Wallet private key (must start with 0x)
//! - RPC_URL: RPC endpoint of the source chain (Ethereum mainnet)
//!
//! Run with: `cargo run --example qr_flow`

use alloy_chains::NamedChain;
use alloy_network::EthereumWallet;
use alloy_primitives::{address, Address};
use alloy_provider::ProviderBuilder;
use alloy_signer_local::PrivateKeySigner;
use deposit_bridge::contracts::targets::USDC_BASE;
use deposit_bridge::providers::{AlloySigner, HttpBridgeClient};
use deposit_bridge::{ApiVersion, BridgeConfig, DepositAddressRequest, DepositFlow, TokenDescriptor};
use dotenvy::dotenv;

const DESTINATION_WALLET: Address = address!("45c0470ef627a30efe30c06b13d883669b8fd3a8");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let signer: PrivateKeySigner = std::env::var("PRIVATE_KEY")
        .expect("PRIVATE_KEY must be set in .env file")
        .parse()?;
    let wallet_address = signer.address();
    let rpc_url = std::env::var("RPC_URL").expect("RPC_URL must be set in .env file");

    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect_http(rpc_url.parse()?);

    // Only v4 supports the QR flow
    let config = BridgeConfig::from_env()?.with_version(ApiVersion::V4);

    let request = DepositAddressRequest::builder()
        .destination_token(TokenDescriptor::new(NamedChain::Base, USDC_BASE, 6))
        .destination_recipient(DESTINATION_WALLET)
        .user_id(DESTINATION_WALLET.to_string())
        .source_chain_id(1)
        .build();

    let flow = DepositFlow::builder()
        .api(HttpBridgeClient::new(config)?)
        .signer(AlloySigner::new(provider, wallet_address))
        .build();

    println!("📱 Starting QR flow (no amount)...");
    let receipt = flow.run_qr(&request, None).await?;

    println!("✅ Deposit address: {}", receipt.deposit_address);
    println!("   Request id:      {}", receipt.request_id);
    if let Some(activation) = &receipt.activation {
        println!("   Activation:      {}", activation.status);
    }
    println!("   Transaction:     {}", receipt.tx_hash);
    println!("   Scheduled:       {}", receipt.schedule.status);
    println!();
    println!("🎉 User can now send any amount to {}", receipt.deposit_address);

    Ok(())
}
