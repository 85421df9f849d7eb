//! Mint a stablecoin on Arbitrum from a bridged deposit
//!
//! The bridge delivers USDT to the token contract and calls
//! `mint(_destination, _amount)` with the delivered amount.
//!
//! Environment variables (set these in .env file):
//! - API_KEY: Bridge service API key
//! - PRIVATE_KEY: Wallet private key funding the deposit (must start with 0x)
//! - RPC_URL: RPC endpoint of the chain the deposit is sent from
//! - DAPP_ID: Application id (required by API v4)
//! - BRIDGE_API_VERSION: (optional) `v3` or `v4`, defaults to v4
//!
//! Run with: `cargo run --example mint_stablecoin`

use alloy_chains::NamedChain;
use alloy_network::EthereumWallet;
use alloy_primitives::U256;
use alloy_provider::ProviderBuilder;
use alloy_signer_local::PrivateKeySigner;
use deposit_bridge::calldata::EncodingMode;
use deposit_bridge::contracts::targets::{stablecoin_mint, USDT_ARBITRUM};
use deposit_bridge::providers::{AlloySigner, HttpBridgeClient};
use deposit_bridge::{ApiVersion, BridgeConfig, DepositAddressRequest, DepositFlow, TokenDescriptor};
use dotenvy::dotenv;

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

    let config = BridgeConfig::from_env()?;
    let version = config.version();

    // 1 USDT (6 decimals)
    let amount = U256::from(1_000_000u64);
    let usdt = TokenDescriptor::new(NamedChain::Arbitrum, USDT_ARBITRUM, 6);

    let mint = stablecoin_mint(wallet_address);
    let call_data = match version {
        ApiVersion::V3 => mint.encode(EncodingMode::Blob { amount })?,
        ApiVersion::V4 => mint.encode(EncodingMode::Split)?,
    };

    let request = DepositAddressRequest::builder()
        .destination_token(usdt)
        .destination_recipient(USDT_ARBITRUM)
        .amount(amount)
        .user_id(wallet_address.to_string())
        .call_data(call_data)
        .build();

    let flow = DepositFlow::builder()
        .api(HttpBridgeClient::new(config)?)
        .signer(AlloySigner::new(provider, wallet_address))
        .build();

    println!("💵 Minting {amount} USDT units for {wallet_address} via API {version}...");
    let receipt = flow.run(&request).await?;

    println!("✅ Deposit address: {}", receipt.deposit_address);
    println!("   Request id:      {}", receipt.request_id);
    println!("   Transaction:     {}", receipt.tx_hash);
    println!("   Scheduled:       {}", receipt.schedule.status);

    Ok(())
}
