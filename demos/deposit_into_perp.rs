//! Deposit USDC into an Apex Omni perpetuals account on Arbitrum
//!
//! The bridge delivers USDC to the Apex Omni contract and calls
//! `depositERC20` with the delivered amount, crediting the signing wallet's
//! zkLink account (sub-account 0).
//!
//! Environment variables (set these in .env file):
//! - API_KEY: Bridge service API key
//! - PRIVATE_KEY: Wallet private key funding the deposit (must start with 0x)
//! - RPC_URL: RPC endpoint of the chain the deposit is sent from
//! - DAPP_ID: Application id (required by API v4)
//! - BRIDGE_API_VERSION: (optional) `v3` or `v4`, defaults to v4
//!
//! Run with: `cargo run --example deposit_into_perp`

use alloy_chains::NamedChain;
use alloy_network::EthereumWallet;
use alloy_primitives::U256;
use alloy_provider::ProviderBuilder;
use alloy_signer_local::PrivateKeySigner;
use deposit_bridge::calldata::EncodingMode;
use deposit_bridge::contracts::targets::{apex_omni_deposit, APEX_OMNI_ARBITRUM, USDC_ARBITRUM};
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

    // 1 USDC (6 decimals)
    let amount = U256::from(1_000_000u64);
    let usdc = TokenDescriptor::new(NamedChain::Arbitrum, USDC_ARBITRUM, 6);

    let deposit = apex_omni_deposit(USDC_ARBITRUM, wallet_address, 0, false);
    let call_data = match version {
        ApiVersion::V3 => deposit.encode(EncodingMode::Blob { amount })?,
        ApiVersion::V4 => deposit.encode(EncodingMode::Split)?,
    };

    let request = DepositAddressRequest::builder()
        .destination_token(usdc)
        .destination_recipient(APEX_OMNI_ARBITRUM)
        .amount(amount)
        .user_id(wallet_address.to_string())
        .call_data(call_data)
        .build();

    let flow = DepositFlow::builder()
        .api(HttpBridgeClient::new(config)?)
        .signer(AlloySigner::new(provider, wallet_address))
        .build();

    println!("📈 Depositing into Apex Omni for {wallet_address} via API {version}...");
    let receipt = flow.run(&request).await?;

    println!("✅ Deposit address: {}", receipt.deposit_address);
    println!("   Request id:      {}", receipt.request_id);
    println!("   Transaction:     {}", receipt.tx_hash);
    println!("   Scheduled:       {}", receipt.schedule.status);

    Ok(())
}
