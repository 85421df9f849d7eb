//! Smoke check of every v4 endpoint against the live service
//!
//! Each step is independent: a failure is reported with a warning and the
//! check moves on. Without a valid API key every step is expected to fail
//! with the service's error message, which still proves the request shapes.
//!
//! Environment variables (set these in .env file):
//! - API_KEY: (optional) Bridge service API key
//! - DAPP_ID: (optional) Application id, defaults to `test-dapp-id`
//! - BRIDGE_BASE_URL: (optional) Service URL override
//!
//! Run with: `cargo run --example v4_migration_check`

use alloy_chains::NamedChain;
use alloy_primitives::{address, b256, Address, U256};
use deposit_bridge::calldata::{
    AbiParam, CalldataAbi, EncodedCallData, SplitCallData, StateMutability, AMOUNT_PLACEHOLDER,
};
use deposit_bridge::contracts::targets::USDC_BASE;
use deposit_bridge::providers::HttpBridgeClient;
use deposit_bridge::{
    ActivationRequest, ApiVersion, BridgeApi, BridgeConfig, DepositAddressRequest,
    ScheduleTransactionRequest, TokenDescriptor,
};
use dotenvy::dotenv;

const USER_ID: &str = "0x1234567890123456789012345678901234567890";
const DESTINATION_RECIPIENT: Address = address!("45c0470ef627a30efe30c06b13d883669b8fd3a8");
const TEST_REQUEST_ID: &str = "test-request-id";

fn mint_call_data() -> Result<EncodedCallData, Box<dyn std::error::Error>> {
    let abi = CalldataAbi::function(
        "mint",
        vec![
            AbiParam::new("token", "address"),
            AbiParam::new("to", "address"),
            AbiParam::new("amount", "uint256"),
        ],
        StateMutability::External,
    );
    let params = format!("{USDC_BASE},{DESTINATION_RECIPIENT},{AMOUNT_PLACEHOLDER}");
    Ok(EncodedCallData::Split(SplitCallData::from_parts(
        abi, params, "amount",
    )?))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut config = BridgeConfig::from_env()
        .unwrap_or_else(|_| BridgeConfig::new("missing-api-key"))
        .with_version(ApiVersion::V4);
    if config.dapp_id().is_none() {
        config = config.with_dapp_id("test-dapp-id");
    }
    let client = HttpBridgeClient::new(config)?;

    let usdc = TokenDescriptor::new(NamedChain::Base, USDC_BASE, 6);
    let amount = U256::from(1_000_000u64);

    println!("🧪 Checking bridge API v4 endpoints...\n");

    println!("1️⃣ Amount-based deposit address");
    let funded = DepositAddressRequest::builder()
        .destination_token(usdc)
        .destination_recipient(DESTINATION_RECIPIENT)
        .amount(amount)
        .user_id(USER_ID)
        .call_data(mint_call_data()?)
        .build();
    match client.request_deposit_address(&funded).await {
        Ok(response) => println!("   ✅ Request id: {}", response.request_id),
        Err(e) => println!("   ⚠️  Failed: {e}"),
    }

    println!("\n2️⃣ QR deposit address");
    let qr = DepositAddressRequest::builder()
        .destination_token(usdc)
        .destination_recipient(DESTINATION_RECIPIENT)
        .user_id(USER_ID)
        .source_chain_id(1)
        .build();
    match client.request_deposit_address(&qr).await {
        Ok(response) => println!("   ✅ Request id: {}", response.request_id),
        Err(e) => println!("   ⚠️  Failed: {e}"),
    }

    println!("\n3️⃣ Schedule transaction");
    let schedule = ScheduleTransactionRequest::builder()
        .request_id(TEST_REQUEST_ID)
        .chain_id(usdc.chain_id())
        .token_address(USDC_BASE)
        .amount(amount)
        .transaction_hash(b256!(
            "1234567890123456789012345678901234567890123456789012345678901234"
        ))
        .from_address(DESTINATION_RECIPIENT)
        .deposit_address(USER_ID)
        .build();
    match client.schedule_transaction(&schedule).await {
        Ok(response) => println!("   ✅ Transaction id: {}", response.transaction_id),
        Err(e) => println!("   ⚠️  Failed: {e}"),
    }

    println!("\n4️⃣ Deposit address activation");
    let activation = ActivationRequest::builder()
        .deposit_address(USER_ID)
        .request_id(TEST_REQUEST_ID)
        .chain_id(usdc.chain_id())
        .token_address(USDC_BASE)
        .build();
    match client.activate_deposit_address(&activation).await {
        Ok(response) => println!("   ✅ Status: {}", response.status),
        Err(e) => println!("   ⚠️  Failed: {e}"),
    }

    println!("\n5️⃣ Request status");
    match client.get_request_status(TEST_REQUEST_ID).await {
        Ok(status) => println!(
            "   ✅ Status: {}",
            status.status.as_deref().unwrap_or("unknown")
        ),
        Err(e) => println!("   ⚠️  Failed: {e}"),
    }

    println!("\n🎉 v4 endpoint check completed");

    Ok(())
}
