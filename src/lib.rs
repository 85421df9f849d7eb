//! # deposit-bridge
//!
//! A Rust SDK for deposit-address cross-chain bridging.
//!
//! The bridge service hands out a one-time deposit address for a destination
//! token, recipient and optional contract call. Funding that address on any
//! supported chain delivers the tokens, and optionally executes the call, on
//! the destination chain. This crate builds the call data, talks to the
//! service and drives the request/activate/broadcast/schedule sequence through
//! a pluggable signer.
//!
//! ## Quick Start (funded flow, API v4)
//!
//! ```rust,no_run
//! use deposit_bridge::calldata::EncodingMode;
//! use deposit_bridge::contracts::targets::{token_mint, USDC_BASE};
//! use deposit_bridge::providers::{AlloySigner, HttpBridgeClient};
//! use deposit_bridge::{BridgeConfig, DepositAddressRequest, DepositFlow, TokenDescriptor};
//! use alloy_chains::NamedChain;
//! use alloy_network::EthereumWallet;
//! use alloy_primitives::U256;
//! use alloy_provider::ProviderBuilder;
//! use alloy_signer_local::PrivateKeySigner;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let wallet: PrivateKeySigner = std::env::var("PRIVATE_KEY")?.parse()?;
//! let me = wallet.address();
//! let provider = ProviderBuilder::new()
//!     .wallet(EthereumWallet::from(wallet))
//!     .connect_http(std::env::var("RPC_URL")?.parse()?);
//!
//! let flow = DepositFlow::builder()
//!     .api(HttpBridgeClient::new(BridgeConfig::from_env()?)?)
//!     .signer(AlloySigner::new(provider, me))
//!     .build();
//!
//! let request = DepositAddressRequest::builder()
//!     .destination_token(TokenDescriptor::new(NamedChain::Base, USDC_BASE, 6))
//!     .destination_recipient(me)
//!     .amount(U256::from(1_000_000u64))
//!     .user_id(me.to_string())
//!     .call_data(token_mint(USDC_BASE, me).encode(EncodingMode::Split)?)
//!     .build();
//!
//! let receipt = flow.run(&request).await?;
//! println!("request {} broadcast as {}", receipt.request_id, receipt.tx_hash);
//! # Ok(())
//! # }
//! ```
//!
//! ## Call Data
//!
//! ```rust
//! use deposit_bridge::calldata::{CallDataBuilder, EncodingMode};
//! use alloy_primitives::U256;
//!
//! let mint = CallDataBuilder::new("mint")
//!     .param("to", "address", "0x45c0470ef627a30efe30c06b13d883669b8fd3a8")
//!     .amount_param("amount", "uint256");
//!
//! // API v3: one blob with the amount baked in
//! let blob = mint.encode(EncodingMode::Blob { amount: U256::from(5u64) }).unwrap();
//!
//! // API v4: descriptor plus parameters, amount left for the service
//! let split = mint.encode(EncodingMode::Split).unwrap();
//! assert!(split.as_split().unwrap().params().ends_with(",AARC"));
//! ```
//!
//! ## Public API
//!
//! - [`DepositFlow`], [`FlowReceipt`], [`FlowStage`] - protocol sequencing
//! - [`BridgeApi`] and [`TransactionSigner`] - seams for the service and the wallet
//! - [`providers::HttpBridgeClient`] and [`providers::AlloySigner`] - production implementations
//! - [`calldata`] - call-data builder and encodings
//! - [`contracts`] - bindings and ready-made call-data templates
//! - [`BridgeConfig`], [`ApiVersion`] - connection settings
//! - [`BridgeError`] and [`Result`] - error handling
//! - [`testing`] - fakes recording every call, for tests

mod api;
mod config;
mod error;
mod flow;
mod traits;

pub mod calldata;
pub mod contracts;
pub mod providers;
pub mod spans;
pub mod testing;

pub use api::{
    ActivationRequest, ActivationResponse, ApiVersion, BalancesResponse, DepositAddressRequest,
    DepositAddressResponse, Endpoint, NativeCurrency, Operation, RequestStatus, RouteType,
    ScheduleBody, ScheduleTransactionRequest, ScheduleTransactionResponse, SupportedChain,
    SupportedToken, SupportedTokensQuery, TokenBalance, TokenDescriptor, TransactionDescriptor,
    TransferOut, TransferType, TxData, BALANCES_PATH, NATIVE_TOKEN_SENTINEL,
};
pub use config::{
    BridgeConfig, API_KEY_ENV, API_KEY_HEADER, API_VERSION_ENV, BASE_URL_ENV, BRIDGE_API,
    DAPP_ID_ENV,
};
pub use error::{BridgeError, Result};
pub use flow::{DepositFlow, FlowReceipt, FlowStage, FlowVariant};
pub use traits::{BridgeApi, TransactionSigner};
