//! Core trait abstractions for deposit-address bridging.
//!
//! The protocol sequencer only talks to the bridge service and to the wallet
//! through these traits, so both can be replaced by fakes that record calls or
//! inject failures.
//!
//! # Example: Implementing a Test Fake
//!
//! ```rust,ignore
//! use deposit_bridge::{TransactionDescriptor, TransactionSigner, Result};
//! use alloy_primitives::{Address, TxHash};
//!
//! struct FixedHashSigner;
//!
//! #[async_trait::async_trait]
//! impl TransactionSigner for FixedHashSigner {
//!     fn address(&self) -> Address {
//!         Address::ZERO
//!     }
//!
//!     async fn send_transaction(&self, _tx: TransactionDescriptor) -> Result<TxHash> {
//!         Ok(TxHash::repeat_byte(0x11))
//!     }
//! }
//! ```

use alloy_primitives::{Address, TxHash};
use async_trait::async_trait;

use crate::api::{
    ActivationRequest, ActivationResponse, ApiVersion, BalancesResponse, DepositAddressRequest,
    DepositAddressResponse, RequestStatus, ScheduleTransactionRequest,
    ScheduleTransactionResponse, SupportedChain, SupportedToken, SupportedTokensQuery,
    TransactionDescriptor,
};
use crate::error::Result;

/// Remote operations of the bridge service.
///
/// Every method issues exactly one request and returns its decoded answer.
/// Implementations never retry and never cache.
///
/// # Errors
///
/// All methods return [`BridgeError::Service`](crate::BridgeError::Service)
/// for non-2xx answers, carrying the service's `message` when it sent one and
/// the operation's default message otherwise.
#[async_trait]
pub trait BridgeApi: Send + Sync {
    /// API generation this client speaks.
    fn version(&self) -> ApiVersion;

    /// Obtains a one-time deposit address.
    ///
    /// A request without an amount selects the QR flow.
    async fn request_deposit_address(
        &self,
        request: &DepositAddressRequest,
    ) -> Result<DepositAddressResponse>;

    /// Registers a QR-flow deposit address for monitoring.
    async fn activate_deposit_address(
        &self,
        request: &ActivationRequest,
    ) -> Result<ActivationResponse>;

    /// Reports a broadcast transaction for a request.
    async fn schedule_transaction(
        &self,
        request: &ScheduleTransactionRequest,
    ) -> Result<ScheduleTransactionResponse>;

    /// Fetches the current status of a request. Single call, no polling.
    async fn get_request_status(&self, request_id: &str) -> Result<RequestStatus>;

    async fn supported_tokens(&self, query: &SupportedTokensQuery) -> Result<Vec<SupportedToken>>;

    async fn supported_chains(&self) -> Result<Vec<SupportedChain>>;

    /// Token balances held by `wallet` across supported chains.
    async fn balances(&self, wallet: Address) -> Result<BalancesResponse>;
}

/// Signs and broadcasts transactions on behalf of one account.
///
/// Key custody and nonce management stay with the implementation.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    /// Account that signs every transaction.
    fn address(&self) -> Address;

    /// Signs `tx`, broadcasts it and returns its hash without waiting for
    /// inclusion.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::SigningFailed`](crate::BridgeError::SigningFailed)
    /// when signing or submission fails.
    async fn send_transaction(&self, tx: TransactionDescriptor) -> Result<TxHash>;
}
