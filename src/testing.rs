//! Test utilities and fake implementations for the bridge traits
//!
//! The fakes answer deterministically and append every call they receive to a
//! shared [`CallLog`], so a test can assert the exact order of service calls
//! and signer calls across one protocol run. Failures can be injected per
//! operation to exercise abort paths.

use alloy_primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::api::{
    ActivationRequest, ActivationResponse, ApiVersion, BalancesResponse, DepositAddressRequest,
    DepositAddressResponse, Operation, RequestStatus, ScheduleTransactionRequest,
    ScheduleTransactionResponse, SupportedChain, SupportedToken, SupportedTokensQuery,
    TransactionDescriptor, TxData,
};
use crate::traits::{BridgeApi, TransactionSigner};
use crate::{BridgeError, Result};

/// Application id the fake service assumes when a request carries none.
pub const FAKE_DAPP_ID: &str = "fake-dapp";

// ============================================================================
// Call Log
// ============================================================================

/// One call received by a fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    RequestDepositAddress {
        qr_flow: bool,
    },
    ActivateDepositAddress {
        request_id: String,
        deposit_address: String,
    },
    SendTransaction {
        from: Address,
        tx: TransactionDescriptor,
    },
    ScheduleTransaction {
        request_id: String,
        amount: U256,
        tx_hash: TxHash,
    },
    RequestStatus {
        request_id: String,
    },
    SupportedTokens,
    SupportedChains,
    Balances {
        wallet: Address,
    },
}

impl RecordedCall {
    /// Short name for order assertions.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RequestDepositAddress { .. } => "request_deposit_address",
            Self::ActivateDepositAddress { .. } => "activate_deposit_address",
            Self::SendTransaction { .. } => "send_transaction",
            Self::ScheduleTransaction { .. } => "schedule_transaction",
            Self::RequestStatus { .. } => "get_request_status",
            Self::SupportedTokens => "supported_tokens",
            Self::SupportedChains => "supported_chains",
            Self::Balances { .. } => "balances",
        }
    }
}

/// Ordered record of calls, shareable between fakes.
#[derive(Clone, Debug, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Names of the recorded calls, in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().iter().map(RecordedCall::name).collect()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }
}

// ============================================================================
// Fake Bridge API
// ============================================================================

/// A fake bridge service.
///
/// Each deposit-address request yields a fresh request id (`req-1`, `req-2`,
/// ...) and a matching deposit address. Requests are validated against the
/// configured API version exactly like the HTTP client does, so version and
/// encoding mismatches surface here too.
///
/// This allows testing scenarios like:
/// - Call order of the funded and QR pipelines
/// - Service errors at any step (`fail_with`)
/// - Request id threading across steps
#[derive(Clone, Debug)]
pub struct FakeBridgeApi {
    version: ApiVersion,
    log: CallLog,
    issued: Arc<Mutex<u64>>,
    failures: Arc<Mutex<HashMap<Operation, (u16, String)>>>,
    gas_limit: Option<u64>,
}

impl Default for FakeBridgeApi {
    fn default() -> Self {
        Self {
            version: ApiVersion::V4,
            log: CallLog::new(),
            issued: Arc::new(Mutex::new(0)),
            failures: Arc::new(Mutex::new(HashMap::new())),
            gas_limit: Some(100_000),
        }
    }
}

impl FakeBridgeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, version: ApiVersion) -> Self {
        self.version = version;
        self
    }

    /// Records into `log` instead of a private log.
    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    /// Gas limit put into the returned `txData`; `None` leaves it empty.
    pub fn with_gas_limit(mut self, gas_limit: Option<u64>) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    /// Makes every later call to `operation` fail like a non-2xx answer.
    ///
    /// An empty `message` simulates a body without one, so the operation's
    /// default message is used.
    pub fn fail_with(&self, operation: Operation, status: u16, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(operation, (status, message.to_string()));
    }

    /// Number of deposit addresses handed out so far.
    pub fn issued_count(&self) -> u64 {
        *self.issued.lock().unwrap()
    }

    fn check_failure(&self, operation: Operation) -> Result<()> {
        match self.failures.lock().unwrap().get(&operation) {
            Some((status, message)) => Err(BridgeError::Service {
                operation,
                status: *status,
                message: if message.is_empty() {
                    operation.default_error_message().to_string()
                } else {
                    message.clone()
                },
            }),
            None => Ok(()),
        }
    }

    fn check_supported(&self, operation: Operation) -> Result<()> {
        self.version.endpoint(operation).map(|_| ())
    }
}

#[async_trait]
impl BridgeApi for FakeBridgeApi {
    fn version(&self) -> ApiVersion {
        self.version
    }

    async fn request_deposit_address(
        &self,
        request: &DepositAddressRequest,
    ) -> Result<DepositAddressResponse> {
        self.log.push(RecordedCall::RequestDepositAddress {
            qr_flow: request.is_qr_flow(),
        });
        request.query(self.version, Some(FAKE_DAPP_ID))?;
        self.check_failure(request.operation())?;

        let n = {
            let mut issued = self.issued.lock().unwrap();
            *issued += 1;
            *issued
        };
        let deposit_address = Address::left_padding_from(&n.to_be_bytes()).to_string();
        let token = request.destination_token();

        Ok(DepositAddressResponse {
            request_id: format!("req-{n}"),
            status: "PENDING".to_string(),
            deposit_address: deposit_address.clone(),
            on_chain_id: token.chain_id().to_string(),
            deposit_token_name: None,
            deposit_token_symbol: None,
            deposit_token_address: token.address.to_string(),
            deposit_token_decimals: Some(token.decimals.to_string()),
            deposit_token_usd_price: None,
            amount: request.amount().map(|a| a.to_string()).unwrap_or_default(),
            execution_time: "30".to_string(),
            gas_fee: "0".to_string(),
            tx_data: TxData {
                chain_id: token.chain_id().to_string(),
                from: String::new(),
                to: deposit_address,
                data: "0x".to_string(),
                value: request.amount().unwrap_or_default().to_string(),
                gas_limit: self.gas_limit.map(|g| g.to_string()).unwrap_or_default(),
            },
        })
    }

    async fn activate_deposit_address(
        &self,
        request: &ActivationRequest,
    ) -> Result<ActivationResponse> {
        self.log.push(RecordedCall::ActivateDepositAddress {
            request_id: request.request_id().to_string(),
            deposit_address: request.deposit_address().to_string(),
        });
        self.check_supported(Operation::ActivateDepositAddress)?;
        self.check_failure(Operation::ActivateDepositAddress)?;

        Ok(ActivationResponse {
            status: "ACTIVATED".to_string(),
            message: None,
        })
    }

    async fn schedule_transaction(
        &self,
        request: &ScheduleTransactionRequest,
    ) -> Result<ScheduleTransactionResponse> {
        self.log.push(RecordedCall::ScheduleTransaction {
            request_id: request.request_id().to_string(),
            amount: request.amount(),
            tx_hash: request.transaction_hash(),
        });
        self.check_failure(Operation::ScheduleTransaction)?;

        Ok(ScheduleTransactionResponse {
            transaction_id: format!("tx-{}", request.request_id()),
            status: "SCHEDULED".to_string(),
        })
    }

    async fn get_request_status(&self, request_id: &str) -> Result<RequestStatus> {
        self.log.push(RecordedCall::RequestStatus {
            request_id: request_id.to_string(),
        });
        self.check_supported(Operation::RequestStatus)?;
        self.check_failure(Operation::RequestStatus)?;

        Ok(RequestStatus {
            request_id: Some(request_id.to_string()),
            status: Some("PENDING".to_string()),
            details: serde_json::Map::new(),
        })
    }

    async fn supported_tokens(&self, _query: &SupportedTokensQuery) -> Result<Vec<SupportedToken>> {
        self.log.push(RecordedCall::SupportedTokens);
        self.check_failure(Operation::SupportedTokens)?;
        Ok(Vec::new())
    }

    async fn supported_chains(&self) -> Result<Vec<SupportedChain>> {
        self.log.push(RecordedCall::SupportedChains);
        self.check_failure(Operation::SupportedChains)?;
        Ok(Vec::new())
    }

    async fn balances(&self, wallet: Address) -> Result<BalancesResponse> {
        self.log.push(RecordedCall::Balances { wallet });
        self.check_failure(Operation::Balances)?;
        Ok(BalancesResponse {
            balances: Vec::new(),
        })
    }
}

// ============================================================================
// Fake Signer
// ============================================================================

/// A fake signer that "broadcasts" by returning sequential hashes.
#[derive(Clone, Debug)]
pub struct FakeSigner {
    address: Address,
    log: CallLog,
    sent: Arc<Mutex<u64>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl FakeSigner {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            log: CallLog::new(),
            sent: Arc::new(Mutex::new(0)),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    /// Records into `log` instead of a private log.
    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    /// Makes every later send fail with [`BridgeError::SigningFailed`].
    pub fn fail_with(&self, reason: &str) {
        *self.failure.lock().unwrap() = Some(reason.to_string());
    }

    /// Hash the `n`-th successful send returns (1-based).
    pub fn hash_for(n: u64) -> TxHash {
        TxHash::from(U256::from(n).to_be_bytes::<32>())
    }
}

#[async_trait]
impl TransactionSigner for FakeSigner {
    fn address(&self) -> Address {
        self.address
    }

    async fn send_transaction(&self, tx: TransactionDescriptor) -> Result<TxHash> {
        self.log.push(RecordedCall::SendTransaction {
            from: self.address,
            tx,
        });

        if let Some(reason) = self.failure.lock().unwrap().clone() {
            return Err(BridgeError::SigningFailed { reason });
        }

        let mut sent = self.sent.lock().unwrap();
        *sent += 1;
        Ok(Self::hash_for(*sent))
    }
}
