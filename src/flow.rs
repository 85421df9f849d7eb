// SPDX-FileCopyrightText: 2026 The deposit-bridge Authors
//
// SPDX-License-Identifier: Apache-2.0
//! Deposit protocol sequencing
//!
//! A run is one linear pipeline against the bridge service and a signer:
//!
//! ```text
//! funded: Init -> AddressRequested ------------> Broadcast -> Scheduled
//! QR:     Init -> AddressRequested -> Activated -> Broadcast -> Scheduled
//! ```
//!
//! Any failing step aborts the run with its error. Nothing is retried and
//! nothing already sent is rolled back.

use std::fmt;
use std::future::Future;

use alloy_primitives::{Address, TxHash, U256};
use bon::Builder;
use tracing::{error, info, Instrument, Span};

use crate::api::{
    ActivationRequest, ActivationResponse, DepositAddressRequest, DepositAddressResponse,
    Operation, ScheduleTransactionRequest, ScheduleTransactionResponse, TransactionDescriptor,
};
use crate::error::{BridgeError, Result};
use crate::spans;
use crate::traits::{BridgeApi, TransactionSigner};

/// Which of the two pipelines a run follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowVariant {
    /// Amount known up front; no activation.
    Funded,
    /// Amount chosen by the depositor; activation precedes funding.
    Qr,
}

impl FlowVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Funded => "funded",
            Self::Qr => "qr",
        }
    }
}

impl fmt::Display for FlowVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a run in the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowStage {
    #[default]
    Init,
    AddressRequested,
    Activated,
    Broadcast,
    Scheduled,
}

impl FlowStage {
    /// Moves to `next` if the variant allows that transition.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ContractViolation`] for any transition outside
    /// the variant's pipeline, including skipping activation in the QR flow.
    pub fn advance(self, next: FlowStage, variant: FlowVariant) -> Result<FlowStage> {
        use FlowStage::*;

        let allowed = match (self, next) {
            (Init, AddressRequested) => true,
            (AddressRequested, Activated) => variant == FlowVariant::Qr,
            (AddressRequested, Broadcast) => variant == FlowVariant::Funded,
            (Activated, Broadcast) => true,
            (Broadcast, Scheduled) => true,
            _ => false,
        };

        if allowed {
            Ok(next)
        } else {
            Err(BridgeError::contract_violation(format!(
                "illegal {variant} flow transition {self:?} -> {next:?}"
            )))
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowReceipt {
    pub variant: FlowVariant,
    pub request_id: String,
    pub deposit_address: String,
    pub tx_hash: TxHash,
    /// Amount reported when scheduling; zero for a QR run funded with the
    /// service-provided transaction.
    pub scheduled_amount: U256,
    /// Present for QR runs only.
    pub activation: Option<ActivationResponse>,
    pub schedule: ScheduleTransactionResponse,
    /// Every stage the run passed through, starting at [`FlowStage::Init`].
    pub stages: Vec<FlowStage>,
}

/// Drives a deposit request through the bridge protocol.
///
/// # Example
///
/// ```rust,no_run
/// use deposit_bridge::testing::{FakeBridgeApi, FakeSigner};
/// use deposit_bridge::{DepositAddressRequest, DepositFlow, TokenDescriptor};
/// use alloy_chains::NamedChain;
/// use alloy_primitives::{address, U256};
///
/// # async fn example() -> Result<(), deposit_bridge::BridgeError> {
/// let flow = DepositFlow::builder()
///     .api(FakeBridgeApi::new())
///     .signer(FakeSigner::new(address!("45c0470ef627a30efe30c06b13d883669b8fd3a8")))
///     .build();
///
/// let request = DepositAddressRequest::builder()
///     .destination_token(TokenDescriptor::new(
///         NamedChain::Base,
///         address!("833589fcd6edb6e08f4c7c32d4f71b54bda02913"),
///         6,
///     ))
///     .destination_recipient(address!("45c0470ef627a30efe30c06b13d883669b8fd3a8"))
///     .amount(U256::from(1_000_000u64))
///     .user_id("user-1")
///     .build();
///
/// let receipt = flow.run(&request).await?;
/// println!("scheduled {}", receipt.request_id);
/// # Ok(())
/// # }
/// ```
#[derive(Builder, Debug, Clone)]
pub struct DepositFlow<A, S>
where
    A: BridgeApi,
    S: TransactionSigner,
{
    api: A,
    signer: S,
}

impl<A, S> DepositFlow<A, S>
where
    A: BridgeApi,
    S: TransactionSigner,
{
    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn signer(&self) -> &S {
        &self.signer
    }

    /// Runs the funded flow when the request carries an amount, the QR flow
    /// funded with the service's transaction otherwise.
    pub async fn run(&self, request: &DepositAddressRequest) -> Result<FlowReceipt> {
        if request.is_qr_flow() {
            self.run_qr(request, None).await
        } else {
            self.run_funded(request).await
        }
    }

    /// Request address, broadcast the service's transaction, schedule.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidRequest`] when the request has no amount,
    /// otherwise the error of the first failing step.
    pub async fn run_funded(&self, request: &DepositAddressRequest) -> Result<FlowReceipt> {
        let amount = request.amount().ok_or_else(|| {
            BridgeError::invalid_request("the funded flow needs an amount; use run_qr instead")
        })?;

        let span = spans::deposit_flow(FlowVariant::Funded.as_str(), self.api.version());
        async move {
            let mut progress = Progress::new(FlowVariant::Funded);

            let response = self.request_address(request).await?;
            progress.advance(FlowStage::AddressRequested)?;
            Span::current().record("request_id", response.request_id.as_str());

            let tx = TransactionDescriptor::try_from(&response.tx_data)?;
            let tx_hash = self.broadcast(tx).await?;
            progress.advance(FlowStage::Broadcast)?;

            let schedule = self
                .schedule(request, &response, amount, tx_hash)
                .await?;
            progress.advance(FlowStage::Scheduled)?;

            Ok(progress.finish(response, tx_hash, amount, None, schedule))
        }
        .instrument(span)
        .await
    }

    /// Request address, activate it, broadcast, schedule.
    ///
    /// With `deposit_amount` set, the broadcast transaction is a transfer of
    /// that amount of the deposit token to the deposit address and the same
    /// amount is scheduled. Without it, the service's transaction is sent and
    /// zero is scheduled, leaving the amount to whatever the depositor sends.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::InvalidRequest`] when the request carries an amount
    /// - [`BridgeError::UnsupportedOperation`] when the API version has no QR
    ///   flow (checked before any call)
    /// - otherwise the error of the first failing step
    pub async fn run_qr(
        &self,
        request: &DepositAddressRequest,
        deposit_amount: Option<U256>,
    ) -> Result<FlowReceipt> {
        if !request.is_qr_flow() {
            return Err(BridgeError::invalid_request(
                "the QR flow must not carry an amount; use run_funded instead",
            ));
        }
        let version = self.api.version();
        if !version.supports_qr_flow() {
            return Err(BridgeError::UnsupportedOperation {
                operation: Operation::DepositAddress,
                version,
            });
        }

        let span = spans::deposit_flow(FlowVariant::Qr.as_str(), version);
        async move {
            let mut progress = Progress::new(FlowVariant::Qr);

            let response = self.request_address(request).await?;
            progress.advance(FlowStage::AddressRequested)?;
            Span::current().record("request_id", response.request_id.as_str());

            let activation = self.activate(request, &response).await?;
            progress.advance(FlowStage::Activated)?;

            let tx = match deposit_amount {
                Some(amount) => local_transfer(&response, amount)?,
                None => TransactionDescriptor::try_from(&response.tx_data)?,
            };
            let tx_hash = self.broadcast(tx).await?;
            progress.advance(FlowStage::Broadcast)?;

            let scheduled_amount = deposit_amount.unwrap_or(U256::ZERO);
            let schedule = self
                .schedule(request, &response, scheduled_amount, tx_hash)
                .await?;
            progress.advance(FlowStage::Scheduled)?;

            Ok(progress.finish(response, tx_hash, scheduled_amount, Some(activation), schedule))
        }
        .instrument(span)
        .await
    }

    async fn request_address(
        &self,
        request: &DepositAddressRequest,
    ) -> Result<DepositAddressResponse> {
        let token = request.destination_token();
        let span = spans::request_deposit_address(
            self.api.version(),
            token.chain_id(),
            &token.address.to_string(),
            request.is_qr_flow(),
        );

        traced(span, async {
            let response = self.api.request_deposit_address(request).await?;
            info!(
                request_id = %response.request_id,
                deposit_address = %response.deposit_address,
                status = %response.status,
                event = "deposit_address_received"
            );
            Ok(response)
        })
        .await
    }

    async fn activate(
        &self,
        request: &DepositAddressRequest,
        response: &DepositAddressResponse,
    ) -> Result<ActivationResponse> {
        let token = request.destination_token();
        let activation = ActivationRequest::builder()
            .deposit_address(response.deposit_address.as_str())
            .request_id(response.request_id.as_str())
            .chain_id(token.chain_id())
            .token_address(token.address)
            .build();

        let span =
            spans::activate_deposit_address(&response.request_id, &response.deposit_address);
        traced(span, async {
            let activated = self.api.activate_deposit_address(&activation).await?;
            info!(
                request_id = %response.request_id,
                status = %activated.status,
                event = "deposit_address_activated"
            );
            Ok(activated)
        })
        .await
    }

    async fn broadcast(&self, tx: TransactionDescriptor) -> Result<TxHash> {
        let span = spans::broadcast(tx.chain_id, &self.signer.address(), &tx.to);
        traced(span, async {
            let tx_hash = self.signer.send_transaction(tx).await?;
            Span::current().record("tx_hash", tx_hash.to_string());
            info!(tx_hash = %tx_hash, event = "transaction_broadcast");
            Ok(tx_hash)
        })
        .await
    }

    async fn schedule(
        &self,
        request: &DepositAddressRequest,
        response: &DepositAddressResponse,
        amount: U256,
        tx_hash: TxHash,
    ) -> Result<ScheduleTransactionResponse> {
        let token = request.destination_token();
        let schedule = ScheduleTransactionRequest::builder()
            .request_id(response.request_id.as_str())
            .chain_id(token.chain_id())
            .token_address(token.address)
            .amount(amount)
            .transaction_hash(tx_hash)
            .from_address(self.signer.address())
            .deposit_address(response.deposit_address.as_str())
            .build();

        let span = spans::schedule_transaction(&response.request_id, &tx_hash);
        traced(span, async {
            let scheduled = self.api.schedule_transaction(&schedule).await?;
            info!(
                request_id = %response.request_id,
                transaction_id = %scheduled.transaction_id,
                status = %scheduled.status,
                event = "transaction_scheduled"
            );
            Ok(scheduled)
        })
        .await
    }
}

/// Stage bookkeeping for one run.
struct Progress {
    variant: FlowVariant,
    stage: FlowStage,
    trail: Vec<FlowStage>,
}

impl Progress {
    fn new(variant: FlowVariant) -> Self {
        Self {
            variant,
            stage: FlowStage::Init,
            trail: vec![FlowStage::Init],
        }
    }

    fn advance(&mut self, next: FlowStage) -> Result<()> {
        self.stage = self.stage.advance(next, self.variant)?;
        self.trail.push(next);
        Ok(())
    }

    fn finish(
        self,
        response: DepositAddressResponse,
        tx_hash: TxHash,
        scheduled_amount: U256,
        activation: Option<ActivationResponse>,
        schedule: ScheduleTransactionResponse,
    ) -> FlowReceipt {
        info!(
            variant = %self.variant,
            request_id = %response.request_id,
            tx_hash = %tx_hash,
            event = "deposit_flow_completed"
        );

        FlowReceipt {
            variant: self.variant,
            request_id: response.request_id,
            deposit_address: response.deposit_address,
            tx_hash,
            scheduled_amount,
            activation,
            schedule,
            stages: self.trail,
        }
    }
}

/// Runs one step inside `span`, recording a failure on the span before
/// handing the error back.
async fn traced<T, F>(span: Span, step: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    async move {
        let result = step.await;
        if let Err(ref e) = result {
            spans::record_error(e);
            error!(error = %e, event = "deposit_flow_step_failed");
        }
        result
    }
    .instrument(span)
    .await
}

/// Transfer of `amount` of the response's deposit token to its deposit address.
fn local_transfer(response: &DepositAddressResponse, amount: U256) -> Result<TransactionDescriptor> {
    let chain_id = response
        .on_chain_id
        .parse::<u64>()
        .map_err(|e| BridgeError::InvalidTransaction {
            field: "onChainID",
            reason: format!("`{}`: {e}", response.on_chain_id),
        })?;
    let token = parse_address("depositTokenAddress", &response.deposit_token_address)?;
    let deposit_address = parse_address("depositAddress", &response.deposit_address)?;

    Ok(TransactionDescriptor::transfer(
        chain_id,
        token,
        deposit_address,
        amount,
    ))
}

fn parse_address(field: &'static str, raw: &str) -> Result<Address> {
    raw.parse().map_err(|e| BridgeError::InvalidTransaction {
        field,
        reason: format!("`{raw}`: {e}"),
    })
}
