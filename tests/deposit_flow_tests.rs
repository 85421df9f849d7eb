//! Integration tests for the deposit protocol using fake implementations
//!
//! Both pipelines run against a fake bridge service and a fake signer that
//! share one call log, so the exact order of external calls can be asserted.

use alloy_chains::NamedChain;
use alloy_primitives::{address, Address, U256};
use deposit_bridge::calldata::EncodingMode;
use deposit_bridge::contracts::targets::{token_mint, USDC_BASE};
use deposit_bridge::testing::{CallLog, FakeBridgeApi, FakeSigner, RecordedCall};
use deposit_bridge::{
    ApiVersion, BridgeApi, BridgeError, DepositAddressRequest, DepositFlow, FlowStage,
    FlowVariant, Operation, TokenDescriptor,
};

const WALLET: Address = address!("45c0470ef627a30efe30c06b13d883669b8fd3a8");

/// Helper function to create a flow whose fakes share one call log
fn create_test_flow(api: FakeBridgeApi) -> (DepositFlow<FakeBridgeApi, FakeSigner>, CallLog) {
    let log = CallLog::new();
    let flow = DepositFlow::builder()
        .api(api.with_log(log.clone()))
        .signer(FakeSigner::new(WALLET).with_log(log.clone()))
        .build();
    (flow, log)
}

fn usdc_base() -> TokenDescriptor {
    TokenDescriptor::new(NamedChain::Base, USDC_BASE, 6)
}

fn funded_request() -> DepositAddressRequest {
    DepositAddressRequest::builder()
        .destination_token(usdc_base())
        .destination_recipient(WALLET)
        .amount(U256::from(1_000_000u64))
        .user_id(WALLET.to_string())
        .call_data(token_mint(USDC_BASE, WALLET).encode(EncodingMode::Split).unwrap())
        .build()
}

fn qr_request() -> DepositAddressRequest {
    DepositAddressRequest::builder()
        .destination_token(usdc_base())
        .destination_recipient(WALLET)
        .user_id(WALLET.to_string())
        .source_chain_id(1)
        .build()
}

#[tokio::test]
async fn test_funded_flow_makes_three_calls_in_order() {
    let (flow, log) = create_test_flow(FakeBridgeApi::new());

    let receipt = flow.run(&funded_request()).await.unwrap();

    assert_eq!(
        log.names(),
        vec![
            "request_deposit_address",
            "send_transaction",
            "schedule_transaction"
        ]
    );
    assert_eq!(receipt.variant, FlowVariant::Funded);
    assert!(receipt.activation.is_none());
    assert_eq!(
        receipt.stages,
        vec![
            FlowStage::Init,
            FlowStage::AddressRequested,
            FlowStage::Broadcast,
            FlowStage::Scheduled
        ]
    );
}

#[tokio::test]
async fn test_funded_flow_threads_request_id_and_amount() {
    let (flow, log) = create_test_flow(FakeBridgeApi::new());

    let receipt = flow.run(&funded_request()).await.unwrap();

    let calls = log.calls();
    match &calls[2] {
        RecordedCall::ScheduleTransaction {
            request_id,
            amount,
            tx_hash,
        } => {
            assert_eq!(request_id, &receipt.request_id);
            assert_eq!(*amount, U256::from(1_000_000u64));
            assert_eq!(*tx_hash, receipt.tx_hash);
            assert_eq!(*tx_hash, FakeSigner::hash_for(1));
        }
        other => panic!("expected schedule_transaction, got {other:?}"),
    }
    assert_eq!(receipt.schedule.transaction_id, format!("tx-{}", receipt.request_id));
}

#[tokio::test]
async fn test_funded_flow_broadcasts_service_tx_data() {
    let (flow, log) = create_test_flow(FakeBridgeApi::new().with_gas_limit(None));

    let receipt = flow.run(&funded_request()).await.unwrap();

    match &log.calls()[1] {
        RecordedCall::SendTransaction { from, tx } => {
            assert_eq!(*from, WALLET);
            assert_eq!(tx.to.to_string(), receipt.deposit_address);
            assert_eq!(tx.value, U256::from(1_000_000u64));
            assert_eq!(tx.chain_id, 8453);
            assert_eq!(tx.gas_limit, None);
        }
        other => panic!("expected send_transaction, got {other:?}"),
    }
}

#[tokio::test]
async fn test_qr_flow_activates_before_signing() {
    let (flow, log) = create_test_flow(FakeBridgeApi::new());

    let receipt = flow.run(&qr_request()).await.unwrap();

    assert_eq!(
        log.names(),
        vec![
            "request_deposit_address",
            "activate_deposit_address",
            "send_transaction",
            "schedule_transaction"
        ]
    );
    assert_eq!(receipt.variant, FlowVariant::Qr);
    assert_eq!(receipt.scheduled_amount, U256::ZERO);
    assert_eq!(
        receipt.activation.as_ref().map(|a| a.status.as_str()),
        Some("ACTIVATED")
    );

    let calls = log.calls();
    match (&calls[0], &calls[1], &calls[3]) {
        (
            RecordedCall::RequestDepositAddress { qr_flow },
            RecordedCall::ActivateDepositAddress {
                request_id: activated_id,
                deposit_address,
            },
            RecordedCall::ScheduleTransaction {
                request_id: scheduled_id,
                amount,
                ..
            },
        ) => {
            assert!(*qr_flow);
            assert_eq!(activated_id, &receipt.request_id);
            assert_eq!(deposit_address, &receipt.deposit_address);
            assert_eq!(scheduled_id, &receipt.request_id);
            assert_eq!(*amount, U256::ZERO);
        }
        other => panic!("unexpected call sequence: {other:?}"),
    }
}

#[tokio::test]
async fn test_qr_flow_with_local_transfer_reports_actual_amount() {
    let (flow, log) = create_test_flow(FakeBridgeApi::new());
    let deposit = U256::from(2_500_000u64);

    let receipt = flow.run_qr(&qr_request(), Some(deposit)).await.unwrap();

    assert_eq!(receipt.scheduled_amount, deposit);
    match &log.calls()[2] {
        RecordedCall::SendTransaction { tx, .. } => {
            // ERC20 transfer to the deposit address, sent to the token contract
            assert_eq!(tx.to, USDC_BASE);
            assert_eq!(tx.value, U256::ZERO);
            assert_eq!(&tx.data[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
        }
        other => panic!("expected send_transaction, got {other:?}"),
    }
}

#[tokio::test]
async fn test_two_address_requests_get_distinct_ids() {
    let (flow, _log) = create_test_flow(FakeBridgeApi::new());

    let first = flow.run(&funded_request()).await.unwrap();
    let second = flow.run(&funded_request()).await.unwrap();

    assert_ne!(first.request_id, second.request_id);
    assert_ne!(first.deposit_address, second.deposit_address);
    assert_ne!(first.tx_hash, second.tx_hash);
}

#[tokio::test]
async fn test_service_error_aborts_before_signing() {
    let api = FakeBridgeApi::new();
    api.fail_with(Operation::DepositAddressFromAmount, 400, "invalid token");
    let (flow, log) = create_test_flow(api);

    let err = flow.run(&funded_request()).await.unwrap_err();

    assert_eq!(err.to_string(), "invalid token");
    assert_eq!(err.status(), Some(400));
    assert_eq!(log.names(), vec!["request_deposit_address"]);
}

#[tokio::test]
async fn test_activation_failure_aborts_qr_flow() {
    let api = FakeBridgeApi::new();
    api.fail_with(Operation::ActivateDepositAddress, 500, "");
    let (flow, log) = create_test_flow(api);

    let err = flow.run(&qr_request()).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Failed to schedule deposit address activation"
    );
    assert_eq!(
        log.names(),
        vec!["request_deposit_address", "activate_deposit_address"]
    );
}

#[tokio::test]
async fn test_signing_failure_skips_scheduling() {
    let log = CallLog::new();
    let signer = FakeSigner::new(WALLET).with_log(log.clone());
    signer.fail_with("insufficient funds");
    let flow = DepositFlow::builder()
        .api(FakeBridgeApi::new().with_log(log.clone()))
        .signer(signer)
        .build();

    let err = flow.run(&funded_request()).await.unwrap_err();

    assert!(matches!(err, BridgeError::SigningFailed { .. }));
    assert_eq!(
        log.names(),
        vec!["request_deposit_address", "send_transaction"]
    );
}

#[tokio::test]
async fn test_schedule_failure_surfaces_after_broadcast() {
    let api = FakeBridgeApi::new();
    api.fail_with(Operation::ScheduleTransaction, 409, "transaction already scheduled");
    let (flow, log) = create_test_flow(api);

    let err = flow.run(&funded_request()).await.unwrap_err();

    assert_eq!(err.to_string(), "transaction already scheduled");
    assert_eq!(log.len(), 3);
}

#[tokio::test]
async fn test_qr_flow_unsupported_on_v3_without_any_call() {
    let (flow, log) = create_test_flow(FakeBridgeApi::new().with_version(ApiVersion::V3));

    let err = flow.run(&qr_request()).await.unwrap_err();

    assert!(matches!(
        err,
        BridgeError::UnsupportedOperation {
            version: ApiVersion::V3,
            ..
        }
    ));
    assert!(log.is_empty());
}

#[tokio::test]
async fn test_v3_rejects_split_call_data() {
    let (flow, log) = create_test_flow(FakeBridgeApi::new().with_version(ApiVersion::V3));

    let err = flow.run(&funded_request()).await.unwrap_err();

    assert!(matches!(err, BridgeError::InvalidRequest { .. }));
    assert_eq!(log.names(), vec!["request_deposit_address"]);
}

#[tokio::test]
async fn test_v3_funded_flow_with_blob_call_data() {
    let (flow, log) = create_test_flow(FakeBridgeApi::new().with_version(ApiVersion::V3));
    let amount = U256::from(1_000_000u64);
    let request = DepositAddressRequest::builder()
        .destination_token(usdc_base())
        .destination_recipient(WALLET)
        .amount(amount)
        .call_data(
            token_mint(USDC_BASE, WALLET)
                .encode(EncodingMode::Blob { amount })
                .unwrap(),
        )
        .build();

    flow.run(&request).await.unwrap();

    assert_eq!(log.len(), 3);
}

#[tokio::test]
async fn test_variant_entry_points_check_amount() {
    let (flow, log) = create_test_flow(FakeBridgeApi::new());

    assert!(matches!(
        flow.run_funded(&qr_request()).await,
        Err(BridgeError::InvalidRequest { .. })
    ));
    assert!(matches!(
        flow.run_qr(&funded_request(), None).await,
        Err(BridgeError::InvalidRequest { .. })
    ));
    assert!(log.is_empty());
}

#[tokio::test]
async fn test_status_lookup_is_a_single_call() {
    let (flow, log) = create_test_flow(FakeBridgeApi::new());
    let receipt = flow.run(&funded_request()).await.unwrap();

    let status = flow
        .api()
        .get_request_status(&receipt.request_id)
        .await
        .unwrap();

    assert_eq!(status.request_id.as_deref(), Some(receipt.request_id.as_str()));
    assert_eq!(log.len(), 4);
}
