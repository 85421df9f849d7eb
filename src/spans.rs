//! Span helpers for deposit-bridge operations
//!
//! Static span names with structured attributes, kept apart from the business
//! logic so callers can attach their own subscribers or exporters.
//!
//! # Example
//!
//! ```rust,no_run
//! use deposit_bridge::{spans, ApiVersion};
//!
//! let span = spans::request_deposit_address(ApiVersion::V4, 8453, "0x8335...", true);
//! let _guard = span.enter();
//! // Custom deposit-address logic here
//! ```

use alloy_primitives::{Address, TxHash};
use tracing::Span;
use url::Url;

use crate::api::{ApiVersion, Operation};

/// Create span for one full protocol run.
///
/// Parent: Caller
/// Children: every step span below
#[inline]
pub fn deposit_flow(variant: &'static str, version: ApiVersion) -> Span {
    tracing::info_span!(
        "deposit_bridge.deposit_flow",
        variant = variant,
        version = %version,
        request_id = tracing::field::Empty,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for the deposit-address request.
///
/// Parent: deposit_bridge.deposit_flow
/// Children: deposit_bridge.http_request
#[inline]
pub fn request_deposit_address(
    version: ApiVersion,
    destination_chain_id: u64,
    destination_token: &str,
    qr_flow: bool,
) -> Span {
    tracing::info_span!(
        "deposit_bridge.request_deposit_address",
        version = %version,
        destination_chain_id = destination_chain_id,
        destination_token = destination_token,
        qr_flow = qr_flow,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for QR-flow address activation.
///
/// Parent: deposit_bridge.deposit_flow
/// Children: deposit_bridge.http_request
#[inline]
pub fn activate_deposit_address(request_id: &str, deposit_address: &str) -> Span {
    tracing::info_span!(
        "deposit_bridge.activate_deposit_address",
        request_id = request_id,
        deposit_address = deposit_address,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for signing and broadcasting the funding transaction.
///
/// Parent: deposit_bridge.deposit_flow
/// Children: Provider RPC calls
#[inline]
pub fn broadcast(chain_id: u64, from: &Address, to: &Address) -> Span {
    tracing::info_span!(
        "deposit_bridge.broadcast",
        chain_id = chain_id,
        from = %from,
        to = %to,
        tx_hash = tracing::field::Empty,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for reporting the broadcast hash to the service.
///
/// Parent: deposit_bridge.deposit_flow
/// Children: deposit_bridge.http_request
#[inline]
pub fn schedule_transaction(request_id: &str, tx_hash: &TxHash) -> Span {
    tracing::info_span!(
        "deposit_bridge.schedule_transaction",
        request_id = request_id,
        tx_hash = %tx_hash,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for one HTTP request to the bridge service.
///
/// Parent: Step span, or none for direct client use
/// Children: None
#[inline]
pub fn http_request(method: &str, url: &Url, operation: Operation) -> Span {
    tracing::debug_span!(
        "deposit_bridge.http_request",
        http.method = method,
        http.url = %url,
        http.status_code = tracing::field::Empty,
        operation = %operation,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Record error attributes on the current span.
///
/// # Example
///
/// ```rust,no_run
/// use deposit_bridge::{spans, BridgeError};
///
/// # fn example() -> Result<(), BridgeError> {
/// let span = tracing::info_span!("deposit_bridge.operation");
/// let _guard = span.enter();
///
/// let result = some_operation();
/// if let Err(ref e) = result {
///     spans::record_error(e);
/// }
/// result
/// # }
/// # fn some_operation() -> Result<(), BridgeError> { Ok(()) }
/// ```
pub fn record_error<E: std::error::Error>(error: &E) {
    let current_span = tracing::Span::current();
    let message = error.to_string();
    current_span.record("error.type", message.split(':').next().unwrap_or("Unknown"));
    current_span.record("error.message", message.as_str());
    current_span.record("otel.status_code", "ERROR");

    if let Some(source) = error.source() {
        current_span.record("error.context", source.to_string());
    }
}

/// Record error attributes with custom context on the current span.
pub fn record_error_with_context(
    error_type: &str,
    error_message: &str,
    additional_context: Option<&str>,
) {
    let current_span = tracing::Span::current();
    current_span.record("error.type", error_type);
    current_span.record("error.message", error_message);
    current_span.record("otel.status_code", "ERROR");

    if let Some(context) = additional_context {
        current_span.record("error.context", context);
    }
}
