// SPDX-FileCopyrightText: 2026 The deposit-bridge Authors
//
// SPDX-License-Identifier: Apache-2.0
//! Response records returned by the bridge service

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Answer to a deposit-address request.
///
/// The service encodes most numeric fields as strings, but not consistently
/// across deployments; the numeric-ish fields accept either form.
///
/// # Example Response
///
/// ```json
/// {
///   "requestId": "6c1b...",
///   "status": "PENDING",
///   "depositAddress": "0x5e0b...",
///   "onChainID": "8453",
///   "depositTokenAddress": "0x8335...",
///   "amount": "1000000",
///   "executionTime": "30",
///   "gasFee": "0.01",
///   "txData": { "chainId": "8453", "from": "0x...", "to": "0x...",
///               "data": "0x", "value": "0", "gasLimit": "100000" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositAddressResponse {
    pub request_id: String,
    #[serde(default)]
    pub status: String,
    pub deposit_address: String,
    #[serde(rename = "onChainID", default, deserialize_with = "string_or_number")]
    pub on_chain_id: String,
    #[serde(default)]
    pub deposit_token_name: Option<String>,
    #[serde(default)]
    pub deposit_token_symbol: Option<String>,
    #[serde(default)]
    pub deposit_token_address: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub deposit_token_decimals: Option<String>,
    #[serde(default)]
    pub deposit_token_usd_price: Option<f64>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub amount: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub execution_time: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub gas_fee: String,
    #[serde(default)]
    pub tx_data: TxData,
}

/// The transaction the service asks the client to send, as it appears on
/// the wire. Convert with [`TransactionDescriptor::try_from`](crate::TransactionDescriptor).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxData {
    #[serde(default, deserialize_with = "string_or_number")]
    pub chain_id: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub data: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub value: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub gas_limit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTransactionResponse {
    #[serde(default)]
    pub transaction_id: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActivationResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Status of a bridging request.
///
/// The service does not document this payload; fields beyond the id and
/// status are kept verbatim in `details`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStatus {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub details: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SupportedToken {
    pub symbol: String,
    pub name: String,
    pub address: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportedChain {
    pub chain_id: u64,
    pub name: String,
    pub native_currency: NativeCurrency,
    #[serde(default)]
    pub rpc_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NativeCurrency {
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub chain_id: u64,
    /// `None` for the chain's native currency.
    pub token_address: Option<String>,
    pub symbol: String,
    #[serde(deserialize_with = "string_or_number")]
    pub balance: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BalancesResponse {
    #[serde(default)]
    pub balances: Vec<TokenBalance>,
}

/// Error body returned alongside non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ServiceErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Accepts a JSON string or number and yields its string form.
///
/// `null` becomes the empty string.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = string_or_number(deserializer)?;
    Ok((!s.is_empty()).then_some(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPOSIT_RESPONSE: &str = r#"{
        "requestId": "req-1",
        "status": "PENDING",
        "depositAddress": "0x5e0b1f3b0f1e8f6c3a0a2d4f8d6a9b3c7e1f2a4b",
        "onChainID": 8453,
        "depositTokenName": "USD Coin",
        "depositTokenSymbol": "USDC",
        "depositTokenAddress": "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913",
        "depositTokenDecimals": 6,
        "depositTokenUsdPrice": 1.0,
        "amount": "1000000",
        "executionTime": "30",
        "gasFee": "0.02",
        "txData": {
            "chainId": "8453",
            "from": "0x45c0470ef627a30efe30c06b13d883669b8fd3a8",
            "to": "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913",
            "data": "0xa9059cbb",
            "value": "0",
            "gasLimit": 120000
        }
    }"#;

    #[test]
    fn test_deserialize_deposit_address_response() {
        let response: DepositAddressResponse = serde_json::from_str(DEPOSIT_RESPONSE).unwrap();

        assert_eq!(response.request_id, "req-1");
        assert_eq!(response.on_chain_id, "8453");
        assert_eq!(response.deposit_token_decimals.as_deref(), Some("6"));
        assert_eq!(response.deposit_token_symbol.as_deref(), Some("USDC"));
        assert_eq!(response.tx_data.chain_id, "8453");
        assert_eq!(response.tx_data.gas_limit, "120000");
        assert_eq!(response.tx_data.data, "0xa9059cbb");
    }

    #[test]
    fn test_deserialize_response_without_tx_data() {
        let json = r#"{"requestId":"req-2","depositAddress":"0x01"}"#;
        let response: DepositAddressResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.tx_data, TxData::default());
        assert!(response.deposit_token_decimals.is_none());
        assert_eq!(response.amount, "");
    }

    #[test]
    fn test_deserialize_request_status_keeps_unknown_fields() {
        let json = r#"{"requestId":"req-3","status":"COMPLETED","destinationTxHash":"0xabc"}"#;
        let status: RequestStatus = serde_json::from_str(json).unwrap();

        assert_eq!(status.status.as_deref(), Some("COMPLETED"));
        assert_eq!(
            status.details.get("destinationTxHash"),
            Some(&Value::String("0xabc".to_string()))
        );
    }

    #[test]
    fn test_deserialize_balances() {
        let json = r#"{"balances":[
            {"chainId":8453,"tokenAddress":null,"symbol":"ETH","balance":"1000","decimals":18},
            {"chainId":8453,"tokenAddress":"0x833589fcd6edb6e08f4c7c32d4f71b54bda02913","symbol":"USDC","balance":42,"decimals":6}
        ]}"#;
        let balances: BalancesResponse = serde_json::from_str(json).unwrap();

        assert_eq!(balances.balances.len(), 2);
        assert!(balances.balances[0].token_address.is_none());
        assert_eq!(balances.balances[1].balance, "42");
    }

    #[test]
    fn test_rejects_non_scalar_numeric_field() {
        let json = r#"{"requestId":"r","depositAddress":"0x01","amount":{"v":1}}"#;
        assert!(serde_json::from_str::<DepositAddressResponse>(json).is_err());
    }
}
