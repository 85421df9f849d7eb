// SPDX-FileCopyrightText: 2026 The deposit-bridge Authors
//
// SPDX-License-Identifier: Apache-2.0
//! API versions and the endpoint table each one exposes
//!
//! The bridge service kept two incompatible API generations alive. Rather
//! than mirroring every call per version, one client selects its paths and
//! field shapes from an [`ApiVersion`] chosen at construction time.

use reqwest::Method;
use std::fmt;
use std::str::FromStr;

use crate::error::{BridgeError, Result};

/// Legacy balances route, shared by both API generations.
pub const BALANCES_PATH: &str = "/bridge-swap/balances/";

/// Bridge service API generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApiVersion {
    /// Single-blob call data, `toAmount`, no QR flow.
    V3,
    /// Split call data, `fromAmount`, mandatory `userId`/`dappId`, QR flow.
    #[default]
    V4,
}

impl ApiVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V3 => "v3",
            Self::V4 => "v4",
        }
    }

    /// Resolves the HTTP method and path for an operation.
    ///
    /// For [`Operation::RequestStatus`] and [`Operation::Balances`] the
    /// returned path is a prefix; the caller appends the request id or
    /// wallet address.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::UnsupportedOperation`] when the version does not
    /// expose the operation.
    pub fn endpoint(&self, operation: Operation) -> Result<Endpoint> {
        use Operation::*;

        let (method, path) = match (self, operation) {
            (Self::V3, DepositAddressFromAmount) => (Method::GET, "/v3/deposit-address"),
            (Self::V4, DepositAddressFromAmount) => {
                (Method::GET, "/v4/deposit-address/from-amount")
            }
            (Self::V4, DepositAddress) => (Method::GET, "/v4/get-deposit-address"),
            (Self::V3, ScheduleTransaction) => (Method::POST, "/v3/schedule-transaction"),
            (Self::V4, ScheduleTransaction) => (Method::POST, "/v4/schedule-transaction"),
            (Self::V4, ActivateDepositAddress) => {
                (Method::POST, "/v4/schedule-deposit-address-activation")
            }
            (Self::V4, RequestStatus) => (Method::GET, "/v4/request-status/"),
            (Self::V3, SupportedTokens) => (Method::GET, "/v3/supported-tokens"),
            (Self::V4, SupportedTokens) => (Method::GET, "/v4/supported-tokens"),
            (Self::V3, SupportedChains) => (Method::GET, "/v3/supported-chains"),
            (Self::V4, SupportedChains) => (Method::GET, "/v4/supported-chains"),
            (_, Balances) => (Method::GET, BALANCES_PATH),
            (Self::V3, DepositAddress | ActivateDepositAddress | RequestStatus) => {
                return Err(BridgeError::UnsupportedOperation {
                    operation,
                    version: *self,
                })
            }
        };

        Ok(Endpoint { method, path })
    }

    /// Whether the version exposes the QR (amount-less) deposit flow.
    pub fn supports_qr_flow(&self) -> bool {
        matches!(self, Self::V4)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v3" | "3" => Ok(Self::V3),
            "v4" | "4" => Ok(Self::V4),
            other => Err(BridgeError::InvalidConfig(format!(
                "unknown API version `{other}` (expected v3 or v4)"
            ))),
        }
    }
}

/// HTTP method and path of one bridge operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
}

/// Every remote call the bridge client can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    DepositAddressFromAmount,
    DepositAddress,
    ScheduleTransaction,
    ActivateDepositAddress,
    RequestStatus,
    SupportedTokens,
    SupportedChains,
    Balances,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DepositAddressFromAmount => "deposit_address_from_amount",
            Self::DepositAddress => "deposit_address",
            Self::ScheduleTransaction => "schedule_transaction",
            Self::ActivateDepositAddress => "activate_deposit_address",
            Self::RequestStatus => "request_status",
            Self::SupportedTokens => "supported_tokens",
            Self::SupportedChains => "supported_chains",
            Self::Balances => "balances",
        }
    }

    /// Message surfaced when the service fails without a `message` field.
    pub fn default_error_message(&self) -> &'static str {
        match self {
            Self::DepositAddressFromAmount => "Failed to get deposit address from amount",
            Self::DepositAddress => "Failed to get deposit address",
            Self::ScheduleTransaction => "Failed to schedule transaction",
            Self::ActivateDepositAddress => "Failed to schedule deposit address activation",
            Self::RequestStatus => "Failed to get request status",
            Self::SupportedTokens => "Failed to get supported tokens",
            Self::SupportedChains => "Failed to get supported chains",
            Self::Balances => "Failed to get balances",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
