// SPDX-FileCopyrightText: 2026 The deposit-bridge Authors
//
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

use crate::api::{ApiVersion, Operation};

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx answer from the bridge service.
    ///
    /// Displays exactly the message the service returned, or the operation's
    /// default message when the body carried none.
    #[error("{message}")]
    Service {
        operation: Operation,
        status: u16,
        message: String,
    },

    #[error("{}: {source}", .operation.default_error_message())]
    MalformedResponse {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    #[error("Signing failed: {reason}")]
    SigningFailed { reason: String },

    #[error("Contract violation: {reason}")]
    ContractViolation { reason: String },

    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("{operation} is not supported by API {version}")]
    UnsupportedOperation {
        operation: Operation,
        version: ApiVersion,
    },

    #[error("Invalid transaction field `{field}`: {reason}")]
    InvalidTransaction { field: &'static str, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid URL: {reason}")]
    InvalidUrl { reason: String },

    #[error("ABI encoding/decoding error: {0}")]
    Abi(#[from] alloy_dyn_abi::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Hex conversion error: {0}")]
    Hex(#[from] alloy_primitives::hex::FromHexError),
}

impl BridgeError {
    pub(crate) fn contract_violation(reason: impl Into<String>) -> Self {
        Self::ContractViolation {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Returns the HTTP status of a service error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
