// SPDX-FileCopyrightText: 2026 The deposit-bridge Authors
//
// SPDX-License-Identifier: Apache-2.0
//! Typed transaction handed to a [`TransactionSigner`](crate::TransactionSigner)

use alloy_primitives::{Address, Bytes, U256};

use super::request::is_native_token;
use super::types::TxData;
use crate::contracts::erc20::transfer_call_data;
use crate::error::{BridgeError, Result};

/// A transaction ready to be signed and broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDescriptor {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    /// `None` lets the signer estimate gas.
    pub gas_limit: Option<u64>,
    pub chain_id: u64,
}

impl TransactionDescriptor {
    /// Sends `amount` of `token` to `to`.
    ///
    /// Native currency (zero address or the `0xEeee…` sentinel) becomes a
    /// plain value transfer, anything else an ERC20 `transfer` call.
    pub fn transfer(chain_id: u64, token: Address, to: Address, amount: U256) -> Self {
        if is_native_token(token) {
            Self {
                to,
                value: amount,
                data: Bytes::new(),
                gas_limit: None,
                chain_id,
            }
        } else {
            Self {
                to: token,
                value: U256::ZERO,
                data: transfer_call_data(to, amount),
                gas_limit: None,
                chain_id,
            }
        }
    }
}

impl TryFrom<&TxData> for TransactionDescriptor {
    type Error = BridgeError;

    fn try_from(tx: &TxData) -> Result<Self> {
        let to = tx
            .to
            .parse::<Address>()
            .map_err(|e| invalid("to", &tx.to, e))?;

        let value = if tx.value.is_empty() {
            U256::ZERO
        } else {
            tx.value
                .parse::<U256>()
                .map_err(|e| invalid("value", &tx.value, e))?
        };

        let data = if tx.data.is_empty() {
            Bytes::new()
        } else {
            tx.data
                .parse::<Bytes>()
                .map_err(|e| invalid("data", &tx.data, e))?
        };

        let gas_limit = if tx.gas_limit.is_empty() {
            None
        } else {
            Some(parse_u64("gasLimit", &tx.gas_limit)?)
        };

        let chain_id = parse_u64("chainId", &tx.chain_id)?;

        Ok(Self {
            to,
            value,
            data,
            gas_limit,
            chain_id,
        })
    }
}

fn parse_u64(field: &'static str, raw: &str) -> Result<u64> {
    let parsed = match raw.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => raw.parse::<u64>(),
    };
    parsed.map_err(|e| invalid(field, raw, e))
}

fn invalid(field: &'static str, raw: &str, err: impl std::fmt::Display) -> BridgeError {
    BridgeError::InvalidTransaction {
        field,
        reason: format!("`{raw}`: {err}"),
    }
}
