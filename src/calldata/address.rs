// SPDX-FileCopyrightText: 2026 The deposit-bridge Authors
//
// SPDX-License-Identifier: Apache-2.0
//! Embedding 20-byte addresses into 32-byte slots

use alloy_primitives::{Address, B256};

use crate::error::{BridgeError, Result};

/// Left-pads an address to a 32-byte word: 12 zero bytes, then the address.
pub fn pad_address(address: Address) -> B256 {
    address.into_word()
}

/// Left-pads a hex address string to a 32-byte hex word.
///
/// The original hex digits are kept verbatim (including their case); only
/// `0` nibbles are prepended.
///
/// # Errors
///
/// Returns [`BridgeError::ContractViolation`] unless the input is exactly 40
/// hex digits, with or without a `0x` prefix.
///
/// # Example
///
/// ```rust
/// use deposit_bridge::calldata::pad_address_hex;
///
/// let word = pad_address_hex("0x45c0470EF627A30efe30C06B13D883669b8fd3A8").unwrap();
/// assert_eq!(
///     word,
///     "0x00000000000000000000000045c0470EF627A30efe30C06B13D883669b8fd3A8"
/// );
/// ```
pub fn pad_address_hex(address: &str) -> Result<String> {
    let digits = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);

    if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(BridgeError::contract_violation(format!(
            "`{address}` is not a 20-byte hex address"
        )));
    }

    Ok(format!("0x{digits:0>64}"))
}
